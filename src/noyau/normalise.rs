// src/noyau/normalise.rs
//
// Normalisation de la saisie AVANT tokenisation.
// - glyphes du pavé -> ASCII : ÷ -> /, × -> *, − -> -
// - zéros de tête : 007 -> 7, 000 -> 0, 00.5 -> 0.5 (la partie décimale n’est jamais touchée)
// - pourcentage binaire : "a%b" (deux nombres) -> "(a*b/100)", gauche -> droite, sans chevauchement
//
// Chaque caractère produit garde l’index du caractère brut d’origine :
// les erreurs sont ainsi rapportées sur ce que l’utilisateur a tapé.

/// Texte normalisé + origine (index brut) de chaque caractère.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Normalise {
    pub texte: String,
    origines: Vec<usize>,
    longueur_brute: usize,
}

impl Normalise {
    /// Position dans le texte normalisé -> position dans la saisie brute.
    /// Au-delà de la fin : fin de la saisie brute.
    pub fn position_brute(&self, pos: usize) -> usize {
        self.origines
            .get(pos)
            .copied()
            .unwrap_or(self.longueur_brute)
    }
}

/// Chaîne brute -> chaîne normalisée (sans la carte des positions).
/// Le pipeline passe par `normaliser`, qui garde les origines.
#[cfg(test)]
pub fn normalize(raw: &str) -> String {
    normaliser(raw).texte
}

pub fn normaliser(raw: &str) -> Normalise {
    let src: Vec<char> = raw.chars().collect();

    let etape1 = glyphes_et_zeros(&src);
    let etape2 = pourcentage_binaire(&etape1);

    Normalise {
        texte: etape2.iter().map(|(c, _)| *c).collect(),
        origines: etape2.iter().map(|(_, o)| *o).collect(),
        longueur_brute: src.len(),
    }
}

fn glyphe_canonique(c: char) -> char {
    match c {
        '÷' => '/',
        '×' => '*',
        '−' => '-',
        _ => c,
    }
}

fn est_car_nombre(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Fin (exclue) du littéral [0-9.]+ qui commence en `start`.
fn fin_nombre(src: &[(char, usize)], start: usize) -> usize {
    let mut i = start;
    while i < src.len() && est_car_nombre(src[i].0) {
        i += 1;
    }
    i
}

fn sauter_espaces(src: &[(char, usize)], mut i: usize) -> usize {
    while i < src.len() && src[i].0.is_whitespace() {
        i += 1;
    }
    i
}

fn glyphes_et_zeros(src: &[char]) -> Vec<(char, usize)> {
    let mut out = Vec::with_capacity(src.len());
    let mut i = 0;

    while i < src.len() {
        let c = src[i];

        if !est_car_nombre(c) {
            out.push((glyphe_canonique(c), i));
            i += 1;
            continue;
        }

        let start = i;
        while i < src.len() && est_car_nombre(src[i]) {
            i += 1;
        }

        // un '0' n’est retiré que s’il est suivi d’un autre chiffre
        let mut k = start;
        while k + 1 < i && src[k] == '0' && src[k + 1].is_ascii_digit() {
            k += 1;
        }

        out.extend((k..i).map(|j| (src[j], j)));
    }

    out
}

fn pourcentage_binaire(src: &[(char, usize)]) -> Vec<(char, usize)> {
    let mut out = Vec::with_capacity(src.len() + 8);
    let mut i = 0;

    while i < src.len() {
        if !est_car_nombre(src[i].0) {
            out.push(src[i]);
            i += 1;
            continue;
        }

        let a = i..fin_nombre(src, i);

        // motif : nombre [espaces] % [espaces] nombre
        let p = sauter_espaces(src, a.end);
        let b_start = sauter_espaces(src, p + 1);
        let motif = p < src.len()
            && src[p].0 == '%'
            && b_start < src.len()
            && est_car_nombre(src[b_start].0);

        if !motif {
            out.extend_from_slice(&src[a.clone()]);
            i = a.end;
            continue;
        }

        let b = b_start..fin_nombre(src, b_start);
        let o_a = src[a.start].1;
        let o_pct = src[p].1;

        out.push(('(', o_a));
        out.extend_from_slice(&src[a]);
        out.push(('*', o_pct));
        out.extend_from_slice(&src[b.clone()]);
        out.extend("/100)".chars().map(|c| (c, o_pct)));

        i = b.end;
    }

    out
}
