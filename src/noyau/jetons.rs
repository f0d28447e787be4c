// src/noyau/jetons.rs

use super::erreurs::{ErreurCalcul, ParseErrorKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Percent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    // Littéral décimal tel que saisi (ex: "12", "0.5", ".5", "3.")
    Num(String),
    Op(Op),
    LPar,
    RPar,
}

/// Jeton + position (index de caractère dans la chaîne tokenisée).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Jeton {
    pub tok: Tok,
    pub pos: usize,
}

impl Op {
    /// Glyphe -> opérateur. Accepte l’ASCII et les glyphes du pavé (÷ × −).
    pub fn depuis_glyphe(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Add),
            '-' | '−' => Some(Op::Sub),
            '*' | '×' => Some(Op::Mul),
            '/' | '÷' => Some(Op::Div),
            '%' => Some(Op::Percent),
            _ => None,
        }
    }

    pub fn symbole(&self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
            Op::Percent => '%',
        }
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (un seul point) : 12, 0.5, .5, 3.
/// - opérateurs + - * / % (et ÷ × −)
/// - parenthèses ( )
/// - espaces ignorés
///
/// Le moins unaire n’est PAS résolu ici (c’est le travail de l’évaluateur).
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, ErreurCalcul> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let tok = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            _ => Op::depuis_glyphe(c).map(Tok::Op),
        };
        if let Some(tok) = tok {
            out.push(Jeton { tok, pos: i });
            i += 1;
            continue;
        }

        // Nombre : [0-9.]+ glouton, puis validation (au moins un chiffre, au plus un point)
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let lit: String = chars[start..i].iter().collect();

            let points = lit.chars().filter(|&c| c == '.').count();
            if points > 1 || !lit.chars().any(|c| c.is_ascii_digit()) {
                return Err(ErreurCalcul::parse(start, ParseErrorKind::InvalidNumber));
            }

            out.push(Jeton {
                tok: Tok::Num(lit),
                pos: start,
            });
            continue;
        }

        return Err(ErreurCalcul::parse(i, ParseErrorKind::InvalidCharacter));
    }

    Ok(out)
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(jetons: &[Jeton]) -> String {
    jetons
        .iter()
        .map(|j| match &j.tok {
            Tok::Num(lit) => lit.clone(),
            Tok::Op(op) => op.symbole().to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
