//! Noyau — évaluation (pipeline réel)
//!
//! normalise -> jetons -> descente récursive (évaluation directe, f64)
//!
//! Grammaire fermée (rien d’autre n’est reconnu, rien n’est exécuté) :
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := pct (('*' | '/') pct)*
//! pct    := factor ('%' factor?)*
//! factor := '-' factor | nombre | '(' expr ')'
//! ```
//!
//! `a % b` vaut a*b/100 ; `a %` sans opérande à droite vaut a/100.
//! `%` lie plus fort que `*` et `/`, comme la réécriture `(a*b/100)` du normaliseur.

use log::debug;

use super::erreurs::{ErreurCalcul, MathErrorKind, ParseErrorKind};
use super::jetons::{format_tokens, tokenize, Jeton, Op, Tok};
use super::normalise::normaliser;

/// Garde-fou : profondeur max (parenthèses + moins unaires imbriqués).
pub const PROFONDEUR_MAX: usize = 200;

/// API publique : saisie brute -> valeur.
/// - Ok(None) : entrée vide (rien à afficher, pas une erreur)
/// - positions d’erreur rapportées sur la saisie brute
pub fn normalize_and_evaluate(raw: &str) -> Result<Option<f64>, ErreurCalcul> {
    let n = normaliser(raw);

    let jetons = tokenize(&n.texte).map_err(|e| e.avec_position(|p| n.position_brute(p)))?;
    debug!("{raw:?} -> {:?} -> [{}]", n.texte, format_tokens(&jetons));

    let res = evaluate(&jetons).map_err(|e| e.avec_position(|p| n.position_brute(p)));
    debug!("{raw:?} => {res:?}");
    res
}

/// Évalue une suite de jetons (positions = celles des jetons).
pub fn evaluate(jetons: &[Jeton]) -> Result<Option<f64>, ErreurCalcul> {
    if jetons.is_empty() {
        return Ok(None);
    }

    verifier_parentheses(jetons)?;

    let mut ev = Evaluateur {
        jetons,
        i: 0,
        profondeur: 0,
    };
    let v = ev.expr()?;

    // reste un jeton : opérande sans opérateur ("1 2", "2(3)")
    if let Some(j) = ev.courant() {
        return Err(ErreurCalcul::parse(
            j.pos,
            ParseErrorKind::MalformedOperatorSequence,
        ));
    }

    Ok(Some(v))
}

/// Équilibre des parenthèses AVANT l’analyse :
/// - ')' sans '(' -> position du ')'
/// - '(' jamais fermée -> position de la dernière '(' ouverte
fn verifier_parentheses(jetons: &[Jeton]) -> Result<(), ErreurCalcul> {
    let mut ouvertes: Vec<usize> = Vec::new();

    for j in jetons {
        match j.tok {
            Tok::LPar => ouvertes.push(j.pos),
            Tok::RPar => {
                if ouvertes.pop().is_none() {
                    return Err(ErreurCalcul::parse(
                        j.pos,
                        ParseErrorKind::UnbalancedParentheses,
                    ));
                }
            }
            _ => {}
        }
    }

    match ouvertes.last() {
        Some(&pos) => Err(ErreurCalcul::parse(
            pos,
            ParseErrorKind::UnbalancedParentheses,
        )),
        None => Ok(()),
    }
}

fn fini(v: f64) -> Result<f64, ErreurCalcul> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurCalcul::Math(MathErrorKind::Overflow))
    }
}

fn diviser(a: f64, b: f64) -> Result<f64, ErreurCalcul> {
    if b == 0.0 {
        return Err(ErreurCalcul::Math(MathErrorKind::DivisionByZero));
    }
    fini(a / b)
}

struct Evaluateur<'a> {
    jetons: &'a [Jeton],
    i: usize,
    profondeur: usize,
}

impl<'a> Evaluateur<'a> {
    fn courant(&self) -> Option<&'a Jeton> {
        self.jetons.get(self.i)
    }

    fn avancer(&mut self) {
        self.i += 1;
    }

    fn op_courant(&self) -> Option<Op> {
        match self.courant() {
            Some(Jeton { tok: Tok::Op(op), .. }) => Some(*op),
            _ => None,
        }
    }

    fn entrer(&mut self, pos: usize) -> Result<(), ErreurCalcul> {
        self.profondeur += 1;
        if self.profondeur > PROFONDEUR_MAX {
            return Err(ErreurCalcul::parse(pos, ParseErrorKind::NestingTooDeep));
        }
        Ok(())
    }

    fn sortir(&mut self) {
        self.profondeur -= 1;
    }

    /// Opérande attendue mais fin de flux : on désigne l’opérateur pendant.
    fn operande_manquante(&self) -> ErreurCalcul {
        let pos = self.jetons.last().map(|j| j.pos).unwrap_or(0);
        ErreurCalcul::parse(pos, ParseErrorKind::MalformedOperatorSequence)
    }

    fn expr(&mut self) -> Result<f64, ErreurCalcul> {
        let mut acc = self.term()?;

        loop {
            let op = match self.op_courant() {
                Some(op @ (Op::Add | Op::Sub)) => op,
                _ => return Ok(acc),
            };
            self.avancer();

            let rhs = self.term()?;
            acc = match op {
                Op::Add => fini(acc + rhs)?,
                _ => fini(acc - rhs)?,
            };
        }
    }

    fn term(&mut self) -> Result<f64, ErreurCalcul> {
        let mut acc = self.pct()?;

        loop {
            let op = match self.op_courant() {
                Some(op @ (Op::Mul | Op::Div)) => op,
                _ => return Ok(acc),
            };
            self.avancer();

            let rhs = self.pct()?;
            acc = match op {
                Op::Mul => fini(acc * rhs)?,
                _ => diviser(acc, rhs)?,
            };
        }
    }

    fn pct(&mut self) -> Result<f64, ErreurCalcul> {
        let mut acc = self.factor()?;

        while self.op_courant() == Some(Op::Percent) {
            self.avancer();

            // binaire seulement si un nombre ou '(' suit ; sinon postfixé
            let binaire = matches!(
                self.courant(),
                Some(Jeton {
                    tok: Tok::Num(_) | Tok::LPar,
                    ..
                })
            );
            acc = if binaire {
                let b = self.factor()?;
                fini(acc * b / 100.0)?
            } else {
                fini(acc / 100.0)?
            };
        }

        Ok(acc)
    }

    fn factor(&mut self) -> Result<f64, ErreurCalcul> {
        let Some(j) = self.courant() else {
            return Err(self.operande_manquante());
        };

        match &j.tok {
            Tok::Num(lit) => {
                self.avancer();
                let v = lit
                    .parse::<f64>()
                    .map_err(|_| ErreurCalcul::parse(j.pos, ParseErrorKind::InvalidNumber))?;
                fini(v)
            }

            Tok::Op(Op::Sub) => {
                self.avancer();
                self.entrer(j.pos)?;
                let v = self.factor()?;
                self.sortir();
                Ok(-v)
            }

            Tok::LPar => {
                self.avancer();

                if let Some(Jeton { tok: Tok::RPar, pos }) = self.courant() {
                    return Err(ErreurCalcul::parse(
                        *pos,
                        ParseErrorKind::EmptySubexpression,
                    ));
                }

                self.entrer(j.pos)?;
                let v = self.expr()?;
                self.sortir();

                match self.courant() {
                    Some(Jeton { tok: Tok::RPar, .. }) => {
                        self.avancer();
                        Ok(v)
                    }
                    Some(autre) => Err(ErreurCalcul::parse(
                        autre.pos,
                        ParseErrorKind::MalformedOperatorSequence,
                    )),
                    None => Err(ErreurCalcul::parse(
                        j.pos,
                        ParseErrorKind::UnbalancedParentheses,
                    )),
                }
            }

            // ')' ou opérateur binaire là où une opérande est attendue
            Tok::RPar | Tok::Op(_) => Err(ErreurCalcul::parse(
                j.pos,
                ParseErrorKind::MalformedOperatorSequence,
            )),
        }
    }
}
