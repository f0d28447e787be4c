// src/noyau/erreurs.rs
//
// Erreurs du noyau (valeurs, jamais de panique).
// - Parse : position (index de caractère dans la chaîne lue) + genre
// - Math  : erreur arithmétique (pas de position)

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    InvalidCharacter,
    InvalidNumber,
    UnbalancedParentheses,
    MalformedOperatorSequence,
    EmptySubexpression,
    NestingTooDeep,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MathErrorKind {
    DivisionByZero,
    Overflow,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    #[error("{} (position {pos})", .kind.message())]
    Parse { pos: usize, kind: ParseErrorKind },

    #[error("{}", .0.message())]
    Math(MathErrorKind),
}

impl ErreurCalcul {
    pub fn parse(pos: usize, kind: ParseErrorKind) -> Self {
        ErreurCalcul::Parse { pos, kind }
    }

    /// Position fautive (None pour une erreur Math).
    #[cfg(test)]
    pub fn position(&self) -> Option<usize> {
        match self {
            ErreurCalcul::Parse { pos, .. } => Some(*pos),
            ErreurCalcul::Math(_) => None,
        }
    }

    /// Même erreur, position traduite (ex: normalisé -> saisie brute).
    pub fn avec_position(self, f: impl FnOnce(usize) -> usize) -> Self {
        match self {
            ErreurCalcul::Parse { pos, kind } => ErreurCalcul::Parse { pos: f(pos), kind },
            math => math,
        }
    }
}

impl ParseErrorKind {
    fn message(&self) -> &'static str {
        match self {
            ParseErrorKind::InvalidCharacter => "caractère invalide",
            ParseErrorKind::InvalidNumber => "nombre invalide",
            ParseErrorKind::UnbalancedParentheses => "parenthèses non équilibrées",
            ParseErrorKind::MalformedOperatorSequence => "suite d’opérateurs invalide",
            ParseErrorKind::EmptySubexpression => "parenthèses vides",
            ParseErrorKind::NestingTooDeep => "imbrication trop profonde",
        }
    }
}

impl MathErrorKind {
    fn message(&self) -> &'static str {
        match self {
            MathErrorKind::DivisionByZero => "division par zéro",
            MathErrorKind::Overflow => "résultat hors limites",
        }
    }
}
