//! Noyau d’évaluation sûr (aucune exécution de code)
//!
//! Organisation interne :
//! - normalise.rs : glyphes du pavé, zéros de tête, pourcentage binaire
//! - jetons.rs    : tokenisation (avec positions)
//! - eval.rs      : descente récursive + pipeline complet
//! - erreurs.rs   : erreurs Parse / Math (valeurs, jamais de panique)
//! - format.rs    : affichage du résultat
//!
//! Fonction pure, réentrante, sans état retenu entre deux appels.

pub mod erreurs;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod normalise;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::normalize_and_evaluate;
pub use format::formater_resultat;
