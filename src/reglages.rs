// src/reglages.rs
//
// Réglages lus une fois au démarrage (variables d’environnement).
// - absent => défaut
// - illisible => défaut + avertissement
// - hors bornes => borné (garde-fou)
//
// En wasm32 l’environnement est vide : les défauts s’appliquent.

use log::warn;

/// Longueur max de l’entrée par défaut (quelques centaines de caractères).
const ENTREE_MAX_DEFAUT: usize = 256;
const ENTREE_MAX_BORNE: usize = 4096;

/// Nombre max d’entrées d’historique par défaut.
const HISTORIQUE_MAX_DEFAUT: usize = 100;
const HISTORIQUE_MAX_BORNE: usize = 10_000;

pub const VAR_ENTREE_MAX: &str = "CALCULATRICE_ENTREE_MAX";
pub const VAR_HISTORIQUE_MAX: &str = "CALCULATRICE_HISTORIQUE_MAX";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub entree_max: usize,
    pub historique_max: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            entree_max: ENTREE_MAX_DEFAUT,
            historique_max: HISTORIQUE_MAX_DEFAUT,
        }
    }
}

impl Reglages {
    /// Réglages depuis l’environnement du processus.
    pub fn depuis_env() -> Self {
        Self::depuis(|cle| std::env::var(cle).ok())
    }

    /// Réglages depuis une source clé -> valeur (testable sans toucher à l’env).
    pub fn depuis(lire: impl Fn(&str) -> Option<String>) -> Self {
        let defaut = Self::default();
        Self {
            entree_max: lire_borne(
                &lire,
                VAR_ENTREE_MAX,
                defaut.entree_max,
                ENTREE_MAX_BORNE,
            ),
            historique_max: lire_borne(
                &lire,
                VAR_HISTORIQUE_MAX,
                defaut.historique_max,
                HISTORIQUE_MAX_BORNE,
            ),
        }
    }
}

fn lire_borne(
    lire: &impl Fn(&str) -> Option<String>,
    cle: &str,
    defaut: usize,
    max: usize,
) -> usize {
    let Some(brut) = lire(cle) else {
        return defaut;
    };

    match brut.trim().parse::<usize>() {
        Ok(v) => v.clamp(1, max),
        Err(_) => {
            warn!("{cle}={brut:?} illisible, valeur par défaut {defaut}");
            defaut
        }
    }
}
