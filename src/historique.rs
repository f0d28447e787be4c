//! src/historique.rs
//!
//! Historique de session : journal (expression, résultat), plus récent en tête.
//!
//! Contrats :
//! - append seulement après une évaluation réussie (l’appelant garantit : résultat = éval de l’expression)
//! - une entrée n’est jamais modifiée après création
//! - clear est idempotent
//! - persistance : une seule clé fixe, liste JSON de {expression, resultat, ordinal}
//! - une panne de stockage ne touche jamais l’historique en mémoire (avertissement seulement)

pub mod stockage;

use std::fmt;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use stockage::{ErreurStockage, StockageSession};

/// Identifiant fixe de l’historique dans le stockage de session.
pub const CLE_HISTORIQUE: &str = "calculatrice.historique";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: f64,
    /// Rang de création (1, 2, 3…), croissant dans la session.
    pub ordinal: u64,
}

pub struct Historique {
    stockage: Box<dyn StockageSession>,
    entrees: Vec<EntreeHistorique>,
    capacite: usize,
    prochain_ordinal: u64,
}

impl Historique {
    /// Ouvre l’historique de la session (vide si rien ou illisible).
    pub fn charger(stockage: Box<dyn StockageSession>, capacite: usize) -> Self {
        let capacite = capacite.max(1);

        let mut entrees = match lire_entrees(&*stockage) {
            Ok(v) => v,
            Err(e) => {
                warn!("{e} : historique repart à vide");
                Vec::new()
            }
        };
        entrees.truncate(capacite);

        let prochain_ordinal = entrees.iter().map(|e| e.ordinal).max().unwrap_or(0) + 1;

        Self {
            stockage,
            entrees,
            capacite,
            prochain_ordinal,
        }
    }

    /// Ajoute en tête. Au-delà de la capacité, les plus anciennes tombent.
    pub fn append(&mut self, expression: impl Into<String>, resultat: f64) {
        // garde-fou : jamais de valeur non finie (illisible en JSON)
        if !resultat.is_finite() {
            warn!("résultat non fini refusé dans l’historique");
            return;
        }

        let entree = EntreeHistorique {
            expression: expression.into(),
            resultat,
            ordinal: self.prochain_ordinal,
        };
        self.prochain_ordinal += 1;

        info!(
            "historique #{} : {} = {}",
            entree.ordinal, entree.expression, entree.resultat
        );

        self.entrees.insert(0, entree);
        self.entrees.truncate(self.capacite);
        self.persister();
    }

    /// Plus récent en tête.
    pub fn list(&self) -> &[EntreeHistorique] {
        &self.entrees
    }

    pub fn get(&self, index: usize) -> Option<&EntreeHistorique> {
        self.entrees.get(index)
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    pub fn clear(&mut self) {
        if !self.entrees.is_empty() {
            info!("historique effacé ({} entrées)", self.entrees.len());
        }
        self.entrees.clear();

        if let Err(e) = self.stockage.supprimer(CLE_HISTORIQUE) {
            warn!("{e} : effacement de l’historique non persisté");
        }
    }

    fn persister(&mut self) {
        let res = serde_json::to_string(&self.entrees)
            .map_err(ErreurStockage::from)
            .and_then(|json| self.stockage.ecrire(CLE_HISTORIQUE, &json));

        if let Err(e) = res {
            warn!("{e} : historique gardé en mémoire seulement");
        }
    }
}

fn lire_entrees(stockage: &dyn StockageSession) -> Result<Vec<EntreeHistorique>, ErreurStockage> {
    match stockage.lire(CLE_HISTORIQUE)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

impl fmt::Debug for Historique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Historique")
            .field("entrees", &self.entrees)
            .field("capacite", &self.capacite)
            .finish()
    }
}
