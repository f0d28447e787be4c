//! src/historique/stockage.rs
//!
//! Stockage clé -> valeur de SESSION (injecté dans l’historique).
//!
//! - natif / tests : mémoire du processus
//! - web (wasm32)  : window.sessionStorage
//!
//! Aucune durabilité au-delà de la session.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ErreurStockage {
    // sessionStorage seulement (la mémoire ne refuse jamais)
    #[cfg_attr(not(any(test, target_arch = "wasm32")), allow(dead_code))]
    #[error("stockage de session indisponible")]
    Indisponible,

    #[cfg_attr(not(any(test, target_arch = "wasm32")), allow(dead_code))]
    #[error("stockage refusé : {0}")]
    Refus(String),

    #[error("historique illisible : {0}")]
    Serialisation(#[from] serde_json::Error),
}

pub trait StockageSession {
    fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage>;
    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage>;
    fn supprimer(&mut self, cle: &str) -> Result<(), ErreurStockage>;
}

/// Stockage en mémoire. Les clones partagent les mêmes cases
/// (deux historiques ouverts sur la même “session”).
#[derive(Clone, Debug, Default)]
pub struct MemoireSession {
    cases: Rc<RefCell<HashMap<String, String>>>,
}

impl StockageSession for MemoireSession {
    fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage> {
        Ok(self.cases.borrow().get(cle).cloned())
    }

    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
        self.cases
            .borrow_mut()
            .insert(cle.to_string(), valeur.to_string());
        Ok(())
    }

    fn supprimer(&mut self, cle: &str) -> Result<(), ErreurStockage> {
        self.cases.borrow_mut().remove(cle);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub mod web {
    use super::{ErreurStockage, StockageSession};

    /// window.sessionStorage (vidé à la fermeture de l’onglet).
    pub struct SessionStorageWeb {
        storage: web_sys::Storage,
    }

    fn refus(e: wasm_bindgen::JsValue) -> ErreurStockage {
        ErreurStockage::Refus(format!("{e:?}"))
    }

    impl SessionStorageWeb {
        pub fn ouvrir() -> Result<Self, ErreurStockage> {
            let w = web_sys::window().ok_or(ErreurStockage::Indisponible)?;
            let storage = w
                .session_storage()
                .map_err(refus)?
                .ok_or(ErreurStockage::Indisponible)?;
            Ok(Self { storage })
        }
    }

    impl StockageSession for SessionStorageWeb {
        fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage> {
            self.storage.get_item(cle).map_err(refus)
        }

        fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
            self.storage.set_item(cle, valeur).map_err(refus)
        }

        fn supprimer(&mut self, cle: &str) -> Result<(), ErreurStockage> {
            self.storage.remove_item(cle).map_err(refus)
        }
    }
}

/// Stockage de la plateforme : sessionStorage en web, mémoire sinon.
#[cfg(target_arch = "wasm32")]
pub fn stockage_par_defaut() -> Box<dyn StockageSession> {
    match web::SessionStorageWeb::ouvrir() {
        Ok(s) => Box::new(s),
        Err(e) => {
            log::warn!("{e} : historique en mémoire seulement");
            Box::new(MemoireSession::default())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn stockage_par_defaut() -> Box<dyn StockageSession> {
    Box::new(MemoireSession::default())
}
