//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, aperçu, erreur, historique)
//! et offrir les actions du pavé (saisie, ⌫, AC, =, rappel d’historique).
//!
//! Contrats :
//! - Toute mutation de l’entrée est suivie d’un appel EXPLICITE à recalculer_apercu().
//! - L’historique ne reçoit que des évaluations réussies (résultat = éval de l’entrée validée).
//! - Défense en profondeur : longueur d’entrée bornée (réglages).

use log::{debug, info};

use crate::historique::stockage::{stockage_par_defaut, StockageSession};
use crate::historique::Historique;
use crate::noyau::{formater_resultat, normalize_and_evaluate};
use crate::reglages::Reglages;

/// Texte affiché quand la validation échoue.
pub const TEXTE_ERREUR: &str = "Err";

pub const TOUCHE_AC: &str = "AC";
pub const TOUCHE_EGAL: &str = "=";
pub const TOUCHE_RETOUR: &str = "⌫";

#[derive(Debug)]
pub struct AppCalc {
    // --- entrée utilisateur (tampon d’expression) ---
    pub entree: String,

    // --- sorties ---
    pub apercu: String,        // aperçu live (vide si rien / invalide)
    pub erreur_visible: bool,  // "Err" après un "=" raté

    // --- session ---
    pub historique: Historique,

    // --- paramètres ---
    pub reglages: Reglages,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Reglages::depuis_env(), stockage_par_defaut())
    }
}

impl AppCalc {
    pub fn new(reglages: Reglages, stockage: Box<dyn StockageSession>) -> Self {
        let historique = Historique::charger(stockage, reglages.historique_max);
        Self {
            entree: String::new(),
            apercu: String::new(),
            erreur_visible: false,
            historique,
            reglages,
        }
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// Routage d’une touche du pavé (libellé du bouton).
    pub fn appuyer(&mut self, touche: &str) {
        match touche {
            TOUCHE_AC => self.tout_effacer(),
            TOUCHE_EGAL => self.valider(),
            TOUCHE_RETOUR => self.effacer_dernier(),
            _ => self.saisir(touche),
        }
    }

    /// Ajoute du texte (chiffre, opérateur, parenthèse) à la fin de l’entrée.
    /// Au-delà de la longueur max, la saisie est ignorée.
    /// Un résultat validé plus long que la borne (ex: 1e-230 écrit en entier)
    /// est remplacé par la saisie suivante au lieu de bloquer le pavé.
    pub fn saisir(&mut self, texte: &str) {
        if self.entree.chars().count() > self.reglages.entree_max {
            debug!("résultat trop long pour être complété : nouvelle entrée");
            self.entree.clear();
        }

        let n = self.entree.chars().count() + texte.chars().count();
        if n > self.reglages.entree_max {
            debug!("saisie ignorée : entrée limitée à {}", self.reglages.entree_max);
            return;
        }
        self.entree.push_str(texte);
        self.recalculer_apercu();
    }

    /// ⌫ : retire le dernier caractère.
    pub fn effacer_dernier(&mut self) {
        self.entree.pop();
        self.recalculer_apercu();
    }

    /// AC : remise à zéro (entrée + aperçu + erreur), historique conservé.
    pub fn tout_effacer(&mut self) {
        self.entree.clear();
        self.apercu.clear();
        self.erreur_visible = false;
    }

    /// "=" : valide l’entrée.
    /// - succès : l’entrée devient le résultat affiché + entrée d’historique
    /// - échec ou entrée vide : "Err", rien n’est stocké
    pub fn valider(&mut self) {
        match normalize_and_evaluate(&self.entree) {
            Ok(Some(v)) => {
                let texte = formater_resultat(v);
                info!("{} = {}", self.entree, texte);

                let expression = std::mem::replace(&mut self.entree, texte.clone());
                self.historique.append(expression, v);

                self.apercu = texte;
                self.erreur_visible = false;
            }
            Ok(None) => {
                debug!("validation d’une entrée vide");
                self.afficher_erreur();
            }
            Err(e) => {
                debug!("validation refusée : {e}");
                self.afficher_erreur();
            }
        }
    }

    /// Rejoue une expression de l’historique dans l’entrée.
    pub fn rappeler(&mut self, index: usize) {
        if let Some(e) = self.historique.get(index) {
            self.entree = e.expression.clone();
            self.recalculer_apercu();
        }
    }

    pub fn vider_historique(&mut self) {
        self.historique.clear();
    }

    /* ------------------------ Aperçu live ------------------------ */

    /// À appeler après CHAQUE mutation de l’entrée.
    /// Une erreur n’affiche rien (pas de "Err" avant "=").
    pub fn recalculer_apercu(&mut self) {
        self.erreur_visible = false;
        self.apercu = match normalize_and_evaluate(&self.entree) {
            Ok(Some(v)) => formater_resultat(v),
            Ok(None) | Err(_) => String::new(),
        };
    }

    /// Ligne de résultat : "Err" prioritaire, sinon l’aperçu.
    pub fn ligne_resultat(&self) -> &str {
        if self.erreur_visible {
            TEXTE_ERREUR
        } else {
            &self.apercu
        }
    }

    fn afficher_erreur(&mut self) {
        self.erreur_visible = true;
        self.apercu.clear();
    }
}
