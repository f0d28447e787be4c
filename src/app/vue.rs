// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// - Écran : entrée (ou "0") + ligne résultat (aperçu live ou "Err")
// - Pavé : AC / ( ) % ÷ / 7 8 9 × / 4 5 6 − / 1 2 3 + / 0 . ⌫ =
// - Historique : plus récent en tête, clic = rappel de l’expression
//
// Aucune évaluation ici : tout passe par les actions de etat.rs.

use eframe::egui;

use super::etat::{AppCalc, TOUCHE_AC, TOUCHE_EGAL, TOUCHE_RETOUR};
use crate::noyau::formater_resultat;

/// Pavé (lignes de boutons).
const PAVE: [&[&str]; 6] = [
    &[TOUCHE_AC],
    &["(", ")", "%", "÷"],
    &["7", "8", "9", "×"],
    &["4", "5", "6", "−"],
    &["1", "2", "3", "+"],
    &["0", ".", TOUCHE_RETOUR, TOUCHE_EGAL],
];

const TAILLE_TOUCHE: [f32; 2] = [64.0, 52.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice");
                ui.add_space(6.0);

                self.ui_ecran(ui);

                ui.add_space(8.0);
                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);
            });
    }

    fn ui_ecran(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    let entree = if self.entree.is_empty() {
                        "0"
                    } else {
                        self.entree.as_str()
                    };
                    ui.label(egui::RichText::new(entree).monospace().size(18.0).weak());

                    let ligne = egui::RichText::new(self.ligne_resultat())
                        .monospace()
                        .size(26.0)
                        .strong();
                    if self.erreur_visible {
                        ui.colored_label(ui.visuals().error_fg_color, ligne);
                    } else {
                        ui.label(ligne);
                    }
                });
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        let mut appui: Option<&str> = None;

        for rangee in PAVE {
            ui.horizontal(|ui| {
                for &touche in rangee {
                    let largeur = if rangee.len() == 1 {
                        // AC occupe toute la rangée
                        TAILLE_TOUCHE[0] * 4.0 + ui.spacing().item_spacing.x * 3.0
                    } else {
                        TAILLE_TOUCHE[0]
                    };
                    let bouton = egui::Button::new(egui::RichText::new(touche).size(20.0));
                    if ui.add_sized([largeur, TAILLE_TOUCHE[1]], bouton).clicked() {
                        appui = Some(touche);
                    }
                }
            });
        }

        if let Some(touche) = appui {
            self.appuyer(touche);
        }
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new(format!("Historique ({})", self.historique.len()))
            .id_salt("historique")
            .default_open(true)
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.weak("(vide)");
                    return;
                }

                let mut rappel = None;
                for (i, e) in self.historique.list().iter().enumerate() {
                    let texte = format!("{} = {}", e.expression, formater_resultat(e.resultat));
                    let resp = ui
                        .add(egui::Button::new(egui::RichText::new(texte).monospace()).frame(false))
                        .on_hover_text("Rappeler cette expression");
                    if resp.clicked() {
                        rappel = Some(i);
                    }
                }
                if let Some(i) = rappel {
                    self.rappeler(i);
                }

                ui.add_space(6.0);
                if ui.button("Effacer l’historique").clicked() {
                    self.vider_historique();
                }
            });
    }
}
