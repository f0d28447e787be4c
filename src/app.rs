// src/app.rs
//
// Calculatrice — module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
// - Clavier -> touches du pavé (Enter = "=", Backspace = "⌫", Escape = "AC")

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

use etat::{TOUCHE_AC, TOUCHE_EGAL, TOUCHE_RETOUR};

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pas de champ texte : l’écran n’est qu’un affichage,
        // donc le clavier est lu ici, une seule fois par frame.
        let touches = ctx.input(|i| touches_clavier(&i.events));
        for t in touches {
            self.appuyer(&t);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}

/// Événements clavier -> libellés de touches du pavé.
fn touches_clavier(events: &[egui::Event]) -> Vec<String> {
    let mut out = Vec::new();

    for ev in events {
        match ev {
            egui::Event::Text(t) => {
                out.extend(t.chars().filter_map(glyphe_clavier).map(String::from));
            }
            egui::Event::Key {
                key, pressed: true, ..
            } => match key {
                egui::Key::Enter => out.push(TOUCHE_EGAL.to_string()),
                egui::Key::Backspace => out.push(TOUCHE_RETOUR.to_string()),
                egui::Key::Escape => out.push(TOUCHE_AC.to_string()),
                _ => {}
            },
            _ => {}
        }
    }

    out
}

/// Caractère tapé -> glyphe du pavé (None = ignoré).
fn glyphe_clavier(c: char) -> Option<char> {
    match c {
        '0'..='9' | '.' | '(' | ')' | '%' | '+' => Some(c),
        '-' => Some('−'),
        '*' | 'x' | 'X' => Some('×'),
        '/' | ':' => Some('÷'),
        '=' => Some('='),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clavier_vers_pave() {
        let events = vec![
            egui::Event::Text("12*3-a/".to_string()),
            egui::Event::Text("=".to_string()),
        ];
        assert_eq!(
            touches_clavier(&events),
            vec!["1", "2", "×", "3", "−", "÷", "="]
        );
    }

    #[test]
    fn clavier_filtre() {
        assert_eq!(glyphe_clavier('7'), Some('7'));
        assert_eq!(glyphe_clavier('é'), None);
        assert_eq!(glyphe_clavier(' '), None);
    }
}
