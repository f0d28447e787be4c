// src/noyau/format.rs

/// Affichage d’un résultat : représentation décimale la plus courte qui
/// relit exactement la même valeur (jamais de notation exponentielle).
/// -0 s’affiche "0".
pub fn formater_resultat(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}
