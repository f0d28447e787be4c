//! Propriétés du moteur d’évaluation (contrat public).
//!
//! - valeur correcte pour + - * / et parenthèses
//! - zéros de tête décoratifs
//! - erreurs structurées (division par zéro, parenthèses)
//! - entrée vide neutre
//! - relecture d’un résultat affiché = même valeur

use super::erreurs::{ErreurCalcul, MathErrorKind, ParseErrorKind};
use super::format::formater_resultat;
use super::eval::{evaluate, normalize_and_evaluate};
use super::jetons::tokenize;
use super::normalise::normalize;

/// evaluate(tokenize(normalize(s))) : la composition exacte du pipeline.
fn pipeline(s: &str) -> Result<Option<f64>, ErreurCalcul> {
    let n = normalize(s);
    let jetons = tokenize(&n)?;
    evaluate(&jetons)
}

fn valeur(s: &str) -> f64 {
    pipeline(s)
        .unwrap_or_else(|e| panic!("expr={s:?} err={e}"))
        .unwrap_or_else(|| panic!("expr={s:?} sans valeur"))
}

fn assert_proche(s: &str, attendu: f64) {
    let v = valeur(s);
    let tol = 1e-9 * attendu.abs().max(1.0);
    assert!((v - attendu).abs() <= tol, "expr={s:?} obtenu={v} attendu={attendu}");
}

#[test]
fn prop_valeurs_arithmetiques() {
    assert_proche("1+2*3-4/8", 6.5);
    assert_proche("((2+3)*(7-2))/5", 5.0);
    assert_proche("100/3*3", 100.0);
    assert_proche("1.5*1.5", 2.25);
    assert_proche("-(2-5)*-(1+1)", -6.0);
    assert_proche("0.1+0.2", 0.3);
    assert_proche("12345679*9", 111_111_111.0);
}

#[test]
fn prop_zeros_de_tete_decoratifs() {
    assert_eq!(valeur("007+1"), valeur("7+1"));
    assert_eq!(valeur("0010*00.5"), valeur("10*0.5"));
    assert_eq!(normalize("007+1"), normalize("7+1"));
}

#[test]
fn prop_division_par_zero() {
    assert_eq!(
        pipeline("1/0"),
        Err(ErreurCalcul::Math(MathErrorKind::DivisionByZero))
    );
}

#[test]
fn prop_parenthese_non_fermee() {
    match pipeline("(1+2") {
        Err(ErreurCalcul::Parse {
            kind: ParseErrorKind::UnbalancedParentheses,
            ..
        }) => {}
        autre => panic!("attendu UnbalancedParentheses, obtenu {autre:?}"),
    }
}

#[test]
fn prop_vide_neutre() {
    assert_eq!(pipeline(""), Ok(None));
    assert_eq!(normalize_and_evaluate(""), Ok(None));
}

#[test]
fn prop_relecture_du_resultat() {
    for s in ["1/3", "2/3*7", "0.1+0.2", "-5/7", "10%33", "123456789*987654321", "1/1024"] {
        let v = valeur(s);
        let affiche = formater_resultat(v);
        let relu = normalize_and_evaluate(&affiche)
            .unwrap_or_else(|e| panic!("relecture de {affiche:?} : {e}"));
        assert_eq!(relu, Some(v), "expr={s:?} affiché={affiche:?}");
    }
}

#[test]
fn prop_relecture_negatifs_et_minuscules() {
    for v in [-0.0, -1.25, 1e-9, -3e-12, 9.5e15] {
        let affiche = formater_resultat(v);
        let relu = normalize_and_evaluate(&affiche).unwrap();
        assert_eq!(relu, Some(if v == 0.0 { 0.0 } else { v }), "{affiche:?}");
    }
}
