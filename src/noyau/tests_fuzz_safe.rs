//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : aucune saisie ne fait paniquer l’évaluateur
//! - invariant clé : une expression valide vaut sa valeur de référence

use std::time::{Duration, Instant};

use super::erreurs::{ErreurCalcul, MathErrorKind};
use super::normalize_and_evaluate;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération (texte + valeur de référence) ------------------------ */

/// Valeur de référence : None si une division par zéro survient.
type Gen = (String, Option<f64>);

fn gen_nombre(rng: &mut Rng) -> Gen {
    let (txt, v) = match rng.pick(8) {
        0 => ("0", 0.0),
        1 => ("007", 7.0),
        2 => ("0.5", 0.5),
        3 => ("2.25", 2.25),
        4 => ("00.75", 0.75),
        5 => ("10", 10.0),
        _ => {
            let n = rng.pick(100);
            return (n.to_string(), Some(n as f64));
        }
    };
    (txt.to_string(), Some(v))
}

fn gen_expr(rng: &mut Rng, depth: usize) -> Gen {
    if depth == 0 {
        return gen_nombre(rng);
    }

    match rng.pick(7) {
        0 => gen_nombre(rng),
        1 => {
            let (a, va) = gen_expr(rng, depth - 1);
            (format!("-({a})"), va.map(|x| -x))
        }
        k => {
            let (a, va) = gen_expr(rng, depth - 1);
            let (b, vb) = gen_expr(rng, depth - 1);
            let (sym, v) = match (k, va, vb) {
                (2, Some(x), Some(y)) => ('+', Some(x + y)),
                (3, Some(x), Some(y)) => ('-', Some(x - y)),
                (4, Some(x), Some(y)) => ('*', Some(x * y)),
                (5 | 6, Some(x), Some(y)) => ('/', if y == 0.0 { None } else { Some(x / y) }),
                (2, ..) => ('+', None),
                (3, ..) => ('-', None),
                (4, ..) => ('*', None),
                _ => ('/', None),
            };
            (format!("({a}{sym}{b})"), v)
        }
    }
}

fn gen_bruit(rng: &mut Rng) -> String {
    const ALPHABET: [char; 20] = [
        '0', '1', '7', '9', '.', '+', '-', '*', '/', '%', '(', ')', ' ', '÷', '×', '−', 'a', 'é',
        '=', '0',
    ];
    let len = rng.pick(40) as usize;
    (0..len)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

fn proche(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_valeurs_de_reference() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_div0 = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let (expr, reference) = gen_expr(&mut rng, 5);

        match (normalize_and_evaluate(&expr), reference) {
            (Ok(Some(v)), Some(r)) => {
                assert!(proche(v, r), "expr={expr:?} obtenu={v} attendu={r}");
                seen_ok += 1;
            }
            (Err(ErreurCalcul::Math(MathErrorKind::DivisionByZero)), None) => seen_div0 += 1,
            (res, r) => panic!("expr={expr:?} obtenu={res:?} référence={r:?}"),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 100, "trop peu de succès: {seen_ok}");
    assert!(seen_div0 > 0, "aucune division par zéro vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..2000 {
        budget(t0, max);

        let s = gen_bruit(&mut rng);
        match normalize_and_evaluate(&s) {
            Ok(Some(v)) => assert!(v.is_finite(), "s={s:?} v={v}"),
            Ok(None) => assert!(s.trim().is_empty(), "s={s:?} sans valeur"),
            Err(e) => {
                if let Some(pos) = e.position() {
                    assert!(pos <= s.chars().count(), "s={s:?} pos={pos}");
                }
            }
        }
    }
}

#[test]
fn fuzz_safe_determinisme() {
    let mut a = Rng::new(42);
    let mut b = Rng::new(42);

    for _ in 0..50 {
        let sa = gen_bruit(&mut a);
        let sb = gen_bruit(&mut b);
        assert_eq!(sa, sb);
        assert_eq!(normalize_and_evaluate(&sa), normalize_and_evaluate(&sb));
    }
}

#[test]
fn fuzz_safe_longue_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 1000 termes à plat : l’associativité gauche est itérative (pas de pile)
    let expr = vec!["0.5"; 1000].join("+");
    let v = normalize_and_evaluate(&expr)
        .unwrap_or_else(|e| panic!("err: {e}"))
        .unwrap_or_default();
    budget(t0, max);

    assert_eq!(v, 500.0);
}
