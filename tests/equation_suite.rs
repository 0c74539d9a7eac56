use chaos_equations::equation::{CODE_LEN, EquationParams, NUM_PARAMS};

fn digits_from_index(mut n: usize) -> [i8; NUM_PARAMS] {
    let mut digits = [0i8; NUM_PARAMS];
    for d in &mut digits {
        *d = match n % 3 {
            0 => 0,
            1 => 1,
            _ => -1,
        };
        n /= 3;
    }
    digits
}

#[test]
fn zero_equation_maps_everything_to_origin() {
    let p = EquationParams::zero();
    for &(x, y, t) in &[(0.0, 0.0, 0.0), (1.5, -2.0, 3.0), (1e6, -1e6, -3.0)] {
        assert_eq!(p.next_point(x, y, t), (0.0, 0.0));
    }
}

#[test]
fn zero_equation_encodes_as_blanks() {
    let p = EquationParams::zero();
    assert_eq!(p.to_code(), "______");
    assert_eq!(EquationParams::from_code("______"), p);
}

#[test]
fn identity_x_term_fixes_trajectory_after_one_step() {
    let mut digits = [0i8; NUM_PARAMS];
    digits[6] = 1;
    let p = EquationParams::from_digits(digits);
    assert_eq!(p.x_formula(), "x");
    assert_eq!(p.y_formula(), "0");

    let t = 0.37;
    let (mut x, mut y) = (t, t);
    for _ in 0..10 {
        (x, y) = p.next_point(x, y, t);
        assert_eq!((x, y), (t, 0.0));
    }
}

#[test]
fn every_triple_round_trips() {
    for digit in 0..27usize {
        // Same triple in every group, so all six characters are exercised.
        let mut digits = [0i8; NUM_PARAMS];
        let triple = digits_from_index(digit);
        for group in digits.chunks_exact_mut(3) {
            group.copy_from_slice(&triple[..3]);
        }
        let p = EquationParams::from_digits(digits);
        let code = p.to_code();
        assert_eq!(code.len(), CODE_LEN);
        assert_eq!(EquationParams::from_code(&code), p, "code {code}");
    }
}

#[test]
fn random_equations_round_trip() {
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..200 {
        let p = EquationParams::random(&mut rng);
        let code = p.to_code();
        assert_eq!(code.chars().count(), CODE_LEN);
        assert!(code.chars().all(|c| c == '_' || c.is_ascii_uppercase()));
        assert_eq!(EquationParams::from_code(&code), p);
    }
}

#[test]
fn random_coefficients_are_ternary() {
    let mut rng = fastrand::Rng::with_seed(99);
    let mut seen = [0usize; 3];
    for _ in 0..100 {
        for &c in EquationParams::random(&mut rng).coeffs() {
            match c {
                0.0 => seen[0] += 1,
                1.0 => seen[1] += 1,
                -1.0 => seen[2] += 1,
                other => panic!("unexpected coefficient {other}"),
            }
        }
    }
    // Zero is drawn half the time, each sign a quarter.
    assert!(seen[0] > seen[1] && seen[0] > seen[2]);
    assert!(seen[1] > 0 && seen[2] > 0);
}

#[test]
fn seeded_generation_is_deterministic() {
    let a = EquationParams::random(&mut fastrand::Rng::with_seed(42));
    let b = EquationParams::random(&mut fastrand::Rng::with_seed(42));
    assert_eq!(a, b);
}

#[test]
fn decode_is_case_insensitive() {
    let upper = EquationParams::from_code("LDHQNC");
    let lower = EquationParams::from_code("ldhqnc");
    assert_eq!(upper, lower);
    assert_eq!(upper.to_code(), "LDHQNC");
}

#[test]
fn decode_pads_short_codes_with_zero_groups() {
    let p = EquationParams::from_code("AB");
    assert_eq!(p.to_code(), "AB____");
    assert!(p.coeffs()[6..].iter().all(|&c| c == 0.0));
    assert_eq!(EquationParams::from_code(""), EquationParams::zero());
}

#[test]
fn decode_treats_unknown_characters_as_blank() {
    let p = EquationParams::from_code("A?1 Z#");
    assert_eq!(p.to_code(), "A___Z_");
}

#[test]
fn decode_ignores_characters_past_six() {
    assert_eq!(
        EquationParams::from_code("ABCDEFGHIJ"),
        EquationParams::from_code("ABCDEF")
    );
}

#[test]
fn single_letter_places_trits_low_to_high() {
    // 'A' = 1 = (0, 0, 1) in base 3: only the third coefficient of the group is set.
    let p = EquationParams::from_code("A_____");
    assert_eq!(&p.coeffs()[..3], &[0.0, 0.0, 1.0]);
    // 'B' = 2 = (0, 0, 2): trit 2 is a negative coefficient.
    let p = EquationParams::from_code("B_____");
    assert_eq!(&p.coeffs()[..3], &[0.0, 0.0, -1.0]);
    // 'I' = 9 = (1, 0, 0).
    let p = EquationParams::from_code("I_____");
    assert_eq!(&p.coeffs()[..3], &[1.0, 0.0, 0.0]);
}

#[test]
fn from_digits_folds_by_sign() {
    let mut digits = [0i8; NUM_PARAMS];
    digits[0] = 5;
    digits[1] = -7;
    let p = EquationParams::from_digits(digits);
    assert_eq!(p.coeffs()[0], 1.0);
    assert_eq!(p.coeffs()[1], -1.0);
}

#[test]
fn map_matches_monomial_order() {
    let mut digits = [0i8; NUM_PARAMS];
    digits[0] = 1; // x'  += x²
    digits[5] = -1; // x' -= yt
    digits[9 + 3] = 1; // y' += xy
    digits[9 + 8] = -1; // y' -= t
    let p = EquationParams::from_digits(digits);
    let (x, y, t) = (2.0, 3.0, 0.5);
    let (nx, ny) = p.next_point(x, y, t);
    assert_eq!(nx, x * x - y * t);
    assert_eq!(ny, x * y - t);
}

#[test]
fn formulas_use_signs_between_terms() {
    let mut digits = [0i8; NUM_PARAMS];
    digits[0] = -1;
    digits[3] = 1;
    digits[8] = -1;
    digits[9 + 1] = 1;
    digits[9 + 6] = 1;
    let p = EquationParams::from_digits(digits);
    assert_eq!(p.x_formula(), "-x\u{b2} + xy - t");
    assert_eq!(p.y_formula(), "y\u{b2} + x");
}

#[test]
fn display_prints_code() {
    let p = EquationParams::from_code("QWERTY");
    assert_eq!(p.to_string(), "QWERTY");
}

fn bits(p: (f64, f64)) -> (u64, u64) {
    (p.0.to_bits(), p.1.to_bits())
}

#[test]
fn evaluation_is_bit_identical_on_repeat() {
    let inputs = [
        (0.3, -0.7, 1.1),
        (-2.5, 0.125, -3.0),
        (1e200, 1e200, 3.0),
        (-1e200, 1e-300, 1e200),
        (f64::NAN, 0.0, 0.0),
        (f64::INFINITY, -0.0, 0.5),
    ];
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..32 {
        let params = EquationParams::random(&mut rng);
        let copy = params;
        for &(x, y, t) in &inputs {
            let first = bits(params.next_point(x, y, t));
            for _ in 0..4 {
                assert_eq!(bits(params.next_point(x, y, t)), first, "{params} at ({x}, {y}, {t})");
            }
            assert_eq!(bits(copy.next_point(x, y, t)), first);
        }
    }
}

#[test]
fn overflowing_evaluation_is_bit_identical_on_repeat() {
    let mut digits = [0i8; NUM_PARAMS];
    digits[0] = 1;
    let params = EquationParams::from_digits(digits);

    // x² overflows; the zero y coefficients turn it into NaN.
    let (x, y) = params.next_point(1e200, 0.0, 0.0);
    assert_eq!(x, f64::INFINITY);
    assert!(y.is_nan(), "expected NaN, got {y}");
    for _ in 0..4 {
        assert_eq!(bits(params.next_point(1e200, 0.0, 0.0)), bits((x, y)));
    }
}

#[test]
fn trajectories_repeat_bit_for_bit() {
    let params = EquationParams::random(&mut fastrand::Rng::with_seed(1234));
    let run = |t: f64| {
        let (mut x, mut y) = (t, t);
        (0..500)
            .map(|_| {
                (x, y) = params.next_point(x, y, t);
                bits((x, y))
            })
            .collect::<Vec<_>>()
    };
    for t in [-3.0, -0.41, 0.0, 0.77, 2.9] {
        assert_eq!(run(t), run(t), "trajectory diverged at t = {t}");
    }
}
