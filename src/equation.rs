use std::fmt;

pub const NUM_PARAMS: usize = 18;
pub const TERMS_PER_AXIS: usize = NUM_PARAMS / 2;
pub const CODE_LEN: usize = NUM_PARAMS / 3;

pub const BLANK: char = '_';
const BASE27: &[u8; 27] = b"_ABCDEFGHIJKLMNOPQRSTUVWXYZ";

const TERM_NAMES: [&str; TERMS_PER_AXIS] = ["x\u{b2}", "y\u{b2}", "t\u{b2}", "xy", "xt", "yt", "x", "y", "t"];

const _: () = assert!(NUM_PARAMS % 3 == 0, "coefficients are encoded in triples");

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EquationParams {
    coeffs: [f64; NUM_PARAMS],
}

impl Default for EquationParams {
    fn default() -> Self {
        Self::zero()
    }
}

impl EquationParams {
    pub const fn zero() -> Self {
        Self {
            coeffs: [0.0; NUM_PARAMS],
        }
    }

    pub fn from_digits(digits: [i8; NUM_PARAMS]) -> Self {
        let mut coeffs = [0.0; NUM_PARAMS];
        for (c, d) in coeffs.iter_mut().zip(digits) {
            *c = f64::from(d.signum());
        }
        Self { coeffs }
    }

    pub fn random(rng: &mut fastrand::Rng) -> Self {
        let mut coeffs = [0.0; NUM_PARAMS];
        for c in &mut coeffs {
            *c = match rng.u8(0..4) {
                0 => 1.0,
                1 => -1.0,
                _ => 0.0,
            };
        }
        Self { coeffs }
    }

    pub fn coeffs(&self) -> &[f64; NUM_PARAMS] {
        &self.coeffs
    }

    pub fn x_terms(&self) -> &[f64] {
        &self.coeffs[..TERMS_PER_AXIS]
    }

    pub fn y_terms(&self) -> &[f64] {
        &self.coeffs[TERMS_PER_AXIS..]
    }

    #[inline]
    pub fn next_point(&self, x: f64, y: f64, t: f64) -> (f64, f64) {
        let p = &self.coeffs;
        let xx = x * x;
        let yy = y * y;
        let tt = t * t;
        let xy = x * y;
        let xt = x * t;
        let yt = y * t;
        let nx = xx * p[0] + yy * p[1] + tt * p[2] + xy * p[3] + xt * p[4] + yt * p[5] + x * p[6] + y * p[7] + t * p[8];
        let ny = xx * p[9] + yy * p[10] + tt * p[11] + xy * p[12] + xt * p[13] + yt * p[14] + x * p[15] + y * p[16] + t * p[17];
        (nx, ny)
    }

    pub fn to_code(&self) -> String {
        self.coeffs
            .chunks_exact(3)
            .map(|triple| {
                let digit = triple.iter().fold(0usize, |acc, &c| acc * 3 + coeff_to_trit(c));
                BASE27[digit] as char
            })
            .collect()
    }

    /// Best-effort decode: never fails. Missing trailing groups and any
    /// character outside `A-Z`/`a-z` decode as the blank group (all zero).
    pub fn from_code(code: &str) -> Self {
        let mut coeffs = [0.0; NUM_PARAMS];
        let mut chars = code.chars();
        for group in coeffs.chunks_exact_mut(3) {
            let mut digit = chars.next().map(letter_value).unwrap_or(0);
            for c in group.iter_mut().rev() {
                *c = trit_to_coeff(digit % 3);
                digit /= 3;
            }
        }
        Self { coeffs }
    }

    pub fn x_formula(&self) -> String {
        formula(self.x_terms())
    }

    pub fn y_formula(&self) -> String {
        formula(self.y_terms())
    }
}

impl fmt::Display for EquationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_code())
    }
}

fn coeff_to_trit(c: f64) -> usize {
    if c > 0.0 {
        1
    } else if c < 0.0 {
        2
    } else {
        0
    }
}

fn trit_to_coeff(trit: usize) -> f64 {
    match trit {
        1 => 1.0,
        2 => -1.0,
        _ => 0.0,
    }
}

fn letter_value(ch: char) -> usize {
    match ch {
        'A'..='Z' => (ch as usize) - ('A' as usize) + 1,
        'a'..='z' => (ch as usize) - ('a' as usize) + 1,
        _ => 0,
    }
}

fn formula(terms: &[f64]) -> String {
    let mut out = String::new();
    for (&c, name) in terms.iter().zip(TERM_NAMES) {
        if c == 0.0 {
            continue;
        }
        if out.is_empty() {
            if c < 0.0 {
                out.push('-');
            }
        } else if c < 0.0 {
            out.push_str(" - ");
        } else {
            out.push_str(" + ");
        }
        out.push_str(name);
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}
