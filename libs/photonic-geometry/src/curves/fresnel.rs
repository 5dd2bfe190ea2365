//! Fresnel integrals in the normalization
//! `C(x) = ∫₀ˣ cos(πs²/2) ds`, `S(x) = ∫₀ˣ sin(πs²/2) ds`.
//!
//! The Euler spiral `(C(a), S(a))` has unit speed and curvature `πa`, which
//! is what the bend generators scale against.

use std::f64::consts::FRAC_PI_2;

/// Series terms are summed until they drop below this magnitude.
const SERIES_EPSILON: f64 = 1.0e-18;

/// Hard cap on series terms; arguments used by the bends stay below 1.
const MAX_TERMS: usize = 64;

/// Returns `(C(x), S(x))`.
///
/// Power series evaluation; accurate to machine precision for `|x| ≤ 2`,
/// which covers every argument the bend generators produce (`|x| ≤ 1/√2`).
/// Both integrals are odd, so negative arguments are valid.
pub fn fresnel(x: f64) -> (f64, f64) {
    if x == 0.0 {
        return (0.0, 0.0);
    }
    let z = FRAC_PI_2 * x * x;
    let z2 = z * z;

    // C: Σ (-1)^n z^(2n) x / ((2n)! (4n+1))
    // S: Σ (-1)^n z^(2n+1) x / ((2n+1)! (4n+3))
    let mut c = 0.0;
    let mut s = 0.0;
    let mut power_c = x;
    let mut power_s = x * z;
    for n in 0..MAX_TERMS {
        let nf = n as f64;
        let term_c = power_c / (4.0 * nf + 1.0);
        let term_s = power_s / (4.0 * nf + 3.0);
        c += term_c;
        s += term_s;
        if term_c.abs() < SERIES_EPSILON && term_s.abs() < SERIES_EPSILON {
            break;
        }
        power_c *= -z2 / ((2.0 * nf + 1.0) * (2.0 * nf + 2.0));
        power_s *= -z2 / ((2.0 * nf + 2.0) * (2.0 * nf + 3.0));
    }
    (c, s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_known_values() {
        // Reference values of the normalized integrals.
        let (c, s) = fresnel(1.0);
        assert_abs_diff_eq!(c, 0.779_893_400_376_822_8, epsilon = 1e-14);
        assert_abs_diff_eq!(s, 0.438_259_147_390_354_8, epsilon = 1e-14);

        let (c, s) = fresnel(0.5);
        assert_abs_diff_eq!(c, 0.492_344_225_871_446_8, epsilon = 1e-14);
        assert_abs_diff_eq!(s, 0.064_732_432_859_999_29, epsilon = 1e-14);
    }

    #[test]
    fn test_odd_symmetry() {
        let (c, s) = fresnel(0.3);
        let (cn, sn) = fresnel(-0.3);
        assert_eq!(cn, -c);
        assert_eq!(sn, -s);
    }

    #[test]
    fn test_derivative_matches_integrand() {
        let x = 0.6;
        let h = 1e-6;
        let (c1, s1) = fresnel(x + h);
        let (c0, s0) = fresnel(x - h);
        let z = FRAC_PI_2 * x * x;
        assert_abs_diff_eq!((c1 - c0) / (2.0 * h), z.cos(), epsilon = 1e-8);
        assert_abs_diff_eq!((s1 - s0) / (2.0 * h), z.sin(), epsilon = 1e-8);
    }
}
