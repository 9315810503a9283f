//! The bridge between double-precision floating point numbers and exact fractions.
//!
//! Irrational results (square roots, trigonometric functions, numerically found
//! roots) are computed as `f64` and converted back to a [Fraction] with
//! [approximate]. The conversion reports whether the fraction can be trusted to
//! be the value the double was meant to represent ([Precision::Exact]) or whether
//! it is a truncated continued fraction ([Precision::Approximate]).

use std::fmt::{Display, Formatter};

use tracing::debug;

use super::{integer::Integer, natural::Natural, rational::Fraction};

/// Tuning knobs for every computation that leaves exact arithmetic.
#[derive(Clone, Debug, PartialEq)]
pub struct ApproximationSettings {
    /// The maximal number of terms of a continued fraction expansion.
    pub max_terms: usize,
    /// A continued fraction expansion stops before a partial quotient larger than this.
    pub max_partial_quotient: u64,
    /// Doubles with at most this many digits after the decimal point are
    /// converted by scaling with a power of ten.
    pub max_decimal_places: usize,
    /// The minimal number of digits a repeating tail must span.
    pub min_repeat_length: usize,
    /// The distance from the evaluation point used for one-sided limits.
    pub limit_epsilon: f64,
    /// The tolerance of the numeric root finder.
    pub root_tolerance: f64,
    /// The number of intervals the numeric root finder scans for sign changes.
    pub root_samples: usize,
}

impl Default for ApproximationSettings {
    fn default() -> Self {
        ApproximationSettings {
            max_terms: 20,
            max_partial_quotient: 10_000,
            max_decimal_places: 10,
            min_repeat_length: 6,
            limit_epsilon: 1e-4,
            root_tolerance: 1e-9,
            root_samples: 400,
        }
    }
}

/// Whether a value obtained through floating point is trusted to be exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Precision {
    Exact,
    Approximate,
}

impl Precision {
    #[inline]
    pub fn is_exact(&self) -> bool {
        *self == Precision::Exact
    }

    /// The precision of a value computed from two values with the given precisions.
    #[inline]
    pub fn and(self, other: Precision) -> Precision {
        if self.is_exact() && other.is_exact() {
            Precision::Exact
        } else {
            Precision::Approximate
        }
    }
}

impl Display for Precision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Precision::Exact => f.write_str("exact"),
            Precision::Approximate => f.write_str("approximate"),
        }
    }
}

/// Convert a double to a fraction using the default [ApproximationSettings].
pub fn approximate(x: f64) -> (Fraction, Precision) {
    approximate_with_settings(x, &ApproximationSettings::default())
}

/// Convert a double to a fraction.
///
/// The conversion tries, in order:
/// 1. integral doubles are converted exactly;
/// 2. doubles whose shortest decimal representation has at most
///    `max_decimal_places` digits after the point are scaled by a power of ten;
/// 3. decimal expansions with a repeating tail are converted with the
///    repeating-decimal formula;
/// 4. otherwise a continued fraction of at most `max_terms` terms is built,
///    stopping before a partial quotient exceeds `max_partial_quotient`.
///
/// Only the last path yields [Precision::Approximate]. Infinities and NaN map to
/// the corresponding fraction sentinels.
pub fn approximate_with_settings(x: f64, settings: &ApproximationSettings) -> (Fraction, Precision) {
    if x.is_nan() {
        return (Fraction::nan(), Precision::Exact);
    }
    if x.is_infinite() {
        return if x > 0. {
            (Fraction::infinity(), Precision::Exact)
        } else {
            (Fraction::neg_infinity(), Precision::Exact)
        };
    }

    // the shortest representation that round-trips, never in scientific notation
    let repr = format!("{}", x.abs());
    let (int_part, frac_part) = match repr.split_once('.') {
        Some((i, f)) => (i, f),
        None => (repr.as_str(), ""),
    };

    let int: Integer = match int_part.parse() {
        Ok(i) => i,
        Err(_) => return continued_fraction(x, settings),
    };

    let res = if frac_part.is_empty() {
        Fraction::from(int)
    } else if frac_part.len() <= settings.max_decimal_places {
        decimal_to_fraction(&int, frac_part)
    } else if let Some(f) = repeating_decimal(&int, frac_part, settings.min_repeat_length)
        .filter(|f| rounds_to(f, x.abs()))
    {
        f
    } else {
        return continued_fraction(x, settings);
    };

    if x < 0. {
        (-res, Precision::Exact)
    } else {
        (res, Precision::Exact)
    }
}

/// Check that `f` is within a few units in the last place of `x`.
fn rounds_to(f: &Fraction, x: f64) -> bool {
    (f.to_f64() - x).abs() <= 4. * f64::EPSILON * x
}

fn parse_digits(digits: &str) -> Natural {
    if digits.is_empty() {
        Natural::zero()
    } else {
        digits.parse().unwrap_or_default()
    }
}

/// Convert `int.digits` to `(int * 10^k + digits) / 10^k`.
fn decimal_to_fraction(int: &Integer, digits: &str) -> Fraction {
    let scale = Integer::from(Natural::one().mul_pow10(digits.len()));
    let num = int * &scale + Integer::from(parse_digits(digits));
    Fraction::new(num, scale)
}

/// Find a repeating tail in the digits after the decimal point and convert it exactly.
///
/// The last digit is ignored since it is rounded. A tail is accepted when it
/// spans at least two periods and at least `min_length` digits.
fn repeating_decimal(int: &Integer, digits: &str, min_length: usize) -> Option<Fraction> {
    let d = digits.as_bytes();
    let n = d.len().checked_sub(1)?;

    for start in 0..n {
        let tail = n - start;
        if tail < min_length {
            break;
        }

        for period in 1..=tail / 2 {
            if (start..n - period).all(|i| d[i] == d[i + period]) {
                // x = int + (A.B - A) / (10^s (10^p - 1))
                let prefix = &digits[..start];
                let with_block = &digits[..start + period];

                let head = Integer::from(parse_digits(with_block));
                let prefix = Integer::from(parse_digits(prefix));
                let den = Integer::from(Natural::one().mul_pow10(start))
                    * (Integer::from(Natural::one().mul_pow10(period)) - Integer::one());

                return Some(Fraction::from(int.clone()) + Fraction::new(head - prefix, den));
            }
        }
    }

    None
}

/// Approximate `x` by a truncated continued fraction.
///
/// The expansion is done on `|x|`. The first partial quotient after a zero integer
/// part is never truncated, so that a nonzero double does not collapse to zero.
fn continued_fraction(x: f64, settings: &ApproximationSettings) -> (Fraction, Precision) {
    let mut terms: Vec<Integer> = vec![];

    let mut r = x.abs();
    for _ in 0..settings.max_terms {
        let a = r.floor();
        let leading = terms.len() == 1 && terms[0].is_zero();
        if !terms.is_empty() && !leading && a > settings.max_partial_quotient as f64 {
            debug!(
                "Truncating continued fraction of {} at large partial quotient {}",
                x, a
            );
            break;
        }

        // integral doubles print without an exponent
        let Ok(term) = format!("{}", a).parse::<Integer>() else {
            break;
        };
        terms.push(term);

        let frac = r - a;
        if frac == 0. {
            break;
        }
        r = 1. / frac;
        if !r.is_finite() {
            break;
        }
    }

    // fold from the innermost term outwards
    let mut iter = terms.into_iter().rev();
    let mut res = match iter.next() {
        Some(a) => Fraction::from(a),
        None => Fraction::zero(),
    };
    for a in iter {
        res = Fraction::from(a) + res.reciprocal();
    }

    if x < 0. {
        res = -res;
    }

    debug!("Approximated {} by {}", x, res);

    (res, Precision::Approximate)
}

#[cfg(test)]
mod test {
    use super::{approximate, approximate_with_settings, ApproximationSettings, Precision};
    use crate::domains::rational::Fraction;

    #[test]
    fn integral() {
        assert_eq!(approximate(3.), (Fraction::from(3), Precision::Exact));
        assert_eq!(approximate(-12.), (Fraction::from(-12), Precision::Exact));
        assert_eq!(approximate(0.), (Fraction::zero(), Precision::Exact));
        assert_eq!(
            approximate(1e30).0.to_string(),
            "1000000000000000000000000000000"
        );
    }

    #[test]
    fn short_decimals() {
        assert_eq!(approximate(1.25), (Fraction::from((5, 4)), Precision::Exact));
        assert_eq!(approximate(-0.1), (Fraction::from((-1, 10)), Precision::Exact));
        assert_eq!(approximate(0.1 + 0.2), (Fraction::from((3, 10)), Precision::Exact));
    }

    #[test]
    fn repeating() {
        assert_eq!(approximate(1. / 3.), (Fraction::from((1, 3)), Precision::Exact));
        assert_eq!(approximate(2. / 7.), (Fraction::from((2, 7)), Precision::Exact));
        assert_eq!(approximate(-1. / 6.), (Fraction::from((-1, 6)), Precision::Exact));
        assert_eq!(
            approximate(13. / 11.),
            (Fraction::from((13, 11)), Precision::Exact)
        );
    }

    #[test]
    fn irrational() {
        let (f, p) = approximate(std::f64::consts::SQRT_2);
        assert_eq!(p, Precision::Approximate);
        assert!((f.to_f64() - std::f64::consts::SQRT_2).abs() < 1e-12);

        let (f, p) = approximate(std::f64::consts::PI);
        assert_eq!(p, Precision::Approximate);
        // 292 is the first large partial quotient of pi
        let settings = ApproximationSettings {
            max_partial_quotient: 100,
            ..Default::default()
        };
        let (g, _) = approximate_with_settings(std::f64::consts::PI, &settings);
        assert_eq!(g, Fraction::from((355, 113)));
        assert!((f.to_f64() - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn tiny_magnitudes() {
        for x in [1e-12, 1e-20, 3.5e-11, -2.5e-15, 1e-300] {
            let (f, p) = approximate(x);
            assert!(!f.is_zero(), "{} collapsed to zero", x);
            assert_eq!(p, Precision::Approximate);
            assert!(((f.to_f64() - x) / x).abs() < 1e-9, "{} became {}", x, f);
        }
    }

    #[test]
    fn noise_in_the_last_digit() {
        // the trailing 1 is not a repeating block of zeros
        let (f, p) = approximate(5.000000000001);
        assert_eq!(p, Precision::Approximate);
        assert!((f.to_f64() - 5.000000000001).abs() < 1e-9);
    }

    #[test]
    fn sentinels() {
        assert!(approximate(f64::NAN).0.is_nan());
        assert_eq!(approximate(f64::INFINITY).0, Fraction::infinity());
        assert_eq!(approximate(f64::NEG_INFINITY).0, Fraction::neg_infinity());
    }
}
