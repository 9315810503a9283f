//! Real roots and factorization of polynomials over the rationals.
//!
//! Rational roots are found exactly with the rational root theorem. All other
//! real roots are found numerically in double precision and converted back to
//! fractions, in which case they are marked [Precision::Approximate].

use std::cmp::Ordering;

use ahash::AHashSet;
use tracing::{debug, instrument};

use crate::domains::{
    float::{self, ApproximationSettings, Precision},
    integer::Integer,
    rational::Fraction,
};

use super::univariate::Polynomial;

/// A real root of a polynomial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Root {
    pub value: Fraction,
    pub multiplicity: usize,
    pub precision: Precision,
}

/// A polynomial written as `c * (x - r_1)^m_1 * ... * f_1^k_1 * ...`, where the
/// `f_i` are monic factors without real roots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Factorization {
    pub leading_coefficient: Fraction,
    pub roots: Vec<Root>,
    pub remainder: Vec<(Polynomial, usize)>,
}

impl Factorization {
    /// All monic factors with their multiplicity, the linear ones first.
    pub fn factors(&self) -> Vec<(Polynomial, usize)> {
        self.roots
            .iter()
            .map(|r| (Polynomial::linear_factor(&r.value), r.multiplicity))
            .chain(self.remainder.iter().cloned())
            .collect()
    }

    /// Multiply out the factorization. The result equals the factorized polynomial
    /// iff every root is exact.
    pub fn expand(&self) -> Polynomial {
        self.factors()
            .iter()
            .fold(Polynomial::constant(self.leading_coefficient.clone()), |acc, (f, m)| {
                &acc * &f.pow(*m as u32)
            })
    }

    /// The factorization is approximate if any of its roots is.
    pub fn precision(&self) -> Precision {
        self.roots
            .iter()
            .fold(Precision::Exact, |acc, r| acc.and(r.precision))
    }
}

/// Coefficients above this magnitude are not factored by trial division when
/// enumerating rational root candidates.
const DIVISOR_SEARCH_LIMIT: u64 = 1_000_000_000_000;

fn divisors_are_cheap(c: &Integer) -> bool {
    c.magnitude()
        .to_u64()
        .map_or(false, |n| n <= DIVISOR_SEARCH_LIMIT)
}

fn sort_roots(roots: &mut [Root]) {
    roots.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal));
}

impl Polynomial {
    /// Compute the square-free factorization with Yun's algorithm.
    /// Returns monic factors `f_i` that are pairwise coprime and square free,
    /// such that `self = c * prod f_i^i`.
    pub fn square_free_factorization(&self) -> Vec<(Polynomial, usize)> {
        let f = self.make_monic();
        if f.degree() == 0 {
            return vec![];
        }

        let df = f.derivative();
        let b = f.gcd(&df);
        let mut c = &f / &b;
        let mut d = &(&df / &b) - &c.derivative();

        let mut factors = vec![];
        let mut i = 1;
        while !c.is_constant() {
            let a = c.gcd(&d);
            c = &c / &a;
            d = &(&d / &a) - &c.derivative();
            if !a.is_one() {
                factors.push((a, i));
            }
            i += 1;
        }

        factors
    }

    /// The product of all distinct irreducible factors.
    pub fn square_free_part(&self) -> Polynomial {
        let f = self.make_monic();
        if f.degree() == 0 {
            return f;
        }
        &f / &f.gcd(&f.derivative())
    }

    /// Clear the denominators and divide out all factors `x`. Returns the integer
    /// coefficients, highest degree first, and whether zero is a root.
    fn integer_coefficients(&self) -> (Vec<Integer>, bool) {
        let p = self.simplified();
        let lcm = p
            .coefficients()
            .iter()
            .fold(Integer::one(), |acc, c| acc.lcm(c.denominator()));
        let mut coeffs: Vec<Integer> = p
            .coefficients()
            .iter()
            .map(|c| &(&lcm / c.denominator()) * c.numerator())
            .collect();

        let mut zero_root = false;
        while coeffs.len() > 1 && coeffs.last().map(|c| c.is_zero()).unwrap_or(false) {
            coeffs.pop();
            zero_root = true;
        }
        (coeffs, zero_root)
    }

    /// Test every candidate `±n/d` with `n` dividing the constant coefficient and
    /// `d` dividing the leading coefficient.
    fn divisor_search(&self, coeffs: &[Integer], roots: &mut AHashSet<Fraction>) {
        let lead = coeffs[0].factors();
        let constant = coeffs[coeffs.len() - 1].factors();

        for num in &constant {
            for den in &lead {
                for sign in [1, -1] {
                    let candidate = Fraction::new(num * &Integer::new(sign), den.clone());
                    if !roots.contains(&candidate) && self.evaluate(&candidate).is_zero() {
                        roots.insert(candidate);
                    }
                }
            }
        }
    }

    /// Find all distinct rational roots using the rational root theorem, in ascending order.
    ///
    /// When the leading or constant coefficient is too large to enumerate its
    /// divisors, the candidates are searched near the numerically located roots
    /// instead. Every candidate is verified by exact evaluation.
    pub fn rational_roots(&self) -> Vec<Fraction> {
        let p = self.simplified();
        if p.is_constant() {
            return vec![];
        }

        let (coeffs, zero_root) = p.integer_coefficients();
        let mut roots = AHashSet::new();
        if zero_root {
            roots.insert(Fraction::zero());
        }

        if coeffs.len() > 1 {
            if divisors_are_cheap(&coeffs[0]) && divisors_are_cheap(&coeffs[coeffs.len() - 1]) {
                p.divisor_search(&coeffs, &mut roots);
            } else {
                debug!(
                    "Coefficients {} and {} are too large for a divisor search, locating roots numerically",
                    coeffs[0],
                    coeffs[coeffs.len() - 1]
                );
                roots.extend(p.located_rational_roots(&coeffs[0]));
            }
        }

        let mut roots: Vec<_> = roots.into_iter().collect();
        roots.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        roots
    }

    /// Find rational roots near the numerically located roots.
    ///
    /// The polynomial is shifted to the integer `s` nearest to each located root.
    /// The constant term of `f(x + s)` is `f(s)`, which is small when `s` is close
    /// to a root, so that the divisor search becomes feasible. Otherwise the located
    /// root is rounded to fractions whose denominator divides `lead`. Found roots are
    /// divided out and the search is repeated on the quotient.
    fn located_rational_roots(&self, lead: &Integer) -> Vec<Fraction> {
        let settings = ApproximationSettings::default();
        let denominators = if divisors_are_cheap(lead) {
            lead.factors()
        } else {
            vec![Integer::one()]
        };

        let mut f = self.square_free_part();
        let mut found = vec![];

        while f.degree() > 2 {
            let mut candidates = vec![];
            for x in f.numeric_roots(&settings) {
                let (shift, _) = float::approximate(x.round());
                let g = f.shifted(&shift);
                let (coeffs, zero_root) = g.integer_coefficients();
                if zero_root {
                    candidates.push(shift.clone());
                }

                if coeffs.len() < 2 {
                    continue;
                }
                if divisors_are_cheap(&coeffs[0]) && divisors_are_cheap(&coeffs[coeffs.len() - 1]) {
                    let mut near = AHashSet::new();
                    g.divisor_search(&coeffs, &mut near);
                    candidates.extend(near.iter().map(|r| r + &shift));
                } else {
                    for q in &denominators {
                        let (num, _) = float::approximate((x * q.to_f64()).round());
                        candidates.push(&num / &Fraction::from(q.clone()));
                    }
                    candidates.push(float::approximate(x).0);
                }
            }

            let mut progress = false;
            for c in candidates {
                if c.is_finite() && f.evaluate(&c).is_zero() {
                    f = &f / &Polynomial::linear_factor(&c);
                    found.push(c);
                    progress = true;
                }
            }

            if !progress {
                return found;
            }
        }

        found.extend(
            f.closed_form_roots(1)
                .into_iter()
                .filter(|r| r.precision.is_exact() && f.evaluate(&r.value).is_zero())
                .map(|r| r.value),
        );
        found
    }

    /// Find the real roots of a square-free polynomial in double precision, in
    /// ascending order. The interval bounded by the Fujiwara bound is scanned for sign
    /// changes, which are refined by bisection and polished with Newton's method.
    fn numeric_roots(&self, settings: &ApproximationSettings) -> Vec<f64> {
        let p = self.simplified();
        let n = p.degree();
        if n == 0 {
            return vec![];
        }

        let coeffs: Vec<f64> = p.coefficients().iter().map(|c| c.to_f64()).collect();
        let bound = 2. * coeffs[1..]
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let ratio = (c / coeffs[0]).abs();
                if i + 1 == n {
                    (ratio / 2.).powf(1. / n as f64)
                } else {
                    ratio.powf(1. / (i + 1) as f64)
                }
            })
            .fold(0., f64::max)
            + 1.;

        let dp = p.derivative();
        let eval = |x: f64| p.evaluate_f64(x);

        let samples = settings.root_samples.max(1);
        let step = 2. * bound / samples as f64;

        let mut roots = vec![];
        let mut lo = -bound;
        let mut f_lo = eval(lo);
        for i in 1..=samples {
            let hi = -bound + step * i as f64;
            let f_hi = eval(hi);

            if f_lo == 0. {
                roots.push(lo);
            } else if f_lo.signum() != f_hi.signum() && f_hi != 0. {
                let (mut a, mut b, mut fa) = (lo, hi, f_lo);
                while b - a > settings.root_tolerance {
                    let mid = 0.5 * (a + b);
                    if mid <= a || mid >= b {
                        // a and b are adjacent doubles
                        break;
                    }
                    let fm = eval(mid);
                    if fm == 0. {
                        a = mid;
                        b = mid;
                        break;
                    }
                    if fm.signum() == fa.signum() {
                        a = mid;
                        fa = fm;
                    } else {
                        b = mid;
                    }
                }

                let mut x = 0.5 * (a + b);
                for _ in 0..4 {
                    let d = dp.evaluate_f64(x);
                    if d == 0. {
                        break;
                    }
                    let next = x - eval(x) / d;
                    if !next.is_finite() || (next - x).abs() > step {
                        break;
                    }
                    x = next;
                }
                roots.push(x);
            }

            lo = hi;
            f_lo = f_hi;
        }

        if f_lo == 0. {
            roots.push(lo);
        }

        roots
    }

    /// Convert a double-precision root of `self` to a fraction. The root is exact iff
    /// the polynomial vanishes there.
    fn to_root(&self, x: f64, multiplicity: usize, settings: &ApproximationSettings) -> Root {
        let (value, _) = float::approximate_with_settings(x, settings);
        let precision = if self.evaluate(&value).is_zero() {
            Precision::Exact
        } else {
            Precision::Approximate
        };

        Root {
            value,
            multiplicity,
            precision,
        }
    }

    /// Solve a square-free polynomial of degree at most two in closed form.
    fn closed_form_roots(&self, multiplicity: usize) -> Vec<Root> {
        let p = self.simplified();
        let c = p.coefficients();
        match p.degree() {
            1 => vec![Root {
                value: -&c[1] / &c[0],
                multiplicity,
                precision: Precision::Exact,
            }],
            2 => {
                let (a, b, c) = (&c[0], &c[1], &c[2]);
                let disc = b * b - Fraction::from(4) * a * c;
                let two_a = a * &Fraction::from(2);

                if disc.is_negative() {
                    return vec![];
                }
                if disc.is_zero() {
                    return vec![Root {
                        value: -b / &two_a,
                        multiplicity: 2 * multiplicity,
                        precision: Precision::Exact,
                    }];
                }

                let (s, precision) = disc.sqrt_with_precision();
                let mut roots = vec![
                    Root {
                        value: (-b - &s) / &two_a,
                        multiplicity,
                        precision,
                    },
                    Root {
                        value: (-b + &s) / &two_a,
                        multiplicity,
                        precision,
                    },
                ];
                sort_roots(&mut roots);
                roots
            }
            _ => vec![],
        }
    }

    /// Factor the polynomial into linear factors over the reals as far as possible,
    /// using the default [ApproximationSettings].
    pub fn factorized(&self) -> Option<Factorization> {
        self.factorized_with_settings(&ApproximationSettings::default())
    }

    /// Factor the polynomial by peeling off one linear factor `(x - r)` at a time.
    ///
    /// Rational roots are removed exactly. Other roots are found numerically, so the
    /// remaining quotient is approximate as well. Returns `None` for constant
    /// polynomials and for polynomials without real roots.
    #[instrument(level = "debug", skip_all)]
    pub fn factorized_with_settings(
        &self,
        settings: &ApproximationSettings,
    ) -> Option<Factorization> {
        let p = self.simplified();
        if p.degree() < 1 {
            return None;
        }

        let mut roots = vec![];
        let mut remainder = vec![];

        for (mut f, multiplicity) in p.square_free_factorization() {
            for r in f.rational_roots() {
                f = &f / &Polynomial::linear_factor(&r);
                roots.push(Root {
                    value: r,
                    multiplicity,
                    precision: Precision::Exact,
                });
            }

            while f.degree() > 2 {
                let Some(x) = f.numeric_roots(settings).first().copied() else {
                    break;
                };

                let root = f.to_root(x, multiplicity, settings);
                debug!("Peeling root {} ({}) off {}", root.value, root.precision, f);
                f = f.quot_rem(&Polynomial::linear_factor(&root.value)).0;
                roots.push(root);
            }

            if f.degree() <= 2 {
                let closed = f.closed_form_roots(1);
                if !closed.is_empty() {
                    for mut r in closed {
                        r.multiplicity *= multiplicity;
                        roots.push(r);
                    }
                    continue;
                }
            }

            if !f.is_constant() {
                remainder.push((f, multiplicity));
            }
        }

        if roots.is_empty() {
            return None;
        }

        sort_roots(&mut roots);
        Some(Factorization {
            leading_coefficient: p.leading_coefficient(),
            roots,
            remainder,
        })
    }

    /// Find the distinct real roots in ascending order, with their precision,
    /// using the default [ApproximationSettings].
    pub fn roots_with_precision(&self) -> Option<Vec<(Fraction, Precision)>> {
        self.roots_with_settings(&ApproximationSettings::default())
    }

    /// Find the distinct real roots in ascending order, with their precision.
    ///
    /// Polynomials of degree one and two are solved in closed form, higher degrees
    /// through [Polynomial::factorized_with_settings]. Returns `None` when there is
    /// no real root, which includes constant polynomials.
    pub fn roots_with_settings(
        &self,
        settings: &ApproximationSettings,
    ) -> Option<Vec<(Fraction, Precision)>> {
        let p = self.simplified();

        let roots = match p.degree() {
            0 => return None,
            1 | 2 => p.square_free_part().closed_form_roots(1),
            _ => p.factorized_with_settings(settings)?.roots,
        };

        let mut seen = AHashSet::new();
        let roots: Vec<_> = roots
            .into_iter()
            .filter(|r| seen.insert(r.value.clone()))
            .map(|r| (r.value, r.precision))
            .collect();

        if roots.is_empty() {
            None
        } else {
            Some(roots)
        }
    }

    /// Find the distinct real roots in ascending order. Roots that are not
    /// rational are approximated, see [Polynomial::roots_with_precision].
    pub fn roots(&self) -> Option<Vec<Fraction>> {
        self.roots_with_precision()
            .map(|r| r.into_iter().map(|(x, _)| x).collect())
    }
}

#[cfg(test)]
mod test {
    use crate::{
        domains::{float::Precision, rational::Fraction},
        poly::univariate::Polynomial,
    };

    fn p(c: Vec<i64>) -> Polynomial {
        Polynomial::from_coefficients(c)
    }

    #[test]
    fn square_free() {
        // (x - 1)^2 (x + 2)^3 (x^2 + 1)
        let f = &(&p(vec![1, -1]).pow(2) * &p(vec![1, 2]).pow(3)) * &p(vec![1, 0, 1]);
        let sff = f.mul_scalar(&Fraction::from(3)).square_free_factorization();
        assert_eq!(
            sff,
            vec![(p(vec![1, 0, 1]), 1), (p(vec![1, -1]), 2), (p(vec![1, 2]), 3)]
        );
        assert_eq!(f.square_free_part(), p(vec![1, 1, -1, 1, -2]));
    }

    #[test]
    fn rational_roots() {
        // (x - 1)(3x - 1)(2x + 1) / 3
        let f = p(vec![6, -5, -2, 1]).mul_scalar(&Fraction::from((1, 3)));
        assert_eq!(
            f.rational_roots(),
            vec![Fraction::from((-1, 2)), Fraction::from((1, 3)), Fraction::one()]
        );

        assert_eq!(
            p(vec![2, -1, -1, 0, 0]).rational_roots(),
            vec![Fraction::from((-1, 2)), Fraction::zero(), Fraction::one()]
        );
        assert!(p(vec![1, 0, -2]).rational_roots().is_empty());
    }

    #[test]
    fn rational_roots_of_large_coefficients() {
        // (x - 10000019)(x - 10000079)(2x + 10000103)
        let f = &(&p(vec![1, -10000019]) * &p(vec![1, -10000079])) * &p(vec![2, 10000103]);
        assert_eq!(
            f.rational_roots(),
            vec![
                Fraction::from((-10000103, 2)),
                Fraction::from(10000019),
                Fraction::from(10000079)
            ]
        );

        // roots closer together than the rounding error of a double evaluation
        let h = &(&p(vec![1, -10000000]) * &p(vec![1, -10000001])) * &p(vec![1, -10000003]);
        assert_eq!(
            h.roots(),
            Some(vec![
                Fraction::from(10000000),
                Fraction::from(10000001),
                Fraction::from(10000003)
            ])
        );

        // the real root of x^3 + 10^21 + 1 lies just below -10^7
        let constant: Fraction = "1000000000000000000001".parse().unwrap();
        let g = Polynomial::from_coefficients(vec![
            Fraction::one(),
            Fraction::zero(),
            Fraction::zero(),
            constant,
        ]);
        assert!(g.rational_roots().is_empty());
        let r = g.roots_with_precision().unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].1, Precision::Approximate);
    }

    #[test]
    fn roots() {
        assert_eq!(p(vec![1, 2, 1]).roots(), Some(vec![Fraction::from(-1)]));
        assert_eq!(p(vec![1, 0, 1]).roots(), None);
        assert_eq!(p(vec![5]).roots(), None);
        assert_eq!(p(vec![2, -3]).roots(), Some(vec![Fraction::from((3, 2))]));
        assert_eq!(
            p(vec![1, -6, 11, -6]).roots(),
            Some(vec![1.into(), 2.into(), 3.into()])
        );

        let r = p(vec![1, 0, -2]).roots_with_precision().unwrap();
        assert_eq!(r.len(), 2);
        assert!(r.iter().all(|(_, p)| *p == Precision::Approximate));
        assert!((r[1].0.to_f64() - std::f64::consts::SQRT_2).abs() < 1e-10);
        assert_eq!(r[0].0, -&r[1].0);
    }

    #[test]
    fn numeric_roots() {
        // x^3 - 2 has the single real root 2^(1/3)
        let r = p(vec![1, 0, 0, -2]).roots_with_precision().unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].1, Precision::Approximate);
        assert!((r[0].0.to_f64() - 2f64.cbrt()).abs() < 1e-6);

        // (x - 1)(x^3 - 3x + 1): one exact and three approximate roots
        let f = &p(vec![1, -1]) * &p(vec![1, 0, -3, 1]);
        let r = f.roots_with_precision().unwrap();
        assert_eq!(r.len(), 4);
        assert_eq!(r.iter().filter(|(_, p)| *p == Precision::Exact).count(), 1);
        for (x, _) in &r {
            assert!(f.evaluate_f64(x.to_f64()).abs() < 1e-6);
        }
    }

    #[test]
    fn factorized() {
        let f = p(vec![2, -2, -4]);
        let fac = f.factorized().unwrap();
        assert_eq!(fac.leading_coefficient, 2);
        assert_eq!(fac.precision(), Precision::Exact);
        assert_eq!(fac.expand(), f);
        assert_eq!(fac.factors(), vec![(p(vec![1, 1]), 1), (p(vec![1, -2]), 1)]);

        // (x - 3)^2 (x^2 + 1)
        let g = &p(vec![1, -3]).pow(2) * &p(vec![1, 0, 1]);
        let fac = g.factorized().unwrap();
        assert_eq!(fac.roots.len(), 1);
        assert_eq!(fac.roots[0].multiplicity, 2);
        assert_eq!(fac.remainder, vec![(p(vec![1, 0, 1]), 1)]);
        assert_eq!(fac.expand(), g);

        assert!(p(vec![1, 0, 1]).factorized().is_none());
        assert!(p(vec![3]).factorized().is_none());
    }
}
