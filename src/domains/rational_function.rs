use std::{fmt::Display, ops::Neg};

use tracing::debug;

use crate::{
    domains::{
        float::{self, ApproximationSettings},
        rational::Fraction,
    },
    poly::univariate::Polynomial,
    utils::{forward_assign_op, forward_binop},
};

/// The side from which a limit is approached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Both,
}

/// A quotient of two univariate polynomials with a non-zero denominator.
///
/// The constructor keeps the numerator and denominator as given, so that the
/// function is undefined at every zero of the denominator. Arithmetic operations
/// return [reduced](RationalFunction::reduced) functions.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct RationalFunction {
    numerator: Polynomial,
    denominator: Polynomial,
}

impl RationalFunction {
    /// Create `numerator / denominator`. Returns `None` if the denominator is zero.
    pub fn new(numerator: Polynomial, denominator: Polynomial) -> Option<RationalFunction> {
        if denominator.is_zero() {
            return None;
        }

        Some(RationalFunction {
            numerator: numerator.simplified(),
            denominator: denominator.simplified(),
        })
    }

    pub fn from_polynomial(p: Polynomial) -> RationalFunction {
        RationalFunction {
            numerator: p.simplified(),
            denominator: Polynomial::one(),
        }
    }

    #[inline]
    pub fn zero() -> RationalFunction {
        RationalFunction::from_polynomial(Polynomial::zero())
    }

    #[inline]
    pub fn one() -> RationalFunction {
        RationalFunction::from_polynomial(Polynomial::one())
    }

    #[inline]
    pub fn numerator(&self) -> &Polynomial {
        &self.numerator
    }

    #[inline]
    pub fn denominator(&self) -> &Polynomial {
        &self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// Cancel the greatest common divisor of the numerator and denominator and make
    /// the denominator monic.
    pub fn reduced(&self) -> RationalFunction {
        if self.numerator.is_zero() {
            return RationalFunction::zero();
        }

        let g = self.numerator.gcd(&self.denominator);
        let (num, den) = if g.is_one() {
            (self.numerator.clone(), self.denominator.clone())
        } else {
            (&self.numerator / &g, &self.denominator / &g)
        };

        let lead = den.leading_coefficient();
        RationalFunction {
            numerator: num.mul_scalar(&lead.reciprocal()),
            denominator: den.make_monic(),
        }
    }

    /// Check if the reduced function is a polynomial.
    pub fn is_polynomial(&self) -> bool {
        self.reduced().denominator.is_constant()
    }

    /// Evaluate the function at `x`. Returns `None` where the denominator vanishes,
    /// including at removable discontinuities.
    pub fn evaluate(&self, x: &Fraction) -> Option<Fraction> {
        let d = self.denominator.evaluate(x);
        if d.is_zero() {
            return None;
        }

        Some(self.numerator.evaluate(x) / d)
    }

    fn add_impl(&self, other: &RationalFunction) -> RationalFunction {
        let l = self.denominator.lcm(&other.denominator);
        let num = &self.numerator * &(&l / &self.denominator)
            + &other.numerator * &(&l / &other.denominator);

        RationalFunction {
            numerator: num,
            denominator: l,
        }
        .reduced()
    }

    fn sub_impl(&self, other: &RationalFunction) -> RationalFunction {
        self.add_impl(&-other)
    }

    fn mul_impl(&self, other: &RationalFunction) -> RationalFunction {
        RationalFunction {
            numerator: &self.numerator * &other.numerator,
            denominator: &self.denominator * &other.denominator,
        }
        .reduced()
    }

    fn div_impl(&self, other: &RationalFunction) -> RationalFunction {
        if other.is_zero() {
            panic!("Cannot divide {} by the zero rational function", self);
        }

        RationalFunction {
            numerator: &self.numerator * &other.denominator,
            denominator: &self.denominator * &other.numerator,
        }
        .reduced()
    }

    /// Compute the derivative with the quotient rule.
    pub fn derivative(&self) -> RationalFunction {
        if self.numerator.is_constant() && self.denominator.is_constant() {
            return RationalFunction::zero();
        }

        let dn = self.numerator.derivative();
        let dd = self.denominator.derivative();

        RationalFunction {
            numerator: &dn * &self.denominator - &self.numerator * &dd,
            denominator: &self.denominator * &self.denominator,
        }
        .reduced()
    }

    /// The distinct real zeros, which are the roots of the reduced numerator.
    pub fn zeros(&self) -> Option<Vec<Fraction>> {
        self.reduced().numerator.roots()
    }

    /// The distinct real poles, which are the roots of the reduced denominator.
    pub fn poles(&self) -> Option<Vec<Fraction>> {
        self.reduced().denominator.roots()
    }

    /// Compute the limit at `at` using the default [ApproximationSettings].
    pub fn limit(&self, at: &Fraction, direction: Direction) -> Fraction {
        self.limit_with_settings(at, direction, &ApproximationSettings::default())
    }

    /// Compute the limit at `at`, approached from `direction`.
    ///
    /// Removable discontinuities are cancelled exactly. At a pole, the sign of the
    /// function is probed at `at ± limit_epsilon`, which assumes there is no other
    /// zero or pole within that distance. The result is then an infinity, or NaN
    /// if the two sides of a [Direction::Both] limit disagree.
    pub fn limit_with_settings(
        &self,
        at: &Fraction,
        direction: Direction,
        settings: &ApproximationSettings,
    ) -> Fraction {
        let r = self.reduced();
        if let Some(v) = r.evaluate(at) {
            return v;
        }

        let eps = float::approximate(settings.limit_epsilon).0;
        let side = |x: Fraction| {
            let v = r.evaluate(&x).unwrap_or_else(Fraction::nan);
            debug!("Probing limit of {} at {}: {}", r, x, v);
            match v.signum() {
                1 => Fraction::infinity(),
                -1 => Fraction::neg_infinity(),
                _ => Fraction::nan(),
            }
        };

        match direction {
            Direction::Left => side(at - &eps),
            Direction::Right => side(at + &eps),
            Direction::Both => {
                let (left, right) = (side(at - &eps), side(at + &eps));
                if left == right {
                    left
                } else {
                    Fraction::nan()
                }
            }
        }
    }

    /// Compute the limit for `x` going to `+inf` if `positive` and otherwise to `-inf`.
    pub fn limit_at_infinity(&self, positive: bool) -> Fraction {
        let r = self.reduced();
        if r.is_zero() {
            return Fraction::zero();
        }

        let (n, d) = (r.numerator.degree(), r.denominator.degree());
        let ratio = r.numerator.leading_coefficient() / r.denominator.leading_coefficient();

        if n < d {
            Fraction::zero()
        } else if n == d {
            ratio
        } else {
            let flip = !positive && (n - d) % 2 == 1;
            if ratio.is_positive() != flip {
                Fraction::infinity()
            } else {
                Fraction::neg_infinity()
            }
        }
    }

    /// The horizontal asymptote `y = c`, if any.
    pub fn horizontal_asymptote(&self) -> Option<Fraction> {
        let r = self.reduced();
        if r.numerator.degree() > r.denominator.degree() {
            return None;
        }
        Some(r.limit_at_infinity(true))
    }
}

impl From<Polynomial> for RationalFunction {
    fn from(p: Polynomial) -> Self {
        RationalFunction::from_polynomial(p)
    }
}

impl Display for RationalFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.denominator.is_one() {
            return write!(f, "{}", self.numerator);
        }

        write!(f, "({})/({})", self.numerator, self.denominator)
    }
}

forward_binop!(RationalFunction, Add, add, add_impl);
forward_binop!(RationalFunction, Sub, sub, sub_impl);
forward_binop!(RationalFunction, Mul, mul, mul_impl);
forward_binop!(RationalFunction, Div, div, div_impl);
forward_assign_op!(RationalFunction, AddAssign, add_assign, add_impl);
forward_assign_op!(RationalFunction, SubAssign, sub_assign, sub_impl);
forward_assign_op!(RationalFunction, MulAssign, mul_assign, mul_impl);
forward_assign_op!(RationalFunction, DivAssign, div_assign, div_impl);

impl Neg for RationalFunction {
    type Output = RationalFunction;

    fn neg(self) -> RationalFunction {
        RationalFunction {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl Neg for &RationalFunction {
    type Output = RationalFunction;

    fn neg(self) -> RationalFunction {
        RationalFunction {
            numerator: -&self.numerator,
            denominator: self.denominator.clone(),
        }
    }
}
