use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    ops::Neg,
    str::FromStr,
};

use crate::utils::{forward_assign_op, forward_binop};

use super::{
    float::{self, ApproximationSettings, Precision},
    integer::Integer,
    natural::Natural,
};

/// An exact rational number `numerator / denominator`, extended with
/// positive and negative infinity and NaN.
///
/// The fraction is always stored in lowest terms with a non-negative denominator.
/// A zero denominator encodes the sentinels: `1/0` is `inf`, `-1/0` is `-inf`
/// and `0/0` is `nan`. Since the representation is canonical, equality is
/// structural: in particular `nan == nan`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: Integer,
    denominator: Integer,
}

/// The way [Fraction::rounded] resolves a fraction to an integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoundingRule {
    /// Round to the closest integer, ties away from zero.
    ToNearestOrAwayFromZero,
    /// Round to the closest integer, ties to the even one.
    ToNearestOrEven,
    /// Round towards positive infinity.
    Up,
    /// Round towards negative infinity.
    Down,
    TowardZero,
    AwayFromZero,
}

impl<T: Into<Integer>> From<T> for Fraction {
    #[inline]
    fn from(value: T) -> Self {
        Fraction {
            numerator: value.into(),
            denominator: Integer::one(),
        }
    }
}

impl From<&Integer> for Fraction {
    #[inline]
    fn from(value: &Integer) -> Self {
        Fraction {
            numerator: value.clone(),
            denominator: Integer::one(),
        }
    }
}

impl<T: Into<Integer>> From<(T, T)> for Fraction {
    #[inline]
    fn from((num, den): (T, T)) -> Self {
        Fraction::new(num.into(), den.into())
    }
}

macro_rules! cmp_with_native {
    ($base: ty) => {
        impl PartialEq<$base> for Fraction {
            #[inline]
            fn eq(&self, other: &$base) -> bool {
                self.denominator.is_one() && self.numerator == *other
            }
        }

        impl PartialEq<Fraction> for $base {
            #[inline]
            fn eq(&self, other: &Fraction) -> bool {
                other == self
            }
        }

        impl PartialOrd<$base> for Fraction {
            #[inline]
            fn partial_cmp(&self, other: &$base) -> Option<Ordering> {
                self.partial_cmp(&Fraction::from(*other))
            }
        }

        impl PartialOrd<Fraction> for $base {
            #[inline]
            fn partial_cmp(&self, other: &Fraction) -> Option<Ordering> {
                other.partial_cmp(self).map(|x| x.reverse())
            }
        }
    };
}

cmp_with_native!(i32);
cmp_with_native!(i64);

impl Fraction {
    /// Create a new fraction, reduced to lowest terms. A zero denominator
    /// yields the sentinel matching the sign of the numerator.
    pub fn new(numerator: Integer, denominator: Integer) -> Fraction {
        if denominator.is_zero() {
            return Fraction {
                numerator: Integer::from(numerator.signum()),
                denominator,
            };
        }

        if numerator == denominator {
            return Fraction::one();
        }

        let gcd = numerator.gcd(&denominator);
        let (mut numerator, mut denominator) = if gcd.is_one() {
            (numerator, denominator)
        } else {
            (&numerator / &gcd, &denominator / &gcd)
        };

        if denominator.is_negative() {
            numerator = -numerator;
            denominator = -denominator;
        }

        Fraction {
            numerator,
            denominator,
        }
    }

    /// Create a fraction without reducing it. The caller must guarantee that the
    /// numerator and denominator are coprime and that the denominator is positive.
    #[inline]
    pub fn from_unchecked<T: Into<Integer>>(num: T, den: T) -> Fraction {
        Fraction {
            numerator: num.into(),
            denominator: den.into(),
        }
    }

    /// Convert a double using [float::approximate].
    pub fn from_f64(x: f64) -> Fraction {
        float::approximate(x).0
    }

    /// Return the fraction reduced to lowest terms.
    pub fn reduced(&self) -> Fraction {
        Fraction::new(self.numerator.clone(), self.denominator.clone())
    }

    #[inline]
    pub fn numerator(&self) -> &Integer {
        &self.numerator
    }

    #[inline]
    pub fn denominator(&self) -> &Integer {
        &self.denominator
    }

    #[inline]
    pub fn zero() -> Fraction {
        Fraction::from_unchecked(Integer::zero(), Integer::one())
    }

    #[inline]
    pub fn one() -> Fraction {
        Fraction::from_unchecked(Integer::one(), Integer::one())
    }

    #[inline]
    pub fn infinity() -> Fraction {
        Fraction::from_unchecked(Integer::one(), Integer::zero())
    }

    #[inline]
    pub fn neg_infinity() -> Fraction {
        Fraction::from_unchecked(Integer::new(-1), Integer::zero())
    }

    #[inline]
    pub fn nan() -> Fraction {
        Fraction::from_unchecked(Integer::zero(), Integer::zero())
    }

    #[inline]
    pub fn is_nan(&self) -> bool {
        self.denominator.is_zero() && self.numerator.is_zero()
    }

    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.denominator.is_zero() && !self.numerator.is_zero()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        !self.denominator.is_zero()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero() && self.denominator.is_one()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.numerator.is_one() && self.denominator.is_one()
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.numerator.is_positive()
    }

    /// Return `-1`, `0` or `1`. NaN has signum `0`.
    #[inline]
    pub fn signum(&self) -> i32 {
        self.numerator.signum()
    }

    pub fn abs(&self) -> Fraction {
        Fraction::from_unchecked(self.numerator.abs(), self.denominator.clone())
    }

    /// Compute `1 / self`. The reciprocal of zero is `inf` and that of an infinity is zero.
    pub fn reciprocal(&self) -> Fraction {
        Fraction::new(self.denominator.clone(), self.numerator.clone())
    }

    /// Return the integer value, if the fraction is an integer.
    pub fn to_integer(&self) -> Option<Integer> {
        if self.is_integer() {
            Some(self.numerator.clone())
        } else {
            None
        }
    }

    pub fn to_f64(&self) -> f64 {
        if self.is_nan() {
            return f64::NAN;
        }
        if self.is_infinite() {
            return if self.is_negative() {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
        }

        let n = self.numerator.to_f64();
        let d = self.denominator.to_f64();
        if n.is_finite() && d.is_finite() {
            return n / d;
        }

        // drop the least significant digits of both parts so that they fit
        let shift = self
            .numerator
            .magnitude()
            .num_digits()
            .max(self.denominator.magnitude().num_digits())
            - 300;
        let truncate = |n: &Natural| {
            Natural::from_digits(n.digits().iter().skip(shift).copied()).to_f64()
        };
        let r = truncate(self.numerator.magnitude()) / truncate(self.denominator.magnitude());
        if self.is_negative() {
            -r
        } else {
            r
        }
    }

    fn add_impl(&self, other: &Fraction) -> Fraction {
        if self.is_nan() || other.is_nan() {
            return Fraction::nan();
        }

        match (self.is_infinite(), other.is_infinite()) {
            (true, true) => {
                if self.signum() == other.signum() {
                    self.clone()
                } else {
                    Fraction::nan()
                }
            }
            (true, false) => self.clone(),
            (false, true) => other.clone(),
            (false, false) => {
                if self.denominator == other.denominator {
                    Fraction::new(&self.numerator + &other.numerator, self.denominator.clone())
                } else {
                    Fraction::new(
                        &self.numerator * &other.denominator + &other.numerator * &self.denominator,
                        &self.denominator * &other.denominator,
                    )
                }
            }
        }
    }

    fn sub_impl(&self, other: &Fraction) -> Fraction {
        if self.is_nan() || other.is_nan() {
            return Fraction::nan();
        }

        match (self.is_infinite(), other.is_infinite()) {
            (true, true) => Fraction::nan(),
            (true, false) => self.clone(),
            (false, true) => -other,
            (false, false) => self.add_impl(&-other),
        }
    }

    fn mul_impl(&self, other: &Fraction) -> Fraction {
        if self.is_nan() || other.is_nan() {
            return Fraction::nan();
        }

        if self.is_infinite() || other.is_infinite() {
            return match self.signum() * other.signum() {
                0 => Fraction::nan(),
                1 => Fraction::infinity(),
                _ => Fraction::neg_infinity(),
            };
        }

        if self.is_zero() || other.is_zero() {
            return Fraction::zero();
        }

        // cross-reduce first to keep the intermediate products small
        let g1 = self.numerator.gcd(&other.denominator);
        let g2 = other.numerator.gcd(&self.denominator);

        Fraction::from_unchecked(
            (&self.numerator / &g1) * (&other.numerator / &g2),
            (&self.denominator / &g2) * (&other.denominator / &g1),
        )
    }

    fn div_impl(&self, other: &Fraction) -> Fraction {
        if self.is_nan() || other.is_nan() {
            return Fraction::nan();
        }

        match (self.is_infinite(), other.is_infinite()) {
            (true, true) => Fraction::nan(),
            (true, false) => {
                if other.is_negative() {
                    -self
                } else {
                    self.clone()
                }
            }
            (false, true) => Fraction::zero(),
            (false, false) => {
                if other.is_zero() {
                    return Fraction::new(self.numerator.clone(), Integer::zero());
                }
                self.mul_impl(&other.reciprocal())
            }
        }
    }

    /// Compute `self^e`. A negative exponent takes the power of the reciprocal.
    pub fn pow(&self, e: i32) -> Fraction {
        if self.is_nan() {
            return Fraction::nan();
        }
        if e == 0 {
            return Fraction::one();
        }
        if e < 0 {
            return self.reciprocal().pow(-e);
        }

        if self.is_infinite() {
            return if self.is_negative() && e % 2 == 1 {
                Fraction::neg_infinity()
            } else {
                Fraction::infinity()
            };
        }

        Fraction::from_unchecked(
            self.numerator.pow(e as u32),
            self.denominator.pow(e as u32),
        )
    }

    /// Split a finite fraction into its quotient truncated towards zero
    /// and its remainder numerator.
    fn truncated_parts(&self) -> (Integer, Integer) {
        self.numerator.quot_rem(&self.denominator)
    }

    /// Round to an integer according to `rule`. Non-finite fractions are returned unchanged.
    pub fn rounded(&self, rule: RoundingRule) -> Fraction {
        if !self.is_finite() || self.is_integer() {
            return self.clone();
        }

        let (q, r) = self.truncated_parts();
        let away = if self.is_negative() {
            &q - &Integer::one()
        } else {
            &q + &Integer::one()
        };

        // compare twice the remainder with the denominator to find ties
        let twice = (&r + &r).abs();
        let res = match rule {
            RoundingRule::TowardZero => q,
            RoundingRule::AwayFromZero => away,
            RoundingRule::Up => {
                if self.is_negative() {
                    q
                } else {
                    away
                }
            }
            RoundingRule::Down => {
                if self.is_negative() {
                    away
                } else {
                    q
                }
            }
            RoundingRule::ToNearestOrAwayFromZero => match twice.cmp(&self.denominator) {
                Ordering::Less => q,
                _ => away,
            },
            RoundingRule::ToNearestOrEven => match twice.cmp(&self.denominator) {
                Ordering::Less => q,
                Ordering::Greater => away,
                Ordering::Equal => {
                    if q.magnitude().is_even() {
                        q
                    } else {
                        away
                    }
                }
            },
        };

        Fraction::from(res)
    }

    /// Round towards negative infinity.
    pub fn floor(&self) -> Fraction {
        self.rounded(RoundingRule::Down)
    }

    /// Round towards positive infinity.
    pub fn ceil(&self) -> Fraction {
        self.rounded(RoundingRule::Up)
    }

    /// Round towards zero.
    pub fn truncate(&self) -> Fraction {
        self.rounded(RoundingRule::TowardZero)
    }

    /// Compute the square root exactly, if the numerator and the denominator are
    /// perfect squares.
    pub fn sqrt_exact(&self) -> Option<Fraction> {
        if !self.is_finite() || self.is_negative() {
            return None;
        }

        if self.numerator.is_perfect_square() && self.denominator.is_perfect_square() {
            Some(Fraction::from_unchecked(
                self.numerator.isqrt(),
                self.denominator.isqrt(),
            ))
        } else {
            None
        }
    }

    /// Compute the square root, exactly if possible and otherwise through a
    /// double-precision approximation. The square root of a negative number is NaN.
    pub fn sqrt_with_precision(&self) -> (Fraction, Precision) {
        self.sqrt_with_settings(&ApproximationSettings::default())
    }

    pub fn sqrt_with_settings(&self, settings: &ApproximationSettings) -> (Fraction, Precision) {
        if self.is_nan() || self.is_negative() {
            return (Fraction::nan(), Precision::Exact);
        }
        if self.is_infinite() {
            return (Fraction::infinity(), Precision::Exact);
        }

        match self.sqrt_exact() {
            Some(r) => (r, Precision::Exact),
            None => (
                float::approximate_with_settings(self.to_f64().sqrt(), settings).0,
                Precision::Approximate,
            ),
        }
    }

    /// Compute the square root. See [Fraction::sqrt_with_precision].
    pub fn sqrt(&self) -> Fraction {
        self.sqrt_with_precision().0
    }

    fn bridge(&self, f: impl FnOnce(f64) -> f64) -> Fraction {
        float::approximate(f(self.to_f64())).0
    }

    pub fn sin(&self) -> Fraction {
        self.bridge(f64::sin)
    }

    pub fn cos(&self) -> Fraction {
        self.bridge(f64::cos)
    }

    pub fn tan(&self) -> Fraction {
        self.bridge(f64::tan)
    }

    pub fn asin(&self) -> Fraction {
        self.bridge(f64::asin)
    }

    pub fn acos(&self) -> Fraction {
        self.bridge(f64::acos)
    }

    pub fn atan(&self) -> Fraction {
        self.bridge(f64::atan)
    }

    /// The natural logarithm.
    pub fn ln(&self) -> Fraction {
        self.bridge(f64::ln)
    }

    pub fn log10(&self) -> Fraction {
        self.bridge(f64::log10)
    }

    pub fn exp(&self) -> Fraction {
        self.bridge(f64::exp)
    }

    /// Compute `self^e` for a fractional exponent through a double-precision bridge.
    /// Integer exponents are computed exactly.
    pub fn powf(&self, e: &Fraction) -> Fraction {
        if let Some(i) = e.to_integer().and_then(|i| i.to_i64()) {
            if let Ok(i) = i32::try_from(i) {
                return self.pow(i);
            }
        }

        let e = e.to_f64();
        self.bridge(|x| x.powf(e))
    }

    /// Return a best approximation of the fraction where the denominator
    /// is less than or equal to `max_denominator`, found with continued fractions.
    ///
    /// # Panics
    ///
    /// Panics if `max_denominator` is not positive.
    pub fn approximate_reduced(&self, max_denominator: &Integer) -> Fraction {
        assert!(
            max_denominator.is_positive(),
            "The maximal denominator must be positive"
        );

        if !self.is_finite() || &self.denominator <= max_denominator {
            return self.clone();
        }

        let (mut p0, mut q0, mut p1, mut q1) = (
            Integer::zero(),
            Integer::one(),
            Integer::one(),
            Integer::zero(),
        );

        let (mut n, mut d) = (self.numerator.abs(), self.denominator.clone());
        loop {
            let a = &n / &d;
            let q2 = &q0 + &(&a * &q1);
            if &q2 > max_denominator {
                break;
            }
            (p1, p0, q0, q1) = (p0 + &(&a * &p1), p1, q1, q2);
            (d, n) = (&n - &(&a * &d), d);
        }

        // the best approximation is either the last convergent or a semiconvergent
        let k = &(max_denominator - &q0) / &q1;
        let bound1 = Fraction::new(p0 + &(&k * &p1), &q0 + &(&k * &q1));
        let bound2 = Fraction::new(p1, q1);

        let target = self.abs();
        let res = if (&bound2 - &target).abs() <= (&bound1 - &target).abs() {
            bound2
        } else {
            bound1
        };

        if self.is_negative() {
            -res
        } else {
            res
        }
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Fraction::zero()
    }
}

impl FromStr for Fraction {
    type Err = &'static str;

    /// Parse `"3/4"`, `"1.25"`, `"-5"`, `"inf"`, `"-inf"` or `"nan"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "inf" | "+inf" => return Ok(Fraction::infinity()),
            "-inf" => return Ok(Fraction::neg_infinity()),
            "nan" => return Ok(Fraction::nan()),
            _ => {}
        }

        if let Some((num, den)) = s.split_once('/') {
            let num: Integer = num.parse().map_err(|_| "Could not parse numerator")?;
            let den: Integer = den.parse().map_err(|_| "Could not parse denominator")?;
            return Ok(Fraction::new(num, den));
        }

        if let Some((int, frac)) = s.split_once('.') {
            let negative = int.starts_with('-');
            let int = match int {
                "" | "-" | "+" => Integer::zero(),
                _ => int.parse().map_err(|_| "Could not parse integer part")?,
            };

            if frac.is_empty() || !frac.bytes().all(|c| c.is_ascii_digit()) {
                return Err("Could not parse decimal part");
            }
            let scale = Integer::from(Natural::one().mul_pow10(frac.len()));
            let frac: Integer = frac.parse().map_err(|_| "Could not parse decimal part")?;

            let num = if negative {
                &int * &scale - frac
            } else {
                &int * &scale + frac
            };
            return Ok(Fraction::new(num, scale));
        }

        Ok(Fraction::from(s.parse::<Integer>()?))
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_nan() {
            f.pad("nan")
        } else if self.is_infinite() {
            f.pad(if self.is_negative() { "-inf" } else { "inf" })
        } else if self.denominator.is_one() {
            f.pad(&self.numerator.to_string())
        } else {
            f.pad(&format!("{}/{}", self.numerator, self.denominator))
        }
    }
}

impl std::fmt::Debug for Fraction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl PartialOrd for Fraction {
    /// Order `-inf < finite < inf`. NaN is only comparable to itself.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.is_nan(), other.is_nan()) {
            (true, true) => return Some(Ordering::Equal),
            (true, false) | (false, true) => return None,
            _ => {}
        }

        if self.is_infinite() || other.is_infinite() {
            let rank = |x: &Fraction| {
                if x.is_infinite() {
                    x.signum()
                } else {
                    0
                }
            };
            return Some(rank(self).cmp(&rank(other)));
        }

        Some((&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator)))
    }
}

impl Neg for Fraction {
    type Output = Fraction;

    #[inline]
    fn neg(self) -> Fraction {
        Fraction::from_unchecked(-self.numerator, self.denominator)
    }
}

impl<'a> Neg for &'a Fraction {
    type Output = Fraction;

    #[inline]
    fn neg(self) -> Fraction {
        Fraction::from_unchecked(-&self.numerator, self.denominator.clone())
    }
}

forward_binop!(Fraction, Add, add, add_impl);
forward_binop!(Fraction, Sub, sub, sub_impl);
forward_binop!(Fraction, Mul, mul, mul_impl);
forward_binop!(Fraction, Div, div, div_impl);
forward_assign_op!(Fraction, AddAssign, add_assign, add_impl);
forward_assign_op!(Fraction, SubAssign, sub_assign, sub_impl);
forward_assign_op!(Fraction, MulAssign, mul_assign, mul_impl);
forward_assign_op!(Fraction, DivAssign, div_assign, div_impl);

impl std::iter::Sum for Fraction {
    fn sum<I: Iterator<Item = Fraction>>(iter: I) -> Fraction {
        iter.fold(Fraction::zero(), |acc, x| acc + x)
    }
}

impl<'a> std::iter::Sum<&'a Fraction> for Fraction {
    fn sum<I: Iterator<Item = &'a Fraction>>(iter: I) -> Fraction {
        iter.fold(Fraction::zero(), |acc, x| acc + x)
    }
}

impl std::iter::Product for Fraction {
    fn product<I: Iterator<Item = Fraction>>(iter: I) -> Fraction {
        iter.fold(Fraction::one(), |acc, x| acc * x)
    }
}

#[cfg(test)]
mod test {
    use std::ops::{Add, Div, Mul, Sub};

    use super::{Fraction, RoundingRule};
    use crate::domains::{float::Precision, integer::Integer};

    #[test]
    fn reduction() {
        assert_eq!(Fraction::from((2, 4)), Fraction::from((1, 2)));
        assert_eq!(Fraction::from((3, -6)), Fraction::from((-1, 2)));
        assert_eq!(Fraction::from((-4, -4)), Fraction::one());
        assert_eq!(Fraction::from((0, -7)), Fraction::zero());

        let f = Fraction::from((-12, 18));
        assert_eq!(f.numerator(), &Integer::new(-2));
        assert_eq!(f.denominator(), &Integer::new(3));
        assert_eq!(f.reduced(), f);
    }

    #[test]
    fn arithmetic() {
        let a = Fraction::from((1, 2));
        let b = Fraction::from((2, 3));

        macro_rules! try_variants {
            ($a: expr, $b: expr, $res: expr, $op: tt) => {
                assert_eq!($a.clone().$op(&$b), $res);
                assert_eq!($a.clone().$op($b.clone()), $res);
                assert_eq!((&$a).$op($b.clone()), $res);
                assert_eq!((&$a).$op(&$b), $res);
            };
        }

        try_variants!(a, b, Fraction::from((7, 6)), add);
        try_variants!(a, b, Fraction::from((-1, 6)), sub);
        try_variants!(a, b, Fraction::from((1, 3)), mul);
        try_variants!(a, b, Fraction::from((3, 4)), div);

        assert_eq!(Fraction::from((3, 4)).pow(-2), Fraction::from((16, 9)));
        assert_eq!(Fraction::from((-2, 3)).pow(3), Fraction::from((-8, 27)));
        assert_eq!(Fraction::zero().reciprocal(), Fraction::infinity());

        let s: Fraction = (1..=4).map(|i| Fraction::from((1, i))).sum();
        assert_eq!(s, Fraction::from((25, 12)));
        let p: Fraction = (1..=4).map(|i| Fraction::from((i, i + 1))).product();
        assert_eq!(p, Fraction::from((1, 5)));
    }

    #[test]
    fn sentinels() {
        let inf = Fraction::infinity();
        let ninf = Fraction::neg_infinity();
        let nan = Fraction::nan();
        let two = Fraction::from(2);

        assert_eq!(&inf + &inf, inf);
        assert!((&inf - &inf).is_nan());
        assert!((&inf + &ninf).is_nan());
        assert_eq!(&inf - &two, inf);
        assert_eq!(&two - &inf, ninf);
        assert!((&inf * &Fraction::zero()).is_nan());
        assert_eq!(&ninf * &Fraction::from(-3), inf);
        assert!((&inf / &inf).is_nan());
        assert_eq!(&ninf / &two, ninf);
        assert_eq!(&two / &inf, Fraction::zero());
        assert!((&nan + &two).is_nan());

        assert_eq!(&two / &Fraction::zero(), inf);
        assert_eq!(Fraction::from(-2) / Fraction::zero(), ninf);
        assert!((Fraction::zero() / Fraction::zero()).is_nan());

        assert_eq!(nan, Fraction::nan());
        assert_eq!(nan.partial_cmp(&two), None);
        assert!(ninf < two && two < inf && ninf < inf);
    }

    #[test]
    fn rounding() {
        let cases = [
            ((5, 2), [3, 2, 3, 2, 2, 3]),
            ((-5, 2), [-3, -2, -2, -3, -2, -3]),
            ((7, 3), [2, 2, 3, 2, 2, 3]),
            ((-7, 3), [-2, -2, -2, -3, -2, -3]),
            ((3, 2), [2, 2, 2, 1, 1, 2]),
        ];

        let rules = [
            RoundingRule::ToNearestOrAwayFromZero,
            RoundingRule::ToNearestOrEven,
            RoundingRule::Up,
            RoundingRule::Down,
            RoundingRule::TowardZero,
            RoundingRule::AwayFromZero,
        ];

        for (f, expected) in cases {
            let f = Fraction::from(f);
            for (rule, e) in rules.iter().zip(expected) {
                assert_eq!(f.rounded(*rule), e, "{} {:?}", f, rule);
            }
        }

        assert_eq!(Fraction::from((-7, 2)).floor(), -4);
        assert_eq!(Fraction::from((-7, 2)).ceil(), -3);
        assert_eq!(Fraction::infinity().floor(), Fraction::infinity());
    }

    #[test]
    fn square_roots() {
        assert_eq!(
            Fraction::from((9, 4)).sqrt_with_precision(),
            (Fraction::from((3, 2)), Precision::Exact)
        );
        assert_eq!(Fraction::from((2, 1)).sqrt_exact(), None);

        let (r, p) = Fraction::from(2).sqrt_with_precision();
        assert_eq!(p, Precision::Approximate);
        assert!((r.to_f64() - std::f64::consts::SQRT_2).abs() < 1e-12);

        assert!(Fraction::from(-1).sqrt().is_nan());
        assert_eq!(Fraction::zero().cos(), Fraction::one());
        assert_eq!(Fraction::from(100).log10(), 2);
        assert_eq!(Fraction::from(4).powf(&Fraction::from((1, 2))), 2);
    }

    #[test]
    fn approximate_reduced() {
        let pi = Fraction::from((314159265358979i64, 100000000000000i64));
        assert_eq!(
            pi.approximate_reduced(&Integer::new(1000)),
            Fraction::from((355, 113))
        );
        assert_eq!(
            (-&pi).approximate_reduced(&Integer::new(10)),
            Fraction::from((-22, 7))
        );
        assert_eq!(
            Fraction::from((1, 3)).approximate_reduced(&Integer::new(5)),
            Fraction::from((1, 3))
        );
    }

    #[test]
    fn parse_and_print() {
        for (s, f) in [
            ("3/4", Fraction::from((3, 4))),
            ("1.25", Fraction::from((5, 4))),
            ("-0.5", Fraction::from((-1, 2))),
            ("-5", Fraction::from(-5)),
            ("6/-8", Fraction::from((-3, 4))),
            ("inf", Fraction::infinity()),
            ("-inf", Fraction::neg_infinity()),
            ("nan", Fraction::nan()),
        ] {
            assert_eq!(s.parse::<Fraction>().unwrap(), f);
        }

        assert!("1/2/3".parse::<Fraction>().is_err());
        assert!("x".parse::<Fraction>().is_err());
        assert!("1.".parse::<Fraction>().is_err());

        assert_eq!(Fraction::from((-3, 4)).to_string(), "-3/4");
        assert_eq!(Fraction::from(7).to_string(), "7");
        assert_eq!(Fraction::neg_infinity().to_string(), "-inf");
        assert_eq!(Fraction::nan().to_string(), "nan");
        assert_eq!(format!("{:>5}", Fraction::from((1, 2))), "  1/2");
    }

    #[test]
    fn huge_to_f64() {
        let big = Integer::new(10).pow(400);
        let f = Fraction::new(&big * &Integer::new(3), &big * &Integer::new(4));
        assert_eq!(f, Fraction::from((3, 4)));

        let f = Fraction::from_unchecked(Integer::new(10).pow(350), Integer::new(3).pow(700));
        assert!(f.to_f64().is_finite());
    }
}
