use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    ops::Neg,
    str::FromStr,
};

use crate::utils::{forward_assign_op, forward_binop};

use super::natural::Natural;

/// An arbitrary-precision signed integer: a [Natural] magnitude and a sign.
///
/// Zero is always stored with `positive == false`, so that every integer has a
/// unique representation. Zero prints without a sign.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Integer {
    magnitude: Natural,
    positive: bool,
}

macro_rules! from_with_cast {
    ($base: ty) => {
        impl From<$base> for Integer {
            #[inline]
            fn from(value: $base) -> Self {
                Integer::from(value as i128)
            }
        }

        impl PartialEq<$base> for Integer {
            #[inline]
            fn eq(&self, other: &$base) -> bool {
                *self == Integer::from(*other)
            }
        }

        impl PartialEq<Integer> for $base {
            #[inline]
            fn eq(&self, other: &Integer) -> bool {
                other == self
            }
        }

        impl PartialOrd<$base> for Integer {
            #[inline]
            fn partial_cmp(&self, other: &$base) -> Option<Ordering> {
                Some(self.cmp(&Integer::from(*other)))
            }
        }

        impl PartialOrd<Integer> for $base {
            #[inline]
            fn partial_cmp(&self, other: &Integer) -> Option<Ordering> {
                other.partial_cmp(self).map(|x| x.reverse())
            }
        }
    };
}

from_with_cast!(i8);
from_with_cast!(i16);
from_with_cast!(i32);
from_with_cast!(i64);
from_with_cast!(isize);
from_with_cast!(u8);
from_with_cast!(u16);
from_with_cast!(u32);
from_with_cast!(u64);
from_with_cast!(usize);

impl From<i128> for Integer {
    #[inline]
    fn from(value: i128) -> Self {
        Integer::from_parts(value.unsigned_abs().into(), value > 0)
    }
}

impl From<u128> for Integer {
    #[inline]
    fn from(value: u128) -> Self {
        Integer::from_parts(value.into(), true)
    }
}

impl From<Natural> for Integer {
    #[inline]
    fn from(value: Natural) -> Self {
        Integer::from_parts(value, true)
    }
}

impl FromStr for Integer {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (positive, digits) = match s.strip_prefix('-') {
            Some(rest) => (false, rest),
            None => (true, s.strip_prefix('+').unwrap_or(s)),
        };

        if digits.starts_with(['+', '-']) {
            return Err("Could not parse integer");
        }

        let magnitude: Natural = digits.parse().map_err(|_| "Could not parse integer")?;
        Ok(Integer::from_parts(magnitude, positive))
    }
}

impl Integer {
    #[inline]
    pub fn new(num: i64) -> Integer {
        Integer::from(num)
    }

    /// Create an integer from its magnitude and sign. A zero magnitude
    /// is always stored as non-positive.
    #[inline]
    pub fn from_parts(magnitude: Natural, positive: bool) -> Integer {
        let positive = positive && !magnitude.is_zero();
        Integer {
            magnitude,
            positive,
        }
    }

    #[inline]
    pub fn zero() -> Integer {
        Integer {
            magnitude: Natural::zero(),
            positive: false,
        }
    }

    #[inline]
    pub fn one() -> Integer {
        Integer {
            magnitude: Natural::one(),
            positive: true,
        }
    }

    #[inline]
    pub fn magnitude(&self) -> &Natural {
        &self.magnitude
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.positive && self.magnitude.is_one()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.positive
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        !self.positive && !self.magnitude.is_zero()
    }

    /// Return `-1`, `0` or `1`.
    #[inline]
    pub fn signum(&self) -> i32 {
        if self.positive {
            1
        } else if self.is_zero() {
            0
        } else {
            -1
        }
    }

    pub fn abs(&self) -> Integer {
        Integer::from_parts(self.magnitude.clone(), true)
    }

    /// Convert to a native integer, if it fits.
    pub fn to_i128(&self) -> Option<i128> {
        let m = self.magnitude.to_u128()?;
        if self.is_negative() {
            if m <= i128::MAX as u128 + 1 {
                Some((m as i128).wrapping_neg())
            } else {
                None
            }
        } else {
            i128::try_from(m).ok()
        }
    }

    /// Convert to a native integer, if it fits.
    pub fn to_i64(&self) -> Option<i64> {
        self.to_i128().and_then(|n| i64::try_from(n).ok())
    }

    pub fn to_f64(&self) -> f64 {
        let m = self.magnitude.to_f64();
        if self.is_negative() {
            -m
        } else {
            m
        }
    }

    fn add_impl(&self, other: &Integer) -> Integer {
        match (self.is_negative(), other.is_negative()) {
            (false, false) | (true, true) => Integer::from_parts(
                &self.magnitude + &other.magnitude,
                !self.is_negative(),
            ),
            _ => {
                // the sign follows the operand with the larger magnitude
                match self.magnitude.cmp(&other.magnitude) {
                    Ordering::Equal => Integer::zero(),
                    Ordering::Greater => Integer::from_parts(
                        &self.magnitude - &other.magnitude,
                        !self.is_negative(),
                    ),
                    Ordering::Less => Integer::from_parts(
                        &other.magnitude - &self.magnitude,
                        !other.is_negative(),
                    ),
                }
            }
        }
    }

    fn sub_impl(&self, other: &Integer) -> Integer {
        self.add_impl(&-other)
    }

    fn mul_impl(&self, other: &Integer) -> Integer {
        Integer::from_parts(
            &self.magnitude * &other.magnitude,
            self.is_negative() == other.is_negative(),
        )
    }

    /// Compute the quotient and remainder of the division of `self` by `div`,
    /// rounding the quotient towards zero. The remainder has the sign of `self`,
    /// such that `q * div + r == self`.
    ///
    /// # Panics
    ///
    /// Panics if `div` is zero.
    pub fn quot_rem(&self, div: &Integer) -> (Integer, Integer) {
        if div.is_zero() {
            panic!("Division by zero");
        }

        let (q, r) = self.magnitude.quot_rem(&div.magnitude);
        (
            Integer::from_parts(q, self.is_negative() == div.is_negative()),
            Integer::from_parts(r, !self.is_negative()),
        )
    }

    fn div_impl(&self, other: &Integer) -> Integer {
        self.quot_rem(other).0
    }

    fn rem_impl(&self, other: &Integer) -> Integer {
        self.quot_rem(other).1
    }

    /// Compute `self^e`.
    pub fn pow(&self, e: u32) -> Integer {
        Integer::from_parts(self.magnitude.pow(e), !self.is_negative() || e % 2 == 0)
    }

    /// Compute the non-negative greatest common divisor.
    pub fn gcd(&self, other: &Integer) -> Integer {
        Integer::from_parts(self.magnitude.gcd(&other.magnitude), true)
    }

    /// Compute the non-negative least common multiple.
    pub fn lcm(&self, other: &Integer) -> Integer {
        if self.is_zero() || other.is_zero() {
            return Integer::zero();
        }

        let g = self.gcd(other);
        (&(self / &g) * other).abs()
    }

    /// Compute `floor(sqrt(self))`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is negative.
    pub fn isqrt(&self) -> Integer {
        if self.is_negative() {
            panic!("Cannot take the square root of negative integer {}", self);
        }

        Integer::from_parts(self.magnitude.isqrt(), true)
    }

    pub fn is_perfect_square(&self) -> bool {
        if self.is_negative() {
            return false;
        }

        let r = self.magnitude.isqrt();
        &r * &r == self.magnitude
    }

    /// Return all positive divisors of `|self|` in ascending order.
    /// Zero has no divisors in this sense and yields an empty list.
    pub fn factors(&self) -> Vec<Integer> {
        if self.is_zero() {
            return vec![];
        }

        let mut small = vec![];
        let mut large = vec![];

        if let Some(n) = self.magnitude.to_u64() {
            let mut i = 1u64;
            while i <= n / i {
                if n % i == 0 {
                    small.push(Integer::from(i));
                    if i != n / i {
                        large.push(Integer::from(n / i));
                    }
                }
                i += 1;
            }
        } else {
            let n = self.abs();
            let bound = n.isqrt();
            let one = Integer::one();
            let mut i = Integer::one();
            while i <= bound {
                let (q, r) = n.quot_rem(&i);
                if r.is_zero() {
                    if q != i {
                        large.push(q);
                    }
                    small.push(i.clone());
                }
                i += &one;
            }
        }

        large.reverse();
        small.extend(large);
        small
    }

    /// Compute `self!`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is negative.
    pub fn factorial(&self) -> Integer {
        if self.is_negative() {
            panic!("Cannot take the factorial of negative integer {}", self);
        }

        let one = Integer::one();
        let mut res = Integer::one();
        let mut counter = self.clone();
        while counter > one {
            res = &res * &counter;
            counter = &counter - &one;
        }
        res
    }
}

impl Default for Integer {
    fn default() -> Self {
        Integer::zero()
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad_integral(!self.is_negative(), "", &self.magnitude.to_string())
    }
}

impl std::fmt::Debug for Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (false, false) => self.magnitude.cmp(&other.magnitude),
            (true, true) => other.magnitude.cmp(&self.magnitude),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl Neg for Integer {
    type Output = Integer;

    #[inline]
    fn neg(self) -> Integer {
        let positive = !self.positive;
        Integer::from_parts(self.magnitude, positive)
    }
}

impl<'a> Neg for &'a Integer {
    type Output = Integer;

    #[inline]
    fn neg(self) -> Integer {
        Integer::from_parts(self.magnitude.clone(), !self.positive)
    }
}

forward_binop!(Integer, Add, add, add_impl);
forward_binop!(Integer, Sub, sub, sub_impl);
forward_binop!(Integer, Mul, mul, mul_impl);
forward_binop!(Integer, Div, div, div_impl);
forward_binop!(Integer, Rem, rem, rem_impl);
forward_assign_op!(Integer, AddAssign, add_assign, add_impl);
forward_assign_op!(Integer, SubAssign, sub_assign, sub_impl);
forward_assign_op!(Integer, MulAssign, mul_assign, mul_impl);
forward_assign_op!(Integer, DivAssign, div_assign, div_impl);

impl std::iter::Sum for Integer {
    fn sum<I: Iterator<Item = Integer>>(iter: I) -> Integer {
        iter.fold(Integer::zero(), |acc, x| acc + x)
    }
}

impl std::iter::Product for Integer {
    fn product<I: Iterator<Item = Integer>>(iter: I) -> Integer {
        iter.fold(Integer::one(), |acc, x| acc * x)
    }
}

#[cfg(test)]
mod test {
    use std::ops::{Add, Div, Mul, Rem, Sub};

    use super::Integer;

    fn oracle(n: &Integer) -> rug::Integer {
        n.to_string().parse().unwrap()
    }

    #[test]
    fn binary_ops() {
        let a = Integer::from(5);
        let b: Integer = 7.into();

        assert_eq!(a < 5, false);
        assert_eq!(5 < a, false);
        assert_eq!(a > Integer::from(-891273892173892178922i128), true);

        macro_rules! try_variants {
            ($a: expr, $b: expr, $res: expr, $op: tt) => {
                assert_eq!($a.clone().$op(&$b), $res);
                assert_eq!($a.clone().$op($b.clone()), $res);
                assert_eq!((&$a).$op($b.clone()), $res);
                assert_eq!((&$a).$op(&$b), $res);
            };
        }

        try_variants!(a, b, 12, add);
        try_variants!(a, b, -2, sub);
        try_variants!(a, b, 35, mul);
        try_variants!(a, b, 0, div);
        try_variants!(a, b, 5, rem);

        let a = Integer::from(5123123132i64).pow(5);
        let b = Integer::from(-312223132i64).pow(5);

        for (res, expected) in [
            (&a + &b, oracle(&a) + oracle(&b)),
            (&a - &b, oracle(&a) - oracle(&b)),
            (&a * &b, oracle(&a) * oracle(&b)),
            (&a / &b, oracle(&a) / oracle(&b)),
            (&a % &b, oracle(&a) % oracle(&b)),
        ] {
            assert_eq!(res.to_string(), expected.to_string());
        }

        assert_eq!(&a / &b, -1189456);
    }

    #[test]
    fn signs() {
        assert_eq!(Integer::from(123) + Integer::from(877), Integer::from(1000));
        assert_eq!(Integer::from(-3) + Integer::from(10), 7);
        assert_eq!(Integer::from(3) + Integer::from(-10), -7);
        assert_eq!(Integer::from(-3) - Integer::from(-3), 0);
        assert_eq!(Integer::from(-7) / Integer::from(2), -3);
        assert_eq!(Integer::from(-7) % Integer::from(2), -1);
        assert_eq!(Integer::from(7) % Integer::from(-2), 1);

        let z = Integer::from(-5) + Integer::from(5);
        assert!(!z.is_positive());
        assert!(!z.is_negative());
        assert_eq!(z, Integer::zero());
        assert_eq!(z.to_string(), "0");
        assert_eq!((-Integer::zero()).to_string(), "0");
        assert_eq!(format!("{:+}", Integer::from(4)), "+4");
    }

    #[test]
    #[should_panic(expected = "Division by zero")]
    fn division_by_zero() {
        let _ = Integer::from(4) / Integer::zero();
    }

    #[test]
    fn parse() {
        assert_eq!("-5".parse::<Integer>().unwrap(), -5);
        assert_eq!("+12".parse::<Integer>().unwrap(), 12);
        assert_eq!("-0".parse::<Integer>().unwrap(), Integer::zero());
        assert!("--5".parse::<Integer>().is_err());
        assert!("1.5".parse::<Integer>().is_err());
        assert_eq!(
            "-123456789012345678901234567890"
                .parse::<Integer>()
                .unwrap()
                .to_string(),
            "-123456789012345678901234567890"
        );
    }

    #[test]
    fn number_theory() {
        assert_eq!(Integer::from(-12).gcd(&Integer::from(18)), 6);
        assert_eq!(Integer::from(4).lcm(&Integer::from(-6)), 12);
        assert_eq!(Integer::from(-2).pow(3), -8);
        assert_eq!(Integer::from(-2).pow(4), 16);
        assert_eq!(Integer::from(20).factorial().to_string(), "2432902008176640000");
        assert_eq!(Integer::zero().factorial(), 1);
        assert!(Integer::from(144).is_perfect_square());
        assert!(!Integer::from(145).is_perfect_square());
        assert!(!Integer::from(-4).is_perfect_square());

        let f: Vec<i64> = Integer::from(-36)
            .factors()
            .iter()
            .map(|x| x.to_i64().unwrap())
            .collect();
        assert_eq!(f, vec![1, 2, 3, 4, 6, 9, 12, 18, 36]);
        assert!(Integer::zero().factors().is_empty());

        let big = Integer::from(u64::MAX) * Integer::from(3);
        let f = big.factors();
        assert_eq!(f.first().unwrap(), &Integer::one());
        assert_eq!(f.last().unwrap(), &big);
        assert!(f.iter().all(|d| (&big % d).is_zero()));
    }

    #[test]
    fn conversions() {
        assert_eq!(Integer::from(i64::MIN).to_i64(), Some(i64::MIN));
        assert_eq!(Integer::from(i128::MIN).to_i128(), Some(i128::MIN));
        assert_eq!((Integer::from(i64::MAX) + Integer::one()).to_i64(), None);
        assert_eq!(Integer::from(-25).to_f64(), -25.0);
    }
}
