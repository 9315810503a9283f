//! Arbitrary-precision natural numbers stored as decimal digits.

use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    str::FromStr,
};

use smallvec::{smallvec, SmallVec};
use tracing::debug;

use crate::utils::{forward_assign_op, forward_binop, gcd_unsigned};

/// Numbers with more digits than this spill to the heap.
const INLINE_DIGITS: usize = 24;

type Digits = SmallVec<[u8; INLINE_DIGITS]>;

/// An arbitrary-precision non-negative integer, stored as a sequence of decimal
/// digits with the least significant digit first.
///
/// The representation is always normalized: there are no most-significant zeros and
/// zero is stored as a single `0` digit, so structural equality is numeric equality.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Natural {
    digits: Digits,
}

impl Natural {
    #[inline]
    pub fn zero() -> Natural {
        Natural {
            digits: smallvec![0],
        }
    }

    #[inline]
    pub fn one() -> Natural {
        Natural {
            digits: smallvec![1],
        }
    }

    /// Create a natural number from decimal digits, least significant first.
    ///
    /// # Panics
    ///
    /// Panics if any of the digits is larger than 9.
    pub fn from_digits(digits: impl IntoIterator<Item = u8>) -> Natural {
        let mut n = Natural {
            digits: digits
                .into_iter()
                .inspect(|d| assert!(*d < 10, "Digit out of range: {}", d))
                .collect(),
        };
        n.normalize();
        n
    }

    /// The decimal digits, least significant first.
    #[inline]
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// The number of decimal digits. Zero has one digit.
    #[inline]
    pub fn num_digits(&self) -> usize {
        self.digits.len()
    }

    fn normalize(&mut self) {
        while self.digits.len() > 1 && self.digits.last() == Some(&0) {
            self.digits.pop();
        }
        if self.digits.is_empty() {
            self.digits.push(0);
        }
    }

    /// Get the digit at position `index`, counting from the least significant digit.
    /// Positions beyond the stored digits read as zero.
    #[inline]
    pub fn get_or_zero(&self, index: usize) -> u8 {
        self.digits.get(index).copied().unwrap_or(0)
    }

    /// Set the digit at position `index`, growing the buffer with zeros when
    /// the position lies beyond the most significant digit.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is larger than 9.
    pub fn set_with_growth(&mut self, index: usize, digit: u8) {
        assert!(digit < 10, "Digit out of range: {}", digit);

        if index >= self.digits.len() {
            self.digits.resize(index + 1, 0);
        }
        self.digits[index] = digit;
        self.normalize();
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.digits.len() == 1 && self.digits[0] == 0
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.digits.len() == 1 && self.digits[0] == 1
    }

    #[inline]
    pub fn is_even(&self) -> bool {
        self.digits[0] % 2 == 0
    }

    /// Convert to a native integer, if it fits.
    pub fn to_u128(&self) -> Option<u128> {
        if self.digits.len() > 39 {
            return None;
        }

        let mut r: u128 = 0;
        for d in self.digits.iter().rev() {
            r = r.checked_mul(10)?.checked_add(*d as u128)?;
        }
        Some(r)
    }

    /// Convert to a native integer, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.to_u128().and_then(|n| u64::try_from(n).ok())
    }

    /// Convert to the nearest double. Numbers beyond the range of `f64` become infinity.
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::INFINITY)
    }

    /// Multiply by `10^exp` by shifting in zero digits.
    pub fn mul_pow10(&self, exp: usize) -> Natural {
        if self.is_zero() || exp == 0 {
            return self.clone();
        }

        let mut digits = Digits::with_capacity(self.digits.len() + exp);
        digits.extend(std::iter::repeat(0).take(exp));
        digits.extend_from_slice(&self.digits);
        Natural { digits }
    }

    /// Compute `10 * self + digit` in place.
    fn push_low_digit(&mut self, digit: u8) {
        if self.is_zero() {
            self.digits[0] = digit;
        } else {
            self.digits.insert(0, digit);
        }
    }

    fn add_impl(&self, other: &Natural) -> Natural {
        let len = self.digits.len().max(other.digits.len());
        let mut digits = Digits::with_capacity(len + 1);

        let mut carry = 0;
        for i in 0..len {
            let s = self.get_or_zero(i) + other.get_or_zero(i) + carry;
            digits.push(s % 10);
            carry = s / 10;
        }
        if carry > 0 {
            digits.push(carry);
        }

        let mut r = Natural { digits };
        r.normalize();
        r
    }

    /// Subtract `other` from `self`, returning `None` if `other > self`.
    pub fn checked_sub(&self, other: &Natural) -> Option<Natural> {
        if self < other {
            return None;
        }

        let mut digits = Digits::with_capacity(self.digits.len());
        let mut borrow = 0;
        for (i, d) in self.digits.iter().enumerate() {
            let mut s = *d as i8 - other.get_or_zero(i) as i8 - borrow;
            if s < 0 {
                s += 10;
                borrow = 1;
            } else {
                borrow = 0;
            }
            digits.push(s as u8);
        }
        debug_assert_eq!(borrow, 0);

        let mut r = Natural { digits };
        r.normalize();
        Some(r)
    }

    fn sub_impl(&self, other: &Natural) -> Natural {
        self.checked_sub(other).unwrap_or_else(|| {
            panic!(
                "Cannot subtract {} from the smaller natural number {}",
                other, self
            )
        })
    }

    fn mul_impl(&self, other: &Natural) -> Natural {
        if self.is_zero() || other.is_zero() {
            return Natural::zero();
        }

        if let (Some(a), Some(b)) = (self.to_u64(), other.to_u64()) {
            return Natural::from(a as u128 * b as u128);
        }

        let mut acc = vec![0u32; self.digits.len() + other.digits.len()];
        for (i, a) in self.digits.iter().enumerate() {
            if *a == 0 {
                continue;
            }

            let mut carry = 0;
            for (j, b) in other.digits.iter().enumerate() {
                let t = acc[i + j] + *a as u32 * *b as u32 + carry;
                acc[i + j] = t % 10;
                carry = t / 10;
            }

            let mut k = i + other.digits.len();
            while carry > 0 {
                let t = acc[k] + carry;
                acc[k] = t % 10;
                carry = t / 10;
                k += 1;
            }
        }

        Natural::from_digits(acc.into_iter().map(|d| d as u8))
    }

    /// Compute the quotient and remainder of `self / div`.
    ///
    /// # Panics
    ///
    /// Panics if `div` is zero.
    pub fn quot_rem(&self, div: &Natural) -> (Natural, Natural) {
        if div.is_zero() {
            panic!("Division by zero");
        }

        if self < div {
            return (Natural::zero(), self.clone());
        }

        if let (Some(a), Some(b)) = (self.to_u128(), div.to_u128()) {
            return ((a / b).into(), (a % b).into());
        }

        let (mut q, mut r) = self.long_division(div);

        // the remainder must be smaller than the divisor and the
        // quotient must reconstruct the dividend
        while r >= *div {
            debug!("Adjusting quotient of {} / {}: remainder {} too large", self, div, r);
            r = &r - div;
            q = &q + &Natural::one();
        }

        if &(&q * div) + &r != *self {
            panic!(
                "Long division of {} by {} is inconsistent: quotient {}, remainder {}",
                self, div, q, r
            );
        }

        (q, r)
    }

    /// Classic long division: bring down one digit at a time and find each quotient
    /// digit by trial subtraction.
    fn long_division(&self, div: &Natural) -> (Natural, Natural) {
        let mut quotient: Digits = smallvec![0; self.digits.len()];
        let mut rem = Natural::zero();

        for i in (0..self.digits.len()).rev() {
            rem.push_low_digit(self.digits[i]);

            if rem < *div {
                continue;
            }

            let mut q = 0;
            if let (Some(r), Some(d)) = (rem.to_u128(), div.to_u128()) {
                q = (r / d) as u8;
                rem = (r % d).into();
            } else {
                while rem >= *div {
                    rem = &rem - div;
                    q += 1;
                }
            }
            quotient[i] = q;
        }

        let mut q = Natural { digits: quotient };
        q.normalize();
        (q, rem)
    }

    fn div_impl(&self, other: &Natural) -> Natural {
        self.quot_rem(other).0
    }

    fn rem_impl(&self, other: &Natural) -> Natural {
        self.quot_rem(other).1
    }

    /// Compute `self^e` by repeated squaring.
    pub fn pow(&self, mut e: u32) -> Natural {
        let mut base = self.clone();
        let mut res = Natural::one();
        while e > 0 {
            if e % 2 == 1 {
                res = &res * &base;
            }
            e /= 2;
            if e > 0 {
                base = &base * &base;
            }
        }
        res
    }

    /// Compute the integer square root `floor(sqrt(self))` using Newton's method.
    pub fn isqrt(&self) -> Natural {
        if self.is_zero() {
            return Natural::zero();
        }

        // 10^ceil(len/2) is larger than the square root
        let two = Natural::from(2u8);
        let mut x = Natural::one().mul_pow10((self.digits.len() + 1) / 2);
        loop {
            let y = &(&x + &(self / &x)) / &two;
            if y >= x {
                return x;
            }
            x = y;
        }
    }

    /// Compute the greatest common divisor using Euclid's algorithm.
    pub fn gcd(&self, other: &Natural) -> Natural {
        if let (Some(a), Some(b)) = (self.to_u128(), other.to_u128()) {
            return gcd_unsigned(a, b).into();
        }

        let (mut a, mut b) = (self.clone(), other.clone());
        while !b.is_zero() {
            let r = &a % &b;
            a = b;
            b = r;
        }
        a
    }
}

impl Default for Natural {
    fn default() -> Self {
        Natural::zero()
    }
}

impl From<u128> for Natural {
    fn from(mut n: u128) -> Natural {
        let mut digits = Digits::new();
        loop {
            digits.push((n % 10) as u8);
            n /= 10;
            if n == 0 {
                break;
            }
        }
        Natural { digits }
    }
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Natural {
                #[inline]
                fn from(n: $t) -> Natural {
                    Natural::from(n as u128)
                }
            }
        )*
    };
}

from_unsigned!(u8, u16, u32, u64, usize);

impl FromStr for Natural {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix('+').unwrap_or(s);
        if s.is_empty() {
            return Err("Empty string is not a number");
        }

        let mut digits = Digits::with_capacity(s.len());
        for c in s.bytes().rev() {
            if !c.is_ascii_digit() {
                return Err("Could not parse natural number");
            }
            digits.push(c - b'0');
        }

        let mut n = Natural { digits };
        n.normalize();
        Ok(n)
    }
}

impl Display for Natural {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s: String = self
            .digits
            .iter()
            .rev()
            .map(|d| (b'0' + d) as char)
            .collect();
        f.pad_integral(true, "", &s)
    }
}

impl std::fmt::Debug for Natural {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl PartialOrd for Natural {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Natural {
    fn cmp(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.iter().rev().cmp(other.digits.iter().rev()))
    }
}

forward_binop!(Natural, Add, add, add_impl);
forward_binop!(Natural, Sub, sub, sub_impl);
forward_binop!(Natural, Mul, mul, mul_impl);
forward_binop!(Natural, Div, div, div_impl);
forward_binop!(Natural, Rem, rem, rem_impl);
forward_assign_op!(Natural, AddAssign, add_assign, add_impl);
forward_assign_op!(Natural, SubAssign, sub_assign, sub_impl);
forward_assign_op!(Natural, MulAssign, mul_assign, mul_impl);
