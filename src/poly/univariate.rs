use std::{
    fmt::Display,
    ops::{Div, Neg, Rem},
};

use crate::{
    domains::rational::Fraction,
    printer::PolynomialPrinter,
    utils::{forward_assign_op, forward_binop},
};

/// A univariate polynomial with fraction coefficients.
///
/// The coefficients are stored from the highest degree to the constant term,
/// and there is always at least one coefficient. The leading coefficients may be
/// zero; [Polynomial::simplified] removes them. Every arithmetic operation
/// returns a simplified polynomial.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Polynomial {
    coefficients: Vec<Fraction>,
}

impl Polynomial {
    /// Create a polynomial from its coefficients, highest degree first.
    pub fn new(coefficients: Vec<Fraction>) -> Polynomial {
        if coefficients.is_empty() {
            return Polynomial::zero();
        }
        Polynomial { coefficients }
    }

    /// Create a polynomial from its coefficients, highest degree first.
    pub fn from_coefficients<T: Into<Fraction>>(coefficients: Vec<T>) -> Polynomial {
        Polynomial::new(coefficients.into_iter().map(|c| c.into()).collect())
    }

    #[inline]
    pub fn zero() -> Polynomial {
        Polynomial {
            coefficients: vec![Fraction::zero()],
        }
    }

    #[inline]
    pub fn one() -> Polynomial {
        Polynomial {
            coefficients: vec![Fraction::one()],
        }
    }

    pub fn constant(c: Fraction) -> Polynomial {
        Polynomial {
            coefficients: vec![c],
        }
    }

    /// Create `c * x^power`.
    pub fn monomial(c: Fraction, power: usize) -> Polynomial {
        let mut coefficients = vec![Fraction::zero(); power + 1];
        coefficients[0] = c;
        Polynomial::new(coefficients).simplified()
    }

    /// Create `x - root`.
    pub fn linear_factor(root: &Fraction) -> Polynomial {
        Polynomial {
            coefficients: vec![Fraction::one(), -root],
        }
    }

    /// Remove the leading zero coefficients.
    pub fn simplified(&self) -> Polynomial {
        match self.coefficients.iter().position(|c| !c.is_zero()) {
            Some(0) => self.clone(),
            Some(i) => Polynomial {
                coefficients: self.coefficients[i..].to_vec(),
            },
            None => Polynomial::zero(),
        }
    }

    /// The coefficients, highest degree first.
    #[inline]
    pub fn coefficients(&self) -> &[Fraction] {
        &self.coefficients
    }

    /// The degree, ignoring leading zero coefficients. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        let lead = self
            .coefficients
            .iter()
            .position(|c| !c.is_zero())
            .unwrap_or(self.coefficients.len() - 1);
        self.coefficients.len() - 1 - lead
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.iter().all(|c| c.is_zero())
    }

    pub fn is_one(&self) -> bool {
        self.degree() == 0 && self.constant_term().is_one()
    }

    pub fn is_constant(&self) -> bool {
        self.degree() == 0
    }

    /// The coefficient of `x^power`.
    pub fn coefficient(&self, power: usize) -> Fraction {
        if power >= self.coefficients.len() {
            return Fraction::zero();
        }
        self.coefficients[self.coefficients.len() - 1 - power].clone()
    }

    /// The first non-zero coefficient, or zero for the zero polynomial.
    pub fn leading_coefficient(&self) -> Fraction {
        self.coefficients
            .iter()
            .find(|c| !c.is_zero())
            .cloned()
            .unwrap_or_else(Fraction::zero)
    }

    pub fn constant_term(&self) -> Fraction {
        self.coefficient(0)
    }

    /// Evaluate the polynomial at `x` using Horner's scheme.
    pub fn evaluate(&self, x: &Fraction) -> Fraction {
        let mut res = Fraction::zero();
        for c in &self.coefficients {
            res = &(&res * x) + c;
        }
        res
    }

    /// Compute `self(x + s)`.
    pub fn shifted(&self, s: &Fraction) -> Polynomial {
        let x_plus_s = Polynomial::linear_factor(&-s);
        let mut res = Polynomial::zero();
        for c in &self.coefficients {
            res = &(&res * &x_plus_s) + &Polynomial::constant(c.clone());
        }
        res.simplified()
    }

    /// Evaluate the polynomial at a double-precision `x`.
    pub fn evaluate_f64(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .fold(0., |acc, c| acc * x + c.to_f64())
    }

    /// Create a polynomial from coefficients stored lowest degree first.
    fn from_ascending(mut coefficients: Vec<Fraction>) -> Polynomial {
        coefficients.reverse();
        Polynomial::new(coefficients).simplified()
    }

    /// The coefficients, lowest degree first, without leading zeros.
    fn ascending(&self) -> Vec<Fraction> {
        let mut c = self.simplified().coefficients;
        c.reverse();
        c
    }

    fn add_impl(&self, other: &Polynomial) -> Polynomial {
        let (a, b) = (self.ascending(), other.ascending());
        let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

        let mut res = long;
        for (r, s) in res.iter_mut().zip(&short) {
            *r += s;
        }
        Polynomial::from_ascending(res)
    }

    fn sub_impl(&self, other: &Polynomial) -> Polynomial {
        self.add_impl(&-other)
    }

    fn mul_impl(&self, other: &Polynomial) -> Polynomial {
        if self.is_zero() || other.is_zero() {
            return Polynomial::zero();
        }

        let (a, b) = (self.ascending(), other.ascending());
        let mut res = vec![Fraction::zero(); a.len() + b.len() - 1];
        for (i, x) in a.iter().enumerate() {
            if x.is_zero() {
                continue;
            }
            for (j, y) in b.iter().enumerate() {
                res[i + j] += x * y;
            }
        }
        Polynomial::from_ascending(res)
    }

    /// Multiply every coefficient by `c`.
    pub fn mul_scalar(&self, c: &Fraction) -> Polynomial {
        Polynomial::new(self.coefficients.iter().map(|x| x * c).collect()).simplified()
    }

    /// Multiply by `x^e`.
    pub fn mul_exp(&self, e: usize) -> Polynomial {
        if self.is_zero() {
            return Polynomial::zero();
        }

        let mut coefficients = self.simplified().coefficients;
        coefficients.extend(std::iter::repeat(Fraction::zero()).take(e));
        Polynomial { coefficients }
    }

    /// Compute `self^e`.
    pub fn pow(&self, mut e: u32) -> Polynomial {
        let mut res = Polynomial::one();
        let mut base = self.simplified();
        while e > 0 {
            if e % 2 == 1 {
                res = &res * &base;
            }
            base = &base * &base;
            e /= 2;
        }
        res
    }

    /// Divide `self` by `div`, returning the quotient and remainder.
    ///
    /// # Panics
    ///
    /// Panics if `div` is the zero polynomial.
    pub fn quot_rem(&self, div: &Polynomial) -> (Polynomial, Polynomial) {
        if div.is_zero() {
            panic!("Cannot divide by the zero polynomial");
        }

        let mut r = self.ascending();
        let d = div.ascending();
        let m = d.len() - 1;

        if self.is_zero() || r.len() < d.len() {
            return (Polynomial::zero(), self.simplified());
        }

        let inv_lead = d[m].reciprocal();
        let mut q = vec![Fraction::zero(); r.len() - m];

        // repeatedly cancel the leading term of the remainder
        for n in (m..r.len()).rev() {
            if r[n].is_zero() {
                continue;
            }

            let qq = &r[n] * &inv_lead;
            for (k, dk) in d.iter().enumerate() {
                if !dk.is_zero() {
                    r[n - m + k] -= &qq * dk;
                }
            }
            q[n - m] = qq;
        }

        r.truncate(m.max(1));
        (Polynomial::from_ascending(q), Polynomial::from_ascending(r))
    }

    /// Return the quotient of the division by `div` if the remainder is zero.
    pub fn divides(&self, div: &Polynomial) -> Option<Polynomial> {
        let (q, r) = self.quot_rem(div);
        if r.is_zero() {
            Some(q)
        } else {
            None
        }
    }

    fn div_impl(&self, other: &Polynomial) -> Polynomial {
        self.divides(other)
            .unwrap_or_else(|| panic!("No clean division of {} by {}", self, other))
    }

    fn rem_impl(&self, other: &Polynomial) -> Polynomial {
        self.quot_rem(other).1
    }

    /// Divide by the leading coefficient.
    pub fn make_monic(&self) -> Polynomial {
        let lead = self.leading_coefficient();
        if lead.is_zero() || lead.is_one() {
            return self.simplified();
        }
        self.mul_scalar(&lead.reciprocal())
    }

    /// Compute the monic greatest common divisor with Euclid's algorithm.
    /// The gcd of two zero polynomials is zero.
    pub fn gcd(&self, other: &Polynomial) -> Polynomial {
        if self.is_zero() {
            return other.make_monic();
        }
        if other.is_zero() {
            return self.make_monic();
        }

        let (mut c, mut d) = if self.degree() < other.degree() {
            (other.simplified(), self.simplified())
        } else {
            (self.simplified(), other.simplified())
        };

        let mut r = c.quot_rem(&d).1;
        while !r.is_zero() {
            c = d;
            d = r;
            r = c.quot_rem(&d).1;
        }

        d.make_monic()
    }

    /// Compute the monic least common multiple.
    pub fn lcm(&self, other: &Polynomial) -> Polynomial {
        if self.is_zero() || other.is_zero() {
            return Polynomial::zero();
        }

        let g = self.gcd(other);
        (&(self / &g) * other).make_monic()
    }

    pub fn derivative(&self) -> Polynomial {
        let c = self.ascending();
        if c.len() < 2 {
            return Polynomial::zero();
        }

        Polynomial::from_ascending(
            c.iter()
                .enumerate()
                .skip(1)
                .map(|(i, x)| x * &Fraction::from(i))
                .collect(),
        )
    }

    /// Compute the `n`th derivative.
    pub fn nth_derivative(&self, n: usize) -> Polynomial {
        let mut res = self.simplified();
        for _ in 0..n {
            if res.is_zero() {
                break;
            }
            res = res.derivative();
        }
        res
    }

    /// Compute the antiderivative with a zero constant term.
    pub fn integral(&self) -> Polynomial {
        if self.is_zero() {
            return Polynomial::zero();
        }

        let mut c: Vec<Fraction> = self
            .ascending()
            .iter()
            .enumerate()
            .map(|(i, x)| x / &Fraction::from(i + 1))
            .collect();
        c.insert(0, Fraction::zero());
        Polynomial::from_ascending(c)
    }

    /// Compute the integral from `a` to `b`.
    pub fn definite_integral(&self, a: &Fraction, b: &Fraction) -> Fraction {
        let i = self.integral();
        i.evaluate(b) - i.evaluate(a)
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Polynomial::zero()
    }
}

impl Display for Polynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        PolynomialPrinter::new(self).fmt(f)
    }
}

forward_binop!(Polynomial, Add, add, add_impl);
forward_binop!(Polynomial, Sub, sub, sub_impl);
forward_binop!(Polynomial, Mul, mul, mul_impl);
forward_assign_op!(Polynomial, AddAssign, add_assign, add_impl);
forward_assign_op!(Polynomial, SubAssign, sub_assign, sub_impl);
forward_assign_op!(Polynomial, MulAssign, mul_assign, mul_impl);

impl<'a, 'b> Div<&'b Polynomial> for &'a Polynomial {
    type Output = Polynomial;

    /// Divide exactly.
    ///
    /// # Panics
    ///
    /// Panics if the division leaves a remainder.
    fn div(self, other: &'b Polynomial) -> Polynomial {
        self.div_impl(other)
    }
}

impl Div<Polynomial> for Polynomial {
    type Output = Polynomial;

    fn div(self, other: Polynomial) -> Polynomial {
        self.div_impl(&other)
    }
}

impl<'a, 'b> Rem<&'b Polynomial> for &'a Polynomial {
    type Output = Polynomial;

    fn rem(self, other: &'b Polynomial) -> Polynomial {
        self.rem_impl(other)
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        Polynomial {
            coefficients: self.coefficients.iter().map(|c| -c).collect(),
        }
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        Polynomial {
            coefficients: self.coefficients.iter().map(|c| -c).collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Polynomial;
    use crate::domains::rational::Fraction;

    fn p(c: Vec<i64>) -> Polynomial {
        Polynomial::from_coefficients(c)
    }

    #[test]
    fn basics() {
        let a = Polynomial::from_coefficients(vec![0, 0, 1, 2, 1]);
        assert_eq!(a.degree(), 2);
        assert_eq!(a.coefficients().len(), 5);
        assert_eq!(a.simplified(), p(vec![1, 2, 1]));
        assert_eq!(a.leading_coefficient(), 1);
        assert_eq!(a.coefficient(1), 2);
        assert_eq!(a.coefficient(7), 0);
        assert_eq!(a.evaluate(&Fraction::from(-1)), 0);
        assert_eq!(a.evaluate_f64(2.), 9.);

        assert!(Polynomial::from_coefficients(Vec::<i64>::new()).is_zero());
        assert_eq!(Polynomial::zero().degree(), 0);
        assert!(p(vec![5]).is_constant());
        assert_eq!(Polynomial::monomial(Fraction::from(3), 2), p(vec![3, 0, 0]));
        assert_eq!(
            Polynomial::linear_factor(&Fraction::from(2)),
            p(vec![1, -2])
        );
    }

    #[test]
    fn arithmetic() {
        let a = p(vec![1, 2, 1]);
        let b = p(vec![1, -1]);

        assert_eq!(&a + &b, p(vec![1, 3, 0]));
        assert_eq!(&a - &a, Polynomial::zero());
        assert_eq!(&a * &b, p(vec![1, 1, -1, -1]));
        assert_eq!(-b.clone(), p(vec![-1, 1]));
        assert_eq!(b.pow(3), p(vec![1, -3, 3, -1]));
        assert_eq!(a.mul_scalar(&Fraction::from((1, 2))), Polynomial::from_coefficients(vec![
            Fraction::from((1, 2)),
            Fraction::one(),
            Fraction::from((1, 2))
        ]));
    }

    #[test]
    fn division() {
        let a = p(vec![1, 0, 0, -1]);
        let b = p(vec![1, -1]);

        assert_eq!(&a / &b, p(vec![1, 1, 1]));
        assert_eq!(&(&a / &b) * &b, a);

        let (q, r) = p(vec![2, 3, 4]).quot_rem(&p(vec![2, 1]));
        assert_eq!(q, p(vec![1, 1]));
        assert_eq!(r, p(vec![3]));
        assert_eq!(&p(vec![2, 3, 4]) % &p(vec![2, 1]), p(vec![3]));

        assert_eq!(p(vec![1, 2]).quot_rem(&p(vec![1, 0, 0])), (Polynomial::zero(), p(vec![1, 2])));
        assert!(p(vec![1, 0, 1]).divides(&b).is_none());
    }

    #[test]
    #[should_panic(expected = "No clean division")]
    fn unclean_division() {
        let _ = &p(vec![1, 0, 1]) / &p(vec![1, -1]);
    }

    #[test]
    #[should_panic(expected = "zero polynomial")]
    fn division_by_zero() {
        p(vec![1, 0, 1]).quot_rem(&Polynomial::zero());
    }

    #[test]
    fn gcd() {
        let a = p(vec![2, 0, -2]);
        let b = p(vec![3, 6, 3]);
        assert_eq!(a.gcd(&b), p(vec![1, 1]));
        assert_eq!(a.lcm(&b), p(vec![1, 1, -1, -1]));
        assert_eq!(a.gcd(&Polynomial::zero()), p(vec![1, 0, -1]));
        assert!(p(vec![1, 0, 1]).gcd(&p(vec![1, 1])).is_one());
    }

    #[test]
    fn shifted() {
        // (x + 1)^2 at x + 2
        assert_eq!(p(vec![1, 2, 1]).shifted(&Fraction::from(2)), p(vec![1, 6, 9]));
        let a = p(vec![2, -3, 0, 5]);
        let s = Fraction::from((-1, 3));
        assert_eq!(a.shifted(&s).evaluate(&Fraction::one()), a.evaluate(&(&s + &Fraction::one())));
    }

    #[test]
    fn calculus() {
        let a = p(vec![1, 2, 1]);
        assert_eq!(a.derivative(), p(vec![2, 2]));
        assert_eq!(a.nth_derivative(2), p(vec![2]));
        assert_eq!(a.nth_derivative(5), Polynomial::zero());
        assert_eq!(
            p(vec![3, 0, 1]).integral(),
            p(vec![1, 0, 1, 0])
        );
        assert_eq!(
            p(vec![1, 0]).definite_integral(&Fraction::zero(), &Fraction::from(2)),
            2
        );
    }
}
