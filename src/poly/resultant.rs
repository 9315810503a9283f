use crate::{domains::rational::Fraction, tensors::matrix::Matrix};

use super::univariate::Polynomial;

impl Polynomial {
    /// Build the Sylvester matrix of `self` and `other`.
    ///
    /// For polynomials of degree `m` and `n`, the matrix has dimension `m + n`:
    /// the first `n` rows hold the shifted coefficients of `self` and the last `m`
    /// rows those of `other`.
    pub fn sylvester_matrix(&self, other: &Polynomial) -> Matrix {
        let (a, b) = (self.simplified(), other.simplified());
        let (m, n) = (a.degree(), b.degree());
        let size = (m + n) as u32;

        let mut s = Matrix::new(size, size);
        for i in 0..n {
            for (j, c) in a.coefficients().iter().enumerate() {
                s[(i as u32, (i + j) as u32)] = c.clone();
            }
        }
        for i in 0..m {
            for (j, c) in b.coefficients().iter().enumerate() {
                s[((n + i) as u32, (i + j) as u32)] = c.clone();
            }
        }
        s
    }

    /// Compute the resultant, the determinant of the Sylvester matrix.
    /// It is zero iff the polynomials have a common root.
    pub fn resultant(&self, other: &Polynomial) -> Fraction {
        if self.is_zero() || other.is_zero() {
            return Fraction::zero();
        }

        let (a, b) = (self.simplified(), other.simplified());
        if a.degree() + b.degree() <= 4 {
            a.sylvester_matrix(&b).determinant()
        } else {
            // same value, without a cofactor expansion of the large Sylvester matrix
            a.resultant_from_remainders(&b)
        }
    }

    /// Compute the resultant from the degrees `d_i` and leading coefficients `l_i`
    /// of the remainder sequence `r_0 = self`, `r_1 = other`,
    /// `r_{i+1} = r_{i-1} mod r_i`, which ends in a constant `r_k`:
    ///
    /// `Res = (-1)^(sum d_{i-1} d_i) * prod l_i^(d_{i-1} - d_{i+1}) * r_k^(d_{k-1})`.
    fn resultant_from_remainders(&self, other: &Polynomial) -> Fraction {
        let mut sequence = vec![self.clone(), other.clone()];
        while let Some(last) = sequence.last().filter(|r| !r.is_constant()) {
            let (_, r) = sequence[sequence.len() - 2].quot_rem(last);
            sequence.push(r);
        }

        let Some(r_k) = sequence.pop().map(|r| r.leading_coefficient()) else {
            return Fraction::zero();
        };
        if r_k.is_zero() {
            return r_k;
        }

        let mut degrees: Vec<usize> = sequence.iter().map(|r| r.degree()).collect();
        let flip = degrees.windows(2).map(|w| w[0] * w[1]).sum::<usize>() % 2 == 1;
        let mut res = r_k.pow(degrees[degrees.len() - 1] as i32);

        degrees.push(0);
        for (i, r) in sequence.iter().enumerate().skip(1) {
            res *= r.leading_coefficient().pow((degrees[i - 1] - degrees[i + 1]) as i32);
        }

        if flip {
            -res
        } else {
            res
        }
    }

    /// Compute the discriminant `(-1)^(n(n-1)/2) / a_n * Res(p, p')`.
    /// For a quadratic `ax^2 + bx + c` this is `b^2 - 4ac`.
    ///
    /// # Panics
    ///
    /// Panics if the polynomial is constant.
    pub fn discriminant(&self) -> Fraction {
        let p = self.simplified();
        let n = p.degree();
        if n == 0 {
            panic!("Cannot compute the discriminant of the constant polynomial {}", p);
        }

        let res = p.resultant(&p.derivative()) / p.leading_coefficient();
        if (n * (n - 1) / 2) % 2 == 1 {
            -res
        } else {
            res
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{domains::rational::Fraction, poly::univariate::Polynomial, tensors::matrix::Matrix};

    fn p(c: Vec<i64>) -> Polynomial {
        Polynomial::from_coefficients(c)
    }

    #[test]
    fn sylvester() {
        let s = p(vec![1, 2, 1]).sylvester_matrix(&p(vec![2, 2]));
        assert_eq!(
            s,
            Matrix::from_nested_vec(vec![vec![1, 2, 1], vec![2, 2, 0], vec![0, 2, 2]]).unwrap()
        );
    }

    #[test]
    fn resultant() {
        let a = p(vec![1, 0, -1]);
        let b = p(vec![1, -2]);
        assert_eq!(a.resultant(&b), 3);
        assert_eq!(a.resultant_from_remainders(&b), 3);

        // common root at x = 1
        assert_eq!(a.resultant(&p(vec![1, -1])), 0);

        let c = p(vec![3, 0, 2, -5]);
        let d = p(vec![1, 4, 7]);
        assert_eq!(c.resultant(&d), c.sylvester_matrix(&d).determinant());
        assert_eq!(d.resultant(&c), d.sylvester_matrix(&c).determinant());
        assert_eq!(c.resultant(&p(vec![4])), 64);
        assert_eq!(p(vec![4]).resultant_from_remainders(&c), 64);

        // (x - 2)(x^2 + 1)(x + 3) and (x - 2)(x + 5)
        let e = &(&p(vec![1, -2]) * &p(vec![1, 0, 1])) * &p(vec![1, 3]);
        assert_eq!(e.resultant(&p(vec![1, 3, -10])), 0);
        let f = p(vec![2, 0, -1]);
        assert_eq!(e.resultant(&f), e.sylvester_matrix(&f).determinant());
    }

    #[test]
    fn discriminant() {
        assert_eq!(p(vec![1, 2, 1]).discriminant(), 0);
        assert_eq!(p(vec![2, 3, -5]).discriminant(), 49);
        assert_eq!(p(vec![1, 0, 1]).discriminant(), -4);
        // x^3 + px + q: -4p^3 - 27q^2
        assert_eq!(p(vec![1, 0, -3, 1]).discriminant(), 81);
        assert_eq!(p(vec![2, 1]).discriminant(), Fraction::one());
    }
}
