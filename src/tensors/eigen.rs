//! Eigenvalues, eigenvectors and decompositions of small matrices.
//!
//! The eigenvalues are the roots of the characteristic polynomial, which is
//! computed in closed form. Only matrices of dimension at most 3 are supported:
//! beyond that, the roots can in general only be found by numerical iteration.

use tracing::debug;

use crate::{
    domains::{float::Precision, rational::Fraction},
    poly::univariate::Polynomial,
};

use super::matrix::{Matrix, Vector};

/// All eigenvectors belonging to a single eigenvalue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Eigenspace {
    pub value: Fraction,
    pub precision: Precision,
    pub vectors: Vec<Vector>,
}

/// The decomposition `A = P * D * P^-1` with `D` diagonal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagonalization {
    pub p: Matrix,
    pub d: Matrix,
    pub p_inv: Matrix,
}

/// The singular value decomposition `A = U * S * V^T`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Svd {
    pub u: Matrix,
    pub sigma: Matrix,
    pub v_t: Matrix,
    pub precision: Precision,
}

impl Matrix {
    fn check_eigen_dimension(&self) {
        if !self.is_square() {
            panic!(
                "Eigenvalues require a square matrix instead of ({},{})",
                self.nrows, self.ncols
            );
        }

        if self.nrows > 3 {
            panic!(
                "Eigenvalues are only supported for matrices of dimension at most 3, not {}",
                self.nrows
            );
        }
    }

    /// Compute `det(x * I - A)`.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square or has a dimension larger than 3.
    pub fn characteristic_polynomial(&self) -> Polynomial {
        self.check_eigen_dimension();

        let d = &self.data;
        let coefficients = match self.nrows {
            1 => vec![Fraction::one(), -&d[0]],
            2 => vec![Fraction::one(), -self.trace(), self.determinant()],
            _ => vec![
                Fraction::one(),
                -self.trace(),
                (0..3).map(|i| self.minor(i, i)).sum(),
                -self.determinant(),
            ],
        };

        Polynomial::new(coefficients)
    }

    /// Compute the distinct real eigenvalues in ascending order, with their precision.
    /// Returns `None` if there is no real eigenvalue.
    pub fn eigenvalues_with_precision(&self) -> Option<Vec<(Fraction, Precision)>> {
        let values = self.characteristic_polynomial().roots_with_precision()?;

        if values.iter().any(|(_, p)| !p.is_exact()) {
            debug!(
                "Eigenvalues of\n{}\nare approximate: {:?}",
                self,
                values.iter().map(|(v, _)| v.to_string()).collect::<Vec<_>>()
            );
        }

        Some(values)
    }

    /// Compute the distinct real eigenvalues in ascending order.
    pub fn eigenvalues(&self) -> Option<Vec<Fraction>> {
        self.eigenvalues_with_precision()
            .map(|v| v.into_iter().map(|(x, _)| x).collect())
    }

    /// Compute the eigenvectors of every real eigenvalue.
    ///
    /// For exact eigenvalues, the eigenvectors span the null space of `A - v * I`.
    /// Approximate eigenvalues yield an approximate null space, so a non-zero column
    /// of the adjugate of `A - v * I` is used instead.
    pub fn eigenvectors(&self) -> Option<Vec<Eigenspace>> {
        let values = self.eigenvalues_with_precision()?;

        Some(
            values
                .into_iter()
                .map(|(value, precision)| {
                    let shifted = self - &Matrix::identity(self.nrows).mul_scalar(&value);

                    let vectors = if precision.is_exact() {
                        shifted
                            .solution_space()
                            .iter()
                            .map(|v| v.simplified())
                            .collect()
                    } else {
                        shifted
                            .adjugate()
                            .columns()
                            .into_iter()
                            .find(|c| !c.is_zero())
                            .into_iter()
                            .collect()
                    };

                    Eigenspace {
                        value,
                        precision,
                        vectors,
                    }
                })
                .collect(),
        )
    }

    /// Check if the exact eigenvectors span the whole space. This is in particular
    /// the case when there are `n` distinct exact eigenvalues.
    pub fn is_diagonalizable(&self) -> bool {
        let Some(spaces) = self.eigenvectors() else {
            return false;
        };

        spaces
            .iter()
            .filter(|s| s.precision.is_exact())
            .map(|s| s.vectors.len())
            .sum::<usize>()
            == self.nrows()
    }

    /// Write the matrix as `P * D * P^-1`, with the eigenvectors as the columns
    /// of `P` and the eigenvalues on the diagonal of `D`.
    ///
    /// # Panics
    ///
    /// Panics if the decomposition does not multiply back to the matrix.
    pub fn diagonalize(&self) -> Option<Diagonalization> {
        if !self.is_diagonalizable() {
            return None;
        }

        let mut columns = vec![];
        let mut diagonal = vec![];
        for space in self.eigenvectors()? {
            for v in space.vectors {
                columns.push(v);
                diagonal.push(space.value.clone());
            }
        }

        let p = Matrix::from_columns(&columns).ok()?;
        let d = Matrix::eye(&diagonal);
        let p_inv = p.inverse().ok()?;

        assert_eq!(
            &(&p * &d) * &p_inv,
            *self,
            "Diagonalization does not reproduce the matrix"
        );

        Some(Diagonalization { p, d, p_inv })
    }

    /// Compute the singular value decomposition from the eigendecomposition of
    /// `A^T * A`, completing `U` with the null space of `A * A^T`.
    ///
    /// The singular values are square roots and the basis vectors are normalized,
    /// so the decomposition is approximate unless all of them are rational.
    ///
    /// # Panics
    ///
    /// Panics if a dimension of the matrix is larger than 3.
    pub fn singular_value_decomposition(&self) -> Option<Svd> {
        if self.nrows > 3 || self.ncols > 3 {
            panic!(
                "Singular values are only supported for matrices of dimension at most 3, not ({},{})",
                self.nrows, self.ncols
            );
        }
        if self.nrows == 0 || self.ncols == 0 {
            return None;
        }

        let t = self.transposed();
        let ata = &t * self;

        let mut precision = Precision::Exact;
        let mut pairs: Vec<(Fraction, Vector)> = vec![];
        for space in ata.eigenvectors()? {
            precision = precision.and(space.precision);
            for v in Vector::orthogonalize(&space.vectors) {
                let (v, p) = normalize(&v);
                precision = precision.and(p);
                pairs.push((space.value.clone(), v));
            }
        }

        if pairs.len() != self.ncols() {
            debug!("Eigenvectors of A^T A do not span the space:\n{}", ata);
            return None;
        }

        // largest singular value first
        pairs.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut sigma = Matrix::new(self.nrows, self.ncols);
        let mut u_columns = vec![];
        for (i, (value, v)) in pairs.iter().enumerate() {
            let value = if value.is_negative() { Fraction::zero() } else { value.clone() };
            let (s, p) = value.sqrt_with_precision();
            precision = precision.and(p);

            if s.is_zero() || i >= self.nrows() {
                continue;
            }

            sigma[(i as u32, i as u32)] = s.clone();
            u_columns.push(self.mul_vector(v).scale(&s.reciprocal()));
        }

        // complete U with an orthonormal basis of the left null space
        let aat = self * &t;
        for v in Vector::orthogonalize(&aat.solution_space()) {
            let (v, p) = normalize(&v);
            precision = precision.and(p);
            u_columns.push(v);
        }
        u_columns.truncate(self.nrows());

        let u = Matrix::from_columns(&u_columns).ok()?;
        let v_t = Matrix::from_rows(&pairs.into_iter().map(|(_, v)| v).collect::<Vec<_>>()).ok()?;

        Some(Svd {
            u,
            sigma,
            v_t,
            precision,
        })
    }
}

fn normalize(v: &Vector) -> (Vector, Precision) {
    let (norm, precision) = v.norm_squared().sqrt_with_precision();
    if norm.is_zero() {
        return (v.clone(), Precision::Exact);
    }
    (v.scale(&norm.reciprocal()), precision)
}
