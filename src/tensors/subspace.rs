//! Fundamental subspaces of matrices and linear relations between vectors.
//!
//! Bases are not unique. The ones returned here follow from the reduced row
//! echelon form, so two bases of the same space should be compared by span.

use crate::domains::rational::Fraction;

use super::matrix::{Matrix, MatrixError, Vector};

/// The way [Matrix::find_basis] selects its basis vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BasisMethod {
    /// A subset of the columns of the matrix.
    Column,
    /// The non-zero rows of the reduced row echelon form.
    Row,
}

/// The vector at `index` written as a combination of earlier, independent vectors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearDependency {
    pub index: usize,
    pub coefficients: Vec<(usize, Fraction)>,
}

impl Matrix {
    /// Compute a basis of the null space, the solutions of `A * x = 0`.
    ///
    /// Each free variable is set to one in turn, and the pivot variables are read
    /// off from the negated reduced matrix.
    pub fn solution_space(&self) -> Vec<Vector> {
        let reduced = self.reduced();
        let pivots = Matrix::pivots_of_reduced(&reduced);

        (0..self.ncols())
            .filter(|c| !pivots.contains(c))
            .map(|free| {
                let mut v = Vector::zero(self.ncols());
                v[free] = Fraction::one();
                for (row, p) in pivots.iter().enumerate() {
                    v[*p] = -&reduced[(row as u32, free as u32)];
                }
                v
            })
            .collect()
    }

    /// The pivot columns of the matrix, which span its image.
    pub fn column_space(&self) -> Vec<Vector> {
        self.pivot_columns()
            .into_iter()
            .map(|c| self.column(c))
            .collect()
    }

    /// The non-zero rows of the reduced row echelon form.
    pub fn row_space(&self) -> Vec<Vector> {
        self.reduced()
            .rows()
            .into_iter()
            .filter(|r| !r.is_zero())
            .collect()
    }

    pub fn find_basis(&self, method: BasisMethod) -> Vec<Vector> {
        match method {
            BasisMethod::Column => self.column_space(),
            BasisMethod::Row => self.row_space(),
        }
    }

    /// Find a solution of `A * x = b` in which every free variable is zero.
    pub fn particular_solution(&self, b: &Vector) -> Result<Vector, MatrixError> {
        if self.nrows() != b.len() {
            return Err(MatrixError::ShapeMismatch);
        }

        let mut augmented = Matrix::new(self.nrows, self.ncols + 1);
        for r in 0..self.nrows {
            for c in 0..self.ncols {
                augmented[(r, c)] = self[(r, c)].clone();
            }
            augmented[(r, self.ncols)] = b[r as usize].clone();
        }

        let reduced = augmented.reduced();
        let pivots = Matrix::pivots_of_reduced(&reduced);
        if pivots.last() == Some(&self.ncols()) {
            return Err(MatrixError::Inconsistent);
        }

        let mut x = Vector::zero(self.ncols());
        for (row, p) in pivots.iter().enumerate() {
            x[*p] = reduced[(row as u32, self.ncols)].clone();
        }
        Ok(x)
    }

    /// Express every vector that depends on earlier vectors in `vectors` as a linear
    /// combination of the independent ones. Returns `None` if the vectors are
    /// linearly independent.
    ///
    /// # Panics
    ///
    /// Panics if the vectors have different dimensions, or if a computed combination
    /// does not reconstruct its vector.
    pub fn find_linear_dependency(vectors: &[Vector]) -> Option<Vec<LinearDependency>> {
        if vectors.is_empty() {
            return None;
        }

        let m = match Matrix::from_columns(vectors) {
            Ok(m) => m,
            Err(e) => panic!("Cannot compare vectors of different dimensions: {}", e),
        };

        let reduced = m.reduced();
        let pivots = Matrix::pivots_of_reduced(&reduced);
        if pivots.len() == vectors.len() {
            return None;
        }

        let mut dependencies = vec![];
        for index in (0..vectors.len()).filter(|c| !pivots.contains(c)) {
            let coefficients: Vec<_> = pivots
                .iter()
                .enumerate()
                .map(|(row, p)| (*p, reduced[(row as u32, index as u32)].clone()))
                .filter(|(_, c)| !c.is_zero())
                .collect();

            let reconstructed = coefficients
                .iter()
                .fold(Vector::zero(vectors[index].len()), |acc, (p, c)| {
                    acc + vectors[*p].scale(c)
                });
            assert_eq!(
                reconstructed, vectors[index],
                "Linear combination does not reconstruct vector {}",
                index
            );

            dependencies.push(LinearDependency {
                index,
                coefficients,
            });
        }

        Some(dependencies)
    }

    pub fn is_linearly_independent(vectors: &[Vector]) -> bool {
        Matrix::find_linear_dependency(vectors).is_none()
    }

    /// Find coefficients `c` with `sum c_i * basis_i == target`. Returns `None` if
    /// `target` is not in the span of `basis`.
    pub fn linear_combination(target: &Vector, basis: &[Vector]) -> Option<Vec<Fraction>> {
        if basis.is_empty() {
            return if target.is_zero() { Some(vec![]) } else { None };
        }

        let m = Matrix::from_columns(basis).ok()?;
        m.particular_solution(target).ok().map(|x| x.data)
    }
}
