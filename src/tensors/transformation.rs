use std::fmt::Display;

use tracing::debug;

use crate::domains::rational::Fraction;

use super::{
    eigen::Diagonalization,
    matrix::{Matrix, Vector},
};

/// The largest dimension accepted by [LinearTransformation::from_function].
pub const MAX_PROBE_DIMENSION: usize = 10;

/// A linear map between spaces of fraction vectors, represented by a matrix
/// with respect to the standard bases.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LinearTransformation {
    representation: Matrix,
}

impl LinearTransformation {
    pub fn new(representation: Matrix) -> LinearTransformation {
        LinearTransformation { representation }
    }

    /// Create a transformation from a function that maps vectors of dimension `lhs`
    /// to vectors of dimension `rhs`.
    ///
    /// The function is first probed for additivity and homogeneity on two sample
    /// vectors and one scalar. This is a best-effort check and not a proof of
    /// linearity. If it passes, the matrix is built column by column from the images
    /// of the standard basis vectors. Returns `None` if the check fails or if an
    /// image has the wrong dimension.
    ///
    /// # Panics
    ///
    /// Panics if a dimension is zero or larger than [MAX_PROBE_DIMENSION].
    pub fn from_function<F: Fn(&Vector) -> Vector>(
        f: F,
        lhs: usize,
        rhs: usize,
    ) -> Option<LinearTransformation> {
        if lhs == 0 || rhs == 0 || lhs > MAX_PROBE_DIMENSION || rhs > MAX_PROBE_DIMENSION {
            panic!(
                "Dimensions must be between 1 and {}, not {} and {}",
                MAX_PROBE_DIMENSION, lhs, rhs
            );
        }

        let a: Vector = (1..=lhs as i64).collect();
        let b: Vector = (0..lhs as i64)
            .map(|i| Fraction::from((if i % 2 == 0 { 2 * i + 3 } else { -2 * i - 3 }, i + 2)))
            .collect();
        let c = Fraction::from((3, 2));

        let (fa, fb) = (f(&a), f(&b));
        if fa.len() != rhs || fb.len() != rhs {
            debug!("Rejected function with output dimension {} instead of {}", fa.len(), rhs);
            return None;
        }

        if f(&(&a + &b)) != &fa + &fb {
            debug!("Rejected function that is not additive: f({} + {}) != {} + {}", a, b, fa, fb);
            return None;
        }

        if f(&a.scale(&c)) != fa.scale(&c) {
            debug!("Rejected function that is not homogeneous: f({} * {}) != {} * {}", c, a, c, fa);
            return None;
        }

        let mut columns = Vec::with_capacity(lhs);
        for i in 0..lhs {
            let image = f(&Vector::unit(lhs, i));
            if image.len() != rhs {
                debug!("Rejected function with output dimension {} instead of {}", image.len(), rhs);
                return None;
            }
            columns.push(image);
        }

        Matrix::from_columns(&columns).ok().map(LinearTransformation::new)
    }

    #[inline]
    pub fn representation(&self) -> &Matrix {
        &self.representation
    }

    /// The dimension of the domain.
    pub fn lhs_vector_space(&self) -> usize {
        self.representation.ncols()
    }

    /// The dimension of the codomain.
    pub fn rhs_vector_space(&self) -> usize {
        self.representation.nrows()
    }

    /// Apply the transformation to `v`.
    pub fn transform(&self, v: &Vector) -> Vector {
        self.representation.mul_vector(v)
    }

    /// Return the transformation that first applies `other` and then `self`.
    pub fn compose(&self, other: &LinearTransformation) -> LinearTransformation {
        LinearTransformation::new(&self.representation * &other.representation)
    }

    /// A basis of the vectors that are mapped to zero.
    pub fn kernel(&self) -> Vec<Vector> {
        self.representation.solution_space()
    }

    /// A basis of the image.
    pub fn image(&self) -> Vec<Vector> {
        self.representation.column_space()
    }

    pub fn rank(&self) -> usize {
        self.representation.rank()
    }

    pub fn nullity(&self) -> usize {
        self.representation.nullity()
    }

    pub fn is_injective(&self) -> bool {
        self.nullity() == 0
    }

    pub fn is_surjective(&self) -> bool {
        self.rank() == self.rhs_vector_space()
    }

    pub fn is_invertible(&self) -> bool {
        self.is_injective() && self.is_surjective()
    }

    pub fn inverse(&self) -> Option<LinearTransformation> {
        self.representation
            .inverse()
            .ok()
            .map(LinearTransformation::new)
    }

    /// See [Matrix::eigenvalues].
    pub fn eigenvalues(&self) -> Option<Vec<Fraction>> {
        self.representation.eigenvalues()
    }

    /// See [Matrix::diagonalize].
    pub fn diagonalize(&self) -> Option<Diagonalization> {
        self.representation.diagonalize()
    }
}

impl From<Matrix> for LinearTransformation {
    fn from(m: Matrix) -> Self {
        LinearTransformation::new(m)
    }
}

impl Display for LinearTransformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "R^{} -> R^{}: {}",
            self.lhs_vector_space(),
            self.rhs_vector_space(),
            self.representation
        )
    }
}

#[cfg(test)]
mod test {
    use super::LinearTransformation;
    use crate::{
        domains::rational::Fraction,
        tensors::matrix::{Matrix, Vector},
    };

    fn t(data: Vec<Vec<i64>>) -> LinearTransformation {
        LinearTransformation::new(Matrix::from_nested_vec(data).unwrap())
    }

    #[test]
    fn transform() {
        let a = t(vec![vec![0, 1, -2], vec![3, 0, 1]]);
        assert_eq!(a.transform(&Vector::new(vec![1, 1, 1])), Vector::new(vec![-1, 4]));
        assert_eq!(a.lhs_vector_space(), 3);
        assert_eq!(a.rhs_vector_space(), 2);
        assert_eq!(a.to_string(), "R^3 -> R^2: [[0, 1, -2], [3, 0, 1]]");
    }

    #[test]
    fn from_function() {
        let f = LinearTransformation::from_function(
            |v: &Vector| Vector::new(vec![&v[0] + &v[1], v[1].clone() * Fraction::from(2)]),
            2,
            2,
        )
        .unwrap();
        assert_eq!(f, t(vec![vec![1, 1], vec![0, 2]]));

        let square = |v: &Vector| v.iter().map(|x| x * x).collect::<Vector>();
        assert!(LinearTransformation::from_function(square, 3, 3).is_none());

        let affine = |v: &Vector| v.iter().map(|x| x + &Fraction::one()).collect::<Vector>();
        assert!(LinearTransformation::from_function(affine, 2, 2).is_none());

        let wrong_dimension = |v: &Vector| v.clone();
        assert!(LinearTransformation::from_function(wrong_dimension, 2, 3).is_none());
    }

    #[test]
    #[should_panic(expected = "between 1 and 10")]
    fn from_function_too_large() {
        LinearTransformation::from_function(|v: &Vector| v.clone(), 11, 11);
    }

    #[test]
    fn properties() {
        let a = t(vec![vec![1, 2, 3], vec![2, 4, 6]]);
        assert_eq!(a.rank(), 1);
        assert_eq!(a.nullity(), 2);
        assert_eq!(a.image(), vec![Vector::new(vec![1, 2])]);
        for k in a.kernel() {
            assert!(a.transform(&k).is_zero());
        }
        assert!(!a.is_injective());
        assert!(!a.is_surjective());
        assert!(a.inverse().is_none());

        let b = t(vec![vec![2, 1], vec![1, 1]]);
        assert!(b.is_invertible());
        let inv = b.inverse().unwrap();
        assert_eq!(b.compose(&inv), LinearTransformation::new(Matrix::identity(2)));

        let c = t(vec![vec![4, 1], vec![2, 3]]);
        assert_eq!(c.eigenvalues(), Some(vec![2.into(), 5.into()]));
        assert!(c.diagonalize().is_some());
    }
}
