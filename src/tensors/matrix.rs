use std::{
    fmt::Display,
    ops::{Index, IndexMut, Mul, Neg},
    slice::Chunks,
    str::FromStr,
};

use tracing::{debug, trace};

use crate::{
    domains::{integer::Integer, rational::Fraction},
    printer::{MatrixPrinter, VectorPrinter},
    utils::{forward_assign_op, forward_binop},
};

/// An n-dimensional vector of fractions.
#[derive(Clone, Hash, PartialEq, Eq, Debug, Default)]
pub struct Vector {
    pub(crate) data: Vec<Fraction>,
}

impl Vector {
    /// Create a new vector from a list of scalars.
    pub fn new<T: Into<Fraction>>(data: Vec<T>) -> Vector {
        Vector {
            data: data.into_iter().map(|x| x.into()).collect(),
        }
    }

    /// Create the zero vector of dimension `n`.
    pub fn zero(n: usize) -> Vector {
        Vector {
            data: vec![Fraction::zero(); n],
        }
    }

    /// Create the `i`th standard basis vector of dimension `n`.
    pub fn unit(n: usize, i: usize) -> Vector {
        let mut v = Vector::zero(n);
        v.data[i] = Fraction::one();
        v
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|x| x.is_zero())
    }

    #[inline]
    pub fn data(&self) -> &[Fraction] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fraction> {
        self.data.iter()
    }

    /// Create a matrix with a single column.
    pub fn into_column(self) -> Matrix {
        let n = self.data.len() as u32;
        Matrix::with_shape(self.data, n, 1)
    }

    /// Create a matrix with a single row.
    pub fn into_row(self) -> Matrix {
        let n = self.data.len() as u32;
        Matrix::with_shape(self.data, 1, n)
    }

    fn check_dimension(&self, rhs: &Vector, op: &str) {
        if self.data.len() != rhs.data.len() {
            panic!(
                "Cannot {} vectors of different dimensions: {} vs {}",
                op,
                self.data.len(),
                rhs.data.len()
            );
        }
    }

    pub fn norm_squared(&self) -> Fraction {
        self.data.iter().map(|e| e * e).sum()
    }

    /// Compute the Euclidean norm through a double-precision square root.
    /// The result is exact when the squared norm is a perfect square.
    pub fn norm(&self) -> Fraction {
        self.norm_squared().sqrt()
    }

    /// Take the Euclidean scalar product of two vectors.
    pub fn dot(&self, rhs: &Self) -> Fraction {
        self.check_dimension(rhs, "take the dot product of");
        self.data.iter().zip(&rhs.data).map(|(a, b)| a * b).sum()
    }

    /// Compute the Euclidean cross product in three dimensions.
    pub fn cross_product(&self, rhs: &Self) -> Vector {
        self.check_dimension(rhs, "take the cross product of");
        if self.data.len() != 3 {
            panic!(
                "Vectors must be three-dimensional instead of {}",
                self.data.len(),
            );
        }

        let (a, b) = (&self.data, &rhs.data);
        Vector {
            data: vec![
                &a[1] * &b[2] - &a[2] * &b[1],
                &a[2] * &b[0] - &a[0] * &b[2],
                &a[0] * &b[1] - &a[1] * &b[0],
            ],
        }
    }

    /// Multiply every entry by `factor`.
    pub fn scale(&self, factor: &Fraction) -> Vector {
        Vector {
            data: self.data.iter().map(|x| x * factor).collect(),
        }
    }

    /// Project the vector onto the `target` vector.
    pub fn project(&self, target: &Self) -> Self {
        target.scale(&(self.dot(target) / target.norm_squared()))
    }

    /// Use the Gram–Schmidt method to create an orthogonal basis.
    pub fn orthogonalize(system: &[Self]) -> Vec<Vector> {
        let mut res: Vec<Vector> = vec![];

        for s in system {
            let mut new_vec = s.clone();
            for x in &res {
                if !x.is_zero() {
                    new_vec -= &new_vec.project(x);
                }
            }

            res.push(new_vec);
        }

        res
    }

    /// Scale the vector such that all entries are coprime integers and the first
    /// non-zero entry is positive.
    pub fn simplified(&self) -> Vector {
        let Some(first) = self.data.iter().find(|x| !x.is_zero()) else {
            return self.clone();
        };

        let lcm = self
            .data
            .iter()
            .fold(Integer::one(), |acc, x| acc.lcm(x.denominator()));
        let scaled: Vec<Integer> = self
            .data
            .iter()
            .map(|x| &(&lcm / x.denominator()) * x.numerator())
            .collect();
        let mut gcd = scaled.iter().fold(Integer::zero(), |acc, x| acc.gcd(x));
        if first.is_negative() {
            gcd = -gcd;
        }

        Vector {
            data: scaled.iter().map(|x| Fraction::from(x / &gcd)).collect(),
        }
    }

    /// Scale the vector to unit length. The norm is computed through a
    /// double-precision bridge, so the result is in general approximate.
    pub fn normalized(&self) -> Vector {
        let norm = self.norm();
        if norm.is_zero() {
            return self.clone();
        }
        self.scale(&norm.reciprocal())
    }

    fn add_impl(&self, rhs: &Vector) -> Vector {
        self.check_dimension(rhs, "add");
        Vector {
            data: self.data.iter().zip(&rhs.data).map(|(a, b)| a + b).collect(),
        }
    }

    fn sub_impl(&self, rhs: &Vector) -> Vector {
        self.check_dimension(rhs, "subtract");
        Vector {
            data: self.data.iter().zip(&rhs.data).map(|(a, b)| a - b).collect(),
        }
    }
}

forward_binop!(Vector, Add, add, add_impl);
forward_binop!(Vector, Sub, sub, sub_impl);
forward_assign_op!(Vector, AddAssign, add_assign, add_impl);
forward_assign_op!(Vector, SubAssign, sub_assign, sub_impl);

impl Neg for Vector {
    type Output = Vector;

    fn neg(mut self) -> Self::Output {
        for e in &mut self.data {
            *e = -&*e;
        }
        self
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

impl<T: Into<Fraction>> FromIterator<T> for Vector {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Vector {
            data: iter.into_iter().map(|x| x.into()).collect(),
        }
    }
}

impl Index<usize> for Vector {
    type Output = Fraction;

    /// Get the `i`th entry of the vector.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Fraction {
        &mut self.data[index]
    }
}

impl Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        VectorPrinter::new(self).fmt(f)
    }
}

impl FromStr for Vector {
    type Err = String;

    /// Parse a vector of the form `[1, 2/3, -4]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or_else(|| format!("Vector must be enclosed in brackets: {}", s))?;

        if inner.trim().is_empty() {
            return Ok(Vector::default());
        }

        inner
            .split(',')
            .map(|e| {
                e.parse::<Fraction>()
                    .map_err(|err| format!("Could not parse entry '{}': {}", e.trim(), err))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|data| Vector { data })
    }
}

/// A matrix of fractions, stored in row-major order.
///
/// A matrix without rows or without columns is always the empty `0 x 0` matrix.
#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub struct Matrix {
    pub(crate) data: Vec<Fraction>,
    pub(crate) nrows: u32,
    pub(crate) ncols: u32,
}

/// Errors that can occur when performing matrix operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatrixError {
    NotSquare,
    NotRectangular,
    NotInvertible,
    ShapeMismatch,
    Inconsistent,
    Underdetermined { rank: usize, nvars: usize },
}

impl std::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::NotSquare => write!(f, "The matrix is not square"),
            MatrixError::NotRectangular => write!(f, "The matrix is not rectangular"),
            MatrixError::NotInvertible => write!(f, "The matrix is not invertible"),
            MatrixError::ShapeMismatch => write!(f, "The shape of the matrix is not compatible"),
            MatrixError::Inconsistent => write!(f, "The system is inconsistent"),
            MatrixError::Underdetermined { rank, nvars } => write!(
                f,
                "The system is underdetermined: the rank is {} for {} variables",
                rank, nvars
            ),
        }
    }
}

impl std::error::Error for MatrixError {}

impl Matrix {
    /// Create a new zeroed matrix with `nrows` rows and `ncols` columns.
    pub fn new(nrows: u32, ncols: u32) -> Matrix {
        Matrix::with_shape(
            vec![Fraction::zero(); nrows as usize * ncols as usize],
            nrows,
            ncols,
        )
    }

    fn with_shape(data: Vec<Fraction>, nrows: u32, ncols: u32) -> Matrix {
        if nrows == 0 || ncols == 0 {
            Matrix {
                data: vec![],
                nrows: 0,
                ncols: 0,
            }
        } else {
            Matrix { data, nrows, ncols }
        }
    }

    /// Create the matrix without rows or columns.
    pub fn empty() -> Matrix {
        Matrix::new(0, 0)
    }

    /// Create a new square matrix with `nrows` rows and ones on the main diagonal and zeroes elsewhere.
    pub fn identity(nrows: u32) -> Matrix {
        let mut m = Matrix::new(nrows, nrows);
        for i in 0..nrows {
            m[(i, i)] = Fraction::one();
        }
        m
    }

    /// Create a new matrix with the scalars `diag` on the main diagonal and zeroes elsewhere.
    pub fn eye(diag: &[Fraction]) -> Matrix {
        let mut m = Matrix::new(diag.len() as u32, diag.len() as u32);
        for (i, e) in diag.iter().enumerate() {
            m[(i as u32, i as u32)] = e.clone();
        }
        m
    }

    /// Convert a linear representation of a matrix to a `Matrix`.
    pub fn from_linear(data: Vec<Fraction>, nrows: u32, ncols: u32) -> Result<Matrix, MatrixError> {
        if data.len() == nrows as usize * ncols as usize {
            Ok(Matrix::with_shape(data, nrows, ncols))
        } else {
            Err(MatrixError::ShapeMismatch)
        }
    }

    /// Create a new matrix from a 2-dimensional vector of scalars.
    pub fn from_nested_vec<T: Into<Fraction>>(matrix: Vec<Vec<T>>) -> Result<Matrix, MatrixError> {
        let mut data = vec![];

        let cols = matrix.first().map(|r| r.len()).unwrap_or(0);
        let rows = matrix.len();

        for d in matrix {
            if d.len() != cols {
                return Err(MatrixError::NotRectangular);
            }

            data.extend(d.into_iter().map(|x| x.into()));
        }

        Ok(Matrix::with_shape(data, rows as u32, cols as u32))
    }

    /// Create a matrix with the given vectors as rows.
    pub fn from_rows(rows: &[Vector]) -> Result<Matrix, MatrixError> {
        Matrix::from_nested_vec(rows.iter().map(|r| r.data.clone()).collect())
    }

    /// Create a matrix with the given vectors as columns.
    pub fn from_columns(columns: &[Vector]) -> Result<Matrix, MatrixError> {
        Ok(Matrix::from_rows(columns)?.transposed())
    }

    /// Return the number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows as usize
    }

    /// Return the number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols as usize
    }

    /// Return the size as `(width, height)`.
    #[inline]
    pub fn size(&self) -> (usize, usize) {
        (self.ncols(), self.nrows())
    }

    #[inline]
    pub fn data(&self) -> &[Fraction] {
        &self.data
    }

    /// Return an iterator over the rows of the matrix.
    pub fn row_iter(&self) -> Chunks<'_, Fraction> {
        self.data.chunks(self.ncols.max(1) as usize)
    }

    /// Return true iff the matrix is square and not empty.
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols && self.nrows > 0
    }

    /// Return true iff every entry in the matrix is zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|e| e.is_zero())
    }

    pub fn is_identity(&self) -> bool {
        self.is_square() && *self == Matrix::identity(self.nrows)
    }

    /// Return true iff every non-diagonal entry in the matrix is zero.
    pub fn is_diagonal(&self) -> bool {
        self.data
            .iter()
            .enumerate()
            .all(|(i, e)| i as u32 % self.ncols == i as u32 / self.ncols || e.is_zero())
    }

    pub fn is_symmetric(&self) -> bool {
        self.is_square() && *self == self.transposed()
    }

    pub fn row(&self, i: usize) -> Vector {
        Vector {
            data: self[i as u32].to_vec(),
        }
    }

    pub fn rows(&self) -> Vec<Vector> {
        (0..self.nrows()).map(|i| self.row(i)).collect()
    }

    pub fn column(&self, j: usize) -> Vector {
        Vector {
            data: (0..self.nrows)
                .map(|i| self[(i, j as u32)].clone())
                .collect(),
        }
    }

    pub fn columns(&self) -> Vec<Vector> {
        (0..self.ncols()).map(|j| self.column(j)).collect()
    }

    /// Return the transposed matrix.
    pub fn transposed(&self) -> Matrix {
        let mut m = Matrix::new(self.ncols, self.nrows);
        for r in 0..self.nrows {
            for c in 0..self.ncols {
                m[(c, r)] = self[(r, c)].clone();
            }
        }
        m
    }

    /// Compute the sum of the diagonal entries.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square.
    pub fn trace(&self) -> Fraction {
        if self.nrows != self.ncols {
            panic!(
                "Cannot take the trace of a non-square matrix: ({},{})",
                self.nrows, self.ncols
            );
        }

        (0..self.nrows).map(|i| &self[(i, i)]).sum()
    }

    /// Multiply the scalar `e` to each entry of the matrix.
    pub fn mul_scalar(&self, e: &Fraction) -> Matrix {
        Matrix {
            data: self.data.iter().map(|x| x * e).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Multiply the matrix with a column vector.
    pub fn mul_vector(&self, v: &Vector) -> Vector {
        if self.ncols as usize != v.len() {
            panic!(
                "Cannot multiply matrix and vector because of a dimension mismatch: ({},{}) vs {}",
                self.nrows,
                self.ncols,
                v.len()
            );
        }

        self.row_iter()
            .take(self.nrows())
            .map(|r| r.iter().zip(&v.data).map(|(a, b)| a * b).sum::<Fraction>())
            .collect()
    }

    /// Compute `self^e` by repeated squaring.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square.
    pub fn pow(&self, mut e: u32) -> Matrix {
        if self.nrows != self.ncols {
            panic!(
                "Cannot take the power of a non-square matrix: ({},{})",
                self.nrows, self.ncols
            );
        }

        let mut res = Matrix::identity(self.nrows);
        let mut base = self.clone();
        while e > 0 {
            if e % 2 == 1 {
                res = &res * &base;
            }
            base = &base * &base;
            e /= 2;
        }
        res
    }

    fn check_same_shape(&self, rhs: &Matrix, op: &str) {
        if self.nrows != rhs.nrows || self.ncols != rhs.ncols {
            panic!(
                "Cannot {} matrices of different dimensions: ({},{}) vs ({},{})",
                op, self.nrows, self.ncols, rhs.nrows, rhs.ncols
            );
        }
    }

    fn add_impl(&self, rhs: &Matrix) -> Matrix {
        self.check_same_shape(rhs, "add");
        Matrix {
            data: self.data.iter().zip(&rhs.data).map(|(a, b)| a + b).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    fn sub_impl(&self, rhs: &Matrix) -> Matrix {
        self.check_same_shape(rhs, "subtract");
        Matrix {
            data: self.data.iter().zip(&rhs.data).map(|(a, b)| a - b).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    fn mul_impl(&self, rhs: &Matrix) -> Matrix {
        if self.ncols != rhs.nrows {
            panic!(
                "Cannot multiply matrices because of a dimension mismatch: ({},{}) vs ({},{})",
                self.nrows, self.ncols, rhs.nrows, rhs.ncols
            );
        }

        let mut m = Matrix::new(self.nrows, rhs.ncols);
        for i in 0..self.nrows {
            for j in 0..rhs.ncols {
                let mut sum = Fraction::zero();
                for k in 0..self.ncols {
                    if !self[(i, k)].is_zero() {
                        sum += &self[(i, k)] * &rhs[(k, j)];
                    }
                }
                m[(i, j)] = sum;
            }
        }

        m
    }

    /// Compute the reduced row echelon form with Gauss–Jordan elimination.
    ///
    /// Every row is normalized on its first non-zero entry in a column that is
    /// not yet used as a pivot, and that column is eliminated from all other rows.
    /// Finally, the rows are ordered by their pivot column, with zero rows last.
    pub fn reduced(&self) -> Matrix {
        let mut m = self.clone();
        let ncols = self.ncols as usize;
        let mut pivot_claimed = vec![false; ncols];
        let mut pivots: Vec<(u32, u32)> = vec![];

        for r in 0..m.nrows {
            let Some(c) = (0..m.ncols).find(|c| !pivot_claimed[*c as usize] && !m[(r, *c)].is_zero())
            else {
                continue;
            };

            let lead = m[(r, c)].reciprocal();
            if !lead.is_one() {
                for e in &mut m.data[(r * m.ncols) as usize..((r + 1) * m.ncols) as usize] {
                    *e *= &lead;
                }
            }

            for r2 in 0..m.nrows {
                if r2 == r || m[(r2, c)].is_zero() {
                    continue;
                }

                let factor = m[(r2, c)].clone();
                for c2 in 0..m.ncols {
                    if !m[(r, c2)].is_zero() {
                        let delta = &factor * &m[(r, c2)];
                        m[(r2, c2)] -= delta;
                    }
                }
            }

            pivot_claimed[c as usize] = true;
            pivots.push((r, c));
        }

        pivots.sort_by_key(|(_, c)| *c);

        let mut res = Matrix::new(m.nrows, m.ncols);
        for (i, (r, _)) in pivots.iter().enumerate() {
            res.data[i * ncols..(i + 1) * ncols].clone_from_slice(&m[*r]);
        }
        res
    }

    /// Return the pivot columns of the reduced row echelon form.
    pub fn pivot_columns(&self) -> Vec<usize> {
        Matrix::pivots_of_reduced(&self.reduced())
    }

    pub(crate) fn pivots_of_reduced(reduced: &Matrix) -> Vec<usize> {
        reduced
            .row_iter()
            .take(reduced.nrows())
            .filter_map(|r| r.iter().position(|e| !e.is_zero()))
            .collect()
    }

    /// Get the rank of the matrix.
    pub fn rank(&self) -> usize {
        self.pivot_columns().len()
    }

    /// Get the dimension of the null space.
    pub fn nullity(&self) -> usize {
        self.ncols() - self.rank()
    }

    /// Return the matrix with row `row` and column `col` removed.
    pub fn submatrix(&self, row: usize, col: usize) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for (r, rd) in self.row_iter().take(self.nrows()).enumerate() {
            if r != row {
                data.extend(
                    rd.iter()
                        .enumerate()
                        .filter(|(c, _)| *c != col)
                        .map(|(_, e)| e.clone()),
                );
            }
        }

        Matrix::with_shape(data, self.nrows - 1, self.ncols - 1)
    }

    /// Compute the determinant with a cofactor expansion.
    ///
    /// For a matrix with more columns than rows, the determinant of the leading
    /// square block is returned. This is the determinant of the coefficient part
    /// of an augmented matrix.
    ///
    /// # Panics
    ///
    /// Panics if the matrix has more rows than columns.
    pub fn determinant(&self) -> Fraction {
        if self.nrows > self.ncols {
            panic!(
                "Cannot compute the determinant of a matrix with more rows than columns: ({},{})",
                self.nrows, self.ncols
            );
        }

        if self.nrows == self.ncols {
            return Matrix::cofactor_expansion(self);
        }

        let n = self.nrows;
        let mut block = Matrix::new(n, n);
        for r in 0..n {
            for c in 0..n {
                block[(r, c)] = self[(r, c)].clone();
            }
        }
        Matrix::cofactor_expansion(&block)
    }

    fn cofactor_expansion(m: &Matrix) -> Fraction {
        match m.nrows {
            0 => return Fraction::one(),
            1 => return m.data[0].clone(),
            2 => return &m.data[0] * &m.data[3] - &m.data[1] * &m.data[2],
            _ => {}
        }

        // expand along the row with the most zeros
        let row = m
            .row_iter()
            .enumerate()
            .max_by_key(|(i, r)| (r.iter().filter(|e| e.is_zero()).count(), usize::MAX - i))
            .map(|(i, _)| i)
            .unwrap_or(0);
        trace!("Expanding {}x{} determinant along row {}", m.nrows, m.ncols, row);

        let mut det = Fraction::zero();
        for (col, e) in m[row as u32].iter().enumerate() {
            if e.is_zero() {
                continue;
            }

            let minor = Matrix::cofactor_expansion(&m.submatrix(row, col));
            if (row + col) % 2 == 0 {
                det += e * &minor;
            } else {
                det -= e * &minor;
            }
        }
        det
    }

    /// Compute the determinant of the matrix with row `row` and column `col` removed.
    pub fn minor(&self, row: usize, col: usize) -> Fraction {
        if self.nrows != self.ncols {
            panic!(
                "Cannot compute a minor of a non-square matrix: ({},{})",
                self.nrows, self.ncols
            );
        }
        self.submatrix(row, col).determinant()
    }

    /// Compute the signed minor.
    pub fn cofactor(&self, row: usize, col: usize) -> Fraction {
        let m = self.minor(row, col);
        if (row + col) % 2 == 0 {
            m
        } else {
            -m
        }
    }

    /// Compute the transpose of the cofactor matrix, such that
    /// `A * adj(A) = det(A) * I`.
    pub fn adjugate(&self) -> Matrix {
        if self.nrows != self.ncols {
            panic!(
                "Cannot compute the adjugate of a non-square matrix: ({},{})",
                self.nrows, self.ncols
            );
        }

        if self.nrows == 1 {
            return Matrix::identity(1);
        }

        let mut m = Matrix::new(self.nrows, self.ncols);
        for r in 0..self.nrows {
            for c in 0..self.ncols {
                m[(c, r)] = self.cofactor(r as usize, c as usize);
            }
        }
        m
    }

    /// Compute the inverse by reducing the matrix augmented with the identity matrix.
    pub fn inverse(&self) -> Result<Matrix, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare);
        }

        if self.determinant().is_zero() {
            return Err(MatrixError::NotInvertible);
        }

        let n = self.nrows;
        let mut augmented = Matrix::new(n, 2 * n);
        for r in 0..n {
            for c in 0..n {
                augmented[(r, c)] = self[(r, c)].clone();
            }
            augmented[(r, n + r)] = Fraction::one();
        }

        let reduced = augmented.reduced();

        let mut left = Matrix::new(n, n);
        let mut right = Matrix::new(n, n);
        for r in 0..n {
            for c in 0..n {
                left[(r, c)] = reduced[(r, c)].clone();
                right[(r, c)] = reduced[(r, n + c)].clone();
            }
        }

        if !left.is_identity() {
            debug!("Reduced matrix does not start with the identity:\n{}", reduced);
            return Err(MatrixError::NotInvertible);
        }

        Ok(right)
    }

    /// Solve `A * x = b` for `x`, where `A` is `self`.
    pub fn solve(&self, b: &Vector) -> Result<Vector, MatrixError> {
        if self.nrows as usize != b.len() {
            return Err(MatrixError::ShapeMismatch);
        }

        let (neqs, nvars) = (self.nrows, self.ncols);

        // create the augmented matrix
        let mut m = Matrix::new(neqs, nvars + 1);
        for r in 0..neqs {
            for c in 0..nvars {
                m[(r, c)] = self[(r, c)].clone();
            }
            m[(r, nvars)] = b[r as usize].clone();
        }

        let reduced = m.reduced();
        let pivots = Matrix::pivots_of_reduced(&reduced);

        if pivots.last() == Some(&(nvars as usize)) {
            return Err(MatrixError::Inconsistent);
        }

        if pivots.len() < nvars as usize {
            return Err(MatrixError::Underdetermined {
                rank: pivots.len(),
                nvars: nvars as usize,
            });
        }

        Ok((0..nvars).map(|i| reduced[(i, nvars)].clone()).collect())
    }
}

forward_binop!(Matrix, Add, add, add_impl);
forward_binop!(Matrix, Sub, sub, sub_impl);
forward_binop!(Matrix, Mul, mul, mul_impl);
forward_assign_op!(Matrix, AddAssign, add_assign, add_impl);
forward_assign_op!(Matrix, SubAssign, sub_assign, sub_impl);
forward_assign_op!(Matrix, MulAssign, mul_assign, mul_impl);

impl<'a> Mul<&'a Vector> for &Matrix {
    type Output = Vector;

    fn mul(self, rhs: &'a Vector) -> Vector {
        self.mul_vector(rhs)
    }
}

impl Mul<Vector> for Matrix {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        self.mul_vector(&rhs)
    }
}

impl Neg for Matrix {
    type Output = Matrix;

    /// Negate each entry of the matrix.
    fn neg(mut self) -> Self::Output {
        for e in &mut self.data {
            *e = -&*e;
        }

        self
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

impl Index<u32> for Matrix {
    type Output = [Fraction];

    /// Get the `i`th row of the matrix.
    #[inline]
    fn index(&self, index: u32) -> &Self::Output {
        &self.data[(index * self.ncols) as usize..((index + 1) * self.ncols) as usize]
    }
}

impl Index<(u32, u32)> for Matrix {
    type Output = Fraction;

    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index(&self, index: (u32, u32)) -> &Self::Output {
        &self.data[(index.0 * self.ncols + index.1) as usize]
    }
}

impl IndexMut<(u32, u32)> for Matrix {
    #[inline]
    fn index_mut(&mut self, index: (u32, u32)) -> &mut Fraction {
        &mut self.data[(index.0 * self.ncols + index.1) as usize]
    }
}

impl Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        MatrixPrinter::new(self).fmt(f)
    }
}

impl FromStr for Matrix {
    type Err = String;

    /// Parse a matrix of the form `[[1, 2], [3/4, -5]]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or_else(|| format!("Matrix must be enclosed in brackets: {}", s))?;

        let mut rows = vec![];
        let mut rest = inner.trim();
        while !rest.is_empty() {
            let end = rest
                .find(']')
                .ok_or_else(|| format!("Unterminated row in matrix: {}", s))?;
            rows.push(rest[..=end].parse::<Vector>()?);

            rest = rest[end + 1..].trim_start();
            if let Some(r) = rest.strip_prefix(',') {
                rest = r.trim_start();
            }
        }

        Matrix::from_rows(&rows).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod test {
    use crate::{
        domains::rational::Fraction,
        tensors::matrix::{Matrix, MatrixError, Vector},
    };

    fn m(s: &str) -> Matrix {
        s.parse().unwrap()
    }

    #[test]
    fn basics() {
        let a = Matrix::from_nested_vec(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();

        assert_eq!(a.transposed(), m("[[1, 4], [2, 5], [3, 6]]"));
        assert_eq!(-a.clone(), m("[[-1, -2, -3], [-4, -5, -6]]"));
        assert!((&a - &a).is_zero());
        assert_eq!(a.size(), (3, 2));

        let b = Matrix::from_nested_vec(vec![vec![7, 8], vec![9, 10], vec![11, 12]]).unwrap();
        let c = &a * &b;

        assert_eq!(c, m("[[58, 64], [139, 154]]"));
        assert_eq!(&c[1], &[Fraction::from(139), Fraction::from(154)]);
        assert_eq!(c[(0, 1)], 64);
        assert_eq!(c.trace(), 212);

        let mut d = a.clone();
        d += &a;
        assert_eq!(d, a.mul_scalar(&Fraction::from(2)));

        assert_eq!(&a * &Vector::new(vec![1, 1, 1]), Vector::new(vec![6, 15]));
        assert_eq!(m("[[1, 1], [0, 1]]").pow(5), m("[[1, 5], [0, 1]]"));

        assert_eq!(
            Matrix::from_nested_vec(vec![vec![1, 2], vec![3]]),
            Err(MatrixError::NotRectangular)
        );
    }

    #[test]
    fn empty() {
        let e = Matrix::empty();
        assert_eq!(e.size(), (0, 0));
        assert!(!e.is_square());
        assert_eq!(m("[]"), e);
        assert_eq!(e.inverse(), Err(MatrixError::NotSquare));

        // no columns means no rows
        assert_eq!(Matrix::new(3, 0), e);
        assert_eq!(Matrix::new(0, 2), e);
        assert_eq!(Matrix::from_nested_vec(vec![Vec::<i64>::new(), vec![]]), Ok(e.clone()));
        assert_eq!(Matrix::from_linear(vec![], 4, 0), Ok(e.clone()));
        assert_eq!(Vector::default().into_column(), e);
        assert_eq!(Matrix::identity(1).submatrix(0, 0), e);
        assert_eq!(e.to_string(), "[]");
    }

    #[test]
    #[should_panic(expected = "Cannot multiply matrices because of a dimension mismatch")]
    fn mul_mismatch() {
        let a = m("[[1, 2, 3], [4, 5, 6]]");
        let _ = &a * &a;
    }

    #[test]
    fn predicates() {
        assert!(Matrix::identity(3).is_identity());
        assert!(Matrix::eye(&[Fraction::from(2), Fraction::from(3)]).is_diagonal());
        assert!(m("[[1, 2], [2, 1]]").is_symmetric());
        assert!(!m("[[1, 2], [3, 1]]").is_symmetric());
    }

    #[test]
    fn row_reduce() {
        let a = m("[[1, 2, 3], [4, 5, 6], [7, 8, 9]]");
        let r = a.reduced();
        assert_eq!(r, m("[[1, 0, -1], [0, 1, 2], [0, 0, 0]]"));
        assert_eq!(a.rank(), 2);
        assert_eq!(a.nullity(), 1);
        assert_eq!(r.reduced(), r);

        // pivots found out of order are sorted by column
        let b = m("[[0, 1, 2], [1, 0, 3]]");
        assert_eq!(b.reduced(), m("[[1, 0, 3], [0, 1, 2]]"));
        assert_eq!(b.pivot_columns(), vec![0, 1]);

        let c = m("[[0, 0, 1], [0, 2, 4], [0, 0, 0]]");
        assert_eq!(c.reduced(), m("[[0, 1, 0], [0, 0, 1], [0, 0, 0]]"));
    }

    #[test]
    fn determinant() {
        assert_eq!(m("[[5]]").determinant(), 5);
        assert_eq!(m("[[1, 2], [3, 4]]").determinant(), -2);
        assert_eq!(m("[[1, 2, 3], [4, 5, 16], [7, 8, 9]]").determinant(), 60);
        assert_eq!(
            m("[[0, 0, 1, 1], [0, 1, 1, 0], [1, 1, 1, 0]]").determinant(),
            -1
        );
        assert_eq!(
            m("[[2, 0, 0, 1], [0, 1, 0, 0], [1, 0, 3, 0], [0, 0, 0, 4]]").determinant(),
            24
        );

        let a = m("[[1, 2, 3], [0, 4, 5], [1, 0, 6]]");
        assert_eq!(a.minor(0, 0), 24);
        assert_eq!(a.cofactor(0, 1), 5);
        assert_eq!(
            &a * &a.adjugate(),
            Matrix::identity(3).mul_scalar(&a.determinant())
        );
    }

    #[test]
    #[should_panic(expected = "more rows than columns")]
    fn tall_determinant() {
        m("[[1], [2]]").determinant();
    }

    #[test]
    fn inverse() {
        let a = m("[[1, 2, 3], [4, 5, 16], [7, 8, 9]]");
        assert_eq!(
            a.inverse().unwrap(),
            m("[[-83/60, 1/10, 17/60], [19/15, -1/5, -1/15], [-1/20, 1/10, -1/20]]")
        );
        assert!((&a * &a.inverse().unwrap()).is_identity());

        assert_eq!(
            m("[[1, 2], [2, 4]]").inverse(),
            Err(MatrixError::NotInvertible)
        );
        assert_eq!(m("[[1, 2, 3]]").inverse(), Err(MatrixError::NotSquare));
    }

    #[test]
    fn solve() {
        let a = m("[[1, 2, 3], [4, 5, 16], [7, 8, 9]]");
        let b = Vector::new(vec![1, 2, 3]);
        assert_eq!(
            a.solve(&b).unwrap(),
            Vector::new(vec![Fraction::from((-1, 3)), Fraction::from((2, 3)), 0.into()])
        );

        let singular = m("[[1, 1], [1, 1]]");
        assert_eq!(
            singular.solve(&Vector::new(vec![1, 2])),
            Err(MatrixError::Inconsistent)
        );
        assert_eq!(
            singular.solve(&Vector::new(vec![1, 1])),
            Err(MatrixError::Underdetermined { rank: 1, nvars: 2 })
        );
        assert_eq!(
            singular.solve(&Vector::new(vec![1])),
            Err(MatrixError::ShapeMismatch)
        );

        // overdetermined but consistent
        let tall = m("[[1, 0], [0, 1], [1, 1]]");
        assert_eq!(
            tall.solve(&Vector::new(vec![2, 3, 5])).unwrap(),
            Vector::new(vec![2, 3])
        );
    }

    #[test]
    fn vectors() {
        let a: Vector = "[1, 2/3, -4]".parse().unwrap();
        let b = Vector::new(vec![1, 0, 1]);

        assert_eq!(a.dot(&b), -3);
        assert_eq!(
            Vector::new(vec![1, 0, 0]).cross_product(&Vector::new(vec![0, 1, 0])),
            Vector::new(vec![0, 0, 1])
        );
        assert_eq!(a.simplified(), Vector::new(vec![3, 2, -12]));
        assert_eq!(
            Vector::new(vec![Fraction::from((-1, 2)), Fraction::from((1, 4))]).simplified(),
            Vector::new(vec![2, -1])
        );
        assert_eq!(&a + &b, "[2, 2/3, -3]".parse().unwrap());
        assert_eq!(Vector::new(vec![3, 4]).normalized(), "[3/5, 4/5]".parse().unwrap());
        assert!("[1, x]".parse::<Vector>().is_err());
    }

    #[test]
    fn orthogonalize() {
        let system = [
            Vector::new(vec![1, 1, 0]),
            Vector::new(vec![1, 0, 1]),
            Vector::new(vec![0, 1, 1]),
        ];

        let o = Vector::orthogonalize(&system);
        assert_eq!(o[1], "[1/2, -1/2, 1]".parse().unwrap());
        for i in 0..3 {
            for j in 0..i {
                assert!(o[i].dot(&o[j]).is_zero());
            }
        }
    }
}
