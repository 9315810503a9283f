//! Vectors, matrices and linear algebra over the rationals.

pub mod eigen;
pub mod matrix;
pub mod subspace;
pub mod transformation;
