//! Fracalg is an exact linear algebra and polynomial library over the rationals.
//!
//! All arithmetic is performed on [Fraction](domains::rational::Fraction)s of
//! arbitrary-precision decimal integers, so that row reduction, determinants
//! and polynomial division never suffer from rounding. Operations that need a
//! square root or a transcendental function go through a double-precision bridge
//! and report the result as [Precision::Approximate](domains::float::Precision).
//!
//! For example:
//!
//! ```
//! use fracalg::{poly::univariate::Polynomial, tensors::matrix::Matrix};
//!
//! let m = Matrix::from_nested_vec(vec![vec![0, 0, 1, 1], vec![0, 1, 1, 0], vec![1, 1, 1, 0]]).unwrap();
//! assert_eq!(m.determinant(), -1);
//!
//! let p = Polynomial::from_coefficients(vec![1, 2, 1]);
//! assert_eq!(p.roots(), Some(vec![(-1).into()]));
//! ```
//!
//! The library emits diagnostics through [tracing](https://docs.rs/tracing), but
//! never installs a subscriber itself.

pub mod domains;
pub mod geometry;
pub mod poly;
pub mod printer;
pub mod tensors;
pub mod utils;
