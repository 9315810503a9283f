//! Univariate polynomials with fraction coefficients.

pub mod factor;
pub mod resultant;
pub mod univariate;
