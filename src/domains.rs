//! Number domains, from arbitrary-precision naturals to rational functions.
//!
//! Every layer is built on the previous one:
//! [Natural](natural::Natural) stores decimal digits, [Integer](integer::Integer)
//! adds a sign and [Fraction](rational::Fraction) is a reduced quotient of integers
//! that also represents the extended values `inf`, `-inf` and `nan`.

pub mod float;
pub mod integer;
pub mod natural;
pub mod rational;
pub mod rational_function;
