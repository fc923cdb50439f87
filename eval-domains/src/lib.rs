//! Evaluation domains for FFT-based polynomial arithmetic over
//! FFT-friendly finite fields.
//!
//! Given a minimum number of evaluation points, [`get_evaluation_domain`]
//! picks the cheapest domain structure the field supports: a radix-2
//! multiplicative subgroup, a subgroup extended by a coset, a union of two
//! radix-2 pieces of different sizes, or (for fields with small two-adicity)
//! a geometric or arithmetic progression of points. Every domain implements
//! the [`EvaluationDomain`] contract: forward/inverse transforms between
//! coefficient and evaluation form, Lagrange coefficients at arbitrary
//! points, and vanishing-polynomial arithmetic.

pub mod domain;
pub mod error;
pub mod utils;

pub use domain::{
    arithmetic::ArithmeticSequenceDomain, basic_radix2::BasicRadix2Domain,
    extended_radix2::ExtendedRadix2Domain, general::get_evaluation_domain,
    general::GeneralEvaluationDomain, geometric::GeometricSequenceDomain,
    step_radix2::StepRadix2Domain, EvaluationDomain,
};
pub use error::DomainError;
