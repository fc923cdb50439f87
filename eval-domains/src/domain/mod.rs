//! The evaluation-domain contract and its five implementations.
//!
//! A domain is a fixed set of `m` field points together with `O(m log m)`
//! (or, for the sequence variants, up to `O(m^2)`) algorithms mapping a
//! polynomial of degree `< m` between coefficient form and its evaluations
//! at those points. Each variant exposes a `valid_for_size` predicate that
//! is checked *before* construction; once the predicate holds, `new` cannot
//! fail for that size.

use ark_ff::FftField;
use ark_std::rand::Rng;

use crate::error::DomainError;

pub mod arithmetic;
pub mod basic_radix2;
pub mod extended_radix2;
pub mod general;
pub mod geometric;
pub mod step_radix2;

#[cfg(test)]
pub mod tests;

/// Capability set every domain variant implements.
///
/// Enumeration order is fixed per variant: `element(i)`, `elements()`,
/// `fft` output, `ifft` input, Lagrange coefficients and coset divisors all
/// index the same ordering of the point set.
pub trait EvaluationDomain<F: FftField>: Clone {
    /// Number of points in the domain, fixed at construction.
    fn size(&self) -> usize;

    /// The domain size as a field element.
    fn size_as_field_element(&self) -> F {
        F::from(self.size() as u64)
    }

    /// Inverse of the domain size in the field.
    fn size_inv(&self) -> F;

    /// The `index`-th point of the domain.
    fn element(&self, index: usize) -> Result<F, DomainError> {
        let points = self.elements();
        points
            .get(index)
            .copied()
            .ok_or(DomainError::IndexOutOfRange { index, size: points.len() })
    }

    /// All domain points, in enumeration order.
    fn elements(&self) -> Vec<F>;

    /// Evaluations at every domain point of the polynomial with the given
    /// coefficients. Inputs shorter than the domain are zero-extended;
    /// longer inputs are not accepted by construction of the callers and
    /// are truncated to the domain size.
    fn fft(&self, coeffs: &[F]) -> Vec<F>;

    /// Coefficients of the unique polynomial of degree below the domain
    /// size with the given evaluations at the domain points.
    fn ifft(&self, evals: &[F]) -> Result<Vec<F>, DomainError>;

    /// Values `L_i(tau)` of every Lagrange basis polynomial at `tau`.
    /// One-hot when `tau` is itself a domain point.
    fn evaluate_all_lagrange_coefficients(&self, tau: F) -> Vec<F>;

    /// Dense coefficients of the monic vanishing polynomial `Z` (degree
    /// equal to the domain size).
    fn vanishing_polynomial(&self) -> Vec<F>;

    /// `Z(tau)`.
    fn evaluate_vanishing_polynomial(&self, tau: F) -> F;

    /// In place, adds `coeff * Z(x)` to `poly`, extending it if needed.
    /// Leaves the values of `poly` on the domain unchanged.
    fn add_vanishing_polynomial(&self, coeff: F, poly: &mut Vec<F>) {
        let z = self.vanishing_polynomial();
        if poly.len() < z.len() {
            poly.resize(z.len(), F::zero());
        }
        for (p, zi) in poly.iter_mut().zip(z) {
            *p += coeff * zi;
        }
    }

    /// In place, divides evaluations taken over the domain's canonical
    /// coset by `Z` at the corresponding coset point.
    fn divide_by_vanishing_poly_on_coset(&self, evals: &mut [F]) -> Result<(), DomainError>;

    /// Rejection-samples a field element that is not a domain point.
    fn sample_element_outside_domain<R: Rng>(&self, rng: &mut R) -> F {
        let mut t = F::rand(rng);
        while self.evaluate_vanishing_polynomial(t).is_zero() {
            t = F::rand(rng);
        }
        t
    }
}
