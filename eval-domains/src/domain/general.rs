//! Variant dispatch and the domain selector.

use ark_ff::FftField;
use ark_std::log2;
use log::debug;

use crate::domain::arithmetic::ArithmeticSequenceDomain;
use crate::domain::basic_radix2::BasicRadix2Domain;
use crate::domain::extended_radix2::ExtendedRadix2Domain;
use crate::domain::geometric::GeometricSequenceDomain;
use crate::domain::step_radix2::StepRadix2Domain;
use crate::domain::EvaluationDomain;
use crate::error::DomainError;

/// A domain of any of the five supported shapes. The variant set is closed,
/// so dispatch is a `match` rather than a trait object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeneralEvaluationDomain<F: FftField> {
    BasicRadix2(BasicRadix2Domain<F>),
    ExtendedRadix2(ExtendedRadix2Domain<F>),
    StepRadix2(StepRadix2Domain<F>),
    Geometric(GeometricSequenceDomain<F>),
    Arithmetic(ArithmeticSequenceDomain<F>),
}

macro_rules! on_domain {
    ($self:expr, $domain:ident => $action:expr) => {
        match $self {
            GeneralEvaluationDomain::BasicRadix2($domain) => $action,
            GeneralEvaluationDomain::ExtendedRadix2($domain) => $action,
            GeneralEvaluationDomain::StepRadix2($domain) => $action,
            GeneralEvaluationDomain::Geometric($domain) => $action,
            GeneralEvaluationDomain::Arithmetic($domain) => $action,
        }
    };
}

impl<F: FftField> EvaluationDomain<F> for GeneralEvaluationDomain<F> {
    fn size(&self) -> usize {
        on_domain!(self, domain => domain.size())
    }

    fn size_inv(&self) -> F {
        on_domain!(self, domain => domain.size_inv())
    }

    fn element(&self, index: usize) -> Result<F, DomainError> {
        on_domain!(self, domain => domain.element(index))
    }

    fn elements(&self) -> Vec<F> {
        on_domain!(self, domain => domain.elements())
    }

    fn fft(&self, coeffs: &[F]) -> Vec<F> {
        on_domain!(self, domain => domain.fft(coeffs))
    }

    fn ifft(&self, evals: &[F]) -> Result<Vec<F>, DomainError> {
        on_domain!(self, domain => domain.ifft(evals))
    }

    fn evaluate_all_lagrange_coefficients(&self, tau: F) -> Vec<F> {
        on_domain!(self, domain => domain.evaluate_all_lagrange_coefficients(tau))
    }

    fn vanishing_polynomial(&self) -> Vec<F> {
        on_domain!(self, domain => domain.vanishing_polynomial())
    }

    fn evaluate_vanishing_polynomial(&self, tau: F) -> F {
        on_domain!(self, domain => domain.evaluate_vanishing_polynomial(tau))
    }

    fn add_vanishing_polynomial(&self, coeff: F, poly: &mut Vec<F>) {
        on_domain!(self, domain => domain.add_vanishing_polynomial(coeff, poly))
    }

    fn divide_by_vanishing_poly_on_coset(&self, evals: &mut [F]) -> Result<(), DomainError> {
        on_domain!(self, domain => domain.divide_by_vanishing_poly_on_coset(evals))
    }
}

fn try_radix2_family<F: FftField>(num_points: usize) -> Option<GeneralEvaluationDomain<F>> {
    if BasicRadix2Domain::<F>::valid_for_size(num_points) {
        return BasicRadix2Domain::new(num_points).map(GeneralEvaluationDomain::BasicRadix2);
    }
    if ExtendedRadix2Domain::<F>::valid_for_size(num_points) {
        return ExtendedRadix2Domain::new(num_points).map(GeneralEvaluationDomain::ExtendedRadix2);
    }
    if StepRadix2Domain::<F>::valid_for_size(num_points) {
        return StepRadix2Domain::new(num_points).map(GeneralEvaluationDomain::StepRadix2);
    }
    None
}

/// Picks the cheapest domain of at least `min_size` points.
///
/// The radix-2 family is tried first against `min_size` itself, then
/// against the split size `2^(ceil(log2(min_size)) - 1) + 2^ceil(log2(rest))`
/// (never larger than the next power of two above `min_size`), and only
/// then the sequence domains against `min_size`. Applicability is decided
/// by each variant's `valid_for_size` predicate before any construction,
/// so the chosen constructor cannot fail.
pub fn get_evaluation_domain<F: FftField>(
    min_size: usize,
) -> Result<GeneralEvaluationDomain<F>, DomainError> {
    if min_size == 0 {
        return Err(DomainError::UnsupportedSize(0));
    }

    if let Some(domain) = try_radix2_family(min_size) {
        return Ok(domain);
    }

    if min_size > 1 {
        let big = 1usize << (log2(min_size) - 1);
        let rounded_small = (min_size - big).next_power_of_two();
        let split_size = big + rounded_small;
        if split_size != min_size {
            debug!("no radix-2 domain of size {min_size}, retrying with {split_size}");
            if let Some(domain) = try_radix2_family(split_size) {
                return Ok(domain);
            }
        }
    }

    debug!("no radix-2 domain covers {min_size}, falling back to sequence domains");
    if GeometricSequenceDomain::<F>::valid_for_size(min_size) {
        if let Some(domain) = GeometricSequenceDomain::new(min_size) {
            return Ok(GeneralEvaluationDomain::Geometric(domain));
        }
    }
    if ArithmeticSequenceDomain::<F>::valid_for_size(min_size) {
        if let Some(domain) = ArithmeticSequenceDomain::new(min_size) {
            return Ok(GeneralEvaluationDomain::Arithmetic(domain));
        }
    }
    Err(DomainError::UnsupportedSize(min_size))
}
