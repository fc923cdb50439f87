//! Radix-2 domain over the full group of `2^k`-th roots of unity.

use ark_ff::{batch_inversion, FftField};
use ark_std::{cfg_iter_mut, log2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::EvaluationDomain;
use crate::error::DomainError;
use crate::utils::serial_radix2_fft;

/// Multiplicative-subgroup domain of power-of-two size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BasicRadix2Domain<F: FftField> {
    size: u64,
    log_size: u32,
    size_inv: F,
    group_gen: F,
    group_gen_inv: F,
}

impl<F: FftField> BasicRadix2Domain<F> {
    /// Whether the field has a multiplicative subgroup of exactly
    /// `num_points` elements with `num_points` a power of two.
    pub fn valid_for_size(num_points: usize) -> bool {
        num_points >= 1
            && num_points.is_power_of_two()
            && log2(num_points) <= F::TWO_ADICITY
    }

    /// Builds the domain, or `None` when `valid_for_size` is false.
    pub fn new(num_points: usize) -> Option<Self> {
        if !Self::valid_for_size(num_points) {
            return None;
        }
        let size = num_points as u64;
        let group_gen = F::get_root_of_unity(size)?;
        debug_assert_eq!(group_gen.pow([size]), F::one());
        Some(Self {
            size,
            log_size: log2(num_points),
            size_inv: F::from(size).inverse()?,
            group_gen,
            group_gen_inv: group_gen.inverse()?,
        })
    }

    /// Generator of the subgroup the domain is built on.
    pub fn group_gen(&self) -> F {
        self.group_gen
    }

    pub(crate) fn fft_in_place(&self, coeffs: &mut Vec<F>) {
        coeffs.resize(self.size(), F::zero());
        serial_radix2_fft(coeffs, self.group_gen, self.log_size);
    }

    pub(crate) fn ifft_in_place(&self, evals: &mut [F]) {
        serial_radix2_fft(evals, self.group_gen_inv, self.log_size);
        let size_inv = self.size_inv;
        cfg_iter_mut!(evals).for_each(|e| *e *= size_inv);
    }
}

/// `L_i(tau)` over the `size`-point subgroup generated by `group_gen`,
/// via the kernel `L_i(tau) = g^i / n * (tau^n - 1) / (tau - g^i)` with a
/// batched inversion of the `(tau - g^i)` column.
pub(crate) fn radix2_lagrange_coefficients<F: FftField>(
    size: usize,
    group_gen: F,
    size_inv: F,
    tau: F,
) -> Vec<F> {
    let t_size = tau.pow([size as u64]);
    if t_size.is_one() {
        // tau lies in the subgroup itself.
        let mut coefficients = vec![F::zero(); size];
        let mut omega_i = F::one();
        for coefficient in &mut coefficients {
            if omega_i == tau {
                *coefficient = F::one();
                break;
            }
            omega_i *= group_gen;
        }
        coefficients
    } else {
        let mut l = (t_size - F::one()) * size_inv;
        let mut r = F::one();
        let mut denominators = vec![F::zero(); size];
        let mut numerators = vec![F::zero(); size];
        for i in 0..size {
            denominators[i] = tau - r;
            numerators[i] = l;
            l *= group_gen;
            r *= group_gen;
        }
        batch_inversion(&mut denominators);
        cfg_iter_mut!(denominators)
            .zip(numerators)
            .for_each(|(d, n)| *d *= n);
        denominators
    }
}

impl<F: FftField> EvaluationDomain<F> for BasicRadix2Domain<F> {
    fn size(&self) -> usize {
        self.size as usize
    }

    fn size_inv(&self) -> F {
        self.size_inv
    }

    fn element(&self, index: usize) -> Result<F, DomainError> {
        if index >= self.size() {
            return Err(DomainError::IndexOutOfRange { index, size: self.size() });
        }
        Ok(self.group_gen.pow([index as u64]))
    }

    fn elements(&self) -> Vec<F> {
        let mut points = Vec::with_capacity(self.size());
        let mut cur = F::one();
        for _ in 0..self.size() {
            points.push(cur);
            cur *= self.group_gen;
        }
        points
    }

    fn fft(&self, coeffs: &[F]) -> Vec<F> {
        let mut coeffs = coeffs.to_vec();
        self.fft_in_place(&mut coeffs);
        coeffs
    }

    fn ifft(&self, evals: &[F]) -> Result<Vec<F>, DomainError> {
        if evals.len() != self.size() {
            return Err(DomainError::LengthMismatch {
                expected: self.size(),
                got: evals.len(),
            });
        }
        let mut evals = evals.to_vec();
        self.ifft_in_place(&mut evals);
        Ok(evals)
    }

    fn evaluate_all_lagrange_coefficients(&self, tau: F) -> Vec<F> {
        radix2_lagrange_coefficients(self.size(), self.group_gen, self.size_inv, tau)
    }

    fn vanishing_polynomial(&self) -> Vec<F> {
        // Z(x) = x^n - 1.
        let mut z = vec![F::zero(); self.size() + 1];
        z[0] = -F::one();
        z[self.size()] = F::one();
        z
    }

    fn evaluate_vanishing_polynomial(&self, tau: F) -> F {
        tau.pow([self.size]) - F::one()
    }

    fn add_vanishing_polynomial(&self, coeff: F, poly: &mut Vec<F>) {
        if poly.len() < self.size() + 1 {
            poly.resize(self.size() + 1, F::zero());
        }
        poly[0] -= coeff;
        let size = self.size();
        poly[size] += coeff;
    }

    fn divide_by_vanishing_poly_on_coset(&self, evals: &mut [F]) -> Result<(), DomainError> {
        if evals.len() != self.size() {
            return Err(DomainError::LengthMismatch {
                expected: self.size(),
                got: evals.len(),
            });
        }
        // Z is constant on the coset g * <omega>: Z(g w^i) = g^n - 1.
        let z_at_coset = self.evaluate_vanishing_polynomial(F::GENERATOR);
        let z_inv = z_at_coset
            .inverse()
            .ok_or(DomainError::Degenerate { err: "vanishing polynomial is zero on the coset" })?;
        cfg_iter_mut!(evals).for_each(|e| *e *= z_inv);
        Ok(())
    }
}
