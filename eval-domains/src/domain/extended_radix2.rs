//! Radix-2 domain of size `2^(k+1)`: the `2^k`-th roots of unity together
//! with a multiplicative coset of them. Covers one power of two more than
//! the field's two-adicity allows for a plain subgroup.

use ark_ff::FftField;
use ark_std::{cfg_iter_mut, log2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::basic_radix2::radix2_lagrange_coefficients;
use crate::domain::EvaluationDomain;
use crate::error::DomainError;
use crate::utils::serial_radix2_fft;

/// Union of a `2^k`-point subgroup and the coset `shift * subgroup`.
///
/// Enumeration order is the subgroup first, then the coset, each in
/// root-power order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtendedRadix2Domain<F: FftField> {
    size: u64,
    small_size: u64,
    log_small: u32,
    size_inv: F,
    small_size_inv: F,
    omega: F,
    omega_inv: F,
    shift: F,
    shift_inv: F,
    shift_to_small: F,
    // (small_size * (1 - shift^small_size))^{-1}, the fold-system constant
    // of the inverse transform.
    recombine_const: F,
    // (shift^small_size - 1)^{-1}, shared by the Lagrange split.
    coset_diff_inv: F,
}

impl<F: FftField> ExtendedRadix2Domain<F> {
    /// Whether `num_points` is `2^(k+1)` for a `2^k`-point subgroup the
    /// field supports.
    pub fn valid_for_size(num_points: usize) -> bool {
        num_points >= 2
            && num_points.is_power_of_two()
            && log2(num_points / 2) <= F::TWO_ADICITY
    }

    /// Builds the domain, or `None` when `valid_for_size` is false.
    pub fn new(num_points: usize) -> Option<Self> {
        if !Self::valid_for_size(num_points) {
            return None;
        }
        let small_size = (num_points / 2) as u64;
        let omega = F::get_root_of_unity(small_size)?;
        let shift = F::GENERATOR.square();
        let shift_to_small = shift.pow([small_size]);
        Some(Self {
            size: num_points as u64,
            small_size,
            log_small: log2(num_points / 2),
            size_inv: F::from(num_points as u64).inverse()?,
            small_size_inv: F::from(small_size).inverse()?,
            omega,
            omega_inv: omega.inverse()?,
            shift,
            shift_inv: shift.inverse()?,
            shift_to_small,
            recombine_const: (F::from(small_size) * (F::one() - shift_to_small)).inverse()?,
            coset_diff_inv: (shift_to_small - F::one()).inverse()?,
        })
    }

    /// The coset shift separating the two halves.
    pub fn shift(&self) -> F {
        self.shift
    }

    fn small_size(&self) -> usize {
        self.small_size as usize
    }
}

impl<F: FftField> EvaluationDomain<F> for ExtendedRadix2Domain<F> {
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
        let n = self.small_size();
        Ok(if index < n {
            self.omega.pow([index as u64])
        } else {
            self.shift * self.omega.pow([(index - n) as u64])
        })
    }

    fn elements(&self) -> Vec<F> {
        let n = self.small_size();
        let mut points = Vec::with_capacity(2 * n);
        let mut cur = F::one();
        for _ in 0..n {
            points.push(cur);
            cur *= self.omega;
        }
        cur = self.shift;
        for _ in 0..n {
            points.push(cur);
            cur *= self.omega;
        }
        points
    }

    fn fft(&self, coeffs: &[F]) -> Vec<F> {
        let n = self.small_size();
        let mut padded = coeffs.to_vec();
        padded.resize(self.size(), F::zero());

        // Fold into p mod (x^n - 1) and p(shift * x) mod (x^n - 1), then
        // transform each over the small subgroup.
        let mut subgroup_part = vec![F::zero(); n];
        let mut coset_part = vec![F::zero(); n];
        let mut shift_i = F::one();
        for i in 0..n {
            subgroup_part[i] = padded[i] + padded[i + n];
            coset_part[i] = shift_i * (padded[i] + self.shift_to_small * padded[i + n]);
            shift_i *= self.shift;
        }
        serial_radix2_fft(&mut subgroup_part, self.omega, self.log_small);
        serial_radix2_fft(&mut coset_part, self.omega, self.log_small);

        padded[..n].copy_from_slice(&subgroup_part);
        padded[n..].copy_from_slice(&coset_part);
        padded
    }

    fn ifft(&self, evals: &[F]) -> Result<Vec<F>, DomainError> {
        if evals.len() != self.size() {
            return Err(DomainError::LengthMismatch {
                expected: self.size(),
                got: evals.len(),
            });
        }
        let n = self.small_size();
        let mut subgroup_part = evals[..n].to_vec();
        let mut coset_part = evals[n..].to_vec();

        // Unscaled inverse transforms: these recover n * (p mod (x^n - 1))
        // and n * (p(shift * x) mod (x^n - 1)).
        serial_radix2_fft(&mut subgroup_part, self.omega_inv, self.log_small);
        serial_radix2_fft(&mut coset_part, self.omega_inv, self.log_small);

        // Solve the fold system coefficient by coefficient.
        let mut result = vec![F::zero(); 2 * n];
        let mut shift_inv_i = F::one();
        for i in 0..n {
            result[i] = self.recombine_const
                * (shift_inv_i * coset_part[i] - self.shift_to_small * subgroup_part[i]);
            result[i + n] = self.recombine_const * (subgroup_part[i] - shift_inv_i * coset_part[i]);
            shift_inv_i *= self.shift_inv;
        }
        Ok(result)
    }

    fn evaluate_all_lagrange_coefficients(&self, tau: F) -> Vec<F> {
        let n = self.small_size();
        let inner_subgroup =
            radix2_lagrange_coefficients(n, self.omega, self.small_size_inv, tau);
        let inner_coset =
            radix2_lagrange_coefficients(n, self.omega, self.small_size_inv, tau * self.shift_inv);

        // Z factors across the halves: for a subgroup point the coset half
        // contributes (tau^n - shift^n) / (1 - shift^n), and symmetrically.
        let t_to_small = tau.pow([self.small_size]);
        let subgroup_coeff = (self.shift_to_small - t_to_small) * self.coset_diff_inv;
        let coset_coeff = (t_to_small - F::one()) * self.coset_diff_inv;

        let mut coefficients = vec![F::zero(); 2 * n];
        for i in 0..n {
            coefficients[i] = inner_subgroup[i] * subgroup_coeff;
            coefficients[i + n] = inner_coset[i] * coset_coeff;
        }
        coefficients
    }

    fn vanishing_polynomial(&self) -> Vec<F> {
        // Z(x) = (x^n - 1)(x^n - shift^n).
        let n = self.small_size();
        let mut z = vec![F::zero(); 2 * n + 1];
        z[0] = self.shift_to_small;
        z[n] = -(self.shift_to_small + F::one());
        z[2 * n] = F::one();
        z
    }

    fn evaluate_vanishing_polynomial(&self, tau: F) -> F {
        let t_to_small = tau.pow([self.small_size]);
        (t_to_small - F::one()) * (t_to_small - self.shift_to_small)
    }

    fn add_vanishing_polynomial(&self, coeff: F, poly: &mut Vec<F>) {
        let n = self.small_size();
        if poly.len() < 2 * n + 1 {
            poly.resize(2 * n + 1, F::zero());
        }
        poly[0] += coeff * self.shift_to_small;
        poly[n] -= coeff * (self.shift_to_small + F::one());
        poly[2 * n] += coeff;
    }

    fn divide_by_vanishing_poly_on_coset(&self, evals: &mut [F]) -> Result<(), DomainError> {
        if evals.len() != self.size() {
            return Err(DomainError::LengthMismatch {
                expected: self.size(),
                got: evals.len(),
            });
        }
        // Z is constant on each half of the evaluation coset g * domain.
        let n = self.small_size();
        let z_subgroup = self.evaluate_vanishing_polynomial(F::GENERATOR);
        let z_coset = self.evaluate_vanishing_polynomial(F::GENERATOR * self.shift);
        let z_subgroup_inv = z_subgroup
            .inverse()
            .ok_or(DomainError::Degenerate { err: "vanishing polynomial is zero on the coset" })?;
        let z_coset_inv = z_coset
            .inverse()
            .ok_or(DomainError::Degenerate { err: "vanishing polynomial is zero on the coset" })?;
        let (subgroup_part, coset_part) = evals.split_at_mut(n);
        cfg_iter_mut!(subgroup_part).for_each(|e| *e *= z_subgroup_inv);
        cfg_iter_mut!(coset_part).for_each(|e| *e *= z_coset_inv);
        Ok(())
    }
}
