//! Domain of size `2^k + 2^r` (`r < k`): a `2^k`-point subgroup joined with
//! a coset of a `2^r`-point subgroup. Lets the selector cover sizes between
//! consecutive powers of two without paying for the next full power.

use ark_ff::{batch_inversion, FftField};
use ark_std::{cfg_iter_mut, log2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::basic_radix2::radix2_lagrange_coefficients;
use crate::domain::EvaluationDomain;
use crate::error::DomainError;
use crate::utils::serial_radix2_fft;

/// Union of the `2^k`-th roots of unity and `omega * <omega_small>`, where
/// `omega` has order `2^(k+1)` and `omega_small` order `2^r`.
///
/// Enumeration order is the big subgroup first, then the small coset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepRadix2Domain<F: FftField> {
    size: u64,
    big_size: u64,
    small_size: u64,
    log_big: u32,
    log_small: u32,
    size_inv: F,
    big_size_inv: F,
    small_size_inv: F,
    omega: F,
    omega_inv: F,
    big_omega: F,
    big_omega_inv: F,
    small_omega: F,
    small_omega_inv: F,
    omega_to_small: F,
    omega_to_big: F,
    // (omega^big_size - 1)^{-1}, the constant relating the coset
    // evaluations of the quotient against x^big - 1.
    quotient_const: F,
}

impl<F: FftField> StepRadix2Domain<F> {
    fn split(num_points: usize) -> Option<(usize, usize)> {
        if num_points < 2 {
            return None;
        }
        let big = 1usize << (log2(num_points) - 1);
        let small = num_points - big;
        (small >= 1 && small < big && small.is_power_of_two()).then_some((big, small))
    }

    /// Whether `num_points` splits as `2^k + 2^r` with `r < k` and the
    /// field supports a root of unity of order `2^(k+1)`.
    pub fn valid_for_size(num_points: usize) -> bool {
        match Self::split(num_points) {
            Some((big, _)) => log2(big) + 1 <= F::TWO_ADICITY,
            None => false,
        }
    }

    /// Builds the domain, or `None` when `valid_for_size` is false.
    pub fn new(num_points: usize) -> Option<Self> {
        if !Self::valid_for_size(num_points) {
            return None;
        }
        let (big, small) = Self::split(num_points)?;
        let omega = F::get_root_of_unity(2 * big as u64)?;
        let big_omega = omega.square();
        let small_omega = F::get_root_of_unity(small as u64)?;
        let omega_to_big = omega.pow([big as u64]);
        Some(Self {
            size: num_points as u64,
            big_size: big as u64,
            small_size: small as u64,
            log_big: log2(big),
            log_small: log2(small),
            size_inv: F::from(num_points as u64).inverse()?,
            big_size_inv: F::from(big as u64).inverse()?,
            small_size_inv: F::from(small as u64).inverse()?,
            omega,
            omega_inv: omega.inverse()?,
            big_omega,
            big_omega_inv: big_omega.inverse()?,
            small_omega,
            small_omega_inv: small_omega.inverse()?,
            omega_to_small: omega.pow([small as u64]),
            omega_to_big,
            quotient_const: (omega_to_big - F::one()).inverse()?,
        })
    }

    fn big_size(&self) -> usize {
        self.big_size as usize
    }

    fn small_size(&self) -> usize {
        self.small_size as usize
    }
}

impl<F: FftField> EvaluationDomain<F> for StepRadix2Domain<F> {
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
        let big = self.big_size();
        Ok(if index < big {
            self.big_omega.pow([index as u64])
        } else {
            self.omega * self.small_omega.pow([(index - big) as u64])
        })
    }

    fn elements(&self) -> Vec<F> {
        let mut points = Vec::with_capacity(self.size());
        let mut cur = F::one();
        for _ in 0..self.big_size() {
            points.push(cur);
            cur *= self.big_omega;
        }
        cur = self.omega;
        for _ in 0..self.small_size() {
            points.push(cur);
            cur *= self.small_omega;
        }
        points
    }

    fn fft(&self, coeffs: &[F]) -> Vec<F> {
        let big = self.big_size();
        let small = self.small_size();
        let mut padded = coeffs.to_vec();
        padded.resize(self.size(), F::zero());

        // Fold into p mod (x^big - 1) for the subgroup, and the coefficients
        // of p(omega * x) mod (x^big - omega^big) for the coset half.
        let mut big_part = vec![F::zero(); big];
        let mut coset_fold = vec![F::zero(); big];
        let mut omega_i = F::one();
        for i in 0..big {
            if i < small {
                big_part[i] = padded[i] + padded[i + big];
                coset_fold[i] = omega_i * (padded[i] + self.omega_to_big * padded[i + big]);
            } else {
                big_part[i] = padded[i];
                coset_fold[i] = omega_i * padded[i];
            }
            omega_i *= self.omega;
        }

        // Collapse the coset fold once more, to the small subgroup's size.
        let mut small_part = vec![F::zero(); small];
        for (i, value) in coset_fold.into_iter().enumerate() {
            small_part[i % small] += value;
        }

        serial_radix2_fft(&mut big_part, self.big_omega, self.log_big);
        serial_radix2_fft(&mut small_part, self.small_omega, self.log_small);

        padded[..big].copy_from_slice(&big_part);
        padded[big..].copy_from_slice(&small_part);
        padded
    }

    fn ifft(&self, evals: &[F]) -> Result<Vec<F>, DomainError> {
        if evals.len() != self.size() {
            return Err(DomainError::LengthMismatch {
                expected: self.size(),
                got: evals.len(),
            });
        }
        let big = self.big_size();
        let small = self.small_size();

        // Write p = q(x) * (x^big - 1) + r(x). The big half recovers r;
        // the small half sees p(omega * y) with y^big = 1, so subtracting
        // r(omega * y) leaves q scaled by the constant omega^big - 1.
        let mut remainder = evals[..big].to_vec();
        serial_radix2_fft(&mut remainder, self.big_omega_inv, self.log_big);
        let big_size_inv = self.big_size_inv;
        cfg_iter_mut!(remainder).for_each(|e| *e *= big_size_inv);

        let mut small_coeffs = evals[big..].to_vec();
        serial_radix2_fft(&mut small_coeffs, self.small_omega_inv, self.log_small);
        let small_size_inv = self.small_size_inv;
        cfg_iter_mut!(small_coeffs).for_each(|e| *e *= small_size_inv);

        // Fold the coefficients of r(omega * x) down to the small size and
        // remove them from the coset half.
        let mut shifted_remainder_fold = vec![F::zero(); small];
        let mut omega_i = F::one();
        for (i, &r_i) in remainder.iter().enumerate() {
            shifted_remainder_fold[i % small] += r_i * omega_i;
            omega_i *= self.omega;
        }
        let mut quotient = vec![F::zero(); small];
        let mut omega_inv_i = F::one();
        for i in 0..small {
            quotient[i] = (small_coeffs[i] - shifted_remainder_fold[i])
                * omega_inv_i
                * self.quotient_const;
            omega_inv_i *= self.omega_inv;
        }

        // p = r + q * (x^big - 1).
        let mut result = vec![F::zero(); self.size()];
        for i in 0..big {
            result[i] = remainder[i];
        }
        for i in 0..small {
            result[i] -= quotient[i];
            result[big + i] = quotient[i];
        }
        Ok(result)
    }

    fn evaluate_all_lagrange_coefficients(&self, tau: F) -> Vec<F> {
        let big = self.big_size();
        let small = self.small_size();
        let inner_big =
            radix2_lagrange_coefficients(big, self.big_omega, self.big_size_inv, tau);
        let inner_small = radix2_lagrange_coefficients(
            small,
            self.small_omega,
            self.small_size_inv,
            tau * self.omega_inv,
        );

        // Cross factors from the product structure of Z.
        let t_to_small = tau.pow([self.small_size]);
        let small_vanish_at_tau = t_to_small - self.omega_to_small;
        let big_omega_to_small = self.big_omega.pow([self.small_size]);
        let mut denominators = Vec::with_capacity(big);
        let mut elt = F::one();
        for _ in 0..big {
            denominators.push(elt - self.omega_to_small);
            elt *= big_omega_to_small;
        }
        batch_inversion(&mut denominators);

        let big_vanish_coeff = (tau.pow([self.big_size]) - F::one()) * self.quotient_const;

        let mut coefficients = vec![F::zero(); self.size()];
        for i in 0..big {
            coefficients[i] = inner_big[i] * small_vanish_at_tau * denominators[i];
        }
        for i in 0..small {
            coefficients[big + i] = inner_small[i] * big_vanish_coeff;
        }
        coefficients
    }

    fn vanishing_polynomial(&self) -> Vec<F> {
        // Z(x) = (x^big - 1)(x^small - omega^small).
        let big = self.big_size();
        let small = self.small_size();
        let mut z = vec![F::zero(); big + small + 1];
        z[0] = self.omega_to_small;
        z[small] = -F::one();
        z[big] = -self.omega_to_small;
        z[big + small] = F::one();
        z
    }

    fn evaluate_vanishing_polynomial(&self, tau: F) -> F {
        (tau.pow([self.big_size]) - F::one()) * (tau.pow([self.small_size]) - self.omega_to_small)
    }

    fn add_vanishing_polynomial(&self, coeff: F, poly: &mut Vec<F>) {
        let big = self.big_size();
        let small = self.small_size();
        if poly.len() < big + small + 1 {
            poly.resize(big + small + 1, F::zero());
        }
        poly[0] += coeff * self.omega_to_small;
        poly[small] -= coeff;
        poly[big] -= coeff * self.omega_to_small;
        poly[big + small] += coeff;
    }

    fn divide_by_vanishing_poly_on_coset(&self, evals: &mut [F]) -> Result<(), DomainError> {
        if evals.len() != self.size() {
            return Err(DomainError::LengthMismatch {
                expected: self.size(),
                got: evals.len(),
            });
        }
        let big = self.big_size();
        let small = self.small_size();
        let g = F::GENERATOR;

        // Over the big half of the coset g * domain, the (x^big - 1) factor
        // is the constant g^big - 1 while the small factor still varies.
        let big_factor = g.pow([self.big_size]) - F::one();
        let g_to_small_scaled = g.pow([self.small_size]) * big_factor;
        let omega_to_small_scaled = self.omega_to_small * big_factor;
        let big_omega_to_small = self.big_omega.pow([self.small_size]);
        let mut divisors = Vec::with_capacity(big + 1);
        let mut elt = F::one();
        for _ in 0..big {
            divisors.push(g_to_small_scaled * elt - omega_to_small_scaled);
            elt *= big_omega_to_small;
        }

        // The small half of the coset sees both factors as constants.
        let g_omega = g * self.omega;
        divisors.push(
            (g_omega.pow([self.big_size]) - F::one())
                * (g_omega.pow([self.small_size]) - self.omega_to_small),
        );

        if divisors.iter().any(|d| d.is_zero()) {
            return Err(DomainError::Degenerate {
                err: "vanishing polynomial is zero on the coset",
            });
        }
        batch_inversion(&mut divisors);
        let small_divisor_inv = divisors[big];
        for i in 0..big {
            evals[i] *= divisors[i];
        }
        let coset_half = &mut evals[big..];
        cfg_iter_mut!(coset_half).for_each(|e| *e *= small_divisor_inv);
        Ok(())
    }
}
