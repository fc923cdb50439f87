//! Domain over a geometric progression `1, q, q^2, ...` with `q` the
//! field's multiplicative generator. Applicable for any size the generator's
//! order can accommodate, so it backs sizes the radix-2 family cannot reach
//! on fields with small two-adicity.
//!
//! Transforms go through the Newton basis of the progression: both basis
//! changes and the Newton/evaluation step are truncated products against
//! power series built from the q-factorials `[i]! = prod (q^l - 1)`, which
//! keeps the transform at one radix-2 product per step when the field
//! allows it (and a schoolbook product otherwise).

use ark_ff::{batch_inversion, FftField};
use ark_std::cfg_iter_mut;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::EvaluationDomain;
use crate::error::DomainError;
use crate::utils::{characteristic_exceeds, truncated_product, vanishing_polynomial_from_roots};

/// Geometric-progression domain `{q^i : 0 <= i < m}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeometricSequenceDomain<F: FftField> {
    size: u64,
    size_inv: F,
    ratio: F,
    /// `q^i` for every index.
    sequence: Vec<F>,
    /// Triangular powers `q^(i(i-1)/2)`.
    triangular: Vec<F>,
    triangular_inv: Vec<F>,
    /// q-factorials `[i]! = prod_{l=1}^{i} (q^l - 1)`.
    qfactorial: Vec<F>,
    qfactorial_inv: Vec<F>,
    /// `q^(1-m)`, used by the Lagrange weight recurrence.
    last_point_inv: F,
}

impl<F: FftField> GeometricSequenceDomain<F> {
    /// Whether the generator's order covers `num_points` distinct points
    /// plus a disjoint multiplicative coset of them (`2m <= p - 1`).
    pub fn valid_for_size(num_points: usize) -> bool {
        num_points >= 1
            && (num_points as u64).checked_mul(2).is_some_and(characteristic_exceeds::<F>)
    }

    /// Builds the domain, or `None` when `valid_for_size` is false.
    pub fn new(num_points: usize) -> Option<Self> {
        if !Self::valid_for_size(num_points) {
            return None;
        }
        let ratio = F::GENERATOR;

        let mut sequence = Vec::with_capacity(num_points);
        let mut triangular = Vec::with_capacity(num_points);
        let mut qfactorial = Vec::with_capacity(num_points);
        sequence.push(F::one());
        triangular.push(F::one());
        qfactorial.push(F::one());
        for i in 1..num_points {
            let point = sequence[i - 1] * ratio;
            triangular.push(triangular[i - 1] * sequence[i - 1]);
            qfactorial.push(qfactorial[i - 1] * (point - F::one()));
            sequence.push(point);
        }

        let mut triangular_inv = triangular.clone();
        batch_inversion(&mut triangular_inv);
        let mut qfactorial_inv = qfactorial.clone();
        batch_inversion(&mut qfactorial_inv);

        Some(Self {
            size: num_points as u64,
            size_inv: F::from(num_points as u64).inverse()?,
            ratio,
            last_point_inv: sequence[num_points - 1].inverse()?,
            sequence,
            triangular,
            triangular_inv,
            qfactorial,
            qfactorial_inv,
        })
    }

    /// The progression's common ratio.
    pub fn ratio(&self) -> F {
        self.ratio
    }

    /// Alternating series `(-1)^d q^(d(d-1)/2) / [d]!`, the reciprocal of
    /// the `1/[d]!` series; convolving with it inverts the Newton step.
    fn signed_series(&self) -> Vec<F> {
        self.triangular
            .iter()
            .zip(&self.qfactorial_inv)
            .enumerate()
            .map(|(d, (&t, &f))| if d % 2 == 1 { -(t * f) } else { t * f })
            .collect()
    }

    /// Monomial coefficients to Newton coefficients over the progression.
    fn newton_from_monomial(&self, coeffs: &[F]) -> Vec<F> {
        let m = self.size();
        let mut scaled: Vec<F> = (0..m)
            .map(|k| coeffs.get(k).copied().unwrap_or_else(F::zero) * self.qfactorial[k])
            .collect();
        scaled.reverse();
        let mut newton = truncated_product(&scaled, &self.qfactorial_inv, m);
        newton.reverse();
        for (c, f_inv) in newton.iter_mut().zip(&self.qfactorial_inv) {
            *c *= f_inv;
        }
        newton
    }

    /// Newton coefficients back to monomial coefficients.
    fn monomial_from_newton(&self, newton: &[F]) -> Vec<F> {
        let m = self.size();
        let mut scaled: Vec<F> =
            newton.iter().zip(&self.qfactorial).map(|(&c, &f)| c * f).collect();
        scaled.reverse();
        let mut coeffs = truncated_product(&scaled, &self.signed_series(), m);
        coeffs.reverse();
        for (c, f_inv) in coeffs.iter_mut().zip(&self.qfactorial_inv) {
            *c *= f_inv;
        }
        coeffs
    }
}

impl<F: FftField> EvaluationDomain<F> for GeometricSequenceDomain<F> {
    fn size(&self) -> usize {
        self.size as usize
    }

    fn size_inv(&self) -> F {
        self.size_inv
    }

    fn element(&self, index: usize) -> Result<F, DomainError> {
        self.sequence
            .get(index)
            .copied()
            .ok_or(DomainError::IndexOutOfRange { index, size: self.size() })
    }

    fn elements(&self) -> Vec<F> {
        self.sequence.clone()
    }

    fn fft(&self, coeffs: &[F]) -> Vec<F> {
        let m = self.size();
        let newton = self.newton_from_monomial(coeffs);

        // p(q^k) = [k]! * sum_i (c_i q^(i(i-1)/2)) / [k-i]!.
        let weighted: Vec<F> =
            newton.iter().zip(&self.triangular).map(|(&c, &t)| c * t).collect();
        let mut evals = truncated_product(&weighted, &self.qfactorial_inv, m);
        cfg_iter_mut!(evals)
            .zip(&self.qfactorial)
            .for_each(|(e, &f)| *e *= f);
        evals
    }

    fn ifft(&self, evals: &[F]) -> Result<Vec<F>, DomainError> {
        if evals.len() != self.size() {
            return Err(DomainError::LengthMismatch {
                expected: self.size(),
                got: evals.len(),
            });
        }
        let m = self.size();
        let scaled: Vec<F> =
            evals.iter().zip(&self.qfactorial_inv).map(|(&e, &f)| e * f).collect();
        let mut newton = truncated_product(&scaled, &self.signed_series(), m);
        for (c, t_inv) in newton.iter_mut().zip(&self.triangular_inv) {
            *c *= t_inv;
        }
        Ok(self.monomial_from_newton(&newton))
    }

    fn evaluate_all_lagrange_coefficients(&self, tau: F) -> Vec<F> {
        let m = self.size();
        let mut differences: Vec<F> = self.sequence.iter().map(|&x| tau - x).collect();
        if let Some(hit) = differences.iter().position(|d| d.is_zero()) {
            let mut coefficients = vec![F::zero(); m];
            coefficients[hit] = F::one();
            return coefficients;
        }
        let vanish_at_tau: F = differences.iter().product();

        // Barycentric weights w_i = 1 / prod_{j != i} (x_i - x_j) obey
        //   w_0 = (-1)^(m-1) / [m-1]!,
        //   w_i = w_{i-1} * (1 - q^(m-i)) * q^(i+1-m) / (q^i - 1),
        // with every inverse already in the cached q-factorial tables.
        let mut weights = Vec::with_capacity(m);
        let mut w = self.qfactorial_inv[m - 1];
        if (m - 1) % 2 == 1 {
            w = -w;
        }
        weights.push(w);
        for i in 1..m {
            w *= (F::one() - self.sequence[m - i])
                * self.last_point_inv
                * self.sequence[i]
                * (self.qfactorial[i - 1] * self.qfactorial_inv[i]);
            weights.push(w);
        }

        batch_inversion(&mut differences);
        cfg_iter_mut!(differences)
            .zip(weights)
            .for_each(|(d, w)| *d *= w * vanish_at_tau);
        differences
    }

    fn vanishing_polynomial(&self) -> Vec<F> {
        vanishing_polynomial_from_roots(&self.sequence)
    }

    fn evaluate_vanishing_polynomial(&self, tau: F) -> F {
        self.sequence.iter().map(|&x| tau - x).product()
    }

    fn divide_by_vanishing_poly_on_coset(&self, evals: &mut [F]) -> Result<(), DomainError> {
        if evals.len() != self.size() {
            return Err(DomainError::LengthMismatch {
                expected: self.size(),
                got: evals.len(),
            });
        }
        // Canonical coset: the progression continued past its end, i.e.
        // q^m * domain. Disjointness is what valid_for_size's 2m bound buys.
        let shift = self.sequence[self.size() - 1] * self.ratio;
        let mut divisors: Vec<F> = self
            .sequence
            .iter()
            .map(|&x| self.evaluate_vanishing_polynomial(shift * x))
            .collect();
        if divisors.iter().any(|d| d.is_zero()) {
            return Err(DomainError::Degenerate {
                err: "vanishing polynomial is zero on the coset",
            });
        }
        batch_inversion(&mut divisors);
        cfg_iter_mut!(evals).zip(divisors).for_each(|(e, d)| *e *= d);
        Ok(())
    }
}
