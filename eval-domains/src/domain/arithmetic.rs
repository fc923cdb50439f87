//! Domain over an arithmetic progression `0, d, 2d, ...` with unit common
//! difference. The last-resort variant: it only asks the field for a large
//! enough characteristic, not for any multiplicative structure.
//!
//! Transforms go through the Newton basis of the progression. The
//! monomial/Newton conversions walk a precomputed subproduct tree
//! (divide-and-conquer against the left half's vanishing factor); the
//! Newton/evaluation step is a truncated product against the factorial
//! series, which collapses to factorial scalings because consecutive
//! differences telescope.

use ark_ff::{batch_inversion, FftField};
use ark_std::cfg_iter_mut;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::EvaluationDomain;
use crate::error::DomainError;
use crate::utils::{
    characteristic_exceeds, divide_by_monic, polynomial_multiplication, truncated_product,
    vanishing_polynomial_from_roots,
};

/// Subproduct tree over a contiguous range of the progression: the monic
/// product of `(x - x_j)` for the node's range, with children splitting the
/// range in half.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SubproductTree<F: FftField> {
    product: Vec<F>,
    children: Option<Box<(SubproductTree<F>, SubproductTree<F>)>>,
}

impl<F: FftField> SubproductTree<F> {
    fn build(points: &[F]) -> Self {
        if let [point] = points {
            return Self { product: vec![-*point, F::one()], children: None };
        }
        let (left, right) = points.split_at(points.len() / 2);
        let left = Self::build(left);
        let right = Self::build(right);
        let product = polynomial_multiplication(&left.product, &right.product);
        Self { product, children: Some(Box::new((left, right))) }
    }

    fn len(&self) -> usize {
        self.product.len() - 1
    }

    /// Newton coefficients of `coeffs` over this node's points: split
    /// `p = q * M_left + r`, recurse on the remainder for the low indices
    /// and on the quotient for the high ones.
    fn newton_from_monomial(&self, coeffs: &[F]) -> Vec<F> {
        match &self.children {
            None => vec![coeffs.first().copied().unwrap_or_else(F::zero)],
            Some(children) => {
                let (left, right) = children.as_ref();
                let (quotient, remainder) = divide_by_monic(coeffs, &left.product);
                let mut newton = left.newton_from_monomial(&remainder);
                newton.extend(right.newton_from_monomial(&quotient));
                newton
            }
        }
    }

    /// Inverse walk: `p = r + M_left * q` from the split Newton halves.
    fn monomial_from_newton(&self, newton: &[F]) -> Vec<F> {
        match &self.children {
            None => vec![newton.first().copied().unwrap_or_else(F::zero)],
            Some(children) => {
                let (left, right) = children.as_ref();
                let low = left.monomial_from_newton(&newton[..left.len()]);
                let high = right.monomial_from_newton(&newton[left.len()..]);
                let mut result = polynomial_multiplication(&left.product, &high);
                result.resize(self.len(), F::zero());
                for (r, l) in result.iter_mut().zip(low) {
                    *r += l;
                }
                result
            }
        }
    }
}

/// Arithmetic-progression domain `{i * d : 0 <= i < m}` with `d = 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArithmeticSequenceDomain<F: FftField> {
    size: u64,
    size_inv: F,
    difference: F,
    sequence: Vec<F>,
    /// `i!` and its inverse.
    factorial: Vec<F>,
    factorial_inv: Vec<F>,
    tree: SubproductTree<F>,
}

impl<F: FftField> ArithmeticSequenceDomain<F> {
    /// Whether the characteristic leaves room for `num_points` distinct
    /// points plus the disjoint translated coset (`2m < char`).
    pub fn valid_for_size(num_points: usize) -> bool {
        num_points >= 1
            && (num_points as u64).checked_mul(2).is_some_and(characteristic_exceeds::<F>)
    }

    /// Builds the domain, or `None` when `valid_for_size` is false.
    pub fn new(num_points: usize) -> Option<Self> {
        if !Self::valid_for_size(num_points) {
            return None;
        }
        let difference = F::one();

        let mut sequence = Vec::with_capacity(num_points);
        let mut factorial = Vec::with_capacity(num_points);
        sequence.push(F::zero());
        factorial.push(F::one());
        for i in 1..num_points {
            sequence.push(sequence[i - 1] + difference);
            factorial.push(factorial[i - 1] * F::from(i as u64));
        }

        let mut factorial_inv = factorial.clone();
        batch_inversion(&mut factorial_inv);

        Some(Self {
            size: num_points as u64,
            size_inv: F::from(num_points as u64).inverse()?,
            difference,
            tree: SubproductTree::build(&sequence),
            sequence,
            factorial,
            factorial_inv,
        })
    }

    /// The progression's common difference.
    pub fn difference(&self) -> F {
        self.difference
    }

    /// Alternating factorial series `(-1)^d / d!`, reciprocal of the
    /// `1/d!` series.
    fn signed_series(&self) -> Vec<F> {
        self.factorial_inv
            .iter()
            .enumerate()
            .map(|(d, &f)| if d % 2 == 1 { -f } else { f })
            .collect()
    }
}

impl<F: FftField> EvaluationDomain<F> for ArithmeticSequenceDomain<F> {
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
        let mut padded = coeffs.to_vec();
        padded.resize(m, F::zero());
        let newton = self.tree.newton_from_monomial(&padded);

        // p(x_k) = k! * sum_i c_i / (k - i)!   (unit difference).
        let mut evals = truncated_product(&newton, &self.factorial_inv, m);
        cfg_iter_mut!(evals)
            .zip(&self.factorial)
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
            evals.iter().zip(&self.factorial_inv).map(|(&e, &f)| e * f).collect();
        let newton = truncated_product(&scaled, &self.signed_series(), m);
        Ok(self.tree.monomial_from_newton(&newton))
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

        // w_i = 1 / (i! * (-1)^(m-1-i) * (m-1-i)!)  for unit difference.
        let weights: Vec<F> = (0..m)
            .map(|i| {
                let w = self.factorial_inv[i] * self.factorial_inv[m - 1 - i];
                if (m - 1 - i) % 2 == 1 {
                    -w
                } else {
                    w
                }
            })
            .collect();

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
        // Canonical coset: the progression translated past its end by m * d.
        // Disjoint from the domain whenever 2m stays below the
        // characteristic, which valid_for_size guarantees.
        let shift = self.size_as_field_element() * self.difference;
        let mut divisors: Vec<F> = self
            .sequence
            .iter()
            .map(|&x| self.evaluate_vanishing_polynomial(x + shift))
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
