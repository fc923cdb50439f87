//! Shared polynomial helpers: Horner evaluation, dense products (FFT-backed
//! where the field allows it), division by monic divisors, and root
//! products. Coefficient vectors are dense, lowest degree first.

use ark_ff::{FftField, Field};
use ark_std::log2;

/// Horner evaluation of `p` at `x`.
pub fn horner_evaluate<F: Field>(p: &[F], x: F) -> F {
    p.iter().rev().fold(F::zero(), |acc, &coeff| acc * x + coeff)
}

/// In-place radix-2 Cooley-Tukey transform of `a` by the `2^log_n`-th root
/// of unity `omega`. `a.len()` must equal `1 << log_n`.
pub(crate) fn serial_radix2_fft<F: Field>(a: &mut [F], omega: F, log_n: u32) {
    let n = a.len();
    debug_assert_eq!(n, 1 << log_n);

    // Bit-reversal permutation.
    let mut target = 0;
    for pos in 0..n {
        if target > pos {
            a.swap(target, pos);
        }
        let mut mask = n >> 1;
        while target & mask != 0 {
            target &= !mask;
            mask >>= 1;
        }
        target |= mask;
    }

    let mut m = 1;
    for _ in 0..log_n {
        let w_m = omega.pow([(n / (2 * m)) as u64]);
        let mut k = 0;
        while k < n {
            let mut w = F::one();
            for j in 0..m {
                let t = a[k + j + m] * w;
                a[k + j + m] = a[k + j] - t;
                a[k + j] += t;
                w *= w_m;
            }
            k += 2 * m;
        }
        m *= 2;
    }
}

/// Dense product of two polynomials. Runs over a radix-2 domain when the
/// field's two-adicity covers the product length, and falls back to the
/// schoolbook product otherwise.
pub fn polynomial_multiplication<F: FftField>(a: &[F], b: &[F]) -> Vec<F> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let result_len = a.len() + b.len() - 1;
    let domain_size = result_len.next_power_of_two();
    let log_size = log2(domain_size);

    if log_size <= F::TWO_ADICITY {
        if let Some(omega) = F::get_root_of_unity(domain_size as u64) {
            let mut lhs = a.to_vec();
            let mut rhs = b.to_vec();
            lhs.resize(domain_size, F::zero());
            rhs.resize(domain_size, F::zero());
            serial_radix2_fft(&mut lhs, omega, log_size);
            serial_radix2_fft(&mut rhs, omega, log_size);
            for (l, r) in lhs.iter_mut().zip(&rhs) {
                *l *= r;
            }
            if let Some((omega_inv, size_inv)) =
                omega.inverse().zip(F::from(domain_size as u64).inverse())
            {
                serial_radix2_fft(&mut lhs, omega_inv, log_size);
                for l in &mut lhs {
                    *l *= size_inv;
                }
                lhs.truncate(result_len);
                return lhs;
            }
        }
    }

    let mut result = vec![F::zero(); result_len];
    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            result[i + j] += ai * bj;
        }
    }
    result
}

/// Product of `a` and `b` truncated to its first `n` coefficients, padded
/// with zeroes up to length `n`.
pub(crate) fn truncated_product<F: FftField>(a: &[F], b: &[F], n: usize) -> Vec<F> {
    let mut result = polynomial_multiplication(a, b);
    result.resize(n, F::zero());
    result
}

/// Quotient and remainder of `num` by the monic polynomial `den`.
/// The remainder has `den.len() - 1` coefficients.
pub(crate) fn divide_by_monic<F: Field>(num: &[F], den: &[F]) -> (Vec<F>, Vec<F>) {
    let d = den.len() - 1;
    debug_assert!(den.last().map_or(false, |c| c.is_one()));
    if num.len() <= d {
        let mut rem = num.to_vec();
        rem.resize(d, F::zero());
        return (Vec::new(), rem);
    }

    let mut rem = num.to_vec();
    let mut quo = vec![F::zero(); num.len() - d];
    for i in (d..rem.len()).rev() {
        let c = rem[i];
        if !c.is_zero() {
            quo[i - d] = c;
            for j in 0..d {
                let t = c * den[j];
                rem[i - d + j] -= t;
            }
        }
        rem[i] = F::zero();
    }
    rem.truncate(d);
    (quo, rem)
}

/// Monic polynomial with the given roots, built by iterated products.
pub(crate) fn vanishing_polynomial_from_roots<F: Field>(roots: &[F]) -> Vec<F> {
    let mut z = Vec::with_capacity(roots.len() + 1);
    z.push(F::one());
    for &r in roots {
        z.insert(0, F::zero());
        for j in 0..z.len() - 1 {
            let t = z[j + 1] * r;
            z[j] -= t;
        }
    }
    z
}

/// Whether the field characteristic strictly exceeds `bound`.
pub(crate) fn characteristic_exceeds<F: Field>(bound: u64) -> bool {
    let ch = F::characteristic();
    ch.iter().skip(1).any(|&limb| limb != 0) || ch.first().map_or(false, |&limb| limb > bound)
}
