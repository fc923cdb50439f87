mod tests {
    use ark_bls12_377::Fr;
    use ark_ff::{FftField, Field, Fp64, MontBackend, MontConfig, One, Zero};
    use ark_std::test_rng;
    use rand::SeedableRng;

    use crate::domain::arithmetic::ArithmeticSequenceDomain;
    use crate::domain::basic_radix2::BasicRadix2Domain;
    use crate::domain::extended_radix2::ExtendedRadix2Domain;
    use crate::domain::general::{get_evaluation_domain, GeneralEvaluationDomain};
    use crate::domain::geometric::GeometricSequenceDomain;
    use crate::domain::step_radix2::StepRadix2Domain;
    use crate::domain::EvaluationDomain;
    use crate::error::DomainError;
    use crate::utils::{horner_evaluate, polynomial_multiplication};

    /// 1009 = 2^4 * 63 + 1: two-adicity 4, so radix-2 domains stop at 16
    /// points and the selector has to fall back for larger requests.
    #[derive(MontConfig)]
    #[modulus = "1009"]
    #[generator = "11"]
    pub struct SmallFieldConfig;
    pub type SmallField = Fp64<MontBackend<SmallFieldConfig, 1>>;

    fn random_coeffs<F: Field>(n: usize) -> Vec<F> {
        let rng = &mut test_rng();
        (0..n).map(|_| F::rand(rng)).collect()
    }

    fn assert_fft_matches_horner<F, D>(domain: &D)
    where
        F: ark_ff::FftField,
        D: EvaluationDomain<F>,
    {
        let coeffs = random_coeffs::<F>(domain.size());
        let evals = domain.fft(&coeffs);
        assert_eq!(evals.len(), domain.size());
        for (i, point) in domain.elements().into_iter().enumerate() {
            assert_eq!(evals[i], horner_evaluate(&coeffs, point), "mismatch at index {i}");
        }
    }

    fn assert_round_trip<F, D>(domain: &D)
    where
        F: ark_ff::FftField,
        D: EvaluationDomain<F>,
    {
        // Full-length input.
        let coeffs = random_coeffs::<F>(domain.size());
        let recovered = domain.ifft(&domain.fft(&coeffs)).unwrap();
        assert_eq!(recovered, coeffs);

        // Short input zero-extends.
        let short = random_coeffs::<F>((domain.size() + 1) / 2);
        let recovered = domain.ifft(&domain.fft(&short)).unwrap();
        let mut expected = short;
        expected.resize(domain.size(), F::zero());
        assert_eq!(recovered, expected);
    }

    fn assert_lagrange_consistent<F, D>(domain: &D)
    where
        F: ark_ff::FftField,
        D: EvaluationDomain<F>,
    {
        let rng = &mut test_rng();
        let tau = domain.sample_element_outside_domain(rng);
        let lagrange = domain.evaluate_all_lagrange_coefficients(tau);

        // Partition of unity.
        let sum: F = lagrange.iter().sum();
        assert!(sum.is_one());

        // Interpolation through the Lagrange kernel agrees with ifft.
        let evals = random_coeffs::<F>(domain.size());
        let via_kernel: F = lagrange.iter().zip(&evals).map(|(&l, &e)| l * e).sum();
        let coeffs = domain.ifft(&evals).unwrap();
        assert_eq!(via_kernel, horner_evaluate(&coeffs, tau));

        // On-domain points give one-hot rows.
        let probe = domain.size() / 2;
        let on_domain = domain.evaluate_all_lagrange_coefficients(domain.element(probe).unwrap());
        for (i, value) in on_domain.into_iter().enumerate() {
            if i == probe {
                assert!(value.is_one());
            } else {
                assert!(value.is_zero());
            }
        }
    }

    fn assert_vanishing_consistent<F, D>(domain: &D)
    where
        F: ark_ff::FftField,
        D: EvaluationDomain<F>,
    {
        let z = domain.vanishing_polynomial();
        assert_eq!(z.len(), domain.size() + 1);
        assert!(z.last().unwrap().is_one(), "vanishing polynomial must be monic");
        for point in domain.elements() {
            assert!(horner_evaluate(&z, point).is_zero());
            assert!(domain.evaluate_vanishing_polynomial(point).is_zero());
        }
        let rng = &mut test_rng();
        let tau = F::rand(rng);
        assert_eq!(domain.evaluate_vanishing_polynomial(tau), horner_evaluate(&z, tau));
    }

    fn assert_add_vanishing_preserves_domain_values<F, D>(domain: &D)
    where
        F: ark_ff::FftField,
        D: EvaluationDomain<F>,
    {
        let rng = &mut test_rng();
        let coeff = F::rand(rng);
        let poly = random_coeffs::<F>(domain.size() / 2 + 1);
        let mut shifted = poly.clone();
        domain.add_vanishing_polynomial(coeff, &mut shifted);
        assert_eq!(shifted.len(), domain.size() + 1);
        for point in domain.elements() {
            assert_eq!(horner_evaluate(&shifted, point), horner_evaluate(&poly, point));
        }
        let tau = F::rand(rng);
        assert_eq!(
            horner_evaluate(&shifted, tau),
            horner_evaluate(&poly, tau) + coeff * domain.evaluate_vanishing_polynomial(tau)
        );
    }

    /// `coset_point(i)` must enumerate the variant's canonical coset.
    fn assert_coset_division<F, D>(domain: &D, coset_point: impl Fn(usize) -> F)
    where
        F: ark_ff::FftField,
        D: EvaluationDomain<F>,
    {
        let quotient = random_coeffs::<F>(domain.size());
        let product = polynomial_multiplication(&domain.vanishing_polynomial(), &quotient);

        let mut evals: Vec<F> =
            (0..domain.size()).map(|i| horner_evaluate(&product, coset_point(i))).collect();
        domain.divide_by_vanishing_poly_on_coset(&mut evals).unwrap();
        for (i, eval) in evals.into_iter().enumerate() {
            assert_eq!(eval, horner_evaluate(&quotient, coset_point(i)));
        }
    }

    #[test]
    fn basic_radix2_transforms() {
        for size in [1usize, 2, 4, 8, 64] {
            let domain = BasicRadix2Domain::<Fr>::new(size).unwrap();
            assert_eq!(domain.size(), size);
            assert_fft_matches_horner(&domain);
            assert_round_trip(&domain);
        }
    }

    #[test]
    fn extended_radix2_transforms() {
        for size in [2usize, 8, 16] {
            let domain = ExtendedRadix2Domain::<Fr>::new(size).unwrap();
            assert_eq!(domain.size(), size);
            assert_fft_matches_horner(&domain);
            assert_round_trip(&domain);
        }
    }

    #[test]
    fn step_radix2_transforms() {
        for size in [3usize, 5, 6, 12, 24] {
            let domain = StepRadix2Domain::<Fr>::new(size).unwrap();
            assert_eq!(domain.size(), size);
            assert_fft_matches_horner(&domain);
            assert_round_trip(&domain);
        }
    }

    #[test]
    fn geometric_transforms() {
        for size in [1usize, 2, 7, 11, 16] {
            let domain = GeometricSequenceDomain::<Fr>::new(size).unwrap();
            assert_eq!(domain.size(), size);
            assert_fft_matches_horner(&domain);
            assert_round_trip(&domain);
        }
    }

    #[test]
    fn arithmetic_transforms() {
        for size in [1usize, 2, 7, 11, 16] {
            let domain = ArithmeticSequenceDomain::<Fr>::new(size).unwrap();
            assert_eq!(domain.size(), size);
            assert_fft_matches_horner(&domain);
            assert_round_trip(&domain);
        }
    }

    #[test]
    fn sequence_transforms_without_radix2_support() {
        // Products longer than 16 cannot use the radix-2 kernel over the
        // small field, so this exercises the schoolbook fallback.
        let geometric = GeometricSequenceDomain::<SmallField>::new(33).unwrap();
        assert_fft_matches_horner(&geometric);
        assert_round_trip(&geometric);

        let arithmetic = ArithmeticSequenceDomain::<SmallField>::new(33).unwrap();
        assert_fft_matches_horner(&arithmetic);
        assert_round_trip(&arithmetic);
    }

    #[test]
    fn constant_polynomial_evaluates_to_ones() {
        fn check<F: ark_ff::FftField, D: EvaluationDomain<F>>(domain: &D) {
            assert_eq!(domain.fft(&[F::one()]), vec![F::one(); domain.size()]);
        }
        check(&BasicRadix2Domain::<Fr>::new(8).unwrap());
        check(&ExtendedRadix2Domain::<Fr>::new(8).unwrap());
        check(&StepRadix2Domain::<Fr>::new(6).unwrap());
        check(&GeometricSequenceDomain::<Fr>::new(6).unwrap());
        check(&ArithmeticSequenceDomain::<Fr>::new(6).unwrap());
    }

    #[test]
    fn lagrange_coefficients() {
        assert_lagrange_consistent(&BasicRadix2Domain::<Fr>::new(8).unwrap());
        assert_lagrange_consistent(&ExtendedRadix2Domain::<Fr>::new(8).unwrap());
        assert_lagrange_consistent(&StepRadix2Domain::<Fr>::new(12).unwrap());
        assert_lagrange_consistent(&GeometricSequenceDomain::<Fr>::new(9).unwrap());
        assert_lagrange_consistent(&ArithmeticSequenceDomain::<Fr>::new(9).unwrap());
    }

    #[test]
    fn vanishing_polynomials() {
        assert_vanishing_consistent(&BasicRadix2Domain::<Fr>::new(8).unwrap());
        assert_vanishing_consistent(&ExtendedRadix2Domain::<Fr>::new(8).unwrap());
        assert_vanishing_consistent(&StepRadix2Domain::<Fr>::new(12).unwrap());
        assert_vanishing_consistent(&GeometricSequenceDomain::<Fr>::new(9).unwrap());
        assert_vanishing_consistent(&ArithmeticSequenceDomain::<Fr>::new(9).unwrap());
    }

    #[test]
    fn add_vanishing_polynomial_preserves_domain_values() {
        assert_add_vanishing_preserves_domain_values(&BasicRadix2Domain::<Fr>::new(8).unwrap());
        assert_add_vanishing_preserves_domain_values(&ExtendedRadix2Domain::<Fr>::new(8).unwrap());
        assert_add_vanishing_preserves_domain_values(&StepRadix2Domain::<Fr>::new(12).unwrap());
        assert_add_vanishing_preserves_domain_values(&GeometricSequenceDomain::<Fr>::new(9).unwrap());
        assert_add_vanishing_preserves_domain_values(&ArithmeticSequenceDomain::<Fr>::new(9).unwrap());
    }

    #[test]
    fn step_vanishing_polynomial_is_product_of_pieces() {
        let domain = StepRadix2Domain::<Fr>::new(12).unwrap();
        let (big, small) = (8usize, 4usize);
        let omega = domain.element(big).unwrap();

        let mut big_vanish = vec![Fr::zero(); big + 1];
        big_vanish[0] = -Fr::one();
        big_vanish[big] = Fr::one();
        let mut small_vanish = vec![Fr::zero(); small + 1];
        small_vanish[0] = -omega.pow([small as u64]);
        small_vanish[small] = Fr::one();

        assert_eq!(
            domain.vanishing_polynomial(),
            polynomial_multiplication(&big_vanish, &small_vanish)
        );
    }

    #[test]
    fn coset_division() {
        let g = Fr::GENERATOR;

        let basic = BasicRadix2Domain::<Fr>::new(8).unwrap();
        assert_coset_division(&basic, |i| g * basic.element(i).unwrap());

        let extended = ExtendedRadix2Domain::<Fr>::new(8).unwrap();
        assert_coset_division(&extended, |i| g * extended.element(i).unwrap());

        let step = StepRadix2Domain::<Fr>::new(12).unwrap();
        assert_coset_division(&step, |i| g * step.element(i).unwrap());

        let geometric = GeometricSequenceDomain::<Fr>::new(6).unwrap();
        let shift = geometric.ratio().pow([6]);
        assert_coset_division(&geometric, |i| shift * geometric.element(i).unwrap());

        let arithmetic = ArithmeticSequenceDomain::<Fr>::new(6).unwrap();
        let shift = Fr::from(6u64) * arithmetic.difference();
        assert_coset_division(&arithmetic, |i| arithmetic.element(i).unwrap() + shift);
    }

    #[test]
    fn wrong_length_inputs_are_rejected() {
        let domain = BasicRadix2Domain::<Fr>::new(8).unwrap();
        assert_eq!(
            domain.ifft(&[Fr::one(); 9]),
            Err(DomainError::LengthMismatch { expected: 8, got: 9 })
        );
        let mut evals = vec![Fr::one(); 7];
        assert_eq!(
            domain.divide_by_vanishing_poly_on_coset(&mut evals),
            Err(DomainError::LengthMismatch { expected: 8, got: 7 })
        );
        assert_eq!(
            domain.element(8),
            Err(DomainError::IndexOutOfRange { index: 8, size: 8 })
        );
    }

    #[test]
    fn selector_picks_basic_radix2_for_powers_of_two() {
        let domain = get_evaluation_domain::<Fr>(8).unwrap();
        assert!(matches!(domain, GeneralEvaluationDomain::BasicRadix2(_)));
        assert_eq!(domain.size(), 8);

        // Constant polynomial 1 evaluates to 1 everywhere.
        let mut delta = vec![Fr::zero(); 8];
        delta[0] = Fr::one();
        assert_eq!(domain.fft(&delta), vec![Fr::one(); 8]);
    }

    #[test]
    fn selector_picks_step_radix2_for_nine() {
        let domain = get_evaluation_domain::<Fr>(9).unwrap();
        assert!(matches!(domain, GeneralEvaluationDomain::StepRadix2(_)));
        assert_eq!(domain.size(), 9);
    }

    #[test]
    fn selector_handles_trivial_domain() {
        let domain = get_evaluation_domain::<Fr>(1).unwrap();
        assert_eq!(domain.size(), 1);
        assert_eq!(domain.fft(&[Fr::from(5u64)]), vec![Fr::from(5u64)]);
    }

    #[test]
    fn selector_rejects_zero() {
        assert_eq!(
            get_evaluation_domain::<Fr>(0).unwrap_err(),
            DomainError::UnsupportedSize(0)
        );
    }

    #[test]
    fn selector_never_undershoots_and_is_deterministic() {
        let _ = env_logger::builder().is_test(true).try_init();
        for min_size in 1..=100usize {
            let domain = get_evaluation_domain::<Fr>(min_size).unwrap();
            assert!(domain.size() >= min_size, "undershot for {min_size}");
            assert_eq!(domain, get_evaluation_domain::<Fr>(min_size).unwrap());
        }
    }

    #[test]
    fn selector_falls_back_on_small_two_adicity() {
        // Up to 16 points the small field supports plain radix-2 domains.
        let domain = get_evaluation_domain::<SmallField>(16).unwrap();
        assert!(matches!(domain, GeneralEvaluationDomain::BasicRadix2(_)));

        // 32 needs the coset extension, 12 the two-piece step shape.
        let domain = get_evaluation_domain::<SmallField>(32).unwrap();
        assert!(matches!(domain, GeneralEvaluationDomain::ExtendedRadix2(_)));
        let domain = get_evaluation_domain::<SmallField>(12).unwrap();
        assert!(matches!(domain, GeneralEvaluationDomain::StepRadix2(_)));

        // Beyond every radix-2 shape, the geometric progression takes over.
        let domain = get_evaluation_domain::<SmallField>(33).unwrap();
        assert!(matches!(domain, GeneralEvaluationDomain::Geometric(_)));
        assert_eq!(domain.size(), 33);
        let coeffs = random_coeffs::<SmallField>(33);
        assert_eq!(domain.ifft(&domain.fft(&coeffs)).unwrap(), coeffs);

        // And far past the field's capacity nothing applies.
        assert_eq!(
            get_evaluation_domain::<SmallField>(600).unwrap_err(),
            DomainError::UnsupportedSize(600)
        );
    }

    #[test]
    fn selector_respects_round_trips_across_variants() {
        for min_size in [1usize, 5, 9, 17, 33] {
            let domain = get_evaluation_domain::<SmallField>(min_size).unwrap();
            let coeffs = random_coeffs::<SmallField>(domain.size());
            assert_eq!(domain.ifft(&domain.fft(&coeffs)).unwrap(), coeffs);
        }
    }

    #[test]
    fn sampled_elements_lie_outside_the_domain() {
        let rng = &mut rand::rngs::StdRng::seed_from_u64(17);
        let domain = GeometricSequenceDomain::<SmallField>::new(20).unwrap();
        for _ in 0..10 {
            let t = domain.sample_element_outside_domain(rng);
            assert!(!domain.evaluate_vanishing_polynomial(t).is_zero());
        }
    }
}
