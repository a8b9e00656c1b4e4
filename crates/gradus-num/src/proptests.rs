//! Property-based tests for exact arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use proptest::prelude::*;

    use crate::{CFrac, Constant, Rational, Sign};

    // Strategy for generating small rationals
    fn small_rational() -> impl Strategy<Value = Rational> {
        (-200i64..200i64, 1i64..40i64).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    fn positive_rational() -> impl Strategy<Value = Rational> {
        (1i64..500i64, 1i64..40i64).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    proptest! {
        #[test]
        fn rational_add_commutative(a in small_rational(), b in small_rational()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn rational_mul_distributes(
            a in small_rational(),
            b in small_rational(),
            c in small_rational()
        ) {
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }

        #[test]
        fn rational_floor_bounds(a in small_rational()) {
            let floor = Rational::from_integer(a.floor());
            prop_assert!(floor <= a);
            prop_assert!(a < &floor + &Rational::from(1));
        }

        #[test]
        fn constant_sign_matches_rational(a in small_rational()) {
            let expected = match a.signum() {
                0 => Sign::Zero,
                s if s < 0 => Sign::Negative,
                _ => Sign::Positive,
            };
            prop_assert_eq!(Constant::from_rational(a).sign(), Some(expected));
        }

        #[test]
        fn log_of_product_is_sum_of_logs(a in positive_rational(), b in positive_rational()) {
            let product = Constant::ln_rational(&(&a * &b)).unwrap();
            let sum = Constant::ln_rational(&a)
                .unwrap()
                .add(&Constant::ln_rational(&b).unwrap());
            prop_assert!(product.sub(&sum).is_zero());
        }

        #[test]
        fn log_sign_matches_argument(a in positive_rational()) {
            let sign = Constant::ln_rational(&a).unwrap().sign();
            let expected = match a.partial_cmp(&Rational::from(1)) {
                Some(std::cmp::Ordering::Less) => Sign::Negative,
                Some(std::cmp::Ordering::Equal) => Sign::Zero,
                _ => Sign::Positive,
            };
            prop_assert_eq!(sign, Some(expected));
        }

        #[test]
        fn exp_of_log_roundtrips(a in positive_rational()) {
            let value = Constant::exp_of(&Constant::ln_rational(&a).unwrap());
            prop_assert_eq!(value.as_rational(), Some(a));
        }

        #[test]
        fn cfrac_div_then_mul_roundtrips(a in small_rational(), b in positive_rational()) {
            let a = CFrac::from_rational(a);
            let b = CFrac::from_rational(b);
            let quotient = a.div(&b).unwrap();
            prop_assert!(quotient.mul(&b).sub(&a).is_zero());
        }
    }
}
