//! Arbitrary precision integers.
//!
//! A thin wrapper around `dashu::IBig` providing the operations the
//! growth-rate analysis needs: exact arithmetic, factorials for the
//! binomial expansions, and small-prime factorization used to keep
//! logarithms of rationals in a canonical form.

use dashu::base::{Abs, Signed as DashuSigned};
use dashu::integer::IBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// An arbitrary precision integer.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer(IBig);

impl Integer {
    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Creates an integer from a base-10 digit string.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid decimal integer. Used for
    /// compiled-in constants only.
    #[must_use]
    pub fn from_str_decimal(digits: &str) -> Self {
        match IBig::from_str_radix(digits, 10) {
            Ok(value) => Self(value),
            Err(_) => panic!("invalid decimal literal: {digits}"),
        }
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if this integer is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns the inner `dashu::IBig`.
    #[must_use]
    pub fn into_inner(self) -> IBig {
        self.0
    }

    /// Attempts to convert to an i64.
    ///
    /// Returns `None` if the value doesn't fit in an i64.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.clone().try_into().ok()
    }

    /// Computes self^exp for non-negative exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }

    /// Computes n! for small n.
    #[must_use]
    pub fn factorial(n: u32) -> Self {
        let mut acc = IBig::ONE;
        for k in 2..=n {
            acc = acc * IBig::from(k);
        }
        Self(acc)
    }
}

/// Factors a positive integer into `(prime, exponent)` pairs by trial
/// division. Factors above `2^16` are not probed; an unfactored cofactor
/// is returned as a final pseudo-prime entry. That is sufficient here:
/// the factorization only has to be *consistent* (the same input always
/// splits the same way) for canonical forms to work.
#[must_use]
pub fn factor(mut n: u64) -> Vec<(u64, u32)> {
    assert!(n > 0, "cannot factor zero");
    let mut out = Vec::new();
    let mut push = |p: u64, e: u32| {
        if e > 0 {
            out.push((p, e));
        }
    };
    for p in 2u64.. {
        if p > 1 << 16 || p.saturating_mul(p) > n {
            break;
        }
        let mut e = 0;
        while n % p == 0 {
            n /= p;
            e += 1;
        }
        push(p, e);
    }
    if n > 1 {
        push(n, 1);
    }
    out
}

impl Zero for Integer {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Integer {
    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self.0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self(value)
    }
}

impl Add for Integer {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Integer {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Integer {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}
