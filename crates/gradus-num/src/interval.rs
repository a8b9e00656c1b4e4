//! Rational interval arithmetic.
//!
//! Constants such as `pi - 4` or `log(101) + log(9901) - 6*log(2) - 6*log(5)`
//! have no structural sign. This module evaluates them to enclosing
//! intervals with exact rational endpoints, at a caller-chosen precision,
//! so the sign can be read off whenever the interval clears zero.
//!
//! All series used here have one-sided truncation error with an explicit
//! geometric tail bound, so every returned interval is a true enclosure.

use num_traits::{One, Zero};

use crate::{Integer, Rational};

/// A closed interval with exact rational endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interval {
    /// Lower endpoint.
    pub lo: Rational,
    /// Upper endpoint.
    pub hi: Rational,
}

impl Interval {
    /// The degenerate interval `[r, r]`.
    #[must_use]
    pub fn point(r: Rational) -> Self {
        Self { lo: r.clone(), hi: r }
    }

    /// Returns true if zero lies inside the interval.
    #[must_use]
    pub fn contains_zero(&self) -> bool {
        self.lo.signum() <= 0 && self.hi.signum() >= 0
    }

    /// Interval addition.
    #[must_use]
    pub fn add(&self, rhs: &Self) -> Self {
        Self {
            lo: &self.lo + &rhs.lo,
            hi: &self.hi + &rhs.hi,
        }
    }

    /// Interval negation.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            lo: -&self.hi,
            hi: -&self.lo,
        }
    }

    /// Interval multiplication.
    #[must_use]
    pub fn mul(&self, rhs: &Self) -> Self {
        let products = [
            &self.lo * &rhs.lo,
            &self.lo * &rhs.hi,
            &self.hi * &rhs.lo,
            &self.hi * &rhs.hi,
        ];
        let mut lo = products[0].clone();
        let mut hi = products[0].clone();
        for p in &products[1..] {
            if *p < lo {
                lo = p.clone();
            }
            if *p > hi {
                hi = p.clone();
            }
        }
        Self { lo, hi }
    }

    /// Scales by an exact rational.
    #[must_use]
    pub fn scale(&self, r: &Rational) -> Self {
        if r.is_negative() {
            Self {
                lo: &self.hi * r,
                hi: &self.lo * r,
            }
        } else {
            Self {
                lo: &self.lo * r,
                hi: &self.hi * r,
            }
        }
    }

    /// Interval reciprocal. Returns `None` if the interval contains zero.
    #[must_use]
    pub fn recip(&self) -> Option<Self> {
        if self.contains_zero() {
            return None;
        }
        Some(Self {
            lo: self.hi.recip(),
            hi: self.lo.recip(),
        })
    }

    /// Integer power of a strictly positive interval.
    ///
    /// Callers must ensure `self.lo > 0`; growth-rate constants are built
    /// from positive atoms so this is the only case that arises.
    #[must_use]
    pub fn pow_int(&self, exp: i32) -> Option<Self> {
        if exp == 0 {
            return Some(Self::point(Rational::one()));
        }
        if self.lo.signum() <= 0 {
            return None;
        }
        let positive = Self {
            lo: self.lo.pow(exp.abs()),
            hi: self.hi.pow(exp.abs()),
        };
        if exp < 0 {
            positive.recip()
        } else {
            Some(positive)
        }
    }
}

/// An enclosure of π, accurate to roughly 35 decimal digits.
///
/// Sign questions involving π and input-sized rationals are settled far
/// below this precision, so the bounds are fixed rather than refinable.
#[must_use]
pub fn pi() -> Interval {
    let scale = Integer::new(10).pow(35);
    let lo = Integer::from_str_decimal("314159265358979323846264338327950288");
    let hi = Integer::from_str_decimal("314159265358979323846264338327950289");
    Interval {
        lo: Rational::new(lo, scale.clone()),
        hi: Rational::new(hi, scale),
    }
}

/// An enclosure of ln 2 from `ln 2 = 2 atanh(1/3)`.
#[must_use]
pub fn ln_two(terms: usize) -> Interval {
    atanh_small(&Rational::from_i64(1, 3), terms).scale(&Rational::from(2))
}

/// An enclosure of `ln x` for a strictly positive rational `x`.
///
/// The argument is scaled into `[1, 2)` by powers of two, then
/// `ln x = 2 atanh((x-1)/(x+1))` with `z = (x-1)/(x+1) < 1/3`.
///
/// # Panics
///
/// Panics if `x <= 0`.
#[must_use]
pub fn ln(x: &Rational, terms: usize) -> Interval {
    assert!(x.signum() > 0, "ln argument must be positive");
    let one = Rational::one();
    let two = Rational::from(2);

    let mut x = x.clone();
    let mut halvings: i64 = 0;
    while x >= two {
        x = x / two.clone();
        halvings += 1;
    }
    while x < one {
        x = x * two.clone();
        halvings -= 1;
    }

    let mut result = if x.is_one() {
        Interval::point(Rational::zero())
    } else {
        let z = &(&x - &one) / &(&x + &one);
        atanh_small(&z, terms).scale(&two)
    };
    if halvings != 0 {
        let correction = ln_two(terms).scale(&Rational::from(halvings));
        result = result.add(&correction);
    }
    result
}

/// An enclosure of `ln` over a strictly positive interval.
#[must_use]
pub fn ln_interval(x: &Interval, terms: usize) -> Option<Interval> {
    if x.lo.signum() <= 0 {
        return None;
    }
    Some(Interval {
        lo: ln(&x.lo, terms).lo,
        hi: ln(&x.hi, terms).hi,
    })
}

/// An enclosure of `exp x` for a rational `x`.
#[must_use]
pub fn exp(x: &Rational, terms: usize) -> Interval {
    if x.is_negative() {
        let inv = exp(&-x, terms);
        // exp is positive, so the reciprocal always exists
        return inv.recip().unwrap_or_else(|| Interval::point(Rational::zero()));
    }

    // Scale into [0, 1/2] by repeated halving, then square back up.
    let half = Rational::from_i64(1, 2);
    let mut x = x.clone();
    let mut halvings = 0u32;
    while x > half {
        x = x * half.clone();
        halvings += 1;
    }

    let mut sum = Rational::zero();
    let mut term = Rational::one();
    for k in 0..=terms {
        sum = sum + term.clone();
        term = &term * &(&x / &Rational::from(k as i64 + 1));
    }
    // Remaining terms are dominated by a geometric series with ratio <= 1/2.
    let tail = &term * &Rational::from(2);
    let mut result = Interval {
        lo: sum.clone(),
        hi: sum + tail,
    };
    for _ in 0..halvings {
        result = result.mul(&result.clone());
    }
    result
}

/// An enclosure of `exp` over an interval.
#[must_use]
pub fn exp_interval(x: &Interval, terms: usize) -> Interval {
    Interval {
        lo: exp(&x.lo, terms).lo,
        hi: exp(&x.hi, terms).hi,
    }
}

/// An enclosure of the `q`-th root of a strictly positive rational,
/// narrowed by `iters` bisection steps.
///
/// # Panics
///
/// Panics if `x <= 0` or `q == 0`.
#[must_use]
pub fn root(x: &Rational, q: u32, iters: usize) -> Interval {
    assert!(x.signum() > 0, "root argument must be positive");
    assert!(q > 0, "root index must be nonzero");
    let one = Rational::one();
    let (mut lo, mut hi) = if *x >= one {
        (one, x.clone())
    } else {
        (x.clone(), one)
    };
    for _ in 0..iters {
        let mid = &(&lo + &hi) / &Rational::from(2);
        if mid.pow(q as i32) <= *x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Interval { lo, hi }
}

/// An enclosure of `x^(num/den)` for a strictly positive interval `x`.
#[must_use]
pub fn pow_rational(x: &Interval, num: i32, den: u32, iters: usize) -> Option<Interval> {
    if x.lo.signum() <= 0 {
        return None;
    }
    let raised = x.pow_int(num)?;
    if den == 1 {
        return Some(raised);
    }
    Some(Interval {
        lo: root(&raised.lo, den, iters).lo,
        hi: root(&raised.hi, den, iters).hi,
    })
}

/// Series enclosure of `atanh z` for `0 < z <= 1/3`.
fn atanh_small(z: &Rational, terms: usize) -> Interval {
    let z2 = z * z;
    let mut sum = Rational::zero();
    let mut power = z.clone();
    for k in 0..terms {
        sum = sum + &power / &Rational::from(2 * k as i64 + 1);
        power = &power * &z2;
    }
    // Tail: sum_{k>=terms} z^(2k+1)/(2k+1) <= z^(2*terms+1) / (1 - z^2),
    // and with z <= 1/3 we have 1/(1 - z^2) <= 9/8.
    let tail = &power * &Rational::from_i64(9, 8);
    Interval {
        lo: sum.clone(),
        hi: sum + tail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Asserts that the enclosure sits strictly inside a decimal window.
    fn assert_within(iv: &Interval, lo: (i64, i64), hi: (i64, i64)) {
        let lo = Rational::from_i64(lo.0, lo.1);
        let hi = Rational::from_i64(hi.0, hi.1);
        assert!(
            lo < iv.lo && iv.lo <= iv.hi && iv.hi < hi,
            "{iv:?} not inside ({lo}, {hi})"
        );
    }

    #[test]
    fn test_pi_bounds() {
        // 3.14159 < π < 3.1416
        assert_within(&pi(), (314_159, 100_000), (31_416, 10_000));
    }

    #[test]
    fn test_ln_two() {
        // 0.6931 < ln 2 < 0.6932
        assert_within(&ln_two(20), (6931, 10_000), (6932, 10_000));
    }

    #[test]
    fn test_ln_five() {
        // 1.6094 < ln 5 < 1.6095
        assert_within(&ln(&Rational::from(5), 20), (16_094, 10_000), (16_095, 10_000));
    }

    #[test]
    fn test_ln_below_one() {
        // -0.6932 < ln(1/2) < -0.6931
        let iv = ln(&Rational::from_i64(1, 2), 20);
        assert!(iv.hi.signum() < 0);
        assert_within(&iv, (-6932, 10_000), (-6931, 10_000));
    }

    #[test]
    fn test_ln_tiny_argument_sign() {
        // ln(1000001/1000000) ~ 1e-6; the sign must still be decided
        let iv = ln(&Rational::from_i64(1_000_001, 1_000_000), 20);
        assert!(iv.lo.signum() > 0);
    }

    #[test]
    fn test_exp_one() {
        // 2.7182 < e < 2.7183
        assert_within(&exp(&Rational::one(), 20), (27_182, 10_000), (27_183, 10_000));
    }

    #[test]
    fn test_exp_negative() {
        // 0.3678 < e⁻¹ < 0.3679
        let iv = exp(&Rational::from(-1), 20);
        assert!(iv.lo.signum() > 0);
        assert_within(&iv, (3678, 10_000), (3679, 10_000));
    }

    #[test]
    fn test_sqrt_two() {
        // 1.4142 < √2 < 1.4143
        let iv = root(&Rational::from(2), 2, 40);
        assert_within(&iv, (14_142, 10_000), (14_143, 10_000));
    }

    #[test]
    fn test_interval_mul_signs() {
        let a = Interval {
            lo: Rational::from(-2),
            hi: Rational::from(3),
        };
        let b = Interval {
            lo: Rational::from(-1),
            hi: Rational::from(4),
        };
        let prod = a.mul(&b);
        assert_eq!(prod.lo, Rational::from(-8));
        assert_eq!(prod.hi, Rational::from(12));
    }
}
