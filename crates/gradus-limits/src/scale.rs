//! The asymptotic scale: atoms and monomials.
//!
//! Every growth rate this crate can express is a product of powers of
//! *scale atoms*: iterated logarithms `Ell(k)` (n, log n, log log n, …)
//! and normalized exponentials `Exp(m)` of monomials that tend to
//! infinity. Examples, writing `L = log n`:
//!
//! - `n^2 · L`            — factors `[(Ell(0), 2), (Ell(1), 1)]`
//! - `n^log n = e^(L²)`   — factor `[(Exp(L²), 1)]`
//! - `4^n = e^(n·ln 4)`   — factor `[(Exp(n), ln 4)]`
//!
//! Two invariants keep comparisons decidable:
//!
//! - `Exp` arguments are single monomials tending to infinity; `e^(a + b)`
//!   is represented as `e^a · e^b`, and `e^(c·log n)` folds to `n^c`, so
//!   distinct `Exp` atoms always differ by an unbounded factor
//! - exponents with provably zero value are dropped
//!
//! Under those invariants a nonempty monomial always tends to zero or to
//! infinity (never to a finite limit), which is what makes the dominance
//! scan below sound.

use gradus_num::{CFrac, Sign};
use std::cmp::Ordering;

/// An atom of the asymptotic scale.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScaleAtom {
    /// The k-fold iterated logarithm of the variable:
    /// `Ell(0) = n`, `Ell(1) = log n`, `Ell(2) = log log n`, …
    Ell(u32),
    /// `e^m` for a scale monomial `m` tending to infinity.
    Exp(ScaleMono),
}

impl ScaleAtom {
    /// Compares two atoms by growth dominance: `Greater` means any
    /// positive power of `self` outgrows any power of `other`.
    ///
    /// For distinct atoms the relation is strict, because the ratio of
    /// their logarithms tends to zero or infinity; `Equal` only occurs
    /// for identical atoms.
    pub fn cmp_dominance(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            // Lower iteration depth grows faster: n ≻ log n ≻ log log n.
            (ScaleAtom::Ell(i), ScaleAtom::Ell(j)) => Some(j.cmp(i)),
            (ScaleAtom::Exp(a), ScaleAtom::Exp(b)) => {
                if a == b {
                    Some(Ordering::Equal)
                } else {
                    a.cmp_growth(b)
                }
            }
            (ScaleAtom::Exp(m), ScaleAtom::Ell(k)) => {
                // log(e^m) = m against log(Ell(k)) = Ell(k+1)
                m.cmp_growth(&ScaleMono::atom(ScaleAtom::Ell(k + 1), CFrac::one()))
            }
            (ScaleAtom::Ell(_), ScaleAtom::Exp(_)) => {
                other.cmp_dominance(self).map(Ordering::reverse)
            }
        }
    }

    /// The logarithm of the atom, as a scale monomial.
    #[must_use]
    pub fn log(&self) -> ScaleMono {
        match self {
            ScaleAtom::Ell(k) => ScaleMono::atom(ScaleAtom::Ell(k + 1), CFrac::one()),
            ScaleAtom::Exp(m) => m.clone(),
        }
    }
}

/// The eventual direction of a scale monomial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tendency {
    /// Tends to +∞.
    Infinity,
    /// Tends to 0 (from above).
    Zero,
    /// Identically one (the empty monomial).
    One,
}

/// A product of scale atoms raised to exact constant exponents.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ScaleMono {
    factors: Vec<(ScaleAtom, CFrac)>,
}

impl ScaleMono {
    /// The empty monomial (the constant one).
    #[must_use]
    pub fn one() -> Self {
        Self::default()
    }

    /// A single atom raised to a power.
    #[must_use]
    pub fn atom(atom: ScaleAtom, exp: CFrac) -> Self {
        let mut mono = Self::one();
        mono.push(atom, exp);
        mono.factors.sort_by(|a, b| a.0.cmp(&b.0));
        mono
    }

    /// The variable itself.
    #[must_use]
    pub fn var() -> Self {
        Self::atom(ScaleAtom::Ell(0), CFrac::one())
    }

    /// Returns true for the empty monomial.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.factors.is_empty()
    }

    /// The factors of the monomial.
    #[must_use]
    pub fn factors(&self) -> &[(ScaleAtom, CFrac)] {
        &self.factors
    }

    fn push(&mut self, atom: ScaleAtom, exp: CFrac) {
        if exp.sign() == Some(Sign::Zero) {
            return;
        }
        if let Some(entry) = self.factors.iter_mut().find(|(a, _)| *a == atom) {
            entry.1 = entry.1.add(&exp);
            if entry.1.sign() == Some(Sign::Zero) {
                self.factors.retain(|(a, _)| *a != atom);
            }
        } else {
            self.factors.push((atom, exp));
        }
    }

    /// Multiplies two monomials.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (atom, exp) in &other.factors {
            result.push(atom.clone(), exp.clone());
        }
        result.factors.sort_by(|a, b| a.0.cmp(&b.0));
        result
    }

    /// The reciprocal monomial.
    #[must_use]
    pub fn inv(&self) -> Self {
        Self {
            factors: self
                .factors
                .iter()
                .map(|(a, e)| (a.clone(), e.neg()))
                .collect(),
        }
    }

    /// Raises to a constant power.
    #[must_use]
    pub fn pow(&self, exp: &CFrac) -> Self {
        if exp.sign() == Some(Sign::Zero) {
            return Self::one();
        }
        Self {
            factors: self
                .factors
                .iter()
                .map(|(a, e)| (a.clone(), e.mul(exp)))
                .collect(),
        }
    }

    /// The dominant factor: the atom that outgrows all others, with its
    /// exponent. `None` for the empty monomial or on undecidable atoms.
    fn dominant(&self) -> Option<&(ScaleAtom, CFrac)> {
        let mut best: Option<&(ScaleAtom, CFrac)> = None;
        for factor in &self.factors {
            match best {
                None => best = Some(factor),
                Some(current) => {
                    match factor.0.cmp_dominance(&current.0)? {
                        Ordering::Greater => best = Some(factor),
                        // Identical atoms are merged at construction.
                        Ordering::Equal | Ordering::Less => {}
                    }
                }
            }
        }
        best
    }

    /// The eventual direction of the monomial: the sign of the exponent
    /// on its dominant atom.
    pub fn tendency(&self) -> Option<Tendency> {
        let Some((_, exp)) = self.dominant() else {
            return Some(Tendency::One);
        };
        match exp.sign()? {
            Sign::Positive => Some(Tendency::Infinity),
            Sign::Negative => Some(Tendency::Zero),
            Sign::Zero => Some(Tendency::One),
        }
    }

    /// Compares asymptotic growth: `Greater` means `self / other → ∞`,
    /// `Equal` means the monomials are identical.
    pub fn cmp_growth(&self, other: &Self) -> Option<Ordering> {
        let ratio = self.mul(&other.inv());
        match ratio.tendency()? {
            Tendency::One => Some(Ordering::Equal),
            Tendency::Infinity => Some(Ordering::Greater),
            Tendency::Zero => Some(Ordering::Less),
        }
    }

    /// The logarithm of the monomial, as `(coefficient, monomial)` pairs:
    /// `log Π aᵢ^eᵢ = Σ eᵢ · log aᵢ`.
    #[must_use]
    pub fn log_terms(&self) -> Vec<(CFrac, ScaleMono)> {
        self.factors
            .iter()
            .map(|(atom, exp)| (exp.clone(), atom.log()))
            .collect()
    }

    /// The larger of two monomials by growth, when decidable.
    pub fn max_growth(a: &Self, b: &Self) -> Option<Self> {
        match a.cmp_growth(b)? {
            Ordering::Less => Some(b.clone()),
            _ => Some(a.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradus_num::Rational;

    fn q(n: i64, d: i64) -> CFrac {
        CFrac::from_rational(Rational::from_i64(n, d))
    }

    fn n_pow(num: i64, den: i64) -> ScaleMono {
        ScaleMono::atom(ScaleAtom::Ell(0), q(num, den))
    }

    fn log_pow(num: i64, den: i64) -> ScaleMono {
        ScaleMono::atom(ScaleAtom::Ell(1), q(num, den))
    }

    #[test]
    fn test_ell_hierarchy() {
        // n ≻ log n ≻ log log n
        let n = ScaleAtom::Ell(0);
        let log = ScaleAtom::Ell(1);
        let loglog = ScaleAtom::Ell(2);
        assert_eq!(n.cmp_dominance(&log), Some(Ordering::Greater));
        assert_eq!(log.cmp_dominance(&loglog), Some(Ordering::Greater));
        assert_eq!(loglog.cmp_dominance(&n), Some(Ordering::Less));
    }

    #[test]
    fn test_sublinear_times_log_below_linear() {
        // n^0.99999999 · log n ≺ n
        let lhs = n_pow(99_999_999, 100_000_000).mul(&log_pow(1, 1));
        let rhs = n_pow(1, 1);
        assert_eq!(lhs.cmp_growth(&rhs), Some(Ordering::Less));
    }

    #[test]
    fn test_exp_dominates_polynomial() {
        // e^n ≻ n^1000000
        let exp_n = ScaleMono::atom(ScaleAtom::Exp(ScaleMono::var()), q(1, 1));
        let poly = n_pow(1_000_000, 1);
        assert_eq!(exp_n.cmp_growth(&poly), Some(Ordering::Greater));
    }

    #[test]
    fn test_exp_of_log_square_between() {
        // n^k ≺ e^(log²n) ≺ e^(n^(1/2))
        let quasi = ScaleMono::atom(ScaleAtom::Exp(log_pow(2, 1)), q(1, 1));
        let sub_exp = ScaleMono::atom(ScaleAtom::Exp(n_pow(1, 2)), q(1, 1));
        assert_eq!(n_pow(50, 1).cmp_growth(&quasi), Some(Ordering::Less));
        assert_eq!(quasi.cmp_growth(&sub_exp), Some(Ordering::Less));
    }

    #[test]
    fn test_exp_args_compared_recursively() {
        // e^(n·log n) ≻ e^n, and the ratio of the two Exp atoms decides it
        let n_log_n = ScaleMono::var().mul(&log_pow(1, 1));
        let strong = ScaleMono::atom(ScaleAtom::Exp(n_log_n), q(1, 1));
        let weak = ScaleMono::atom(ScaleAtom::Exp(ScaleMono::var()), q(1, 1));
        assert_eq!(strong.cmp_growth(&weak), Some(Ordering::Greater));
    }

    #[test]
    fn test_exp_below_variable_when_arg_sublogarithmic() {
        // e^((log log n)²) ≺ n, but ≻ any power of log n
        let middle = ScaleMono::atom(
            ScaleAtom::Exp(ScaleMono::atom(ScaleAtom::Ell(2), q(2, 1))),
            q(1, 1),
        );
        assert_eq!(middle.cmp_growth(&n_pow(1, 1)), Some(Ordering::Less));
        assert_eq!(middle.cmp_growth(&log_pow(100, 1)), Some(Ordering::Greater));
    }

    #[test]
    fn test_mul_cancels() {
        let m = n_pow(2, 1).mul(&log_pow(3, 1));
        let ratio = m.mul(&m.inv());
        assert!(ratio.is_one());
        assert_eq!(ratio.tendency(), Some(Tendency::One));
    }

    #[test]
    fn test_tendency_sign_of_dominant() {
        // n^(-1/2) · log^100 n → 0
        let m = n_pow(-1, 2).mul(&log_pow(100, 1));
        assert_eq!(m.tendency(), Some(Tendency::Zero));
        // n^(1/2) · log^(-100) n → ∞
        let m = n_pow(1, 2).mul(&log_pow(-100, 1));
        assert_eq!(m.tendency(), Some(Tendency::Infinity));
    }
}
