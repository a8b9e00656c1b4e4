//! Scale polynomials: finite sums of monomials with interval coefficients,
//! plus a classified remainder.
//!
//! The expansion of an expression (or of its logarithm) is carried as
//!
//! ```text
//!   f  =  Σ cᵢ(n)·mᵢ  +  tail
//! ```
//!
//! where each `mᵢ` is a scale monomial and `cᵢ(n)` is eventually confined
//! to an exact constant interval (`lo = hi` means the term is exactly
//! `c·mᵢ`; a wider interval carries a bounded oscillation such as `sin n`).
//! The tail records what is known about everything not captured by the
//! terms: nothing left, `o(m)`, `O(m)`, or unknown.
//!
//! Operations are total: anything unrepresentable degrades to a coarser
//! tail, never to a wrong expansion.

use gradus_num::{CFrac, Sign};
use std::cmp::Ordering;

use crate::scale::ScaleMono;

/// One term: a coefficient interval times a monomial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PTerm {
    /// Eventual lower bound of the coefficient.
    pub lo: CFrac,
    /// Eventual upper bound of the coefficient.
    pub hi: CFrac,
    /// The scale monomial.
    pub mono: ScaleMono,
}

impl PTerm {
    /// A term with an exact constant coefficient.
    #[must_use]
    pub fn exact(coef: CFrac, mono: ScaleMono) -> Self {
        Self {
            lo: coef.clone(),
            hi: coef,
            mono,
        }
    }

    /// A term whose coefficient oscillates within `[lo, hi]`.
    #[must_use]
    pub fn ranged(lo: CFrac, hi: CFrac, mono: ScaleMono) -> Self {
        Self { lo, hi, mono }
    }

    /// True if the coefficient is a single exact constant.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.lo == self.hi || self.lo.sub(&self.hi).is_zero()
    }

    /// True if the term's value is identically zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.lo.is_zero() && self.hi.is_zero()
    }

    fn neg(&self) -> Self {
        Self {
            lo: self.hi.neg(),
            hi: self.lo.neg(),
            mono: self.mono.clone(),
        }
    }

    /// Interval product of two coefficient ranges; `None` when the
    /// endpoint ordering cannot be decided.
    fn coef_mul(&self, other: &Self) -> Option<(CFrac, CFrac)> {
        if self.is_exact() && other.is_exact() {
            let c = self.lo.mul(&other.lo);
            return Some((c.clone(), c));
        }
        let candidates = [
            self.lo.mul(&other.lo),
            self.lo.mul(&other.hi),
            self.hi.mul(&other.lo),
            self.hi.mul(&other.hi),
        ];
        let mut lo = candidates[0].clone();
        let mut hi = candidates[0].clone();
        for c in &candidates[1..] {
            match c.cmp_value(&lo)? {
                Ordering::Less => lo = c.clone(),
                _ => {}
            }
            match c.cmp_value(&hi)? {
                Ordering::Greater => hi = c.clone(),
                _ => {}
            }
        }
        Some((lo, hi))
    }
}

/// What is known about the part of a value not captured by the terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tail {
    /// Nothing: the terms are the whole value.
    None,
    /// A remainder `t` with `t/m → 0`.
    Vanish(ScaleMono),
    /// A remainder `t` with `|t| ≤ C·m` eventually.
    Order(ScaleMono),
    /// No usable bound.
    Unknown,
}

impl Tail {
    /// Combines the tails of two added expansions.
    #[must_use]
    pub fn join(&self, other: &Self) -> Self {
        match (self, other) {
            (Tail::None, t) | (t, Tail::None) => t.clone(),
            (Tail::Unknown, _) | (_, Tail::Unknown) => Tail::Unknown,
            (Tail::Vanish(a), Tail::Vanish(b)) => match ScaleMono::max_growth(a, b) {
                Some(m) => Tail::Vanish(m),
                None => Tail::Unknown,
            },
            (Tail::Vanish(a), Tail::Order(b)) | (Tail::Order(b), Tail::Vanish(a)) => {
                match a.cmp_growth(b) {
                    Some(Ordering::Greater) => Tail::Vanish(a.clone()),
                    Some(_) => Tail::Order(b.clone()),
                    None => Tail::Unknown,
                }
            }
            (Tail::Order(a), Tail::Order(b)) => match ScaleMono::max_growth(a, b) {
                Some(m) => Tail::Order(m),
                None => Tail::Unknown,
            },
        }
    }

    /// Multiplies the bound by a monomial (for products with a bounded
    /// coefficient, which preserve the class).
    #[must_use]
    pub fn scale_mono(&self, m: &ScaleMono) -> Self {
        match self {
            Tail::None => Tail::None,
            Tail::Vanish(t) => Tail::Vanish(t.mul(m)),
            Tail::Order(t) => Tail::Order(t.mul(m)),
            Tail::Unknown => Tail::Unknown,
        }
    }

    /// Product of two tails (both factors bounded by their monomials).
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        match (self, other) {
            (Tail::None, _) | (_, Tail::None) => Tail::None,
            (Tail::Unknown, _) | (_, Tail::Unknown) => Tail::Unknown,
            (Tail::Vanish(a), Tail::Vanish(b) | Tail::Order(b))
            | (Tail::Order(b), Tail::Vanish(a)) => Tail::Vanish(a.mul(b)),
            (Tail::Order(a), Tail::Order(b)) => Tail::Order(a.mul(b)),
        }
    }
}

/// The result of asking a polynomial for its largest monomial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Envelope {
    /// No terms at all.
    Empty,
    /// The largest monomial among the terms.
    Mono(ScaleMono),
    /// Term monomials could not be compared.
    Undecidable,
}

/// A finite sum of interval-coefficient monomials plus a tail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly {
    /// The captured terms, with distinct monomials.
    pub terms: Vec<PTerm>,
    /// The classified remainder.
    pub tail: Tail,
}

impl Poly {
    /// The zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            terms: Vec::new(),
            tail: Tail::None,
        }
    }

    /// A polynomial about which nothing is known.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            terms: Vec::new(),
            tail: Tail::Unknown,
        }
    }

    /// A single-term polynomial.
    #[must_use]
    pub fn term(term: PTerm) -> Self {
        if term.is_zero() {
            return Self::zero();
        }
        Self {
            terms: vec![term],
            tail: Tail::None,
        }
    }

    /// An exact constant polynomial.
    #[must_use]
    pub fn constant(c: CFrac) -> Self {
        Self::term(PTerm::exact(c, ScaleMono::one()))
    }

    /// True if this is exactly the zero polynomial.
    #[must_use]
    pub fn is_exact_zero(&self) -> bool {
        self.terms.is_empty() && self.tail == Tail::None
    }

    /// Addition: terms with identical monomials merge by interval sum.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut terms = self.terms.clone();
        for term in &other.terms {
            if let Some(entry) = terms.iter_mut().find(|t| t.mono == term.mono) {
                entry.lo = entry.lo.add(&term.lo);
                entry.hi = entry.hi.add(&term.hi);
            } else {
                terms.push(term.clone());
            }
        }
        terms.retain(|t| !t.is_zero());
        Self {
            terms,
            tail: self.tail.join(&other.tail),
        }
    }

    /// Negation.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            terms: self.terms.iter().map(PTerm::neg).collect(),
            tail: self.tail.clone(),
        }
    }

    /// Subtraction.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Scales by an exact constant. Degrades to [`Poly::unknown`] only
    /// when the scale's sign is undecidable and a ranged term needs
    /// reorienting.
    #[must_use]
    pub fn scale(&self, c: &CFrac) -> Self {
        match c.sign() {
            Some(Sign::Zero) => return Self::zero(),
            Some(Sign::Positive) => {}
            Some(Sign::Negative) | None => {
                if c.sign().is_none() && self.terms.iter().any(|t| !t.is_exact()) {
                    return Self::unknown();
                }
            }
        }
        let flip = c.sign() == Some(Sign::Negative);
        let terms = self
            .terms
            .iter()
            .map(|t| {
                let (lo, hi) = if flip {
                    (t.hi.mul(c), t.lo.mul(c))
                } else {
                    (t.lo.mul(c), t.hi.mul(c))
                };
                PTerm {
                    lo,
                    hi,
                    mono: t.mono.clone(),
                }
            })
            .collect();
        Self {
            terms,
            tail: self.tail.clone(),
        }
    }

    /// The largest monomial among the terms.
    #[must_use]
    pub fn envelope(&self) -> Envelope {
        let mut best: Option<ScaleMono> = None;
        for term in &self.terms {
            best = Some(match best {
                None => term.mono.clone(),
                Some(current) => match ScaleMono::max_growth(&term.mono, &current) {
                    Some(m) => m,
                    None => return Envelope::Undecidable,
                },
            });
        }
        match best {
            Some(m) => Envelope::Mono(m),
            None => Envelope::Empty,
        }
    }

    /// Multiplication. Cross products whose coefficient interval cannot
    /// be oriented are absorbed into an `O(·)` tail rather than lost.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_exact_zero() || other.is_exact_zero() {
            return Self::zero();
        }

        let mut result = Self {
            terms: Vec::new(),
            tail: Tail::None,
        };
        for a in &self.terms {
            for b in &other.terms {
                let mono = a.mono.mul(&b.mono);
                match a.coef_mul(b) {
                    Some((lo, hi)) => {
                        result = result.add(&Self::term(PTerm::ranged(lo, hi, mono)));
                    }
                    None => {
                        result.tail = result.tail.join(&Tail::Order(mono));
                    }
                }
            }
        }

        // Tail contributions: t1·other, t2·self, t1·t2.
        let cross = |tail: &Tail, poly: &Self| -> Tail {
            match poly.envelope() {
                Envelope::Empty => Tail::None,
                Envelope::Mono(m) => tail.scale_mono(&m),
                Envelope::Undecidable => match tail {
                    Tail::None => Tail::None,
                    _ => Tail::Unknown,
                },
            }
        };
        result.tail = result.tail.join(&cross(&self.tail, other));
        result.tail = result.tail.join(&cross(&other.tail, self));
        result.tail = result.tail.join(&self.tail.mul(&other.tail));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleAtom;
    use gradus_num::Rational;

    fn c(n: i64) -> CFrac {
        CFrac::from_i64(n)
    }

    fn n_mono() -> ScaleMono {
        ScaleMono::var()
    }

    fn log_mono() -> ScaleMono {
        ScaleMono::atom(ScaleAtom::Ell(1), CFrac::one())
    }

    #[test]
    fn test_add_merges_equal_monomials() {
        // 2n + 3n = 5n
        let p = Poly::term(PTerm::exact(c(2), n_mono()));
        let q = Poly::term(PTerm::exact(c(3), n_mono()));
        let sum = p.add(&q);
        assert_eq!(sum.terms.len(), 1);
        assert_eq!(sum.terms[0].lo, c(5));
    }

    #[test]
    fn test_exact_cancellation() {
        // (2n + log n) - 2n = log n
        let p = Poly::term(PTerm::exact(c(2), n_mono()))
            .add(&Poly::term(PTerm::exact(c(1), log_mono())));
        let diff = p.sub(&Poly::term(PTerm::exact(c(2), n_mono())));
        assert_eq!(diff.terms.len(), 1);
        assert_eq!(diff.terms[0].mono, log_mono());
    }

    #[test]
    fn test_ranged_coefficient_addition() {
        // (sin n) + 100000 stays within [99999, 100001]
        let osc = Poly::term(PTerm::ranged(c(-1), c(1), ScaleMono::one()));
        let shifted = osc.add(&Poly::constant(c(100_000)));
        assert_eq!(shifted.terms.len(), 1);
        assert_eq!(shifted.terms[0].lo, c(99_999));
        assert_eq!(shifted.terms[0].hi, c(100_001));
    }

    #[test]
    fn test_mul_distributes() {
        // (n + 1)·(n + 1) = n² + 2n + 1
        let p = Poly::term(PTerm::exact(c(1), n_mono())).add(&Poly::constant(c(1)));
        let sq = p.mul(&p);
        assert_eq!(sq.terms.len(), 3);
        assert_eq!(sq.tail, Tail::None);
    }

    #[test]
    fn test_oscillating_times_growing_is_order_tail() {
        // sin n · n is only known as O(n)
        let osc = Poly::term(PTerm::ranged(c(-1), c(1), ScaleMono::one()));
        let n = Poly::term(PTerm::exact(c(1), n_mono()));
        let prod = osc.mul(&n);
        // The ranged-times-exact product still orients, so it stays a term.
        assert_eq!(prod.terms.len(), 1);
        assert!(!prod.terms[0].is_exact());
    }

    #[test]
    fn test_tail_join_keeps_larger_bound() {
        let t1 = Tail::Order(log_mono());
        let t2 = Tail::Vanish(n_mono());
        assert_eq!(t1.join(&t2), Tail::Vanish(n_mono()));
    }
}
