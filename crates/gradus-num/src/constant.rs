//! Exact symbolic constants.
//!
//! Growth comparisons reduce to sign questions about constants built from
//! rationals, π, logarithms and exponentials: the coefficient of the
//! dominant term of `log(a/b)` might be `log 4 - log 5`, or `π - 4`, or
//! `log(1000001/1000000)`. This module represents such constants exactly
//! as sums of terms `q · Π atom^e` and decides their sign:
//!
//! - structurally where possible (logarithms of rationals are split over
//!   primes, so `log 4 - 2 log 2` cancels to zero, and integer-coefficient
//!   log combinations fold back into a single rational comparison)
//! - by adaptive rational interval refinement otherwise
//!
//! A sign that survives neither route is reported as `None` and the caller
//! degrades to an indeterminate comparison; a wrong sign is never produced.

use num_traits::{One, Zero};
use std::cmp::Ordering;

use crate::integer::factor;
use crate::interval::{self, Interval};
use crate::Rational;

/// The sign of a constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sign {
    /// Strictly negative.
    Negative,
    /// Exactly zero.
    Zero,
    /// Strictly positive.
    Positive,
}

impl Sign {
    /// Flips the sign.
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }

    /// Combines the signs of two factors.
    #[must_use]
    pub fn mul(self, other: Self) -> Self {
        match (self, other) {
            (Sign::Zero, _) | (_, Sign::Zero) => Sign::Zero,
            (Sign::Positive, s) => s,
            (Sign::Negative, s) => s.flip(),
        }
    }

    fn of_rational(r: &Rational) -> Self {
        match r.signum() {
            0 => Sign::Zero,
            s if s < 0 => Sign::Negative,
            _ => Sign::Positive,
        }
    }
}

/// An irrational atom appearing in a constant term.
///
/// Every atom except `Ln` denotes a strictly positive real. `Prime` atoms
/// always carry a non-integer exponent in `(0, 1)` within the owning term,
/// representing surds such as `2^(1/2)`; integer parts are folded into the
/// term's rational coefficient.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Atom {
    /// A prime (or unfactored cofactor) raised to a fractional exponent.
    Prime(u64),
    /// The circle constant π.
    Pi,
    /// Natural logarithm of a canonical constant.
    Ln(Box<Constant>),
    /// `e` raised to a canonical constant (kept with exponent one).
    Exp(Box<Constant>),
}

impl Atom {
    /// The sign of the atom's value, when decidable.
    fn sign(&self) -> Option<Sign> {
        match self {
            Atom::Prime(_) | Atom::Pi | Atom::Exp(_) => Some(Sign::Positive),
            // ln c is positive iff c > 1
            Atom::Ln(arg) => arg.sub(&Constant::one()).sign(),
        }
    }

    fn interval(&self, terms: usize, iters: usize) -> Option<Interval> {
        match self {
            Atom::Prime(p) => {
                let p = i64::try_from(*p).ok()?;
                Some(Interval::point(Rational::from(p)))
            }
            Atom::Pi => Some(interval::pi()),
            Atom::Ln(arg) => interval::ln_interval(&arg.interval(terms, iters)?, terms),
            Atom::Exp(arg) => Some(interval::exp_interval(&arg.interval(terms, iters)?, terms)),
        }
    }
}

/// One term of a constant: `coef · Π atom^exp`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct CTerm {
    atoms: Vec<(Atom, Rational)>,
    coef: Rational,
}

impl CTerm {
    fn rational(coef: Rational) -> Self {
        Self {
            atoms: Vec::new(),
            coef,
        }
    }

    /// Builds a term from a coefficient and raw atom/exponent pairs,
    /// merging duplicates and restoring the canonical form.
    fn normalized(coef: Rational, raw: Vec<(Atom, Rational)>) -> Self {
        let mut coef = coef;
        let mut merged: Vec<(Atom, Rational)> = Vec::new();
        for (atom, exp) in raw {
            if let Some(entry) = merged.iter_mut().find(|(a, _)| *a == atom) {
                entry.1 = &entry.1 + &exp;
            } else {
                merged.push((atom, exp));
            }
        }

        let mut atoms: Vec<(Atom, Rational)> = Vec::new();
        let mut exp_arg = Constant::zero();
        for (atom, exp) in merged {
            if exp.is_zero() {
                continue;
            }
            match atom {
                Atom::Prime(p) => {
                    // Fold the integer part of the exponent into the
                    // coefficient; keep the fractional surd part.
                    let whole = Rational::from_integer(exp.floor());
                    let frac = &exp - &whole;
                    let folded = whole
                        .to_integer()
                        .and_then(|n| n.to_i64())
                        .and_then(|n| i32::try_from(n).ok());
                    match folded {
                        Some(k) => {
                            if k != 0 {
                                coef = &coef * &Rational::from(p as i64).pow(k);
                            }
                            if !frac.is_zero() {
                                atoms.push((Atom::Prime(p), frac));
                            }
                        }
                        // Exponent too large to fold; keep verbatim.
                        None => atoms.push((Atom::Prime(p), exp)),
                    }
                }
                Atom::Exp(arg) => {
                    exp_arg = exp_arg.add(&arg.scale(&exp));
                }
                other => atoms.push((other, exp)),
            }
        }
        if !exp_arg.is_zero() {
            atoms.push((Atom::Exp(Box::new(exp_arg)), Rational::one()));
        }
        atoms.sort();
        Self { atoms, coef }
    }

    fn mul(&self, rhs: &Self) -> Self {
        let raw = self
            .atoms
            .iter()
            .chain(rhs.atoms.iter())
            .cloned()
            .collect();
        Self::normalized(&self.coef * &rhs.coef, raw)
    }

    fn sign(&self) -> Option<Sign> {
        let mut sign = Sign::of_rational(&self.coef);
        for (atom, exp) in &self.atoms {
            match atom.sign()? {
                Sign::Positive => {}
                Sign::Negative => {
                    let k = exp.to_integer()?.to_i64()?;
                    if k % 2 != 0 {
                        sign = sign.flip();
                    }
                }
                Sign::Zero => return None,
            }
        }
        Some(sign)
    }

    fn interval(&self, terms: usize, iters: usize) -> Option<Interval> {
        let mut acc = Interval::point(self.coef.clone());
        for (atom, exp) in &self.atoms {
            let base = atom.interval(terms, iters)?;
            let num = i32::try_from(exp.numerator().to_i64()?).ok()?;
            let den = u32::try_from(exp.denominator().to_i64()?).ok()?;
            let powered = interval::pow_rational(&base, num, den, iters)?;
            acc = acc.mul(&powered);
        }
        Some(acc)
    }
}

/// An exact constant: a canonical sum of terms `q · Π atom^e`.
///
/// The derived orderings are *structural* (used to keep canonical forms
/// sorted), not numeric; numeric comparison goes through [`Constant::sign`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Constant {
    terms: Vec<CTerm>,
}

impl Constant {
    /// The constant zero.
    #[must_use]
    pub fn zero() -> Self {
        Self { terms: Vec::new() }
    }

    /// The constant one.
    #[must_use]
    pub fn one() -> Self {
        Self::from_rational(Rational::one())
    }

    /// Builds a constant from an exact rational.
    #[must_use]
    pub fn from_rational(r: Rational) -> Self {
        if r.is_zero() {
            return Self::zero();
        }
        Self {
            terms: vec![CTerm::rational(r)],
        }
    }

    /// Builds a constant from an i64.
    #[must_use]
    pub fn from_i64(n: i64) -> Self {
        Self::from_rational(Rational::from(n))
    }

    /// The constant π.
    #[must_use]
    pub fn pi() -> Self {
        Self {
            terms: vec![CTerm::normalized(
                Rational::one(),
                vec![(Atom::Pi, Rational::one())],
            )],
        }
    }

    /// Returns true if this is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns true if this is exactly one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.as_rational().is_some_and(|r| r.is_one())
    }

    /// Extracts the value as a rational if no irrational atoms appear.
    #[must_use]
    pub fn as_rational(&self) -> Option<Rational> {
        match self.terms.as_slice() {
            [] => Some(Rational::zero()),
            [t] if t.atoms.is_empty() => Some(t.coef.clone()),
            _ => None,
        }
    }

    fn from_terms(terms: Vec<CTerm>) -> Self {
        let mut merged: Vec<CTerm> = Vec::new();
        for term in terms {
            if let Some(entry) = merged.iter_mut().find(|t| t.atoms == term.atoms) {
                entry.coef = &entry.coef + &term.coef;
            } else {
                merged.push(term);
            }
        }
        merged.retain(|t| !t.coef.is_zero());
        merged.sort();
        Self { terms: merged }
    }

    /// Addition.
    #[must_use]
    pub fn add(&self, rhs: &Self) -> Self {
        let mut terms = self.terms.clone();
        terms.extend(rhs.terms.iter().cloned());
        Self::from_terms(terms)
    }

    /// Subtraction.
    #[must_use]
    pub fn sub(&self, rhs: &Self) -> Self {
        self.add(&rhs.neg())
    }

    /// Negation.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .map(|t| CTerm {
                    atoms: t.atoms.clone(),
                    coef: -&t.coef,
                })
                .collect(),
        }
    }

    /// Scaling by an exact rational.
    #[must_use]
    pub fn scale(&self, r: &Rational) -> Self {
        if r.is_zero() {
            return Self::zero();
        }
        Self {
            terms: self
                .terms
                .iter()
                .map(|t| CTerm {
                    atoms: t.atoms.clone(),
                    coef: &t.coef * r,
                })
                .collect(),
        }
    }

    /// Multiplication.
    #[must_use]
    pub fn mul(&self, rhs: &Self) -> Self {
        let mut terms = Vec::with_capacity(self.terms.len() * rhs.terms.len());
        for a in &self.terms {
            for b in &rhs.terms {
                terms.push(a.mul(b));
            }
        }
        Self::from_terms(terms)
    }

    /// Raises to a rational power.
    ///
    /// Supported when the base is a single (positive, or negative with an
    /// integer exponent) term, or when the exponent is a small positive
    /// integer. Returns `None` otherwise.
    #[must_use]
    pub fn pow_rational(&self, exp: &Rational) -> Option<Self> {
        if exp.is_zero() {
            return Some(Self::one());
        }
        if self.is_zero() {
            return if exp.signum() > 0 {
                Some(Self::zero())
            } else {
                None
            };
        }
        if let [term] = self.terms.as_slice() {
            return Some(Self {
                terms: vec![pow_term(term, exp)?],
            });
        }
        // Multi-term base: expand small positive integer powers.
        let k = exp.to_integer()?.to_i64()?;
        if (1..=4).contains(&k) {
            let mut acc = self.clone();
            for _ in 1..k {
                acc = acc.mul(self);
            }
            return Some(acc);
        }
        None
    }

    /// Natural logarithm of a strictly positive rational.
    ///
    /// The result is split over prime factors so that identities such as
    /// `ln 4 = 2 ln 2` hold structurally. Returns `None` for non-positive
    /// arguments.
    #[must_use]
    pub fn ln_rational(r: &Rational) -> Option<Self> {
        if r.signum() <= 0 {
            return None;
        }
        if r.is_one() {
            return Some(Self::zero());
        }
        let num = r.numerator().to_i64();
        let den = r.denominator().to_i64();
        match (num, den) {
            (Some(num), Some(den)) => {
                let mut terms = Vec::new();
                #[allow(clippy::cast_sign_loss)]
                for (value, direction) in [(num as u64, 1i64), (den as u64, -1i64)] {
                    for (p, e) in factor(value) {
                        terms.push(CTerm::normalized(
                            Rational::from(direction * i64::from(e)),
                            vec![(ln_prime_atom(p), Rational::one())],
                        ));
                    }
                }
                Some(Self::from_terms(terms))
            }
            // Too large to factor; keep an atomic logarithm.
            _ => Some(Self {
                terms: vec![CTerm::normalized(
                    Rational::one(),
                    vec![(
                        Atom::Ln(Box::new(Self::from_rational(r.clone()))),
                        Rational::one(),
                    )],
                )],
            }),
        }
    }

    /// Natural logarithm.
    ///
    /// Decomposes single products whose factors are provably positive;
    /// falls back to an atomic `ln` of the whole constant when its sign is
    /// provably positive. Returns `None` when positivity cannot be shown.
    #[must_use]
    pub fn ln(&self) -> Option<Self> {
        if let Some(r) = self.as_rational() {
            return Self::ln_rational(&r);
        }
        if let [term] = self.terms.as_slice() {
            if term.coef.signum() > 0
                && term
                    .atoms
                    .iter()
                    .all(|(a, _)| a.sign() == Some(Sign::Positive))
            {
                let mut acc = Self::ln_rational(&term.coef)?;
                for (atom, exp) in &term.atoms {
                    let ln_atom = match atom {
                        Atom::Prime(p) => Self::ln_rational(&Rational::from(*p as i64))?,
                        Atom::Pi => Self {
                            terms: vec![CTerm::normalized(
                                Rational::one(),
                                vec![(Atom::Ln(Box::new(Self::pi())), Rational::one())],
                            )],
                        },
                        Atom::Exp(arg) => (**arg).clone(),
                        Atom::Ln(_) => Self {
                            terms: vec![CTerm::normalized(
                                Rational::one(),
                                vec![(
                                    Atom::Ln(Box::new(Self {
                                        terms: vec![CTerm::normalized(
                                            Rational::one(),
                                            vec![(atom.clone(), Rational::one())],
                                        )],
                                    })),
                                    Rational::one(),
                                )],
                            )],
                        },
                    };
                    acc = acc.add(&ln_atom.scale(exp));
                }
                return Some(acc);
            }
        }
        if self.sign()? == Sign::Positive {
            return Some(Self {
                terms: vec![CTerm::normalized(
                    Rational::one(),
                    vec![(Atom::Ln(Box::new(self.clone())), Rational::one())],
                )],
            });
        }
        None
    }

    /// The exponential `e^c`, in canonical product form.
    ///
    /// Terms of the form `q · ln x` fold back into `x^q`; everything else
    /// stays under a single `Exp` atom. The result is always a single term.
    #[must_use]
    pub fn exp_of(arg: &Self) -> Self {
        let mut product = CTerm::rational(Rational::one());
        let mut residual = Vec::new();
        for term in &arg.terms {
            let folded = match term.atoms.as_slice() {
                [(Atom::Ln(base), exp)] if exp.is_one() => base.pow_rational(&term.coef),
                _ => None,
            };
            match folded {
                Some(base_pow) => {
                    if let [t] = base_pow.terms.as_slice() {
                        product = product.mul(t);
                    } else {
                        residual.push(term.clone());
                    }
                }
                None => residual.push(term.clone()),
            }
        }
        if !residual.is_empty() {
            let inner = Self::from_terms(residual);
            product = product.mul(&CTerm::normalized(
                Rational::one(),
                vec![(Atom::Exp(Box::new(inner)), Rational::one())],
            ));
        }
        Self::from_terms(vec![product])
    }

    /// Determines the sign, exactly where possible and by interval
    /// refinement otherwise. `None` means undecided.
    #[must_use]
    pub fn sign(&self) -> Option<Sign> {
        if self.terms.is_empty() {
            return Some(Sign::Zero);
        }

        // Uniform term signs decide the sum.
        let term_signs: Vec<Option<Sign>> = self.terms.iter().map(CTerm::sign).collect();
        if let Some(first) = term_signs[0] {
            if term_signs.iter().all(|s| *s == Some(first)) {
                return Some(first);
            }
        }

        if let Some(sign) = self.pure_log_sign() {
            return Some(sign);
        }

        for round in 0..4 {
            let terms = 16 << round;
            let iters = 32 << round;
            if let Some(iv) = self.interval(terms, iters) {
                if !iv.contains_zero() {
                    return Some(if iv.lo.signum() > 0 {
                        Sign::Positive
                    } else {
                        Sign::Negative
                    });
                }
            } else {
                return None;
            }
        }
        None
    }

    /// Exact sign for sums of rational multiples of logarithms of
    /// rationals: `Σ qᵢ ln rᵢ` has the sign of `Π rᵢ^(qᵢ·L) - 1`.
    fn pure_log_sign(&self) -> Option<Sign> {
        let mut pairs: Vec<(Rational, Rational)> = Vec::new();
        for term in &self.terms {
            match term.atoms.as_slice() {
                [(Atom::Ln(arg), exp)] if exp.is_one() => {
                    let r = arg.as_rational()?;
                    pairs.push((term.coef.clone(), r));
                }
                _ => return None,
            }
        }
        let mut scale = Rational::one();
        for (q, _) in &pairs {
            scale = scale * Rational::from_integer(q.denominator());
        }
        let mut product = Rational::one();
        for (q, r) in &pairs {
            let power = (q * &scale).to_integer()?.to_i64()?;
            let power = i32::try_from(power).ok()?;
            if power.unsigned_abs() > 4096 {
                return None;
            }
            product = product * r.pow(power);
        }
        Some(match product.partial_cmp(&Rational::one())? {
            Ordering::Less => Sign::Negative,
            Ordering::Equal => Sign::Zero,
            Ordering::Greater => Sign::Positive,
        })
    }

    fn interval(&self, terms: usize, iters: usize) -> Option<Interval> {
        let mut acc = Interval::point(Rational::zero());
        for term in &self.terms {
            acc = acc.add(&term.interval(terms, iters)?);
        }
        Some(acc)
    }
}

#[allow(clippy::cast_possible_wrap)]
fn ln_prime_atom(p: u64) -> Atom {
    Atom::Ln(Box::new(Constant::from_i64(p as i64)))
}

/// Raises a single term to a rational power.
fn pow_term(term: &CTerm, exp: &Rational) -> Option<CTerm> {
    // Coefficient part.
    let mut raw: Vec<(Atom, Rational)> = Vec::new();
    let mut coef = Rational::one();
    let base = &term.coef;
    if base.is_negative() {
        let k = exp.to_integer()?.to_i64()?;
        let k = i32::try_from(k).ok()?;
        coef = base.pow(k);
    } else {
        let num = base.numerator().to_i64()?;
        let den = base.denominator().to_i64()?;
        #[allow(clippy::cast_sign_loss)]
        for (value, direction) in [(num as u64, 1i64), (den as u64, -1i64)] {
            for (p, e) in factor(value) {
                let total = &(exp * &Rational::from(i64::from(e))) * &Rational::from(direction);
                raw.push((Atom::Prime(p), total));
            }
        }
    }
    // Atom part.
    for (atom, e) in &term.atoms {
        match atom {
            Atom::Exp(arg) => {
                let scaled = arg.scale(&(e * exp));
                raw.push((Atom::Exp(Box::new(scaled)), Rational::one()));
            }
            other => raw.push((other.clone(), e * exp)),
        }
    }
    Some(CTerm::normalized(coef, raw))
}

/// A quotient of two constants.
///
/// Coefficients in the growth analysis are closed under division but
/// constants are not, so quotients are carried explicitly. The denominator
/// is flipped positive whenever its sign is known.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CFrac {
    num: Constant,
    den: Constant,
}

impl CFrac {
    /// Creates a quotient.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is exactly zero.
    #[must_use]
    pub fn new(num: Constant, den: Constant) -> Self {
        assert!(!den.is_zero(), "denominator cannot be zero");
        if den.sign() == Some(Sign::Negative) {
            Self {
                num: num.neg(),
                den: den.neg(),
            }
        } else {
            Self { num, den }
        }
    }

    /// Lifts a constant to a quotient with denominator one.
    #[must_use]
    pub fn from_constant(num: Constant) -> Self {
        Self {
            num,
            den: Constant::one(),
        }
    }

    /// Builds from an exact rational.
    #[must_use]
    pub fn from_rational(r: Rational) -> Self {
        Self::from_constant(Constant::from_rational(r))
    }

    /// Builds from an i64.
    #[must_use]
    pub fn from_i64(n: i64) -> Self {
        Self::from_constant(Constant::from_i64(n))
    }

    /// The value one.
    #[must_use]
    pub fn one() -> Self {
        Self::from_constant(Constant::one())
    }

    /// The value zero.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_constant(Constant::zero())
    }

    /// True if the value is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    /// True if the value is exactly one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.num == self.den || self.num.sub(&self.den).is_zero()
    }

    /// Extracts an exact rational value, if the quotient reduces to one.
    #[must_use]
    pub fn as_rational(&self) -> Option<Rational> {
        let num = self.num.as_rational()?;
        let den = self.den.as_rational()?;
        if den.is_zero() {
            return None;
        }
        Some(&num / &den)
    }

    /// The sign of the value, when decidable.
    #[must_use]
    pub fn sign(&self) -> Option<Sign> {
        let num = self.num.sign()?;
        let den = self.den.sign()?;
        if den == Sign::Zero {
            return None;
        }
        Some(num.mul(den))
    }

    /// Addition.
    #[must_use]
    pub fn add(&self, rhs: &Self) -> Self {
        if self.den == rhs.den {
            return Self::new(self.num.add(&rhs.num), self.den.clone());
        }
        Self::new(
            self.num.mul(&rhs.den).add(&rhs.num.mul(&self.den)),
            self.den.mul(&rhs.den),
        )
    }

    /// Subtraction.
    #[must_use]
    pub fn sub(&self, rhs: &Self) -> Self {
        self.add(&rhs.neg())
    }

    /// Negation.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            num: self.num.neg(),
            den: self.den.clone(),
        }
    }

    /// Multiplication.
    #[must_use]
    pub fn mul(&self, rhs: &Self) -> Self {
        Self::new(self.num.mul(&rhs.num), self.den.mul(&rhs.den))
    }

    /// Scaling by an exact rational.
    #[must_use]
    pub fn scale(&self, r: &Rational) -> Self {
        Self {
            num: self.num.scale(r),
            den: self.den.clone(),
        }
    }

    /// Division. Returns `None` when the divisor is exactly zero.
    #[must_use]
    pub fn div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        Some(Self::new(
            self.num.mul(&rhs.den),
            self.den.mul(&rhs.num),
        ))
    }

    /// Reciprocal. Returns `None` when the value is exactly zero.
    #[must_use]
    pub fn recip(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        Some(Self::new(self.den.clone(), self.num.clone()))
    }

    /// Raises to a rational power.
    #[must_use]
    pub fn pow_rational(&self, exp: &Rational) -> Option<Self> {
        Some(Self::new(
            self.num.pow_rational(exp)?,
            self.den.pow_rational(exp)?,
        ))
    }

    /// Natural logarithm of the value, as a constant.
    #[must_use]
    pub fn ln(&self) -> Option<Constant> {
        Some(self.num.ln()?.sub(&self.den.ln()?))
    }

    /// The exponential `e^self`, when the denominator is rational.
    #[must_use]
    pub fn exp(&self) -> Option<Self> {
        let den = self.den.as_rational()?;
        if den.is_zero() {
            return None;
        }
        let arg = self.num.scale(&den.recip());
        Some(Self::from_constant(Constant::exp_of(&arg)))
    }

    /// Numeric comparison via the sign of the difference.
    #[must_use]
    pub fn cmp_value(&self, rhs: &Self) -> Option<Ordering> {
        Some(match self.sub(rhs).sign()? {
            Sign::Negative => Ordering::Less,
            Sign::Zero => Ordering::Equal,
            Sign::Positive => Ordering::Greater,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ln_of(n: i64) -> Constant {
        Constant::ln_rational(&Rational::from(n)).unwrap()
    }

    #[test]
    fn test_log_four_is_two_log_two() {
        let diff = ln_of(4).sub(&ln_of(2).scale(&Rational::from(2)));
        assert!(diff.is_zero());
    }

    #[test]
    fn test_log_four_less_than_log_five() {
        let diff = ln_of(4).sub(&ln_of(5));
        assert_eq!(diff.sign(), Some(Sign::Negative));
    }

    #[test]
    fn test_pure_log_mixed_primes() {
        // 3 ln 2 < 2 ln 3  (8 < 9)
        let diff = ln_of(2).scale(&Rational::from(3)).sub(&ln_of(3).scale(&Rational::from(2)));
        assert_eq!(diff.sign(), Some(Sign::Negative));
    }

    #[test]
    fn test_log_of_nearly_one() {
        let c = Constant::ln_rational(&Rational::from_i64(1_000_001, 1_000_000)).unwrap();
        assert_eq!(c.sign(), Some(Sign::Positive));
    }

    #[test]
    fn test_pi_less_than_four() {
        let diff = Constant::pi().sub(&Constant::from_i64(4));
        assert_eq!(diff.sign(), Some(Sign::Negative));
        let diff = Constant::pi().sub(&Constant::from_i64(3));
        assert_eq!(diff.sign(), Some(Sign::Positive));
    }

    #[test]
    fn test_log_pi_positive() {
        let ln_pi = Constant::pi().ln().unwrap();
        assert_eq!(ln_pi.sign(), Some(Sign::Positive));
        // ln π < ln 4
        assert_eq!(ln_pi.sub(&ln_of(4)).sign(), Some(Sign::Negative));
    }

    #[test]
    fn test_exp_folds_logs() {
        // e^(3 ln 2) = 8
        let arg = ln_of(2).scale(&Rational::from(3));
        let value = Constant::exp_of(&arg);
        assert_eq!(value.as_rational(), Some(Rational::from(8)));
    }

    #[test]
    fn test_exp_fold_half_log_two_is_sqrt_two() {
        // e^(ln 2 / 2) = 2^(1/2), and its square is 2
        let arg = ln_of(2).scale(&Rational::from_i64(1, 2));
        let sqrt2 = Constant::exp_of(&arg);
        assert!(sqrt2.as_rational().is_none());
        let two = sqrt2.mul(&sqrt2);
        assert_eq!(two.as_rational(), Some(Rational::from(2)));
    }

    #[test]
    fn test_surd_power() {
        // 2^(1/2) via pow_rational, squared back to 2
        let sqrt2 = Constant::from_i64(2)
            .pow_rational(&Rational::from_i64(1, 2))
            .unwrap();
        assert_eq!(sqrt2.mul(&sqrt2).as_rational(), Some(Rational::from(2)));
        assert_eq!(sqrt2.sign(), Some(Sign::Positive));
    }

    #[test]
    fn test_multi_term_sign() {
        // 2 + π > 0, 2 - π < 0
        let two = Constant::from_i64(2);
        assert_eq!(two.add(&Constant::pi()).sign(), Some(Sign::Positive));
        assert_eq!(two.sub(&Constant::pi()).sign(), Some(Sign::Negative));
    }

    #[test]
    fn test_cfrac_arithmetic() {
        let half = CFrac::from_rational(Rational::from_i64(1, 2));
        let third = CFrac::from_rational(Rational::from_i64(1, 3));
        let sum = half.add(&third);
        assert_eq!(sum.as_rational(), Some(Rational::from_i64(5, 6)));
        assert_eq!(
            half.cmp_value(&third),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_cfrac_div_by_irrational() {
        // (2 + π) / (2 + π) = 1
        let c = CFrac::from_constant(Constant::from_i64(2).add(&Constant::pi()));
        let one = c.div(&c).unwrap();
        assert!(one.is_one());
    }

    #[test]
    fn test_ln_of_million_ratio_base() {
        // The l'th root folding: ln(1.000001) = ln 101 + ln 9901 - 6 ln 2 - 6 ln 5
        let c = Constant::ln_rational(&Rational::from_i64(1_000_001, 1_000_000)).unwrap();
        let rebuilt = ln_of(101)
            .add(&ln_of(9901))
            .sub(&ln_of(2).scale(&Rational::from(6)))
            .sub(&ln_of(5).scale(&Rational::from(6)));
        assert!(c.sub(&rebuilt).is_zero());
    }
}
