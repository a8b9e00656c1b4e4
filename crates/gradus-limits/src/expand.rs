//! Expansion of expressions over the asymptotic scale.
//!
//! The analyzer walks an expression bottom-up and produces a [`Poly`]:
//! a finite sum of interval-coefficient scale monomials plus a classified
//! remainder. The rules mirror how one simplifies by hand:
//!
//! - sums and products expand exactly while they can, degrading to
//!   `o(·)`/`O(·)` tails when they cannot
//! - `f^g` goes through `e^(g · log f)`, with `e^(c·log n)` folding back
//!   into `n^c` so that exponential atoms stay normalized
//! - `binomial(f, k)` with constant `k` (or `binomial(f, f-k)`) expands
//!   into its falling-factorial polynomial
//! - `sin`/`cos` of an unbounded argument become an oscillation confined
//!   to `[-1, 1]`; of a vanishing argument, their leading series term
//!
//! Every rule is conservative: when a case is not covered the expansion
//! collapses to an unknown tail and the oracle reports no result, rather
//! than guessing.

use gradus_core::{ExprArena, ExprHandle, ExprNode, Func};
use gradus_num::{CFrac, Constant, Integer, Rational, Sign};
use num_traits::Zero;
use rustc_hash::FxHashMap;

use crate::scale::{ScaleAtom, ScaleMono, Tendency};
use crate::series::{Envelope, PTerm, Poly, Tail};

/// Hard cap on expression nesting, in place of a wall-clock deadline:
/// the analysis is structural, so depth is the one resource that can
/// blow up on pathological input.
const MAX_DEPTH: u32 = 256;

/// Largest constant `k` for which `binomial(f, k)` is expanded.
const MAX_BINOMIAL: i64 = 64;

/// Expands expressions over the asymptotic scale, memoizing per handle.
///
/// One analyzer is bound to one arena and one limit variable; the
/// comparison cache above it shares the same lifetime.
pub struct Analyzer<'a> {
    arena: &'a ExprArena,
    var: ExprHandle,
    memo: FxHashMap<ExprHandle, Poly>,
    depth: u32,
}

impl<'a> Analyzer<'a> {
    /// Creates an analyzer for expressions in `arena`, with limits taken
    /// with respect to `var`.
    #[must_use]
    pub fn new(arena: &'a ExprArena, var: ExprHandle) -> Self {
        Self {
            arena,
            var,
            memo: FxHashMap::default(),
            depth: 0,
        }
    }

    /// The arena this analyzer reads from.
    #[must_use]
    pub fn arena(&self) -> &ExprArena {
        self.arena
    }

    /// The expansion of `expr` over the asymptotic scale.
    pub fn poly(&mut self, expr: ExprHandle) -> Poly {
        if let Some(cached) = self.memo.get(&expr) {
            return cached.clone();
        }
        if self.depth >= MAX_DEPTH {
            return Poly::unknown();
        }
        self.depth += 1;
        let result = self.expand(expr);
        self.depth -= 1;
        self.memo.insert(expr, result.clone());
        result
    }

    fn expand(&mut self, expr: ExprHandle) -> Poly {
        match self.arena.get(expr).clone() {
            ExprNode::Integer(k) => Poly::constant(CFrac::from_i64(k)),
            #[allow(clippy::cast_possible_wrap)]
            ExprNode::Rational(num, den) => {
                Poly::constant(CFrac::from_rational(Rational::from_i64(num, den as i64)))
            }
            ExprNode::Pi => Poly::constant(CFrac::from_constant(Constant::pi())),
            ExprNode::Symbol(_) => {
                if expr == self.var {
                    Poly::term(PTerm::exact(CFrac::one(), ScaleMono::var()))
                } else {
                    // Foreign symbols have no growth along the chosen
                    // variable's sequence; the oracle refuses them.
                    Poly::unknown()
                }
            }
            ExprNode::Neg(arg) => self.poly(arg).neg(),
            ExprNode::Add(args) => {
                let mut acc = Poly::zero();
                for &arg in &args {
                    acc = acc.add(&self.poly(arg));
                }
                acc
            }
            ExprNode::Mul(args) => {
                let mut acc = Poly::constant(CFrac::one());
                for &arg in &args {
                    acc = acc.mul(&self.poly(arg));
                }
                acc
            }
            ExprNode::Div { num, den } => {
                let den = invert(&self.poly(den));
                self.poly(num).mul(&den)
            }
            ExprNode::Pow { base, exp } => {
                let base = self.poly(base);
                let exp = self.poly(exp);
                pow(&base, &exp)
            }
            ExprNode::Function { func, args } => match func {
                Func::Log => log_of(&self.poly(args[0])),
                Func::Exp => exp_of(&self.poly(args[0])),
                Func::Sqrt => {
                    let base = self.poly(args[0]);
                    pow_rational(&base, &Rational::from_i64(1, 2))
                }
                Func::Sin => sin_cos(&self.poly(args[0]), true),
                Func::Cos => sin_cos(&self.poly(args[0]), false),
                Func::Binomial => self.binomial(args[0], args[1]),
            },
        }
    }

    /// `binomial(n_expr, k_expr)` with a constant `k` (directly, or as
    /// `n - k`) expands to its falling factorial over `k!`.
    fn binomial(&mut self, n_expr: ExprHandle, k_expr: ExprHandle) -> Poly {
        let n_poly = self.poly(n_expr);
        let k_poly = self.poly(k_expr);

        let direct = as_const_rational(&k_poly)
            .and_then(|r| r.to_integer())
            .and_then(|k| k.to_i64());
        let complement = as_const_rational(&n_poly.sub(&k_poly))
            .and_then(|r| r.to_integer())
            .and_then(|k| k.to_i64());

        let k = match (direct, complement) {
            (Some(k), _) if (0..=MAX_BINOMIAL).contains(&k) => k,
            (_, Some(k)) if (0..=MAX_BINOMIAL).contains(&k) => k,
            _ => return Poly::unknown(),
        };

        // binomial(f, k) = f·(f-1)···(f-k+1) / k!
        let mut acc = Poly::constant(CFrac::one());
        for i in 0..k {
            let shifted = n_poly.sub(&Poly::constant(CFrac::from_i64(i)));
            acc = acc.mul(&shifted);
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let k_factorial = Rational::from_integer(Integer::factorial(k as u32));
        acc.scale(&CFrac::from_rational(k_factorial.recip()))
    }
}

/// `base^exp` for already-expanded operands.
fn pow(base: &Poly, exp: &Poly) -> Poly {
    if let Some(r) = as_const_rational(exp) {
        return pow_rational(base, &r);
    }
    // General case: f^g = e^(g · log f).
    exp_of(&exp.mul(&log_of(base)))
}

/// `base^r` for an exact rational exponent.
fn pow_rational(base: &Poly, r: &Rational) -> Poly {
    if r.is_zero() {
        return Poly::constant(CFrac::one());
    }
    if base.is_exact_zero() {
        return if r.signum() > 0 {
            Poly::zero()
        } else {
            Poly::unknown()
        };
    }

    // Small integer exponents expand exactly even for sums.
    if let Some(k) = r.to_integer().and_then(|n| n.to_i64()) {
        if (1..=8).contains(&k) {
            let mut acc = base.clone();
            for _ in 1..k {
                acc = acc.mul(base);
            }
            return acc;
        }
        if (-8..=-1).contains(&k) {
            let mut acc = base.clone();
            for _ in 1..-k {
                acc = acc.mul(base);
            }
            return invert(&acc);
        }
    }

    // Single-term bases raise directly.
    if base.tail == Tail::None && base.terms.len() == 1 {
        let term = &base.terms[0];
        let mono = term.mono.pow(&CFrac::from_rational(r.clone()));
        if term.is_exact() {
            if let Some(coef) = term.lo.pow_rational(r) {
                return Poly::term(PTerm::exact(coef, mono));
            }
        } else if term.lo.sign() == Some(Sign::Positive) {
            if let (Some(lo), Some(hi)) = (term.lo.pow_rational(r), term.hi.pow_rational(r)) {
                let (lo, hi) = if r.is_negative() { (hi, lo) } else { (lo, hi) };
                return Poly::term(PTerm::ranged(lo, hi, mono));
            }
        }
    }

    // Fall back to the exponential route.
    let exp = Poly::constant(CFrac::from_rational(r.clone()));
    exp_of(&exp.mul(&log_of(base)))
}

/// The dominant term of a polynomial, with everything else classified.
pub struct Lead {
    /// The strictly dominant term.
    pub term: PTerm,
    /// The remaining terms and tail, as a bound in absolute units.
    pub rest: Tail,
}

/// Splits off the strictly dominant term.
///
/// Requirements: every other term's monomial is strictly below the
/// dominant one; the tail is strictly below it too (an `o(m₀)` tail is
/// allowed at equality, since it still vanishes relative to the lead).
pub fn lead_split(p: &Poly) -> Option<Lead> {
    let mut dominant: Option<usize> = None;
    for (i, term) in p.terms.iter().enumerate() {
        match dominant {
            None => dominant = Some(i),
            Some(j) => {
                match term.mono.cmp_growth(&p.terms[j].mono)? {
                    std::cmp::Ordering::Greater => dominant = Some(i),
                    std::cmp::Ordering::Less => {}
                    // Monomials are merged on construction.
                    std::cmp::Ordering::Equal => return None,
                }
            }
        }
    }
    let dominant = dominant?;
    let lead_mono = p.terms[dominant].mono.clone();

    let mut rest = Tail::None;
    for (i, term) in p.terms.iter().enumerate() {
        if i == dominant {
            continue;
        }
        match term.mono.cmp_growth(&lead_mono)? {
            std::cmp::Ordering::Less => rest = rest.join(&Tail::Order(term.mono.clone())),
            _ => return None,
        }
    }
    match &p.tail {
        Tail::None => {}
        Tail::Vanish(t) => match t.cmp_growth(&lead_mono)? {
            std::cmp::Ordering::Greater => return None,
            _ => rest = rest.join(&Tail::Vanish(t.clone())),
        },
        Tail::Order(t) => match t.cmp_growth(&lead_mono)? {
            std::cmp::Ordering::Less => rest = rest.join(&Tail::Order(t.clone())),
            _ => return None,
        },
        Tail::Unknown => return None,
    }

    Some(Lead {
        term: p.terms[dominant].clone(),
        rest,
    })
}

/// The reciprocal of a polynomial: exact for single terms, a lead plus
/// `O(·)` correction otherwise.
pub fn invert(p: &Poly) -> Poly {
    if p.is_exact_zero() {
        return Poly::unknown();
    }
    let Some(lead) = lead_split(p) else {
        return Poly::unknown();
    };
    let term = &lead.term;
    let inv_mono = term.mono.inv();

    let inverted = if term.is_exact() {
        match term.lo.recip() {
            Some(coef) => PTerm::exact(coef, inv_mono.clone()),
            None => return Poly::unknown(),
        }
    } else {
        // A ranged coefficient inverts only when bounded away from zero.
        let positive = term.lo.sign() == Some(Sign::Positive);
        let negative = term.hi.sign() == Some(Sign::Negative);
        if !positive && !negative {
            return Poly::unknown();
        }
        match (term.hi.recip(), term.lo.recip()) {
            (Some(lo), Some(hi)) => PTerm::ranged(lo, hi, inv_mono.clone()),
            _ => return Poly::unknown(),
        }
    };

    // 1/P = 1/lead · (1 + O(rest/lead)); the correction scales by m₀⁻².
    let correction = lead
        .rest
        .scale_mono(&inv_mono.mul(&inv_mono));
    let mut result = Poly::term(inverted);
    result.tail = result.tail.join(&correction);
    result
}

/// The logarithm of a polynomial with a positive dominant term.
pub fn log_of(p: &Poly) -> Poly {
    let Some(lead) = lead_split(p) else {
        return Poly::unknown();
    };
    let term = &lead.term;
    if term.lo.sign() != Some(Sign::Positive) {
        // log of a non-positive (or undecided) leading coefficient
        return Poly::unknown();
    }

    let mut result = Poly::zero();
    // log(Π aᵢ^eᵢ) = Σ eᵢ log aᵢ
    for (coef, mono) in term.mono.log_terms() {
        result = result.add(&Poly::term(PTerm::exact(coef, mono)));
    }
    // log of the coefficient interval
    if term.is_exact() {
        match term.lo.ln() {
            Some(c) => {
                result = result.add(&Poly::constant(CFrac::from_constant(c)));
            }
            None => result.tail = result.tail.join(&Tail::Order(ScaleMono::one())),
        }
    } else {
        match (term.lo.ln(), term.hi.ln()) {
            (Some(lo), Some(hi)) => {
                result = result.add(&Poly::term(PTerm::ranged(
                    CFrac::from_constant(lo),
                    CFrac::from_constant(hi),
                    ScaleMono::one(),
                )));
            }
            _ => result.tail = result.tail.join(&Tail::Order(ScaleMono::one())),
        }
    }
    // log(1 + rest/lead) keeps the class of rest/lead.
    let rel = lead.rest.scale_mono(&term.mono.inv());
    result.tail = result.tail.join(&rel);
    result
}

/// The exponential of a polynomial, term by term:
/// `e^(Σ cᵢ mᵢ) = Π e^(cᵢ mᵢ)`.
pub fn exp_of(p: &Poly) -> Poly {
    let mut mono = ScaleMono::one();
    let mut lo = CFrac::one();
    let mut hi = CFrac::one();
    let mut rel_tail = Tail::None;
    let mut bounded_unknown = false;

    for term in &p.terms {
        match term.mono.tendency() {
            Some(Tendency::One) => {
                // Constant exponent part: a multiplicative constant factor.
                match (term.lo.exp(), term.hi.exp()) {
                    (Some(flo), Some(fhi)) => {
                        lo = lo.mul(&flo);
                        hi = hi.mul(&fhi);
                    }
                    _ => bounded_unknown = true,
                }
            }
            Some(Tendency::Zero) => {
                // e^(vanishing) = 1 + O(vanishing)
                rel_tail = rel_tail.join(&Tail::Order(term.mono.clone()));
            }
            Some(Tendency::Infinity) => {
                if !term.is_exact() {
                    // An oscillating coefficient on an unbounded exponent
                    // term leaves the value unbounded in both directions.
                    return Poly::unknown();
                }
                match exp_atom(&term.mono, &term.lo) {
                    Some(factor) => mono = mono.mul(&factor),
                    None => return Poly::unknown(),
                }
            }
            None => return Poly::unknown(),
        }
    }

    match &p.tail {
        Tail::None => {}
        Tail::Vanish(t) => match t.tendency() {
            Some(Tendency::Zero) => rel_tail = rel_tail.join(&Tail::Vanish(t.clone())),
            Some(Tendency::One) => rel_tail = rel_tail.join(&Tail::Vanish(ScaleMono::one())),
            _ => return Poly::unknown(),
        },
        Tail::Order(t) => match t.tendency() {
            Some(Tendency::Zero) => rel_tail = rel_tail.join(&Tail::Order(t.clone())),
            // e^(O(1)) is a positive bounded factor with unknown bounds.
            Some(Tendency::One) => bounded_unknown = true,
            _ => return Poly::unknown(),
        },
        Tail::Unknown => return Poly::unknown(),
    }

    if bounded_unknown {
        return Poly {
            terms: Vec::new(),
            tail: Tail::Order(mono),
        };
    }

    let term = if lo == hi || lo.sub(&hi).is_zero() {
        PTerm::exact(lo, mono.clone())
    } else {
        PTerm::ranged(lo, hi, mono.clone())
    };
    let mut result = Poly::term(term);
    result.tail = rel_tail.scale_mono(&mono);
    result
}

/// Builds the scale factor for `e^(c·m)` with `m → ∞`: `Exp(m)^c`, or the
/// fold `Ell(k-1)^c` when `m` is exactly a single iterated logarithm.
fn exp_atom(mono: &ScaleMono, coef: &CFrac) -> Option<ScaleMono> {
    if let [(ScaleAtom::Ell(k), exp)] = mono.factors() {
        if *k >= 1 && exp.is_one() {
            return Some(ScaleMono::atom(ScaleAtom::Ell(k - 1), coef.clone()));
        }
    }
    Some(ScaleMono::atom(ScaleAtom::Exp(mono.clone()), coef.clone()))
}

/// `sin`/`cos` of an expanded argument.
fn sin_cos(arg: &Poly, is_sin: bool) -> Poly {
    if arg.is_exact_zero() {
        return if is_sin {
            Poly::zero()
        } else {
            Poly::constant(CFrac::one())
        };
    }

    match crate::limit::limit_of_poly(arg) {
        // Oscillation confined to [-1, 1] along the integer sequence.
        Some(crate::limit::SeqLimit::PosInfinity | crate::limit::SeqLimit::NegInfinity) => {
            Poly::term(PTerm::ranged(
                CFrac::from_i64(-1),
                CFrac::from_i64(1),
                ScaleMono::one(),
            ))
        }
        Some(crate::limit::SeqLimit::Finite(c)) if c.is_zero() => {
            // Leading series term around zero.
            let envelope = match arg.envelope() {
                Envelope::Mono(m) => m,
                Envelope::Empty => ScaleMono::one(),
                Envelope::Undecidable => return Poly::unknown(),
            };
            if is_sin {
                // sin t = t + O(t³)
                let cube = envelope.mul(&envelope).mul(&envelope);
                let mut result = arg.clone();
                result.tail = result.tail.join(&Tail::Order(cube));
                result
            } else {
                // cos t = 1 + O(t²)
                let square = envelope.mul(&envelope);
                let mut result = Poly::constant(CFrac::one());
                result.tail = result.tail.join(&Tail::Order(square));
                result
            }
        }
        _ => Poly::unknown(),
    }
}

/// Extracts an exact constant rational value from a polynomial.
fn as_const_rational(p: &Poly) -> Option<Rational> {
    if p.tail != Tail::None {
        return None;
    }
    match p.terms.as_slice() {
        [] => Some(Rational::from(0)),
        [t] if t.mono.is_one() && t.is_exact() => t.lo.as_rational(),
        _ => None,
    }
}
