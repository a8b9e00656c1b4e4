//! Sequence limits: the oracle surface of this crate.
//!
//! `seq_limit` computes the limit of an expression along the integer
//! sequence `var = 1, 2, 3, …` as `var → ∞`. The answer is a point value,
//! a signed infinity, accumulation bounds (for values that keep
//! oscillating, like `sin n + 100000`), or *no result* (`None`) when the
//! analysis cannot classify the expression. No result is an honest
//! outcome, not an error: the caller decides what it means.

use gradus_core::ExprHandle;
use gradus_num::{CFrac, Sign};

use crate::expand::{invert, lead_split, Analyzer};
use crate::scale::Tendency;
use crate::series::{Poly, Tail};

/// The limit of an expression along the integer sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeqLimit {
    /// Converges to an exact constant.
    Finite(CFrac),
    /// Tends to +∞.
    PosInfinity,
    /// Tends to -∞.
    NegInfinity,
    /// Keeps oscillating; accumulation points confined to `[min, max]`.
    Bounds {
        /// Infimum of the accumulation set.
        min: CFrac,
        /// Supremum of the accumulation set.
        max: CFrac,
    },
}

/// One endpoint (supremum or infimum) of a limit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LimitValue {
    /// An exact constant.
    Finite(CFrac),
    /// Positive infinity.
    PosInfinity,
    /// Negative infinity.
    NegInfinity,
}

impl SeqLimit {
    /// The supremum and infimum of the limit. A point value is its own
    /// supremum and infimum.
    #[must_use]
    pub fn sup_inf(&self) -> (LimitValue, LimitValue) {
        match self {
            SeqLimit::Finite(c) => (LimitValue::Finite(c.clone()), LimitValue::Finite(c.clone())),
            SeqLimit::PosInfinity => (LimitValue::PosInfinity, LimitValue::PosInfinity),
            SeqLimit::NegInfinity => (LimitValue::NegInfinity, LimitValue::NegInfinity),
            SeqLimit::Bounds { min, max } => {
                (LimitValue::Finite(max.clone()), LimitValue::Finite(min.clone()))
            }
        }
    }
}

/// The limit of a ratio of two limit endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RatioLimit {
    /// The ratio tends to zero.
    Zero,
    /// The ratio tends to +∞.
    PosInfinity,
    /// The ratio tends to -∞.
    NegInfinity,
    /// A finite nonzero value with the given sign (`None` if the sign
    /// could not be decided).
    Finite(Option<Sign>),
    /// Indeterminate, e.g. ∞/∞ or division by zero.
    NotANumber,
}

/// The ratio `a / b` of two limit endpoints.
#[must_use]
pub fn value_ratio(a: &LimitValue, b: &LimitValue) -> RatioLimit {
    match (a, b) {
        (LimitValue::Finite(x), LimitValue::Finite(y)) => {
            if y.is_zero() {
                return RatioLimit::NotANumber;
            }
            if x.is_zero() {
                return RatioLimit::Zero;
            }
            match x.div(y) {
                Some(q) => RatioLimit::Finite(q.sign()),
                None => RatioLimit::NotANumber,
            }
        }
        (LimitValue::Finite(_), _) => RatioLimit::Zero,
        (LimitValue::PosInfinity | LimitValue::NegInfinity, LimitValue::Finite(y)) => {
            let num_positive = matches!(a, LimitValue::PosInfinity);
            match y.sign() {
                Some(Sign::Positive) => {
                    if num_positive {
                        RatioLimit::PosInfinity
                    } else {
                        RatioLimit::NegInfinity
                    }
                }
                Some(Sign::Negative) => {
                    if num_positive {
                        RatioLimit::NegInfinity
                    } else {
                        RatioLimit::PosInfinity
                    }
                }
                Some(Sign::Zero) | None => RatioLimit::NotANumber,
            }
        }
        _ => RatioLimit::NotANumber,
    }
}

/// The limit of an already-expanded polynomial.
#[must_use]
pub fn limit_of_poly(p: &Poly) -> Option<SeqLimit> {
    if p.terms.is_empty() {
        return match &p.tail {
            Tail::None => Some(SeqLimit::Finite(CFrac::zero())),
            Tail::Vanish(m) => match m.tendency()? {
                Tendency::Zero | Tendency::One => Some(SeqLimit::Finite(CFrac::zero())),
                Tendency::Infinity => None,
            },
            Tail::Order(m) => match m.tendency()? {
                Tendency::Zero => Some(SeqLimit::Finite(CFrac::zero())),
                Tendency::One | Tendency::Infinity => None,
            },
            Tail::Unknown => None,
        };
    }

    let lead = lead_split(p)?;
    let term = &lead.term;
    match term.mono.tendency()? {
        Tendency::Zero => Some(SeqLimit::Finite(CFrac::zero())),
        Tendency::One => {
            if term.is_exact() {
                Some(SeqLimit::Finite(term.lo.clone()))
            } else {
                Some(SeqLimit::Bounds {
                    min: term.lo.clone(),
                    max: term.hi.clone(),
                })
            }
        }
        Tendency::Infinity => match (term.lo.sign(), term.hi.sign()) {
            (Some(Sign::Positive), _) => Some(SeqLimit::PosInfinity),
            (_, Some(Sign::Negative)) => Some(SeqLimit::NegInfinity),
            _ => None,
        },
    }
}

/// The sequence limit of `expr` as the analyzer's variable tends to ∞.
pub fn seq_limit(analyzer: &mut Analyzer<'_>, expr: ExprHandle) -> Option<SeqLimit> {
    let p = analyzer.poly(expr);
    limit_of_poly(&p)
}

/// The sequence limit of the simplified ratio `a / b`.
///
/// The quotient is simplified structurally: expansions of numerator and
/// denominator cancel factor by factor before the limit is read off, which
/// is what makes ratios of same-order expressions come out finite.
pub fn ratio_limit(
    analyzer: &mut Analyzer<'_>,
    num: ExprHandle,
    den: ExprHandle,
) -> Option<SeqLimit> {
    let num = analyzer.poly(num);
    let den = invert(&analyzer.poly(den));
    limit_of_poly(&num.mul(&den))
}
