//! The three-way growth comparator.
//!
//! `compare(a, b)` decides whether `a` grows strictly slower than,
//! equivalently to, or strictly faster than `b` as the variable tends to
//! infinity — or reports that the pair is indeterminate. Indeterminate is
//! an expected, first-class outcome that the sorter resolves; it is not
//! an error and never escapes to callers of the sorter.
//!
//! The algorithm follows the classical recipe:
//!
//! 1. Two variable-free expressions are equivalent.
//! 2. A variable-free expression grows strictly slower than any
//!    variable-dependent one. This is a convention, not a mathematical
//!    absolute: it is justified by the documented precondition that
//!    inputs take non-negative real values, and it sidesteps a possibly
//!    expensive (or undefined) ratio limit.
//! 3. Otherwise the limit of the simplified ratio `a/b` decides:
//!    0 → slower, ±∞ → faster, finite positive → equivalent.
//! 4. When the ratio limit is indecisive, each side is limited
//!    independently and the supremum/infimum envelopes are compared;
//!    a side whose limit cannot be computed at all is a hard error
//!    naming that expression.

use gradus_core::{ExprArena, ExprHandle};
use gradus_limits::{ratio_limit, seq_limit, value_ratio, Analyzer, RatioLimit, SeqLimit};
use gradus_num::Sign;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use thiserror::Error;

/// A decided growth order between two expressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthOrder {
    /// The left expression grows strictly slower.
    Slower,
    /// Both expressions are in the same asymptotic order class.
    Same,
    /// The left expression grows strictly faster.
    Faster,
}

impl GrowthOrder {
    /// Reverses the order (swaps the two expressions).
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            GrowthOrder::Slower => GrowthOrder::Faster,
            GrowthOrder::Faster => GrowthOrder::Slower,
            GrowthOrder::Same => GrowthOrder::Same,
        }
    }
}

impl From<GrowthOrder> for Ordering {
    fn from(order: GrowthOrder) -> Self {
        match order {
            GrowthOrder::Slower => Ordering::Less,
            GrowthOrder::Same => Ordering::Equal,
            GrowthOrder::Faster => Ordering::Greater,
        }
    }
}

/// The outcome of one pairwise comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    /// A decided order.
    Ordered(GrowthOrder),
    /// No decision even after the bounds fallback. Resolved by the
    /// sorter: it retries via the dependency-graph path, or records no
    /// edge for the pair.
    Indeterminate,
}

impl Comparison {
    /// Reverses the comparison (swaps the two expressions).
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Comparison::Ordered(order) => Comparison::Ordered(order.reverse()),
            Comparison::Indeterminate => Comparison::Indeterminate,
        }
    }
}

/// User-facing errors of the comparison and ordering engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// A single-sided limit could not be computed at all; the named
    /// expression is beyond the oracle.
    #[error("the term {expr} cannot be handled")]
    Unhandleable {
        /// Rendered text of the offending expression.
        expr: String,
    },

    /// The decided comparisons do not admit a consistent total order.
    #[error("the collection does not contain enough mutually comparable elements to sort")]
    Unsortable,
}

/// The memoizing three-way comparator, bound to one arena and variable.
///
/// Results are computed at most once per ordered pair: every decided
/// comparison is cached together with its derived reverse, so the
/// dependency-graph fallback never re-runs limit analysis for a pair the
/// direct sort already touched. The cache lives as long as the
/// comparator; reusing one comparator across sort calls reuses it.
pub struct Comparator<'a> {
    analyzer: Analyzer<'a>,
    var: ExprHandle,
    cache: FxHashMap<(ExprHandle, ExprHandle), Comparison>,
}

impl<'a> Comparator<'a> {
    /// Creates a comparator over `arena` with respect to `var`.
    #[must_use]
    pub fn new(arena: &'a ExprArena, var: ExprHandle) -> Self {
        Self {
            analyzer: Analyzer::new(arena, var),
            var,
            cache: FxHashMap::default(),
        }
    }

    /// The arena the comparator reads from.
    #[must_use]
    pub fn arena(&self) -> &ExprArena {
        self.analyzer.arena()
    }

    /// Compares the asymptotic growth of `a` against `b`.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::Unhandleable`] when the bounds fallback needs
    /// a single-sided limit the oracle cannot produce.
    pub fn compare(&mut self, a: ExprHandle, b: ExprHandle) -> Result<Comparison, SortError> {
        if let Some(&cached) = self.cache.get(&(a, b)) {
            return Ok(cached);
        }
        let result = self.compare_uncached(a, b)?;
        self.cache.insert((a, b), result);
        self.cache.insert((b, a), result.reverse());
        Ok(result)
    }

    fn compare_uncached(&mut self, a: ExprHandle, b: ExprHandle) -> Result<Comparison, SortError> {
        let a_depends = self.arena().depends_on(a, self.var);
        let b_depends = self.arena().depends_on(b, self.var);

        // Constants compare without touching the limit oracle.
        match (a_depends, b_depends) {
            (false, false) => return Ok(Comparison::Ordered(GrowthOrder::Same)),
            (false, true) => return Ok(Comparison::Ordered(GrowthOrder::Slower)),
            (true, false) => return Ok(Comparison::Ordered(GrowthOrder::Faster)),
            (true, true) => {}
        }

        // Direct ratio limit.
        match ratio_limit(&mut self.analyzer, a, b) {
            Some(SeqLimit::Finite(c)) => match c.sign() {
                Some(Sign::Zero) => return Ok(Comparison::Ordered(GrowthOrder::Slower)),
                Some(Sign::Positive) => return Ok(Comparison::Ordered(GrowthOrder::Same)),
                // A negative or undecided ratio falls through to bounds.
                Some(Sign::Negative) | None => {}
            },
            Some(SeqLimit::PosInfinity | SeqLimit::NegInfinity) => {
                return Ok(Comparison::Ordered(GrowthOrder::Faster));
            }
            Some(SeqLimit::Bounds { .. }) | None => {}
        }

        self.compare_via_bounds(a, b)
    }

    /// The supremum/infimum envelope fallback.
    fn compare_via_bounds(&mut self, a: ExprHandle, b: ExprHandle) -> Result<Comparison, SortError> {
        let limit_a = seq_limit(&mut self.analyzer, a).ok_or_else(|| SortError::Unhandleable {
            expr: self.arena().render(a),
        })?;
        let limit_b = seq_limit(&mut self.analyzer, b).ok_or_else(|| SortError::Unhandleable {
            expr: self.arena().render(b),
        })?;

        let (sup_a, inf_a) = limit_a.sup_inf();
        let (sup_b, inf_b) = limit_b.sup_inf();

        let sup_ratio = value_ratio(&sup_a, &sup_b);
        let inf_ratio = value_ratio(&inf_a, &inf_b);

        if sup_ratio == RatioLimit::Zero {
            return Ok(Comparison::Ordered(GrowthOrder::Slower));
        }
        if inf_ratio == RatioLimit::PosInfinity {
            return Ok(Comparison::Ordered(GrowthOrder::Faster));
        }
        if sup_ratio == RatioLimit::NotANumber || inf_ratio == RatioLimit::NotANumber {
            return Ok(Comparison::Indeterminate);
        }
        if let (RatioLimit::Finite(Some(Sign::Positive)), RatioLimit::Finite(Some(Sign::Positive))) =
            (&sup_ratio, &inf_ratio)
        {
            return Ok(Comparison::Ordered(GrowthOrder::Same));
        }
        Ok(Comparison::Indeterminate)
    }
}
