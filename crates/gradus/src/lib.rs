//! # Gradus
//!
//! Sorts collections of growth-rate expressions (functions of a single
//! variable, such as `n²`, `log n`, `2ⁿ`) by their asymptotic complexity
//! as the variable tends to infinity — the way a computer-science course
//! ranks running times:
//!
//! ```text
//! log n  <  n  <  n log n  <  n²  <  2ⁿ
//! ```
//!
//! including collections where some pairs have no decisive pairwise ratio
//! limit and the order must be recovered transitively through a
//! dependency graph.
//!
//! ## Quick Start
//!
//! ```
//! use gradus::core::ExprArena;
//! use gradus::{sort_strs, Notation};
//!
//! let mut arena = ExprArena::new();
//! let sorted = sort_strs(
//!     &mut arena,
//!     &["n**2", "log(n)", "2**n", "n"],
//!     Notation::Algebraic,
//!     None,
//! )
//! .unwrap();
//! let rendered: Vec<String> = sorted.iter().map(|&e| arena.render(e)).collect();
//! assert_eq!(rendered, ["log(n)", "n", "n**2", "2**n"]);
//! ```
//!
//! Either a full total order is produced, or an [`Error`] is returned;
//! callers never receive a partially sorted result.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use hashbrown::HashSet;
use thiserror::Error;

use gradus_core::{ExprArena, ExprHandle, ExprNode, SymbolId};
use gradus_order::{sort_handles, Comparator, SortError};
use gradus_parse::ParseError;

pub use gradus_core as core;
pub use gradus_limits as limits;
pub use gradus_num as num;
pub use gradus_order as order;
pub use gradus_parse as parse;

pub use gradus_parse::Notation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{sort, sort_strs, Error, Notation};
    pub use gradus_core::{ExprArena, ExprHandle, ExprNode, Func};
    pub use gradus_order::{Comparator, Comparison, GrowthOrder};
}

/// Errors surfaced by the sorting entry points.
///
/// There is no partial-success mode: any of these means no ordering was
/// produced at all.
#[derive(Debug, Error)]
pub enum Error {
    /// The collection mentions several variables and none was specified.
    #[error(
        "multiple variables appear in the expressions ({names}); \
         specify the variable to order by"
    )]
    AmbiguousVariable {
        /// The distinct variable names found, comma separated.
        names: String,
    },

    /// A comparison failed hard, or no consistent total order exists.
    #[error(transparent)]
    Sort(#[from] SortError),

    /// A textual input did not parse in the chosen notation.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Sorts expressions into non-decreasing asymptotic growth order.
///
/// With no `variable`, the single free variable of the collection is
/// inferred: a variable-free collection is returned unchanged, and more
/// than one distinct variable is an error.
///
/// # Errors
///
/// [`Error::AmbiguousVariable`] when the comparison variable cannot be
/// inferred; [`Error::Sort`] when a term defeats the limit oracle or the
/// decided comparisons admit no unique total order.
pub fn sort(
    arena: &mut ExprArena,
    items: &[ExprHandle],
    variable: Option<ExprHandle>,
) -> Result<Vec<ExprHandle>, Error> {
    let variable = match variable {
        Some(v) => v,
        None => match infer_variable(arena, items)? {
            Some(v) => v,
            // Every element is constant: trivially already sorted.
            None => return Ok(items.to_vec()),
        },
    };
    let mut comparator = Comparator::new(arena, variable);
    Ok(sort_handles(&mut comparator, items)?)
}

/// Parses a collection of textual expressions in the chosen notation and
/// sorts it.
///
/// The optional `variable` is parsed with the same notation.
///
/// # Errors
///
/// [`Error::Parse`] for malformed input, plus everything [`sort`] can
/// return.
pub fn sort_strs(
    arena: &mut ExprArena,
    texts: &[&str],
    notation: Notation,
    variable: Option<&str>,
) -> Result<Vec<ExprHandle>, Error> {
    let items: Vec<ExprHandle> = texts
        .iter()
        .map(|text| gradus_parse::parse(arena, text, notation))
        .collect::<Result<_, _>>()?;
    let variable = variable
        .map(|text| gradus_parse::parse(arena, text, notation))
        .transpose()?;
    sort(arena, &items, variable)
}

/// Infers the lone free variable of the collection, or `None` when the
/// collection is variable-free.
fn infer_variable(
    arena: &mut ExprArena,
    items: &[ExprHandle],
) -> Result<Option<ExprHandle>, Error> {
    let mut symbols: HashSet<SymbolId> = HashSet::new();
    for &item in items {
        arena.collect_free_symbols(item, &mut symbols);
    }
    if symbols.len() > 1 {
        let mut names: Vec<&str> = symbols
            .iter()
            .filter_map(|&id| arena.symbol_name(id))
            .collect();
        names.sort_unstable();
        return Err(Error::AmbiguousVariable {
            names: names.join(", "),
        });
    }
    Ok(symbols
        .into_iter()
        .next()
        .map(|id| arena.intern(ExprNode::Symbol(id))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_free_collection_unchanged() {
        let mut arena = ExprArena::new();
        let items = vec![arena.integer(5), arena.integer(3), arena.integer(10)];
        let sorted = sort(&mut arena, &items, None).unwrap();
        // Not renumbered: constants are trivially already "sorted".
        assert_eq!(sorted, items);
    }

    #[test]
    fn test_empty_collection() {
        let mut arena = ExprArena::new();
        let sorted = sort(&mut arena, &[], None).unwrap();
        assert!(sorted.is_empty());
    }

    #[test]
    fn test_ambiguous_variable_detected() {
        let mut arena = ExprArena::new();
        let err = sort_strs(&mut arena, &["n", "m**2"], Notation::Algebraic, None).unwrap_err();
        let Error::AmbiguousVariable { names } = err else {
            panic!("expected ambiguity error");
        };
        assert_eq!(names, "m, n");
    }

    #[test]
    fn test_explicit_variable_overrides_ambiguity() {
        let mut arena = ExprArena::new();
        // With an explicit variable, m is treated as an opaque constant;
        // constants sort below anything n-dependent and keep input order.
        let sorted = sort_strs(
            &mut arena,
            &["n**2", "m"],
            Notation::Algebraic,
            Some("n"),
        )
        .unwrap();
        let rendered: Vec<String> = sorted.iter().map(|&e| arena.render(e)).collect();
        assert_eq!(rendered, ["m", "n**2"]);
    }
}
