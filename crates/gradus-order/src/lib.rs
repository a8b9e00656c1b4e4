//! # gradus-order
//!
//! The comparison-and-ordering engine of the Gradus growth-rate sorter.
//!
//! Two components in a pipeline:
//!
//! - [`Comparator`]: a memoizing three-way comparison between two
//!   expressions, based on the limit of their ratio with a
//!   supremum/infimum envelope fallback
//! - [`sort_handles`]: a total-order construction that first attempts a
//!   direct comparator sort and falls back to a dependency graph plus
//!   topological order when some pairs are indeterminate
//!
//! Indeterminate comparisons are data, resolved entirely inside the
//! sorter; callers only ever see a full total order or one of the
//! [`SortError`] variants.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod compare;
pub mod graph;
mod proptests;
pub mod sort;

pub use compare::{Comparator, Comparison, GrowthOrder, SortError};
pub use graph::{topological_sort, TopoError};
pub use sort::{sort_handles, sort_indices};
