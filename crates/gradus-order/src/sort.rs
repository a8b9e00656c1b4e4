//! The two-phase sorter.
//!
//! Phase 1 is a stable, fallible merge sort over the comparator:
//! O(n log n) comparisons, valid whenever the comparator behaves as a
//! total preorder on the inputs. The first indeterminate outcome abandons
//! the phase — as data, not by unwinding.
//!
//! Phase 2 tolerates a comparator that is only a partial order: every
//! pair is compared (O(n²)), decided strict orders become edges of a
//! dependency graph, and a unique topological order is extracted. Pairs
//! that are equivalent or indeterminate contribute no edge; if the edges
//! then fail to pin down one total order, the whole sort fails rather
//! than returning a partial result.

use gradus_core::ExprHandle;

use crate::compare::{Comparator, Comparison, GrowthOrder, SortError};
use crate::graph::topological_sort;

/// Sorts expression handles into non-decreasing asymptotic growth order.
///
/// The returned vector contains exactly the input handles, permuted.
/// Equivalent elements keep their input order when the direct sort
/// succeeds.
///
/// # Errors
///
/// [`SortError::Unhandleable`] from the comparator, or
/// [`SortError::Unsortable`] when the decided comparisons do not admit a
/// unique total order.
pub fn sort_handles(
    comparator: &mut Comparator<'_>,
    items: &[ExprHandle],
) -> Result<Vec<ExprHandle>, SortError> {
    let order = sort_indices(items.len(), |i, j| comparator.compare(items[i], items[j]))?;
    Ok(order.into_iter().map(|i| items[i]).collect())
}

/// Sorts positions `0..len` with an arbitrary comparison function.
///
/// This is the seam the expression sorter is built on; tests inject
/// synthetic comparators here to exercise the fallback machinery
/// independently of the limit oracle.
///
/// # Errors
///
/// Propagates comparator errors; [`SortError::Unsortable`] when the
/// dependency-graph fallback cannot produce a unique order.
pub fn sort_indices<F>(len: usize, mut compare: F) -> Result<Vec<usize>, SortError>
where
    F: FnMut(usize, usize) -> Result<Comparison, SortError>,
{
    if len <= 1 {
        return Ok((0..len).collect());
    }
    if let Some(order) = try_direct(len, &mut compare)? {
        return Ok(order);
    }
    dependency_order(len, &mut compare)
}

/// Phase 1: stable merge sort. `Ok(None)` means an indeterminate pair
/// was hit and the caller must fall back.
fn try_direct<F>(len: usize, compare: &mut F) -> Result<Option<Vec<usize>>, SortError>
where
    F: FnMut(usize, usize) -> Result<Comparison, SortError>,
{
    let indices: Vec<usize> = (0..len).collect();
    merge_sort(&indices, compare)
}

fn merge_sort<F>(indices: &[usize], compare: &mut F) -> Result<Option<Vec<usize>>, SortError>
where
    F: FnMut(usize, usize) -> Result<Comparison, SortError>,
{
    if indices.len() <= 1 {
        return Ok(Some(indices.to_vec()));
    }
    let mid = indices.len() / 2;
    let Some(left) = merge_sort(&indices[..mid], compare)? else {
        return Ok(None);
    };
    let Some(right) = merge_sort(&indices[mid..], compare)? else {
        return Ok(None);
    };

    let mut merged = Vec::with_capacity(indices.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        match compare(left[i], right[j])? {
            Comparison::Indeterminate => return Ok(None),
            Comparison::Ordered(GrowthOrder::Faster) => {
                merged.push(right[j]);
                j += 1;
            }
            // Slower or Same: take the left element, keeping equivalent
            // elements in input order.
            Comparison::Ordered(_) => {
                merged.push(left[i]);
                i += 1;
            }
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    Ok(Some(merged))
}

/// Phase 2: all-pairs comparison, dependency graph, topological order.
fn dependency_order<F>(len: usize, compare: &mut F) -> Result<Vec<usize>, SortError>
where
    F: FnMut(usize, usize) -> Result<Comparison, SortError>,
{
    let mut edges = Vec::new();
    for i in 0..len {
        for j in (i + 1)..len {
            match compare(i, j)? {
                Comparison::Ordered(GrowthOrder::Slower) => edges.push((i, j)),
                Comparison::Ordered(GrowthOrder::Faster) => edges.push((j, i)),
                // Equivalent and indeterminate pairs add no edge.
                Comparison::Ordered(GrowthOrder::Same) | Comparison::Indeterminate => {}
            }
        }
    }
    topological_sort(len, &edges).map_err(|_| SortError::Unsortable)
}
