//! Topological ordering of the decided-comparison graph.
//!
//! Vertices are the input positions; a directed edge `(i, j)` records a
//! decided "i grows strictly slower than j". The sort demands a *unique*
//! consistent order: a cycle (an inconsistent comparator) and an
//! under-constrained graph (several valid orders because too few pairs
//! were decided) both fail, since either way no single total order is
//! justified by the decided edges.

use rustc_hash::FxHashSet;

/// Why a topological ordering does not exist or is not unique.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TopoError {
    /// The edges contain a cycle.
    Cycle,
    /// More than one ordering is consistent with the edges.
    Ambiguous,
}

/// Orders `0..vertex_count` so that every edge `(i, j)` places `i`
/// before `j`. Duplicate edges are ignored.
///
/// # Errors
///
/// [`TopoError::Cycle`] when the edges are cyclic, [`TopoError::Ambiguous`]
/// when more than one order would be consistent.
pub fn topological_sort(
    vertex_count: usize,
    edges: &[(usize, usize)],
) -> Result<Vec<usize>, TopoError> {
    let unique: FxHashSet<(usize, usize)> = edges.iter().copied().collect();

    let mut indegree = vec![0usize; vertex_count];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
    for &(from, to) in &unique {
        successors[from].push(to);
        indegree[to] += 1;
    }

    let mut ready: Vec<usize> = (0..vertex_count).filter(|&v| indegree[v] == 0).collect();
    let mut order = Vec::with_capacity(vertex_count);

    while order.len() < vertex_count {
        match ready.as_slice() {
            [] => return Err(TopoError::Cycle),
            [_] => {}
            _ => return Err(TopoError::Ambiguous),
        }
        let vertex = ready.pop().unwrap_or_default();
        order.push(vertex);
        for &next in &successors[vertex] {
            indegree[next] -= 1;
            if indegree[next] == 0 {
                ready.push(next);
            }
        }
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain() {
        let edges = [(2, 0), (0, 1)];
        assert_eq!(topological_sort(3, &edges), Ok(vec![2, 0, 1]));
    }

    #[test]
    fn test_cycle_detected() {
        let edges = [(0, 1), (1, 2), (2, 0)];
        assert_eq!(topological_sort(3, &edges), Err(TopoError::Cycle));
    }

    #[test]
    fn test_under_constrained_rejected() {
        // 0 and 1 are unordered relative to each other
        let edges = [(0, 2), (1, 2)];
        assert_eq!(topological_sort(3, &edges), Err(TopoError::Ambiguous));
    }

    #[test]
    fn test_duplicate_edges_ignored() {
        let edges = [(0, 1), (0, 1), (1, 2)];
        assert_eq!(topological_sort(3, &edges), Ok(vec![0, 1, 2]));
    }

    #[test]
    fn test_trivial_sizes() {
        assert_eq!(topological_sort(0, &[]), Ok(vec![]));
        assert_eq!(topological_sort(1, &[]), Ok(vec![0]));
    }

    #[test]
    fn test_dense_fifteen_vertices() {
        // A fully decided 15-element chain, edges given pair-by-pair in
        // scrambled order.
        let rank = [2, 1, 4, 0, 3, 5, 6, 12, 7, 11, 14, 13, 8, 9, 10];
        let mut edges = Vec::new();
        for i in 0..rank.len() {
            for j in 0..rank.len() {
                if i != j {
                    let (a, b) = (rank[i], rank[j]);
                    if i < j {
                        edges.push((a, b));
                    }
                }
            }
        }
        assert_eq!(topological_sort(15, &edges), Ok(rank.to_vec()));
    }
}
