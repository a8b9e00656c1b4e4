//! Property-based tests for the comparator's algebraic laws.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::compare::{Comparator, Comparison, GrowthOrder};
    use crate::sort::sort_handles;
    use gradus_core::{ExprArena, ExprHandle};
    use gradus_parse::{parse, Notation};

    /// A pool of growth rates spanning the whole hierarchy, constants
    /// included.
    const POOL: &[&str] = &[
        "3",
        "100000",
        "sin(n) + 100000",
        "log(log(n))",
        "log(n)",
        "log(n)**3",
        "sqrt(n)",
        "n",
        "10000000*n",
        "n*log(n)",
        "n**2",
        "binomial(n, 2)",
        "n**2*log(n)",
        "n**3",
        "2**n",
        "3**n",
        "n**n",
    ];

    fn build(arena: &mut ExprArena, src: &str) -> ExprHandle {
        parse(arena, src, Notation::Algebraic).unwrap()
    }

    fn pool_index() -> impl Strategy<Value = usize> {
        0..POOL.len()
    }

    proptest! {
        #[test]
        fn antisymmetry(i in pool_index(), j in pool_index()) {
            let mut arena = ExprArena::new();
            let a = build(&mut arena, POOL[i]);
            let b = build(&mut arena, POOL[j]);
            let var = arena.symbol("n");
            let mut comparator = Comparator::new(&arena, var);

            let forward = comparator.compare(a, b).unwrap();
            let backward = comparator.compare(b, a).unwrap();
            prop_assert_eq!(forward, backward.reverse());
        }

        #[test]
        fn comparisons_are_memoized_consistently(i in pool_index(), j in pool_index()) {
            let mut arena = ExprArena::new();
            let a = build(&mut arena, POOL[i]);
            let b = build(&mut arena, POOL[j]);
            let var = arena.symbol("n");
            let mut comparator = Comparator::new(&arena, var);

            let first = comparator.compare(a, b).unwrap();
            let second = comparator.compare(a, b).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn constant_dominance(i in 0usize..2, j in 3usize..POOL.len()) {
            // POOL[0..2] are variable-free, POOL[3..] all depend on n.
            let mut arena = ExprArena::new();
            let constant = build(&mut arena, POOL[i]);
            let growing = build(&mut arena, POOL[j]);
            let var = arena.symbol("n");
            let mut comparator = Comparator::new(&arena, var);

            prop_assert_eq!(
                comparator.compare(constant, growing).unwrap(),
                Comparison::Ordered(GrowthOrder::Slower)
            );
        }

        #[test]
        fn reflexivity(i in pool_index()) {
            let mut arena = ExprArena::new();
            let a = build(&mut arena, POOL[i]);
            let var = arena.symbol("n");
            let mut comparator = Comparator::new(&arena, var);

            prop_assert_eq!(
                comparator.compare(a, a).unwrap(),
                Comparison::Ordered(GrowthOrder::Same)
            );
        }

        #[test]
        fn sorting_is_idempotent(
            picks in proptest::collection::vec(pool_index(), 1..6)
        ) {
            let mut arena = ExprArena::new();
            let items: Vec<ExprHandle> =
                picks.iter().map(|&i| build(&mut arena, POOL[i])).collect();
            let var = arena.symbol("n");
            let mut comparator = Comparator::new(&arena, var);

            if let Ok(sorted) = sort_handles(&mut comparator, &items) {
                let again = sort_handles(&mut comparator, &sorted).unwrap();
                prop_assert_eq!(sorted, again);
            }
        }
    }
}
