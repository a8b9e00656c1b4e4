//! End-to-end sorting scenarios.
//!
//! The concrete lists and their expected permutations are classic
//! course material (MIT OCW 6.006 / 6.046J problem sets), which makes
//! them good ground truth: every expected order has been verified by
//! hand against the published solutions.

use gradus::core::ExprArena;
use gradus::order::SortError;
use gradus::{sort_strs, Error, Notation};

/// Sorts `items` and asserts the result equals `expected` (indices into
/// `items`).
fn check(notation: Notation, items: &[&str], expected: &[usize]) {
    let mut arena = ExprArena::new();
    let sorted = sort_strs(&mut arena, items, notation, None).unwrap();
    let sorted: Vec<String> = sorted.iter().map(|&h| arena.render(h)).collect();

    let expected: Vec<String> = expected
        .iter()
        .map(|&i| {
            let h = gradus::parse::parse(&mut arena, items[i], notation).unwrap();
            arena.render(h)
        })
        .collect();
    assert_eq!(sorted, expected);
}

#[test]
fn sorts_mixed_growth_classes() {
    // A bounded oscillation, a sub-linear term, linear, quadratic, and a
    // barely-exponential base: the exponential still wins.
    check(
        Notation::Algebraic,
        &[
            "1.000001**n",
            "n**0.99999999*log(n)",
            "10000000*n",
            "n**2",
            "sin(n) + 100000",
        ],
        &[4, 1, 2, 3, 0],
    );
}

#[test]
fn sorts_binomial_between_power_and_exponential() {
    check(
        Notation::Algebraic,
        &["2**(1000000*n)", "binomial(n, 2)", "n*sqrt(n)"],
        &[2, 1, 0],
    );
}

#[test]
fn sorts_quasi_polynomial_band() {
    // Between the polynomials and the true exponentials live the
    // quasi-polynomials; π appears both as an exponent and as a base.
    check(
        Notation::Algebraic,
        &[
            "n**pi",
            "pi**n",
            "binomial(n, 5)",
            "sqrt(2**sqrt(n))",
            "binomial(n, n-4)",
            "2**(log(n)**4)",
            "n**(5*log(n)**2)",
            "n**4*binomial(n, 4)",
        ],
        &[0, 4, 2, 7, 6, 5, 3, 1],
    );
}

#[test]
fn sorts_fifteen_element_hierarchy() {
    // Iterated logarithms up to doubly-exponential towers in one list.
    check(
        Notation::Algebraic,
        &[
            "5*n",
            "4*log(n)",
            "4*log(log(n))",
            "n**4",
            "n**(1/2)*log(n)**4",
            "log(n)**(5*log(n))",
            "n**log(n)",
            "5**n",
            "4**(n**4)",
            "4**(4**n)",
            "5**(5**n)",
            "5**(5*n)",
            "n**(n**(1/5))",
            "n**(n/4)",
            "(n/4)**(n/4)",
        ],
        &[2, 1, 4, 0, 3, 5, 6, 12, 7, 11, 14, 13, 8, 9, 10],
    );
}

#[test]
fn sorts_wolfram_notation() {
    check(
        Notation::Wolfram,
        &["2^(1000000 n)", "Binomial[n, 2]", "n Sqrt[n]"],
        &[2, 1, 0],
    );
}

#[test]
fn sorts_wolfram_notation_with_oscillation() {
    check(
        Notation::Wolfram,
        &[
            "1.000001^n",
            "n^0.99999999 Log[n]",
            "10000000 n",
            "n^2",
            "Sin[n] + 100000",
        ],
        &[4, 1, 2, 3, 0],
    );
}

#[test]
fn explicit_wolfram_variable() {
    check(Notation::Wolfram, &["n^2", "n"], &[1, 0]);
    let mut arena = ExprArena::new();
    let sorted = sort_strs(&mut arena, &["n^3", "n"], Notation::Wolfram, Some("n")).unwrap();
    assert_eq!(arena.render(sorted[0]), "n");
}

#[test]
fn sorting_is_idempotent() {
    let items = ["sin(n) + 100000", "n**0.99999999*log(n)", "10000000*n"];
    let mut arena = ExprArena::new();
    let once = sort_strs(&mut arena, &items, Notation::Algebraic, None).unwrap();
    let once_txt: Vec<String> = once.iter().map(|&h| arena.render(h)).collect();
    let once_refs: Vec<&str> = once_txt.iter().map(String::as_str).collect();
    let twice = sort_strs(&mut arena, &once_refs, Notation::Algebraic, None).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn equivalent_elements_keep_input_order() {
    // 2n and n are the same order class; the direct sort is stable.
    let mut arena = ExprArena::new();
    let sorted = sort_strs(&mut arena, &["2*n", "n"], Notation::Algebraic, None).unwrap();
    assert_eq!(arena.render(sorted[0]), "2*n");
    assert_eq!(arena.render(sorted[1]), "n");
}

#[test]
fn unhandleable_term_names_the_offender() {
    let mut arena = ExprArena::new();
    let err = sort_strs(
        &mut arena,
        &["n*sin(n)", "n*cos(n)"],
        Notation::Algebraic,
        None,
    )
    .unwrap_err();
    let Error::Sort(SortError::Unhandleable { expr }) = err else {
        panic!("expected unhandleable-term error, got {err}");
    };
    assert_eq!(expr, "n*sin(n)");
}

#[test]
fn same_class_wobble_pair_is_unsortable() {
    // 2^n and 2^(n+sin n) are within a constant factor of each other but
    // no ratio limit exists: no edge can be decided, so no total order.
    let mut arena = ExprArena::new();
    let err = sort_strs(
        &mut arena,
        &["2**n", "2**(n + sin(n))"],
        Notation::Algebraic,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Sort(SortError::Unsortable)));
}

#[test]
fn ambiguous_variables_rejected() {
    let mut arena = ExprArena::new();
    let err = sort_strs(
        &mut arena,
        &["n**2", "m*log(m)", "k"],
        Notation::Algebraic,
        None,
    )
    .unwrap_err();
    let Error::AmbiguousVariable { names } = err else {
        panic!("expected ambiguous-variable error, got {err}");
    };
    assert_eq!(names, "k, m, n");
}

#[test]
fn variable_free_input_is_returned_unchanged() {
    let mut arena = ExprArena::new();
    let sorted = sort_strs(
        &mut arena,
        &["7", "3", "100"],
        Notation::Algebraic,
        None,
    )
    .unwrap();
    let rendered: Vec<String> = sorted.iter().map(|&h| arena.render(h)).collect();
    assert_eq!(rendered, ["7", "3", "100"]);
}

#[test]
fn parse_errors_surface() {
    let mut arena = ExprArena::new();
    let err = sort_strs(&mut arena, &["n**"], Notation::Algebraic, None).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}
