// gradus-parse — text notations for growth-rate expressions
//
// Two notations are supported behind one entry point:
//
//   - Algebraic: Python/SymPy flavoured. `**` (or `^`) for powers,
//     lower-case function calls `log(n)`, `binomial(n, 2)`, constant `pi`,
//     decimal literals read as exact rationals.
//
//   - Wolfram: Mathematica flavoured. `^` for powers, square-bracket
//     calls `Log[n]`, `Binomial[n, 2]`, constant `Pi`, and implicit
//     multiplication by juxtaposition (`1000000 n`).
//
// Parsed structure is interned as written (modulo hash-consing); nothing
// is evaluated or rewritten at parse time.

mod lexer;
mod parser;
mod token;

use gradus_core::{ExprArena, ExprHandle};
use thiserror::Error;

/// Which of the two recognized notations to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// Python/SymPy flavoured notation.
    Algebraic,
    /// Mathematica flavoured notation.
    Wolfram,
}

/// Errors produced while lexing or parsing an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected character '{ch}' at byte {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("number literal too large at byte {pos}")]
    NumberOverflow { pos: usize },

    #[error("unexpected {got} at byte {pos}, expected {expected}")]
    Unexpected {
        got: String,
        expected: &'static str,
        pos: usize,
    },

    #[error("unknown function '{name}' at byte {pos}")]
    UnknownFunction { name: String, pos: usize },

    #[error("{name} expects {expected} argument(s), found {found}")]
    WrongArity {
        name: String,
        expected: usize,
        found: usize,
    },
}

/// Result type for the parse crate.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parses `src` in the given notation, interning into `arena`.
pub fn parse(arena: &mut ExprArena, src: &str, notation: Notation) -> Result<ExprHandle> {
    let tokens = lexer::tokenize(src)?;
    parser::Parser::new(arena, tokens, notation).parse_expression()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradus_core::{ExprNode, Func};

    fn parse_alg(src: &str) -> (ExprArena, ExprHandle) {
        let mut arena = ExprArena::new();
        let h = parse(&mut arena, src, Notation::Algebraic).unwrap();
        (arena, h)
    }

    fn parse_wl(src: &str) -> (ExprArena, ExprHandle) {
        let mut arena = ExprArena::new();
        let h = parse(&mut arena, src, Notation::Wolfram).unwrap();
        (arena, h)
    }

    #[test]
    fn test_algebraic_power_product() {
        let (arena, h) = parse_alg("n**2*log(n)");
        let ExprNode::Mul(args) = arena.get(h) else {
            panic!("expected product")
        };
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_algebraic_decimal_is_exact() {
        let (arena, h) = parse_alg("1.000001**n");
        let ExprNode::Pow { base, .. } = arena.get(h) else {
            panic!("expected power")
        };
        assert_eq!(arena.get(*base), &ExprNode::Rational(1_000_001, 1_000_000));
    }

    #[test]
    fn test_algebraic_caret_is_power() {
        let (mut arena, h) = parse_alg("n^2");
        let two = arena.integer(2);
        let n = arena.symbol("n");
        assert_eq!(arena.get(h), &ExprNode::Pow { base: n, exp: two });
    }

    #[test]
    fn test_algebraic_binomial() {
        let (arena, h) = parse_alg("binomial(n, 2)");
        let ExprNode::Function { func, args } = arena.get(h) else {
            panic!("expected function")
        };
        assert_eq!(*func, Func::Binomial);
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_algebraic_pi_and_unary_minus() {
        let (arena, h) = parse_alg("-pi");
        let ExprNode::Neg(inner) = arena.get(h) else {
            panic!("expected negation")
        };
        assert_eq!(arena.get(*inner), &ExprNode::Pi);
    }

    #[test]
    fn test_power_is_right_associative() {
        // n**n**2 = n**(n**2)
        let (arena, h) = parse_alg("n**n**2");
        let ExprNode::Pow { base, exp } = arena.get(h) else {
            panic!("expected power")
        };
        assert!(matches!(arena.get(*base), ExprNode::Symbol(_)));
        assert!(matches!(arena.get(*exp), ExprNode::Pow { .. }));
    }

    #[test]
    fn test_wolfram_implicit_multiplication() {
        let (arena, h) = parse_wl("2^(1000000 n)");
        let ExprNode::Pow { exp, .. } = arena.get(h) else {
            panic!("expected power")
        };
        assert!(matches!(arena.get(*exp), ExprNode::Mul(_)));
    }

    #[test]
    fn test_wolfram_bracket_functions() {
        let (arena, h) = parse_wl("Binomial[n, 2] + Log[n]");
        let ExprNode::Add(args) = arena.get(h) else {
            panic!("expected sum")
        };
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_wolfram_sqrt_juxtaposed() {
        let (arena, h) = parse_wl("n Sqrt[n]");
        assert!(matches!(arena.get(h), ExprNode::Mul(_)));
    }

    #[test]
    fn test_unknown_function_rejected() {
        let mut arena = ExprArena::new();
        let err = parse(&mut arena, "ackermann(n)", Notation::Algebraic).unwrap_err();
        assert!(matches!(err, ParseError::UnknownFunction { .. }));
    }

    #[test]
    fn test_arity_checked() {
        let mut arena = ExprArena::new();
        let err = parse(&mut arena, "log(n, 2)", Notation::Algebraic).unwrap_err();
        assert!(matches!(err, ParseError::WrongArity { .. }));
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        let mut arena = ExprArena::new();
        let err = parse(&mut arena, "n + 1)", Notation::Algebraic).unwrap_err();
        assert!(matches!(err, ParseError::Unexpected { .. }));
    }

    #[test]
    fn test_same_text_interns_identically() {
        let mut arena = ExprArena::new();
        let a = parse(&mut arena, "n**2 + log(n)", Notation::Algebraic).unwrap();
        let b = parse(&mut arena, "n**2 + log(n)", Notation::Algebraic).unwrap();
        assert_eq!(a, b);
    }
}
