//! Precedence-aware expression rendering.
//!
//! Expressions are rendered in the algebraic notation (`**` for powers,
//! lower-case function names), mainly for error messages that must name an
//! offending expression, and for test diagnostics.

use std::fmt;

use crate::arena::ExprArena;
use crate::expr::ExprNode;
use crate::handle::ExprHandle;

/// Binding strength of a rendered node, used to decide parentheses.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Add,
    Mul,
    Neg,
    Pow,
    Atom,
}

/// A displayable view of an expression in an arena.
pub struct DisplayExpr<'a> {
    arena: &'a ExprArena,
    handle: ExprHandle,
}

impl fmt::Display for DisplayExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write(f, self.arena, self.handle, Prec::Add)
    }
}

impl ExprArena {
    /// Returns a displayable view of `handle`.
    #[must_use]
    pub fn display(&self, handle: ExprHandle) -> DisplayExpr<'_> {
        DisplayExpr {
            arena: self,
            handle,
        }
    }

    /// Renders `handle` to a fresh string.
    #[must_use]
    pub fn render(&self, handle: ExprHandle) -> String {
        self.display(handle).to_string()
    }
}

fn write(
    f: &mut fmt::Formatter<'_>,
    arena: &ExprArena,
    handle: ExprHandle,
    min_prec: Prec,
) -> fmt::Result {
    let node = arena.get(handle);
    let prec = precedence(node);
    if prec < min_prec {
        f.write_str("(")?;
        write(f, arena, handle, Prec::Add)?;
        return f.write_str(")");
    }
    match node {
        ExprNode::Integer(n) => write!(f, "{n}"),
        ExprNode::Rational(num, den) => write!(f, "{num}/{den}"),
        ExprNode::Pi => f.write_str("pi"),
        ExprNode::Symbol(id) => f.write_str(arena.symbol_name(*id).unwrap_or("?")),
        ExprNode::Add(args) => {
            for (i, &arg) in args.iter().enumerate() {
                if i > 0 {
                    f.write_str(" + ")?;
                }
                write(f, arena, arg, Prec::Mul)?;
            }
            Ok(())
        }
        ExprNode::Mul(args) => {
            for (i, &arg) in args.iter().enumerate() {
                if i > 0 {
                    f.write_str("*")?;
                }
                write(f, arena, arg, Prec::Neg)?;
            }
            Ok(())
        }
        ExprNode::Neg(arg) => {
            f.write_str("-")?;
            write(f, arena, *arg, Prec::Neg)
        }
        ExprNode::Div { num, den } => {
            write(f, arena, *num, Prec::Neg)?;
            f.write_str("/")?;
            write(f, arena, *den, Prec::Pow)
        }
        ExprNode::Pow { base, exp } => {
            write(f, arena, *base, Prec::Atom)?;
            f.write_str("**")?;
            write(f, arena, *exp, Prec::Pow)
        }
        ExprNode::Function { func, args } => {
            f.write_str(func.name())?;
            f.write_str("(")?;
            for (i, &arg) in args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write(f, arena, arg, Prec::Add)?;
            }
            f.write_str(")")
        }
    }
}

fn precedence(node: &ExprNode) -> Prec {
    match node {
        ExprNode::Integer(n) if *n < 0 => Prec::Neg,
        ExprNode::Rational(num, _) if *num < 0 => Prec::Neg,
        ExprNode::Integer(_) | ExprNode::Pi | ExprNode::Symbol(_) => Prec::Atom,
        ExprNode::Add(_) => Prec::Add,
        // A rational literal renders as `num/den`, so it binds like a
        // division and must be parenthesized in power positions.
        ExprNode::Mul(_) | ExprNode::Div { .. } | ExprNode::Rational(_, _) => Prec::Mul,
        ExprNode::Neg(_) => Prec::Neg,
        ExprNode::Pow { .. } => Prec::Pow,
        ExprNode::Function { .. } => Prec::Atom,
    }
}
