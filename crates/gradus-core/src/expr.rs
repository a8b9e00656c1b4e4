//! Expression node types.
//!
//! This module defines the expression grammar stored in the arena: the
//! closed set of forms a growth-rate expression can take.

use smallvec::SmallVec;

use crate::handle::ExprHandle;

/// Unique identifier for a symbol.
pub type SymbolId = u32;

/// The closed set of functions the growth analysis understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    /// Natural logarithm.
    Log,
    /// Square root.
    Sqrt,
    /// Natural exponential.
    Exp,
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Binomial coefficient `binomial(n, k)`.
    Binomial,
}

impl Func {
    /// The number of arguments the function takes.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Func::Binomial => 2,
            _ => 1,
        }
    }

    /// The lower-case name used by the algebraic notation.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Func::Log => "log",
            Func::Sqrt => "sqrt",
            Func::Exp => "exp",
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Binomial => "binomial",
        }
    }
}

/// An expression node stored in the arena.
///
/// Each variant is designed to be cache-friendly, using `SmallVec` for
/// inline storage of small argument lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprNode {
    // === Atoms ===
    /// A 64-bit integer literal.
    Integer(i64),

    /// A rational number (numerator, denominator).
    ///
    /// Invariant: denominator > 0, gcd(num, den) == 1.
    Rational(i64, u64),

    /// The constant π.
    Pi,

    /// A symbolic variable.
    Symbol(SymbolId),

    // === Compound Expressions ===
    /// Sum of expressions: a + b + c + ...
    ///
    /// Invariant: at least 2 arguments.
    Add(SmallVec<[ExprHandle; 4]>),

    /// Product of expressions: a * b * c * ...
    ///
    /// Invariant: at least 2 arguments.
    Mul(SmallVec<[ExprHandle; 4]>),

    /// Power expression: base^exp.
    Pow {
        /// The base of the power.
        base: ExprHandle,
        /// The exponent.
        exp: ExprHandle,
    },

    /// Negation: -expr.
    Neg(ExprHandle),

    /// Division: numerator / denominator.
    Div {
        /// The numerator.
        num: ExprHandle,
        /// The denominator.
        den: ExprHandle,
    },

    // === Functions ===
    /// A function application: f(arg1, arg2, ...).
    Function {
        /// The function.
        func: Func,
        /// The arguments.
        args: SmallVec<[ExprHandle; 2]>,
    },
}

impl ExprNode {
    /// Returns true if this node is an atom (no children).
    #[must_use]
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            ExprNode::Integer(_) | ExprNode::Rational(_, _) | ExprNode::Pi | ExprNode::Symbol(_)
        )
    }

    /// Returns true if this node is a numeric literal.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, ExprNode::Integer(_) | ExprNode::Rational(_, _))
    }

    /// Returns true if this is the integer zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self, ExprNode::Integer(0))
    }

    /// Returns true if this is the integer one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        matches!(self, ExprNode::Integer(1))
    }

    /// Returns the children of this node.
    #[must_use]
    pub fn children(&self) -> SmallVec<[ExprHandle; 4]> {
        match self {
            ExprNode::Integer(_)
            | ExprNode::Rational(_, _)
            | ExprNode::Pi
            | ExprNode::Symbol(_) => SmallVec::new(),
            ExprNode::Add(args) | ExprNode::Mul(args) => args.clone(),
            ExprNode::Pow { base, exp } => smallvec::smallvec![*base, *exp],
            ExprNode::Neg(arg) => smallvec::smallvec![*arg],
            ExprNode::Div { num, den } => smallvec::smallvec![*num, *den],
            ExprNode::Function { args, .. } => args.iter().copied().collect(),
        }
    }
}
