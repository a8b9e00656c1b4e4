//! Arena allocator for expression storage.
//!
//! This module provides a contiguous memory arena for storing expression
//! nodes, enabling cache-friendly traversal and constant-time structural
//! equality through hash-consing.

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::expr::{ExprNode, Func, SymbolId};
use crate::handle::ExprHandle;

/// The main arena for storing expressions.
///
/// All expressions are stored contiguously in a `Vec`, with hash-consing
/// ensuring each unique expression is stored exactly once.
#[derive(Debug, Default)]
pub struct ExprArena {
    /// Storage for all expression nodes.
    nodes: Vec<ExprNode>,
    /// Interning table: maps node content to its handle.
    intern_map: HashMap<ExprNode, ExprHandle>,
    /// Symbol table: maps symbol names to their IDs.
    symbols: HashMap<String, SymbolId>,
    /// Reverse symbol table for display.
    symbol_names: Vec<String>,
}

impl ExprArena {
    /// Creates a new empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns an expression node, returning its handle.
    ///
    /// If an identical node already exists, returns the existing handle.
    /// Otherwise, allocates a new node and returns its handle.
    pub fn intern(&mut self, node: ExprNode) -> ExprHandle {
        if let Some(&handle) = self.intern_map.get(&node) {
            return handle;
        }

        let index = self.nodes.len();
        assert!(index < u32::MAX as usize, "Arena capacity exceeded");

        let handle = ExprHandle::new(index as u32);
        self.nodes.push(node.clone());
        self.intern_map.insert(node, handle);
        handle
    }

    /// Gets the node at the given handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle is invalid.
    #[must_use]
    pub fn get(&self, handle: ExprHandle) -> &ExprNode {
        &self.nodes[handle.index() as usize]
    }

    /// Looks up the handle of an already-interned node.
    #[must_use]
    pub fn lookup(&self, node: &ExprNode) -> Option<ExprHandle> {
        self.intern_map.get(node).copied()
    }

    /// Interns a symbol, returning its unique ID.
    pub fn intern_symbol(&mut self, name: &str) -> SymbolId {
        if let Some(&id) = self.symbols.get(name) {
            return id;
        }

        let id = self.symbol_names.len() as SymbolId;
        self.symbols.insert(name.to_string(), id);
        self.symbol_names.push(name.to_string());
        id
    }

    /// Gets the name of a symbol by its ID.
    #[must_use]
    pub fn symbol_name(&self, id: SymbolId) -> Option<&str> {
        self.symbol_names.get(id as usize).map(String::as_str)
    }

    /// Returns the number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // === Convenience constructors ===

    /// Creates an integer expression.
    pub fn integer(&mut self, value: i64) -> ExprHandle {
        self.intern(ExprNode::Integer(value))
    }

    /// Creates a rational expression in lowest terms.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    pub fn rational(&mut self, num: i64, den: i64) -> ExprHandle {
        assert!(den != 0, "denominator cannot be zero");
        let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
        let g = gcd(num.unsigned_abs(), den.unsigned_abs());
        let (num, den) = (num / g as i64, den as u64 / g);
        if den == 1 {
            self.integer(num)
        } else {
            self.intern(ExprNode::Rational(num, den))
        }
    }

    /// Creates the constant π.
    pub fn pi(&mut self) -> ExprHandle {
        self.intern(ExprNode::Pi)
    }

    /// Creates a symbol expression.
    pub fn symbol(&mut self, name: &str) -> ExprHandle {
        let id = self.intern_symbol(name);
        self.intern(ExprNode::Symbol(id))
    }

    /// Creates an addition expression.
    pub fn add(&mut self, args: impl Into<SmallVec<[ExprHandle; 4]>>) -> ExprHandle {
        let args = args.into();
        if args.len() == 1 {
            return args[0];
        }
        self.intern(ExprNode::Add(args))
    }

    /// Creates a multiplication expression.
    pub fn mul(&mut self, args: impl Into<SmallVec<[ExprHandle; 4]>>) -> ExprHandle {
        let args = args.into();
        if args.len() == 1 {
            return args[0];
        }
        self.intern(ExprNode::Mul(args))
    }

    /// Creates a power expression.
    pub fn pow(&mut self, base: ExprHandle, exp: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Pow { base, exp })
    }

    /// Creates a negation expression.
    pub fn neg(&mut self, arg: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Neg(arg))
    }

    /// Creates a division expression.
    pub fn div(&mut self, num: ExprHandle, den: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Div { num, den })
    }

    /// Creates a unary function application.
    pub fn func1(&mut self, func: Func, arg: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Function {
            func,
            args: smallvec::smallvec![arg],
        })
    }

    /// Creates a binomial coefficient expression.
    pub fn binomial(&mut self, n: ExprHandle, k: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Function {
            func: Func::Binomial,
            args: smallvec::smallvec![n, k],
        })
    }

    // === Queries ===

    /// Returns true if `expr` contains the symbol `var` anywhere.
    #[must_use]
    pub fn depends_on(&self, expr: ExprHandle, var: ExprHandle) -> bool {
        if expr == var {
            return true;
        }
        self.get(expr)
            .children()
            .iter()
            .any(|&child| self.depends_on(child, var))
    }

    /// Collects the set of free symbols of an expression.
    pub fn collect_free_symbols(&self, expr: ExprHandle, out: &mut HashSet<SymbolId>) {
        match self.get(expr) {
            ExprNode::Symbol(id) => {
                out.insert(*id);
            }
            node => {
                for child in node.children() {
                    self.collect_free_symbols(child, out);
                }
            }
        }
    }

    /// Returns the free symbols of an expression.
    #[must_use]
    pub fn free_symbols(&self, expr: ExprHandle) -> HashSet<SymbolId> {
        let mut out = HashSet::new();
        self.collect_free_symbols(expr, &mut out);
        out
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    if a == 0 {
        1
    } else {
        a
    }
}
