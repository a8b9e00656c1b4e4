//! # gradus-core
//!
//! Core expression engine for the Gradus growth-rate sorter.
//!
//! This crate provides:
//! - Arena-allocated expression storage with hash-consing
//! - Type-safe expression handles
//! - O(1) structural equality via interning
//! - Free-variable queries and a precedence-aware pretty printer
//!
//! ## Design Principles
//!
//! - **Hash-Consing**: every structurally unique expression stored exactly
//!   once, so handle equality is structural equality
//! - **Zero-Cost Handles**: 32-bit indices instead of pointers
//! - **Read-mostly**: expressions are interned while building the input
//!   collection and immutable for the whole of a sort

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod display;
pub mod expr;
pub mod handle;

pub use arena::ExprArena;
pub use expr::{ExprNode, Func, SymbolId};
pub use handle::ExprHandle;
