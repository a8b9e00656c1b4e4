//! # gradus-num
//!
//! Exact arithmetic for the Gradus growth-rate sorter.
//!
//! This crate provides:
//! - Arbitrary precision integers and rationals (thin wrappers over `dashu`)
//! - Exact symbolic constants (rationals extended by π, e^c, log c and
//!   prime surds) with decidable-in-practice sign determination
//! - Rational interval evaluation used to separate constants whose sign
//!   cannot be read off structurally
//!
//! ## Design Principles
//!
//! - **Exactness first**: a sign is reported only when it is certain;
//!   an undecided sign is surfaced as `None`, never guessed
//! - **Canonical forms**: constants are kept in a normal form (logs of
//!   rationals split over primes, exponentials merged) so that structural
//!   equality catches the identities interval arithmetic never could

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod constant;
pub mod integer;
pub mod interval;
mod proptests;
pub mod rational;

pub use constant::{CFrac, Constant, Sign};
pub use integer::Integer;
pub use interval::Interval;
pub use rational::Rational;
