//! # gradus-limits
//!
//! The sequence-limit oracle for the Gradus growth-rate sorter.
//!
//! Expressions are expanded over an exp-log asymptotic scale — iterated
//! logarithms and normalized exponentials with exact constant exponents —
//! and limits as the variable runs through the integers are read off the
//! dominant term of the expansion.
//!
//! # Overview
//!
//! 1. [`scale`] defines the scale atoms and monomials and their growth
//!    ordering (the comparison machinery a Gruntz-style analysis needs)
//! 2. [`series`] carries finite monomial sums with interval coefficients
//!    and a classified remainder
//! 3. [`expand`] maps expressions to such expansions
//! 4. [`limit`] reads sequence limits off expansions: a point value,
//!    ±∞, accumulation bounds, or no result
//!
//! The oracle never guesses: every outcome it cannot justify degrades to
//! "no result", which callers treat as an indeterminate comparison or a
//! hard error at their own level.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod expand;
pub mod limit;
pub mod scale;
pub mod series;

pub use expand::Analyzer;
pub use limit::{
    limit_of_poly, ratio_limit, seq_limit, value_ratio, LimitValue, RatioLimit, SeqLimit,
};
pub use scale::{ScaleAtom, ScaleMono, Tendency};
pub use series::{Envelope, PTerm, Poly, Tail};
