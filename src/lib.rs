//! # range-set-rs: integer range sets for data-flow analysis
//!
//! **`range-set-rs`** is an abstract value domain tracking the possible runtime values of
//! integer-typed expressions. A static analysis uses it to find guaranteed overflows,
//! divisions by zero, comparisons that are always true or false, and dead branches.
//!
//! ## The domain
//!
//! A [`RangeSet`][crate::set::RangeSet] is an immutable set of 64-bit integers. It is either
//! *unknown* (`{?}`), *empty*, a single point, a range, or a union of disjoint ranges.
//! An empty value remembers why it is empty: plainly (`{}`), because every result
//! overflowed (`{!}`), or because of a certain division by zero (`{z}`).
//!
//! Values are **canonical**: every constructor normalizes, so two values holding the same
//! integers compare and hash equal. This makes them safe to use as memoization keys.
//!
//! Each value also carries the integer kind ([`IntTy`][crate::types::IntTy]) it lives in.
//! Arithmetic clamps results to that kind and reports results entirely outside it as overflow.
//!
//! ## Basic Usage
//!
//! ```rust
//! use range_set_rs::relation::CmpOp;
//! use range_set_rs::set::RangeSet;
//! use range_set_rs::types::IntTy;
//!
//! // x: u8 in 0..=200
//! let x = RangeSet::range_in(0, 200, IntTy::U8);
//!
//! // x + 100 clamps to the u8 window
//! assert_eq!(x.plus(&RangeSet::point(100)).to_string(), "{100..255}");
//!
//! // dividing by a value that can only be zero
//! assert!(x.div(&RangeSet::point(0)).has_division_by_zero());
//!
//! // narrowing on `x < 10`
//! let (lhs, _) = x.compare(CmpOp::Lt, &RangeSet::point(10));
//! assert_eq!(lhs.to_string(), "{0..9}");
//!
//! // values round-trip through text
//! let set: RangeSet = "-2..60, 77, 555".parse().unwrap();
//! assert_eq!(set.without(42).to_string(), "{-2..41, 43..60, 77, 555}");
//! ```
//!
//! ## Core Components
//!
//! - **[`set`]**: the value type and its construction.
//! - **[`algebra`]** and **[`arith`]**: set operations and overflow-aware arithmetic.
//! - **[`relation`]** and **[`condition`]**: narrowing operands of comparisons and deciding branches.
//! - **[`domain`]**: the lattice interface (bottom, top, join, meet, widening) a fixpoint engine drives.
//! - **[`eval`]**: a memoizing evaluator for fixpoint iteration.

pub mod algebra;
pub mod arith;
pub mod cache;
pub mod condition;
pub mod domain;
pub mod error;
pub mod eval;
pub mod iter;
pub mod ops;
pub mod parse;
pub mod relation;
pub mod set;
pub mod types;
