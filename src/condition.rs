//! Branch-condition evaluation.
//!
//! A comparison `lhs op rhs` guarding a branch narrows its operands
//! differently on each edge. [`Condition::evaluate`] computes both
//! narrowings and tells whether the comparison is decided: it always holds
//! when nothing survives on the false edge, and never holds when nothing
//! survives on the true edge.

use std::fmt;
use std::ops::Not;

use log::debug;

use crate::relation::CmpOp;
use crate::set::RangeSet;

/// Three-valued truth of a condition.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Truth {
    Yes,
    No,
    Unsure,
}

impl Truth {
    pub fn and(self, other: Truth) -> Truth {
        match (self, other) {
            (Truth::No, _) | (_, Truth::No) => Truth::No,
            (Truth::Yes, Truth::Yes) => Truth::Yes,
            _ => Truth::Unsure,
        }
    }

    pub fn or(self, other: Truth) -> Truth {
        match (self, other) {
            (Truth::Yes, _) | (_, Truth::Yes) => Truth::Yes,
            (Truth::No, Truth::No) => Truth::No,
            _ => Truth::Unsure,
        }
    }

    pub fn is_decided(self) -> bool {
        self != Truth::Unsure
    }
}

impl Not for Truth {
    type Output = Truth;

    fn not(self) -> Truth {
        match self {
            Truth::Yes => Truth::No,
            Truth::No => Truth::Yes,
            Truth::Unsure => Truth::Unsure,
        }
    }
}

impl From<bool> for Truth {
    fn from(value: bool) -> Self {
        if value {
            Truth::Yes
        } else {
            Truth::No
        }
    }
}

impl fmt::Display for Truth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Truth::Yes => f.write_str("yes"),
            Truth::No => f.write_str("no"),
            Truth::Unsure => f.write_str("unsure"),
        }
    }
}

/// The outcome of a comparison guarding a branch.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Condition {
    pub truth: Truth,
    /// Operands narrowed on the edge where the comparison holds.
    pub on_true: (RangeSet, RangeSet),
    /// Operands narrowed on the edge where it does not.
    pub on_false: (RangeSet, RangeSet),
}

impl Condition {
    pub fn evaluate(op: CmpOp, lhs: &RangeSet, rhs: &RangeSet) -> Condition {
        let on_true = lhs.compare(op, rhs);
        let on_false = lhs.compare(op.negate(), rhs);
        let truth = if on_true.0.is_empty() && on_true.1.is_empty() {
            Truth::No
        } else if on_false.0.is_empty() && on_false.1.is_empty() {
            Truth::Yes
        } else {
            Truth::Unsure
        };
        debug!("evaluate({} {} {}) = {}", lhs, op, rhs, truth);
        Condition {
            truth,
            on_true,
            on_false,
        }
    }
}
