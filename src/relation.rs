//! Comparison relations and the relational split of two values.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::Error;
use crate::set::RangeSet;

/// A comparison operator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    pub const VALUES: [CmpOp; 6] = [CmpOp::Eq, CmpOp::Ne, CmpOp::Lt, CmpOp::Le, CmpOp::Gt, CmpOp::Ge];

    /// The relation with its operands swapped: `a < b` iff `b > a`.
    pub const fn flip(self) -> CmpOp {
        match self {
            CmpOp::Eq => CmpOp::Eq,
            CmpOp::Ne => CmpOp::Ne,
            CmpOp::Lt => CmpOp::Gt,
            CmpOp::Le => CmpOp::Ge,
            CmpOp::Gt => CmpOp::Lt,
            CmpOp::Ge => CmpOp::Le,
        }
    }

    /// The logical negation: `!(a < b)` iff `a >= b`.
    pub const fn negate(self) -> CmpOp {
        match self {
            CmpOp::Eq => CmpOp::Ne,
            CmpOp::Ne => CmpOp::Eq,
            CmpOp::Lt => CmpOp::Ge,
            CmpOp::Le => CmpOp::Gt,
            CmpOp::Gt => CmpOp::Le,
            CmpOp::Ge => CmpOp::Lt,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        }
    }

    /// Evaluates the relation on two concrete values.
    pub fn holds(self, a: i64, b: i64) -> bool {
        match self {
            CmpOp::Eq => a == b,
            CmpOp::Ne => a != b,
            CmpOp::Lt => a < b,
            CmpOp::Le => a <= b,
            CmpOp::Gt => a > b,
            CmpOp::Ge => a >= b,
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for CmpOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CmpOp::VALUES
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| Error::UnknownOperator(s.to_string()))
    }
}

impl RangeSet {
    /// Values standing in relation `op` to *some* value of the set.
    ///
    /// For `{0..10}` and `Gt` this is `{1..MAX}`: every value greater than at
    /// least one member. Unknown and empty values are returned as is for the
    /// ordering relations.
    pub fn from_relation(&self, op: CmpOp) -> RangeSet {
        let ty = self.ty;
        match (op, self.min(), self.max()) {
            (CmpOp::Eq, _, _) => self.clone(),
            (CmpOp::Ne, _, _) => self.invert(),
            (_, None, _) | (_, _, None) => self.clone(),
            (CmpOp::Gt, Some(min), _) if min >= ty.max() => {
                if ty.is_large_on_top() {
                    RangeSet::unknown()
                } else {
                    RangeSet::empty()
                }
            }
            (CmpOp::Gt, Some(min), _) => RangeSet::range_in(min + 1, ty.max(), ty),
            (CmpOp::Ge, Some(min), _) => RangeSet::range_in(min, ty.max().max(min), ty),
            (CmpOp::Lt, _, Some(max)) if max <= ty.min() => {
                if ty.is_large_below() {
                    RangeSet::unknown()
                } else {
                    RangeSet::empty()
                }
            }
            (CmpOp::Lt, _, Some(max)) => RangeSet::range_in(ty.min(), max - 1, ty),
            (CmpOp::Le, _, Some(max)) => RangeSet::range_in(ty.min().min(max), max, ty),
        }
    }

    /// Narrows both operands of `self op other` to the values for which the
    /// relation can hold.
    ///
    /// Returns `(L', R')` where `L'` holds the values of `self` related by `op`
    /// to some value of `other`, and vice versa. Either both sides are empty
    /// or neither is.
    pub fn compare(&self, op: CmpOp, other: &RangeSet) -> (RangeSet, RangeSet) {
        debug!("compare({} {} {})", self, op, other);
        if self.is_empty() || other.is_empty() {
            return (RangeSet::empty(), RangeSet::empty());
        }
        let (lhs, rhs) = self.narrow(op, other);
        if lhs.is_empty() || rhs.is_empty() {
            return (RangeSet::empty(), RangeSet::empty());
        }
        (lhs, rhs)
    }

    fn narrow(&self, op: CmpOp, other: &RangeSet) -> (RangeSet, RangeSet) {
        match op {
            CmpOp::Eq => {
                let res = self.intersect(other);
                (res.clone(), res)
            }
            CmpOp::Ne => {
                let single = |s: &RangeSet| match (s.min(), s.max()) {
                    (Some(lo), Some(hi)) if lo == hi => Some(lo),
                    _ => None,
                };
                match (single(self), single(other)) {
                    (Some(a), Some(b)) if a == b => (RangeSet::empty(), RangeSet::empty()),
                    (Some(_), Some(_)) => (self.clone(), other.clone()),
                    (None, Some(b)) => (self.without(b), other.clone()),
                    (Some(a), None) => (self.clone(), other.without(a)),
                    (None, None) => (self.clone(), other.clone()),
                }
            }
            _ => (
                self.intersect(&other.from_relation(op)),
                other.intersect(&self.from_relation(op.flip())),
            ),
        }
    }
}
