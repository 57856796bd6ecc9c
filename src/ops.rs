//! Operator tokens and dispatch.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::str::FromStr;

use log::debug;

use crate::error::Error;
use crate::relation::CmpOp;
use crate::set::RangeSet;

/// An arithmetic operator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl ArithOp {
    pub const VALUES: [ArithOp; 5] = [ArithOp::Add, ArithOp::Sub, ArithOp::Mul, ArithOp::Div, ArithOp::Rem];

    pub const fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Rem => "%",
        }
    }

    /// Applies the operator to two concrete values, or `None` on overflow or
    /// division by zero.
    pub fn checked(self, a: i64, b: i64) -> Option<i64> {
        match self {
            ArithOp::Add => a.checked_add(b),
            ArithOp::Sub => a.checked_sub(b),
            ArithOp::Mul => a.checked_mul(b),
            ArithOp::Div => a.checked_div(b),
            ArithOp::Rem => a.checked_rem(b),
        }
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A binary operator as it appears in source: arithmetic, compound
/// assignment or comparison.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinOp {
    Arith(ArithOp),
    ArithAssign(ArithOp),
    Cmp(CmpOp),
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinOp::Arith(op) => write!(f, "{}", op),
            BinOp::ArithAssign(op) => write!(f, "{}=", op),
            BinOp::Cmp(op) => write!(f, "{}", op),
        }
    }
}

impl FromStr for BinOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(op) = s.parse::<CmpOp>() {
            return Ok(BinOp::Cmp(op));
        }
        let (token, assign) = match s.strip_suffix('=') {
            Some(token) => (token, true),
            None => (s, false),
        };
        let op = ArithOp::VALUES
            .into_iter()
            .find(|op| op.symbol() == token)
            .ok_or_else(|| Error::UnknownOperator(s.to_string()))?;
        Ok(if assign { BinOp::ArithAssign(op) } else { BinOp::Arith(op) })
    }
}

impl RangeSet {
    /// Applies an arithmetic operator.
    pub fn arith(&self, op: ArithOp, rhs: &RangeSet) -> RangeSet {
        match op {
            ArithOp::Add => self.plus(rhs),
            ArithOp::Sub => self.minus(rhs),
            ArithOp::Mul => self.times(rhs),
            ArithOp::Div => self.div(rhs),
            ArithOp::Rem => self.rem(rhs),
        }
    }

    /// Possible results of `self op rhs`.
    ///
    /// Compound assignments behave like their plain forms. Comparisons yield
    /// the union of both narrowed operands.
    pub fn binop(&self, op: BinOp, rhs: &RangeSet) -> RangeSet {
        debug!("binop({} {} {})", self, op, rhs);
        match op {
            BinOp::Arith(op) | BinOp::ArithAssign(op) => self.arith(op, rhs),
            BinOp::Cmp(op) => {
                let (l, r) = self.compare(op, rhs);
                l.union(&r)
            }
        }
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op:ident) => {
        impl $trait<&RangeSet> for &RangeSet {
            type Output = RangeSet;

            fn $method(self, rhs: &RangeSet) -> RangeSet {
                self.arith(ArithOp::$op, rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, Add);
impl_binary_op!(Sub, sub, Sub);
impl_binary_op!(Mul, mul, Mul);
impl_binary_op!(Div, div, Div);
impl_binary_op!(Rem, rem, Rem);

impl Neg for &RangeSet {
    type Output = RangeSet;

    fn neg(self) -> RangeSet {
        self.negate()
    }
}
