//! The range set value and its canonical construction.
//!
//! A [`RangeSet`] is an immutable set of 64-bit integers in one of five shapes:
//!
//! - **Unknown**: any value; the analysis could not determine anything.
//! - **Empty**: no value. Carries an [`EmptyKind`] telling *why* it is empty:
//!   plainly, because every result overflowed, or because of a division by zero.
//! - **Point**: a single value.
//! - **Range**: an inclusive interval `[from, to]` with `from < to`.
//! - **Set**: two or more ascending intervals separated by gaps of at least one value.
//!
//! The representation is private. Every constructor canonicalizes, so two
//! values denoting the same set of integers are always structurally equal
//! (and hash identically), with the exception of the three empty kinds,
//! which stay distinct.
//!
//! Besides its elements, a bounded value remembers the integer kind
//! ([`IntTy`]) it lives in. The kind drives clamping and overflow detection in
//! arithmetic, but takes no part in equality.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::types::{IntTy, Ty};

/// The reason a [`RangeSet`] is empty.
///
/// Kinds are ordered by precedence: when two empty values meet, the greater
/// kind wins.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum EmptyKind {
    /// No value satisfies the constraints.
    Plain,
    /// The only mathematically correct results do not fit the integer kind.
    Overflow,
    /// The divisor of a division or remainder can only be zero.
    DivisionByZero,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub(crate) enum Repr {
    Empty(EmptyKind),
    Unknown,
    Point(i64),
    Range(i64, i64),
    Set(Arc<[(i64, i64)]>),
}

/// A borrowed view of a [`RangeSet`] for pattern matching.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Shape<'a> {
    Empty(EmptyKind),
    Unknown,
    Point(i64),
    Range(i64, i64),
    Set(&'a [(i64, i64)]),
}

/// An immutable set of integers: the abstract value of an integer expression.
#[derive(Debug, Clone)]
pub struct RangeSet {
    pub(crate) repr: Repr,
    pub(crate) ty: IntTy,
}

impl RangeSet {
    /// The plain empty set, `{}`.
    pub const fn empty() -> Self {
        Self::empty_kind(EmptyKind::Plain)
    }

    /// The empty set caused by overflow, `{!}`.
    pub const fn overflow() -> Self {
        Self::empty_kind(EmptyKind::Overflow)
    }

    /// The empty set caused by a definite division by zero, `{z}`.
    pub const fn division_by_zero() -> Self {
        Self::empty_kind(EmptyKind::DivisionByZero)
    }

    /// Either [`overflow()`][Self::overflow] or [`empty()`][Self::empty].
    pub const fn empty_with(overflow: bool) -> Self {
        if overflow {
            Self::overflow()
        } else {
            Self::empty()
        }
    }

    pub const fn empty_kind(kind: EmptyKind) -> Self {
        Self {
            repr: Repr::Empty(kind),
            ty: IntTy::I64,
        }
    }

    /// The unknown value, `{?}`.
    pub const fn unknown() -> Self {
        Self {
            repr: Repr::Unknown,
            ty: IntTy::I64,
        }
    }

    /// A single `i64` value.
    pub fn point(value: i64) -> Self {
        Self::point_in(value, IntTy::I64)
    }

    /// A single value of the given kind.
    pub fn point_in(value: i64, ty: IntTy) -> Self {
        Self {
            repr: Repr::Point(value),
            ty,
        }
    }

    /// All `i64` values in `from..=to`.
    ///
    /// # Panics
    ///
    /// Panics if `from > to`.
    pub fn range(from: i64, to: i64) -> Self {
        Self::range_in(from, to, IntTy::I64)
    }

    /// All values in `from..=to`, in the given kind.
    ///
    /// # Panics
    ///
    /// Panics if `from > to`.
    pub fn range_in(from: i64, to: i64, ty: IntTy) -> Self {
        assert!(from <= to, "Bad range: {} > {}", from, to);
        if from == to {
            Self::point_in(from, ty)
        } else {
            Self {
                repr: Repr::Range(from, to),
                ty,
            }
        }
    }

    /// Every value representable by `ty`.
    pub fn all(ty: IntTy) -> Self {
        Self::range_in(ty.min(), ty.max(), ty)
    }

    /// The type bound of `ty`, or `None` if `ty` is not an integer type.
    ///
    /// `None` means the domain does not apply; it is not the same as
    /// [`unknown()`][Self::unknown].
    pub fn from_type(ty: &Ty) -> Option<Self> {
        ty.as_int().map(Self::all)
    }

    /// The value of an integer constant of type `ty`.
    ///
    /// A missing value (a literal that does not fit the 64-bit window) is
    /// unknown. A value outside the kind is an overflow, unless the kind
    /// extends beyond the 64-bit window in that direction.
    pub fn from_constant(value: Option<i64>, ty: &Ty) -> Option<Self> {
        ty.as_int().map(|ty| Self::constant_in(value, ty))
    }

    pub(crate) fn constant_in(value: Option<i64>, ty: IntTy) -> Self {
        let Some(value) = value else {
            return Self::unknown();
        };
        if value < ty.min() {
            if ty.is_large_below() {
                Self::unknown()
            } else {
                Self::overflow()
            }
        } else if value > ty.max() {
            if ty.is_large_on_top() {
                Self::unknown()
            } else {
                Self::overflow()
            }
        } else {
            Self::point_in(value, ty)
        }
    }

    /// Union of all the given sets.
    pub fn unite_all<I>(sets: I) -> Self
    where
        I: IntoIterator<Item = RangeSet>,
    {
        sets.into_iter().fold(Self::empty(), |acc, set| acc.union(&set))
    }

    /// Builds a value from canonical intervals: ascending, non-overlapping
    /// and non-adjacent.
    ///
    /// # Panics
    ///
    /// Panics if the intervals are not canonical.
    pub(crate) fn from_intervals(intervals: Vec<(i64, i64)>, ty: IntTy) -> Self {
        match intervals.len() {
            0 => Self::empty(),
            1 => Self::range_in(intervals[0].0, intervals[0].1, ty),
            _ => {
                for (i, &(from, to)) in intervals.iter().enumerate() {
                    assert!(from <= to, "Bad sub-range #{}: {}..{}", i, from, to);
                    if i > 0 {
                        let prev = intervals[i - 1].1;
                        assert!(
                            prev < i64::MAX && prev + 1 < from,
                            "Bad sub-ranges #{} and #{}: {} and {}",
                            i - 1,
                            i,
                            prev,
                            from
                        );
                    }
                }
                Self {
                    repr: Repr::Set(intervals.into()),
                    ty,
                }
            }
        }
    }

    /// Builds a value from arbitrary intervals, sorting and merging
    /// overlapping or adjacent ones.
    pub(crate) fn normalize(mut intervals: Vec<(i64, i64)>, ty: IntTy) -> Self {
        intervals.sort_unstable();
        let mut merged: Vec<(i64, i64)> = Vec::with_capacity(intervals.len());
        for (from, to) in intervals {
            match merged.last_mut() {
                Some(last) if from <= last.1.saturating_add(1) => {
                    last.1 = last.1.max(to);
                }
                _ => merged.push((from, to)),
            }
        }
        Self::from_intervals(merged, ty)
    }

    /// Returns a view of the value for pattern matching.
    pub fn shape(&self) -> Shape<'_> {
        match &self.repr {
            Repr::Empty(kind) => Shape::Empty(*kind),
            Repr::Unknown => Shape::Unknown,
            Repr::Point(value) => Shape::Point(*value),
            Repr::Range(from, to) => Shape::Range(*from, *to),
            Repr::Set(intervals) => Shape::Set(intervals),
        }
    }

    /// Returns the intervals making up the value, in ascending order.
    ///
    /// Empty values have none; unknown has the whole `i64` domain.
    pub fn intervals(&self) -> Vec<(i64, i64)> {
        match &self.repr {
            Repr::Empty(_) => Vec::new(),
            Repr::Unknown => vec![(i64::MIN, i64::MAX)],
            Repr::Point(value) => vec![(*value, *value)],
            Repr::Range(from, to) => vec![(*from, *to)],
            Repr::Set(intervals) => intervals.to_vec(),
        }
    }

    /// The integer kind the value lives in. Empty and unknown values report `i64`.
    pub fn ty(&self) -> IntTy {
        self.ty
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.repr, Repr::Empty(_))
    }

    /// Empty because of overflow.
    pub fn is_overflow(&self) -> bool {
        matches!(self.repr, Repr::Empty(EmptyKind::Overflow))
    }

    /// Empty because of a definite division by zero.
    pub fn has_division_by_zero(&self) -> bool {
        matches!(self.repr, Repr::Empty(EmptyKind::DivisionByZero))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.repr, Repr::Unknown)
    }

    /// Neither empty nor unknown.
    pub fn is_bounded(&self) -> bool {
        !self.is_empty() && !self.is_unknown()
    }

    /// The kind extends beyond the 64-bit window.
    pub fn is_large(&self) -> bool {
        self.ty.is_large()
    }

    pub(crate) fn is_zero(&self) -> bool {
        matches!(self.repr, Repr::Point(0))
    }

    /// The smallest value, or `None` if the value is empty or unknown.
    pub fn min(&self) -> Option<i64> {
        match &self.repr {
            Repr::Point(value) => Some(*value),
            Repr::Range(from, _) => Some(*from),
            Repr::Set(intervals) => intervals.first().map(|&(from, _)| from),
            Repr::Empty(_) | Repr::Unknown => None,
        }
    }

    /// The largest value, or `None` if the value is empty or unknown.
    pub fn max(&self) -> Option<i64> {
        match &self.repr {
            Repr::Point(value) => Some(*value),
            Repr::Range(_, to) => Some(*to),
            Repr::Set(intervals) => intervals.last().map(|&(_, to)| to),
            Repr::Empty(_) | Repr::Unknown => None,
        }
    }

    /// The value seen through another type: the part of it `ty` can represent.
    ///
    /// Returns `None` if `ty` is not an integer type.
    pub fn cast(&self, ty: &Ty) -> Option<Self> {
        Self::from_type(ty).map(|bound| bound.intersect(self))
    }
}

impl Default for RangeSet {
    fn default() -> Self {
        Self::unknown()
    }
}

impl PartialEq for RangeSet {
    fn eq(&self, other: &Self) -> bool {
        self.repr == other.repr
    }
}

impl Eq for RangeSet {}

impl Hash for RangeSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repr.hash(state);
    }
}

fn fmt_interval(f: &mut fmt::Formatter<'_>, from: i64, to: i64) -> fmt::Result {
    if from == to {
        write!(f, "{}", from)
    } else if from.checked_add(1) == Some(to) {
        write!(f, "{}, {}", from, to)
    } else {
        write!(f, "{}..{}", from, to)
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Empty(EmptyKind::Plain) => f.write_str("{}"),
            Repr::Empty(EmptyKind::Overflow) => f.write_str("{!}"),
            Repr::Empty(EmptyKind::DivisionByZero) => f.write_str("{z}"),
            Repr::Unknown => f.write_str("{?}"),
            Repr::Point(value) => write!(f, "{{{}}}", value),
            Repr::Range(from, to) => {
                f.write_str("{")?;
                fmt_interval(f, *from, *to)?;
                f.write_str("}")
            }
            Repr::Set(intervals) => {
                f.write_str("{")?;
                for (i, &(from, to)) in intervals.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt_interval(f, from, to)?;
                }
                f.write_str("}")
            }
        }
    }
}
