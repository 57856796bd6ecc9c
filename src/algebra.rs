//! Set algebra over range sets.

use log::debug;

use crate::set::{RangeSet, Repr, Shape};
use crate::types::IntTy;

/// The kind a binary operation reports its result in: the left operand's,
/// or the right operand's when the left one carries none.
pub(crate) fn result_ty(a: &RangeSet, b: &RangeSet) -> IntTy {
    if a.is_bounded() {
        a.ty
    } else {
        b.ty
    }
}

fn intersect_intervals(a: &[(i64, i64)], b: &[(i64, i64)]) -> Vec<(i64, i64)> {
    let mut res = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let lo = a[i].0.max(b[j].0);
        let hi = a[i].1.min(b[j].1);
        if lo <= hi {
            res.push((lo, hi));
        }
        if a[i].1 < b[j].1 {
            i += 1;
        } else {
            j += 1;
        }
    }
    res
}

fn subtract_intervals(a: &[(i64, i64)], b: &[(i64, i64)]) -> Vec<(i64, i64)> {
    let mut res = Vec::new();
    let mut j = 0;
    for &(lo, hi) in a {
        while j < b.len() && b[j].1 < lo {
            j += 1;
        }
        let mut cur = lo;
        let mut covered = false;
        let mut k = j;
        while k < b.len() && b[k].0 <= hi {
            let (b_lo, b_hi) = b[k];
            if b_lo > cur {
                res.push((cur, b_lo - 1));
            }
            if b_hi >= hi {
                covered = true;
                break;
            }
            cur = cur.max(b_hi + 1);
            k += 1;
        }
        if !covered {
            res.push((cur, hi));
        }
    }
    res
}

/// Two empty operands meet at the empty kind of higher precedence.
fn both_empty(a: &RangeSet, b: &RangeSet) -> Option<RangeSet> {
    match (a.shape(), b.shape()) {
        (Shape::Empty(x), Shape::Empty(y)) => Some(RangeSet::empty_kind(x.max(y))),
        _ => None,
    }
}

impl RangeSet {
    /// Union of two values.
    ///
    /// Unknown absorbs everything. An empty operand is the identity: the other
    /// operand is returned unchanged.
    pub fn union(&self, other: &RangeSet) -> RangeSet {
        debug!("union({}, {})", self, other);
        if let Some(res) = both_empty(self, other) {
            return res;
        }
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() || self == other {
            return self.clone();
        }
        if self.is_unknown() || other.is_unknown() {
            return RangeSet::unknown();
        }
        let mut intervals = self.intervals();
        intervals.extend(other.intervals());
        RangeSet::normalize(intervals, result_ty(self, other))
    }

    /// Intersection of two values.
    ///
    /// Unknown is the identity for non-empty operands.
    pub fn intersect(&self, other: &RangeSet) -> RangeSet {
        debug!("intersect({}, {})", self, other);
        if let Some(res) = both_empty(self, other) {
            return res;
        }
        if self.is_empty() {
            return self.clone();
        }
        if other.is_empty() {
            return other.clone();
        }
        if self.is_unknown() {
            return other.clone();
        }
        if other.is_unknown() || self == other {
            return self.clone();
        }
        let intervals = intersect_intervals(&self.intervals(), &other.intervals());
        RangeSet::from_intervals(intervals, result_ty(self, other))
    }

    /// Values of `self` not in `other`.
    ///
    /// Subtracting unknown leaves nothing. Subtracting anything narrower from
    /// unknown leaves it unknown.
    pub fn subtract(&self, other: &RangeSet) -> RangeSet {
        debug!("subtract({}, {})", self, other);
        if self.is_empty() || other.is_empty() {
            return self.clone();
        }
        if other.is_unknown() {
            return RangeSet::empty();
        }
        if self.is_unknown() {
            return RangeSet::unknown();
        }
        let intervals = subtract_intervals(&self.intervals(), &other.intervals());
        RangeSet::from_intervals(intervals, result_ty(self, other))
    }

    /// `self` without a single value.
    pub fn without(&self, value: i64) -> RangeSet {
        self.subtract(&RangeSet::point_in(value, self.ty))
    }

    /// Every value of the kind that is not in `self`.
    pub fn invert(&self) -> RangeSet {
        RangeSet::all(self.ty).subtract(self)
    }

    /// Whether `value` belongs to the set. Unknown contains every value.
    pub fn contains(&self, value: i64) -> bool {
        match &self.repr {
            Repr::Empty(_) => false,
            Repr::Unknown => true,
            Repr::Point(v) => *v == value,
            Repr::Range(from, to) => (*from..=*to).contains(&value),
            Repr::Set(intervals) => {
                let idx = intervals.partition_point(|&(_, to)| to < value);
                idx < intervals.len() && intervals[idx].0 <= value
            }
        }
    }

    /// Whether every value of `other` belongs to `self`.
    ///
    /// Every value contains an empty one. Unknown is contained only by unknown.
    pub fn contains_set(&self, other: &RangeSet) -> bool {
        if other.is_empty() || self.is_unknown() {
            return true;
        }
        if other.is_unknown() || self.is_empty() {
            return false;
        }
        subtract_intervals(&other.intervals(), &self.intervals()).is_empty()
    }

    /// Whether the two values have any value in common.
    pub fn intersects(&self, other: &RangeSet) -> bool {
        !self.intersect(other).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::set::EmptyKind;

    fn set(text: &str) -> RangeSet {
        text.parse().unwrap()
    }

    #[test]
    fn test_union() {
        assert_eq!(RangeSet::point(1).union(&RangeSet::point(3)).to_string(), "{1, 3}");
        assert_eq!(RangeSet::point(1).union(&RangeSet::point(2)).to_string(), "{1, 2}");
        assert_eq!(RangeSet::range(1, 10).union(&RangeSet::point(11)).to_string(), "{1..11}");
        assert_eq!(RangeSet::range(1, 10).union(&RangeSet::point(12)).to_string(), "{1..10, 12}");
        assert_eq!(set("0..10, 20..30").union(&set("5..25")).to_string(), "{0..30}");
        assert_eq!(set("0..10, 20..30").union(&set("12, 14..15")).to_string(), "{0..10, 12, 14, 15, 20..30}");
        assert_eq!(set("0..2, 4..6").union(&set("3")).to_string(), "{0..6}");
        assert_eq!(
            RangeSet::range(i64::MIN, 0).union(&RangeSet::range(1, i64::MAX)),
            RangeSet::all(IntTy::I64)
        );
    }

    #[test]
    fn test_union_special() {
        let values = [RangeSet::point(5), set("0..10, 20..30")];
        for v in &values {
            assert_eq!(&v.union(&RangeSet::empty()), v);
            assert_eq!(&RangeSet::overflow().union(v), v);
            assert_eq!(v.union(&RangeSet::unknown()), RangeSet::unknown());
            assert_eq!(RangeSet::unknown().union(v), RangeSet::unknown());
        }
        assert_eq!(RangeSet::empty().union(&RangeSet::overflow()), RangeSet::overflow());
        assert_eq!(RangeSet::empty().union(&RangeSet::unknown()), RangeSet::unknown());
    }

    #[test]
    fn test_intersect() {
        assert_eq!(RangeSet::point(1).intersect(&RangeSet::point(1)).to_string(), "{1}");
        assert_eq!(RangeSet::point(1).intersect(&RangeSet::point(2)).to_string(), "{}");
        assert_eq!(RangeSet::point(1).intersect(&RangeSet::range(1, 2)).to_string(), "{1}");
        assert_eq!(RangeSet::point(11).intersect(&RangeSet::range(1, 10)).to_string(), "{}");
        assert_eq!(RangeSet::range(1, 10).intersect(&RangeSet::range(5, 15)).to_string(), "{5..10}");
        assert_eq!(RangeSet::range(1, 10).intersect(&RangeSet::range(11, 15)).to_string(), "{}");
        assert_eq!(set("1..10, 20..30").intersect(&RangeSet::range(5, 25)).to_string(), "{5..10, 20..25}");
        assert_eq!(set("1..10, 20..30").intersect(&set("0..3, 8..22, 29")).to_string(), "{1..3, 8..10, 20..22, 29}");
        assert_eq!(set("1..10, 20..30").intersect(&RangeSet::range(12, 18)).to_string(), "{}");
    }

    #[test]
    fn test_intersect_special() {
        let x = set("1..10, 20..30");
        assert_eq!(RangeSet::unknown().intersect(&x), x);
        assert_eq!(x.intersect(&RangeSet::unknown()), x);
        assert_eq!(RangeSet::unknown().intersect(&RangeSet::unknown()), RangeSet::unknown());
        assert_eq!(x.intersect(&RangeSet::empty()), RangeSet::empty());
        assert_eq!(RangeSet::unknown().intersect(&RangeSet::overflow()), RangeSet::overflow());
    }

    #[test]
    fn test_empty_kinds_commute() {
        let kinds = [EmptyKind::Plain, EmptyKind::Overflow, EmptyKind::DivisionByZero];
        for a in kinds {
            for b in kinds {
                let (x, y) = (RangeSet::empty_kind(a), RangeSet::empty_kind(b));
                let expected = RangeSet::empty_kind(a.max(b));
                assert_eq!(x.union(&y), expected, "{} | {}", x, y);
                assert_eq!(x.intersect(&y), expected, "{} & {}", x, y);
                assert_eq!(x.union(&y), y.union(&x), "{} | {}", x, y);
                assert_eq!(x.intersect(&y), y.intersect(&x), "{} & {}", x, y);
            }
        }
        assert_eq!(RangeSet::overflow().intersect(&RangeSet::empty()), RangeSet::overflow());
        assert_eq!(RangeSet::overflow().union(&RangeSet::division_by_zero()), RangeSet::division_by_zero());
    }

    #[test]
    fn test_subtract() {
        assert_eq!(RangeSet::point(1).subtract(&RangeSet::point(1)).to_string(), "{}");
        assert_eq!(RangeSet::point(1).subtract(&RangeSet::point(2)).to_string(), "{1}");
        assert_eq!(RangeSet::range(1, 10).subtract(&RangeSet::point(1)).to_string(), "{2..10}");
        assert_eq!(RangeSet::range(1, 10).subtract(&RangeSet::point(10)).to_string(), "{1..9}");
        assert_eq!(RangeSet::range(1, 10).subtract(&RangeSet::point(5)).to_string(), "{1..4, 6..10}");
        assert_eq!(RangeSet::range(1, 10).subtract(&RangeSet::range(3, 7)).to_string(), "{1, 2, 8..10}");
        assert_eq!(RangeSet::range(1, 10).subtract(&RangeSet::range(-5, 15)).to_string(), "{}");
        assert_eq!(RangeSet::range(42, 50).subtract(&RangeSet::point(44)).to_string(), "{42, 43, 45..50}");
        assert_eq!(set("-2..60, 77, 555").subtract(&RangeSet::point(42)).to_string(), "{-2..41, 43..60, 77, 555}");
        assert_eq!(set("0..10, 20..30").subtract(&set("5..25")).to_string(), "{0..4, 26..30}");
        assert_eq!(set("0..10, 20..30").subtract(&set("0, 2, 4, 6, 8, 10")).to_string(), "{1, 3, 5, 7, 9, 20..30}");
        assert_eq!(
            RangeSet::all(IntTy::I64).subtract(&RangeSet::point(i64::MAX)).to_string(),
            "{-9223372036854775808..9223372036854775806}"
        );
    }

    #[test]
    fn test_subtract_special() {
        let x = set("0..10, 20..30");
        assert_eq!(x.subtract(&RangeSet::empty()), x);
        assert_eq!(x.subtract(&RangeSet::unknown()), RangeSet::empty());
        assert_eq!(RangeSet::unknown().subtract(&x), RangeSet::unknown());
        assert_eq!(RangeSet::unknown().subtract(&RangeSet::unknown()), RangeSet::empty());
        assert_eq!(RangeSet::overflow().subtract(&x), RangeSet::overflow());
    }

    #[test]
    fn test_without_invert() {
        assert_eq!(RangeSet::range(0, 3).without(1).to_string(), "{0, 2, 3}");
        assert_eq!(RangeSet::range_in(0, 250, IntTy::U8).invert().to_string(), "{251..255}");
        assert_eq!(RangeSet::point_in(0, IntTy::I8).invert().to_string(), "{-128..-1, 1..127}");
        assert_eq!(RangeSet::unknown().invert(), RangeSet::empty());
        assert_eq!(RangeSet::all(IntTy::I16).invert(), RangeSet::empty());
    }

    #[test]
    fn test_contains() {
        let x = set("0..10, 20..30, 40");
        for v in [0, 5, 10, 20, 30, 40] {
            assert!(x.contains(v), "{}", v);
        }
        for v in [-1, 11, 19, 31, 39, 41] {
            assert!(!x.contains(v), "{}", v);
        }
        assert!(RangeSet::unknown().contains(i64::MIN));
        assert!(!RangeSet::empty().contains(0));
    }

    #[test]
    fn test_contains_set() {
        let x = set("0..10, 20..30");
        assert!(x.contains_set(&set("1..3, 25")));
        assert!(x.contains_set(&x));
        assert!(!x.contains_set(&set("9..20")));
        assert!(x.contains_set(&RangeSet::empty()));
        assert!(x.contains_set(&RangeSet::overflow()));
        assert!(!x.contains_set(&RangeSet::unknown()));
        assert!(RangeSet::unknown().contains_set(&x));
        assert!(RangeSet::unknown().contains_set(&RangeSet::unknown()));
        assert!(RangeSet::empty().contains_set(&RangeSet::division_by_zero()));
        assert!(!RangeSet::empty().contains_set(&RangeSet::point(0)));
    }

    #[test]
    fn test_intersects() {
        let x = set("0..10, 20..30");
        let cases = [
            (set("11..19"), false),
            (set("10"), true),
            (set("15, 31"), false),
            (set("-5..0"), true),
            (RangeSet::unknown(), true),
            (RangeSet::empty(), false),
        ];
        for (other, expected) in cases {
            assert_eq!(x.intersects(&other), expected, "{} / {}", x, other);
            assert_eq!(other.intersects(&x), expected, "{} / {}", other, x);
        }
    }

    #[test]
    fn test_difference_law() {
        let values = [set("0..10, 20..30"), set("5..25"), set("-3, 7, 9..12"), RangeSet::point(20)];
        for a in &values {
            for b in &values {
                assert_eq!(&a.subtract(b).union(&a.intersect(b)), a, "{} / {}", a, b);
            }
        }
    }
}
