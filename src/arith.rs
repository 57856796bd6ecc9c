//! Overflow-aware arithmetic over range sets.
//!
//! Every operation works interval by interval: each pair of operand
//! intervals contributes the tightest interval enclosing the exact results,
//! computed in 128-bit arithmetic so no intermediate value wraps. The
//! contribution is then fitted into the integer kind of the result:
//!
//! - entirely outside the kind: dropped (overflow);
//! - partially outside: clamped to the kind;
//! - beyond the 64-bit window of a *large* kind: the whole result is unknown,
//!   since the real value may still be representable.
//!
//! If every contribution is dropped the result is `{!}`.

use log::debug;

use crate::algebra::result_ty;
use crate::set::RangeSet;
use crate::types::IntTy;

/// Accumulates interval contributions in a given kind.
struct Bounds {
    ty: IntTy,
    intervals: Vec<(i64, i64)>,
    unknown: bool,
}

impl Bounds {
    fn new(ty: IntTy) -> Self {
        Self {
            ty,
            intervals: Vec::new(),
            unknown: false,
        }
    }

    fn push(&mut self, lo: i128, hi: i128) {
        debug_assert!(lo <= hi);
        let ty = self.ty;
        if (hi > i64::MAX as i128 && ty.is_large_on_top()) || (lo < i64::MIN as i128 && ty.is_large_below()) {
            self.unknown = true;
            return;
        }
        let (min, max) = (ty.min() as i128, ty.max() as i128);
        if lo > max || hi < min {
            return;
        }
        self.intervals.push((lo.max(min) as i64, hi.min(max) as i64));
    }

    /// Adds the interval spanned by `values`.
    fn push_hull(&mut self, values: [i128; 4]) {
        let lo = values.into_iter().min().unwrap_or_default();
        let hi = values.into_iter().max().unwrap_or_default();
        self.push(lo, hi);
    }

    fn finish(self) -> RangeSet {
        if self.unknown {
            RangeSet::unknown()
        } else if self.intervals.is_empty() {
            RangeSet::overflow()
        } else {
            RangeSet::normalize(self.intervals, self.ty)
        }
    }
}

/// Splits intervals crossing zero into a negative and a non-negative part.
fn split_at_zero(intervals: Vec<(i64, i64)>) -> Vec<(i64, i64)> {
    let mut res = Vec::with_capacity(intervals.len() + 1);
    for (from, to) in intervals {
        if from < 0 && to >= 0 {
            res.push((from, -1));
            res.push((0, to));
        } else {
            res.push((from, to));
        }
    }
    res
}

/// Result of a binary operation with an empty or unknown operand, if any.
fn degenerate(a: &RangeSet, b: &RangeSet) -> Option<RangeSet> {
    if a.is_empty() || b.is_empty() {
        return Some(RangeSet::empty_with(a.is_overflow() || b.is_overflow()));
    }
    if a.is_unknown() || b.is_unknown() {
        return Some(RangeSet::unknown());
    }
    None
}

/// Remainder of the non-negative values `[from, to]` divided by any divisor
/// whose magnitude lies in `[d_min, d_max]`.
fn rem_bounds(from: i128, to: i128, d_min: i128, d_max: i128) -> (i128, i128) {
    if to < d_min {
        (from, to)
    } else {
        (0, to.min(d_max - 1))
    }
}

impl RangeSet {
    /// Possible results of `self + other`.
    pub fn plus(&self, other: &RangeSet) -> RangeSet {
        debug!("plus({}, {})", self, other);
        if let Some(res) = degenerate(self, other) {
            return res;
        }
        let mut bounds = Bounds::new(result_ty(self, other));
        for (a_lo, a_hi) in self.intervals() {
            for &(b_lo, b_hi) in &other.intervals() {
                bounds.push(a_lo as i128 + b_lo as i128, a_hi as i128 + b_hi as i128);
            }
        }
        bounds.finish()
    }

    /// Possible results of `self - other`.
    pub fn minus(&self, other: &RangeSet) -> RangeSet {
        debug!("minus({}, {})", self, other);
        if let Some(res) = degenerate(self, other) {
            return res;
        }
        let mut bounds = Bounds::new(result_ty(self, other));
        for (a_lo, a_hi) in self.intervals() {
            for &(b_lo, b_hi) in &other.intervals() {
                bounds.push(a_lo as i128 - b_hi as i128, a_hi as i128 - b_lo as i128);
            }
        }
        bounds.finish()
    }

    /// Possible results of `self * other`.
    ///
    /// Zero is kept apart from the other values, so `{-2..3} * {10}` is
    /// `{-20..-10, 0, 10..30}`.
    pub fn times(&self, other: &RangeSet) -> RangeSet {
        debug!("times({}, {})", self, other);
        if let Some(res) = degenerate(self, other) {
            return res;
        }
        let ty = result_ty(self, other);
        if self.is_zero() || other.is_zero() {
            return RangeSet::point_in(0, ty);
        }
        let mut bounds = Bounds::new(ty);
        if self.contains(0) || other.contains(0) {
            bounds.push(0, 0);
        }
        let rhs = other.without(0).intervals();
        for (a_lo, a_hi) in self.without(0).intervals() {
            for &(b_lo, b_hi) in &rhs {
                let (a_lo, a_hi, b_lo, b_hi) = (a_lo as i128, a_hi as i128, b_lo as i128, b_hi as i128);
                bounds.push_hull([a_lo * b_lo, a_lo * b_hi, a_hi * b_lo, a_hi * b_hi]);
            }
        }
        bounds.finish()
    }

    /// Possible results of `self / other`, rounding towards zero.
    ///
    /// A divisor that can only be zero yields `{z}`; otherwise zero is
    /// excluded from the divisor.
    pub fn div(&self, other: &RangeSet) -> RangeSet {
        debug!("div({}, {})", self, other);
        if other.is_zero() {
            return RangeSet::division_by_zero();
        }
        if let Some(res) = degenerate(self, other) {
            return res;
        }
        let mut bounds = Bounds::new(result_ty(self, other));
        let divisors = other.without(0).intervals();
        for (a_lo, a_hi) in self.intervals() {
            for &(b_lo, b_hi) in &divisors {
                let (a_lo, a_hi, b_lo, b_hi) = (a_lo as i128, a_hi as i128, b_lo as i128, b_hi as i128);
                bounds.push_hull([a_lo / b_lo, a_lo / b_hi, a_hi / b_lo, a_hi / b_hi]);
            }
        }
        bounds.finish()
    }

    /// Possible results of `self % other`; the sign follows the dividend.
    ///
    /// A divisor that can only be zero yields `{z}`; otherwise zero is
    /// excluded from the divisor.
    pub fn rem(&self, other: &RangeSet) -> RangeSet {
        debug!("rem({}, {})", self, other);
        if other.is_zero() {
            return RangeSet::division_by_zero();
        }
        if let Some(res) = degenerate(self, other) {
            return res;
        }
        let divisor = other.without(0);
        let magnitudes: Vec<(i128, i128)> = split_at_zero(divisor.intervals())
            .into_iter()
            .map(|(lo, hi)| {
                let (lo, hi) = (lo as i128, hi as i128);
                if lo < 0 {
                    (-hi, -lo)
                } else {
                    (lo, hi)
                }
            })
            .collect();
        let d_min = magnitudes.iter().map(|&(lo, _)| lo).min().unwrap_or(1);
        let d_max = magnitudes.iter().map(|&(_, hi)| hi).max().unwrap_or(1);
        let single = match (divisor.min(), divisor.max()) {
            (Some(lo), Some(hi)) if lo == hi => Some(lo as i128),
            _ => None,
        };

        let mut bounds = Bounds::new(result_ty(self, other));
        for (from, to) in split_at_zero(self.intervals()) {
            let (from, to) = (from as i128, to as i128);
            if let Some(d) = single {
                let (r_from, r_to) = (from % d, to % d);
                if to - from < d.abs() && r_from <= r_to {
                    bounds.push(r_from, r_to);
                    continue;
                }
            }
            if from >= 0 {
                let (lo, hi) = rem_bounds(from, to, d_min, d_max);
                bounds.push(lo, hi);
            } else {
                let (lo, hi) = rem_bounds(-to, -from, d_min, d_max);
                bounds.push(-hi, -lo);
            }
        }
        bounds.finish()
    }

    /// Possible results of `-self`.
    ///
    /// Negating the minimum of a signed kind overflows; for unsigned kinds
    /// only `{0}` survives negation.
    pub fn negate(&self) -> RangeSet {
        debug!("negate({})", self);
        if !self.is_bounded() {
            return self.clone();
        }
        let mut bounds = Bounds::new(self.ty);
        for (from, to) in self.intervals() {
            bounds.push(-(to as i128), -(from as i128));
        }
        bounds.finish()
    }

    /// Possible results of `self.abs()`.
    pub fn abs(&self) -> RangeSet {
        debug!("abs({})", self);
        if !self.is_bounded() {
            return self.clone();
        }
        let mut bounds = Bounds::new(self.ty);
        for (from, to) in self.intervals() {
            let (from, to) = (from as i128, to as i128);
            if from >= 0 {
                bounds.push(from, to);
            } else if to < 0 {
                bounds.push(-to, -from);
            } else {
                bounds.push(0, (-from).max(to));
            }
        }
        bounds.finish()
    }
}
