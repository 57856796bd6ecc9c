//! Lattice interface for fixpoint engines.
//!
//! [`RangeDomain`] exposes [`RangeSet`] through the [`AbstractDomain`] trait:
//! bottom is `{}`, top is `{?}`, the order is set inclusion, join and meet are
//! union and intersection.

use std::fmt::Debug;

use log::debug;

use crate::set::RangeSet;

/// Abstract domain interface.
///
/// An abstract domain must satisfy:
/// - Reflexivity: `∀a. a ⊑ a`
/// - Transitivity: `∀a,b,c. a ⊑ b ∧ b ⊑ c ⇒ a ⊑ c`
/// - Antisymmetry: `∀a,b. a ⊑ b ∧ b ⊑ a ⇒ a = b`
pub trait AbstractDomain: Clone + Debug + Sized {
    /// The type representing abstract elements.
    type Element: Clone + Debug + PartialEq;

    /// The bottom element (⊥): no value.
    fn bottom(&self) -> Self::Element;

    /// The top element (⊤): any value.
    fn top(&self) -> Self::Element;

    fn is_bottom(&self, elem: &Self::Element) -> bool;

    fn is_top(&self, elem: &Self::Element) -> bool;

    /// Partial order: `elem1 ⊑ elem2`.
    fn le(&self, elem1: &Self::Element, elem2: &Self::Element) -> bool;

    /// Join (`⊔`): least upper bound.
    fn join(&self, elem1: &Self::Element, elem2: &Self::Element) -> Self::Element;

    /// Meet (`⊓`): greatest lower bound.
    fn meet(&self, elem1: &Self::Element, elem2: &Self::Element) -> Self::Element;

    /// Widening (`∇`): an upper bound of both inputs such that every
    /// ascending chain of widenings stabilizes.
    fn widen(&self, elem1: &Self::Element, elem2: &Self::Element) -> Self::Element;

    /// Narrowing (`∆`): refines an element after widening.
    fn narrow(&self, elem1: &Self::Element, elem2: &Self::Element) -> Self::Element {
        self.meet(elem1, elem2)
    }

    fn eq(&self, elem1: &Self::Element, elem2: &Self::Element) -> bool {
        self.le(elem1, elem2) && self.le(elem2, elem1)
    }

    fn join_many<I>(&self, elems: I) -> Self::Element
    where
        I: IntoIterator<Item = Self::Element>,
    {
        elems.into_iter().fold(self.bottom(), |acc, e| self.join(&acc, &e))
    }
}

/// Range sets as a lattice.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeDomain;

impl AbstractDomain for RangeDomain {
    type Element = RangeSet;

    fn bottom(&self) -> RangeSet {
        RangeSet::empty()
    }

    fn top(&self) -> RangeSet {
        RangeSet::unknown()
    }

    fn is_bottom(&self, elem: &RangeSet) -> bool {
        elem.is_empty()
    }

    fn is_top(&self, elem: &RangeSet) -> bool {
        elem.is_unknown()
    }

    fn le(&self, elem1: &RangeSet, elem2: &RangeSet) -> bool {
        elem2.contains_set(elem1)
    }

    fn join(&self, elem1: &RangeSet, elem2: &RangeSet) -> RangeSet {
        elem1.union(elem2)
    }

    fn meet(&self, elem1: &RangeSet, elem2: &RangeSet) -> RangeSet {
        elem1.intersect(elem2)
    }

    /// Interval widening over the hull: a bound that moves jumps to the bound
    /// of the kind (or past it, for a value of a wider kind), a stable hull
    /// absorbs the gaps.
    ///
    /// A bound of a large kind cannot be reached inside the 64-bit window, so
    /// jumping to it gives `{?}`.
    fn widen(&self, elem1: &RangeSet, elem2: &RangeSet) -> RangeSet {
        debug!("widen({}, {})", elem1, elem2);
        if elem1.is_empty() {
            return elem2.clone();
        }
        if elem1.contains_set(elem2) {
            return elem1.clone();
        }
        let (Some(min1), Some(max1), Some(min2), Some(max2)) =
            (elem1.min(), elem1.max(), elem2.min(), elem2.max())
        else {
            return RangeSet::unknown();
        };
        let ty = elem1.ty();
        let from = if min2 < min1 {
            if ty.is_large_below() {
                return RangeSet::unknown();
            }
            ty.min().min(min2)
        } else {
            min1
        };
        let to = if max2 > max1 {
            if ty.is_large_on_top() {
                return RangeSet::unknown();
            }
            ty.max().max(max2)
        } else {
            max1
        };
        RangeSet::range_in(from, to, ty)
    }
}

#[cfg(test)]
pub mod tests {
    use test_log::test;

    use super::*;
    use crate::types::IntTy;

    /// Checks the basic lattice axioms over every pair of samples.
    pub fn test_lattice_axioms<D: AbstractDomain>(domain: &D, samples: &[D::Element]) {
        for a in samples {
            assert!(domain.le(a, a), "Reflexivity failed for {:?}", a);

            let joined = domain.join(a, &domain.bottom());
            assert!(domain.eq(a, &joined), "Join with bottom failed for {:?}", a);

            let met = domain.meet(a, &domain.top());
            assert!(domain.eq(a, &met), "Meet with top failed for {:?}", a);

            for b in samples {
                let widened = domain.widen(a, b);
                assert!(domain.le(a, &widened), "Widening lost {:?}", a);
                assert!(domain.le(b, &widened), "Widening lost {:?}", b);
            }
        }

        for a in samples {
            for b in samples {
                assert_eq!(domain.join(a, b), domain.join(b, a), "Join commutativity failed");
                assert_eq!(domain.meet(a, b), domain.meet(b, a), "Meet commutativity failed");

                let joined = domain.join(a, b);
                assert!(domain.le(a, &joined), "Join is not an upper bound of {:?}", a);
                assert!(domain.le(b, &joined), "Join is not an upper bound of {:?}", b);

                let met = domain.meet(a, b);
                assert!(domain.le(&met, a), "Meet is not a lower bound of {:?}", a);
                assert!(domain.le(&met, b), "Meet is not a lower bound of {:?}", b);
            }
        }
    }

    fn samples() -> Vec<RangeSet> {
        vec![
            RangeSet::empty(),
            RangeSet::overflow(),
            RangeSet::division_by_zero(),
            RangeSet::unknown(),
            RangeSet::point(0),
            RangeSet::point(i64::MAX),
            RangeSet::range(-5, 5),
            RangeSet::range(3, 20),
            "0..2, 10, 15..18".parse().unwrap(),
            RangeSet::range_in(0, 255, IntTy::U8),
            RangeSet::range_in(0, 7, IntTy::U64),
        ]
    }

    #[test]
    fn test_range_domain_lattice() {
        test_lattice_axioms(&RangeDomain, &samples());
    }

    #[test]
    fn test_bottom_top() {
        let domain = RangeDomain;
        assert!(domain.is_bottom(&domain.bottom()));
        assert!(domain.is_bottom(&RangeSet::overflow()));
        assert!(domain.is_top(&domain.top()));
        assert!(!domain.is_top(&RangeSet::all(IntTy::I64)));
        for x in samples() {
            assert!(domain.le(&domain.bottom(), &x), "{}", x);
            assert!(domain.le(&x, &domain.top()), "{}", x);
        }
    }

    #[test]
    fn test_join_many() {
        let domain = RangeDomain;
        let joined = domain.join_many([RangeSet::point(1), RangeSet::range(5, 7), RangeSet::point(2)]);
        assert_eq!(joined.to_string(), "{1, 2, 5..7}");
        assert_eq!(domain.join_many(std::iter::empty()), RangeSet::empty());
    }

    #[test]
    fn test_widen() {
        let domain = RangeDomain;
        let a = RangeSet::range(0, 10);
        assert_eq!(domain.widen(&a, &RangeSet::range(2, 5)), a);
        assert_eq!(domain.widen(&RangeSet::empty(), &a), a);
        assert_eq!(domain.widen(&a, &RangeSet::range(0, 11)), RangeSet::range(0, i64::MAX));
        assert_eq!(domain.widen(&a, &RangeSet::range(-1, 10)), RangeSet::range(i64::MIN, 10));
        assert_eq!(domain.widen(&a, &RangeSet::unknown()), RangeSet::unknown());
        assert_eq!(
            domain.widen(&"0..2, 8..10".parse().unwrap(), &RangeSet::point(5)),
            RangeSet::range(0, 10)
        );
        let small = RangeSet::range_in(0, 10, IntTy::U8);
        assert_eq!(domain.widen(&small, &RangeSet::range_in(0, 11, IntTy::U8)).to_string(), "{0..255}");
        let large = RangeSet::range_in(0, 10, IntTy::U64);
        assert_eq!(domain.widen(&large, &RangeSet::range_in(0, 11, IntTy::U64)), RangeSet::unknown());
    }

    #[test]
    fn test_widening_stabilizes() {
        let domain = RangeDomain;
        let mut x = RangeSet::point(0);
        let mut steps = 0;
        loop {
            // i = i + 1 in a loop, with a gap that the join alone never fills.
            let next = domain.join(&x, &x.plus(&RangeSet::point(2)));
            let widened = domain.widen(&x, &next);
            if widened == x {
                break;
            }
            x = widened;
            steps += 1;
            assert!(steps < 5, "no fixpoint after {} steps: {}", steps, x);
        }
        assert_eq!(x, RangeSet::range(0, i64::MAX));
    }
}
