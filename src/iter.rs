//! Ascending enumeration of set members.

use std::iter::FusedIterator;
use std::ops::RangeInclusive;

use crate::set::RangeSet;

/// Lazy ascending iterator over the values of a [`RangeSet`].
///
/// Created by [`RangeSet::values`]; call it again to enumerate from the beginning.
#[derive(Debug, Clone)]
pub struct Values {
    intervals: Vec<(i64, i64)>,
    next_interval: usize,
    current: Option<RangeInclusive<i64>>,
}

impl Values {
    fn new(intervals: Vec<(i64, i64)>) -> Self {
        Self {
            intervals,
            next_interval: 0,
            current: None,
        }
    }
}

impl Iterator for Values {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        loop {
            if let Some(value) = self.current.as_mut().and_then(|r| r.next()) {
                return Some(value);
            }
            let &(from, to) = self.intervals.get(self.next_interval)?;
            self.next_interval += 1;
            self.current = Some(from..=to);
        }
    }
}

impl FusedIterator for Values {}

impl RangeSet {
    /// Enumerates the members in ascending order.
    ///
    /// Unknown enumerates the whole `i64` domain; use [`Iterator::take`] to
    /// bound it.
    pub fn values(&self) -> Values {
        Values::new(self.intervals())
    }
}

impl IntoIterator for &RangeSet {
    type Item = i64;
    type IntoIter = Values;

    fn into_iter(self) -> Values {
        self.values()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_values() {
        let set: RangeSet = "1..3, 7, 10, 11".parse().unwrap();
        assert_eq!(set.values().collect::<Vec<_>>(), vec![1, 2, 3, 7, 10, 11]);
        assert_eq!(set.values().take(2).collect::<Vec<_>>(), vec![1, 2]);
        // restartable
        assert_eq!(set.values().count(), 6);
        assert_eq!((&set).into_iter().last(), Some(11));
    }

    #[test]
    fn test_values_special() {
        assert_eq!(RangeSet::empty().values().next(), None);
        assert_eq!(RangeSet::overflow().values().count(), 0);
        assert_eq!(
            RangeSet::unknown().values().take(3).collect::<Vec<_>>(),
            vec![i64::MIN, i64::MIN + 1, i64::MIN + 2]
        );
    }

    #[test]
    fn test_values_at_edge() {
        let set = RangeSet::range(i64::MAX - 2, i64::MAX);
        assert_eq!(set.values().collect::<Vec<_>>(), vec![i64::MAX - 2, i64::MAX - 1, i64::MAX]);
        let mut it = set.values();
        it.by_ref().for_each(drop);
        assert_eq!(it.next(), None);
    }
}
