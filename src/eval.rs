//! Memoized evaluation of binary operations.
//!
//! A data-flow fixpoint re-evaluates the same expressions over the same
//! operand values many times. [`Evaluator`] keeps the results in a
//! direct-mapped [`Cache`] keyed by the operator and both operands,
//! including their integer kinds.

use std::cell::RefCell;
use std::fmt::{self, Debug};

use log::{debug, trace};

use crate::cache::Cache;
use crate::ops::BinOp;
use crate::set::RangeSet;
use crate::types::IntTy;

type OpKey = (BinOp, IntTy, RangeSet, IntTy, RangeSet);

pub struct Evaluator {
    cache: RefCell<Cache<OpKey, RangeSet>>,
}

impl Evaluator {
    /// Create an evaluator with a cache of `2^cache_bits` entries.
    pub fn new(cache_bits: usize) -> Self {
        Self {
            cache: RefCell::new(Cache::new(cache_bits)),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::new(12)
    }
}

impl Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.cache.borrow();
        f.debug_struct("Evaluator")
            .field("capacity", &cache.capacity())
            .field("hits", &cache.hits())
            .field("misses", &cache.misses())
            .finish()
    }
}

impl Evaluator {
    /// Possible results of `lhs op rhs`, see [`RangeSet::binop`].
    pub fn binop(&self, lhs: &RangeSet, op: BinOp, rhs: &RangeSet) -> RangeSet {
        let key = (op, lhs.ty(), lhs.clone(), rhs.ty(), rhs.clone());
        if let Some(res) = self.cache.borrow().get(&key) {
            trace!("cache: binop({} {} {}) -> {}", lhs, op, rhs, res);
            return res.clone();
        }

        let res = lhs.binop(op, rhs);
        debug!("computed: binop({} {} {}) -> {}", lhs, op, rhs, res);
        self.cache.borrow_mut().insert(key, res.clone());
        res
    }

    pub fn hits(&self) -> usize {
        self.cache.borrow().hits()
    }

    pub fn misses(&self) -> usize {
        self.cache.borrow().misses()
    }

    /// Drop all memoized results.
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }
}
