//! Engine seam traits.
//!
//! The search core does not own variables or the trail. It reads and
//! narrows domains through [`IntDomains`] / [`IntDomainsMut`], and keeps
//! backtrack-sensitive state in [`Reversible`] cells that the engine
//! restores on undo.

use crate::error::Contradiction;

/// Index of a decision variable in the engine's store.
pub type VarId = usize;

/// Read-only introspection of integer domains.
///
/// Implementations never expose an empty domain: emptying one is reported
/// as a [`Contradiction`] by [`IntDomainsMut::remove_value`] instead.
pub trait IntDomains {
    /// Smallest value in the domain of `var`.
    fn lower_bound(&self, var: VarId) -> i64;

    /// Largest value in the domain of `var`.
    fn upper_bound(&self, var: VarId) -> i64;

    /// Whether `value` is still in the domain of `var`.
    fn contains(&self, var: VarId, value: i64) -> bool;

    /// Smallest domain value strictly greater than `value`.
    fn next_value(&self, var: VarId, value: i64) -> Option<i64>;

    /// Largest domain value strictly smaller than `value`.
    fn previous_value(&self, var: VarId, value: i64) -> Option<i64>;

    /// Number of values in the domain of `var`.
    fn domain_size(&self, var: VarId) -> usize;

    /// Whether the domain of `var` is a singleton.
    fn is_instantiated(&self, var: VarId) -> bool {
        self.lower_bound(var) == self.upper_bound(var)
    }

    /// The assigned value, if `var` is instantiated.
    fn value(&self, var: VarId) -> Option<i64> {
        if self.is_instantiated(var) {
            Some(self.lower_bound(var))
        } else {
            None
        }
    }

    /// Iterates the domain of `var` in increasing order.
    fn values(&self, var: VarId) -> DomainValues<'_, Self>
    where
        Self: Sized,
    {
        DomainValues {
            domains: self,
            var,
            next: Some(self.lower_bound(var)),
        }
    }
}

/// Domain narrowing.
pub trait IntDomainsMut: IntDomains {
    /// Removes `value` from the domain of `var`.
    ///
    /// Returns `Ok(true)` if the value was present, `Ok(false)` if it was
    /// already absent, and `Err` if the removal would empty the domain.
    fn remove_value(&mut self, var: VarId, value: i64) -> Result<bool, Contradiction>;
}

/// Handle to an integer cell stored in the engine's trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReversibleInt(usize);

impl ReversibleInt {
    /// Wraps a store-specific cell index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the store-specific cell index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Backtrack-aware integer storage.
///
/// Writes through [`set_reversible_int`](Reversible::set_reversible_int)
/// are recorded so that undoing a decision restores the value that was
/// valid at that choice point.
pub trait Reversible {
    /// Allocates a new cell holding `initial`.
    fn new_reversible_int(&mut self, initial: i64) -> ReversibleInt;

    /// Reads a cell.
    fn reversible_int(&self, cell: ReversibleInt) -> i64;

    /// Writes a cell, recording the previous value for undo.
    fn set_reversible_int(&mut self, cell: ReversibleInt, value: i64);
}

/// Iterator over the values of one domain, in increasing order.
///
/// Created by [`IntDomains::values`].
pub struct DomainValues<'a, D: ?Sized> {
    domains: &'a D,
    var: VarId,
    next: Option<i64>,
}

impl<D: IntDomains + ?Sized> Iterator for DomainValues<'_, D> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let current = self.next?;
        self.next = self.domains.next_value(self.var, current);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(_) => (1, Some(self.domains.domain_size(self.var))),
            None => (0, Some(0)),
        }
    }
}
