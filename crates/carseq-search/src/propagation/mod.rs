//! Domain filtering.
//!
//! A [`Propagator`] narrows domains when the engine notifies it of a
//! change, and reports contradictions as `Err`. The engine schedules
//! propagators by [`Priority`] and runs them to fixpoint; a single
//! `propagate` call does one filtering pass.

mod mean;

use std::fmt::{self, Debug};
use std::ops::BitOr;

use carseq_core::{Contradiction, IntDomains, IntDomainsMut, Reversible};

pub use mean::{MeanBoundsPropagator, MeanTarget};

/// Kinds of domain change a propagator reacts to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EventMask(u32);

impl EventMask {
    pub const NONE: EventMask = EventMask(0);
    pub const INSTANTIATE: EventMask = EventMask(1);
    pub const INCREASE_LOWER: EventMask = EventMask(1 << 1);
    pub const DECREASE_UPPER: EventMask = EventMask(1 << 2);
    pub const REMOVE: EventMask = EventMask(1 << 3);
    /// Any bound change, including instantiation.
    pub const BOUNDS: EventMask = EventMask(0b0111);
    pub const ALL: EventMask = EventMask(0b1111);

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether every event of `other` is in `self`.
    pub const fn contains(self, other: EventMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether `self` and `other` share an event.
    pub const fn intersects(self, other: EventMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for EventMask {
    type Output = EventMask;

    fn bitor(self, rhs: EventMask) -> EventMask {
        EventMask(self.0 | rhs.0)
    }
}

impl Debug for EventMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventMask({:#06b})", self.0)
    }
}

/// Whether a constraint is guaranteed by the current domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entailment {
    /// Every remaining assignment satisfies the constraint.
    True,
    /// No remaining assignment satisfies the constraint.
    False,
    /// Not decided yet.
    Undefined,
}

/// Scheduling class of a propagator, cheapest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Unary,
    Binary,
    Ternary,
    Linear,
}

impl Priority {
    /// Priority of a propagator over `arity` variables.
    pub fn from_arity(arity: usize) -> Self {
        match arity {
            0 | 1 => Priority::Unary,
            2 => Priority::Binary,
            3 => Priority::Ternary,
            _ => Priority::Linear,
        }
    }
}

/// Whether a propagator still has work to do on this branch.
///
/// Stored in reversible storage so backtracking reactivates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagatorState {
    Active,
    Passive,
}

impl PropagatorState {
    pub(crate) fn to_int(self) -> i64 {
        match self {
            PropagatorState::Active => 0,
            PropagatorState::Passive => 1,
        }
    }

    pub(crate) fn from_int(value: i64) -> Self {
        if value == 0 {
            PropagatorState::Active
        } else {
            PropagatorState::Passive
        }
    }
}

/// Trait for domain filtering algorithms.
pub trait Propagator: Send + Debug {
    /// Runs one filtering pass.
    ///
    /// # Errors
    ///
    /// Returns [`Contradiction`] when a domain would become empty.
    fn propagate<E: IntDomainsMut + Reversible>(
        &mut self,
        env: &mut E,
        mask: EventMask,
    ) -> Result<(), Contradiction>;

    /// Decides entailment on the current domains.
    fn is_entailed<D: IntDomains>(&self, env: &D) -> Entailment;

    fn priority(&self) -> Priority;

    /// Events that should schedule this propagator.
    fn events(&self) -> EventMask {
        EventMask::ALL
    }
}
