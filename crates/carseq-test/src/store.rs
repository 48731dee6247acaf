//! Trail-backed domain store.
//!
//! Domains are ordered sets of integers. Every removal and every reversible
//! write is pushed on a trail; [`TrailedStore::rewind`] pops back to the most
//! recent checkpoint and restores exactly the state that was current there.

use std::cell::Cell;
use std::collections::BTreeSet;

use carseq_core::{
    CarSequencingProblem, Contradiction, IntDomains, IntDomainsMut, Reversible, ReversibleInt,
    VarId,
};

/// A single undoable change.
#[derive(Debug, Clone, Copy)]
enum TrailEntry {
    Removed { var: VarId, value: i64 },
    Int { cell: usize, old: i64 },
}

/// In-memory integer domains with checkpoint/rewind.
///
/// Counts calls to [`IntDomains::is_instantiated`] so tests can observe how
/// much of the sequence a selector rescans.
#[derive(Debug, Default)]
pub struct TrailedStore {
    domains: Vec<BTreeSet<i64>>,
    ints: Vec<i64>,
    entries: Vec<TrailEntry>,
    checkpoints: Vec<usize>,
    instantiation_checks: Cell<usize>,
}

impl TrailedStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates one variable per slot of `problem`, each ranging over all
    /// class ids.
    pub fn for_sequence(problem: &CarSequencingProblem) -> (Self, Vec<VarId>) {
        let mut store = Self::new();
        let upper = problem.class_count() as i64 - 1;
        let vars = (0..problem.sequence_length())
            .map(|_| store.new_var(0, upper))
            .collect();
        (store, vars)
    }

    /// Adds a variable with domain `lower..=upper`.
    pub fn new_var(&mut self, lower: i64, upper: i64) -> VarId {
        self.new_var_from(lower..=upper)
    }

    /// Adds a variable with an explicit domain.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new_var_from(&mut self, values: impl IntoIterator<Item = i64>) -> VarId {
        let domain: BTreeSet<i64> = values.into_iter().collect();
        assert!(!domain.is_empty(), "variable created with an empty domain");
        self.domains.push(domain);
        self.domains.len() - 1
    }

    /// Number of variables.
    pub fn var_count(&self) -> usize {
        self.domains.len()
    }

    /// Records a checkpoint to rewind to.
    pub fn checkpoint(&mut self) {
        self.checkpoints.push(self.entries.len());
    }

    /// Undoes every change since the most recent checkpoint.
    ///
    /// Returns false if there is no checkpoint.
    pub fn rewind(&mut self) -> bool {
        let Some(mark) = self.checkpoints.pop() else {
            return false;
        };
        while self.entries.len() > mark {
            match self.entries.pop() {
                Some(TrailEntry::Removed { var, value }) => {
                    self.domains[var].insert(value);
                }
                Some(TrailEntry::Int { cell, old }) => self.ints[cell] = old,
                None => break,
            }
        }
        true
    }

    /// Number of open checkpoints.
    pub fn depth(&self) -> usize {
        self.checkpoints.len()
    }

    /// Narrows `var` to `value`.
    pub fn assign(&mut self, var: VarId, value: i64) -> Result<(), Contradiction> {
        if !self.domains[var].contains(&value) {
            return Err(Contradiction::on(var));
        }
        let others: Vec<i64> = self.domains[var]
            .iter()
            .copied()
            .filter(|&v| v != value)
            .collect();
        for v in others {
            self.remove_value(var, v)?;
        }
        Ok(())
    }

    /// Current domain of `var`, in increasing order.
    pub fn domain(&self, var: VarId) -> Vec<i64> {
        self.domains[var].iter().copied().collect()
    }

    /// Calls to `is_instantiated` since the last reset.
    pub fn instantiation_checks(&self) -> usize {
        self.instantiation_checks.get()
    }

    pub fn reset_instantiation_checks(&self) {
        self.instantiation_checks.set(0);
    }
}

impl IntDomains for TrailedStore {
    fn lower_bound(&self, var: VarId) -> i64 {
        self.domains[var].first().copied().unwrap_or(i64::MAX)
    }

    fn upper_bound(&self, var: VarId) -> i64 {
        self.domains[var].last().copied().unwrap_or(i64::MIN)
    }

    fn contains(&self, var: VarId, value: i64) -> bool {
        self.domains[var].contains(&value)
    }

    fn next_value(&self, var: VarId, value: i64) -> Option<i64> {
        self.domains[var]
            .range(value.saturating_add(1)..)
            .next()
            .copied()
            .filter(|&v| v > value)
    }

    fn previous_value(&self, var: VarId, value: i64) -> Option<i64> {
        self.domains[var].range(..value).next_back().copied()
    }

    fn domain_size(&self, var: VarId) -> usize {
        self.domains[var].len()
    }

    fn is_instantiated(&self, var: VarId) -> bool {
        self.instantiation_checks.set(self.instantiation_checks.get() + 1);
        self.domains[var].len() == 1
    }
}

impl IntDomainsMut for TrailedStore {
    fn remove_value(&mut self, var: VarId, value: i64) -> Result<bool, Contradiction> {
        let domain = &mut self.domains[var];
        if !domain.contains(&value) {
            return Ok(false);
        }
        if domain.len() == 1 {
            return Err(Contradiction::on(var));
        }
        domain.remove(&value);
        self.entries.push(TrailEntry::Removed { var, value });
        Ok(true)
    }
}

impl Reversible for TrailedStore {
    fn new_reversible_int(&mut self, initial: i64) -> ReversibleInt {
        self.ints.push(initial);
        ReversibleInt::new(self.ints.len() - 1)
    }

    fn reversible_int(&self, cell: ReversibleInt) -> i64 {
        self.ints[cell.index()]
    }

    fn set_reversible_int(&mut self, cell: ReversibleInt, value: i64) {
        let index = cell.index();
        let old = self.ints[index];
        if old != value {
            self.entries.push(TrailEntry::Int { cell: index, old });
            self.ints[index] = value;
        }
    }
}
