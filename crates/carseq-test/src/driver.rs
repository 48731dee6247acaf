//! Depth-first search loop.
//!
//! Binary branching: a decision `x = v` is tried first, then `x != v`.
//! Propagation runs at every node through a caller-supplied closure, so the
//! same loop drives bare heuristics, the mean propagator, or both.

use carseq_core::{
    check_prefix, CarSequencingProblem, Contradiction, IntDomains, IntDomainsMut, VarId,
};

use crate::store::TrailedStore;

/// Exhaustive depth-first search with a node budget.
#[derive(Debug, Clone)]
pub struct DepthFirst {
    node_limit: usize,
    nodes: usize,
    failures: usize,
}

impl DepthFirst {
    /// Creates a search that gives up after `node_limit` nodes.
    pub fn new(node_limit: usize) -> Self {
        Self {
            node_limit,
            nodes: 0,
            failures: 0,
        }
    }

    /// Nodes visited by the last call to [`solve`](Self::solve).
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Failed nodes of the last call to [`solve`](Self::solve).
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Searches for an assignment of `vars`.
    ///
    /// `branch` returns the next decision or `None` once every variable is
    /// fixed. `propagate` filters domains and reports failures. The store is
    /// left in its initial state on return.
    pub fn solve<B, P>(
        &mut self,
        store: &mut TrailedStore,
        vars: &[VarId],
        mut branch: B,
        mut propagate: P,
    ) -> Option<Vec<i64>>
    where
        B: FnMut(&mut TrailedStore) -> Option<(VarId, i64)>,
        P: FnMut(&mut TrailedStore) -> Result<(), Contradiction>,
    {
        self.nodes = 0;
        self.failures = 0;
        self.node(store, vars, &mut branch, &mut propagate)
    }

    fn node<B, P>(
        &mut self,
        store: &mut TrailedStore,
        vars: &[VarId],
        branch: &mut B,
        propagate: &mut P,
    ) -> Option<Vec<i64>>
    where
        B: FnMut(&mut TrailedStore) -> Option<(VarId, i64)>,
        P: FnMut(&mut TrailedStore) -> Result<(), Contradiction>,
    {
        if self.nodes >= self.node_limit {
            return None;
        }
        self.nodes += 1;

        if propagate(store).is_err() {
            self.failures += 1;
            return None;
        }
        let Some((var, value)) = branch(store) else {
            return vars.iter().map(|&v| store.value(v)).collect();
        };

        store.checkpoint();
        let found = match store.assign(var, value) {
            Ok(()) => self.node(store, vars, branch, propagate),
            Err(_) => None,
        };
        store.rewind();
        if found.is_some() {
            return found;
        }

        store.checkpoint();
        let found = match store.remove_value(var, value) {
            Ok(_) => self.node(store, vars, branch, propagate),
            Err(_) => {
                self.failures += 1;
                None
            }
        };
        store.rewind();
        found
    }
}

/// Fails when the leading instantiated slots break a frequency policy or
/// exceed a class demand.
///
/// Stands in for the table and cardinality constraints of a full model.
pub fn check_assigned_prefix(
    problem: &CarSequencingProblem,
    store: &TrailedStore,
    vars: &[VarId],
) -> Result<(), Contradiction> {
    let mut prefix = Vec::with_capacity(vars.len());
    for &var in vars {
        let Some(value) = store.value(var) else {
            break;
        };
        let class = problem.class_of(value).ok_or(Contradiction::on(var))?;
        prefix.push(class);
    }
    match (check_prefix(problem, &prefix), prefix.len().checked_sub(1)) {
        (Err(_), Some(last)) => Err(Contradiction::on(vars[last])),
        _ => Ok(()),
    }
}
