//! Sequential variable selection.

use std::fmt::Debug;

use carseq_core::{IntDomains, Reversible, ReversibleInt, VarId};

/// Trait for choosing the next variable to branch on.
pub trait VariableSelector: Send + Debug {
    /// Returns the next variable of `vars` to branch on, or `None` once all
    /// are instantiated.
    fn get_next<E: IntDomains + Reversible>(&mut self, env: &mut E, vars: &[VarId]) -> Option<VarId>;
}

/// Picks the lowest-index unassigned variable.
///
/// Scanning resumes from a cursor stored in the engine's reversible
/// storage. Every variable before the cursor is known to be instantiated,
/// so a forward step doesn't rescan the prefix, and backtracking restores
/// the cursor along with the domains.
#[derive(Debug, Clone, Copy)]
pub struct SequentialVariableSelector {
    cursor: ReversibleInt,
}

impl SequentialVariableSelector {
    /// Allocates the cursor, starting at index 0.
    pub fn new<E: Reversible>(env: &mut E) -> Self {
        Self {
            cursor: env.new_reversible_int(0),
        }
    }

    /// Current cursor position.
    pub fn cursor<E: Reversible>(&self, env: &E) -> usize {
        usize::try_from(env.reversible_int(self.cursor)).unwrap_or(0)
    }
}

impl VariableSelector for SequentialVariableSelector {
    fn get_next<E: IntDomains + Reversible>(&mut self, env: &mut E, vars: &[VarId]) -> Option<VarId> {
        let start = self.cursor(&*env).min(vars.len());
        let found = vars[start..]
            .iter()
            .position(|&var| !env.is_instantiated(var))
            .map(|offset| start + offset);

        let next = found.unwrap_or(vars.len());
        env.set_reversible_int(self.cursor, next as i64);
        found.map(|index| vars[index])
    }
}
