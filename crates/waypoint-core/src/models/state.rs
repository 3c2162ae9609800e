//! Mutable session state owned by one controller.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{FlowStatus, StepId, StepStatus, StepTable};

/// Per-session flow state.
///
/// Only [`crate::machine::transition`] produces new states; everything else
/// reads them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WizardState<R> {
    /// Step currently presented; always an id of the bound table
    pub current_step: StepId,

    /// Steps that passed through the done transition. Never shrinks.
    pub completed_steps: BTreeSet<StepId>,

    /// Union of every field contributed so far
    pub data: R,

    /// Whether the terminal step has been completed
    pub status: FlowStatus,
}

impl<R> WizardState<R> {
    /// Fresh state positioned on the table's first step, seeded with `data`.
    pub fn start(table: &StepTable<R>, data: R) -> Self {
        Self {
            current_step: table.first_id(),
            completed_steps: BTreeSet::new(),
            data,
            status: FlowStatus::Active,
        }
    }

    /// Furthest step id reachable by a direct jump.
    ///
    /// This is `max(completed ∪ {first}) + 1`, without clamping to the table,
    /// saturating at `StepId::MAX`.
    pub fn frontier(&self, first: StepId) -> StepId {
        let furthest = self
            .completed_steps
            .iter()
            .next_back()
            .copied()
            .map_or(first, |last| last.max(first));
        furthest.saturating_add(1)
    }

    pub fn is_completed(&self, id: StepId) -> bool {
        self.completed_steps.contains(&id)
    }

    pub fn is_finished(&self) -> bool {
        self.status == FlowStatus::Finished
    }

    /// Derived progress marker for one step.
    pub fn status_of(&self, id: StepId) -> StepStatus {
        if id == self.current_step {
            StepStatus::Current
        } else if self.is_completed(id) {
            StepStatus::Completed
        } else {
            StepStatus::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StepDescriptor;

    fn table() -> StepTable<()> {
        StepTable::builder("state")
            .step(StepDescriptor::new(1, "One"))
            .step(StepDescriptor::new(2, "Two"))
            .step(StepDescriptor::new(3, "Three"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_start_state() {
        let state = WizardState::start(&table(), ());
        assert_eq!(state.current_step, 1);
        assert!(state.completed_steps.is_empty());
        assert_eq!(state.status, FlowStatus::Active);
    }

    #[test]
    fn test_frontier_follows_highest_completed() {
        let mut state = WizardState::start(&table(), ());
        assert_eq!(state.frontier(1), 2);

        state.completed_steps.insert(1);
        assert_eq!(state.frontier(1), 2);

        state.completed_steps.insert(2);
        assert_eq!(state.frontier(1), 3);
    }

    #[test]
    fn test_status_of_prefers_current() {
        let mut state = WizardState::start(&table(), ());
        state.completed_steps.insert(1);
        assert_eq!(state.status_of(1), StepStatus::Current);
        state.current_step = 2;
        assert_eq!(state.status_of(1), StepStatus::Completed);
        assert_eq!(state.status_of(3), StepStatus::Pending);
    }
}
