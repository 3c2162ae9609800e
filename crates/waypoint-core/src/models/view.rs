//! Read-only projection of a session for the rendering layer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{FlowStatus, StepId, StepStatus, StepTable, WizardState};

/// One line of the step indicator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StepLine {
    pub id: StepId,
    /// Title resolved against the record at projection time
    pub title: String,
    pub required: bool,
    pub navigable: bool,
    pub status: StepStatus,
    /// Whether a direct jump to this step would be accepted
    pub reachable: bool,
}

/// Everything a step host needs to draw the current screen.
///
/// Titles are resolved when the view is built, so a view must be rebuilt
/// after every operation rather than cached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StepView {
    pub flow: String,
    pub current_step_id: StepId,
    pub title: String,
    pub description: Option<String>,
    pub completed_step_ids: BTreeSet<StepId>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub is_terminal: bool,
    pub status: FlowStatus,
    /// Furthest step a direct jump may reach, clamped to the table
    pub frontier: StepId,
    /// Required steps still unsatisfied
    pub missing_required: Vec<StepId>,
    pub steps: Vec<StepLine>,
}

impl StepView {
    /// Project `state` through `table`.
    pub fn project<R>(table: &StepTable<R>, state: &WizardState<R>) -> Self {
        let frontier = state
            .frontier(table.first_id())
            .min(table.terminal_id());
        let finished = state.status == FlowStatus::Finished;

        let steps = table
            .steps()
            .iter()
            .map(|step| StepLine {
                id: step.id,
                title: step.title.resolve(&state.data),
                required: step.required,
                navigable: step.is_navigable(),
                status: state.status_of(step.id),
                reachable: !finished && step.id <= frontier,
            })
            .collect();

        let (title, description, navigable) = match table.get(state.current_step) {
            Some(step) => (
                step.title.resolve(&state.data),
                step.description.clone(),
                step.is_navigable(),
            ),
            None => (String::new(), None, false),
        };
        let is_terminal = table.is_terminal(state.current_step);

        Self {
            flow: table.name().to_string(),
            current_step_id: state.current_step,
            title,
            description,
            completed_step_ids: state.completed_steps.clone(),
            can_go_back: navigable && !finished,
            can_go_forward: navigable && !finished && !is_terminal,
            is_terminal,
            status: state.status,
            frontier,
            missing_required: table.missing_required(&state.completed_steps, &state.data),
            steps,
        }
    }

    /// Completed steps over total steps.
    pub fn progress(&self) -> (usize, usize) {
        (self.completed_step_ids.len(), self.steps.len())
    }
}
