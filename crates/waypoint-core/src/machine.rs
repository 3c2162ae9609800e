//! The pure step-orchestration state machine.
//!
//! [`transition`] maps `(table, state, operation)` to a new state plus the
//! single [`Event`] the operation produced. It never fails: an illegal
//! operation yields [`Event::Rejected`] and hands the state back untouched.
//!
//! ```text
//!   update ──────────────▶ merge data                       ─▶ Merged
//!   complete_step(id) ───▶ merge, mark id completed, then
//!        ├─ branch signal set ─▶ current := edge.to          ─▶ Navigated
//!        ├─ id is terminal ────▶ status := Finished          ─▶ Completed(record)
//!        └─ otherwise ─────────▶ current := id + 1           ─▶ Navigated
//!   go_back ─────────────▶ first step ? exit : current - 1   ─▶ ExitedEarly | Navigated
//!   go_to(id) ───────────▶ id <= frontier ? current := id    ─▶ Navigated | Rejected
//!   save_and_exit ───────▶ always                            ─▶ ExitedEarly(record)
//! ```

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    models::{FlowStatus, StepId, StepTable, WizardState},
    record::{Patch, Record},
};

/// An operation requested by the step host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation<P> {
    /// Live-typing merge; never moves the step pointer
    Update { data: P },
    /// Mark `step` done with its final data and move on
    CompleteStep {
        step: StepId,
        #[serde(default)]
        data: P,
    },
    /// One step back, or leave the flow from the first step
    GoBack,
    /// Direct jump, e.g. from a step indicator
    GoTo { step: StepId },
    /// Hand the partial record to the exit gateway
    SaveAndExit,
}

/// Why an operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// The id is not part of the bound table
    UnknownStep { step: StepId },
    /// A jump past the navigation frontier
    BeyondFrontier { requested: StepId, frontier: StepId },
    /// A completion for a step other than the one presented
    NotCurrentStep { requested: StepId, current: StepId },
    /// The terminal step was already completed
    FlowFinished,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnknownStep { step } => write!(f, "step {step} is not in this flow"),
            Rejection::BeyondFrontier {
                requested,
                frontier,
            } => write!(f, "step {requested} is beyond the frontier (step {frontier})"),
            Rejection::NotCurrentStep { requested, current } => {
                write!(f, "step {requested} is not the current step ({current})")
            }
            Rejection::FlowFinished => f.write_str("the flow is already finished"),
        }
    }
}

/// Outcome of one operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum Event<R> {
    /// Data merged, position unchanged
    Merged,
    /// The current step moved
    Navigated { from: StepId, to: StepId },
    /// The terminal step completed; carries the full record
    Completed(R),
    /// The flow was left early; carries the partial record
    ExitedEarly(R),
    /// The operation was refused and nothing changed
    Rejected(Rejection),
}

impl<R> Event<R> {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Event::Rejected(_))
    }

    /// Record handed to the exit gateway, if this event ends the session.
    pub fn record(&self) -> Option<&R> {
        match self {
            Event::Completed(record) | Event::ExitedEarly(record) => Some(record),
            _ => None,
        }
    }
}

/// New state plus the event that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<R> {
    pub state: WizardState<R>,
    pub event: Event<R>,
}

impl<R> Transition<R> {
    fn new(state: WizardState<R>, event: Event<R>) -> Self {
        Self { state, event }
    }
}

/// Apply `op` to `state` under the rules of `table`.
pub fn transition<R: Record>(
    table: &StepTable<R>,
    state: WizardState<R>,
    op: Operation<R::Patch>,
) -> Transition<R> {
    if state.is_finished() && !matches!(op, Operation::SaveAndExit) {
        return reject(table, state, Rejection::FlowFinished);
    }
    if !table.contains(state.current_step) && !matches!(op, Operation::SaveAndExit) {
        let step = state.current_step;
        return reject(table, state, Rejection::UnknownStep { step });
    }

    match op {
        Operation::Update { data } => update(state, data),
        Operation::CompleteStep { step, data } => complete_step(table, state, step, data),
        Operation::GoBack => go_back(table, state),
        Operation::GoTo { step } => go_to(table, state, step),
        Operation::SaveAndExit => save_and_exit(table, state),
    }
}

fn update<R: Record>(mut state: WizardState<R>, data: R::Patch) -> Transition<R> {
    state.data.merge(data);
    Transition::new(state, Event::Merged)
}

fn complete_step<R: Record>(
    table: &StepTable<R>,
    mut state: WizardState<R>,
    step: StepId,
    data: R::Patch,
) -> Transition<R> {
    if !table.contains(step) {
        return reject(table, state, Rejection::UnknownStep { step });
    }
    if step != state.current_step {
        let current = state.current_step;
        return reject(
            table,
            state,
            Rejection::NotCurrentStep {
                requested: step,
                current,
            },
        );
    }

    let loop_back = table
        .branch_from(step)
        .filter(|edge| data.signal(&edge.condition))
        .map(|edge| edge.to);

    state.data.merge(data);
    state.completed_steps.insert(step);

    match loop_back {
        Some(to) => {
            debug!("{}: step {step} loops back to step {to}", table.name());
            navigate(table, state, to)
        }
        None if table.is_terminal(step) => {
            info!("{}: terminal step {step} completed", table.name());
            state.status = FlowStatus::Finished;
            let record = state.data.clone();
            Transition::new(state, Event::Completed(record))
        }
        None => navigate(table, state, step + 1),
    }
}

fn go_back<R: Record>(table: &StepTable<R>, state: WizardState<R>) -> Transition<R> {
    if state.current_step <= table.first_id() {
        info!("{}: back from first step, leaving flow", table.name());
        let record = state.data.clone();
        return Transition::new(state, Event::ExitedEarly(record));
    }
    let to = state.current_step - 1;
    navigate(table, state, to)
}

fn go_to<R: Record>(table: &StepTable<R>, state: WizardState<R>, step: StepId) -> Transition<R> {
    if !table.contains(step) {
        return reject(table, state, Rejection::UnknownStep { step });
    }
    let frontier = state.frontier(table.first_id());
    if step > frontier {
        return reject(
            table,
            state,
            Rejection::BeyondFrontier {
                requested: step,
                frontier,
            },
        );
    }
    navigate(table, state, step)
}

fn save_and_exit<R: Record>(table: &StepTable<R>, state: WizardState<R>) -> Transition<R> {
    info!(
        "{}: saved and exited on step {}",
        table.name(),
        state.current_step
    );
    let record = state.data.clone();
    Transition::new(state, Event::ExitedEarly(record))
}

fn navigate<R>(table: &StepTable<R>, mut state: WizardState<R>, to: StepId) -> Transition<R> {
    let from = state.current_step;
    state.current_step = to;
    debug!("{}: step {from} -> {to}", table.name());
    Transition::new(state, Event::Navigated { from, to })
}

fn reject<R>(table: &StepTable<R>, state: WizardState<R>, reason: Rejection) -> Transition<R> {
    debug!("{}: rejected: {reason}", table.name());
    Transition::new(state, Event::Rejected(reason))
}
