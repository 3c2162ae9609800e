//! Imperative wrapper around the pure state machine.
//!
//! A [`WizardController`] owns one session: its step table and its
//! [`WizardState`]. Each operation runs [`transition`] and stores the
//! resulting state, so the controller is just the place where the latest
//! state lives between UI events.
//!
//! Observers registered through [`WizardBuilder::with_observer`] receive the
//! merged record after every accepted data-carrying operation, so a parent
//! that mirrors the record never sees it stale.
//!
//! # Examples
//!
//! ```rust
//! use waypoint_core::{
//!     gateway::RecordingGateway,
//!     models::{StepDescriptor, StepTable},
//!     record::Fields,
//!     WizardBuilder,
//! };
//!
//! let table: StepTable<Fields> = StepTable::builder("signup")
//!     .step(StepDescriptor::new(1, "Account"))
//!     .step(StepDescriptor::new(2, "Profile"))
//!     .build()
//!     .unwrap();
//!
//! let mut wizard = WizardBuilder::new(table).build();
//! let mut gateway = RecordingGateway::new();
//!
//! wizard.complete_step(1, Fields::new().with("email", "a@b.c"));
//! wizard
//!     .complete_step(2, Fields::new().with("name", "Ada"))
//!     .dispatch(&mut gateway);
//!
//! let record = gateway.last_completed().unwrap();
//! assert_eq!(record.str("email"), Some("a@b.c"));
//! assert_eq!(record.str("name"), Some("Ada"));
//! ```

use std::{collections::BTreeSet, fmt, mem};

use crate::{
    drafts::Draft,
    error::Result,
    gateway::ExitGateway,
    machine::{transition, Event, Operation},
    models::{StepId, StepTable, StepView, WizardState},
    record::Record,
};

/// Receives the record after every accepted data change.
pub trait RecordObserver<R> {
    fn record_changed(&mut self, record: &R);
}

impl<R, F> RecordObserver<R> for F
where
    F: FnMut(&R),
{
    fn record_changed(&mut self, record: &R) {
        (*self)(record)
    }
}

/// Owns the state of one flow session.
pub struct WizardController<R: Record> {
    table: StepTable<R>,
    state: WizardState<R>,
    observers: Vec<Box<dyn RecordObserver<R>>>,
}

impl<R: Record> WizardController<R> {
    /// Apply any operation and return the event it produced.
    pub fn apply(&mut self, op: Operation<R::Patch>) -> Event<R> {
        let carries_data = matches!(op, Operation::Update { .. } | Operation::CompleteStep { .. });

        let state = mem::replace(&mut self.state, WizardState::start(&self.table, R::default()));
        let outcome = transition(&self.table, state, op);
        self.state = outcome.state;

        if carries_data && !outcome.event.is_rejected() {
            for observer in &mut self.observers {
                observer.record_changed(&self.state.data);
            }
        }
        outcome.event
    }

    /// Apply an operation and forward any session-ending event to `gateway`.
    pub fn apply_with<G>(&mut self, op: Operation<R::Patch>, gateway: &mut G) -> Event<R>
    where
        G: ExitGateway<R> + ?Sized,
    {
        let event = self.apply(op);
        event.dispatch(gateway);
        event
    }

    /// Merge live-typed data without moving.
    pub fn update(&mut self, data: R::Patch) -> Event<R> {
        self.apply(Operation::Update { data })
    }

    /// Complete `step` with its final data.
    pub fn complete_step(&mut self, step: StepId, data: R::Patch) -> Event<R> {
        self.apply(Operation::CompleteStep { step, data })
    }

    pub fn go_back(&mut self) -> Event<R> {
        self.apply(Operation::GoBack)
    }

    pub fn go_to(&mut self, step: StepId) -> Event<R> {
        self.apply(Operation::GoTo { step })
    }

    pub fn save_and_exit(&mut self) -> Event<R> {
        self.apply(Operation::SaveAndExit)
    }

    pub fn table(&self) -> &StepTable<R> {
        &self.table
    }

    pub fn state(&self) -> &WizardState<R> {
        &self.state
    }

    pub fn current_step(&self) -> StepId {
        self.state.current_step
    }

    pub fn completed_steps(&self) -> &BTreeSet<StepId> {
        &self.state.completed_steps
    }

    pub fn data(&self) -> &R {
        &self.state.data
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Fresh projection for rendering.
    pub fn view(&self) -> StepView {
        StepView::project(&self.table, &self.state)
    }

    /// Snapshot the current record as a draft of this flow.
    pub fn draft(&self) -> Draft<R> {
        Draft::new(self.table.name(), self.state.data.clone())
    }

    pub fn into_state(self) -> WizardState<R> {
        self.state
    }
}

impl<R: Record> fmt::Debug for WizardController<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WizardController")
            .field("table", &self.table.name())
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Builder for creating and configuring [`WizardController`] instances.
pub struct WizardBuilder<R: Record> {
    table: StepTable<R>,
    seed: Option<R>,
    observers: Vec<Box<dyn RecordObserver<R>>>,
}

impl<R: Record> fmt::Debug for WizardBuilder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WizardBuilder")
            .field("table", &self.table.name())
            .field("seed", &self.seed)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<R: Record> WizardBuilder<R> {
    pub fn new(table: StepTable<R>) -> Self {
        Self {
            table,
            seed: None,
            observers: Vec::new(),
        }
    }

    /// Seed the accumulated record with externally supplied data.
    pub fn with_data(mut self, data: R) -> Self {
        self.seed = Some(data);
        self
    }

    /// Seed from a saved draft of the same flow.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft belongs to another flow or another
    /// record schema version.
    pub fn resume(self, draft: Draft<R>) -> Result<Self> {
        draft.validate_for(self.table.name())?;
        Ok(self.with_data(draft.data))
    }

    /// Register an observer of record changes.
    pub fn with_observer(mut self, observer: impl RecordObserver<R> + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn build(self) -> WizardController<R> {
        let state = WizardState::start(&self.table, self.seed.unwrap_or_default());
        WizardController {
            table: self.table,
            state,
            observers: self.observers,
        }
    }
}
