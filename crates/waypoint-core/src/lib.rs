//! Core library for the Waypoint guided-flow engine.
//!
//! A flow ("wizard") is a bounded sequence of steps that collects one
//! composite record. This crate owns the orchestration of such flows: which
//! step is presented, which steps are completed, what data has accumulated
//! and where the user may go next. Rendering the steps is someone else's job.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  Operation  ┌──────────────────┐  Event   ┌─────────────┐
//! │  Step host  │────────────▶│ WizardController │─────────▶│ ExitGateway │
//! │ (renderer)  │◀────────────│  transition()    │          │ (persist)   │
//! └─────────────┘  StepView   └──────────────────┘          └─────────────┘
//! ```
//!
//! - [`models`]: step tables, session state and the rendering projection
//! - [`record`]: the shallow-merge record contract and the untyped [`Fields`]
//! - [`machine`]: the pure transition function
//! - [`controller`]: the per-session owner of state
//! - [`gateway`]: the exit boundary
//! - [`drafts`]: saving and resuming partial records
//! - [`flows`]: hotel listing, package listing and host onboarding
//! - [`display`]: markdown output
//!
//! # Quick Start
//!
//! ```rust
//! use waypoint_core::{
//!     flows::{hotel, HotelPatch},
//!     machine::Event,
//!     WizardBuilder,
//! };
//!
//! # fn main() -> Result<(), waypoint_core::WizardError> {
//! let mut wizard = WizardBuilder::new(hotel::table()?).build();
//!
//! let event = wizard.complete_step(
//!     hotel::PROPERTY_TYPE,
//!     HotelPatch {
//!         property_type: Some(hotel::PropertyType::Resort),
//!         ..HotelPatch::default()
//!     },
//! );
//! assert_eq!(event, Event::Navigated { from: 1, to: 2 });
//! assert_eq!(wizard.view().title, "Where is your resort located?");
//!
//! // Jumping ahead of the frontier is refused without changing anything.
//! assert!(wizard.go_to(hotel::PRICING).is_rejected());
//! assert_eq!(wizard.current_step(), hotel::LOCATION);
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod display;
pub mod drafts;
pub mod error;
pub mod flows;
pub mod gateway;
pub mod machine;
pub mod models;
pub mod record;

// Re-export commonly used types
pub use controller::{RecordObserver, WizardBuilder, WizardController};
pub use drafts::{Draft, DraftStore};
pub use error::{Result, WizardError};
pub use flows::FlowKind;
pub use gateway::{ExitGateway, RecordingGateway};
pub use machine::{transition, Event, Operation, Rejection, Transition};
pub use models::{
    BranchEdge, Chrome, FlowStatus, StepDescriptor, StepId, StepStatus, StepTable, StepView,
    WizardState,
};
pub use record::{Fields, Patch, Record};
