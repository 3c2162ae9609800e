//! Data models for step tables and flow sessions.
//!
//! - [`step`]: step descriptors, titles and navigation chrome
//! - [`table`]: validated step tables and branch edges
//! - [`state`]: the mutable per-session state
//! - [`status`]: flow and step status enumerations
//! - [`view`]: the read-only projection handed to renderers
//!
//! # Examples
//!
//! ```rust
//! use waypoint_core::models::{StepDescriptor, StepTable, StepView, WizardState};
//! use waypoint_core::record::Fields;
//!
//! let table: StepTable<Fields> = StepTable::builder("signup")
//!     .step(StepDescriptor::new(1, "Account"))
//!     .step(StepDescriptor::new(2, "Profile"))
//!     .build()
//!     .unwrap();
//!
//! let state = WizardState::start(&table, Fields::new());
//! let view = StepView::project(&table, &state);
//! assert_eq!(view.title, "Account");
//! assert!(view.can_go_forward);
//! ```

pub mod state;
pub mod status;
pub mod step;
pub mod table;
pub mod view;

pub use state::WizardState;
pub use status::{FlowStatus, StepStatus};
pub use step::{Chrome, StepDescriptor, StepId, Title};
pub use table::{BranchEdge, StepTable, StepTableBuilder};
pub use view::{StepLine, StepView};
