//! Markdown formatting for views, tables and events.
//!
//! Domain types implement [`std::fmt::Display`] directly (see [`models`]);
//! the wrappers here add context a bare value does not carry, such as the
//! record a step table's derived titles resolve against.
//!
//! - [`collections`]: step table and flow listings
//! - [`results`]: per-operation event reports and notices
//! - [`datetime`]: timestamp formatting
//! - [`models`]: `Display` for views, statuses and drafts
//!
//! # Examples
//!
//! ```rust
//! use waypoint_core::{display::EventReport, machine::Event, record::Fields};
//!
//! let event: Event<Fields> = Event::Navigated { from: 2, to: 3 };
//! assert_eq!(EventReport::new(1, &event).to_string(), "1. step 2 → 3\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{FlowList, StepTableListing};
pub use datetime::LocalDateTime;
pub use results::{EventReport, Notice};
