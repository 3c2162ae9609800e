//! Status enumerations for flows and steps.

use serde::{Deserialize, Serialize};

/// Lifecycle of one flow session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlowStatus {
    /// Steps are still being collected
    #[default]
    Active,

    /// The terminal step was completed and the record delivered
    Finished,
}

impl FlowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowStatus::Active => "active",
            FlowStatus::Finished => "finished",
        }
    }
}

/// Progress marker of a single step relative to the session state.
///
/// This is derived on demand from the completed set and the current step
/// pointer; it is never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Step has not been completed and is not being shown
    Pending,

    /// Step is currently presented
    Current,

    /// Step has passed through the done transition at least once
    Completed,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::Current => "current",
            StepStatus::Completed => "completed",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Icons Used
    /// - `✓ Completed` - Checkmark for completed steps
    /// - `➤ Current` - Arrow for the presented step
    /// - `○ Pending` - Circle for untouched steps
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waypoint_core::models::StepStatus;
    ///
    /// assert_eq!(StepStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(StepStatus::Current.with_icon(), "➤ Current");
    /// assert_eq!(StepStatus::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            StepStatus::Completed => "✓ Completed",
            StepStatus::Current => "➤ Current",
            StepStatus::Pending => "○ Pending",
        }
    }

    /// Bare icon, for compact step indicators.
    pub fn icon(&self) -> &'static str {
        match self {
            StepStatus::Completed => "✓",
            StepStatus::Current => "➤",
            StepStatus::Pending => "○",
        }
    }
}
