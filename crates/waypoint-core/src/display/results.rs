//! Display wrappers for operation outcomes.

use std::fmt;

use serde::Serialize;

use crate::machine::Event;

/// One event, formatted as a markdown list item.
///
/// Session-ending events include the delivered record as pretty JSON.
pub struct EventReport<'a, R> {
    pub index: usize,
    pub event: &'a Event<R>,
}

impl<'a, R> EventReport<'a, R> {
    pub fn new(index: usize, event: &'a Event<R>) -> Self {
        Self { index, event }
    }
}

impl<R: Serialize> fmt::Display for EventReport<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. ", self.index)?;
        match self.event {
            Event::Merged => writeln!(f, "merged"),
            Event::Navigated { from, to } => writeln!(f, "step {from} → {to}"),
            Event::Rejected(reason) => writeln!(f, "**rejected**: {reason}"),
            Event::Completed(record) => {
                writeln!(f, "**completed**")?;
                write_record(f, record)
            }
            Event::ExitedEarly(record) => {
                writeln!(f, "**exited early**")?;
                write_record(f, record)
            }
        }
    }
}

fn write_record<R: Serialize>(f: &mut fmt::Formatter<'_>, record: &R) -> fmt::Result {
    let json = serde_json::to_string_pretty(record).map_err(|_| fmt::Error)?;
    writeln!(f, "\n```json\n{json}\n```")
}

/// Confirmation or failure line for side effects such as saving a draft.
pub struct Notice {
    pub message: String,
    pub success: bool,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.success { "Done:" } else { "Failed:" };
        writeln!(f, "{label} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{machine::Rejection, record::Fields};

    #[test]
    fn test_event_lines() {
        let nav: Event<Fields> = Event::Navigated { from: 1, to: 2 };
        assert_eq!(EventReport::new(1, &nav).to_string(), "1. step 1 → 2\n");

        let rejected: Event<Fields> = Event::Rejected(Rejection::UnknownStep { step: 7 });
        assert!(EventReport::new(2, &rejected)
            .to_string()
            .contains("**rejected**: step 7 is not in this flow"));
    }

    #[test]
    fn test_completed_embeds_record() {
        let done = Event::Completed(Fields::new().with("city", "X"));
        let output = EventReport::new(3, &done).to_string();
        assert!(output.starts_with("3. **completed**"));
        assert!(output.contains("\"city\": \"X\""));
    }

    #[test]
    fn test_notice() {
        assert_eq!(Notice::success("saved").to_string(), "Done: saved\n");
        assert_eq!(Notice::failure("nope").to_string(), "Failed: nope\n");
    }
}
