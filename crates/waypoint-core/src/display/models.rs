//! Display implementations for domain models.
//!
//! All output is markdown so the CLI can hand it straight to the terminal
//! renderer.

use std::fmt;

use serde::Serialize;

use super::datetime::LocalDateTime;
use crate::{
    drafts::Draft,
    models::{FlowStatus, StepLine, StepStatus, StepView},
};

impl fmt::Display for FlowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StepLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}. {}", self.status.icon(), self.id, self.title)?;
        if !self.required {
            write!(f, " *(optional)*")?;
        }
        if !self.navigable {
            write!(f, " *(no navigation)*")?;
        }
        Ok(())
    }
}

impl fmt::Display for StepView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (done, total) = self.progress();
        writeln!(f, "# {}: step {}. {}", self.flow, self.current_step_id, self.title)?;
        writeln!(f)?;
        if let Some(description) = &self.description {
            writeln!(f, "{description}")?;
            writeln!(f)?;
        }

        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Progress: {done}/{total} completed")?;
        writeln!(f, "- Frontier: step {}", self.frontier)?;
        let mut controls = Vec::new();
        if self.can_go_back {
            controls.push("back");
        }
        if self.can_go_forward {
            controls.push("next");
        }
        if self.is_terminal && self.status == FlowStatus::Active {
            controls.push("finish");
        }
        if controls.is_empty() {
            writeln!(f, "- Controls: none")?;
        } else {
            writeln!(f, "- Controls: {}", controls.join(", "))?;
        }
        if !self.missing_required.is_empty() {
            let ids: Vec<String> = self.missing_required.iter().map(ToString::to_string).collect();
            writeln!(f, "- Missing required: {}", ids.join(", "))?;
        }

        writeln!(f, "\n## Steps")?;
        writeln!(f)?;
        for line in &self.steps {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl<R: Serialize> fmt::Display for Draft<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Draft: {}", self.flow)?;
        writeln!(f)?;
        writeln!(f, "- Saved: {}", LocalDateTime(&self.saved_at))?;
        writeln!(f, "- Schema version: {}", self.schema_version)?;
        writeln!(f)?;
        let json = serde_json::to_string_pretty(&self.data).map_err(|_| fmt::Error)?;
        writeln!(f, "```json\n{json}\n```")
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        flows::{hotel, HotelPatch},
        record::Fields,
        Draft, WizardBuilder,
    };

    #[test]
    fn test_view_lists_every_step() {
        let wizard = WizardBuilder::new(hotel::table().unwrap()).build();
        let output = wizard.view().to_string();

        assert!(output.contains("# hotel: step 1. What type of property are you listing?"));
        assert!(output.contains("- Progress: 0/13 completed"));
        assert!(output.contains("➤ 1. What type of property"));
        assert!(output.contains("○ 13. Review and publish"));
        assert!(output.contains("*(optional)*"));
    }

    #[test]
    fn test_view_marks_completed_steps() {
        let mut wizard = WizardBuilder::new(hotel::table().unwrap()).build();
        wizard.complete_step(
            hotel::PROPERTY_TYPE,
            HotelPatch {
                property_type: Some(hotel::PropertyType::Villa),
                ..HotelPatch::default()
            },
        );
        let output = wizard.view().to_string();
        assert!(output.contains("✓ 1. What type of property"));
        assert!(output.contains("➤ 2. Where is your villa located?"));
        assert!(output.contains("- Controls: back, next"));
    }

    #[test]
    fn test_draft_display_embeds_json() {
        let draft = Draft::new("package", Fields::new().with("name", "Summer"));
        let output = draft.to_string();
        assert!(output.contains("# Draft: package"));
        assert!(output.contains("\"name\": \"Summer\""));
    }
}
