//! Wrapper types for displaying step tables and flow listings.

use std::fmt;

use crate::{flows::FlowKind, models::StepTable};

/// A step table rendered against a record, so derived titles resolve.
pub struct StepTableListing<'a, R> {
    pub table: &'a StepTable<R>,
    pub record: &'a R,
}

impl<'a, R> StepTableListing<'a, R> {
    pub fn new(table: &'a StepTable<R>, record: &'a R) -> Self {
        Self { table, record }
    }
}

impl<R> fmt::Display for StepTableListing<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} ({} steps)", self.table.name(), self.table.len())?;
        writeln!(f)?;
        for step in self.table.steps() {
            write!(f, "{}. {}", step.id, step.title.resolve(self.record))?;
            let mut tags = Vec::new();
            if !step.required {
                tags.push("optional");
            }
            if !step.is_navigable() {
                tags.push("no navigation");
            }
            if self.table.is_terminal(step.id) {
                tags.push("terminal");
            }
            if !tags.is_empty() {
                write!(f, " *({})*", tags.join(", "))?;
            }
            writeln!(f)?;
        }

        if !self.table.branches().is_empty() {
            writeln!(f, "\n## Loops")?;
            writeln!(f)?;
            for edge in self.table.branches() {
                writeln!(f, "- {} → {} when `{}`", edge.from, edge.to, edge.condition)?;
            }
        }
        Ok(())
    }
}

/// Listing of the shipped flows with their step counts.
pub struct FlowList(pub Vec<(FlowKind, usize)>);

impl fmt::Display for FlowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No flows available.");
        }
        writeln!(f, "# Flows")?;
        writeln!(f)?;
        for (kind, steps) in &self.0 {
            writeln!(f, "- **{kind}** ({steps} steps): {}", kind.summary())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::{hotel, onboarding, HostProfile, HotelListing};

    #[test]
    fn test_hotel_listing_shows_loop() {
        let table = hotel::table().unwrap();
        let record = HotelListing::default();
        let output = StepTableListing::new(&table, &record).to_string();
        assert!(output.contains("# hotel (13 steps)"));
        assert!(output.contains("13. Review and publish *(terminal)*"));
        assert!(output.contains("- 9 → 5 when `addAnother`"));
    }

    #[test]
    fn test_onboarding_listing_tags_hidden_chrome() {
        let table = onboarding::table().unwrap();
        let record = HostProfile::default();
        let output = StepTableListing::new(&table, &record).to_string();
        assert!(output.contains("0. Become a host *(optional, no navigation)*"));
        assert!(!output.contains("## Loops"));
    }

    #[test]
    fn test_flow_list() {
        let output = FlowList(vec![(FlowKind::Package, 8)]).to_string();
        assert!(output.contains("- **package** (8 steps)"));
        assert_eq!(FlowList(Vec::new()).to_string(), "No flows available.\n");
    }
}
