//! Command handlers for the `wp` binary.
//!
//! Each handler resolves its flow, drives the core crate and hands markdown
//! to the [`TerminalRenderer`]. The `run` command is generic over the flow's
//! record type so every flow shares one replay loop.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::schema_for;
use waypoint_core::{
    display::{EventReport, FlowList, Notice, StepTableListing},
    flows::{
        hotel, onboarding, package, HostPatch, HostProfile, HotelListing, HotelPatch,
        PackageListing, PackagePatch,
    },
    Draft, DraftStore, Event, FlowKind, Operation, Record, RecordingGateway, StepTable,
    WizardBuilder,
};

use crate::{
    args::{DraftCommands, RunArgs},
    renderer::TerminalRenderer,
};

pub struct Cli {
    store: DraftStore,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(store: DraftStore, renderer: TerminalRenderer) -> Self {
        Self { store, renderer }
    }

    pub fn list_flows(&self) -> Result<()> {
        let flows = FlowKind::ALL
            .into_iter()
            .map(|kind| Ok((kind, step_count(kind)?)))
            .collect::<Result<Vec<_>>>()?;
        self.renderer.render(&FlowList(flows).to_string())
    }

    pub fn show_steps(&self, flow: FlowKind) -> Result<()> {
        let output = match flow {
            FlowKind::Hotel => listing(&hotel::table()?),
            FlowKind::Package => listing(&package::table()?),
            FlowKind::Onboarding => listing(&onboarding::table()?),
        };
        self.renderer.render(&output)
    }

    pub fn run(&self, args: &RunArgs) -> Result<()> {
        match args.flow {
            FlowKind::Hotel => self.run_flow(hotel::table()?, args),
            FlowKind::Package => self.run_flow(package::table()?, args),
            FlowKind::Onboarding => self.run_flow(onboarding::table()?, args),
        }
    }

    pub fn print_schema(&self, flow: FlowKind) -> Result<()> {
        let schema = match flow {
            FlowKind::Hotel => schema_for!(HotelPatch),
            FlowKind::Package => schema_for!(PackagePatch),
            FlowKind::Onboarding => schema_for!(HostPatch),
        };
        let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
        println!("{json}");
        Ok(())
    }

    pub fn handle_draft_command(&self, command: DraftCommands) -> Result<()> {
        match command {
            DraftCommands::Show { flow } => match flow {
                FlowKind::Hotel => self.show_draft::<HotelListing>(flow),
                FlowKind::Package => self.show_draft::<PackageListing>(flow),
                FlowKind::Onboarding => self.show_draft::<HostProfile>(flow),
            },
            DraftCommands::Discard { flow } => self.discard_draft(flow),
        }
    }

    fn show_draft<R: Record>(&self, flow: FlowKind) -> Result<()> {
        let draft = self
            .store
            .load::<R>(flow.as_str())
            .with_context(|| format!("Failed to load draft for {flow}"))?;
        match draft {
            Some(draft) => self.renderer.render(&draft.to_string()),
            None => self.renderer.render(&format!("No draft saved for {flow}.\n")),
        }
    }

    fn discard_draft(&self, flow: FlowKind) -> Result<()> {
        let removed = self
            .store
            .discard(flow.as_str())
            .with_context(|| format!("Failed to discard draft for {flow}"))?;
        let notice = if removed {
            Notice::success(format!("draft for {flow} discarded"))
        } else {
            Notice::failure(format!("no draft saved for {flow}"))
        };
        self.renderer.render(&notice.to_string())
    }

    fn run_flow<R: Record>(&self, table: StepTable<R>, args: &RunArgs) -> Result<()> {
        let flow = table.name().to_string();
        let script = load_script::<R>(&args.script)?;
        info!("replaying {} operations against {flow}", script.len());

        let mut builder = WizardBuilder::new(table);
        if args.resume {
            if let Some(draft) = self
                .store
                .load::<R>(&flow)
                .with_context(|| format!("Failed to load draft for {flow}"))?
            {
                debug!("resuming {flow} from draft saved at {}", draft.saved_at);
                builder = builder.resume(draft)?;
            }
        }
        let mut wizard = builder.build();
        let mut gateway = RecordingGateway::new();

        let mut report = format!("# Run: {flow}\n\n");
        for (index, op) in script.into_iter().enumerate() {
            let event = wizard.apply_with(op, &mut gateway);
            report.push_str(&EventReport::new(index + 1, &event).to_string());
            if let (Event::ExitedEarly(record), true) = (&event, args.save_draft) {
                match self.store.save(&Draft::new(flow.as_str(), record.clone())) {
                    Ok(path) => report.push_str(
                        &Notice::success(format!("draft saved to {}", path.display())).to_string(),
                    ),
                    Err(e) => {
                        report.push_str(&Notice::failure("could not save draft").to_string());
                        self.renderer.render(&report)?;
                        return Err(e).with_context(|| format!("Failed to save draft for {flow}"));
                    }
                }
            }
        }
        report.push('\n');
        report.push_str(&wizard.view().to_string());
        self.renderer.render(&report)
    }
}

fn step_count(kind: FlowKind) -> Result<usize> {
    Ok(match kind {
        FlowKind::Hotel => hotel::table()?.len(),
        FlowKind::Package => package::table()?.len(),
        FlowKind::Onboarding => onboarding::table()?.len(),
    })
}

fn listing<R: Record>(table: &StepTable<R>) -> String {
    StepTableListing::new(table, &R::default()).to_string()
}

fn load_script<R: Record>(path: &Path) -> Result<Vec<Operation<R::Patch>>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid operation script {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;
    use waypoint_core::flows::HotelListing;

    use super::*;

    #[test]
    fn test_load_script_parses_operations() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"op":"update","data":{{"name":"Seaside"}}}},{{"op":"go_to","step":2}},{{"op":"save_and_exit"}}]"#
        )
        .unwrap();

        let ops = load_script::<HotelListing>(file.path()).unwrap();
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[1], Operation::GoTo { step: 2 });
        assert_eq!(ops[2], Operation::SaveAndExit);
    }

    #[test]
    fn test_load_script_reports_bad_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"op":"jump"}}]"#).unwrap();

        let err = load_script::<HotelListing>(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid operation script"));
    }

    #[test]
    fn test_step_counts() {
        assert_eq!(step_count(FlowKind::Hotel).unwrap(), 13);
        assert_eq!(step_count(FlowKind::Package).unwrap(), 8);
        assert_eq!(step_count(FlowKind::Onboarding).unwrap(), 9);
    }
}
