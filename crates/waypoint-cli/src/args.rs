use std::path::PathBuf;

use clap::{Parser, Subcommand};
use waypoint_core::FlowKind;

/// Command-line driver for waypoint guided flows
///
/// Waypoint orchestrates multi-step forms: which step is shown, which steps
/// are done, what data has been collected and where the user may go next.
/// This tool lists the shipped flows, shows their step tables and replays
/// scripted operations against them.
#[derive(Parser)]
#[command(version, about, name = "wp")]
pub struct Args {
    /// Directory for saved drafts. Defaults to
    /// $XDG_DATA_HOME/waypoint/drafts
    #[arg(long, global = true)]
    pub drafts_dir: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the waypoint CLI
#[derive(Subcommand)]
pub enum Commands {
    /// List the available flows
    #[command(alias = "ls")]
    Flows,
    /// Show the step table of a flow
    #[command(alias = "s")]
    Steps {
        #[arg(help = "Flow name (hotel, package, onboarding)")]
        flow: FlowKind,
    },
    /// Replay a script of operations against a flow
    #[command(alias = "r")]
    Run(RunArgs),
    /// Print the JSON Schema of a flow's step data
    Schema {
        #[arg(help = "Flow name (hotel, package, onboarding)")]
        flow: FlowKind,
    },
    /// Inspect or remove saved drafts
    #[command(alias = "d")]
    Draft {
        #[command(subcommand)]
        command: DraftCommands,
    },
}

#[derive(Subcommand)]
pub enum DraftCommands {
    /// Show the saved draft of a flow
    Show {
        #[arg(help = "Flow name (hotel, package, onboarding)")]
        flow: FlowKind,
    },
    /// Delete the saved draft of a flow
    #[command(aliases = ["rm"])]
    Discard {
        #[arg(help = "Flow name (hotel, package, onboarding)")]
        flow: FlowKind,
    },
}

/// Replay a script of operations
///
/// The script is a JSON array of operations such as
/// `{"op": "complete_step", "step": 1, "data": {...}}`. Each resulting event
/// is printed, followed by the view of the step the flow ends on.
#[derive(clap::Args)]
pub struct RunArgs {
    #[arg(help = "Flow name (hotel, package, onboarding)")]
    pub flow: FlowKind,
    #[arg(short, long, help = "Path to the JSON operation script")]
    pub script: PathBuf,
    #[arg(long, help = "Seed the record from the saved draft of this flow")]
    pub resume: bool,
    #[arg(long, help = "Save the partial record as a draft when the flow is exited early")]
    pub save_draft: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_run_args_parse() {
        let args = Args::parse_from(["wp", "run", "hotel", "--script", "ops.json", "--save-draft"]);
        match args.command {
            Some(Commands::Run(run)) => {
                assert_eq!(run.flow, FlowKind::Hotel);
                assert_eq!(run.script, PathBuf::from("ops.json"));
                assert!(run.save_draft);
                assert!(!run.resume);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_draft_discard_alias() {
        let args = Args::parse_from(["wp", "draft", "rm", "package"]);
        assert!(matches!(
            args.command,
            Some(Commands::Draft {
                command: DraftCommands::Discard {
                    flow: FlowKind::Package
                }
            })
        ));
    }

    #[test]
    fn test_host_alias_parses_onboarding() {
        let args = Args::parse_from(["wp", "steps", "host"]);
        assert!(matches!(
            args.command,
            Some(Commands::Steps {
                flow: FlowKind::Onboarding
            })
        ));
    }
}
