//! Waypoint CLI Application
//!
//! Command-line driver for the waypoint flow engine: inspect the shipped
//! flows and replay scripted operations against them.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use waypoint_core::DraftStore;
use Commands::*;

fn main() -> Result<()> {
    env_logger::init();

    let Args {
        drafts_dir,
        no_color,
        command,
    } = Args::parse();

    let store = DraftStore::open(drafts_dir.as_deref()).context("Failed to open draft store")?;
    let cli = Cli::new(store, TerminalRenderer::new(!no_color));

    info!("Waypoint started");

    match command {
        Some(Flows) | None => cli.list_flows(),
        Some(Steps { flow }) => cli.show_steps(flow),
        Some(Run(args)) => cli.run(&args),
        Some(Schema { flow }) => cli.print_schema(flow),
        Some(Draft { command }) => cli.handle_draft_command(command),
    }
}
