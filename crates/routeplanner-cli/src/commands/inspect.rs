//! Inspect command handler summarising a map.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use crate::commands::load_model;
use crate::output::{render_summary, MapSummary, OutputFormat};

/// Handle the inspect subcommand.
pub fn handle_inspect_command(map: Option<&Path>, format: OutputFormat) -> Result<()> {
    let model = load_model(map)?;
    let summary = MapSummary::from_model(&model);
    render_summary(&mut io::stdout().lock(), &summary, format).context("failed to write summary")
}
