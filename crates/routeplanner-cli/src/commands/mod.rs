// Command handlers for the CLI subcommands.
//
// main.rs parses arguments and dispatches to these handlers; each handler
// loads what it needs through routeplanner-lib and writes to stdout.

pub mod inspect;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use routeplanner_lib::{load_map, resolve_map_path, RouteModel};

/// Resolve and load the map used by every command.
pub(crate) fn load_model(explicit: Option<&Path>) -> Result<RouteModel> {
    let path = resolve_map_path(explicit).context("failed to resolve the map location")?;
    load_map(&path).with_context(|| format!("failed to load map from {}", path.display()))
}
