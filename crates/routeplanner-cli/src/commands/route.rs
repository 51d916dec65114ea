//! Route command handler for finding a path between two map points.

use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::info;

use routeplanner_lib::{RoutePlanner, SearchOutcome};

use crate::commands::load_model;
use crate::output::{render_route, OutputFormat};
use crate::terminal::ColorPalette;

/// Exit status reported when the two points are not connected.
pub const NO_PATH_EXIT_CODE: u8 = 2;

/// Arguments for the route command.
#[derive(Debug, Clone, Copy)]
pub struct RouteCommandArgs {
    /// Start point as `[x, y]` percentages of the map extent.
    pub start: [f64; 2],
    /// End point as `[x, y]` percentages of the map extent.
    pub end: [f64; 2],
}

/// Handle the route subcommand.
///
/// Succeeds with [`NO_PATH_EXIT_CODE`] when the search finds no route.
pub fn handle_route_command(
    map: Option<&Path>,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<ExitCode> {
    let model = load_model(map)?;

    let mut planner =
        RoutePlanner::new(&model, args.start, args.end).context("failed to resolve route endpoints")?;
    let outcome = planner.run().context("route search failed")?;
    info!(
        start = planner.start_node(),
        goal = planner.end_node(),
        expanded = planner.expanded_nodes(),
        ?outcome,
        "route search finished"
    );

    let route = planner.route();
    let palette = ColorPalette::detect();
    render_route(&mut io::stdout().lock(), route.as_ref(), format, palette)
        .context("failed to write route")?;

    Ok(match outcome {
        SearchOutcome::Found => ExitCode::SUCCESS,
        SearchOutcome::NoPath => ExitCode::from(NO_PATH_EXIT_CODE),
    })
}
