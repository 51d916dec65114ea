//! Output formatting for routes and map summaries.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use routeplanner_lib::{Route, RouteModel};

use crate::terminal::ColorPalette;

/// Output formats supported by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// A single JSON document on stdout.
    Json,
}

/// Summary of a loaded map.
#[derive(Debug, Clone, Serialize)]
pub struct MapSummary {
    pub nodes: usize,
    pub roads: usize,
    pub footways: usize,
    pub metric_scale: f64,
}

impl MapSummary {
    pub fn from_model(model: &RouteModel) -> Self {
        Self {
            nodes: model.len(),
            roads: model.roads().len(),
            footways: model
                .roads()
                .iter()
                .filter(|road| road.kind.is_footway())
                .count(),
            metric_scale: model.metric_scale(),
        }
    }
}

#[derive(Serialize)]
struct RouteDocument<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<&'a Route>,
}

/// Write a route, or the absence of one, in the requested format.
pub fn render_route<W: Write>(
    out: &mut W,
    route: Option<&Route>,
    format: OutputFormat,
    palette: ColorPalette,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let document = RouteDocument {
                status: if route.is_some() { "found" } else { "no_path" },
                route,
            };
            serde_json::to_writer_pretty(&mut *out, &document)?;
            writeln!(out)
        }
        OutputFormat::Text => match route {
            Some(route) => render_route_text(out, route, palette),
            None => writeln!(out, "No path found between the requested points."),
        },
    }
}

fn render_route_text<W: Write>(out: &mut W, route: &Route, p: ColorPalette) -> io::Result<()> {
    writeln!(
        out,
        "Route from node {} to node {} ({} hops):",
        route.start,
        route.goal,
        route.hop_count()
    )?;

    let last = route.steps.len().saturating_sub(1);
    for (index, step) in route.steps.iter().enumerate() {
        let tag = if index == 0 {
            format!("{}STRT{}", p.tag_start, p.reset)
        } else if index == last {
            format!("{}GOAL{}", p.tag_goal, p.reset)
        } else {
            format!("{}  ->{}", p.gray, p.reset)
        };
        writeln!(
            out,
            "{tag} node {:>6}  ({:.4}, {:.4})",
            step.node, step.x, step.y
        )?;
    }

    writeln!(
        out,
        "Distance: {}{:.1} m{}",
        p.green, route.distance, p.reset
    )
}

/// Write a map summary in the requested format.
pub fn render_summary<W: Write>(
    out: &mut W,
    summary: &MapSummary,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, summary)?;
            writeln!(out)
        }
        OutputFormat::Text => {
            writeln!(out, "Nodes:        {}", summary.nodes)?;
            writeln!(
                out,
                "Roads:        {} ({} footways)",
                summary.roads, summary.footways
            )?;
            writeln!(out, "Metric scale: {:.3} m/unit", summary.metric_scale)
        }
    }
}
