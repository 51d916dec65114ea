use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use routeplanner_cli::commands::inspect::handle_inspect_command;
use routeplanner_cli::commands::route::{handle_route_command, RouteCommandArgs};
use routeplanner_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Road-network route planning utilities")]
struct Cli {
    /// Map document to load. Falls back to ROUTEPLANNER_MAP, then the
    /// platform data directory.
    #[arg(long, global = true)]
    map: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the shortest route between two points given as map percentages.
    Route {
        /// Start point, x and y as percentages (0-100) of the map extent.
        #[arg(long, num_args = 2, value_names = ["X", "Y"], required = true, allow_negative_numbers = true)]
        start: Vec<f64>,
        /// End point, x and y as percentages (0-100) of the map extent.
        #[arg(long, num_args = 2, value_names = ["X", "Y"], required = true, allow_negative_numbers = true)]
        end: Vec<f64>,
    },
    /// Summarise the nodes and roads of the loaded map.
    Inspect,
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Route { start, end } => {
            let args = RouteCommandArgs {
                start: point(&start),
                end: point(&end),
            };
            handle_route_command(cli.map.as_deref(), cli.format, &args)
        }
        Command::Inspect => {
            handle_inspect_command(cli.map.as_deref(), cli.format)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// clap guarantees exactly two values per point.
fn point(values: &[f64]) -> [f64; 2] {
    [values[0], values[1]]
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
