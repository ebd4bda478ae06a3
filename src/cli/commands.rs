use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::method::MethodMask;
use crate::router::Router;
use crate::table::RouteTable;

/// Command-line interface for waypoint route tables
#[derive(Parser)]
#[command(name = "waypoint")]
#[command(about = "Inspect, match and generate routes from a route table", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every route in registration order
    Routes {
        /// Route table file (YAML or JSON)
        #[arg(short, long)]
        table: PathBuf,
    },
    /// Resolve a path against the table and print the match as JSON
    Match {
        /// Route table file (YAML or JSON)
        #[arg(short, long)]
        table: PathBuf,

        /// Request method; HEAD is treated as GET
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Path to resolve, exactly as it would arrive
        path: String,
    },
    /// Build the path for a named route
    Generate {
        /// Route table file (YAML or JSON)
        #[arg(short, long)]
        table: PathBuf,

        /// Route name
        name: String,

        /// Parameters as key=value pairs
        params: Vec<String>,

        /// Emit `?path=...` URLs regardless of the table's short_urls setting
        #[arg(long, default_value_t = false)]
        long_urls: bool,
    },
}

/// JSON shape printed by `waypoint match`.
#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub route: String,
    pub method: String,
    pub template: String,
    pub parameters: BTreeMap<String, String>,
}

/// Execute the CLI command, writing results to stdout.
///
/// # Errors
///
/// Returns an error if the table cannot be loaded or registered, if no
/// route matches, or if generation fails.
pub fn run_cli(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &mut out)
}

/// Execute `cli`, writing command output to `out`.
pub fn execute(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Commands::Routes { table } => {
            let router = load_router(table)?;
            router.dump_routes();
            for route in router.routes() {
                let method = route.method().unwrap_or(MethodMask::ALL);
                writeln!(out, "{:<28} {:<18} {}", route.name(), method, route.template())?;
            }
            Ok(())
        }
        Commands::Match {
            table,
            method,
            path,
        } => {
            let mask: MethodMask = method
                .parse()
                .with_context(|| format!("unsupported method '{method}'"))?;
            let router = load_router(table)?;
            let matcher = router.matcher()?;
            let Some(found) = matcher.match_path(path, Some(mask)) else {
                bail!("no route matches {mask} {path}");
            };
            let report = MatchReport {
                route: found.name().to_string(),
                method: found
                    .route()
                    .method()
                    .unwrap_or(MethodMask::ALL)
                    .to_string(),
                template: found.route().template().to_string(),
                parameters: found.into_parameters().into_iter().collect(),
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
            Ok(())
        }
        Commands::Generate {
            table,
            name,
            params,
            long_urls,
        } => {
            let pairs = params
                .iter()
                .map(|param| {
                    param
                        .split_once('=')
                        .ok_or_else(|| anyhow!("expected key=value, got '{param}'"))
                })
                .collect::<Result<Vec<_>>>()?;
            let router = load_router(table)?;
            let mut generator = router.generator();
            if *long_urls {
                generator = generator.with_short_urls(false);
            }
            let url = generator.generate(name, pairs)?;
            writeln!(out, "{url}")?;
            Ok(())
        }
    }
}

/// Load a table, letting `WAYPOINT_*` variables override its `config`.
fn load_router(table: &PathBuf) -> Result<Router> {
    let mut route_table = RouteTable::load(table)?;
    route_table.config = route_table.config.with_env_overrides();
    let router = route_table.into_router()?;
    debug!(table = %table.display(), routes_count = router.len(), "Loaded route table");
    Ok(router)
}
