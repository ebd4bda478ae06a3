//! # CLI Module
//!
//! Command-line access to route tables, for checking a routing setup
//! without writing code.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! List every route of a table in registration order:
//!
//! ```bash
//! waypoint routes --table routes.yaml
//! ```
//!
//! ### `match`
//!
//! Resolve a path and print the match as JSON. Exits non-zero when nothing
//! matches:
//!
//! ```bash
//! waypoint match --table routes.yaml --method PUT posts/12
//! ```
//!
//! ### `generate`
//!
//! Build the path for a named route from `key=value` pairs:
//!
//! ```bash
//! waypoint generate --table routes.yaml post id=12 tab=comments
//! waypoint generate --table routes.yaml --long-urls post id=12
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use waypoint::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse())?;
//! ```

mod commands;


pub use commands::{execute, run_cli, Cli, Commands, MatchReport};
