// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! rdxml CLI Tool
//!
//! Resolves runtime directive documents against a type catalog.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rdxml_tools::RdxmlConfig;
use rdxml_tools::cli::check::CheckArgs;
use rdxml_tools::cli::inspect::InspectArgs;
use rdxml_tools::cli::resolve::ResolveArgs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rdxml")]
#[command(about = "rdxml - Runtime directive resolution")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML, overrides $RDXML_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log resolution progress
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the roots a directive document produces
    Resolve(ResolveArgs),
    /// Check that a directive document resolves cleanly
    Check(CheckArgs),
    /// List the assemblies, types and methods of a catalog
    Inspect(InspectArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Resolve(args) => {
            let config = RdxmlConfig::resolve_config(cli.config)?;
            rdxml_tools::cli::resolve::run(args, config, &mut stdout)?;
        }
        Commands::Check(args) => {
            let config = RdxmlConfig::resolve_config(cli.config)?;
            rdxml_tools::cli::check::run(args, config, &mut stdout)?;
        }
        Commands::Inspect(args) => {
            rdxml_tools::cli::inspect::run(args, &mut stdout)?;
        }
    }

    Ok(())
}
