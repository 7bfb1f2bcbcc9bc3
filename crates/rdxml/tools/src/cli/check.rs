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

//! `rdxml check`: validate a directive document against a catalog

use crate::cli::resolve::{collect_roots, load_catalog};
use crate::config::RdxmlConfig;
use anyhow::Result;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Runtime directive document (RD.XML)
    pub document: PathBuf,

    /// Type catalog (JSON) to resolve names against
    #[arg(short, long)]
    pub catalog: PathBuf,
}

pub fn run(args: CheckArgs, config: RdxmlConfig, out: &mut impl Write) -> Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    let report = collect_roots(&args.document, &catalog, &config)?;

    writeln!(out, "{}", report.counts().summary())?;
    Ok(())
}
