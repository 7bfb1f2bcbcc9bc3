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

//! `rdxml resolve`: print the roots a directive document produces

use crate::config::{OutputFormat, RdxmlConfig};
use crate::report::RootReport;
use anyhow::{Context, Result};
use clap::Args;
use rdxml_compiler::{CompilationRootProvider, RdXmlRootProvider};
use rdxml_core::{Catalog, RootSet};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Runtime directive document (RD.XML)
    pub document: PathBuf,

    /// Type catalog (JSON) to resolve names against
    #[arg(short, long)]
    pub catalog: PathBuf,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Provenance label attached to every root
    #[arg(long)]
    pub provenance: Option<String>,
}

pub(crate) fn load_catalog(path: &Path) -> Result<Catalog> {
    Catalog::load(path).with_context(|| format!("failed to load catalog {}", path.display()))
}

/// Resolve the document and build a report of the roots it produced
pub fn collect_roots(document: &Path, catalog: &Catalog, config: &RdxmlConfig) -> Result<RootReport> {
    let provider = RdXmlRootProvider::from_file(document)?.with_config(config.resolver.clone())?;
    let mut roots = RootSet::new(catalog);

    provider
        .add_compilation_roots(catalog, &mut roots)
        .with_context(|| format!("failed to resolve {}", document.display()))?;

    info!(document = %document.display(), roots = roots.len(), skipped = roots.skipped().len(), "resolved directives");
    RootReport::from_roots(catalog, &roots)
}

pub fn run(args: ResolveArgs, config: RdxmlConfig, out: &mut impl Write) -> Result<()> {
    let config = config.with_overrides(args.provenance, args.format)?;
    let catalog = load_catalog(&args.catalog)?;
    let report = collect_roots(&args.document, &catalog, &config)?;

    write!(out, "{}", report.render(config.output.format)?)?;
    Ok(())
}
