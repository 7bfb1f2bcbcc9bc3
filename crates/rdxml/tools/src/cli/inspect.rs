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

//! `rdxml inspect`: list the contents of a type catalog

use crate::cli::resolve::load_catalog;
use anyhow::Result;
use clap::Args;
use rdxml_core::{Catalog, TypeSystem};
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Type catalog (JSON) to list
    #[arg(short, long)]
    pub catalog: PathBuf,
}

pub fn run(args: InspectArgs, out: &mut impl Write) -> Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    write_catalog(&catalog, out)
}

pub fn write_catalog(catalog: &Catalog, out: &mut impl Write) -> Result<()> {
    for module in catalog.modules() {
        match catalog.module_version(module)? {
            Some(version) => writeln!(out, "assembly {} {}", catalog.module_name(module)?, version)?,
            None => writeln!(out, "assembly {}", catalog.module_name(module)?)?,
        }

        for ty in catalog.all_types(module)? {
            let info = catalog.type_info(ty)?;
            let mut line = format!("  type {}", info.name);
            if info.generic_arity > 0 {
                line.push_str(&format!(" (generic parameters: {})", info.generic_arity));
            }
            if info.is_abstract {
                line.push_str(" abstract");
            }
            writeln!(out, "{line}")?;

            for attribute in catalog.custom_attributes(ty)? {
                writeln!(out, "    {attribute}")?;
            }

            for method in catalog.declared_methods(ty)? {
                let mut line = format!("    method {}", method.name);
                if method.generic_arity > 0 {
                    line.push_str(&format!("`{}", method.generic_arity));
                }
                if method.is_abstract {
                    line.push_str(" abstract");
                }
                writeln!(out, "{line}")?;
            }
        }
    }

    Ok(())
}
