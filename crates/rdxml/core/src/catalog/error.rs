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

//! Catalog construction errors

use std::path::PathBuf;
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while loading or validating a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("assembly '{0}' is declared more than once")]
    DuplicateAssembly(String),

    #[error("type '{name}' is declared more than once in assembly '{assembly}'")]
    DuplicateType { assembly: String, name: String },

    #[error("invalid definition '{name}' in assembly '{assembly}': {reason}")]
    InvalidDefinition { assembly: String, name: String, reason: String },

    #[error("core library '{0}' is not declared in the catalog")]
    UnknownCoreLibrary(String),
}

impl CatalogError {
    pub(crate) fn invalid(assembly: &str, name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            assembly: assembly.to_string(),
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
