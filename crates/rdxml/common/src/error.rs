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

//! Document loading errors

use crate::position::Position;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for document loading
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors raised while turning a file or string into an element tree
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("cannot read document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML at {position}: {message}")]
    Xml { position: Position, message: String },
}

impl DocumentError {
    /// Position of the failure in the source text, when known
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Io { .. } => None,
            Self::Xml { position, .. } => Some(*position),
        }
    }
}
