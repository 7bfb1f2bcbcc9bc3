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

//! Configuration for directive resolution

use crate::error::{DirectiveError, DirectiveResult};
use serde::{Deserialize, Serialize};

/// Provenance label attached to every root a directive produces
pub const DEFAULT_PROVENANCE: &str = "directive root";

/// Configuration for directive resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Reason string passed to every root sink call
    pub provenance: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            provenance: DEFAULT_PROVENANCE.to_string(),
        }
    }
}

impl ResolverConfig {
    /// Replace the provenance label
    pub fn with_provenance(mut self, provenance: impl Into<String>) -> Self {
        self.provenance = provenance.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> DirectiveResult<()> {
        if self.provenance.trim().is_empty() {
            return Err(DirectiveError::InvalidConfiguration("provenance label must not be empty".to_string()));
        }

        Ok(())
    }
}
