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

//! Type system errors

use thiserror::Error;

/// Result type for type system operations
pub type TypeSystemResult<T> = Result<T, TypeSystemError>;

/// Failures reported by a type system while resolving or constructing elements
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeSystemError {
    #[error("assembly '{0}' could not be found")]
    AssemblyNotFound(String),

    #[error("invalid assembly name '{name}': {reason}")]
    InvalidAssemblyName { name: String, reason: String },

    #[error("type '{name}' could not be found in assembly '{assembly}'")]
    TypeNotFound { name: String, assembly: String },

    #[error("invalid type name '{name}': {reason}")]
    InvalidTypeName { name: String, reason: String },

    #[error("method '{name}' could not be found on type '{owner}'")]
    MethodNotFound { name: String, owner: String },

    #[error("cannot instantiate '{target}': {reason}")]
    InvalidInstantiation { target: String, reason: String },

    #[error("unknown {kind} handle {index}")]
    UnknownHandle { kind: &'static str, index: u32 },
}

impl TypeSystemError {
    pub fn invalid_assembly_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAssemblyName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_type_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTypeName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_instantiation(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInstantiation {
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error means a named element does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AssemblyNotFound(_) | Self::TypeNotFound { .. } | Self::MethodNotFound { .. })
    }
}
