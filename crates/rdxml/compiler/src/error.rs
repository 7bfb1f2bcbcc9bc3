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

//! Directive resolution errors

use rdxml_common::{DocumentError, Located, Position};
use rdxml_core::{RootingError, TypeSystemError};
use thiserror::Error;

/// Result type for directive resolution
pub type DirectiveResult<T> = Result<T, DirectiveError>;

/// Errors that abort directive resolution
#[derive(Error, Debug)]
pub enum DirectiveError {
    // Document structure
    #[error("directive document must have exactly one top-level directive, found {found}")]
    RootElementCount { found: usize },

    #[error("expected 'Library' or 'Application', found '{name}'{}", located(.position))]
    UnexpectedRootElement { name: String, position: Option<Position> },

    #[error("'{element}' must not carry attributes{}", located(.position))]
    RootAttributes { element: String, position: Option<Position> },

    #[error("'{element}' directive is missing required attribute '{attribute}'{}", located(.position))]
    MissingAttribute {
        element: String,
        attribute: &'static str,
        position: Option<Position>,
    },

    // Unsupported directives
    #[error("unsupported directive '{name}' inside '{parent}'{}", located(.position))]
    UnsupportedElement { parent: String, name: String, position: Option<Position> },

    #[error("unsupported value '{value}' for '{attribute}' on '{element}'{}", located(.position))]
    UnsupportedAttributeValue {
        element: String,
        attribute: &'static str,
        value: String,
        position: Option<Position>,
    },

    // Resolution
    #[error("method '{method}' has {expected} generic parameter(s) but {found} generic argument(s) were given{}", located(.position))]
    ArityMismatch {
        method: String,
        expected: usize,
        found: usize,
        position: Option<Position>,
    },

    #[error("method '{method}' could not be instantiated: {source}{}", located(.position))]
    Instantiation {
        method: String,
        source: TypeSystemError,
        position: Option<Position>,
    },

    #[error(transparent)]
    TypeSystem(#[from] TypeSystemError),

    #[error("required root could not be added: {0}")]
    Rooting(#[from] RootingError),

    // Setup
    #[error("invalid resolver configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

fn located(position: &Option<Position>) -> Located {
    Located(*position)
}

impl DirectiveError {
    pub(crate) fn missing_attribute(element: &str, attribute: &'static str, position: Option<Position>) -> Self {
        Self::MissingAttribute {
            element: element.to_string(),
            attribute,
            position,
        }
    }

    pub(crate) fn unsupported_element(parent: &str, name: &str, position: Option<Position>) -> Self {
        Self::UnsupportedElement {
            parent: parent.to_string(),
            name: name.to_string(),
            position,
        }
    }

    /// Category of the failure
    pub fn kind(&self) -> DirectiveErrorKind {
        match self {
            Self::RootElementCount { .. } | Self::UnexpectedRootElement { .. } | Self::RootAttributes { .. } | Self::MissingAttribute { .. } | Self::Document(_) => {
                DirectiveErrorKind::MalformedDocument
            }
            Self::UnsupportedElement { .. } | Self::UnsupportedAttributeValue { .. } => DirectiveErrorKind::UnsupportedDirective,
            Self::ArityMismatch { .. } | Self::Instantiation { .. } => DirectiveErrorKind::ArityMismatch,
            Self::TypeSystem(_) => DirectiveErrorKind::UnresolvedReference,
            Self::Rooting(_) => DirectiveErrorKind::RootingFailure,
            Self::InvalidConfiguration(_) => DirectiveErrorKind::Configuration,
        }
    }

    /// Source position of the offending directive, when known
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::UnexpectedRootElement { position, .. }
            | Self::RootAttributes { position, .. }
            | Self::MissingAttribute { position, .. }
            | Self::UnsupportedElement { position, .. }
            | Self::UnsupportedAttributeValue { position, .. }
            | Self::ArityMismatch { position, .. }
            | Self::Instantiation { position, .. } => *position,
            Self::Document(error) => error.position(),
            _ => None,
        }
    }
}

/// Error categories for directive resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveErrorKind {
    MalformedDocument,
    UnsupportedDirective,
    UnresolvedReference,
    ArityMismatch,
    RootingFailure,
    Configuration,
}

impl DirectiveErrorKind {
    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedDocument => "malformed_document",
            Self::UnsupportedDirective => "unsupported_directive",
            Self::UnresolvedReference => "unresolved_reference",
            Self::ArityMismatch => "arity_mismatch",
            Self::RootingFailure => "rooting_failure",
            Self::Configuration => "configuration",
        }
    }
}
