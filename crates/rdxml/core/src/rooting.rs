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

//! Root sinks: where resolved roots are sent

use crate::handle::{MethodHandle, ModuleHandle, TypeHandle};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type for strict rooting requests
pub type RootingResult<T> = Result<T, RootingError>;

/// What a root request refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "handle", rename_all = "snake_case")]
pub enum RootTarget {
    ModuleMetadata(ModuleHandle),
    Type(TypeHandle),
    Method(MethodHandle),
}

impl fmt::Display for RootTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModuleMetadata(module) => write!(f, "metadata of {}", module),
            Self::Type(ty) => write!(f, "{}", ty),
            Self::Method(method) => write!(f, "{}", method),
        }
    }
}

/// One accepted root and the reason it was requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootRecord {
    pub target: RootTarget,
    pub reason: String,
}

/// Why a sink refused to root an element
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RootingError {
    #[error("cannot root open generic '{name}'")]
    OpenGeneric { name: String },

    #[error("cannot root abstract method '{name}'")]
    AbstractMethod { name: String },

    #[error("cannot root unknown target {target}")]
    UnknownTarget { target: RootTarget },
}

/// Accepts root requests produced by directive resolution.
///
/// The `try_` operations are best-effort: a refusal is reported as `false`
/// and is never an error. The plain operations are strict and report a
/// refusal as a [`RootingError`].
pub trait RootSink {
    fn root_module_metadata(&mut self, module: ModuleHandle, reason: &str);

    fn try_root_type(&mut self, ty: TypeHandle, reason: &str) -> bool;

    fn root_type(&mut self, ty: TypeHandle, reason: &str) -> RootingResult<()>;

    fn try_root_method(&mut self, method: MethodHandle, reason: &str) -> bool;

    fn root_method(&mut self, method: MethodHandle, reason: &str) -> RootingResult<()>;
}
