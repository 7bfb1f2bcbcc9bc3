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

//! Type system model and root sinks for directive resolution
//!
//! [`TypeSystem`] is the facade directive resolution resolves names through,
//! [`RootSink`] is where it sends the roots it finds. [`Catalog`] and
//! [`RootSet`] are the in-memory implementations of each.

pub mod assembly_name;
pub mod catalog;
pub mod error;
pub mod handle;
pub mod metadata;
pub mod root_set;
pub mod rooting;
pub mod type_name;
pub mod type_system;

pub use assembly_name::AssemblyName;
pub use catalog::{Catalog, CatalogDocument, CatalogError, CatalogResult};
pub use error::{TypeSystemError, TypeSystemResult};
pub use handle::{MethodHandle, ModuleHandle, TypeHandle};
pub use metadata::{ArgumentType, ArgumentValue, CustomAttribute, TypedArgument};
pub use root_set::{RootSet, SkippedRoot};
pub use rooting::{RootRecord, RootSink, RootTarget, RootingError, RootingResult};
pub use type_name::TypeName;
pub use type_system::{MethodInfo, TypeInfo, TypeSystem};
