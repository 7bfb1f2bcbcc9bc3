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

//! The type system facade consumed by directive resolution

use crate::assembly_name::AssemblyName;
use crate::error::TypeSystemResult;
use crate::handle::{MethodHandle, ModuleHandle, TypeHandle};
use serde::Serialize;

/// Descriptive facts about a resolved type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    /// Display name, e.g. ``System.Collections.Generic.List`1<System.Int32>``
    pub name: String,
    pub module: ModuleHandle,
    /// Generic parameter count of the underlying definition
    pub generic_arity: usize,
    pub is_abstract: bool,
    /// True for generic definitions and anything built over one
    pub is_open_generic: bool,
}

/// Descriptive facts about a resolved method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodInfo {
    /// Display name, e.g. `App.A.Widget::Make<System.Int32>`
    pub name: String,
    pub owner: TypeHandle,
    /// Generic parameters still to be bound (zero once instantiated)
    pub generic_arity: usize,
    pub is_abstract: bool,
    pub is_open_generic: bool,
}

/// Name resolution and generic instantiation over some program model.
///
/// Handles returned by one implementation are only valid with that same
/// implementation. `instantiate_method` is the only operation that may grow
/// the model, so implementations that intern instantiations use interior
/// mutability.
pub trait TypeSystem {
    /// Resolve an assembly by name. Binding uses the simple name only.
    fn resolve_assembly(&self, name: &AssemblyName) -> TypeSystemResult<ModuleHandle>;

    /// Every type defined in `module`, in declaration order
    fn all_types(&self, module: ModuleHandle) -> TypeSystemResult<Vec<TypeHandle>>;

    /// Resolve a custom-attribute style type name in the context of `module`
    fn resolve_type(&self, module: ModuleHandle, name: &str) -> TypeSystemResult<TypeHandle>;

    /// Resolve a method of `owner` by name alone.
    ///
    /// When several overloads share the name, which one is returned is up to
    /// the implementation.
    fn resolve_method(&self, owner: TypeHandle, name: &str) -> TypeSystemResult<MethodHandle>;

    /// Number of generic parameters the method still declares
    fn method_generic_arity(&self, method: MethodHandle) -> TypeSystemResult<usize>;

    /// Bind the generic parameters of `method` to `arguments`, in order
    fn instantiate_method(&self, method: MethodHandle, arguments: &[TypeHandle]) -> TypeSystemResult<MethodHandle>;

    /// Simple name of a resolved module
    fn module_name(&self, module: ModuleHandle) -> TypeSystemResult<String>;

    fn type_info(&self, ty: TypeHandle) -> TypeSystemResult<TypeInfo>;

    fn method_info(&self, method: MethodHandle) -> TypeSystemResult<MethodInfo>;
}
