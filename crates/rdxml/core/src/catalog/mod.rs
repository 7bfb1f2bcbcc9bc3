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

//! In-memory type system described by a JSON catalog
//!
//! Type definitions get the first handles, in declaration order. Generic
//! instantiations, array types and method handles are interned on demand,
//! so the same construction always yields the same handle.

pub mod document;
pub mod error;

pub use document::{AssemblyEntry, CatalogDocument, MethodEntry, TypeEntry};
pub use error::{CatalogError, CatalogResult};

use crate::assembly_name::AssemblyName;
use crate::error::{TypeSystemError, TypeSystemResult};
use crate::handle::{MethodHandle, ModuleHandle, TypeHandle};
use crate::metadata::CustomAttribute;
use crate::type_name::{TypeName, generic_arity};
use crate::type_system::{MethodInfo, TypeInfo, TypeSystem};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, trace};

struct ModuleData {
    name: String,
    version: Option<String>,
    types: Vec<TypeHandle>,
    by_name: HashMap<String, TypeHandle>,
}

struct TypeDefinition {
    module: ModuleHandle,
    name: String,
    arity: usize,
    is_abstract: bool,
    attributes: Vec<CustomAttribute>,
    methods: Vec<MethodDefinition>,
}

struct MethodDefinition {
    name: String,
    arity: usize,
    is_abstract: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ConstructedType {
    Instantiated { definition: TypeHandle, arguments: Vec<TypeHandle> },
    Array { element: TypeHandle, rank: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum MethodData {
    Member { owner: TypeHandle, definition: TypeHandle, index: usize },
    Instantiated { method: MethodHandle, arguments: Vec<TypeHandle> },
}

#[derive(Default)]
struct Interned {
    types: Vec<ConstructedType>,
    type_index: HashMap<ConstructedType, TypeHandle>,
    methods: Vec<MethodData>,
    method_index: HashMap<MethodData, MethodHandle>,
}

enum TypeShape {
    Definition(TypeHandle),
    Constructed(ConstructedType),
}

/// Summary of a declared method, for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSummary {
    pub name: String,
    pub generic_arity: usize,
    pub is_abstract: bool,
}

/// A type system backed by a catalog of assemblies, types and methods
pub struct Catalog {
    modules: Vec<ModuleData>,
    definitions: Vec<TypeDefinition>,
    core_library: Option<ModuleHandle>,
    interned: RwLock<Interned>,
}

impl Catalog {
    /// Build a catalog, validating names and uniqueness
    pub fn from_document(document: CatalogDocument) -> CatalogResult<Self> {
        let mut catalog = Self {
            modules: Vec::new(),
            definitions: Vec::new(),
            core_library: None,
            interned: RwLock::new(Interned::default()),
        };

        for assembly in document.assemblies {
            let name = assembly.name.trim().to_string();
            match AssemblyName::parse(&name) {
                Ok(parsed) if parsed.name == name => {}
                Ok(_) => return Err(CatalogError::invalid(&name, &name, "assembly names carry no properties in a catalog")),
                Err(error) => return Err(CatalogError::invalid(&name, &name, error.to_string())),
            }
            if catalog.find_module(&name).is_some() {
                return Err(CatalogError::DuplicateAssembly(name));
            }

            let module = ModuleHandle::new(catalog.modules.len() as u32);
            let mut data = ModuleData {
                name,
                version: assembly.version,
                types: Vec::new(),
                by_name: HashMap::new(),
            };
            for entry in assembly.types {
                catalog.define_type(module, &mut data, None, entry)?;
            }
            catalog.modules.push(data);
        }

        if let Some(core) = document.core_library {
            let module = catalog.find_module(&core).ok_or(CatalogError::UnknownCoreLibrary(core))?;
            catalog.core_library = Some(module);
        }

        debug!(assemblies = catalog.modules.len(), types = catalog.definitions.len(), "built type catalog");
        Ok(catalog)
    }

    pub fn from_json_str(text: &str) -> CatalogResult<Self> {
        Self::from_document(serde_json::from_str(text)?)
    }

    /// Read and build the catalog stored at `path`
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    fn define_type(&mut self, module: ModuleHandle, data: &mut ModuleData, parent: Option<&str>, entry: TypeEntry) -> CatalogResult<()> {
        let parsed = TypeName::parse(&entry.name).map_err(|error| CatalogError::invalid(&data.name, &entry.name, error.to_string()))?;
        if !parsed.is_definition() || parsed.nesting.len() != 1 {
            return Err(CatalogError::invalid(&data.name, &entry.name, "definitions use plain names; declare nested types under 'nested'"));
        }

        let full_name = match parent {
            Some(parent) => format!("{}+{}", parent, parsed.nesting[0]),
            None => parsed.nesting[0].clone(),
        };
        if data.by_name.contains_key(&full_name) {
            return Err(CatalogError::DuplicateType {
                assembly: data.name.clone(),
                name: full_name,
            });
        }

        let mut methods = Vec::with_capacity(entry.methods.len());
        for method in entry.methods {
            let name = method.name.trim();
            if name.is_empty() {
                return Err(CatalogError::invalid(&data.name, &full_name, "method with an empty name"));
            }
            methods.push(MethodDefinition {
                name: name.to_string(),
                arity: method.generic_parameters,
                is_abstract: method.is_abstract,
            });
        }

        let handle = TypeHandle::new(self.definitions.len() as u32);
        self.definitions.push(TypeDefinition {
            module,
            name: full_name.clone(),
            arity: generic_arity(&full_name),
            is_abstract: entry.is_abstract,
            attributes: entry.attributes,
            methods,
        });
        data.by_name.insert(full_name.clone(), handle);
        data.types.push(handle);

        for nested in entry.nested {
            self.define_type(module, data, Some(&full_name), nested)?;
        }
        Ok(())
    }

    /// All modules, in declaration order
    pub fn modules(&self) -> impl Iterator<Item = ModuleHandle> + '_ {
        (0..self.modules.len()).map(|index| ModuleHandle::new(index as u32))
    }

    pub fn module_version(&self, module: ModuleHandle) -> TypeSystemResult<Option<&str>> {
        Ok(self.module(module)?.version.as_deref())
    }

    /// Custom attributes declared on the definition behind `ty`
    pub fn custom_attributes(&self, ty: TypeHandle) -> TypeSystemResult<&[CustomAttribute]> {
        match self.definition_of(ty)? {
            Some(definition) => Ok(&self.definitions[definition.index()].attributes),
            None => Ok(&[]),
        }
    }

    /// Methods declared on the definition behind `ty`
    pub fn declared_methods(&self, ty: TypeHandle) -> TypeSystemResult<Vec<MethodSummary>> {
        let Some(definition) = self.definition_of(ty)? else {
            return Ok(Vec::new());
        };
        Ok(self.definitions[definition.index()]
            .methods
            .iter()
            .map(|method| MethodSummary {
                name: method.name.clone(),
                generic_arity: method.arity,
                is_abstract: method.is_abstract,
            })
            .collect())
    }

    fn find_module(&self, simple_name: &str) -> Option<ModuleHandle> {
        self.modules
            .iter()
            .position(|module| module.name.eq_ignore_ascii_case(simple_name))
            .map(|index| ModuleHandle::new(index as u32))
    }

    fn module(&self, module: ModuleHandle) -> TypeSystemResult<&ModuleData> {
        self.modules.get(module.index()).ok_or(TypeSystemError::UnknownHandle {
            kind: "module",
            index: module.raw(),
        })
    }

    fn shape(&self, ty: TypeHandle) -> TypeSystemResult<TypeShape> {
        if ty.index() < self.definitions.len() {
            return Ok(TypeShape::Definition(ty));
        }
        let interned = self.interned.read();
        interned
            .types
            .get(ty.index() - self.definitions.len())
            .cloned()
            .map(TypeShape::Constructed)
            .ok_or(TypeSystemError::UnknownHandle { kind: "type", index: ty.raw() })
    }

    fn method_data(&self, method: MethodHandle) -> TypeSystemResult<MethodData> {
        self.interned.read().methods.get(method.index()).cloned().ok_or(TypeSystemError::UnknownHandle {
            kind: "method",
            index: method.raw(),
        })
    }

    fn definition_of(&self, ty: TypeHandle) -> TypeSystemResult<Option<TypeHandle>> {
        Ok(match self.shape(ty)? {
            TypeShape::Definition(definition) => Some(definition),
            TypeShape::Constructed(ConstructedType::Instantiated { definition, .. }) => Some(definition),
            TypeShape::Constructed(ConstructedType::Array { .. }) => None,
        })
    }

    fn module_of(&self, ty: TypeHandle) -> TypeSystemResult<ModuleHandle> {
        match self.shape(ty)? {
            TypeShape::Definition(definition) | TypeShape::Constructed(ConstructedType::Instantiated { definition, .. }) => Ok(self.definitions[definition.index()].module),
            TypeShape::Constructed(ConstructedType::Array { element, .. }) => self.module_of(element),
        }
    }

    fn is_open(&self, ty: TypeHandle) -> TypeSystemResult<bool> {
        match self.shape(ty)? {
            TypeShape::Definition(definition) => Ok(self.definitions[definition.index()].arity > 0),
            TypeShape::Constructed(ConstructedType::Instantiated { arguments, .. }) => {
                for argument in arguments {
                    if self.is_open(argument)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            TypeShape::Constructed(ConstructedType::Array { element, .. }) => self.is_open(element),
        }
    }

    fn type_display(&self, ty: TypeHandle) -> TypeSystemResult<String> {
        match self.shape(ty)? {
            TypeShape::Definition(definition) => Ok(self.definitions[definition.index()].name.clone()),
            TypeShape::Constructed(ConstructedType::Instantiated { definition, arguments }) => {
                let arguments = self.display_list(&arguments)?;
                Ok(format!("{}<{}>", self.definitions[definition.index()].name, arguments))
            }
            TypeShape::Constructed(ConstructedType::Array { element, rank }) => Ok(format!("{}[{}]", self.type_display(element)?, ",".repeat(rank - 1))),
        }
    }

    fn display_list(&self, types: &[TypeHandle]) -> TypeSystemResult<String> {
        let names = types.iter().map(|ty| self.type_display(*ty)).collect::<TypeSystemResult<Vec<_>>>()?;
        Ok(names.join(", "))
    }

    fn method_display(&self, method: MethodHandle) -> TypeSystemResult<String> {
        match self.method_data(method)? {
            MethodData::Member { owner, definition, index } => {
                let name = &self.definitions[definition.index()].methods[index].name;
                Ok(format!("{}::{}", self.type_display(owner)?, name))
            }
            MethodData::Instantiated { method, arguments } => Ok(format!("{}<{}>", self.method_display(method)?, self.display_list(&arguments)?)),
        }
    }

    fn member(&self, definition: TypeHandle, index: usize) -> &MethodDefinition {
        &self.definitions[definition.index()].methods[index]
    }

    fn intern_type(&self, constructed: ConstructedType) -> TypeHandle {
        let mut interned = self.interned.write();
        if let Some(handle) = interned.type_index.get(&constructed) {
            return *handle;
        }
        let handle = TypeHandle::new((self.definitions.len() + interned.types.len()) as u32);
        trace!(%handle, ?constructed, "interned constructed type");
        interned.types.push(constructed.clone());
        interned.type_index.insert(constructed, handle);
        handle
    }

    fn intern_method(&self, data: MethodData) -> MethodHandle {
        let mut interned = self.interned.write();
        if let Some(handle) = interned.method_index.get(&data) {
            return *handle;
        }
        let handle = MethodHandle::new(interned.methods.len() as u32);
        interned.methods.push(data.clone());
        interned.method_index.insert(data, handle);
        handle
    }

    fn find_definition(&self, context: ModuleHandle, name: &TypeName) -> TypeSystemResult<TypeHandle> {
        let key = name.definition_name();

        if let Some(assembly) = &name.assembly {
            let module = self.resolve_assembly(assembly)?;
            let data = self.module(module)?;
            return data.by_name.get(&key).copied().ok_or_else(|| TypeSystemError::TypeNotFound {
                name: key,
                assembly: data.name.clone(),
            });
        }

        let data = self.module(context)?;
        if let Some(handle) = data.by_name.get(&key) {
            return Ok(*handle);
        }
        if let Some(core) = self.core_library.filter(|core| *core != context) {
            if let Some(handle) = self.modules[core.index()].by_name.get(&key) {
                return Ok(*handle);
            }
        }
        Err(TypeSystemError::TypeNotFound {
            name: key,
            assembly: data.name.clone(),
        })
    }

    fn resolve_parsed(&self, context: ModuleHandle, name: &TypeName) -> TypeSystemResult<TypeHandle> {
        let definition = self.find_definition(context, name)?;
        let mut ty = definition;

        if !name.generic_arguments.is_empty() {
            let expected = self.definitions[definition.index()].arity;
            if name.generic_arguments.len() != expected {
                return Err(TypeSystemError::invalid_type_name(
                    &self.definitions[definition.index()].name,
                    format!("expected {} type argument(s), found {}", expected, name.generic_arguments.len()),
                ));
            }
            let arguments = name
                .generic_arguments
                .iter()
                .map(|argument| self.resolve_parsed(context, argument))
                .collect::<TypeSystemResult<Vec<_>>>()?;
            ty = self.intern_type(ConstructedType::Instantiated { definition, arguments });
        }

        for rank in &name.array_ranks {
            ty = self.intern_type(ConstructedType::Array { element: ty, rank: *rank });
        }
        Ok(ty)
    }
}

impl TypeSystem for Catalog {
    fn resolve_assembly(&self, name: &AssemblyName) -> TypeSystemResult<ModuleHandle> {
        self.find_module(&name.name).ok_or_else(|| TypeSystemError::AssemblyNotFound(name.to_string()))
    }

    fn all_types(&self, module: ModuleHandle) -> TypeSystemResult<Vec<TypeHandle>> {
        Ok(self.module(module)?.types.clone())
    }

    fn resolve_type(&self, module: ModuleHandle, name: &str) -> TypeSystemResult<TypeHandle> {
        self.module(module)?;
        let parsed = TypeName::parse(name)?;
        self.resolve_parsed(module, &parsed)
    }

    fn resolve_method(&self, owner: TypeHandle, name: &str) -> TypeSystemResult<MethodHandle> {
        let not_found = || -> TypeSystemResult<TypeSystemError> {
            Ok(TypeSystemError::MethodNotFound {
                name: name.to_string(),
                owner: self.type_display(owner)?,
            })
        };

        let Some(definition) = self.definition_of(owner)? else {
            return Err(not_found()?);
        };
        // First declaration wins when several overloads share the name
        let Some(index) = self.definitions[definition.index()].methods.iter().position(|method| method.name == name) else {
            return Err(not_found()?);
        };
        Ok(self.intern_method(MethodData::Member { owner, definition, index }))
    }

    fn method_generic_arity(&self, method: MethodHandle) -> TypeSystemResult<usize> {
        Ok(match self.method_data(method)? {
            MethodData::Member { definition, index, .. } => self.member(definition, index).arity,
            MethodData::Instantiated { .. } => 0,
        })
    }

    fn instantiate_method(&self, method: MethodHandle, arguments: &[TypeHandle]) -> TypeSystemResult<MethodHandle> {
        let target = || self.method_display(method).unwrap_or_else(|_| method.to_string());

        let MethodData::Member { definition, index, .. } = self.method_data(method)? else {
            return Err(TypeSystemError::invalid_instantiation(target(), "method is already instantiated"));
        };
        let arity = self.member(definition, index).arity;
        if arity == 0 {
            return Err(TypeSystemError::invalid_instantiation(target(), "method is not generic"));
        }
        if arguments.len() != arity {
            return Err(TypeSystemError::invalid_instantiation(
                target(),
                format!("expected {} type argument(s), found {}", arity, arguments.len()),
            ));
        }
        for argument in arguments {
            self.shape(*argument)?;
        }

        Ok(self.intern_method(MethodData::Instantiated {
            method,
            arguments: arguments.to_vec(),
        }))
    }

    fn module_name(&self, module: ModuleHandle) -> TypeSystemResult<String> {
        Ok(self.module(module)?.name.clone())
    }

    fn type_info(&self, ty: TypeHandle) -> TypeSystemResult<TypeInfo> {
        let definition = self.definition_of(ty)?.map(|definition| &self.definitions[definition.index()]);
        Ok(TypeInfo {
            name: self.type_display(ty)?,
            module: self.module_of(ty)?,
            generic_arity: definition.map_or(0, |definition| definition.arity),
            is_abstract: definition.is_some_and(|definition| definition.is_abstract),
            is_open_generic: self.is_open(ty)?,
        })
    }

    fn method_info(&self, method: MethodHandle) -> TypeSystemResult<MethodInfo> {
        let name = self.method_display(method)?;
        match self.method_data(method)? {
            MethodData::Member { owner, definition, index } => {
                let member = self.member(definition, index);
                Ok(MethodInfo {
                    name,
                    owner,
                    generic_arity: member.arity,
                    is_abstract: member.is_abstract,
                    is_open_generic: member.arity > 0 || self.is_open(owner)?,
                })
            }
            MethodData::Instantiated { method: generic, arguments } => {
                let base = self.method_info(generic)?;
                let mut open = self.is_open(base.owner)?;
                for argument in &arguments {
                    open |= self.is_open(*argument)?;
                }
                Ok(MethodInfo {
                    name,
                    owner: base.owner,
                    generic_arity: 0,
                    is_abstract: base.is_abstract,
                    is_open_generic: open,
                })
            }
        }
    }
}
