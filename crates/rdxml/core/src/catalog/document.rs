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

//! Serialized form of a catalog

use crate::metadata::CustomAttribute;
use serde::{Deserialize, Serialize};

/// Top-level catalog file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Assembly searched for unqualified type names that the context
    /// assembly does not define
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_library: Option<String>,
    #[serde(default)]
    pub assemblies: Vec<AssemblyEntry>,
}

impl CatalogDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_core_library(mut self, name: impl Into<String>) -> Self {
        self.core_library = Some(name.into());
        self
    }

    pub fn with_assembly(mut self, assembly: AssemblyEntry) -> Self {
        self.assemblies.push(assembly);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

impl AssemblyEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            types: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_type(mut self, ty: TypeEntry) -> Self {
        self.types.push(ty);
        self
    }
}

/// A type definition. Generic arity comes from the `` `N `` suffix of the name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub name: String,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<CustomAttribute>,
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<TypeEntry>,
}

impl TypeEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_abstract: false,
            attributes: Vec::new(),
            methods: Vec::new(),
            nested: Vec::new(),
        }
    }

    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_method(mut self, method: MethodEntry) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_nested(mut self, nested: TypeEntry) -> Self {
        self.nested.push(nested);
        self
    }

    pub fn with_attribute(mut self, attribute: CustomAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodEntry {
    pub name: String,
    #[serde(default)]
    pub generic_parameters: usize,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
}

impl MethodEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generic_parameters: 0,
            is_abstract: false,
        }
    }

    pub fn generic(name: impl Into<String>, generic_parameters: usize) -> Self {
        Self {
            generic_parameters,
            ..Self::new(name)
        }
    }

    pub fn abstract_method(mut self) -> Self {
        self.is_abstract = true;
        self
    }
}
