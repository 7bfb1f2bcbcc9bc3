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

//! Depth-first resolution of runtime directives into roots
//!
//! The resolver walks `Library|Application > Assembly > Type > Method >
//! GenericArgument`, resolves every name through a [`TypeSystem`] and reports
//! what it finds to a [`RootSink`]. Document order fixes the order of both
//! type system queries and sink calls. The first error aborts the walk; roots
//! emitted before it stay emitted.

use crate::config::ResolverConfig;
use crate::directive::{AssemblyChild, DYNAMIC_ATTRIBUTE, DirectiveLevel, DynamicDegree, MethodChild, NAME_ATTRIBUTE, RootChild, RootElement, TypeChild};
use crate::error::{DirectiveError, DirectiveResult};
use rdxml_common::ElementNode;
use rdxml_core::{AssemblyName, MethodHandle, ModuleHandle, RootSink, TypeHandle, TypeSystem, TypeSystemResult};
use tracing::{debug, trace};

/// Resolves a directive document against a type system
pub struct DirectiveResolver<'a, T: TypeSystem + ?Sized, S: RootSink + ?Sized> {
    types: &'a T,
    sink: &'a mut S,
    config: ResolverConfig,
}

impl<'a, T: TypeSystem + ?Sized, S: RootSink + ?Sized> DirectiveResolver<'a, T, S> {
    /// Create a resolver with the default configuration
    pub fn new(types: &'a T, sink: &'a mut S) -> Self {
        Self {
            types,
            sink,
            config: ResolverConfig::default(),
        }
    }

    /// Create a resolver with a validated configuration
    pub fn with_config(types: &'a T, sink: &'a mut S, config: ResolverConfig) -> DirectiveResult<Self> {
        config.validate()?;
        Ok(Self { types, sink, config })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `document`, the element that holds the single
    /// `Library` or `Application` directive.
    pub fn resolve(&mut self, document: &ElementNode) -> DirectiveResult<()> {
        let [root] = document.children() else {
            return Err(DirectiveError::RootElementCount {
                found: document.children().len(),
            });
        };

        match RootElement::decode(root.name()) {
            RootElement::Library | RootElement::Application => {}
            RootElement::Unrecognized(name) => {
                return Err(DirectiveError::UnexpectedRootElement {
                    name: name.to_string(),
                    position: root.position(),
                });
            }
        }

        if root.has_attributes() {
            return Err(DirectiveError::RootAttributes {
                element: root.name().to_string(),
                position: root.position(),
            });
        }

        debug!(root = root.name(), assemblies = root.children().len(), "resolving directives");

        for child in root.children() {
            match RootChild::decode(child.name()) {
                RootChild::Assembly => self.resolve_assembly(child)?,
                RootChild::Unrecognized(name) => return Err(DirectiveError::unsupported_element(root.name(), name, child.position())),
            }
        }

        Ok(())
    }

    fn resolve_assembly(&mut self, node: &ElementNode) -> DirectiveResult<()> {
        let name = required_name(node, DirectiveLevel::Assembly)?;
        let assembly = AssemblyName::parse(name)?;
        let module = self.types.resolve_assembly(&assembly)?;

        trace!(assembly = name, %module, "resolved assembly");
        self.sink.root_module_metadata(module, &self.config.provenance);

        if dynamic_degree(node, DirectiveLevel::Assembly)?.is_some() {
            self.sweep_module(module)?;
        }

        for child in node.children() {
            match AssemblyChild::decode(child.name()) {
                AssemblyChild::Type => self.resolve_type(module, child)?,
                AssemblyChild::Unrecognized(name) => return Err(DirectiveError::unsupported_element(node.name(), name, child.position())),
            }
        }

        Ok(())
    }

    fn sweep_module(&mut self, module: ModuleHandle) -> DirectiveResult<()> {
        let types = self.types.all_types(module)?;
        let mut rooted = 0usize;

        for ty in &types {
            if self.sink.try_root_type(*ty, &self.config.provenance) {
                rooted += 1;
            }
        }

        debug!(%module, types = types.len(), rooted, "swept module types");
        Ok(())
    }

    fn resolve_type(&mut self, module: ModuleHandle, node: &ElementNode) -> DirectiveResult<()> {
        let name = required_name(node, DirectiveLevel::Type)?;
        let ty = self.types.resolve_type(module, name)?;

        trace!(type_name = name, handle = %ty, "resolved type");

        if dynamic_degree(node, DirectiveLevel::Type)?.is_some() {
            self.sink.root_type(ty, &self.config.provenance)?;
        }

        for child in node.children() {
            match TypeChild::decode(child.name()) {
                TypeChild::Method => self.resolve_method(module, ty, child)?,
                TypeChild::Unrecognized(name) => return Err(DirectiveError::unsupported_element(node.name(), name, child.position())),
            }
        }

        Ok(())
    }

    fn resolve_method(&mut self, module: ModuleHandle, owner: TypeHandle, node: &ElementNode) -> DirectiveResult<()> {
        let name = required_name(node, DirectiveLevel::Method)?;
        let method = self.types.resolve_method(owner, name)?;

        let arguments = self.resolve_generic_arguments(module, node)?;
        let arity = self.types.method_generic_arity(method)?;
        if arguments.len() != arity {
            return Err(DirectiveError::ArityMismatch {
                method: name.to_string(),
                expected: arity,
                found: arguments.len(),
                position: node.position(),
            });
        }

        let target = self.instantiate(method, &arguments).map_err(|source| DirectiveError::Instantiation {
            method: name.to_string(),
            source,
            position: node.position(),
        })?;
        trace!(method = name, handle = %target, arguments = arguments.len(), "resolved method");

        self.sink.root_method(target, &self.config.provenance)?;
        Ok(())
    }

    fn resolve_generic_arguments(&self, module: ModuleHandle, node: &ElementNode) -> DirectiveResult<Vec<TypeHandle>> {
        let mut arguments = Vec::with_capacity(node.children().len());

        for child in node.children() {
            match MethodChild::decode(child.name()) {
                MethodChild::GenericArgument => {
                    let name = required_name(child, DirectiveLevel::GenericArgument)?;
                    arguments.push(self.types.resolve_type(module, name)?);
                }
                MethodChild::Unrecognized(name) => return Err(DirectiveError::unsupported_element(node.name(), name, child.position())),
            }
        }

        Ok(arguments)
    }

    fn instantiate(&self, method: MethodHandle, arguments: &[TypeHandle]) -> TypeSystemResult<MethodHandle> {
        if arguments.is_empty() {
            return Ok(method);
        }
        self.types.instantiate_method(method, arguments)
    }
}

fn required_name(node: &ElementNode, level: DirectiveLevel) -> DirectiveResult<&str> {
    node.attribute(NAME_ATTRIBUTE)
        .ok_or_else(|| DirectiveError::missing_attribute(level.element_name(), NAME_ATTRIBUTE, node.position()))
}

fn dynamic_degree(node: &ElementNode, level: DirectiveLevel) -> DirectiveResult<Option<DynamicDegree>> {
    let Some(value) = node.attribute(DYNAMIC_ATTRIBUTE) else {
        return Ok(None);
    };

    DynamicDegree::parse(value).map(Some).ok_or_else(|| DirectiveError::UnsupportedAttributeValue {
        element: level.element_name().to_string(),
        attribute: DYNAMIC_ATTRIBUTE,
        value: value.to_string(),
        position: node.position(),
    })
}
