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

//! Directive grammar
//!
//! ```text
//! Root            := Library | Application        (no attributes)
//! Library|App     := Assembly*
//! Assembly        := Name, Dynamic?  -> Type*
//! Type            := Name, Dynamic?  -> Method*
//! Method          := Name            -> GenericArgument*
//! GenericArgument := Name
//! ```
//!
//! Each level decodes the local names of its children into a closed set of
//! kinds, with an `Unrecognized` catch-all that resolution rejects.

use std::fmt;

pub const NAME_ATTRIBUTE: &str = "Name";
pub const DYNAMIC_ATTRIBUTE: &str = "Dynamic";

/// The only `Dynamic` value directives support
pub const REQUIRED_ALL: &str = "Required All";

/// A named directive below the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveLevel {
    Assembly,
    Type,
    Method,
    GenericArgument,
}

impl DirectiveLevel {
    /// Element name a directive at this level carries
    pub fn element_name(&self) -> &'static str {
        match self {
            Self::Assembly => "Assembly",
            Self::Type => "Type",
            Self::Method => "Method",
            Self::GenericArgument => "GenericArgument",
        }
    }
}

impl fmt::Display for DirectiveLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.element_name())
    }
}

/// The single element below the document root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootElement<'a> {
    Library,
    Application,
    Unrecognized(&'a str),
}

impl<'a> RootElement<'a> {
    pub fn decode(name: &'a str) -> Self {
        match name {
            "Library" => Self::Library,
            "Application" => Self::Application,
            other => Self::Unrecognized(other),
        }
    }
}

/// Children of `Library` or `Application`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootChild<'a> {
    Assembly,
    Unrecognized(&'a str),
}

impl<'a> RootChild<'a> {
    pub fn decode(name: &'a str) -> Self {
        match name {
            "Assembly" => Self::Assembly,
            other => Self::Unrecognized(other),
        }
    }
}

/// Children of `Assembly`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyChild<'a> {
    Type,
    Unrecognized(&'a str),
}

impl<'a> AssemblyChild<'a> {
    pub fn decode(name: &'a str) -> Self {
        match name {
            "Type" => Self::Type,
            other => Self::Unrecognized(other),
        }
    }
}

/// Children of `Type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeChild<'a> {
    Method,
    Unrecognized(&'a str),
}

impl<'a> TypeChild<'a> {
    pub fn decode(name: &'a str) -> Self {
        match name {
            "Method" => Self::Method,
            other => Self::Unrecognized(other),
        }
    }
}

/// Children of `Method`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodChild<'a> {
    GenericArgument,
    Unrecognized(&'a str),
}

impl<'a> MethodChild<'a> {
    pub fn decode(name: &'a str) -> Self {
        match name {
            "GenericArgument" => Self::GenericArgument,
            other => Self::Unrecognized(other),
        }
    }
}

/// Value of a `Dynamic` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicDegree {
    RequiredAll,
}

impl DynamicDegree {
    /// Exact, case-sensitive match against the supported values
    pub fn parse(value: &str) -> Option<Self> {
        (value == REQUIRED_ALL).then_some(Self::RequiredAll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_root_element() {
        assert_eq!(RootElement::decode("Library"), RootElement::Library);
        assert_eq!(RootElement::decode("Application"), RootElement::Application);
        assert_eq!(RootElement::decode("application"), RootElement::Unrecognized("application"));
    }

    #[test]
    fn test_decode_children() {
        assert_eq!(RootChild::decode("Assembly"), RootChild::Assembly);
        assert_eq!(RootChild::decode("Type"), RootChild::Unrecognized("Type"));
        assert_eq!(AssemblyChild::decode("Type"), AssemblyChild::Type);
        assert_eq!(AssemblyChild::decode("Namespace"), AssemblyChild::Unrecognized("Namespace"));
        assert_eq!(TypeChild::decode("Method"), TypeChild::Method);
        assert_eq!(TypeChild::decode("Property"), TypeChild::Unrecognized("Property"));
        assert_eq!(MethodChild::decode("GenericArgument"), MethodChild::GenericArgument);
        assert_eq!(MethodChild::decode("Parameter"), MethodChild::Unrecognized("Parameter"));
    }

    #[test]
    fn test_dynamic_degree_is_exact() {
        assert_eq!(DynamicDegree::parse("Required All"), Some(DynamicDegree::RequiredAll));
        assert_eq!(DynamicDegree::parse("Required Public"), None);
        assert_eq!(DynamicDegree::parse("required all"), None);
        assert_eq!(DynamicDegree::parse(" Required All"), None);
    }

    #[test]
    fn test_level_names_match_child_decoding() {
        assert_eq!(RootChild::decode(DirectiveLevel::Assembly.element_name()), RootChild::Assembly);
        assert_eq!(AssemblyChild::decode(DirectiveLevel::Type.element_name()), AssemblyChild::Type);
        assert_eq!(TypeChild::decode(DirectiveLevel::Method.element_name()), TypeChild::Method);
        assert_eq!(MethodChild::decode(&DirectiveLevel::GenericArgument.to_string()), MethodChild::GenericArgument);
    }
}
