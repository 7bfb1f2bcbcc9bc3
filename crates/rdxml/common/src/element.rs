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

//! Attributed element tree
//!
//! The loader produces these from XML text, tests usually build them by hand.
//! A tree is never mutated once it has been handed to a consumer.

use crate::position::Position;

/// One named node of a document, with its attributes and ordered children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<ElementNode>,
    position: Option<Position>,
}

impl ElementNode {
    /// Create an element with the given local name and nothing else
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            position: None,
        }
    }

    /// Set an attribute, replacing any previous value under the same name
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Append a child element
    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child elements in order
    pub fn with_children(mut self, children: impl IntoIterator<Item = ElementNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Record where the element starts in its source text
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Local name of the element (no namespace prefix)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the named attribute, if present
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    /// All attributes in document order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Child elements in document order
    pub fn children(&self) -> &[ElementNode] {
        &self.children
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Total number of elements in this subtree, including this one
    pub fn element_count(&self) -> usize {
        1 + self.children.iter().map(ElementNode::element_count).sum::<usize>()
    }
}
