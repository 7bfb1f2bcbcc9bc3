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

//! Loading runtime-directive XML into element trees

use crate::element::ElementNode;
use crate::error::{DocumentError, DocumentResult};
use crate::position::Position;
use std::path::Path;
use tracing::debug;

/// Parse XML text and return its root element as an owned tree.
///
/// Elements keep only their local names. Unqualified attributes are keyed by
/// local name; namespaced ones by `{uri}local`, so they never match a plain
/// lookup. Namespace declarations made on an element are kept as `xmlns` or
/// `xmlns:prefix` attributes. Text, comments and processing instructions are
/// ignored.
pub fn parse_document(text: &str) -> DocumentResult<ElementNode> {
    let document = roxmltree::Document::parse(text).map_err(|error| {
        let pos = error.pos();
        DocumentError::Xml {
            position: Position::new(pos.row as usize, pos.col as usize),
            message: error.to_string(),
        }
    })?;

    let root = convert(&document, document.root_element());
    debug!(root = root.name(), elements = root.element_count(), "parsed directive document");
    Ok(root)
}

/// Read and parse the document at `path`
pub fn load_document(path: impl AsRef<Path>) -> DocumentResult<ElementNode> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&text)
}

fn convert(document: &roxmltree::Document<'_>, node: roxmltree::Node<'_, '_>) -> ElementNode {
    let start = document.text_pos_at(node.range().start);
    let mut element = ElementNode::new(node.tag_name().name()).with_position(Position::new(start.row as usize, start.col as usize));

    for (prefix, uri) in declared_namespaces(node) {
        let key = match prefix {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        element = element.with_attribute(key, uri);
    }

    for attribute in node.attributes() {
        element = match attribute.namespace() {
            Some(uri) => element.with_attribute(format!("{{{uri}}}{}", attribute.name()), attribute.value()),
            None => element.with_attribute(attribute.name(), attribute.value()),
        };
    }

    element.with_children(node.children().filter(|child| child.is_element()).map(|child| convert(document, child)))
}

/// Bindings in scope on `node` that its parent does not already have
fn declared_namespaces<'a>(node: roxmltree::Node<'a, '_>) -> Vec<(Option<&'a str>, &'a str)> {
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|parent| parent.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();

    node.namespaces()
        .map(|ns| (ns.name(), ns.uri()))
        .filter(|(prefix, _)| *prefix != Some("xml"))
        .filter(|binding| !inherited.contains(binding))
        .collect()
}
