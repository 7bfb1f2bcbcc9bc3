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

//! Compilation root providers backed by directive documents

use crate::config::ResolverConfig;
use crate::error::DirectiveResult;
use crate::resolver::DirectiveResolver;
use rdxml_common::{ElementNode, load_document, parse_document};
use rdxml_core::{RootSink, TypeSystem};
use std::path::Path;
use tracing::debug;

/// Something that contributes roots to a compilation
pub trait CompilationRootProvider {
    fn add_compilation_roots(&self, types: &dyn TypeSystem, sink: &mut dyn RootSink) -> DirectiveResult<()>;
}

/// Root provider for a single parsed directive document
#[derive(Debug, Clone)]
pub struct RdXmlRootProvider {
    document: ElementNode,
    config: ResolverConfig,
}

impl RdXmlRootProvider {
    pub fn new(document: ElementNode) -> Self {
        Self {
            document,
            config: ResolverConfig::default(),
        }
    }

    /// Load and parse the directive document at `path`
    pub fn from_file(path: impl AsRef<Path>) -> DirectiveResult<Self> {
        let path = path.as_ref();
        let document = load_document(path)?;
        debug!(path = %path.display(), "loaded directive document");
        Ok(Self::new(document))
    }

    pub fn from_str(text: &str) -> DirectiveResult<Self> {
        Ok(Self::new(parse_document(text)?))
    }

    /// Replace the resolver configuration after validating it
    pub fn with_config(mut self, config: ResolverConfig) -> DirectiveResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn document(&self) -> &ElementNode {
        &self.document
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

impl CompilationRootProvider for RdXmlRootProvider {
    fn add_compilation_roots(&self, types: &dyn TypeSystem, sink: &mut dyn RootSink) -> DirectiveResult<()> {
        DirectiveResolver::with_config(types, sink, self.config.clone())?.resolve(&self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DirectiveError, DirectiveErrorKind};
    use rdxml_core::catalog::AssemblyEntry;
    use rdxml_core::{Catalog, CatalogDocument, RootSet};

    #[test]
    fn test_provider_uses_configured_provenance() {
        let catalog = Catalog::from_document(CatalogDocument::new().with_assembly(AssemblyEntry::new("App.A"))).unwrap();
        let provider = RdXmlRootProvider::from_str(r#"<Directives><Library><Assembly Name="App.A" /></Library></Directives>"#)
            .unwrap()
            .with_config(ResolverConfig::default().with_provenance("descriptor"))
            .unwrap();
        let mut roots = RootSet::new(&catalog);

        provider.add_compilation_roots(&catalog, &mut roots).unwrap();

        assert_eq!(roots.len(), 1);
        assert_eq!(roots.records()[0].reason, "descriptor");
    }

    #[test]
    fn test_provider_rejects_blank_provenance() {
        let provider = RdXmlRootProvider::from_str("<Directives><Library /></Directives>").unwrap();
        let error = provider.with_config(ResolverConfig::default().with_provenance(" ")).unwrap_err();

        assert_eq!(error.kind(), DirectiveErrorKind::Configuration);
    }

    #[test]
    fn test_malformed_xml_is_a_document_error() {
        let error = RdXmlRootProvider::from_str("<Directives><Library></Directives>").unwrap_err();

        assert!(matches!(error, DirectiveError::Document(_)));
        assert_eq!(error.kind(), DirectiveErrorKind::MalformedDocument);
    }
}
