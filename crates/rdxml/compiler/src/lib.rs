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

//! Runtime directive resolution
//!
//! Turns an RD.XML style directive document into root requests: modules whose
//! metadata must be kept, types and methods that must survive compilation.
//!
//! ```ignore
//! let catalog = Catalog::load("app.catalog.json")?;
//! let provider = RdXmlRootProvider::from_file("app.rd.xml")?;
//! let mut roots = RootSet::new(&catalog);
//! provider.add_compilation_roots(&catalog, &mut roots)?;
//! ```

pub mod config;
pub mod directive;
pub mod error;
pub mod provider;
pub mod resolver;

pub use config::{DEFAULT_PROVENANCE, ResolverConfig};
pub use directive::{DirectiveLevel, DynamicDegree};
pub use error::{DirectiveError, DirectiveErrorKind, DirectiveResult};
pub use provider::{CompilationRootProvider, RdXmlRootProvider};
pub use resolver::DirectiveResolver;
