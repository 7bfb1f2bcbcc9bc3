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

//! Ordered root accumulator with a rooting policy
//!
//! Types are rootable unless they are open generic. Methods are rootable
//! unless they are abstract or open generic.

use crate::handle::{MethodHandle, ModuleHandle, TypeHandle};
use crate::rooting::{RootRecord, RootSink, RootTarget, RootingError, RootingResult};
use crate::type_system::TypeSystem;
use std::collections::HashSet;
use tracing::debug;

/// A root the sink declined during a best-effort request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRoot {
    pub target: RootTarget,
    pub error: RootingError,
}

/// Collects roots in first-emission order. A target rooted twice is kept
/// once, with the reason it was first rooted for.
pub struct RootSet<'a, T: TypeSystem + ?Sized> {
    types: &'a T,
    records: Vec<RootRecord>,
    seen: HashSet<RootTarget>,
    skipped: Vec<SkippedRoot>,
}

impl<'a, T: TypeSystem + ?Sized> RootSet<'a, T> {
    pub fn new(types: &'a T) -> Self {
        Self {
            types,
            records: Vec::new(),
            seen: HashSet::new(),
            skipped: Vec::new(),
        }
    }

    /// Accepted roots, in the order they were first emitted
    pub fn records(&self) -> &[RootRecord] {
        &self.records
    }

    /// Best-effort requests that were declined
    pub fn skipped(&self) -> &[SkippedRoot] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, target: &RootTarget) -> bool {
        self.seen.contains(target)
    }

    pub fn into_records(self) -> Vec<RootRecord> {
        self.records
    }

    fn add(&mut self, target: RootTarget, reason: &str) {
        if self.seen.insert(target) {
            debug!(%target, reason, "added root");
            self.records.push(RootRecord {
                target,
                reason: reason.to_string(),
            });
        }
    }

    fn check_type(&self, ty: TypeHandle) -> RootingResult<()> {
        let info = self.types.type_info(ty).map_err(|_| RootingError::UnknownTarget { target: RootTarget::Type(ty) })?;
        if info.is_open_generic {
            return Err(RootingError::OpenGeneric { name: info.name });
        }
        Ok(())
    }

    fn check_method(&self, method: MethodHandle) -> RootingResult<()> {
        let info = self
            .types
            .method_info(method)
            .map_err(|_| RootingError::UnknownTarget {
                target: RootTarget::Method(method),
            })?;
        if info.is_abstract {
            return Err(RootingError::AbstractMethod { name: info.name });
        }
        if info.is_open_generic {
            return Err(RootingError::OpenGeneric { name: info.name });
        }
        Ok(())
    }

    fn skip(&mut self, target: RootTarget, error: RootingError) -> bool {
        debug!(%target, %error, "skipped best-effort root");
        self.skipped.push(SkippedRoot { target, error });
        false
    }
}

impl<T: TypeSystem + ?Sized> RootSink for RootSet<'_, T> {
    fn root_module_metadata(&mut self, module: ModuleHandle, reason: &str) {
        self.add(RootTarget::ModuleMetadata(module), reason);
    }

    fn try_root_type(&mut self, ty: TypeHandle, reason: &str) -> bool {
        match self.check_type(ty) {
            Ok(()) => {
                self.add(RootTarget::Type(ty), reason);
                true
            }
            Err(error) => self.skip(RootTarget::Type(ty), error),
        }
    }

    fn root_type(&mut self, ty: TypeHandle, reason: &str) -> RootingResult<()> {
        self.check_type(ty)?;
        self.add(RootTarget::Type(ty), reason);
        Ok(())
    }

    fn try_root_method(&mut self, method: MethodHandle, reason: &str) -> bool {
        match self.check_method(method) {
            Ok(()) => {
                self.add(RootTarget::Method(method), reason);
                true
            }
            Err(error) => self.skip(RootTarget::Method(method), error),
        }
    }

    fn root_method(&mut self, method: MethodHandle, reason: &str) -> RootingResult<()> {
        self.check_method(method)?;
        self.add(RootTarget::Method(method), reason);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly_name::AssemblyName;
    use crate::catalog::{AssemblyEntry, Catalog, CatalogDocument, MethodEntry, TypeEntry};

    fn catalog() -> Catalog {
        Catalog::from_document(
            CatalogDocument::new().with_assembly(
                AssemblyEntry::new("App")
                    .with_type(TypeEntry::new("App.Widget").with_method(MethodEntry::new("Build")).with_method(MethodEntry::generic("Make", 1)))
                    .with_type(TypeEntry::new("App.Box`1"))
                    .with_type(TypeEntry::new("App.Shape").abstract_type().with_method(MethodEntry::new("Area").abstract_method())),
            ),
        )
        .unwrap()
    }

    #[test]
    fn test_roots_keep_first_emission_order_and_deduplicate() {
        let catalog = catalog();
        let module = catalog.resolve_assembly(&AssemblyName::new("App")).unwrap();
        let widget = catalog.resolve_type(module, "App.Widget").unwrap();
        let mut roots = RootSet::new(&catalog);

        roots.root_module_metadata(module, "first");
        roots.root_type(widget, "second").unwrap();
        roots.root_module_metadata(module, "again");

        assert_eq!(roots.len(), 2);
        assert_eq!(roots.records()[0].target, RootTarget::ModuleMetadata(module));
        assert_eq!(roots.records()[0].reason, "first");
        assert_eq!(roots.records()[1].target, RootTarget::Type(widget));
        assert!(roots.contains(&RootTarget::Type(widget)));
    }

    #[test]
    fn test_open_generic_type_is_refused() {
        let catalog = catalog();
        let module = catalog.resolve_assembly(&AssemblyName::new("App")).unwrap();
        let open = catalog.resolve_type(module, "App.Box`1").unwrap();
        let closed = catalog.resolve_type(module, "App.Box`1[App.Widget]").unwrap();
        let mut roots = RootSet::new(&catalog);

        assert!(!roots.try_root_type(open, "sweep"));
        assert_eq!(roots.skipped().len(), 1);
        assert!(matches!(roots.root_type(open, "strict"), Err(RootingError::OpenGeneric { .. })));
        assert!(roots.try_root_type(closed, "sweep"));
        assert_eq!(roots.len(), 1);
    }

    #[test]
    fn test_abstract_type_is_rootable_but_abstract_method_is_not() {
        let catalog = catalog();
        let module = catalog.resolve_assembly(&AssemblyName::new("App")).unwrap();
        let shape = catalog.resolve_type(module, "App.Shape").unwrap();
        let area = catalog.resolve_method(shape, "Area").unwrap();
        let mut roots = RootSet::new(&catalog);

        assert!(roots.try_root_type(shape, "sweep"));
        assert!(matches!(roots.root_method(area, "strict"), Err(RootingError::AbstractMethod { .. })));
        assert!(!roots.try_root_method(area, "sweep"));
    }

    #[test]
    fn test_generic_method_needs_instantiation() {
        let catalog = catalog();
        let module = catalog.resolve_assembly(&AssemblyName::new("App")).unwrap();
        let widget = catalog.resolve_type(module, "App.Widget").unwrap();
        let make = catalog.resolve_method(widget, "Make").unwrap();
        let made = catalog.instantiate_method(make, &[widget]).unwrap();
        let mut roots = RootSet::new(&catalog);

        assert!(matches!(roots.root_method(make, "strict"), Err(RootingError::OpenGeneric { .. })));
        roots.root_method(made, "strict").unwrap();
        assert_eq!(roots.into_records()[0].target, RootTarget::Method(made));
    }

    #[test]
    fn test_unknown_handles_are_refused() {
        let catalog = catalog();
        let mut roots = RootSet::new(&catalog);

        assert_eq!(
            roots.root_type(TypeHandle::new(500), "strict"),
            Err(RootingError::UnknownTarget {
                target: RootTarget::Type(TypeHandle::new(500))
            })
        );
        assert!(roots.is_empty());
    }
}
