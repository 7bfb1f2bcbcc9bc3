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

//! Directive resolution benchmarks
//!
//! Measures a full walk over a generated catalog: a module sweep plus one
//! generic method instantiation per type.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use rdxml_common::{ElementNode, parse_document};
use rdxml_compiler::DirectiveResolver;
use rdxml_core::catalog::{AssemblyEntry, MethodEntry, TypeEntry};
use rdxml_core::{Catalog, CatalogDocument, RootSet};
use std::fmt::Write as _;

const TYPE_COUNT: usize = 500;

fn build_catalog() -> Catalog {
    let mut assembly = AssemblyEntry::new("Bench.App");
    for index in 0..TYPE_COUNT {
        assembly = assembly.with_type(
            TypeEntry::new(format!("Bench.App.Type{index}"))
                .with_method(MethodEntry::new("Run"))
                .with_method(MethodEntry::generic("Map", 1)),
        );
    }
    Catalog::from_document(CatalogDocument::new().with_assembly(assembly)).unwrap()
}

fn build_document() -> ElementNode {
    let mut xml = String::from("<Directives><Application><Assembly Name=\"Bench.App\" Dynamic=\"Required All\">");
    for index in 0..TYPE_COUNT {
        let argument = (index + 1) % TYPE_COUNT;
        let _ = write!(
            xml,
            "<Type Name=\"Bench.App.Type{index}\"><Method Name=\"Run\" /><Method Name=\"Map\"><GenericArgument Name=\"Bench.App.Type{argument}\" /></Method></Type>"
        );
    }
    xml.push_str("</Assembly></Application></Directives>");
    parse_document(&xml).unwrap()
}

fn bench_resolve(c: &mut Criterion) {
    let catalog = build_catalog();
    let document = build_document();

    let mut group = c.benchmark_group("directive_resolution");
    group.throughput(Throughput::Elements(TYPE_COUNT as u64));

    group.bench_function("sweep_and_instantiate", |b| {
        b.iter(|| {
            let mut roots = RootSet::new(&catalog);
            DirectiveResolver::new(&catalog, &mut roots).resolve(black_box(&document)).unwrap();
            roots.len()
        })
    });

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_generated_document", |b| b.iter(build_document));
}

criterion_group!(resolver_benches, bench_resolve, bench_parse);
criterion_main!(resolver_benches);
