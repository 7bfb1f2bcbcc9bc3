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

use mockall::{Sequence, mock};
use rdxml_common::parse_document;
use rdxml_compiler::{DirectiveError, DirectiveErrorKind, DirectiveResolver, ResolverConfig};
use rdxml_core::{
    AssemblyName, MethodHandle, MethodInfo, ModuleHandle, RootSink, RootingError, RootingResult, TypeHandle, TypeInfo, TypeSystem, TypeSystemError, TypeSystemResult,
};

mock! {
    pub Types {}

    impl TypeSystem for Types {
        fn resolve_assembly(&self, name: &AssemblyName) -> TypeSystemResult<ModuleHandle>;
        fn all_types(&self, module: ModuleHandle) -> TypeSystemResult<Vec<TypeHandle>>;
        fn resolve_type(&self, module: ModuleHandle, name: &str) -> TypeSystemResult<TypeHandle>;
        fn resolve_method(&self, owner: TypeHandle, name: &str) -> TypeSystemResult<MethodHandle>;
        fn method_generic_arity(&self, method: MethodHandle) -> TypeSystemResult<usize>;
        fn instantiate_method(&self, method: MethodHandle, arguments: &[TypeHandle]) -> TypeSystemResult<MethodHandle>;
        fn module_name(&self, module: ModuleHandle) -> TypeSystemResult<String>;
        fn type_info(&self, ty: TypeHandle) -> TypeSystemResult<TypeInfo>;
        fn method_info(&self, method: MethodHandle) -> TypeSystemResult<MethodInfo>;
    }
}

mock! {
    pub Sink {}

    impl RootSink for Sink {
        fn root_module_metadata(&mut self, module: ModuleHandle, reason: &str);
        fn try_root_type(&mut self, ty: TypeHandle, reason: &str) -> bool;
        fn root_type(&mut self, ty: TypeHandle, reason: &str) -> RootingResult<()>;
        fn try_root_method(&mut self, method: MethodHandle, reason: &str) -> bool;
        fn root_method(&mut self, method: MethodHandle, reason: &str) -> RootingResult<()>;
    }
}

const MODULE: ModuleHandle = ModuleHandle::new(0);
const WIDGET: TypeHandle = TypeHandle::new(0);
const GADGET: TypeHandle = TypeHandle::new(1);
const SHAPE: TypeHandle = TypeHandle::new(2);
const INT32: TypeHandle = TypeHandle::new(7);
const STRING: TypeHandle = TypeHandle::new(8);
const BUILD: MethodHandle = MethodHandle::new(0);
const MAKE: MethodHandle = MethodHandle::new(1);
const MAKE_INSTANCE: MethodHandle = MethodHandle::new(40);

fn expect_app_assembly(types: &mut MockTypes) {
    types
        .expect_resolve_assembly()
        .withf(|name: &AssemblyName| name.name == "App.A")
        .times(1)
        .returning(|_| Ok(MODULE));
}

fn expect_widget(types: &mut MockTypes) {
    types
        .expect_resolve_type()
        .withf(|module, name| *module == MODULE && name == "App.A.Widget")
        .returning(|_, _| Ok(WIDGET));
}

fn run(types: &MockTypes, sink: &mut MockSink, xml: &str) -> Result<(), DirectiveError> {
    let document = parse_document(xml).unwrap();
    DirectiveResolver::new(types, sink).resolve(&document)
}

#[test]
fn test_assembly_without_types_roots_only_module_metadata() {
    let mut types = MockTypes::new();
    let mut sink = MockSink::new();
    expect_app_assembly(&mut types);
    sink.expect_root_module_metadata()
        .withf(|module, reason| *module == MODULE && reason == "directive root")
        .times(1)
        .return_const(());

    run(&types, &mut sink, r#"<Directives><Library><Assembly Name="App.A" /></Library></Directives>"#).unwrap();
}

#[test]
fn test_dynamic_assembly_sweeps_every_type_after_module_root() {
    let mut types = MockTypes::new();
    let mut sink = MockSink::new();
    let mut seq = Sequence::new();
    expect_app_assembly(&mut types);
    types
        .expect_all_types()
        .withf(|module| *module == MODULE)
        .times(1)
        .returning(|_| Ok(vec![WIDGET, GADGET, SHAPE]));

    sink.expect_root_module_metadata().times(1).in_sequence(&mut seq).return_const(());
    sink.expect_try_root_type()
        .withf(|ty, _| *ty == WIDGET)
        .times(1)
        .in_sequence(&mut seq)
        .return_const(true);
    sink.expect_try_root_type()
        .withf(|ty, _| *ty == GADGET)
        .times(1)
        .in_sequence(&mut seq)
        .return_const(false);
    sink.expect_try_root_type()
        .withf(|ty, _| *ty == SHAPE)
        .times(1)
        .in_sequence(&mut seq)
        .return_const(true);

    run(
        &types,
        &mut sink,
        r#"<Directives><Application><Assembly Name="App.A" Dynamic="Required All" /></Application></Directives>"#,
    )
    .unwrap();
}

#[test]
fn test_plain_method_is_strictly_rooted_after_module() {
    let mut types = MockTypes::new();
    let mut sink = MockSink::new();
    let mut seq = Sequence::new();
    expect_app_assembly(&mut types);
    expect_widget(&mut types);
    types
        .expect_resolve_method()
        .withf(|owner, name| *owner == WIDGET && name == "Build")
        .returning(|_, _| Ok(BUILD));
    types.expect_method_generic_arity().returning(|_| Ok(0));

    sink.expect_root_module_metadata().times(1).in_sequence(&mut seq).return_const(());
    sink.expect_root_method()
        .withf(|method, reason| *method == BUILD && reason == "directive root")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));

    run(
        &types,
        &mut sink,
        r#"<Directives><Application><Assembly Name="App.A"><Type Name="App.A.Widget"><Method Name="Build" /></Type></Assembly></Application></Directives>"#,
    )
    .unwrap();
}

#[test]
fn test_generic_method_is_instantiated_with_arguments_in_order() {
    let mut types = MockTypes::new();
    let mut sink = MockSink::new();
    expect_app_assembly(&mut types);
    expect_widget(&mut types);
    types.expect_resolve_method().returning(|_, _| Ok(MAKE));
    types.expect_resolve_type().withf(|_, name| name == "System.Int32").returning(|_, _| Ok(INT32));
    types.expect_resolve_type().withf(|_, name| name == "System.String").returning(|_, _| Ok(STRING));
    types.expect_method_generic_arity().withf(|method| *method == MAKE).returning(|_| Ok(2));
    types
        .expect_instantiate_method()
        .withf(|method, arguments| *method == MAKE && arguments == [INT32, STRING])
        .times(1)
        .returning(|_, _| Ok(MAKE_INSTANCE));

    sink.expect_root_module_metadata().return_const(());
    sink.expect_root_method()
        .withf(|method, _| *method == MAKE_INSTANCE)
        .times(1)
        .returning(|_, _| Ok(()));

    run(
        &types,
        &mut sink,
        r#"<Directives><Library><Assembly Name="App.A"><Type Name="App.A.Widget"><Method Name="Make">
            <GenericArgument Name="System.Int32" />
            <GenericArgument Name="System.String" />
        </Method></Type></Assembly></Library></Directives>"#,
    )
    .unwrap();
}

#[test]
fn test_arity_mismatch_skips_rooting_the_method() {
    let mut types = MockTypes::new();
    let mut sink = MockSink::new();
    expect_app_assembly(&mut types);
    expect_widget(&mut types);
    types.expect_resolve_method().returning(|_, _| Ok(MAKE));
    types.expect_method_generic_arity().returning(|_| Ok(1));
    types.expect_instantiate_method().never();

    sink.expect_root_module_metadata().times(1).return_const(());
    sink.expect_root_method().never();

    let error = run(
        &types,
        &mut sink,
        r#"<Directives><Library><Assembly Name="App.A"><Type Name="App.A.Widget"><Method Name="Make" /></Type></Assembly></Library></Directives>"#,
    )
    .unwrap_err();

    assert_eq!(error.kind(), DirectiveErrorKind::ArityMismatch);
    assert!(matches!(error, DirectiveError::ArityMismatch { expected: 1, found: 0, .. }));
}

#[test]
fn test_refused_instantiation_is_an_arity_mismatch() {
    let mut types = MockTypes::new();
    let mut sink = MockSink::new();
    expect_app_assembly(&mut types);
    expect_widget(&mut types);
    types.expect_resolve_method().returning(|_, _| Ok(MAKE));
    types.expect_resolve_type().withf(|_, name| name == "System.Int32").returning(|_, _| Ok(INT32));
    types.expect_method_generic_arity().returning(|_| Ok(1));
    types
        .expect_instantiate_method()
        .times(1)
        .returning(|_, _| Err(TypeSystemError::invalid_instantiation("App.A.Widget::Make", "constraint not satisfied")));

    sink.expect_root_module_metadata().times(1).return_const(());
    sink.expect_root_method().never();

    let error = run(
        &types,
        &mut sink,
        r#"<Directives><Library><Assembly Name="App.A"><Type Name="App.A.Widget"><Method Name="Make"><GenericArgument Name="System.Int32" /></Method></Type></Assembly></Library></Directives>"#,
    )
    .unwrap_err();

    assert_eq!(error.kind(), DirectiveErrorKind::ArityMismatch);
    assert!(matches!(error, DirectiveError::Instantiation { ref method, .. } if method == "Make"));
    assert!(error.position().is_some());
}

#[test]
fn test_strict_refusal_is_a_rooting_failure() {
    let mut types = MockTypes::new();
    let mut sink = MockSink::new();
    expect_app_assembly(&mut types);
    expect_widget(&mut types);

    sink.expect_root_module_metadata().return_const(());
    sink.expect_root_type().times(1).returning(|_, _| {
        Err(RootingError::OpenGeneric {
            name: "App.A.Widget".to_string(),
        })
    });

    let error = run(
        &types,
        &mut sink,
        r#"<Directives><Library><Assembly Name="App.A"><Type Name="App.A.Widget" Dynamic="Required All"><Method Name="Build" /></Type></Assembly></Library></Directives>"#,
    )
    .unwrap_err();

    assert_eq!(error.kind(), DirectiveErrorKind::RootingFailure);
}

#[test]
fn test_unresolved_assembly_emits_nothing() {
    let mut types = MockTypes::new();
    let mut sink = MockSink::new();
    types
        .expect_resolve_assembly()
        .returning(|name| Err(TypeSystemError::AssemblyNotFound(name.name.clone())));
    sink.expect_root_module_metadata().never();

    let error = run(&types, &mut sink, r#"<Directives><Library><Assembly Name="Missing, Version=1.0.0.0" /></Library></Directives>"#).unwrap_err();

    assert_eq!(error.kind(), DirectiveErrorKind::UnresolvedReference);
    assert_eq!(error.to_string(), TypeSystemError::AssemblyNotFound("Missing".to_string()).to_string());
}

#[test]
fn test_configured_provenance_reaches_the_sink() {
    let mut types = MockTypes::new();
    let mut sink = MockSink::new();
    expect_app_assembly(&mut types);
    sink.expect_root_module_metadata()
        .withf(|_, reason| reason == "linker descriptor")
        .times(1)
        .return_const(());

    let document = parse_document(r#"<Directives><Library><Assembly Name="App.A" /></Library></Directives>"#).unwrap();
    let config = ResolverConfig::default().with_provenance("linker descriptor");
    DirectiveResolver::with_config(&types, &mut sink, config).unwrap().resolve(&document).unwrap();
}
