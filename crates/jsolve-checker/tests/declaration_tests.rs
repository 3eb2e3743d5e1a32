//! Declarations denoted by references and introduced by declaring nodes.

mod common;

use common::{facade, unit_with_class, void_method};
use jsolve_checker::SymbolResolver;
use jsolve_common::ResolveError;
use jsolve_solver::{
    ConstructorDeclaration, FieldDeclaration, MethodDeclaration, PrimitiveKind, ResolvedDeclaration,
    ResolvedType, SymbolReference, TypeDeclaration, TypeParameterDeclaration,
};
use jsolve_syntax::{MethodData, Modifiers, NodeIndex, TreeBuilder, TypeDeclData};
use std::sync::Arc;

/// ```java
/// package demo;
/// import java.io.File;
/// public class Cleaner {
///     public boolean clean(String path) {
///         File f = new File(path);
///         return f.delete();
///     }
/// }
/// ```
struct Cleaner {
    unit: Arc<jsolve_syntax::SourceUnit>,
    creation: NodeIndex,
    delete: NodeIndex,
    file_type: NodeIndex,
    f_ref: NodeIndex,
    path_param: NodeIndex,
    f_declarator: NodeIndex,
    clean: NodeIndex,
}

fn cleaner() -> Cleaner {
    let mut b = TreeBuilder::new();
    let file_type = b.class_type("File");
    let created_type = b.class_type("File");
    let path_ref = b.name("path");
    let creation = b.new_object(created_type, vec![path_ref]);
    let local = b.local_var(file_type, &[("f", creation)]);
    let f_ref = b.name("f");
    let delete = b.call(f_ref, "delete", vec![]);
    let ret = b.return_stmt(delete);
    let body = b.block(vec![local, ret]);
    let string = b.class_type("String");
    let path_param = b.param(string, "path");
    let boolean = b.primitive(PrimitiveKind::Boolean);
    let clean = b.method(boolean, "clean", vec![path_param], body);
    let f_declarator = b
        .arena()
        .get(local)
        .and_then(|n| b.arena().get_variable_decl(n))
        .and_then(|d| d.declarators.get(0))
        .expect("declarator");
    let unit = unit_with_class(b, &[("java.io.File", false)], "Cleaner", vec![clean]);
    Cleaner {
        unit,
        creation,
        delete,
        file_type,
        f_ref,
        path_param,
        f_declarator,
        clean,
    }
}

#[test]
fn test_constructor_call_resolves_to_runtime_constructor() {
    let fx = cleaner();
    let facade = facade(&[fx.unit.clone()]);
    let ctor: Arc<ConstructorDeclaration> = facade
        .resolve_declaration_as(&fx.unit, fx.creation)
        .expect("constructor");
    assert_eq!(ctor.signature(), "File(java.lang.String)");
    assert_eq!(ctor.qualified_signature(), "java.io.File.File(java.lang.String)");
}

#[test]
fn test_method_call_resolves_to_runtime_method() {
    let fx = cleaner();
    let facade = facade(&[fx.unit.clone()]);
    let delete: Arc<MethodDeclaration> = facade
        .resolve_declaration_as(&fx.unit, fx.delete)
        .expect("method");
    assert_eq!(delete.signature(), "delete()");
    assert_eq!(delete.qualified_signature(), "java.io.File.delete()");
    assert_eq!(delete.return_type, ResolvedType::Primitive(PrimitiveKind::Boolean));
}

#[test]
fn test_class_type_resolves_through_single_import() {
    let fx = cleaner();
    let facade = facade(&[fx.unit.clone()]);
    let ty: Arc<TypeDeclaration> = facade
        .resolve_declaration_as(&fx.unit, fx.file_type)
        .expect("type");
    assert_eq!(&*ty.qualified_name, "java.io.File");
}

#[test]
fn test_local_and_parameter_declarations() {
    let fx = cleaner();
    let facade = facade(&[fx.unit.clone()]);

    match facade.resolve_declaration(&fx.unit, fx.f_ref).expect("f") {
        ResolvedDeclaration::LocalVariable(local) => {
            assert_eq!(&*local.name, "f");
            assert_eq!(local.ty, ResolvedType::top_level("java.io.File"));
            assert_eq!(local.origin, fx.unit.node_ref(fx.f_declarator));
        }
        other => panic!("expected a local variable, got {other:?}"),
    }

    match facade.resolve_declaration(&fx.unit, fx.path_param).expect("path") {
        ResolvedDeclaration::Parameter(param) => {
            assert_eq!(&*param.name, "path");
            assert_eq!(param.ty, ResolvedType::string());
            assert!(!param.is_varargs);
        }
        other => panic!("expected a parameter, got {other:?}"),
    }
}

#[test]
fn test_declaring_nodes_resolve_to_their_declarations() {
    let fx = cleaner();
    let facade = facade(&[fx.unit.clone()]);
    let clean: Arc<MethodDeclaration> = facade
        .resolve_declaration_as(&fx.unit, fx.clean)
        .expect("method declaration");
    assert_eq!(clean.qualified_signature(), "demo.Cleaner.clean(java.lang.String)");

    let class = facade
        .to_type_declaration(&fx.unit, fx.f_ref)
        .expect("enclosing type");
    assert_eq!(&*class.qualified_name, "demo.Cleaner");
}

#[test]
fn test_shape_mismatch_is_unsupported() {
    let fx = cleaner();
    let facade = facade(&[fx.unit.clone()]);
    let err = facade
        .resolve_declaration_as::<Arc<MethodDeclaration>>(&fx.unit, fx.creation)
        .expect_err("a constructor is not a method");
    assert!(matches!(err, ResolveError::UnsupportedConstruct { .. }), "{err}");
    assert!(err.to_string().contains("constructor"), "{err}");
}

/// ```java
/// package demo;
/// public class Box<T> {
///     private T item;
///     public Box(T item) { this(); }
///     public Box() {}
///     void touch() { ghost(); missing.run(); }
/// }
/// ```
#[test]
fn test_fields_type_parameters_and_constructor_invocations() {
    let mut b = TreeBuilder::new();
    let t = b.type_param("T", vec![]);
    let t_field_type = b.class_type("T");
    let item = b.field(Modifiers::PRIVATE, t_field_type, &[("item", NodeIndex::NONE)]);

    let this_call = b.explicit_ctor_call(true, vec![]);
    let this_stmt = b.expr_stmt(this_call);
    let ctor_body = b.block(vec![this_stmt]);
    let t_param_type = b.class_type("T");
    let item_param = b.param(t_param_type, "item");
    let ctor = b.constructor("Box", vec![item_param], ctor_body);
    let empty_body = b.block(vec![]);
    let no_arg = b.constructor("Box", vec![], empty_body);

    let ghost = b.call(NodeIndex::NONE, "ghost", vec![]);
    let ghost_stmt = b.expr_stmt(ghost);
    let missing = b.name("missing");
    let run = b.call(missing, "run", vec![]);
    let run_stmt = b.expr_stmt(run);
    let touch = void_method(&mut b, "touch", vec![], vec![ghost_stmt, run_stmt]);

    let item_declarator = b
        .arena()
        .get(item)
        .and_then(|n| b.arena().get_variable_decl(n))
        .and_then(|d| d.declarators.get(0))
        .expect("declarator");

    let class = b.class_decl(TypeDeclData {
        modifiers: Modifiers::PUBLIC,
        name: "Box".to_string(),
        type_parameters: vec![t].into(),
        members: vec![item, ctor, no_arg, touch].into(),
        ..Default::default()
    });
    let root = b.compilation_unit(Some("demo"), vec![], vec![class]);
    let unit = Arc::new(b.finish("demo/Box.java", root));
    let facade = facade(&[unit.clone()]);

    let field: Arc<FieldDeclaration> = facade
        .resolve_declaration_as(&unit, item_declarator)
        .expect("field");
    assert_eq!(&*field.name, "item");
    assert_eq!(field.ty.to_string(), "T");

    let param: TypeParameterDeclaration = facade
        .resolve_declaration_as(&unit, t_field_type)
        .expect("type parameter");
    assert_eq!(&*param.name, "T");
    assert_eq!(param.declaring_type().as_ref(), "demo.Box");

    let invoked: Arc<ConstructorDeclaration> = facade
        .resolve_declaration_as(&unit, this_call)
        .expect("this()");
    assert_eq!(invoked.signature(), "Box()");

    let err = facade.resolve_declaration(&unit, ghost).expect_err("no ghost()");
    assert!(err.is_unsolved(), "{err}");
    assert_eq!(facade.solve(&unit, ghost).expect("no error"), SymbolReference::Unsolved);
    assert_eq!(facade.solve(&unit, run).expect("no error"), SymbolReference::Unsolved);
}

/// ```java
/// package demo;
/// public enum Level { LOW, HIGH; Level next() { return HIGH; } }
/// ```
#[test]
fn test_enum_constants_are_static_fields() {
    let mut b = TreeBuilder::new();
    let low = b.enum_constant("LOW", vec![]);
    let high = b.enum_constant("HIGH", vec![]);
    let high_ref = b.name("HIGH");
    let ret = b.return_stmt(high_ref);
    let body = b.block(vec![ret]);
    let level_type = b.class_type("Level");
    let next = b.method_decl(MethodData {
        return_type: level_type,
        name: "next".to_string(),
        body,
        ..Default::default()
    });
    let level = b.enum_decl(TypeDeclData {
        modifiers: Modifiers::PUBLIC,
        name: "Level".to_string(),
        entries: vec![low, high].into(),
        members: vec![next].into(),
        ..Default::default()
    });
    let root = b.compilation_unit(Some("demo"), vec![], vec![level]);
    let unit = Arc::new(b.finish("demo/Level.java", root));
    let facade = facade(&[unit.clone()]);

    let constant: Arc<FieldDeclaration> = facade
        .resolve_declaration_as(&unit, high_ref)
        .expect("HIGH");
    assert!(constant.is_static());
    assert_eq!(constant.ty, ResolvedType::top_level("demo.Level"));

    let declared: Arc<FieldDeclaration> = facade.resolve_declaration_as(&unit, low).expect("LOW");
    assert_eq!(&*declared.name, "LOW");

    let ty: Arc<TypeDeclaration> = facade.resolve_declaration_as(&unit, level).expect("Level");
    assert!(ty.is_enum());
}
