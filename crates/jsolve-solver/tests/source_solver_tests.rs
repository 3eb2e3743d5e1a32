//! Declarations built from syntax trees, resolved through a source +
//! runtime chain.

use jsolve_solver::solvers::{TypeNameQualifier, binary_name_of, qualified_name_of};
use jsolve_solver::{
    CombinedTypeSolver, DeclarationOrigin, ResolvedType, RuntimeTypeSolver, SourceTypeSolver,
    TypeKind, TypeParamOwner, TypeSolver,
};
use jsolve_syntax::{MethodData, Modifiers, NodeIndex, SourceUnit, TreeBuilder, TypeDeclData};
use std::sync::Arc;

/// ```java
/// package com.acme;
/// public enum Color { RED, GREEN }
/// ```
fn color_unit() -> SourceUnit {
    let mut b = TreeBuilder::new();
    let red = b.enum_constant("RED", vec![]);
    let green = b.enum_constant("GREEN", vec![]);
    let color = b.enum_decl(TypeDeclData {
        modifiers: Modifiers::PUBLIC,
        name: "Color".to_string(),
        entries: vec![red, green].into(),
        ..Default::default()
    });
    let root = b.compilation_unit(Some("com.acme"), vec![], vec![color]);
    b.finish("com/acme/Color.java", root)
}

/// ```java
/// package com.acme;
/// import java.util.List;
/// import java.util.*;
/// public class Shapes<T extends Comparable<T>> {
///     private List<String> names;
///     private Map<String, Color> colors;
///     public static class Node {}
///     public interface Visitor { void visit(Node n); }
///     public Shapes(int size) {}
///     public <U> U pick(U first, String... rest) { return first; }
/// }
/// ```
fn shapes_unit() -> (SourceUnit, NodeIndex) {
    let mut b = TreeBuilder::new();
    let list_import = b.import("java.util.List", false);
    let util_import = b.import("java.util.*", false);

    let t_arg = b.class_type("T");
    let bound = b.generic_type("Comparable", vec![t_arg]);
    let t = b.type_param("T", vec![bound]);

    let string = b.class_type("String");
    let names_ty = b.generic_type("List", vec![string]);
    let names = b.field(Modifiers::PRIVATE, names_ty, &[("names", NodeIndex::NONE)]);

    let key = b.class_type("String");
    let value = b.class_type("Color");
    let colors_ty = b.generic_type("Map", vec![key, value]);
    let colors = b.field(Modifiers::PRIVATE, colors_ty, &[("colors", NodeIndex::NONE)]);

    let node = b.class_decl(TypeDeclData {
        modifiers: Modifiers::PUBLIC | Modifiers::STATIC,
        name: "Node".to_string(),
        ..Default::default()
    });

    let void = b.void_type();
    let node_ty = b.class_type("Node");
    let n = b.param(node_ty, "n");
    let visit = b.method_decl(MethodData {
        return_type: void,
        name: "visit".to_string(),
        parameters: vec![n].into(),
        ..Default::default()
    });
    let visitor = b.interface("Visitor", vec![visit]);

    let int = b.int_type();
    let size = b.param(int, "size");
    let ctor_body = b.block(vec![]);
    let ctor = b.constructor("Shapes", vec![size], ctor_body);

    let u = b.type_param("U", vec![]);
    let u_ret = b.class_type("U");
    let u_param_ty = b.class_type("U");
    let first = b.param(u_param_ty, "first");
    let rest_ty = b.class_type("String");
    let rest = b.varargs_param(rest_ty, "rest");
    let first_ref = b.name("first");
    let ret = b.return_stmt(first_ref);
    let pick_body = b.block(vec![ret]);
    let pick = b.method_decl(MethodData {
        modifiers: Modifiers::PUBLIC,
        type_parameters: vec![u].into(),
        return_type: u_ret,
        name: "pick".to_string(),
        parameters: vec![first, rest].into(),
        body: pick_body,
    });

    let shapes = b.class_decl(TypeDeclData {
        modifiers: Modifiers::PUBLIC,
        name: "Shapes".to_string(),
        type_parameters: vec![t].into(),
        members: vec![names, colors, node, visitor, ctor, pick].into(),
        ..Default::default()
    });
    let root = b.compilation_unit(Some("com.acme"), vec![list_import, util_import], vec![shapes]);
    (b.finish("com/acme/Shapes.java", root), shapes)
}

/// ```java
/// class Plain {
///     Missing ghost;
///     void run() { class Local {} }
/// }
/// ```
fn plain_unit() -> (SourceUnit, NodeIndex, NodeIndex) {
    let mut b = TreeBuilder::new();
    let missing = b.class_type("Missing");
    let ghost = b.field(Modifiers::empty(), missing, &[("ghost", NodeIndex::NONE)]);
    let local = b.class("Local", vec![]);
    let body = b.block(vec![local]);
    let void = b.void_type();
    let run = b.method(void, "run", vec![], body);
    let plain = b.class("Plain", vec![ghost, run]);
    let root = b.compilation_unit(None, vec![], vec![plain]);
    (b.finish("Plain.java", root), missing, local)
}

struct Fixture {
    source: Arc<SourceTypeSolver>,
    chain: Arc<CombinedTypeSolver>,
}

fn fixture(units: Vec<SourceUnit>) -> Fixture {
    let source = Arc::new(SourceTypeSolver::new(units.into_iter().map(Arc::new).collect()));
    let runtime: Arc<dyn TypeSolver> = Arc::new(RuntimeTypeSolver::new().expect("runtime"));
    let chain = CombinedTypeSolver::new(vec![source.clone() as Arc<dyn TypeSolver>, runtime])
        .expect("chain");
    Fixture { source, chain }
}

#[test]
fn test_enum_gets_implicit_members() {
    let fx = fixture(vec![color_unit()]);
    let color = fx.chain.solve_type("com.acme.Color").expect("Color");

    assert_eq!(color.kind, TypeKind::Enum);
    assert_eq!(
        color.superclass.as_ref().map(ToString::to_string).as_deref(),
        Some("java.lang.Enum<com.acme.Color>")
    );
    let constants: Vec<&str> = color.fields.iter().map(|f| &*f.name).collect();
    assert_eq!(constants, ["RED", "GREEN"]);
    for field in &color.fields {
        assert!(field.modifiers.contains(Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL));
        assert_eq!(field.ty, ResolvedType::top_level("com.acme.Color"));
    }

    let values = color.methods_named("values").next().expect("values()");
    assert!(values.is_static());
    assert_eq!(values.return_type.to_string(), "com.acme.Color[]");
    let value_of = color.methods_named("valueOf").next().expect("valueOf()");
    assert_eq!(value_of.signature(), "valueOf(java.lang.String)");

    assert_eq!(color.constructors.len(), 1);
    assert!(color.constructors[0].modifiers.is_private());
}

#[test]
fn test_class_members_are_qualified_through_imports() {
    let (shapes_unit, _) = shapes_unit();
    let fx = fixture(vec![color_unit(), shapes_unit]);
    let shapes = fx.chain.solve_type("com.acme.Shapes").expect("Shapes");

    assert!(shapes.superclass.as_ref().is_some_and(|s| s.is_object()));
    let t = &shapes.type_parameters[0];
    assert_eq!(&*t.name, "T");
    assert_eq!(&*t.erasure.qualified_name, "java.lang.Comparable");
    assert_eq!(t.bounds[0].to_string(), "java.lang.Comparable<T>");

    let names = shapes.field("names").expect("names");
    assert_eq!(names.ty.to_string(), "java.util.List<java.lang.String>");
    assert!(names.modifiers.is_private());
    let colors = shapes.field("colors").expect("colors");
    assert_eq!(colors.ty.to_string(), "java.util.Map<java.lang.String, com.acme.Color>");

    assert_eq!(shapes.constructors.len(), 1);
    assert_eq!(shapes.constructors[0].signature(), "Shapes(int)");
}

#[test]
fn test_generic_method_and_varargs() {
    let (shapes_unit, _) = shapes_unit();
    let fx = fixture(vec![color_unit(), shapes_unit]);
    let shapes = fx.chain.solve_type("com.acme.Shapes").expect("Shapes");
    let pick = shapes.methods_named("pick").next().expect("pick");

    assert_eq!(pick.signature(), "pick(U, java.lang.String...)");
    assert!(pick.is_varargs());
    let u = &pick.type_parameters[0];
    assert_eq!(
        u.owner,
        TypeParamOwner::Method {
            declaring_type: "com.acme.Shapes".into(),
            ordinal: 5,
        }
    );
    assert!(u.erasure.is_object());
    assert_eq!(pick.return_type, u.as_type());
}

#[test]
fn test_member_types_use_binary_names() {
    let (shapes_unit, _) = shapes_unit();
    let fx = fixture(vec![color_unit(), shapes_unit]);
    let shapes = fx.chain.solve_type("com.acme.Shapes").expect("Shapes");
    assert_eq!(shapes.member_type("Node").map(|n| &**n), Some("com.acme.Shapes.Node"));
    assert!(shapes.member_type("Visitor").is_some());

    let node = fx.chain.solve_type("com.acme.Shapes.Node").expect("Node");
    assert_eq!(&*node.binary_name, "com.acme.Shapes$Node");
    assert!(node.modifiers.is_static());

    let visitor = fx.chain.solve_type("com.acme.Shapes.Visitor").expect("Visitor");
    assert_eq!(visitor.kind, TypeKind::Interface);
    assert!(visitor.modifiers.contains(Modifiers::STATIC | Modifiers::ABSTRACT));
    assert!(visitor.constructors.is_empty());
    let visit = visitor.methods_named("visit").next().expect("visit");
    assert!(visit.is_abstract());
    assert!(visit.modifiers.contains(Modifiers::PUBLIC));
    assert_eq!(visit.signature(), "visit(com.acme.Shapes.Node)");

    assert_eq!(
        &*binary_name_of(fx.chain.as_ref(), "com.acme.Shapes.Node"),
        "com.acme.Shapes$Node"
    );
}

#[test]
fn test_origin_points_at_declaration_node() {
    let (shapes_unit, shapes_node) = shapes_unit();
    let fx = fixture(vec![shapes_unit]);
    let shapes = fx.chain.solve_type("com.acme.Shapes").expect("Shapes");
    let node_ref = fx.source.type_node_of("com.acme.Shapes").expect("indexed");
    assert_eq!(node_ref.node, shapes_node);
    assert_eq!(shapes.origin, DeclarationOrigin::Source(node_ref));
    assert!(fx.source.unit(node_ref.file).is_some());
}

#[test]
fn test_default_constructor_and_lenient_names() {
    let (plain, _, _) = plain_unit();
    let fx = fixture(vec![plain]);
    let decl = fx.chain.solve_type("Plain").expect("Plain");

    assert_eq!(decl.constructors.len(), 1);
    assert!(decl.constructors[0].parameters.is_empty());
    assert!(decl.constructors[0].modifiers.contains(Modifiers::PUBLIC));

    let ghost = decl.field("ghost").expect("ghost");
    assert_eq!(ghost.ty.to_string(), "Missing");
}

#[test]
fn test_semantic_qualifier_rejects_unknown_names() {
    let (plain, missing, _) = plain_unit();
    let fx = fixture(vec![plain]);
    let unit = fx.source.units()[0].clone();
    let qualifier = TypeNameQualifier::semantic(fx.chain.as_ref(), &unit);
    let err = qualifier.resolve_type(missing).unwrap_err();
    assert!(err.is_unsolved());
    assert!(err.to_string().contains("Missing"));
}

#[test]
fn test_qualifier_reads_member_and_fully_qualified_names() {
    let (shapes_unit, shapes_node) = shapes_unit();
    let fx = fixture(vec![color_unit(), shapes_unit]);
    let unit = fx.source.units()[1].clone();
    let qualifier = TypeNameQualifier::semantic(fx.chain.as_ref(), &unit);

    let entry = qualifier
        .qualify("Map.Entry", shapes_node)
        .expect("qualify")
        .expect("Map.Entry");
    assert_eq!(&*entry.qualified_name, "java.util.Map.Entry");
    assert_eq!(&*entry.binary_name, "java.util.Map$Entry");

    let full = qualifier
        .qualify("java.util.Map.Entry", shapes_node)
        .expect("qualify")
        .expect("java.util.Map.Entry");
    assert_eq!(full, entry);

    let color = qualifier.qualify("Color", shapes_node).expect("qualify").expect("Color");
    assert_eq!(&*color.qualified_name, "com.acme.Color");
    assert!(qualifier.qualify("Nowhere", shapes_node).expect("qualify").is_none());
}

#[test]
fn test_local_classes_are_not_indexed() {
    let (plain, _, local) = plain_unit();
    assert!(qualified_name_of(&plain, local).is_none());
    let fx = fixture(vec![plain]);
    assert!(!fx.chain.has_type("Local"));
    assert!(!fx.chain.has_type("Plain.Local"));
}

#[test]
fn test_first_declaration_wins_across_units() {
    let mut b = TreeBuilder::new();
    let dup = b.class("Color", vec![]);
    let root = b.compilation_unit(Some("com.acme"), vec![], vec![dup]);
    let duplicate = b.finish("com/acme/Other.java", root);

    let fx = fixture(vec![color_unit(), duplicate]);
    let color = fx.chain.solve_type("com.acme.Color").expect("Color");
    assert_eq!(color.kind, TypeKind::Enum);
}

#[test]
fn test_source_declarations_are_cached() {
    let fx = fixture(vec![color_unit()]);
    let first = fx.chain.solve_type("com.acme.Color").expect("Color");
    let second = fx.source.solve_type("com.acme.Color").expect("Color");
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_concurrent_first_lookups_share_one_declaration() {
    let fx = fixture(vec![color_unit()]);
    let found: Vec<_> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..16)
            .map(|_| scope.spawn(|| fx.chain.solve_type("com.acme.Color").expect("Color")))
            .collect();
        workers.into_iter().map(|w| w.join().expect("worker")).collect()
    });
    assert!(found.iter().all(|decl| Arc::ptr_eq(decl, &found[0])));
    let direct = fx.source.solve_type("com.acme.Color").expect("Color");
    assert!(Arc::ptr_eq(&found[0], &direct));
}
