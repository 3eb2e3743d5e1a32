use super::*;
use crate::solvers::RuntimeTypeSolver;
use crate::types::{PrimitiveKind, TypeParamOwner, TypeVariable};

fn prim(kind: PrimitiveKind) -> ResolvedType {
    ResolvedType::Primitive(kind)
}

fn class(name: &str) -> ResolvedType {
    ResolvedType::top_level(name)
}

fn generic(name: &str, args: Vec<ResolvedType>) -> ResolvedType {
    ReferenceType::top_level(name).with_arguments(args).into()
}

fn check(source: &ResolvedType, target: &ResolvedType, mode: ConversionMode) -> bool {
    let solver = RuntimeTypeSolver::new().expect("built-in catalog");
    let relations = TypeRelations::new(Hierarchy::new(&solver));
    relations.is_assignable(source, target, mode).expect("relation")
}

#[test]
fn test_primitive_widening() {
    use PrimitiveKind::*;
    assert!(check(&prim(Int), &prim(Long), ConversionMode::Strict));
    assert!(check(&prim(Char), &prim(Int), ConversionMode::Strict));
    assert!(!check(&prim(Long), &prim(Int), ConversionMode::Strict));
    assert!(!check(&prim(Boolean), &prim(Int), ConversionMode::Loose));
}

#[test]
fn test_boxing_requires_loose() {
    let int = prim(PrimitiveKind::Int);
    let integer = class("java.lang.Integer");
    assert!(!check(&int, &integer, ConversionMode::Strict));
    assert!(check(&int, &integer, ConversionMode::Loose));
    assert!(check(&int, &ResolvedType::object(), ConversionMode::Loose));
    assert!(check(&int, &class("java.lang.Number"), ConversionMode::Loose));
    assert!(!check(&int, &class("java.lang.Long"), ConversionMode::Loose));
}

#[test]
fn test_unboxing_then_widening() {
    let integer = class("java.lang.Integer");
    assert!(check(&integer, &prim(PrimitiveKind::Long), ConversionMode::Loose));
    assert!(!check(&integer, &prim(PrimitiveKind::Long), ConversionMode::Strict));
    assert!(!check(&integer, &prim(PrimitiveKind::Short), ConversionMode::Loose));
}

#[test]
fn test_null_converts_to_references_only() {
    assert!(check(&ResolvedType::Null, &ResolvedType::string(), ConversionMode::Strict));
    assert!(check(
        &ResolvedType::Null,
        &ResolvedType::string().array_of(1),
        ConversionMode::Strict
    ));
    assert!(!check(&ResolvedType::Null, &prim(PrimitiveKind::Int), ConversionMode::Loose));
}

#[test]
fn test_parameterized_subtyping() {
    let string = ResolvedType::string();
    let array_list = generic("java.util.ArrayList", vec![string.clone()]);
    assert!(check(&array_list, &generic("java.util.List", vec![string.clone()]), ConversionMode::Strict));
    assert!(check(&array_list, &generic("java.lang.Iterable", vec![string.clone()]), ConversionMode::Strict));
    assert!(!check(
        &array_list,
        &generic("java.util.List", vec![ResolvedType::object()]),
        ConversionMode::Strict
    ));
    assert!(!check(&array_list, &generic("java.util.Set", vec![string]), ConversionMode::Strict));
}

#[test]
fn test_wildcard_containment() {
    let string_list = generic("java.util.List", vec![ResolvedType::string()]);
    let extends_char_seq = generic(
        "java.util.List",
        vec![ResolvedType::Wildcard(Wildcard::Extends(Box::new(class("java.lang.CharSequence"))))],
    );
    let super_string = generic(
        "java.util.List",
        vec![ResolvedType::Wildcard(Wildcard::Super(Box::new(ResolvedType::string())))],
    );
    let unbounded = generic("java.util.List", vec![ResolvedType::Wildcard(Wildcard::Unbounded)]);
    assert!(check(&string_list, &extends_char_seq, ConversionMode::Strict));
    assert!(check(&string_list, &super_string, ConversionMode::Strict));
    assert!(check(&string_list, &unbounded, ConversionMode::Strict));

    let object_list = generic("java.util.List", vec![ResolvedType::object()]);
    assert!(check(&object_list, &super_string, ConversionMode::Strict));
    assert!(!check(&object_list, &extends_char_seq, ConversionMode::Strict));
}

#[test]
fn test_raw_conversions_are_unchecked() {
    let raw_list = class("java.util.List");
    let string_list = generic("java.util.List", vec![ResolvedType::string()]);
    assert!(check(&string_list, &raw_list, ConversionMode::Strict));
    assert!(check(&class("java.util.ArrayList"), &string_list, ConversionMode::Strict));
}

#[test]
fn test_array_relations() {
    let strings = ResolvedType::string().array_of(1);
    let objects = ResolvedType::object().array_of(1);
    let ints = prim(PrimitiveKind::Int).array_of(1);
    let longs = prim(PrimitiveKind::Long).array_of(1);
    assert!(check(&strings, &objects, ConversionMode::Strict));
    assert!(!check(&objects, &strings, ConversionMode::Strict));
    assert!(!check(&ints, &longs, ConversionMode::Loose));
    assert!(check(&ints, &ResolvedType::object(), ConversionMode::Strict));
    assert!(check(&ints, &class("java.lang.Cloneable"), ConversionMode::Strict));
    assert!(!check(&ints, &ResolvedType::string(), ConversionMode::Strict));
}

#[test]
fn test_type_variable_converts_through_erasure() {
    let t = ResolvedType::TypeVariable(TypeVariable {
        name: "T".into(),
        owner: TypeParamOwner::Type("p.Box".into()),
        erasure: ReferenceType::top_level("java.lang.Number"),
    });
    assert!(check(&t, &class("java.lang.Number"), ConversionMode::Strict));
    assert!(check(&t, &ResolvedType::object(), ConversionMode::Strict));
    assert!(!check(&class("java.lang.Integer"), &t, ConversionMode::Strict));
    assert!(check(&t, &t.clone(), ConversionMode::Strict));
}

#[test]
fn test_void_never_converts() {
    assert!(!check(&ResolvedType::Void, &ResolvedType::object(), ConversionMode::Loose));
}
