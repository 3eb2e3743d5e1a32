use super::*;

fn list_of(arg: ResolvedType) -> ResolvedType {
    ResolvedType::Reference(ReferenceType::new(
        "java.util.List",
        "java.util.List",
        vec![arg],
    ))
}

fn type_var(name: &str) -> TypeVariable {
    TypeVariable {
        name: name.into(),
        owner: TypeParamOwner::Type("java.util.List".into()),
        erasure: ReferenceType::object(),
    }
}

#[test]
fn test_describe_parameterized_and_arrays() {
    let ty = list_of(ResolvedType::string());
    assert_eq!(ty.describe(), "java.util.List<java.lang.String>");
    let array = ResolvedType::Primitive(PrimitiveKind::Int).array_of(2);
    assert_eq!(array.describe(), "int[][]");
    assert_eq!(array.array_level(), 2);
    let wildcard = ResolvedType::Wildcard(Wildcard::Extends(Box::new(ResolvedType::string())));
    assert_eq!(list_of(wildcard).describe(), "java.util.List<? extends java.lang.String>");
}

#[test]
fn test_member_type_names() {
    let map = ReferenceType::top_level("java.util.Map");
    let entry = map.member("Entry");
    assert_eq!(&*entry.qualified_name, "java.util.Map.Entry");
    assert_eq!(&*entry.binary_name, "java.util.Map$Entry");
    assert_eq!(entry.simple_name(), "Entry");
    assert_eq!(entry.package_name(), "java.util");
}

#[test]
fn test_type_variable_identity_ignores_erasure() {
    let a = type_var("E");
    let mut b = type_var("E");
    b.erasure = ReferenceType::top_level("java.lang.Number");
    assert_eq!(a, b);
    let other_owner = TypeVariable {
        owner: TypeParamOwner::Method {
            declaring_type: "java.util.List".into(),
            ordinal: 0,
        },
        ..type_var("E")
    };
    assert_ne!(a, other_owner);
}

#[test]
fn test_erasure() {
    let e = ResolvedType::TypeVariable(TypeVariable {
        erasure: ReferenceType::top_level("java.lang.Number"),
        ..type_var("E")
    });
    assert_eq!(e.erasure(), ResolvedType::top_level("java.lang.Number"));
    let list = list_of(e.clone());
    assert_eq!(list.erasure(), ResolvedType::top_level("java.util.List"));
    assert_eq!(
        ResolvedType::Array(Box::new(e)).erasure(),
        ResolvedType::top_level("java.lang.Number").array_of(1)
    );
    assert_eq!(
        ResolvedType::Wildcard(Wildcard::Unbounded).erasure(),
        ResolvedType::object()
    );
}

#[test]
fn test_boxing_helpers() {
    let integer = ResolvedType::boxed(PrimitiveKind::Int);
    assert!(integer.is_reference_named("java.lang.Integer"));
    assert_eq!(integer.unboxed(), Some(PrimitiveKind::Int));
    assert_eq!(integer.numeric_kind(), Some(PrimitiveKind::Int));
    assert!(ResolvedType::boxed(PrimitiveKind::Boolean).is_boolean_like());
    assert_eq!(ResolvedType::string().numeric_kind(), None);
}

#[test]
fn test_type_variables_are_collected_once() {
    let e = ResolvedType::TypeVariable(type_var("E"));
    let nested = list_of(list_of(e.clone()));
    let pair = ResolvedType::Intersection(vec![nested, e]);
    assert_eq!(pair.type_variables().len(), 1);
}
