use super::*;
use crate::types::{PrimitiveKind, ReferenceType, TypeParamOwner, TypeVariable};

#[test]
fn test_primitive_and_array_descriptors() {
    let int = ResolvedType::Primitive(PrimitiveKind::Int);
    assert_eq!(type_descriptor(&int), "I");
    assert_eq!(type_descriptor(&int.clone().array_of(2)), "[[I");
    assert_eq!(
        type_descriptor(&ResolvedType::Primitive(PrimitiveKind::Long)),
        "J"
    );
    assert_eq!(
        type_descriptor(&ResolvedType::Primitive(PrimitiveKind::Boolean)),
        "Z"
    );
}

#[test]
fn test_nested_type_uses_binary_name() {
    let entry = ReferenceType::top_level("java.util.Map").member("Entry");
    assert_eq!(
        type_descriptor(&ResolvedType::Reference(entry)),
        "Ljava/util/Map$Entry;"
    );
}

#[test]
fn test_type_variable_uses_erasure() {
    let t = ResolvedType::TypeVariable(TypeVariable {
        name: "T".into(),
        owner: TypeParamOwner::Type("a.Box".into()),
        erasure: ReferenceType::top_level("java.lang.Number"),
    });
    assert_eq!(type_descriptor(&t), "Ljava/lang/Number;");
}

#[test]
fn test_method_descriptor() {
    let params = vec![
        ResolvedType::string(),
        ResolvedType::Primitive(PrimitiveKind::Int),
    ];
    assert_eq!(
        method_descriptor(&params, &ResolvedType::Void),
        "(Ljava/lang/String;I)V"
    );
    assert_eq!(
        method_descriptor(&[], &ResolvedType::Primitive(PrimitiveKind::Boolean)),
        "()Z"
    );
}
