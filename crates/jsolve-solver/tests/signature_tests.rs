use super::*;

fn class(name: &str, args: Vec<SigTypeArg>) -> SigType {
    SigType::Class(ClassSig {
        internal_name: name.to_string(),
        type_arguments: args,
    })
}

#[test]
fn test_plain_method_descriptor() {
    let sig = parse_method_signature("(Ljava/lang/String;I[J)V").expect("descriptor");
    assert!(sig.type_parameters.is_empty());
    assert_eq!(
        sig.parameters,
        vec![
            class("java/lang/String", vec![]),
            SigType::Base(PrimitiveKind::Int),
            SigType::Array(Box::new(SigType::Base(PrimitiveKind::Long))),
        ]
    );
    assert_eq!(sig.return_type, SigType::Void);
}

#[test]
fn test_generic_method_signature() {
    let sig = parse_method_signature(
        "<R:Ljava/lang/Object;>(Ljava/util/function/Function<-TT;+TR;>;)Ljava/util/Optional<TR;>;",
    )
    .expect("signature");
    assert_eq!(sig.type_parameters.len(), 1);
    assert_eq!(sig.type_parameters[0].name, "R");
    assert_eq!(
        sig.parameters[0],
        class(
            "java/util/function/Function",
            vec![
                SigTypeArg::Super(SigType::TypeVar("T".into())),
                SigTypeArg::Extends(SigType::TypeVar("R".into())),
            ]
        )
    );
    assert_eq!(
        sig.return_type,
        class(
            "java/util/Optional",
            vec![SigTypeArg::Exact(SigType::TypeVar("R".into()))]
        )
    );
}

#[test]
fn test_class_signature_with_interface_only_bound() {
    let sig = parse_class_signature(
        "<E:Ljava/lang/Enum<TE;>;>Ljava/lang/Object;Ljava/lang/Comparable<TE;>;Ljava/io/Serializable;",
    )
    .expect("signature");
    assert_eq!(sig.type_parameters[0].name, "E");
    assert!(sig.type_parameters[0].class_bound.is_some());
    assert_eq!(sig.superclass.internal_name, "java/lang/Object");
    assert_eq!(sig.interfaces.len(), 2);

    let bounded = parse_class_signature("<T::Ljava/lang/Comparable<-TT;>;>Ljava/lang/Object;")
        .expect("signature");
    let param = &bounded.type_parameters[0];
    assert!(param.class_bound.is_none());
    assert_eq!(param.interface_bounds.len(), 1);
    assert_eq!(param.bounds().count(), 1);
}

#[test]
fn test_inner_class_suffix_and_wildcards() {
    let ty = parse_field_signature("Ljava/util/Map<TK;TV;>.Entry<TK;*>;").expect("signature");
    assert_eq!(
        ty,
        class(
            "java/util/Map$Entry",
            vec![
                SigTypeArg::Exact(SigType::TypeVar("K".into())),
                SigTypeArg::Any
            ]
        )
    );
}

#[test]
fn test_throws_clause() {
    let sig = parse_method_signature("()V^Ljava/io/IOException;").expect("signature");
    assert_eq!(sig.throws.len(), 1);
}

#[test]
fn test_malformed_signatures_are_configuration_errors() {
    let err = parse_field_signature("Ljava/lang/String").expect_err("missing semicolon");
    assert_eq!(err.code(), "configuration");
    assert!(parse_method_signature("(I").is_err());
    assert!(parse_field_signature("IX").is_err());
    assert!(parse_field_signature("Q").is_err());
}

#[test]
fn test_nesting_limit() {
    let deep = format!("{}I", "[".repeat(200));
    assert!(parse_field_signature(&deep).is_err());
    let shallow = format!("{}I", "[".repeat(3));
    assert!(parse_field_signature(&shallow).is_ok());
}
