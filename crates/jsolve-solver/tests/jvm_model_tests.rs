use super::*;
use crate::types::PrimitiveKind;

fn member(name: &str, flags: u16, descriptor: &str, signature: Option<&str>) -> JvmMember {
    JvmMember {
        name: name.to_string(),
        access: flags,
        descriptor: descriptor.to_string(),
        signature: signature.map(str::to_string),
    }
}

fn build(class: &JvmClass) -> TypeDeclaration {
    build_type_declaration(class, DeclarationOrigin::Memory).expect("declaration")
}

#[test]
fn test_internal_name_conversions() {
    assert_eq!(internal_to_binary("java/util/Map$Entry"), "java.util.Map$Entry");
    assert_eq!(internal_to_qualified("java/util/Map$Entry"), "java.util.Map.Entry");
    let entry = reference_from_internal("java/util/Map$Entry");
    assert_eq!(&*entry.qualified_name, "java.util.Map.Entry");
    assert_eq!(&*entry.binary_name, "java.util.Map$Entry");
    assert!(entry.is_raw());
}

#[test]
fn test_plain_class_from_descriptors() {
    let class = JvmClass {
        internal_name: "com/acme/Widget".to_string(),
        access: access::PUBLIC | access::FINAL,
        superclass: Some("com/acme/Base".to_string()),
        interfaces: vec!["java/lang/Runnable".to_string()],
        fields: vec![member("size", access::PRIVATE, "I", None)],
        methods: vec![
            member("<init>", access::PUBLIC, "(Ljava/lang/String;)V", None),
            member("run", access::PUBLIC, "()V", None),
            member("<clinit>", access::STATIC, "()V", None),
        ],
        ..JvmClass::default()
    };
    let decl = build(&class);

    assert_eq!(decl.kind, TypeKind::Class);
    assert!(decl.modifiers.contains(Modifiers::PUBLIC | Modifiers::FINAL));
    assert_eq!(decl.superclass.as_ref().map(|s| &*s.qualified_name), Some("com.acme.Base"));
    assert_eq!(decl.interfaces.len(), 1);
    assert_eq!(decl.fields[0].ty, ResolvedType::Primitive(PrimitiveKind::Int));
    assert!(decl.fields[0].modifiers.is_private());
    assert_eq!(decl.constructors.len(), 1);
    assert_eq!(decl.constructors[0].signature(), "Widget(java.lang.String)");
    assert_eq!(decl.methods.len(), 1, "static initializer is not a method");
    assert_eq!(decl.methods[0].return_type, ResolvedType::Void);
}

#[test]
fn test_generic_class_signature() {
    let class = JvmClass {
        internal_name: "com/acme/Box".to_string(),
        access: access::PUBLIC,
        signature: Some(
            "<T:Ljava/lang/Number;>Ljava/lang/Object;Ljava/lang/Comparable<Lcom/acme/Box<TT;>;>;"
                .to_string(),
        ),
        superclass: Some("java/lang/Object".to_string()),
        interfaces: vec!["java/lang/Comparable".to_string()],
        fields: vec![member("value", access::PUBLIC, "Ljava/lang/Number;", Some("TT;"))],
        ..JvmClass::default()
    };
    let decl = build(&class);

    assert_eq!(decl.type_parameters.len(), 1);
    let param = &decl.type_parameters[0];
    assert_eq!(&*param.name, "T");
    assert_eq!(&*param.erasure.qualified_name, "java.lang.Number");
    assert_eq!(param.owner, TypeParamOwner::Type("com.acme.Box".into()));
    assert_eq!(decl.interfaces[0].to_string(), "java.lang.Comparable<com.acme.Box<T>>");
    assert_eq!(decl.fields[0].ty, param.as_type());
}

#[test]
fn test_interface_has_no_superclass_and_default_methods() {
    let class = JvmClass {
        internal_name: "com/acme/Shape".to_string(),
        access: access::PUBLIC | access::INTERFACE | access::ABSTRACT,
        superclass: Some("java/lang/Object".to_string()),
        methods: vec![
            member("area", access::PUBLIC | access::ABSTRACT, "()D", None),
            member("describe", access::PUBLIC, "()Ljava/lang/String;", None),
            member("unit", access::PUBLIC | access::STATIC, "()Lcom/acme/Shape;", None),
        ],
        ..JvmClass::default()
    };
    let decl = build(&class);

    assert_eq!(decl.kind, TypeKind::Interface);
    assert!(decl.superclass.is_none());
    let area = &decl.methods[0];
    assert!(area.is_abstract());
    let describe = &decl.methods[1];
    assert!(describe.modifiers.contains(Modifiers::DEFAULT));
    let unit = &decl.methods[2];
    assert!(unit.is_static());
    assert!(!unit.modifiers.contains(Modifiers::DEFAULT));
}

#[test]
fn test_synthetic_and_bridge_members_are_skipped() {
    let class = JvmClass {
        internal_name: "com/acme/Name".to_string(),
        access: access::PUBLIC,
        superclass: Some("java/lang/Object".to_string()),
        fields: vec![member("this$0", access::SYNTHETIC, "Lcom/acme/Outer;", None)],
        methods: vec![
            member("compareTo", access::PUBLIC, "(Lcom/acme/Name;)I", None),
            member(
                "compareTo",
                access::PUBLIC | access::BRIDGE | access::SYNTHETIC,
                "(Ljava/lang/Object;)I",
                None,
            ),
            member("lambda$0", access::PRIVATE | access::SYNTHETIC, "()V", None),
        ],
        ..JvmClass::default()
    };
    let decl = build(&class);
    assert!(decl.fields.is_empty());
    assert_eq!(decl.methods.len(), 1);
    assert_eq!(decl.methods[0].signature(), "compareTo(com.acme.Name)");
}

#[test]
fn test_inner_class_constructor_drops_outer_instance() {
    let inner = JvmClass {
        internal_name: "com/acme/Outer$Inner".to_string(),
        access: access::PUBLIC,
        superclass: Some("java/lang/Object".to_string()),
        methods: vec![member("<init>", access::PUBLIC, "(Lcom/acme/Outer;I)V", None)],
        inner_access: Some(access::PRIVATE),
        ..JvmClass::default()
    };
    let decl = build(&inner);
    assert_eq!(&*decl.qualified_name, "com.acme.Outer.Inner");
    assert_eq!(&*decl.binary_name, "com.acme.Outer$Inner");
    assert!(decl.modifiers.is_private(), "member access wins over class access");
    assert_eq!(decl.constructors[0].signature(), "Inner(int)");

    let nested = JvmClass {
        inner_access: Some(access::PUBLIC | access::STATIC),
        methods: vec![member("<init>", access::PUBLIC, "(Lcom/acme/Outer;)V", None)],
        ..inner
    };
    let decl = build(&nested);
    assert_eq!(decl.constructors[0].parameters.len(), 1);
}

#[test]
fn test_varargs_marks_last_parameter() {
    let class = JvmClass {
        internal_name: "com/acme/Log".to_string(),
        access: access::PUBLIC,
        superclass: Some("java/lang/Object".to_string()),
        methods: vec![member(
            "info",
            access::PUBLIC | access::VARARGS,
            "(Ljava/lang/String;[Ljava/lang/Object;)V",
            None,
        )],
        ..JvmClass::default()
    };
    let decl = build(&class);
    let info = &decl.methods[0];
    assert!(info.is_varargs());
    assert!(!info.parameters[0].is_varargs);
    assert!(info.parameters[1].is_varargs);
    assert_eq!(info.signature(), "info(java.lang.String, java.lang.Object...)");
}

#[test]
fn test_generic_method_type_parameters() {
    let class = JvmClass {
        internal_name: "com/acme/Util".to_string(),
        access: access::PUBLIC,
        superclass: Some("java/lang/Object".to_string()),
        methods: vec![
            member("noop", access::PUBLIC | access::STATIC, "()V", None),
            member(
                "max",
                access::PUBLIC | access::STATIC,
                "(Ljava/util/List;)Ljava/lang/Comparable;",
                Some("<T::Ljava/lang/Comparable<-TT;>;>(Ljava/util/List<+TT;>;)TT;"),
            ),
        ],
        ..JvmClass::default()
    };
    let decl = build(&class);
    let max = &decl.methods[1];
    assert!(max.is_generic());
    let param = &max.type_parameters[0];
    assert_eq!(
        param.owner,
        TypeParamOwner::Method {
            declaring_type: "com.acme.Util".into(),
            ordinal: 1,
        }
    );
    assert_eq!(&*param.erasure.qualified_name, "java.lang.Comparable");
    assert_eq!(param.bounds[0].to_string(), "java.lang.Comparable<? super T>");
    assert_eq!(max.parameters[0].ty.to_string(), "java.util.List<? extends T>");
    assert_eq!(max.return_type, param.as_type());
}

#[test]
fn test_member_classes_become_member_types() {
    let class = JvmClass {
        internal_name: "com/acme/Outer".to_string(),
        access: access::PUBLIC,
        superclass: Some("java/lang/Object".to_string()),
        member_classes: vec!["com/acme/Outer$Inner".to_string()],
        ..JvmClass::default()
    };
    let decl = build(&class);
    assert_eq!(decl.member_type("Inner").map(|n| &**n), Some("com.acme.Outer.Inner"));
}

#[test]
fn test_annotation_and_enum_kinds() {
    let annotation = JvmClass {
        internal_name: "com/acme/Marker".to_string(),
        access: access::PUBLIC | access::ANNOTATION | access::INTERFACE | access::ABSTRACT,
        superclass: Some("java/lang/Object".to_string()),
        interfaces: vec!["java/lang/annotation/Annotation".to_string()],
        ..JvmClass::default()
    };
    assert_eq!(build(&annotation).kind, TypeKind::Annotation);

    let color = JvmClass {
        internal_name: "com/acme/Color".to_string(),
        access: access::PUBLIC | access::FINAL | access::ENUM,
        superclass: Some("java/lang/Enum".to_string()),
        ..JvmClass::default()
    };
    assert!(build(&color).is_enum());
}

#[test]
fn test_malformed_signature_is_an_error() {
    let class = JvmClass {
        internal_name: "com/acme/Broken".to_string(),
        access: access::PUBLIC,
        superclass: Some("java/lang/Object".to_string()),
        fields: vec![member("x", access::PUBLIC, "Q", None)],
        ..JvmClass::default()
    };
    assert!(build_type_declaration(&class, DeclarationOrigin::Memory).is_err());
}
