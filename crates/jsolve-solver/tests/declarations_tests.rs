use super::*;
use crate::types::PrimitiveKind;

fn file_constructor() -> ConstructorDeclaration {
    ConstructorDeclaration {
        declaring_type: "java.io.File".into(),
        type_parameters: Vec::new(),
        parameters: vec![ParameterDeclaration {
            name: "pathname".into(),
            ty: ResolvedType::string(),
            is_varargs: false,
            origin: DeclarationOrigin::Runtime,
        }],
        modifiers: Modifiers::PUBLIC,
        origin: DeclarationOrigin::Runtime,
    }
}

fn delete_method() -> MethodDeclaration {
    MethodDeclaration {
        name: "delete".into(),
        declaring_type: "java.io.File".into(),
        type_parameters: Vec::new(),
        parameters: Vec::new(),
        return_type: ResolvedType::Primitive(PrimitiveKind::Boolean),
        modifiers: Modifiers::PUBLIC,
        origin: DeclarationOrigin::Runtime,
    }
}

#[test]
fn test_constructor_signatures() {
    let ctor = file_constructor();
    assert_eq!(ctor.name(), "File");
    assert_eq!(ctor.signature(), "File(java.lang.String)");
    assert_eq!(ctor.qualified_signature(), "java.io.File.File(java.lang.String)");
    assert_eq!(ctor.to_descriptor(), "(Ljava/lang/String;)V");
}

#[test]
fn test_method_signatures() {
    let method = delete_method();
    assert_eq!(method.signature(), "delete()");
    assert_eq!(method.qualified_signature(), "java.io.File.delete()");
    assert_eq!(method.to_descriptor(), "()Z");
}

#[test]
fn test_varargs_parameter_renders_with_ellipsis() {
    let method = MethodDeclaration {
        name: "format".into(),
        declaring_type: "java.lang.String".into(),
        parameters: vec![
            ParameterDeclaration {
                name: "format".into(),
                ty: ResolvedType::string(),
                is_varargs: false,
                origin: DeclarationOrigin::Runtime,
            },
            ParameterDeclaration {
                name: "args".into(),
                ty: ResolvedType::object().array_of(1),
                is_varargs: true,
                origin: DeclarationOrigin::Runtime,
            },
        ],
        return_type: ResolvedType::string(),
        modifiers: Modifiers::PUBLIC | Modifiers::STATIC,
        ..delete_method()
    };
    assert!(method.is_varargs());
    assert_eq!(
        method.signature(),
        "format(java.lang.String, java.lang.Object...)"
    );
    assert_eq!(
        method.to_descriptor(),
        "(Ljava/lang/String;[Ljava/lang/Object;)Ljava/lang/String;"
    );
}

#[test]
fn test_declarations_equal_by_signature_regardless_of_origin() {
    let runtime = ResolvedDeclaration::Method(Arc::new(delete_method()));
    let memory = ResolvedDeclaration::Method(Arc::new(MethodDeclaration {
        origin: DeclarationOrigin::Memory,
        ..delete_method()
    }));
    assert_eq!(runtime, memory);
    let ctor = ResolvedDeclaration::Constructor(Arc::new(file_constructor()));
    assert_ne!(runtime, ctor);
}

#[test]
fn test_resolved_declaration_accessors() {
    let field = ResolvedDeclaration::Field(Arc::new(FieldDeclaration {
        name: "separator".into(),
        declaring_type: "java.io.File".into(),
        ty: ResolvedType::string(),
        modifiers: Modifiers::PUBLIC | Modifiers::STATIC,
        origin: DeclarationOrigin::Runtime,
    }));
    assert_eq!(field.name(), "separator");
    assert_eq!(field.signature(), "separator");
    assert_eq!(field.qualified_signature(), "java.io.File.separator");
    assert_eq!(field.declaring_type().map(|s| &**s), Some("java.io.File"));
    assert_eq!(field.value_type(), Some(&ResolvedType::string()));
    assert_eq!(field.to_descriptor().as_deref(), Some("Ljava/lang/String;"));
    assert!(Arc::<FieldDeclaration>::extract(field.clone()).is_some());
    assert!(Arc::<MethodDeclaration>::extract(field).is_none());
}

#[test]
fn test_type_declaration_declared_type_uses_own_variables() {
    let mut decl = TypeDeclaration::new(
        "a.Box",
        "a.Box",
        TypeKind::Class,
        DeclarationOrigin::Memory,
    );
    decl.type_parameters.push(TypeParameterDeclaration {
        name: "T".into(),
        owner: TypeParamOwner::Type("a.Box".into()),
        bounds: Vec::new(),
        erasure: ReferenceType::object(),
        origin: DeclarationOrigin::Memory,
    });
    assert_eq!(decl.declared_type().describe(), "a.Box<T>");
    assert!(decl.raw_type().is_raw());
    assert_eq!(decl.name(), "Box");
}
