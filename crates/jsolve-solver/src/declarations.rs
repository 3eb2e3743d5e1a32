//! Resolved declaration model.
//!
//! Declarations refer to each other by qualified name, never by pointer: a
//! method knows the qualified name of its declaring type, a type knows the
//! qualified names of its member types. The declaring type is obtained again
//! through the solver chain when needed.

use crate::descriptor;
use crate::types::{ReferenceType, ResolvedType, TypeParamOwner, TypeVariable, simple_name};
use jsolve_syntax::{Modifiers, NodeRef};
use std::path::Path;
use std::sync::Arc;

/// Where a declaration was obtained from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationOrigin {
    Source(NodeRef),
    ClassFile(Arc<Path>),
    Runtime,
    Memory,
}

impl DeclarationOrigin {
    pub fn source_node(&self) -> Option<NodeRef> {
        match self {
            Self::Source(node) => Some(*node),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParameterDeclaration {
    pub name: Arc<str>,
    pub owner: TypeParamOwner,
    pub bounds: Vec<ResolvedType>,
    /// Raw leftmost bound, `java.lang.Object` when unbounded.
    pub erasure: ReferenceType,
    pub origin: DeclarationOrigin,
}

impl TypeParameterDeclaration {
    pub fn as_type_variable(&self) -> TypeVariable {
        TypeVariable {
            name: self.name.clone(),
            owner: self.owner.clone(),
            erasure: self.erasure.clone(),
        }
    }

    pub fn as_type(&self) -> ResolvedType {
        ResolvedType::TypeVariable(self.as_type_variable())
    }

    pub fn declaring_type(&self) -> &Arc<str> {
        match &self.owner {
            TypeParamOwner::Type(name) => name,
            TypeParamOwner::Method { declaring_type, .. } => declaring_type,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterDeclaration {
    pub name: Arc<str>,
    /// For a variadic parameter, the array type.
    pub ty: ResolvedType,
    pub is_varargs: bool,
    pub origin: DeclarationOrigin,
}

impl ParameterDeclaration {
    /// Parameter type as written in a signature: `T...` for variadics.
    pub fn describe_type(&self) -> String {
        match (&self.ty, self.is_varargs) {
            (ResolvedType::Array(component), true) => format!("{component}..."),
            (ty, _) => ty.describe(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub name: Arc<str>,
    pub declaring_type: Arc<str>,
    pub ty: ResolvedType,
    pub modifiers: Modifiers,
    pub origin: DeclarationOrigin,
}

impl FieldDeclaration {
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    pub fn to_descriptor(&self) -> String {
        descriptor::type_descriptor(&self.ty)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDeclaration {
    pub name: Arc<str>,
    pub declaring_type: Arc<str>,
    pub type_parameters: Vec<TypeParameterDeclaration>,
    pub parameters: Vec<ParameterDeclaration>,
    pub return_type: ResolvedType,
    pub modifiers: Modifiers,
    pub origin: DeclarationOrigin,
}

impl MethodDeclaration {
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, describe_parameters(&self.parameters))
    }

    pub fn qualified_signature(&self) -> String {
        format!("{}.{}", self.declaring_type, self.signature())
    }

    pub fn parameter_types(&self) -> Vec<ResolvedType> {
        self.parameters.iter().map(|p| p.ty.clone()).collect()
    }

    pub fn is_varargs(&self) -> bool {
        self.parameters.last().is_some_and(|p| p.is_varargs)
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract()
    }

    pub fn is_generic(&self) -> bool {
        !self.type_parameters.is_empty()
    }

    pub fn to_descriptor(&self) -> String {
        descriptor::method_descriptor(&self.parameter_types(), &self.return_type)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorDeclaration {
    pub declaring_type: Arc<str>,
    pub type_parameters: Vec<TypeParameterDeclaration>,
    pub parameters: Vec<ParameterDeclaration>,
    pub modifiers: Modifiers,
    pub origin: DeclarationOrigin,
}

impl ConstructorDeclaration {
    /// Simple name of the declaring type.
    pub fn name(&self) -> &str {
        simple_name(&self.declaring_type)
    }

    pub fn signature(&self) -> String {
        format!("{}({})", self.name(), describe_parameters(&self.parameters))
    }

    pub fn qualified_signature(&self) -> String {
        format!("{}.{}", self.declaring_type, self.signature())
    }

    pub fn parameter_types(&self) -> Vec<ResolvedType> {
        self.parameters.iter().map(|p| p.ty.clone()).collect()
    }

    pub fn is_varargs(&self) -> bool {
        self.parameters.last().is_some_and(|p| p.is_varargs)
    }

    pub fn to_descriptor(&self) -> String {
        descriptor::method_descriptor(&self.parameter_types(), &ResolvedType::Void)
    }
}

/// Local variables, pattern bindings, catch parameters and for-each
/// variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalVariableDeclaration {
    pub name: Arc<str>,
    pub ty: ResolvedType,
    pub origin: NodeRef,
}

#[derive(Clone, Debug)]
pub struct TypeDeclaration {
    pub qualified_name: Arc<str>,
    pub binary_name: Arc<str>,
    pub kind: TypeKind,
    pub modifiers: Modifiers,
    pub type_parameters: Vec<TypeParameterDeclaration>,
    /// `None` for interfaces and for `java.lang.Object`.
    pub superclass: Option<ReferenceType>,
    pub interfaces: Vec<ReferenceType>,
    pub fields: Vec<Arc<FieldDeclaration>>,
    pub methods: Vec<Arc<MethodDeclaration>>,
    pub constructors: Vec<Arc<ConstructorDeclaration>>,
    /// Qualified names of directly declared member types.
    pub member_types: Vec<Arc<str>>,
    pub origin: DeclarationOrigin,
}

impl PartialEq for TypeDeclaration {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name == other.qualified_name
    }
}

impl Eq for TypeDeclaration {}

impl TypeDeclaration {
    /// An empty declaration of the given kind; builders fill in members.
    pub fn new(
        qualified_name: impl Into<Arc<str>>,
        binary_name: impl Into<Arc<str>>,
        kind: TypeKind,
        origin: DeclarationOrigin,
    ) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            binary_name: binary_name.into(),
            kind,
            modifiers: Modifiers::PUBLIC,
            type_parameters: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            member_types: Vec::new(),
            origin,
        }
    }

    pub fn name(&self) -> &str {
        simple_name(&self.qualified_name)
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Annotation)
    }

    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    pub fn is_generic(&self) -> bool {
        !self.type_parameters.is_empty()
    }

    /// The raw type.
    pub fn raw_type(&self) -> ReferenceType {
        ReferenceType::new(
            self.qualified_name.clone(),
            self.binary_name.clone(),
            Vec::new(),
        )
    }

    /// The type as seen from inside its body: parameterized by its own type
    /// variables.
    pub fn declared_type(&self) -> ReferenceType {
        self.raw_type().with_arguments(
            self.type_parameters
                .iter()
                .map(TypeParameterDeclaration::as_type)
                .collect(),
        )
    }

    /// Direct supertypes: the superclass (if any) followed by interfaces.
    pub fn direct_supertypes(&self) -> impl Iterator<Item = &ReferenceType> + '_ {
        self.superclass.iter().chain(self.interfaces.iter())
    }

    pub fn field(&self, name: &str) -> Option<&Arc<FieldDeclaration>> {
        self.fields.iter().find(|f| &*f.name == name)
    }

    pub fn methods_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Arc<MethodDeclaration>> + 'a {
        self.methods.iter().filter(move |m| &*m.name == name)
    }

    pub fn type_parameter(&self, name: &str) -> Option<&TypeParameterDeclaration> {
        self.type_parameters.iter().find(|p| &*p.name == name)
    }

    pub fn member_type(&self, simple: &str) -> Option<&Arc<str>> {
        self.member_types
            .iter()
            .find(|qualified| simple_name(qualified) == simple)
    }
}

/// A declaration produced by resolution.
#[derive(Clone, Debug)]
pub enum ResolvedDeclaration {
    Type(Arc<TypeDeclaration>),
    Method(Arc<MethodDeclaration>),
    Constructor(Arc<ConstructorDeclaration>),
    Field(Arc<FieldDeclaration>),
    Parameter(ParameterDeclaration),
    TypeParameter(TypeParameterDeclaration),
    LocalVariable(LocalVariableDeclaration),
}

impl ResolvedDeclaration {
    pub fn name(&self) -> &str {
        match self {
            Self::Type(decl) => decl.name(),
            Self::Method(decl) => &decl.name,
            Self::Constructor(decl) => decl.name(),
            Self::Field(decl) => &decl.name,
            Self::Parameter(decl) => &decl.name,
            Self::TypeParameter(decl) => &decl.name,
            Self::LocalVariable(decl) => &decl.name,
        }
    }

    pub fn signature(&self) -> String {
        match self {
            Self::Type(decl) => decl.qualified_name.to_string(),
            Self::Method(decl) => decl.signature(),
            Self::Constructor(decl) => decl.signature(),
            _ => self.name().to_string(),
        }
    }

    pub fn qualified_signature(&self) -> String {
        match self {
            Self::Type(decl) => decl.qualified_name.to_string(),
            Self::Method(decl) => decl.qualified_signature(),
            Self::Constructor(decl) => decl.qualified_signature(),
            Self::Field(decl) => format!("{}.{}", decl.declaring_type, decl.name),
            Self::TypeParameter(decl) => format!("{}.{}", decl.declaring_type(), decl.name),
            Self::Parameter(decl) => decl.name.to_string(),
            Self::LocalVariable(decl) => decl.name.to_string(),
        }
    }

    /// Qualified name of the declaring type, for members.
    pub fn declaring_type(&self) -> Option<&Arc<str>> {
        match self {
            Self::Method(decl) => Some(&decl.declaring_type),
            Self::Constructor(decl) => Some(&decl.declaring_type),
            Self::Field(decl) => Some(&decl.declaring_type),
            Self::TypeParameter(decl) => Some(decl.declaring_type()),
            Self::Type(_) | Self::Parameter(_) | Self::LocalVariable(_) => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Type(_) => "type",
            Self::Method(_) => "method",
            Self::Constructor(_) => "constructor",
            Self::Field(_) => "field",
            Self::Parameter(_) => "parameter",
            Self::TypeParameter(_) => "type parameter",
            Self::LocalVariable(_) => "local variable",
        }
    }

    /// Declared type of a value declaration.
    pub fn value_type(&self) -> Option<&ResolvedType> {
        match self {
            Self::Field(decl) => Some(&decl.ty),
            Self::Parameter(decl) => Some(&decl.ty),
            Self::LocalVariable(decl) => Some(&decl.ty),
            _ => None,
        }
    }

    pub fn to_descriptor(&self) -> Option<String> {
        match self {
            Self::Method(decl) => Some(decl.to_descriptor()),
            Self::Constructor(decl) => Some(decl.to_descriptor()),
            Self::Field(decl) => Some(decl.to_descriptor()),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&Arc<TypeDeclaration>> {
        match self {
            Self::Type(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&Arc<MethodDeclaration>> {
        match self {
            Self::Method(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_constructor(&self) -> Option<&Arc<ConstructorDeclaration>> {
        match self {
            Self::Constructor(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&Arc<FieldDeclaration>> {
        match self {
            Self::Field(decl) => Some(decl),
            _ => None,
        }
    }
}

impl PartialEq for ResolvedDeclaration {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
            && self.qualified_signature() == other.qualified_signature()
    }
}

impl Eq for ResolvedDeclaration {}

/// Typed extraction for `resolve_declaration_as`.
pub trait DeclarationShape: Sized {
    const SHAPE: &'static str;
    fn extract(declaration: ResolvedDeclaration) -> Option<Self>;
}

macro_rules! declaration_shape {
    ($ty:ty, $variant:ident, $shape:literal) => {
        impl DeclarationShape for $ty {
            const SHAPE: &'static str = $shape;
            fn extract(declaration: ResolvedDeclaration) -> Option<Self> {
                match declaration {
                    ResolvedDeclaration::$variant(decl) => Some(decl),
                    _ => None,
                }
            }
        }
    };
}

declaration_shape!(Arc<TypeDeclaration>, Type, "type");
declaration_shape!(Arc<MethodDeclaration>, Method, "method");
declaration_shape!(Arc<ConstructorDeclaration>, Constructor, "constructor");
declaration_shape!(Arc<FieldDeclaration>, Field, "field");
declaration_shape!(ParameterDeclaration, Parameter, "parameter");
declaration_shape!(TypeParameterDeclaration, TypeParameter, "type parameter");
declaration_shape!(LocalVariableDeclaration, LocalVariable, "local variable");

impl DeclarationShape for ResolvedDeclaration {
    const SHAPE: &'static str = "declaration";
    fn extract(declaration: ResolvedDeclaration) -> Option<Self> {
        Some(declaration)
    }
}

fn describe_parameters(parameters: &[ParameterDeclaration]) -> String {
    parameters
        .iter()
        .map(ParameterDeclaration::describe_type)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "../tests/declarations_tests.rs"]
mod tests;
