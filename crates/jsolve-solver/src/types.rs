//! Resolved type model.
//!
//! `ResolvedType` is a plain value: two equal values denote the same type.
//! Reference types carry both their qualified name (`java.util.Map.Entry`)
//! and their binary name (`java.util.Map$Entry`) so that descriptors can be
//! produced without consulting a solver.

use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub use jsolve_common::PrimitiveKind;

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";
pub const ENUM: &str = "java.lang.Enum";
pub const CLASS: &str = "java.lang.Class";
pub const CLONEABLE: &str = "java.lang.Cloneable";
pub const SERIALIZABLE: &str = "java.io.Serializable";
pub const ITERABLE: &str = "java.lang.Iterable";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResolvedType {
    Primitive(PrimitiveKind),
    Reference(ReferenceType),
    Array(Box<ResolvedType>),
    TypeVariable(TypeVariable),
    Wildcard(Wildcard),
    Void,
    /// Type of the `null` literal.
    Null,
    /// Multi-catch alternatives.
    Union(Vec<ResolvedType>),
    /// Intersection bounds, also produced by least-upper-bound computation.
    Intersection(Vec<ResolvedType>),
}

/// A class or interface type, possibly parameterized.
///
/// An empty argument list on a generic declaration denotes the raw type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReferenceType {
    pub qualified_name: Arc<str>,
    pub binary_name: Arc<str>,
    pub type_arguments: Vec<ResolvedType>,
}

/// Declaration site of a type parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeParamOwner {
    /// Declared on the type with this qualified name.
    Type(Arc<str>),
    /// Declared on a method or constructor; `ordinal` is the callable's
    /// position among its declaring type's members.
    Method {
        declaring_type: Arc<str>,
        ordinal: u32,
    },
}

/// A use of a type parameter.
///
/// Identity is the name plus the declaration site. The erasure (the raw
/// leftmost bound) is carried along so that relations can fall back to it
/// without a solver round trip; full bounds live on the
/// `TypeParameterDeclaration`.
#[derive(Clone, Debug)]
pub struct TypeVariable {
    pub name: Arc<str>,
    pub owner: TypeParamOwner,
    pub erasure: ReferenceType,
}

impl PartialEq for TypeVariable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.owner == other.owner
    }
}

impl Eq for TypeVariable {}

impl Hash for TypeVariable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.owner.hash(state);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Wildcard {
    Unbounded,
    Extends(Box<ResolvedType>),
    Super(Box<ResolvedType>),
}

impl ReferenceType {
    pub fn new(
        qualified_name: impl Into<Arc<str>>,
        binary_name: impl Into<Arc<str>>,
        type_arguments: Vec<ResolvedType>,
    ) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            binary_name: binary_name.into(),
            type_arguments,
        }
    }

    /// A top-level type, whose binary name equals its qualified name.
    pub fn top_level(qualified_name: impl Into<Arc<str>>) -> Self {
        let qualified_name = qualified_name.into();
        Self {
            binary_name: qualified_name.clone(),
            qualified_name,
            type_arguments: Vec::new(),
        }
    }

    pub fn object() -> Self {
        Self::top_level(OBJECT)
    }

    pub fn is_object(&self) -> bool {
        &*self.qualified_name == OBJECT
    }

    pub fn is_raw(&self) -> bool {
        self.type_arguments.is_empty()
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.qualified_name)
    }

    pub fn package_name(&self) -> &str {
        match self.binary_name.rfind('.') {
            Some(dot) => &self.binary_name[..dot],
            None => "",
        }
    }

    /// The raw type.
    pub fn erased(&self) -> Self {
        Self {
            qualified_name: self.qualified_name.clone(),
            binary_name: self.binary_name.clone(),
            type_arguments: Vec::new(),
        }
    }

    pub fn with_arguments(&self, type_arguments: Vec<ResolvedType>) -> Self {
        Self {
            qualified_name: self.qualified_name.clone(),
            binary_name: self.binary_name.clone(),
            type_arguments,
        }
    }

    /// Qualified name of a member type declared in this type.
    pub fn member(&self, simple: &str) -> Self {
        Self::new(
            format!("{}.{simple}", self.qualified_name),
            format!("{}${simple}", self.binary_name),
            Vec::new(),
        )
    }

    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl From<ReferenceType> for ResolvedType {
    fn from(reference: ReferenceType) -> Self {
        Self::Reference(reference)
    }
}

impl ResolvedType {
    pub fn object() -> Self {
        Self::Reference(ReferenceType::object())
    }

    pub fn string() -> Self {
        Self::Reference(ReferenceType::top_level(STRING))
    }

    /// Reference to a top-level type by qualified name.
    pub fn top_level(qualified_name: &str) -> Self {
        Self::Reference(ReferenceType::top_level(qualified_name))
    }

    pub fn array_of(self, levels: usize) -> Self {
        (0..levels).fold(self, |ty, _| Self::Array(Box::new(ty)))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Types whose values are references: classes, arrays, type variables,
    /// the null type and compound bounds.
    pub fn is_reference_like(&self) -> bool {
        matches!(
            self,
            Self::Reference(_)
                | Self::Array(_)
                | Self::TypeVariable(_)
                | Self::Null
                | Self::Union(_)
                | Self::Intersection(_)
        )
    }

    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&ReferenceType> {
        match self {
            Self::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_type_variable(&self) -> Option<&TypeVariable> {
        match self {
            Self::TypeVariable(var) => Some(var),
            _ => None,
        }
    }

    pub fn component(&self) -> Option<&ResolvedType> {
        match self {
            Self::Array(component) => Some(component),
            _ => None,
        }
    }

    pub fn array_level(&self) -> usize {
        match self {
            Self::Array(component) => 1 + component.array_level(),
            _ => 0,
        }
    }

    pub fn is_reference_named(&self, qualified_name: &str) -> bool {
        self.as_reference()
            .is_some_and(|r| &*r.qualified_name == qualified_name)
    }

    /// The primitive this boxed type unboxes to.
    pub fn unboxed(&self) -> Option<PrimitiveKind> {
        self.as_reference()
            .and_then(|r| PrimitiveKind::from_boxed_name(&r.qualified_name))
    }

    /// Boxing class of a primitive.
    pub fn boxed(kind: PrimitiveKind) -> Self {
        Self::top_level(kind.boxed_name())
    }

    /// The primitive kind after unboxing, for primitives and boxed types.
    pub fn numeric_kind(&self) -> Option<PrimitiveKind> {
        self.as_primitive()
            .or_else(|| self.unboxed())
            .filter(|kind| kind.is_numeric())
    }

    pub fn is_boolean_like(&self) -> bool {
        self.as_primitive().or_else(|| self.unboxed()) == Some(PrimitiveKind::Boolean)
    }

    /// Erasure: type arguments dropped, type variables replaced by their
    /// leftmost bound, wildcards by their upper bound.
    pub fn erasure(&self) -> ResolvedType {
        match self {
            Self::Primitive(_) | Self::Void | Self::Null => self.clone(),
            Self::Reference(reference) => Self::Reference(reference.erased()),
            Self::Array(component) => Self::Array(Box::new(component.erasure())),
            Self::TypeVariable(var) => Self::Reference(var.erasure.erased()),
            Self::Wildcard(Wildcard::Extends(bound)) => bound.erasure(),
            Self::Wildcard(_) => Self::object(),
            Self::Union(elements) | Self::Intersection(elements) => elements
                .first()
                .map(ResolvedType::erasure)
                .unwrap_or_else(Self::object),
        }
    }

    /// Upper bound of a wildcard used as a value type; other types unchanged.
    pub fn upper_bound(&self) -> ResolvedType {
        match self {
            Self::Wildcard(Wildcard::Extends(bound)) => bound.upper_bound(),
            Self::Wildcard(_) => Self::object(),
            _ => self.clone(),
        }
    }

    /// Type variables mentioned anywhere in this type.
    pub fn type_variables(&self) -> SmallVec<[&TypeVariable; 2]> {
        let mut out = SmallVec::new();
        self.collect_type_variables(&mut out);
        out
    }

    fn collect_type_variables<'a>(&'a self, out: &mut SmallVec<[&'a TypeVariable; 2]>) {
        match self {
            Self::TypeVariable(var) => {
                if !out.contains(&var) {
                    out.push(var);
                }
            }
            Self::Reference(reference) => {
                for arg in &reference.type_arguments {
                    arg.collect_type_variables(out);
                }
            }
            Self::Array(component) => component.collect_type_variables(out),
            Self::Wildcard(Wildcard::Extends(bound) | Wildcard::Super(bound)) => {
                bound.collect_type_variables(out);
            }
            Self::Union(elements) | Self::Intersection(elements) => {
                for element in elements {
                    element.collect_type_variables(out);
                }
            }
            Self::Primitive(_) | Self::Void | Self::Null | Self::Wildcard(Wildcard::Unbounded) => {}
        }
    }

    pub fn describe(&self) -> String {
        self.to_string()
    }
}

/// Last dotted segment of a qualified name.
pub fn simple_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map_or(qualified_name, |(_, simple)| simple)
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name)?;
        if !self.type_arguments.is_empty() {
            f.write_str("<")?;
            write_joined(f, &self.type_arguments, ", ")?;
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Reference(reference) => write!(f, "{reference}"),
            Self::Array(component) => write!(f, "{component}[]"),
            Self::TypeVariable(var) => f.write_str(&var.name),
            Self::Wildcard(Wildcard::Unbounded) => f.write_str("?"),
            Self::Wildcard(Wildcard::Extends(bound)) => write!(f, "? extends {bound}"),
            Self::Wildcard(Wildcard::Super(bound)) => write!(f, "? super {bound}"),
            Self::Void => f.write_str("void"),
            Self::Null => f.write_str("null"),
            Self::Union(elements) => write_joined(f, elements, " | "),
            Self::Intersection(elements) => write_joined(f, elements, " & "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, types: &[ResolvedType], sep: &str) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
