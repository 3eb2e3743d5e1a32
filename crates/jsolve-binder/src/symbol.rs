//! Symbols introduced by a scope.

use jsolve_syntax::NodeIndex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Field,
    EnumConstant,
    Parameter,
    LambdaParameter,
    LocalVariable,
    CatchParameter,
    PatternBinding,
}

/// Where the type of a symbol comes from. Computed on demand by the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeferredType {
    /// An explicit type node.
    Declared(NodeIndex),
    /// `var x = init`: the type of the initializer.
    Inferred(NodeIndex),
    /// Implicitly typed lambda parameter at `index`: from the lambda's target.
    LambdaParameter { lambda: NodeIndex, index: usize },
    /// `for (var x : iterable)`: the element type of the iterable.
    ForEachElement(NodeIndex),
    /// Enum constant: the enclosing enum declaration.
    DeclaringType(NodeIndex),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeSymbol {
    pub name: String,
    /// Declarator, parameter, enum constant or pattern node.
    pub decl_node: NodeIndex,
    pub kind: SymbolKind,
    pub declared_type: DeferredType,
    /// `T... name`: the declared type node is the component type.
    pub is_varargs: bool,
}

impl ScopeSymbol {
    pub fn new(name: impl Into<String>, decl_node: NodeIndex, kind: SymbolKind, declared_type: DeferredType) -> Self {
        Self {
            name: name.into(),
            decl_node,
            kind,
            declared_type,
            is_varargs: false,
        }
    }

    pub fn is_field(&self) -> bool {
        matches!(self.kind, SymbolKind::Field | SymbolKind::EnumConstant)
    }
}
