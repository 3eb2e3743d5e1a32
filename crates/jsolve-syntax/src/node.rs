//! Node storage: the thin `Node` header, per-kind data structs and the
//! `NodeArena` that owns them.
//!
//! # Layout
//!
//! Every node is a fixed-size [`Node`] header (kind, span, data index) in
//! `NodeArena::nodes`. Kind-specific payloads live in typed pools; the
//! header's `data_index` points into the pool that matches its kind. Parent
//! links live in `extended_info`, indexed like `nodes`.
//!
//! Absent children are [`NodeIndex::NONE`]. Type argument lists use
//! `Option<NodeList>` where "absent" and "empty" differ (`Foo` vs the
//! diamond `Foo<>`).

use crate::base::{NodeIndex, NodeList};
use crate::modifiers::Modifiers;
use crate::operators::{AssignOperator, BinaryOperator, UnaryOperator};
use crate::syntax_kind::SyntaxKind;
use jsolve_common::PrimitiveKind;

/// Fixed-size node header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: SyntaxKind,
    /// Start byte offset.
    pub pos: u32,
    /// End byte offset (exclusive).
    pub end: u32,
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    pub const fn new(kind: SyntaxKind, pos: u32, end: u32) -> Self {
        Self {
            kind,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    pub const fn with_data(kind: SyntaxKind, pos: u32, end: u32, data_index: u32) -> Self {
        Self {
            kind,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub const fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }
}

/// Per-node information stored beside the header.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
}

// =============================================================================
// Declaration data
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct CompilationUnitData {
    pub package: NodeIndex,
    pub imports: NodeList,
    pub types: NodeList,
}

#[derive(Clone, Debug, Default)]
pub struct PackageData {
    pub name: String,
}

#[derive(Clone, Debug, Default)]
pub struct ImportData {
    /// Dotted name, without the trailing `.*` of on-demand imports.
    pub name: String,
    pub is_static: bool,
    pub is_asterisk: bool,
}

/// Class, interface, enum and annotation declarations.
#[derive(Clone, Debug, Default)]
pub struct TypeDeclData {
    pub modifiers: Modifiers,
    pub name: String,
    pub is_interface: bool,
    pub type_parameters: NodeList,
    pub extended_types: NodeList,
    pub implemented_types: NodeList,
    /// Enum constants (enums only).
    pub entries: NodeList,
    pub members: NodeList,
}

#[derive(Clone, Debug, Default)]
pub struct EnumConstantData {
    pub name: String,
    pub arguments: NodeList,
}

/// Field declarations and local variable declarations.
#[derive(Clone, Debug, Default)]
pub struct VariableDeclData {
    pub modifiers: Modifiers,
    pub ty: NodeIndex,
    pub declarators: NodeList,
}

#[derive(Clone, Debug, Default)]
pub struct VariableDeclaratorData {
    pub name: String,
    pub initializer: NodeIndex,
}

/// Method and constructor declarations.
#[derive(Clone, Debug, Default)]
pub struct MethodData {
    pub modifiers: Modifiers,
    pub type_parameters: NodeList,
    /// `NONE` for constructors.
    pub return_type: NodeIndex,
    pub name: String,
    pub parameters: NodeList,
    /// `NONE` for abstract and native methods.
    pub body: NodeIndex,
}

#[derive(Clone, Debug, Default)]
pub struct ParameterData {
    pub modifiers: Modifiers,
    /// `NONE` for implicitly typed lambda parameters.
    pub ty: NodeIndex,
    pub is_varargs: bool,
    pub name: String,
}

#[derive(Clone, Debug, Default)]
pub struct TypeParameterData {
    pub name: String,
    pub bounds: NodeList,
}

#[derive(Clone, Debug, Default)]
pub struct InitializerData {
    pub is_static: bool,
    pub body: NodeIndex,
}

// =============================================================================
// Statement data
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct BlockData {
    pub statements: NodeList,
}

/// Single-child wrappers: expression statements, returns, parenthesized
/// expressions.
#[derive(Clone, Debug, Default)]
pub struct WrapperData {
    pub expression: NodeIndex,
}

/// `if` statements and `?:` expressions.
#[derive(Clone, Debug, Default)]
pub struct ConditionalData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

#[derive(Clone, Debug, Default)]
pub struct LoopData {
    pub condition: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, Default)]
pub struct ForData {
    pub initialization: NodeList,
    pub compare: NodeIndex,
    pub update: NodeList,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, Default)]
pub struct ForEachData {
    /// A `LocalVariableDeclaration` with one declarator and no initializer.
    pub variable: NodeIndex,
    pub iterable: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, Default)]
pub struct TryData {
    pub resources: NodeList,
    pub try_block: NodeIndex,
    pub catch_clauses: NodeList,
    pub finally_block: NodeIndex,
}

#[derive(Clone, Debug, Default)]
pub struct CatchData {
    pub parameter: NodeIndex,
    pub body: NodeIndex,
}

/// `this(...)` / `super(...)` as the first statement of a constructor.
#[derive(Clone, Debug, Default)]
pub struct ExplicitCtorCallData {
    pub is_this: bool,
    /// Outer instance qualifier (`outer.super(...)`), or `NONE`.
    pub expression: NodeIndex,
    pub type_arguments: Option<NodeList>,
    pub arguments: NodeList,
}

// =============================================================================
// Expression data
// =============================================================================

/// Literal source text. Char and string literals store the text between the
/// quotes, still escaped.
#[derive(Clone, Debug, Default)]
pub struct LiteralData {
    pub text: String,
}

#[derive(Clone, Debug, Default)]
pub struct NameData {
    pub name: String,
}

#[derive(Clone, Debug, Default)]
pub struct FieldAccessData {
    pub scope: NodeIndex,
    pub name: String,
}

#[derive(Clone, Debug, Default)]
pub struct MethodCallData {
    /// Receiver expression or type name, `NONE` for unqualified calls.
    pub scope: NodeIndex,
    pub type_arguments: Option<NodeList>,
    pub name: String,
    pub arguments: NodeList,
}

#[derive(Clone, Debug, Default)]
pub struct ObjectCreationData {
    /// Outer instance for inner class creation (`outer.new Inner()`).
    pub scope: NodeIndex,
    /// The created `ClassOrInterfaceType`.
    pub ty: NodeIndex,
    pub type_arguments: Option<NodeList>,
    pub arguments: NodeList,
}

#[derive(Clone, Debug, Default)]
pub struct LambdaData {
    pub parameters: NodeList,
    /// Expression or `Block`.
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator: BinaryOperator,
    pub right: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct UnaryExprData {
    pub operator: UnaryOperator,
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Default)]
pub struct ArrayAccessData {
    pub name: NodeIndex,
    pub index: NodeIndex,
}

/// `new T[a][b][]` or `new T[] { ... }`.
#[derive(Clone, Debug, Default)]
pub struct ArrayCreationData {
    pub element_type: NodeIndex,
    /// Dimension expressions given between brackets.
    pub dimensions: NodeList,
    /// Trailing empty `[]` pairs.
    pub extra_levels: u32,
    pub initializer: Option<NodeList>,
}

impl ArrayCreationData {
    pub fn levels(&self) -> u32 {
        self.dimensions.len() as u32 + self.extra_levels
    }
}

#[derive(Clone, Debug)]
pub struct AssignData {
    pub target: NodeIndex,
    pub operator: AssignOperator,
    pub value: NodeIndex,
}

#[derive(Clone, Debug, Default)]
pub struct CastData {
    pub ty: NodeIndex,
    pub expression: NodeIndex,
}

/// `e instanceof T` or `e instanceof T t`. Exactly one of `ty` and
/// `pattern` is set.
#[derive(Clone, Debug, Default)]
pub struct InstanceOfData {
    pub expression: NodeIndex,
    pub ty: NodeIndex,
    pub pattern: NodeIndex,
}

#[derive(Clone, Debug, Default)]
pub struct TypePatternData {
    pub modifiers: Modifiers,
    pub ty: NodeIndex,
    pub name: String,
}

/// `this`, `super`, `Outer.this`, `Outer.super`.
#[derive(Clone, Debug, Default)]
pub struct QualifierData {
    pub type_name: NodeIndex,
}

#[derive(Clone, Debug, Default)]
pub struct ClassExprData {
    pub ty: NodeIndex,
}

// =============================================================================
// Type data
// =============================================================================

#[derive(Clone, Debug)]
pub struct PrimitiveTypeData {
    pub kind: PrimitiveKind,
}

#[derive(Clone, Debug, Default)]
pub struct ClassTypeData {
    /// Qualifying `ClassOrInterfaceType` (`java.util` in `java.util.List`).
    pub scope: NodeIndex,
    pub name: String,
    /// `None` for no arguments, `Some(empty)` for the diamond.
    pub type_arguments: Option<NodeList>,
}

impl ClassTypeData {
    pub fn is_diamond(&self) -> bool {
        self.type_arguments.as_ref().is_some_and(NodeList::is_empty)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ArrayTypeData {
    pub component: NodeIndex,
}

#[derive(Clone, Debug, Default)]
pub struct WildcardData {
    pub extended: NodeIndex,
    pub super_bound: NodeIndex,
}

/// Union (`A | B` in catch) and intersection (`A & B` in casts) types.
#[derive(Clone, Debug, Default)]
pub struct TypeListData {
    pub elements: NodeList,
}

// =============================================================================
// NodeArena
// =============================================================================

/// Flat storage for one syntax tree.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub extended_info: Vec<ExtendedNodeInfo>,

    pub compilation_units: Vec<CompilationUnitData>,
    pub packages: Vec<PackageData>,
    pub imports: Vec<ImportData>,
    pub type_decls: Vec<TypeDeclData>,
    pub enum_constants: Vec<EnumConstantData>,
    pub variable_decls: Vec<VariableDeclData>,
    pub declarators: Vec<VariableDeclaratorData>,
    pub methods: Vec<MethodData>,
    pub parameters: Vec<ParameterData>,
    pub type_parameters: Vec<TypeParameterData>,
    pub initializers: Vec<InitializerData>,

    pub blocks: Vec<BlockData>,
    pub wrappers: Vec<WrapperData>,
    pub conditionals: Vec<ConditionalData>,
    pub loops: Vec<LoopData>,
    pub for_stmts: Vec<ForData>,
    pub for_each_stmts: Vec<ForEachData>,
    pub try_stmts: Vec<TryData>,
    pub catch_clauses: Vec<CatchData>,
    pub explicit_ctor_calls: Vec<ExplicitCtorCallData>,

    pub literals: Vec<LiteralData>,
    pub names: Vec<NameData>,
    pub field_accesses: Vec<FieldAccessData>,
    pub method_calls: Vec<MethodCallData>,
    pub object_creations: Vec<ObjectCreationData>,
    pub lambdas: Vec<LambdaData>,
    pub binary_exprs: Vec<BinaryExprData>,
    pub unary_exprs: Vec<UnaryExprData>,
    pub array_accesses: Vec<ArrayAccessData>,
    pub array_creations: Vec<ArrayCreationData>,
    pub assignments: Vec<AssignData>,
    pub casts: Vec<CastData>,
    pub instance_ofs: Vec<InstanceOfData>,
    pub type_patterns: Vec<TypePatternData>,
    pub qualifiers: Vec<QualifierData>,
    pub class_exprs: Vec<ClassExprData>,

    pub primitive_types: Vec<PrimitiveTypeData>,
    pub class_types: Vec<ClassTypeData>,
    pub array_types: Vec<ArrayTypeData>,
    pub wildcards: Vec<WildcardData>,
    pub type_lists: Vec<TypeListData>,
}
