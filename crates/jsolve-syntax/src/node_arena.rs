//! NodeArena creation methods (add_* methods).
//!
//! Trees are built bottom-up: children first, then the parent. Adding a
//! parent links every child it references back to it.

use crate::base::NodeIndex;
use crate::node::*;
use crate::syntax_kind::SyntaxKind;

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow in huge files.
    const MAX_NODE_PREALLOC: usize = 5_000_000;

    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena with pre-allocated capacity for the most common pools.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        let safe_capacity = capacity.min(Self::MAX_NODE_PREALLOC);
        let mut arena = NodeArena::default();
        arena.nodes = Vec::with_capacity(safe_capacity);
        arena.extended_info = Vec::with_capacity(safe_capacity);
        arena.names = Vec::with_capacity(safe_capacity / 4);
        arena.literals = Vec::with_capacity(safe_capacity / 8);
        arena.method_calls = Vec::with_capacity(safe_capacity / 8);
        arena.class_types = Vec::with_capacity(safe_capacity / 8);
        arena.blocks = Vec::with_capacity(safe_capacity / 16);
        arena
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Set the parent of `child`. Ignores the `NONE` sentinel.
    pub fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if let Some(info) = self.get_extended_mut(child) {
            info.parent = parent;
        }
    }

    fn push_node(&mut self, node: Node) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(node);
        self.extended_info.push(ExtendedNodeInfo::default());
        for child in self.children(index) {
            self.set_parent(child, index);
        }
        index
    }

    /// Add a node without payload (`void`, `var`).
    pub fn add_token(&mut self, kind: SyntaxKind, pos: u32, end: u32) -> NodeIndex {
        debug_assert!(
            matches!(kind, SyntaxKind::VoidType | SyntaxKind::VarType),
            "{kind:?} carries data"
        );
        self.push_node(Node::new(kind, pos, end))
    }
}

macro_rules! add_methods {
    ($($(#[$doc:meta])* $add:ident($pool:ident: $data:ty) => [$($kind:ident),+];)+) => {
        impl NodeArena {
            $(
                $(#[$doc])*
                pub fn $add(&mut self, kind: SyntaxKind, pos: u32, end: u32, data: $data) -> NodeIndex {
                    debug_assert!(
                        matches!(kind, $(SyntaxKind::$kind)|+),
                        "{kind:?} is not stored in {}",
                        stringify!($pool)
                    );
                    let data_index = self.$pool.len() as u32;
                    self.$pool.push(data);
                    self.push_node(Node::with_data(kind, pos, end, data_index))
                }
            )+
        }
    };
}

add_methods! {
    /// Add a compilation unit (the root of a source file)
    add_compilation_unit(compilation_units: CompilationUnitData) => [CompilationUnit];
    add_package(packages: PackageData) => [PackageDeclaration];
    add_import(imports: ImportData) => [ImportDeclaration];
    /// Add a class, interface, enum or annotation declaration
    add_type_decl(type_decls: TypeDeclData) => [ClassDeclaration, EnumDeclaration, AnnotationDeclaration];
    add_enum_constant(enum_constants: EnumConstantData) => [EnumConstant];
    /// Add a field or local variable declaration
    add_variable_decl(variable_decls: VariableDeclData) => [FieldDeclaration, LocalVariableDeclaration];
    add_declarator(declarators: VariableDeclaratorData) => [VariableDeclarator];
    /// Add a method or constructor declaration
    add_method(methods: MethodData) => [MethodDeclaration, ConstructorDeclaration];
    add_parameter(parameters: ParameterData) => [Parameter];
    add_type_parameter(type_parameters: TypeParameterData) => [TypeParameter];
    add_initializer(initializers: InitializerData) => [InitializerDeclaration];

    add_block(blocks: BlockData) => [Block];
    /// Add an expression statement, return statement or parenthesized expression
    add_wrapper(wrappers: WrapperData) => [ExpressionStatement, ReturnStatement, EnclosedExpression];
    /// Add an `if` statement or `?:` expression
    add_conditional(conditionals: ConditionalData) => [IfStatement, ConditionalExpression];
    add_loop(loops: LoopData) => [WhileStatement];
    add_for(for_stmts: ForData) => [ForStatement];
    add_for_each(for_each_stmts: ForEachData) => [ForEachStatement];
    add_try(try_stmts: TryData) => [TryStatement];
    add_catch_clause(catch_clauses: CatchData) => [CatchClause];
    add_explicit_ctor_call(explicit_ctor_calls: ExplicitCtorCallData) => [ExplicitConstructorInvocation];

    /// Add a literal of any kind
    add_literal(literals: LiteralData) => [
        IntegerLiteral, LongLiteral, FloatLiteral, DoubleLiteral, CharLiteral,
        StringLiteral, TextBlockLiteral, BooleanLiteral, NullLiteral
    ];
    add_name(names: NameData) => [NameExpression];
    add_field_access(field_accesses: FieldAccessData) => [FieldAccessExpression];
    add_method_call(method_calls: MethodCallData) => [MethodCallExpression];
    add_object_creation(object_creations: ObjectCreationData) => [ObjectCreationExpression];
    add_lambda(lambdas: LambdaData) => [LambdaExpression];
    add_binary_expr(binary_exprs: BinaryExprData) => [BinaryExpression];
    add_unary_expr(unary_exprs: UnaryExprData) => [UnaryExpression];
    add_array_access(array_accesses: ArrayAccessData) => [ArrayAccessExpression];
    add_array_creation(array_creations: ArrayCreationData) => [ArrayCreationExpression];
    add_assignment(assignments: AssignData) => [AssignExpression];
    add_cast(casts: CastData) => [CastExpression];
    add_instance_of(instance_ofs: InstanceOfData) => [InstanceOfExpression];
    add_type_pattern(type_patterns: TypePatternData) => [TypePattern];
    /// Add a `this` or `super` expression
    add_qualifier(qualifiers: QualifierData) => [ThisExpression, SuperExpression];
    add_class_expr(class_exprs: ClassExprData) => [ClassExpression];

    add_primitive_type(primitive_types: PrimitiveTypeData) => [PrimitiveType];
    add_class_type(class_types: ClassTypeData) => [ClassOrInterfaceType];
    add_array_type(array_types: ArrayTypeData) => [ArrayType];
    add_wildcard(wildcards: WildcardData) => [WildcardType];
    /// Add a union or intersection type
    add_type_list(type_lists: TypeListData) => [UnionType, IntersectionType];
}
