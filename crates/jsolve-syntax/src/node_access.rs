//! NodeArena access methods.
//!
//! Header lookup (`get`), parent links, the per-kind `get_*` data accessors
//! and the generic `children` enumeration.

use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use smallvec::SmallVec;

/// Child indices of one node, in source order.
pub type Children = SmallVec<[NodeIndex; 8]>;

impl NodeArena {
    /// Get a node header by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get extended info for a node
    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    /// Get mutable extended info for a node
    #[inline]
    pub fn get_extended_mut(&mut self, index: NodeIndex) -> Option<&mut ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn kind_of(&self, index: NodeIndex) -> Option<SyntaxKind> {
        self.get(index).map(|node| node.kind)
    }

    #[inline]
    pub fn is_kind(&self, index: NodeIndex, kind: SyntaxKind) -> bool {
        self.kind_of(index) == Some(kind)
    }

    /// Parent of `index`, `NONE` for the root or unknown nodes.
    #[inline]
    pub fn parent_of(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map(|info| info.parent)
            .unwrap_or(NodeIndex::NONE)
    }

    /// All direct children of `index`, in source order.
    pub fn children(&self, index: NodeIndex) -> Children {
        fn one(out: &mut Children, index: NodeIndex) {
            if index.is_some() {
                out.push(index);
            }
        }
        fn list(out: &mut Children, nodes: &NodeList) {
            out.extend(nodes.iter().filter(|n| n.is_some()));
        }

        let mut out = Children::new();
        let Some(node) = self.get(index) else {
            return out;
        };
        let i = node.data_index as usize;
        if !node.has_data() {
            return out;
        }

        use SyntaxKind::*;
        match node.kind {
            CompilationUnit => {
                let d = &self.compilation_units[i];
                one(&mut out, d.package);
                list(&mut out, &d.imports);
                list(&mut out, &d.types);
            }
            PackageDeclaration | ImportDeclaration | NameExpression | PrimitiveType => {}
            ClassDeclaration | EnumDeclaration | AnnotationDeclaration => {
                let d = &self.type_decls[i];
                list(&mut out, &d.type_parameters);
                list(&mut out, &d.extended_types);
                list(&mut out, &d.implemented_types);
                list(&mut out, &d.entries);
                list(&mut out, &d.members);
            }
            EnumConstant => list(&mut out, &self.enum_constants[i].arguments),
            FieldDeclaration | LocalVariableDeclaration => {
                let d = &self.variable_decls[i];
                one(&mut out, d.ty);
                list(&mut out, &d.declarators);
            }
            VariableDeclarator => one(&mut out, self.declarators[i].initializer),
            MethodDeclaration | ConstructorDeclaration => {
                let d = &self.methods[i];
                list(&mut out, &d.type_parameters);
                one(&mut out, d.return_type);
                list(&mut out, &d.parameters);
                one(&mut out, d.body);
            }
            Parameter => one(&mut out, self.parameters[i].ty),
            TypeParameter => list(&mut out, &self.type_parameters[i].bounds),
            InitializerDeclaration => one(&mut out, self.initializers[i].body),
            Block => list(&mut out, &self.blocks[i].statements),
            ExpressionStatement | ReturnStatement | EnclosedExpression => {
                one(&mut out, self.wrappers[i].expression)
            }
            IfStatement | ConditionalExpression => {
                let d = &self.conditionals[i];
                one(&mut out, d.condition);
                one(&mut out, d.when_true);
                one(&mut out, d.when_false);
            }
            WhileStatement => {
                let d = &self.loops[i];
                one(&mut out, d.condition);
                one(&mut out, d.body);
            }
            ForStatement => {
                let d = &self.for_stmts[i];
                list(&mut out, &d.initialization);
                one(&mut out, d.compare);
                list(&mut out, &d.update);
                one(&mut out, d.body);
            }
            ForEachStatement => {
                let d = &self.for_each_stmts[i];
                one(&mut out, d.variable);
                one(&mut out, d.iterable);
                one(&mut out, d.body);
            }
            TryStatement => {
                let d = &self.try_stmts[i];
                list(&mut out, &d.resources);
                one(&mut out, d.try_block);
                list(&mut out, &d.catch_clauses);
                one(&mut out, d.finally_block);
            }
            CatchClause => {
                let d = &self.catch_clauses[i];
                one(&mut out, d.parameter);
                one(&mut out, d.body);
            }
            ExplicitConstructorInvocation => {
                let d = &self.explicit_ctor_calls[i];
                one(&mut out, d.expression);
                if let Some(args) = &d.type_arguments {
                    list(&mut out, args);
                }
                list(&mut out, &d.arguments);
            }
            IntegerLiteral | LongLiteral | FloatLiteral | DoubleLiteral | CharLiteral
            | StringLiteral | TextBlockLiteral | BooleanLiteral | NullLiteral => {}
            FieldAccessExpression => one(&mut out, self.field_accesses[i].scope),
            MethodCallExpression => {
                let d = &self.method_calls[i];
                one(&mut out, d.scope);
                if let Some(args) = &d.type_arguments {
                    list(&mut out, args);
                }
                list(&mut out, &d.arguments);
            }
            ObjectCreationExpression => {
                let d = &self.object_creations[i];
                one(&mut out, d.scope);
                one(&mut out, d.ty);
                if let Some(args) = &d.type_arguments {
                    list(&mut out, args);
                }
                list(&mut out, &d.arguments);
            }
            LambdaExpression => {
                let d = &self.lambdas[i];
                list(&mut out, &d.parameters);
                one(&mut out, d.body);
            }
            BinaryExpression => {
                let d = &self.binary_exprs[i];
                one(&mut out, d.left);
                one(&mut out, d.right);
            }
            UnaryExpression => one(&mut out, self.unary_exprs[i].expression),
            ArrayAccessExpression => {
                let d = &self.array_accesses[i];
                one(&mut out, d.name);
                one(&mut out, d.index);
            }
            ArrayCreationExpression => {
                let d = &self.array_creations[i];
                one(&mut out, d.element_type);
                list(&mut out, &d.dimensions);
                if let Some(values) = &d.initializer {
                    list(&mut out, values);
                }
            }
            AssignExpression => {
                let d = &self.assignments[i];
                one(&mut out, d.target);
                one(&mut out, d.value);
            }
            CastExpression => {
                let d = &self.casts[i];
                one(&mut out, d.ty);
                one(&mut out, d.expression);
            }
            InstanceOfExpression => {
                let d = &self.instance_ofs[i];
                one(&mut out, d.expression);
                one(&mut out, d.ty);
                one(&mut out, d.pattern);
            }
            TypePattern => one(&mut out, self.type_patterns[i].ty),
            ThisExpression | SuperExpression => one(&mut out, self.qualifiers[i].type_name),
            ClassExpression => one(&mut out, self.class_exprs[i].ty),
            ClassOrInterfaceType => {
                let d = &self.class_types[i];
                one(&mut out, d.scope);
                if let Some(args) = &d.type_arguments {
                    list(&mut out, args);
                }
            }
            ArrayType => one(&mut out, self.array_types[i].component),
            WildcardType => {
                let d = &self.wildcards[i];
                one(&mut out, d.extended);
                one(&mut out, d.super_bound);
            }
            UnionType | IntersectionType => list(&mut out, &self.type_lists[i].elements),
            VoidType | VarType => {}
        }
        out
    }

    /// Text of a name-bearing node: simple names, declarations, members.
    pub fn name_of(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        use SyntaxKind::*;
        match node.kind {
            NameExpression => self.get_name(node).map(|d| d.name.as_str()),
            FieldAccessExpression => self.get_field_access(node).map(|d| d.name.as_str()),
            MethodCallExpression => self.get_method_call(node).map(|d| d.name.as_str()),
            ClassDeclaration | EnumDeclaration | AnnotationDeclaration => {
                self.get_type_decl(node).map(|d| d.name.as_str())
            }
            MethodDeclaration | ConstructorDeclaration => {
                self.get_method(node).map(|d| d.name.as_str())
            }
            VariableDeclarator => self.get_declarator(node).map(|d| d.name.as_str()),
            Parameter => self.get_parameter(node).map(|d| d.name.as_str()),
            TypeParameter => self.get_type_parameter(node).map(|d| d.name.as_str()),
            EnumConstant => self.get_enum_constant(node).map(|d| d.name.as_str()),
            TypePattern => self.get_type_pattern(node).map(|d| d.name.as_str()),
            ClassOrInterfaceType => self.get_class_type(node).map(|d| d.name.as_str()),
            _ => None,
        }
    }
}

macro_rules! get_methods {
    ($($(#[$doc:meta])* $get:ident($pool:ident: $data:ty) => [$($kind:ident),+];)+) => {
        impl NodeArena {
            $(
                $(#[$doc])*
                #[inline]
                pub fn $get(&self, node: &Node) -> Option<&$data> {
                    if node.has_data() && matches!(node.kind, $(SyntaxKind::$kind)|+) {
                        self.$pool.get(node.data_index as usize)
                    } else {
                        None
                    }
                }
            )+
        }
    };
}

get_methods! {
    get_compilation_unit(compilation_units: CompilationUnitData) => [CompilationUnit];
    get_package(packages: PackageData) => [PackageDeclaration];
    get_import(imports: ImportData) => [ImportDeclaration];
    /// Get class, interface, enum or annotation declaration data.
    get_type_decl(type_decls: TypeDeclData) => [ClassDeclaration, EnumDeclaration, AnnotationDeclaration];
    get_enum_constant(enum_constants: EnumConstantData) => [EnumConstant];
    /// Get field or local variable declaration data.
    get_variable_decl(variable_decls: VariableDeclData) => [FieldDeclaration, LocalVariableDeclaration];
    get_declarator(declarators: VariableDeclaratorData) => [VariableDeclarator];
    /// Get method or constructor data.
    get_method(methods: MethodData) => [MethodDeclaration, ConstructorDeclaration];
    get_parameter(parameters: ParameterData) => [Parameter];
    get_type_parameter(type_parameters: TypeParameterData) => [TypeParameter];
    get_initializer(initializers: InitializerData) => [InitializerDeclaration];

    get_block(blocks: BlockData) => [Block];
    /// Get the single child of an expression statement, return or parenthesized expression.
    get_wrapper(wrappers: WrapperData) => [ExpressionStatement, ReturnStatement, EnclosedExpression];
    /// Get `if` statement or `?:` expression data.
    get_conditional(conditionals: ConditionalData) => [IfStatement, ConditionalExpression];
    get_loop(loops: LoopData) => [WhileStatement];
    get_for(for_stmts: ForData) => [ForStatement];
    get_for_each(for_each_stmts: ForEachData) => [ForEachStatement];
    get_try(try_stmts: TryData) => [TryStatement];
    get_catch_clause(catch_clauses: CatchData) => [CatchClause];
    get_explicit_ctor_call(explicit_ctor_calls: ExplicitCtorCallData) => [ExplicitConstructorInvocation];

    get_literal(literals: LiteralData) => [
        IntegerLiteral, LongLiteral, FloatLiteral, DoubleLiteral, CharLiteral,
        StringLiteral, TextBlockLiteral, BooleanLiteral, NullLiteral
    ];
    get_name(names: NameData) => [NameExpression];
    get_field_access(field_accesses: FieldAccessData) => [FieldAccessExpression];
    get_method_call(method_calls: MethodCallData) => [MethodCallExpression];
    get_object_creation(object_creations: ObjectCreationData) => [ObjectCreationExpression];
    get_lambda(lambdas: LambdaData) => [LambdaExpression];
    get_binary_expr(binary_exprs: BinaryExprData) => [BinaryExpression];
    get_unary_expr(unary_exprs: UnaryExprData) => [UnaryExpression];
    get_array_access(array_accesses: ArrayAccessData) => [ArrayAccessExpression];
    get_array_creation(array_creations: ArrayCreationData) => [ArrayCreationExpression];
    get_assignment(assignments: AssignData) => [AssignExpression];
    get_cast(casts: CastData) => [CastExpression];
    get_instance_of(instance_ofs: InstanceOfData) => [InstanceOfExpression];
    get_type_pattern(type_patterns: TypePatternData) => [TypePattern];
    get_qualifier(qualifiers: QualifierData) => [ThisExpression, SuperExpression];
    get_class_expr(class_exprs: ClassExprData) => [ClassExpression];

    get_primitive_type(primitive_types: PrimitiveTypeData) => [PrimitiveType];
    get_class_type(class_types: ClassTypeData) => [ClassOrInterfaceType];
    get_array_type(array_types: ArrayTypeData) => [ArrayType];
    get_wildcard(wildcards: WildcardData) => [WildcardType];
    get_type_list(type_lists: TypeListData) => [UnionType, IntersectionType];
}
