//! Programmatic tree construction.
//!
//! `TreeBuilder` wraps a [`NodeArena`] with one method per common node
//! shape. Every node receives a distinct synthetic span so that locations
//! and orderings stay meaningful without source text. Node shapes without a
//! dedicated helper go through the `*_decl` methods taking the data struct.

use crate::base::{NodeIndex, NodeList};
use crate::modifiers::Modifiers;
use crate::node::*;
use crate::operators::{AssignOperator, BinaryOperator, UnaryOperator};
use crate::source_unit::SourceUnit;
use crate::syntax_kind::SyntaxKind;
use jsolve_common::PrimitiveKind;
use std::sync::Arc;

#[derive(Default)]
pub struct TreeBuilder {
    arena: NodeArena,
    cursor: u32,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    fn span(&mut self) -> (u32, u32) {
        let pos = self.cursor;
        self.cursor += 1;
        (pos, pos + 1)
    }

    /// Finish the tree rooted at `root` into a source unit.
    pub fn finish(self, path: impl Into<Arc<str>>, root: NodeIndex) -> SourceUnit {
        SourceUnit::new(path, self.arena, root)
    }

    // =========================================================================
    // Compilation units and declarations
    // =========================================================================

    pub fn compilation_unit(
        &mut self,
        package: Option<&str>,
        imports: Vec<NodeIndex>,
        types: Vec<NodeIndex>,
    ) -> NodeIndex {
        let package = match package {
            Some(name) => {
                let (pos, end) = self.span();
                self.arena.add_package(
                    SyntaxKind::PackageDeclaration,
                    pos,
                    end,
                    PackageData { name: name.to_string() },
                )
            }
            None => NodeIndex::NONE,
        };
        let (pos, end) = self.span();
        self.arena.add_compilation_unit(
            SyntaxKind::CompilationUnit,
            pos,
            end,
            CompilationUnitData {
                package,
                imports: imports.into(),
                types: types.into(),
            },
        )
    }

    /// `import a.b.C;`, `import a.b.*;`, `import static a.b.C.m;`, `import static a.b.C.*;`
    pub fn import(&mut self, name: &str, is_static: bool) -> NodeIndex {
        let (name, is_asterisk) = match name.strip_suffix(".*") {
            Some(prefix) => (prefix, true),
            None => (name, false),
        };
        let (pos, end) = self.span();
        self.arena.add_import(
            SyntaxKind::ImportDeclaration,
            pos,
            end,
            ImportData {
                name: name.to_string(),
                is_static,
                is_asterisk,
            },
        )
    }

    pub fn class_decl(&mut self, data: TypeDeclData) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena
            .add_type_decl(SyntaxKind::ClassDeclaration, pos, end, data)
    }

    /// Plain class with members and no supertypes.
    pub fn class(&mut self, name: &str, members: Vec<NodeIndex>) -> NodeIndex {
        self.class_decl(TypeDeclData {
            modifiers: Modifiers::PUBLIC,
            name: name.to_string(),
            members: members.into(),
            ..Default::default()
        })
    }

    pub fn interface(&mut self, name: &str, members: Vec<NodeIndex>) -> NodeIndex {
        self.class_decl(TypeDeclData {
            modifiers: Modifiers::PUBLIC,
            name: name.to_string(),
            is_interface: true,
            members: members.into(),
            ..Default::default()
        })
    }

    pub fn enum_decl(&mut self, data: TypeDeclData) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena
            .add_type_decl(SyntaxKind::EnumDeclaration, pos, end, data)
    }

    pub fn annotation_decl(&mut self, data: TypeDeclData) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena
            .add_type_decl(SyntaxKind::AnnotationDeclaration, pos, end, data)
    }

    pub fn enum_constant(&mut self, name: &str, arguments: Vec<NodeIndex>) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_enum_constant(
            SyntaxKind::EnumConstant,
            pos,
            end,
            EnumConstantData {
                name: name.to_string(),
                arguments: arguments.into(),
            },
        )
    }

    pub fn declarator(&mut self, name: &str, initializer: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_declarator(
            SyntaxKind::VariableDeclarator,
            pos,
            end,
            VariableDeclaratorData {
                name: name.to_string(),
                initializer,
            },
        )
    }

    /// Field declaration with one declarator per `(name, initializer)`.
    pub fn field(
        &mut self,
        modifiers: Modifiers,
        ty: NodeIndex,
        declarators: &[(&str, NodeIndex)],
    ) -> NodeIndex {
        let declarators: NodeList = declarators
            .iter()
            .map(|(name, init)| self.declarator(name, *init))
            .collect();
        let (pos, end) = self.span();
        self.arena.add_variable_decl(
            SyntaxKind::FieldDeclaration,
            pos,
            end,
            VariableDeclData {
                modifiers,
                ty,
                declarators,
            },
        )
    }

    pub fn method_decl(&mut self, data: MethodData) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena
            .add_method(SyntaxKind::MethodDeclaration, pos, end, data)
    }

    /// Public method without type parameters.
    pub fn method(
        &mut self,
        return_type: NodeIndex,
        name: &str,
        parameters: Vec<NodeIndex>,
        body: NodeIndex,
    ) -> NodeIndex {
        self.method_decl(MethodData {
            modifiers: Modifiers::PUBLIC,
            return_type,
            name: name.to_string(),
            parameters: parameters.into(),
            body,
            ..Default::default()
        })
    }

    pub fn constructor_decl(&mut self, data: MethodData) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena
            .add_method(SyntaxKind::ConstructorDeclaration, pos, end, data)
    }

    pub fn constructor(&mut self, name: &str, parameters: Vec<NodeIndex>, body: NodeIndex) -> NodeIndex {
        self.constructor_decl(MethodData {
            modifiers: Modifiers::PUBLIC,
            name: name.to_string(),
            parameters: parameters.into(),
            body,
            ..Default::default()
        })
    }

    pub fn param(&mut self, ty: NodeIndex, name: &str) -> NodeIndex {
        self.parameter(ParameterData {
            ty,
            name: name.to_string(),
            ..Default::default()
        })
    }

    pub fn varargs_param(&mut self, ty: NodeIndex, name: &str) -> NodeIndex {
        self.parameter(ParameterData {
            ty,
            is_varargs: true,
            name: name.to_string(),
            ..Default::default()
        })
    }

    /// Implicitly typed lambda parameter.
    pub fn inferred_param(&mut self, name: &str) -> NodeIndex {
        self.parameter(ParameterData {
            name: name.to_string(),
            ..Default::default()
        })
    }

    pub fn parameter(&mut self, data: ParameterData) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_parameter(SyntaxKind::Parameter, pos, end, data)
    }

    pub fn type_param(&mut self, name: &str, bounds: Vec<NodeIndex>) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_type_parameter(
            SyntaxKind::TypeParameter,
            pos,
            end,
            TypeParameterData {
                name: name.to_string(),
                bounds: bounds.into(),
            },
        )
    }

    pub fn initializer(&mut self, is_static: bool, body: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_initializer(
            SyntaxKind::InitializerDeclaration,
            pos,
            end,
            InitializerData { is_static, body },
        )
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub fn block(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_block(
            SyntaxKind::Block,
            pos,
            end,
            BlockData {
                statements: statements.into(),
            },
        )
    }

    /// Local variable declaration with one declarator per `(name, initializer)`.
    pub fn local_var(&mut self, ty: NodeIndex, declarators: &[(&str, NodeIndex)]) -> NodeIndex {
        let declarators: NodeList = declarators
            .iter()
            .map(|(name, init)| self.declarator(name, *init))
            .collect();
        let (pos, end) = self.span();
        self.arena.add_variable_decl(
            SyntaxKind::LocalVariableDeclaration,
            pos,
            end,
            VariableDeclData {
                modifiers: Modifiers::empty(),
                ty,
                declarators,
            },
        )
    }

    pub fn expr_stmt(&mut self, expression: NodeIndex) -> NodeIndex {
        self.wrapper(SyntaxKind::ExpressionStatement, expression)
    }

    pub fn return_stmt(&mut self, expression: NodeIndex) -> NodeIndex {
        self.wrapper(SyntaxKind::ReturnStatement, expression)
    }

    fn wrapper(&mut self, kind: SyntaxKind, expression: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena
            .add_wrapper(kind, pos, end, WrapperData { expression })
    }

    pub fn if_stmt(&mut self, condition: NodeIndex, then_stmt: NodeIndex, else_stmt: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_conditional(
            SyntaxKind::IfStatement,
            pos,
            end,
            ConditionalData {
                condition,
                when_true: then_stmt,
                when_false: else_stmt,
            },
        )
    }

    pub fn while_stmt(&mut self, condition: NodeIndex, body: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena
            .add_loop(SyntaxKind::WhileStatement, pos, end, LoopData { condition, body })
    }

    pub fn for_stmt(
        &mut self,
        initialization: Vec<NodeIndex>,
        compare: NodeIndex,
        update: Vec<NodeIndex>,
        body: NodeIndex,
    ) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_for(
            SyntaxKind::ForStatement,
            pos,
            end,
            ForData {
                initialization: initialization.into(),
                compare,
                update: update.into(),
                body,
            },
        )
    }

    /// `for (ty name : iterable) body`
    pub fn for_each(&mut self, ty: NodeIndex, name: &str, iterable: NodeIndex, body: NodeIndex) -> NodeIndex {
        let variable = self.local_var(ty, &[(name, NodeIndex::NONE)]);
        let (pos, end) = self.span();
        self.arena.add_for_each(
            SyntaxKind::ForEachStatement,
            pos,
            end,
            ForEachData {
                variable,
                iterable,
                body,
            },
        )
    }

    pub fn try_stmt(&mut self, try_block: NodeIndex, catch_clauses: Vec<NodeIndex>, finally_block: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_try(
            SyntaxKind::TryStatement,
            pos,
            end,
            TryData {
                resources: NodeList::new(),
                try_block,
                catch_clauses: catch_clauses.into(),
                finally_block,
            },
        )
    }

    pub fn catch_clause(&mut self, parameter: NodeIndex, body: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_catch_clause(
            SyntaxKind::CatchClause,
            pos,
            end,
            CatchData { parameter, body },
        )
    }

    /// `this(args)` when `is_this`, `super(args)` otherwise.
    pub fn explicit_ctor_call(&mut self, is_this: bool, arguments: Vec<NodeIndex>) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_explicit_ctor_call(
            SyntaxKind::ExplicitConstructorInvocation,
            pos,
            end,
            ExplicitCtorCallData {
                is_this,
                expression: NodeIndex::NONE,
                type_arguments: None,
                arguments: arguments.into(),
            },
        )
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn literal(&mut self, kind: SyntaxKind, text: &str) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_literal(
            kind,
            pos,
            end,
            LiteralData {
                text: text.to_string(),
            },
        )
    }

    pub fn int_lit(&mut self, text: &str) -> NodeIndex {
        self.literal(SyntaxKind::IntegerLiteral, text)
    }

    pub fn long_lit(&mut self, text: &str) -> NodeIndex {
        self.literal(SyntaxKind::LongLiteral, text)
    }

    pub fn double_lit(&mut self, text: &str) -> NodeIndex {
        self.literal(SyntaxKind::DoubleLiteral, text)
    }

    pub fn char_lit(&mut self, text: &str) -> NodeIndex {
        self.literal(SyntaxKind::CharLiteral, text)
    }

    pub fn string_lit(&mut self, text: &str) -> NodeIndex {
        self.literal(SyntaxKind::StringLiteral, text)
    }

    pub fn bool_lit(&mut self, value: bool) -> NodeIndex {
        self.literal(SyntaxKind::BooleanLiteral, if value { "true" } else { "false" })
    }

    pub fn null_lit(&mut self) -> NodeIndex {
        self.literal(SyntaxKind::NullLiteral, "null")
    }

    pub fn name(&mut self, name: &str) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_name(
            SyntaxKind::NameExpression,
            pos,
            end,
            NameData {
                name: name.to_string(),
            },
        )
    }

    /// Dotted expression name: `a.b.c` becomes field accesses over a name.
    pub fn qualified_name(&mut self, dotted: &str) -> NodeIndex {
        let mut segments = dotted.split('.');
        let mut current = self.name(segments.next().unwrap_or_default());
        for segment in segments {
            current = self.field_access(current, segment);
        }
        current
    }

    pub fn field_access(&mut self, scope: NodeIndex, name: &str) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_field_access(
            SyntaxKind::FieldAccessExpression,
            pos,
            end,
            FieldAccessData {
                scope,
                name: name.to_string(),
            },
        )
    }

    /// Method call; pass `NodeIndex::NONE` as `scope` for unqualified calls.
    pub fn call(&mut self, scope: NodeIndex, name: &str, arguments: Vec<NodeIndex>) -> NodeIndex {
        self.method_call(MethodCallData {
            scope,
            type_arguments: None,
            name: name.to_string(),
            arguments: arguments.into(),
        })
    }

    pub fn method_call(&mut self, data: MethodCallData) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena
            .add_method_call(SyntaxKind::MethodCallExpression, pos, end, data)
    }

    /// `new ty(arguments)`; `ty` must be a class type node.
    pub fn new_object(&mut self, ty: NodeIndex, arguments: Vec<NodeIndex>) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_object_creation(
            SyntaxKind::ObjectCreationExpression,
            pos,
            end,
            ObjectCreationData {
                scope: NodeIndex::NONE,
                ty,
                type_arguments: None,
                arguments: arguments.into(),
            },
        )
    }

    pub fn lambda(&mut self, parameters: Vec<NodeIndex>, body: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_lambda(
            SyntaxKind::LambdaExpression,
            pos,
            end,
            LambdaData {
                parameters: parameters.into(),
                body,
            },
        )
    }

    pub fn conditional(&mut self, condition: NodeIndex, when_true: NodeIndex, when_false: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_conditional(
            SyntaxKind::ConditionalExpression,
            pos,
            end,
            ConditionalData {
                condition,
                when_true,
                when_false,
            },
        )
    }

    pub fn binary(&mut self, left: NodeIndex, operator: BinaryOperator, right: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_binary_expr(
            SyntaxKind::BinaryExpression,
            pos,
            end,
            BinaryExprData {
                left,
                operator,
                right,
            },
        )
    }

    pub fn unary(&mut self, operator: UnaryOperator, expression: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_unary_expr(
            SyntaxKind::UnaryExpression,
            pos,
            end,
            UnaryExprData {
                operator,
                expression,
            },
        )
    }

    pub fn array_access(&mut self, name: NodeIndex, index: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_array_access(
            SyntaxKind::ArrayAccessExpression,
            pos,
            end,
            ArrayAccessData { name, index },
        )
    }

    pub fn array_creation(&mut self, data: ArrayCreationData) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena
            .add_array_creation(SyntaxKind::ArrayCreationExpression, pos, end, data)
    }

    pub fn assign(&mut self, target: NodeIndex, operator: AssignOperator, value: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_assignment(
            SyntaxKind::AssignExpression,
            pos,
            end,
            AssignData {
                target,
                operator,
                value,
            },
        )
    }

    pub fn cast(&mut self, ty: NodeIndex, expression: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena
            .add_cast(SyntaxKind::CastExpression, pos, end, CastData { ty, expression })
    }

    pub fn instance_of(&mut self, expression: NodeIndex, ty: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_instance_of(
            SyntaxKind::InstanceOfExpression,
            pos,
            end,
            InstanceOfData {
                expression,
                ty,
                pattern: NodeIndex::NONE,
            },
        )
    }

    /// `expression instanceof ty name`
    pub fn instance_of_pattern(&mut self, expression: NodeIndex, ty: NodeIndex, name: &str) -> NodeIndex {
        let (pos, end) = self.span();
        let pattern = self.arena.add_type_pattern(
            SyntaxKind::TypePattern,
            pos,
            end,
            TypePatternData {
                modifiers: Modifiers::empty(),
                ty,
                name: name.to_string(),
            },
        );
        let (pos, end) = self.span();
        self.arena.add_instance_of(
            SyntaxKind::InstanceOfExpression,
            pos,
            end,
            InstanceOfData {
                expression,
                ty: NodeIndex::NONE,
                pattern,
            },
        )
    }

    pub fn enclosed(&mut self, expression: NodeIndex) -> NodeIndex {
        self.wrapper(SyntaxKind::EnclosedExpression, expression)
    }

    pub fn this_expr(&mut self) -> NodeIndex {
        self.qualifier(SyntaxKind::ThisExpression, NodeIndex::NONE)
    }

    /// `Outer.this`
    pub fn qualified_this(&mut self, type_name: NodeIndex) -> NodeIndex {
        self.qualifier(SyntaxKind::ThisExpression, type_name)
    }

    pub fn super_expr(&mut self) -> NodeIndex {
        self.qualifier(SyntaxKind::SuperExpression, NodeIndex::NONE)
    }

    fn qualifier(&mut self, kind: SyntaxKind, type_name: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena
            .add_qualifier(kind, pos, end, QualifierData { type_name })
    }

    pub fn class_expr(&mut self, ty: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena
            .add_class_expr(SyntaxKind::ClassExpression, pos, end, ClassExprData { ty })
    }

    // =========================================================================
    // Types
    // =========================================================================

    pub fn primitive(&mut self, kind: PrimitiveKind) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_primitive_type(
            SyntaxKind::PrimitiveType,
            pos,
            end,
            PrimitiveTypeData { kind },
        )
    }

    pub fn int_type(&mut self) -> NodeIndex {
        self.primitive(PrimitiveKind::Int)
    }

    pub fn void_type(&mut self) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_token(SyntaxKind::VoidType, pos, end)
    }

    pub fn var_type(&mut self) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_token(SyntaxKind::VarType, pos, end)
    }

    /// Class type from a possibly dotted name, without type arguments.
    pub fn class_type(&mut self, dotted: &str) -> NodeIndex {
        self.class_type_with(dotted, None)
    }

    /// Class type whose last segment carries `arguments`.
    pub fn generic_type(&mut self, dotted: &str, arguments: Vec<NodeIndex>) -> NodeIndex {
        self.class_type_with(dotted, Some(arguments.into()))
    }

    /// `Name<>`
    pub fn diamond_type(&mut self, dotted: &str) -> NodeIndex {
        self.class_type_with(dotted, Some(NodeList::new()))
    }

    fn class_type_with(&mut self, dotted: &str, type_arguments: Option<NodeList>) -> NodeIndex {
        let segments: Vec<&str> = dotted.split('.').collect();
        let last = segments.len().saturating_sub(1);
        let mut scope = NodeIndex::NONE;
        let mut type_arguments = type_arguments;
        for (i, segment) in segments.iter().enumerate() {
            let (pos, end) = self.span();
            scope = self.arena.add_class_type(
                SyntaxKind::ClassOrInterfaceType,
                pos,
                end,
                ClassTypeData {
                    scope,
                    name: segment.to_string(),
                    type_arguments: if i == last { type_arguments.take() } else { None },
                },
            );
        }
        scope
    }

    pub fn array_type(&mut self, component: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena
            .add_array_type(SyntaxKind::ArrayType, pos, end, ArrayTypeData { component })
    }

    /// `?`, `? extends B` or `? super B`.
    pub fn wildcard(&mut self, extended: NodeIndex, super_bound: NodeIndex) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_wildcard(
            SyntaxKind::WildcardType,
            pos,
            end,
            WildcardData {
                extended,
                super_bound,
            },
        )
    }

    pub fn union_type(&mut self, elements: Vec<NodeIndex>) -> NodeIndex {
        self.type_list(SyntaxKind::UnionType, elements)
    }

    pub fn intersection_type(&mut self, elements: Vec<NodeIndex>) -> NodeIndex {
        self.type_list(SyntaxKind::IntersectionType, elements)
    }

    fn type_list(&mut self, kind: SyntaxKind, elements: Vec<NodeIndex>) -> NodeIndex {
        let (pos, end) = self.span();
        self.arena.add_type_list(
            kind,
            pos,
            end,
            TypeListData {
                elements: elements.into(),
            },
        )
    }
}

#[cfg(test)]
#[path = "../tests/node_arena_tests.rs"]
mod tests;
