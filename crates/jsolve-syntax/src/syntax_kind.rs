//! The closed set of syntax node kinds.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // Declarations
    CompilationUnit,
    PackageDeclaration,
    ImportDeclaration,
    /// Class or interface, distinguished by `TypeDeclData::is_interface`.
    ClassDeclaration,
    EnumDeclaration,
    AnnotationDeclaration,
    EnumConstant,
    FieldDeclaration,
    VariableDeclarator,
    MethodDeclaration,
    ConstructorDeclaration,
    Parameter,
    TypeParameter,
    InitializerDeclaration,

    // Statements
    Block,
    LocalVariableDeclaration,
    ExpressionStatement,
    ReturnStatement,
    IfStatement,
    WhileStatement,
    ForStatement,
    ForEachStatement,
    TryStatement,
    CatchClause,
    ExplicitConstructorInvocation,

    // Literals
    IntegerLiteral,
    LongLiteral,
    FloatLiteral,
    DoubleLiteral,
    CharLiteral,
    StringLiteral,
    TextBlockLiteral,
    BooleanLiteral,
    NullLiteral,

    // Expressions
    NameExpression,
    FieldAccessExpression,
    MethodCallExpression,
    ObjectCreationExpression,
    LambdaExpression,
    ConditionalExpression,
    BinaryExpression,
    UnaryExpression,
    ArrayAccessExpression,
    ArrayCreationExpression,
    AssignExpression,
    CastExpression,
    InstanceOfExpression,
    EnclosedExpression,
    ThisExpression,
    SuperExpression,
    ClassExpression,

    // Patterns
    TypePattern,

    // Types
    PrimitiveType,
    ClassOrInterfaceType,
    ArrayType,
    VoidType,
    WildcardType,
    UnionType,
    IntersectionType,
    VarType,
}

impl SyntaxKind {
    /// Class, interface, enum or annotation declaration.
    pub const fn is_type_declaration(self) -> bool {
        matches!(
            self,
            Self::ClassDeclaration | Self::EnumDeclaration | Self::AnnotationDeclaration
        )
    }

    /// Method or constructor declaration.
    pub const fn is_callable_declaration(self) -> bool {
        matches!(self, Self::MethodDeclaration | Self::ConstructorDeclaration)
    }

    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::IntegerLiteral
                | Self::LongLiteral
                | Self::FloatLiteral
                | Self::DoubleLiteral
                | Self::CharLiteral
                | Self::StringLiteral
                | Self::TextBlockLiteral
                | Self::BooleanLiteral
                | Self::NullLiteral
        )
    }

    pub const fn is_expression(self) -> bool {
        self.is_literal()
            || matches!(
                self,
                Self::NameExpression
                    | Self::FieldAccessExpression
                    | Self::MethodCallExpression
                    | Self::ObjectCreationExpression
                    | Self::LambdaExpression
                    | Self::ConditionalExpression
                    | Self::BinaryExpression
                    | Self::UnaryExpression
                    | Self::ArrayAccessExpression
                    | Self::ArrayCreationExpression
                    | Self::AssignExpression
                    | Self::CastExpression
                    | Self::InstanceOfExpression
                    | Self::EnclosedExpression
                    | Self::ThisExpression
                    | Self::SuperExpression
                    | Self::ClassExpression
            )
    }

    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            Self::Block
                | Self::LocalVariableDeclaration
                | Self::ExpressionStatement
                | Self::ReturnStatement
                | Self::IfStatement
                | Self::WhileStatement
                | Self::ForStatement
                | Self::ForEachStatement
                | Self::TryStatement
                | Self::ExplicitConstructorInvocation
        )
    }

    pub const fn is_type(self) -> bool {
        matches!(
            self,
            Self::PrimitiveType
                | Self::ClassOrInterfaceType
                | Self::ArrayType
                | Self::VoidType
                | Self::WildcardType
                | Self::UnionType
                | Self::IntersectionType
                | Self::VarType
        )
    }

    /// Nodes that introduce names visible to their descendants.
    pub const fn is_scope(self) -> bool {
        self.is_type_declaration()
            || self.is_callable_declaration()
            || matches!(
                self,
                Self::CompilationUnit
                    | Self::LambdaExpression
                    | Self::Block
                    | Self::ForStatement
                    | Self::ForEachStatement
                    | Self::CatchClause
            )
    }

    /// Human-readable name used in diagnostics.
    pub fn name(self) -> String {
        format!("{self:?}")
    }
}
