//! Name Resolution Module
//!
//! Resolves simple names in value position by walking the enclosing scopes
//! outward from the reference. It handles:
//! - Locals, parameters, pattern bindings, lambda and catch parameters,
//!   through the symbol declarator at each enclosing node
//! - Fields declared on an enclosing type, then fields it inherits
//! - Single and on-demand static imports at the compilation unit
//! - Classification of ambiguous qualifiers as value, type or package
//!
//! The first scope that knows the name wins, so a local visible at the
//! reference hides a field of the same name wherever the field is declared.

use crate::state::ResolverState;
use jsolve_binder::{DeferredType, ScopeSymbol, SymbolDeclarator, SymbolKind};
use jsolve_common::ResolveResult;
use jsolve_solver::solvers::{binary_name_of, qualified_name_of};
use jsolve_solver::types::ITERABLE;
use jsolve_solver::{
    DeclarationOrigin, FieldDeclaration, FieldUsage, LocalVariableDeclaration, MethodUsage,
    ParameterDeclaration, PrimitiveKind, ReferenceType, ResolvedDeclaration, ResolvedType,
    SymbolReference,
};
use jsolve_syntax::{NodeArena, NodeIndex, SyntaxKind};
use std::sync::Arc;
use tracing::trace;

/// What a simple name denotes in value position.
#[derive(Clone, Debug)]
pub(crate) enum ValueSymbol {
    /// Local variable, parameter, pattern binding, lambda or catch parameter.
    Local(ScopeSymbol),
    Field(FieldUsage),
}

/// An ambiguous name (JLS 6.5.2) after classification.
#[derive(Clone, Debug)]
pub(crate) enum Qualifier {
    Value(ResolvedType),
    Type(ReferenceType),
    Package(String),
}

impl<'a> ResolverState<'a> {
    // =========================================================================
    // Value names
    // =========================================================================

    /// The variable `name` denotes at `reference`.
    pub(crate) fn solve_value_name(
        &mut self,
        name: &str,
        reference: NodeIndex,
    ) -> ResolveResult<SymbolReference<ValueSymbol>> {
        let arena = self.arena();
        let declarator = SymbolDeclarator::new(arena);
        let scopes: Vec<NodeIndex> = self.navigator().ancestors(reference).collect();

        for scope in scopes {
            match arena.kind_of(scope) {
                Some(kind) if kind.is_type_declaration() => {
                    if let Some(field) = self.field_in_type_body(&declarator, scope, name)? {
                        trace!(name, owner = %field.declaring_type, "name is a field");
                        return Ok(SymbolReference::Solved(ValueSymbol::Field(field)));
                    }
                }
                Some(SyntaxKind::CompilationUnit) => {
                    return Ok(self
                        .static_import_field(name)?
                        .map(ValueSymbol::Field)
                        .into());
                }
                _ => {
                    if let Some(symbol) = declarator.solve_symbol(scope, reference, name) {
                        trace!(name, scope = scope.0, kind = ?symbol.kind, "name is a local");
                        return Ok(SymbolReference::Solved(ValueSymbol::Local(symbol)));
                    }
                }
            }
        }
        Ok(SymbolReference::Unsolved)
    }

    /// Field `name` declared on the type at `type_node`, else inherited by it.
    fn field_in_type_body(
        &mut self,
        declarator: &SymbolDeclarator<'a>,
        type_node: NodeIndex,
        name: &str,
    ) -> ResolveResult<Option<FieldUsage>> {
        let declared = declarator
            .declared_symbols(type_node)
            .into_iter()
            .any(|symbol| symbol.is_field() && symbol.name == name);
        // Local classes are only reachable by walking past them.
        if !declared && qualified_name_of(self.unit, type_node).is_none() {
            return Ok(None);
        }
        let this = self.type_declaration_at(type_node)?.declared_type();
        if declared {
            return self.lookup().field(&this, name);
        }
        Ok(self
            .lookup()
            .inherited_fields(&this)?
            .into_iter()
            .find(|field| &*field.declaration.name == name))
    }

    /// Types named by static imports that could supply member `name`:
    /// single imports of `name` first, then on-demand imports.
    fn static_import_owners(&self, name: &str) -> ResolveResult<Vec<ReferenceType>> {
        let root = self.unit.root();
        let qualifier = self.qualifier();
        let imports: Vec<_> = self.unit.imports().filter(|i| i.is_static).collect();
        let mut owners = Vec::new();
        for import in imports.iter().filter(|i| !i.is_asterisk) {
            if let Some((owner, member)) = import.name.rsplit_once('.')
                && member == name
                && let Some(ty) = qualifier.qualify(owner, root)?
            {
                owners.push(ty);
            }
        }
        for import in imports.iter().filter(|i| i.is_asterisk) {
            if let Some(ty) = qualifier.qualify(&import.name, root)? {
                owners.push(ty);
            }
        }
        Ok(owners)
    }

    fn static_import_field(&mut self, name: &str) -> ResolveResult<Option<FieldUsage>> {
        for owner in self.static_import_owners(name)? {
            if let Some(field) = self.lookup().field(&owner, name)?
                && field.declaration.is_static()
            {
                trace!(name, owner = %owner, "name is a statically imported field");
                return Ok(Some(field));
            }
        }
        Ok(None)
    }

    /// Static methods named `name` made visible by static imports.
    pub(crate) fn static_import_methods(&mut self, name: &str) -> ResolveResult<Vec<MethodUsage>> {
        for owner in self.static_import_owners(name)? {
            let methods: Vec<MethodUsage> = self
                .lookup()
                .methods_named(&owner, name)?
                .into_iter()
                .filter(|m| m.declaration.is_static())
                .collect();
            if !methods.is_empty() {
                return Ok(methods);
            }
        }
        Ok(Vec::new())
    }

    /// Candidates for an unqualified call: members of the innermost
    /// enclosing type that has any method named `name`, else static imports.
    pub(crate) fn unqualified_methods(
        &mut self,
        name: &str,
        call: NodeIndex,
    ) -> ResolveResult<Vec<MethodUsage>> {
        let arena = self.arena();
        let types: Vec<NodeIndex> = self
            .navigator()
            .ancestors(call)
            .filter(|&n| arena.kind_of(n).is_some_and(SyntaxKind::is_type_declaration))
            .collect();
        for type_node in types {
            let decl = self.type_declaration_at(type_node)?;
            let methods = self.lookup().methods_named(&decl.declared_type(), name)?;
            if !methods.is_empty() {
                return Ok(methods);
            }
        }
        self.static_import_methods(name)
    }

    // =========================================================================
    // Symbol types and declarations
    // =========================================================================

    pub(crate) fn value_type(&mut self, symbol: &ValueSymbol) -> ResolveResult<ResolvedType> {
        match symbol {
            ValueSymbol::Field(field) => Ok(field.ty.clone()),
            ValueSymbol::Local(local) => self.symbol_type(local),
        }
    }

    /// The type of a scope symbol, computing deferred types on demand.
    pub(crate) fn symbol_type(&mut self, symbol: &ScopeSymbol) -> ResolveResult<ResolvedType> {
        let ty = match symbol.declared_type {
            DeferredType::Declared(type_node) => self.type_node(type_node)?,
            DeferredType::Inferred(initializer) => {
                self.inferred_variable_type(initializer, symbol.decl_node)?
            }
            DeferredType::LambdaParameter { lambda, index } => {
                self.lambda_parameter_type(lambda, index)?
            }
            DeferredType::ForEachElement(iterable) => self.element_type(iterable)?,
            DeferredType::DeclaringType(type_node) => {
                ResolvedType::Reference(self.type_declaration_at(type_node)?.raw_type())
            }
        };
        Ok(if symbol.is_varargs { ty.array_of(1) } else { ty })
    }

    /// `var x = init`: the type of `init`.
    pub(crate) fn inferred_variable_type(
        &mut self,
        initializer: NodeIndex,
        declarator: NodeIndex,
    ) -> ResolveResult<ResolvedType> {
        if initializer.is_none() {
            return Err(self.unsupported("var without initializer", declarator));
        }
        if self.kind_of(initializer) == Some(SyntaxKind::LambdaExpression) {
            return Err(self.unsupported("var initialized with a lambda", declarator));
        }
        match self.expression_type(initializer)? {
            ResolvedType::Null => Err(self.unsupported("var initialized with null", declarator)),
            ty => Ok(ty),
        }
    }

    /// Element type of an array or `Iterable` expression.
    pub(crate) fn element_type(&mut self, iterable: NodeIndex) -> ResolveResult<ResolvedType> {
        let ty = self.expression_type(iterable)?;
        if let Some(component) = ty.component() {
            return Ok(component.clone());
        }
        let receiver = self.receiver_of(&ty, iterable)?;
        match self.hierarchy().find_ancestor(&receiver, ITERABLE)? {
            Some(found) => Ok(found
                .type_arguments
                .first()
                .map(ResolvedType::upper_bound)
                .unwrap_or_else(ResolvedType::object)),
            None => Err(self.unsupported(format!("for-each over {}", ty.describe()), iterable)),
        }
    }

    pub(crate) fn value_declaration(&mut self, symbol: ValueSymbol) -> ResolveResult<ResolvedDeclaration> {
        match symbol {
            ValueSymbol::Field(field) => Ok(ResolvedDeclaration::Field(field.declaration)),
            ValueSymbol::Local(local) => self.local_declaration(&local),
        }
    }

    pub(crate) fn local_declaration(&mut self, symbol: &ScopeSymbol) -> ResolveResult<ResolvedDeclaration> {
        if symbol.is_field() {
            return self
                .field_declared_at(symbol.decl_node)
                .map(ResolvedDeclaration::Field);
        }
        let ty = self.symbol_type(symbol)?;
        let origin = self.unit.node_ref(symbol.decl_node);
        let name: Arc<str> = symbol.name.as_str().into();
        Ok(match symbol.kind {
            SymbolKind::Parameter | SymbolKind::LambdaParameter | SymbolKind::CatchParameter => {
                ResolvedDeclaration::Parameter(ParameterDeclaration {
                    name,
                    ty,
                    is_varargs: symbol.is_varargs,
                    origin: DeclarationOrigin::Source(origin),
                })
            }
            SymbolKind::LocalVariable | SymbolKind::PatternBinding | SymbolKind::Field | SymbolKind::EnumConstant => {
                ResolvedDeclaration::LocalVariable(LocalVariableDeclaration { name, ty, origin })
            }
        })
    }

    /// The field declared by a field declarator or enum constant node.
    pub(crate) fn field_declared_at(&self, node: NodeIndex) -> ResolveResult<Arc<FieldDeclaration>> {
        let decl = self.enclosing_type_declaration(node)?;
        let origin = self.unit.node_ref(node);
        decl.fields
            .iter()
            .find(|field| field.origin.source_node() == Some(origin))
            .cloned()
            .ok_or_else(|| self.unsolved(self.reference_name(node), node))
    }

    /// The symbol a declaring node (parameter, local declarator) introduces
    /// into its scope.
    pub(crate) fn symbol_declared_at(&self, node: NodeIndex) -> Option<ScopeSymbol> {
        let arena: &NodeArena = self.arena();
        let declarator = SymbolDeclarator::new(arena);
        self.navigator()
            .ancestors(node)
            .filter(|&n| arena.kind_of(n).is_some_and(SyntaxKind::is_scope))
            .find_map(|scope| {
                declarator
                    .declared_symbols(scope)
                    .into_iter()
                    .find(|symbol| symbol.decl_node == node)
            })
    }

    // =========================================================================
    // Ambiguous names
    // =========================================================================

    /// Classify the qualifier of a member access as a value, a type or a
    /// package prefix, in that order.
    pub(crate) fn classify_qualifier(&mut self, node: NodeIndex) -> ResolveResult<Qualifier> {
        let arena = self.arena();
        match arena.kind_of(node) {
            Some(SyntaxKind::NameExpression) => {
                let name = arena.name_of(node).unwrap_or_default();
                if let SymbolReference::Solved(symbol) = self.solve_value_name(name, node)? {
                    return Ok(Qualifier::Value(self.value_type(&symbol)?));
                }
                if let Some(ty) = self.qualifier().qualify(name, node)? {
                    return Ok(Qualifier::Type(ty));
                }
                Ok(Qualifier::Package(name.to_string()))
            }
            Some(SyntaxKind::FieldAccessExpression) => {
                let data = self.data(node, "field access", NodeArena::get_field_access)?;
                match self.classify_qualifier(data.scope)? {
                    Qualifier::Value(ty) => {
                        if ty.is_array() && data.name == "length" {
                            return Ok(Qualifier::Value(ResolvedType::Primitive(PrimitiveKind::Int)));
                        }
                        let receiver = self.receiver_of(&ty, node)?;
                        match self.lookup().field(&receiver, &data.name)? {
                            Some(field) => Ok(Qualifier::Value(field.ty)),
                            None => Err(self.unsolved(data.name.as_str(), node)),
                        }
                    }
                    Qualifier::Type(owner) => {
                        if let Some(field) = self.lookup().field(&owner, &data.name)? {
                            return Ok(Qualifier::Value(field.ty));
                        }
                        match self.qualifier().member_of(&owner, &data.name)? {
                            Some(member) => Ok(Qualifier::Type(member)),
                            None => Err(self.unsolved(data.name.as_str(), node)),
                        }
                    }
                    Qualifier::Package(package) => {
                        let dotted = format!("{package}.{}", data.name);
                        if self.solver().has_type(&dotted) {
                            let binary = binary_name_of(self.solver(), &dotted);
                            return Ok(Qualifier::Type(ReferenceType::new(
                                dotted.as_str(),
                                binary,
                                Vec::new(),
                            )));
                        }
                        Ok(Qualifier::Package(dotted))
                    }
                }
            }
            _ => Ok(Qualifier::Value(self.expression_type(node)?)),
        }
    }
}
