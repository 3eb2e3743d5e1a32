//! Declaration queries.
//!
//! `declaration` answers what a node denotes: a reference (name, field
//! access, call, creation, class type) resolves to the declaration it
//! names, and a declaring node resolves to the declaration it introduces.
//! `type_declaration` answers which reference type a node names or sits in.

use crate::cache::QueryKind;
use crate::name_resolution::Qualifier;
use crate::state::ResolverState;
use jsolve_common::ResolveResult;
use jsolve_solver::solvers::binary_name_of;
use jsolve_solver::{
    DeclarationOrigin, LocalVariableDeclaration, ReferenceType, ResolvedDeclaration, ResolvedType,
    SymbolReference, TypeDeclaration,
};
use jsolve_syntax::{NodeArena, NodeIndex, SyntaxKind};
use std::sync::Arc;
use tracing::trace;

impl<'a> ResolverState<'a> {
    /// The declaration `node` denotes or introduces.
    pub(crate) fn declaration(&mut self, node: NodeIndex) -> ResolveResult<SymbolReference<ResolvedDeclaration>> {
        self.query(QueryKind::Declaration, node, |state| state.compute_declaration(node))
    }

    fn compute_declaration(&mut self, node: NodeIndex) -> ResolveResult<SymbolReference<ResolvedDeclaration>> {
        let Some(kind) = self.kind_of(node) else {
            return Err(self.unsupported("missing node", node));
        };
        trace!(node = node.0, kind = kind.name(), "declaration");
        match kind {
            SyntaxKind::NameExpression => self.name_declaration(node),
            SyntaxKind::FieldAccessExpression => self.field_access_declaration(node),
            SyntaxKind::MethodCallExpression => Ok(self
                .solve_method_call(node)?
                .map(|call| ResolvedDeclaration::Method(call.usage.declaration))),
            SyntaxKind::ObjectCreationExpression => Ok(self
                .solve_object_creation(node)?
                .map(|creation| ResolvedDeclaration::Constructor(creation.call.usage.declaration))),
            SyntaxKind::ExplicitConstructorInvocation => Ok(self
                .solve_explicit_constructor_call(node)?
                .map(|call| ResolvedDeclaration::Constructor(call.usage.declaration))),
            SyntaxKind::ClassOrInterfaceType => self.class_type_declaration(node),
            kind if kind.is_type_declaration() => {
                Ok(SymbolReference::Solved(ResolvedDeclaration::Type(self.type_declaration_at(node)?)))
            }
            SyntaxKind::MethodDeclaration | SyntaxKind::ConstructorDeclaration => {
                self.callable_declared_at(node).map(SymbolReference::Solved)
            }
            SyntaxKind::VariableDeclarator => self.declarator_declaration(node),
            SyntaxKind::EnumConstant => Ok(SymbolReference::Solved(ResolvedDeclaration::Field(
                self.field_declared_at(node)?,
            ))),
            SyntaxKind::Parameter => match self.symbol_declared_at(node) {
                Some(symbol) => self.local_declaration(&symbol).map(SymbolReference::Solved),
                None => Err(self.unsupported("parameter outside a scope", node)),
            },
            SyntaxKind::TypeParameter => Ok(SymbolReference::Solved(ResolvedDeclaration::TypeParameter(
                self.qualifier().type_parameter(node)?,
            ))),
            SyntaxKind::TypePattern => {
                let data = self.data(node, "type pattern", NodeArena::get_type_pattern)?;
                let ty = self.type_node(data.ty)?;
                Ok(SymbolReference::Solved(ResolvedDeclaration::LocalVariable(
                    LocalVariableDeclaration {
                        name: data.name.as_str().into(),
                        ty,
                        origin: self.unit.node_ref(node),
                    },
                )))
            }
            other => Err(self.unsupported(format!("declaration of a {}", other.name()), node)),
        }
    }

    /// A simple name: a variable first, then a type.
    fn name_declaration(&mut self, node: NodeIndex) -> ResolveResult<SymbolReference<ResolvedDeclaration>> {
        let name = self.arena().name_of(node).unwrap_or_default();
        if let SymbolReference::Solved(symbol) = self.solve_value_name(name, node)? {
            return self.value_declaration(symbol).map(SymbolReference::Solved);
        }
        match self.qualifier().qualify(name, node)? {
            Some(ty) => Ok(SymbolReference::Solved(ResolvedDeclaration::Type(
                self.hierarchy().declaration(&ty)?,
            ))),
            None => Ok(SymbolReference::Unsolved),
        }
    }

    fn field_access_declaration(&mut self, node: NodeIndex) -> ResolveResult<SymbolReference<ResolvedDeclaration>> {
        let data = self.data(node, "field access", NodeArena::get_field_access)?;
        let owner = match self.classify_qualifier(data.scope) {
            Ok(Qualifier::Value(ty)) => {
                if ty.is_array() && data.name == "length" {
                    return Err(self.unsupported("declaration of array length", node));
                }
                self.receiver_of(&ty, node)?
            }
            Ok(Qualifier::Type(owner)) => owner,
            Ok(Qualifier::Package(package)) => {
                let dotted = format!("{package}.{}", data.name);
                if !self.solver().has_type(&dotted) {
                    return Ok(SymbolReference::Unsolved);
                }
                let binary = binary_name_of(self.solver(), &dotted);
                let ty = ReferenceType::new(dotted.as_str(), binary, Vec::new());
                return Ok(SymbolReference::Solved(ResolvedDeclaration::Type(
                    self.hierarchy().declaration(&ty)?,
                )));
            }
            Err(error) if error.is_unsolved() => return Ok(SymbolReference::Unsolved),
            Err(error) => return Err(error),
        };

        if let Some(field) = self.lookup().field(&owner, &data.name)? {
            return Ok(SymbolReference::Solved(ResolvedDeclaration::Field(field.declaration)));
        }
        match self.qualifier().member_of(&owner, &data.name)? {
            Some(member) => Ok(SymbolReference::Solved(ResolvedDeclaration::Type(
                self.hierarchy().declaration(&member)?,
            ))),
            None => Ok(SymbolReference::Unsolved),
        }
    }

    /// A written class type: a type variable in scope, else a reference type.
    fn class_type_declaration(&mut self, node: NodeIndex) -> ResolveResult<SymbolReference<ResolvedDeclaration>> {
        let data = self.data(node, "class type", NodeArena::get_class_type)?;
        let qualifier = self.qualifier();
        if data.scope.is_none()
            && let Some(param) = qualifier.type_parameter_in_scope(&data.name, node)
        {
            return Ok(SymbolReference::Solved(ResolvedDeclaration::TypeParameter(
                qualifier.type_parameter(param)?,
            )));
        }
        match self.type_node(node) {
            Ok(ResolvedType::Reference(ty)) => Ok(SymbolReference::Solved(ResolvedDeclaration::Type(
                self.hierarchy().declaration(&ty)?,
            ))),
            Ok(other) => Err(self.unsupported(format!("declaration of {}", other.describe()), node)),
            Err(error) if error.is_unsolved() => Ok(SymbolReference::Unsolved),
            Err(error) => Err(error),
        }
    }

    /// The method or constructor a member node declares.
    fn callable_declared_at(&self, node: NodeIndex) -> ResolveResult<ResolvedDeclaration> {
        let decl = self.enclosing_type_declaration(node)?;
        let origin = Some(self.unit.node_ref(node));
        let declared_here = |o: &DeclarationOrigin| o.source_node() == origin;
        if self.kind_of(node) == Some(SyntaxKind::ConstructorDeclaration) {
            if let Some(ctor) = decl.constructors.iter().find(|c| declared_here(&c.origin)) {
                return Ok(ResolvedDeclaration::Constructor(ctor.clone()));
            }
        } else if let Some(method) = decl.methods.iter().find(|m| declared_here(&m.origin)) {
            return Ok(ResolvedDeclaration::Method(method.clone()));
        }
        Err(self.unsolved(self.reference_name(node), node))
    }

    /// A declarator declares a field in a type body and a local elsewhere.
    fn declarator_declaration(&mut self, node: NodeIndex) -> ResolveResult<SymbolReference<ResolvedDeclaration>> {
        let owner = self.navigator().parent(node).and_then(|p| self.kind_of(p));
        if owner == Some(SyntaxKind::FieldDeclaration) {
            return Ok(SymbolReference::Solved(ResolvedDeclaration::Field(
                self.field_declared_at(node)?,
            )));
        }
        match self.symbol_declared_at(node) {
            Some(symbol) => self.local_declaration(&symbol).map(SymbolReference::Solved),
            None => Err(self.unsupported("variable declarator outside a scope", node)),
        }
    }

    // =========================================================================
    // Type declarations
    // =========================================================================

    /// The reference type `node` names, or the one it is nested in.
    pub(crate) fn type_declaration(&mut self, node: NodeIndex) -> ResolveResult<Arc<TypeDeclaration>> {
        self.query(QueryKind::TypeDeclaration, node, |state| {
            match state.kind_of(node) {
                Some(kind) if kind.is_type_declaration() => state.type_declaration_at(node),
                Some(SyntaxKind::ClassOrInterfaceType) => match state.type_node(node)? {
                    ResolvedType::Reference(ty) => state.hierarchy().declaration(&ty),
                    ResolvedType::TypeVariable(var) => state.hierarchy().declaration(&var.erasure),
                    other => Err(state.unsupported(format!("{} is not a reference type", other.describe()), node)),
                },
                Some(SyntaxKind::NameExpression | SyntaxKind::FieldAccessExpression) => {
                    match state.classify_qualifier(node) {
                        Ok(Qualifier::Type(ty)) => state.hierarchy().declaration(&ty),
                        Ok(_) => state.enclosing_type_declaration(node),
                        Err(error) if error.is_unsolved() => state.enclosing_type_declaration(node),
                        Err(error) => Err(error),
                    }
                }
                _ => state.enclosing_type_declaration(node),
            }
        })
    }
}
