//! The symbol resolver capability.

use jsolve_common::{ResolveError, ResolveResult};
use jsolve_solver::{DeclarationShape, ResolvedDeclaration, ResolvedType, TypeDeclaration};
use jsolve_syntax::{NodeIndex, SourceUnit};
use std::sync::Arc;

/// Point queries over syntax nodes of a source unit.
///
/// A failed query raises: a reference that names nothing is
/// [`ResolveError::UnsolvedSymbol`]; an ambiguous call is
/// [`ResolveError::AmbiguousOverload`].
pub trait SymbolResolver: Send + Sync {
    /// The declaration a reference denotes, or the one a declaring node
    /// introduces.
    fn resolve_declaration(&self, unit: &SourceUnit, node: NodeIndex) -> ResolveResult<ResolvedDeclaration>;

    /// The type a type node denotes.
    fn to_resolved_type(&self, unit: &SourceUnit, type_node: NodeIndex) -> ResolveResult<ResolvedType>;

    /// The static type of an expression.
    fn calculate_type(&self, unit: &SourceUnit, expr: NodeIndex) -> ResolveResult<ResolvedType>;

    /// The reference type a node names, or the nearest one enclosing it.
    fn to_type_declaration(&self, unit: &SourceUnit, node: NodeIndex) -> ResolveResult<Arc<TypeDeclaration>>;

    /// [`resolve_declaration`](Self::resolve_declaration) narrowed to one
    /// kind of declaration, e.g. `resolve_declaration_as::<Arc<MethodDeclaration>>`.
    fn resolve_declaration_as<T: DeclarationShape>(&self, unit: &SourceUnit, node: NodeIndex) -> ResolveResult<T>
    where
        Self: Sized,
    {
        let declaration = self.resolve_declaration(unit, node)?;
        let kind_name = declaration.kind_name();
        T::extract(declaration).ok_or_else(|| {
            ResolveError::unsupported(
                format!("{kind_name} where a {} was expected", T::SHAPE),
                unit.location_of(node),
            )
        })
    }
}
