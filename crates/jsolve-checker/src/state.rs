//! Resolver state.
//!
//! `ResolverState` is the working object behind every facade query. It
//! borrows the facade and one source unit and owns the per-query
//! [`QueryContext`]. The query implementations are split across modules
//! that each extend `ResolverState`:
//! - `declarations` - what a node denotes
//! - `name_resolution` - scope walks, static imports, ambiguous names
//! - `type_nodes` - type nodes and `var`
//! - `expr` - expression types
//! - `call_checker` - method calls, object creation, constructor calls
//! - `lambdas` - lambda target typing

use crate::cache::{Cacheable, QueryKind};
use crate::context::{QueryContext, QueryKey};
use crate::facade::ResolutionFacade;
use jsolve_common::limits::{STACK_GROW_SIZE, STACK_RED_ZONE};
use jsolve_common::{ResolveError, ResolveResult, SourceLocation};
use jsolve_solver::solvers::{TypeNameQualifier, qualified_name_of};
use jsolve_solver::{
    Hierarchy, MemberLookup, ReferenceType, ResolvedType, TypeDeclaration, TypeRelations,
    TypeSolver,
};
use jsolve_syntax::{Navigator, Node, NodeArena, NodeIndex, SourceUnit, SyntaxKind};
use std::sync::Arc;
use tracing::trace;

pub(crate) struct ResolverState<'a> {
    pub(crate) facade: &'a ResolutionFacade,
    pub(crate) unit: &'a SourceUnit,
    pub(crate) ctx: QueryContext,
}

impl<'a> ResolverState<'a> {
    pub(crate) fn new(facade: &'a ResolutionFacade, unit: &'a SourceUnit) -> Self {
        Self {
            facade,
            unit,
            ctx: QueryContext::new(facade.options().limits),
        }
    }

    // =========================================================================
    // Collaborators
    // =========================================================================

    pub(crate) fn solver(&self) -> &'a dyn TypeSolver {
        let facade: &'a ResolutionFacade = self.facade;
        facade.solver().as_ref()
    }

    pub(crate) fn hierarchy(&self) -> Hierarchy<'a> {
        Hierarchy::new(self.solver())
    }

    pub(crate) fn lookup(&self) -> MemberLookup<'a> {
        MemberLookup::new(self.hierarchy())
    }

    pub(crate) fn relations(&self) -> TypeRelations<'a> {
        TypeRelations::new(self.hierarchy())
    }

    pub(crate) fn qualifier(&self) -> TypeNameQualifier<'a> {
        TypeNameQualifier::semantic(self.solver(), self.unit)
    }

    pub(crate) fn arena(&self) -> &'a NodeArena {
        let unit: &'a SourceUnit = self.unit;
        unit.arena()
    }

    pub(crate) fn navigator(&self) -> Navigator<'a> {
        Navigator::new(self.arena())
    }

    pub(crate) fn kind_of(&self, node: NodeIndex) -> Option<SyntaxKind> {
        self.arena().kind_of(node)
    }

    pub(crate) fn location(&self, node: NodeIndex) -> SourceLocation {
        self.unit.location_of(node)
    }

    pub(crate) fn unsupported(&self, construct: impl Into<Arc<str>>, node: NodeIndex) -> ResolveError {
        ResolveError::unsupported(construct, self.location(node))
    }

    pub(crate) fn unsolved(&self, name: impl Into<Arc<str>>, node: NodeIndex) -> ResolveError {
        ResolveError::unsolved(name, self.location(node))
    }

    /// Typed node data, e.g. `self.data(call, "method call", NodeArena::get_method_call)`.
    pub(crate) fn data<T: ?Sized>(
        &self,
        node: NodeIndex,
        what: &str,
        get: impl FnOnce(&'a NodeArena, &'a Node) -> Option<&'a T>,
    ) -> ResolveResult<&'a T> {
        let arena = self.arena();
        arena
            .get(node)
            .and_then(|header| get(arena, header))
            .ok_or_else(|| self.unsupported(format!("malformed {what}"), node))
    }

    /// A readable name for the node a query was about.
    pub(crate) fn reference_name(&self, node: NodeIndex) -> String {
        let arena = self.arena();
        if let Some(name) = arena.name_of(node) {
            return name.to_string();
        }
        match arena.get(node) {
            Some(header) if header.kind == SyntaxKind::ObjectCreationExpression => arena
                .get_object_creation(header)
                .map(|data| self.qualifier().segments_of(data.ty).join("."))
                .unwrap_or_default(),
            Some(header) => header.kind.name(),
            None => "<missing node>".to_string(),
        }
    }

    // =========================================================================
    // Memoized, guarded queries
    // =========================================================================

    /// Run `compute` as query `kind` on `node`: answer from the cache when
    /// possible, otherwise guard the active path, compute and record.
    pub(crate) fn query<T: Cacheable>(
        &mut self,
        kind: QueryKind,
        node: NodeIndex,
        compute: impl FnOnce(&mut Self) -> ResolveResult<T>,
    ) -> ResolveResult<T> {
        let facade = self.facade;
        let cache = facade.cache();
        let key = cache.key(self.unit.id(), node, kind);
        if let Some(hit) = cache.get(&key) {
            return hit.and_then(|value| self.expect_cached(value, kind, node));
        }

        let active = QueryKey {
            node: self.unit.node_ref(node),
            kind,
        };
        self.ctx.enter(active)?;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || compute(self));
        self.ctx.leave(&active);

        // Cycles depend on the path that found them; assumptions on the
        // lambdas being inferred.
        if self.ctx.is_speculative() || matches!(result, Err(ResolveError::CyclicResolution { .. })) {
            trace!(node = node.0, %kind, "answer not recorded");
            return result;
        }
        cache
            .record(key, result.map(Cacheable::into_cached))
            .and_then(|value| self.expect_cached(value, kind, node))
    }

    fn expect_cached<T: Cacheable>(
        &self,
        value: crate::cache::CachedValue,
        kind: QueryKind,
        node: NodeIndex,
    ) -> ResolveResult<T> {
        T::from_cached(value)
            .ok_or_else(|| self.unsupported(format!("{kind} answer of another shape"), node))
    }

    // =========================================================================
    // Enclosing types
    // =========================================================================

    /// The declaration of the type declared by `type_node`.
    pub(crate) fn type_declaration_at(&self, type_node: NodeIndex) -> ResolveResult<Arc<TypeDeclaration>> {
        let Some((qualified, _)) = qualified_name_of(self.unit, type_node) else {
            return Err(self.unsupported("local or anonymous class", type_node));
        };
        self.solver().solve_type(&qualified)
    }

    /// The type declaration node enclosing `node`.
    pub(crate) fn enclosing_type_node(&self, node: NodeIndex) -> ResolveResult<NodeIndex> {
        self.navigator()
            .enclosing_type(node)
            .ok_or_else(|| self.unsupported("code outside a type declaration", node))
    }

    pub(crate) fn enclosing_type_declaration(&self, node: NodeIndex) -> ResolveResult<Arc<TypeDeclaration>> {
        self.type_declaration_at(self.enclosing_type_node(node)?)
    }

    /// The reference type a member access on `ty` is looked up in.
    pub(crate) fn receiver_of(&self, ty: &ResolvedType, node: NodeIndex) -> ResolveResult<ReferenceType> {
        match ty {
            ResolvedType::Reference(reference) => Ok(reference.clone()),
            ResolvedType::TypeVariable(var) => Ok(var.erasure.clone()),
            ResolvedType::Wildcard(_) => self.receiver_of(&ty.upper_bound(), node),
            ResolvedType::Array(_) => Ok(ReferenceType::object()),
            ResolvedType::Intersection(elements) => match elements.first() {
                Some(first) => self.receiver_of(first, node),
                None => Ok(ReferenceType::object()),
            },
            ResolvedType::Union(elements) => {
                let bound = self.hierarchy().least_upper_bound(elements)?;
                self.receiver_of(&bound, node)
            }
            ResolvedType::Primitive(_) | ResolvedType::Void | ResolvedType::Null => Err(
                self.unsupported(format!("member access on {}", ty.describe()), node),
            ),
        }
    }
}
