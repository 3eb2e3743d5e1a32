//! Generic type substitution.
//!
//! A [`TypeSubstitution`] maps type-variable identities to types.
//! [`substitute`] replaces every mapped variable structurally and leaves
//! everything else untouched, so an empty or identity mapping returns an
//! equal type.

use crate::declarations::{TypeDeclaration, TypeParameterDeclaration};
use crate::recursion::{DepthCounter, RecursionProfile};
use crate::types::{ReferenceType, ResolvedType, TypeVariable, Wildcard};
use rustc_hash::FxHashMap;
use tracing::trace;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeSubstitution {
    map: FxHashMap<TypeVariable, ResolvedType>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameter-to-argument map of `receiver`, a use of `decl`. A raw
    /// receiver maps every parameter to its erasure.
    pub fn for_type(decl: &TypeDeclaration, receiver: &ReferenceType) -> Self {
        if receiver.is_raw() {
            return Self::erasing(&decl.type_parameters);
        }
        let mut subst = Self::new();
        for (i, param) in decl.type_parameters.iter().enumerate() {
            let arg = receiver
                .type_arguments
                .get(i)
                .cloned()
                .unwrap_or_else(|| ResolvedType::Reference(param.erasure.clone()));
            subst.insert(param.as_type_variable(), arg);
        }
        subst
    }

    /// Map each parameter to its erasure.
    pub fn erasing(params: &[TypeParameterDeclaration]) -> Self {
        let mut subst = Self::new();
        for param in params {
            subst.insert(
                param.as_type_variable(),
                ResolvedType::Reference(param.erasure.clone()),
            );
        }
        subst
    }

    pub fn insert(&mut self, var: TypeVariable, ty: ResolvedType) {
        self.map.insert(var, ty);
    }

    pub fn get(&self, var: &TypeVariable) -> Option<&ResolvedType> {
        self.map.get(var)
    }

    pub fn contains(&self, var: &TypeVariable) -> bool {
        self.map.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Every variable maps to itself.
    pub fn is_identity(&self) -> bool {
        self.map
            .iter()
            .all(|(var, ty)| ty.as_type_variable() == Some(var))
    }

    /// Add the mappings of `other`, keeping existing ones.
    pub fn extend(&mut self, other: &TypeSubstitution) {
        for (var, ty) in &other.map {
            self.map.entry(var.clone()).or_insert_with(|| ty.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeVariable, &ResolvedType)> + '_ {
        self.map.iter()
    }
}

impl ReferenceType {
    /// The parameter-to-argument map of this use of `decl`.
    pub fn type_parameters_map(&self, decl: &TypeDeclaration) -> TypeSubstitution {
        TypeSubstitution::for_type(decl, self)
    }
}

/// Apply `subst` to `ty`.
pub fn substitute(ty: &ResolvedType, subst: &TypeSubstitution) -> ResolvedType {
    if subst.is_empty() || subst.is_identity() {
        return ty.clone();
    }
    let mut depth = DepthCounter::with_profile(RecursionProfile::Substitution);
    let result = substitute_inner(ty, subst, &mut depth);
    if depth.is_exceeded() {
        trace!(ty = %ty, "substitution depth exceeded, keeping nested arguments");
    }
    result
}

pub fn substitute_reference(reference: &ReferenceType, subst: &TypeSubstitution) -> ReferenceType {
    match substitute(&ResolvedType::Reference(reference.clone()), subst) {
        ResolvedType::Reference(result) => result,
        _ => reference.clone(),
    }
}

fn substitute_inner(
    ty: &ResolvedType,
    subst: &TypeSubstitution,
    depth: &mut DepthCounter,
) -> ResolvedType {
    if !depth.enter() {
        return ty.clone();
    }
    let result = match ty {
        ResolvedType::TypeVariable(var) => subst.get(var).cloned().unwrap_or_else(|| ty.clone()),
        ResolvedType::Reference(reference) if !reference.type_arguments.is_empty() => {
            ResolvedType::Reference(
                reference.with_arguments(
                    reference
                        .type_arguments
                        .iter()
                        .map(|arg| substitute_inner(arg, subst, depth))
                        .collect(),
                ),
            )
        }
        ResolvedType::Array(component) => {
            ResolvedType::Array(Box::new(substitute_inner(component, subst, depth)))
        }
        ResolvedType::Wildcard(Wildcard::Extends(bound)) => {
            match substitute_inner(bound, subst, depth) {
                ResolvedType::Wildcard(Wildcard::Extends(inner)) => {
                    ResolvedType::Wildcard(Wildcard::Extends(inner))
                }
                ResolvedType::Wildcard(_) => ResolvedType::Wildcard(Wildcard::Unbounded),
                bound => ResolvedType::Wildcard(Wildcard::Extends(Box::new(bound))),
            }
        }
        ResolvedType::Wildcard(Wildcard::Super(bound)) => {
            match substitute_inner(bound, subst, depth) {
                ResolvedType::Wildcard(Wildcard::Super(inner)) => {
                    ResolvedType::Wildcard(Wildcard::Super(inner))
                }
                ResolvedType::Wildcard(_) => ResolvedType::Wildcard(Wildcard::Unbounded),
                bound => ResolvedType::Wildcard(Wildcard::Super(Box::new(bound))),
            }
        }
        ResolvedType::Union(elements) => ResolvedType::Union(
            elements
                .iter()
                .map(|e| substitute_inner(e, subst, depth))
                .collect(),
        ),
        ResolvedType::Intersection(elements) => ResolvedType::Intersection(
            elements
                .iter()
                .map(|e| substitute_inner(e, subst, depth))
                .collect(),
        ),
        ResolvedType::Reference(_)
        | ResolvedType::Primitive(_)
        | ResolvedType::Wildcard(Wildcard::Unbounded)
        | ResolvedType::Void
        | ResolvedType::Null => ty.clone(),
    };
    depth.leave();
    result
}

#[cfg(test)]
#[path = "../tests/instantiate_tests.rs"]
mod tests;
