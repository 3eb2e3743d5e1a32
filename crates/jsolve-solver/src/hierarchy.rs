//! Supertype walks.
//!
//! Ancestors are collected depth-first, most-derived-first: each direct
//! supertype is followed by its own ancestors before the next direct
//! supertype is visited. `java.lang.Object` is implicit for every reference
//! type and always comes last. Supertypes are substituted through the
//! parameterization of the type being walked, so the ancestors of
//! `ArrayList<String>` include `List<String>`.

use crate::declarations::TypeDeclaration;
use crate::instantiate::{TypeSubstitution, substitute_reference};
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::solvers::TypeSolver;
use crate::types::{OBJECT, ReferenceType, ResolvedType};
use jsolve_common::{ResolveError, ResolveResult};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::trace;

#[derive(Clone, Copy)]
pub struct Hierarchy<'a> {
    solver: &'a dyn TypeSolver,
}

impl<'a> Hierarchy<'a> {
    pub fn new(solver: &'a dyn TypeSolver) -> Self {
        Self { solver }
    }

    pub fn solver(&self) -> &'a dyn TypeSolver {
        self.solver
    }

    pub fn declaration(&self, ty: &ReferenceType) -> ResolveResult<Arc<TypeDeclaration>> {
        self.solver.solve_type(&ty.qualified_name)
    }

    /// Direct supertypes of `ty`, substituted through its arguments. A raw
    /// `ty` has erased supertypes.
    pub fn direct_supertypes(&self, ty: &ReferenceType) -> ResolveResult<Vec<ReferenceType>> {
        let decl = self.declaration(ty)?;
        Ok(direct_supertypes_of(&decl, ty))
    }

    /// All proper supertypes of `ty`, deduplicated by qualified name.
    pub fn ancestors(&self, ty: &ReferenceType) -> ResolveResult<Vec<ReferenceType>> {
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();
        seen.insert(ty.qualified_name.clone());
        let mut guard = RecursionGuard::with_profile(RecursionProfile::Hierarchy);
        self.collect(ty, &mut guard, &mut seen, &mut out)?;
        if !ty.is_object() && seen.insert(OBJECT.into()) {
            out.push(ReferenceType::object());
        }
        Ok(out)
    }

    /// `ty` followed by its ancestors.
    pub fn self_and_ancestors(&self, ty: &ReferenceType) -> ResolveResult<Vec<ReferenceType>> {
        let mut all = vec![ty.clone()];
        all.extend(self.ancestors(ty)?);
        Ok(all)
    }

    /// The parameterization of `qualified_name` that `ty` is or inherits.
    pub fn find_ancestor(
        &self,
        ty: &ReferenceType,
        qualified_name: &str,
    ) -> ResolveResult<Option<ReferenceType>> {
        if &*ty.qualified_name == qualified_name {
            return Ok(Some(ty.clone()));
        }
        if qualified_name == OBJECT {
            return Ok(Some(ReferenceType::object()));
        }
        Ok(self
            .ancestors(ty)?
            .into_iter()
            .find(|ancestor| &*ancestor.qualified_name == qualified_name))
    }

    /// Whether `sub` is `sup` or one of its subtypes, ignoring arguments.
    pub fn is_subtype_by_name(&self, sub: &ReferenceType, sup: &str) -> ResolveResult<bool> {
        Ok(self.find_ancestor(sub, sup)?.is_some())
    }

    fn collect(
        &self,
        ty: &ReferenceType,
        guard: &mut RecursionGuard<Arc<str>>,
        seen: &mut FxHashSet<Arc<str>>,
        out: &mut Vec<ReferenceType>,
    ) -> ResolveResult<()> {
        let key = ty.qualified_name.clone();
        match guard.enter(key.clone()) {
            RecursionResult::Entered => {}
            RecursionResult::Cycle => {
                let path = guard.describe_cycle(&key);
                trace!(%path, "cyclic supertype");
                return Err(ResolveError::cyclic(path));
            }
            RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => {
                let path = guard.path().map(|k| &**k).collect::<Vec<_>>().join(" -> ");
                return Err(ResolveError::cyclic(format!("supertype chain too deep: {path}")));
            }
        }
        let result = self.collect_supertypes(ty, guard, seen, out);
        guard.leave(&key);
        result
    }

    fn collect_supertypes(
        &self,
        ty: &ReferenceType,
        guard: &mut RecursionGuard<Arc<str>>,
        seen: &mut FxHashSet<Arc<str>>,
        out: &mut Vec<ReferenceType>,
    ) -> ResolveResult<()> {
        for supertype in self.direct_supertypes(ty)? {
            if supertype.is_object() {
                continue;
            }
            if guard.is_visiting(&supertype.qualified_name) {
                let path = guard.describe_cycle(&supertype.qualified_name);
                return Err(ResolveError::cyclic(path));
            }
            if !seen.insert(supertype.qualified_name.clone()) {
                continue;
            }
            out.push(supertype.clone());
            self.collect(&supertype, guard, seen, out)?;
        }
        Ok(())
    }

    /// Least upper bound of reference types (JLS 4.10.4, simplified):
    /// the minimal erased candidates shared by every input, each
    /// parameterized when all inputs agree on its arguments and raw
    /// otherwise. Several minimal candidates yield an intersection.
    pub fn least_upper_bound(&self, types: &[ResolvedType]) -> ResolveResult<ResolvedType> {
        let mut non_null = types.iter().filter(|t| !t.is_null());
        if let Some(first) = non_null.next()
            && non_null.all(|t| t == first)
        {
            return Ok(first.clone());
        }
        let mut references = Vec::new();
        for ty in types {
            match ty {
                ResolvedType::Null => {}
                ResolvedType::Primitive(kind) => {
                    references.push(ReferenceType::top_level(kind.boxed_name()));
                }
                ResolvedType::Reference(reference) => references.push(reference.clone()),
                ResolvedType::TypeVariable(var) => references.push(var.erasure.clone()),
                other => {
                    // Arrays and compound types are only unified when equal.
                    if types.iter().all(|t| t == other || t.is_null()) {
                        return Ok(other.clone());
                    }
                    return Ok(ResolvedType::object());
                }
            }
        }
        let Some(first) = references.first() else {
            return Ok(ResolvedType::Null);
        };
        if references.iter().all(|r| r == first) {
            return Ok(ResolvedType::Reference(first.clone()));
        }

        let mut per_input = Vec::with_capacity(references.len());
        for reference in &references {
            per_input.push(self.self_and_ancestors(reference)?);
        }
        let candidates: Vec<&ReferenceType> = per_input[0]
            .iter()
            .filter(|c| {
                per_input[1..]
                    .iter()
                    .all(|set| set.iter().any(|s| s.qualified_name == c.qualified_name))
            })
            .collect();

        // Drop every candidate that is a proper supertype of another.
        let mut minimal = Vec::new();
        for candidate in &candidates {
            let mut dominated = false;
            for other in &candidates {
                if other.qualified_name != candidate.qualified_name
                    && self.is_subtype_by_name(other, &candidate.qualified_name)?
                {
                    dominated = true;
                    break;
                }
            }
            if !dominated {
                minimal.push(*candidate);
            }
        }

        let mut bounds = Vec::new();
        for candidate in minimal {
            let name = &candidate.qualified_name;
            let uses: Vec<&ReferenceType> = per_input
                .iter()
                .filter_map(|set| set.iter().find(|s| &s.qualified_name == name))
                .collect();
            let agreed = uses.iter().all(|u| u.type_arguments == candidate.type_arguments);
            let bound = if agreed {
                candidate.clone()
            } else {
                candidate.erased()
            };
            bounds.push(ResolvedType::Reference(bound));
        }
        Ok(match bounds.len() {
            0 => ResolvedType::object(),
            1 => bounds.remove(0),
            _ => ResolvedType::Intersection(bounds),
        })
    }
}

/// Direct supertypes of a use of `decl`, without consulting a solver.
pub fn direct_supertypes_of(decl: &TypeDeclaration, ty: &ReferenceType) -> Vec<ReferenceType> {
    let raw_use = ty.is_raw() && decl.is_generic();
    let subst = TypeSubstitution::for_type(decl, ty);
    decl.direct_supertypes()
        .map(|supertype| {
            if raw_use {
                supertype.erased()
            } else {
                substitute_reference(supertype, &subst)
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../tests/hierarchy_tests.rs"]
mod tests;
