//! Method type argument inference.
//!
//! A simplified form of JLS 18: each argument type is matched structurally
//! against its parameter type and every inferable variable met on the way
//! collects a binding. Primitive arguments are boxed. A variable bound twice
//! is widened to the least upper bound of both. Variables left unbound
//! fall back to their erasure.

use jsolve_common::ResolveResult;
use jsolve_solver::{Hierarchy, ReferenceType, ResolvedType, TypeSubstitution, TypeVariable, Wildcard};
use rustc_hash::FxHashMap;
use tracing::trace;

pub(crate) struct Inference<'a> {
    hierarchy: Hierarchy<'a>,
    variables: Vec<TypeVariable>,
    bindings: FxHashMap<TypeVariable, ResolvedType>,
}

impl<'a> Inference<'a> {
    pub(crate) fn new(hierarchy: Hierarchy<'a>, variables: Vec<TypeVariable>) -> Self {
        Self {
            hierarchy,
            variables,
            bindings: FxHashMap::default(),
        }
    }

    pub(crate) fn is_inferable(&self, var: &TypeVariable) -> bool {
        self.variables.contains(var)
    }

    pub(crate) fn binding(&self, var: &TypeVariable) -> Option<&ResolvedType> {
        self.bindings.get(var)
    }

    /// Inferable variables `ty` mentions that have no binding yet.
    pub(crate) fn has_unbound(&self, ty: &ResolvedType) -> bool {
        ty.type_variables()
            .into_iter()
            .any(|var| self.is_inferable(var) && !self.bindings.contains_key(var))
    }

    /// Bind `var` explicitly, e.g. from `Collections.<String>emptyList()`.
    pub(crate) fn bind(&mut self, var: TypeVariable, ty: ResolvedType) {
        self.bindings.insert(var, ty);
    }

    /// Match an argument of type `argument` against parameter `parameter`.
    pub(crate) fn unify(&mut self, parameter: &ResolvedType, argument: &ResolvedType) -> ResolveResult<()> {
        if argument.is_null() || argument.is_void() {
            return Ok(());
        }
        match parameter {
            ResolvedType::TypeVariable(var) if self.is_inferable(var) => {
                let boxed = match argument {
                    ResolvedType::Primitive(kind) => ResolvedType::boxed(*kind),
                    other => other.clone(),
                };
                self.widen(var, boxed)
            }
            ResolvedType::Reference(expected) if !expected.type_arguments.is_empty() => {
                let Some(actual) = self.as_reference(argument) else {
                    return Ok(());
                };
                let Some(ancestor) = self.hierarchy.find_ancestor(&actual, &expected.qualified_name)? else {
                    return Ok(());
                };
                if ancestor.type_arguments.len() != expected.type_arguments.len() {
                    return Ok(());
                }
                for (p, a) in expected.type_arguments.iter().zip(&ancestor.type_arguments) {
                    self.unify_type_argument(p, a)?;
                }
                Ok(())
            }
            ResolvedType::Array(component) => match argument.component() {
                Some(actual) => self.unify(component, actual),
                None => Ok(()),
            },
            ResolvedType::Wildcard(Wildcard::Extends(bound) | Wildcard::Super(bound)) => {
                self.unify(bound, &argument.upper_bound())
            }
            _ => Ok(()),
        }
    }

    /// Type arguments at the same position of the parameter's and the
    /// argument's parameterization of one generic type.
    fn unify_type_argument(&mut self, expected: &ResolvedType, actual: &ResolvedType) -> ResolveResult<()> {
        match (expected, actual) {
            (ResolvedType::Wildcard(Wildcard::Super(bound)), ResolvedType::Wildcard(Wildcard::Super(lower))) => {
                self.unify(bound, lower)
            }
            (ResolvedType::Wildcard(Wildcard::Super(_)), ResolvedType::Wildcard(_)) => Ok(()),
            (ResolvedType::Wildcard(Wildcard::Super(bound)), _) => self.unify(bound, actual),
            (ResolvedType::Wildcard(Wildcard::Extends(bound)), _) => {
                self.unify(bound, &actual.upper_bound())
            }
            (ResolvedType::Wildcard(Wildcard::Unbounded), _) => Ok(()),
            (_, ResolvedType::Wildcard(Wildcard::Super(_) | Wildcard::Unbounded)) => Ok(()),
            (_, _) => self.unify(expected, &actual.upper_bound()),
        }
    }

    fn widen(&mut self, var: &TypeVariable, ty: ResolvedType) -> ResolveResult<()> {
        let widened = match self.bindings.get(var) {
            None => ty,
            Some(existing) if *existing == ty => return Ok(()),
            Some(existing) => self
                .hierarchy
                .least_upper_bound(&[existing.clone(), ty])?,
        };
        trace!(var = %var.name, ty = %widened, "inferred");
        self.bindings.insert(var.clone(), widened);
        Ok(())
    }

    fn as_reference(&self, ty: &ResolvedType) -> Option<ReferenceType> {
        match ty {
            ResolvedType::Reference(reference) => Some(reference.clone()),
            ResolvedType::TypeVariable(var) => Some(var.erasure.clone()),
            ResolvedType::Primitive(kind) => Some(ReferenceType::top_level(kind.boxed_name())),
            ResolvedType::Wildcard(_) => self.as_reference(&ty.upper_bound()),
            _ => None,
        }
    }

    /// Bound variables only; unbound ones stay as they are.
    pub(crate) fn partial_substitution(&self) -> TypeSubstitution {
        let mut subst = TypeSubstitution::new();
        for (var, ty) in &self.bindings {
            subst.insert(var.clone(), ty.clone());
        }
        subst
    }

    /// Every inferable variable: its binding, else its erasure.
    pub(crate) fn substitution(&self) -> TypeSubstitution {
        let mut subst = self.partial_substitution();
        for var in &self.variables {
            if !self.bindings.contains_key(var) {
                subst.insert(var.clone(), ResolvedType::Reference(var.erasure.clone()));
            }
        }
        subst
    }
}

#[cfg(test)]
#[path = "../tests/inference_tests.rs"]
mod tests;
