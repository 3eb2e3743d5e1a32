//! Member lookup through the supertype hierarchy.
//!
//! Members are collected from the receiver type first and then from its
//! ancestors in hierarchy order. Each member comes with its types substituted
//! through the parameterization under which the receiver inherits it. A
//! method is hidden by an already collected method with the same name and
//! erased parameter types (an override).

use crate::declarations::{ConstructorDeclaration, FieldDeclaration, MethodDeclaration};
use crate::descriptor;
use crate::hierarchy::Hierarchy;
use crate::instantiate::{TypeSubstitution, substitute};
use crate::types::{ReferenceType, ResolvedType, Wildcard};
use jsolve_common::ResolveResult;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::trace;

/// A method as seen through a particular receiver type.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodUsage {
    pub declaration: Arc<MethodDeclaration>,
    /// The ancestor (or the receiver itself) that declares the method.
    pub declaring_type: ReferenceType,
    pub parameter_types: Vec<ResolvedType>,
    pub return_type: ResolvedType,
}

impl MethodUsage {
    pub fn name(&self) -> &str {
        &self.declaration.name
    }

    pub fn is_varargs(&self) -> bool {
        self.declaration.is_varargs()
    }

    /// Apply a further substitution, typically inferred method type
    /// arguments.
    pub fn substituted(&self, subst: &TypeSubstitution) -> Self {
        Self {
            declaration: self.declaration.clone(),
            declaring_type: self.declaring_type.clone(),
            parameter_types: self
                .parameter_types
                .iter()
                .map(|ty| substitute(ty, subst))
                .collect(),
            return_type: substitute(&self.return_type, subst),
        }
    }

    fn erased_key(&self) -> String {
        let erased: Vec<ResolvedType> = self.parameter_types.iter().map(|t| t.erasure()).collect();
        format!(
            "{}{}",
            self.declaration.name,
            descriptor::method_descriptor(&erased, &ResolvedType::Void)
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldUsage {
    pub declaration: Arc<FieldDeclaration>,
    pub declaring_type: ReferenceType,
    pub ty: ResolvedType,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConstructorUsage {
    pub declaration: Arc<ConstructorDeclaration>,
    pub parameter_types: Vec<ResolvedType>,
}

impl ConstructorUsage {
    pub fn is_varargs(&self) -> bool {
        self.declaration.is_varargs()
    }

    pub fn substituted(&self, subst: &TypeSubstitution) -> Self {
        Self {
            declaration: self.declaration.clone(),
            parameter_types: self
                .parameter_types
                .iter()
                .map(|ty| substitute(ty, subst))
                .collect(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct MemberLookup<'a> {
    hierarchy: Hierarchy<'a>,
}

impl<'a> MemberLookup<'a> {
    pub fn new(hierarchy: Hierarchy<'a>) -> Self {
        Self { hierarchy }
    }

    pub fn hierarchy(&self) -> Hierarchy<'a> {
        self.hierarchy
    }

    /// Visible methods named `name` on `receiver`, overridden duplicates
    /// removed, most-derived first.
    pub fn methods_named(
        &self,
        receiver: &ReferenceType,
        name: &str,
    ) -> ResolveResult<Vec<MethodUsage>> {
        self.collect_methods(receiver, Some(name))
    }

    /// Every visible method of `receiver`.
    pub fn all_methods(&self, receiver: &ReferenceType) -> ResolveResult<Vec<MethodUsage>> {
        self.collect_methods(receiver, None)
    }

    fn collect_methods(
        &self,
        receiver: &ReferenceType,
        name: Option<&str>,
    ) -> ResolveResult<Vec<MethodUsage>> {
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();
        for owner in self.hierarchy.self_and_ancestors(receiver)? {
            let decl = self.hierarchy.declaration(&owner)?;
            let subst = TypeSubstitution::for_type(&decl, &owner);
            for method in &decl.methods {
                if name.is_some_and(|n| n != &*method.name) {
                    continue;
                }
                let usage = MethodUsage {
                    declaration: method.clone(),
                    declaring_type: owner.clone(),
                    parameter_types: method
                        .parameters
                        .iter()
                        .map(|p| substitute(&p.ty, &subst))
                        .collect(),
                    return_type: substitute(&method.return_type, &subst),
                };
                if seen.insert(usage.erased_key()) {
                    out.push(usage);
                }
            }
        }
        trace!(receiver = %receiver, ?name, count = out.len(), "collected methods");
        Ok(out)
    }

    /// Field `name` declared on `receiver` or inherited, most-derived first.
    pub fn field(&self, receiver: &ReferenceType, name: &str) -> ResolveResult<Option<FieldUsage>> {
        for owner in self.hierarchy.self_and_ancestors(receiver)? {
            let decl = self.hierarchy.declaration(&owner)?;
            if let Some(field) = decl.field(name) {
                let subst = TypeSubstitution::for_type(&decl, &owner);
                return Ok(Some(FieldUsage {
                    declaration: field.clone(),
                    ty: substitute(&field.ty, &subst),
                    declaring_type: owner,
                }));
            }
        }
        Ok(None)
    }

    /// Fields inherited by `receiver` (not declared on it), most-derived
    /// first, shadowed names removed.
    pub fn inherited_fields(&self, receiver: &ReferenceType) -> ResolveResult<Vec<FieldUsage>> {
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();
        for owner in self.hierarchy.ancestors(receiver)? {
            let decl = self.hierarchy.declaration(&owner)?;
            let subst = TypeSubstitution::for_type(&decl, &owner);
            for field in &decl.fields {
                if seen.insert(field.name.clone()) {
                    out.push(FieldUsage {
                        declaration: field.clone(),
                        ty: substitute(&field.ty, &subst),
                        declaring_type: owner.clone(),
                    });
                }
            }
        }
        Ok(out)
    }

    /// Constructors of `ty`, substituted through its arguments.
    pub fn constructors(&self, ty: &ReferenceType) -> ResolveResult<Vec<ConstructorUsage>> {
        let decl = self.hierarchy.declaration(ty)?;
        let subst = TypeSubstitution::for_type(&decl, ty);
        Ok(decl
            .constructors
            .iter()
            .map(|ctor| ConstructorUsage {
                declaration: ctor.clone(),
                parameter_types: ctor
                    .parameters
                    .iter()
                    .map(|p| substitute(&p.ty, &subst))
                    .collect(),
            })
            .collect())
    }

    /// Member type `simple` declared on `receiver` or inherited.
    pub fn member_type(
        &self,
        receiver: &ReferenceType,
        simple: &str,
    ) -> ResolveResult<Option<ReferenceType>> {
        for owner in self.hierarchy.self_and_ancestors(receiver)? {
            let decl = self.hierarchy.declaration(&owner)?;
            if decl.member_type(simple).is_some() {
                return Ok(Some(owner.erased().member(simple)));
            }
        }
        Ok(None)
    }

    /// The single abstract method of a functional interface, substituted
    /// through the non-wildcard parameterization of `iface` (JLS 9.9).
    pub fn functional_method(&self, iface: &ReferenceType) -> ResolveResult<Option<MethodUsage>> {
        let decl = self.hierarchy.declaration(iface)?;
        if !decl.is_interface() {
            return Ok(None);
        }
        let target = iface.with_arguments(
            iface
                .type_arguments
                .iter()
                .map(non_wildcard_argument)
                .collect(),
        );
        let mut abstract_methods = Vec::new();
        for usage in self.all_methods(&target)? {
            if !usage.declaration.is_abstract() || is_object_method(&usage) {
                continue;
            }
            abstract_methods.push(usage);
        }
        Ok(match abstract_methods.len() {
            1 => abstract_methods.pop(),
            _ => None,
        })
    }
}

fn non_wildcard_argument(arg: &ResolvedType) -> ResolvedType {
    match arg {
        ResolvedType::Wildcard(Wildcard::Extends(bound) | Wildcard::Super(bound)) => {
            (**bound).clone()
        }
        ResolvedType::Wildcard(Wildcard::Unbounded) => ResolvedType::object(),
        other => other.clone(),
    }
}

/// Public `Object` methods redeclared abstractly in interfaces do not count
/// toward the single abstract method.
fn is_object_method(usage: &MethodUsage) -> bool {
    let params = &usage.parameter_types;
    match &*usage.declaration.name {
        "equals" => params.len() == 1 && params[0] == ResolvedType::object(),
        "hashCode" | "toString" => params.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
#[path = "../tests/members_tests.rs"]
mod tests;
