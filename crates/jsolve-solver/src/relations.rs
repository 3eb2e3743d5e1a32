//! Assignability between resolved types.
//!
//! Two conversion contexts are modeled:
//! - `Strict`: identity, primitive widening, reference widening.
//! - `Loose`: additionally boxing and unboxing (each optionally followed by
//!   a widening).
//!
//! Raw-to-parameterized assignment is accepted (unchecked conversion).
//! Type variables convert through their erasure.

use crate::hierarchy::Hierarchy;
use crate::types::{CLONEABLE, ReferenceType, ResolvedType, SERIALIZABLE, Wildcard};
use jsolve_common::ResolveResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConversionMode {
    Strict,
    Loose,
}

#[derive(Clone, Copy)]
pub struct TypeRelations<'a> {
    hierarchy: Hierarchy<'a>,
}

impl<'a> TypeRelations<'a> {
    pub fn new(hierarchy: Hierarchy<'a>) -> Self {
        Self { hierarchy }
    }

    pub fn hierarchy(&self) -> Hierarchy<'a> {
        self.hierarchy
    }

    /// Whether a value of type `source` may be assigned to `target`.
    pub fn is_assignable(
        &self,
        source: &ResolvedType,
        target: &ResolvedType,
        mode: ConversionMode,
    ) -> ResolveResult<bool> {
        if source == target {
            return Ok(true);
        }
        match (source, target) {
            (ResolvedType::Void, _) | (_, ResolvedType::Void) => Ok(false),
            (_, ResolvedType::Wildcard(_)) => {
                self.is_assignable(source, &target.upper_bound(), mode)
            }
            (ResolvedType::Wildcard(_), _) => {
                self.is_assignable(&source.upper_bound(), target, mode)
            }

            (ResolvedType::Primitive(s), ResolvedType::Primitive(t)) => Ok(s.widens_to(*t)),
            (_, ResolvedType::Primitive(t)) => Ok(mode == ConversionMode::Loose
                && source.unboxed().is_some_and(|kind| kind.widens_to(*t))),
            (ResolvedType::Primitive(s), _) => {
                if mode == ConversionMode::Strict {
                    return Ok(false);
                }
                self.is_assignable(&ResolvedType::boxed(*s), target, ConversionMode::Strict)
            }

            (ResolvedType::Null, _) => Ok(target.is_reference_like()),
            (_, ResolvedType::Null) => Ok(false),

            (ResolvedType::Union(elements), _) => {
                for element in elements {
                    if !self.is_assignable(element, target, mode)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (ResolvedType::Intersection(elements), _) => {
                for element in elements {
                    if self.is_assignable(element, target, mode)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            (_, ResolvedType::Intersection(elements)) => {
                for element in elements {
                    if !self.is_assignable(source, element, mode)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (_, ResolvedType::Union(elements)) => {
                for element in elements {
                    if self.is_assignable(source, element, mode)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }

            (_, ResolvedType::Reference(t)) if t.is_object() => Ok(true),
            (ResolvedType::TypeVariable(var), _) => self.is_assignable(
                &ResolvedType::Reference(var.erasure.clone()),
                target,
                mode,
            ),
            (_, ResolvedType::TypeVariable(_)) => Ok(false),

            (ResolvedType::Array(sc), ResolvedType::Array(tc)) => {
                if sc.is_primitive() || tc.is_primitive() {
                    Ok(sc == tc)
                } else {
                    self.is_assignable(sc, tc, ConversionMode::Strict)
                }
            }
            (ResolvedType::Array(_), ResolvedType::Reference(t)) => Ok(matches!(
                &*t.qualified_name,
                CLONEABLE | SERIALIZABLE
            )),
            (ResolvedType::Reference(_), ResolvedType::Array(_)) => Ok(false),

            (ResolvedType::Reference(s), ResolvedType::Reference(t)) => {
                self.is_subtype_reference(s, t)
            }
        }
    }

    /// Reference widening, with type argument containment.
    pub fn is_subtype_reference(
        &self,
        source: &ReferenceType,
        target: &ReferenceType,
    ) -> ResolveResult<bool> {
        let Some(ancestor) = self.hierarchy.find_ancestor(source, &target.qualified_name)? else {
            return Ok(false);
        };
        if target.is_raw() || ancestor.is_raw() {
            return Ok(true);
        }
        if ancestor.type_arguments.len() != target.type_arguments.len() {
            return Ok(false);
        }
        for (s_arg, t_arg) in ancestor.type_arguments.iter().zip(&target.type_arguments) {
            if !self.contains(t_arg, s_arg)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Type argument containment: does `outer` contain `inner`?
    pub fn contains(&self, outer: &ResolvedType, inner: &ResolvedType) -> ResolveResult<bool> {
        match outer {
            ResolvedType::Wildcard(Wildcard::Unbounded) => Ok(true),
            ResolvedType::Wildcard(Wildcard::Extends(bound)) => {
                let upper = match inner {
                    ResolvedType::Wildcard(Wildcard::Extends(b)) => (**b).clone(),
                    ResolvedType::Wildcard(_) => ResolvedType::object(),
                    other => other.clone(),
                };
                self.is_assignable(&upper, bound, ConversionMode::Strict)
            }
            ResolvedType::Wildcard(Wildcard::Super(bound)) => {
                let lower = match inner {
                    ResolvedType::Wildcard(Wildcard::Super(b)) => (**b).clone(),
                    ResolvedType::Wildcard(_) => return Ok(false),
                    other => other.clone(),
                };
                self.is_assignable(bound, &lower, ConversionMode::Strict)
            }
            exact => Ok(exact == inner),
        }
    }
}

#[cfg(test)]
#[path = "../tests/relations_tests.rs"]
mod tests;
