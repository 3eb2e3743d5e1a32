//! Overload Resolution Module
//!
//! Chooses the invoked method or constructor among the candidates visible
//! at a call site (JLS 15.12.2). It handles:
//! - The three applicability phases: strict invocation (no boxing, fixed
//!   arity), loose invocation (boxing, fixed arity) and variable arity
//!   invocation; the first phase with an applicable candidate wins
//! - Inference of method type arguments before applicability is checked
//! - Lambda arguments, compatible with functional interfaces of the same
//!   arity
//! - Most specific selection, reporting every tied candidate when no single
//!   one is most specific
//!
//! Argument types that could not be resolved are compatible with every
//! parameter and are left out of the most specific comparison.

use crate::inference::Inference;
use jsolve_common::{ResolveError, ResolveResult};
use jsolve_solver::{
    ConversionMode, ConstructorUsage, Hierarchy, MemberLookup, MethodUsage, ResolvedType,
    TypeRelations, TypeVariable, substitute,
};
use jsolve_syntax::NodeIndex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// What is known about one argument at a call site.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ArgType {
    Known(ResolvedType),
    /// An implicitly or explicitly typed lambda; typed by its target.
    Lambda { arity: usize, node: NodeIndex },
    /// Resolving the argument failed with an unsolved symbol.
    Unknown,
}

/// A method or constructor reduced to what overload resolution needs.
#[derive(Clone, Debug)]
pub(crate) struct Invocable {
    pub label: String,
    pub parameter_types: Vec<ResolvedType>,
    pub is_varargs: bool,
    /// Variables inferred at the call site.
    pub type_parameters: Vec<TypeVariable>,
}

impl From<&MethodUsage> for Invocable {
    fn from(usage: &MethodUsage) -> Self {
        Self {
            label: usage.declaration.qualified_signature(),
            parameter_types: usage.parameter_types.clone(),
            is_varargs: usage.is_varargs(),
            type_parameters: usage
                .declaration
                .type_parameters
                .iter()
                .map(|p| p.as_type_variable())
                .collect(),
        }
    }
}

impl From<&ConstructorUsage> for Invocable {
    fn from(usage: &ConstructorUsage) -> Self {
        Self {
            label: usage.declaration.qualified_signature(),
            parameter_types: usage.parameter_types.clone(),
            is_varargs: usage.is_varargs(),
            type_parameters: usage
                .declaration
                .type_parameters
                .iter()
                .map(|p| p.as_type_variable())
                .collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Phase {
    Strict,
    Loose,
    VariableArity,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Strict, Phase::Loose, Phase::VariableArity];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Loose => "loose",
            Self::VariableArity => "variable-arity",
        }
    }

    fn conversion(self) -> ConversionMode {
        match self {
            Self::Strict => ConversionMode::Strict,
            Self::Loose | Self::VariableArity => ConversionMode::Loose,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter types lined up with `arity` arguments: the declared list for
/// fixed arity phases, the trailing array's component repeated for the
/// variable arity phase. `None` when the arity cannot match.
pub(crate) fn expand_parameters(
    parameters: &[ResolvedType],
    is_varargs: bool,
    phase: Phase,
    arity: usize,
) -> Option<Vec<ResolvedType>> {
    match phase {
        Phase::Strict | Phase::Loose => (parameters.len() == arity).then(|| parameters.to_vec()),
        Phase::VariableArity => {
            let (last, fixed) = parameters.split_last()?;
            if !is_varargs || arity < fixed.len() {
                return None;
            }
            let component = last.component()?.clone();
            let mut out = fixed.to_vec();
            out.resize(arity, component);
            Some(out)
        }
    }
}

/// The chosen candidate with the inference state it was checked under.
pub(crate) struct Selection<'a> {
    pub index: usize,
    pub phase: Phase,
    /// Parameters lined up with the arguments, before substitution.
    pub expanded: Vec<ResolvedType>,
    pub inference: Inference<'a>,
}

struct Applicable<'a> {
    index: usize,
    expanded: Vec<ResolvedType>,
    inference: Inference<'a>,
    /// `expanded` after substituting the inferred type arguments.
    substituted: Vec<ResolvedType>,
}

#[derive(Clone, Copy)]
pub(crate) struct OverloadResolver<'a> {
    hierarchy: Hierarchy<'a>,
}

impl<'a> OverloadResolver<'a> {
    pub(crate) fn new(hierarchy: Hierarchy<'a>) -> Self {
        Self { hierarchy }
    }

    fn relations(&self) -> TypeRelations<'a> {
        TypeRelations::new(self.hierarchy)
    }

    fn lookup(&self) -> MemberLookup<'a> {
        MemberLookup::new(self.hierarchy)
    }

    /// The most specific applicable candidate for `args`, or `None` when
    /// nothing is applicable in any phase.
    pub(crate) fn select(
        &self,
        name: &str,
        candidates: &[Invocable],
        args: &[ArgType],
        explicit: &[ResolvedType],
    ) -> ResolveResult<Option<Selection<'a>>> {
        for phase in Phase::ALL {
            let mut applicable = Vec::new();
            for (index, candidate) in candidates.iter().enumerate() {
                let Some(expanded) =
                    expand_parameters(&candidate.parameter_types, candidate.is_varargs, phase, args.len())
                else {
                    continue;
                };
                let inference = self.infer(candidate, &expanded, args, explicit)?;
                let subst = inference.substitution();
                let substituted: Vec<ResolvedType> =
                    expanded.iter().map(|ty| substitute(ty, &subst)).collect();
                if self.is_applicable(&substituted, args, phase)? {
                    trace!(candidate = %candidate.label, %phase, "applicable");
                    applicable.push(Applicable {
                        index,
                        expanded,
                        inference,
                        substituted,
                    });
                }
            }
            if applicable.is_empty() {
                continue;
            }
            debug!(name, %phase, count = applicable.len(), "overload phase matched");
            let winner = self.most_specific(name, candidates, applicable, args)?;
            return Ok(Some(Selection {
                index: winner.index,
                phase,
                expanded: winner.expanded,
                inference: winner.inference,
            }));
        }
        debug!(name, candidates = candidates.len(), "no applicable candidate");
        Ok(None)
    }

    /// Infer the candidate's type arguments from explicit type arguments
    /// and the known argument types.
    pub(crate) fn infer(
        &self,
        candidate: &Invocable,
        expanded: &[ResolvedType],
        args: &[ArgType],
        explicit: &[ResolvedType],
    ) -> ResolveResult<Inference<'a>> {
        let mut inference = Inference::new(self.hierarchy, candidate.type_parameters.clone());
        if !explicit.is_empty() && explicit.len() == candidate.type_parameters.len() {
            for (var, ty) in candidate.type_parameters.iter().zip(explicit) {
                inference.bind(var.clone(), ty.clone());
            }
            return Ok(inference);
        }
        for (parameter, arg) in expanded.iter().zip(args) {
            if let ArgType::Known(ty) = arg {
                inference.unify(parameter, ty)?;
            }
        }
        Ok(inference)
    }

    fn is_applicable(&self, parameters: &[ResolvedType], args: &[ArgType], phase: Phase) -> ResolveResult<bool> {
        for (parameter, arg) in parameters.iter().zip(args) {
            let ok = match arg {
                ArgType::Unknown => true,
                ArgType::Lambda { arity, .. } => self.accepts_lambda(parameter, *arity)?,
                ArgType::Known(ty) => match self.relations().is_assignable(ty, parameter, phase.conversion()) {
                    Ok(ok) => ok,
                    Err(error) if error.is_unsolved() => false,
                    Err(error) => return Err(error),
                },
            };
            if !ok {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn accepts_lambda(&self, parameter: &ResolvedType, arity: usize) -> ResolveResult<bool> {
        let ResolvedType::Reference(iface) = parameter.upper_bound() else {
            return Ok(false);
        };
        match self.lookup().functional_method(&iface) {
            Ok(method) => Ok(method.is_some_and(|m| m.parameter_types.len() == arity)),
            Err(error) if error.is_unsolved() => Ok(false),
            Err(error) => Err(error),
        }
    }

    /// `a` is more specific than `b` when every compared parameter of `a`
    /// is assignable to the one of `b` and not the other way round.
    fn more_specific(&self, a: &[ResolvedType], b: &[ResolvedType], args: &[ArgType]) -> ResolveResult<bool> {
        let mut forward = true;
        let mut backward = true;
        for ((pa, pb), arg) in a.iter().zip(b).zip(args) {
            if !matches!(arg, ArgType::Known(_)) {
                continue;
            }
            forward &= self.relations().is_assignable(pa, pb, ConversionMode::Strict)?;
            backward &= self.relations().is_assignable(pb, pa, ConversionMode::Strict)?;
        }
        Ok(forward && !backward)
    }

    fn most_specific(
        &self,
        name: &str,
        candidates: &[Invocable],
        applicable: Vec<Applicable<'a>>,
        args: &[ArgType],
    ) -> ResolveResult<Applicable<'a>> {
        let mut maximal = Vec::new();
        for (i, candidate) in applicable.iter().enumerate() {
            let mut beaten = false;
            for (j, other) in applicable.iter().enumerate() {
                if i != j && self.more_specific(&other.substituted, &candidate.substituted, args)? {
                    beaten = true;
                    break;
                }
            }
            if !beaten {
                maximal.push(i);
            }
        }

        let same_signature = maximal
            .windows(2)
            .all(|pair| applicable[pair[0]].substituted == applicable[pair[1]].substituted);
        if maximal.len() == 1 || (!maximal.is_empty() && same_signature) {
            let first = maximal[0];
            return applicable
                .into_iter()
                .nth(first)
                .ok_or_else(|| ambiguous(name, Vec::new()));
        }

        let tied = if maximal.is_empty() {
            applicable.iter().map(|a| a.index).collect::<Vec<_>>()
        } else {
            maximal.iter().map(|&i| applicable[i].index).collect()
        };
        let labels = tied.into_iter().map(|i| candidates[i].label.clone()).collect();
        debug!(name, "ambiguous overload");
        Err(ambiguous(name, labels))
    }
}

fn ambiguous(name: &str, candidates: Vec<String>) -> ResolveError {
    ResolveError::AmbiguousOverload {
        name: Arc::from(name),
        candidates,
    }
}

#[cfg(test)]
#[path = "../tests/overload_tests.rs"]
mod tests;
