//! Call Checking Module
//!
//! Resolves invocations to the method or constructor they call. It handles:
//! - Candidate collection for unqualified, `super`, type-qualified and
//!   expression-qualified method calls
//! - Argument typing, with lambdas and unresolvable arguments deferred
//! - Overload selection, then a second inference pass that types lambda
//!   bodies once their parameter types are known
//! - Object creation, including diamond inference from the constructor
//!   arguments and the target type
//! - `this(...)` and `super(...)` constructor invocations

use crate::inference::Inference;
use crate::overload::{ArgType, Invocable, OverloadResolver, Phase, Selection};
use crate::name_resolution::Qualifier;
use crate::state::ResolverState;
use jsolve_common::{ResolveError, ResolveResult};
use jsolve_solver::instantiate::substitute_reference;
use jsolve_solver::{
    ConstructorUsage, MethodUsage, ReferenceType, ResolvedType, SymbolReference, TypeSubstitution,
    TypeVariable, substitute,
};
use jsolve_syntax::{NodeArena, NodeIndex, NodeList, SyntaxKind};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// A resolved invocation.
#[derive(Clone, Debug)]
pub(crate) struct SolvedCall<U> {
    /// The invoked member with inferred type arguments substituted.
    pub usage: U,
    pub phase: Phase,
    /// Parameter type each argument is passed to.
    pub argument_targets: Vec<ResolvedType>,
    /// Type of the receiver expression of a qualified call.
    pub receiver: Option<ResolvedType>,
}

impl<U> SolvedCall<U> {
    pub(crate) fn target_of(&self, index: usize) -> Option<&ResolvedType> {
        self.argument_targets.get(index)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct SolvedCreation {
    pub created: ReferenceType,
    pub call: SolvedCall<ConstructorUsage>,
}

/// The selected candidate after the lambda pass.
struct Chosen<'a> {
    index: usize,
    phase: Phase,
    expanded: Vec<ResolvedType>,
    inference: Inference<'a>,
}

impl Chosen<'_> {
    fn finish(&self) -> (TypeSubstitution, Vec<ResolvedType>) {
        let subst = self.inference.substitution();
        let targets = self.expanded.iter().map(|ty| substitute(ty, &subst)).collect();
        (subst, targets)
    }
}

/// An unsolved qualifier leaves the call unsolved; other failures propagate.
fn unless_unsolved<T>(result: ResolveResult<T>) -> ResolveResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(error) if error.is_unsolved() => Ok(None),
        Err(error) => Err(error),
    }
}

impl<'a> ResolverState<'a> {
    // =========================================================================
    // Method calls
    // =========================================================================

    /// The method a call invokes.
    pub(crate) fn solve_method_call(
        &mut self,
        call: NodeIndex,
    ) -> ResolveResult<SymbolReference<SolvedCall<MethodUsage>>> {
        let data = self.data(call, "method call", NodeArena::get_method_call)?;
        let Some((receiver, usages)) = self.method_candidates(call, data.scope, &data.name)? else {
            return Ok(SymbolReference::Unsolved);
        };
        if usages.is_empty() {
            debug!(name = %data.name, "no method with this name");
            return Ok(SymbolReference::Unsolved);
        }

        let args = self.argument_types(&data.arguments)?;
        let explicit = self.explicit_type_arguments(data.type_arguments.as_ref())?;
        let invocables: Vec<Invocable> = usages.iter().map(Invocable::from).collect();
        let Some(chosen) = self.choose(&data.name, &invocables, &args, &explicit)? else {
            return Ok(SymbolReference::Unsolved);
        };
        let (subst, argument_targets) = chosen.finish();
        let usage = usages[chosen.index].substituted(&subst);
        trace!(call = call.0, method = %usage.declaration.qualified_signature(), phase = %chosen.phase, "call resolved");
        Ok(SymbolReference::Solved(SolvedCall {
            usage,
            phase: chosen.phase,
            argument_targets,
            receiver,
        }))
    }

    /// Receiver type (for expression receivers) and candidate methods.
    /// `None` when the qualifier names nothing.
    fn method_candidates(
        &mut self,
        call: NodeIndex,
        scope: NodeIndex,
        name: &str,
    ) -> ResolveResult<Option<(Option<ResolvedType>, Vec<MethodUsage>)>> {
        if scope.is_none() {
            return Ok(Some((None, self.unqualified_methods(name, call)?)));
        }
        if self.kind_of(scope) == Some(SyntaxKind::SuperExpression) {
            let Some(superclass) = unless_unsolved(self.super_type(scope))? else {
                return Ok(None);
            };
            let methods = unless_unsolved(self.lookup().methods_named(&superclass, name))?;
            return Ok(methods.map(|methods| (None, methods)));
        }
        let Some(qualifier) = unless_unsolved(self.classify_qualifier(scope))? else {
            debug!(name, "call qualifier is unsolved");
            return Ok(None);
        };
        match qualifier {
            Qualifier::Value(ty) => {
                let Some(receiver) = unless_unsolved(self.receiver_of(&ty, scope))? else {
                    return Ok(None);
                };
                let methods = unless_unsolved(self.lookup().methods_named(&receiver, name))?;
                Ok(methods.map(|methods| (Some(ty), methods)))
            }
            Qualifier::Type(owner) => {
                let methods = unless_unsolved(self.lookup().methods_named(&owner, name))?;
                Ok(methods.map(|methods| (None, methods)))
            }
            Qualifier::Package(package) => {
                debug!(%package, name, "call qualified by a package");
                Ok(None)
            }
        }
    }

    /// Return type of a call: the substituted return type of the invoked
    /// method. `clone()` on an array returns the array type.
    pub(crate) fn method_call_type(&mut self, call: NodeIndex) -> ResolveResult<ResolvedType> {
        match self.solve_method_call(call)? {
            SymbolReference::Solved(solved) => {
                if let Some(receiver) = solved.receiver.filter(ResolvedType::is_array)
                    && solved.usage.name() == "clone"
                {
                    return Ok(receiver);
                }
                Ok(solved.usage.return_type)
            }
            SymbolReference::Unsolved => Err(self.unsolved(self.reference_name(call), call)),
        }
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    /// The constructor an object creation invokes and the created type.
    pub(crate) fn solve_object_creation(
        &mut self,
        node: NodeIndex,
    ) -> ResolveResult<SymbolReference<SolvedCreation>> {
        let data = self.data(node, "object creation", NodeArena::get_object_creation)?;
        let is_diamond = self
            .data(data.ty, "created type", NodeArena::get_class_type)?
            .is_diamond();
        let created = match self.type_node(data.ty) {
            Ok(ResolvedType::Reference(created)) => created,
            Ok(other) => return Err(self.unsupported(format!("instantiating {}", other.describe()), node)),
            Err(error) if error.is_unsolved() => return Ok(SymbolReference::Unsolved),
            Err(error) => return Err(error),
        };
        let args = self.argument_types(&data.arguments)?;
        let explicit = self.explicit_type_arguments(data.type_arguments.as_ref())?;

        if is_diamond {
            return self.solve_diamond(node, created, &args, &explicit);
        }
        let usages = self.lookup().constructors(&created)?;
        let invocables: Vec<Invocable> = usages.iter().map(Invocable::from).collect();
        let Some(chosen) = self.choose(created.simple_name(), &invocables, &args, &explicit)? else {
            return Ok(SymbolReference::Unsolved);
        };
        let (subst, argument_targets) = chosen.finish();
        Ok(SymbolReference::Solved(SolvedCreation {
            created,
            call: SolvedCall {
                usage: usages[chosen.index].substituted(&subst),
                phase: chosen.phase,
                argument_targets,
                receiver: None,
            },
        }))
    }

    /// `new C<>(...)`: the class type arguments are inferred together with
    /// the constructor's own, from the arguments first and then from the
    /// type the context expects.
    fn solve_diamond(
        &mut self,
        node: NodeIndex,
        raw: ReferenceType,
        args: &[ArgType],
        explicit: &[ResolvedType],
    ) -> ResolveResult<SymbolReference<SolvedCreation>> {
        let decl = self.hierarchy().declaration(&raw)?;
        let declared = decl.declared_type();
        let usages = self.lookup().constructors(&declared)?;
        let class_variables: Vec<TypeVariable> = decl
            .type_parameters
            .iter()
            .map(|p| p.as_type_variable())
            .collect();
        let invocables: Vec<Invocable> = usages
            .iter()
            .map(|usage| {
                let mut invocable = Invocable::from(usage);
                invocable.type_parameters.extend(class_variables.iter().cloned());
                invocable
            })
            .collect();
        let Some(mut chosen) = self.choose(raw.simple_name(), &invocables, args, explicit)? else {
            return Ok(SymbolReference::Unsolved);
        };

        let declared_type = ResolvedType::Reference(declared.clone());
        if chosen.inference.has_unbound(&declared_type)
            && let Some(ResolvedType::Reference(target)) = self.target_type(node, false)?.map(|t| t.upper_bound())
            && let Some(ancestor) = self.hierarchy().find_ancestor(&declared, &target.qualified_name)?
        {
            chosen
                .inference
                .unify(&ResolvedType::Reference(ancestor), &ResolvedType::Reference(target))?;
        }

        let (subst, argument_targets) = chosen.finish();
        let created = substitute_reference(&declared, &subst);
        trace!(node = node.0, created = %created, "diamond inferred");
        Ok(SymbolReference::Solved(SolvedCreation {
            created,
            call: SolvedCall {
                usage: usages[chosen.index].substituted(&subst),
                phase: chosen.phase,
                argument_targets,
                receiver: None,
            },
        }))
    }

    /// Type of `new C(...)`. Only the diamond form needs the constructor.
    pub(crate) fn object_creation_type(&mut self, node: NodeIndex) -> ResolveResult<ResolvedType> {
        let data = self.data(node, "object creation", NodeArena::get_object_creation)?;
        let is_diamond = self
            .data(data.ty, "created type", NodeArena::get_class_type)?
            .is_diamond();
        if !is_diamond {
            return self.type_node(data.ty);
        }
        match self.solve_object_creation(node)? {
            SymbolReference::Solved(creation) => Ok(ResolvedType::Reference(creation.created)),
            SymbolReference::Unsolved => self.type_node(data.ty),
        }
    }

    /// `this(...)` or `super(...)` as the first statement of a constructor.
    pub(crate) fn solve_explicit_constructor_call(
        &mut self,
        node: NodeIndex,
    ) -> ResolveResult<SymbolReference<SolvedCall<ConstructorUsage>>> {
        let data = self.data(node, "constructor invocation", NodeArena::get_explicit_ctor_call)?;
        let decl = self.enclosing_type_declaration(node)?;
        let target = if data.is_this {
            decl.declared_type()
        } else {
            decl.superclass.clone().unwrap_or_else(ReferenceType::object)
        };
        let usages = self.lookup().constructors(&target)?;
        let args = self.argument_types(&data.arguments)?;
        let explicit = self.explicit_type_arguments(data.type_arguments.as_ref())?;
        let invocables: Vec<Invocable> = usages.iter().map(Invocable::from).collect();
        let Some(chosen) = self.choose(target.simple_name(), &invocables, &args, &explicit)? else {
            return Ok(SymbolReference::Unsolved);
        };
        let (subst, argument_targets) = chosen.finish();
        Ok(SymbolReference::Solved(SolvedCall {
            usage: usages[chosen.index].substituted(&subst),
            phase: chosen.phase,
            argument_targets,
            receiver: None,
        }))
    }

    // =========================================================================
    // Arguments and selection
    // =========================================================================

    fn argument_types(&mut self, arguments: &NodeList) -> ResolveResult<Vec<ArgType>> {
        let arena = self.arena();
        let mut out: SmallVec<[ArgType; 4]> = SmallVec::new();
        for arg in arguments.iter() {
            let mut inner = arg;
            while let Some(header) = arena.get(inner)
                && header.kind == SyntaxKind::EnclosedExpression
                && let Some(wrapped) = arena.get_wrapper(header)
            {
                inner = wrapped.expression;
            }
            if let Some(lambda) = arena.get(inner).and_then(|h| arena.get_lambda(h)) {
                out.push(ArgType::Lambda {
                    arity: lambda.parameters.len(),
                    node: inner,
                });
                continue;
            }
            match self.expression_type(arg) {
                Ok(ty) => out.push(ArgType::Known(ty)),
                Err(error) if error.is_unsolved() => {
                    trace!(arg = arg.0, %error, "argument type unknown");
                    out.push(ArgType::Unknown);
                }
                Err(error) => return Err(error),
            }
        }
        Ok(out.into_vec())
    }

    fn explicit_type_arguments(&mut self, list: Option<&NodeList>) -> ResolveResult<Vec<ResolvedType>> {
        match list {
            Some(list) => list.iter().map(|node| self.type_node(node)).collect(),
            None => Ok(Vec::new()),
        }
    }

    /// Overload selection followed by the lambda pass.
    fn choose(
        &mut self,
        name: &str,
        candidates: &[Invocable],
        args: &[ArgType],
        explicit: &[ResolvedType],
    ) -> ResolveResult<Option<Chosen<'a>>> {
        let resolver = OverloadResolver::new(self.hierarchy());
        let Some(Selection {
            index,
            phase,
            expanded,
            mut inference,
        }) = resolver.select(name, candidates, args, explicit)?
        else {
            return Ok(None);
        };
        self.infer_from_lambdas(&expanded, args, &mut inference)?;
        Ok(Some(Chosen {
            index,
            phase,
            expanded,
            inference,
        }))
    }

    /// Type lambda bodies whose parameter types are already known and use
    /// them to bind the variables in the functional return type.
    fn infer_from_lambdas(
        &mut self,
        expanded: &[ResolvedType],
        args: &[ArgType],
        inference: &mut Inference<'a>,
    ) -> ResolveResult<()> {
        for (parameter, arg) in expanded.iter().zip(args) {
            let &ArgType::Lambda { node, .. } = arg else {
                continue;
            };
            if !inference.has_unbound(parameter) {
                continue;
            }
            let partial = substitute(parameter, &inference.partial_substitution());
            let ResolvedType::Reference(iface) = partial.upper_bound() else {
                continue;
            };
            let Some(method) = self.lookup().functional_method(&iface)? else {
                continue;
            };
            if method.parameter_types.iter().any(|p| inference.has_unbound(p))
                || !inference.has_unbound(&method.return_type)
            {
                continue;
            }

            self.ctx.assume_lambda_parameters(node, method.parameter_types.clone());
            let body = self.lambda_body_type(node);
            self.ctx.forget_lambda_parameters(node);
            match body {
                Ok(ResolvedType::Void) => {}
                Ok(ty) => inference.unify(&method.return_type, &ty)?,
                Err(error)
                    if error.is_unsolved()
                        || matches!(error, ResolveError::CyclicResolution { .. }) =>
                {
                    trace!(lambda = node.0, %error, "lambda body left out of inference");
                }
                Err(error) => return Err(error),
            }
        }
        Ok(())
    }
}
