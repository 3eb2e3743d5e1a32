use super::*;
use jsolve_solver::{PrimitiveKind, RuntimeTypeSolver, TypeParamOwner, substitute};

fn runtime() -> RuntimeTypeSolver {
    RuntimeTypeSolver::new().expect("built-in catalog")
}

fn var(name: &str) -> TypeVariable {
    TypeVariable {
        name: name.into(),
        owner: TypeParamOwner::Method {
            declaring_type: "demo.Util".into(),
            ordinal: 0,
        },
        erasure: ReferenceType::object(),
    }
}

fn generic(name: &str, args: Vec<ResolvedType>) -> ResolvedType {
    ResolvedType::Reference(ReferenceType::top_level(name).with_arguments(args))
}

#[test]
fn test_primitive_argument_is_boxed() {
    let solver = runtime();
    let t = var("T");
    let mut inference = Inference::new(Hierarchy::new(&solver), vec![t.clone()]);
    inference
        .unify(&ResolvedType::TypeVariable(t.clone()), &ResolvedType::Primitive(PrimitiveKind::Int))
        .expect("unify");
    assert_eq!(inference.binding(&t), Some(&ResolvedType::top_level("java.lang.Integer")));
}

#[test]
fn test_argument_matched_through_its_supertype() {
    let solver = runtime();
    let e = var("E");
    let mut inference = Inference::new(Hierarchy::new(&solver), vec![e.clone()]);
    let parameter = generic("java.util.List", vec![ResolvedType::TypeVariable(e.clone())]);
    let argument = generic("java.util.ArrayList", vec![ResolvedType::string()]);
    inference.unify(&parameter, &argument).expect("unify");
    assert_eq!(inference.binding(&e), Some(&ResolvedType::string()));
}

#[test]
fn test_wildcard_bounds_are_followed() {
    let solver = runtime();
    let (t, u) = (var("T"), var("U"));
    let mut inference = Inference::new(Hierarchy::new(&solver), vec![t.clone(), u.clone()]);
    let parameter = generic(
        "java.util.function.Function",
        vec![
            ResolvedType::Wildcard(Wildcard::Super(Box::new(ResolvedType::TypeVariable(t.clone())))),
            ResolvedType::Wildcard(Wildcard::Extends(Box::new(ResolvedType::TypeVariable(u.clone())))),
        ],
    );
    let argument = generic(
        "java.util.function.Function",
        vec![ResolvedType::string(), ResolvedType::top_level("java.lang.Integer")],
    );
    inference.unify(&parameter, &argument).expect("unify");
    assert_eq!(inference.binding(&t), Some(&ResolvedType::string()));
    assert_eq!(inference.binding(&u), Some(&ResolvedType::top_level("java.lang.Integer")));
}

#[test]
fn test_conflicting_bindings_widen() {
    let solver = runtime();
    let t = var("T");
    let mut inference = Inference::new(Hierarchy::new(&solver), vec![t.clone()]);
    let param = ResolvedType::TypeVariable(t.clone());
    inference.unify(&param, &ResolvedType::top_level("java.lang.Integer")).expect("first");
    inference.unify(&param, &ResolvedType::top_level("java.lang.Long")).expect("second");
    let bound = inference.binding(&t).expect("bound");
    assert_ne!(bound, &ResolvedType::top_level("java.lang.Integer"));
    assert_ne!(bound, &ResolvedType::top_level("java.lang.Long"));
}

#[test]
fn test_null_argument_binds_nothing() {
    let solver = runtime();
    let t = var("T");
    let mut inference = Inference::new(Hierarchy::new(&solver), vec![t.clone()]);
    inference
        .unify(&ResolvedType::TypeVariable(t.clone()), &ResolvedType::Null)
        .expect("unify");
    assert!(inference.binding(&t).is_none());
    assert!(inference.has_unbound(&ResolvedType::TypeVariable(t)));
}

#[test]
fn test_unbound_variables_fall_back_to_their_erasure() {
    let solver = runtime();
    let (t, u) = (var("T"), var("U"));
    let mut inference = Inference::new(Hierarchy::new(&solver), vec![t.clone(), u.clone()]);
    inference.bind(t.clone(), ResolvedType::string());

    let pair = generic(
        "java.util.Map",
        vec![ResolvedType::TypeVariable(t), ResolvedType::TypeVariable(u.clone())],
    );
    let partial = substitute(&pair, &inference.partial_substitution());
    assert_eq!(
        partial,
        generic("java.util.Map", vec![ResolvedType::string(), ResolvedType::TypeVariable(u)])
    );
    let full = substitute(&pair, &inference.substitution());
    assert_eq!(
        full,
        generic("java.util.Map", vec![ResolvedType::string(), ResolvedType::object()])
    );
}

#[test]
fn test_foreign_variables_are_not_inferred() {
    let solver = runtime();
    let (t, other) = (var("T"), var("X"));
    let mut inference = Inference::new(Hierarchy::new(&solver), vec![t]);
    inference
        .unify(&ResolvedType::TypeVariable(other.clone()), &ResolvedType::string())
        .expect("unify");
    assert!(inference.binding(&other).is_none());
}
