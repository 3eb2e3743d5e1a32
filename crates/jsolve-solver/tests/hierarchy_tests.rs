use super::*;
use crate::declarations::{DeclarationOrigin, TypeKind};
use crate::solvers::{MemoryTypeSolver, RuntimeTypeSolver};

fn runtime() -> RuntimeTypeSolver {
    RuntimeTypeSolver::new().expect("built-in catalog")
}

fn reference(name: &str, args: &[&str]) -> ReferenceType {
    ReferenceType::top_level(name).with_arguments(args.iter().map(|a| ResolvedType::top_level(a)).collect())
}

fn names(types: &[ReferenceType]) -> Vec<String> {
    types.iter().map(ToString::to_string).collect()
}

#[test]
fn test_ancestors_are_depth_first_with_object_last() {
    let solver = runtime();
    let hierarchy = Hierarchy::new(&solver);
    let list = reference("java.util.ArrayList", &["java.lang.String"]);
    let ancestors = hierarchy.ancestors(&list).expect("ancestors");
    assert_eq!(
        names(&ancestors),
        [
            "java.util.List<java.lang.String>",
            "java.util.Collection<java.lang.String>",
            "java.lang.Iterable<java.lang.String>",
            "java.lang.Cloneable",
            "java.io.Serializable",
            "java.lang.Object",
        ]
    );
}

#[test]
fn test_raw_use_has_erased_supertypes() {
    let solver = runtime();
    let hierarchy = Hierarchy::new(&solver);
    let supers = hierarchy
        .direct_supertypes(&ReferenceType::top_level("java.util.ArrayList"))
        .expect("supertypes");
    assert!(supers.iter().all(ReferenceType::is_raw));
}

#[test]
fn test_object_has_no_ancestors() {
    let solver = runtime();
    let hierarchy = Hierarchy::new(&solver);
    assert!(hierarchy.ancestors(&ReferenceType::object()).expect("ancestors").is_empty());
}

#[test]
fn test_find_ancestor_parameterization() {
    let solver = runtime();
    let hierarchy = Hierarchy::new(&solver);
    let integer = ReferenceType::top_level("java.lang.Integer");
    let comparable = hierarchy
        .find_ancestor(&integer, "java.lang.Comparable")
        .expect("lookup")
        .expect("Integer is comparable");
    assert_eq!(comparable.to_string(), "java.lang.Comparable<java.lang.Integer>");
    assert!(hierarchy.is_subtype_by_name(&integer, "java.lang.Number").expect("lookup"));
    assert!(!hierarchy.is_subtype_by_name(&integer, "java.lang.String").expect("lookup"));
}

#[test]
fn test_cyclic_superclass_is_reported() {
    let memory = MemoryTypeSolver::new();
    for (name, sup) in [("p.A", "p.B"), ("p.B", "p.A")] {
        let mut decl = TypeDeclaration::new(name, name, TypeKind::Class, DeclarationOrigin::Memory);
        decl.superclass = Some(ReferenceType::top_level(sup));
        memory.register(decl);
    }
    let hierarchy = Hierarchy::new(&memory);
    let err = hierarchy.ancestors(&ReferenceType::top_level("p.A")).unwrap_err();
    assert_eq!(err, ResolveError::cyclic("p.A -> p.B -> p.A"));
}

#[test]
fn test_missing_supertype_is_unsolved() {
    let memory = MemoryTypeSolver::new();
    let mut decl = TypeDeclaration::new("p.A", "p.A", TypeKind::Class, DeclarationOrigin::Memory);
    decl.superclass = Some(ReferenceType::top_level("p.Gone"));
    memory.register(decl);
    let hierarchy = Hierarchy::new(&memory);
    let err = hierarchy.ancestors(&ReferenceType::top_level("p.A")).unwrap_err();
    assert!(err.is_unsolved());
}

#[test]
fn test_lub_of_equal_types_and_null() {
    let solver = runtime();
    let hierarchy = Hierarchy::new(&solver);
    let lub = hierarchy
        .least_upper_bound(&[ResolvedType::Null, ResolvedType::string(), ResolvedType::string()])
        .expect("lub");
    assert_eq!(lub, ResolvedType::string());
    assert_eq!(
        hierarchy.least_upper_bound(&[ResolvedType::Null]).expect("lub"),
        ResolvedType::Null
    );
}

#[test]
fn test_lub_of_boxed_numbers() {
    let solver = runtime();
    let hierarchy = Hierarchy::new(&solver);
    let lub = hierarchy
        .least_upper_bound(&[
            ResolvedType::top_level("java.lang.Integer"),
            ResolvedType::top_level("java.lang.Double"),
        ])
        .expect("lub");
    assert_eq!(lub.to_string(), "java.lang.Number & java.lang.Comparable");
}

#[test]
fn test_lub_keeps_agreeing_arguments() {
    let solver = runtime();
    let hierarchy = Hierarchy::new(&solver);
    let lub = hierarchy
        .least_upper_bound(&[
            reference("java.util.ArrayList", &["java.lang.String"]).into(),
            reference("java.util.HashSet", &["java.lang.String"]).into(),
        ])
        .expect("lub");
    assert_eq!(
        lub.to_string(),
        "java.util.Collection<java.lang.String> & java.lang.Cloneable & java.io.Serializable"
    );
}

#[test]
fn test_lub_of_subclass_and_superclass() {
    let solver = runtime();
    let hierarchy = Hierarchy::new(&solver);
    let lub = hierarchy
        .least_upper_bound(&[
            ResolvedType::top_level("java.lang.IllegalArgumentException"),
            ResolvedType::top_level("java.lang.RuntimeException"),
        ])
        .expect("lub");
    assert_eq!(lub, ResolvedType::top_level("java.lang.RuntimeException"));
}
