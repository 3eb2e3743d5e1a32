use super::*;
use crate::solvers::RuntimeTypeSolver;
use crate::types::PrimitiveKind;

fn runtime() -> RuntimeTypeSolver {
    RuntimeTypeSolver::new().expect("built-in catalog")
}

fn generic(name: &str, args: Vec<ResolvedType>) -> ReferenceType {
    ReferenceType::top_level(name).with_arguments(args)
}

#[test]
fn test_overridden_method_is_reported_once() {
    let solver = runtime();
    let lookup = MemberLookup::new(Hierarchy::new(&solver));
    let list = generic("java.util.ArrayList", vec![ResolvedType::string()]);

    let gets = lookup.methods_named(&list, "get").expect("methods");
    assert_eq!(gets.len(), 1);
    assert_eq!(&*gets[0].declaring_type.qualified_name, "java.util.ArrayList");
    assert_eq!(gets[0].return_type, ResolvedType::string());
    assert_eq!(gets[0].parameter_types, vec![ResolvedType::Primitive(PrimitiveKind::Int)]);
}

#[test]
fn test_inherited_method_is_substituted() {
    let solver = runtime();
    let lookup = MemberLookup::new(Hierarchy::new(&solver));
    let list = generic("java.util.ArrayList", vec![ResolvedType::string()]);

    let iterators = lookup.methods_named(&list, "iterator").expect("methods");
    assert_eq!(iterators.len(), 1);
    assert_eq!(
        iterators[0].declaring_type.to_string(),
        "java.util.Collection<java.lang.String>"
    );
    assert_eq!(
        iterators[0].return_type.to_string(),
        "java.util.Iterator<java.lang.String>"
    );

    let add_all = lookup.methods_named(&list, "addAll").expect("methods");
    assert_eq!(
        add_all[0].parameter_types[0].to_string(),
        "java.util.Collection<? extends java.lang.String>"
    );
}

#[test]
fn test_overloads_are_kept() {
    let solver = runtime();
    let lookup = MemberLookup::new(Hierarchy::new(&solver));
    let adds = lookup
        .methods_named(&generic("java.util.ArrayList", vec![ResolvedType::string()]), "add")
        .expect("methods");
    let signatures: Vec<String> = adds.iter().map(|m| m.declaration.signature()).collect();
    assert_eq!(signatures, ["add(E)", "add(int, E)"]);
}

#[test]
fn test_raw_receiver_erases_members() {
    let solver = runtime();
    let lookup = MemberLookup::new(Hierarchy::new(&solver));
    let gets = lookup
        .methods_named(&ReferenceType::top_level("java.util.List"), "get")
        .expect("methods");
    assert_eq!(gets[0].return_type, ResolvedType::object());
}

#[test]
fn test_object_methods_are_visible_everywhere() {
    let solver = runtime();
    let lookup = MemberLookup::new(Hierarchy::new(&solver));
    let hashes = lookup
        .methods_named(&ReferenceType::top_level("java.lang.Runnable"), "hashCode")
        .expect("methods");
    assert_eq!(hashes.len(), 1);
    assert!(hashes[0].declaring_type.is_object());
}

#[test]
fn test_static_field_lookup() {
    let solver = runtime();
    let lookup = MemberLookup::new(Hierarchy::new(&solver));
    let max = lookup
        .field(&ReferenceType::top_level("java.lang.Integer"), "MAX_VALUE")
        .expect("lookup")
        .expect("MAX_VALUE");
    assert!(max.declaration.is_static());
    assert_eq!(max.ty, ResolvedType::Primitive(PrimitiveKind::Int));
    assert!(lookup
        .field(&ReferenceType::top_level("java.lang.Integer"), "missing")
        .expect("lookup")
        .is_none());
}

#[test]
fn test_constructors_are_substituted() {
    let solver = runtime();
    let lookup = MemberLookup::new(Hierarchy::new(&solver));
    let ctors = lookup
        .constructors(&generic("java.util.ArrayList", vec![ResolvedType::string()]))
        .expect("constructors");
    assert_eq!(ctors.len(), 3);
    assert!(ctors[0].parameter_types.is_empty());
    assert_eq!(
        ctors[2].parameter_types[0].to_string(),
        "java.util.Collection<? extends java.lang.String>"
    );
}

#[test]
fn test_member_type_through_supertype() {
    let solver = runtime();
    let lookup = MemberLookup::new(Hierarchy::new(&solver));
    let entry = lookup
        .member_type(&ReferenceType::top_level("java.util.HashMap"), "Entry")
        .expect("lookup")
        .expect("Entry is inherited from Map");
    assert_eq!(&*entry.qualified_name, "java.util.Map.Entry");
    assert_eq!(&*entry.binary_name, "java.util.Map$Entry");
}

#[test]
fn test_functional_method_of_function() {
    let solver = runtime();
    let lookup = MemberLookup::new(Hierarchy::new(&solver));
    let function = generic(
        "java.util.function.Function",
        vec![ResolvedType::string(), ResolvedType::top_level("java.lang.Integer")],
    );
    let apply = lookup
        .functional_method(&function)
        .expect("lookup")
        .expect("Function is functional");
    assert_eq!(apply.name(), "apply");
    assert_eq!(apply.parameter_types, vec![ResolvedType::string()]);
    assert_eq!(apply.return_type, ResolvedType::top_level("java.lang.Integer"));
}

#[test]
fn test_functional_method_strips_wildcards() {
    let solver = runtime();
    let lookup = MemberLookup::new(Hierarchy::new(&solver));
    let comparable = generic(
        "java.lang.Comparable",
        vec![ResolvedType::Wildcard(Wildcard::Super(Box::new(ResolvedType::top_level(
            "java.lang.Integer",
        ))))],
    );
    let compare = lookup
        .functional_method(&comparable)
        .expect("lookup")
        .expect("Comparable is functional");
    assert_eq!(
        compare.parameter_types,
        vec![ResolvedType::top_level("java.lang.Integer")]
    );
}

#[test]
fn test_non_functional_types() {
    let solver = runtime();
    let lookup = MemberLookup::new(Hierarchy::new(&solver));
    let list = generic("java.util.List", vec![ResolvedType::string()]);
    assert!(lookup.functional_method(&list).expect("lookup").is_none());
    let array_list = ReferenceType::top_level("java.util.ArrayList");
    assert!(lookup.functional_method(&array_list).expect("lookup").is_none());
}

#[test]
fn test_usage_substitution() {
    let solver = runtime();
    let lookup = MemberLookup::new(Hierarchy::new(&solver));
    let identity = lookup
        .methods_named(&ReferenceType::top_level("java.util.function.Function"), "identity")
        .expect("methods")
        .remove(0);
    let var = identity.declaration.type_parameters[0].as_type_variable();
    let mut subst = TypeSubstitution::new();
    subst.insert(var, ResolvedType::string());
    let specialized = identity.substituted(&subst);
    assert_eq!(
        specialized.return_type.to_string(),
        "java.util.function.Function<java.lang.String, java.lang.String>"
    );
}
