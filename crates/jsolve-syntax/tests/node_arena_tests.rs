use super::*;

#[test]
fn test_children_get_parent_links() {
    let mut b = TreeBuilder::new();
    let receiver = b.name("list");
    let arg = b.int_lit("1");
    let call = b.call(receiver, "add", vec![arg]);
    let arena = b.arena();

    assert_eq!(arena.parent_of(receiver), call);
    assert_eq!(arena.parent_of(arg), call);
    assert!(arena.parent_of(call).is_none());
    assert_eq!(arena.children(call).as_slice(), &[receiver, arg]);
}

#[test]
fn test_typed_accessor_rejects_other_kinds() {
    let mut b = TreeBuilder::new();
    let name = b.name("x");
    let arena = b.arena();
    let node = arena.get(name).expect("node");

    assert!(arena.get_name(node).is_some());
    assert!(arena.get_method_call(node).is_none());
    assert!(arena.get_literal(node).is_none());
    assert_eq!(arena.name_of(name), Some("x"));
}

#[test]
fn test_dotted_class_type_builds_scope_chain() {
    let mut b = TreeBuilder::new();
    let string = b.class_type("String");
    let list = b.generic_type("java.util.List", vec![string]);
    let arena = b.arena();

    let data = arena.get(list).and_then(|n| arena.get_class_type(n)).expect("class type");
    assert_eq!(data.name, "List");
    assert_eq!(data.type_arguments.as_ref().map(|a| a.len()), Some(1));

    let util = arena.get(data.scope).and_then(|n| arena.get_class_type(n)).expect("scope");
    assert_eq!(util.name, "util");
    assert!(util.type_arguments.is_none());
    assert_eq!(arena.parent_of(string), list);
}

#[test]
fn test_diamond_type_is_distinct_from_raw() {
    let mut b = TreeBuilder::new();
    let raw = b.class_type("ArrayList");
    let diamond = b.diamond_type("ArrayList");
    let arena = b.arena();

    let raw = arena.get(raw).and_then(|n| arena.get_class_type(n)).expect("raw");
    let diamond = arena.get(diamond).and_then(|n| arena.get_class_type(n)).expect("diamond");
    assert!(!raw.is_diamond());
    assert!(diamond.is_diamond());
}

#[test]
fn test_instance_of_pattern_links_pattern_node() {
    let mut b = TreeBuilder::new();
    let o = b.name("o");
    let ty = b.class_type("String");
    let test = b.instance_of_pattern(o, ty, "s");
    let arena = b.arena();

    let data = arena.get(test).and_then(|n| arena.get_instance_of(n)).expect("instanceof");
    assert!(data.ty.is_none());
    assert_eq!(arena.kind_of(data.pattern), Some(SyntaxKind::TypePattern));
    assert_eq!(arena.parent_of(ty), data.pattern);
    assert_eq!(arena.name_of(data.pattern), Some("s"));
}

#[test]
fn test_field_declarators_in_order() {
    let mut b = TreeBuilder::new();
    let ty = b.int_type();
    let one = b.int_lit("1");
    let field = b.field(Modifiers::PRIVATE, ty, &[("a", one), ("b", NodeIndex::NONE)]);
    let arena = b.arena();

    let data = arena.get(field).and_then(|n| arena.get_variable_decl(n)).expect("field");
    let names: Vec<_> = data.declarators.iter().filter_map(|d| arena.name_of(d)).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(arena.parent_of(one), data.declarators.nodes[0]);
}

#[test]
fn test_compilation_unit_package_and_imports() {
    let mut b = TreeBuilder::new();
    let import = b.import("java.util.*", false);
    let static_import = b.import("java.lang.Math.max", true);
    let class = b.class("A", vec![]);
    let root = b.compilation_unit(Some("com.example"), vec![import, static_import], vec![class]);
    let unit = b.finish("A.java", root);

    assert_eq!(unit.package_name(), Some("com.example"));
    let imports: Vec<_> = unit.imports().collect();
    assert_eq!(imports.len(), 2);
    assert_eq!(imports[0].name, "java.util");
    assert!(imports[0].is_asterisk);
    assert!(imports[1].is_static);
    assert!(!imports[1].is_asterisk);
    assert_eq!(unit.types().nodes, vec![class]);
}

#[test]
fn test_file_ids_are_unique() {
    let mut a = TreeBuilder::new();
    let root_a = a.compilation_unit(None, vec![], vec![]);
    let mut b = TreeBuilder::new();
    let root_b = b.compilation_unit(None, vec![], vec![]);
    let unit_a = a.finish("A.java", root_a);
    let unit_b = b.finish("B.java", root_b);
    assert_ne!(unit_a.id(), unit_b.id());
    assert_eq!(unit_a.package_name(), None);
}

#[test]
fn test_location_uses_line_map() {
    let mut b = TreeBuilder::new();
    let root = b.compilation_unit(None, vec![], vec![]);
    let unit = b.finish("A.java", root).with_text("\n\nclass A {}");
    // Synthetic spans start at offset 0, the first line.
    assert_eq!(unit.location_of(root).to_string(), "A.java:1:1");
}
