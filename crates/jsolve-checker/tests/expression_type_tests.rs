//! Static types of expressions.

mod common;

use common::{facade, facade_with, unit_with_class, void_method};
use jsolve_checker::{FacadeOptions, SymbolResolver};
use jsolve_common::ResolveError;
use jsolve_solver::{PrimitiveKind, ResolvedType};
use jsolve_syntax::{AssignOperator, BinaryOperator, NodeIndex, TreeBuilder, UnaryOperator};

fn prim(kind: PrimitiveKind) -> ResolvedType {
    ResolvedType::Primitive(kind)
}

#[test]
fn test_literals_and_operators() {
    let mut b = TreeBuilder::new();
    let one = b.int_lit("1");
    let two_l = b.long_lit("2L");
    let sum = b.binary(one, BinaryOperator::Plus, two_l);
    let text = b.string_lit("\"n=\"");
    let three = b.int_lit("3");
    let concat = b.binary(text, BinaryOperator::Plus, three);
    let c = b.char_lit("'c'");
    let negated = b.unary(UnaryOperator::Minus, c);
    let x = b.double_lit("1.5");
    let y = b.int_lit("2");
    let less = b.binary(x, BinaryOperator::Less, y);
    let not = b.unary(UnaryOperator::LogicalComplement, less);
    let null = b.null_lit();
    let stmts: Vec<NodeIndex> = [sum, concat, negated, not, null]
        .into_iter()
        .map(|e| b.expr_stmt(e))
        .collect();
    let run = void_method(&mut b, "run", vec![], stmts);
    let unit = unit_with_class(b, &[], "Ops", vec![run]);
    let facade = facade(&[unit.clone()]);

    assert_eq!(facade.calculate_type(&unit, one).unwrap(), prim(PrimitiveKind::Int));
    assert_eq!(facade.calculate_type(&unit, sum).unwrap(), prim(PrimitiveKind::Long));
    assert_eq!(facade.calculate_type(&unit, concat).unwrap(), ResolvedType::string());
    assert_eq!(facade.calculate_type(&unit, negated).unwrap(), prim(PrimitiveKind::Int));
    assert_eq!(facade.calculate_type(&unit, not).unwrap(), prim(PrimitiveKind::Boolean));
    assert_eq!(facade.calculate_type(&unit, null).unwrap(), ResolvedType::Null);
}

/// ```java
/// package demo;
/// import java.util.List;
/// public class Names {
///     public void run(List<String> names, String[] args, boolean flag) {
///         names.get(0);
///         args.length;
///         args[0];
///         flag ? 1 : 2L;
///         flag ? "a" : null;
///         String.class;
///         (Object) args;
///         Math.PI;
///         this;
///     }
/// }
/// ```
#[test]
fn test_member_access_and_compound_expressions() {
    let mut b = TreeBuilder::new();
    let names_ref = b.name("names");
    let zero = b.int_lit("0");
    let get = b.call(names_ref, "get", vec![zero]);
    let args_ref = b.name("args");
    let length = b.field_access(args_ref, "length");
    let args_ref2 = b.name("args");
    let zero2 = b.int_lit("0");
    let element = b.array_access(args_ref2, zero2);
    let flag_ref = b.name("flag");
    let one = b.int_lit("1");
    let two_l = b.long_lit("2L");
    let numeric = b.conditional(flag_ref, one, two_l);
    let flag_ref2 = b.name("flag");
    let a = b.string_lit("\"a\"");
    let null = b.null_lit();
    let with_null = b.conditional(flag_ref2, a, null);
    let string_type = b.class_type("String");
    let class_lit = b.class_expr(string_type);
    let object_type = b.class_type("Object");
    let args_ref3 = b.name("args");
    let cast = b.cast(object_type, args_ref3);
    let pi = b.qualified_name("Math.PI");
    let this = b.this_expr();

    let stmts: Vec<NodeIndex> = [get, length, element, numeric, with_null, class_lit, cast, pi, this]
        .into_iter()
        .map(|e| b.expr_stmt(e))
        .collect();

    let string_arg = b.class_type("String");
    let list_type = b.generic_type("List", vec![string_arg]);
    let names = b.param(list_type, "names");
    let string_component = b.class_type("String");
    let string_array = b.array_type(string_component);
    let args = b.param(string_array, "args");
    let boolean = b.primitive(PrimitiveKind::Boolean);
    let flag = b.param(boolean, "flag");
    let run = void_method(&mut b, "run", vec![names, args, flag], stmts);
    let unit = unit_with_class(b, &[("java.util.List", false)], "Names", vec![run]);
    let facade = facade(&[unit.clone()]);

    let ty = |node| facade.calculate_type(&unit, node).expect("typed").to_string();
    assert_eq!(ty(get), "java.lang.String");
    assert_eq!(ty(length), "int");
    assert_eq!(ty(element), "java.lang.String");
    assert_eq!(ty(numeric), "long");
    assert_eq!(ty(with_null), "java.lang.String");
    assert_eq!(ty(class_lit), "java.lang.Class<java.lang.String>");
    assert_eq!(ty(cast), "java.lang.Object");
    assert_eq!(ty(pi), "double");
    assert_eq!(ty(this), "demo.Names");
}

/// ```java
/// package demo;
/// import java.util.*;
/// import java.util.function.Function;
/// public class Infer {
///     public void run(Optional<String> maybe) {
///         var count = maybe.isPresent();
///         count;
///         List<String> xs = new ArrayList<>();
///         Function<String, Integer> f = s -> s.length();
///         maybe.map(t -> t.length());
///         List.of("a", "b");
///     }
/// }
/// ```
#[test]
fn test_var_diamond_lambda_and_generic_calls() {
    let mut b = TreeBuilder::new();
    let maybe_ref = b.name("maybe");
    let present = b.call(maybe_ref, "isPresent", vec![]);
    let var = b.var_type();
    let count_decl = b.local_var(var, &[("count", present)]);
    let count_ref = b.name("count");
    let count_stmt = b.expr_stmt(count_ref);

    let string_arg = b.class_type("String");
    let list_type = b.generic_type("List", vec![string_arg]);
    let diamond = b.diamond_type("ArrayList");
    let creation = b.new_object(diamond, vec![]);
    let xs_decl = b.local_var(list_type, &[("xs", creation)]);

    let s = b.inferred_param("s");
    let s_ref = b.name("s");
    let s_length = b.call(s_ref, "length", vec![]);
    let lambda = b.lambda(vec![s], s_length);
    let from = b.class_type("String");
    let to = b.class_type("Integer");
    let function_type = b.generic_type("Function", vec![from, to]);
    let f_decl = b.local_var(function_type, &[("f", lambda)]);

    let maybe_ref2 = b.name("maybe");
    let t = b.inferred_param("t");
    let t_ref = b.name("t");
    let t_length = b.call(t_ref, "length", vec![]);
    let mapper = b.lambda(vec![t], t_length);
    let map = b.call(maybe_ref2, "map", vec![mapper]);
    let map_stmt = b.expr_stmt(map);

    let list_ref = b.name("List");
    let a = b.string_lit("\"a\"");
    let bee = b.string_lit("\"b\"");
    let list_of = b.call(list_ref, "of", vec![a, bee]);
    let list_stmt = b.expr_stmt(list_of);

    let string_opt = b.class_type("String");
    let optional_type = b.generic_type("Optional", vec![string_opt]);
    let maybe = b.param(optional_type, "maybe");
    let run = void_method(
        &mut b,
        "run",
        vec![maybe],
        vec![count_decl, count_stmt, xs_decl, f_decl, map_stmt, list_stmt],
    );
    let unit = unit_with_class(
        b,
        &[("java.util.*", false), ("java.util.function.Function", false)],
        "Infer",
        vec![run],
    );
    let facade = facade(&[unit.clone()]);

    let ty = |node| facade.calculate_type(&unit, node).expect("typed").to_string();
    assert_eq!(ty(count_ref), "boolean");
    assert_eq!(ty(creation), "java.util.ArrayList<java.lang.String>");
    assert_eq!(ty(lambda), "java.util.function.Function<java.lang.String, java.lang.Integer>");
    assert_eq!(ty(s_ref), "java.lang.String");
    assert_eq!(ty(s_length), "int");
    assert_eq!(ty(map), "java.util.Optional<java.lang.Integer>");
    assert_eq!(ty(t_ref), "java.lang.String");
    assert_eq!(ty(list_of), "java.util.List<java.lang.String>");
    assert_eq!(facade.to_resolved_type(&unit, var).unwrap(), prim(PrimitiveKind::Boolean));
}

/// ```java
/// package demo;
/// public class Loop {
///     public void run() { var x = x + 1; }
/// }
/// ```
#[test]
fn test_self_referencing_var_is_a_cycle() {
    let mut b = TreeBuilder::new();
    let x_ref = b.name("x");
    let one = b.int_lit("1");
    let init = b.binary(x_ref, BinaryOperator::Plus, one);
    let var = b.var_type();
    let decl = b.local_var(var, &[("x", init)]);
    let run = void_method(&mut b, "run", vec![], vec![decl]);
    let unit = unit_with_class(b, &[], "Loop", vec![run]);
    let facade = facade(&[unit.clone()]);

    let err = facade.calculate_type(&unit, x_ref).expect_err("cycle");
    assert!(matches!(err, ResolveError::CyclicResolution { .. }), "{err}");
    // Nothing on the cyclic path was recorded, so asking again fails the same way.
    let again = facade.calculate_type(&unit, init).expect_err("cycle");
    assert!(matches!(again, ResolveError::CyclicResolution { .. }), "{again}");
}

/// ```java
/// package demo;
/// public class Counter {
///     int total;
///     public void run() { total = total + 1; }
/// }
/// ```
#[test]
fn test_answers_are_cached_per_facade() {
    let mut b = TreeBuilder::new();
    let int = b.int_type();
    let total = b.field(jsolve_syntax::Modifiers::empty(), int, &[("total", NodeIndex::NONE)]);
    let target = b.name("total");
    let total_ref = b.name("total");
    let one = b.int_lit("1");
    let sum = b.binary(total_ref, BinaryOperator::Plus, one);
    let assign = b.assign(target, AssignOperator::Assign, sum);
    let stmt = b.expr_stmt(assign);
    let run = void_method(&mut b, "run", vec![], vec![stmt]);
    let unit = unit_with_class(b, &[], "Counter", vec![total, run]);

    let cached = facade(&[unit.clone()]);
    assert_eq!(cached.calculate_type(&unit, assign).unwrap(), prim(PrimitiveKind::Int));
    let before = cached.cache_stats();
    assert!(before.entries > 0);
    assert_eq!(cached.calculate_type(&unit, assign).unwrap(), prim(PrimitiveKind::Int));
    let after = cached.cache_stats();
    assert_eq!(after.hits, before.hits + 1);
    assert_eq!(after.entries, before.entries);

    let uncached = facade_with(
        &[unit.clone()],
        FacadeOptions {
            cache: false,
            ..FacadeOptions::default()
        },
    );
    assert_eq!(uncached.calculate_type(&unit, sum).unwrap(), prim(PrimitiveKind::Int));
    assert_eq!(uncached.cache_stats().entries, 0);
}

#[test]
fn test_lambda_without_target_is_unsupported() {
    let mut b = TreeBuilder::new();
    let body = b.block(vec![]);
    let lambda = b.lambda(vec![], body);
    let stmt = b.expr_stmt(lambda);
    let run = void_method(&mut b, "run", vec![], vec![stmt]);
    let unit = unit_with_class(b, &[], "Bare", vec![run]);
    let facade = facade(&[unit.clone()]);

    let err = facade.calculate_type(&unit, lambda).expect_err("no target");
    assert!(matches!(err, ResolveError::UnsupportedConstruct { .. }), "{err}");
}
