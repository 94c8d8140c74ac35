use super::patterns::{self, Pattern};
use super::*;

fn call_with_args(arena: &mut NodeArena, name: &str, args: Vec<NodeIndex>) -> NodeIndex {
    let receiver = arena.add_variable("manager");
    arena.add_method_reference(receiver, name, args, ["#M#C\\Manager.getStorage"])
}

#[test]
fn test_method_with_first_string_parameter_accepts_literal() {
    let mut arena = NodeArena::new();
    let arg = arena.add_string_literal("node");
    let call = call_with_args(&mut arena, "getStorage", vec![arg]);

    assert!(patterns::method_with_first_string_parameter().accepts(&arena, call));
}

#[test]
fn test_method_with_first_string_parameter_rejects_other_shapes() {
    let mut arena = NodeArena::new();
    let pattern = patterns::method_with_first_string_parameter();

    let no_args = call_with_args(&mut arena, "getStorage", vec![]);
    assert!(!pattern.accepts(&arena, no_args));

    let var = arena.add_variable("type");
    let variable_arg = call_with_args(&mut arena, "getStorage", vec![var]);
    assert!(!pattern.accepts(&arena, variable_arg));

    let number = arena.add_number_literal("1");
    let literal = arena.add_string_literal("node");
    let literal_second = call_with_args(&mut arena, "getStorage", vec![number, literal]);
    assert!(!pattern.accepts(&arena, literal_second));

    let lit = arena.add_string_literal("node");
    let function = arena.add_function_reference("getStorage", vec![lit]);
    assert!(!pattern.accepts(&arena, function));
}

#[test]
fn test_named_is_case_insensitive() {
    let mut arena = NodeArena::new();
    let arg = arena.add_string_literal("node");
    let call = call_with_args(&mut arena, "GetStorage", vec![arg]);

    assert!(patterns::named("getStorage").accepts(&arena, call));
    assert!(!patterns::named("getViewBuilder").accepts(&arena, call));
}

#[test]
fn test_combinators() {
    let mut arena = NodeArena::new();
    let arg = arena.add_string_literal("node");
    let call = call_with_args(&mut arena, "getStorage", vec![arg]);

    let either = patterns::string_literal().or(patterns::method_reference());
    assert!(either.accepts(&arena, arg));
    assert!(either.accepts(&arena, call));

    let not_literal = patterns::string_literal().not();
    assert!(!not_literal.accepts(&arena, arg));
    assert!(not_literal.accepts(&arena, call));

    let in_list = patterns::string_literal().with_parent(patterns::kind(NodeKind::ParameterList));
    assert!(in_list.accepts(&arena, arg));

    let orphan = arena.add_string_literal("loose");
    assert!(!in_list.accepts(&arena, orphan));
}

#[test]
fn test_closures_are_patterns() {
    let mut arena = NodeArena::new();
    let arg = arena.add_string_literal("");
    let empty_literal = |arena: &NodeArena, node: NodeIndex| {
        arena.get_string_literal(node).is_some_and(|lit| lit.contents.is_empty())
    };
    assert!(patterns::string_literal().and(empty_literal).accepts(&arena, arg));
}

#[test]
fn test_theme_hash_element() {
    let mut arena = NodeArena::new();
    let key = arena.add_string_literal("#theme");
    let value = arena.add_string_literal("item_list");
    let element = arena.add_array_hash_element(key, value);

    let other_key = arena.add_string_literal("#markup");
    let other_value = arena.add_string_literal("text");
    let other = arena.add_array_hash_element(other_key, other_value);

    let pattern = patterns::theme_hash_element();
    assert!(pattern.accepts(&arena, element));
    assert!(!pattern.accepts(&arena, other));
    assert!(!pattern.accepts(&arena, key));
}
