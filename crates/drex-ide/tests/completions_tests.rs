use super::*;
use drex_common::{Project, ProjectSettings};
use drex_index::{IndexKey, MemoryProject};
use drex_syntax::{NodeArena, NodeIndex};
use drex_types::TypeContext;

fn themed_project() -> MemoryProject {
    let mut memory = MemoryProject::new();
    for theme in ["table", "item_list", "links", "item_list"] {
        memory.keys.insert(IndexKey::THEME, theme);
    }
    memory
}

/// `['<key>' => '<value>']`, returning the value node.
fn render_array(arena: &mut NodeArena, key: &str, value: &str) -> NodeIndex {
    let key = arena.add_string_literal(key);
    let value = arena.add_string_literal(value);
    let element = arena.add_array_hash_element(key, value);
    arena.add_array_creation(vec![element]);
    value
}

#[test]
fn test_theme_key_offers_sorted_unique_hooks() {
    let memory = themed_project();
    let project = Project::new("test");
    let ctx = TypeContext::new(&project, memory.indexes());
    let mut arena = NodeArena::new();
    let value = render_array(&mut arena, "#theme", "");

    let items = ThemeCompletionProvider::new().completions(&ctx, &arena, value);
    let labels: Vec<&str> = items.iter().map(|item| item.label.as_str()).collect();
    assert_eq!(labels, vec!["item_list", "links", "table"]);
    assert!(items.iter().all(|item| item.kind == CompletionItemKind::Text));
    assert_eq!(items[0].detail.as_deref(), Some("theme hook"));
}

#[test]
fn test_other_keys_offer_nothing() {
    let memory = themed_project();
    let project = Project::new("test");
    let ctx = TypeContext::new(&project, memory.indexes());
    let mut arena = NodeArena::new();

    let markup = render_array(&mut arena, "#markup", "");
    assert!(ThemeCompletionProvider::new().completions(&ctx, &arena, markup).is_empty());

    let number_key = arena.add_number_literal("0");
    let value = arena.add_string_literal("");
    arena.add_array_hash_element(number_key, value);
    assert!(ThemeCompletionProvider::new().completions(&ctx, &arena, value).is_empty());
}

#[test]
fn test_outside_array_offers_nothing() {
    let memory = themed_project();
    let project = Project::new("test");
    let ctx = TypeContext::new(&project, memory.indexes());
    let mut arena = NodeArena::new();
    let literal = arena.add_string_literal("#theme");

    assert!(ThemeCompletionProvider::new().completions(&ctx, &arena, literal).is_empty());
}

#[test]
fn test_disabled_project_offers_nothing() {
    let memory = themed_project();
    let project = Project::new("test").with_settings(ProjectSettings::disabled());
    let ctx = TypeContext::new(&project, memory.indexes());
    let mut arena = NodeArena::new();
    let value = render_array(&mut arena, "#theme", "");

    assert!(ThemeCompletionProvider::new().completions(&ctx, &arena, value).is_empty());
}

#[test]
fn test_empty_index_offers_nothing() {
    let memory = MemoryProject::new();
    let project = Project::new("test");
    let ctx = TypeContext::new(&project, memory.indexes());
    let mut arena = NodeArena::new();
    let value = render_array(&mut arena, "#theme", "");

    assert!(ThemeCompletionProvider::new().completions(&ctx, &arena, value).is_empty());
}

#[test]
fn test_completion_item_serialization() {
    let item = CompletionItem::new("table", CompletionItemKind::Text);
    assert_eq!(
        serde_json::to_string(&item).unwrap(),
        r#"{"label":"table","kind":"text"}"#
    );
    let item = item.with_detail("theme hook");
    assert_eq!(
        serde_json::to_string(&item).unwrap(),
        r#"{"label":"table","kind":"text","detail":"theme hook"}"#
    );
}
