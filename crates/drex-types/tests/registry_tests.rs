use super::*;
use drex_common::Project;
use drex_index::{ClassDecl, Declaration, EntityMetadata, MemoryProject, MethodDecl};
use drex_syntax::{NodeArena, NodeIndex};

/// Types every string literal as `\Literal` via its own tag.
struct LiteralProvider {
    tag: char,
}

impl TypeProvider for LiteralProvider {
    fn key(&self) -> char {
        self.tag
    }

    fn get_type(
        &self,
        _ctx: &TypeContext<'_>,
        arena: &NodeArena,
        node: NodeIndex,
    ) -> Option<String> {
        arena.get_string_literal(node)?;
        Some(format!("#{}literal", self.tag))
    }

    fn complete(&self, _ctx: &TypeContext<'_>, token: &str) -> Option<ResolvedType> {
        token
            .ends_with("literal")
            .then(|| std::iter::once("\\Literal").collect())
    }
}

fn storage_project() -> MemoryProject {
    let mut memory = MemoryProject::new();
    memory.entities.insert("node", EntityMetadata::new("\\Drupal\\node\\NodeStorage"));
    memory.symbols.add_type(
        ClassDecl::interface("\\Drupal\\Core\\Entity\\EntityTypeManagerInterface")
            .with_method(MethodDecl::new("getStorage")),
    );
    memory.symbols.add_type(
        ClassDecl::class("\\Drupal\\node\\NodeStorage")
            .implementing(["\\Drupal\\node\\NodeStorageInterface"]),
    );
    memory
}

#[test]
fn test_duplicate_tags_are_rejected() {
    let mut registry = ProviderRegistry::with_builtin();
    assert_eq!(registry.len(), 1);

    let err = registry
        .register(Box::new(LiteralProvider {
            tag: ENTITY_STORAGE_TAG,
        }))
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateTag(tag) if tag == ENTITY_STORAGE_TAG));

    registry
        .register(Box::new(LiteralProvider { tag: 'L' }))
        .unwrap();
    assert!(matches!(
        registry.register(Box::new(LiteralProvider { tag: 'L' })),
        Err(RegistryError::DuplicateTag('L'))
    ));
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_reserved_tags_are_rejected() {
    let mut registry = ProviderRegistry::new();
    assert!(matches!(
        registry.register(Box::new(LiteralProvider { tag: SPLIT_SENTINEL })),
        Err(RegistryError::ReservedTag(_))
    ));
    assert!(matches!(
        registry.register(Box::new(LiteralProvider { tag: TOKEN_PREFIX })),
        Err(RegistryError::ReservedTag(_))
    ));
    assert!(registry.is_empty());
}

#[test]
fn test_complete_dispatches_by_tag() {
    let memory = storage_project();
    let project = Project::new("test");
    let ctx = TypeContext::new(&project, memory.indexes());

    let mut registry = ProviderRegistry::with_builtin();
    registry
        .register(Box::new(LiteralProvider { tag: 'L' }))
        .unwrap();

    let storage_token = DeferredTypeToken::new(
        ENTITY_STORAGE_TAG,
        &["#M#C\\Drupal\\Core\\Entity\\EntityTypeManagerInterface.getStorage"],
        "node",
    )
    .unwrap();
    let resolved = registry.complete(&ctx, storage_token.as_str()).unwrap();
    assert_eq!(resolved.sorted(), vec!["\\Drupal\\node\\NodeStorageInterface"]);

    let literal = registry.complete(&ctx, "#Lliteral").unwrap();
    assert!(literal.contains("\\Literal"));

    assert!(registry.complete(&ctx, "#Zliteral").is_none());
    assert!(registry.complete(&ctx, "Lliteral").is_none());
    assert!(registry.complete(&ctx, "").is_none());
}

#[test]
fn test_get_type_asks_providers_in_order() {
    let memory = storage_project();
    let project = Project::new("test");
    let ctx = TypeContext::new(&project, memory.indexes());

    let mut registry = ProviderRegistry::new();
    registry
        .register(Box::new(LiteralProvider { tag: 'A' }))
        .unwrap();
    registry
        .register(Box::new(LiteralProvider { tag: 'B' }))
        .unwrap();

    let mut arena = NodeArena::new();
    let literal = arena.add_string_literal("x");
    let variable = arena.add_variable("x");

    assert_eq!(registry.get_type(&ctx, &arena, literal).as_deref(), Some("#Aliteral"));
    assert_eq!(registry.get_type(&ctx, &arena, variable), None);
}

#[test]
fn test_builtin_provider_round_trip() {
    let memory = storage_project();
    let project = Project::new("test");
    let ctx = TypeContext::new(&project, memory.indexes());
    let registry = ProviderRegistry::with_builtin();

    let mut arena = NodeArena::new();
    let receiver = arena.add_variable("manager");
    let arg = arena.add_string_literal("node");
    let call = arena.add_method_reference(
        receiver,
        "getStorage",
        vec![arg],
        ["#M#C\\Drupal\\Core\\Entity\\EntityTypeManagerInterface.getStorage"],
    );

    let token = registry.get_type(&ctx, &arena, call).unwrap();
    let provider = registry.provider(ENTITY_STORAGE_TAG).unwrap();
    assert_eq!(provider.key(), ENTITY_STORAGE_TAG);

    let resolved = registry.complete(&ctx, &token).unwrap();
    assert!(resolved.contains("\\Drupal\\node\\NodeStorageInterface"));
    assert_eq!(resolved.to_string(), "\\Drupal\\node\\NodeStorageInterface");
    assert_eq!(
        serde_json::to_string(&resolved).unwrap(),
        r#"["\\Drupal\\node\\NodeStorageInterface"]"#
    );
}

#[test]
fn test_declarations_of_other_kinds_do_not_break_dispatch() {
    let mut memory = storage_project();
    memory.symbols.add_declaration(
        "#C\\Drupal\\node\\NodeStorage",
        Declaration::Class(ClassDecl::class("\\Drupal\\node\\NodeStorage")),
    );
    let project = Project::new("test");
    let ctx = TypeContext::new(&project, memory.indexes());
    let registry = ProviderRegistry::with_builtin();

    let token =
        DeferredTypeToken::new(ENTITY_STORAGE_TAG, &["#C\\Drupal\\node\\NodeStorage"], "node")
            .unwrap();
    assert!(registry.complete(&ctx, token.as_str()).is_none());
}
