//! End-to-end tests: snapshot on disk -> session -> encode -> resolve.

use drex::Session;
use drex::common::normalize_fqn;
use drex::index::signature::method_signature;
use drex::syntax::{NodeArena, NodeIndex};
use drex::types::{
    ENTITY_STORAGE_TAG, RegistryError, ResolvedType, TOKEN_PREFIX, TypeContext, TypeProvider,
    token_tag,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ETM: &str = "\\Drupal\\Core\\Entity\\EntityTypeManagerInterface";

const SNAPSHOT: &str = r#"{
  "entityTypes": {
    "node": { "storageHandlerFqn": "Drupal\\node\\NodeStorage" },
    "user": { "storageHandlerFqn": "\\Drupal\\user\\UserStorage" }
  },
  "types": [
    {
      "fqn": "\\Drupal\\Core\\Entity\\EntityTypeManagerInterface",
      "kind": "interface",
      "methods": [{ "name": "getStorage" }]
    },
    {
      "fqn": "\\Drupal\\Core\\Entity\\EntityTypeManager",
      "implements": ["\\Drupal\\Core\\Entity\\EntityTypeManagerInterface"],
      "methods": [{ "name": "getStorage" }]
    },
    {
      "fqn": "\\Acme\\Repository",
      "methods": [{ "name": "getStorage" }]
    },
    {
      "fqn": "\\Drupal\\node\\NodeStorage",
      "implements": [
        "\\Drupal\\Core\\Entity\\Sql\\SqlContentEntityStorage",
        "\\Drupal\\node\\NodeStorageInterface"
      ]
    },
    {
      "fqn": "\\Drupal\\user\\UserStorage",
      "implements": ["\\Drupal\\user\\UserStorageInterface"]
    }
  ],
  "themes": ["table", "item_list", "links"]
}"#;

struct Fixture {
    _dir: TempDir,
    snapshot: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let snapshot = dir.path().join("snapshot.json");
        fs::write(&snapshot, SNAPSHOT).expect("write snapshot");
        Self {
            _dir: dir,
            snapshot,
        }
    }

    fn config(&self, contents: &str) -> PathBuf {
        let path = self.dir().join("drex.json");
        fs::write(&path, contents).expect("write config");
        path
    }

    fn dir(&self) -> &Path {
        self.snapshot.parent().expect("snapshot has a parent")
    }

    fn session(&self) -> Session {
        Session::open(&self.snapshot, None).expect("session should open")
    }
}

fn interface_sig() -> String {
    method_signature(ETM, "getStorage")
}

#[test]
fn test_encode_then_resolve_storage_interfaces() {
    let fixture = Fixture::new();
    let session = fixture.session();

    let token = session
        .encode_call("getStorage", "node", [interface_sig()])
        .expect("factory call should be encoded");
    assert!(token.starts_with(TOKEN_PREFIX));
    assert_eq!(token_tag(&token), Some(ENTITY_STORAGE_TAG));
    assert!(token.ends_with("node"));

    let resolved = session.resolve(&token).expect("node storage resolves");
    assert_eq!(
        resolved.sorted(),
        vec![
            "\\Drupal\\Core\\Entity\\Sql\\SqlContentEntityStorage",
            "\\Drupal\\node\\NodeStorageInterface",
        ]
    );
    assert!(!resolved.contains("\\Drupal\\node\\NodeStorage"));
}

#[test]
fn test_unknown_entity_type_resolves_to_nothing() {
    let session = Fixture::new().session();
    let token = session
        .encode_call("getStorage", "taxonomy_term", [interface_sig()])
        .expect("encoding does not consult entity metadata");
    assert!(session.resolve(&token).is_none());
}

#[test]
fn test_only_the_factory_branch_contributes() {
    let session = Fixture::new().session();
    let token = session
        .encode_call(
            "getStorage",
            "user",
            [
                method_signature("\\Acme\\Repository", "getStorage"),
                method_signature("\\Drupal\\Core\\Entity\\EntityTypeManager", "getStorage"),
            ],
        )
        .unwrap();

    let resolved = session.resolve(&token).unwrap();
    assert_eq!(resolved.sorted(), vec!["\\Drupal\\user\\UserStorageInterface"]);

    let unrelated = session
        .encode_call(
            "getStorage",
            "user",
            [method_signature("\\Acme\\Repository", "getStorage")],
        )
        .unwrap();
    assert!(session.resolve(&unrelated).is_none());
}

#[test]
fn test_other_methods_are_not_encoded() {
    let session = Fixture::new().session();
    assert!(
        session
            .encode_call("getDefinition", "node", [interface_sig()])
            .is_none()
    );
    assert!(session.encode_call("getStorage", "", [interface_sig()]).is_none());
}

#[test]
fn test_disabled_config_suppresses_encoding() {
    let fixture = Fixture::new();
    let config = fixture.config(r#"{ settings: { enabled: "off" } }"#);
    let session = Session::open(&fixture.snapshot, Some(&config)).unwrap();

    assert!(!session.project().is_enabled());
    assert!(
        session
            .encode_call("getStorage", "node", [interface_sig()])
            .is_none()
    );
    assert!(session.theme_completions().is_empty());
}

#[test]
fn test_configured_factory_method() {
    let fixture = Fixture::new();
    let config = fixture.config(r#"{ name: "site", settings: { factoryMethod: "getHandler" } }"#);
    let session = Session::open(&fixture.snapshot, Some(&config)).unwrap();

    assert_eq!(session.project().name, "site");
    assert!(
        session
            .encode_call("getStorage", "node", [interface_sig()])
            .is_none()
    );
    assert!(
        session
            .encode_call("getHandler", "node", [interface_sig()])
            .is_some()
    );
}

#[test]
fn test_theme_completions_are_sorted() {
    let session = Fixture::new().session();
    let labels: Vec<String> = session
        .theme_completions()
        .into_iter()
        .map(|item| item.label)
        .collect();
    assert_eq!(labels, vec!["item_list", "links", "table"]);
}

#[test]
fn test_missing_snapshot_is_an_error() {
    let fixture = Fixture::new();
    let missing = fixture.dir().join("missing.json");
    let err = Session::open(&missing, None).err().expect("open should fail");
    assert!(format!("{err:#}").contains("failed to read snapshot"));
}

/// Types `$manager->getHandlerClass('<id>')` as the storage handler class itself.
struct HandlerClassProvider;

const HANDLER_CLASS_TAG: char = 'H';

impl TypeProvider for HandlerClassProvider {
    fn key(&self) -> char {
        HANDLER_CLASS_TAG
    }

    fn get_type(
        &self,
        _ctx: &TypeContext<'_>,
        arena: &NodeArena,
        node: NodeIndex,
    ) -> Option<String> {
        if arena.get_method_reference(node)?.name != "getHandlerClass" {
            return None;
        }
        let first = *arena.arguments(node).first()?;
        let identifier = &arena.get_string_literal(first)?.contents;
        Some(format!("#{HANDLER_CLASS_TAG}{identifier}"))
    }

    fn complete(&self, ctx: &TypeContext<'_>, token: &str) -> Option<ResolvedType> {
        let identifier = token.strip_prefix(TOKEN_PREFIX)?.strip_prefix(HANDLER_CLASS_TAG)?;
        let metadata = ctx.indexes.entities.lookup(identifier, ctx.project)?;
        Some(std::iter::once(normalize_fqn(&metadata.storage_handler_fqn).as_ref()).collect())
    }
}

#[test]
fn test_registered_provider_shares_the_session() {
    let mut session = Fixture::new().session();
    session
        .registry_mut()
        .register(Box::new(HandlerClassProvider))
        .expect("tag is free");
    assert_eq!(session.registry().len(), 2);

    let err = session
        .registry_mut()
        .register(Box::new(HandlerClassProvider))
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateTag(HANDLER_CLASS_TAG)));

    let handler = session
        .encode_call("getHandlerClass", "node", [interface_sig()])
        .expect("registered provider types the call");
    assert_eq!(token_tag(&handler), Some(HANDLER_CLASS_TAG));
    assert_eq!(
        session.resolve(&handler).unwrap().sorted(),
        vec!["\\Drupal\\node\\NodeStorage"]
    );

    // The built-in provider still owns its own calls and tokens.
    let storage = session
        .encode_call("getStorage", "node", [interface_sig()])
        .unwrap();
    assert_eq!(token_tag(&storage), Some(ENTITY_STORAGE_TAG));
    assert!(session.resolve(&storage).unwrap().contains("\\Drupal\\node\\NodeStorageInterface"));
}
