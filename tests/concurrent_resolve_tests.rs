//! Resolution from many threads, with entity metadata changing underneath.

use drex::index::signature::method_signature;
use drex::index::{ClassDecl, EntityMetadata, MemoryProject};
use drex::{Project, Session};
use rayon::prelude::*;

const ETM: &str = "\\Drupal\\Core\\Entity\\EntityTypeManagerInterface";
const ENTITY_TYPES: usize = 32;

fn storage_fqn(i: usize) -> String {
    format!("\\Drupal\\entity_{i}\\Storage{i}")
}

fn interface_fqn(i: usize) -> String {
    format!("\\Drupal\\entity_{i}\\Storage{i}Interface")
}

fn session() -> Session {
    let mut memory = MemoryProject::new();
    memory
        .symbols
        .add_type(ClassDecl::interface(ETM).with_method(drex::index::MethodDecl::new("getStorage")));
    for i in 0..ENTITY_TYPES {
        memory
            .entities
            .insert(format!("entity_{i}"), EntityMetadata::new(storage_fqn(i)));
        memory
            .symbols
            .add_type(ClassDecl::class(storage_fqn(i)).implementing([interface_fqn(i)]));
    }
    Session::new(Project::new("concurrent"), memory)
}

fn encode(session: &Session, identifier: &str) -> String {
    session
        .encode_call("getStorage", identifier, [method_signature(ETM, "getStorage")])
        .expect("factory call should be encoded")
}

#[test]
fn test_same_token_resolves_identically_across_threads() {
    let session = session();
    let token = encode(&session, "entity_7");
    let expected = session.resolve(&token).expect("entity_7 resolves");

    let results: Vec<_> = (0..256)
        .into_par_iter()
        .map(|_| session.resolve(&token))
        .collect();

    assert!(results.iter().all(|result| result.as_ref() == Some(&expected)));
}

#[test]
fn test_distinct_tokens_resolve_independently() {
    let session = session();
    let tokens: Vec<String> = (0..ENTITY_TYPES)
        .map(|i| encode(&session, &format!("entity_{i}")))
        .collect();

    let resolved: Vec<_> = tokens
        .par_iter()
        .map(|token| session.resolve(token))
        .collect();

    for (i, result) in resolved.into_iter().enumerate() {
        let result = result.unwrap_or_else(|| panic!("entity_{i} should resolve"));
        assert_eq!(result.sorted(), vec![interface_fqn(i).as_str()]);
    }
}

#[test]
fn test_resolution_tolerates_concurrent_index_updates() {
    let session = session();
    let token = encode(&session, "entity_3");
    let expected = session.resolve(&token).expect("entity_3 resolves");

    rayon::scope(|scope| {
        scope.spawn(|_| {
            for round in 0..200 {
                let entities = &session.indexes().entities;
                if round % 2 == 0 {
                    entities.remove("entity_3");
                } else {
                    entities.insert("entity_3", EntityMetadata::new(storage_fqn(3)));
                }
            }
            session
                .indexes()
                .entities
                .insert("entity_3", EntityMetadata::new(storage_fqn(3)));
        });

        let observed: Vec<_> = (0..200)
            .into_par_iter()
            .map(|_| session.resolve(&token))
            .collect();
        // Each call sees either the entry or its absence, never a partial result.
        assert!(
            observed
                .iter()
                .all(|result| result.is_none() || result.as_ref() == Some(&expected))
        );
    });

    assert_eq!(session.resolve(&token), Some(expected));
}
