//! Tests for key loading, alias resolution and caching

use jsonwebtoken::Algorithm;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use super::{fixture, fixture_path};
use crate::errors::TokenError;
use crate::services::token::{KeyProvider, KeySource};

#[test]
fn test_loads_keys_from_files() {
    let keys = KeyProvider::from_files(
        Algorithm::RS256,
        fixture_path("public.pem"),
        fixture_path("private.pem"),
    );

    assert_eq!(keys.load_count(), 0);
    keys.preload().unwrap();
    assert_eq!(keys.load_count(), 2);

    keys.public_key().unwrap();
    keys.private_key().unwrap();
    assert_eq!(keys.load_count(), 2);
}

#[test]
fn test_missing_key_file_is_key_load_error() {
    let keys = KeyProvider::from_files(
        Algorithm::RS256,
        fixture_path("absent.pem"),
        fixture_path("private.pem"),
    );

    match keys.public_key() {
        Err(error) => assert!(error.is_key_load()),
        Ok(_) => panic!("missing key file should not load"),
    }
    assert!(keys.private_key().is_ok());
}

#[test]
fn test_corrupt_key_is_key_load_error() {
    let keys = KeyProvider::from_pem_strings(
        Algorithm::RS256,
        &fixture("corrupt.pem"),
        &fixture("corrupt.pem"),
    );

    assert!(matches!(keys.public_key(), Err(TokenError::KeyLoad { .. })));
    assert!(matches!(keys.private_key(), Err(TokenError::KeyLoad { .. })));
}

#[test]
fn test_failed_load_is_not_cached() {
    let keys = KeyProvider::from_files(
        Algorithm::RS256,
        fixture_path("absent.pem"),
        fixture_path("absent.pem"),
    );

    assert!(keys.public_key().is_err());
    assert!(keys.public_key().is_err());
    assert_eq!(keys.load_count(), 2);
}

#[test]
fn test_concurrent_first_access_loads_once() {
    let keys = Arc::new(KeyProvider::from_files(
        Algorithm::RS256,
        fixture_path("public.pem"),
        fixture_path("private.pem"),
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let keys = Arc::clone(&keys);
            thread::spawn(move || keys.public_key().is_ok())
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert_eq!(keys.load_count(), 1);
}

#[test]
fn test_resolve_plain_path() {
    let source = KeySource::resolve("/etc/jwsauth/public.pem", &HashMap::new()).unwrap();
    assert_eq!(source, KeySource::File(PathBuf::from("/etc/jwsauth/public.pem")));
}

#[test]
fn test_resolve_alias() {
    let aliases = HashMap::from([("app".to_string(), "/srv/jwsauth".to_string())]);

    let source = KeySource::resolve("@app/keys/public.pem", &aliases).unwrap();
    assert_eq!(
        source,
        KeySource::File(PathBuf::from("/srv/jwsauth/keys/public.pem"))
    );

    let bare = KeySource::resolve("@app", &aliases).unwrap();
    assert_eq!(bare, KeySource::File(PathBuf::from("/srv/jwsauth")));
}

#[test]
fn test_resolve_unknown_alias_fails() {
    let result = KeySource::resolve("@runtime/keys/public.pem", &HashMap::new());
    assert!(matches!(result, Err(TokenError::KeyLoad { .. })));
}

#[test]
fn test_pem_source_is_hidden_from_debug() {
    let source = KeySource::Pem(fixture("private.pem"));
    assert_eq!(format!("{:?}", source), "Pem(..)");
}
