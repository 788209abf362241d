//! Key material for JWS signing and verification
//!
//! Keys are read from their source on first use and cached for the lifetime
//! of the provider. Concurrent first callers block on the same initializer,
//! so each source is read and parsed at most once.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::TokenError;

/// Where a key is read from
#[derive(Clone, PartialEq, Eq)]
pub enum KeySource {
    /// PEM file on disk
    File(PathBuf),
    /// PEM text held in memory (tests, embedded keys)
    Pem(String),
}

impl std::fmt::Debug for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySource::File(path) => f.debug_tuple("File").field(path).finish(),
            KeySource::Pem(_) => f.write_str("Pem(..)"),
        }
    }
}

impl KeySource {
    /// Resolves a configured key location.
    ///
    /// A location of the form `@name/rest` is looked up in `aliases` and
    /// joined with `rest`; anything else is taken as a plain path.
    pub fn resolve(location: &str, aliases: &HashMap<String, String>) -> Result<Self, TokenError> {
        let Some(aliased) = location.strip_prefix('@') else {
            return Ok(KeySource::File(PathBuf::from(location)));
        };

        let (name, rest) = match aliased.split_once('/') {
            Some((name, rest)) => (name, rest),
            None => (aliased, ""),
        };

        let base = aliases
            .get(name)
            .ok_or_else(|| TokenError::key_load(format!("Unknown path alias: @{}", name)))?;

        let mut path = PathBuf::from(base);
        if !rest.is_empty() {
            path.push(rest);
        }
        Ok(KeySource::File(path))
    }

    fn read(&self, kind: &str) -> Result<Vec<u8>, TokenError> {
        match self {
            KeySource::File(path) => fs::read(path).map_err(|e| {
                TokenError::key_load(format!(
                    "Failed to read {} key {}: {}",
                    kind,
                    path.display(),
                    e
                ))
            }),
            KeySource::Pem(pem) => Ok(pem.as_bytes().to_vec()),
        }
    }

    fn describe(&self) -> String {
        match self {
            KeySource::File(path) => path.display().to_string(),
            KeySource::Pem(_) => String::from("memory"),
        }
    }
}

/// Lazily loaded, process-lifetime cache of the signing key pair
pub struct KeyProvider {
    algorithm: Algorithm,
    public_source: KeySource,
    private_source: KeySource,
    decoding_key: OnceCell<DecodingKey>,
    encoding_key: OnceCell<EncodingKey>,
    loads: AtomicUsize,
}

impl std::fmt::Debug for KeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyProvider")
            .field("algorithm", &self.algorithm)
            .field("public_source", &self.public_source)
            .field("private_source", &self.private_source)
            .field("public_loaded", &self.decoding_key.get().is_some())
            .field("private_loaded", &self.encoding_key.get().is_some())
            .finish()
    }
}

impl KeyProvider {
    /// Creates a provider for the given algorithm and key sources.
    /// Nothing is read until a key is first requested.
    pub fn new(algorithm: Algorithm, public_source: KeySource, private_source: KeySource) -> Self {
        Self {
            algorithm,
            public_source,
            private_source,
            decoding_key: OnceCell::new(),
            encoding_key: OnceCell::new(),
            loads: AtomicUsize::new(0),
        }
    }

    /// Creates a provider reading PEM files
    ///
    /// # Example
    ///
    /// ```no_run
    /// use jsonwebtoken::Algorithm;
    /// use jwsauth_core::services::token::KeyProvider;
    ///
    /// let keys = KeyProvider::from_files(
    ///     Algorithm::RS256,
    ///     "config/keys/public.pem",
    ///     "config/keys/private.pem",
    /// );
    /// let public_key = keys.public_key().expect("public key should load");
    /// ```
    pub fn from_files<P: AsRef<Path>>(algorithm: Algorithm, public_path: P, private_path: P) -> Self {
        Self::new(
            algorithm,
            KeySource::File(public_path.as_ref().to_path_buf()),
            KeySource::File(private_path.as_ref().to_path_buf()),
        )
    }

    /// Creates a provider from PEM strings (useful for testing or embedded keys)
    pub fn from_pem_strings(algorithm: Algorithm, public_pem: &str, private_pem: &str) -> Self {
        Self::new(
            algorithm,
            KeySource::Pem(public_pem.to_string()),
            KeySource::Pem(private_pem.to_string()),
        )
    }

    /// Algorithm the keys are parsed for
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the verification key, loading it on first call
    pub fn public_key(&self) -> Result<&DecodingKey, TokenError> {
        self.decoding_key.get_or_try_init(|| {
            let bytes = self.load(&self.public_source, "public")?;
            parse_decoding_key(self.algorithm, &bytes).map_err(|e| {
                tracing::error!(source = %self.public_source.describe(), error = %e, "Invalid public key");
                e
            })
        })
    }

    /// Returns the signing key, loading it on first call
    pub fn private_key(&self) -> Result<&EncodingKey, TokenError> {
        self.encoding_key.get_or_try_init(|| {
            let bytes = self.load(&self.private_source, "private")?;
            parse_encoding_key(self.algorithm, &bytes).map_err(|e| {
                tracing::error!(source = %self.private_source.describe(), error = %e, "Invalid private key");
                e
            })
        })
    }

    /// Loads both keys now instead of on first use
    pub fn preload(&self) -> Result<(), TokenError> {
        self.public_key()?;
        self.private_key()?;
        Ok(())
    }

    /// Number of times a key source has been read
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    fn load(&self, source: &KeySource, kind: &str) -> Result<Vec<u8>, TokenError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let bytes = source.read(kind).map_err(|e| {
            tracing::error!(source = %source.describe(), error = %e, "Key source unavailable");
            e
        })?;
        tracing::debug!(source = %source.describe(), kind, "Loaded key material");
        Ok(bytes)
    }
}

fn parse_decoding_key(algorithm: Algorithm, bytes: &[u8]) -> Result<DecodingKey, TokenError> {
    let key = match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
            return Ok(DecodingKey::from_secret(bytes));
        }
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => DecodingKey::from_rsa_pem(bytes),
        Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(bytes),
        Algorithm::EdDSA => DecodingKey::from_ed_pem(bytes),
    };
    key.map_err(|e| TokenError::key_load(format!("Invalid public key format: {}", e)))
}

fn parse_encoding_key(algorithm: Algorithm, bytes: &[u8]) -> Result<EncodingKey, TokenError> {
    let key = match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
            return Ok(EncodingKey::from_secret(bytes));
        }
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => EncodingKey::from_rsa_pem(bytes),
        Algorithm::ES256 | Algorithm::ES384 => EncodingKey::from_ec_pem(bytes),
        Algorithm::EdDSA => EncodingKey::from_ed_pem(bytes),
    };
    key.map_err(|e| TokenError::key_load(format!("Invalid private key format: {}", e)))
}
