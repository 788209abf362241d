//! Identity store seeded from the `[[auth.users]]` configuration table.
//!
//! Passwords are stored as bcrypt hashes and checked on the blocking
//! thread pool. The table is fixed for the life of the process.

use actix_web::web;
use async_trait::async_trait;
use std::collections::HashMap;

use jwsauth_core::errors::DomainError;
use jwsauth_core::{IdentityRepository, SimpleIdentity};
use jwsauth_shared::UserAccountConfig;

#[derive(Debug, Clone)]
struct Account {
    password_hash: String,
    identity: SimpleIdentity,
}

/// Read-only identity store backed by configured accounts
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityRepository {
    accounts: HashMap<String, Account>,
}

impl StaticIdentityRepository {
    /// Builds the store from configured accounts.
    ///
    /// Later entries with a duplicate username replace earlier ones.
    pub fn from_config(users: &[UserAccountConfig]) -> Self {
        let accounts = users
            .iter()
            .map(|user| {
                let identity = SimpleIdentity::new(user.id, user.username.clone())
                    .with_authorizations(user.authorizations.clone())
                    .with_info(user.info.clone());
                let account = Account {
                    password_hash: user.password_hash.clone(),
                    identity,
                };
                (user.username.clone(), account)
            })
            .collect();

        Self { accounts }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl IdentityRepository for StaticIdentityRepository {
    type Identity = SimpleIdentity;

    async fn find_by_username(&self, username: &str) -> Result<Option<SimpleIdentity>, DomainError> {
        Ok(self
            .accounts
            .get(username)
            .map(|account| account.identity.clone()))
    }

    async fn validate_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<SimpleIdentity>, DomainError> {
        let Some(account) = self.accounts.get(username) else {
            tracing::debug!(username, "Login for unknown user");
            return Ok(None);
        };

        let password = password.to_owned();
        let hash = account.password_hash.clone();
        let matches = web::block(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| {
                tracing::error!(username, error = %e, "Password check did not run");
                DomainError::Internal {
                    message: "password verification failed".to_string(),
                }
            })?
            .map_err(|e| {
                tracing::error!(username, error = %e, "Stored password hash is unusable");
                DomainError::Internal {
                    message: "password verification failed".to_string(),
                }
            })?;

        Ok(matches.then(|| account.identity.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn account(id: i64, username: &str, password: &str) -> UserAccountConfig {
        UserAccountConfig {
            id,
            username: username.to_string(),
            password_hash: bcrypt::hash(password, 4).unwrap(),
            authorizations: vec!["reader".to_string()],
            info: Map::new(),
        }
    }

    #[actix_web::test]
    async fn test_validate_password() {
        let repository = StaticIdentityRepository::from_config(&[account(1, "alice", "secret")]);

        let identity = repository
            .validate_password("alice", "secret")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(identity.id, 1);
        assert!(identity.has_authorization("reader"));

        assert!(repository
            .validate_password("alice", "wrong")
            .await
            .unwrap()
            .is_none());
        assert!(repository
            .validate_password("bob", "secret")
            .await
            .unwrap()
            .is_none());
    }

    #[actix_web::test]
    async fn test_reload_by_username() {
        let repository = StaticIdentityRepository::from_config(&[account(1, "alice", "secret")]);

        let stale = SimpleIdentity::new(1, "alice");
        let current = repository.reload(&stale).await.unwrap().unwrap();
        assert_eq!(current.authorizations, vec!["reader".to_string()]);

        let gone = SimpleIdentity::new(2, "bob");
        assert!(repository.reload(&gone).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_reload_rejects_recreated_username() {
        let repository = StaticIdentityRepository::from_config(&[account(99, "alice", "secret")]);

        let stale = SimpleIdentity::new(1, "alice");
        assert!(repository.reload(&stale).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_concurrent_logins() {
        let repository = StaticIdentityRepository::from_config(&[account(1, "alice", "secret")]);

        let (first, second) = futures_util::future::join(
            repository.validate_password("alice", "secret"),
            repository.validate_password("alice", "wrong"),
        )
        .await;
        assert_eq!(first.unwrap().map(|identity| identity.id), Some(1));
        assert!(second.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_corrupt_hash_is_internal_error() {
        let mut config = account(1, "alice", "secret");
        config.password_hash = "not-a-hash".to_string();
        let repository = StaticIdentityRepository::from_config(&[config]);

        let result = repository.validate_password("alice", "secret").await;
        assert!(matches!(result, Err(DomainError::Internal { .. })));
    }
}
