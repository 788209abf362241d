//! Identity store boundary used by login and refresh.
//!
//! Ordinary request authentication never reaches this trait: a verified
//! token already carries the identity. The store is consulted only to
//! check a username and password at login, and to pick up the current
//! claim set of an identity whose token is being refreshed.

use async_trait::async_trait;

use crate::domain::entities::Identity;
use crate::errors::DomainError;

/// Repository trait for looking up principals
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use jwsauth_core::domain::entities::SimpleIdentity;
/// use jwsauth_core::errors::DomainError;
/// use jwsauth_core::repositories::IdentityRepository;
///
/// struct DirectoryIdentityRepository;
///
/// #[async_trait]
/// impl IdentityRepository for DirectoryIdentityRepository {
///     type Identity = SimpleIdentity;
///
///     async fn find_by_username(
///         &self,
///         username: &str,
///     ) -> Result<Option<SimpleIdentity>, DomainError> {
///         Ok(None)
///     }
///
///     async fn validate_password(
///         &self,
///         username: &str,
///         password: &str,
///     ) -> Result<Option<SimpleIdentity>, DomainError> {
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Principal type produced by this store
    type Identity: Identity + 'static;

    /// Find an identity by login name
    ///
    /// # Returns
    /// * `Ok(Some(identity))` - Identity found
    /// * `Ok(None)` - No such user
    /// * `Err(DomainError)` - Store unavailable or other error
    async fn find_by_username(&self, username: &str)
        -> Result<Option<Self::Identity>, DomainError>;

    /// Check a password and return the identity it unlocks
    ///
    /// Unknown users and wrong passwords both yield `Ok(None)`, so callers
    /// cannot tell which one failed.
    async fn validate_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Self::Identity>, DomainError>;

    /// Fetch the current state of an identity read from a token.
    ///
    /// The default looks the identity up by username and keeps the record
    /// only if its `id` matches. `Ok(None)` means the principal no longer
    /// exists (or the username now belongs to someone else) and must not be
    /// refreshed.
    async fn reload(
        &self,
        identity: &Self::Identity,
    ) -> Result<Option<Self::Identity>, DomainError> {
        let current = self.find_by_username(identity.username()).await?;
        Ok(current.filter(|current| current.id() == identity.id()))
    }
}
