//! User store trait defining the persistence contract for resident accounts.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for user persistence
///
/// Two uniqueness constraints hold at the storage layer: one over the
/// canonical phone number, and one over the `(building, flat)` pair.
/// `create` surfaces violations as `AuthError::AlreadyRegistered` and
/// `AuthError::FlatTaken` respectively.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by canonical phone number
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find the occupant of a building/flat pair, if any
    async fn find_by_unit(&self, building: &str, flat: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// Fails with `AuthError::AlreadyRegistered` when the phone is taken and
    /// `AuthError::FlatTaken` when the unit is occupied. Under concurrent
    /// registration the storage-level constraints decide the winner.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Check whether a phone number is already registered
    async fn exists_by_phone(&self, phone: &str) -> Result<bool, DomainError>;
}
