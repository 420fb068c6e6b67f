//! OTP store trait defining the persistence contract for OTP records.
//!
//! All coordination between concurrent issuance and verification happens at
//! this boundary: the store, not the caller, enforces the single-active-OTP
//! invariant and performs the attempt increment atomically.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::otp::{OtpCode, OtpPurpose};
use crate::errors::DomainError;

/// Repository trait for OTP record persistence
///
/// Invariant: at most one non-used, non-expired record exists per
/// `(phone, purpose)` pair. Implementations must enforce this with a
/// storage-level uniqueness constraint, not caller-side locking.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Find the active record for a phone and purpose
    ///
    /// A record is active when `is_used` is false and `expires_at` is in the
    /// future. Expired records are treated as absent regardless of `is_used`.
    async fn find_active(
        &self,
        phone: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpCode>, DomainError>;

    /// Insert a new record
    ///
    /// An expired but never-consumed record does not block the lane:
    /// implementations retire such leftovers before inserting, so issuance
    /// works the moment the old code's TTL lapses without waiting for the
    /// reaper. Fails with `AuthError::Conflict` if a live, unexpired record
    /// already exists for the same `(phone, purpose)` - the storage-level
    /// uniqueness constraint is the final arbiter under concurrent issuance.
    async fn insert(&self, otp: OtpCode) -> Result<OtpCode, DomainError>;

    /// Mark a record as used; idempotent
    ///
    /// Once used, a record is permanently excluded from `find_active`.
    async fn mark_used(&self, id: Uuid) -> Result<(), DomainError>;

    /// Atomically increment the attempt counter and return the updated count
    ///
    /// Must be a read-modify-write at the storage layer so two concurrent
    /// wrong guesses cannot both observe the same prior count.
    async fn increment_attempts(&self, id: Uuid) -> Result<i32, DomainError>;

    /// Delete records whose expiry has passed, returning how many were removed
    ///
    /// Opportunistic housekeeping; correctness never depends on it because
    /// `find_active` already ignores expired rows.
    async fn delete_expired(&self) -> Result<u64, DomainError>;
}
