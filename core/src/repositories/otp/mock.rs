//! Mock implementation of OtpRepository for testing

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::otp::{OtpCode, OtpPurpose};
use crate::errors::{AuthError, DomainError};

use super::trait_::OtpRepository;

/// In-memory OTP repository for testing
///
/// Enforces the same single-active-record invariant as the storage-backed
/// implementation, and exposes clock-manipulation helpers so tests can age
/// or expire records without sleeping.
pub struct MockOtpRepository {
    records: Arc<RwLock<HashMap<Uuid, OtpCode>>>,
}

impl MockOtpRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Fetch any record by id, used or not
    pub async fn get(&self, id: Uuid) -> Option<OtpCode> {
        self.records.read().await.get(&id).cloned()
    }

    /// Read the plaintext code of the active record, if any
    pub async fn active_code(&self, phone: &str, purpose: OtpPurpose) -> Option<String> {
        let records = self.records.read().await;
        records
            .values()
            .find(|r| r.phone == phone && r.purpose == purpose && r.is_active())
            .map(|r| r.code.clone())
    }

    /// Shift the active record's creation time into the past
    pub async fn age_active(&self, phone: &str, purpose: OtpPurpose, seconds: i64) {
        let mut records = self.records.write().await;
        if let Some(record) = records
            .values_mut()
            .find(|r| r.phone == phone && r.purpose == purpose && r.is_active())
        {
            record.created_at = record.created_at - Duration::seconds(seconds);
        }
    }

    /// Force the active record past its expiry
    pub async fn expire_active(&self, phone: &str, purpose: OtpPurpose) {
        let mut records = self.records.write().await;
        if let Some(record) = records
            .values_mut()
            .find(|r| r.phone == phone && r.purpose == purpose && r.is_active())
        {
            record.expires_at = Utc::now() - Duration::seconds(1);
        }
    }

    /// Total number of stored records, including used and expired ones
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

impl Default for MockOtpRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpRepository for MockOtpRepository {
    async fn find_active(
        &self,
        phone: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpCode>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| r.phone == phone && r.purpose == purpose && r.is_active())
            .cloned())
    }

    async fn insert(&self, otp: OtpCode) -> Result<OtpCode, DomainError> {
        let mut records = self.records.write().await;

        // An expired leftover must not block the lane until the reaper runs
        for record in records
            .values_mut()
            .filter(|r| r.phone == otp.phone && r.purpose == otp.purpose && !r.is_used)
        {
            if record.is_expired() {
                record.mark_used();
            }
        }

        // Storage-level uniqueness over (phone, purpose, active)
        if records
            .values()
            .any(|r| r.phone == otp.phone && r.purpose == otp.purpose && r.is_active())
        {
            return Err(DomainError::Auth(AuthError::Conflict {
                resource: "otp".to_string(),
            }));
        }

        records.insert(otp.id, otp.clone());
        Ok(otp)
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(&id) {
            record.mark_used();
        }
        Ok(())
    }

    async fn increment_attempts(&self, id: Uuid) -> Result<i32, DomainError> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or_else(|| DomainError::NotFound {
            resource: "OtpCode".to_string(),
        })?;
        record.attempts += 1;
        Ok(record.attempts)
    }

    async fn delete_expired(&self) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, r| !r.is_expired());
        Ok((before - records.len()) as u64)
    }
}
