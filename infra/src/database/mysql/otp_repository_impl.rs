//! MySQL implementation of the OtpRepository trait.
//!
//! The single-active-record invariant rides on a nullable `active` column:
//! `1` while the record is live, `NULL` once consumed. The unique key over
//! `(phone, purpose, active)` then permits any number of consumed rows but
//! at most one live row per lane, because MySQL unique indexes ignore NULLs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sn_core::domain::entities::otp::{OtpCode, OtpPurpose};
use sn_core::errors::{AuthError, DomainError};
use sn_core::repositories::OtpRepository;

/// MySQL implementation of OtpRepository
pub struct MySqlOtpRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlOtpRepository {
    /// Create a new MySQL OTP repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to an OtpCode entity
    fn row_to_otp(row: &sqlx::mysql::MySqlRow) -> Result<OtpCode, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Database {
                message: format!("Failed to get id: {}", e),
            })?;
        let purpose_str: String = row
            .try_get("purpose")
            .map_err(|e| DomainError::Database {
                message: format!("Failed to get purpose: {}", e),
            })?;
        let active: Option<i8> = row
            .try_get("active")
            .map_err(|e| DomainError::Database {
                message: format!("Failed to get active: {}", e),
            })?;

        Ok(OtpCode {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid UUID: {}", e),
            })?,
            phone: row.try_get("phone").map_err(|e| DomainError::Database {
                message: format!("Failed to get phone: {}", e),
            })?,
            code: row.try_get("code").map_err(|e| DomainError::Database {
                message: format!("Failed to get code: {}", e),
            })?,
            purpose: purpose_str.parse::<OtpPurpose>().map_err(|e| {
                DomainError::Database {
                    message: format!("Unknown purpose: {}", e),
                }
            })?,
            attempts: row.try_get("attempts").map_err(|e| DomainError::Database {
                message: format!("Failed to get attempts: {}", e),
            })?,
            is_used: active.is_none(),
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn find_active(
        &self,
        phone: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpCode>, DomainError> {
        let query = r#"
            SELECT id, phone, code, purpose, attempts, active, created_at, expires_at
            FROM otp_codes
            WHERE phone = ? AND purpose = ? AND active = 1 AND expires_at > ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(phone)
            .bind(purpose.as_str())
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_otp(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, otp: OtpCode) -> Result<OtpCode, DomainError> {
        // An expired row still holding active = 1 would trip the unique key,
        // so retire it first; the lane must free up the moment the TTL lapses,
        // not when the reaper next runs
        sqlx::query(
            "UPDATE otp_codes SET active = NULL \
             WHERE phone = ? AND purpose = ? AND active = 1 AND expires_at <= ?",
        )
        .bind(&otp.phone)
        .bind(otp.purpose.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Database {
            message: format!("Failed to retire expired OTP: {}", e),
        })?;

        let query = r#"
            INSERT INTO otp_codes (
                id, phone, code, purpose, attempts, active, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?, 1, ?, ?)
        "#;

        sqlx::query(query)
            .bind(otp.id.to_string())
            .bind(&otp.phone)
            .bind(&otp.code)
            .bind(otp.purpose.as_str())
            .bind(otp.attempts)
            .bind(otp.created_at)
            .bind(otp.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23000") => {
                    DomainError::Auth(AuthError::Conflict {
                        resource: "otp".to_string(),
                    })
                }
                _ => DomainError::Database {
                    message: format!("Failed to insert OTP: {}", e),
                },
            })?;

        Ok(otp)
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), DomainError> {
        let query = "UPDATE otp_codes SET active = NULL WHERE id = ?";

        sqlx::query(query)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to mark OTP used: {}", e),
            })?;

        Ok(())
    }

    async fn increment_attempts(&self, id: Uuid) -> Result<i32, DomainError> {
        // LAST_INSERT_ID(expr) makes the updated value readable on the same
        // connection, so two concurrent wrong guesses each see their own count
        let mut conn = self.pool.acquire().await.map_err(|e| DomainError::Database {
            message: format!("Failed to acquire connection: {}", e),
        })?;

        let result = sqlx::query(
            "UPDATE otp_codes SET attempts = LAST_INSERT_ID(attempts + 1) WHERE id = ?",
        )
        .bind(id.to_string())
        .execute(&mut *conn)
        .await
        .map_err(|e| DomainError::Database {
            message: format!("Failed to increment attempts: {}", e),
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "OtpCode".to_string(),
            });
        }

        let attempts: u64 = sqlx::query_scalar("SELECT LAST_INSERT_ID()")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to read attempt count: {}", e),
            })?;

        Ok(attempts as i32)
    }

    async fn delete_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM otp_codes WHERE expires_at < ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to delete expired OTPs: {}", e),
            })?;

        Ok(result.rows_affected())
    }
}
