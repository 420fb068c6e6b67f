//! MySQL implementation of the UserRepository trait.
//!
//! Two unique keys back the directory invariants: `uq_users_phone` over the
//! canonical phone number and `uq_users_unit` over `(building, flat)`.
//! Duplicate-key failures are translated back into the domain errors the
//! services expect, keyed off the index name in the driver message.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sn_core::domain::entities::user::{User, UserRole};
use sn_core::errors::{AuthError, DomainError};
use sn_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

const USER_COLUMNS: &str = r#"id, name, phone, building, flat, profile_picture,
                   role, is_verified, created_at, updated_at"#;

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Database {
            message: format!("Failed to get id: {}", e),
        })?;
        let role_str: String = row.try_get("role").map_err(|e| DomainError::Database {
            message: format!("Failed to get role: {}", e),
        })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid UUID: {}", e),
            })?,
            name: row.try_get("name").map_err(|e| DomainError::Database {
                message: format!("Failed to get name: {}", e),
            })?,
            phone: row.try_get("phone").map_err(|e| DomainError::Database {
                message: format!("Failed to get phone: {}", e),
            })?,
            building: row.try_get("building").map_err(|e| DomainError::Database {
                message: format!("Failed to get building: {}", e),
            })?,
            flat: row.try_get("flat").map_err(|e| DomainError::Database {
                message: format!("Failed to get flat: {}", e),
            })?,
            profile_picture: row
                .try_get("profile_picture")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get profile_picture: {}", e),
                })?,
            role: role_str.parse().unwrap_or(UserRole::User),
            is_verified: row
                .try_get("is_verified")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get is_verified: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }

    /// Translate a duplicate-key error into the matching domain error
    fn translate_unique_violation(e: sqlx::Error) -> DomainError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.code().as_deref() == Some("23000") {
                let message = db_err.message();
                if message.contains("uq_users_phone") {
                    return DomainError::Auth(AuthError::AlreadyRegistered);
                }
                if message.contains("uq_users_unit") {
                    return DomainError::Auth(AuthError::FlatTaken);
                }
                return DomainError::Auth(AuthError::Conflict {
                    resource: "user".to_string(),
                });
            }
        }
        DomainError::Database {
            message: format!("Failed to write user: {}", e),
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE phone = ? LIMIT 1",
            USER_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_unit(
        &self,
        building: &str,
        flat: &str,
    ) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE building = ? AND flat = ? LIMIT 1",
            USER_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(building)
            .bind(flat)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, name, phone, building, flat, profile_picture,
                role, is_verified, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.phone)
            .bind(&user.building)
            .bind(&user.flat)
            .bind(&user.profile_picture)
            .bind(user.role.as_str())
            .bind(user.is_verified)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(Self::translate_unique_violation)?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET name = ?, building = ?, flat = ?, profile_picture = ?,
                role = ?, is_verified = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.name)
            .bind(&user.building)
            .bind(&user.flat)
            .bind(&user.profile_picture)
            .bind(user.role.as_str())
            .bind(user.is_verified)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Self::translate_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        Ok(user)
    }

    async fn exists_by_phone(&self, phone: &str) -> Result<bool, DomainError> {
        let exists: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM users WHERE phone = ? LIMIT 1")
                .bind(phone)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::Database {
                    message: format!("Database query failed: {}", e),
                })?;

        Ok(exists.is_some())
    }
}
