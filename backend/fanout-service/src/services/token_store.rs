use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::models::{DeviceToken, TransportKind};

/// Durable registry of recipient device tokens.
///
/// The token string itself is the primary key. Deletion is idempotent;
/// a store-level failure aborts the whole dispatch rather than becoming a
/// per-token failure.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Every registered token. Unpaginated: the pool is a few thousand
    /// tokens at most, and callers need the whole set anyway.
    async fn list_all(&self) -> Result<Vec<DeviceToken>>;

    /// Insert or refresh a registration, keyed by the token string.
    async fn upsert(&self, token: DeviceToken) -> Result<()>;

    /// Remove a registration. Deleting an unknown token is not an error.
    async fn delete(&self, token: &str) -> Result<()>;
}

/// Postgres-backed token store
pub struct PgTokenStore {
    db: PgPool,
}

impl PgTokenStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create the device_tokens table if this is a fresh database.
    pub async fn ensure_schema(&self) -> Result<()> {
        let query = r#"
            CREATE TABLE IF NOT EXISTS device_tokens (
                token TEXT PRIMARY KEY,
                transport TEXT NOT NULL,
                platform TEXT,
                registered_at TIMESTAMPTZ NOT NULL
            )
        "#;

        sqlx::query(query)
            .execute(&self.db)
            .await
            .map_err(|e| AppError::Store(format!("failed to ensure schema: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl TokenStore for PgTokenStore {
    async fn list_all(&self) -> Result<Vec<DeviceToken>> {
        let query = r#"
            SELECT token, transport, platform, registered_at
            FROM device_tokens
        "#;

        let rows = sqlx::query(query).fetch_all(&self.db).await.map_err(|e| {
            warn!("Failed to list device tokens: {}", e);
            AppError::Store(format!("failed to list device tokens: {}", e))
        })?;

        let tokens = rows
            .into_iter()
            .map(|row| {
                let transport: String = row.get("transport");
                let registered_at: DateTime<Utc> = row.get("registered_at");
                DeviceToken {
                    token: row.get("token"),
                    transport: TransportKind::parse(&transport),
                    platform: row.get("platform"),
                    registered_at,
                }
            })
            .collect();

        Ok(tokens)
    }

    async fn upsert(&self, token: DeviceToken) -> Result<()> {
        let query = r#"
            INSERT INTO device_tokens (token, transport, platform, registered_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (token) DO UPDATE
            SET transport = $2, platform = $3
        "#;

        sqlx::query(query)
            .bind(&token.token)
            .bind(token.transport.as_str())
            .bind(&token.platform)
            .bind(token.registered_at)
            .execute(&self.db)
            .await
            .map_err(|e| {
                warn!("Failed to register device token: {}", e);
                AppError::Store(format!("failed to register device token: {}", e))
            })?;

        info!("Registered {} device token", token.transport.as_str());
        Ok(())
    }

    async fn delete(&self, token: &str) -> Result<()> {
        let query = "DELETE FROM device_tokens WHERE token = $1";

        sqlx::query(query)
            .bind(token)
            .execute(&self.db)
            .await
            .map_err(|e| {
                warn!("Failed to delete device token: {}", e);
                AppError::Store(format!("failed to delete device token: {}", e))
            })?;

        debug!("Deleted device token");
        Ok(())
    }
}
