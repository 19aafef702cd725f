use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::models::AccountId;
use crate::account::models::ActivationCode;
use crate::account::models::ActivationToken;
use crate::account::models::ActivationTokenId;
use crate::account::ports::ActivationTokenRepository;

const PENDING_CODE_UNIQUE_INDEX: &str = "activation_tokens_pending_code_key";

#[derive(sqlx::FromRow)]
struct ActivationTokenRow {
    id: Uuid,
    account_id: Uuid,
    code: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    validated_at: Option<DateTime<Utc>>,
}

impl From<ActivationTokenRow> for ActivationToken {
    fn from(row: ActivationTokenRow) -> Self {
        ActivationToken {
            id: ActivationTokenId(row.id),
            code: ActivationCode::from(row.code),
            account_id: AccountId(row.account_id),
            created_at: row.created_at,
            expires_at: row.expires_at,
            validated_at: row.validated_at,
        }
    }
}

pub struct PostgresActivationTokenRepository {
    pool: PgPool,
}

impl PostgresActivationTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivationTokenRepository for PostgresActivationTokenRepository {
    async fn create(&self, token: ActivationToken) -> Result<ActivationToken, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO activation_tokens (id, account_id, code, created_at, expires_at, validated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(token.id.0)
        .bind(token.account_id.0)
        .bind(token.code.as_str())
        .bind(token.created_at)
        .bind(token.expires_at)
        .bind(token.validated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err)
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(PENDING_CODE_UNIQUE_INDEX) =>
            {
                AccountError::ActivationCodeTaken
            }
            _ => AccountError::DatabaseError(e.to_string()),
        })?;

        Ok(token)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ActivationToken>, AccountError> {
        // At most one unconsumed token holds a code, and it is always the
        // newest with that code. Older matches are consumed ones.
        let row = sqlx::query_as::<_, ActivationTokenRow>(
            r#"
            SELECT id, account_id, code, created_at, expires_at, validated_at
            FROM activation_tokens
            WHERE code = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(row.map(ActivationToken::from))
    }

    async fn update(&self, token: ActivationToken) -> Result<ActivationToken, AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE activation_tokens
            SET expires_at = $2, validated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(token.id.0)
        .bind(token.expires_at)
        .bind(token.validated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::TokenNotFound(token.code.to_string()));
        }

        Ok(token)
    }
}
