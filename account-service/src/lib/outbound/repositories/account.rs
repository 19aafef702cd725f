use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::ports::AccountRepository;

const EMAIL_UNIQUE_CONSTRAINT: &str = "accounts_email_key";

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    verified: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            verified: row.verified,
            created_at: row.created_at,
        })
    }
}

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, account: &Account) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT) {
            return AccountError::EmailAlreadyExists(account.email.as_str().to_string());
        }
    }
    AccountError::DatabaseError(e.to_string())
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, first_name, last_name, email, password_hash, verified, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(account.id.0)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.verified)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &account))?;

        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, first_name, last_name, email, password_hash, verified, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?
        .map(Account::try_from)
        .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, first_name, last_name, email, password_hash, verified, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?
        .map(Account::try_from)
        .transpose()
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET first_name = $2, last_name = $3, email = $4, password_hash = $5, verified = $6
            WHERE id = $1
            "#,
        )
        .bind(account.id.0)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.verified)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &account))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::AccountNotFound(account.id.to_string()));
        }

        Ok(account)
    }
}
