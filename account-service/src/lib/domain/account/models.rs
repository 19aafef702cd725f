use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::Rng;
use uuid::Uuid;

use crate::account::errors::EmailError;

/// Account aggregate entity.
///
/// Represents a registered person; `verified` flips to `true` once the email
/// address has been proven through an activation code.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub password_hash: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new, unverified account.
    pub fn new(
        first_name: String,
        last_name: String,
        email: EmailAddress,
        password_hash: String,
    ) -> Self {
        Self {
            id: AccountId::new(),
            first_name,
            last_name,
            email,
            password_hash,
            verified: false,
            created_at: Utc::now(),
        }
    }

    /// Display name used in emails and session claims.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Numeric one-time code mailed to the account owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationCode(String);

impl ActivationCode {
    pub const LENGTH: usize = 6;

    /// Draw a fresh code, each digit uniform over `0-9`, from the OS CSPRNG.
    pub fn generate() -> Self {
        let code = (0..Self::LENGTH)
            .map(|_| char::from(b'0' + OsRng.gen_range(0..10u8)))
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ActivationCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl fmt::Display for ActivationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Activation token unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivationTokenId(pub Uuid);

impl ActivationTokenId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActivationTokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActivationTokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One-time activation code bound to a single account.
///
/// Valid while `validated_at` is unset and the current time is not past
/// `expires_at`.
#[derive(Debug, Clone)]
pub struct ActivationToken {
    pub id: ActivationTokenId,
    pub code: ActivationCode,
    pub account_id: AccountId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub validated_at: Option<DateTime<Utc>>,
}

impl ActivationToken {
    /// Minutes a freshly issued token stays valid.
    pub const VALIDITY_MINUTES: i64 = 15;

    /// Issue a new token for `account_id` with a freshly generated code.
    pub fn issue(account_id: AccountId, now: DateTime<Utc>) -> Self {
        Self {
            id: ActivationTokenId::new(),
            code: ActivationCode::generate(),
            account_id,
            created_at: now,
            expires_at: now + Duration::minutes(Self::VALIDITY_MINUTES),
            validated_at: None,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_validated(&self) -> bool {
        self.validated_at.is_some()
    }

    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        !self.is_validated() && !self.is_expired(now)
    }

    /// Stamp the token as consumed.
    pub fn mark_validated(&mut self, now: DateTime<Utc>) {
        self.validated_at = Some(now);
    }
}

/// Activation email handed to a [`NotificationSender`].
///
/// [`NotificationSender`]: crate::account::ports::NotificationSender
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationEmail {
    pub recipient: EmailAddress,
    pub recipient_name: String,
    pub subject: String,
    pub activation_url: String,
    pub activation_code: ActivationCode,
}

impl ActivationEmail {
    pub fn new(
        account: &Account,
        token: &ActivationToken,
        activation_url: &str,
        subject: &str,
    ) -> Self {
        Self {
            recipient: account.email.clone(),
            recipient_name: account.full_name(),
            subject: subject.to_string(),
            activation_url: activation_url.to_string(),
            activation_code: token.code.clone(),
        }
    }
}

/// Command to register a new account.
///
/// Fields are expected to be validated by the caller; the password is hashed
/// by the service.
#[derive(Debug)]
pub struct RegisterAccountCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterAccountCommand {
    pub fn new(
        first_name: String,
        last_name: String,
        email: EmailAddress,
        password: String,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            password,
        }
    }
}

/// Command to authenticate with email and password.
#[derive(Debug)]
pub struct AuthenticateCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl AuthenticateCommand {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// Result of a successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub account: Account,
    /// Signed bearer token
    pub access_token: String,
}
