use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim key holding the account's display name.
pub const FULL_NAME_CLAIM: &str = "fullName";

/// Claim key holding the account's email address.
pub const EMAIL_CLAIM: &str = "email";

/// Session token claims.
///
/// Standard RFC 7519 registered claims plus custom fields flattened from the
/// `extra` map. Registered claims are optional so the same type can decode
/// tokens minted by other issuers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (account identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for an authenticated account.
    ///
    /// # Arguments
    /// * `account_id` - Unique account identifier (becomes `sub`)
    /// * `email` - Account email address
    /// * `full_name` - Display name embedded as the `fullName` claim
    /// * `expiration_hours` - Hours until the token expires
    ///
    /// # Returns
    /// Claims with sub, iat, exp, email and fullName set
    pub fn for_account(
        account_id: impl ToString,
        email: &str,
        full_name: &str,
        expiration_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(expiration_hours);

        Self::new()
            .with_subject(account_id)
            .with_issued_at(now.timestamp())
            .with_expiration(expiration.timestamp())
            .with_extra(EMAIL_CLAIM, email)
            .with_extra(FULL_NAME_CLAIM, full_name)
    }

    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Add a custom field. Values that fail to serialize are skipped.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(|v| v.as_str())
    }

    /// Display name carried in the `fullName` claim.
    pub fn full_name(&self) -> Option<&str> {
        self.extra_str(FULL_NAME_CLAIM)
    }

    pub fn email(&self) -> Option<&str> {
        self.extra_str(EMAIL_CLAIM)
    }
}
