use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Credential verifier and session token issuer.
///
/// Combines Argon2id password checks with HS256 token signing. Holds the
/// signing key for its whole lifetime, so build one at startup and share it.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a submitted password against the stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be checked
    pub fn verify_credentials(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Sign claims into a session token.
    ///
    /// Callers are expected to have verified the credentials already.
    pub fn issue_token<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }

    /// Validate and decode a session token.
    pub fn validate_token<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::Claims;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_verify_then_issue_token() {
        let authenticator = Authenticator::new(SECRET);

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        authenticator
            .verify_credentials(password, &hash)
            .expect("Credentials rejected");

        let claims = Claims::for_account("acc-1", "ada@example.com", "Ada Lovelace", 1);
        let token = authenticator
            .issue_token(&claims)
            .expect("Token signing failed");

        let decoded: Claims = authenticator
            .validate_token(&token)
            .expect("Token validation failed");
        assert_eq!(decoded.sub.as_deref(), Some("acc-1"));
        assert_eq!(decoded.full_name(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_verify_credentials_wrong_password() {
        let authenticator = Authenticator::new(SECRET);

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.verify_credentials("wrong_password", &hash);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_credentials_with_corrupt_hash() {
        let authenticator = Authenticator::new(SECRET);

        let result = authenticator.verify_credentials("my_password", "not-a-phc-string");
        assert!(matches!(
            result,
            Err(AuthenticationError::PasswordError(_))
        ));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(SECRET);

        let result = authenticator.validate_token::<Claims>("invalid.token.here");
        assert!(result.is_err());
    }
}
