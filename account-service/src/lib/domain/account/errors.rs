use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for password operations
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}

/// Error for activation email delivery
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Invalid mail address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build email: {0}")]
    BuildFailed(String),

    #[error("Failed to send email: {0}")]
    SendFailed(String),
}

/// Broad classification of an [`AccountError`], for callers that branch on
/// the kind of failure rather than on the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Expired,
    Unauthorized,
    Conflict,
    DeliveryFailure,
    Validation,
    Internal,
}

/// Top-level error for all account operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Activation email delivery failed: {0}")]
    Delivery(#[from] NotificationError),

    // Domain-level errors
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Invalid activation token")]
    TokenNotFound(String),

    #[error("Activation token has already been used")]
    TokenAlreadyUsed,

    /// Another unconsumed token already holds the generated code.
    #[error("Activation code is already pending for another token")]
    ActivationCodeTaken,

    /// A replacement token has already been issued and mailed when this is
    /// returned.
    #[error("Activation token has expired. A new token has been sent to the same email address")]
    TokenExpired,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is not verified: {0}")]
    AccountNotVerified(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Session token signing failed: {0}")]
    TokenSigning(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AccountError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::AccountNotFound(_)
            | AccountError::TokenNotFound(_)
            | AccountError::TokenAlreadyUsed => ErrorKind::NotFound,
            AccountError::TokenExpired => ErrorKind::Expired,
            AccountError::InvalidCredentials | AccountError::AccountNotVerified(_) => {
                ErrorKind::Unauthorized
            }
            AccountError::EmailAlreadyExists(_) | AccountError::ActivationCodeTaken => {
                ErrorKind::Conflict
            }
            AccountError::Delivery(_) => ErrorKind::DeliveryFailure,
            AccountError::InvalidEmail(_) => ErrorKind::Validation,
            AccountError::Password(_)
            | AccountError::TokenSigning(_)
            | AccountError::DatabaseError(_)
            | AccountError::Unknown(_) => ErrorKind::Internal,
        }
    }
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        AccountError::Unknown(err.to_string())
    }
}
