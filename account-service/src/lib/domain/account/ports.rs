use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::errors::NotificationError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::ActivationEmail;
use crate::account::models::ActivationToken;
use crate::account::models::AuthenticateCommand;
use crate::account::models::AuthenticatedSession;
use crate::account::models::RegisterAccountCommand;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new, unverified account and mail it an activation code.
    ///
    /// # Arguments
    /// * `command` - Names, email address and plaintext password
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Delivery` - Activation email could not be sent
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError>;

    /// Verify credentials and issue a signed session token.
    ///
    /// # Arguments
    /// * `command` - Email address and plaintext password
    ///
    /// # Returns
    /// Authenticated account with its access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `AccountNotVerified` - Credentials match but the email is not verified
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(
        &self,
        command: AuthenticateCommand,
    ) -> Result<AuthenticatedSession, AccountError>;

    /// Consume an activation code and mark its account verified.
    ///
    /// An expired code triggers a new code and email before the error is
    /// returned.
    ///
    /// # Arguments
    /// * `code` - Activation code as received by the account owner
    ///
    /// # Errors
    /// * `TokenNotFound` - No token carries this code
    /// * `TokenAlreadyUsed` - Token was already consumed
    /// * `TokenExpired` - Token is past its window; a replacement was sent
    /// * `AccountNotFound` - Token refers to a missing account
    /// * `Delivery` - Replacement email could not be sent
    async fn activate_account(&self, code: &str) -> Result<(), AccountError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist new account to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by email address.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Update existing account in storage.
    ///
    /// # Errors
    /// * `AccountNotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, account: Account) -> Result<Account, AccountError>;
}

/// Persistence operations for activation tokens.
#[async_trait]
pub trait ActivationTokenRepository: Send + Sync + 'static {
    /// Persist a newly issued token.
    async fn create(&self, token: ActivationToken) -> Result<ActivationToken, AccountError>;

    /// Retrieve the most recently issued token carrying `code`.
    ///
    /// # Returns
    /// Optional token (None if no token has this code)
    async fn find_by_code(&self, code: &str) -> Result<Option<ActivationToken>, AccountError>;

    /// Update an existing token, typically to stamp its validation time.
    ///
    /// # Errors
    /// * `TokenNotFound` - Token does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, token: ActivationToken) -> Result<ActivationToken, AccountError>;
}

/// Delivery of account notifications.
#[async_trait]
pub trait NotificationSender: Send + Sync + 'static {
    /// Send an activation email.
    ///
    /// # Errors
    /// * `InvalidAddress` - Sender or recipient address rejected
    /// * `BuildFailed` - Message could not be assembled
    /// * `SendFailed` - Transport failed to deliver the message
    async fn send_activation_email(&self, email: &ActivationEmail)
        -> Result<(), NotificationError>;
}
