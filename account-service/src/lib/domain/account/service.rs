use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::errors::PasswordError;
use crate::account::models::Account;
use crate::account::models::ActivationEmail;
use crate::account::models::ActivationToken;
use crate::account::models::AuthenticateCommand;
use crate::account::models::AuthenticatedSession;
use crate::account::models::RegisterAccountCommand;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::account::ports::ActivationTokenRepository;
use crate::account::ports::NotificationSender;

/// Codes drawn before giving up when every one is already pending.
const MAX_CODE_ATTEMPTS: u32 = 5;

/// Values the service needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct AccountServiceSettings {
    /// Frontend page where the owner types in the activation code
    pub activation_url: String,
    pub activation_email_subject: String,
    pub session_expiration_hours: i64,
}

/// Domain service implementation for account operations.
///
/// Orchestrates account and token storage, notification delivery and the
/// authenticator. All collaborators are injected and shared for the process
/// lifetime.
pub struct AccountService<AR, TR, NS>
where
    AR: AccountRepository,
    TR: ActivationTokenRepository,
    NS: NotificationSender,
{
    accounts: Arc<AR>,
    tokens: Arc<TR>,
    notifier: Arc<NS>,
    authenticator: Arc<Authenticator>,
    settings: AccountServiceSettings,
}

impl<AR, TR, NS> AccountService<AR, TR, NS>
where
    AR: AccountRepository,
    TR: ActivationTokenRepository,
    NS: NotificationSender,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `accounts` - Account persistence implementation
    /// * `tokens` - Activation token persistence implementation
    /// * `notifier` - Activation email delivery implementation
    /// * `authenticator` - Password hashing and session token signing
    /// * `settings` - Activation URL, email subject and session lifetime
    pub fn new(
        accounts: Arc<AR>,
        tokens: Arc<TR>,
        notifier: Arc<NS>,
        authenticator: Arc<Authenticator>,
        settings: AccountServiceSettings,
    ) -> Self {
        Self {
            accounts,
            tokens,
            notifier,
            authenticator,
            settings,
        }
    }

    /// Store a freshly issued token, drawing a new code while the store
    /// reports the previous one as held by another unconsumed token.
    async fn store_new_token(&self, account: &Account) -> Result<ActivationToken, AccountError> {
        let mut attempt = 1;
        loop {
            match self
                .tokens
                .create(ActivationToken::issue(account.id, Utc::now()))
                .await
            {
                Err(AccountError::ActivationCodeTaken) if attempt < MAX_CODE_ATTEMPTS => {
                    tracing::debug!(
                        account_id = %account.id,
                        attempt,
                        "Activation code already pending, drawing another"
                    );
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// Issue and store a new activation token for `account`, then mail it.
    async fn send_activation(&self, account: &Account) -> Result<ActivationToken, AccountError> {
        let token = self.store_new_token(account).await?;

        let email = ActivationEmail::new(
            account,
            &token,
            &self.settings.activation_url,
            &self.settings.activation_email_subject,
        );

        self.notifier
            .send_activation_email(&email)
            .await
            .map_err(|e| {
                tracing::error!(
                    account_id = %account.id,
                    token_id = %token.id,
                    error = %e,
                    "Failed to send activation email"
                );
                AccountError::from(e)
            })?;

        tracing::info!(
            account_id = %account.id,
            token_id = %token.id,
            expires_at = %token.expires_at,
            "Activation email sent"
        );

        Ok(token)
    }
}

#[async_trait]
impl<AR, TR, NS> AccountServicePort for AccountService<AR, TR, NS>
where
    AR: AccountRepository,
    TR: ActivationTokenRepository,
    NS: NotificationSender,
{
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError> {
        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        let account = Account::new(
            command.first_name,
            command.last_name,
            command.email,
            password_hash,
        );

        let created_account = self.accounts.create(account).await?;
        tracing::info!(account_id = %created_account.id, "Account registered");

        self.send_activation(&created_account).await?;

        Ok(created_account)
    }

    async fn authenticate(
        &self,
        command: AuthenticateCommand,
    ) -> Result<AuthenticatedSession, AccountError> {
        let account = self
            .accounts
            .find_by_email(command.email.as_str())
            .await?
            .ok_or_else(|| {
                tracing::warn!("Authentication rejected: unknown email");
                AccountError::InvalidCredentials
            })?;

        self.authenticator
            .verify_credentials(&command.password, &account.password_hash)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(account_id = %account.id, "Authentication rejected: wrong password");
                    AccountError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => {
                    PasswordError::VerificationFailed(err.to_string()).into()
                }
                AuthenticationError::JwtError(err) => AccountError::TokenSigning(err.to_string()),
            })?;

        if !account.verified {
            tracing::warn!(account_id = %account.id, "Authentication rejected: account not verified");
            return Err(AccountError::AccountNotVerified(account.email.to_string()));
        }

        let claims = auth::Claims::for_account(
            account.id,
            account.email.as_str(),
            &account.full_name(),
            self.settings.session_expiration_hours,
        );

        let access_token = self
            .authenticator
            .issue_token(&claims)
            .map_err(|e| AccountError::TokenSigning(e.to_string()))?;

        tracing::info!(account_id = %account.id, "Account authenticated");

        Ok(AuthenticatedSession {
            account,
            access_token,
        })
    }

    async fn activate_account(&self, code: &str) -> Result<(), AccountError> {
        let mut token = self
            .tokens
            .find_by_code(code)
            .await?
            .ok_or_else(|| AccountError::TokenNotFound(code.to_string()))?;

        if token.is_validated() {
            return Err(AccountError::TokenAlreadyUsed);
        }

        let mut account = self
            .accounts
            .find_by_id(&token.account_id)
            .await?
            .ok_or_else(|| AccountError::AccountNotFound(token.account_id.to_string()))?;

        // Unconsumed at this point, so an invalid token is an expired one.
        let now = Utc::now();
        if !token.is_valid(now) {
            tracing::warn!(
                account_id = %account.id,
                token_id = %token.id,
                expired_at = %token.expires_at,
                "Activation token expired, issuing a new one"
            );
            self.send_activation(&account).await?;
            return Err(AccountError::TokenExpired);
        }

        if account.verified {
            tracing::debug!(account_id = %account.id, "Account already verified");
        } else {
            account.verified = true;
            account = self.accounts.update(account).await?;
        }

        token.mark_validated(now);
        self.tokens.update(token).await?;

        tracing::info!(account_id = %account.id, "Account activated");

        Ok(())
    }
}
