use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::Address;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Message;
use lettre::Tokio1Executor;

use crate::account::errors::NotificationError;
use crate::account::models::ActivationEmail;
use crate::account::models::ActivationToken;
use crate::account::ports::NotificationSender;
use crate::config::SmtpConfig;

/// Activation email delivery over SMTP.
#[derive(Clone)]
pub struct SmtpNotificationSender {
    from: Mailbox,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotificationSender {
    /// Build the sender and its pooled transport. No connection is opened
    /// until the first email is sent.
    ///
    /// # Errors
    /// * `InvalidAddress` - `smtp.from` is not a valid mailbox
    /// * `SendFailed` - TLS relay could not be configured for `smtp.host`
    pub fn new(config: &SmtpConfig) -> Result<Self, NotificationError> {
        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|e| NotificationError::InvalidAddress(format!("{}: {}", config.from, e)))?;

        let builder = if config.tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| NotificationError::SendFailed(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        let mut builder = builder.port(config.port);
        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        tracing::info!(
            host = %config.host,
            port = config.port,
            tls = config.tls,
            "SMTP transport configured"
        );

        Ok(Self {
            from,
            mailer: builder.build(),
        })
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_activation_email(
        &self,
        email: &ActivationEmail,
    ) -> Result<(), NotificationError> {
        let message = build_activation_message(&self.from, email)?;

        self.mailer
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        Ok(())
    }
}

fn build_activation_message(
    from: &Mailbox,
    email: &ActivationEmail,
) -> Result<Message, NotificationError> {
    let address = email
        .recipient
        .as_str()
        .parse::<Address>()
        .map_err(|e| NotificationError::InvalidAddress(format!("{}: {}", email.recipient, e)))?;
    let to = Mailbox::new(Some(email.recipient_name.clone()), address);

    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(activation_body(email))
        .map_err(|e| NotificationError::BuildFailed(e.to_string()))
}

fn activation_body(email: &ActivationEmail) -> String {
    format!(
        "Hello {name},\n\
         \n\
         Your account activation code is: {code}\n\
         \n\
         Enter it at {url} to activate your account.\n\
         The code expires in {minutes} minutes.\n",
        name = email.recipient_name,
        code = email.activation_code,
        url = email.activation_url,
        minutes = ActivationToken::VALIDITY_MINUTES,
    )
}
