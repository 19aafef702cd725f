pub mod smtp;

pub use smtp::SmtpNotificationSender;
