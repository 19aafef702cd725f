pub mod account;
pub mod activation_token;

pub use account::PostgresAccountRepository;
pub use activation_token::PostgresActivationTokenRepository;
