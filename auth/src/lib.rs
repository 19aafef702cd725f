//! Authentication primitives shared by services:
//! - Password hashing (Argon2id)
//! - Session token signing and validation (HS256 JWT)
//! - An `Authenticator` coordinating both
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Login Flow
//! ```
//! use auth::{Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//! let hash = auth.hash_password("password123").unwrap();
//!
//! auth.verify_credentials("password123", &hash).unwrap();
//! let claims = Claims::for_account("acc-1", "ada@example.com", "Ada Lovelace", 24);
//! let token = auth.issue_token(&claims).unwrap();
//!
//! let decoded: Claims = auth.validate_token(&token).unwrap();
//! assert_eq!(decoded.full_name(), Some("Ada Lovelace"));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
