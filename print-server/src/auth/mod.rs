//! Authentication Module
//!
//! Phone + password accounts with Argon2 hashing and stateless JWT
//! bearer tokens:
//! - [`JwtService`] - token generation and validation
//! - [`CurrentUser`] - authenticated request context, extracted per request

pub mod extractor;
pub mod jwt;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use password::{hash_password, verify_password};
