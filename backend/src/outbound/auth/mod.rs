//! Credential adapters: Argon2 password hashing and JWT issuance.

mod argon2_hasher;
mod jwt_token_service;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt_token_service::{Claims, JwtTokenService, secret_fingerprint};
