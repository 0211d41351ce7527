//! Credential adapters: Argon2id password hashing and HS256 bearer tokens.

mod argon2_hasher;
mod jwt_issuer;
mod token_config;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt_issuer::JwtTokenIssuer;
pub use token_config::{
    BuildMode, TokenConfigError, TokenKey, TokenSettings, token_settings_from_env,
};
