//! Bearer-token authentication

pub mod jwt;
pub mod models;

pub use jwt::{bearer_token, JwtService, TOKEN_ISSUER};
pub use models::JwtClaims;
