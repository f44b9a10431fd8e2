//! Tubely API Library
//!
//! HTTP handlers, authentication and application setup for the upload service.

mod handlers;
mod telemetry;

// Public modules
pub mod auth;
pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
