//! Authentication module for the PATS API.
//!
//! PATS authenticates every request with a single access key sent in the
//! `X-MO-API-Key` header. There is no request signing; this module provides
//! credential management with secure secret storage.

mod credentials;

pub use credentials::{API_KEY_HEADER, ApiKey};
