//! Common types used across the PATS client library.

pub mod common;
pub mod serde_helpers;

pub use common::*;
