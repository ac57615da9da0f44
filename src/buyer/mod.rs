//! PATS buyer (agency) side API client.
//!
//! Buyers create campaigns, send insertion orders against them and read
//! publisher product catalogues.

pub mod rest;

pub use rest::BuyerRestClient;
