//! PATS seller (publisher) side API client.
//!
//! Sellers maintain their product catalogue and work with the orders, RFPs
//! and proposals buyers send them.

pub mod rest;

pub use rest::SellerRestClient;
