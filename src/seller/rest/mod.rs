//! Seller-side REST API client.

mod client;
mod endpoints;
mod types;

pub use client::{SellerRestClient, SellerRestClientBuilder};
pub use endpoints::*;
pub use types::*;
