//! # PATS Client
//!
//! An async Rust client library for the PATS advertising transaction REST APIs.
//!
//! PATS exposes two API families on separate hosts: the buyer (agency) side,
//! used to create campaigns, send insertion orders and read publisher product
//! catalogues, and the seller (publisher) side, used to maintain the product
//! catalogue and work with incoming orders, RFPs and proposals.
//!
//! ## Features
//!
//! - Buyer-side campaign creation, order submission and catalogue reads
//! - Seller-side catalogue writes, order/RFP views and proposal submission
//! - Strong typing for all request payloads, with wire field names preserved
//!   exactly as the service expects them
//! - Local fail-fast validation before any network round-trip
//! - Financial precision with `rust_decimal` (money travels as decimal strings)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pats_api_client::auth::ApiKey;
//! use pats_api_client::buyer::rest::BuyerRestClient;
//! use pats_api_client::buyer::rest::ListProductsQuery;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BuyerRestClient::new(ApiKey::new("api_key"), "35-IDSDKAD-7");
//!     let products = client
//!         .list_products("NEWSUK", &ListProductsQuery::default())
//!         .await?;
//!     println!("{} products in the catalogue", products.len());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod buyer;
pub mod error;
pub mod seller;
pub mod types;

// Re-export commonly used types at crate root
pub use error::PatsError;
pub use types::common::{Category, FieldValidation, MediaSubtype, MediaType, OrderStatus};

/// Result type alias using PatsError
pub type Result<T> = std::result::Result<T, PatsError>;
