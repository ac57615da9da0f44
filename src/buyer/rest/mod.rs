//! Buyer-side REST API client.
//!
//! # Trait-based API
//!
//! The [`PatsBuyerApi`] trait abstracts the buyer-side operations, enabling:
//! - Mock implementations for testing
//! - Alternative implementations
//!
//! ```rust,ignore
//! use pats_api_client::buyer::rest::{BuyerRestClient, PatsBuyerApi};
//!
//! async fn campaign_code<C: PatsBuyerApi>(
//!     client: &C,
//!     details: &pats_api_client::buyer::rest::CampaignDetails,
//! ) -> Result<String, pats_api_client::PatsError> {
//!     let id = client.create_campaign(details).await?;
//!     Ok(id.to_string())
//! }
//! ```

mod client;
mod endpoints;
mod traits;
mod types;

pub use client::{BuyerRestClient, BuyerRestClientBuilder};
pub use endpoints::*;
pub use traits::PatsBuyerApi;
pub use types::*;
