//! Trait definition for the buyer-side REST API client.
//!
//! This module provides the `PatsBuyerApi` trait which abstracts the buyer
//! operations. This enables:
//! - Mock implementations for testing
//! - Alternative implementations
//!
//! # Example
//!
//! ```rust,ignore
//! use pats_api_client::buyer::rest::{BuyerRestClient, CampaignDetails, PatsBuyerApi};
//!
//! async fn launch<C: PatsBuyerApi>(
//!     client: &C,
//!     details: &CampaignDetails,
//! ) -> Result<(), pats_api_client::PatsError> {
//!     let id = client.create_campaign(details).await?;
//!     println!("created campaign {id}");
//!     Ok(())
//! }
//! ```

use std::future::Future;

use crate::buyer::rest::BuyerRestClient;
use crate::buyer::rest::types::{
    CampaignDetails, CampaignId, CreateOrderRequest, ListProductsQuery, OrderResult, Product,
};
use crate::error::PatsError;

/// Trait defining the buyer-side REST API operations.
///
/// All methods are async and return `Result<T, PatsError>`.
pub trait PatsBuyerApi: Send + Sync {
    /// Create an agency-side campaign and return its assigned code.
    fn create_campaign(
        &self,
        details: &CampaignDetails,
    ) -> impl Future<Output = Result<CampaignId, PatsError>> + Send;

    /// Send a print or digital insertion order.
    fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> impl Future<Output = Result<OrderResult, PatsError>> + Send;

    /// List products in a vendor's catalogue.
    fn list_products(
        &self,
        vendor_id: &str,
        query: &ListProductsQuery,
    ) -> impl Future<Output = Result<Vec<Product>, PatsError>> + Send;
}

impl PatsBuyerApi for BuyerRestClient {
    async fn create_campaign(&self, details: &CampaignDetails) -> Result<CampaignId, PatsError> {
        BuyerRestClient::create_campaign(self, details).await
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> Result<OrderResult, PatsError> {
        BuyerRestClient::create_order(self, request).await
    }

    async fn list_products(
        &self,
        vendor_id: &str,
        query: &ListProductsQuery,
    ) -> Result<Vec<Product>, PatsError> {
        BuyerRestClient::list_products(self, vendor_id, query).await
    }
}
