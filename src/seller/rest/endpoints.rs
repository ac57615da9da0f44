//! Seller-side REST endpoint constants.

/// Base URL for the publisher (seller) API.
pub const PUBLISHER_BASE_URL: &str = "https://demo-publishers.api.mediaocean.com";

/// Accept media types the publisher API versions its resources with.
pub mod accept {
    /// Product catalogue writes.
    pub const CATALOG_V1: &str = "application/vnd.mediaocean.catalog-v1+json";
    /// Order views.
    pub const ORDER_V1: &str = "application/vnd.mediaocean.order-v1+json";
    /// RFP views.
    pub const RFPS_V1: &str = "application/vnd.mediaocean.rfps-v1+json";
    /// Proposal views and submissions.
    pub const PROPOSALS_V1: &str = "application/vnd.mediaocean.proposals-v1+json";
}

/// Product catalogue of one vendor.
pub fn vendor_products(vendor_id: &str) -> String {
    format!("/vendors/{vendor_id}/products/")
}

/// Orders received by one vendor.
pub fn vendor_orders(vendor_id: &str) -> String {
    format!("/vendors/{vendor_id}/orders")
}

/// Revision history of one order.
pub fn vendor_order_history(vendor_id: &str, order_id: &str) -> String {
    format!("/vendors/{vendor_id}/orders/{order_id}/history")
}

/// RFPs received by one vendor.
pub fn vendor_rfps(vendor_id: &str) -> String {
    format!("/vendors/{vendor_id}/rfps")
}

/// Proposals sent in response to one RFP.
pub fn vendor_rfp_proposals(vendor_id: &str, rfp_id: &str) -> String {
    format!("/vendors/{vendor_id}/rfps/{rfp_id}/proposals")
}
