//! Buyer-side REST endpoint constants.

/// Base URL for the agency (buyer) API.
pub const AGENCY_BASE_URL: &str = "https://prisma-demo.api.mediaocean.com";

/// Accept media types the agency API versions its resources with.
pub mod accept {
    /// Campaigns and orders.
    pub const PRISMA_V1: &str = "application/vnd.mediaocean.prisma-v1.0+json";
    /// Product catalogue reads.
    pub const CATALOG_V1: &str = "application/vnd.mediaocean.catalog-v1+json";
}

/// Create an agency campaign.
pub const CAMPAIGNS: &str = "/campaigns";

/// Send a print or digital order.
pub const ORDER_SEND: &str = "/order/send";

/// Product catalogue of one vendor, scoped to the requesting agency.
pub fn agency_vendor_products(agency_id: &str, vendor_id: &str) -> String {
    format!("/agencies/{agency_id}/vendors/{vendor_id}/products/")
}
