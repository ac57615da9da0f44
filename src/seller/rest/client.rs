//! Seller-side REST API client implementation.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use time::Date;

use crate::auth::{API_KEY_HEADER, ApiKey};
use crate::error::{PatsError, RemoteError, RemoteErrorBody, ValidationError};
use crate::seller::rest::endpoints::{self, PUBLISHER_BASE_URL, accept};
use crate::seller::rest::types::{
    OrdersQuery, ProductDetails, ProductId, ProposalDetails, RfpsQuery, SaveProductResponse,
};

/// The PATS seller (publisher) REST API client.
///
/// This client maintains one vendor's product catalogue and reads the
/// orders, RFPs and proposals buyers have sent that vendor.
///
/// # Example
///
/// ```rust,no_run
/// use pats_api_client::auth::ApiKey;
/// use pats_api_client::seller::rest::SellerRestClient;
/// use time::macros::date;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = SellerRestClient::new(ApiKey::from_env(), "NEWSUK");
///
///     let orders = client.view_orders(date!(2015 - 02 - 01), None).await?;
///     println!("{orders:#}");
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct SellerRestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    vendor_id: String,
}

impl SellerRestClient {
    /// Create a new client with default settings.
    ///
    /// Use [`SellerRestClient::builder()`] to override the base URL, user
    /// agent or retry count.
    pub fn new(api_key: ApiKey, vendor_id: impl Into<String>) -> Self {
        Self::builder(api_key, vendor_id).build()
    }

    /// Create a new client builder.
    pub fn builder(api_key: ApiKey, vendor_id: impl Into<String>) -> SellerRestClientBuilder {
        SellerRestClientBuilder::new(api_key, vendor_id)
    }

    /// The vendor this client acts for.
    pub fn vendor_id(&self) -> &str {
        &self.vendor_id
    }

    // HTTP request methods.

    /// Make a GET request.
    pub(crate) async fn get_json<T>(&self, path: &str, accept: &'static str) -> Result<T, PatsError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http_client.get(&url).header(ACCEPT, accept).send().await?;
        self.parse_response(response).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_params<T, Q>(
        &self,
        path: &str,
        accept: &'static str,
        params: &Q,
    ) -> Result<T, PatsError>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let query_string = serde_urlencoded::to_string(params)
            .map_err(|e| PatsError::InvalidResponse(e.to_string()))?;
        let url = if query_string.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query_string)
        };
        let response = self.http_client.get(&url).header(ACCEPT, accept).send().await?;
        self.parse_response(response).await
    }

    /// Make a POST request with a JSON body.
    pub(crate) async fn post_json<T, B>(
        &self,
        path: &str,
        accept: &'static str,
        body: &B,
    ) -> Result<T, PatsError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http_client
            .post(&url)
            .header(ACCEPT, accept)
            .json(body)
            .send()
            .await?;
        self.parse_response(response).await
    }

    /// Parse a response from the PATS API.
    async fn parse_response<T>(&self, response: reqwest::Response) -> Result<T, PatsError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;

        // 422 is "unprocessable entity"; the JSON body carries more detail
        // than the status line, so prefer it when it decodes.
        if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            if let Ok(error_body) = serde_json::from_str::<RemoteErrorBody>(&body) {
                return Err(PatsError::Remote(error_body.into_remote_error(status.as_u16())));
            }
        }
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "PATS request rejected");
            return Err(PatsError::Remote(RemoteError::from_status(
                status.as_u16(),
                &body,
            )));
        }
        serde_json::from_str(&body).map_err(|e| {
            PatsError::InvalidResponse(format!("failed to decode response: {}. Body: {}", e, body))
        })
    }

    // Operations.

    /// Save a new or updated product to the vendor's catalogue.
    ///
    /// The details are validated locally first. The catalogue reports
    /// per-product rejections inside an otherwise successful response; those
    /// surface as a [`RemoteError`] carrying the records verbatim. On success
    /// the catalogue's assigned public id is returned.
    pub async fn save_product(&self, details: &ProductDetails) -> Result<ProductId, PatsError> {
        details.validate()?;
        let path = endpoints::vendor_products(&self.vendor_id);
        let response: SaveProductResponse = self
            .post_json(&path, accept::CATALOG_V1, &details.to_payload())
            .await?;
        if !response.validation_results.is_empty() {
            return Err(PatsError::Remote(RemoteError::catalogue_validation(
                response.validation_results,
            )));
        }
        response
            .products
            .into_iter()
            .next()
            .map(|product| product.product_public_id)
            .ok_or_else(|| {
                PatsError::InvalidResponse("response missing productPublicId".to_string())
            })
    }

    /// View orders received from buyers in a date range.
    ///
    /// The order view schema is not published, so the body is returned as
    /// received.
    // TODO: type the order view records once the schema is published
    pub async fn view_orders(
        &self,
        start_date: Date,
        end_date: Option<Date>,
    ) -> Result<serde_json::Value, PatsError> {
        let path = endpoints::vendor_orders(&self.vendor_id);
        let query = OrdersQuery {
            start_date,
            end_date,
        };
        self.get_with_params(&path, accept::ORDER_V1, &query).await
    }

    /// View the revision history of one order.
    pub async fn view_order_history(&self, order_id: &str) -> Result<serde_json::Value, PatsError> {
        if order_id.is_empty() {
            return Err(ValidationError::missing("orderId").into());
        }
        let path = endpoints::vendor_order_history(&self.vendor_id, order_id);
        self.get_json(&path, accept::ORDER_V1).await
    }

    /// View RFPs received from buyers, optionally bounded to a date range.
    pub async fn view_rfps(
        &self,
        start_date: Option<Date>,
        end_date: Option<Date>,
    ) -> Result<serde_json::Value, PatsError> {
        let path = endpoints::vendor_rfps(&self.vendor_id);
        let query = RfpsQuery {
            start_date,
            end_date,
        };
        self.get_with_params(&path, accept::RFPS_V1, &query).await
    }

    /// View the proposals already sent in response to one RFP.
    pub async fn view_proposals(&self, rfp_id: &str) -> Result<serde_json::Value, PatsError> {
        if rfp_id.is_empty() {
            return Err(ValidationError::missing("rfpPublicId").into());
        }
        let path = endpoints::vendor_rfp_proposals(&self.vendor_id, rfp_id);
        self.get_json(&path, accept::PROPOSALS_V1).await
    }

    /// Send a proposal in response to a buyer's RFP.
    pub async fn send_proposal(
        &self,
        details: &ProposalDetails,
    ) -> Result<serde_json::Value, PatsError> {
        details.validate()?;
        let path = endpoints::vendor_rfp_proposals(&self.vendor_id, &details.rfp_id);
        self.post_json(
            &path,
            accept::PROPOSALS_V1,
            &details.to_payload(&self.vendor_id),
        )
        .await
    }
}

impl std::fmt::Debug for SellerRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SellerRestClient")
            .field("base_url", &self.base_url)
            .field("vendor_id", &self.vendor_id)
            .finish()
    }
}

/// Builder for [`SellerRestClient`].
pub struct SellerRestClientBuilder {
    api_key: ApiKey,
    vendor_id: String,
    base_url: String,
    user_agent: Option<String>,
    max_retries: u32,
}

impl SellerRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new(api_key: ApiKey, vendor_id: impl Into<String>) -> Self {
        Self {
            api_key,
            vendor_id: vendor_id.into(),
            base_url: PUBLISHER_BASE_URL.to_string(),
            user_agent: None,
            max_retries: 3,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the maximum number of retries for transient failures.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the client.
    pub fn build(self) -> SellerRestClient {
        // Build default headers; the access key rides on every request.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("pats-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("pats-api-client"));
        headers.insert(USER_AGENT, header_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut key_value = HeaderValue::from_str(self.api_key.expose_secret())
            .unwrap_or_else(|_| HeaderValue::from_static(""));
        key_value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key_value);

        // Build the HTTP client with middleware.
        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(self.max_retries);

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        SellerRestClient {
            http_client: client,
            base_url: self.base_url,
            vendor_id: self.vendor_id,
        }
    }
}
