//! Buyer-side REST API client implementation.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;

use crate::auth::{API_KEY_HEADER, ApiKey};
use crate::buyer::rest::endpoints::{self, AGENCY_BASE_URL, accept};
use crate::buyer::rest::types::{
    CampaignDetails, CampaignId, CreateCampaignResponse, CreateOrderRequest, ListProductsQuery,
    OrderResult, Product, ProductsResponse,
};
use crate::error::{PatsError, RemoteError, RemoteErrorBody, ValidationError};

/// The PATS buyer (agency) REST API client.
///
/// This client creates campaigns, sends insertion orders and reads publisher
/// product catalogues on behalf of one agency. Requests carry the access key
/// in the `X-MO-API-Key` header; transient transport failures are retried by
/// the middleware with exponential backoff.
///
/// # Example
///
/// ```rust,no_run
/// use pats_api_client::auth::ApiKey;
/// use pats_api_client::buyer::rest::{BuyerRestClient, ListProductsQuery};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = BuyerRestClient::new(ApiKey::from_env(), "35-IDSDKAD-7");
///
///     let products = client
///         .list_products("NEWSUK", &ListProductsQuery::default())
///         .await?;
///     println!("{} products", products.len());
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BuyerRestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    agency_id: String,
}

impl BuyerRestClient {
    /// Create a new client with default settings.
    ///
    /// Use [`BuyerRestClient::builder()`] to override the base URL, user
    /// agent or retry count.
    pub fn new(api_key: ApiKey, agency_id: impl Into<String>) -> Self {
        Self::builder(api_key, agency_id).build()
    }

    /// Create a new client builder.
    pub fn builder(api_key: ApiKey, agency_id: impl Into<String>) -> BuyerRestClientBuilder {
        BuyerRestClientBuilder::new(api_key, agency_id)
    }

    /// The agency this client acts for.
    pub fn agency_id(&self) -> &str {
        &self.agency_id
    }

    // HTTP request methods.

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_params<T, Q>(
        &self,
        path: &str,
        accept: &'static str,
        extra_headers: &[(&str, &str)],
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
        let mut request = self.http_client.get(&url).header(ACCEPT, accept);
        for (name, value) in extra_headers {
            request = request.header(*name, *value);
        }
        let response = request.send().await?;
        self.parse_response(response).await
    }

    /// Make a POST request with a JSON body.
    pub(crate) async fn post_json<T, B>(
        &self,
        path: &str,
        accept: &'static str,
        extra_headers: &[(&str, &str)],
        body: &B,
    ) -> Result<T, PatsError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http_client.post(&url).header(ACCEPT, accept);
        for (name, value) in extra_headers {
            request = request.header(*name, *value);
        }
        let response = request.json(body).send().await?;
        self.parse_response(response).await
    }

    /// Make a PUT request with a JSON body.
    pub(crate) async fn put_json<T, B>(
        &self,
        path: &str,
        accept: &'static str,
        extra_headers: &[(&str, &str)],
        body: &B,
    ) -> Result<T, PatsError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http_client.put(&url).header(ACCEPT, accept);
        for (name, value) in extra_headers {
            request = request.header(*name, *value);
        }
        let response = request.json(body).send().await?;
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

    /// Create an agency-side campaign, which is then used to send orders.
    ///
    /// The details are validated locally first; a payload that cannot pass
    /// the service's constraints never costs a round-trip. On success the
    /// service assigns and returns the campaign's short code.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use pats_api_client::auth::ApiKey;
    /// use pats_api_client::buyer::rest::{BuyerRestClient, CampaignDetails};
    /// use rust_decimal::Decimal;
    /// use time::macros::date;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = BuyerRestClient::new(ApiKey::from_env(), "35-IDSDKAD-7");
    ///     let details = CampaignDetails::new(
    ///         "35-IDSDKAD-7",
    ///         "brenddlo",
    ///         "PATS3",
    ///         "Monday test campaign 1",
    ///         "BQMONDAYTEST1",
    ///         date!(2015 - 02 - 01),
    ///         date!(2015 - 02 - 28),
    ///         "DEM",
    ///     )
    ///     .digital()
    ///     .budget(Decimal::new(1_000_000, 0));
    ///
    ///     let campaign_id = client.create_campaign(&details).await?;
    ///     println!("campaign {campaign_id} created");
    ///     Ok(())
    /// }
    /// ```
    pub async fn create_campaign(
        &self,
        details: &CampaignDetails,
    ) -> Result<CampaignId, PatsError> {
        details.validate()?;
        let headers = [
            ("X-MO-Person-ID", details.person_id.as_str()),
            ("X-MO-Company-ID", details.company_id.as_str()),
            ("X-MO-Organization-ID", details.organisation_id.as_str()),
        ];
        let response: CreateCampaignResponse = self
            .post_json(endpoints::CAMPAIGNS, accept::PRISMA_V1, &headers, details)
            .await?;
        Ok(response.campaign_id)
    }

    /// Send a print or digital insertion order.
    ///
    /// Line items must be present and homogeneous with the order's media
    /// type; violations are rejected locally. The service's verdict is
    /// returned whole: a FAILED or partially successful submission still
    /// carries its field validations, echoed public id and version together.
    ///
    /// Sending an order creates remote state that cannot be rolled back from
    /// here; the service deduplicates on the caller-supplied `orderId` and
    /// `externalCampaignId`, which pass through verbatim.
    pub async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<OrderResult, PatsError> {
        request.validate()?;
        let mut headers = vec![
            ("X-MO-Company-ID", request.company_id.as_str()),
            ("X-MO-Organization-ID", self.agency_id.as_str()),
        ];
        if let Some(person_id) = &request.person_id {
            headers.push(("X-MO-Person-ID", person_id.as_str()));
        }
        self.put_json(
            endpoints::ORDER_SEND,
            accept::PRISMA_V1,
            &headers,
            &request.to_payload(),
        )
        .await
    }

    /// List products in a vendor's catalogue.
    ///
    /// Returns a finite snapshot of the catalogue at call time; reading twice
    /// against an unchanged catalogue yields equal sequences.
    pub async fn list_products(
        &self,
        vendor_id: &str,
        query: &ListProductsQuery,
    ) -> Result<Vec<Product>, PatsError> {
        if vendor_id.is_empty() {
            return Err(ValidationError::missing("vendorId").into());
        }
        let path = endpoints::agency_vendor_products(&self.agency_id, vendor_id);
        let response: ProductsResponse = self
            .get_with_params(&path, accept::CATALOG_V1, &[], query)
            .await?;
        if !response.validation_results.is_empty() {
            return Err(PatsError::Remote(RemoteError::catalogue_validation(
                response.validation_results,
            )));
        }
        Ok(response.products)
    }
}

impl std::fmt::Debug for BuyerRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuyerRestClient")
            .field("base_url", &self.base_url)
            .field("agency_id", &self.agency_id)
            .finish()
    }
}

/// Builder for [`BuyerRestClient`].
pub struct BuyerRestClientBuilder {
    api_key: ApiKey,
    agency_id: String,
    base_url: String,
    user_agent: Option<String>,
    max_retries: u32,
}

impl BuyerRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new(api_key: ApiKey, agency_id: impl Into<String>) -> Self {
        Self {
            api_key,
            agency_id: agency_id.into(),
            base_url: AGENCY_BASE_URL.to_string(),
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
    pub fn build(self) -> BuyerRestClient {
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

        BuyerRestClient {
            http_client: client,
            base_url: self.base_url,
            agency_id: self.agency_id,
        }
    }
}
