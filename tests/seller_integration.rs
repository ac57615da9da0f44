use rust_decimal_macros::dec;
use time::macros::date;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pats_api_client::PatsError;
use pats_api_client::auth::ApiKey;
use pats_api_client::seller::rest::{
    DigitalAttributes, MediaAttributes, ProductDetails, ProposalDetails, SellerRestClient,
};
use pats_api_client::types::{Category, MediaSubtype};

fn build_client(server: &MockServer) -> SellerRestClient {
    SellerRestClient::builder(ApiKey::new("test_key"), "NEWSUK")
        .base_url(server.uri())
        .build()
}

fn digital_product() -> ProductDetails {
    ProductDetails {
        product_id: "TIMESSPORTBANNER".to_string(),
        product_name: "Times Sport Banner".to_string(),
        product_url: "https://thetimes.co.uk/sport".to_string(),
        active: true,
        product_description: "Banner across the sport section".to_string(),
        publication_name: "The Times".to_string(),
        media_subtype: MediaSubtype::DisplayDigital,
        section: "Sport".to_string(),
        subsections: vec!["Football".to_string()],
        category: Category::Sports,
        non_standard: false,
        start_date: date!(2015 - 01 - 01),
        end_date: date!(2015 - 12 - 31),
        contact_name: "Brendan Quinn".to_string(),
        contact_phone: "+44 20 0000 0000".to_string(),
        contact_email: "sales@newsuk.example.com".to_string(),
        media_kit_url: "https://example.com/kit".to_string(),
        rate_card_url: "https://example.com/rates".to_string(),
        logo_jpeg_base64: None,
        attributes: MediaAttributes::Digital(DigitalAttributes {
            sizes: vec!["468x60".to_string()],
            placement_type: "TOP".to_string(),
            can_demo_target: true,
            max_daily_impressions: 500_000,
            standard_rate_card_cpm: dec!(15.00),
            standard_discount_cpm: dec!(12.00),
            positioning: "ABOVE_THE_FOLD".to_string(),
            ..DigitalAttributes::default()
        }),
    }
}

#[tokio::test]
async fn test_save_product() {
    let server = MockServer::start().await;
    let expected_body = serde_json::json!({
        "products": [{
            "standardAttributes": {
                "productId": "TIMESSPORTBANNER",
                "productName": "Times Sport Banner",
                "mediaType": "{DIGITAL}",
                "subMediaType": "{DISPLAY_DIGITAL}",
                "category": "{SPORTS}",
                "startDate": "2015-01-01",
                "endDate": "2015-12-31",
                "standardRateCardCPM": "15.00"
            }
        }]
    });

    Mock::given(method("POST"))
        .and(path("/vendors/NEWSUK/products/"))
        .and(header("X-MO-API-Key", "test_key"))
        .and(header("Accept", "application/vnd.mediaocean.catalog-v1+json"))
        .and(body_partial_json(expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "products": [ { "productPublicId": "TIMESSPORTBANNER-1" } ],
            "validationResults": []
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let product_id = client.save_product(&digital_product()).await.unwrap();

    assert_eq!(product_id.to_string(), "TIMESSPORTBANNER-1");
}

#[tokio::test]
async fn test_save_product_surfaces_validation_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/vendors/NEWSUK/products/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "products": [],
            "validationResults": [
                { "productId": "TIMESSPORTBANNER", "message": "placementType is not a known value" }
            ]
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let error = client.save_product(&digital_product()).await.unwrap_err();

    match error {
        PatsError::Remote(remote) => {
            assert_eq!(remote.field_validations.len(), 1);
            assert_eq!(remote.message, "placementType is not a known value");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_save_product_subtype_mismatch_fails_before_network() {
    let server = MockServer::start().await;

    let mut product = digital_product();
    product.media_subtype = MediaSubtype::Inserts;

    let client = build_client(&server);
    let error = client.save_product(&product).await.unwrap_err();

    assert!(matches!(error, PatsError::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_view_orders_encodes_date_range() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "orders": [ { "orderId": "MyTestOrder-0001", "status": "SENT" } ]
    });

    Mock::given(method("GET"))
        .and(path("/vendors/NEWSUK/orders"))
        .and(query_param("startDate", "2015-02-01"))
        .and(query_param("endDate", "2015-02-28"))
        .and(header("Accept", "application/vnd.mediaocean.order-v1+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response.clone()))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let orders = client
        .view_orders(date!(2015 - 02 - 01), Some(date!(2015 - 02 - 28)))
        .await
        .unwrap();

    assert_eq!(orders, response);
}

#[tokio::test]
async fn test_view_order_history() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "revisions": [ { "version": 1 }, { "version": 2 } ]
    });

    Mock::given(method("GET"))
        .and(path("/vendors/NEWSUK/orders/MyTestOrder-0001/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response.clone()))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let history = client.view_order_history("MyTestOrder-0001").await.unwrap();

    assert_eq!(history, response);
}

#[tokio::test]
async fn test_view_rfps_without_range() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vendors/NEWSUK/rfps"))
        .and(header("Accept", "application/vnd.mediaocean.rfps-v1+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "rfps": []
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let rfps = client.view_rfps(None, None).await.unwrap();

    assert!(rfps["rfps"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_view_proposals_requires_rfp_id() {
    let server = MockServer::start().await;

    let client = build_client(&server);
    let error = client.view_proposals("").await.unwrap_err();

    assert!(matches!(error, PatsError::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_send_proposal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/vendors/NEWSUK/rfps/RFP-42/proposals"))
        .and(header("Accept", "application/vnd.mediaocean.proposals-v1+json"))
        .and(body_partial_json(serde_json::json!({
            "rfpPublicId": "RFP-42",
            "vendorPublicId": "NEWSUK",
            "proposalExternalId": "PROPOSAL-1",
            "proposal": { "proposalExternalId": "PROPOSAL-1" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "proposalPublicId": "PROPOSAL-1"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let mut details = ProposalDetails::new("RFP-42", "PROPOSAL-1");
    details.comments = "Counter-proposal for the sport banner.".to_string();
    let response = client.send_proposal(&details).await.unwrap();

    assert_eq!(response["proposalPublicId"], "PROPOSAL-1");
}
