use pats_api_client::auth::ApiKey;
use pats_api_client::buyer::rest::{BuyerRestClient, ListProductsQuery};

fn live_tests_enabled() -> bool {
    std::env::var("PATS_LIVE_TESTS").ok().as_deref() == Some("1")
}

#[tokio::test]
#[ignore]
async fn live_buyer_catalogue_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let api_key = match ApiKey::try_from_env() {
        Some(key) => key,
        None => return Ok(()),
    };
    let agency_id = match std::env::var("PATS_AGENCY_ID") {
        Ok(id) => id,
        Err(_) => return Ok(()),
    };
    let vendor_id = std::env::var("PATS_VENDOR_ID").unwrap_or_else(|_| "NEWSUK".to_string());

    let client = BuyerRestClient::new(api_key, agency_id);

    // idempotent read: two listings of an unchanged catalogue agree
    let first = client
        .list_products(&vendor_id, &ListProductsQuery::default())
        .await?;
    let second = client
        .list_products(&vendor_id, &ListProductsQuery::default())
        .await?;
    assert_eq!(first, second);

    Ok(())
}
