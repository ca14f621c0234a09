//! End-to-end tests for the wholesale portal.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (cedarline-cli migrate run)
//! - A provisioned company, products, and login (via the admin API)
//! - The wholesale server running (cargo run -p cedarline-wholesale)
//!
//! Credentials come from `WHOLESALE_TEST_EMAIL` and
//! `WHOLESALE_TEST_PASSWORD`.

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use cedarline_integration_tests::wholesale_base_url;

async fn login(client: &Client, base: &str) -> String {
    let resp = client
        .post(format!("{base}/auth/login"))
        .json(&json!({
            "email": std::env::var("WHOLESALE_TEST_EMAIL").expect("WHOLESALE_TEST_EMAIL"),
            "password": std::env::var("WHOLESALE_TEST_PASSWORD").expect("WHOLESALE_TEST_PASSWORD"),
        }))
        .send()
        .await
        .expect("login request");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("login body");
    body["token"].as_str().expect("token").to_owned()
}

#[tokio::test]
#[ignore = "Requires running wholesale server"]
async fn test_requests_without_token_are_rejected() {
    let client = Client::new();
    let base = wholesale_base_url();

    let resp = client
        .get(format!("{base}/catalog"))
        .send()
        .await
        .expect("catalog request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .get(format!("{base}/catalog"))
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .expect("catalog request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running wholesale server and a provisioned buyer"]
async fn test_login_and_browse_catalog() {
    let client = Client::new();
    let base = wholesale_base_url();
    let token = login(&client, &base).await;

    let resp = client
        .get(format!("{base}/catalog"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("catalog request");
    assert_eq!(resp.status(), StatusCode::OK);

    let products: Value = resp.json().await.expect("catalog body");
    assert!(products.as_array().is_some());
}

#[tokio::test]
#[ignore = "Requires running wholesale server and a provisioned buyer"]
async fn test_order_below_moq_is_rejected() {
    let client = Client::new();
    let base = wholesale_base_url();
    let token = login(&client, &base).await;

    let products: Value = client
        .get(format!("{base}/catalog"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("catalog request")
        .json()
        .await
        .expect("catalog body");

    let Some(product) = products.as_array().and_then(|a| {
        a.iter()
            .find(|p| p["moq"].as_i64().is_some_and(|moq| moq > 1))
    }) else {
        return; // no product with an interesting MOQ provisioned
    };
    let id = product["id"].as_i64().expect("product id");
    let moq = product["moq"].as_i64().expect("product moq");

    let resp = client
        .post(format!("{base}/orders"))
        .bearer_auth(&token)
        .json(&json!({
            "lines": [{ "private_product_id": id, "quantity": moq - 1 }],
        }))
        .send()
        .await
        .expect("place order request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running wholesale server and a provisioned buyer"]
async fn test_place_order_and_read_it_back() {
    let client = Client::new();
    let base = wholesale_base_url();
    let token = login(&client, &base).await;

    let products: Value = client
        .get(format!("{base}/catalog"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("catalog request")
        .json()
        .await
        .expect("catalog body");

    let Some(product) = products.as_array().and_then(|a| a.first()) else {
        return; // no products provisioned
    };
    let id = product["id"].as_i64().expect("product id");
    let moq = product["moq"].as_i64().expect("product moq");

    let resp = client
        .post(format!("{base}/orders"))
        .bearer_auth(&token)
        .json(&json!({
            "lines": [{ "private_product_id": id, "quantity": moq }],
        }))
        .send()
        .await
        .expect("place order request");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let placed: Value = resp.json().await.expect("order body");
    let order_id = placed["id"].as_i64().expect("order id");
    assert_eq!(placed["status"], "pending");

    let detail: Value = client
        .get(format!("{base}/orders/{order_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("detail request")
        .json()
        .await
        .expect("detail body");

    assert_eq!(detail["id"], placed["id"]);
    let items = detail["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["inspection_status"], "none");
}
