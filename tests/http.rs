mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use storefront_api::{routes::create_app, state::AppState};
use tower::ServiceExt;

async fn send(app: Router, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(body)
        }
        None => Body::empty(),
    };

    let response = app
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

async fn seeded() -> anyhow::Result<(AppState, String)> {
    let state = common::setup_state().await?;
    common::create_customer(&state, "alice@example.com", "North").await?;
    let product = common::create_product(&state, "P1", 1000, "North").await?;
    Ok((state, product.id.to_string()))
}

#[tokio::test]
async fn purchase_round_trip_over_http() -> anyhow::Result<()> {
    let (state, product_id) = seeded().await?;

    let body = json!({ "productId": product_id, "customerId": "alice@example.com", "quantity": 3 });
    let (status, created) = send(
        create_app(state.clone()),
        Method::POST,
        "/api/purchases",
        Some(body.to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Purchase created");
    assert_eq!(created["data"]["totalPrice"], "30.00");
    assert_eq!(created["data"]["unitPrice"], "10.00");
    assert_eq!(created["data"]["product"]["name"], "P1");

    let (status, history) = send(
        create_app(state.clone()),
        Method::GET,
        "/api/purchases/customer/alice@example.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(history["meta"]["total"], 1);

    let (status, report) = send(create_app(state), Method::GET, "/api/purchases/report", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["data"]["totalPurchases"], 1);
    assert_eq!(report["data"]["totalRevenue"], "30.00");
    assert_eq!(report["data"]["averageTicket"], "30.00");
    assert_eq!(report["data"]["salesByProduct"][0]["productId"], product_id.as_str());
    assert_eq!(report["data"]["salesByProduct"][0]["total_sales"], 3);
    assert_eq!(report["data"]["salesByProduct"][0]["total_revenue"], "30.00");
    Ok(())
}

#[tokio::test]
async fn unknown_product_is_404() -> anyhow::Result<()> {
    let (state, _) = seeded().await?;

    let body = json!({
        "productId": "00000000-0000-0000-0000-000000000000",
        "customerId": "alice@example.com",
    });
    let (status, json) = send(create_app(state), Method::POST, "/api/purchases", Some(body.to_string())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Product not found");
    assert_eq!(json["data"]["error"], "Product not found");
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_400() -> anyhow::Result<()> {
    let (state, _) = seeded().await?;

    let (status, _) = send(
        create_app(state.clone()),
        Method::POST,
        "/api/purchases",
        Some("{not json".into()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(
        create_app(state),
        Method::POST,
        "/api/purchases",
        Some(json!({ "customerId": "alice@example.com" }).to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["data"]["error"], "Bad Request productId is required");
    Ok(())
}

#[tokio::test]
async fn unknown_customer_history_is_404() -> anyhow::Result<()> {
    let (state, _) = seeded().await?;

    let (status, _) = send(
        create_app(state),
        Method::GET,
        "/api/purchases/customer/ghost@example.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn customer_create_and_delete() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    let body = json!({ "email": "carol@example.com", "name": "Carol", "region": "East" });
    let (status, created) = send(
        create_app(state.clone()),
        Method::POST,
        "/api/customers",
        Some(body.to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_str().expect("id").to_string();

    let (status, _) = send(
        create_app(state.clone()),
        Method::POST,
        "/api/customers",
        Some(body.to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, json) = send(
        create_app(state),
        Method::DELETE,
        &format!("/api/customers/{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(json, Value::Null);
    Ok(())
}

#[tokio::test]
async fn unknown_route_uses_json_fallback() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    let (status, json) = send(create_app(state), Method::GET, "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["data"]["path"], "/nope");
    Ok(())
}
