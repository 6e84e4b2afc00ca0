//! Handler tests for the Pantry domain
//!
//! These drive `handlers::router` end to end with `oneshot`:
//! - Request decoding (single object vs batch, lenient fields)
//! - Response shapes and derived flags
//! - Status codes and plain-text error bodies
//!
//! The shared app shell (docs, health, unknown-path fallback) is covered in
//! axum-helpers.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{TimeZone, Utc};
use domain_pantry::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(PantryService::new(InMemoryPantryRepository::new()))
}

/// App whose clock is pinned to 2025-06-15 12:00 UTC
fn app_at_fixed_time() -> Router {
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
    let repository = InMemoryPantryRepository::with_clock(Arc::new(move || now));
    handlers::router(PantryService::new(repository))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn parse<T: serde::de::DeserializeOwned>(body: &str) -> T {
    serde_json::from_str(body).unwrap()
}

fn milk() -> Value {
    json!({
        "name": "Milk",
        "description": "2% milk",
        "itemType": "dairy",
        "count": 1,
        "expiryDate": "2099-01-01"
    })
}

#[tokio::test]
async fn test_create_single_item_returns_object_with_derived_fields() {
    let app = app();

    let (status, body) = send(&app, "POST", "/pantryItems", Some(milk())).await;

    assert_eq!(status, StatusCode::OK);
    let item: Value = parse(&body);
    assert_eq!(
        item,
        json!({
            "id": 1,
            "name": "Milk",
            "description": "2% milk",
            "itemType": "dairy",
            "count": 1,
            "expiryDate": "2099-01-01",
            "isExpired": false,
            "buy": true
        })
    );
}

#[tokio::test]
async fn test_create_batch_returns_array_with_sequential_ids() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/pantryItems",
        Some(json!([
            {"name": "Rice", "count": 5, "expiryDate": "2099-01-01"},
            {"name": "Beans", "count": 0, "expiryDate": "2099-01-01"}
        ])),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let items: Vec<PantryItem> = parse(&body);
    assert_eq!(items.len(), 2);
    assert_eq!((items[0].id, items[0].buy), (1, false));
    assert_eq!((items[1].id, items[1].buy), (2, true));
}

#[tokio::test]
async fn test_create_ignores_client_supplied_identity_and_flags() {
    let app = app();

    let (_, body) = send(
        &app,
        "POST",
        "/pantryItems",
        Some(json!({
            "id": 77,
            "name": "Flour",
            "count": 10,
            "expiryDate": "2099-01-01",
            "isExpired": true,
            "buy": true
        })),
    )
    .await;

    let item: PantryItem = parse(&body);
    assert_eq!(item.id, 1);
    assert!(!item.is_expired);
    assert!(!item.buy);
}

#[tokio::test]
async fn test_create_duplicate_name_is_not_acceptable() {
    let app = app();
    send(&app, "POST", "/pantryItems", Some(milk())).await;

    let (status, body) = send(&app, "POST", "/pantryItems", Some(milk())).await;

    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(body, "Duplicate item Milk found\n");
}

#[tokio::test]
async fn test_batch_with_duplicate_stores_nothing() {
    let app = app();
    send(&app, "POST", "/pantryItems", Some(milk())).await;

    let (status, body) = send(
        &app,
        "POST",
        "/pantryItems",
        Some(json!([{"name": "Eggs"}, {"name": "Milk"}])),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(body, "Duplicate item Milk found\n");

    let (_, body) = send(&app, "GET", "/pantryItems", None).await;
    let items: Vec<PantryItem> = parse(&body);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Milk");

    // The rejected batch consumed no IDs
    let (_, body) = send(&app, "POST", "/pantryItems", Some(json!({"name": "Eggs"}))).await;
    assert_eq!(parse::<PantryItem>(&body).id, 2);
}

#[tokio::test]
async fn test_create_with_malformed_json_is_bad_request() {
    let app = app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/pantryItems")
                .body(Body::from("{\"name\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain; charset=utf-8"
    );
}

#[tokio::test]
async fn test_create_with_wrong_field_type_reports_the_field_error() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/pantryItems",
        Some(json!({"name": "Rice", "count": "3"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("invalid type: string \"3\", expected i64"), "{body}");
    assert!(!body.contains("untagged"));
    assert!(body.ends_with('\n'));
}

#[tokio::test]
async fn test_get_item_by_id() {
    let app = app();
    send(&app, "POST", "/pantryItems", Some(milk())).await;

    let (status, body) = send(&app, "GET", "/pantryItem/1", None).await;

    assert_eq!(status, StatusCode::OK);
    let item: PantryItem = parse(&body);
    assert_eq!(item.name, "Milk");
    assert_eq!(item.item_type, "dairy");
}

#[tokio::test]
async fn test_get_item_with_percent_encoded_id() {
    let app = app();
    send(&app, "POST", "/pantryItems", Some(milk())).await;

    let (status, body) = send(&app, "GET", "/pantryItem/%31", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<PantryItem>(&body).id, 1);
}

#[tokio::test]
async fn test_get_item_with_non_integer_id_is_bad_request() {
    let app = app();

    let (status, body) = send(&app, "GET", "/pantryItem/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        "unexpected Pantry Item Id data type. Expecting integer\n"
    );
}

#[tokio::test]
async fn test_get_unknown_item_is_bad_request() {
    let app = app();

    let (status, body) = send(&app, "GET", "/pantryItem/9999", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "pantry Item Id not found\n");
}

#[tokio::test]
async fn test_patch_replaces_item_and_keeps_id() {
    let app = app_at_fixed_time();
    send(&app, "POST", "/pantryItems", Some(milk())).await;

    let (status, body) = send(
        &app,
        "PATCH",
        "/pantryItem/1",
        Some(json!({
            "id": 42,
            "name": "Oat Milk",
            "count": 6,
            "expiryDate": "2020-01-01",
            "buy": true
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let item: PantryItem = parse(&body);
    assert_eq!(item.id, 1);
    assert_eq!(item.name, "Oat Milk");
    // Full replacement: omitted fields are cleared
    assert_eq!(item.description, "");
    assert_eq!(item.item_type, "");
    assert!(item.is_expired);
    assert!(!item.buy);

    let (_, body) = send(&app, "GET", "/pantryItem/1", None).await;
    assert_eq!(parse::<PantryItem>(&body), item);
}

#[tokio::test]
async fn test_patch_unknown_item_is_bad_request() {
    let app = app();

    let (status, body) = send(&app, "PATCH", "/pantryItem/3", Some(milk())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "pantry Item Id not found\n");
}

#[tokio::test]
async fn test_patch_with_malformed_json_is_bad_request() {
    let app = app();
    send(&app, "POST", "/pantryItems", Some(milk())).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/pantryItem/1")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_item() {
    let app = app();
    send(&app, "POST", "/pantryItems", Some(milk())).await;

    let (status, body) = send(&app, "DELETE", "/pantryItem/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (status, _) = send(&app, "GET", "/pantryItem/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_unknown_item_is_not_found() {
    let app = app();

    let (status, body) = send(&app, "DELETE", "/pantryItem/5", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Pantry Item Id not found\n");
}

#[tokio::test]
async fn test_delete_all_then_list_is_empty_and_ids_continue() {
    let app = app();
    send(&app, "POST", "/pantryItems", Some(json!([{"name": "A"}, {"name": "B"}]))).await;

    let (status, body) = send(&app, "DELETE", "/pantryItems", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<Value>(&body), json!([]));

    let (status, body) = send(&app, "GET", "/pantryItems", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<Value>(&body), json!([]));

    let (_, body) = send(&app, "POST", "/pantryItems", Some(json!({"name": "C"}))).await;
    assert_eq!(parse::<PantryItem>(&body).id, 3);
}

#[tokio::test]
async fn test_list_on_empty_pantry_is_empty_array() {
    let app = app();

    let (status, body) = send(&app, "GET", "/pantryItems", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn test_list_filters_combine() {
    let app = app_at_fixed_time();
    send(
        &app,
        "POST",
        "/pantryItems",
        Some(json!([
            {"name": "Whole Milk", "itemType": "Dairy", "count": 1, "expiryDate": "2025-06-01"},
            {"name": "Oat milk", "itemType": "dairy", "count": 4, "expiryDate": "2099-01-01"},
            {"name": "Cheddar", "itemType": "dairy", "count": 1, "expiryDate": "2099-01-01"},
            {"name": "Rice", "itemType": "grain", "count": 8, "expiryDate": "not a date"}
        ])),
    )
    .await;

    let names = |body: String| -> Vec<String> {
        parse::<Vec<PantryItem>>(&body)
            .into_iter()
            .map(|item| item.name)
            .collect()
    };

    let (_, body) = send(&app, "GET", "/pantryItems?name=MILK", None).await;
    assert_eq!(names(body), ["Whole Milk", "Oat milk"]);

    let (_, body) = send(&app, "GET", "/pantryItems?itemType=dairy&buy=true", None).await;
    assert_eq!(names(body), ["Whole Milk", "Cheddar"]);

    let (_, body) = send(&app, "GET", "/pantryItems?isExpired=1", None).await;
    assert_eq!(names(body), ["Whole Milk"]);

    let (_, body) = send(&app, "GET", "/pantryItems?isExpired=F&buy=false", None).await;
    assert_eq!(names(body), ["Oat milk", "Rice"]);

    let (_, body) = send(&app, "GET", "/pantryItems?name=", None).await;
    assert_eq!(names(body).len(), 4);
}

#[tokio::test]
async fn test_list_with_repeated_query_key_uses_first_value() {
    let app = app();
    send(
        &app,
        "POST",
        "/pantryItems",
        Some(json!([{"name": "Milk", "count": 1}, {"name": "Rice", "count": 9}])),
    )
    .await;

    let (status, body) = send(&app, "GET", "/pantryItems?name=Mi&name=zz", None).await;
    assert_eq!(status, StatusCode::OK);
    let items: Vec<PantryItem> = parse(&body);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Milk");

    let (status, body) = send(&app, "GET", "/pantryItems?buy=false&buy=oops", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<Vec<PantryItem>>(&body)[0].name, "Rice");
}

#[tokio::test]
async fn test_list_with_invalid_boolean_is_bad_request() {
    let app = app();

    let (status, body) = send(&app, "GET", "/pantryItems?isExpired=yes", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        "Query Parameter isExpired has an invalid value. Expected Value is true or false\n"
    );

    let (status, body) = send(&app, "GET", "/pantryItems?buy=", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        "Query Parameter buy has an invalid value. Expected Value is true or false\n"
    );
}

#[tokio::test]
async fn test_unsupported_methods_are_rejected() {
    let app = app();

    let (status, body) = send(&app, "PUT", "/pantryItems", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, "Invalid request method PUT\n");

    let (status, body) = send(&app, "POST", "/pantryItem/1", Some(milk())).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, "Invalid request method POST\n");

    // HEAD is not implied by GET
    send(&app, "POST", "/pantryItems", Some(milk())).await;
    for uri in ["/pantryItems", "/pantryItem/1"] {
        let (status, _) = send(&app, "HEAD", uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
    }
}

#[tokio::test]
async fn test_concurrent_creates_get_unique_ids() {
    let app = app();

    let requests = (0..20).map(|i| {
        let app = app.clone();
        tokio::spawn(async move {
            send(&app, "POST", "/pantryItems", Some(json!({"name": format!("item-{i}")}))).await
        })
    });

    let mut ids = Vec::new();
    for request in requests {
        let (status, body) = request.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        ids.push(parse::<PantryItem>(&body).id);
    }

    ids.sort_unstable();
    assert_eq!(ids, (1..=20).collect::<Vec<i64>>());
}
