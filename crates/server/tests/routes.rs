use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::Engine as _;
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use migration::MigratorTrait;
use server::{ServerState, router};

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    router(ServerState {
        engine: Arc::new(engine),
        db,
    })
}

fn basic(email: &str, password: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{email}:{password}"));
    format!("Basic {encoded}")
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, name: &str, email: &str) -> String {
    let (status, _) = send(
        app,
        "POST",
        "/register",
        None,
        Some(json!({"name": name, "email": email, "password": "secret"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    basic(email, "secret")
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let app = app().await;
    register(&app, "Alice", "alice@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({"name": "Other", "email": "alice@example.com", "password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already"));
}

#[tokio::test]
async fn guarded_routes_require_credentials() {
    let app = app().await;

    let (status, _) = send(&app, "GET", "/purchases", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "GET",
        "/purchases",
        Some(&basic("ghost@example.com", "nope")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn full_allocation_flow() {
    let app = app().await;
    let auth = register(&app, "Alice", "alice@example.com").await;

    // Two customers.
    let (status, ilya) = send(
        &app,
        "POST",
        "/customers",
        Some(&auth),
        Some(json!({"name": "Ilya", "email": null})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, kirill) = send(
        &app,
        "POST",
        "/customers",
        Some(&auth),
        Some(json!({"name": "Kirill", "email": "kirill@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // A purchase with both attached.
    let (status, purchase) = send(
        &app,
        "POST",
        "/purchases",
        Some(&auth),
        Some(json!({"name": "Banya night"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(purchase["total_amount_minor"], 0);
    let purchase_id = purchase["id"].as_str().unwrap().to_string();

    let (status, attached) = send(
        &app,
        "POST",
        &format!("/purchases/{purchase_id}/customers"),
        Some(&auth),
        Some(json!({"customer_ids": [ilya["id"], kirill["id"]]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(attached["customer_ids"].as_array().unwrap().len(), 2);

    // One item split across both: 50.99 becomes 25.50 + 25.49.
    let (status, created) = send(
        &app,
        "POST",
        &format!("/purchases/{purchase_id}/items"),
        Some(&auth),
        Some(json!({"items": [
            {"name": "Bread", "price_minor": 5099,
             "customer_ids": [ilya["id"], kirill["id"]]}
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let item_id = created["items"][0]["id"].as_str().unwrap().to_string();

    let (status, share) = send(
        &app,
        "GET",
        &format!(
            "/purchases/{purchase_id}/customers/{}/share",
            ilya["id"].as_str().unwrap()
        ),
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(share["name"], "Ilya");
    assert_eq!(share["total_owed_minor"], 2550);

    let (status, detail) = send(
        &app,
        "GET",
        &format!("/purchases/{purchase_id}"),
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["total_amount_minor"], 5099);
    assert_eq!(detail["items"].as_array().unwrap().len(), 1);

    let (status, participants) = send(
        &app,
        "GET",
        &format!("/purchases/{purchase_id}/customers"),
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(participants["purchase_name"], "Banya night");
    assert_eq!(
        participants["customer_names"],
        json!(["Ilya", "Kirill"])
    );

    // Removing the item brings the total back to zero.
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/purchases/{purchase_id}/items/{item_id}"),
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, detail) = send(
        &app,
        "GET",
        &format!("/purchases/{purchase_id}"),
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(detail["total_amount_minor"], 0);
    assert!(detail["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn attach_conflict_maps_to_409() {
    let app = app().await;
    let auth = register(&app, "Alice", "alice@example.com").await;

    let (_, customer) = send(
        &app,
        "POST",
        "/customers",
        Some(&auth),
        Some(json!({"name": "Ilya", "email": null})),
    )
    .await;
    let (_, purchase) = send(
        &app,
        "POST",
        "/purchases",
        Some(&auth),
        Some(json!({"name": "Banya night"})),
    )
    .await;
    let purchase_id = purchase["id"].as_str().unwrap().to_string();

    let uri = format!("/purchases/{purchase_id}/customers");
    let body = json!({"customer_ids": [customer["id"]]});
    let (status, _) = send(&app, "POST", &uri, Some(&auth), Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", &uri, Some(&auth), Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already"));
}

#[tokio::test]
async fn foreign_purchase_answers_403() {
    let app = app().await;
    let alice = register(&app, "Alice", "alice@example.com").await;
    let bob = register(&app, "Bob", "bob@example.com").await;

    let (_, purchase) = send(
        &app,
        "POST",
        "/purchases",
        Some(&alice),
        Some(json!({"name": "Private"})),
    )
    .await;
    let purchase_id = purchase["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "GET",
        &format!("/purchases/{purchase_id}"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/purchases/{}", uuid::Uuid::new_v4()),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
