//! Handler tests for Products domain
//!
//! These drive the products router with in-memory storage and a temporary
//! uploads directory:
//! - JSON and multipart request bodies
//! - HTTP status codes and the error envelope
//! - Partial updates and image handling

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

const BOUNDARY: &str = "shop-test-boundary";
const MAX_UPLOAD: usize = 1024 * 1024;

struct TestApp {
    router: Router,
    uploads: TempDir,
}

fn app() -> TestApp {
    let uploads = tempfile::tempdir().unwrap();
    let service = ProductService::new(
        InMemoryProductRepository::new(),
        DiskImageStore::new(uploads.path()),
    );
    TestApp {
        router: handlers::router(service, MAX_UPLOAD),
        uploads,
    }
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart_request(method: &str, uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn create_json(router: &Router, body: Value) -> Product {
    let response = router
        .clone()
        .oneshot(json_request("POST", "/", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

fn lamp(name: &str) -> Value {
    json!({
        "name": name,
        "description": "Warm light",
        "price": 24.5,
        "category": "lighting",
        "quantity": 4
    })
}

#[tokio::test]
async fn test_create_json_then_get_returns_same_fields() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("products_create_get");
    let name = builder.name("product", "lamp");

    let created = create_json(&app.router, lamp(&name)).await;

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", &format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched: Product = json_body(response.into_body()).await;
    assert_eq!(fetched, created);
    assert_eq!(fetched.name, name);
    assert_eq!(fetched.price, 24.5);
    assert_eq!(fetched.quantity, 4);
    assert_eq!(fetched.image_url, None);
}

#[tokio::test]
async fn test_create_json_accepts_zero_price_and_image_url() {
    let app = app();

    let created = create_json(
        &app.router,
        json!({
            "name": "Sticker",
            "description": "Free with any order",
            "price": 0,
            "category": "extras",
            "imageUrl": "https://cdn.example/sticker.png"
        }),
    )
    .await;

    assert_eq!(created.price, 0.0);
    assert_eq!(created.quantity, 0);
    assert_eq!(
        created.image_url.as_deref(),
        Some("https://cdn.example/sticker.png")
    );
}

#[tokio::test]
async fn test_create_json_missing_fields_is_bad_request() {
    let app = app();

    let response = app
        .router
        .oneshot(json_request("POST", "/", json!({ "name": "Lamp" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body["message"],
        "All fields are required: description, price, category"
    );
}

#[tokio::test]
async fn test_create_json_wrong_type_is_bad_request() {
    let app = app();

    let response = app
        .router
        .oneshot(json_request(
            "POST",
            "/",
            json!({
                "name": "Lamp",
                "description": "Warm",
                "price": "cheap",
                "category": "lighting"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_multipart_with_upload() {
    let app = app();

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/",
            &[
                Part::Text("name", "Poster"),
                Part::Text("description", "A3 print"),
                Part::Text("price", "0"),
                Part::Text("category", "prints"),
                Part::File("image", "poster.PNG", b"fake png bytes"),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Product = json_body(response.into_body()).await;
    assert_eq!(created.price, 0.0);

    let url = created.image_url.expect("upload should set imageUrl");
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with(".png"));

    let file_name = url.trim_start_matches("/uploads/");
    let stored = std::fs::read(app.uploads.path().join(file_name)).unwrap();
    assert_eq!(stored, b"fake png bytes");
}

#[tokio::test]
async fn test_identical_uploads_share_a_file() {
    let app = app();

    let mut urls = Vec::new();
    for name in ["First", "Second"] {
        let response = app
            .router
            .clone()
            .oneshot(multipart_request(
                "POST",
                "/",
                &[
                    Part::Text("name", name),
                    Part::Text("description", "Same picture"),
                    Part::Text("price", "3"),
                    Part::Text("category", "prints"),
                    Part::File("image", "pic.jpg", b"same bytes"),
                ],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let product: Product = json_body(response.into_body()).await;
        urls.push(product.image_url.unwrap());
    }

    assert_eq!(urls[0], urls[1]);
    assert_eq!(std::fs::read_dir(app.uploads.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_create_multipart_empty_file_part_means_no_image() {
    let app = app();

    let response = app
        .router
        .oneshot(multipart_request(
            "POST",
            "/",
            &[
                Part::Text("name", "Mug"),
                Part::Text("description", "Ceramic"),
                Part::Text("price", "8"),
                Part::Text("category", "kitchen"),
                Part::File("image", "", b""),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Product = json_body(response.into_body()).await;
    assert_eq!(created.image_url, None);
}

#[tokio::test]
async fn test_create_multipart_bad_price_is_bad_request() {
    let app = app();

    let response = app
        .router
        .oneshot(multipart_request(
            "POST",
            "/",
            &[
                Part::Text("name", "Mug"),
                Part::Text("description", "Ceramic"),
                Part::Text("price", "eight"),
                Part::Text("category", "kitchen"),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_over_limit_is_rejected() {
    let app = app();
    let oversized = vec![7u8; MAX_UPLOAD + 128 * 1024];

    let response = app
        .router
        .oneshot(multipart_request(
            "POST",
            "/",
            &[
                Part::Text("name", "Huge"),
                Part::Text("description", "Too big"),
                Part::Text("price", "1"),
                Part::Text("category", "prints"),
                Part::File("image", "huge.bin", &oversized),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(std::fs::read_dir(app.uploads.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_list_newest_first_and_by_category() {
    let app = app();

    let older = create_json(&app.router, lamp("Older")).await;
    let newer = create_json(&app.router, lamp("Newer")).await;
    create_json(
        &app.router,
        json!({
            "name": "Chair",
            "description": "Oak",
            "price": 80,
            "category": "Lighting-adjacent"
        }),
    )
    .await;

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let all: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(all.len(), 3);

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/category/lighting"))
        .await
        .unwrap();
    let lighting: Vec<Product> = json_body(response.into_body()).await;
    let ids: Vec<_> = lighting.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    let response = app
        .router
        .oneshot(empty_request("GET", "/category/garden"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let none: Vec<Product> = json_body(response.into_body()).await;
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_update_only_price_leaves_other_fields() {
    let app = app();
    let mut body = lamp("Lamp");
    body["imageUrl"] = json!("https://cdn.example/lamp.png");
    let created = create_json(&app.router, body).await;
    assert!(created.image_url.is_some());

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({ "price": 19.99 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Product = json_body(response.into_body()).await;
    assert_eq!(updated.price, 19.99);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.category, created.category);
    assert_eq!(updated.quantity, created.quantity);
    assert_eq!(updated.image_url, created.image_url);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_update_quantity_to_zero_overwrites() {
    let app = app();
    let created = create_json(&app.router, lamp("Lamp")).await;
    assert_eq!(created.quantity, 4);

    let response = app
        .router
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({ "quantity": 0 }),
        ))
        .await
        .unwrap();
    let updated: Product = json_body(response.into_body()).await;
    assert_eq!(updated.quantity, 0);
}

#[tokio::test]
async fn test_update_empty_name_is_rejected_and_unchanged() {
    let app = app();
    let created = create_json(&app.router, lamp("Lamp")).await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({ "name": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let response = app
        .router
        .oneshot(empty_request("GET", &format!("/{}", created.id)))
        .await
        .unwrap();
    let stored: Product = json_body(response.into_body()).await;
    assert_eq!(stored.name, "Lamp");
}

#[tokio::test]
async fn test_update_whitespace_fields_are_rejected_and_unchanged() {
    let app = app();
    let created = create_json(&app.router, lamp("Lamp")).await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({ "name": "   ", "category": " " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let response = app
        .router
        .oneshot(empty_request("GET", &format!("/{}", created.id)))
        .await
        .unwrap();
    let stored: Product = json_body(response.into_body()).await;
    assert_eq!(stored.name, "Lamp");
    assert_eq!(stored.category, "lighting");
}

#[tokio::test]
async fn test_update_multipart_replaces_image() {
    let app = app();
    let created = create_json(&app.router, lamp("Lamp")).await;

    let response = app
        .router
        .oneshot(multipart_request(
            "PUT",
            &format!("/{}", created.id),
            &[Part::File("image", "new.webp", b"new picture")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Product = json_body(response.into_body()).await;
    assert!(updated.image_url.unwrap().ends_with(".webp"));
    assert_eq!(updated.name, "Lamp");
}

#[tokio::test]
async fn test_update_missing_product_is_not_found() {
    let app = app();
    let missing = TestDataBuilder::from_test_name("products_update_missing").id();

    let response = app
        .router
        .oneshot(json_request(
            "PUT",
            &format!("/{missing}"),
            json!({ "price": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let app = app();
    let created = create_json(&app.router, lamp("Lamp")).await;
    let kept = create_json(&app.router, lamp("Desk lamp")).await;
    let uri = format!("/{}", created.id);

    let response = app
        .router
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Product deleted successfully");

    let response = app
        .router
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");

    let response = app
        .router
        .oneshot(empty_request("GET", "/"))
        .await
        .unwrap();
    let all: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(all, vec![kept]);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = app();

    for method in ["GET", "DELETE"] {
        let response = app
            .router
            .clone()
            .oneshot(empty_request(method, "/not-a-uuid"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["error"], "INVALID_UUID");
    }
}
