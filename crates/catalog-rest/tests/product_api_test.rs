//! HTTP-level tests for the product API.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use catalog_config::AppConfig;
use catalog_core::{CatalogError, CatalogResult, ListQuery, NewProduct, Product, ProductId};
use catalog_repository::ProductRepository;
use catalog_rest::{create_router_with_state, AppState};
use catalog_service::{InMemoryCacheService, ProductServiceImpl};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// In-memory product store for testing.
#[derive(Default)]
struct InMemoryProductRepository {
    products: Mutex<BTreeMap<i64, Product>>,
    unavailable: bool,
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: &NewProduct) -> CatalogResult<Product> {
        if self.unavailable {
            return Err(CatalogError::Database("connection refused".to_string()));
        }
        let mut products = self.products.lock().unwrap();
        let id = products.keys().next_back().copied().unwrap_or(0) + 1;
        let product = product.clone().into_product(ProductId::new(id));
        products.insert(id, product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: ProductId) -> CatalogResult<Product> {
        if self.unavailable {
            return Err(CatalogError::Database("connection refused".to_string()));
        }
        self.products
            .lock()
            .unwrap()
            .get(&id.into_inner())
            .cloned()
            .ok_or_else(|| CatalogError::not_found("Product", id))
    }

    async fn query(&self, query: &ListQuery) -> CatalogResult<(Vec<Product>, u64)> {
        if self.unavailable {
            return Err(CatalogError::Database("connection refused to 10.0.0.5".to_string()));
        }
        let needle = query.search.to_lowercase();
        let mut matches: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .values()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.id.cmp(&a.id));

        let total = matches.len() as u64;
        let page = matches
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .collect();
        Ok((page, total))
    }
}

fn app_with(repository: InMemoryProductRepository, config: &AppConfig) -> Router {
    let service =
        ProductServiceImpl::new(Arc::new(repository), Arc::new(InMemoryCacheService::new()));
    create_router_with_state(AppState::new(Arc::new(service)), config)
}

fn app() -> Router {
    app_with(InMemoryProductRepository::default(), &AppConfig::default())
}

fn product_body(name: &str) -> Value {
    json!({
        "name": name,
        "price": 5_000_000,
        "description": "55 inch OLED",
        "quantity": 3,
        "created_by": "admin"
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: &Router, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/products")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn test_create_then_get_product() {
    let app = app();

    let (status, body) = post(&app, &product_body("LG TV")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "LG TV");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = get(&app, &format!("/api/v1/products/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["price"], 5_000_000);
}

#[tokio::test]
async fn test_create_accepts_zero_price_and_quantity() {
    let app = app();
    let mut body = product_body("Sample");
    body["price"] = json!(0);
    body["quantity"] = json!(0);

    let (status, _) = post(&app, &body).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_with_missing_fields_is_rejected() {
    let app = app();

    let (status, body) = post(&app, &json!({ "name": "LG TV", "description": " " })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["created_by", "description", "price", "quantity"]);
}

#[tokio::test]
async fn test_create_with_malformed_json_is_rejected() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/products")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_JSON");
}

#[tokio::test]
async fn test_get_product_invalid_and_missing_ids() {
    let app = app();

    let (status, body) = get(&app, "/api/v1/products/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = get(&app, "/api/v1/products/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_list_products_with_pagination_metadata() {
    let app = app();
    for name in ["LG TV", "LG Monitor", "Sony Camera"] {
        post(&app, &product_body(name)).await;
    }

    let (status, body) = get(&app, "/api/v1/products?search=lg&page=2&limit=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["metadata"]["page"], 2);
    assert_eq!(body["metadata"]["limit"], 1);
    assert_eq!(body["metadata"]["total"], 2);
    assert_eq!(body["metadata"]["next_page"], false);
    assert_eq!(body["metadata"]["prev_page"], true);
}

#[tokio::test]
async fn test_list_products_invalid_paging_falls_back_to_defaults() {
    let app = app();
    post(&app, &product_body("LG TV")).await;

    let (status, body) = get(&app, "/api/v1/products?page=abc&limit=-4&sort=bogus").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["page"], 1);
    assert_eq!(body["metadata"]["limit"], 10);
}

#[tokio::test]
async fn test_created_product_appears_in_previously_cached_listing() {
    let app = app();
    post(&app, &product_body("LG Soundbar")).await;

    let (_, before) = get(&app, "/api/v1/products?search=LG").await;
    assert_eq!(before["metadata"]["total"], 1);

    post(&app, &product_body("LG TV")).await;

    let (_, after) = get(&app, "/api/v1/products?search=LG").await;
    assert_eq!(after["metadata"]["total"], 2);
    let names: Vec<&str> = after["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"LG TV"));
}

#[tokio::test]
async fn test_store_failure_hides_detail() {
    let repository = InMemoryProductRepository {
        unavailable: true,
        ..Default::default()
    };
    let app = app_with(repository, &AppConfig::default());

    let (status, body) = get(&app, "/api/v1/products").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "DATABASE_ERROR");
    assert_eq!(body["error"]["message"], "internal server error");
}

#[tokio::test]
async fn test_rate_limit_per_client() {
    let mut config = AppConfig::default();
    config.server.rate_limit_per_second = 2;
    let app = app_with(InMemoryProductRepository::default(), &config);

    let request = |client: &str| {
        Request::builder()
            .uri("/api/v1/products")
            .header("x-forwarded-for", client)
            .body(Body::empty())
            .unwrap()
    };

    assert_eq!(send(&app, request("203.0.113.1")).await.0, StatusCode::OK);
    assert_eq!(send(&app, request("203.0.113.1")).await.0, StatusCode::OK);

    let (status, body) = send(&app, request("203.0.113.1")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"]["code"], "RATE_LIMIT_EXCEEDED");

    assert_eq!(send(&app, request("198.51.100.7")).await.0, StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_is_generated_or_propagated() {
    let app = app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/live").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/live")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    assert_eq!(get(&app, "/ready").await.0, StatusCode::OK);
    assert_eq!(get(&app, "/live").await.0, StatusCode::OK);
}

#[tokio::test]
async fn test_root_banner() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Catalog API v1");
}

#[tokio::test]
async fn test_openapi_hidden_in_production() {
    let (status, body) = get(&app(), "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/products").is_some());

    let mut config = AppConfig::default();
    config.app.environment = "production".to_string();
    let app = app_with(InMemoryProductRepository::default(), &config);
    assert_eq!(get(&app, "/api-docs/openapi.json").await.0, StatusCode::NOT_FOUND);
}
