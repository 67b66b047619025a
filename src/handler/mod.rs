//! HTTP transport: routes, authentication, request logging and the JSON
//! envelopes around [`ProductClient`] calls.

mod middleware;
mod product;
pub mod web;

pub use middleware::TOKEN_HEADER;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::clients::ProductClient;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub client: ProductClient,
    pub token: Arc<str>,
}

impl AppState {
    pub fn new(client: ProductClient, token: impl Into<Arc<str>>) -> Self {
        Self { client, token: token.into() }
    }
}

pub fn router(state: AppState) -> Router {
    let products = Router::new()
        .route("/", get(product::get_all).post(product::create))
        .route("/search", get(product::search))
        .route("/consumer_price", get(product::consumer_price))
        .route(
            "/:id",
            get(product::get_by_id)
                .put(product::replace)
                .patch(product::update)
                .delete(product::delete),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::authenticate,
        ));

    Router::new()
        .route("/ping", get(product::ping))
        .nest("/products", products)
        .layer(axum::middleware::from_fn(middleware::log_request))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::web::{DataResponse, ErrorResponse};
    use super::*;
    use crate::domain::{ConsumerPrice, Product};
    use crate::error::ProductError;
    use crate::mock_framework::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    const TOKEN: &str = "s3cret";

    fn app() -> (Router, tokio::sync::mpsc::Receiver<crate::messages::ProductRequest>) {
        let (client, receiver) = create_mock_client(10);
        (router(AppState::new(client, TOKEN)), receiver)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).header(TOKEN_HEADER, TOKEN).body(Body::empty()).unwrap()
    }

    fn with_json(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(TOKEN_HEADER, TOKEN)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read<T: DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn cola() -> Product {
        Product::new("Cola", 6, "COLA", true, "01/01/2031", 1.5).with_id(1)
    }

    #[tokio::test]
    async fn ping_needs_no_token() {
        let (app, _rx) = app();
        let request = Request::builder().uri("/ping").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn products_require_the_token() {
        let (app, _rx) = app();

        let request = Request::builder().uri("/products").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = read(response).await;
        assert_eq!(body.message, "token not found");

        let request = Request::builder()
            .uri("/products")
            .header(TOKEN_HEADER, "wrong")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let body: ErrorResponse = read(response).await;
        assert_eq!(body.status, 401);
        assert_eq!(body.code, "Unauthorized");
        assert_eq!(body.message, "invalid token");
    }

    #[tokio::test]
    async fn get_all_wraps_products_in_data() {
        let (app, mut rx) = app();
        let responder = tokio::spawn(async move {
            let respond_to = expect_get_all(&mut rx).await.expect("Expected GetAll request");
            respond_to.send(Ok(vec![cola()])).unwrap();
        });

        let response = app.oneshot(get("/products")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: DataResponse<Vec<Product>> = read(response).await;
        assert_eq!(body.data, vec![cola()]);
        responder.await.unwrap();
    }

    #[tokio::test]
    async fn malformed_id_is_rejected_before_the_actor() {
        let (app, mut rx) = app();
        let response = app.oneshot(get("/products/abc")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = read(response).await;
        assert_eq!(body.message, "invalid id");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn missing_product_is_404() {
        let (app, mut rx) = app();
        tokio::spawn(async move {
            let (id, respond_to) = expect_get_by_id(&mut rx).await.expect("Expected GetById request");
            respond_to.send(Err(ProductError::NotFound(id))).unwrap();
        });

        let response = app.oneshot(get("/products/8")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = read(response).await;
        assert_eq!(body.message, "product 8 not found");
    }

    #[tokio::test]
    async fn search_parses_price_and_maps_empty_to_404() {
        let (app, mut rx) = app();
        tokio::spawn(async move {
            let (price, respond_to) = expect_search(&mut rx).await.expect("Expected Search request");
            assert_eq!(price, 99.5);
            respond_to.send(Err(ProductError::NoProductsFound)).unwrap();
        });

        let response = app.clone().oneshot(get("/products/search?priceGt=99.5")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app.oneshot(get("/products/search?priceGt=cheap")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn consumer_price_returns_products_and_total() {
        let (app, mut rx) = app();
        tokio::spawn(async move {
            let (ids, respond_to) =
                expect_consumer_price(&mut rx).await.expect("Expected ConsumerPrice request");
            assert_eq!(ids, vec![1, 1]);
            let priced = ConsumerPrice {
                products: vec![Product { quantity: 4, ..cola() }],
                total_price: 3.63,
            };
            respond_to.send(Ok(priced)).unwrap();
        });

        let response = app
            .oneshot(get("/products/consumer_price?list=%5B1,1%5D"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = read(response).await;
        assert_eq!(body["total_price"], 3.63);
        assert_eq!(body["products"][0]["quantity"], 4);
    }

    #[tokio::test]
    async fn create_forwards_the_body_and_maps_rejections() {
        let (app, mut rx) = app();

        let response = app
            .clone()
            .oneshot(with_json("POST", "/products", "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(rx.try_recv().is_err());

        tokio::spawn(async move {
            let (product, respond_to) = expect_create(&mut rx).await.expect("Expected Create request");
            assert!(product.code_value.is_empty());
            respond_to
                .send(Err(ProductError::Validation("code_value can't be empty".into())))
                .unwrap();

            let (product, respond_to) = expect_create(&mut rx).await.expect("Expected Create request");
            respond_to.send(Ok(product.with_id(1))).unwrap();
        });

        let response = app
            .clone()
            .oneshot(with_json("POST", "/products", r#"{"name":"Cola","price":1.5}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = read(response).await;
        assert_eq!(body["message"], "code_value can't be empty");

        let body = serde_json::to_string(&Product { id: 0, ..cola() }).unwrap();
        let response = app.oneshot(with_json("POST", "/products", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: DataResponse<Product> = read(response).await;
        assert_eq!(created.data, cola());
    }

    #[tokio::test]
    async fn patch_forwards_partial_product() {
        let (app, mut rx) = app();
        tokio::spawn(async move {
            let (id, product, respond_to) = expect_update(&mut rx).await.expect("Expected Update request");
            assert_eq!(id, 1);
            assert_eq!(product.price, 2.0);
            assert!(product.name.is_empty());
            respond_to.send(Ok(Product { price: 2.0, ..cola() })).unwrap();
        });

        let response = app
            .oneshot(with_json("PATCH", "/products/1", r#"{"price":2.0}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: DataResponse<Product> = read(response).await;
        assert_eq!(body.data.price, 2.0);
    }

    #[tokio::test]
    async fn delete_answers_no_content() {
        let (app, mut rx) = app();
        tokio::spawn(async move {
            let (id, respond_to) = expect_delete(&mut rx).await.expect("Expected Delete request");
            assert_eq!(id, 3);
            respond_to.send(Ok(())).unwrap();
        });

        let request = Request::builder()
            .method("DELETE")
            .uri("/products/3")
            .header(TOKEN_HEADER, TOKEN)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
