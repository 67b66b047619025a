use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::web::{success, ApiError};
use super::AppState;
use crate::domain::Product;

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest("invalid id".into()))
}

/// Accepts `[1,2,3]` or `1,2,3`.
fn parse_id_list(raw: &str) -> Result<Vec<i64>, ApiError> {
    raw.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(parse_id)
        .collect()
}

fn json_body(body: Result<Json<Product>, JsonRejection>) -> Result<Product, ApiError> {
    body.map(|Json(product)| product)
        .map_err(|_| ApiError::BadRequest("invalid json".into()))
}

pub async fn ping() -> &'static str {
    "pong"
}

pub async fn get_all(State(state): State<AppState>) -> Result<Response, ApiError> {
    let products = state.client.get_all().await?;
    Ok(success(StatusCode::OK, products))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let product = state.client.get_by_id(id).await?;
    Ok(success(StatusCode::OK, product))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let price = params
        .get("priceGt")
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .ok_or_else(|| ApiError::BadRequest("invalid price".into()))?;
    let products = state.client.search_price_gt(price).await?;
    Ok(success(StatusCode::OK, products))
}

pub async fn consumer_price(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let ids = parse_id_list(params.get("list").map(String::as_str).unwrap_or_default())?;
    let priced = state.client.consumer_price(ids).await?;
    Ok((StatusCode::OK, Json(priced)).into_response())
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Product>, JsonRejection>,
) -> Result<Response, ApiError> {
    let product = json_body(body)?;
    let created = state.client.create(product).await?;
    Ok(success(StatusCode::CREATED, created))
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Product>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let product = json_body(body)?;
    let replaced = state.client.replace_product(id, product).await?;
    Ok(success(StatusCode::OK, replaced))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Product>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let product = json_body(body)?;
    let updated = state.client.update_product(id, product).await?;
    Ok(success(StatusCode::OK, updated))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    state.client.delete(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
