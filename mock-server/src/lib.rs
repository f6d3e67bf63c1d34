use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::Multipart,
    http::{HeaderMap, StatusCode},
    response::Redirect,
    routing::{any, get, post},
    Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;

pub fn app() -> Router {
    Router::new()
        .route("/", any(root))
        .route("/echo_body", post(echo_body))
        .route("/file_upload", post(file_upload))
        .route("/files_upload", post(files_upload))
        .route("/echo_headers", get(echo_headers))
        .route("/json_url", get(echo_json).post(echo_json))
        .route("/redirect", get(redirect))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn root() -> Json<u16> {
    Json(200)
}

/// Returns the raw request body as a JSON string.
async fn echo_body(body: Bytes) -> Json<String> {
    Json(String::from_utf8_lossy(&body).into_owned())
}

async fn file_upload(multipart: Multipart) -> Result<Json<usize>, StatusCode> {
    let sizes = field_sizes(multipart).await?;
    sizes
        .get("file")
        .copied()
        .map(Json)
        .ok_or(StatusCode::UNPROCESSABLE_ENTITY)
}

async fn files_upload(multipart: Multipart) -> Result<Json<usize>, StatusCode> {
    let sizes = field_sizes(multipart).await?;
    match (sizes.get("file"), sizes.get("file1")) {
        (Some(file), Some(file1)) => Ok(Json(file + file1)),
        _ => Err(StatusCode::UNPROCESSABLE_ENTITY),
    }
}

/// Byte length of every multipart field, keyed by field name.
async fn field_sizes(mut multipart: Multipart) -> Result<HashMap<String, usize>, StatusCode> {
    let mut sizes = HashMap::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let name = field.name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        sizes.insert(name, bytes.len());
    }
    Ok(sizes)
}

/// Request headers as a JSON object with lowercase names.
async fn echo_headers(headers: HeaderMap) -> Json<HashMap<String, String>> {
    Json(
        headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect(),
    )
}

async fn echo_json(Json(value): Json<Value>) -> Json<Value> {
    Json(value)
}

async fn redirect() -> Redirect {
    Redirect::to("/")
}
