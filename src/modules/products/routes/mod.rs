use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use trove_db::{Database, Document};
use trove_http::{error::AppError, placeholder::NotYetImplemented};

use super::models::{NewProduct, COLLECTION};

/// HTTP routes for the Products module, backed by `db`.
pub fn router(db: Database) -> Router {
    Router::new()
        .route("/", get(get_all_products).post(create_product))
        .route(
            "/{id}",
            get(get_product_by_id)
                .put(update_product)
                .delete(delete_product),
        )
        .with_state(db)
}

// GET /api/products
async fn get_all_products() -> NotYetImplemented {
    NotYetImplemented("getAllProducts")
}

// POST /api/products
//
// Failures answer `{"error": ...}` without the `message` field the other resources send.
async fn create_product(
    State(db): State<Database>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Document>), AppError> {
    let Json(product) = body.map_err(|rejection| AppError::create_failed(rejection.body_text()))?;

    let product = db
        .create(COLLECTION, product.into_fields())
        .await
        .map_err(AppError::create_failed)?;

    tracing::info!(id = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

// GET /api/products/{id}
async fn get_product_by_id() -> NotYetImplemented {
    NotYetImplemented("getProductById")
}

// PUT /api/products/{id}
async fn update_product() -> NotYetImplemented {
    NotYetImplemented("updateProduct")
}

// DELETE /api/products/{id}
async fn delete_product() -> NotYetImplemented {
    NotYetImplemented("deleteProduct")
}
