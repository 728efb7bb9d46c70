use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use trove_db::{Database, Document};
use trove_http::{error::AppError, placeholder::NotYetImplemented};

use super::models::{NewBook, COLLECTION};

const CREATE_FAILED: &str = "Failed to create book";

/// HTTP routes for the Books module, backed by `db`.
pub fn router(db: Database) -> Router {
    Router::new()
        .route("/", get(get_all_books).post(create_book))
        .route(
            "/{id}",
            get(get_book_by_id).put(update_book).delete(delete_book),
        )
        .with_state(db)
}

// GET /books
async fn get_all_books() -> NotYetImplemented {
    NotYetImplemented("getAllBooks")
}

// POST /books
async fn create_book(
    State(db): State<Database>,
    body: Result<Json<NewBook>, JsonRejection>,
) -> Result<(StatusCode, Json<Document>), AppError> {
    let Json(NewBook(fields)) = body.map_err(|rejection| {
        AppError::create_failed_with(CREATE_FAILED, rejection.body_text())
    })?;

    let book = db
        .create(COLLECTION, fields)
        .await
        .map_err(|err| AppError::create_failed_with(CREATE_FAILED, err))?;

    tracing::info!(id = %book.id, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

// GET /books/{id}
async fn get_book_by_id() -> NotYetImplemented {
    NotYetImplemented("getBookById")
}

// PUT /books/{id}
async fn update_book() -> NotYetImplemented {
    NotYetImplemented("updateBook")
}

// DELETE /books/{id}
async fn delete_book() -> NotYetImplemented {
    NotYetImplemented("deleteBook")
}
