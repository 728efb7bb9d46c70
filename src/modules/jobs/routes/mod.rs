use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use trove_db::{Database, Document};
use trove_http::{error::AppError, placeholder::NotYetImplemented};

use super::models::{NewJob, COLLECTION};

const CREATE_FAILED: &str = "Failed to create job";

/// HTTP routes for the Jobs module, backed by `db`.
pub fn router(db: Database) -> Router {
    Router::new()
        .route("/", get(get_all_jobs).post(create_job))
        .route("/{id}", get(get_job_by_id).put(update_job).delete(delete_job))
        .with_state(db)
}

// GET /jobs
async fn get_all_jobs() -> NotYetImplemented {
    NotYetImplemented("getAllJobs")
}

// POST /jobs
async fn create_job(
    State(db): State<Database>,
    body: Result<Json<NewJob>, JsonRejection>,
) -> Result<(StatusCode, Json<Document>), AppError> {
    let Json(NewJob(fields)) = body.map_err(|rejection| {
        AppError::create_failed_with(CREATE_FAILED, rejection.body_text())
    })?;

    let job = db
        .create(COLLECTION, fields)
        .await
        .map_err(|err| AppError::create_failed_with(CREATE_FAILED, err))?;

    tracing::info!(id = %job.id, "job created");
    Ok((StatusCode::CREATED, Json(job)))
}

// GET /jobs/{id}
async fn get_job_by_id() -> NotYetImplemented {
    NotYetImplemented("getJobById")
}

// PUT /jobs/{id}
async fn update_job() -> NotYetImplemented {
    NotYetImplemented("updateJob")
}

// DELETE /jobs/{id}
async fn delete_job() -> NotYetImplemented {
    NotYetImplemented("deleteJob")
}
