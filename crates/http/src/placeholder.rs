//! Responses for routes that are declared but not implemented yet.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// A route without behavior. Answers 200 with the route's fixed label as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotYetImplemented(pub &'static str);

impl IntoResponse for NotYetImplemented {
    fn into_response(self) -> Response {
        tracing::debug!(route = self.0, "placeholder route hit");
        (StatusCode::OK, self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn answers_ok_with_label() {
        let response = NotYetImplemented("getAllBooks").into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"getAllBooks");
    }
}
