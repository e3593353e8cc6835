//! Mapping of store failures onto HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use bookstore::error::BookStoreError;

/// Error returned by request handlers, rendered as a plain-text body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] BookStoreError),
    /// The request body could not be decoded into a book.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(err) => match err {
                BookStoreError::InvalidArgument(_) | BookStoreError::InvalidIdentifier(_) => {
                    StatusCode::BAD_REQUEST
                }
                BookStoreError::NotFound(_) => StatusCode::NOT_FOUND,
                BookStoreError::Timeout(..)
                | BookStoreError::Storage(_)
                | BookStoreError::Serialization(_)
                | BookStoreError::Initialization(_)
                | BookStoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(%status, error = %self, "request rejected");
        }

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn store_errors_map_to_status_codes() {
        let cases = [
            (BookStoreError::InvalidArgument("q".into()), StatusCode::BAD_REQUEST),
            (BookStoreError::InvalidIdentifier("x".into()), StatusCode::BAD_REQUEST),
            (BookStoreError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                BookStoreError::Timeout("get_book".into(), Duration::from_secs(10)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (BookStoreError::Storage("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (BookStoreError::Serialization("eof".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (BookStoreError::Internal("panic".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn response_carries_message_as_plain_text() {
        let response =
            ApiError::from(BookStoreError::InvalidArgument("Search keyword is required".into()))
                .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(
            response.headers()["content-type"]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );
    }
}
