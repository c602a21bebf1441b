use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub mod app;
pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;
pub mod update_book;

/// The `bookId` path segment, kept raw so that a non-numeric id is an unknown book.
#[derive(Debug, Deserialize)]
pub struct BookIdPath {
    #[serde(rename = "bookId")]
    pub book_id: String,
}

impl BookIdPath {
    pub fn parsed(&self) -> Option<i64> {
        self.book_id.trim().parse().ok()
    }
}

/// A `200 OK` carrying only a message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
