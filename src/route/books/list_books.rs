use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{book::Book, error::ApiError, state::ApiState};

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ListBooksResponse {
    pub books: Vec<Book>,
}

impl IntoResponse for ListBooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub async fn list_books(State(state): State<ApiState>) -> Result<ListBooksResponse, ApiError> {
    let books = state.books()?.list().to_vec();

    tracing::debug!(count = books.len(), "Listing books");

    Ok(ListBooksResponse { books })
}
