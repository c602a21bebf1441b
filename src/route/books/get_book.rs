use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    book::Book,
    error::{ApiError, BookNotFoundError, ErrorVerbosityProvider},
    extractor::path::ApiPath,
    state::ApiState,
};

use super::BookIdPath;

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct GetBookResponse {
    pub book: Book,
}

impl IntoResponse for GetBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Looks up a single book.
///
/// A miss answers with a summary of the available books so the caller can pick another id.
pub async fn get_book(
    ApiPath(path): ApiPath<BookIdPath>,
    State(state): State<ApiState>,
) -> Result<GetBookResponse, ApiError> {
    let books = state.books()?;

    match path.parsed().and_then(|book_id| books.get_by_id(book_id)) {
        Some(book) => Ok(GetBookResponse { book: book.clone() }),
        None => {
            tracing::warn!(book_id = %path.book_id, "Book not found");

            Err(BookNotFoundError::new(state.error_verbosity(), &path.book_id)
                .with_available_books(books.summary())
                .into())
        }
    }
}
