use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    book::{repository::RepositoryError, Book, NewBook},
    error::{ApiError, DuplicateTitleError, ErrorVerbosityProvider, InternalError},
    extractor::validated::Validated,
    state::ApiState,
};

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CreateBookResponse {
    pub book: Book,
}

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

pub async fn create_book(
    State(state): State<ApiState>,
    Validated(new_book): Validated<NewBook>,
) -> Result<CreateBookResponse, ApiError> {
    let verbosity = state.error_verbosity();
    let inserted = state.books()?.insert(new_book.fields);

    match inserted {
        Ok(book) => {
            tracing::info!(book_id = book.book_id, title = %book.title, "Book created");

            Ok(CreateBookResponse { book })
        }
        Err(RepositoryError::DuplicateTitle(title)) => {
            tracing::warn!(%title, "Duplicate title");

            Err(DuplicateTitleError::new(verbosity, title).into())
        }
        Err(err @ (RepositoryError::NotFound(_) | RepositoryError::IdsExhausted)) => {
            Err(InternalError::from_generic_error(verbosity, err).into())
        }
    }
}
