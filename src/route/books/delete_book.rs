use axum::extract::State;

use crate::{
    error::{ApiError, BookNotFoundError, ErrorVerbosityProvider},
    extractor::path::ApiPath,
    state::ApiState,
};

use super::{BookIdPath, MessageResponse};

pub async fn delete_book(
    ApiPath(path): ApiPath<BookIdPath>,
    State(state): State<ApiState>,
) -> Result<MessageResponse, ApiError> {
    let Some(book_id) = path.parsed() else {
        tracing::warn!(book_id = %path.book_id, "Book id is not an integer");

        return Err(BookNotFoundError::new(state.error_verbosity(), &path.book_id).into());
    };

    let deleted = state.books()?.delete(book_id);

    match deleted {
        Ok(book) => {
            tracing::info!(book_id, title = %book.title, "Book deleted");

            Ok(MessageResponse {
                message: format!("Book delete successfully (Book ID: {book_id})"),
            })
        }
        Err(err) => {
            tracing::warn!(%err, "Book not deleted");

            Err(BookNotFoundError::new(state.error_verbosity(), book_id).into())
        }
    }
}
