use axum::extract::State;

use crate::{
    book::BookUpdate,
    error::{ApiError, BookNotFoundError, ErrorVerbosityProvider},
    extractor::validated::Validated,
    state::ApiState,
};

use super::MessageResponse;

/// Replaces title, author and description of the book named by `bookId` in the body.
///
/// Only a confirmation message is returned, not the updated book.
pub async fn update_book(
    State(state): State<ApiState>,
    Validated(update): Validated<BookUpdate>,
) -> Result<MessageResponse, ApiError> {
    let book_id = update.book_id;
    let updated = state.books()?.update(book_id, update.fields);

    match updated {
        Ok(_) => {
            tracing::info!(book_id, "Book updated");

            Ok(MessageResponse {
                message: format!("Book updated successfully (Book ID: {book_id})"),
            })
        }
        Err(err) => {
            tracing::warn!(%err, "Book not updated");

            Err(BookNotFoundError::new(state.error_verbosity(), book_id).into())
        }
    }
}
