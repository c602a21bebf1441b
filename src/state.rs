use std::{
    ops::Deref,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{
    book::repository::BookRepository,
    error::{ErrorVerbosity, ErrorVerbosityProvider, InternalError},
};

#[derive(Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    pub fn new(error_verbosity: ErrorVerbosity, books: BookRepository) -> Self {
        Self {
            inner: Arc::new(ApiStateInner {
                error_verbosity,
                books: Mutex::new(books),
            }),
        }
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct ApiStateInner {
    error_verbosity: ErrorVerbosity,
    books: Mutex<BookRepository>,
}

impl ApiStateInner {
    /// Locks the book repository.
    ///
    /// The guard must be dropped before the handler awaits anything.
    pub fn books(&self) -> Result<MutexGuard<'_, BookRepository>, InternalError> {
        self.books.lock().map_err(|err| {
            InternalError::from_generic_error(
                self.error_verbosity,
                format!("Book store is unavailable: {err}"),
            )
        })
    }
}

impl ErrorVerbosityProvider for ApiState {
    fn error_verbosity(&self) -> ErrorVerbosity {
        self.error_verbosity
    }
}
