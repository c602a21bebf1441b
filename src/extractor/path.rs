use axum::{
    async_trait,
    extract::{FromRequestParts, Path as AxumPath},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::error::{ApiError, ErrorVerbosityProvider, PathError};

/// A Wrapper around [`axum::extract::Path`] that rejects with an [`ApiError`].
///
/// `/books/abc` is a bad request rather than an unknown book.
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Debug + Send,
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "path_extractor", skip_all)]
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AxumPath(params) = AxumPath::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::warn!(?rejection, "Rejection");

                PathError::from_path_rejection(state.error_verbosity(), rejection)
            })?;

        tracing::trace!(?params, "Extracted");

        Ok(ApiPath(params))
    }
}
