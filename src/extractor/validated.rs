use axum::{
    async_trait,
    extract::{FromRequest, Json as AxumJson, Request},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;

use crate::{
    book::{validator, BookPayload},
    error::{ApiError, BodyError, ErrorVerbosityProvider, MissingFieldsError},
};

/// Extracts a book payload from a JSON body.
///
/// The raw body is first checked for the required book fields, then deserialized into `T`.
/// Rejects with [`MissingFieldsError`] naming `T::SUBJECT`, or with [`BodyError`] if the body
/// is not JSON or a field has the wrong type.
pub struct Validated<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Validated<T>
where
    T: BookPayload + DeserializeOwned + JsonSchema + Debug + Send,
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "validated_extractor", skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let verbosity = state.error_verbosity();

        let value = match AxumJson::<Value>::from_request(req, state).await {
            Ok(json) => json.0,
            Err(json_rejection) => {
                tracing::warn!(rejection=?json_rejection, "Rejection");

                return Err(BodyError::for_payload::<T>(verbosity, json_rejection.body_text())?.into());
            }
        };

        if let Err(missing) = validator::validate(&value) {
            tracing::warn!(missing_fields=?missing.0, "Validation errors");

            return Err(MissingFieldsError::new(verbosity, T::SUBJECT, missing.0).into());
        }

        match serde_json::from_value::<T>(value) {
            Ok(payload) => {
                tracing::trace!(?payload, "Validated");

                Ok(Validated(payload))
            }
            Err(err) => {
                tracing::warn!(%err, "Rejection");

                Err(BodyError::for_payload::<T>(verbosity, err.to_string())?.into())
            }
        }
    }
}
