use std::{borrow::Cow, fmt::Display};

use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use derive_more::From;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ErrorVerbosity {
    /// Server returns only the appropriate status code.
    StatusCode,
    /// Server returns the message with the appropriate status code.
    Message,
    /// Server returns the message, the reason of rejected requests and the expected schema.
    Full,
}

impl ErrorVerbosity {
    pub fn should_generate_message(&self) -> bool {
        matches!(self, ErrorVerbosity::Message | ErrorVerbosity::Full)
    }

    pub fn should_generate_error_reason(&self) -> bool {
        matches!(self, ErrorVerbosity::Full)
    }
}

pub trait ErrorVerbosityProvider {
    fn error_verbosity(&self) -> ErrorVerbosity;
}

#[derive(Debug, Serialize)]
struct ApiErrorResponse {
    message: Cow<'static, str>,
    #[serde(rename = "availableBooks", skip_serializing_if = "Option::is_none")]
    available_books: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(rename = "expectedSchema", skip_serializing_if = "Option::is_none")]
    expected_schema: Option<String>,
}

impl From<ApiError> for ApiErrorResponse {
    fn from(error: ApiError) -> Self {
        let message = error.message();

        let (available_books, reason, expected_schema) = match error {
            ApiError::BookNotFound(err) => (err.available_books, None, None),
            ApiError::Body(err) => (None, err.body_error_reason, err.body_expected_schema),
            ApiError::Path(err) => (None, err.path_error_reason, None),
            _ => (None, None, None),
        };

        ApiErrorResponse {
            message,
            available_books,
            reason,
            expected_schema,
        }
    }
}

/// API error
///
/// Every rejection and every failed book operation ends up here.
#[derive(Debug, From)]
pub enum ApiError {
    /// A required book field is absent from the request body.
    MissingFields(MissingFieldsError),
    /// A book with the same title already exists.
    DuplicateTitle(DuplicateTitleError),
    /// No book with the requested id exists.
    BookNotFound(BookNotFoundError),
    /// The request body is not the expected JSON.
    Body(BodyError),
    /// The path parameters could not be parsed.
    Path(PathError),
    /// The book store failed.
    Internal(InternalError),
    /// No route matches the request.
    NotFound(NotFoundError),
    /// The route exists but not for this method.
    MethodNotAllowed(MethodNotAllowedError),
}

impl ApiError {
    fn verbosity(&self) -> ErrorVerbosity {
        match self {
            ApiError::MissingFields(err) => err.verbosity,
            ApiError::DuplicateTitle(err) => err.verbosity,
            ApiError::BookNotFound(err) => err.verbosity,
            ApiError::Body(err) => err.verbosity,
            ApiError::Path(err) => err.verbosity,
            ApiError::Internal(err) => err.verbosity,
            ApiError::NotFound(err) => err.verbosity,
            ApiError::MethodNotAllowed(err) => err.verbosity,
        }
    }

    fn message(&self) -> Cow<'static, str> {
        match self {
            ApiError::MissingFields(err) => Cow::Owned(format!(
                "{} is missing field(s): {}",
                err.subject,
                err.fields.join("\n")
            )),
            ApiError::DuplicateTitle(err) => Cow::Owned(format!(
                "Error: a book with that title already exists '{}'",
                err.title
            )),
            ApiError::BookNotFound(err) => Cow::Owned(format!(
                "Error: book not found (Book ID: {})",
                err.book_id
            )),
            ApiError::Body(_) => Cow::Borrowed("Failed to parse request body"),
            ApiError::Path(_) => Cow::Borrowed("Failed to parse path parameters"),
            ApiError::Internal(err) => Cow::Owned(err.internal_error.clone()),
            ApiError::NotFound(_) => Cow::Borrowed("The requested resource was not found"),
            ApiError::MethodNotAllowed(_) => Cow::Borrowed("Method not allowed"),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFields(_)
            | ApiError::DuplicateTitle(_)
            | ApiError::Body(_)
            | ApiError::Path(_)
            | ApiError::Internal(_) => StatusCode::BAD_REQUEST,
            ApiError::BookNotFound(_) | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        match self.verbosity().should_generate_message() {
            true => (status_code, Json(ApiErrorResponse::from(self))).into_response(),
            false => status_code.into_response(),
        }
    }
}

#[derive(Debug)]
pub struct MissingFieldsError {
    verbosity: ErrorVerbosity,
    subject: &'static str,
    fields: Vec<&'static str>,
}

impl MissingFieldsError {
    pub fn new(verbosity: ErrorVerbosity, subject: &'static str, fields: Vec<&'static str>) -> Self {
        MissingFieldsError {
            verbosity,
            subject,
            fields,
        }
    }
}

#[derive(Debug)]
pub struct DuplicateTitleError {
    verbosity: ErrorVerbosity,
    title: String,
}

impl DuplicateTitleError {
    pub fn new(verbosity: ErrorVerbosity, title: String) -> Self {
        DuplicateTitleError { verbosity, title }
    }
}

#[derive(Debug)]
pub struct BookNotFoundError {
    verbosity: ErrorVerbosity,
    book_id: String,
    available_books: Option<String>,
}

impl BookNotFoundError {
    /// `book_id` is shown as the caller sent it, so unparsable ids appear verbatim.
    pub fn new(verbosity: ErrorVerbosity, book_id: impl Display) -> Self {
        BookNotFoundError {
            verbosity,
            book_id: book_id.to_string(),
            available_books: None,
        }
    }

    /// Attaches a summary of the books the caller could have asked for.
    pub fn with_available_books(self, available_books: String) -> Self {
        BookNotFoundError {
            available_books: Some(available_books),
            ..self
        }
    }
}

#[derive(Debug)]
pub struct BodyError {
    verbosity: ErrorVerbosity,
    body_error_reason: Option<String>,
    body_expected_schema: Option<String>,
}

impl BodyError {
    /// Builds a body error for a payload of type `T`.
    ///
    /// With [`ErrorVerbosity::Full`] the JSON schema of `T` is rendered as YAML.
    pub fn for_payload<T: JsonSchema>(
        verbosity: ErrorVerbosity,
        body_error_reason: String,
    ) -> Result<Self, InternalError> {
        if !verbosity.should_generate_error_reason() {
            return Ok(BodyError {
                verbosity,
                body_error_reason: None,
                body_expected_schema: None,
            });
        }

        let body_expected_schema = serde_yaml::to_string(&schema_for!(T))
            .map_err(|err| InternalError::from_generic_error(verbosity, err))?;

        Ok(BodyError {
            verbosity,
            body_error_reason: Some(body_error_reason),
            body_expected_schema: Some(body_expected_schema),
        })
    }
}

#[derive(Debug)]
pub struct PathError {
    verbosity: ErrorVerbosity,
    path_error_reason: Option<String>,
}

impl PathError {
    pub fn from_path_rejection(verbosity: ErrorVerbosity, rejection: PathRejection) -> Self {
        let path_error_reason = verbosity
            .should_generate_error_reason()
            .then(|| rejection.body_text());

        PathError {
            verbosity,
            path_error_reason,
        }
    }
}

/// A failure of the server itself. Reported as a bad request carrying the underlying message.
#[derive(Debug)]
pub struct InternalError {
    verbosity: ErrorVerbosity,
    internal_error: String,
}

impl InternalError {
    pub fn from_generic_error<E: Display>(verbosity: ErrorVerbosity, err: E) -> Self {
        let internal_error = err.to_string();
        tracing::error!(%internal_error, "Internal error");

        InternalError {
            verbosity,
            internal_error,
        }
    }
}

#[derive(Debug)]
pub struct NotFoundError {
    verbosity: ErrorVerbosity,
}

impl NotFoundError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        NotFoundError { verbosity }
    }
}

#[derive(Debug)]
pub struct MethodNotAllowedError {
    verbosity: ErrorVerbosity,
}

impl MethodNotAllowedError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        MethodNotAllowedError { verbosity }
    }
}
