use schemars::JsonSchema;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

pub mod repository;
pub mod seed;
pub mod validator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
}

impl Book {
    pub fn new(book_id: i64, fields: BookFields) -> Self {
        Self {
            book_id,
            title: fields.title,
            author: fields.author,
            description: fields.description,
        }
    }
}

/// The mutable part of a [`Book`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub description: String,
}

/// Payload of a create request.
///
/// `bookId` has to be present in the request body, but the repository assigns the id,
/// so its value is never read.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NewBook {
    #[serde(flatten)]
    pub fields: BookFields,
}

/// Payload of an update request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdate {
    #[serde(deserialize_with = "integer_or_numeric_string")]
    #[schemars(with = "i64")]
    pub book_id: i64,
    #[serde(flatten)]
    pub fields: BookFields,
}

/// Accepts `1` as well as `"1"`.
fn integer_or_numeric_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawBookId {
        Integer(i64),
        Text(String),
    }

    match RawBookId::deserialize(deserializer)? {
        RawBookId::Integer(book_id) => Ok(book_id),
        RawBookId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("bookId `{text}` is not an integer"))),
    }
}

/// A request body that must carry every required book field.
pub trait BookPayload {
    /// Names the payload in missing field messages.
    const SUBJECT: &'static str;
}

impl BookPayload for NewBook {
    const SUBJECT: &'static str = "New book";
}

impl BookPayload for BookUpdate {
    const SUBJECT: &'static str = "Book";
}
