use serde_json::Value;

/// Fields every book record must carry, in canonical order.
pub const BOOK_FIELD_NAMES: [&str; 4] = ["bookId", "title", "author", "description"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields(pub Vec<&'static str>);

/// Returns the required fields absent from `record`.
///
/// Only presence is checked: an empty string or `null` counts as present.
/// A record that is not a JSON object misses every field.
pub fn missing_fields(record: &Value) -> Vec<&'static str> {
    match record.as_object() {
        Some(object) => BOOK_FIELD_NAMES
            .into_iter()
            .filter(|field| !object.contains_key(*field))
            .collect(),
        None => BOOK_FIELD_NAMES.to_vec(),
    }
}

pub fn validate(record: &Value) -> Result<(), MissingFields> {
    let missing = missing_fields(record);

    if missing.is_empty() {
        return Ok(());
    }

    Err(MissingFields(missing))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reports_each_missing_field() {
        let no_id = json!({ "title": "Javascript", "author": "Fred", "description": "A programming book" });
        let no_title = json!({ "bookId": -1, "author": "Fred", "description": "A programming book" });
        let no_author = json!({ "bookId": -1, "title": "Javascript", "description": "A programming book" });
        let no_description = json!({ "bookId": -1, "title": "Javascript", "author": "Fred" });

        assert_eq!(missing_fields(&no_id), vec!["bookId"]);
        assert_eq!(missing_fields(&no_title), vec!["title"]);
        assert_eq!(missing_fields(&no_author), vec!["author"]);
        assert_eq!(missing_fields(&no_description), vec!["description"]);
    }

    #[test]
    fn reports_missing_fields_in_canonical_order() {
        let record = json!({ "author": "Roald Dahl", "title": "Fantastic Mr. Fox" });

        assert_eq!(
            validate(&record),
            Err(MissingFields(vec!["bookId", "description"]))
        );
    }

    #[test]
    fn accepts_complete_record() {
        let book = json!({ "bookId": -1, "title": "Javascript", "author": "Fred", "description": "A programming book" });

        assert_eq!(validate(&book), Ok(()));
    }

    #[test]
    fn empty_and_null_values_count_as_present() {
        let book = json!({ "bookId": null, "title": "", "author": "", "description": "" });

        assert!(missing_fields(&book).is_empty());
    }

    #[test]
    fn non_object_misses_everything() {
        assert_eq!(missing_fields(&json!([1, 2, 3])), BOOK_FIELD_NAMES.to_vec());
        assert_eq!(missing_fields(&json!("book")), BOOK_FIELD_NAMES.to_vec());
    }
}
