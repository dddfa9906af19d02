use std::fmt;

use schemars::JsonSchema;
use serde::{
    de::{self, IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};

/// A book record.
///
/// Serialized as `{"bookId": <integer>, "title": <string>}`.
/// Field names are matched case-insensitively on deserialization, unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Book {
    #[serde(rename = "bookId")]
    pub id: i32,
    pub title: String,
}

impl Book {
    pub fn new(id: i32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    /// The five books the collection is reset to.
    pub fn seed() -> Vec<Book> {
        (1..=5)
            .map(|id| Book::new(id, format!("Awesome book #{id}")))
            .collect()
    }
}

const FIELDS: &[&str] = &["bookId", "title"];

enum BookField {
    Id,
    Title,
    Ignored,
}

impl<'de> Deserialize<'de> for BookField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BookFieldVisitor;

        impl<'de> Visitor<'de> for BookFieldVisitor {
            type Value = BookField;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a book field name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value.eq_ignore_ascii_case("bookId") {
                    Ok(BookField::Id)
                } else if value.eq_ignore_ascii_case("title") {
                    Ok(BookField::Title)
                } else {
                    Ok(BookField::Ignored)
                }
            }
        }

        deserializer.deserialize_identifier(BookFieldVisitor)
    }
}

impl<'de> Deserialize<'de> for Book {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BookVisitor;

        impl<'de> Visitor<'de> for BookVisitor {
            type Value = Book;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a book object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut id = None;
                let mut title = None;

                while let Some(field) = map.next_key::<BookField>()? {
                    match field {
                        BookField::Id => {
                            if id.is_some() {
                                return Err(de::Error::duplicate_field("bookId"));
                            }
                            id = Some(map.next_value()?);
                        }
                        BookField::Title => {
                            if title.is_some() {
                                return Err(de::Error::duplicate_field("title"));
                            }
                            title = Some(map.next_value()?);
                        }
                        BookField::Ignored => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }

                let id = id.ok_or_else(|| de::Error::missing_field("bookId"))?;
                let title = title.ok_or_else(|| de::Error::missing_field("title"))?;

                Ok(Book { id, title })
            }
        }

        deserializer.deserialize_struct("Book", FIELDS, BookVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_five_numbered_books() {
        let seed = Book::seed();

        assert_eq!(seed.len(), 5);
        assert_eq!(seed[0], Book::new(1, "Awesome book #1"));
        assert_eq!(seed[4], Book::new(5, "Awesome book #5"));
    }

    #[test]
    fn serializes_with_camel_case_id() {
        let json = serde_json::to_value(Book::new(6, "Awesome book #6")).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "bookId": 6, "title": "Awesome book #6" })
        );
    }

    #[test]
    fn field_names_are_case_insensitive() {
        for raw in [
            r#"{"bookId": 3, "title": "Three"}"#,
            r#"{"BookId": 3, "Title": "Three"}"#,
            r#"{"BOOKID": 3, "TITLE": "Three"}"#,
        ] {
            let book: Book = serde_json::from_str(raw).unwrap();
            assert_eq!(book, Book::new(3, "Three"));
        }
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let book: Book =
            serde_json::from_str(r#"{"bookId": 1, "title": "One", "author": {"name": "x"}}"#)
                .unwrap();

        assert_eq!(book, Book::new(1, "One"));
    }

    #[test]
    fn missing_and_duplicate_fields_are_rejected() {
        let missing = serde_json::from_str::<Book>(r#"{"bookId": 1}"#).unwrap_err();
        assert!(missing.to_string().contains("missing field `title`"));

        let duplicate =
            serde_json::from_str::<Book>(r#"{"bookId": 1, "BookId": 2, "title": "x"}"#)
                .unwrap_err();
        assert!(duplicate.to_string().contains("duplicate field `bookId`"));
    }
}
