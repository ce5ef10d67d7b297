//! Domain models shared by the store, the catalog, and the TUI. The intent is
//! that these types stay light-weight data holders: persistence lives in
//! `store`, the list operations in `catalog`, and rendering in `ui`. Keeping
//! the assumptions written down here means the JSON file format can be
//! reconstructed from this module alone.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Status label shown next to books the user has finished.
pub const READ_LABEL: &str = "✅ Read";
/// Status label shown next to books still waiting on the shelf.
pub const UNREAD_LABEL: &str = "📖 Unread";

/// One catalog record. The field names double as the keys of the persisted
/// JSON objects, so renaming a field is a file format change.
///
/// Decoding is deliberately forgiving about what older or hand-edited files
/// contain: a missing key falls back to its default, a text field holding a
/// number (for example `"year": 1965`) is kept as its textual form, and keys
/// this program does not know about are carried along in `extra` so the next
/// save writes them back untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    /// Display title. Also the (soft) key used by removal, which matches it
    /// exactly; titles are not required to be unique.
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    /// Author name as typed. Searchable alongside the title.
    #[serde(deserialize_with = "lenient_text")]
    pub author: String,
    /// Publication year kept as entered. Nothing checks that it is numeric,
    /// so "c. 1600" is as valid as "1965".
    #[serde(deserialize_with = "lenient_text")]
    pub year: String,
    /// Free-form genre label. Only displayed, never filtered on.
    #[serde(deserialize_with = "lenient_text")]
    pub genre: String,
    /// Whether the user has finished the book. Drives the statistics screen.
    #[serde(deserialize_with = "lenient_flag")]
    pub read: bool,
    /// Keys found in the file that the catalog does not use. They are kept so
    /// that rewriting the library never loses data another tool stored.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Book {
    /// Build a record with no extra keys. Mostly useful for tests and
    /// embedders; the UI goes through `NewBook` instead.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            genre: genre.into(),
            read,
            extra: Map::new(),
        }
    }

    /// Human-readable read/unread label.
    pub fn status_label(&self) -> &'static str {
        if self.read {
            READ_LABEL
        } else {
            UNREAD_LABEL
        }
    }
}

impl fmt::Display for Book {
    /// `Title by Author (Year) - Genre - Status`, the line every listing uses.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({}) - {} - {}",
            self.title,
            self.author,
            self.year,
            self.genre,
            self.status_label()
        )
    }
}

/// Accept any JSON value for a text field. Strings pass through, `null`
/// becomes empty, and anything else keeps its JSON spelling (`1965`).
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Accept any JSON value for the read flag, using truthiness: `false`,
/// `null`, zero, and empty strings, arrays, or objects are unread.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::Null => false,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    })
}

/// Raw user input for a new book, before validation. Kept separate from
/// `Book` so an unvalidated record can never reach the library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: String,
    pub genre: String,
    pub read: bool,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            genre: genre.into(),
            read,
        }
    }

    /// Name of the first required text field left empty, checked in form
    /// order. Whitespace counts as content.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("title", &self.title),
            ("author", &self.author),
            ("year", &self.year),
            ("genre", &self.genre),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
    }
}

impl From<NewBook> for Book {
    fn from(input: NewBook) -> Self {
        Book::new(input.title, input.author, input.year, input.genre, input.read)
    }
}

/// Which field a search matches against.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Title,
    Author,
}

impl SearchField {
    pub const ALL: [SearchField; 2] = [SearchField::Title, SearchField::Author];

    /// Borrow the selected field from a book.
    pub fn value<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            SearchField::Title => &book.title,
            SearchField::Author => &book.author,
        }
    }

    /// Lowercase key, matching the persisted JSON key of the field.
    pub fn key(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
        }
    }

    /// Flip between title and author.
    pub fn toggle(self) -> Self {
        match self {
            SearchField::Title => SearchField::Author,
            SearchField::Author => SearchField::Title,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Aggregate read/unread counts, recomputed on every request.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Statistics {
    pub total: usize,
    pub read: usize,
    /// `read / total * 100`, or `0.0` for an empty library.
    pub percent_read: f64,
}

impl Statistics {
    /// Count over a slice of books in a single pass.
    pub fn from_books(books: &[Book]) -> Self {
        let total = books.len();
        let read = books.iter().filter(|book| book.read).count();
        let percent_read = if total == 0 {
            0.0
        } else {
            read as f64 / total as f64 * 100.0
        };
        Self {
            total,
            read,
            percent_read,
        }
    }

    /// Percentage formatted with two decimals, e.g. `25.00%`.
    pub fn percent_label(&self) -> String {
        format!("{:.2}%", self.percent_read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, read: bool) -> Book {
        Book::new(title, "Author", "2000", "Genre", read)
    }

    #[test]
    fn display_line_includes_status() {
        let dune = Book::new("Dune", "Herbert", "1965", "SciFi", true);
        assert_eq!(dune.to_string(), "Dune by Herbert (1965) - SciFi - ✅ Read");

        let unread = Book {
            read: false,
            ..dune
        };
        assert!(unread.to_string().ends_with("📖 Unread"));
    }

    #[test]
    fn first_missing_field_follows_form_order() {
        let mut input = NewBook::new("", "", "1965", "SciFi", false);
        assert_eq!(input.first_missing_field(), Some("title"));

        input.title = "Dune".into();
        assert_eq!(input.first_missing_field(), Some("author"));

        input.author = " ".into();
        assert_eq!(input.first_missing_field(), None);
    }

    #[test]
    fn search_field_reads_the_selected_attribute() {
        let b = book("Emma", false);
        assert_eq!(SearchField::Title.value(&b), "Emma");
        assert_eq!(SearchField::Author.value(&b), "Author");
        assert_eq!(SearchField::Title.toggle(), SearchField::Author);
    }

    #[test]
    fn statistics_quarter_read() {
        let books = vec![
            book("a", true),
            book("b", false),
            book("c", false),
            book("d", false),
        ];
        let stats = Statistics::from_books(&books);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.read, 1);
        assert_eq!(stats.percent_label(), "25.00%");
    }

    #[test]
    fn statistics_empty_library_is_zero() {
        let stats = Statistics::from_books(&[]);
        assert_eq!(stats, Statistics::default());
        assert_eq!(stats.percent_label(), "0.00%");
    }

    #[test]
    fn missing_keys_default_on_decode() {
        let decoded: Book = serde_json::from_str(r#"{"title": "Emma"}"#).unwrap();
        assert_eq!(decoded.title, "Emma");
        assert_eq!(decoded.author, "");
        assert!(!decoded.read);
    }

    #[test]
    fn scalar_text_fields_keep_their_spelling() {
        let decoded: Book = serde_json::from_str(
            r#"{"title": "Dune", "author": null, "year": 1965, "genre": "SciFi", "read": 1}"#,
        )
        .unwrap();
        assert_eq!(decoded.year, "1965");
        assert_eq!(decoded.author, "");
        assert!(decoded.read);
    }

    #[test]
    fn read_flag_follows_truthiness() {
        for (raw, expected) in [
            ("true", true),
            ("false", false),
            ("null", false),
            ("0", false),
            ("2", true),
            (r#""""#, false),
            (r#""no""#, true),
        ] {
            let decoded: Book =
                serde_json::from_str(&format!(r#"{{"title": "x", "read": {raw}}}"#)).unwrap();
            assert_eq!(decoded.read, expected, "read = {raw}");
        }
    }

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let decoded: Book =
            serde_json::from_str(r#"{"title": "Emma", "read": false, "rating": 5}"#).unwrap();
        assert_eq!(decoded.extra.get("rating"), Some(&serde_json::json!(5)));

        let encoded = serde_json::to_value(&decoded).unwrap();
        assert_eq!(encoded["rating"], serde_json::json!(5));
        assert_eq!(encoded["title"], serde_json::json!("Emma"));
    }
}
