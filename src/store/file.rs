use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;

use crate::error::{CatalogError, CatalogResult};
use crate::models::Book;

/// Indentation of the written JSON. Cosmetic only; any layout loads.
const JSON_INDENT: &[u8] = b"    ";

/// Reads and writes the whole library as one JSON array. Every call opens,
/// uses, and closes the file; nothing is held between calls.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every book from disk.
    ///
    /// A missing, empty, unreadable, or malformed file yields an empty list.
    /// The file itself is left alone; it is only replaced by the next save.
    pub fn load(&self) -> Vec<Book> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(
                    "no library file at {}, starting empty",
                    self.path.display()
                );
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "could not read library file {}: {err}; starting empty",
                    self.path.display()
                );
                return Vec::new();
            }
        };

        let contents = contents.trim();
        if contents.is_empty() {
            debug!("library file {} is empty", self.path.display());
            return Vec::new();
        }

        match serde_json::from_str::<Vec<Book>>(contents) {
            Ok(books) => {
                info!(
                    "loaded {} book(s) from {}",
                    books.len(),
                    self.path.display()
                );
                books
            }
            Err(err) => {
                warn!(
                    "library file {} is malformed ({err}); starting empty",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    /// Overwrite the file with the full library.
    ///
    /// The JSON is written to a temporary file in the same directory and then
    /// renamed over the target, so the previous library stays intact if the
    /// write fails part way.
    pub fn save(&self, books: &[Book]) -> CatalogResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|source| CatalogError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let mut encoded = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut encoded, PrettyFormatter::with_indent(JSON_INDENT));
        books.serialize(&mut serializer)?;

        let write_error = |source| CatalogError::Write {
            path: self.path.clone(),
            source,
        };
        let mut temp_file = NamedTempFile::new_in(dir).map_err(write_error)?;
        temp_file.write_all(&encoded).map_err(write_error)?;
        temp_file.flush().map_err(write_error)?;
        temp_file
            .persist(&self.path)
            .map_err(|err| write_error(err.error))?;

        info!("saved {} book(s) to {}", books.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<Book> {
        vec![
            Book::new("Dune", "Herbert", "1965", "SciFi", true),
            Book::new("Emma", "Austen", "1815", "Classic", false),
        ]
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("library.txt"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn whitespace_only_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.txt");
        fs::write(&path, "  \n\t ").unwrap();
        assert!(Store::new(&path).load().is_empty());
    }

    #[test]
    fn malformed_file_loads_empty_and_is_left_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.txt");
        fs::write(&path, "[{\"title\": ").unwrap();

        assert!(Store::new(&path).load().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[{\"title\": ");
    }

    #[test]
    fn non_array_document_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.txt");
        fs::write(&path, r#"{"title": "Dune"}"#).unwrap();
        assert!(Store::new(&path).load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("library.txt"));

        store.save(&sample()).unwrap();
        assert_eq!(store.load(), sample());

        store.save(&[]).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_writes_json_array_with_expected_keys() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("library.txt"));
        store.save(&sample()[..1]).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "title": "Dune",
                "author": "Herbert",
                "year": "1965",
                "genre": "SciFi",
                "read": true
            }])
        );
        assert!(raw.contains("\n    {"));
    }

    #[test]
    fn save_creates_missing_parent_directory() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("nested").join("library.txt"));
        store.save(&sample()).unwrap();
        assert_eq!(store.load().len(), 2);
    }

    #[test]
    fn save_into_a_directory_path_fails() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());
        let err = store.save(&sample()).unwrap_err();
        assert!(matches!(err, CatalogError::Write { .. }));
    }

    #[test]
    fn numeric_year_loads_as_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.txt");
        fs::write(
            &path,
            r#"[{"title": "Dune", "author": "Herbert", "year": 1965, "genre": "SciFi", "read": true},
                {"title": "Emma", "author": "Austen", "year": "1815", "genre": "Classic", "read": false}]"#,
        )
        .unwrap();

        let books = Store::new(&path).load();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].year, "1965");
        assert_eq!(books[1].year, "1815");
    }

    #[test]
    fn unknown_keys_are_written_back() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("library.txt"));
        fs::write(
            store.path(),
            r#"[{"title": "Emma", "author": "Austen", "year": "1815", "genre": "Classic", "read": false, "rating": 5}]"#,
        )
        .unwrap();

        let books = store.load();
        store.save(&books).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw[0]["rating"], serde_json::json!(5));
    }

    #[test]
    fn failed_save_keeps_previous_contents() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("library.txt");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "previous").unwrap();

        let err = Store::new(&target).save(&sample()).unwrap_err();
        assert!(matches!(err, CatalogError::Write { .. }));
        assert_eq!(
            fs::read_to_string(target.join("keep.txt")).unwrap(),
            "previous"
        );

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("library.txt")]);
    }

    #[test]
    fn save_replaces_previous_file_completely() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("library.txt"));
        store.save(&sample()).unwrap();
        store.save(&sample()[1..]).unwrap();

        assert_eq!(store.load(), sample()[1..].to_vec());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
