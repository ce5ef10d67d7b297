//! The session object. `Catalog` owns the in-memory library for as long as the
//! program runs and writes the whole list back through its `Store` after every
//! mutation. Read-only operations never touch the disk.

use log::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Book, NewBook, SearchField, Statistics};
use crate::store::Store;

/// Result of a remove request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The library had no books, so nothing was attempted.
    EmptyLibrary,
    /// Every book with exactly this title is gone and the library was saved.
    Removed { title: String, count: usize },
}

/// In-memory library plus the store it was loaded from.
#[derive(Debug)]
pub struct Catalog {
    store: Store,
    books: Vec<Book>,
}

impl Catalog {
    /// Load the library once for the session.
    pub fn open(store: Store) -> Self {
        let books = store.load();
        Self { store, books }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Every book in insertion order.
    pub fn list(&self) -> &[Book] {
        &self.books
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Titles in library order, one per book, for picking what to remove.
    pub fn titles(&self) -> Vec<&str> {
        self.books.iter().map(|book| book.title.as_str()).collect()
    }

    /// Append a book after checking that all four text fields have content,
    /// then persist. A validation failure leaves the library as it was.
    pub fn add(&mut self, input: NewBook) -> CatalogResult<&Book> {
        if let Some(field) = input.first_missing_field() {
            debug!("rejected new book: {field} is empty");
            return Err(CatalogError::MissingField { field });
        }

        self.books.push(Book::from(input));
        self.store.save(&self.books)?;

        let index = self.books.len() - 1;
        Ok(&self.books[index])
    }

    /// Delete every book whose title equals `title` exactly (case-sensitive)
    /// and persist. An empty library short-circuits without saving.
    pub fn remove(&mut self, title: &str) -> CatalogResult<RemoveOutcome> {
        if self.books.is_empty() {
            return Ok(RemoveOutcome::EmptyLibrary);
        }

        let before = self.books.len();
        self.books.retain(|book| book.title != title);
        let count = before - self.books.len();
        debug!("removing {title:?} dropped {count} book(s)");

        self.store.save(&self.books)?;
        Ok(RemoveOutcome::Removed {
            title: title.to_string(),
            count,
        })
    }

    /// Case-insensitive substring match of `term` against one field, in
    /// library order. An empty term matches everything.
    pub fn search(&self, field: SearchField, term: &str) -> Vec<&Book> {
        let needle = term.to_lowercase();
        self.books
            .iter()
            .filter(|book| field.value(book).to_lowercase().contains(&needle))
            .collect()
    }

    /// Fresh totals over the current library.
    pub fn statistics(&self) -> Statistics {
        Statistics::from_books(&self.books)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn catalog(dir: &TempDir) -> Catalog {
        Catalog::open(Store::new(dir.path().join("library.txt")))
    }

    fn input(title: &str, author: &str, read: bool) -> NewBook {
        NewBook::new(title, author, "2001", "Fiction", read)
    }

    #[test]
    fn add_appends_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut catalog = catalog(&dir);

        let added = catalog.add(input("Dune", "Herbert", true)).unwrap().clone();
        assert_eq!(added.title, "Dune");
        assert_eq!(added.year, "2001");
        assert!(added.read);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.store().load(), vec![added]);
    }

    #[test]
    fn add_keeps_insertion_order_and_duplicates() {
        let dir = TempDir::new().unwrap();
        let mut catalog = catalog(&dir);
        catalog.add(input("B", "x", false)).unwrap();
        catalog.add(input("A", "y", false)).unwrap();
        catalog.add(input("B", "z", false)).unwrap();

        assert_eq!(catalog.titles(), vec!["B", "A", "B"]);
    }

    #[test]
    fn add_with_empty_field_is_rejected_without_saving() {
        let dir = TempDir::new().unwrap();
        let mut catalog = catalog(&dir);

        for blank in 0..4 {
            let mut fields = ["T".to_string(), "A".into(), "Y".into(), "G".into()];
            fields[blank].clear();
            let [title, author, year, genre] = fields;
            let err = catalog
                .add(NewBook::new(title, author, year, genre, false))
                .unwrap_err();
            assert!(err.is_validation());
            assert_eq!(err.to_string(), "Please fill all fields.");
        }

        assert!(catalog.is_empty());
        assert!(!catalog.store().path().exists());
    }

    #[test]
    fn remove_on_empty_library_reports_and_does_not_save() {
        let dir = TempDir::new().unwrap();
        let mut catalog = catalog(&dir);

        assert_eq!(catalog.remove("Dune").unwrap(), RemoveOutcome::EmptyLibrary);
        assert!(!catalog.store().path().exists());
    }

    #[test]
    fn remove_drops_every_exact_match() {
        let dir = TempDir::new().unwrap();
        let mut catalog = catalog(&dir);
        catalog.add(input("Dune", "Herbert", false)).unwrap();
        catalog.add(input("Emma", "Austen", false)).unwrap();
        catalog.add(input("Dune", "Someone", true)).unwrap();

        let outcome = catalog.remove("Dune").unwrap();
        assert_eq!(
            outcome,
            RemoveOutcome::Removed {
                title: "Dune".into(),
                count: 2
            }
        );
        assert_eq!(catalog.titles(), vec!["Emma"]);
        assert_eq!(catalog.store().load().len(), 1);
    }

    #[test]
    fn remove_is_case_sensitive() {
        let dir = TempDir::new().unwrap();
        let mut catalog = catalog(&dir);
        catalog.add(input("Dune", "Herbert", false)).unwrap();

        catalog.remove("dune").unwrap();
        assert_eq!(catalog.titles(), vec!["Dune"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let dir = TempDir::new().unwrap();
        let mut catalog = catalog(&dir);
        catalog.add(input("Harry Potter", "Rowling", true)).unwrap();
        catalog.add(input("Emma", "Austen", false)).unwrap();
        catalog.add(input("Charlotte's Web", "White", false)).unwrap();

        let titles: Vec<_> = catalog
            .search(SearchField::Title, "har")
            .into_iter()
            .map(|book| book.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Harry Potter", "Charlotte's Web"]);

        let by_author = catalog.search(SearchField::Author, "AUST");
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].title, "Emma");

        assert!(catalog.search(SearchField::Author, "tolkien").is_empty());
    }

    #[test]
    fn search_on_empty_library_is_empty() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog(&dir);
        assert!(catalog.search(SearchField::Title, "").is_empty());
    }

    #[test]
    fn statistics_track_mutations() {
        let dir = TempDir::new().unwrap();
        let mut catalog = catalog(&dir);
        catalog.add(input("a", "x", true)).unwrap();
        catalog.add(input("b", "x", false)).unwrap();

        let stats = catalog.statistics();
        assert_eq!((stats.total, stats.read), (2, 1));
        assert_eq!(stats.percent_read, 50.0);

        catalog.remove("a").unwrap();
        let stats = catalog.statistics();
        assert_eq!((stats.total, stats.read), (1, 0));
        assert_eq!(stats.percent_read, 0.0);
    }

    #[test]
    fn search_treats_missing_field_as_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("library.txt"), r#"[{"title": "Emma"}]"#).unwrap();
        let catalog = catalog(&dir);

        let everything = catalog.search(SearchField::Author, "");
        assert_eq!(everything.len(), 1);
        assert_eq!(everything[0].title, "Emma");
        assert!(catalog.search(SearchField::Author, "x").is_empty());
    }
}
