//! Core library surface for the Personal Library Manager.
//!
//! The catalog and its store are usable on their own, without the terminal
//! front end: a `Catalog` opened on a `Store` offers every operation the UI
//! exposes. The `ui` module is the Ratatui application the binary drives, and
//! `logging` wires the `log` facade to a file so it never fights the UI for
//! the terminal.
pub mod catalog;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;

/// The session object and the outcome type of its one non-trivial mutation.
/// Most callers need nothing else from `catalog`.
pub use catalog::{Catalog, RemoveOutcome};

/// Typed failures for add and save, so callers can tell a form problem the
/// user can fix apart from an I/O failure.
pub use error::{CatalogError, CatalogResult};

/// The domain types every layer passes around: stored records, unvalidated
/// input, the search selector, and the aggregate counts.
pub use models::{Book, NewBook, SearchField, Statistics};

/// Whole-file JSON persistence. Re-exported so embedders and tests can point
/// a catalog at any path instead of the default under the home directory.
pub use store::Store;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
