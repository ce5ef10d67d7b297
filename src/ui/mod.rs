//! Ratatui front end: a navigation sidebar with the six catalog actions and a
//! content panel for whichever one is selected. All state changes go through
//! the `Catalog` held by `App`.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::{App, EMPTY_LIBRARY_MESSAGE, NOTHING_TO_REMOVE_MESSAGE, WELCOME_LINES};
pub use terminal::run_app;
