use crate::models::Book;

use super::forms::{BookForm, SearchForm};

/// Entries of the navigation sidebar, one per action the catalog offers.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum MenuItem {
    Home,
    AddBook,
    RemoveBook,
    SearchBook,
    AllBooks,
    Statistics,
}

impl MenuItem {
    pub(crate) const ALL: [MenuItem; 6] = [
        MenuItem::Home,
        MenuItem::AddBook,
        MenuItem::RemoveBook,
        MenuItem::SearchBook,
        MenuItem::AllBooks,
        MenuItem::Statistics,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            MenuItem::Home => "Home",
            MenuItem::AddBook => "Add Book",
            MenuItem::RemoveBook => "Remove Book",
            MenuItem::SearchBook => "Search Book",
            MenuItem::AllBooks => "Display All Books",
            MenuItem::Statistics => "Display Statistics",
        }
    }

    /// Heading drawn above the content panel.
    pub(crate) fn heading(self) -> &'static str {
        match self {
            MenuItem::Home => "📖 Personal Library Manager",
            MenuItem::AddBook => "➕ Add a New Book",
            MenuItem::RemoveBook => "🗑 Remove a Book",
            MenuItem::SearchBook => "🔎 Search a Book",
            MenuItem::AllBooks => "📚 All Books",
            MenuItem::Statistics => "📈 Library Statistics",
        }
    }

    pub(crate) fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|item| *item == self)
            .unwrap_or_default()
    }

    /// Neighbouring entry, clamped at both ends of the menu.
    pub(crate) fn offset(self, delta: isize) -> Self {
        let last = Self::ALL.len() as isize - 1;
        let target = (self.index() as isize + delta).clamp(0, last);
        Self::ALL[target as usize]
    }
}

/// Per-screen state. Switching menu entries always starts from a fresh value.
pub(crate) enum Screen {
    Home,
    AddBook(BookForm),
    RemoveBook(RemoveScreen),
    SearchBook(SearchScreen),
    AllBooks(ListScreen),
    Statistics,
}

impl Screen {
    pub(crate) fn for_item(item: MenuItem) -> Self {
        match item {
            MenuItem::Home => Screen::Home,
            MenuItem::AddBook => Screen::AddBook(BookForm::default()),
            MenuItem::RemoveBook => Screen::RemoveBook(RemoveScreen::default()),
            MenuItem::SearchBook => Screen::SearchBook(SearchScreen::default()),
            MenuItem::AllBooks => Screen::AllBooks(ListScreen::default()),
            MenuItem::Statistics => Screen::Statistics,
        }
    }
}

/// Cursor into the list of titles offered for removal.
#[derive(Default)]
pub(crate) struct RemoveScreen {
    pub(crate) selected: usize,
}

impl RemoveScreen {
    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let last = len as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    pub(crate) fn ensure_in_bounds(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

/// Search inputs plus the outcome of the last submitted query.
#[derive(Default)]
pub(crate) struct SearchScreen {
    pub(crate) form: SearchForm,
    pub(crate) results: Option<SearchResults>,
    pub(crate) scroll: u16,
}

/// Snapshot of a finished search. Books are copied out so the screen does not
/// borrow the catalog.
pub(crate) struct SearchResults {
    pub(crate) term: String,
    pub(crate) books: Vec<Book>,
}

impl SearchResults {
    /// Text shown when nothing matched.
    pub(crate) fn empty_message(&self) -> String {
        format!("No books found for \"{}\".", self.term)
    }
}

/// Scroll offset for the full listing.
#[derive(Default)]
pub(crate) struct ListScreen {
    pub(crate) scroll: u16,
}

/// Apply a scroll delta, never going past the last line.
pub(crate) fn scroll_by(scroll: u16, delta: isize, line_count: usize) -> u16 {
    let max = line_count.saturating_sub(1).min(u16::MAX as usize) as isize;
    (scroll as isize + delta).clamp(0, max) as u16
}
