use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{NewBook, SearchField};

/// Internal representation of the "add book" form fields.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) year: String,
    pub(crate) genre: String,
    pub(crate) read: bool,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

/// Fields available within the book form, in focus order.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Year,
    Genre,
    Read,
}

impl BookField {
    pub(crate) const ORDER: [BookField; 5] = [
        BookField::Title,
        BookField::Author,
        BookField::Year,
        BookField::Genre,
        BookField::Read,
    ];

    /// Prompt shown in front of the field value.
    pub(crate) fn label(self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Year => "Year",
            BookField::Genre => "Genre",
            BookField::Read => "Read",
        }
    }

    pub(crate) fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }
}

impl BookForm {
    /// Move focus forward, wrapping from the checkbox back to the title.
    pub(crate) fn next_field(&mut self) {
        let next = (self.active.position() + 1) % BookField::ORDER.len();
        self.active = BookField::ORDER[next];
    }

    /// Move focus backward.
    pub(crate) fn previous_field(&mut self) {
        let len = BookField::ORDER.len();
        let previous = (self.active.position() + len - 1) % len;
        self.active = BookField::ORDER[previous];
    }

    /// Insert a character into the active field. On the checkbox, space
    /// toggles the read flag and everything else is ignored.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            BookField::Title => self.title.push(ch),
            BookField::Author => self.author.push(ch),
            BookField::Year => self.year.push(ch),
            BookField::Genre => self.genre.push(ch),
            BookField::Read => {
                if ch != ' ' {
                    return false;
                }
                self.read = !self.read;
            }
        }
        true
    }

    /// Remove the last character from the active text field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            BookField::Title => {
                self.title.pop();
            }
            BookField::Author => {
                self.author.pop();
            }
            BookField::Year => {
                self.year.pop();
            }
            BookField::Genre => {
                self.genre.pop();
            }
            BookField::Read => {}
        }
    }

    /// Snapshot the inputs verbatim. Validation happens in the catalog.
    pub(crate) fn to_new_book(&self) -> NewBook {
        NewBook::new(
            self.title.clone(),
            self.author.clone(),
            self.year.clone(),
            self.genre.clone(),
            self.read,
        )
    }

    fn text(&self, field: BookField) -> Option<&String> {
        match field {
            BookField::Title => Some(&self.title),
            BookField::Author => Some(&self.author),
            BookField::Year => Some(&self.year),
            BookField::Genre => Some(&self.genre),
            BookField::Read => None,
        }
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: BookField) -> Line<'static> {
        let is_active = self.active == field;

        let (display, empty) = match self.text(field) {
            Some(value) if value.is_empty() => ("<required>".to_string(), true),
            Some(value) => (value.clone(), false),
            None => {
                let mark = if self.read { "[x]" } else { "[ ]" };
                (format!("{mark} Have you read the book?"), false)
            }
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if empty {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Character count of the requested text field; zero for the checkbox.
    pub(crate) fn value_len(&self, field: BookField) -> usize {
        self.text(field)
            .map(|value| value.chars().count())
            .unwrap_or_default()
    }
}

/// Field selector and term for the search screen.
#[derive(Default, Clone)]
pub(crate) struct SearchForm {
    pub(crate) field: SearchField,
    pub(crate) term: String,
}

impl SearchForm {
    pub(crate) fn toggle_field(&mut self) {
        self.field = self.field.toggle();
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.term.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.term.pop();
    }

    /// `Search by: [title] author` with the active choice highlighted.
    pub(crate) fn selector_line(&self) -> Line<'static> {
        let mut spans = vec![Span::raw("Search by: ")];
        for field in SearchField::ALL {
            if field == self.field {
                spans.push(Span::styled(
                    format!("[{}]", field.key()),
                    Style::default().fg(Color::Yellow),
                ));
            } else {
                spans.push(Span::styled(
                    format!(" {} ", field.key()),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    /// Prompt for the term, e.g. `Enter the author: `.
    pub(crate) fn prompt(&self) -> String {
        format!("Enter the {}: ", self.field.key())
    }

    pub(crate) fn term_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::raw(self.prompt()),
            Span::styled(self.term.clone(), Style::default().fg(Color::Yellow)),
        ])
    }
}
