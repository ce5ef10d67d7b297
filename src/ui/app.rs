use std::mem;

use crossterm::event::KeyCode;
use log::{error, info};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::catalog::{Catalog, RemoveOutcome};
use crate::error::CatalogError;

use super::forms::{BookField, BookForm};
use super::helpers::{book_line, centered_rect, key_hint, surface_error};
use super::screens::{
    scroll_by, ListScreen, MenuItem, RemoveScreen, Screen, SearchResults, SearchScreen,
};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Width of the navigation sidebar, wide enough for the longest entry.
const SIDEBAR_WIDTH: u16 = 24;
/// Rows moved by PageUp / PageDown.
const PAGE: isize = 5;

/// Text of the home screen.
pub const WELCOME_LINES: [&str; 2] = [
    "Welcome to your Personal Library Manager! 📚",
    "Manage your books easily.",
];
pub const EMPTY_LIBRARY_MESSAGE: &str = "The library is empty.";
pub const NOTHING_TO_REMOVE_MESSAGE: &str = "Library is empty. Nothing to remove.";

/// Which panel receives keystrokes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Focus {
    Sidebar,
    Content,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Success => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state: the session catalog plus what is on screen.
pub struct App {
    catalog: Catalog,
    menu: MenuItem,
    focus: Focus,
    screen: Screen,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            menu: MenuItem::Home,
            focus: Focus::Sidebar,
            screen: Screen::Home,
            status: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Route a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.focus {
            Focus::Sidebar => self.handle_sidebar_key(code),
            Focus::Content => {
                self.handle_content_key(code);
                false
            }
        }
    }

    fn handle_sidebar_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => self.select_menu(self.menu.offset(-1)),
            KeyCode::Down | KeyCode::Char('j') => self.select_menu(self.menu.offset(1)),
            KeyCode::Home => self.select_menu(MenuItem::Home),
            KeyCode::End => self.select_menu(MenuItem::Statistics),
            KeyCode::Enter | KeyCode::Right | KeyCode::Tab => {
                if self.screen_takes_input() {
                    self.focus = Focus::Content;
                }
            }
            _ => {}
        }
        false
    }

    fn handle_content_key(&mut self, code: KeyCode) {
        if code == KeyCode::Esc {
            self.focus = Focus::Sidebar;
            return;
        }

        let screen = mem::replace(&mut self.screen, Screen::Home);
        self.screen = match screen {
            Screen::AddBook(form) => Screen::AddBook(self.handle_add_book(code, form)),
            Screen::RemoveBook(state) => Screen::RemoveBook(self.handle_remove_book(code, state)),
            Screen::SearchBook(state) => Screen::SearchBook(self.handle_search_book(code, state)),
            Screen::AllBooks(state) => Screen::AllBooks(self.handle_all_books(code, state)),
            other => other,
        };
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> BookForm {
        match code {
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => self.submit_book(&mut form),
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        form
    }

    fn submit_book(&mut self, form: &mut BookForm) {
        let title = form.title.clone();
        match self.catalog.add(form.to_new_book()) {
            Ok(_) => {
                info!("added {title:?}");
                self.set_status(
                    format!("✅ Book \"{title}\" added successfully."),
                    StatusKind::Success,
                );
                *form = BookForm::default();
            }
            Err(err) => {
                let message = self.report_failure(err);
                form.error = Some(message);
            }
        }
    }

    fn handle_remove_book(&mut self, code: KeyCode, mut state: RemoveScreen) -> RemoveScreen {
        let len = self.catalog.len();
        match code {
            KeyCode::Up => state.move_selection(-1, len),
            KeyCode::Down => state.move_selection(1, len),
            KeyCode::PageUp => state.move_selection(-PAGE, len),
            KeyCode::PageDown => state.move_selection(PAGE, len),
            KeyCode::Home => state.selected = 0,
            KeyCode::End => state.selected = len.saturating_sub(1),
            KeyCode::Enter => self.remove_selected(&state),
            _ => {}
        }
        state.ensure_in_bounds(self.catalog.len());
        state
    }

    fn remove_selected(&mut self, state: &RemoveScreen) {
        let title = self
            .catalog
            .list()
            .get(state.selected)
            .map(|book| book.title.clone())
            .unwrap_or_default();

        match self.catalog.remove(&title) {
            Ok(RemoveOutcome::EmptyLibrary) => {
                self.set_status(NOTHING_TO_REMOVE_MESSAGE, StatusKind::Info);
            }
            Ok(RemoveOutcome::Removed { title, count }) => {
                info!("removed {count} book(s) titled {title:?}");
                self.set_status(
                    format!("✅ Book \"{title}\" removed successfully."),
                    StatusKind::Success,
                );
            }
            Err(err) => {
                self.report_failure(err);
            }
        }
    }

    fn handle_search_book(&mut self, code: KeyCode, mut state: SearchScreen) -> SearchScreen {
        match code {
            KeyCode::Tab | KeyCode::BackTab => {
                state.form.toggle_field();
                state.results = None;
                state.scroll = 0;
            }
            KeyCode::Backspace => state.form.backspace(),
            KeyCode::Up => state.scroll = state.scroll.saturating_sub(1),
            KeyCode::Down => {
                let lines = state.results.as_ref().map_or(0, |r| r.books.len());
                state.scroll = scroll_by(state.scroll, 1, lines);
            }
            KeyCode::Enter => {
                let books = self
                    .catalog
                    .search(state.form.field, &state.form.term)
                    .into_iter()
                    .cloned()
                    .collect();
                let results = SearchResults {
                    term: state.form.term.clone(),
                    books,
                };
                if results.books.is_empty() {
                    self.set_status(results.empty_message(), StatusKind::Warning);
                } else {
                    self.clear_status();
                }
                state.results = Some(results);
                state.scroll = 0;
            }
            KeyCode::Char(ch) => {
                state.form.push_char(ch);
            }
            _ => {}
        }
        state
    }

    fn handle_all_books(&mut self, code: KeyCode, mut state: ListScreen) -> ListScreen {
        let lines = self.catalog.len();
        let delta = match code {
            KeyCode::Up => -1,
            KeyCode::Down => 1,
            KeyCode::PageUp => -PAGE,
            KeyCode::PageDown => PAGE,
            KeyCode::Home => -(lines as isize),
            KeyCode::End => lines as isize,
            _ => 0,
        };
        state.scroll = scroll_by(state.scroll, delta, lines);
        state
    }

    /// Put a failed operation in the footer. Validation problems are shown as
    /// typed; anything else is an I/O failure and is logged as well.
    fn report_failure(&mut self, err: CatalogError) -> String {
        let message = if err.is_validation() {
            format!("❗{err}")
        } else {
            let err = anyhow::Error::new(err);
            error!("{err:#}");
            surface_error(&err)
        };
        self.set_status(message.clone(), StatusKind::Error);
        message
    }

    fn select_menu(&mut self, item: MenuItem) {
        if item == self.menu {
            return;
        }
        self.menu = item;
        self.screen = Screen::for_item(item);
        self.clear_status();
    }

    fn screen_takes_input(&self) -> bool {
        !matches!(self.screen, Screen::Home | Screen::Statistics)
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (body_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(body_area);

        self.draw_sidebar(frame, columns[0]);

        let block = self.content_block();
        let inner = block.inner(columns[1]);
        frame.render_widget(block, columns[1]);

        match &self.screen {
            Screen::Home => self.draw_home(frame, inner),
            Screen::AddBook(form) => self.draw_add_book(frame, inner, form),
            Screen::RemoveBook(state) => self.draw_remove_book(frame, inner, state),
            Screen::SearchBook(state) => self.draw_search_book(frame, inner, state),
            Screen::AllBooks(state) => self.draw_all_books(frame, inner, state),
            Screen::Statistics => self.draw_statistics(frame, inner),
        }

        if area.height > footer_height {
            self.draw_footer(frame, footer_area);
        }
    }

    fn border_style(&self, focus: Focus) -> Style {
        if self.focus == focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    }

    fn content_block(&self) -> Block<'static> {
        Block::default()
            .title(self.menu.heading())
            .borders(Borders::ALL)
            .border_style(self.border_style(Focus::Content))
    }

    fn draw_sidebar(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = MenuItem::ALL
            .iter()
            .map(|item| ListItem::new(item.label()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .title("Navigation")
                    .borders(Borders::ALL)
                    .border_style(self.border_style(Focus::Sidebar)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(self.menu.index()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_home(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = WELCOME_LINES.iter().map(|line| Line::from(*line)).collect();
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, centered_rect(90, 40, area));
    }

    fn draw_add_book(&self, frame: &mut Frame, area: Rect, form: &BookForm) {
        let mut lines: Vec<Line> = BookField::ORDER
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to add • Tab to switch • Space toggles Read • Esc to leave",
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);

        if self.focus == Focus::Content && form.active != BookField::Read {
            let prefix = form.active.label().len() as u16 + 2;
            let cursor_x = area.x + prefix + form.value_len(form.active) as u16;
            let cursor_y = area.y + form.active.position() as u16;
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }

    fn draw_remove_book(&self, frame: &mut Frame, area: Rect, state: &RemoveScreen) {
        if self.catalog.is_empty() {
            let message = Paragraph::new(NOTHING_TO_REMOVE_MESSAGE)
                .style(StatusKind::Info.style())
                .alignment(Alignment::Center);
            frame.render_widget(message, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);
        frame.render_widget(Paragraph::new("Select a book to remove"), chunks[0]);

        let items: Vec<ListItem> = self
            .catalog
            .titles()
            .into_iter()
            .map(|title| ListItem::new(title.to_string()))
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut list_state = ListState::default();
        list_state.select(Some(state.selected));
        frame.render_stateful_widget(list, chunks[1], &mut list_state);
    }

    fn draw_search_book(&self, frame: &mut Frame, area: Rect, state: &SearchScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let form = &state.form;
        frame.render_widget(
            Paragraph::new(vec![form.selector_line(), form.term_line()]),
            chunks[0],
        );

        let results: Vec<Line> = match &state.results {
            None => vec![Line::from(Span::styled(
                "Enter to search • Tab to switch between title and author",
                Style::default().fg(Color::Gray),
            ))],
            Some(results) if results.books.is_empty() => vec![Line::from(Span::styled(
                results.empty_message(),
                StatusKind::Warning.style(),
            ))],
            Some(results) => results.books.iter().map(book_line).collect(),
        };
        let paragraph = Paragraph::new(results)
            .wrap(Wrap { trim: false })
            .scroll((state.scroll, 0));
        frame.render_widget(paragraph, chunks[1]);

        if self.focus == Focus::Content {
            let cursor_x = chunks[0].x
                + form.prompt().chars().count() as u16
                + form.term.chars().count() as u16;
            frame.set_cursor_position((cursor_x, chunks[0].y + 1));
        }
    }

    fn draw_all_books(&self, frame: &mut Frame, area: Rect, state: &ListScreen) {
        let books = self.catalog.list();
        if books.is_empty() {
            let message = Paragraph::new(EMPTY_LIBRARY_MESSAGE)
                .style(StatusKind::Info.style())
                .alignment(Alignment::Center);
            frame.render_widget(message, area);
            return;
        }

        let lines: Vec<Line> = books.iter().map(book_line).collect();
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((state.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_statistics(&self, frame: &mut Frame, area: Rect) {
        let stats = self.catalog.statistics();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        let value_style = Style::default().add_modifier(Modifier::BOLD);
        let metrics = vec![
            Line::from(vec![
                Span::raw("Total Books: "),
                Span::styled(stats.total.to_string(), value_style),
            ]),
            Line::from(vec![
                Span::raw("Books Read: "),
                Span::styled(stats.read.to_string(), value_style),
            ]),
            Line::from(vec![
                Span::raw("Percentage Read: "),
                Span::styled(stats.percent_label(), value_style),
            ]),
        ];
        frame.render_widget(Paragraph::new(metrics), chunks[0]);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Read"))
            .gauge_style(Style::default().fg(Color::Green))
            .ratio((stats.percent_read / 100.0).clamp(0.0, 1.0))
            .label(stats.percent_label());
        frame.render_widget(gauge, chunks[1]);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let mut spans = Vec::new();
        let hints: &[(&'static str, &'static str)] = match (self.focus, &self.screen) {
            (Focus::Sidebar, _) => &[
                ("[↑↓]", " Navigate   "),
                ("[Enter]", " Open   "),
                ("[q]", " Quit"),
            ],
            (Focus::Content, Screen::AddBook(_)) => &[
                ("[Tab]", " Next field   "),
                ("[Space]", " Toggle read   "),
                ("[Enter]", " Add Book   "),
                ("[Esc]", " Menu"),
            ],
            (Focus::Content, Screen::RemoveBook(_)) => &[
                ("[↑↓]", " Select   "),
                ("[Enter]", " Remove Book   "),
                ("[Esc]", " Menu"),
            ],
            (Focus::Content, Screen::SearchBook(_)) => &[
                ("[Tab]", " Title/Author   "),
                ("[Enter]", " Search   "),
                ("[↑↓]", " Scroll   "),
                ("[Esc]", " Menu"),
            ],
            (Focus::Content, _) => &[("[↑↓]", " Scroll   "), ("[Esc]", " Menu")],
        };
        for &(key, label) in hints {
            spans.extend(key_hint(key, label));
        }
        Line::from(spans)
    }
}
