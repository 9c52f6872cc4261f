use anyhow::Result;
use chrono::Local;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap,
};
use ratatui::Frame;

use crate::editor::{
    CustomerForm, EditorAction, Effect, ListEditor, Phase, RecordForm, ReservationForm, RoomForm,
};
use crate::models::TableRow;
use crate::store::{
    customer_choices, fetch_customers, fetch_reservations, fetch_rooms, room_choices, Store,
};

use super::helpers::{centered_rect, cursor_column, field_line, key_hints, label_width};
use super::screens::{Command, EditorScreen, Focus, MenuEntry, MenuState, ScreenInfo};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Title bar with the search prompt on editor screens.
const HEADER_HEIGHT: u16 = 3;
/// Share of the editor width given to the form panel.
const FORM_WIDTH_PERCENT: u16 = 38;

/// Top-level navigation. Each editor screen owns its list for as long as it is
/// open; leaving it drops the in-memory copy.
enum Screen {
    Menu(MenuState),
    Rooms(EditorScreen<RoomForm>),
    Customers(EditorScreen<CustomerForm>),
    Reservations(EditorScreen<ReservationForm>),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

impl StatusMessage {
    fn info<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    fn error<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    store: Store,
    screen: Screen,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            screen: Screen::Menu(MenuState::default()),
            status: None,
        }
    }

    /// Handle a plain key press. Returns true when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        if let Screen::Menu(menu) = &mut self.screen {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
                KeyCode::Up => menu.move_selection(-1),
                KeyCode::Down | KeyCode::Tab => menu.move_selection(1),
                KeyCode::Enter => {
                    let entry = menu.current();
                    return Ok(self.open(entry));
                }
                KeyCode::Char(ch @ '1'..='4') => {
                    let entry = MenuEntry::ALL[(ch as u8 - b'1') as usize];
                    return Ok(self.open(entry));
                }
                _ => {}
            }
            return Ok(false);
        }

        let command = match &mut self.screen {
            Screen::Menu(_) => Command::None,
            Screen::Rooms(screen) => screen.handle_key(code),
            Screen::Customers(screen) => screen.handle_key(code),
            Screen::Reservations(screen) => screen.handle_key(code),
        };
        Ok(self.dispatch(command))
    }

    /// Ctrl shortcuts: Load/Update/Delete from any focus, Ctrl+C quits.
    pub(crate) fn handle_ctrl(&mut self, ch: char) -> Result<bool> {
        let action = match ch {
            'c' => return Ok(true),
            'l' => EditorAction::LoadSelected,
            'u' => EditorAction::Update,
            'd' => EditorAction::Delete,
            _ => return Ok(false),
        };
        self.apply(action);
        Ok(false)
    }

    fn dispatch(&mut self, command: Command) -> bool {
        match command {
            Command::None => false,
            Command::Quit => true,
            Command::Back => {
                let entry = match self.screen {
                    Screen::Menu(_) | Screen::Rooms(_) => MenuEntry::Rooms,
                    Screen::Customers(_) => MenuEntry::Customers,
                    Screen::Reservations(_) => MenuEntry::Reservations,
                };
                self.clear_status();
                self.screen = Screen::Menu(MenuState::at(entry));
                false
            }
            Command::Apply(action) => {
                self.apply(action);
                false
            }
        }
    }

    fn apply(&mut self, action: EditorAction) {
        let status = match &mut self.screen {
            Screen::Menu(_) => None,
            Screen::Rooms(screen) => run_action(&self.store, screen, action),
            Screen::Customers(screen) => run_action(&self.store, screen, action),
            Screen::Reservations(screen) => run_action(&self.store, screen, action),
        };
        if let Some(status) = status {
            self.status = Some(status);
        }
    }

    /// Open a dashboard entry, reading its list from disk. Returns true for
    /// "Exit System".
    fn open(&mut self, entry: MenuEntry) -> bool {
        self.screen = match entry {
            MenuEntry::Rooms => {
                let editor = ListEditor::new(fetch_rooms(&self.store), RoomForm::default());
                Screen::Rooms(EditorScreen::new(
                    editor,
                    ScreenInfo {
                        title: "Room Management",
                        noun: "Room",
                        search_label: None,
                    },
                ))
            }
            MenuEntry::Customers => {
                let editor =
                    ListEditor::new(fetch_customers(&self.store), CustomerForm::default());
                Screen::Customers(EditorScreen::new(
                    editor,
                    ScreenInfo {
                        title: "Customer Management",
                        noun: "Guest",
                        search_label: Some("Search Guest"),
                    },
                ))
            }
            MenuEntry::Reservations => {
                let form = ReservationForm::new(
                    room_choices(&self.store),
                    customer_choices(&self.store),
                    Local::now().date_naive(),
                );
                let editor = ListEditor::new(fetch_reservations(&self.store), form);
                Screen::Reservations(EditorScreen::new(
                    editor,
                    ScreenInfo {
                        title: "Reservation Management",
                        noun: "Booking",
                        search_label: Some("Search Reservation"),
                    },
                ))
            }
            MenuEntry::Exit => return true,
        };
        self.clear_status();
        false
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Menu(menu) => draw_menu(frame, content_area, menu),
            Screen::Rooms(screen) => draw_editor(frame, content_area, screen),
            Screen::Customers(screen) => draw_editor(frame, content_area, screen),
            Screen::Reservations(screen) => draw_editor(frame, content_area, screen),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }
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

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let (focus, searchable) = match &self.screen {
            Screen::Menu(_) => {
                return key_hints(&[
                    ("↑↓", "Select"),
                    ("Enter", "Open"),
                    ("1-4", "Jump"),
                    ("q", "Quit"),
                ])
            }
            Screen::Rooms(screen) => (screen.focus, screen.searchable()),
            Screen::Customers(screen) => (screen.focus, screen.searchable()),
            Screen::Reservations(screen) => (screen.focus, screen.searchable()),
        };

        match focus {
            Focus::Form => key_hints(&[
                ("Tab/↑↓", "Field"),
                ("←→", "Choose"),
                ("Enter", "Add"),
                ("^U", "Update"),
                ("^D", "Delete"),
                ("Esc", "Table"),
            ]),
            Focus::Search => key_hints(&[
                ("type", "Filter"),
                ("↑↓", "Select"),
                ("Enter", "Keep Filter"),
                ("Esc", "Clear"),
            ]),
            Focus::Table if searchable => key_hints(&[
                ("↑↓", "Select"),
                ("a", "Add"),
                ("l", "Load"),
                ("u", "Update"),
                ("d", "Delete"),
                ("f", "Search"),
                ("s", "Sort"),
                ("Tab", "Form"),
                ("Esc", "Back"),
                ("q", "Quit"),
            ]),
            Focus::Table => key_hints(&[
                ("↑↓", "Select"),
                ("a", "Add"),
                ("l", "Load"),
                ("u", "Update"),
                ("d", "Delete"),
                ("s", "Sort"),
                ("Tab", "Form"),
                ("Esc", "Back"),
                ("q", "Quit"),
            ]),
        }
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

/// Apply an editor action and persist the whole list when it changed.
/// Returns the footer message to show, if any.
fn run_action<F: RecordForm>(
    store: &Store,
    screen: &mut EditorScreen<F>,
    action: EditorAction,
) -> Option<StatusMessage> {
    let done = match action {
        EditorAction::Add => Some("added"),
        EditorAction::Update => Some("updated"),
        EditorAction::Delete => Some("deleted"),
        EditorAction::LoadSelected => Some("loaded into the form"),
        _ => None,
    };
    let loading = action == EditorAction::LoadSelected;

    match screen.editor.apply(action) {
        Ok(effect) => {
            if effect == Effect::Persist {
                store.save(screen.editor.records());
            }
            if loading {
                screen.focus = Focus::Form;
            }
            done.map(|verb| StatusMessage::info(format!("{} {verb}.", screen.info.noun)))
        }
        Err(err) => Some(StatusMessage::error(err.to_string())),
    }
}

fn draw_menu(frame: &mut Frame, area: Rect, menu: &MenuState) {
    let popup_area = centered_rect(40, 50, area);
    let block = Block::default()
        .title("Hotel Management System")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL);

    let items: Vec<ListItem> = MenuEntry::ALL
        .iter()
        .enumerate()
        .map(|(index, entry)| ListItem::new(format!("{}. {}", index + 1, entry.label())))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default();
    list_state.select(Some(menu.selected));
    frame.render_stateful_widget(list, popup_area, &mut list_state);
}

fn draw_editor<F: RecordForm>(frame: &mut Frame, area: Rect, screen: &EditorScreen<F>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
        .split(area);
    draw_header(frame, rows[0], screen);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(FORM_WIDTH_PERCENT),
            Constraint::Percentage(100 - FORM_WIDTH_PERCENT),
        ])
        .split(rows[1]);
    draw_form(frame, columns[0], screen);
    draw_table(frame, columns[1], screen);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn draw_header<F: RecordForm>(frame: &mut Frame, area: Rect, screen: &EditorScreen<F>) {
    let searching = screen.focus == Focus::Search;
    let block = Block::default()
        .title(screen.info.title)
        .borders(Borders::ALL)
        .border_style(focus_style(searching));
    let inner = block.inner(area);

    let line = match screen.info.search_label {
        Some(label) => Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(screen.query.clone(), focus_style(searching)),
        ]),
        None => Line::from(Span::styled(
            format!("{} on file", screen.editor.records().len()),
            Style::default().fg(Color::Gray),
        )),
    };
    frame.render_widget(Paragraph::new(line).block(block), area);

    if let (true, Some(label)) = (searching, screen.info.search_label) {
        let offset = label.chars().count() + 2 + screen.query.chars().count();
        frame.set_cursor_position((cursor_column(inner, offset), inner.y));
    }
}

fn draw_form<F: RecordForm>(frame: &mut Frame, area: Rect, screen: &EditorScreen<F>) {
    let form = screen.editor.form();
    let editing = screen.focus == Focus::Form;
    let block = Block::default()
        .title(format!("{} Details", screen.info.noun))
        .borders(Borders::ALL)
        .border_style(focus_style(editing));
    let inner = block.inner(area);

    let mut lines: Vec<Line> = F::FIELDS
        .iter()
        .enumerate()
        .map(|(index, field)| field_line(field, form.value(index), editing && form.active() == index))
        .collect();
    lines.push(Line::from(""));

    let phase = match screen.editor.phase() {
        Phase::Idle => "New entry".to_string(),
        Phase::Composing => "Composing new entry".to_string(),
        Phase::SelectedForEdit(index) => format!("Editing row {} of the list", index + 1),
    };
    lines.push(Line::from(Span::styled(
        phase,
        Style::default().fg(Color::Gray),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), area);

    if screen.editing_text() {
        let active = form.active();
        let offset = usize::from(label_width(&F::FIELDS[active])) + form.value_len(active);
        let cursor_y = inner.y.saturating_add(active as u16);
        frame.set_cursor_position((cursor_column(inner, offset), cursor_y));
    }
}

fn draw_table<F: RecordForm>(frame: &mut Frame, area: Rect, screen: &EditorScreen<F>) {
    let editor = &screen.editor;
    let columns = <F::Record as TableRow>::COLUMNS;
    let title = match editor.filter() {
        Some(query) => format!(
            "{} of {} rows match \"{query}\"",
            editor.visible_len(),
            editor.records().len()
        ),
        None => format!("{} rows", editor.records().len()),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(focus_style(screen.focus == Focus::Table));

    if editor.visible_len() == 0 {
        let message = if editor.records().is_empty() {
            "Nothing here yet. Fill in the form and press Enter to add one."
        } else {
            "No rows match the search."
        };
        let paragraph = Paragraph::new(message)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let sort = editor.sort();
    let header = Row::new(columns.iter().enumerate().map(|(index, name)| {
        let label = match sort {
            Some(key) if key.column == index && key.descending => format!("{name} ▼"),
            Some(key) if key.column == index => format!("{name} ▲"),
            _ => name.to_string(),
        };
        Cell::from(label)
    }))
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = editor.visible().map(|record| Row::new(record.cells())).collect();
    let widths = vec![Constraint::Ratio(1, columns.len() as u32); columns.len()];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut table_state = TableState::default();
    table_state.select(editor.cursor());
    frame.render_stateful_widget(table, area, &mut table_state);
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::models::{BedType, Room, RoomType};

    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            assert!(!app.handle_key(*code).unwrap());
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
    }

    fn status_text(app: &App) -> Option<&str> {
        app.status.as_ref().map(|status| status.text.as_str())
    }

    #[test]
    fn adding_a_room_from_the_form_persists_it() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path()).unwrap();
        let mut app = App::new(store.clone());

        press(&mut app, &[KeyCode::Char('1'), KeyCode::Tab]);
        type_text(&mut app, "R1");
        press(
            &mut app,
            &[
                KeyCode::Tab,
                KeyCode::Right,
                KeyCode::Tab,
                KeyCode::Right,
                KeyCode::Right,
                KeyCode::Tab,
            ],
        );
        type_text(&mut app, "100");
        press(&mut app, &[KeyCode::Enter]);

        assert_eq!(status_text(&app), Some("Room added."));
        assert_eq!(
            fetch_rooms(&store),
            vec![Room {
                id: "R1".into(),
                room_type: RoomType::Double,
                bed: BedType::King,
                price: 100,
            }]
        );
    }

    #[test]
    fn delete_without_selection_reports_and_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path()).unwrap();
        let rooms = vec![Room {
            id: "R1".into(),
            room_type: RoomType::Single,
            bed: BedType::Single,
            price: 80,
        }];
        store.try_save(&rooms).unwrap();
        let mut app = App::new(store.clone());

        press(&mut app, &[KeyCode::Char('1'), KeyCode::Char('d')]);
        assert_eq!(status_text(&app), Some("Please select a row to delete."));
        assert_eq!(fetch_rooms(&store), rooms);

        press(&mut app, &[KeyCode::Down, KeyCode::Char('d')]);
        assert_eq!(status_text(&app), Some("Room deleted."));
        assert!(fetch_rooms(&store).is_empty());
    }

    #[test]
    fn booking_without_rooms_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path()).unwrap();
        let mut app = App::new(store.clone());

        press(&mut app, &[KeyCode::Char('3'), KeyCode::Char('a')]);
        assert_eq!(status_text(&app), Some("Select a room first."));
        assert!(fetch_reservations(&store).is_empty());
    }

    #[test]
    fn ctrl_shortcuts_load_the_selected_row() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path()).unwrap();
        let rooms = vec![Room {
            id: "R7".into(),
            room_type: RoomType::Suite,
            bed: BedType::King,
            price: 300,
        }];
        store.try_save(&rooms).unwrap();
        let mut app = App::new(store);

        press(&mut app, &[KeyCode::Char('1'), KeyCode::Down]);
        assert!(!app.handle_ctrl('l').unwrap());
        match &app.screen {
            Screen::Rooms(screen) => {
                assert_eq!(screen.focus, Focus::Form);
                assert_eq!(screen.editor.form().id, "R7");
            }
            _ => panic!("expected the room screen"),
        }
        assert!(app.handle_ctrl('c').unwrap());
    }

    #[test]
    fn escape_returns_to_menu_on_the_same_entry() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path()).unwrap();
        let mut app = App::new(store);

        press(&mut app, &[KeyCode::Char('2'), KeyCode::Esc]);
        match &app.screen {
            Screen::Menu(menu) => assert_eq!(menu.current(), MenuEntry::Customers),
            _ => panic!("expected the menu"),
        }
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
    }
}
