use crossterm::event::KeyCode;

use crate::editor::{EditorAction, FieldKind, ListEditor, RecordForm};

/// Rows skipped by PageUp/PageDown.
const PAGE: isize = 5;

/// Entries on the dashboard, in display order.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum MenuEntry {
    Rooms,
    Customers,
    Reservations,
    Exit,
}

impl MenuEntry {
    pub(crate) const ALL: [MenuEntry; 4] = [
        MenuEntry::Rooms,
        MenuEntry::Customers,
        MenuEntry::Reservations,
        MenuEntry::Exit,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            MenuEntry::Rooms => "Manage Rooms",
            MenuEntry::Customers => "Customers",
            MenuEntry::Reservations => "Reservations",
            MenuEntry::Exit => "Exit System",
        }
    }
}

/// Dashboard cursor.
#[derive(Default)]
pub(crate) struct MenuState {
    pub(crate) selected: usize,
}

impl MenuState {
    pub(crate) fn at(entry: MenuEntry) -> Self {
        Self {
            selected: MenuEntry::ALL
                .iter()
                .position(|candidate| *candidate == entry)
                .unwrap_or(0),
        }
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        let len = MenuEntry::ALL.len() as isize;
        self.selected = (self.selected as isize + offset).rem_euclid(len) as usize;
    }

    pub(crate) fn current(&self) -> MenuEntry {
        MenuEntry::ALL[self.selected]
    }
}

/// Which part of an editor screen receives keystrokes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Focus {
    Table,
    Form,
    Search,
}

/// What the app should do after a key on an editor screen.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command {
    None,
    Apply(EditorAction),
    Back,
    Quit,
}

/// Static labels for one editor screen.
pub(crate) struct ScreenInfo {
    pub(crate) title: &'static str,
    /// Singular noun used in status messages.
    pub(crate) noun: &'static str,
    /// Search prompt; `None` disables filtering on this screen.
    pub(crate) search_label: Option<&'static str>,
}

/// A list editor plus the UI focus and the search text being typed.
pub(crate) struct EditorScreen<F: RecordForm> {
    pub(crate) editor: ListEditor<F>,
    pub(crate) info: ScreenInfo,
    pub(crate) focus: Focus,
    pub(crate) query: String,
}

impl<F: RecordForm> EditorScreen<F> {
    pub(crate) fn new(editor: ListEditor<F>, info: ScreenInfo) -> Self {
        Self {
            editor,
            info,
            focus: Focus::Table,
            query: String::new(),
        }
    }

    pub(crate) fn searchable(&self) -> bool {
        self.info.search_label.is_some()
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode) -> Command {
        match self.focus {
            Focus::Table => self.handle_table_key(code),
            Focus::Form => self.handle_form_key(code),
            Focus::Search => self.handle_search_key(code),
        }
    }

    fn handle_table_key(&mut self, code: KeyCode) -> Command {
        match code {
            KeyCode::Char('q') => Command::Quit,
            KeyCode::Esc => Command::Back,
            KeyCode::Up => Command::Apply(EditorAction::MoveCursor(-1)),
            KeyCode::Down => Command::Apply(EditorAction::MoveCursor(1)),
            KeyCode::PageUp => Command::Apply(EditorAction::MoveCursor(-PAGE)),
            KeyCode::PageDown => Command::Apply(EditorAction::MoveCursor(PAGE)),
            KeyCode::Home => Command::Apply(EditorAction::SelectFirst),
            KeyCode::End => Command::Apply(EditorAction::SelectLast),
            KeyCode::Char('a') | KeyCode::Char('A') => Command::Apply(EditorAction::Add),
            KeyCode::Char('l') | KeyCode::Char('L') => Command::Apply(EditorAction::LoadSelected),
            KeyCode::Char('u') | KeyCode::Char('U') => Command::Apply(EditorAction::Update),
            KeyCode::Char('d') | KeyCode::Char('D') => Command::Apply(EditorAction::Delete),
            KeyCode::Char('s') | KeyCode::Char('S') => Command::Apply(EditorAction::CycleSort),
            KeyCode::Char('f') | KeyCode::Char('/') if self.searchable() => {
                self.query = self.editor.filter().unwrap_or_default().to_string();
                self.focus = Focus::Search;
                Command::None
            }
            KeyCode::Tab | KeyCode::Char('e') | KeyCode::Char('E') => {
                self.focus = Focus::Form;
                Command::None
            }
            _ => Command::None,
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) -> Command {
        if code == KeyCode::Esc {
            self.focus = Focus::Table;
            return Command::None;
        }

        let form = self.editor.form_mut();
        match code {
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Left => {
                form.cycle_choice(-1);
            }
            KeyCode::Right => {
                form.cycle_choice(1);
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => return Command::Apply(EditorAction::Add),
            KeyCode::Char(ch) => {
                if !form.push_char(ch) && ch == ' ' {
                    form.cycle_choice(1);
                }
            }
            _ => {}
        }
        Command::None
    }

    fn handle_search_key(&mut self, code: KeyCode) -> Command {
        match code {
            KeyCode::Esc => {
                self.query.clear();
                self.focus = Focus::Table;
                Command::Apply(EditorAction::SetFilter(None))
            }
            KeyCode::Enter => {
                self.focus = Focus::Table;
                Command::None
            }
            KeyCode::Up => Command::Apply(EditorAction::MoveCursor(-1)),
            KeyCode::Down => Command::Apply(EditorAction::MoveCursor(1)),
            KeyCode::Backspace => {
                self.query.pop();
                Command::Apply(EditorAction::SetFilter(Some(self.query.clone())))
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                self.query.push(ch);
                Command::Apply(EditorAction::SetFilter(Some(self.query.clone())))
            }
            _ => Command::None,
        }
    }

    /// Whether the focused form field takes typed text (for cursor placement).
    pub(crate) fn editing_text(&self) -> bool {
        self.focus == Focus::Form && F::FIELDS[self.editor.form().active()].kind == FieldKind::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::CustomerForm;
    use crate::models::Customer;

    fn screen(search_label: Option<&'static str>) -> EditorScreen<CustomerForm> {
        let customers = vec![Customer {
            id: "C1".into(),
            name: "Ada".into(),
            phone: String::new(),
            email: String::new(),
        }];
        EditorScreen::new(
            ListEditor::new(customers, CustomerForm::default()),
            ScreenInfo {
                title: "Customer Management",
                noun: "Guest",
                search_label,
            },
        )
    }

    #[test]
    fn typing_in_search_emits_live_filters() {
        let mut screen = screen(Some("Search Guest"));
        assert_eq!(screen.handle_key(KeyCode::Char('/')), Command::None);
        assert_eq!(screen.focus, Focus::Search);

        assert_eq!(
            screen.handle_key(KeyCode::Char('a')),
            Command::Apply(EditorAction::SetFilter(Some("a".into())))
        );
        assert_eq!(
            screen.handle_key(KeyCode::Esc),
            Command::Apply(EditorAction::SetFilter(None))
        );
        assert_eq!(screen.focus, Focus::Table);
    }

    #[test]
    fn search_is_disabled_without_a_label() {
        let mut screen = screen(None);
        assert_eq!(screen.handle_key(KeyCode::Char('f')), Command::None);
        assert_eq!(screen.focus, Focus::Table);
    }

    #[test]
    fn form_keys_edit_without_touching_the_list() {
        let mut screen = screen(None);
        screen.handle_key(KeyCode::Tab);
        assert_eq!(screen.focus, Focus::Form);
        for ch in "C2".chars() {
            assert_eq!(screen.handle_key(KeyCode::Char(ch)), Command::None);
        }
        assert_eq!(screen.editor.form().id, "C2");
        assert_eq!(screen.editor.records().len(), 1);
        assert_eq!(
            screen.handle_key(KeyCode::Enter),
            Command::Apply(EditorAction::Add)
        );
    }

    #[test]
    fn menu_wraps_around() {
        let mut menu = MenuState::default();
        menu.move_selection(-1);
        assert_eq!(menu.current(), MenuEntry::Exit);
        menu.move_selection(1);
        assert_eq!(menu.current(), MenuEntry::Rooms);
    }
}
