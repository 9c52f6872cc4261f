use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::app::App;

type Backend = CrosstermBackend<Stdout>;

/// Redraw interval while no key arrives.
const TICK: Duration = Duration::from_millis(250);

/// Take over the terminal and drive the front desk until the user leaves.
///
/// Every tick redraws the current screen (the menu or one of the list editors)
/// and forwards at most one key press. Saves run synchronously inside the key
/// handlers. The terminal is restored even when drawing or reading input
/// fails, and that error is returned after cleanup.
pub fn run_app(app: &mut App) -> Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal backend")?;

    let result = event_loop(&mut terminal, app);

    cleanup_terminal(&mut terminal)?;
    result
}

fn event_loop(terminal: &mut Terminal<Backend>, app: &mut App) -> Result<()> {
    loop {
        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")?;

        if !event::poll(TICK).context("event polling failed")? {
            continue;
        }
        if let Event::Key(key_event) = event::read().context("failed to read event")? {
            if key_event.kind == KeyEventKind::Press && dispatch_key(app, key_event)? {
                return Ok(());
            }
        }
    }
}

/// Route one key press. Ctrl chords never reach the focused widget: they go to
/// `App::handle_ctrl` so Load/Update/Delete work while typing in a form or the
/// search box, and Ctrl+C exits from anywhere.
fn dispatch_key(app: &mut App, key_event: KeyEvent) -> Result<bool> {
    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char(ch) = key_event.code {
            return app.handle_ctrl(ch);
        }
    }
    app.handle_key(key_event.code)
}

fn cleanup_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal
        .show_cursor()
        .context("failed to restore cursor visibility")
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::store::Store;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_chords_bypass_the_focused_widget() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = App::new(Store::open(temp_dir.path()).unwrap());

        // On the menu a bare 'c' does nothing, Ctrl+C exits.
        assert!(!dispatch_key(&mut app, key(KeyCode::Char('c'), KeyModifiers::NONE)).unwrap());
        assert!(dispatch_key(&mut app, key(KeyCode::Char('c'), KeyModifiers::CONTROL)).unwrap());
    }

    #[test]
    fn plain_keys_reach_the_app() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = App::new(Store::open(temp_dir.path()).unwrap());

        assert!(!dispatch_key(&mut app, key(KeyCode::Down, KeyModifiers::NONE)).unwrap());
        assert!(dispatch_key(&mut app, key(KeyCode::Char('q'), KeyModifiers::NONE)).unwrap());
    }
}
