use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::editor::{Field, FieldKind};

/// Render one form row: `Label: value`, highlighting the focused field and
/// wrapping choice values in arrows so they read as pickers.
pub(crate) fn field_line(field: &Field, value: String, is_active: bool) -> Line<'static> {
    let display = match field.kind {
        FieldKind::Choice if value.is_empty() => "< none >".to_string(),
        FieldKind::Choice => format!("< {value} >"),
        FieldKind::Text if value.is_empty() => "<empty>".to_string(),
        FieldKind::Text => value.clone(),
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{}: ", field.label)),
        Span::styled(display, style),
    ])
}

/// Width of the `Label: ` prefix, for cursor placement.
pub(crate) fn label_width(field: &Field) -> u16 {
    (field.label.chars().count() + 2) as u16
}

/// Terminal column for a cursor `offset` characters into `inner`. Long input
/// pins the cursor to the last column instead of running off the panel.
pub(crate) fn cursor_column(inner: Rect, offset: usize) -> u16 {
    let last = inner.width.saturating_sub(1);
    let offset = u16::try_from(offset).unwrap_or(u16::MAX).min(last);
    inner.x.saturating_add(offset)
}

/// Footer hint line built from `(key, description)` pairs.
pub(crate) fn key_hints(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(format!("[{key}]"), key_style));
        spans.push(Span::raw(format!(" {description}   ")));
    }
    Line::from(spans)
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for the dashboard menu.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}
