pub mod keymap;

mod dialog;
mod terminal;
mod theme;
mod toast;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::AppState;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    render_summary(frame, layout[1], state, &theme);
    render_bottom_bar(frame, layout[2], state, &theme);

    dialog::render(frame, area, &state.dialog);
    toast::render(frame, area, &state.toasts);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(
            " yodi ",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(state.base_url.as_str(), Style::default().fg(theme.dim)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let line = match (&state.summary, &state.summary_error) {
        (_, Some(error)) => Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(theme.error),
        )),
        (Some(currency), None) => Line::from(vec![
            Span::styled("Currency ", Style::default().fg(theme.dim)),
            Span::styled(
                currency.name.as_str(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  rate ", Style::default().fg(theme.dim)),
            Span::styled(currency.rate.to_string(), Style::default().fg(theme.text)),
        ]),
        (None, None) => Line::from(Span::styled(
            "No currency defined",
            Style::default().fg(theme.dim),
        )),
    };

    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(1).min(1),
    };
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hints = if state.dialog.is_open() {
        " [Ctrl-C] quit"
    } else {
        " [e] edit currency  [q] quit"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(theme.dim))),
        area,
    );
}
