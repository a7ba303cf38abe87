use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    dialog::{CurrencyEditDialog, DialogState, Field},
    ui::theme::Theme,
};

/// Calculates a centered rect for the dialog box
fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

pub fn render(frame: &mut Frame<'_>, area: Rect, dialog: &CurrencyEditDialog) {
    if !dialog.is_open() {
        return;
    }
    let theme = Theme::default();

    let card_area = centered_box(52, 14, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" Edit currency ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Subtitle
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Name
            Constraint::Length(1), // Rate
            Constraint::Length(1), // Rate hint
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Current currency
            Constraint::Min(0),
            Constraint::Length(1), // Footer
        ])
        .margin(1)
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Update the name or the exchange rate",
            Style::default().fg(theme.dim),
        )),
        rows[0],
    );

    match dialog.state() {
        DialogState::Fetching => {
            frame.render_widget(
                Paragraph::new(Span::styled("Loading…", Style::default().fg(theme.accent)))
                    .alignment(Alignment::Center),
                rows[3],
            );
            return;
        }
        DialogState::FetchError(message) => {
            frame.render_widget(
                Paragraph::new(Span::styled(message.as_str(), Style::default().fg(theme.error)))
                    .alignment(Alignment::Center),
                rows[3],
            );
            render_footer(frame, rows[8], "[Esc] close  [r] retry", &theme);
            return;
        }
        DialogState::Closed | DialogState::Ready | DialogState::Submitting => {}
    }

    let form = dialog.form();
    let editable = dialog.state() == &DialogState::Ready;
    render_input(
        frame,
        rows[2],
        "Name",
        &form.name,
        editable && form.focus == Field::Name,
        &theme,
    );
    render_input(
        frame,
        rows[3],
        "Rate",
        &form.rate,
        editable && form.focus == Field::Rate,
        &theme,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            "      conversion rate against the base currency",
            Style::default().fg(theme.dim),
        )),
        rows[4],
    );

    if let Some(current) = dialog.current() {
        let line = Line::from(vec![
            Span::styled("Current: ", Style::default().fg(theme.dim)),
            Span::styled(
                current.name.as_str(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" - rate ", Style::default().fg(theme.dim)),
            Span::styled(
                current.rate.to_string(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), rows[6]);
    }

    let footer = if dialog.state() == &DialogState::Submitting {
        "Saving…"
    } else {
        "[Esc] cancel  [Tab] next field  [Enter] save"
    };
    render_footer(frame, rows[8], footer, &theme);
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };
    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    let line = Line::from(vec![
        Span::styled(format!("{label:<6}"), Style::default().fg(theme.dim)),
        Span::styled(format!("{value}{cursor}"), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, text: &str, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(theme.dim)))
            .alignment(Alignment::Right),
        area,
    );
}
