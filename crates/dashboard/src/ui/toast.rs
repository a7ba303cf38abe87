use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
    toast::{Toast, ToastLevel},
    ui::theme::Theme,
};

/// Stack toasts in the top-right corner, newest first.
pub fn render(frame: &mut Frame<'_>, area: Rect, toasts: &[Toast]) {
    let theme = Theme::default();
    let height = 3u16;

    for (index, toast) in toasts.iter().rev().enumerate() {
        let y = area.y + 1 + (index as u16) * height;
        if y + height > area.y + area.height {
            break;
        }
        let width = (toast.message.chars().count() + 4).min(area.width as usize) as u16;
        let x = area.x + area.width.saturating_sub(width + 1);
        let rect = Rect {
            x,
            y,
            width,
            height,
        };

        let style = match toast.level {
            ToastLevel::Success => Style::default().fg(theme.positive),
            ToastLevel::Error => Style::default().fg(theme.error),
        };

        let block = Block::default().borders(Borders::ALL).border_style(style);
        let content = Paragraph::new(Line::from(toast.message.as_str())).style(style);
        frame.render_widget(Clear, rect);
        frame.render_widget(content.block(block), rect);
    }
}
