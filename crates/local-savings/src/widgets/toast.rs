use chrono::{DateTime, Utc};
use local_savings::Severity;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use super::popup::corner_rect;
use crate::AppState;

pub struct ToastWidget;

impl ToastWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState, now: DateTime<Utc>) {
        let toasts = state.site.toasts();
        let Some(toast) = toasts.visible_at(now) else {
            return;
        };

        let color = match toast.severity() {
            Severity::Info => Color::Cyan,
            Severity::Success => Color::Green,
            Severity::Error => Color::Red,
        };
        let mut style = Style::default().fg(color);
        if toasts.is_fading(now) {
            style = style.add_modifier(Modifier::DIM);
        }

        let width = toast.message().chars().count() as u16 + 4;
        let toast_area = corner_rect(width, 3, area);

        frame.render_widget(Clear, toast_area);
        frame.render_widget(
            Paragraph::new(Line::from(toast.message().to_string()))
                .block(Block::bordered().style(style)),
            toast_area,
        );
    }
}
