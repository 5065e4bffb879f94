use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::AppState;

pub struct ShortcutsWidget;

impl ShortcutsWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let key = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let text = Style::default().fg(Color::Gray);

        let mut spans = if state.searching {
            vec![
                Span::styled("Type to search, ", text),
                Span::styled("Enter", key),
                Span::styled(" or ", text),
                Span::styled("Esc", key),
                Span::styled(" to finish", text),
            ]
        } else {
            vec![
                Span::styled("q", key),
                Span::styled(" quit  ", text),
                Span::styled("←/→", key),
                Span::styled(" calculator  ", text),
                Span::styled("Tab", key),
                Span::styled(" field  ", text),
                Span::styled("↑/↓", key),
                Span::styled(" listing  ", text),
                Span::styled("f", key),
                Span::styled(" favorite  ", text),
                Span::styled("/", key),
                Span::styled(" search  ", text),
                Span::styled("p", key),
                Span::styled(" gas prices  ", text),
                Span::styled("m", key),
                Span::styled(" menu", text),
            ]
        };

        if state.site.back_to_top() {
            spans.push(Span::styled("  Home", key));
            spans.push(Span::styled(" back to top", text));
        }

        let shortcuts = Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center);

        frame.render_widget(shortcuts, area);
    }
}
