use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::AppState;

pub struct EventsWidget;

impl EventsWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let lines: Vec<Line> = state
            .site
            .events()
            .iter()
            .zip(state.site.countdown_labels())
            .map(|(event, (_, label))| {
                Line::from(vec![
                    Span::styled(format!("{}: ", event.name), Style::default().fg(Color::White)),
                    Span::styled(label.clone(), Style::default().fg(Color::Cyan)),
                ])
            })
            .collect();

        let events = Paragraph::new(lines).block(Block::bordered().title("Upcoming Events"));

        frame.render_widget(events, area);
    }
}
