use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::AppState;

pub struct HeaderWidget;

impl HeaderWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let weather = match state.site.weather() {
            Some(reading) => format!(
                "{} {}",
                reading.temperature_label(),
                reading.condition().label()
            ),
            None => "--°F".to_string(),
        };

        let mut spans = vec![
            Span::styled(
                "Save in Elkin",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(weather, Style::default().fg(Color::Yellow)),
        ];

        if let Some(updated) = state.site.deals().last_updated_label() {
            spans.push(Span::styled(
                format!("  Deals updated {}", updated),
                Style::default().fg(Color::Gray),
            ));
        }

        let header = Paragraph::new(vec![Line::from(spans)])
            .block(Block::bordered().title("Local Savings"))
            .alignment(Alignment::Center);

        frame.render_widget(header, area);
    }
}
