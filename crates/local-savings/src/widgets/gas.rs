use local_savings::gas::price_spread;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::AppState;

pub struct GasWidget;

impl GasWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let gas = state.site.gas();
        let prices = gas.prices();

        let lines: Vec<Line> = if prices.is_empty() {
            gas.links()
                .into_iter()
                .map(|link| {
                    Line::from(vec![
                        Span::styled(
                            format!("{} ", link.name),
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(link.url, Style::default().fg(Color::Gray)),
                    ])
                })
                .collect()
        } else {
            let cheapest = price_spread(&prices).map(|spread| spread.cheapest.0);
            prices
                .iter()
                .map(|(station, price)| {
                    let is_cheapest = cheapest.as_deref() == Some(station.as_str());
                    Line::from(vec![
                        Span::styled(format!("${:.2} ", price), Style::default().fg(Color::Green)),
                        Span::styled(
                            station.clone(),
                            if is_cheapest {
                                Style::default()
                                    .fg(Color::Yellow)
                                    .add_modifier(Modifier::BOLD)
                            } else {
                                Style::default().fg(Color::White)
                            },
                        ),
                    ])
                })
                .collect()
        };

        let title = match gas.as_of() {
            Some(date) => format!("{} (as of {})", gas.name(), date.format("%b %-d, %Y")),
            None => gas.name().to_string(),
        };

        let panel = Paragraph::new(lines).block(Block::bordered().title(title));

        frame.render_widget(panel, area);
    }
}
