use local_savings::data_structures::fields as ids;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::AppState;

pub struct TotalsWidget;

impl TotalsWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let line = if state.fields.is_visible(ids::TOTAL_SAVINGS_DISPLAY) {
            Line::from(vec![
                Span::styled("Potential annual savings: ", Style::default().fg(Color::White)),
                Span::styled(
                    state
                        .fields
                        .text(ids::TOTAL_ANNUAL_SAVINGS)
                        .unwrap_or("$0")
                        .to_string(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("  That's about ", Style::default().fg(Color::White)),
                Span::styled(
                    state
                        .fields
                        .text(ids::INSURANCE_COMPARISON)
                        .unwrap_or("0")
                        .to_string(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(
                        " months of car insurance at ${:.0}/month",
                        state.site.engine().reference_monthly_cost()
                    ),
                    Style::default().fg(Color::White),
                ),
            ])
        } else {
            Line::from(Span::styled(
                "Fill in a calculator to see your total savings",
                Style::default().fg(Color::Gray),
            ))
        };

        let totals = Paragraph::new(vec![line])
            .block(Block::bordered().title("Your Savings"))
            .alignment(Alignment::Center);

        frame.render_widget(totals, area);
    }
}
