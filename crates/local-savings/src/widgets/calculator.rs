use local_savings::data_structures::fields as ids;
use local_savings::Category;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::AppState;

pub struct CalculatorWidget;

impl CalculatorWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let active = state.site.panels().active();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(6)])
            .split(area);

        let titles: Vec<Line> = Category::ALL
            .iter()
            .map(|category| Line::from(category.name()))
            .collect();
        let selected = Category::ALL
            .iter()
            .position(|category| *category == active)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .block(Block::bordered().title("Calculators"))
            .select(selected)
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, chunks[0]);

        let mut lines = vec![Line::from(Span::styled(
            active.description(),
            Style::default().fg(Color::Gray),
        ))];
        lines.push(Line::from(" "));

        for (index, id) in active.input_ids().iter().enumerate() {
            let focused = index == state.focus;
            let value = state.fields.input(id).unwrap_or("");
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} {:<28}", if focused { "▶" } else { " " }, field_label(id)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{}{}", value, if focused { "▏" } else { "" }),
                    if focused {
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::Yellow)
                    },
                ),
            ]));
        }

        lines.push(Line::from(" "));
        lines.push(Self::output_line("Weekly", state.fields.text(&active.weekly_output_id())));
        lines.push(Self::output_line("Monthly", state.fields.text(&active.monthly_output_id())));
        lines.push(Self::output_line("Annual", state.fields.text(&active.annual_output_id())));
        lines.push(Line::from(" "));

        if let Some(insight) = state.fields.text(&active.insight_id()) {
            let rejected = state.site.engine().project(active, &state.fields).is_rejected();
            lines.push(Line::from(Span::styled(
                insight.to_string(),
                Style::default().fg(if rejected { Color::Red } else { Color::Cyan }),
            )));
        }

        let panel = Paragraph::new(lines)
            .block(Block::bordered().title(active.panel_id()))
            .wrap(Wrap { trim: true });

        frame.render_widget(panel, chunks[1]);
    }

    fn output_line<'a>(label: &'a str, value: Option<&str>) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("  {:<10}", label), Style::default().fg(Color::White)),
            Span::styled(
                value.unwrap_or("$0.00").to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    }
}

pub fn field_label(id: &str) -> &'static str {
    match id {
        ids::MILES_PER_WEEK => "Miles driven per week",
        ids::MPG => "Miles per gallon",
        ids::EXPENSIVE_PRICE => "Expensive station ($/gal)",
        ids::CHEAP_PRICE => "Cheap station ($/gal)",
        ids::WEEKLY_GROCERY_BUDGET => "Weekly grocery budget ($)",
        ids::SALE_PERCENTAGE => "Bought on sale (%)",
        ids::AVERAGE_DISCOUNT => "Average sale discount (%)",
        ids::COUPON_SAVINGS => "Weekly coupon savings ($)",
        ids::MEALS_OUT_PER_WEEK => "Meals out per week",
        ids::AVERAGE_MEAL_COST => "Average meal out ($)",
        ids::HOME_MEAL_COST => "Home-cooked meal ($)",
        ids::MEALS_TO_REDUCE => "Meals to cook instead",
        _ => "Value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_input_has_a_label() {
        for category in Category::ALL {
            for id in category.input_ids() {
                assert_ne!(field_label(id), "Value", "{}", id);
            }
        }
    }
}
