use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState},
    Frame,
};

use crate::AppState;

pub struct ListingsWidget;

impl ListingsWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState, now: DateTime<Utc>) {
        let urgent = state.site.urgent_listings(now);
        let favorites = state.site.favorites();

        let items: Vec<ListItem> = state
            .visible_listings()
            .into_iter()
            .map(|listing| {
                let star = if favorites.is_favorite(listing.id()) {
                    Span::styled("★ ", Style::default().fg(Color::Yellow))
                } else {
                    Span::styled("☆ ", Style::default().fg(Color::Gray))
                };

                let mut title = vec![
                    star,
                    Span::styled(
                        listing.name().to_string(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", listing.kind().name()),
                        Style::default().fg(Color::Gray),
                    ),
                ];
                if let Some((_, badge)) = urgent.iter().find(|(l, _)| l.id() == listing.id()) {
                    title.push(Span::styled(
                        format!("  {}", badge),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ));
                }

                let mut lines = vec![Line::from(title)];
                let board = state.site.deals().deals_for(listing.id());
                let deals = if board.is_empty() { listing.deals() } else { board };
                for deal in deals {
                    let style = if deal.is_best_deal() {
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::Green)
                    };
                    lines.push(Line::from(vec![
                        Span::raw("    "),
                        Span::styled(format!("{} {} ", deal.item, deal.price), Style::default().fg(Color::White)),
                        Span::styled(deal.savings.clone(), style),
                    ]));
                }

                ListItem::new(lines)
            })
            .collect();

        let title = if state.searching || !state.search_term.is_empty() {
            format!("Stores & Businesses  search: {}", state.search_term)
        } else {
            "Stores & Businesses".to_string()
        };

        let list = List::new(items)
            .block(Block::bordered().title(title))
            .highlight_style(Style::default().bg(Color::DarkGray));

        let mut list_state = ListState::default().with_selected(Some(state.listing_cursor));
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
