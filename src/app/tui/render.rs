use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::super::catalog::{format_episode_code, strip_markup, truncate};
use super::super::state::{CatalogState, ViewMode};
use super::super::view::ViewDescription;
use super::Focus;

pub(super) fn draw_tui(
    frame: &mut Frame,
    state: &CatalogState,
    view: &ViewDescription,
    list_state: &mut ListState,
    focus: Focus,
    status: &str,
    loading: bool,
) {
    let bg = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(bg, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let mode_text = match state.mode() {
        ViewMode::Shows => "SHOWS",
        ViewMode::Episodes => "EPISODES",
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "MAZEVIEW",
            Style::default()
                .fg(Color::Rgb(110, 170, 255))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   ", Style::default()),
        Span::styled(mode_text, Style::default().fg(Color::Yellow)),
        Span::styled("   ", Style::default()),
        Span::styled(
            view.count_line.clone(),
            Style::default().fg(Color::Rgb(185, 195, 210)),
        ),
        Span::styled(
            "   Tab focus  ↑/↓ move  Enter open  Esc back  q quit",
            Style::default().fg(Color::Rgb(125, 135, 150)),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(panel_block("Dashboard"));
    frame.render_widget(header, chunks[0]);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(36), Constraint::Percentage(64)])
        .split(chunks[1]);

    let (jump_title, jump_items) = jump_list_items(state);
    let jump_list = List::new(jump_items)
        .block(panel_block(jump_title))
        .highlight_style(
            Style::default()
                .bg(Color::Rgb(110, 170, 255))
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");
    frame.render_stateful_widget(jump_list, body_chunks[0], list_state);

    let cards = Paragraph::new(card_lines(view, loading))
        .wrap(Wrap { trim: true })
        .block(panel_block("Cards"));
    frame.render_widget(cards, body_chunks[1]);

    let search_style = if focus == Focus::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Rgb(125, 135, 150))
    };
    let search_text = if state.filter_term().is_empty() {
        Line::from(Span::styled(
            "Type to search by name or summary...",
            Style::default().fg(Color::Rgb(125, 135, 150)),
        ))
    } else {
        Line::from(state.filter_term().to_string())
    };
    let search = Paragraph::new(search_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(search_style)
            .title("Search"),
    );
    frame.render_widget(search, chunks[2]);

    let status_widget = Paragraph::new(status.to_string())
        .style(status_style(status))
        .block(panel_block("Status"));
    frame.render_widget(status_widget, chunks[3]);
}

fn jump_list_items(state: &CatalogState) -> (&'static str, Vec<ListItem<'static>>) {
    match state.mode() {
        ViewMode::Shows => {
            let items = state
                .shows()
                .iter()
                .map(|show| ListItem::new(truncate(&show.name, 40)))
                .collect();
            ("Choose a show", items)
        }
        ViewMode::Episodes => {
            let mut items = vec![ListItem::new("All episodes".to_string())];
            items.extend(state.episodes().iter().map(|episode| {
                let code = format_episode_code(episode.season, episode.number);
                ListItem::new(truncate(&format!("{code} - {}", episode.name), 40))
            }));
            ("Jump to episode", items)
        }
    }
}

fn card_lines(view: &ViewDescription, loading: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if loading {
        lines.push(Line::from(Span::styled(
            "Loading...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
    }

    if let Some(status) = &view.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Rgb(255, 145, 120)),
        )));
    } else {
        for card in &view.cards {
            lines.push(Line::from(Span::styled(
                card.title.clone(),
                Style::default()
                    .fg(Color::Rgb(110, 170, 255))
                    .add_modifier(Modifier::BOLD),
            )));
            if let Some(meta) = &card.meta {
                lines.push(Line::from(Span::styled(
                    meta.clone(),
                    Style::default().fg(Color::Rgb(185, 195, 210)),
                )));
            }
            if let Some(summary) = &card.summary {
                lines.push(Line::from(Span::styled(
                    strip_markup(summary).trim().to_string(),
                    Style::default().fg(Color::Rgb(230, 230, 230)),
                )));
            }
            if let Some(link) = &card.link {
                lines.push(Line::from(Span::styled(
                    link.clone(),
                    Style::default().fg(Color::Rgb(125, 135, 150)),
                )));
            }
            lines.push(Line::default());
        }
    }

    if let Some(attribution) = view.attribution {
        lines.push(Line::from(Span::styled(
            attribution,
            Style::default().fg(Color::Rgb(125, 135, 150)),
        )));
    }

    lines
}

fn panel_block(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(125, 135, 150)))
        .title(title)
}

fn status_style(status: &str) -> Style {
    if status.starts_with("ERROR:") {
        Style::default()
            .fg(Color::Rgb(255, 145, 120))
            .add_modifier(Modifier::BOLD)
    } else if status.starts_with("INFO:") {
        Style::default().fg(Color::Rgb(205, 165, 255))
    } else {
        Style::default().fg(Color::Rgb(230, 235, 242))
    }
}
