use crate::app::{App, FavoriteEntry};
use crate::ui::truncate;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

pub fn draw_favorite_list(frame: &mut Frame, area: Rect, app: &App) {
  let entries = app.favorite_entries();

  let block = Block::default()
    .title(format!(" Favorites ({}) ", entries.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Yellow));

  if entries.is_empty() {
    let paragraph = Paragraph::new("Nothing bookmarked yet. Press f on a prayer or ritual.")
      .block(block)
      .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
    return;
  }

  let items: Vec<ListItem> = entries
    .iter()
    .map(|entry| {
      let line = match entry {
        FavoriteEntry::Prayer(prayer) => Line::from(vec![
          Span::styled("prayer ", Style::default().fg(Color::Cyan)),
          Span::raw(truncate(&prayer.title, 40)),
          Span::raw("  "),
          Span::styled(
            truncate(&prayer.category, 12),
            Style::default().fg(Color::DarkGray),
          ),
        ]),
        FavoriteEntry::Ritual(ritual) => Line::from(vec![
          Span::styled("ritual ", Style::default().fg(Color::Magenta)),
          Span::raw(truncate(&ritual.title, 40)),
          Span::raw("  "),
          Span::styled(
            format!("{} steps", ritual.steps.len()),
            Style::default().fg(Color::DarkGray),
          ),
        ]),
      };
      ListItem::new(line)
    })
    .collect();

  let list = List::new(items)
    .block(block)
    .highlight_style(
      Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");

  let mut state = ListState::default();
  state.select(Some(app.favorites_selected()));
  frame.render_stateful_widget(list, area, &mut state);
}
