use crate::app::App;
use crate::store::types::ItemType;
use crate::ui::truncate;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

pub fn draw_prayer_list(frame: &mut Frame, area: Rect, app: &App) {
  let prayers = app.prayers();

  let title = if app.prayers_loading() {
    format!(" Prayers [{}] (loading...) ", app.category())
  } else {
    format!(" Prayers [{}] ({}) ", app.category(), prayers.len())
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Yellow));

  if prayers.is_empty() && !app.prayers_loading() {
    let paragraph = Paragraph::new("No prayers in this category.")
      .block(block)
      .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
    return;
  }

  let items: Vec<ListItem> = prayers
    .iter()
    .map(|prayer| {
      let completed = app.is_completed_today(&prayer.id);
      let favorited = app.is_favorited(&prayer.id, ItemType::Prayer);

      let marker = if completed { "✓" } else { " " };
      let star = if favorited { "★" } else { " " };

      let line = Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Green)),
        Span::styled(star, Style::default().fg(Color::Yellow)),
        Span::raw(" "),
        Span::styled(
          format!("{:<10}", truncate(&prayer.category, 10)),
          Style::default().fg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled(
          truncate(&prayer.title, 40),
          if completed {
            Style::default().fg(Color::DarkGray)
          } else {
            Style::default()
          },
        ),
        Span::raw("  "),
        Span::styled(
          truncate(&prayer.translation, 40),
          Style::default().fg(Color::DarkGray),
        ),
      ]);
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
  state.select(Some(app.prayers_selected()));

  frame.render_stateful_widget(list, area, &mut state);
}
