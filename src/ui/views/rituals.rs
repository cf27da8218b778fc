use crate::app::App;
use crate::store::types::ItemType;
use crate::ui::truncate;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

pub fn draw_ritual_list(frame: &mut Frame, area: Rect, app: &App) {
  let rituals = app.rituals();

  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(3), Constraint::Length(8)])
    .split(area);

  let title = if app.rituals_loading() {
    " Rituals (loading...) ".to_string()
  } else {
    format!(" Rituals ({}) ", rituals.len())
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Yellow));

  if rituals.is_empty() && !app.rituals_loading() {
    let paragraph = Paragraph::new("No rituals found.")
      .block(block)
      .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, chunks[0]);
    return;
  }

  let items: Vec<ListItem> = rituals
    .iter()
    .map(|ritual| {
      let star = if app.is_favorited(&ritual.id, ItemType::Ritual) {
        "★"
      } else {
        " "
      };
      let line = Line::from(vec![
        Span::styled(star, Style::default().fg(Color::Yellow)),
        Span::raw(" "),
        Span::styled(truncate(&ritual.title, 40), Style::default()),
        Span::raw("  "),
        Span::styled(
          format!("{} steps", ritual.steps.len()),
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
  state.select(Some(app.rituals_selected()));
  frame.render_stateful_widget(list, chunks[0], &mut state);

  // Step sequence of the selected ritual, in stored order
  if let Some(ritual) = rituals.get(app.rituals_selected()) {
    let mut lines = vec![Line::from(Span::styled(
      truncate(&ritual.description, 80),
      Style::default().fg(Color::DarkGray),
    ))];
    for (i, step) in ritual.steps.iter().enumerate() {
      lines.push(Line::from(vec![
        Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(Color::Cyan)),
        Span::raw(truncate(step, 90)),
      ]));
    }

    let detail = Paragraph::new(lines).block(
      Block::default()
        .title(format!(" {} ", ritual.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(detail, chunks[1]);
  }
}
