use crate::app::App;
use crate::schedule::{format_minutes, TimelineStatus};
use crate::ui::truncate;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

pub fn draw_timeline(frame: &mut Frame, area: Rect, app: &App) {
  // Derived fresh on every draw so the active entry tracks the clock.
  let timeline = app.timeline();

  let title = if app.schedule_loading() {
    " Puja Schedule (loading...) ".to_string()
  } else {
    format!(
      " Puja Schedule ({})  now {} ",
      timeline.len(),
      format_minutes(app.clock_minute())
    )
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Yellow));

  if timeline.is_empty() && !app.schedule_loading() {
    let paragraph = Paragraph::new("No schedule items found.")
      .block(block)
      .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
    return;
  }

  let items: Vec<ListItem> = timeline
    .iter()
    .map(|entry| {
      let (marker, style) = match entry.status {
        TimelineStatus::Active => ("●", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        TimelineStatus::Past => ("✓", Style::default().fg(Color::Green)),
        TimelineStatus::Upcoming => ("○", Style::default().fg(Color::DarkGray)),
      };

      let mut spans = vec![
        Span::styled(format!(" {} ", marker), style),
        Span::styled(format!("{:<9}", entry.item.time), style),
        Span::styled(truncate(&entry.item.name, 30), style),
      ];
      if entry.status == TimelineStatus::Active {
        spans.push(Span::styled(
          "  « now",
          Style::default().fg(Color::Yellow),
        ));
      }
      if !entry.item.description.is_empty() {
        spans.push(Span::styled(
          format!("  {}", truncate(&entry.item.description, 50)),
          Style::default().fg(Color::DarkGray),
        ));
      }
      ListItem::new(Line::from(spans))
    })
    .collect();

  frame.render_widget(List::new(items).block(block), area);
}
