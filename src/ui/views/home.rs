use crate::app::App;
use crate::schedule::{format_minutes, TimelineStatus};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn draw_home(frame: &mut Frame, area: Rect, app: &App) {
  let timeline = app.timeline();
  let active = timeline
    .iter()
    .find(|e| e.status == TimelineStatus::Active);
  let upcoming = timeline
    .iter()
    .find(|e| e.status == TimelineStatus::Upcoming);

  let mut lines = vec![
    Line::from(vec![
      Span::styled("Today   ", Style::default().fg(Color::DarkGray)),
      Span::styled(app.today(), Style::default().add_modifier(Modifier::BOLD)),
      Span::raw("  "),
      Span::styled(
        format_minutes(app.clock_minute()),
        Style::default().fg(Color::Yellow),
      ),
    ]),
    Line::default(),
    Line::from(vec![
      Span::styled("Prayers ", Style::default().fg(Color::DarkGray)),
      Span::raw(format!(
        "{} completed today of {} in the catalog",
        app.completed_today(),
        app.catalog_size()
      )),
    ]),
  ];

  match active {
    Some(entry) => lines.push(Line::from(vec![
      Span::styled("Now     ", Style::default().fg(Color::DarkGray)),
      Span::styled(
        format!("{} ({})", entry.item.name, entry.item.time),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
      ),
    ])),
    None => lines.push(Line::from(vec![
      Span::styled("Now     ", Style::default().fg(Color::DarkGray)),
      Span::styled("nothing scheduled", Style::default().fg(Color::DarkGray)),
    ])),
  }

  if let Some(entry) = upcoming {
    lines.push(Line::from(vec![
      Span::styled("Next    ", Style::default().fg(Color::DarkGray)),
      Span::raw(format!("{} ({})", entry.item.name, entry.item.time)),
    ]));
  }

  lines.push(Line::default());
  lines.push(Line::from(Span::styled(
    "Use Tab or 1-5 to browse prayers, rituals, the schedule, and favorites.",
    Style::default().fg(Color::DarkGray),
  )));

  let block = Block::default()
    .title(" Today at a glance ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Yellow));

  frame.render_widget(Paragraph::new(lines).block(block), area);
}
