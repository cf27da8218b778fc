mod views;

use crate::app::{App, Mode, Page};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header with page tabs
      Constraint::Min(1),    // Main content
      Constraint::Length(1), // Status bar
    ])
    .split(frame.area());

  draw_header(frame, chunks[0], app);

  match app.page() {
    Page::Home => views::home::draw_home(frame, chunks[1], app),
    Page::Prayers => views::prayers::draw_prayer_list(frame, chunks[1], app),
    Page::Rituals => views::rituals::draw_ritual_list(frame, chunks[1], app),
    Page::Schedule => views::schedule::draw_timeline(frame, chunks[1], app),
    Page::Favorites => views::favorites::draw_favorite_list(frame, chunks[1], app),
  }

  draw_status_bar(frame, chunks[2], app);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
  let mut spans = vec![
    Span::styled(
      format!(" {} ", app.title()),
      Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ),
    Span::raw(" "),
  ];

  for (i, page) in Page::ALL.iter().enumerate() {
    let label = format!(" {}:{} ", i + 1, page.title());
    let style = if *page == app.page() {
      Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
      Style::default().fg(Color::DarkGray)
    };
    spans.push(Span::styled(label, style));
  }

  frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
  let line = match app.mode() {
    Mode::Command => {
      let mut spans = vec![Span::styled(
        format!(":{}", app.command_input()),
        Style::default().fg(Color::White),
      )];
      for (i, cmd) in app.autocomplete_suggestions().iter().enumerate() {
        let style = if i == app.selected_suggestion() {
          Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
          Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(cmd.name, style));
      }
      Line::from(spans)
    }
    Mode::Normal => {
      if let Some(message) = app.status() {
        Line::from(Span::styled(message, Style::default().fg(Color::Red)))
      } else {
        Line::from(Span::styled(
          " j/k move  Tab pages  f favorite  Enter done  [/] category  : command  q quit",
          Style::default().fg(Color::DarkGray),
        ))
      }
    }
  };

  frame.render_widget(Paragraph::new(line), area);
}

/// Truncate a string for narrow list columns
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", cut)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truncate_short_strings_untouched() {
    assert_eq!(truncate("om", 10), "om");
  }

  #[test]
  fn test_truncate_respects_char_boundaries() {
    // Multi-byte Devanagari must not be split mid-character.
    let truncated = truncate("ॐ नमः शिवाय ॐ नमः शिवाय", 10);
    assert!(truncated.ends_with("..."));
    assert!(truncated.chars().count() <= 10);
  }
}
