//! Schedule timeline engine.
//!
//! Parses free-form time-of-day strings, sorts schedule entries, and
//! classifies each as past/active/upcoming relative to the current clock.
//! Classification is derived state: it is recomputed on every read and
//! never cached, so there is exactly zero or one active entry at any
//! instant.

use crate::store::types::ScheduleItem;
use regex::Regex;
use std::sync::LazyLock;

/// End of day, in minutes since midnight. Upper bound for the last entry's
/// active interval.
pub const END_OF_DAY: u32 = 24 * 60;

static TIME_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)^\s*(\d{1,2}):(\d{2})\s*(AM|PM)?\s*$").unwrap());

/// Derived classification of a schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineStatus {
  Past,
  Active,
  Upcoming,
}

/// A schedule entry classified against a point in time.
#[derive(Debug, Clone)]
pub struct TimelineEntry {
  pub item: ScheduleItem,
  /// Parsed start time in minutes since midnight.
  pub minutes: u32,
  pub status: TimelineStatus,
}

/// Parse a time-of-day string to minutes since midnight.
///
/// Accepts `H:MM` or `HH:MM` with an optional case-insensitive `AM`/`PM`
/// suffix. With a meridiem, 12-hour semantics apply (12 AM is midnight,
/// 12 PM is noon); without one, the hour is read as 24-hour.
///
/// Unparseable input parses as 0 (midnight) rather than failing: sorting
/// and active-entry selection need a total order over every entry, even
/// malformed ones. The store's existing data depends on this ordering, so
/// the fallback is load-bearing and must not be turned into an error.
pub fn parse_time_to_minutes(raw: &str) -> u32 {
  let Some(caps) = TIME_RE.captures(raw) else {
    tracing::debug!(time = raw, "unparseable schedule time, treating as midnight");
    return 0;
  };

  // The grammar caps these at two digits, so the parses cannot fail.
  let mut hours: u32 = caps[1].parse().unwrap_or(0);
  let minutes: u32 = caps[2].parse().unwrap_or(0);

  match caps.get(3).map(|m| m.as_str().to_ascii_uppercase()) {
    Some(ref meridiem) if meridiem == "PM" && hours != 12 => hours += 12,
    Some(ref meridiem) if meridiem == "AM" && hours == 12 => hours = 0,
    _ => {}
  }

  hours * 60 + minutes
}

/// Render minutes since midnight back to 24-hour `HH:MM` form.
pub fn format_minutes(minutes: u32) -> String {
  format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Sort schedule entries by parsed start time and classify each against
/// `now` (minutes since midnight).
///
/// The active entry is the last one in sort order whose start time is at
/// or before `now`; its interval runs until the next entry's start time,
/// or end of day for the last entry. Before the first entry there is no
/// active item. Ties keep their original relative order (stable sort).
pub fn classify_schedule(items: &[ScheduleItem], now: u32) -> Vec<TimelineEntry> {
  let mut entries: Vec<TimelineEntry> = items
    .iter()
    .map(|item| TimelineEntry {
      minutes: parse_time_to_minutes(&item.time),
      item: item.clone(),
      status: TimelineStatus::Upcoming,
    })
    .collect();

  // Vec::sort_by_key is stable, which the tie rule relies on.
  entries.sort_by_key(|entry| entry.minutes);

  let active = entries.iter().enumerate().rev().find_map(|(i, entry)| {
    let next_start = entries
      .get(i + 1)
      .map(|next| next.minutes)
      .unwrap_or(END_OF_DAY);
    (entry.minutes <= now && now < next_start).then_some(i)
  });

  for (i, entry) in entries.iter_mut().enumerate() {
    entry.status = if Some(i) == active {
      TimelineStatus::Active
    } else if entry.minutes < now {
      TimelineStatus::Past
    } else {
      TimelineStatus::Upcoming
    };
  }

  entries
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::types::ItemId;

  fn item(id: u64, name: &str, time: &str) -> ScheduleItem {
    ScheduleItem {
      id: ItemId::from(id),
      name: name.to_string(),
      time: time.to_string(),
      description: String::new(),
    }
  }

  #[test]
  fn test_parse_known_values() {
    assert_eq!(parse_time_to_minutes("6:00 AM"), 360);
    assert_eq!(parse_time_to_minutes("06:00 PM"), 1080);
    assert_eq!(parse_time_to_minutes("12:00 AM"), 0);
    assert_eq!(parse_time_to_minutes("12:00 PM"), 720);
    assert_eq!(parse_time_to_minutes("not-a-time"), 0);
  }

  #[test]
  fn test_parse_24_hour_without_meridiem() {
    assert_eq!(parse_time_to_minutes("06:00"), 360);
    assert_eq!(parse_time_to_minutes("19:30"), 1170);
    assert_eq!(parse_time_to_minutes("0:05"), 5);
  }

  #[test]
  fn test_parse_is_lenient_about_case_and_whitespace() {
    assert_eq!(parse_time_to_minutes("  6:00 am  "), 360);
    assert_eq!(parse_time_to_minutes("6:00pm"), 1080);
    assert_eq!(parse_time_to_minutes("6:00 Pm"), 1080);
  }

  #[test]
  fn test_malformed_falls_back_to_midnight() {
    assert_eq!(parse_time_to_minutes(""), 0);
    assert_eq!(parse_time_to_minutes("morning"), 0);
    assert_eq!(parse_time_to_minutes("6:00:00"), 0);
    assert_eq!(parse_time_to_minutes("123:00"), 0);
  }

  #[test]
  fn test_format_and_reparse_is_inverse_consistent() {
    for raw in ["6:00 AM", "06:00 PM", "12:00 AM", "12:00 PM", "9:15", "23:59"] {
      let minutes = parse_time_to_minutes(raw);
      assert_eq!(parse_time_to_minutes(&format_minutes(minutes)), minutes, "{raw}");
    }
  }

  #[test]
  fn test_sort_is_stable_for_equal_minutes() {
    let items = vec![
      item(1, "first", "junk-a"),
      item(2, "second", "junk-b"),
      item(3, "early", "00:00"),
    ];
    let entries = classify_schedule(&items, 0);
    // All three parse to 0; original relative order is kept.
    let names: Vec<&str> = entries.iter().map(|e| e.item.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "early"]);
  }

  #[test]
  fn test_classification_example() {
    let items = vec![
      item(1, "Morning", "06:00"),
      item(2, "Noon", "12:00"),
      item(3, "Evening", "19:00"),
    ];
    let entries = classify_schedule(&items, 13 * 60);

    assert_eq!(entries[0].item.name, "Morning");
    assert_eq!(entries[0].status, TimelineStatus::Past);
    assert_eq!(entries[1].item.name, "Noon");
    assert_eq!(entries[1].status, TimelineStatus::Active);
    assert_eq!(entries[2].item.name, "Evening");
    assert_eq!(entries[2].status, TimelineStatus::Upcoming);
  }

  #[test]
  fn test_no_active_before_first_entry() {
    let items = vec![item(1, "Morning", "06:00"), item(2, "Noon", "12:00")];
    let entries = classify_schedule(&items, 5 * 60);
    assert!(entries.iter().all(|e| e.status == TimelineStatus::Upcoming));
  }

  #[test]
  fn test_last_entry_active_until_end_of_day() {
    let items = vec![item(1, "Morning", "06:00"), item(2, "Evening", "19:00")];
    let entries = classify_schedule(&items, 23 * 60 + 59);
    assert_eq!(entries[1].status, TimelineStatus::Active);
    assert_eq!(entries[0].status, TimelineStatus::Past);
  }

  #[test]
  fn test_entry_active_at_its_own_start_time() {
    let items = vec![item(1, "Morning", "06:00"), item(2, "Noon", "12:00")];
    let entries = classify_schedule(&items, 12 * 60);
    assert_eq!(entries[1].status, TimelineStatus::Active);
  }

  #[test]
  fn test_at_most_one_active_for_any_now() {
    let items = vec![
      item(1, "a", "06:00"),
      item(2, "b", "06:00"),
      item(3, "c", "12:30"),
      item(4, "d", "garbage"),
      item(5, "e", "11:59 PM"),
    ];
    for now in 0..END_OF_DAY {
      let entries = classify_schedule(&items, now);
      let active = entries
        .iter()
        .filter(|e| e.status == TimelineStatus::Active)
        .count();
      assert!(active <= 1, "now={now} had {active} active entries");
    }
  }

  #[test]
  fn test_active_entry_interval_bounds() {
    let items = vec![
      item(1, "a", "06:00"),
      item(2, "b", "12:00"),
      item(3, "c", "19:00"),
    ];
    for now in 0..END_OF_DAY {
      let entries = classify_schedule(&items, now);
      if let Some(i) = entries.iter().position(|e| e.status == TimelineStatus::Active) {
        let next_start = entries.get(i + 1).map(|e| e.minutes).unwrap_or(END_OF_DAY);
        assert!(entries[i].minutes <= now && now < next_start);
      } else {
        assert!(now < entries[0].minutes);
      }
    }
  }
}
