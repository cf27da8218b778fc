//! Injectable clock.
//!
//! "Today" and "now" are always threaded in from a clock object rather than
//! read from ambient global state, so tests can pin time deterministically
//! and completion queries stay scoped to an explicit date string.

use chrono::{Local, Timelike};

pub trait Clock: Send + Sync {
  /// Today's date as `YYYY-MM-DD`, in local time.
  fn today(&self) -> String;

  /// Minutes since local midnight, in [0, 1439].
  fn minute_of_day(&self) -> u32;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn today(&self) -> String {
    Local::now().format("%Y-%m-%d").to_string()
  }

  fn minute_of_day(&self) -> u32 {
    let now = Local::now();
    now.hour() * 60 + now.minute()
  }
}

/// A clock pinned to a fixed date and minute, for tests.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct FixedClock {
  pub date: String,
  pub minute: u32,
}

#[cfg(test)]
impl FixedClock {
  pub fn new(date: impl Into<String>, minute: u32) -> Self {
    Self {
      date: date.into(),
      minute,
    }
  }
}

#[cfg(test)]
impl Clock for FixedClock {
  fn today(&self) -> String {
    self.date.clone()
  }

  fn minute_of_day(&self) -> u32 {
    self.minute
  }
}
