use crate::store::types::{FavoriteRecord, ItemId, Prayer, Ritual, ScheduleItem};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use std::time::Duration;
use tokio::sync::mpsc;

/// Results arriving from background store calls
#[derive(Debug)]
pub enum StoreEvent {
  PrayersLoaded {
    category: String,
    prayers: Vec<Prayer>,
  },
  RitualsLoaded(Vec<Ritual>),
  ScheduleLoaded(Vec<ScheduleItem>),
  FavoritesLoaded(Vec<FavoriteRecord>),
  CompletionsLoaded {
    date: String,
    ids: Vec<ItemId>,
  },
  /// A favorite mutation succeeded; the favorites list needs a reload
  FavoriteToggled,
  /// A completion mark succeeded for this date
  PrayerMarked {
    date: String,
  },
}

/// Application events
#[derive(Debug)]
pub enum Event {
  /// Terminal key press
  Key(KeyEvent),
  /// Periodic tick for UI refresh and timeline reclassification
  Tick,
  /// Data arrived from the store
  Store(StoreEvent),
  /// A store call failed; message for the status bar
  Error(String),
}

/// Event handler that merges terminal input, a tick timer, and results
/// sent back by background store tasks
pub struct EventHandler {
  tx: mpsc::UnboundedSender<Event>,
  rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
  /// Create a new event handler with the given tick rate
  pub fn new(tick_rate: Duration) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();

    // Spawn terminal event reader
    let reader_tx = tx.clone();
    tokio::spawn(async move {
      loop {
        if event::poll(tick_rate).unwrap_or(false) {
          if let Ok(evt) = event::read() {
            if let CrosstermEvent::Key(key) = evt {
              if reader_tx.send(Event::Key(key)).is_err() {
                break;
              }
            }
          }
        } else {
          // Tick
          if reader_tx.send(Event::Tick).is_err() {
            break;
          }
        }
      }
    });

    Self { tx, rx }
  }

  /// A sender for background tasks to report store results and errors
  pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
    self.tx.clone()
  }

  /// Receive the next event
  pub async fn next(&mut self) -> Option<Event> {
    self.rx.recv().await
  }
}
