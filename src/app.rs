use crate::clock::{Clock, SystemClock};
use crate::commands::{self, Command};
use crate::config::Config;
use crate::event::{Event, EventHandler, StoreEvent};
use crate::filter::{filter_by_category, ALL_CATEGORY};
use crate::membership::{CompletionSet, FavoriteSets};
use crate::schedule::{classify_schedule, TimelineEntry};
use crate::store::types::{ItemId, ItemType, Prayer, Ritual, ScheduleItem};
use crate::store::{CachedStoreClient, StoreClient};
use crate::ui;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
  Normal,
  Command,
}

/// Top-level pages, mirroring the companion's tab bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
  Home,
  Prayers,
  Rituals,
  Schedule,
  Favorites,
}

impl Page {
  pub const ALL: [Page; 5] = [
    Page::Home,
    Page::Prayers,
    Page::Rituals,
    Page::Schedule,
    Page::Favorites,
  ];

  pub fn title(&self) -> &'static str {
    match self {
      Page::Home => "Home",
      Page::Prayers => "Prayers",
      Page::Rituals => "Rituals",
      Page::Schedule => "Schedule",
      Page::Favorites => "Favorites",
    }
  }

  fn index(&self) -> usize {
    Page::ALL.iter().position(|p| p == self).unwrap_or(0)
  }

  fn cycle(&self, delta: i32) -> Page {
    let len = Page::ALL.len() as i32;
    let next = (self.index() as i32 + delta).rem_euclid(len);
    Page::ALL[next as usize]
  }
}

/// A row on the favorites page
pub enum FavoriteEntry<'a> {
  Prayer(&'a Prayer),
  Ritual(&'a Ritual),
}

/// Main application state
pub struct App {
  page: Page,
  mode: Mode,

  /// Command input buffer (after pressing :)
  command_input: String,
  selected_suggestion: usize,

  /// Category currently shown on the prayers page
  category: String,
  /// Prayers for the current category
  prayers: Vec<Prayer>,
  prayers_loading: bool,
  /// Unfiltered catalog, backing the home and favorites pages
  catalog: Vec<Prayer>,
  rituals: Vec<Ritual>,
  rituals_loading: bool,
  schedule_items: Vec<ScheduleItem>,
  schedule_loading: bool,

  /// Derived membership, rebuilt from raw records on every load
  favorites: FavoriteSets,
  completions: CompletionSet,

  prayers_selected: usize,
  rituals_selected: usize,
  favorites_selected: usize,

  /// Last error or notice for the status bar
  status: Option<String>,

  config: Config,
  store: CachedStoreClient<StoreClient>,
  clock: Arc<dyn Clock>,

  /// Event sender for async store tasks
  event_tx: mpsc::UnboundedSender<Event>,

  should_quit: bool,
}

impl App {
  pub async fn new(config: Config) -> Result<Self> {
    let gateway = StoreClient::new(&config)?;
    let store = CachedStoreClient::new(gateway);
    let (tx, _rx) = mpsc::unbounded_channel();

    Ok(Self {
      page: Page::Home,
      mode: Mode::Normal,
      command_input: String::new(),
      selected_suggestion: 0,
      category: ALL_CATEGORY.to_string(),
      prayers: Vec::new(),
      prayers_loading: false,
      catalog: Vec::new(),
      rituals: Vec::new(),
      rituals_loading: false,
      schedule_items: Vec::new(),
      schedule_loading: false,
      favorites: FavoriteSets::default(),
      completions: CompletionSet::default(),
      prayers_selected: 0,
      rituals_selected: 0,
      favorites_selected: 0,
      status: None,
      config,
      store,
      clock: Arc::new(SystemClock),
      event_tx: tx,
      should_quit: false,
    })
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Create event handler
    let mut events = EventHandler::new(Duration::from_millis(250));
    self.event_tx = events.sender();

    // Initial data load
    self.load_page_data();

    // Main loop
    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      if let Some(event) = events.next().await {
        self.handle_event(event);
      }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
  }

  /// Kick off the loads the current page depends on. The cache dedupes,
  /// so revisiting a page is free unless something was invalidated.
  fn load_page_data(&mut self) {
    match self.page {
      Page::Home => {
        self.load_catalog();
        self.load_schedule();
        self.load_favorites();
        self.load_completions();
      }
      Page::Prayers => {
        self.load_prayers();
        self.load_favorites();
        self.load_completions();
      }
      Page::Rituals => {
        self.load_rituals();
        self.load_favorites();
      }
      Page::Schedule => {
        self.load_schedule();
      }
      Page::Favorites => {
        self.load_catalog();
        self.load_rituals();
        self.load_favorites();
      }
    }
  }

  fn load_prayers(&mut self) {
    match self.store.cached_prayers_by_category(&self.category) {
      Some(prayers) => {
        // Fresh in the cache; show it now. The spawned fetch below resolves
        // from the same entry without touching the store.
        self.prayers = prayers;
        self.prayers_loading = false;
        self.clamp_selections();
      }
      None => {
        // Show a client-side cut of the catalog while the fetch runs.
        if !self.catalog.is_empty() {
          self.prayers = filter_by_category(&self.catalog, &self.category)
            .into_iter()
            .cloned()
            .collect();
          self.clamp_selections();
        }
        self.prayers_loading = true;
      }
    }
    let store = self.store.clone();
    let category = self.category.clone();
    let tx = self.event_tx.clone();

    tokio::spawn(async move {
      match store.prayers_by_category(&category).await {
        Ok(prayers) => {
          let _ = tx.send(Event::Store(StoreEvent::PrayersLoaded { category, prayers }));
        }
        Err(e) => {
          tracing::warn!(error = %e, category, "failed to load prayers");
          let _ = tx.send(Event::Error(e.to_string()));
        }
      }
    });
  }

  fn load_catalog(&mut self) {
    let store = self.store.clone();
    let tx = self.event_tx.clone();

    tokio::spawn(async move {
      match store.prayers().await {
        Ok(prayers) => {
          let _ = tx.send(Event::Store(StoreEvent::PrayersLoaded {
            category: ALL_CATEGORY.to_string(),
            prayers,
          }));
        }
        Err(e) => {
          tracing::warn!(error = %e, "failed to load prayer catalog");
          let _ = tx.send(Event::Error(e.to_string()));
        }
      }
    });
  }

  fn load_rituals(&mut self) {
    self.rituals_loading = true;
    let store = self.store.clone();
    let tx = self.event_tx.clone();

    tokio::spawn(async move {
      match store.rituals().await {
        Ok(rituals) => {
          let _ = tx.send(Event::Store(StoreEvent::RitualsLoaded(rituals)));
        }
        Err(e) => {
          tracing::warn!(error = %e, "failed to load rituals");
          let _ = tx.send(Event::Error(e.to_string()));
        }
      }
    });
  }

  fn load_schedule(&mut self) {
    self.schedule_loading = true;
    let store = self.store.clone();
    let tx = self.event_tx.clone();

    tokio::spawn(async move {
      match store.schedule().await {
        Ok(items) => {
          let _ = tx.send(Event::Store(StoreEvent::ScheduleLoaded(items)));
        }
        Err(e) => {
          tracing::warn!(error = %e, "failed to load schedule");
          let _ = tx.send(Event::Error(e.to_string()));
        }
      }
    });
  }

  fn load_favorites(&mut self) {
    let store = self.store.clone();
    let tx = self.event_tx.clone();

    tokio::spawn(async move {
      match store.favorites().await {
        Ok(records) => {
          let _ = tx.send(Event::Store(StoreEvent::FavoritesLoaded(records)));
        }
        Err(e) => {
          tracing::warn!(error = %e, "failed to load favorites");
          let _ = tx.send(Event::Error(e.to_string()));
        }
      }
    });
  }

  fn load_completions(&mut self) {
    let store = self.store.clone();
    let date = self.clock.today();
    let tx = self.event_tx.clone();

    tokio::spawn(async move {
      match store.completions(&date).await {
        Ok(ids) => {
          let _ = tx.send(Event::Store(StoreEvent::CompletionsLoaded { date, ids }));
        }
        Err(e) => {
          tracing::warn!(error = %e, date, "failed to load completions");
          let _ = tx.send(Event::Error(e.to_string()));
        }
      }
    });
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Tick => {} // Timeline is reclassified on every draw
      Event::Store(store_event) => self.handle_store_event(store_event),
      Event::Error(msg) => {
        self.prayers_loading = false;
        self.rituals_loading = false;
        self.schedule_loading = false;
        self.status = Some(msg);
      }
    }
  }

  pub(crate) fn handle_store_event(&mut self, event: StoreEvent) {
    match event {
      StoreEvent::PrayersLoaded { category, prayers } => {
        if category == ALL_CATEGORY {
          self.catalog = prayers.clone();
        }
        // A load for a category the user has already switched away from is
        // dropped here; its cache entry stays valid under its own key.
        if category == self.category {
          self.prayers = prayers;
          self.prayers_loading = false;
          self.clamp_selections();
        }
      }
      StoreEvent::RitualsLoaded(rituals) => {
        self.rituals = rituals;
        self.rituals_loading = false;
        self.clamp_selections();
      }
      StoreEvent::ScheduleLoaded(items) => {
        self.schedule_items = items;
        self.schedule_loading = false;
      }
      StoreEvent::FavoritesLoaded(records) => {
        self.favorites = FavoriteSets::from_records(&records);
        self.clamp_selections();
      }
      StoreEvent::CompletionsLoaded { date, ids } => {
        self.completions = CompletionSet::for_date(date, &ids);
      }
      StoreEvent::FavoriteToggled => {
        self.status = None;
        self.load_favorites();
      }
      StoreEvent::PrayerMarked { date: _ } => {
        self.status = None;
        self.load_completions();
      }
    }
  }

  fn handle_key(&mut self, key: KeyEvent) {
    match self.mode {
      Mode::Normal => self.handle_normal_mode_key(key),
      Mode::Command => self.handle_command_mode_key(key),
    }
  }

  fn handle_normal_mode_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('q') | KeyCode::Esc => {
        self.should_quit = true;
      }
      KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        self.should_quit = true;
      }

      // Page switching
      KeyCode::Tab => self.switch_page(self.page.cycle(1)),
      KeyCode::BackTab => self.switch_page(self.page.cycle(-1)),
      KeyCode::Char(c @ '1'..='5') => {
        let index = (c as usize) - ('1' as usize);
        self.switch_page(Page::ALL[index]);
      }

      // Navigation
      KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
      KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),

      // Category tabs on the prayers page
      KeyCode::Char('[') => self.cycle_category(-1),
      KeyCode::Char(']') => self.cycle_category(1),

      // Actions
      KeyCode::Char('f') => self.toggle_favorite(),
      KeyCode::Enter => self.mark_selected_completed(),

      KeyCode::Char(':') => {
        self.mode = Mode::Command;
        self.command_input.clear();
        self.selected_suggestion = 0;
      }

      _ => {}
    }
  }

  fn handle_command_mode_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.mode = Mode::Normal;
        self.command_input.clear();
        self.selected_suggestion = 0;
      }
      KeyCode::Enter => {
        self.execute_command();
        self.mode = Mode::Normal;
        self.selected_suggestion = 0;
      }
      KeyCode::Tab | KeyCode::Down => {
        let suggestions = commands::get_suggestions(&self.command_input);
        if !suggestions.is_empty() {
          self.selected_suggestion = (self.selected_suggestion + 1) % suggestions.len();
        }
      }
      KeyCode::BackTab | KeyCode::Up => {
        let suggestions = commands::get_suggestions(&self.command_input);
        if !suggestions.is_empty() {
          self.selected_suggestion = if self.selected_suggestion == 0 {
            suggestions.len() - 1
          } else {
            self.selected_suggestion - 1
          };
        }
      }
      KeyCode::Backspace => {
        self.command_input.pop();
        self.selected_suggestion = 0;
      }
      KeyCode::Char(c) => {
        self.command_input.push(c);
        self.selected_suggestion = 0;
      }
      _ => {}
    }
  }

  fn execute_command(&mut self) {
    let suggestions = commands::get_suggestions(&self.command_input);
    let cmd = if let Some(suggestion) = suggestions.get(self.selected_suggestion) {
      suggestion.name.to_string()
    } else {
      self.command_input.trim().to_lowercase()
    };

    match cmd.as_str() {
      "home" => self.switch_page(Page::Home),
      "prayers" => self.switch_page(Page::Prayers),
      "rituals" => self.switch_page(Page::Rituals),
      "schedule" => self.switch_page(Page::Schedule),
      "favorites" => self.switch_page(Page::Favorites),
      "quit" => self.should_quit = true,
      _ => {}
    }
    self.command_input.clear();
  }

  fn switch_page(&mut self, page: Page) {
    self.page = page;
    self.status = None;
    self.load_page_data();
  }

  fn cycle_category(&mut self, delta: i32) {
    if self.page != Page::Prayers {
      return;
    }
    let categories = &self.config.categories;
    if categories.is_empty() {
      return;
    }
    let current = categories
      .iter()
      .position(|c| *c == self.category)
      .unwrap_or(0);
    let next = (current as i32 + delta).rem_euclid(categories.len() as i32) as usize;
    self.category = categories[next].clone();
    self.prayers_selected = 0;
    self.load_prayers();
  }

  fn move_selection(&mut self, delta: i32) {
    let (selected, len) = match self.page {
      Page::Prayers => (&mut self.prayers_selected, self.prayers.len()),
      Page::Rituals => (&mut self.rituals_selected, self.rituals.len()),
      Page::Favorites => {
        let len = self.favorite_count();
        (&mut self.favorites_selected, len)
      }
      _ => return,
    };
    if len > 0 {
      *selected = (*selected as i32 + delta).rem_euclid(len as i32) as usize;
    }
  }

  fn clamp_selections(&mut self) {
    self.prayers_selected = self.prayers_selected.min(self.prayers.len().saturating_sub(1));
    self.rituals_selected = self.rituals_selected.min(self.rituals.len().saturating_sub(1));
    self.favorites_selected = self
      .favorites_selected
      .min(self.favorite_count().saturating_sub(1));
  }

  /// The (id, type) pair the cursor is on, if the page has one.
  fn selected_item(&self) -> Option<(ItemId, ItemType)> {
    match self.page {
      Page::Prayers => self
        .prayers
        .get(self.prayers_selected)
        .map(|p| (p.id.clone(), ItemType::Prayer)),
      Page::Rituals => self
        .rituals
        .get(self.rituals_selected)
        .map(|r| (r.id.clone(), ItemType::Ritual)),
      Page::Favorites => {
        self
          .favorite_entries()
          .get(self.favorites_selected)
          .map(|entry| match entry {
            FavoriteEntry::Prayer(p) => (p.id.clone(), ItemType::Prayer),
            FavoriteEntry::Ritual(r) => (r.id.clone(), ItemType::Ritual),
          })
      }
      _ => None,
    }
  }

  fn toggle_favorite(&mut self) {
    let Some((id, item_type)) = self.selected_item() else {
      return;
    };
    let favorited = self.favorites.is_favorited(&id, item_type);
    let store = self.store.clone();
    let tx = self.event_tx.clone();

    tokio::spawn(async move {
      let result = if favorited {
        store.remove_favorite(&id, item_type).await
      } else {
        store.add_favorite(&id, item_type).await
      };
      match result {
        Ok(()) => {
          let _ = tx.send(Event::Store(StoreEvent::FavoriteToggled));
        }
        Err(e) => {
          tracing::warn!(error = %e, id = id.as_str(), "favorite change rejected");
          let _ = tx.send(Event::Error(format!("favorite not saved: {e}")));
        }
      }
    });
  }

  fn mark_selected_completed(&mut self) {
    if self.page != Page::Prayers {
      return;
    }
    let Some(prayer) = self.prayers.get(self.prayers_selected) else {
      return;
    };
    let id = prayer.id.clone();
    if self.is_completed_today(&id) {
      return;
    }
    let date = self.clock.today();
    let store = self.store.clone();
    let tx = self.event_tx.clone();

    tokio::spawn(async move {
      match store.mark_completed(&id, &date).await {
        Ok(()) => {
          let _ = tx.send(Event::Store(StoreEvent::PrayerMarked { date }));
        }
        Err(e) => {
          tracing::warn!(error = %e, id = id.as_str(), "completion mark rejected");
          let _ = tx.send(Event::Error(format!("completion not saved: {e}")));
        }
      }
    });
  }

  // Accessors for UI rendering

  pub fn title(&self) -> &str {
    self.config.title.as_deref().unwrap_or("bhakti")
  }

  pub fn page(&self) -> Page {
    self.page
  }

  pub fn mode(&self) -> &Mode {
    &self.mode
  }

  pub fn command_input(&self) -> &str {
    &self.command_input
  }

  pub fn autocomplete_suggestions(&self) -> Vec<&'static Command> {
    commands::get_suggestions(&self.command_input)
  }

  pub fn selected_suggestion(&self) -> usize {
    self.selected_suggestion
  }

  pub fn category(&self) -> &str {
    &self.category
  }

  pub fn prayers(&self) -> &[Prayer] {
    &self.prayers
  }

  pub fn prayers_loading(&self) -> bool {
    self.prayers_loading
  }

  pub fn prayers_selected(&self) -> usize {
    self.prayers_selected
  }

  pub fn rituals(&self) -> &[Ritual] {
    &self.rituals
  }

  pub fn rituals_loading(&self) -> bool {
    self.rituals_loading
  }

  pub fn rituals_selected(&self) -> usize {
    self.rituals_selected
  }

  pub fn schedule_loading(&self) -> bool {
    self.schedule_loading
  }

  /// Schedule entries classified against the clock, freshly on every call.
  pub fn timeline(&self) -> Vec<TimelineEntry> {
    classify_schedule(&self.schedule_items, self.clock.minute_of_day())
  }

  /// Bookmarked catalog entries, prayers first, catalog order preserved.
  pub fn favorite_entries(&self) -> Vec<FavoriteEntry<'_>> {
    let prayers = self
      .catalog
      .iter()
      .filter(|p| self.favorites.is_favorited(&p.id, ItemType::Prayer))
      .map(FavoriteEntry::Prayer);
    let rituals = self
      .rituals
      .iter()
      .filter(|r| self.favorites.is_favorited(&r.id, ItemType::Ritual))
      .map(FavoriteEntry::Ritual);
    prayers.chain(rituals).collect()
  }

  fn favorite_count(&self) -> usize {
    self.favorite_entries().len()
  }

  pub fn favorites_selected(&self) -> usize {
    self.favorites_selected
  }

  pub fn is_favorited(&self, id: &ItemId, item_type: ItemType) -> bool {
    self.favorites.is_favorited(id, item_type)
  }

  /// Completion checks are date-guarded so a set loaded before a midnight
  /// rollover never answers for the new day.
  pub fn is_completed_today(&self, id: &ItemId) -> bool {
    self.completions.date() == self.clock.today() && self.completions.is_completed(id)
  }

  pub fn completed_today(&self) -> usize {
    if self.completions.date() == self.clock.today() {
      self.completions.len()
    } else {
      0
    }
  }

  pub fn catalog_size(&self) -> usize {
    self.catalog.len()
  }

  pub fn today(&self) -> String {
    self.clock.today()
  }

  pub fn clock_minute(&self) -> u32 {
    self.clock.minute_of_day()
  }

  pub fn status(&self) -> Option<&str> {
    self.status.as_deref()
  }

  #[cfg(test)]
  pub(crate) fn set_clock(&mut self, clock: Arc<dyn Clock>) {
    self.clock = clock;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::clock::FixedClock;
  use crate::store::types::FavoriteRecord;

  fn test_config() -> Config {
    Config::with_store_url("http://localhost:4943/")
  }

  fn prayer(id: u64, category: &str) -> Prayer {
    Prayer {
      id: ItemId::from(id),
      title: format!("prayer-{id}"),
      text: String::new(),
      translation: String::new(),
      category: category.to_string(),
    }
  }

  #[tokio::test]
  async fn test_page_cycling_wraps() {
    let app = App::new(test_config()).await.unwrap();
    assert_eq!(app.page(), Page::Home);
    assert_eq!(Page::Home.cycle(-1), Page::Favorites);
    assert_eq!(Page::Favorites.cycle(1), Page::Home);
  }

  #[tokio::test]
  async fn test_prayers_for_stale_category_are_dropped() {
    let mut app = App::new(test_config()).await.unwrap();
    app.category = "Evening".to_string();

    app.handle_store_event(StoreEvent::PrayersLoaded {
      category: "Morning".to_string(),
      prayers: vec![prayer(1, "Morning")],
    });
    assert!(app.prayers().is_empty());

    app.handle_store_event(StoreEvent::PrayersLoaded {
      category: "Evening".to_string(),
      prayers: vec![prayer(2, "Evening")],
    });
    assert_eq!(app.prayers().len(), 1);
  }

  #[tokio::test]
  async fn test_catalog_load_backs_favorites_page() {
    let mut app = App::new(test_config()).await.unwrap();
    app.handle_store_event(StoreEvent::PrayersLoaded {
      category: ALL_CATEGORY.to_string(),
      prayers: vec![prayer(1, "Morning"), prayer(2, "Evening")],
    });
    app.handle_store_event(StoreEvent::FavoritesLoaded(vec![FavoriteRecord {
      id: ItemId::from(2),
      item_type: ItemType::Prayer,
    }]));

    let entries = app.favorite_entries();
    assert_eq!(entries.len(), 1);
    match &entries[0] {
      FavoriteEntry::Prayer(p) => assert_eq!(p.id, ItemId::from(2)),
      FavoriteEntry::Ritual(_) => panic!("expected a prayer entry"),
    }
  }

  #[tokio::test]
  async fn test_completions_tracked_per_injected_date() {
    let mut app = App::new(test_config()).await.unwrap();
    app.set_clock(Arc::new(FixedClock::new("2025-01-15", 13 * 60)));

    app.handle_store_event(StoreEvent::CompletionsLoaded {
      date: "2025-01-15".to_string(),
      ids: vec![ItemId::from(4)],
    });

    assert!(app.is_completed_today(&ItemId::from(4)));
    assert!(!app.is_completed_today(&ItemId::from(5)));
    assert_eq!(app.completed_today(), 1);

    // After a date rollover the stale set stops answering.
    app.set_clock(Arc::new(FixedClock::new("2025-01-16", 0)));
    assert!(!app.is_completed_today(&ItemId::from(4)));
    assert_eq!(app.completed_today(), 0);
  }

  #[tokio::test]
  async fn test_timeline_uses_injected_clock() {
    let mut app = App::new(test_config()).await.unwrap();
    app.set_clock(Arc::new(FixedClock::new("2025-01-15", 13 * 60)));
    app.handle_store_event(StoreEvent::ScheduleLoaded(vec![
      ScheduleItem {
        id: ItemId::from(1),
        name: "Morning".to_string(),
        time: "06:00".to_string(),
        description: String::new(),
      },
      ScheduleItem {
        id: ItemId::from(2),
        name: "Noon".to_string(),
        time: "12:00".to_string(),
        description: String::new(),
      },
    ]));

    let timeline = app.timeline();
    assert_eq!(timeline[1].item.name, "Noon");
    assert_eq!(timeline[1].status, crate::schedule::TimelineStatus::Active);
  }

  #[tokio::test]
  async fn test_selection_clamps_when_list_shrinks() {
    let mut app = App::new(test_config()).await.unwrap();
    app.handle_store_event(StoreEvent::PrayersLoaded {
      category: ALL_CATEGORY.to_string(),
      prayers: vec![prayer(1, "Morning"), prayer(2, "Evening")],
    });
    app.prayers_selected = 1;

    app.handle_store_event(StoreEvent::PrayersLoaded {
      category: ALL_CATEGORY.to_string(),
      prayers: vec![prayer(1, "Morning")],
    });
    assert_eq!(app.prayers_selected(), 0);
  }
}
