use anyhow::Result;
use ratatui::widgets::ListState;
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tracing::{debug, error, info};

use crate::constants::constants;
use crate::film::Film;
use crate::selection::Selection;
use crate::swapi::{FetchState, fetch_films};
use crate::theme::{self, THEMES};
use crate::view::{SortMode, compute_view};

/// Which widget receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  Search,
  List,
}

/// Startup values resolved from CLI flags, the config file and constants.
#[derive(Debug, Clone)]
pub struct Settings {
  pub api_url: String,
  pub search: String,
  pub sort: SortMode,
  pub theme_name: Option<String>,
}

pub struct App {
  pub api_url: String,
  /// Films in the order the API returned them. Replaced once, never edited.
  pub catalog: Vec<Arc<Film>>,
  /// `compute_view(catalog, search, sort)`, refreshed whenever one of those changes.
  pub view: Vec<Arc<Film>>,
  pub fetch: FetchState,
  pub search: String,
  /// Cursor position within the search input (char index).
  pub search_cursor: usize,
  /// Horizontal scroll offset for the search input.
  pub search_scroll: usize,
  pub sort: SortMode,
  pub selection: Selection,
  /// Highlighted row of `view`.
  pub list_state: ListState,
  pub focus: Focus,
  pub theme_index: usize,
  pub last_error: Option<String>,
  pub should_quit: bool,
  fetch_rx: Option<oneshot::Receiver<Result<Vec<Film>>>>,
  error_time: Option<Instant>,
}

impl App {
  pub fn new(settings: Settings) -> Self {
    let search_cursor = settings.search.chars().count();
    Self {
      api_url: settings.api_url,
      catalog: Vec::new(),
      view: Vec::new(),
      fetch: FetchState::Pending,
      search: settings.search,
      search_cursor,
      search_scroll: 0,
      sort: settings.sort,
      selection: Selection::default(),
      list_state: ListState::default(),
      focus: Focus::Search,
      theme_index: theme::index_of(settings.theme_name.as_deref()),
      last_error: None,
      should_quit: false,
      fetch_rx: None,
      error_time: None,
    }
  }

  pub fn theme(&self) -> &'static theme::Theme {
    // Safety: theme_index comes from theme::index_of or modular arithmetic in next_theme().
    &THEMES[self.theme_index]
  }

  pub fn next_theme(&mut self) {
    self.theme_index = (self.theme_index + 1) % THEMES.len();
  }

  /// Set an error message with auto-dismiss tracking.
  pub fn set_error(&mut self, msg: String) {
    self.last_error = Some(msg);
    self.error_time = Some(Instant::now());
  }

  pub fn clear_error(&mut self) {
    self.last_error = None;
    self.error_time = None;
  }

  /// Clear stale error messages after `error_display_secs`.
  pub fn expire_error(&mut self) {
    if let Some(t) = self.error_time
      && t.elapsed() >= Duration::from_secs(constants().error_display_secs)
    {
      self.clear_error();
    }
  }

  // --- Catalog fetch ---

  /// Spawn the one catalog fetch. Later calls are ignored.
  pub fn start_fetch(&mut self, client: Client) {
    if self.fetch_rx.is_some() || self.fetch != FetchState::Pending {
      return;
    }
    let url = self.api_url.clone();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
      let _ = tx.send(fetch_films(&client, &url).await);
    });
    self.fetch_rx = Some(rx);
  }

  /// Poll the fetch task without blocking.
  pub fn check_pending(&mut self) {
    let Some(mut rx) = self.fetch_rx.take() else { return };
    match rx.try_recv() {
      Ok(result) => self.receive_catalog(result),
      Err(oneshot::error::TryRecvError::Empty) => {
        self.fetch_rx = Some(rx);
      }
      Err(oneshot::error::TryRecvError::Closed) => {
        self.receive_catalog(Err(anyhow::anyhow!("Fetch task stopped before reporting a result.")));
      }
    }
  }

  /// Apply the fetch outcome. Only the first outcome counts.
  pub fn receive_catalog(&mut self, result: Result<Vec<Film>>) {
    if self.fetch != FetchState::Pending {
      debug!("films: ignoring repeated fetch outcome");
      return;
    }
    match result {
      Ok(films) => {
        info!(count = films.len(), "films: catalog loaded");
        self.catalog = films.into_iter().map(Arc::new).collect();
        self.fetch = FetchState::Loaded;
        self.refresh_view();
      }
      Err(e) => {
        let msg = format!("{:#}", e);
        error!(err = %msg, "films: fetch failed");
        self.fetch = FetchState::Failed(msg);
      }
    }
  }

  // --- Derived view ---

  /// Recompute `view` and keep the list highlight on the same film when it survives.
  pub fn refresh_view(&mut self) {
    let highlighted = self.highlighted().cloned();
    self.view = compute_view(&self.catalog, &self.search, self.sort);
    debug!(search = %self.search, sort = self.sort.label(), shown = self.view.len(), "view recomputed");

    if self.view.is_empty() {
      self.list_state.select(None);
      return;
    }
    let kept = highlighted.and_then(|h| self.view.iter().position(|f| Arc::ptr_eq(f, &h)));
    let row = kept.unwrap_or_else(|| self.list_state.selected().unwrap_or(0).min(self.view.len() - 1));
    self.list_state.select(Some(row));
  }

  pub fn set_search(&mut self, search: String) {
    self.search = search;
    self.search_cursor = self.search_cursor.min(self.search.chars().count());
    self.refresh_view();
  }

  pub fn set_sort(&mut self, sort: SortMode) {
    if self.sort != sort {
      info!(sort = sort.label(), "sort mode changed");
      self.sort = sort;
      self.refresh_view();
    }
  }

  pub fn highlighted(&self) -> Option<&Arc<Film>> {
    self.list_state.selected().and_then(|i| self.view.get(i))
  }

  /// Move the list highlight by one row, wrapping at both ends.
  pub fn move_highlight(&mut self, down: bool) {
    let count = self.view.len();
    if count == 0 {
      return;
    }
    let i = match self.list_state.selected() {
      None => 0,
      Some(i) if down => (i + 1) % count,
      Some(0) => count - 1,
      Some(i) => i - 1,
    };
    self.list_state.select(Some(i));
  }

  /// Make the highlighted film the selection shown in the detail pane.
  pub fn select_highlighted(&mut self) {
    let Some(film) = self.highlighted().cloned() else { return };
    info!(title = %film.title, "film selected");
    self.selection.select(film);
  }
}
