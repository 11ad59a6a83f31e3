use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Focus};
use crate::swapi::FetchState;

// --- Helpers ---

/// Convert a char index to a byte offset within the string.
pub fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
  s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

// --- Event Handling ---

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
    app.should_quit = true;
    return;
  }

  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('t') {
    app.next_theme();
    return;
  }

  match key.code {
    KeyCode::Tab => {
      app.set_sort(app.sort.next());
      return;
    }
    KeyCode::BackTab => {
      app.set_sort(app.sort.prev());
      return;
    }
    _ => {}
  }

  // The error banner replaces the whole view; only quitting is left.
  if let FetchState::Failed(_) = app.fetch {
    if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
      app.should_quit = true;
    }
    return;
  }

  match app.focus {
    Focus::Search => handle_search_key(app, key),
    Focus::List => handle_list_key(app, key),
  }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
  app.clear_error();
  match key.code {
    KeyCode::Char(c) => {
      let mut search = std::mem::take(&mut app.search);
      search.insert(char_to_byte_index(&search, app.search_cursor), c);
      app.search_cursor += 1;
      app.set_search(search);
    }
    KeyCode::Backspace => {
      if app.search_cursor > 0 {
        let mut search = std::mem::take(&mut app.search);
        app.search_cursor -= 1;
        search.remove(char_to_byte_index(&search, app.search_cursor));
        app.set_search(search);
      }
    }
    KeyCode::Delete => {
      if app.search_cursor < app.search.chars().count() {
        let mut search = std::mem::take(&mut app.search);
        search.remove(char_to_byte_index(&search, app.search_cursor));
        app.set_search(search);
      }
    }
    KeyCode::Left => {
      app.search_cursor = app.search_cursor.saturating_sub(1);
    }
    KeyCode::Right => {
      if app.search_cursor < app.search.chars().count() {
        app.search_cursor += 1;
      }
    }
    KeyCode::Home => {
      app.search_cursor = 0;
    }
    KeyCode::End => {
      app.search_cursor = app.search.chars().count();
    }
    KeyCode::Down | KeyCode::Enter => {
      if !app.view.is_empty() {
        app.focus = Focus::List;
      } else if app.fetch == FetchState::Loaded {
        app.set_error(format!("No films match '{}'.", app.search));
      }
    }
    KeyCode::Esc => {
      if !app.search.is_empty() {
        app.search_cursor = 0;
        app.search_scroll = 0;
        app.set_search(String::new());
      } else {
        app.should_quit = true;
      }
    }
    _ => {}
  }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
  match key.code {
    KeyCode::Enter | KeyCode::Char(' ') => {
      app.select_highlighted();
    }
    KeyCode::Down | KeyCode::Char('j') => {
      app.move_highlight(true);
    }
    KeyCode::Up | KeyCode::Char('k') => {
      app.move_highlight(false);
    }
    KeyCode::Char('/') | KeyCode::Esc => {
      app.focus = Focus::Search;
    }
    KeyCode::Char('q') => {
      app.should_quit = true;
    }
    _ => {}
  }
}
