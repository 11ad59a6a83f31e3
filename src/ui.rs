use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Layout, Rect},
  style::{Modifier, Style, Stylize},
  text::{Line, Span},
  widgets::{Block, BorderType, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, Focus};
use crate::film::Film;
use crate::swapi::FetchState;
use crate::theme::Theme;
use crate::view::SortMode;

// --- Helpers ---

/// Compute the display width of the first `n` chars (accounting for double-width CJK).
pub fn display_width(s: &str, n: usize) -> usize {
  use unicode_width::UnicodeWidthChar;
  s.chars().take(n).map(|c| c.width().unwrap_or(0)).sum()
}

/// Truncate a string to `max_width` characters, appending "…" if truncated.
fn truncate_str(s: &str, max_width: usize) -> String {
  if s.chars().count() <= max_width {
    s.to_string()
  } else {
    let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    format!("{}…", truncated)
  }
}

fn panel(theme: &Theme, title: Line<'static>, focused: bool) -> Block<'static> {
  let color = if focused { theme.accent } else { theme.border };
  Block::bordered().title(title).border_type(BorderType::Rounded).border_style(Style::default().fg(color))
}

// --- UI Rendering ---

pub fn ui(frame: &mut Frame, app: &mut App) {
  let theme = app.theme();

  frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), frame.area());

  let [header_area, main_area, status_area, footer_area] =
    Layout::vertical([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
      .areas(frame.area());

  render_header(frame, theme, header_area);
  if let FetchState::Failed(msg) = &app.fetch {
    render_failure(frame, theme, msg, main_area);
  } else {
    render_browser(frame, app, main_area);
  }
  render_status(frame, app, status_area);
  render_footer(frame, app, footer_area);
}

fn render_header(frame: &mut Frame, theme: &Theme, area: Rect) {
  let left = Line::from(Span::styled(" ✦ reel ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)));
  frame.render_widget(left, area);

  let version = format!("v{} ", env!("CARGO_PKG_VERSION"));
  let right = Line::from(Span::styled(&version, Style::default().fg(theme.muted)));
  let width = (version.len() as u16).min(area.width);
  let right_area = Rect { x: area.x + area.width - width, width, ..area };
  frame.render_widget(right, right_area);
}

fn render_failure(frame: &mut Frame, theme: &Theme, msg: &str, area: Rect) {
  let text = vec![
    Line::from(""),
    Line::from(Span::styled("Could not load films", Style::default().fg(theme.error).add_modifier(Modifier::BOLD))),
    Line::from(""),
    Line::from(Span::styled(msg.to_string(), Style::default().fg(theme.fg))),
    Line::from(""),
    Line::from(Span::styled("Press q to quit.", Style::default().fg(theme.muted))),
  ];
  let paragraph = Paragraph::new(text)
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(panel(theme, Line::default(), false));
  frame.render_widget(paragraph, area);
}

fn render_browser(frame: &mut Frame, app: &mut App, area: Rect) {
  let [left, detail_area] = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(area);
  let [search_area, list_area] = Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(left);

  render_search(frame, app, search_area);
  render_list(frame, app, list_area);
  render_detail(frame, app, detail_area);
}

fn render_search(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let focused = app.focus == Focus::Search;
  let title = Line::from(vec![
    Span::styled(" Search by title ", Style::default().fg(if focused { theme.accent } else { theme.muted })),
    Span::styled(format!("[sort: {}] ", app.sort.label()), Style::default().fg(theme.muted)),
  ]);
  let block = panel(theme, title, focused).padding(Padding::horizontal(1));

  let inner_w = area.width.saturating_sub(4) as usize;
  if inner_w == 0 {
    frame.render_widget(block, area);
    return;
  }
  let cursor_col = display_width(&app.search, app.search_cursor);

  if cursor_col < app.search_scroll {
    app.search_scroll = cursor_col;
  } else if cursor_col >= app.search_scroll + inner_w {
    app.search_scroll = cursor_col.saturating_sub(inner_w) + 1;
  }

  let visible: String = app
    .search
    .chars()
    .scan(0usize, |col, c| {
      let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
      let start = *col;
      *col += w;
      Some((start, *col, c))
    })
    .skip_while(|(_, end, _)| *end <= app.search_scroll)
    .take_while(|(start, _, _)| *start < app.search_scroll + inner_w)
    .map(|(_, _, c)| c)
    .collect();

  frame.render_widget(Paragraph::new(visible).style(Style::default().fg(theme.fg)).block(block), area);

  if focused {
    let cursor_x = area.x + 2 + cursor_col.saturating_sub(app.search_scroll) as u16;
    frame.set_cursor_position((cursor_x, area.y + 1));
  }
}

/// Right-hand column of a list row for the active sort key.
fn sort_key_label(film: &Film, sort: SortMode) -> String {
  match sort {
    SortMode::Episode => format!("Ep {}", film.episode_id),
    SortMode::Year | SortMode::Unsorted => match film.release_year() {
      Some(year) => year.to_string(),
      None => "—".to_string(),
    },
  }
}

fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let focused = app.focus == Focus::List;

  let title = Line::from(Span::styled(
    format!(" Films {}/{} ", app.view.len(), app.catalog.len()),
    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
  ));
  let block = panel(theme, title, focused);

  if app.view.is_empty() {
    let msg = if app.fetch == FetchState::Pending { "Loading films…" } else { "No films match" };
    let paragraph = Paragraph::new(Line::from(Span::styled(msg, Style::default().fg(theme.muted))))
      .alignment(Alignment::Center)
      .block(block);
    frame.render_widget(paragraph, area);
    return;
  }

  // Inner width: area minus 2 borders minus 2 chars for highlight symbol
  let inner_w = area.width.saturating_sub(4) as usize;

  let items: Vec<ListItem> = app
    .view
    .iter()
    .enumerate()
    .map(|(i, film)| {
      let chosen = app.selection.is_selected(film);
      let bg = if i % 2 == 1 { theme.stripe_bg } else { theme.bg };
      let marker = if chosen { "● " } else { "  " };
      let right = sort_key_label(film, app.sort);
      let right_w = right.chars().count();
      let title = truncate_str(&film.title, inner_w.saturating_sub(right_w + 4));
      let gap = inner_w.saturating_sub(title.chars().count() + right_w + 2);

      let title_style =
        if chosen { Style::default().fg(theme.accent).add_modifier(Modifier::BOLD) } else { Style::default().fg(theme.fg) };
      let line = Line::from(vec![
        Span::styled(marker, Style::default().fg(theme.accent)),
        Span::styled(title, title_style),
        Span::raw(" ".repeat(gap)),
        Span::styled(right, Style::default().fg(theme.muted)),
      ]);
      ListItem::new(line).bg(bg)
    })
    .collect();

  let list = List::new(items)
    .block(block)
    .highlight_symbol("▶ ")
    .highlight_style(Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD));

  frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn detail_lines(film: &Film, theme: &Theme) -> Vec<Line<'static>> {
  let field = |label: &'static str, value: String| {
    Line::from(vec![
      Span::styled(format!("{:<11}", label), Style::default().fg(theme.muted)),
      Span::styled(value, Style::default().fg(theme.fg)),
    ])
  };

  let mut lines = vec![
    Line::from(""),
    Line::from(Span::styled(film.title.clone(), Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))),
    Line::from(Span::styled(format!("Episode {}", film.episode_id), Style::default().fg(theme.muted))),
    Line::from(""),
    field("Released", film.release_date_label()),
  ];
  if !film.director.is_empty() {
    lines.push(field("Director", film.director.clone()));
  }
  if !film.producer.is_empty() {
    lines.push(field("Producer", film.producer.clone()));
  }
  if let Some(edited) = film.edited_label() {
    lines.push(field("Updated", edited));
  }
  let counts = [
    ("Characters", film.characters.len()),
    ("Planets", film.planets.len()),
    ("Starships", film.starships.len()),
    ("Vehicles", film.vehicles.len()),
    ("Species", film.species.len()),
  ];
  for (label, n) in counts.into_iter().filter(|(_, n)| *n > 0) {
    lines.push(field(label, n.to_string()));
  }
  if !film.opening_crawl.is_empty() {
    lines.push(Line::from(""));
    // The API uses \r\n line breaks inside the crawl.
    for text in film.opening_crawl.lines() {
      lines.push(Line::from(Span::styled(text.trim_end().to_string(), Style::default().fg(theme.fg).italic())));
    }
  }
  lines
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let title = Line::from(Span::styled(" Details ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)));
  let block = panel(theme, title, false).padding(Padding::horizontal(1));

  let paragraph = match app.selection.current() {
    Some(film) => Paragraph::new(detail_lines(film, theme)).wrap(Wrap { trim: false }),
    None => Paragraph::new(vec![
      Line::from(""),
      Line::from(Span::styled("Select a film to see its details.", Style::default().fg(theme.muted))),
    ])
    .alignment(Alignment::Center),
  };
  frame.render_widget(paragraph.block(block), area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let (text, style) = if let Some(err) = &app.last_error {
    (format!(" ⚠  {}", err), Style::default().fg(theme.error))
  } else {
    match &app.fetch {
      FetchState::Pending => (format!(" ⏳ Fetching {}…", app.api_url), Style::default().fg(theme.status)),
      FetchState::Failed(_) => (" ⚠  Fetch failed".to_string(), Style::default().fg(theme.error)),
      FetchState::Loaded => match app.selection.current() {
        Some(film) => (format!(" ● {}", film.title), Style::default().fg(theme.status)),
        None => (" Ready".to_string(), Style::default().fg(theme.muted)),
      },
    }
  };
  frame.render_widget(Paragraph::new(text).style(style), area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let keys: Vec<(&str, &str)> = match (&app.fetch, app.focus) {
    (FetchState::Failed(_), _) => vec![("q", "Quit")],
    (_, Focus::Search) => vec![("Type", "Filter"), ("Tab", "Sort"), ("↓", "List"), ("^t", "Theme"), ("Esc", "Clear/Quit")],
    (_, Focus::List) => {
      vec![("Enter", "Select"), ("j/k", "Navigate"), ("Tab", "Sort"), ("/", "Search"), ("^t", "Theme"), ("q", "Quit")]
    }
  };

  let spans: Vec<Span> = keys
    .iter()
    .enumerate()
    .flat_map(|(i, (key, action))| {
      let mut s = vec![
        Span::styled(format!(" {} ", key), Style::default().fg(theme.key_fg).bg(theme.key_bg)),
        Span::styled(format!(" {} ", action), Style::default().fg(theme.muted)),
      ];
      if i < keys.len() - 1 {
        s.push(Span::raw("  "));
      }
      s
    })
    .collect();

  frame.render_widget(Line::from(spans), area);

  let theme_label = format!("{} ", theme.name);
  let right = Line::from(Span::styled(&theme_label, Style::default().fg(theme.muted)));
  let width = (theme_label.len() as u16).min(area.width);
  let right_area = Rect { x: area.x + area.width - width, width, ..area };
  frame.render_widget(right, right_area);
}
