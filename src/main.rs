mod app;
mod config;
mod constants;
mod film;
mod input;
mod logging;
mod selection;
mod swapi;
mod theme;
mod ui;
mod view;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use ratatui::{
  DefaultTerminal,
  crossterm::event::{self, Event, KeyEventKind},
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use app::{App, Settings};
use config::Config;
use constants::constants;
use view::{SortMode, compute_view};

// --- CLI ---

#[derive(Parser, Debug)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Browse a film catalog in the terminal", long_about = None)]
struct Args {
  /// Catalog endpoint returning the films JSON
  #[arg(long)]
  url: Option<String>,

  /// Initial sort: 'year' or 'episode' (anything else keeps API order)
  #[arg(short, long)]
  sort: Option<String>,

  /// Initial title search
  #[arg(short = 'q', long, default_value = "")]
  search: String,

  /// Print the filtered, sorted catalog to stdout and exit
  #[arg(long)]
  dump: bool,

  /// Print shell completions and exit
  #[arg(long, value_name = "SHELL")]
  completions: Option<Shell>,
}

impl Args {
  /// CLI flags win over the config file, which wins over built-in constants.
  fn settings(&self, config: Config) -> Settings {
    let api_url = self.url.clone().or(config.api_url).unwrap_or_else(|| constants().api_url.clone());
    let sort = self.sort.as_deref().or(config.sort.as_deref()).map_or(SortMode::Year, SortMode::from_name);
    Settings { api_url, search: self.search.clone(), sort, theme_name: config.theme_name }
  }
}

// --- Main ---

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(shell) = args.completions {
    clap_complete::generate(shell, &mut Args::command(), "reel", &mut std::io::stdout());
    return Ok(());
  }

  let _log_guard = logging::init();
  let settings = args.settings(Config::load());
  info!(url = %settings.api_url, sort = settings.sort.label(), "reel starting");

  if args.dump {
    return dump(settings).await;
  }

  let default_hook = std::panic::take_hook();
  std::panic::set_hook(Box::new(move |info| {
    ratatui::restore();
    default_hook(info);
  }));

  let mut terminal = ratatui::init();
  let result = run(&mut terminal, settings).await;
  ratatui::restore();
  result
}

async fn run(terminal: &mut DefaultTerminal, settings: Settings) -> Result<()> {
  let mut app = App::new(settings);
  app.start_fetch(swapi::http_client()?);
  let poll = Duration::from_millis(constants().poll_interval_ms);

  loop {
    app.check_pending();
    app.expire_error();

    terminal.draw(|frame| ui::ui(frame, &mut app)).context("Failed to draw frame")?;

    if event::poll(poll)? {
      match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
          input::handle_key_event(&mut app, key);
        }
        _ => {}
      }
    }

    if app.should_quit {
      break;
    }
  }

  info!("reel exiting");
  Ok(())
}

/// Non-interactive mode: one line per film, tab separated.
async fn dump(settings: Settings) -> Result<()> {
  let client = swapi::http_client()?;
  let films = swapi::fetch_films(&client, &settings.api_url).await?;
  let catalog: Vec<Arc<film::Film>> = films.into_iter().map(Arc::new).collect();
  for film in compute_view(&catalog, &settings.search, settings.sort) {
    let year = film.release_year().map_or_else(|| "-".to_string(), |y| y.to_string());
    println!("{}\t{}\t{}", film.episode_id, year, film.title);
  }
  Ok(())
}
