use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

/// User preferences from `config.toml` in the platform config dir.
/// Every field is optional; CLI flags take precedence.
#[derive(Deserialize, Default, Debug, PartialEq, Eq)]
pub struct Config {
  pub api_url: Option<String>,
  pub sort: Option<String>,
  pub theme_name: Option<String>,
}

impl Config {
  pub fn path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "reel").map(|dirs| dirs.config_dir().join("config.toml"))
  }

  pub fn load() -> Self {
    let Some(path) = Self::path() else { return Self::default() };
    match std::fs::read_to_string(&path) {
      Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), err = %e, "config: ignoring unreadable config file");
        Self::default()
      }),
      Err(_) => Self::default(),
    }
  }

  pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(content)
  }
}
