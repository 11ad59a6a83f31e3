use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::constants::constants;
use crate::film::Film;

/// Outcome of the one startup fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
  Pending,
  Failed(String),
  Loaded,
}

/// Paged list envelope returned by the films endpoint.
#[derive(Debug, Deserialize)]
struct FilmPage {
  #[serde(default)]
  count: Option<usize>,
  results: Vec<Film>,
}

pub fn http_client() -> Result<Client> {
  let c = constants();
  Client::builder()
    .user_agent(c.user_agent.as_str())
    .timeout(Duration::from_secs(c.request_timeout_secs))
    .build()
    .context("Failed to build HTTP client")
}

/// Decode a films response body. Accepts the paged envelope or a bare array.
/// Errors carry the serde message for the shape the body looks like.
pub fn parse_films(body: &str) -> Result<Vec<Film>> {
  if body.trim_start().starts_with('[') {
    return serde_json::from_str::<Vec<Film>>(body).context("Unexpected films response");
  }
  let page: FilmPage = serde_json::from_str(body).context("Unexpected films response")?;
  if let Some(count) = page.count
    && count != page.results.len()
  {
    debug!(count, received = page.results.len(), "films: page holds a partial catalog");
  }
  Ok(page.results)
}

pub async fn fetch_films(client: &Client, url: &str) -> Result<Vec<Film>> {
  info!(url = %url, "films: fetching catalog");
  let response = client
    .get(url)
    .send()
    .await
    .with_context(|| format!("Request to {} failed", url))?
    .error_for_status()
    .context("Films endpoint returned an error")?;
  let body = response.text().await.with_context(|| format!("Failed to read response body from {}", url))?;
  let films = parse_films(&body)?;
  info!(count = films.len(), "films: catalog received");
  Ok(films)
}
