use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A single film record as served by the catalog API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Film {
  pub title: String,
  pub episode_id: i64,
  #[serde(default, deserialize_with = "lenient_text")]
  pub release_date: String,
  #[serde(default)]
  pub opening_crawl: String,
  #[serde(default)]
  pub director: String,
  #[serde(default)]
  pub producer: String,
  #[serde(default)]
  pub url: String,
  #[serde(default)]
  pub characters: Vec<String>,
  #[serde(default)]
  pub planets: Vec<String>,
  #[serde(default)]
  pub starships: Vec<String>,
  #[serde(default)]
  pub vehicles: Vec<String>,
  #[serde(default)]
  pub species: Vec<String>,
  #[serde(default, deserialize_with = "lenient_text")]
  pub created: String,
  #[serde(default, deserialize_with = "lenient_text")]
  pub edited: String,
}

/// Accept a string, a bare number, or null. Anything else reads as empty text,
/// which has no leading integer.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match Value::deserialize(deserializer)? {
    Value::String(s) => s,
    Value::Number(n) => n.to_string(),
    _ => String::new(),
  })
}

impl Film {
  /// Leading integer of `release_date`, or `None` when there isn't one.
  pub fn release_year(&self) -> Option<i64> {
    leading_int(&self.release_date)
  }

  /// Human-readable release date, e.g. `May 25, 1977`.
  /// Falls back to the raw text when it isn't an ISO date.
  pub fn release_date_label(&self) -> String {
    match NaiveDate::parse_from_str(self.release_date.trim(), "%Y-%m-%d") {
      Ok(date) => date.format("%B %-d, %Y").to_string(),
      Err(_) => self.release_date.clone(),
    }
  }

  /// Date part of the record's last edit timestamp, if the API sent one.
  pub fn edited_label(&self) -> Option<String> {
    timestamp_label(&self.edited).or_else(|| timestamp_label(&self.created))
  }
}

fn timestamp_label(raw: &str) -> Option<String> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }
  Some(match DateTime::parse_from_rfc3339(raw) {
    Ok(ts) => ts.format("%Y-%m-%d").to_string(),
    Err(_) => raw.to_string(),
  })
}

/// Parse the leading integer of `s` the way a lenient `parseInt` does:
/// skip leading whitespace, accept one optional sign, then read ASCII digits.
/// Anything after the digits is ignored. Out-of-range values saturate.
pub fn leading_int(s: &str) -> Option<i64> {
  let s = s.trim_start();
  let (negative, rest) = match s.as_bytes().first() {
    Some(b'-') => (true, &s[1..]),
    Some(b'+') => (false, &s[1..]),
    _ => (false, s),
  };
  let end = rest.bytes().position(|b| !b.is_ascii_digit()).unwrap_or(rest.len());
  if end == 0 {
    return None;
  }
  let digits = &rest[..end];
  let value = match digits.parse::<i64>() {
    Ok(v) => v,
    Err(_) => i64::MAX,
  };
  Some(if negative { value.saturating_neg() } else { value })
}

#[cfg(test)]
mod tests {
  use super::*;

  // --- leading_int ---

  #[test]
  fn leading_int_iso_date() {
    assert_eq!(leading_int("1977-05-25"), Some(1977));
    assert_eq!(leading_int("2005-05-19"), Some(2005));
  }

  #[test]
  fn leading_int_whitespace_and_sign() {
    assert_eq!(leading_int("  1999"), Some(1999));
    assert_eq!(leading_int("+42abc"), Some(42));
    assert_eq!(leading_int("-7-01-01"), Some(-7));
  }

  #[test]
  fn leading_int_no_digits_is_none() {
    assert_eq!(leading_int(""), None);
    assert_eq!(leading_int("unknown"), None);
    assert_eq!(leading_int("-"), None);
    assert_eq!(leading_int("May 1977"), None);
  }

  #[test]
  fn leading_int_saturates() {
    assert_eq!(leading_int("99999999999999999999999"), Some(i64::MAX));
    assert_eq!(leading_int("-99999999999999999999999"), Some(-i64::MAX));
  }

  // --- Film ---

  #[test]
  fn release_date_label_formats_iso_dates() {
    let film = Film { release_date: "1977-05-25".to_string(), ..Default::default() };
    assert_eq!(film.release_date_label(), "May 25, 1977");
  }

  #[test]
  fn release_date_label_keeps_raw_text() {
    let film = Film { release_date: "sometime".to_string(), ..Default::default() };
    assert_eq!(film.release_date_label(), "sometime");
  }

  #[test]
  fn deserialize_sparse_record() {
    let film: Film =
      serde_json::from_str(r#"{"title":"A New Hope","episode_id":4,"release_date":"1977-05-25"}"#).unwrap();
    assert_eq!(film.title, "A New Hope");
    assert_eq!(film.episode_id, 4);
    assert_eq!(film.release_year(), Some(1977));
    assert!(film.characters.is_empty());
  }

  #[test]
  fn deserialize_null_or_missing_date_as_no_year() {
    let null: Film = serde_json::from_str(r#"{"title":"B","episode_id":2,"release_date":null}"#).unwrap();
    assert_eq!(null.release_date, "");
    assert_eq!(null.release_year(), None);

    let missing: Film = serde_json::from_str(r#"{"title":"C","episode_id":3}"#).unwrap();
    assert_eq!(missing.release_year(), None);

    let numeric: Film = serde_json::from_str(r#"{"title":"D","episode_id":4,"release_date":1980}"#).unwrap();
    assert_eq!(numeric.release_year(), Some(1980));
  }

  #[test]
  fn edited_label_prefers_edit_timestamp() {
    let film = Film {
      created: "2014-12-10T14:23:31.880000Z".to_string(),
      edited: "2014-12-20T19:49:45.256000Z".to_string(),
      ..Default::default()
    };
    assert_eq!(film.edited_label().as_deref(), Some("2014-12-20"));

    let created_only = Film { created: "2014-12-10T14:23:31.880000Z".to_string(), ..Default::default() };
    assert_eq!(created_only.edited_label().as_deref(), Some("2014-12-10"));
    assert_eq!(Film::default().edited_label(), None);
  }
}
