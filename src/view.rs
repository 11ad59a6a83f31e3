//! Derived list view: the filtered and ordered slice of the catalog that the
//! list pane renders.
//!
//! `compute_view` is pure. It borrows the catalog, never reorders it, and
//! returns new `Arc` handles to the same records.

use std::sync::Arc;

use crate::film::Film;

/// How the derived view is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
  /// Ascending leading-integer year of `release_date`. Unparseable dates go last.
  Year,
  /// Ascending `episode_id`.
  Episode,
  /// Catalog order, untouched.
  Unsorted,
}

impl SortMode {
  /// Modes reachable from the sort toggle.
  pub const CYCLE: [SortMode; 2] = [SortMode::Year, SortMode::Episode];

  pub fn label(self) -> &'static str {
    match self {
      SortMode::Year => "year",
      SortMode::Episode => "episode",
      SortMode::Unsorted => "unsorted",
    }
  }

  /// Names other than `year` and `episode` map to `Unsorted`.
  pub fn from_name(s: &str) -> Self {
    match s.trim().to_lowercase().as_str() {
      "year" => SortMode::Year,
      "episode" => SortMode::Episode,
      _ => SortMode::Unsorted,
    }
  }

  pub fn next(self) -> Self {
    let idx = Self::CYCLE.iter().position(|m| *m == self).map_or(0, |i| i + 1);
    Self::CYCLE[idx % Self::CYCLE.len()]
  }

  pub fn prev(self) -> Self {
    let len = Self::CYCLE.len();
    let idx = Self::CYCLE.iter().position(|m| *m == self).map_or(0, |i| i + len - 1);
    Self::CYCLE[idx % len]
  }
}

/// Case-insensitive title substring match. An empty search matches everything.
pub fn matches_search(film: &Film, search: &str) -> bool {
  if search.is_empty() {
    return true;
  }
  film.title.to_lowercase().contains(&search.to_lowercase())
}

/// Filter `catalog` by `search`, then order a fresh copy by `sort`.
/// Sorts are stable: records with equal keys keep their catalog order.
pub fn compute_view(catalog: &[Arc<Film>], search: &str, sort: SortMode) -> Vec<Arc<Film>> {
  let mut view: Vec<Arc<Film>> = if search.is_empty() {
    catalog.to_vec()
  } else {
    catalog.iter().filter(|film| matches_search(film, search)).cloned().collect()
  };

  match sort {
    SortMode::Episode => view.sort_by_key(|film| film.episode_id),
    SortMode::Year => view.sort_by_key(|film| {
      let year = film.release_year();
      (year.is_none(), year)
    }),
    SortMode::Unsorted => {}
  }

  view
}

#[cfg(test)]
mod tests {
  use proptest::prelude::*;

  use super::*;

  fn film(title: &str, episode_id: i64, release_date: &str) -> Arc<Film> {
    Arc::new(Film {
      title: title.to_string(),
      episode_id,
      release_date: release_date.to_string(),
      ..Default::default()
    })
  }

  fn titles(view: &[Arc<Film>]) -> Vec<&str> {
    view.iter().map(|f| f.title.as_str()).collect()
  }

  fn two_films() -> Vec<Arc<Film>> {
    vec![film("A New Hope", 4, "1977-05-25"), film("The Phantom Menace", 1, "1999-05-19")]
  }

  // --- SortMode ---

  #[test]
  fn sort_mode_from_name() {
    assert_eq!(SortMode::from_name("year"), SortMode::Year);
    assert_eq!(SortMode::from_name("EPISODE"), SortMode::Episode);
    assert_eq!(SortMode::from_name(" Year "), SortMode::Year);
  }

  #[test]
  fn sort_mode_unknown_name_is_unsorted() {
    assert_eq!(SortMode::from_name("title"), SortMode::Unsorted);
    assert_eq!(SortMode::from_name(""), SortMode::Unsorted);
  }

  #[test]
  fn sort_mode_cycles_between_year_and_episode() {
    assert_eq!(SortMode::Year.next(), SortMode::Episode);
    assert_eq!(SortMode::Episode.next(), SortMode::Year);
    assert_eq!(SortMode::Year.prev(), SortMode::Episode);
    assert_eq!(SortMode::Episode.prev(), SortMode::Year);
    assert_eq!(SortMode::Unsorted.next(), SortMode::Year);
  }

  // --- compute_view ---

  #[test]
  fn two_film_example() {
    let catalog = two_films();
    assert_eq!(titles(&compute_view(&catalog, "", SortMode::Episode)), ["The Phantom Menace", "A New Hope"]);
    assert_eq!(titles(&compute_view(&catalog, "", SortMode::Year)), ["A New Hope", "The Phantom Menace"]);
    assert_eq!(titles(&compute_view(&catalog, "new", SortMode::Episode)), ["A New Hope"]);
    assert_eq!(titles(&compute_view(&catalog, "new", SortMode::Year)), ["A New Hope"]);
  }

  #[test]
  fn search_is_case_insensitive_substring() {
    let catalog = two_films();
    assert_eq!(titles(&compute_view(&catalog, "PHANTOM", SortMode::Year)), ["The Phantom Menace"]);
    assert_eq!(titles(&compute_view(&catalog, "e", SortMode::Episode)), ["The Phantom Menace", "A New Hope"]);
    assert!(compute_view(&catalog, "empire", SortMode::Year).is_empty());
  }

  #[test]
  fn search_is_not_trimmed() {
    let catalog = two_films();
    assert_eq!(titles(&compute_view(&catalog, " hope", SortMode::Year)), ["A New Hope"]);
    assert!(compute_view(&catalog, "hope ", SortMode::Year).is_empty());
  }

  #[test]
  fn unsorted_keeps_catalog_order() {
    let catalog = vec![film("C", 3, "2005"), film("A", 1, "1999"), film("B", 2, "2002")];
    assert_eq!(titles(&compute_view(&catalog, "", SortMode::Unsorted)), ["C", "A", "B"]);
  }

  #[test]
  fn unparseable_years_sort_last_in_catalog_order() {
    let catalog = vec![
      film("TBA one", 10, "TBA"),
      film("Late", 2, "2019-12-20"),
      film("Blank", 11, ""),
      film("Early", 1, "1977-05-25"),
    ];
    assert_eq!(titles(&compute_view(&catalog, "", SortMode::Year)), ["Early", "Late", "TBA one", "Blank"]);
  }

  #[test]
  fn episode_ties_keep_catalog_order() {
    let catalog = vec![film("first", 5, "1980"), film("lower", 1, "1999"), film("second", 5, "1970")];
    assert_eq!(titles(&compute_view(&catalog, "", SortMode::Episode)), ["lower", "first", "second"]);
  }

  #[test]
  fn view_shares_records_and_leaves_catalog_untouched() {
    let catalog = two_films();
    let before = titles(&catalog).join(",");
    let view = compute_view(&catalog, "", SortMode::Episode);
    assert_eq!(titles(&catalog).join(","), before);
    assert!(Arc::ptr_eq(&view[0], &catalog[1]));
    assert!(Arc::ptr_eq(&view[1], &catalog[0]));
  }

  #[test]
  fn empty_catalog_gives_empty_view() {
    assert!(compute_view(&[], "anything", SortMode::Year).is_empty());
    assert!(compute_view(&[], "", SortMode::Episode).is_empty());
  }

  #[test]
  fn matches_search_unicode_lowercase() {
    let f = film("L'ÉPOPÉE", 1, "2000");
    assert!(matches_search(&f, "épopée"));
    assert!(matches_search(&f, ""));
    assert!(!matches_search(&f, "saga"));
  }

  // --- properties ---

  fn arb_catalog() -> impl Strategy<Value = Vec<Arc<Film>>> {
    let date = prop_oneof![
      (1900i64..2100, 1u32..13, 1u32..29).prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}")),
      "[a-zA-Z ]{0,6}",
    ];
    prop::collection::vec(("[a-cA-C ]{0,8}", 0i64..6, date), 0..24)
      .prop_map(|rows| rows.into_iter().map(|(t, e, d)| film(&t, e, &d)).collect::<Vec<_>>())
  }

  fn arb_sort() -> impl Strategy<Value = SortMode> {
    prop_oneof![Just(SortMode::Year), Just(SortMode::Episode), Just(SortMode::Unsorted)]
  }

  fn position(catalog: &[Arc<Film>], f: &Arc<Film>) -> usize {
    catalog.iter().position(|c| Arc::ptr_eq(c, f)).unwrap()
  }

  proptest! {
    #[test]
    fn filter_is_sound_and_complete(catalog in arb_catalog(), search in "[a-cA-C]{0,2}", sort in arb_sort()) {
      let view = compute_view(&catalog, &search, sort);
      for f in &view {
        prop_assert!(f.title.to_lowercase().contains(&search.to_lowercase()));
      }
      let expected = catalog.iter().filter(|f| matches_search(f, &search)).count();
      prop_assert_eq!(view.len(), expected);
    }

    #[test]
    fn view_is_a_subset_without_duplicates(catalog in arb_catalog(), search in "[a-c]{0,1}", sort in arb_sort()) {
      let view = compute_view(&catalog, &search, sort);
      let mut seen: Vec<usize> = view.iter().map(|f| position(&catalog, f)).collect();
      seen.sort_unstable();
      seen.dedup();
      prop_assert_eq!(seen.len(), view.len());
    }

    #[test]
    fn empty_search_keeps_everything(catalog in arb_catalog(), sort in arb_sort()) {
      prop_assert_eq!(compute_view(&catalog, "", sort).len(), catalog.len());
    }

    #[test]
    fn episode_order_is_sorted_and_stable(catalog in arb_catalog(), search in "[a-c]{0,1}") {
      let view = compute_view(&catalog, &search, SortMode::Episode);
      for pair in view.windows(2) {
        prop_assert!(pair[0].episode_id <= pair[1].episode_id);
        if pair[0].episode_id == pair[1].episode_id {
          prop_assert!(position(&catalog, &pair[0]) < position(&catalog, &pair[1]));
        }
      }
    }

    #[test]
    fn year_order_is_sorted_with_sentinels_last(catalog in arb_catalog()) {
      let view = compute_view(&catalog, "", SortMode::Year);
      let years: Vec<Option<i64>> = view.iter().map(|f| f.release_year()).collect();
      let first_none = years.iter().position(Option::is_none).unwrap_or(years.len());
      prop_assert!(years[first_none..].iter().all(Option::is_none));
      for pair in years[..first_none].windows(2) {
        prop_assert!(pair[0] <= pair[1]);
      }
      for pair in view[first_none..].windows(2) {
        prop_assert!(position(&catalog, &pair[0]) < position(&catalog, &pair[1]));
      }
    }

    #[test]
    fn recomputing_with_empty_search_is_a_no_op(catalog in arb_catalog(), search in "[a-c]{0,1}", sort in arb_sort()) {
      let once = compute_view(&catalog, &search, sort);
      let twice = compute_view(&once, "", sort);
      prop_assert_eq!(once.len(), twice.len());
      for (a, b) in once.iter().zip(&twice) {
        prop_assert!(Arc::ptr_eq(a, b));
      }
    }
  }
}
