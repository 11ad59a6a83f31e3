use std::sync::Arc;

use crate::film::Film;

/// The film shown in the detail pane.
///
/// Holds a handle to a catalog record and compares by identity. Changing the
/// search or sort never clears it; only another `select` replaces it.
#[derive(Debug, Default, Clone)]
pub struct Selection {
  current: Option<Arc<Film>>,
}

impl Selection {
  pub fn select(&mut self, film: Arc<Film>) {
    self.current = Some(film);
  }

  pub fn current(&self) -> Option<&Arc<Film>> {
    self.current.as_ref()
  }

  pub fn is_selected(&self, film: &Arc<Film>) -> bool {
    self.current.as_ref().is_some_and(|c| Arc::ptr_eq(c, film))
  }
}
