//! Client-side favorite products.
//!
//! DESIGN
//! ======
//! Favorites are a per-browser preference, independent of the session: they
//! survive logout and are stored as a JSON array of product codes under
//! `favoritos`. Insertion order is kept so the stored list stays stable.

#[cfg(test)]
#[path = "favorites_test.rs"]
mod favorites_test;

use crate::net::types::Product;
use crate::util::storage::{FAVORITES_KEY, MemoryStorage, SharedStorage};

#[derive(Clone)]
pub struct Favorites {
    codes: Vec<String>,
    storage: SharedStorage,
}

impl std::fmt::Debug for Favorites {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Favorites")
            .field("codes", &self.codes)
            .finish_non_exhaustive()
    }
}

impl Default for Favorites {
    fn default() -> Self {
        Self {
            codes: Vec::new(),
            storage: MemoryStorage::shared(),
        }
    }
}

impl Favorites {
    /// Read the stored list; missing or malformed data yields no favorites.
    #[must_use]
    pub fn load(storage: SharedStorage) -> Self {
        let codes = match storage.get(FAVORITES_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_else(|e| {
                leptos::logging::warn!("ignoring malformed favorites: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                leptos::logging::warn!("favorites unreadable: {e}");
                Vec::new()
            }
        };

        let mut favorites = Self { codes: Vec::new(), storage };
        for code in codes {
            if !favorites.contains(&code) {
                favorites.codes.push(code);
            }
        }
        favorites
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    #[must_use]
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Flip `code` in or out of the set and persist. Returns `true` when the
    /// product is now a favorite.
    pub fn toggle(&mut self, code: &str) -> bool {
        let now_favorite = if self.contains(code) {
            self.codes.retain(|c| c != code);
            false
        } else {
            self.codes.push(code.to_owned());
            true
        };
        self.persist();
        now_favorite
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.codes) {
            Ok(raw) => raw,
            Err(e) => {
                leptos::logging::warn!("favorites not saved: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.set(FAVORITES_KEY, &raw) {
            leptos::logging::warn!("favorites not saved: {e}");
        }
    }
}

/// Products to show in the grid, in catalog order.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], favorites: &Favorites, only_favorites: bool) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| !only_favorites || favorites.contains(&p.codigo))
        .collect()
}
