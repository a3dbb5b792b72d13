//! Session-scoped favorite set. Deliberately decoupled from the listing
//! lifecycle: ids are not validated on toggle, and a dangling id simply
//! drops out when the consuming view resolves it against the live store.

use std::collections::HashSet;

#[derive(Debug, Default, Clone)]
pub struct FavoriteSet {
    ids: HashSet<String>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self { ids: HashSet::new() }
    }

    /// Add the id if absent, remove it if present. Returns the new
    /// membership state.
    pub fn toggle(&mut self, listing_id: &str) -> bool {
        if self.ids.remove(listing_id) {
            false
        } else {
            self.ids.insert(listing_id.to_string());
            true
        }
    }

    pub fn contains(&self, listing_id: &str) -> bool {
        self.ids.contains(listing_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_toggle_restores_membership() {
        let mut favs = FavoriteSet::new();
        assert!(!favs.contains("listing-1"));
        assert!(favs.toggle("listing-1"));
        assert!(favs.contains("listing-1"));
        assert!(!favs.toggle("listing-1"));
        assert!(!favs.contains("listing-1"));

        // and from the favorited side
        favs.toggle("listing-2");
        favs.toggle("listing-2");
        favs.toggle("listing-2");
        assert!(favs.contains("listing-2"));
    }

    #[test]
    fn unknown_ids_are_accepted_silently() {
        let mut favs = FavoriteSet::new();
        assert!(favs.toggle("listing-that-never-existed"));
        assert_eq!(favs.len(), 1);
    }

    #[test]
    fn clear_empties_the_set() {
        let mut favs = FavoriteSet::new();
        favs.toggle("a");
        favs.toggle("b");
        favs.clear();
        assert!(favs.is_empty());
    }
}
