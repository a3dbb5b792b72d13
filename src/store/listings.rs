//! Ordered in-memory listing collection. Newest-first ordering is a store
//! invariant: `create` always prepends, and every filter preserves order.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{Listing, ListingDraft, CURRENCY};

#[derive(Debug, Default, Clone)]
pub struct ListingStore {
    items: Vec<Listing>,
}

impl ListingStore {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Seed the store with an already-ordered (newest-first) collection.
    pub fn with_listings(items: Vec<Listing>) -> Self {
        Self { items }
    }

    /// Mint id/timestamp/view-counter for a draft and prepend it.
    /// The caller has already validated the draft (post-ad flow gating),
    /// so this cannot fail.
    pub fn create(&mut self, draft: ListingDraft) -> &Listing {
        let listing = Listing {
            id: format!("listing-{}", Uuid::new_v4()),
            title: draft.title,
            description: draft.description,
            price: draft.price,
            currency: CURRENCY.to_string(),
            category: draft.category,
            subcategory: draft.subcategory,
            images: draft.images,
            location: draft.location,
            seller_id: draft.seller_id,
            posted_at: Utc::now(),
            views: 0,
            condition: draft.condition,
            featured: draft.featured,
        };
        log::info!("listing created: {} ({})", listing.id, listing.title);
        self.items.insert(0, listing);
        &self.items[0]
    }

    pub fn get(&self, id: &str) -> Option<&Listing> {
        self.items.iter().find(|l| l.id == id)
    }

    /// Bump the view counter; returns the new count when the listing exists.
    pub fn record_view(&mut self, id: &str) -> Option<u64> {
        let listing = self.items.iter_mut().find(|l| l.id == id)?;
        listing.views += 1;
        Some(listing.views)
    }

    pub fn filter_by_category(&self, category_id: &str) -> Vec<&Listing> {
        self.items.iter().filter(|l| l.category == category_id).collect()
    }

    pub fn filter_by_seller(&self, seller_id: &str) -> Vec<&Listing> {
        self.items.iter().filter(|l| l.seller_id == seller_id).collect()
    }

    pub fn filter_featured(&self, limit: usize) -> Vec<&Listing> {
        self.items.iter().filter(|l| l.featured).take(limit).collect()
    }

    pub fn recent(&self, limit: usize) -> Vec<&Listing> {
        self.items.iter().take(limit).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Listing> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, Location};

    fn draft(title: &str, category: &str) -> ListingDraft {
        ListingDraft {
            title: title.into(),
            description: "desc".into(),
            price: 100_000,
            category: category.into(),
            subcategory: None,
            images: vec!["https://example.com/a.jpg".into()],
            location: Location { region: "Toshkent".into(), city: "Toshkent shahri".into() },
            seller_id: "user-1".into(),
            condition: Some(Condition::Used),
            featured: false,
        }
    }

    #[test]
    fn create_prepends_and_grows_by_one() {
        let mut store = ListingStore::new();
        store.create(draft("a", "electronics"));
        assert_eq!(store.len(), 1);
        store.create(draft("b", "electronics"));
        assert_eq!(store.len(), 2);
        let first = store.iter().next().unwrap();
        assert_eq!(first.title, "b");
    }

    #[test]
    fn create_mints_fresh_fields() {
        let mut store = ListingStore::new();
        let id = store.create(draft("a", "cars")).id.clone();
        let listing = store.get(&id).unwrap();
        assert_eq!(listing.views, 0);
        assert_eq!(listing.currency, CURRENCY);
        assert!(listing.id.starts_with("listing-"));

        let other = store.create(draft("b", "cars")).id.clone();
        assert_ne!(id, other, "ids must be unique across the store");
    }

    #[test]
    fn category_filter_preserves_store_order() {
        let mut store = ListingStore::new();
        store.create(draft("a", "cars"));
        store.create(draft("b", "electronics"));
        store.create(draft("c", "cars"));
        let cars = store.filter_by_category("cars");
        let titles: Vec<&str> = cars.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["c", "a"]);
        assert!(store.filter_by_category("animals").is_empty());
    }

    #[test]
    fn featured_filter_respects_limit() {
        let mut store = ListingStore::new();
        for i in 0..4 {
            let mut d = draft(&format!("f{i}"), "fashion");
            d.featured = true;
            store.create(d);
        }
        store.create(draft("plain", "fashion"));
        let featured = store.filter_featured(2);
        assert_eq!(featured.len(), 2);
        assert_eq!(featured[0].title, "f3");
    }

    #[test]
    fn record_view_is_monotonic() {
        let mut store = ListingStore::new();
        let id = store.create(draft("a", "cars")).id.clone();
        assert_eq!(store.record_view(&id), Some(1));
        assert_eq!(store.record_view(&id), Some(2));
        assert_eq!(store.record_view("listing-missing"), None);
    }
}
