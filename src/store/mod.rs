pub mod favorites;
pub mod listings;

pub use favorites::FavoriteSet;
pub use listings::ListingStore;
