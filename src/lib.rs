//! bozor — in-memory session core for a classifieds-marketplace demo.
//!
//! Everything lives in one logical session: the listing store, the favorite
//! set, the flat message collection and the current user. Conversations are
//! a derived view recomputed on read; posting an ad runs through a linear
//! workflow with an identity-verification gate. There is no persistence and
//! no network — the identity and upload collaborators are simulated with
//! configurable delays.

pub mod catalog;
pub mod chat;
pub mod config;
pub mod data;
pub mod format;
pub mod models;
pub mod post_ad;
pub mod services;
pub mod session;
pub mod store;

pub use config::AppConfig;
pub use session::{Page, Session};
