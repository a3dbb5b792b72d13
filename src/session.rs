//! The session is the single owner of all mutable application state:
//! listing store, favorite set, message collection, current user, language
//! and the active page. Views read through accessors; every mutation goes
//! through a session method, one user-triggered event at a time.

use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};
use crate::chat::{self, Conversation};
use crate::config::AppConfig;
use crate::data;
use crate::models::{Language, Listing, Message, User};
use crate::post_ad::{PostAdFlow, SubmitOutcome};
use crate::store::{FavoriteSet, ListingStore};

/// Active view plus its parameters. Exhaustive by construction: the router
/// boundary matches on this, never on page-name strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Category {
        category_id: String,
    },
    Product {
        listing_id: String,
    },
    Dashboard,
    PostAd,
    Chat {
        chat_id: Option<String>,
    },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("login required")]
    NotLoggedIn,
    #[error("no active post-ad flow")]
    NoActiveFlow,
    #[error("listing not found: {0}")]
    ListingNotFound(String),
}

/// Session-level view of a commit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostAdOutcome {
    /// Form preconditions unmet; nothing was stored.
    Invalid,
    /// Redirected to the verification step.
    VerificationRequired,
    /// Listing is in the store; the flow instance is gone.
    Posted { listing_id: String },
}

/// Read-model for the dashboard tabs.
#[derive(Debug)]
pub struct Dashboard<'a> {
    pub user: &'a User,
    pub my_ads: Vec<&'a Listing>,
    pub favorites: Vec<&'a Listing>,
    pub chat_count: usize,
    pub unread_count: usize,
}

pub struct Session {
    catalog: Catalog,
    listings: ListingStore,
    favorites: FavoriteSet,
    messages: Vec<Message>,
    users: Vec<User>,
    current_user: Option<User>,
    language: Language,
    page: Page,
    post_ad: Option<PostAdFlow>,
    featured_limit: usize,
    recent_limit: usize,
}

impl Session {
    pub fn new(catalog: Catalog, config: &AppConfig) -> Self {
        Self {
            catalog,
            listings: ListingStore::new(),
            favorites: FavoriteSet::new(),
            messages: Vec::new(),
            users: Vec::new(),
            current_user: None,
            language: config.default_language,
            page: Page::Home,
            post_ad: None,
            featured_limit: config.featured_limit,
            recent_limit: config.recent_limit,
        }
    }

    /// Session pre-populated with the demo dataset.
    pub fn seeded(config: &AppConfig) -> Result<Self, CatalogError> {
        let mut session = Session::new(Catalog::load()?, config);
        session.users = data::mock_users();
        session.listings = ListingStore::with_listings(data::mock_listings());
        session.messages = data::mock_messages();
        Ok(session)
    }

    // ---- read access ---------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn listings(&self) -> &ListingStore {
        &self.listings
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Seller panel lookup; `None` simply omits the panel.
    pub fn seller_of(&self, listing: &Listing) -> Option<&User> {
        self.user(&listing.seller_id)
    }

    /// Home view: featured strip, capped.
    pub fn featured(&self) -> Vec<&Listing> {
        self.listings.filter_featured(self.featured_limit)
    }

    /// Home view: most recent listings, capped.
    pub fn recent(&self) -> Vec<&Listing> {
        self.listings.recent(self.recent_limit)
    }

    /// Favorites resolved against the live store; dangling ids drop out.
    pub fn favorite_listings(&self) -> Vec<&Listing> {
        self.listings.iter().filter(|l| self.favorites.contains(&l.id)).collect()
    }

    pub fn conversations(&self) -> Vec<Conversation<'_>> {
        chat::conversations(&self.messages)
    }

    pub fn dashboard(&self) -> Result<Dashboard<'_>, SessionError> {
        let user = self.current_user.as_ref().ok_or(SessionError::NotLoggedIn)?;
        let my_messages: Vec<Message> = self
            .messages
            .iter()
            .filter(|m| m.sender_id == user.id || m.receiver_id == user.id)
            .cloned()
            .collect();
        let convs = chat::conversations(&my_messages);
        Ok(Dashboard {
            user,
            my_ads: self.listings.filter_by_seller(&user.id),
            favorites: self.favorite_listings(),
            chat_count: convs.len(),
            unread_count: convs.iter().filter(|c| c.unread(&user.id)).count(),
        })
    }

    // ---- event handlers ------------------------------------------------

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Store the authenticated user. Also refreshes the user directory so
    /// later lookups see the same record.
    pub fn login(&mut self, user: User) {
        log::info!("logged in as {} ({})", user.name, user.id);
        if let Some(entry) = self.users.iter_mut().find(|u| u.id == user.id) {
            *entry = user.clone();
        }
        self.current_user = Some(user);
    }

    /// Drop the session user; favorites are session-scoped and go with it.
    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            log::info!("logged out {}", user.id);
        }
        self.favorites.clear();
        self.post_ad = None;
        self.page = Page::Home;
    }

    /// Route to a page. Opening a product records a view; entering the
    /// post-ad page starts a fresh workflow instance, and leaving it
    /// discards the instance.
    pub fn navigate(&mut self, page: Page) {
        match &page {
            Page::Product { listing_id } => {
                self.listings.record_view(listing_id);
            }
            Page::PostAd => {
                self.post_ad = Some(PostAdFlow::new());
            }
            _ => {}
        }
        if !matches!(page, Page::PostAd) {
            self.post_ad = None;
        }
        log::debug!("navigate: {page:?}");
        self.page = page;
    }

    pub fn toggle_favorite(&mut self, listing_id: &str) -> bool {
        let now_favorite = self.favorites.toggle(listing_id);
        log::debug!("favorite {listing_id}: {now_favorite}");
        now_favorite
    }

    /// Send a message about a listing to its seller. Requires a logged-in
    /// user and a resolvable listing; blank text is a no-op (`Ok(None)`).
    pub fn send_message(&mut self, listing_id: &str, text: &str) -> Result<Option<&Message>, SessionError> {
        let user = self.current_user.as_ref().ok_or(SessionError::NotLoggedIn)?;
        let listing = self
            .listings
            .get(listing_id)
            .ok_or_else(|| SessionError::ListingNotFound(listing_id.to_string()))?;
        match chat::compose_message(user, listing, text) {
            Some(message) => {
                log::debug!("message {} -> {} ({})", message.sender_id, message.receiver_id, message.chat_id);
                self.messages.push(message);
                Ok(self.messages.last())
            }
            None => Ok(None),
        }
    }

    /// The active post-ad workflow, if the session is on the post-ad page.
    pub fn post_ad_flow(&mut self) -> Option<&mut PostAdFlow> {
        self.post_ad.as_mut()
    }

    /// Attempt to publish the active flow. On commit the listing lands in
    /// the store, the flow instance is discarded and the session routes
    /// home.
    pub fn submit_post_ad(&mut self) -> Result<PostAdOutcome, SessionError> {
        let user = self.current_user.as_ref().ok_or(SessionError::NotLoggedIn)?;
        let flow = self.post_ad.as_mut().ok_or(SessionError::NoActiveFlow)?;
        let outcome = flow.submit(user, &self.catalog, self.language);
        Ok(self.apply_submit_outcome(outcome))
    }

    /// Called once the mocked verification resolved. The verified user
    /// replaces the session user, then the gated commit re-runs. Without an
    /// active flow nothing changes, not even the session user.
    pub fn complete_post_ad_verification(&mut self, verified: User) -> Result<PostAdOutcome, SessionError> {
        if self.post_ad.is_none() {
            return Err(SessionError::NoActiveFlow);
        }
        self.login(verified);
        let user = self.current_user.as_ref().ok_or(SessionError::NotLoggedIn)?;
        let flow = self.post_ad.as_mut().ok_or(SessionError::NoActiveFlow)?;
        let outcome = flow.finish_verification(user, &self.catalog, self.language);
        Ok(self.apply_submit_outcome(outcome))
    }

    fn apply_submit_outcome(&mut self, outcome: SubmitOutcome) -> PostAdOutcome {
        match outcome {
            SubmitOutcome::Rejected => PostAdOutcome::Invalid,
            SubmitOutcome::VerificationRequired => PostAdOutcome::VerificationRequired,
            SubmitOutcome::Committed(draft) => {
                let listing_id = self.listings.create(draft).id.clone();
                self.post_ad = None;
                self.page = Page::Home;
                PostAdOutcome::Posted { listing_id }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post_ad::Step;

    fn seeded() -> Session {
        Session::seeded(&AppConfig::default()).expect("seed must load")
    }

    fn logged_in() -> Session {
        let mut session = seeded();
        session.login(data::demo_user());
        session
    }

    #[test]
    fn seeded_session_starts_at_home_with_data() {
        let session = seeded();
        assert_eq!(*session.page(), Page::Home);
        assert!(session.current_user().is_none());
        assert_eq!(session.listings().len(), 6);
        assert_eq!(session.messages().len(), 3);
        assert!(!session.featured().is_empty());
        assert!(session.featured().len() <= 6);
        assert!(session.recent().len() <= 8);
    }

    #[test]
    fn send_message_requires_login_and_listing() {
        let mut session = seeded();
        assert!(matches!(
            session.send_message("listing-1", "salom"),
            Err(SessionError::NotLoggedIn)
        ));

        let mut session = logged_in();
        assert!(matches!(
            session.send_message("listing-404", "salom"),
            Err(SessionError::ListingNotFound(_))
        ));

        let before = session.messages().len();
        assert!(session.send_message("listing-1", "   ").unwrap().is_none());
        assert_eq!(session.messages().len(), before);

        let sent = session.send_message("listing-1", "salom").unwrap().unwrap();
        assert_eq!(sent.receiver_id, "user-2");
        assert_eq!(session.messages().len(), before + 1);
    }

    #[test]
    fn sent_message_bubbles_its_conversation_to_the_top() {
        let mut session = logged_in();
        session.send_message("listing-2", "Yana savolim bor edi").unwrap();
        let convs = session.conversations();
        assert_eq!(convs[0].chat_id, chat::chat_id("user-1", "user-3"));
    }

    #[test]
    fn logout_clears_favorites_and_routes_home() {
        let mut session = logged_in();
        session.toggle_favorite("listing-1");
        session.navigate(Page::Dashboard);
        session.logout();
        assert!(session.current_user().is_none());
        assert!(session.favorites().is_empty());
        assert_eq!(*session.page(), Page::Home);
    }

    #[test]
    fn navigating_to_a_product_records_a_view() {
        let mut session = seeded();
        let before = session.listings().get("listing-1").unwrap().views;
        session.navigate(Page::Product { listing_id: "listing-1".into() });
        assert_eq!(session.listings().get("listing-1").unwrap().views, before + 1);
    }

    #[test]
    fn post_ad_commit_lands_newest_first_and_routes_home() {
        let mut session = logged_in();
        session.navigate(Page::PostAd);
        {
            let flow = session.post_ad_flow().unwrap();
            flow.select_category(&Catalog::load().unwrap(), "electronics").unwrap();
            flow.title = "Televizor".into();
            flow.description = "Deyarli yangi".into();
            flow.price = Some(2_000_000);
        }
        let before = session.listings().len();
        let outcome = session.submit_post_ad().unwrap();
        let listing_id = match outcome {
            PostAdOutcome::Posted { listing_id } => listing_id,
            other => panic!("expected Posted, got {other:?}"),
        };
        assert_eq!(session.listings().len(), before + 1);
        assert_eq!(session.listings().iter().next().unwrap().id, listing_id);
        assert_eq!(*session.page(), Page::Home);
        assert!(session.post_ad_flow().is_none(), "flow instance is discarded after commit");
    }

    #[test]
    fn high_trust_post_gates_then_commits_after_verification() {
        let mut session = logged_in();
        session.navigate(Page::PostAd);
        {
            let flow = session.post_ad_flow().unwrap();
            flow.select_category(&Catalog::load().unwrap(), "cars").unwrap();
            flow.title = "Spark 2021".into();
            flow.description = "Holati a'lo".into();
            flow.price = Some(110_000_000);
        }
        let before = session.listings().len();
        assert_eq!(session.submit_post_ad().unwrap(), PostAdOutcome::VerificationRequired);
        assert_eq!(session.listings().len(), before, "nothing stored while gated");
        assert_eq!(session.post_ad_flow().unwrap().step(), Step::Verification);

        let verified = User { myid_verified: true, ..data::demo_user() };
        let outcome = session.complete_post_ad_verification(verified).unwrap();
        assert!(matches!(outcome, PostAdOutcome::Posted { .. }));
        assert_eq!(session.listings().len(), before + 1);
        assert!(session.current_user().unwrap().myid_verified);
    }

    #[test]
    fn verification_without_a_flow_changes_nothing() {
        let mut session = logged_in();
        assert!(!session.current_user().unwrap().myid_verified);
        let verified = User { myid_verified: true, ..data::demo_user() };
        assert!(matches!(
            session.complete_post_ad_verification(verified),
            Err(SessionError::NoActiveFlow)
        ));
        assert!(!session.current_user().unwrap().myid_verified, "error path must not replace the user");
    }

    #[test]
    fn invalid_commit_leaves_store_and_step_unchanged() {
        let mut session = logged_in();
        session.navigate(Page::PostAd);
        {
            let flow = session.post_ad_flow().unwrap();
            flow.select_category(&Catalog::load().unwrap(), "fashion").unwrap();
            flow.title = "".into();
            flow.description = "desc".into();
            flow.price = Some(10_000);
        }
        let before = session.listings().len();
        assert_eq!(session.submit_post_ad().unwrap(), PostAdOutcome::Invalid);
        assert_eq!(session.listings().len(), before);
        assert_eq!(session.post_ad_flow().unwrap().step(), Step::DetailsEntry);
    }

    #[test]
    fn favorites_resolve_against_live_store_only() {
        let mut session = logged_in();
        session.toggle_favorite("listing-1");
        session.toggle_favorite("listing-ghost");
        let resolved = session.favorite_listings();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "listing-1");
        // the dangling id stays in the raw set
        assert!(session.favorites().contains("listing-ghost"));
    }

    #[test]
    fn dashboard_counts_reflect_the_seed() {
        let mut session = seeded();
        assert!(matches!(session.dashboard(), Err(SessionError::NotLoggedIn)));
        session.login(data::demo_user());
        let dashboard = session.dashboard().unwrap();
        assert_eq!(dashboard.chat_count, 2);
        assert_eq!(dashboard.unread_count, 1);
        assert!(dashboard.my_ads.is_empty(), "demo user has no seeded listings");
    }

    #[test]
    fn seller_panel_omits_unknown_sellers() {
        let mut session = logged_in();
        session.navigate(Page::PostAd);
        {
            let flow = session.post_ad_flow().unwrap();
            flow.select_category(&Catalog::load().unwrap(), "electronics").unwrap();
            flow.title = "Pechka".into();
            flow.description = "d".into();
            flow.price = Some(500_000);
        }
        session.submit_post_ad().unwrap();
        let listing = session.listings().iter().next().unwrap();
        assert!(session.seller_of(listing).is_some());

        let orphan = Listing { seller_id: "user-999".into(), ..listing.clone() };
        assert!(session.seller_of(&orphan).is_none());
    }
}
