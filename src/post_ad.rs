//! Linear post-ad workflow: category-select, details-entry, an optional
//! identity-verification gate, then commit. Field values survive back
//! navigation within one flow instance; the instance is discarded after
//! commit. Validation never raises: an invalid commit attempt is inert and
//! the flow stays in details-entry.

use thiserror::Error;

use crate::catalog::{is_high_trust, Catalog};
use crate::models::{Condition, Language, ListingDraft, Location, User};
use crate::services::upload::FALLBACK_IMAGE;

pub const MAX_IMAGES: usize = 5;

const DEFAULT_REGION: &str = "Toshkent";
const DEFAULT_CITY: &str = "Toshkent shahri";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    CategorySelect,
    DetailsEntry,
    Verification,
    Committed,
}

#[derive(Debug, Error)]
pub enum PostAdError {
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}

/// Result of a commit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Preconditions unmet (or wrong step); nothing changed.
    Rejected,
    /// High-trust category with an unverified user: flow moved to the
    /// verification step instead of committing.
    VerificationRequired,
    /// Draft assembled; the flow is terminal.
    Committed(ListingDraft),
}

#[derive(Debug, Clone, Default)]
pub struct PostAdFlow {
    step: Step,
    category: Option<String>,
    pub title: String,
    pub description: String,
    pub price: Option<u64>,
    pub region: Option<String>,
    pub city: String,
    pub condition: Option<Condition>,
    images: Vec<String>,
}

impl PostAdFlow {
    pub fn new() -> Self {
        PostAdFlow { condition: Some(Condition::Used), ..Default::default() }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Choose exactly one category and advance to details entry.
    pub fn select_category(&mut self, catalog: &Catalog, category_id: &str) -> Result<(), PostAdError> {
        if catalog.category(category_id).is_none() {
            return Err(PostAdError::UnknownCategory(category_id.to_string()));
        }
        self.category = Some(category_id.to_string());
        self.step = Step::DetailsEntry;
        Ok(())
    }

    /// Step back without discarding entered field values.
    pub fn back(&mut self) {
        self.step = match self.step {
            Step::Verification => Step::DetailsEntry,
            Step::DetailsEntry => Step::CategorySelect,
            other => other,
        };
    }

    /// Append an image slot; capped at [`MAX_IMAGES`].
    pub fn add_image(&mut self, url: String) -> bool {
        if self.images.len() >= MAX_IMAGES {
            return false;
        }
        self.images.push(url);
        true
    }

    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    /// Commit precondition: non-empty title and description, positive price.
    pub fn can_submit(&self) -> bool {
        self.step == Step::DetailsEntry && self.fields_valid()
    }

    fn fields_valid(&self) -> bool {
        self.category.is_some()
            && !self.title.trim().is_empty()
            && !self.description.trim().is_empty()
            && self.price.map_or(false, |p| p > 0)
    }

    /// Attempt the commit transition from details entry. Redirects to the
    /// verification step when the category is high-trust and the user is not
    /// MYiD-verified.
    pub fn submit(&mut self, user: &User, catalog: &Catalog, lang: Language) -> SubmitOutcome {
        if !self.can_submit() {
            log::debug!("post-ad submit rejected at step {:?}", self.step);
            return SubmitOutcome::Rejected;
        }
        let category = self.category.clone().unwrap_or_default();
        if is_high_trust(&category) && !user.myid_verified {
            log::info!("category '{category}' needs identity verification");
            self.step = Step::Verification;
            return SubmitOutcome::VerificationRequired;
        }
        self.commit(user, catalog, lang)
    }

    /// Invoked after the verification collaborator reports success; runs the
    /// same commit logic details-entry would have run directly. Fields stay
    /// editable while verification is pending, so the preconditions are
    /// checked again here; if they no longer hold the flow drops back to
    /// details entry instead of committing.
    pub fn finish_verification(&mut self, user: &User, catalog: &Catalog, lang: Language) -> SubmitOutcome {
        if self.step != Step::Verification {
            return SubmitOutcome::Rejected;
        }
        if !self.fields_valid() {
            log::debug!("post-ad commit rejected after verification: fields no longer valid");
            self.step = Step::DetailsEntry;
            return SubmitOutcome::Rejected;
        }
        self.commit(user, catalog, lang)
    }

    fn commit(&mut self, user: &User, catalog: &Catalog, lang: Language) -> SubmitOutcome {
        let region = self
            .region
            .as_deref()
            .and_then(|id| catalog.region(id))
            .map(|r| r.name(lang).to_string())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        let city = if self.city.trim().is_empty() {
            DEFAULT_CITY.to_string()
        } else {
            self.city.trim().to_string()
        };
        let images = if self.images.is_empty() {
            vec![FALLBACK_IMAGE.to_string()]
        } else {
            self.images.clone()
        };

        self.step = Step::Committed;
        SubmitOutcome::Committed(ListingDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price.unwrap_or(0),
            category: self.category.clone().unwrap_or_default(),
            subcategory: None,
            images,
            location: Location { region, city },
            seller_id: user.id.clone(),
            condition: self.condition,
            featured: false,
        })
    }
}
