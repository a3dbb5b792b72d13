// Core entities shared across the session, stores and views
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// UI language tag. Drives formatters and catalog name selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Uz,
    Ru,
    En,
}

impl Language {
    pub fn parse(s: &str) -> Option<Language> {
        match s.trim().to_lowercase().as_str() {
            "uz" => Some(Language::Uz),
            "ru" => Some(Language::Ru),
            "en" => Some(Language::En),
            _ => None,
        }
    }
}

/// The only currency in the demo marketplace.
pub const CURRENCY: &str = "UZS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub myid_verified: bool,
    pub member_since: DateTime<Utc>,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    Used,
    Refurbished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub region: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: u64,
    pub currency: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub images: Vec<String>,
    pub location: Location,
    pub seller_id: String,
    pub posted_at: DateTime<Utc>,
    pub views: u64,
    pub condition: Option<Condition>,
    #[serde(default)]
    pub featured: bool,
}

/// A listing as assembled by the post-ad flow: everything except the fields
/// the store mints on create (`id`, `posted_at`, `views`, `currency`).
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price: u64,
    pub category: String,
    pub subcategory: Option<String>,
    pub images: Vec<String>,
    pub location: Location,
    pub seller_id: String,
    pub condition: Option<Condition>,
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub listing_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parse_accepts_known_tags() {
        assert_eq!(Language::parse("uz"), Some(Language::Uz));
        assert_eq!(Language::parse(" RU "), Some(Language::Ru));
        assert_eq!(Language::parse("en"), Some(Language::En));
        assert_eq!(Language::parse("it"), None);
    }

    #[test]
    fn listing_roundtrips_through_json() {
        let listing = Listing {
            id: "listing-1".into(),
            title: "iPhone 15 Pro".into(),
            description: "Yangi holatda".into(),
            price: 14_500_000,
            currency: CURRENCY.into(),
            category: "electronics".into(),
            subcategory: Some("phones".into()),
            images: vec!["https://example.com/1.jpg".into()],
            location: Location { region: "Toshkent".into(), city: "Toshkent shahri".into() },
            seller_id: "user-2".into(),
            posted_at: Utc::now(),
            views: 12,
            condition: Some(Condition::New),
            featured: true,
        };
        let json = serde_json::to_string(&listing).unwrap();
        let back: Listing = serde_json::from_str(&json).unwrap();
        assert_eq!(back, listing);
    }
}
