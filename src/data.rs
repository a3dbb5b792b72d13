//! Demo seed: the static users, listings and messages the session starts
//! with. Timestamps are relative to the current clock so the relative
//! formatters show something sensible.

use chrono::{Duration, Utc};

use crate::chat::chat_id;
use crate::models::{Condition, Listing, Location, Message, User, CURRENCY};

/// The user the mocked MYiD login resolves to. Deliberately unverified so
/// the high-trust posting gate can be exercised in the demo.
pub fn demo_user() -> User {
    mock_users()
        .into_iter()
        .next()
        .expect("seed always contains at least one user")
}

pub fn mock_users() -> Vec<User> {
    let now = Utc::now();
    vec![
        User {
            id: "user-1".into(),
            name: "Aziz Karimov".into(),
            phone: "+998 90 123 45 67".into(),
            email: Some("aziz.karimov@example.uz".into()),
            avatar: None,
            myid_verified: false,
            member_since: now - Duration::days(420),
            location: "Toshkent".into(),
        },
        User {
            id: "user-2".into(),
            name: "Malika Yusupova".into(),
            phone: "+998 91 765 43 21".into(),
            email: None,
            avatar: None,
            myid_verified: true,
            member_since: now - Duration::days(800),
            location: "Toshkent".into(),
        },
        User {
            id: "user-3".into(),
            name: "Rustam Saidov".into(),
            phone: "+998 93 555 11 22".into(),
            email: Some("rustam.s@example.uz".into()),
            avatar: None,
            myid_verified: true,
            member_since: now - Duration::days(150),
            location: "Samarqand".into(),
        },
    ]
}

fn listing(
    id: &str,
    title: &str,
    price: u64,
    category: &str,
    subcategory: Option<&str>,
    seller: &str,
    hours_ago: i64,
    views: u64,
    condition: Condition,
    featured: bool,
    region: &str,
    city: &str,
) -> Listing {
    Listing {
        id: id.into(),
        title: title.into(),
        description: format!("{title} - batafsil ma'lumot uchun yozing."),
        price,
        currency: CURRENCY.into(),
        category: category.into(),
        subcategory: subcategory.map(Into::into),
        images: vec!["https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=800&q=80".into()],
        location: Location { region: region.into(), city: city.into() },
        seller_id: seller.into(),
        posted_at: Utc::now() - Duration::hours(hours_ago),
        views,
        condition: Some(condition),
        featured,
    }
}

/// Newest-first, matching the listing-store invariant.
pub fn mock_listings() -> Vec<Listing> {
    vec![
        listing(
            "listing-1",
            "iPhone 15 Pro Max 256GB",
            14_500_000,
            "electronics",
            Some("phones"),
            "user-2",
            2,
            184,
            Condition::New,
            true,
            "Toshkent",
            "Toshkent shahri",
        ),
        listing(
            "listing-2",
            "Chevrolet Nexia 3, 2019",
            95_000_000,
            "cars",
            None,
            "user-3",
            5,
            421,
            Condition::Used,
            true,
            "Samarqand",
            "Samarqand shahri",
        ),
        listing(
            "listing-3",
            "3 xonali kvartira, Chilonzor",
            680_000_000,
            "real-estate",
            Some("apartments"),
            "user-2",
            26,
            97,
            Condition::Used,
            false,
            "Toshkent",
            "Toshkent shahri",
        ),
        listing(
            "listing-4",
            "MacBook Air M2",
            11_200_000,
            "electronics",
            Some("computers"),
            "user-3",
            48,
            63,
            Condition::Refurbished,
            true,
            "Samarqand",
            "Samarqand shahri",
        ),
        listing(
            "listing-5",
            "Yumshoq mebel to'plami",
            4_800_000,
            "home-garden",
            None,
            "user-2",
            90,
            31,
            Condition::Used,
            false,
            "Toshkent",
            "Toshkent shahri",
        ),
        listing(
            "listing-6",
            "Ish: sotuvchi-konsultant",
            0,
            "jobs",
            None,
            "user-3",
            120,
            210,
            Condition::New,
            false,
            "Buxoro",
            "Buxoro shahri",
        ),
    ]
}

/// Two seeded conversations for the demo user: an active one with an unread
/// reply from the seller, and an older one-sided inquiry.
pub fn mock_messages() -> Vec<Message> {
    let now = Utc::now();
    let with_malika = chat_id("user-1", "user-2");
    let with_rustam = chat_id("user-1", "user-3");
    vec![
        Message {
            id: "msg-1".into(),
            chat_id: with_rustam.clone(),
            sender_id: "user-1".into(),
            receiver_id: "user-3".into(),
            text: "Assalomu alaykum, Nexia hali sotuvdami?".into(),
            timestamp: now - Duration::hours(4),
            read: true,
            listing_id: Some("listing-2".into()),
        },
        Message {
            id: "msg-2".into(),
            chat_id: with_malika.clone(),
            sender_id: "user-1".into(),
            receiver_id: "user-2".into(),
            text: "Salom! iPhone narxida kelishamizmi?".into(),
            timestamp: now - Duration::hours(2),
            read: true,
            listing_id: Some("listing-1".into()),
        },
        Message {
            id: "msg-3".into(),
            chat_id: with_malika,
            sender_id: "user-2".into(),
            receiver_id: "user-1".into(),
            text: "Salom! Ha, ozgina kelishsa bo'ladi.".into(),
            timestamp: now - Duration::minutes(30),
            read: false,
            listing_id: Some("listing-1".into()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat;

    #[test]
    fn seed_references_resolve() {
        let users = mock_users();
        let listings = mock_listings();
        for l in &listings {
            assert!(
                users.iter().any(|u| u.id == l.seller_id),
                "seller {} of {} missing from seed users",
                l.seller_id,
                l.id
            );
        }
        for m in mock_messages() {
            if let Some(listing_id) = &m.listing_id {
                assert!(listings.iter().any(|l| &l.id == listing_id));
            }
            assert!(users.iter().any(|u| u.id == m.sender_id));
            assert!(users.iter().any(|u| u.id == m.receiver_id));
        }
    }

    #[test]
    fn seed_listings_are_newest_first() {
        let listings = mock_listings();
        for pair in listings.windows(2) {
            assert!(pair[0].posted_at >= pair[1].posted_at);
        }
    }

    #[test]
    fn seed_conversation_with_malika_is_most_recent_and_unread() {
        let messages = mock_messages();
        let convs = chat::conversations(&messages);
        assert_eq!(convs.len(), 2);
        assert_eq!(convs[0].chat_id, chat::chat_id("user-1", "user-2"));
        assert!(convs[0].unread("user-1"));
        assert!(!convs[1].unread("user-1"));
    }

    #[test]
    fn demo_user_is_unverified() {
        assert!(!demo_user().myid_verified);
    }
}
