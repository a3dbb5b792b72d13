//! Conversation aggregation over the flat message collection.
//!
//! Conversations are a derived view, recomputed on read: messages are
//! partitioned by chat id in arrival order, conversation headers are sorted
//! by last activity, and peer/unread/listing attributes are resolved per
//! group. Nothing here owns state.
//!
//! A chat id is derived from the buyer/seller pair at send time, independent
//! of the listing. Two listings between the same pair therefore share one
//! thread, and the thread's associated listing is taken from its first
//! message. That collapse is a deliberate choice of this model.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{Listing, Message, User};

/// Chat id for a buyer contacting a listing's seller.
pub fn chat_id(buyer_id: &str, seller_id: &str) -> String {
    format!("chat-{buyer_id}-{seller_id}")
}

/// One message group, in arrival order. Only [`group_by_chat`] constructs
/// these, and never with an empty group.
#[derive(Debug, Clone)]
pub struct Conversation<'a> {
    pub chat_id: &'a str,
    messages: Vec<&'a Message>,
}

impl<'a> Conversation<'a> {
    /// The group's messages in arrival order; never empty.
    pub fn messages(&self) -> &[&'a Message] {
        &self.messages
    }

    pub fn last_message(&self) -> &'a Message {
        self.messages[self.messages.len() - 1]
    }

    /// The other party, from the viewer's perspective. Assumes exactly two
    /// participants per thread.
    pub fn peer_id(&self, current_user_id: &str) -> &'a str {
        let last = self.last_message();
        if last.sender_id == current_user_id {
            &last.receiver_id
        } else {
            &last.sender_id
        }
    }

    /// Unread iff the latest message is unread and addressed to the viewer.
    /// A message the viewer sent never marks the thread unread for them.
    pub fn unread(&self, current_user_id: &str) -> bool {
        let last = self.last_message();
        !last.read && last.receiver_id == current_user_id
    }

    /// The listing this thread is about: whatever the first message carried.
    pub fn listing_id(&self) -> Option<&'a str> {
        self.messages[0].listing_id.as_deref()
    }
}

/// Partition messages by chat id, preserving arrival order both across
/// groups (first-seen order) and within each group. Every message lands in
/// exactly one group.
pub fn group_by_chat(messages: &[Message]) -> Vec<Conversation<'_>> {
    let mut groups: Vec<Conversation<'_>> = Vec::new();
    for msg in messages {
        match groups.iter_mut().find(|g| g.chat_id == msg.chat_id) {
            Some(group) => group.messages.push(msg),
            None => groups.push(Conversation { chat_id: &msg.chat_id, messages: vec![msg] }),
        }
    }
    groups
}

/// Grouped conversations ordered by last-message timestamp, most recently
/// active first. Ties keep first-seen order (stable sort).
pub fn conversations(messages: &[Message]) -> Vec<Conversation<'_>> {
    let mut groups = group_by_chat(messages);
    groups.sort_by(|a, b| b.last_message().timestamp.cmp(&a.last_message().timestamp));
    groups
}

/// Resolve the active thread: an explicit selection wins when it still
/// exists, otherwise the most recently active conversation is selected.
pub fn select<'a, 'b>(
    convs: &'b [Conversation<'a>],
    selected: Option<&str>,
) -> Option<&'b Conversation<'a>> {
    match selected {
        Some(id) => convs.iter().find(|c| c.chat_id == id),
        None => convs.first(),
    }
}

/// Build the message a buyer sends about a listing. Blank text (after
/// trimming) is a no-op and yields `None`; the caller is responsible for
/// gating on session presence before invoking this.
pub fn compose_message(sender: &User, listing: &Listing, text: &str) -> Option<Message> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(Message {
        id: format!("msg-{}", Uuid::new_v4()),
        chat_id: chat_id(&sender.id, &listing.seller_id),
        sender_id: sender.id.clone(),
        receiver_id: listing.seller_id.clone(),
        text: text.to_string(),
        timestamp: Utc::now(),
        read: false,
        listing_id: Some(listing.id.clone()),
    })
}
