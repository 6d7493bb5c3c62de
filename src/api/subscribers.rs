//! Mailing-list capture.
//!
//! Subscribers are held behind the [`SubscriberStore`] trait so the HTTP
//! layer never owns global state. The in-memory store is what the service
//! ships with; anything durable can be swapped in through [`super::AppState`].

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

/// Message returned for a first-time signup.
pub const SUBSCRIBED_MESSAGE: &str =
    "Thanks for subscribing! You'll receive updates on federal buyout news.";

/// Message returned when the address is already on the list.
pub const ALREADY_SUBSCRIBED_MESSAGE: &str = "You're already subscribed! We'll keep you updated.";

/// What happened when an address was offered to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    /// The address was added.
    Subscribed,
    /// The address was already present; nothing changed.
    AlreadySubscribed,
}

impl SignupOutcome {
    /// The user-facing message for this outcome.
    pub fn message(self) -> &'static str {
        match self {
            Self::Subscribed => SUBSCRIBED_MESSAGE,
            Self::AlreadySubscribed => ALREADY_SUBSCRIBED_MESSAGE,
        }
    }
}

/// Storage for newsletter subscribers.
pub trait SubscriberStore: Send + Sync {
    /// Adds `email` if it is not already present.
    fn subscribe(&self, email: &str) -> SignupOutcome;

    /// Number of stored addresses.
    fn count(&self) -> usize;
}

/// A process-local subscriber list.
#[derive(Debug, Default)]
pub struct InMemorySubscriberStore {
    subscribers: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl InMemorySubscriberStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// When `email` subscribed, if it has.
    pub fn subscribed_at(&self, email: &str) -> Option<DateTime<Utc>> {
        self.subscribers
            .read()
            .ok()
            .and_then(|subscribers| subscribers.get(email).copied())
    }
}

impl SubscriberStore for InMemorySubscriberStore {
    fn subscribe(&self, email: &str) -> SignupOutcome {
        // A poisoned lock still holds a consistent map; recover it.
        let mut subscribers = match self.subscribers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if subscribers.contains_key(email) {
            return SignupOutcome::AlreadySubscribed;
        }
        subscribers.insert(email.to_string(), Utc::now());
        SignupOutcome::Subscribed
    }

    fn count(&self) -> usize {
        match self.subscribers.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

/// Basic shape check for an email address: something, `@`, something, a dot,
/// something, with no whitespace and exactly one `@`.
///
/// ```
/// use buyout_engine::api::is_valid_email;
///
/// assert!(is_valid_email("pat@agency.gov"));
/// assert!(!is_valid_email("pat@agency"));
/// assert!(!is_valid_email("pat @agency.gov"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_signup_then_duplicate() {
        let store = InMemorySubscriberStore::new();

        assert_eq!(store.subscribe("pat@agency.gov"), SignupOutcome::Subscribed);
        assert_eq!(
            store.subscribe("pat@agency.gov"),
            SignupOutcome::AlreadySubscribed
        );
        assert_eq!(store.count(), 1);
        assert!(store.subscribed_at("pat@agency.gov").is_some());
        assert!(store.subscribed_at("lee@agency.gov").is_none());
    }

    #[test]
    fn test_outcome_messages() {
        assert!(SignupOutcome::Subscribed.message().starts_with("Thanks"));
        assert!(SignupOutcome::AlreadySubscribed
            .message()
            .contains("already subscribed"));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.agency.gov"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.gov"));
        assert!(!is_valid_email("@agency.gov"));
        assert!(!is_valid_email("pat@.gov"));
        assert!(!is_valid_email("pat@agency."));
        assert!(!is_valid_email("pat@@agency.gov"));
        assert!(!is_valid_email("pat@agency.gov\n"));
    }

    #[test]
    fn test_store_is_shareable_across_threads() {
        use std::sync::Arc;

        let store = Arc::new(InMemorySubscriberStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.subscribe(&format!("user{}@agency.gov", i % 4)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.count(), 4);
    }
}
