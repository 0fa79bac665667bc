//! Single-slot profile persistence.
//!
//! The store holds at most one profile plus the set of receipt fingerprints
//! already spent on a successful verification. The production backend is
//! browser `localStorage`, which swallows write failures, so the trait is
//! infallible by design; a missing key reads as "no profile yet".

use sa_types::UserProfile;
use std::cell::RefCell;

pub trait ProfileStore {
    fn load_profile(&self) -> Option<UserProfile>;
    fn save_profile(&self, profile: &UserProfile);

    fn used_fingerprints(&self) -> Vec<String>;
    fn mark_fingerprint_used(&self, fingerprint: &str);

    fn fingerprint_used(&self, fingerprint: &str) -> bool {
        self.used_fingerprints().iter().any(|f| f == fingerprint)
    }
}

/// In-memory store for tests and headless use.
#[derive(Default)]
pub struct MemoryStore {
    profile: RefCell<Option<UserProfile>>,
    fingerprints: RefCell<Vec<String>>,
}

impl ProfileStore for MemoryStore {
    fn load_profile(&self) -> Option<UserProfile> {
        self.profile.borrow().clone()
    }

    fn save_profile(&self, profile: &UserProfile) {
        *self.profile.borrow_mut() = Some(profile.clone());
    }

    fn used_fingerprints(&self) -> Vec<String> {
        self.fingerprints.borrow().clone()
    }

    fn mark_fingerprint_used(&self, fingerprint: &str) {
        let mut fps = self.fingerprints.borrow_mut();
        if !fps.iter().any(|f| f == fingerprint) {
            fps.push(fingerprint.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(username: &str) -> UserProfile {
        UserProfile {
            name: "Ada".into(),
            username: username.into(),
            email: "ada@x.com".into(),
            phone: "+2348012345678".into(),
            password: "secret".into(),
            is_activated: false,
        }
    }

    #[test]
    fn store_is_single_slot() {
        let store = MemoryStore::default();
        assert!(store.load_profile().is_none());

        store.save_profile(&profile("first"));
        store.save_profile(&profile("second"));

        let stored = store.load_profile().unwrap();
        assert_eq!(stored.username, "second");
    }

    #[test]
    fn fingerprints_deduplicate() {
        let store = MemoryStore::default();
        store.mark_fingerprint_used("abc");
        store.mark_fingerprint_used("abc");
        assert_eq!(store.used_fingerprints(), vec!["abc".to_string()]);
        assert!(store.fingerprint_used("abc"));
        assert!(!store.fingerprint_used("def"));
    }
}
