//! Onboarding form logic: registration and login against the single-slot
//! store. Validation is presence-only; credential comparison is exact
//! string equality on the stored record (a deliberate client-demo
//! simplification, not a bug).

use crate::store::ProfileStore;
use sa_types::{FlowError, UserProfile};

/// Raw field values read from the registration form.
#[derive(Debug, Clone, Default)]
pub struct RegistrationInput {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl RegistrationInput {
    /// Presence check only. No email or phone format validation.
    pub fn validate(&self) -> Result<UserProfile, FlowError> {
        let all_present = [
            &self.name,
            &self.username,
            &self.email,
            &self.phone,
            &self.password,
        ]
        .iter()
        .all(|f| !f.trim().is_empty());

        if !all_present {
            return Err(FlowError::FormIncomplete);
        }

        Ok(UserProfile {
            name: self.name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            password: self.password.clone(),
            is_activated: false,
        })
    }
}

/// Register a new account: validate, overwrite whatever the store holds,
/// and return the fresh profile for the controller to onboard. The store is
/// untouched when validation fails.
pub fn register(store: &dyn ProfileStore, input: &RegistrationInput) -> Result<UserProfile, FlowError> {
    let profile = input.validate()?;
    store.save_profile(&profile);
    Ok(profile)
}

/// Log in against the stored profile. The identifier matches either the
/// username or the email; both it and the password compare by exact string
/// equality.
pub fn login(
    store: &dyn ProfileStore,
    identifier: &str,
    password: &str,
) -> Result<UserProfile, FlowError> {
    let Some(profile) = store.load_profile() else {
        return Err(FlowError::AccountNotFound);
    };

    let identifier = identifier.trim();
    let identity_matches = identifier == profile.username || identifier == profile.email;
    if !identity_matches || password != profile.password {
        return Err(FlowError::LoginFailed);
    }

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn input() -> RegistrationInput {
        RegistrationInput {
            name: "Ada".into(),
            username: "ada1".into(),
            email: "ada@x.com".into(),
            phone: "+2348012345678".into(),
            password: "secret".into(),
        }
    }

    #[test]
    fn any_empty_field_blocks_registration_and_leaves_store_unchanged() {
        let store = MemoryStore::default();
        for blank in 0..5 {
            let mut i = input();
            match blank {
                0 => i.name.clear(),
                1 => i.username.clear(),
                2 => i.email.clear(),
                3 => i.phone = "   ".into(),
                _ => i.password.clear(),
            }
            assert_eq!(register(&store, &i), Err(FlowError::FormIncomplete));
            assert!(store.load_profile().is_none());
        }
    }

    #[test]
    fn registration_then_login_returns_the_identical_record() {
        let store = MemoryStore::default();
        let registered = register(&store, &input()).unwrap();
        assert!(!registered.is_activated);

        let by_username = login(&store, "ada1", "secret").unwrap();
        assert_eq!(by_username, registered);

        let by_email = login(&store, "ada@x.com", "secret").unwrap();
        assert_eq!(by_email, registered);
    }

    #[test]
    fn login_reports_missing_account_and_mismatches_distinctly() {
        let store = MemoryStore::default();
        assert_eq!(
            login(&store, "ada1", "secret"),
            Err(FlowError::AccountNotFound)
        );

        register(&store, &input()).unwrap();
        assert_eq!(
            login(&store, "ada1", "wrong"),
            Err(FlowError::LoginFailed)
        );
        assert_eq!(
            login(&store, "nobody", "secret"),
            Err(FlowError::LoginFailed)
        );
        // Exact equality: password comparison is case sensitive.
        assert_eq!(
            login(&store, "ada1", "SECRET"),
            Err(FlowError::LoginFailed)
        );
    }

    #[test]
    fn registering_twice_overwrites_the_single_slot() {
        let store = MemoryStore::default();
        register(&store, &input()).unwrap();

        let mut second = input();
        second.username = "ada2".into();
        second.password = "other".into();
        register(&store, &second).unwrap();

        assert_eq!(login(&store, "ada1", "secret"), Err(FlowError::LoginFailed));
        assert_eq!(login(&store, "ada2", "other").unwrap().username, "ada2");
    }

    #[test]
    fn login_preserves_activation_flag() {
        let store = MemoryStore::default();
        let mut profile = register(&store, &input()).unwrap();
        profile.is_activated = true;
        store.save_profile(&profile);

        assert!(login(&store, "ada1", "secret").unwrap().is_activated);
    }
}
