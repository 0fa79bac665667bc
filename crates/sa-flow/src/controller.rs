//! Navigation controller.
//!
//! Owns the current view, the profile being onboarded, the payment result,
//! and the transitioning flag. The controller is pure: it decides *what*
//! should happen and hands a [`Transition`] back to the shell, which owns
//! the artificial delay, history pushes, and scroll reset.

use crate::message;
use crate::store::ProfileStore;
use sa_types::{FunnelConfig, UserProfile, View};

/// A navigation the shell must perform: push a history entry tagged with
/// `target`, wait out the transition delay, then commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub target: View,
}

/// Signal from whichever payment path completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// A checkout widget or hosted session reported completion with a
    /// provider (or fallback) reference.
    Instant { reference: String },
    /// The user self-reported an out-of-band bank transfer; only a
    /// human-readable bank label is available.
    Manual { bank_label: String },
}

pub struct FlowController {
    config: FunnelConfig,
    view: View,
    pending_user: Option<UserProfile>,
    payment_reference: String,
    payment_bank_label: String,
    transitioning: bool,
}

impl FlowController {
    pub fn new(config: FunnelConfig) -> Self {
        FlowController {
            config,
            view: View::Home,
            pending_user: None,
            payment_reference: String::new(),
            payment_bank_label: String::new(),
            transitioning: false,
        }
    }

    pub fn config(&self) -> &FunnelConfig {
        &self.config
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn pending_user(&self) -> Option<&UserProfile> {
        self.pending_user.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn payment_reference(&self) -> &str {
        &self.payment_reference
    }

    pub fn payment_bank_label(&self) -> &str {
        &self.payment_bank_label
    }

    /// Views that render onboarding data cannot be entered without a
    /// pending user (a hard refresh loses in-memory state); they redirect
    /// to SIGNUP instead of rendering with missing data.
    fn guard(&self, view: View) -> View {
        match view {
            View::Dashboard | View::Payment | View::Success if self.pending_user.is_none() => {
                View::Signup
            }
            v => v,
        }
    }

    /// Begin a navigation. Returns `None` (a silent no-op) while another
    /// transition is already in flight; otherwise marks the controller
    /// transitioning and tells the shell where to land.
    pub fn navigate_to(&mut self, view: View) -> Option<Transition> {
        if self.transitioning {
            return None;
        }
        let target = self.guard(view);
        self.transitioning = true;
        Some(Transition { target })
    }

    /// Commit a transition after the shell's delay. Re-applies the guard so
    /// state that changed mid-flight cannot land on a view missing its data.
    pub fn commit(&mut self, view: View) -> View {
        let target = self.guard(view);
        self.view = target;
        self.transitioning = false;
        target
    }

    /// Re-enter a view from a browser history entry. Missing or
    /// unparseable tags default to HOME. Back navigation commits
    /// immediately; there is no artificial delay on the platform gesture.
    pub fn restore(&mut self, tag: Option<&str>) -> View {
        let view = tag.and_then(View::parse).unwrap_or(View::Home);
        let target = self.guard(view);
        self.view = target;
        self.transitioning = false;
        target
    }

    /// Accept a profile from the onboarding form (either a fresh
    /// registration or a successful login) and pick the next view: an
    /// already-activated profile goes straight to the dashboard, otherwise
    /// the configuration decides dashboard-first or payment-first.
    pub fn onboard(&mut self, profile: UserProfile) -> View {
        let dest = if profile.is_activated || self.config.dashboard_before_payment {
            View::Dashboard
        } else {
            View::Payment
        };
        self.pending_user = Some(profile);
        dest
    }

    /// Record a completed payment: keep the reference or bank label, flip
    /// activation, persist it if a profile exists in the store, and land on
    /// SUCCESS.
    pub fn payment_succeeded(&mut self, outcome: PaymentOutcome, store: &dyn ProfileStore) -> View {
        match outcome {
            PaymentOutcome::Instant { reference } => {
                self.payment_reference = reference;
                self.payment_bank_label.clear();
            }
            PaymentOutcome::Manual { bank_label } => {
                self.payment_bank_label = bank_label;
                self.payment_reference.clear();
            }
        }
        if let Some(user) = self.pending_user.as_mut() {
            user.is_activated = true;
            if store.load_profile().is_some() {
                store.save_profile(user);
            }
        }
        View::Success
    }

    /// The SUCCESS view's terminal action: the deep link carrying the
    /// summary message. `None` when no user is pending (nothing to hand
    /// off).
    pub fn redirect_url(&self) -> Option<String> {
        let user = self.pending_user.as_ref()?;
        let body =
            message::summary_message(user, &self.payment_reference, &self.payment_bank_label);
        Some(message::redirect_url(&self.config.redirect, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use sa_types::PaymentMode;

    fn ada() -> UserProfile {
        UserProfile {
            name: "Ada".into(),
            username: "ada1".into(),
            email: "ada@x.com".into(),
            phone: "+2348012345678".into(),
            password: "secret".into(),
            is_activated: false,
        }
    }

    fn controller(dashboard_first: bool) -> FlowController {
        let config = FunnelConfig {
            dashboard_before_payment: dashboard_first,
            ..FunnelConfig::default()
        };
        FlowController::new(config)
    }

    #[test]
    fn starts_at_home_and_navigates_with_guard() {
        let mut ctl = controller(true);
        assert_eq!(ctl.view(), View::Home);

        // No pending user: payment redirects to signup.
        let t = ctl.navigate_to(View::Payment).unwrap();
        assert_eq!(t.target, View::Signup);
        assert!(ctl.is_transitioning());
        assert_eq!(ctl.commit(t.target), View::Signup);
        assert!(!ctl.is_transitioning());
    }

    #[test]
    fn navigation_is_silent_noop_while_transitioning() {
        let mut ctl = controller(true);
        let first = ctl.navigate_to(View::Signup);
        assert!(first.is_some());
        assert!(ctl.navigate_to(View::Home).is_none());
        ctl.commit(View::Signup);
        assert!(ctl.navigate_to(View::Home).is_some());
    }

    #[test]
    fn onboarding_destination_follows_config_and_activation() {
        let mut dashboard_first = controller(true);
        assert_eq!(dashboard_first.onboard(ada()), View::Dashboard);

        let mut payment_first = controller(false);
        assert_eq!(payment_first.onboard(ada()), View::Payment);

        let mut activated = controller(false);
        let user = UserProfile {
            is_activated: true,
            ..ada()
        };
        assert_eq!(activated.onboard(user), View::Dashboard);
    }

    #[test]
    fn restore_defaults_to_home_on_missing_or_garbage_state() {
        let mut ctl = controller(true);
        assert_eq!(ctl.restore(None), View::Home);
        assert_eq!(ctl.restore(Some("NOT_A_VIEW")), View::Home);
        assert_eq!(ctl.restore(Some("SIGNUP")), View::Signup);
    }

    #[test]
    fn restore_applies_missing_data_guard() {
        let mut ctl = controller(true);
        // Simulates a hard refresh: history says DASHBOARD but the
        // in-memory user is gone.
        assert_eq!(ctl.restore(Some("DASHBOARD")), View::Signup);

        ctl.onboard(ada());
        assert_eq!(ctl.restore(Some("DASHBOARD")), View::Dashboard);
    }

    #[test]
    fn instant_payment_success_stores_reference_and_activates() {
        let store = MemoryStore::default();
        let mut ctl = controller(true);
        ctl.onboard(ada());
        store.save_profile(&ada());

        let next = ctl.payment_succeeded(
            PaymentOutcome::Instant {
                reference: "X".into(),
            },
            &store,
        );
        assert_eq!(next, View::Success);
        assert_eq!(ctl.payment_reference(), "X");
        assert_eq!(ctl.payment_bank_label(), "");
        assert!(ctl.pending_user().unwrap().is_activated);
        assert!(store.load_profile().unwrap().is_activated);
    }

    #[test]
    fn manual_payment_success_stores_bank_label_only() {
        let store = MemoryStore::default();
        let mut ctl = controller(true);
        ctl.onboard(ada());

        ctl.payment_succeeded(
            PaymentOutcome::Manual {
                bank_label: "Moniepoint MFB (7010661707)".into(),
            },
            &store,
        );
        assert_eq!(ctl.payment_reference(), "");
        assert_eq!(ctl.payment_bank_label(), "Moniepoint MFB (7010661707)");
        // No profile was ever persisted, so activation is not written back.
        assert!(store.load_profile().is_none());
    }

    #[test]
    fn redirect_url_requires_a_pending_user() {
        let ctl = controller(true);
        assert!(ctl.redirect_url().is_none());

        let store = MemoryStore::default();
        let mut ctl = controller(true);
        ctl.onboard(ada());
        ctl.payment_succeeded(
            PaymentOutcome::Instant {
                reference: "STREAM-42".into(),
            },
            &store,
        );
        let url = ctl.redirect_url().unwrap();
        assert!(url.starts_with("https://wa.me/2349012345678?text="));
        assert!(url.contains("STREAM-42"));
    }

    #[test]
    fn payment_mode_reaches_controller_config() {
        let ctl = FlowController::new(FunnelConfig {
            payment_mode: PaymentMode::CardOnly,
            ..FunnelConfig::default()
        });
        assert_eq!(ctl.config().payment_mode, PaymentMode::CardOnly);
    }
}
