//! Global application state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).
//! Timer ownership lives here too: generation counters guard one-shot
//! timeouts against firing for a view that has been replaced, and the
//! countdown interval handle cancels on drop.

use gloo_storage::{LocalStorage, Storage};
use gloo_timers::callback::Interval;
use sa_flow::{DashboardGate, FlowController, PaymentSession, ProfileStore};
use sa_types::UserProfile;
use std::cell::RefCell;

const PROFILE_KEY: &str = "sa_profile";
const RECEIPTS_KEY: &str = "sa_used_receipts";

/// Which face the onboarding form shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Register,
    Login,
}

#[derive(Default)]
pub struct AppState {
    pub controller: Option<FlowController>,
    pub session: Option<PaymentSession>,
    pub gate: Option<DashboardGate>,
    pub form_mode: FormMode,
    // Generation counters for stale-update prevention.
    pub nav_epoch: u32,
    pub dash_epoch: u32,
    pub toast_epoch: u32,
    pub notice_epoch: u32,
    // 1 Hz transfer countdown; cancelled by dropping the handle.
    pub countdown: Option<Interval>,
}

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::default());
}

/// Run a closure with shared read access to the state.
pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&AppState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

/// Run a closure with mutable access to the state.
pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut AppState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

// ── Convenience accessors ──

pub fn with_controller<F, R>(f: F) -> R
where
    F: FnOnce(&mut FlowController) -> R,
{
    with_mut(|s| {
        let ctl = s
            .controller
            .as_mut()
            .expect("controller initialised at startup");
        f(ctl)
    })
}

pub fn with_session<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut PaymentSession) -> R,
{
    with_mut(|s| s.session.as_mut().map(f))
}

pub fn with_gate<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut DashboardGate) -> R,
{
    with_mut(|s| s.gate.as_mut().map(f))
}

pub fn form_mode() -> FormMode {
    with(|s| s.form_mode)
}

pub fn set_form_mode(mode: FormMode) {
    with_mut(|s| s.form_mode = mode);
}

pub fn set_countdown(interval: Option<Interval>) {
    with_mut(|s| s.countdown = interval);
}

// ── Generation counters ──

pub fn bump_nav_epoch() -> u32 {
    with_mut(|s| {
        s.nav_epoch = s.nav_epoch.wrapping_add(1);
        s.nav_epoch
    })
}

pub fn nav_epoch() -> u32 {
    with(|s| s.nav_epoch)
}

pub fn bump_dash_epoch() -> u32 {
    with_mut(|s| {
        s.dash_epoch = s.dash_epoch.wrapping_add(1);
        s.dash_epoch
    })
}

pub fn dash_epoch() -> u32 {
    with(|s| s.dash_epoch)
}

pub fn bump_toast_epoch() -> u32 {
    with_mut(|s| {
        s.toast_epoch = s.toast_epoch.wrapping_add(1);
        s.toast_epoch
    })
}

pub fn toast_epoch() -> u32 {
    with(|s| s.toast_epoch)
}

pub fn bump_notice_epoch() -> u32 {
    with_mut(|s| {
        s.notice_epoch = s.notice_epoch.wrapping_add(1);
        s.notice_epoch
    })
}

pub fn notice_epoch() -> u32 {
    with(|s| s.notice_epoch)
}

// ── localStorage-backed profile store ──

/// The production [`ProfileStore`]: a single profile slot plus the set of
/// used receipt fingerprints, both whole-record JSON values in
/// `localStorage`. Write failures (quota, private mode) are swallowed, as
/// the browser store contract allows.
pub struct BrowserStore;

impl ProfileStore for BrowserStore {
    fn load_profile(&self) -> Option<UserProfile> {
        LocalStorage::get(PROFILE_KEY).ok()
    }

    fn save_profile(&self, profile: &UserProfile) {
        let _ = LocalStorage::set(PROFILE_KEY, profile);
    }

    fn used_fingerprints(&self) -> Vec<String> {
        LocalStorage::get(RECEIPTS_KEY).unwrap_or_default()
    }

    fn mark_fingerprint_used(&self, fingerprint: &str) {
        let mut fps = self.used_fingerprints();
        if !fps.iter().any(|f| f == fingerprint) {
            fps.push(fingerprint.to_string());
            let _ = LocalStorage::set(RECEIPTS_KEY, &fps);
        }
    }
}
