//! Demo dashboard view.
//!
//! The gate logic lives in `sa-flow::dashboard`; this module renders it and
//! owns the 5-second forced-prompt timer. The timer is guarded by the
//! dashboard generation counter so it cannot fire for a dashboard that was
//! navigated away from.

use crate::dom::{self, Elements};
use crate::nav;
use crate::state;
use crate::toast;
use gloo_timers::future::TimeoutFuture;
use sa_flow::{DashboardGate, PromptState};
use sa_types::View;
use wasm_bindgen_futures::spawn_local;

const FORCE_PROMPT_MS: u32 = 5_000;

pub fn mount(els: &Elements) {
    let Some(user) = state::with_controller(|c| c.pending_user().cloned()) else {
        return;
    };

    let first_name = user.name.split_whitespace().next().unwrap_or(&user.name);
    dom::set_text(&els.dash_greeting, &format!("Hello, {first_name} 👋"));
    dom::set_text(
        &els.dash_status,
        if user.is_activated { "Verified" } else { "Demo Mode" },
    );

    state::with_mut(|s| s.gate = Some(DashboardGate::new(user.is_activated)));
    dom::set_visible(&els.activate_modal, false);
    toast::start(els);

    let epoch = state::bump_dash_epoch();
    let els = els.clone();
    spawn_local(async move {
        TimeoutFuture::new(FORCE_PROMPT_MS).await;
        if state::dash_epoch() != epoch {
            return;
        }
        let forced = state::with_gate(|g| g.on_idle_timeout()).unwrap_or(false);
        if forced {
            show_prompt(&els);
        }
    });
}

fn show_prompt(els: &Elements) {
    let forced = state::with_gate(|g| g.prompt()) == Some(PromptState::Forced);
    // The forced prompt has no close affordance.
    dom::set_visible(&els.activate_close_btn, !forced);
    dom::set_visible(&els.activate_modal, true);
}

/// Top-up, withdraw, earning-hub tiles, referral tile.
pub fn on_gated_action(els: &Elements) {
    let allowed = state::with_gate(|g| g.on_gated_action()).unwrap_or(true);
    if !allowed {
        show_prompt(els);
    }
    // Allowed actions are demo stubs; nothing to perform.
}

/// Close button or backdrop click; only a dismissible prompt closes.
pub fn on_prompt_dismiss(els: &Elements) {
    if state::with_gate(|g| g.dismiss()) == Some(true) {
        dom::set_visible(&els.activate_modal, false);
    }
}

/// The prompt's "Activate" button: begin the payment step. Activation
/// itself only happens on payment success.
pub fn on_activate(els: &Elements) {
    nav::begin(els, View::Payment);
}
