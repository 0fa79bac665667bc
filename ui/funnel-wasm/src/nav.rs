//! Navigation shell.
//!
//! The controller in `sa-flow` decides where to go; this module owns the
//! browser side: the decorative 3-second loader delay, history entries
//! tagged with the target view, popstate restoration, scroll reset, and the
//! teardown of every view-scoped timer when a view is replaced. Timeouts
//! are guarded by a generation counter so a transition abandoned mid-delay
//! never commits.

use crate::dom::{self, Elements};
use crate::state;
use crate::{dashboard, payment, signup, success};
use gloo_timers::future::TimeoutFuture;
use sa_types::View;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

const TRANSITION_MS: u32 = 3_000;

/// Shape of the value stored on each history entry.
#[derive(Serialize, Deserialize)]
struct HistoryEntry {
    view: View,
}

/// Begin a user-initiated navigation: push history, show the loader, and
/// commit after the delay unless the transition was superseded.
pub fn begin(els: &Elements, view: View) {
    let Some(transition) = state::with_controller(|c| c.navigate_to(view)) else {
        return;
    };

    push_history(transition.target);
    dom::set_visible(&els.loader, true);

    let epoch = state::bump_nav_epoch();
    let els = els.clone();
    spawn_local(async move {
        TimeoutFuture::new(TRANSITION_MS).await;
        if state::nav_epoch() != epoch {
            return;
        }
        let committed = state::with_controller(|c| c.commit(transition.target));
        dom::set_visible(&els.loader, false);
        render(&els, committed);
        dom::window().scroll_to_with_x_and_y(0.0, 0.0);
    });
}

/// Swap the visible section and run the new view's mount hook. Always
/// tears down the previous view's timers and ephemeral state first.
pub fn render(els: &Elements, view: View) {
    teardown(els);

    let sections = [
        (&els.view_home, View::Home),
        (&els.view_signup, View::Signup),
        (&els.view_dashboard, View::Dashboard),
        (&els.view_payment, View::Payment),
        (&els.view_success, View::Success),
    ];
    for (section, v) in sections {
        dom::set_visible(section, view == v);
    }

    match view {
        View::Home => {}
        View::Signup => signup::mount(els),
        View::Dashboard => dashboard::mount(els),
        View::Payment => payment::mount(els),
        View::Success => success::mount(els),
    }
}

/// Cancel every timer owned by the outgoing view and drop its ephemeral
/// state. A replaced view must not mutate anything afterward.
fn teardown(els: &Elements) {
    state::bump_dash_epoch();
    state::bump_toast_epoch();
    state::set_countdown(None);
    state::with_mut(|s| {
        s.session = None;
        s.gate = None;
    });
    dom::set_visible(&els.toast, false);
    dom::set_visible(&els.activate_modal, false);
}

// ── Browser history ──

fn history_value(view: View) -> Option<JsValue> {
    serde_wasm_bindgen::to_value(&HistoryEntry { view }).ok()
}

pub fn push_history(view: View) {
    if let (Ok(history), Some(value)) = (dom::window().history(), history_value(view)) {
        let _ = history.push_state(&value, "");
    }
}

pub fn replace_history(view: View) {
    if let (Ok(history), Some(value)) = (dom::window().history(), history_value(view)) {
        let _ = history.replace_state(&value, "");
    }
}

/// Map the platform back gesture onto the controller. Restoration commits
/// immediately (no decorative delay) and invalidates any in-flight
/// transition.
pub fn bind_popstate(els: &Elements) {
    let els = els.clone();
    let cb = Closure::wrap(Box::new(move |e: web_sys::PopStateEvent| {
        state::bump_nav_epoch();
        dom::set_visible(&els.loader, false);

        let entry = serde_wasm_bindgen::from_value::<HistoryEntry>(e.state()).ok();
        let tag = entry.map(|entry| entry.view.as_str());
        let view = state::with_controller(|c| c.restore(tag));
        render(&els, view);
        dom::window().scroll_to_with_x_and_y(0.0, 0.0);
    }) as Box<dyn FnMut(_)>);
    dom::window()
        .add_event_listener_with_callback("popstate", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}
