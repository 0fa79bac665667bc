//! Social-proof toast rotation on the dashboard.
//!
//! Cadence: 2 s initial delay, 4 s visible, 3 s gap, repeating until the
//! view unmounts. The loop checks the toast generation counter after every
//! await so a torn-down dashboard never gets a late toast.

use crate::dom::{self, Elements};
use crate::state;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

const INITIAL_DELAY_MS: u32 = 2_000;
const SHOW_MS: u32 = 4_000;
const GAP_MS: u32 = 3_000;

const NAMES: &[&str] = &[
    "Chinedu A.",
    "Sarah K.",
    "Emmanuel O.",
    "Zainab B.",
    "David I.",
    "Ngozi E.",
    "Tunde B.",
    "Fatima Y.",
    "Kofi M.",
    "Amara U.",
    "Blessing J.",
    "Samuel T.",
    "Grace P.",
    "Ibrahim S.",
    "Chioma N.",
    "Femi A.",
    "Yusuf D.",
    "Kehinde L.",
    "Adebayo O.",
    "Mary J.",
    "Gideon F.",
    "Victoria R.",
    "Emeka C.",
    "Joy H.",
    "Paul K.",
    "Esther M.",
    "Daniel W.",
    "Ruth B.",
    "Isaac N.",
    "Peace O.",
];

const TIMES: &[&str] = &["Just now", "1m ago", "Just now", "2m ago", "Just now"];

fn pick(list: &'static [&'static str]) -> &'static str {
    let index = (js_sys::Math::random() * list.len() as f64) as usize;
    list[index.min(list.len() - 1)]
}

pub fn start(els: &Elements) {
    let epoch = state::bump_toast_epoch();
    let els = els.clone();
    spawn_local(async move {
        TimeoutFuture::new(INITIAL_DELAY_MS).await;
        loop {
            if state::toast_epoch() != epoch {
                return;
            }
            dom::set_text(&els.toast_name, pick(NAMES));
            dom::set_text(&els.toast_time, pick(TIMES));
            dom::set_visible(&els.toast, true);

            TimeoutFuture::new(SHOW_MS).await;
            if state::toast_epoch() != epoch {
                return;
            }
            dom::set_visible(&els.toast, false);

            TimeoutFuture::new(GAP_MS).await;
        }
    });
}
