//! Stream Africa onboarding funnel, WASM frontend.
//!
//! Pure Rust + WASM shell around the flow logic in `sa-flow`. Modularised
//! for extensibility: each concern lives in its own module.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod dom;
pub mod events;
pub mod nav;
pub mod opay;
pub mod payment;
pub mod paystack;
pub mod signup;
pub mod state;
pub mod success;
pub mod toast;
pub mod verify;

use sa_flow::FlowController;
use sa_types::View;
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init()
}

/// Main initialisation sequence.
fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;

    // Startup configuration, injected once; never module-level globals.
    let funnel_config = config::load();
    if let Some(body) = gloo_utils::document().body() {
        dom::add_class(&body, funnel_config.theme.body_class());
    }
    state::with_mut(|s| s.controller = Some(FlowController::new(funnel_config)));

    // Tag the initial entry so the back gesture has something to restore.
    nav::replace_history(View::Home);
    nav::render(&els, View::Home);

    nav::bind_popstate(&els);
    events::bind_events(&els);

    Ok(())
}
