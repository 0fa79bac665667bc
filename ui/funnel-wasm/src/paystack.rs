//! Paystack inline-checkout bridge.
//!
//! The widget is a page-level script; it is looked up dynamically so a
//! missing SDK degrades to the terminal "refresh" alert instead of a
//! startup failure. The success callback reports the provider reference,
//! falling back to the locally generated one.

use crate::dom::{self, Elements};
use crate::payment;
use crate::state;
use gloo_console::error;
use gloo_timers::future::TimeoutFuture;
use js_sys::{Function, Object, Reflect};
use sa_flow::{session, PaymentOutcome};
use sa_types::FlowError;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub fn open_checkout(els: &Elements) {
    let (config, user) = state::with_controller(|c| (c.config().clone(), c.pending_user().cloned()));
    let Some(user) = user else {
        return;
    };
    let reference = session::payment_reference(js_sys::Math::random());

    if let Err(err) = open_widget(els, &config, &user, &reference) {
        error!("paystack setup failed:", format!("{err:?}"));
        let _ = dom::window().alert_with_message(&FlowError::WidgetUnavailable.to_string());
    }
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value)?;
    Ok(())
}

fn open_widget(
    els: &Elements,
    config: &sa_types::FunnelConfig,
    user: &sa_types::UserProfile,
    reference: &str,
) -> Result<(), JsValue> {
    let window: JsValue = dom::window().into();
    let pop = Reflect::get(&window, &JsValue::from_str("PaystackPop"))?;
    if pop.is_undefined() || pop.is_null() {
        return Err(JsValue::from_str("PaystackPop is not loaded"));
    }
    let setup: Function = Reflect::get(&pop, &JsValue::from_str("setup"))?.dyn_into()?;

    let opts = Object::new();
    set(&opts, "key", &JsValue::from_str(&config.paystack_public_key))?;
    set(&opts, "email", &JsValue::from_str(&user.email))?;
    set(&opts, "amount", &JsValue::from_f64(config.amount_kobo() as f64))?;
    set(&opts, "currency", &JsValue::from_str("NGN"))?;
    set(&opts, "ref", &JsValue::from_str(reference))?;

    let metadata = serde_wasm_bindgen::to_value(&serde_json::json!({
        "custom_fields": [
            {
                "display_name": "Mobile Number",
                "variable_name": "mobile_number",
                "value": user.phone,
            },
            {
                "display_name": "Username",
                "variable_name": "username",
                "value": user.username,
            },
        ]
    }))?;
    set(&opts, "metadata", &metadata)?;

    let els2 = els.clone();
    let fallback = reference.to_string();
    let callback = Closure::wrap(Box::new(move |response: JsValue| {
        let provider_ref = Reflect::get(&response, &JsValue::from_str("reference"))
            .ok()
            .and_then(|v| v.as_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| fallback.clone());
        payment::complete(&els2, PaymentOutcome::Instant {
            reference: provider_ref,
        });
    }) as Box<dyn FnMut(JsValue)>);
    set(&opts, "callback", callback.as_ref())?;
    callback.forget();

    let handler = setup.call1(&pop, &opts)?;
    let open: Function = Reflect::get(&handler, &JsValue::from_str("openIframe"))?.dyn_into()?;
    open.call0(&handler)?;

    allow_clipboard_in_widget();
    Ok(())
}

/// Grant clipboard permissions to the Paystack iframe and nothing else.
/// The iframe is injected asynchronously, so poll briefly for it.
fn allow_clipboard_in_widget() {
    spawn_local(async move {
        for _ in 0..10 {
            TimeoutFuture::new(200).await;
            if let Some(iframe) = dom::query("iframe[src*=\"paystack\"]") {
                let _ = iframe.set_attribute("allow", "clipboard-read; clipboard-write");
                return;
            }
        }
    });
}
