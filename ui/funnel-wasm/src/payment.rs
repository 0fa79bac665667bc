//! Payment selector view.
//!
//! Renders the configuration-gated method tabs, the bank list for manual
//! transfers, and the 1 Hz countdown. Session state lives in
//! `sa-flow::session`; the interval handle lives in the app state and is
//! cancelled by teardown when the view is replaced.

use crate::api;
use crate::dom::{self, Elements};
use crate::nav;
use crate::opay;
use crate::paystack;
use crate::state::{self, BrowserStore};
use gloo_timers::callback::Interval;
use sa_flow::{CountdownEvent, PaymentOutcome, PaymentSession};
use sa_types::{ExpiryPolicy, FlowError, PaymentMethod, View};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub fn mount(els: &Elements) {
    let (config, user) = state::with_controller(|c| (c.config().clone(), c.pending_user().cloned()));
    let Some(user) = user else {
        return;
    };

    dom::set_text(&els.pay_user_name, &user.name);
    dom::set_text(&els.pay_user_email, &user.email);
    dom::set_text(&els.pay_amount, &format!("₦{}", thousands(config.amount_naira)));

    let session = PaymentSession::new(&config);
    let method = session.method();
    state::with_mut(|s| s.session = Some(session));

    render_tabs(els, method);
    render_banks(els);
    dom::set_visible(&els.receipt_block, config.verifier_configured());
    dom::set_text(&els.receipt_status, "");
    els.receipt_input.set_value("");

    apply_method(els, method);
    sync_confirm(els);
}

fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn method_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Card => "Pay with Card",
        PaymentMethod::Transfer => "Bank Transfer",
        PaymentMethod::Opay => "Pay with OPay",
    }
}

fn render_tabs(els: &Elements, active: PaymentMethod) {
    dom::set_inner_html(&els.pay_tabs, "");
    let offered = state::with_session(|s| s.offered().to_vec()).unwrap_or_default();

    for method in offered {
        let tab = dom::create_element("button");
        tab.set_attribute("type", "button").unwrap();
        tab.set_attribute("class", "pay-tab").unwrap();
        dom::toggle_class(&tab, "active", method == active);
        dom::set_text(&tab, method_label(method));

        let els2 = els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            on_select_method(&els2, method);
        }) as Box<dyn FnMut(_)>);
        tab.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();

        els.pay_tabs.append_child(&tab).unwrap();
    }
}

fn on_select_method(els: &Elements, method: PaymentMethod) {
    let switched = state::with_session(|s| s.select_method(method)).unwrap_or(false);
    if !switched {
        return;
    }
    render_tabs(els, method);
    apply_method(els, method);
}

fn apply_method(els: &Elements, method: PaymentMethod) {
    dom::set_visible(&els.panel_card, method == PaymentMethod::Card);
    dom::set_visible(&els.panel_transfer, method == PaymentMethod::Transfer);
    dom::set_visible(&els.panel_opay, method == PaymentMethod::Opay);

    if method == PaymentMethod::Transfer {
        if let Some(Some(remaining)) = state::with_session(|s| s.remaining_seconds()) {
            update_countdown_display(els, remaining);
        }
        ensure_countdown(els);
    }
}

// ── Countdown ──

fn update_countdown_display(els: &Elements, remaining: u32) {
    let text = format!("{:02}:{:02}", remaining / 60, remaining % 60);
    dom::set_text(&els.countdown_display, &text);
    dom::toggle_class(&els.countdown_display, "expired", remaining == 0);
}

fn ensure_countdown(els: &Elements) {
    if state::with(|s| s.countdown.is_some()) {
        return;
    }

    let els = els.clone();
    let interval = Interval::new(1_000, move || {
        let event = state::with_session(|s| s.tick()).unwrap_or(CountdownEvent::Idle);
        match event {
            CountdownEvent::Tick(remaining) => update_countdown_display(&els, remaining),
            CountdownEvent::Expired => {
                update_countdown_display(&els, 0);
                api::show_error(&els, &FlowError::SessionExpired.to_string());

                let policy = state::with_controller(|c| c.config().expiry_policy);
                let els2 = els.clone();
                // Deferred: the handle must not be dropped from inside its
                // own callback.
                spawn_local(async move {
                    state::set_countdown(None);
                    if policy == ExpiryPolicy::ReturnToSignup {
                        nav::begin(&els2, View::Signup);
                    }
                });
            }
            CountdownEvent::Idle => {}
        }
    });
    state::set_countdown(Some(interval));
}

// ── Bank list ──

pub fn render_banks(els: &Elements) {
    dom::set_inner_html(&els.bank_list, "");
    let banks = state::with_controller(|c| c.config().banks.clone());
    let selected = state::with_session(|s| s.selected_bank()).flatten();

    for (index, bank) in banks.iter().enumerate() {
        let row = dom::create_element("div");
        let mut cls = "bank-row".to_string();
        if selected == Some(index) {
            cls.push_str(" bank-row--active");
        }
        row.set_attribute("class", &cls).unwrap();
        dom::set_inner_html(
            &row,
            &format!(
                r#"<div class="bank-name">{}</div>
                   <div class="bank-account">{}</div>
                   <div class="bank-holder">{}</div>
                   <button type="button" class="bank-copy">Copy</button>"#,
                bank.bank_name, bank.account_number, bank.account_name,
            ),
        );

        {
            let els2 = els.clone();
            let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
                let banks = state::with_controller(|c| c.config().banks.clone());
                let _ = state::with_session(|s| s.select_bank(index, &banks));
                render_banks(&els2);
                sync_confirm(&els2);
            }) as Box<dyn FnMut(_)>);
            row.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
                .unwrap();
            cb.forget();
        }

        if let Some(copy_btn) = row.query_selector(".bank-copy").ok().flatten() {
            let els2 = els.clone();
            let cb = Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                e.stop_propagation();
                on_copy_account(&els2, index);
            }) as Box<dyn FnMut(_)>);
            copy_btn
                .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
                .unwrap();
            cb.forget();
        }

        els.bank_list.append_child(&row).unwrap();
    }
}

/// Copying an account number also selects that row.
fn on_copy_account(els: &Elements, index: usize) {
    let banks = state::with_controller(|c| c.config().banks.clone());
    let copied = state::with_session(|s| s.copy_account(index, &banks)).flatten();
    if let Some(number) = copied {
        let _ = dom::window().navigator().clipboard().write_text(&number);
        api::show_notice(els, "Account number copied", false);
        render_banks(els);
        sync_confirm(els);
    }
}

/// Keep the "I have made the transfer" button in step with the session
/// gate (bank selected, and a verified receipt when a verifier is
/// configured).
pub fn sync_confirm(els: &Elements) {
    let enabled = state::with_session(|s| s.transfer_confirm_enabled()).unwrap_or(false);
    els.transfer_confirm_btn.set_disabled(!enabled);
}

// ── Terminal actions ──

pub fn on_confirm_transfer(els: &Elements) {
    let banks = state::with_controller(|c| c.config().banks.clone());
    let result = state::with_session(|s| s.confirm_transfer(&banks));
    match result {
        Some(Ok(outcome)) => complete(els, outcome),
        Some(Err(err)) => api::show_error(els, &err.to_string()),
        None => {}
    }
}

pub fn on_card_pay(els: &Elements) {
    paystack::open_checkout(els);
}

pub fn on_opay_pay(els: &Elements) {
    let els = els.clone();
    spawn_local(async move {
        opay::start_checkout(&els).await;
    });
}

pub fn on_back(els: &Elements) {
    nav::begin(els, View::Signup);
}

/// A payment path finished: record it on the controller (which flips and
/// persists activation) and move to the success view.
pub fn complete(els: &Elements, outcome: PaymentOutcome) {
    state::with_controller(|c| c.payment_succeeded(outcome, &BrowserStore));
    nav::begin(els, View::Success);
}
