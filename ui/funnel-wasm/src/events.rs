//! Event binding.
//!
//! Wires all static UI event listeners once at startup; views are shown
//! and hidden around them. Dynamic rows (payment tabs, bank accounts) bind
//! their own handlers at render time in `payment.rs`.

use crate::dashboard;
use crate::dom::Elements;
use crate::payment;
use crate::signup;
use crate::success;
use crate::verify;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Helper: attach a sync click handler that receives the elements.
macro_rules! on_click {
    ($el:expr, $els:expr, $handler:expr) => {{
        let els = $els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            $handler(&els);
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }};
}

/// Bind all static UI event listeners. Call once after init.
pub fn bind_events(els: &Elements) {
    // ── Home ──
    on_click!(els.home_signup_btn, els, |e: &Elements| {
        crate::nav::begin(e, sa_types::View::Signup)
    });

    // ── Signup form ──
    on_click!(els.signup_submit_btn, els, signup::on_submit);
    on_click!(els.signup_mode_toggle, els, signup::on_toggle_mode);
    on_click!(els.signup_back_btn, els, signup::on_back);

    // ── Dashboard gated actions ──
    on_click!(els.dash_topup_btn, els, dashboard::on_gated_action);
    on_click!(els.dash_withdraw_btn, els, dashboard::on_gated_action);
    for tile in &els.dash_tiles {
        on_click!(tile, els, dashboard::on_gated_action);
    }

    // ── Activation prompt ──
    on_click!(els.activate_now_btn, els, dashboard::on_activate);
    on_click!(els.activate_close_btn, els, dashboard::on_prompt_dismiss);
    on_click!(els.activate_backdrop, els, dashboard::on_prompt_dismiss);

    // ── Payment ──
    on_click!(els.card_pay_btn, els, payment::on_card_pay);
    on_click!(els.opay_pay_btn, els, payment::on_opay_pay);
    on_click!(els.transfer_confirm_btn, els, payment::on_confirm_transfer);
    on_click!(els.payment_back_btn, els, payment::on_back);

    // Receipt upload (change, not click; the verification round trip is
    // async).
    {
        let els2 = els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            let els3 = els2.clone();
            spawn_local(async move {
                verify::on_receipt_selected(els3).await;
            });
        }) as Box<dyn FnMut(_)>);
        els.receipt_input
            .add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }

    // ── Success ──
    on_click!(els.success_cta, els, success::on_redirect);
}
