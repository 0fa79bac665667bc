//! Success view and the messaging handoff.
//!
//! The wording branches on how the payment completed: a reference means an
//! instant payment, an empty reference with a bank label means a manual
//! transfer. The terminal button navigates the browser away immediately;
//! there is no in-app confirmation step.

use crate::dom::{self, Elements};
use crate::state;
use sa_flow::message::{self, PaymentKind};

pub fn mount(els: &Elements) {
    let (reference, bank_label, use_whats_app) = state::with_controller(|c| {
        (
            c.payment_reference().to_string(),
            c.payment_bank_label().to_string(),
            c.config().redirect.use_whats_app,
        )
    });

    match message::classify(&reference, &bank_label) {
        PaymentKind::Manual => {
            dom::set_text(&els.success_label, "Bank Transfer");
            dom::set_text(&els.success_value, &bank_label);
        }
        PaymentKind::Instant => {
            dom::set_text(&els.success_label, "Payment Reference");
            dom::set_text(&els.success_value, &reference);
        }
    }

    dom::set_text(
        &els.success_cta,
        if use_whats_app {
            "Complete Registration on WhatsApp"
        } else {
            "Join Telegram Channel"
        },
    );
}

pub fn on_redirect(_els: &Elements) {
    if let Some(url) = state::with_controller(|c| c.redirect_url()) {
        let _ = dom::window().location().set_href(&url);
    }
}
