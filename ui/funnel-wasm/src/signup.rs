//! Onboarding form wiring.
//!
//! REGISTER and LOGIN share one form; the toggle is user-driven, never the
//! controller's. Login mode hides the register-only rows and reuses the
//! username input as the username-or-email field. Validation and the
//! credential check live in `sa-flow`; this module only moves strings.

use crate::api;
use crate::dom::{self, Elements};
use crate::nav;
use crate::state::{self, BrowserStore, FormMode};
use sa_flow::form::{self, RegistrationInput};
use sa_types::View;

pub fn mount(els: &Elements) {
    apply_mode(els, state::form_mode());

    // Prefill when re-entering with a pending user (e.g. back from payment).
    if let Some(user) = state::with_controller(|c| c.pending_user().cloned()) {
        dom::set_input_value(&els.signup_name, &user.name);
        dom::set_input_value(&els.signup_username, &user.username);
        dom::set_input_value(&els.signup_email, &user.email);
        dom::set_input_value(&els.signup_phone, &user.phone);
        dom::set_input_value(&els.signup_password, &user.password);
    }
}

pub fn apply_mode(els: &Elements, mode: FormMode) {
    let register = mode == FormMode::Register;
    for row in &els.register_only_rows {
        dom::set_visible(row, register);
    }
    if register {
        dom::set_text(&els.signup_title, "Create your account");
        dom::set_text(&els.signup_submit_btn, "Create Account");
        dom::set_text(&els.signup_mode_toggle, "Already registered? Log in");
        els.signup_username.set_placeholder("streamer123");
    } else {
        dom::set_text(&els.signup_title, "Welcome back");
        dom::set_text(&els.signup_submit_btn, "Log In");
        dom::set_text(&els.signup_mode_toggle, "New here? Create an account");
        els.signup_username.set_placeholder("username or email");
    }
}

pub fn on_toggle_mode(els: &Elements) {
    let next = match state::form_mode() {
        FormMode::Register => FormMode::Login,
        FormMode::Login => FormMode::Register,
    };
    state::set_form_mode(next);
    apply_mode(els, next);
}

pub fn on_submit(els: &Elements) {
    let result = match state::form_mode() {
        FormMode::Register => {
            let input = RegistrationInput {
                name: dom::get_input_value(&els.signup_name),
                username: dom::get_input_value(&els.signup_username),
                email: dom::get_input_value(&els.signup_email),
                phone: dom::get_input_value(&els.signup_phone),
                // Passwords are taken verbatim, no trimming.
                password: els.signup_password.value(),
            };
            form::register(&BrowserStore, &input)
        }
        FormMode::Login => {
            let identifier = dom::get_input_value(&els.signup_username);
            let password = els.signup_password.value();
            form::login(&BrowserStore, &identifier, &password)
        }
    };

    match result {
        Ok(profile) => {
            let dest = state::with_controller(|c| c.onboard(profile));
            nav::begin(els, dest);
        }
        Err(err) => api::show_error(els, &err.to_string()),
    }
}

pub fn on_back(els: &Elements) {
    nav::begin(els, View::Home);
}
