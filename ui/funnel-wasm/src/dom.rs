//! DOM element bindings.
//!
//! All static element references are resolved once at startup. Dynamic rows
//! (payment tabs, bank accounts) are created and wired at render time.
//! To add new UI elements, add a field here and bind it in
//! `Elements::bind()`.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

// ── Helpers ──

fn doc() -> Document {
    gloo_utils::document()
}

pub fn window() -> web_sys::Window {
    gloo_utils::window()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    doc().query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let nl = doc().query_selector_all(selector).unwrap();
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value().trim().to_string()
}

pub fn set_input_value(el: &HtmlInputElement, val: &str) {
    el.set_value(val);
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn create_element(tag: &str) -> Element {
    doc().create_element(tag).unwrap()
}

/// Show or hide an element via the `hidden` class.
pub fn set_visible(el: &Element, visible: bool) {
    toggle_class(el, "hidden", !visible);
}

// ── Elements struct ──

/// All static DOM references used by the funnel.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Overlay / notices
    pub loader: Element,
    pub notice: Element,

    // View sections
    pub view_home: Element,
    pub view_signup: Element,
    pub view_dashboard: Element,
    pub view_payment: Element,
    pub view_success: Element,

    // Home
    pub home_signup_btn: HtmlElement,

    // Signup form
    pub signup_title: Element,
    pub signup_name: HtmlInputElement,
    pub signup_username: HtmlInputElement,
    pub signup_email: HtmlInputElement,
    pub signup_phone: HtmlInputElement,
    pub signup_password: HtmlInputElement,
    pub register_only_rows: Vec<Element>,
    pub signup_submit_btn: HtmlElement,
    pub signup_mode_toggle: HtmlElement,
    pub signup_back_btn: HtmlElement,

    // Dashboard
    pub dash_greeting: Element,
    pub dash_status: Element,
    pub dash_topup_btn: HtmlElement,
    pub dash_withdraw_btn: HtmlElement,
    pub dash_tiles: Vec<Element>,
    pub activate_modal: Element,
    pub activate_backdrop: Element,
    pub activate_close_btn: HtmlElement,
    pub activate_now_btn: HtmlElement,

    // Social-proof toast
    pub toast: Element,
    pub toast_name: Element,
    pub toast_time: Element,

    // Payment
    pub pay_user_name: Element,
    pub pay_user_email: Element,
    pub pay_amount: Element,
    pub pay_tabs: Element,
    pub panel_card: Element,
    pub panel_transfer: Element,
    pub panel_opay: Element,
    pub card_pay_btn: HtmlElement,
    pub bank_list: Element,
    pub countdown_display: Element,
    pub receipt_block: Element,
    pub receipt_input: HtmlInputElement,
    pub receipt_status: Element,
    pub transfer_confirm_btn: HtmlButtonElement,
    pub opay_pay_btn: HtmlElement,
    pub payment_back_btn: HtmlElement,

    // Success
    pub success_label: Element,
    pub success_value: Element,
    pub success_cta: HtmlElement,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_input {
    ($id:expr) => {
        by_id_typed::<HtmlInputElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing input #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

macro_rules! get_button {
    ($id:expr) => {
        by_id_typed::<HtmlButtonElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing button #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            loader: get_el!("loader"),
            notice: get_el!("notice"),

            view_home: get_el!("viewHome"),
            view_signup: get_el!("viewSignup"),
            view_dashboard: get_el!("viewDashboard"),
            view_payment: get_el!("viewPayment"),
            view_success: get_el!("viewSuccess"),

            home_signup_btn: get_html!("homeSignupBtn"),

            signup_title: get_el!("signupTitle"),
            signup_name: get_input!("signupName"),
            signup_username: get_input!("signupUsername"),
            signup_email: get_input!("signupEmail"),
            signup_phone: get_input!("signupPhone"),
            signup_password: get_input!("signupPassword"),
            register_only_rows: query_all(".register-only"),
            signup_submit_btn: get_html!("signupSubmitBtn"),
            signup_mode_toggle: get_html!("signupModeToggle"),
            signup_back_btn: get_html!("signupBackBtn"),

            dash_greeting: get_el!("dashGreeting"),
            dash_status: get_el!("dashStatus"),
            dash_topup_btn: get_html!("dashTopUpBtn"),
            dash_withdraw_btn: get_html!("dashWithdrawBtn"),
            dash_tiles: query_all(".earning-tile"),
            activate_modal: get_el!("activateModal"),
            activate_backdrop: get_el!("activateBackdrop"),
            activate_close_btn: get_html!("activateCloseBtn"),
            activate_now_btn: get_html!("activateNowBtn"),

            toast: get_el!("toast"),
            toast_name: get_el!("toastName"),
            toast_time: get_el!("toastTime"),

            pay_user_name: get_el!("payUserName"),
            pay_user_email: get_el!("payUserEmail"),
            pay_amount: get_el!("payAmount"),
            pay_tabs: get_el!("payTabs"),
            panel_card: get_el!("panelCard"),
            panel_transfer: get_el!("panelTransfer"),
            panel_opay: get_el!("panelOpay"),
            card_pay_btn: get_html!("cardPayBtn"),
            bank_list: get_el!("bankList"),
            countdown_display: get_el!("countdownDisplay"),
            receipt_block: get_el!("receiptBlock"),
            receipt_input: get_input!("receiptInput"),
            receipt_status: get_el!("receiptStatus"),
            transfer_confirm_btn: get_button!("transferConfirmBtn"),
            opay_pay_btn: get_html!("opayPayBtn"),
            payment_back_btn: get_html!("paymentBackBtn"),

            success_label: get_el!("successLabel"),
            success_value: get_el!("successValue"),
            success_cta: get_html!("successCta"),
        })
    }
}
