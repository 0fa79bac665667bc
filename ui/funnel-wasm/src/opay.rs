//! OPay hosted-checkout session creation.
//!
//! One POST, no retry. On success the whole browser navigates to the
//! returned cashier URL; the in-app flow ends at the redirect and any
//! completion confirmation arrives out of band.

use crate::api;
use crate::dom::{self, Elements};
use crate::state;
use sa_flow::session;
use sa_types::{
    FlowError, OpayAmount, OpayCheckoutRequest, OpayCheckoutResponse, OpayProduct, OpayUserInfo,
};

const SUCCESS_CODE: &str = "00000";

pub async fn start_checkout(els: &Elements) {
    let (config, user) = state::with_controller(|c| (c.config().clone(), c.pending_user().cloned()));
    let Some(user) = user else {
        return;
    };

    let reference = session::payment_reference(js_sys::Math::random());
    let origin = dom::window()
        .location()
        .origin()
        .unwrap_or_default();

    let request = OpayCheckoutRequest {
        country: "NG".into(),
        reference,
        amount: OpayAmount {
            total: config.amount_kobo(),
            currency: "NGN".into(),
        },
        return_url: origin.clone(),
        callback_url: origin.clone(),
        cancel_url: origin,
        user_info: OpayUserInfo {
            user_email: user.email.clone(),
            user_mobile: user.phone.clone(),
            user_name: user.username.clone(),
        },
        product: OpayProduct {
            name: "Stream Africa Onboarding".into(),
            description: "One-time lifetime activation".into(),
        },
        pay_method: "BankCard".into(),
    };

    let body = match serde_json::to_value(&request) {
        Ok(v) => v,
        Err(e) => {
            api::show_error(els, &FlowError::Gateway(e.to_string()).to_string());
            return;
        }
    };
    let auth = format!("Bearer {}", config.opay.public_key);
    let headers = [
        ("Authorization", auth.as_str()),
        ("MerchantId", config.opay.merchant_id.as_str()),
    ];

    let reply = match api::post_json(&config.opay.api_url, &body, &headers).await {
        Ok(v) => v,
        Err(e) => {
            api::show_error(els, &FlowError::Gateway(e).to_string());
            return;
        }
    };

    match serde_json::from_value::<OpayCheckoutResponse>(reply) {
        Ok(resp) if resp.code == SUCCESS_CODE => match resp.data {
            Some(data) => {
                let _ = dom::window().location().set_href(&data.cashier_url);
            }
            None => api::show_error(
                els,
                &FlowError::Gateway("gateway returned no cashier URL".into()).to_string(),
            ),
        },
        Ok(resp) => {
            let detail = resp.message.unwrap_or(resp.code);
            api::show_error(els, &FlowError::Gateway(detail).to_string());
        }
        Err(_) => api::show_error(
            els,
            &FlowError::Gateway("unexpected gateway response".into()).to_string(),
        ),
    }
}
