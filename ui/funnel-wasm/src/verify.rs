//! Receipt verification against the vision service.
//!
//! Order matters: the fingerprint dedup check runs before any network
//! call, and the fingerprint is persisted only after a verified=true
//! verdict. One attempt per upload; a rejected receipt can be replaced
//! with a new image.

use crate::api;
use crate::dom::{self, Elements};
use crate::payment;
use crate::state::{self, BrowserStore};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sa_flow::{receipt, ProfileStore};
use sa_types::FlowError;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

const VISION_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// A file was picked in the TRANSFER panel. Any earlier verdict is void.
pub async fn on_receipt_selected(els: Elements) {
    let _ = state::with_session(|s| s.clear_proof());
    payment::sync_confirm(&els);

    let Some(file) = els.receipt_input.files().and_then(|list| list.get(0)) else {
        dom::set_text(&els.receipt_status, "");
        return;
    };

    dom::set_text(&els.receipt_status, "Checking receipt…");
    match verify_file(&file).await {
        Ok(()) => {
            dom::set_text(&els.receipt_status, "Receipt verified ✓");
        }
        Err(err) => {
            dom::set_text(&els.receipt_status, "");
            els.receipt_input.set_value("");
            api::show_error(&els, &err.to_string());
        }
    }
    payment::sync_confirm(&els);
}

async fn verify_file(file: &web_sys::File) -> Result<(), FlowError> {
    let config = state::with_controller(|c| c.config().clone());
    let Some(api_key) = config.vision_api_key.clone().filter(|k| !k.is_empty()) else {
        // No backend configured: the confirm gate is bypassed elsewhere.
        return Ok(());
    };

    let bytes = read_bytes(file).await.map_err(|_| {
        FlowError::VerificationRejected("could not read the selected image".into())
    })?;
    let size = file.size() as u64;
    let fp = receipt::fingerprint(&bytes, &file.name(), size);
    receipt::check_unused(&BrowserStore, &fp)?;

    let bank_index = state::with_session(|s| s.selected_bank())
        .flatten()
        .unwrap_or(0);
    let bank = config
        .banks
        .get(bank_index)
        .cloned()
        .ok_or(FlowError::FormIncomplete)?;

    let now = js_sys::Date::new_0();
    let now_label = format!("{:02}:{:02}", now.get_hours(), now.get_minutes());
    let today_label = now
        .to_date_string()
        .as_string()
        .unwrap_or_default();
    let rubric = receipt::rubric(&bank, config.amount_naira, &now_label, &today_label);

    let mime = match file.type_() {
        t if t.is_empty() => "image/png".to_string(),
        t => t,
    };
    let body = serde_json::json!({
        "contents": [{
            "parts": [
                { "text": rubric },
                { "inline_data": { "mime_type": mime, "data": STANDARD.encode(&bytes) } },
            ],
        }],
        "generationConfig": { "responseMimeType": "application/json" },
    });

    let url = format!("{VISION_API_URL}?key={api_key}");
    let reply = api::post_json(&url, &body, &[])
        .await
        .map_err(FlowError::Gateway)?;

    let text = reply["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or_else(|| {
            FlowError::VerificationRejected("the verification service returned no verdict".into())
        })?;
    let verdict = receipt::parse_verdict(text)?;
    receipt::judge(&verdict)?;

    BrowserStore.mark_fingerprint_used(&fp);
    let _ = state::with_session(|s| s.set_proof_verified(fp));
    Ok(())
}

async fn read_bytes(file: &web_sys::File) -> Result<Vec<u8>, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
