//! HTTP plumbing and the transient notice banner.
//!
//! JSON requests go through `gloo-net`; responses come back as
//! `serde_json::Value` with errors flattened to display strings, which is
//! all the callers need (§6 boundaries are single-attempt, no retry).

use crate::dom::{self, Elements};
use crate::state;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

const NOTICE_MS: u32 = 4_000;

/// POST a JSON body and parse a JSON reply. Non-2xx responses surface the
/// body text so gateway error messages reach the user.
pub async fn post_json(
    url: &str,
    body: &serde_json::Value,
    headers: &[(&str, &str)],
) -> Result<serde_json::Value, String> {
    let mut req = Request::post(url);
    for (name, value) in headers {
        req = req.header(name, value);
    }
    let resp = req
        .json(body)
        .map_err(|e| format!("request build error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("network error: {e}"))?;

    let text = resp.text().await.unwrap_or_default();
    if !resp.ok() {
        return Err(format!("{} {}: {}", resp.status(), resp.status_text(), text));
    }
    serde_json::from_str(&text).map_err(|e| format!("JSON parse error: {e} — raw: {text}"))
}

/// Show a transient notice over the active view, auto-hiding after a few
/// seconds unless a newer notice replaced it.
pub fn show_notice(els: &Elements, msg: &str, is_error: bool) {
    dom::set_text(&els.notice, msg);
    dom::toggle_class(&els.notice, "error", is_error);
    dom::set_visible(&els.notice, true);

    let epoch = state::bump_notice_epoch();
    let notice = els.notice.clone();
    spawn_local(async move {
        TimeoutFuture::new(NOTICE_MS).await;
        if state::notice_epoch() == epoch {
            dom::set_visible(&notice, false);
        }
    });
}

pub fn show_error(els: &Elements, msg: &str) {
    show_notice(els, msg, true);
}
