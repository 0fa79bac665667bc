//! Startup configuration.
//!
//! The page may embed a `<script type="application/json" id="funnelConfig">`
//! tag; its body deserialises into [`FunnelConfig`]. Anything missing or
//! unparseable falls back to the compiled product defaults, so a bare page
//! still boots.

use crate::dom;
use gloo_console::warn;
use sa_types::FunnelConfig;

pub fn load() -> FunnelConfig {
    let Some(el) = dom::by_id("funnelConfig") else {
        return FunnelConfig::default();
    };
    let raw = el.text_content().unwrap_or_default();
    match serde_json::from_str::<FunnelConfig>(&raw) {
        Ok(config) => config,
        Err(err) => {
            warn!("invalid #funnelConfig, using defaults:", err.to_string());
            FunnelConfig::default()
        }
    }
}
