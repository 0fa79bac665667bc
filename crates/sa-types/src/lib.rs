//! Shared data model for the onboarding funnel: views, profiles, payment
//! configuration, boundary shapes, and the error taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The views the funnel can render. History entries are tagged with the
/// screaming-case form so back navigation can restore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum View {
    Home,
    Signup,
    Dashboard,
    Payment,
    Success,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "HOME",
            View::Signup => "SIGNUP",
            View::Dashboard => "DASHBOARD",
            View::Payment => "PAYMENT",
            View::Success => "SUCCESS",
        }
    }

    /// Parse a history tag. Unknown or missing tags map to `None`; the
    /// controller treats that as "default to HOME".
    pub fn parse(tag: &str) -> Option<View> {
        match tag {
            "HOME" => Some(View::Home),
            "SIGNUP" => Some(View::Signup),
            "DASHBOARD" => Some(View::Dashboard),
            "PAYMENT" => Some(View::Payment),
            "SUCCESS" => Some(View::Success),
            _ => None,
        }
    }
}

/// The single locally persisted user record. The store holds at most one of
/// these at a time; registering again overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(default)]
    pub is_activated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
}

impl BankAccount {
    /// Human-readable label passed to the controller on a manual transfer,
    /// e.g. `Moniepoint MFB (7010661707)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.bank_name, self.account_number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Transfer,
    Opay,
}

/// Which payment methods the selector offers. Mirrors the original
/// TRUE / FALSE / NEUTRAL payment-mode switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMode {
    CardOnly,
    TransferOnly,
    TransferAndOpay,
}

impl PaymentMode {
    pub fn methods(&self) -> &'static [PaymentMethod] {
        match self {
            PaymentMode::CardOnly => &[PaymentMethod::Card],
            PaymentMode::TransferOnly => &[PaymentMethod::Transfer],
            PaymentMode::TransferAndOpay => &[PaymentMethod::Transfer, PaymentMethod::Opay],
        }
    }

    pub fn offers(&self, method: PaymentMethod) -> bool {
        self.methods().contains(&method)
    }
}

/// Accent palette, applied as a class on the document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeColor {
    Blue,
    Green,
}

impl ThemeColor {
    pub fn body_class(&self) -> &'static str {
        match self {
            ThemeColor::Blue => "theme-blue",
            ThemeColor::Green => "theme-green",
        }
    }
}

/// What happens when the transfer countdown reaches zero. Observed behavior
/// varied between revisions, so it is configuration rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpiryPolicy {
    /// Surface the expiry error and stay on the payment view.
    Warn,
    /// Navigate the user back to the signup step.
    ReturnToSignup,
}

/// Messaging handoff target for the success screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectConfig {
    pub use_whats_app: bool,
    pub whats_app_number: String,
    pub telegram_url: String,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        RedirectConfig {
            use_whats_app: true,
            whats_app_number: "2349012345678".into(),
            telegram_url: "https://t.me/streamafrica_official".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpayConfig {
    pub public_key: String,
    pub merchant_id: String,
    pub api_url: String,
}

impl Default for OpayConfig {
    fn default() -> Self {
        OpayConfig {
            public_key: "OPAYPUB17691774750010.6524153887502064".into(),
            merchant_id: "281826012352775".into(),
            api_url: "https://sandboxapi.opaycheckout.com/api/v1/international/cashier/create"
                .into(),
        }
    }
}

/// Startup configuration injected into the navigation controller and the
/// payment selector. Replaces the original's module-level mutable globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FunnelConfig {
    pub theme: ThemeColor,
    pub payment_mode: PaymentMode,
    pub dashboard_before_payment: bool,
    pub banks: Vec<BankAccount>,
    pub transfer_window_minutes: u32,
    pub expiry_policy: ExpiryPolicy,
    pub redirect: RedirectConfig,
    pub amount_naira: u64,
    pub paystack_public_key: String,
    pub opay: OpayConfig,
    /// `None` disables receipt verification; the transfer gate is bypassed.
    pub vision_api_key: Option<String>,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        FunnelConfig {
            theme: ThemeColor::Blue,
            payment_mode: PaymentMode::TransferAndOpay,
            dashboard_before_payment: true,
            banks: vec![
                BankAccount {
                    bank_name: "Moniepoint MFB".into(),
                    account_number: "7010661707".into(),
                    account_name: "Chimezie David Igwe".into(),
                },
                BankAccount {
                    bank_name: "Moniepoint MFB".into(),
                    account_number: "7010661707".into(),
                    account_name: "Chimezie David Igwe (Backup)".into(),
                },
            ],
            transfer_window_minutes: 30,
            expiry_policy: ExpiryPolicy::Warn,
            redirect: RedirectConfig::default(),
            amount_naira: 12_000,
            paystack_public_key: "pk_live_21ad8f84a4b6a5d34c6d57dd516aafcc95f90e8c".into(),
            opay: OpayConfig::default(),
            vision_api_key: None,
        }
    }
}

impl FunnelConfig {
    /// Amount in minor currency units (kobo), as the card widget expects.
    pub fn amount_kobo(&self) -> u64 {
        self.amount_naira * 100
    }

    pub fn verifier_configured(&self) -> bool {
        self.vision_api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Everything that can go wrong in the funnel. Display strings are the
/// user-facing notice text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("Please fill in all fields to continue.")]
    FormIncomplete,
    #[error("No account found on this device. Please sign up first.")]
    AccountNotFound,
    #[error("Login failed. Check your username/email and password.")]
    LoginFailed,
    #[error("Payment widget not loaded. Please refresh the page.")]
    WidgetUnavailable,
    #[error("Payment gateway error: {0}")]
    Gateway(String),
    #[error("This receipt has already been used.")]
    DuplicateReceipt,
    #[error("Receipt verification failed: {0}")]
    VerificationRejected(String),
    #[error("Transfer session expired.")]
    SessionExpired,
}

// ── Boundary shapes ──

/// OPay cashier-session creation request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpayCheckoutRequest {
    pub country: String,
    pub reference: String,
    pub amount: OpayAmount,
    pub return_url: String,
    pub callback_url: String,
    pub cancel_url: String,
    pub user_info: OpayUserInfo,
    pub product: OpayProduct,
    pub pay_method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpayAmount {
    pub total: u64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpayUserInfo {
    pub user_email: String,
    pub user_mobile: String,
    pub user_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpayProduct {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpayCheckoutResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<OpayCashierData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpayCashierData {
    pub cashier_url: String,
}

/// Strict verdict returned by the vision verification service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationVerdict {
    pub verified: bool,
    #[serde(default)]
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_tags_round_trip() {
        for view in [
            View::Home,
            View::Signup,
            View::Dashboard,
            View::Payment,
            View::Success,
        ] {
            assert_eq!(View::parse(view.as_str()), Some(view));
        }
        assert_eq!(View::parse("CHECKOUT"), None);
        assert_eq!(View::parse(""), None);
    }

    #[test]
    fn payment_mode_subsets() {
        assert_eq!(PaymentMode::CardOnly.methods(), &[PaymentMethod::Card]);
        assert_eq!(
            PaymentMode::TransferOnly.methods(),
            &[PaymentMethod::Transfer]
        );
        assert!(PaymentMode::TransferAndOpay.offers(PaymentMethod::Opay));
        assert!(!PaymentMode::TransferAndOpay.offers(PaymentMethod::Card));
    }

    #[test]
    fn bank_label_format() {
        let bank = BankAccount {
            bank_name: "Moniepoint MFB".into(),
            account_number: "7010661707".into(),
            account_name: "Chimezie David Igwe".into(),
        };
        assert_eq!(bank.label(), "Moniepoint MFB (7010661707)");
    }

    #[test]
    fn opay_response_parses_success_and_error_bodies() {
        let ok: OpayCheckoutResponse = serde_json::from_str(
            r#"{"code":"00000","data":{"cashierUrl":"https://cashier.example/pay"}}"#,
        )
        .unwrap();
        assert_eq!(ok.code, "00000");
        assert_eq!(ok.data.unwrap().cashier_url, "https://cashier.example/pay");

        let err: OpayCheckoutResponse =
            serde_json::from_str(r#"{"code":"50003","message":"merchant not available"}"#).unwrap();
        assert!(err.data.is_none());
        assert_eq!(err.message.as_deref(), Some("merchant not available"));
    }

    #[test]
    fn config_defaults_match_product_constants() {
        let cfg = FunnelConfig::default();
        assert_eq!(cfg.amount_kobo(), 1_200_000);
        assert!(!cfg.verifier_configured());
        assert_eq!(cfg.banks.len(), 2);
        assert!(cfg.dashboard_before_payment);
    }

    #[test]
    fn config_parses_from_embedded_json() {
        let cfg: FunnelConfig = serde_json::from_str(
            r#"{
                "paymentMode": "transferOnly",
                "dashboardBeforePayment": false,
                "transferWindowMinutes": 10,
                "expiryPolicy": "returnToSignup",
                "visionApiKey": "k-123"
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.payment_mode, PaymentMode::TransferOnly);
        assert!(!cfg.dashboard_before_payment);
        assert_eq!(cfg.transfer_window_minutes, 10);
        assert_eq!(cfg.expiry_policy, ExpiryPolicy::ReturnToSignup);
        assert!(cfg.verifier_configured());
        // Unspecified fields keep product defaults.
        assert_eq!(cfg.amount_naira, 12_000);
    }
}
