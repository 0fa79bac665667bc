//! Payment session state.
//!
//! Scoped to the payment selector: which method tab is active, which bank
//! row is selected, the transfer countdown, and the receipt-proof gate.
//! The session is pure; the shell drives `tick()` from a 1 Hz interval and
//! tears the interval down on unmount.

use crate::controller::PaymentOutcome;
use sa_types::{BankAccount, FlowError, FunnelConfig, PaymentMethod};

/// Result of one countdown tick. `Expired` fires exactly once, when the
/// counter first reaches zero; later ticks are `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    Tick(u32),
    Expired,
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ProofState {
    None,
    Verified { fingerprint: String },
}

pub struct PaymentSession {
    offered: Vec<PaymentMethod>,
    method: PaymentMethod,
    selected_bank: Option<usize>,
    countdown: Option<u32>,
    window_seconds: u32,
    verifier_required: bool,
    proof: ProofState,
}

impl PaymentSession {
    /// Build a session from configuration. The first offered method is the
    /// initially active tab; entering TRANSFER starts the countdown.
    pub fn new(config: &FunnelConfig) -> Self {
        let offered = config.payment_mode.methods().to_vec();
        let method = offered[0];
        let mut session = PaymentSession {
            offered,
            method,
            selected_bank: None,
            countdown: None,
            window_seconds: config.transfer_window_minutes * 60,
            verifier_required: config.verifier_configured(),
            proof: ProofState::None,
        };
        if method == PaymentMethod::Transfer {
            session.countdown = Some(session.window_seconds);
        }
        session
    }

    pub fn offered(&self) -> &[PaymentMethod] {
        &self.offered
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn selected_bank(&self) -> Option<usize> {
        self.selected_bank
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        self.countdown
    }

    pub fn expired(&self) -> bool {
        self.countdown == Some(0)
    }

    /// Switch tabs. Methods outside the configured subset are refused.
    /// The transfer window opens the first time the TRANSFER tab is
    /// entered and keeps running across tab switches.
    pub fn select_method(&mut self, method: PaymentMethod) -> bool {
        if !self.offered.contains(&method) {
            return false;
        }
        self.method = method;
        if method == PaymentMethod::Transfer && self.countdown.is_none() {
            self.countdown = Some(self.window_seconds);
        }
        true
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> CountdownEvent {
        let Some(remaining) = self.countdown else {
            return CountdownEvent::Idle;
        };
        if remaining == 0 {
            return CountdownEvent::Idle;
        }
        let next = remaining - 1;
        self.countdown = Some(next);
        if next == 0 {
            CountdownEvent::Expired
        } else {
            CountdownEvent::Tick(next)
        }
    }

    pub fn select_bank(&mut self, index: usize, banks: &[BankAccount]) -> bool {
        if index >= banks.len() {
            return false;
        }
        self.selected_bank = Some(index);
        true
    }

    /// Copying an account number also selects that row. Returns the number
    /// to put on the clipboard.
    pub fn copy_account(&mut self, index: usize, banks: &[BankAccount]) -> Option<String> {
        if !self.select_bank(index, banks) {
            return None;
        }
        Some(banks[index].account_number.clone())
    }

    pub fn proof_verified(&self) -> bool {
        matches!(self.proof, ProofState::Verified { .. })
    }

    /// Record a verified=true verdict for the uploaded image.
    pub fn set_proof_verified(&mut self, fingerprint: String) {
        self.proof = ProofState::Verified { fingerprint };
    }

    /// A new upload invalidates any earlier verdict.
    pub fn clear_proof(&mut self) {
        self.proof = ProofState::None;
    }

    /// Whether "I have made the transfer" is actionable: a bank must be
    /// selected, and a verified receipt must be on file when a
    /// verification backend is configured. Expiry does not disable the
    /// action; the expiry policy decides what happens instead.
    pub fn transfer_confirm_enabled(&self) -> bool {
        self.selected_bank.is_some() && (!self.verifier_required || self.proof_verified())
    }

    /// Complete the manual transfer: the outcome carries an empty reference
    /// and the selected bank's human-readable label.
    pub fn confirm_transfer(&self, banks: &[BankAccount]) -> Result<PaymentOutcome, FlowError> {
        let Some(index) = self.selected_bank else {
            return Err(FlowError::FormIncomplete);
        };
        if self.verifier_required && !self.proof_verified() {
            return Err(FlowError::VerificationRejected(
                "upload and verify your payment receipt first".into(),
            ));
        }
        let bank = banks.get(index).ok_or(FlowError::FormIncomplete)?;
        Ok(PaymentOutcome::Manual {
            bank_label: bank.label(),
        })
    }
}

/// Client-generated payment reference, `STREAM-` plus a random 9-digit
/// number. Randomness is injected so the function stays pure; the shell
/// passes `Math.random()`.
pub fn payment_reference(random: f64) -> String {
    let n = (random.clamp(0.0, 1.0) * 1_000_000_000.0).floor() as u64 + 1;
    format!("STREAM-{n}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sa_types::{FunnelConfig, PaymentMode};

    fn config(mode: PaymentMode, minutes: u32, vision: Option<&str>) -> FunnelConfig {
        FunnelConfig {
            payment_mode: mode,
            transfer_window_minutes: minutes,
            vision_api_key: vision.map(str::to_string),
            ..FunnelConfig::default()
        }
    }

    #[test]
    fn offers_only_the_configured_subset() {
        let cfg = config(PaymentMode::TransferAndOpay, 30, None);
        let mut session = PaymentSession::new(&cfg);
        assert_eq!(
            session.offered(),
            &[PaymentMethod::Transfer, PaymentMethod::Opay]
        );
        assert!(!session.select_method(PaymentMethod::Card));
        assert!(session.select_method(PaymentMethod::Opay));
        assert_eq!(session.method(), PaymentMethod::Opay);
    }

    #[test]
    fn countdown_starts_on_transfer_entry_and_expires_exactly_once() {
        let cfg = config(PaymentMode::TransferOnly, 1, None);
        let mut session = PaymentSession::new(&cfg);
        assert_eq!(session.remaining_seconds(), Some(60));

        for expected in (1..60).rev() {
            assert_eq!(session.tick(), CountdownEvent::Tick(expected));
        }
        assert_eq!(session.tick(), CountdownEvent::Expired);
        assert!(session.expired());
        assert_eq!(session.tick(), CountdownEvent::Idle);
        assert_eq!(session.tick(), CountdownEvent::Idle);
    }

    #[test]
    fn countdown_does_not_run_before_entering_transfer() {
        let cfg = config(PaymentMode::CardOnly, 30, None);
        let mut session = PaymentSession::new(&cfg);
        assert_eq!(session.remaining_seconds(), None);
        assert_eq!(session.tick(), CountdownEvent::Idle);
    }

    #[test]
    fn confirm_enabled_immediately_without_a_verifier() {
        let cfg = config(PaymentMode::TransferOnly, 30, None);
        let mut session = PaymentSession::new(&cfg);
        assert!(!session.transfer_confirm_enabled());

        assert!(session.select_bank(0, &cfg.banks));
        assert!(session.transfer_confirm_enabled());

        let outcome = session.confirm_transfer(&cfg.banks).unwrap();
        assert_eq!(
            outcome,
            PaymentOutcome::Manual {
                bank_label: "Moniepoint MFB (7010661707)".into()
            }
        );
    }

    #[test]
    fn confirm_gated_on_verified_proof_when_verifier_configured() {
        let cfg = config(PaymentMode::TransferOnly, 30, Some("k-123"));
        let mut session = PaymentSession::new(&cfg);
        session.select_bank(0, &cfg.banks);

        assert!(!session.transfer_confirm_enabled());
        assert!(matches!(
            session.confirm_transfer(&cfg.banks),
            Err(FlowError::VerificationRejected(_))
        ));

        session.set_proof_verified("fp-1".into());
        assert!(session.transfer_confirm_enabled());
        assert!(session.confirm_transfer(&cfg.banks).is_ok());

        // Replacing the image drops the verdict.
        session.clear_proof();
        assert!(!session.transfer_confirm_enabled());
    }

    #[test]
    fn copy_account_auto_selects_the_row() {
        let cfg = config(PaymentMode::TransferOnly, 30, None);
        let mut session = PaymentSession::new(&cfg);
        assert_eq!(session.selected_bank(), None);

        let copied = session.copy_account(1, &cfg.banks).unwrap();
        assert_eq!(copied, "7010661707");
        assert_eq!(session.selected_bank(), Some(1));

        assert!(session.copy_account(9, &cfg.banks).is_none());
    }

    #[test]
    fn reference_format_matches_product_convention() {
        let reference = payment_reference(0.5);
        assert_eq!(reference, "STREAM-500000001");
        assert!(payment_reference(0.0).starts_with("STREAM-"));
        assert!(payment_reference(0.999999).starts_with("STREAM-"));
    }
}
