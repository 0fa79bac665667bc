//! Receipt fingerprinting and verification plumbing.
//!
//! The fingerprint is a non-cryptographic dedup key: SHA-256 over a prefix
//! of the image bytes plus the filename and size. It is checked against the
//! persisted used set *before* any network call, and persisted only after a
//! verified=true verdict.

use crate::store::ProfileStore;
use sa_types::{BankAccount, FlowError, VerificationVerdict};
use sha2::{Digest, Sha256};

/// How much of the image participates in the fingerprint.
pub const FINGERPRINT_PREFIX_LEN: usize = 4096;

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Dedup key for an uploaded proof image.
pub fn fingerprint(bytes: &[u8], filename: &str, size: u64) -> String {
    let prefix = &bytes[..bytes.len().min(FINGERPRINT_PREFIX_LEN)];
    let mut hasher = Sha256::new();
    hasher.update(prefix);
    hasher.update(filename.as_bytes());
    hasher.update(size.to_le_bytes());
    to_hex(&hasher.finalize())
}

/// Reject a fingerprint already spent on a successful verification.
pub fn check_unused(store: &dyn ProfileStore, fingerprint: &str) -> Result<(), FlowError> {
    if store.fingerprint_used(fingerprint) {
        return Err(FlowError::DuplicateReceipt);
    }
    Ok(())
}

/// The textual rubric sent alongside the image. `now_label` and
/// `today_label` are injected so the function stays clock-free.
pub fn rubric(bank: &BankAccount, amount_naira: u64, now_label: &str, today_label: &str) -> String {
    format!(
        "You are verifying a Nigerian bank transfer receipt image.\n\
         Mark it verified only if ALL of the following hold:\n\
         1. The receipt shows a successful transfer (wording such as \
         \"successful\" or \"completed\").\n\
         2. The amount is approximately NGN {amount_naira}.\n\
         3. The recipient bank is \"{}\" and the account number is {} \
         (account name: {}).\n\
         4. The transaction timestamp is within the last 30 minutes of \
         {now_label} and on the same calendar day ({today_label}).\n\
         Respond with strict JSON only, no prose and no markdown fences: \
         {{\"verified\": true or false, \"reason\": \"<short reason>\"}}",
        bank.bank_name, bank.account_number, bank.account_name,
    )
}

/// Parse the service reply. Models occasionally wrap the JSON in markdown
/// fences despite instructions; anything else malformed is a failure.
pub fn parse_verdict(raw: &str) -> Result<VerificationVerdict, FlowError> {
    let trimmed = raw.trim();
    let stripped = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map(|s| s.strip_suffix("```").unwrap_or(s))
        .unwrap_or(trimmed)
        .trim();

    serde_json::from_str(stripped).map_err(|_| {
        FlowError::VerificationRejected("the verification service returned an unreadable verdict".into())
    })
}

/// Apply the verdict: a false verdict fails with the provider-supplied
/// reason; resubmission with a new image is allowed.
pub fn judge(verdict: &VerificationVerdict) -> Result<(), FlowError> {
    if verdict.verified {
        return Ok(());
    }
    let reason = if verdict.reason.trim().is_empty() {
        "receipt could not be verified".to_string()
    } else {
        verdict.reason.clone()
    };
    Err(FlowError::VerificationRejected(reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn fingerprint_is_stable_and_input_sensitive() {
        let bytes = vec![7u8; 10_000];
        let a = fingerprint(&bytes, "receipt.png", 10_000);
        assert_eq!(a, fingerprint(&bytes, "receipt.png", 10_000));

        assert_ne!(a, fingerprint(&bytes, "receipt2.png", 10_000));
        assert_ne!(a, fingerprint(&bytes, "receipt.png", 10_001));

        let mut altered = bytes.clone();
        altered[100] ^= 0xff;
        assert_ne!(a, fingerprint(&altered, "receipt.png", 10_000));

        // Changes beyond the prefix do not affect the key.
        let mut tail_only = bytes.clone();
        tail_only[FINGERPRINT_PREFIX_LEN + 10] ^= 0xff;
        assert_eq!(a, fingerprint(&tail_only, "receipt.png", 10_000));
    }

    #[test]
    fn short_images_fingerprint_without_panicking() {
        let tiny = [1u8, 2, 3];
        assert_eq!(fingerprint(&tiny, "t.png", 3).len(), 64);
    }

    #[test]
    fn used_fingerprint_is_rejected_before_any_network_call() {
        let store = MemoryStore::default();
        let fp = fingerprint(&[9u8; 64], "proof.jpg", 64);

        assert!(check_unused(&store, &fp).is_ok());
        store.mark_fingerprint_used(&fp);
        assert_eq!(check_unused(&store, &fp), Err(FlowError::DuplicateReceipt));
    }

    #[test]
    fn verdict_parses_bare_and_fenced_json() {
        let bare = parse_verdict(r#"{"verified": true, "reason": "ok"}"#).unwrap();
        assert!(bare.verified);

        let fenced =
            parse_verdict("```json\n{\"verified\": false, \"reason\": \"amount mismatch\"}\n```")
                .unwrap();
        assert!(!fenced.verified);
        assert_eq!(fenced.reason, "amount mismatch");
    }

    #[test]
    fn malformed_verdict_is_a_verification_failure() {
        assert!(matches!(
            parse_verdict("I think this looks fine"),
            Err(FlowError::VerificationRejected(_))
        ));
        assert!(matches!(
            parse_verdict(""),
            Err(FlowError::VerificationRejected(_))
        ));
    }

    #[test]
    fn false_verdict_surfaces_the_provider_reason() {
        let verdict = VerificationVerdict {
            verified: false,
            reason: "timestamp is older than 30 minutes".into(),
        };
        assert_eq!(
            judge(&verdict),
            Err(FlowError::VerificationRejected(
                "timestamp is older than 30 minutes".into()
            ))
        );

        let unreasoned = VerificationVerdict {
            verified: false,
            reason: "".into(),
        };
        assert!(matches!(judge(&unreasoned), Err(FlowError::VerificationRejected(r)) if !r.is_empty()));
    }

    #[test]
    fn rubric_names_the_bank_amount_and_window() {
        let bank = BankAccount {
            bank_name: "Moniepoint MFB".into(),
            account_number: "7010661707".into(),
            account_name: "Chimezie David Igwe".into(),
        };
        let text = rubric(&bank, 12_000, "14:05", "2026-08-06");
        assert!(text.contains("NGN 12000"));
        assert!(text.contains("Moniepoint MFB"));
        assert!(text.contains("7010661707"));
        assert!(text.contains("30 minutes"));
        assert!(text.contains("2026-08-06"));
        assert!(text.contains("strict JSON"));
    }
}
