//! Success-screen summary message and the outbound messaging deep link.

use sa_types::{RedirectConfig, UserProfile};

/// How the completed transaction is described to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentKind {
    Instant,
    Manual,
}

/// An empty reference with a bank label present means a manual transfer;
/// a reference present means an instant payment.
pub fn classify(reference: &str, bank_label: &str) -> PaymentKind {
    if reference.is_empty() && !bank_label.is_empty() {
        PaymentKind::Manual
    } else {
        PaymentKind::Instant
    }
}

/// Multi-line summary handed to the messaging app.
pub fn summary_message(user: &UserProfile, reference: &str, bank_label: &str) -> String {
    let payment_line = match classify(reference, bank_label) {
        PaymentKind::Manual => format!("Payment Method: Manual bank transfer to {bank_label}"),
        PaymentKind::Instant => format!("Payment Method: Instant payment\nPayment Ref: {reference}"),
    };

    format!(
        "Hello Stream Africa,\n\n\
         I have just completed my payment and registration.\n\n\
         *Here are my details:*\n\
         Name: {}\n\
         Username: {}\n\
         Email: {}\n\
         Phone: {}\n\
         {payment_line}\n\n\
         Please verify my account.",
        user.name, user.username, user.email, user.phone,
    )
}

/// Percent-encode for a URL query value, matching `encodeURIComponent`:
/// everything but ASCII alphanumerics and `- _ . ! ~ * ' ( )` is escaped.
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => {
                out.push('%');
                out.push_str(&format!("{byte:02X}"));
            }
        }
    }
    out
}

/// Build the handoff URL: a WhatsApp compose link, or the configured
/// Telegram link with `text` appended on whichever separator the base URL
/// still needs.
pub fn redirect_url(config: &RedirectConfig, message: &str) -> String {
    let encoded = percent_encode(message);
    if config.use_whats_app {
        format!("https://wa.me/{}?text={encoded}", config.whats_app_number)
    } else {
        let separator = if config.telegram_url.contains('?') {
            '&'
        } else {
            '?'
        };
        format!("{}{separator}text={encoded}", config.telegram_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> UserProfile {
        UserProfile {
            name: "Ada".into(),
            username: "ada1".into(),
            email: "ada@x.com".into(),
            phone: "+2348012345678".into(),
            password: "secret".into(),
            is_activated: true,
        }
    }

    #[test]
    fn card_reference_classifies_as_instant() {
        assert_eq!(classify("X", ""), PaymentKind::Instant);
        let msg = summary_message(&ada(), "X", "");
        assert!(msg.contains("Instant payment"));
        assert!(msg.contains("Payment Ref: X"));
        assert!(!msg.contains("Manual bank transfer"));
    }

    #[test]
    fn bank_label_with_empty_reference_classifies_as_manual() {
        assert_eq!(
            classify("", "Moniepoint MFB (7010661707)"),
            PaymentKind::Manual
        );
        let msg = summary_message(&ada(), "", "Moniepoint MFB (7010661707)");
        assert!(msg.contains("Manual bank transfer to Moniepoint MFB (7010661707)"));
        assert!(!msg.contains("Payment Ref:"));
    }

    #[test]
    fn summary_carries_the_profile_fields() {
        let msg = summary_message(&ada(), "STREAM-1", "");
        for line in [
            "Name: Ada",
            "Username: ada1",
            "Email: ada@x.com",
            "Phone: +2348012345678",
        ] {
            assert!(msg.contains(line), "missing {line:?}");
        }
    }

    #[test]
    fn encoding_matches_encode_uri_component() {
        assert_eq!(percent_encode("a b\nc"), "a%20b%0Ac");
        assert_eq!(percent_encode("+234"), "%2B234");
        assert_eq!(percent_encode("*bold* (ok)!"), "*bold*%20(ok)!");
        assert_eq!(percent_encode("x&y=z"), "x%26y%3Dz");
    }

    #[test]
    fn whatsapp_link_uses_the_compose_endpoint() {
        let config = RedirectConfig {
            use_whats_app: true,
            whats_app_number: "2349012345678".into(),
            telegram_url: String::new(),
        };
        let url = redirect_url(&config, "hello there");
        assert_eq!(url, "https://wa.me/2349012345678?text=hello%20there");
    }

    #[test]
    fn telegram_link_picks_the_right_separator() {
        let plain = RedirectConfig {
            use_whats_app: false,
            whats_app_number: String::new(),
            telegram_url: "https://t.me/streamafrica_official".into(),
        };
        assert_eq!(
            redirect_url(&plain, "hi"),
            "https://t.me/streamafrica_official?text=hi"
        );

        let with_query = RedirectConfig {
            telegram_url: "https://t.me/share?url=x".into(),
            ..plain
        };
        assert_eq!(
            redirect_url(&with_query, "hi"),
            "https://t.me/share?url=x&text=hi"
        );
    }
}
