//! Security utilities for GrowthBook API operations.
//!
//! ## Credential Redaction
//!
//! API keys MUST NOT appear in logs or error messages. Use
//! [`redact_api_key`] whenever an authorization value is logged:
//!
//! ```rust
//! use growthbook_client::security::redact_api_key;
//!
//! assert_eq!(redact_api_key("secret_abc123xyz"), "sec***REDACTED***xyz");
//! assert_eq!(redact_api_key("short"), "***REDACTED***");
//! ```
//!
//! ## URL Path Encoding
//!
//! User-provided identifiers interpolated into request paths MUST be encoded:
//!
//! ```rust
//! use growthbook_client::security::encode_path_segment;
//!
//! let path = format!("/features/{}", encode_path_segment("my/feature"));
//! assert_eq!(path, "/features/my%2Ffeature");
//! ```

use std::sync::OnceLock;

/// Marker substituted for secret material in logs.
pub const REDACTED: &str = "***REDACTED***";

/// Maximum length of a response body excerpt carried in error messages.
const MAX_EXCERPT_LENGTH: usize = 500;

/// Redact an API key for logging.
///
/// Keeps the first and last three characters of keys longer than six
/// characters; shorter keys are replaced entirely so no fragment leaks.
#[must_use]
pub fn redact_api_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() <= 6 {
        return REDACTED.to_string();
    }

    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 3..].iter().collect();
    format!("{head}{REDACTED}{tail}")
}

/// Percent-encode a single path segment (resource identifier).
#[must_use]
pub fn encode_path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn bearer_pattern() -> &'static regex_lite::Regex {
    static PATTERN: OnceLock<regex_lite::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        regex_lite::Regex::new(r"(?i)bearer\s+[A-Za-z0-9_\-\.=]+")
            .expect("static bearer pattern is valid")
    })
}

fn secret_key_pattern() -> &'static regex_lite::Regex {
    static PATTERN: OnceLock<regex_lite::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        regex_lite::Regex::new(r"secret_[A-Za-z0-9_]{8,}")
            .expect("static secret key pattern is valid")
    })
}

/// Sanitize a response body excerpt before it is placed in an error.
///
/// - Bearer credentials and GrowthBook secret keys are replaced
/// - Whitespace is trimmed
/// - Messages longer than 500 characters are truncated
#[must_use]
pub fn sanitize_error_message(message: &str) -> String {
    let mut sanitized = bearer_pattern()
        .replace_all(message.trim(), format!("Bearer {REDACTED}").as_str())
        .to_string();
    sanitized = secret_key_pattern()
        .replace_all(&sanitized, REDACTED)
        .to_string();

    if sanitized.len() > MAX_EXCERPT_LENGTH {
        let mut cut = MAX_EXCERPT_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
