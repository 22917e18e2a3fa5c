//! Error taxonomy for locale resolution.
//!
//! Every variant here is recoverable on the request path: an invalid locale or
//! an unknown strategy degrades to "absent", and a missing translation is only
//! surfaced when the caller explicitly asks for it.

use thiserror::Error;

use crate::locale::Locale;

/// A locale candidate that failed validation.
///
/// Recovered locally by the resolver (the failing strategy yields "absent" and
/// logs a warning); never propagated out of a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidLocale {
    /// The tag did not match the locale shape after sanitization. Carries only
    /// the sanitized text so the message is safe to log verbatim.
    #[error("malformed locale tag '{sanitized}'")]
    Malformed {
        /// Whitelist-sanitized remainder of the raw input.
        sanitized: String,
    },

    /// A well-formed tag that is not in the configured supported set. No
    /// variant matching happens at validation time, so `fr-ca` lands here
    /// when only `fr` is configured.
    #[error("unsupported locale '{locale}'")]
    Unsupported {
        /// The normalized tag that failed the membership check.
        locale: Locale,
    },
}

impl InvalidLocale {
    /// Sanitized text of the offending tag, safe for structured log fields.
    #[must_use]
    pub fn sanitized_tag(&self) -> &str {
        match self {
            Self::Malformed { sanitized } => sanitized,
            Self::Unsupported { locale } => locale.as_str(),
        }
    }
}

/// No candidate in the fallback chain held a present value and the caller set
/// `raise_on_missing`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no translation for '{requested}' (tried: {})", format_chain(.attempted))]
pub struct MissingTranslation {
    /// The requested locale as sanitized text (the raw request input may
    /// contain characters that must not reach logs).
    pub requested: String,
    /// Every locale tried, in chain order.
    pub attempted: Vec<Locale>,
}

/// An unrecognized strategy identifier in configuration input.
///
/// Surfaces only when parsing configuration; during resolution a misconfigured
/// strategy list degrades to "no locale found" rather than failing a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported resolution strategy '{name}'")]
pub struct UnsupportedStrategy {
    /// The identifier that matched no known strategy.
    pub name: String,
}

/// Joins a fallback chain for error display.
fn format_chain(chain: &[Locale]) -> String {
    chain.iter().map(Locale::as_str).collect::<Vec<_>>().join(", ")
}
