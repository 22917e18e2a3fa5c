//! Supported-set validation of locale candidates.

use crate::config::SupportedLocales;
use crate::error::InvalidLocale;
use crate::locale::Locale;

/// Validates raw locale candidates against a supported set.
///
/// Validation is strict membership: no variant matching happens here, so
/// `fr-ca` is rejected when only `fr` is configured (variant handling belongs
/// to the fallback chain). Callers on the request path log rejections with
/// sanitized detail and treat them as "absent", never as request failures.
#[derive(Debug, Clone)]
pub struct LocaleValidator {
    /// The membership check applied after normalization.
    supported: SupportedLocales,
}

impl LocaleValidator {
    /// Creates a validator over a supported set.
    #[must_use]
    pub const fn new(supported: SupportedLocales) -> Self {
        Self { supported }
    }

    /// Convenience constructor over an explicit tag list.
    #[must_use]
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(SupportedLocales::from_tags(tags))
    }

    /// Normalizes a raw candidate and checks supported-set membership.
    pub fn validate(&self, raw: &str) -> Result<Locale, InvalidLocale> {
        let locale = Locale::parse(raw)?;
        if self.supported.allows(&locale) {
            Ok(locale)
        } else {
            Err(InvalidLocale::Unsupported { locale })
        }
    }

    /// Whether an already-normalized locale is in the supported set.
    #[must_use]
    pub fn is_supported(&self, locale: &Locale) -> bool {
        self.supported.allows(locale)
    }
}
