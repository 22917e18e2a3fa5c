//! Locale tags and their normalization.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};

use crate::error::InvalidLocale;

/// A normalized locale tag.
///
/// Always lowercase, always one or more alphanumeric subtags joined by single
/// hyphens (e.g. `en`, `fr-ca`). A `Locale` can only be built through
/// [`Locale::parse`], so holding one guarantees the tag is well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale(String);

/// Canonical tag of the system-wide last-resort locale.
pub const PRIMARY_TAG: &str = "en";

impl Locale {
    /// The primary locale: the single last-resort default tried when no other
    /// chain entry resolves. This is the only system-wide locale constant;
    /// everything else is explicit configuration.
    #[must_use]
    pub fn primary() -> Self {
        Self(PRIMARY_TAG.to_string())
    }

    /// Parses and normalizes a raw locale tag.
    ///
    /// Strips characters outside the request-safe whitelist
    /// (`[A-Za-z0-9,;=.\-]`), lowercases, and checks the subtag shape. Locale
    /// strings arrive from untrusted request headers and parameters, so the
    /// stripped form is the only form that may reach logs or storage keys.
    pub fn parse(raw: &str) -> Result<Self, InvalidLocale> {
        let tag = sanitize(raw).to_lowercase();
        if has_tag_shape(&tag) {
            Ok(Self(tag))
        } else {
            Err(InvalidLocale::Malformed { sanitized: tag })
        }
    }

    /// The canonical tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary (base language) subtag, e.g. `fr` for `fr-ca`.
    #[must_use]
    pub fn base(&self) -> &str {
        self.0.split('-').next().unwrap_or(self.0.as_str())
    }

    /// Whether the tag carries anything beyond the base language subtag.
    #[must_use]
    pub fn has_region(&self) -> bool {
        self.0.contains('-')
    }

    /// The base-language locale for this tag (`fr-ca` → `fr`).
    #[must_use]
    pub fn base_locale(&self) -> Self {
        Self(self.base().to_string())
    }

    /// Two locales are variants when they share the same base language
    /// subtag (`fr-ca` is a variant of `fr`).
    #[must_use]
    pub fn is_variant_of(&self, other: &Self) -> bool {
        self.base() == other.base()
    }
}

/// Removes every character outside the conservative request-input whitelist:
/// ASCII letters, digits, comma, semicolon, equals sign, period, hyphen.
pub(crate) fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ',' | ';' | '=' | '.' | '-'))
        .collect()
}

/// Checks the locale-tag shape: one or more non-empty alphanumeric subtags
/// separated by single hyphens.
fn has_tag_shape(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .split('-')
            .all(|subtag| !subtag.is_empty() && subtag.chars().all(|c| c.is_ascii_alphanumeric()))
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = InvalidLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
