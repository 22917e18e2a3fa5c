//! Resolution configuration.
//!
//! There is no process-wide configuration: every call site threads an
//! explicit [`ResolverConfig`] (the only global constant is the primary
//! locale, see [`Locale::primary`]). [`ResolverSettings`] is the
//! serde-deserializable counterpart for configuration sourced from files or
//! editor/host settings payloads.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::Locale;
use crate::resolver::strategy::Strategy;

/// Failed to read a settings payload.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The payload was not valid JSON for [`ResolverSettings`].
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The set of locales a configuration accepts.
#[derive(Clone, Default)]
pub enum SupportedLocales {
    /// Accept every well-formed tag.
    #[default]
    All,
    /// An explicit ordered list.
    List(Vec<Locale>),
    /// A caller-supplied predicate.
    Predicate(Arc<dyn Fn(&Locale) -> bool + Send + Sync>),
}

impl SupportedLocales {
    /// Builds an explicit list from tags, deduplicating while preserving
    /// first occurrence. Tags that do not parse are skipped with a warning.
    #[must_use]
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut locales: Vec<Locale> = Vec::new();
        for tag in tags {
            match Locale::parse(tag.as_ref()) {
                Ok(locale) => {
                    if !locales.contains(&locale) {
                        locales.push(locale);
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        locale = error.sanitized_tag(),
                        "Skipping malformed supported-locale tag"
                    );
                }
            }
        }
        Self::List(locales)
    }

    /// Whether the locale is a member of this set.
    #[must_use]
    pub fn allows(&self, locale: &Locale) -> bool {
        match self {
            Self::All => true,
            Self::List(locales) => locales.contains(locale),
            Self::Predicate(predicate) => predicate(locale),
        }
    }
}

impl fmt::Debug for SupportedLocales {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::List(locales) => f.debug_tuple("List").field(locales).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Runtime configuration for a [`LocaleResolver`](crate::resolver::LocaleResolver).
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Strategies tried in order. A [`Strategy::Custom`] entry carries its
    /// callable directly.
    pub strategies: Vec<Strategy>,
    /// The supported-locale check applied to every resolved candidate.
    pub supported: SupportedLocales,
    /// Returned when no strategy yields a supported locale.
    pub fallback: Locale,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            strategies: vec![Strategy::Auto],
            supported: SupportedLocales::All,
            fallback: Locale::primary(),
        }
    }
}

/// Serializable resolver settings, camelCase for host-settings payloads.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverSettings {
    /// Strategy identifiers tried in order (see [`Strategy::from_str`]).
    pub strategies: Vec<String>,

    /// Accepted locale tags. Unset means accept every well-formed tag.
    pub supported_locales: Option<Vec<String>>,

    /// Served when no strategy resolves a supported locale.
    pub fallback_locale: String,

    /// Translation-cache TTL in seconds. Zero or unset disables caching.
    pub cache_ttl_secs: Option<u64>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            strategies: vec!["auto".to_string()],
            supported_locales: None,
            fallback_locale: Locale::primary().as_str().to_string(),
            cache_ttl_secs: None,
        }
    }
}

impl ResolverSettings {
    /// Parses a JSON settings payload.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Converts settings into a runtime configuration.
    ///
    /// Malformed entries degrade instead of failing: unknown strategy
    /// identifiers and unparseable locale tags are skipped with a warning,
    /// and an unparseable fallback falls back to the primary locale. A
    /// misconfigured payload must never take down request handling.
    #[must_use]
    pub fn into_config(self) -> ResolverConfig {
        let strategies = self
            .strategies
            .iter()
            .filter_map(|name| match Strategy::from_str(name) {
                Ok(strategy) => Some(strategy),
                Err(error) => {
                    tracing::warn!(strategy = %error.name, "Skipping unsupported strategy");
                    None
                }
            })
            .collect();

        let supported = self
            .supported_locales
            .map_or(SupportedLocales::All, SupportedLocales::from_tags);

        let fallback = Locale::parse(&self.fallback_locale).unwrap_or_else(|error| {
            tracing::warn!(
                locale = error.sanitized_tag(),
                "Malformed fallback locale, using primary"
            );
            Locale::primary()
        });

        ResolverConfig { strategies, supported, fallback }
    }
}
