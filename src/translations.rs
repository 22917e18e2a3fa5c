//! Per-record translation data.
//!
//! A [`TranslationMap`] is the raw locale→value data a storage collaborator
//! hands to the resolution engine. Keys may arrive either as raw strings
//! (`"fr-CA"`) or as canonical tags (`"fr-ca"`); both spellings of the same
//! locale are the same logical key, with the canonical spelling preferred on
//! lookup. Insertion order is preserved because the fallback chain walks the
//! remaining keys in declaration order.

use crate::locale::Locale;

/// Whether a stored value counts as present for resolution purposes.
///
/// Missing key, and empty string are all "missing". Whitespace-only strings
/// are deliberately present: "user typed only whitespace" is distinct from
/// "no translation submitted".
#[must_use]
pub fn is_present(value: &str) -> bool {
    !value.is_empty()
}

/// An insertion-ordered mapping from locale key to translated text.
///
/// Cardinality is the number of configured locales (single digits), so the
/// representation is a plain pair list rather than a hash map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMap {
    /// `(key, value)` pairs in insertion order. Keys are stored as given.
    entries: Vec<(String, String)>,
}

impl TranslationMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts or replaces a value. Replacement matches by logical locale
    /// (both spellings of the same tag hit the same entry) and keeps the
    /// existing position; new keys append.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        let canonical = canonical_key(&key);
        match self.entries.iter_mut().find(|(k, _)| canonical_key(k) == canonical) {
            Some(entry) => *entry = (key, value),
            None => self.entries.push((key, value)),
        }
    }

    /// Exact-key lookup, no normalization.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Looks up the value for a locale across both key spellings.
    ///
    /// An entry keyed by the canonical tag wins over an entry whose raw key
    /// merely normalizes to the same locale.
    #[must_use]
    pub fn value_for(&self, locale: &Locale) -> Option<&str> {
        self.get(locale.as_str()).or_else(|| {
            self.entries
                .iter()
                .find(|(k, _)| Locale::parse(k).is_ok_and(|parsed| &parsed == locale))
                .map(|(_, v)| v.as_str())
        })
    }

    /// Whether the locale has a present value (see [`is_present`]).
    #[must_use]
    pub fn has_present(&self, locale: &Locale) -> bool {
        self.value_for(locale).is_some_and(is_present)
    }

    /// Keys in insertion order, as stored.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys parsed to normalized locales, in insertion order. Keys that do
    /// not parse as locale tags are skipped.
    pub fn locales(&self) -> impl Iterator<Item = Locale> + '_ {
        self.entries.iter().filter_map(|(k, _)| Locale::parse(k).ok())
    }

    /// Merges `other` under this map, directionally.
    ///
    /// The result contains every key present in either map. For a key in
    /// both, this map's value wins unless it is an empty string, in which
    /// case `other`'s value is used. This lets a partial update override an
    /// existing set without blanking the locales it omitted. Note the
    /// asymmetry with [`is_present`]: only the *empty* string yields here, so
    /// a whitespace-only value survives a merge.
    #[must_use]
    pub fn merged_over(&self, other: &Self) -> Self {
        let mut result = Self::new();
        for (key, value) in &self.entries {
            if value.is_empty()
                && let Some(replacement) = lookup_logical(other, key)
            {
                result.entries.push((key.clone(), replacement.to_string()));
            } else {
                result.entries.push((key.clone(), value.clone()));
            }
        }
        for (key, value) in &other.entries {
            if lookup_logical(&result, key).is_none() {
                result.entries.push((key.clone(), value.clone()));
            }
        }
        result
    }

    /// Checks completeness against a required locale list.
    ///
    /// Returns every missing locale in `required` order, never stopping at
    /// the first miss, so callers can report all gaps at once. A locale is
    /// missing under the [`is_present`] rule.
    pub fn validate_required(&self, required: &[Locale]) -> Result<(), Vec<Locale>> {
        let missing: Vec<Locale> =
            required.iter().filter(|locale| !self.has_present(locale)).cloned().collect();
        if missing.is_empty() { Ok(()) } else { Err(missing) }
    }
}

/// Logical-key lookup in `map` for a stored key: canonical spelling first,
/// then any key normalizing to the same locale, then the exact raw string for
/// keys that are not locale tags at all.
fn lookup_logical<'a>(map: &'a TranslationMap, key: &str) -> Option<&'a str> {
    match Locale::parse(key) {
        Ok(locale) => map.value_for(&locale),
        Err(_) => map.get(key),
    }
}

/// Canonical comparison form of a stored key: the normalized tag when the key
/// parses as a locale, the raw string otherwise.
fn canonical_key(key: &str) -> String {
    Locale::parse(key).map_or_else(|_| key.to_string(), |locale| locale.as_str().to_string())
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for TranslationMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
