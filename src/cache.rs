//! 翻訳解決結果の TTL キャッシュ
//!
//! 読み取りの多いワークロードでフォールバック解決の繰り返しを避けるための
//! 共有キャッシュです。このクレートで唯一の共有可変状態であり、
//! `Arc<RwLock<HashMap>>` で複数のリクエストスレッドから安全に使えます。
//! ミス時の再計算が同一キーで重複することは許容します（single-flight 保証は
//! 持ちません）。

use std::collections::HashMap;
use std::sync::{
    Arc,
    RwLock,
};
use std::time::{
    Duration,
    Instant,
};

use crate::locale::Locale;

/// Identity of one cached resolution: subject (record), field, locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Stable identity of the owning record.
    pub subject: String,
    /// Name of the translatable field.
    pub field: String,
    /// The locale the value was resolved for.
    pub locale: Locale,
}

impl CacheKey {
    /// Builds a key from its parts.
    #[must_use]
    pub fn new(subject: impl Into<String>, field: impl Into<String>, locale: Locale) -> Self {
        Self { subject: subject.into(), field: field.into(), locale }
    }
}

/// One stored resolution result.
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The resolved value (`None` is a valid, cacheable outcome).
    value: Option<String>,
    /// Entries never outlive this instant, regardless of read volume.
    expires_at: Instant,
}

/// TTL-bounded memoization of fallback resolution.
///
/// Cloning shares the underlying store, so request handlers can each hold a
/// handle. There is no write-through: collaborators that change a record's
/// translation data must call [`invalidate`](Self::invalidate) before the
/// next read.
#[derive(Clone, Default)]
pub struct TranslationCache {
    /// 共有エントリストア
    entries: Arc<RwLock<HashMap<CacheKey, CacheEntry>>>,
}

impl TranslationCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, computing and storing it on miss
    /// or expiry.
    ///
    /// A zero `ttl` disables caching for this call: the value is recomputed
    /// and nothing is stored. Races between concurrent computes for the same
    /// key are benign, last store wins.
    pub fn get_or_compute<F>(&self, key: &CacheKey, ttl: Duration, compute: F) -> Option<String>
    where
        F: FnOnce() -> Option<String>,
    {
        if ttl.is_zero() {
            return compute();
        }

        let now = Instant::now();
        if let Ok(entries) = self.entries.read()
            && let Some(entry) = entries.get(key)
            && entry.expires_at > now
        {
            return entry.value.clone();
        }

        // computed outside the lock; a concurrent compute for the same key
        // is acceptable
        let value = compute();
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|_, entry| entry.expires_at > now);
            entries.insert(
                key.clone(),
                CacheEntry { value: value.clone(), expires_at: now + ttl },
            );
        }
        value
    }

    /// Removes every entry belonging to a subject, across all fields and
    /// locales. Called by collaborators after any write to the subject's
    /// translation data.
    pub fn invalidate(&self, subject: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|key, _| key.subject != subject);
        }
    }

    /// Removes every entry for one field of a subject.
    pub fn invalidate_field(&self, subject: &str, field: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|key, _| key.subject != subject || key.field != field);
        }
    }

    /// Drops every entry (bulk-import flushes).
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    /// Number of stored entries, expired ones included until the next sweep.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for TranslationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationCache").field("entries", &self.len()).finish()
    }
}
