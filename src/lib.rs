//! i18n-resolver
//!
//! リクエストごとのロケール解決と翻訳値のフォールバック解決を行うエンジン
//!
//! The four pieces, leaves first: [`validator`] normalizes and checks locale
//! candidates, [`fallback`] walks the fallback chain over a record's
//! [`translations::TranslationMap`], [`resolver`] extracts the request locale
//! through an ordered strategy chain, and [`cache`] memoizes resolution
//! results under a TTL. Storage and transport stay outside: collaborators
//! pass in plain maps and strings and get plain values back.

pub mod cache;
pub mod config;
pub mod error;
pub mod fallback;
pub mod locale;
pub mod resolver;
pub mod translations;
pub mod validator;

#[cfg(test)]
mod test_utils;

pub use cache::{
    CacheKey,
    TranslationCache,
};
pub use config::{
    ResolverConfig,
    ResolverSettings,
    SupportedLocales,
};
pub use fallback::{
    ResolveOptions,
    build_fallback_chain,
    get_translation,
};
pub use locale::Locale;
pub use resolver::{
    LocaleResolver,
    PersistTarget,
    Strategy,
};
pub use translations::TranslationMap;
pub use validator::LocaleValidator;
