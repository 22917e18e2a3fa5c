//! Fallback-chain construction and translation resolution.
//!
//! Given a record's raw translation data and a requested locale, walks an
//! ordered fallback chain and returns the first present value. Resolution is
//! total over request input: a requested locale that fails to normalize just
//! drops out of the chain, the rest of which still ends at the primary locale
//! and the map's own keys.

use crate::error::MissingTranslation;
use crate::locale::{
    Locale,
    sanitize,
};
use crate::translations::{
    TranslationMap,
    is_present,
};

/// Per-call resolution settings.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Tried after the requested locale (and its base variant) and before the
    /// primary locale.
    pub fallback: Option<Locale>,
    /// Returned verbatim when no chain candidate is present.
    pub default: Option<String>,
    /// When set and no candidate nor default applies, resolution fails with
    /// [`MissingTranslation`] instead of returning `None`.
    pub raise_on_missing: bool,
}

impl ResolveOptions {
    /// Options with a fallback locale.
    #[must_use]
    pub const fn with_fallback(fallback: Locale) -> Self {
        Self { fallback: Some(fallback), default: None, raise_on_missing: false }
    }
}

/// Resolves the translated value for a requested locale.
///
/// The chain is: normalized requested locale, its base-language variant when
/// regional, the configured fallback, the primary locale, then every
/// remaining map key in insertion order. The first candidate with a present
/// value (see [`is_present`]) wins and its value is returned verbatim.
///
/// Only the final no-candidate pass can fail, and only when
/// `options.raise_on_missing` is set; malformed input never errors.
pub fn get_translation(
    map: &TranslationMap,
    requested: &str,
    options: &ResolveOptions,
) -> Result<Option<String>, MissingTranslation> {
    let requested_locale = Locale::parse(requested).ok();
    let available: Vec<Locale> = map.locales().collect();
    let chain = chain_from(requested_locale.as_ref(), options.fallback.as_ref(), &available);

    for candidate in &chain {
        if let Some(value) = map.value_for(candidate)
            && is_present(value)
        {
            return Ok(Some(value.to_string()));
        }
    }

    if let Some(default) = &options.default {
        return Ok(Some(default.clone()));
    }
    if options.raise_on_missing {
        return Err(MissingTranslation {
            requested: sanitize(requested).to_lowercase(),
            attempted: chain,
        });
    }
    Ok(None)
}

/// Builds the de-duplicated ordered fallback chain for a locale.
///
/// `[locale, base variant when regional, fallback, primary] ++ available`,
/// keeping the first occurrence of each entry. Construction is independent of
/// data presence; an empty `available` still yields at least
/// `[locale, fallback, primary]`.
#[must_use]
pub fn build_fallback_chain(
    locale: &Locale,
    fallback: Option<&Locale>,
    available: &[Locale],
) -> Vec<Locale> {
    chain_from(Some(locale), fallback, available)
}

/// Chain construction shared with [`get_translation`], which may have no
/// usable requested locale.
fn chain_from(
    locale: Option<&Locale>,
    fallback: Option<&Locale>,
    available: &[Locale],
) -> Vec<Locale> {
    let mut chain: Vec<Locale> = Vec::new();
    if let Some(requested) = locale {
        push_unique(&mut chain, requested.clone());
        if requested.has_region() {
            push_unique(&mut chain, requested.base_locale());
        }
    }
    if let Some(fallback) = fallback {
        push_unique(&mut chain, fallback.clone());
    }
    push_unique(&mut chain, Locale::primary());
    for candidate in available {
        push_unique(&mut chain, candidate.clone());
    }
    chain
}

/// Appends unless an earlier entry already equals the locale.
fn push_unique(chain: &mut Vec<Locale>, locale: Locale) {
    if !chain.contains(&locale) {
        chain.push(locale);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::test_utils::{
        locale,
        translation_map,
    };

    #[rstest]
    fn returns_exact_value_when_requested_locale_is_present() {
        let map = translation_map(&[("en", "Product"), ("es", "Producto")]);
        let result = get_translation(&map, "es", &ResolveOptions::default());
        assert_that!(result, ok(some(eq("Producto"))));
    }

    #[rstest]
    fn whitespace_only_value_counts_as_present() {
        let map = translation_map(&[("es", "  "), ("en", "Product")]);
        let result = get_translation(&map, "es", &ResolveOptions::default());
        assert_that!(result, ok(some(eq("  "))));
    }

    #[rstest]
    fn empty_value_falls_through_to_fallback_locale() {
        let map = translation_map(&[("es", ""), ("fr", "Produit")]);
        let options = ResolveOptions::with_fallback(locale("fr"));
        let result = get_translation(&map, "es", &options);
        assert_that!(result, ok(some(eq("Produit"))));
    }

    #[rstest]
    fn regional_request_falls_back_to_base_variant() {
        let map = translation_map(&[("fr", "Produit"), ("en", "Product")]);
        let result = get_translation(&map, "fr-CA", &ResolveOptions::default());
        assert_that!(result, ok(some(eq("Produit"))));
    }

    #[rstest]
    fn unresolvable_request_degrades_to_primary_locale() {
        let map = translation_map(&[("en", "Product"), ("es", "Producto")]);
        for requested in ["zz!!", ""] {
            let result = get_translation(&map, requested, &ResolveOptions::default());
            assert_that!(result, ok(some(eq("Product"))));
        }
    }

    #[rstest]
    fn remaining_map_keys_are_tried_in_insertion_order() {
        let map = translation_map(&[("de", ""), ("it", "Prodotto"), ("pt", "Produto")]);
        let result = get_translation(&map, "es", &ResolveOptions::default());
        assert_that!(result, ok(some(eq("Prodotto"))));
    }

    #[rstest]
    fn raw_spelled_keys_match_the_normalized_request() {
        let map = translation_map(&[("fr-CA", "Pneu")]);
        let result = get_translation(&map, "fr-ca", &ResolveOptions::default());
        assert_that!(result, ok(some(eq("Pneu"))));
    }

    #[rstest]
    fn default_value_is_returned_verbatim_when_nothing_present() {
        let map = translation_map(&[("es", "")]);
        let options = ResolveOptions {
            default: Some("n/a".to_string()),
            ..ResolveOptions::default()
        };
        let result = get_translation(&map, "es", &options);
        assert_that!(result, ok(some(eq("n/a"))));
    }

    #[rstest]
    fn missing_without_raise_returns_none() {
        let result =
            get_translation(&TranslationMap::new(), "es", &ResolveOptions::default());
        assert_that!(result, ok(none()));
    }

    #[rstest]
    fn missing_with_raise_carries_locale_and_attempted_chain() {
        let options = ResolveOptions { raise_on_missing: true, ..ResolveOptions::default() };
        let result = get_translation(&TranslationMap::new(), "es", &options);
        let error = result.unwrap_err();
        assert_that!(error.requested, eq("es"));
        assert_that!(error.attempted, eq(vec![locale("es"), Locale::primary()]));
    }

    #[rstest]
    fn chain_deduplicates_while_preserving_first_occurrence() {
        let chain = build_fallback_chain(
            &locale("es"),
            Some(&locale("en")),
            &[locale("en"), locale("es"), locale("fr")],
        );
        assert_that!(chain, eq(vec![locale("es"), locale("en"), locale("fr")]));
    }

    #[rstest]
    fn chain_places_base_variant_right_after_regional_locale() {
        let chain = build_fallback_chain(
            &locale("fr-CA"),
            Some(&locale("en")),
            &[locale("en"), locale("fr"), locale("fr-ca")],
        );
        assert_that!(
            chain,
            eq(vec![locale("fr-ca"), locale("fr"), locale("en")])
        );
    }

    #[rstest]
    fn chain_with_no_available_locales_still_has_the_static_entries() {
        let chain = build_fallback_chain(&locale("es"), Some(&locale("fr")), &[]);
        assert_that!(chain, eq(vec![locale("es"), locale("fr"), Locale::primary()]));
    }
}
