//! `Accept-Language` header parsing.
//!
//! Qualities are held as integer thousandths (`q=0.8` → 800); the RFC gives
//! q-values at most three decimals, so nothing is lost and the hot path stays
//! free of float handling.

/// Quality of a tag with no `q` parameter (`1.0`).
pub(crate) const MAX_QUALITY: u16 = 1000;

/// Parses a weighted language-preference header into `(primary subtag,
/// quality)` pairs, sorted descending by quality with ties keeping their
/// header order.
///
/// Each comma-separated entry is reduced to its primary subtag (`en-US` →
/// `en`); wildcard and empty entries are dropped. Subtags here are still raw
/// text, the caller validates them against its supported set.
pub(crate) fn parse_accept_language(header: &str) -> Vec<(String, u16)> {
    let mut tags: Vec<(String, u16)> = Vec::new();
    for entry in header.split(',') {
        let mut parts = entry.split(';');
        let Some(tag) = parts.next() else { continue };
        let tag = tag.trim();
        if tag.is_empty() || tag == "*" {
            continue;
        }
        let primary = tag.split('-').next().unwrap_or(tag).to_string();
        let quality = parts
            .find_map(|part| part.trim().to_ascii_lowercase().strip_prefix("q=").map(parse_quality))
            .unwrap_or(MAX_QUALITY);
        tags.push((primary, quality));
    }
    // stable sort keeps header order between equal qualities
    tags.sort_by(|a, b| b.1.cmp(&a.1));
    tags
}

/// Parses a q-value into thousandths. A missing `q` never reaches here (that
/// defaults to `1.0`); a value that fails to parse counts as `0.0`.
fn parse_quality(raw: &str) -> u16 {
    let raw = raw.trim();
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw, ""));
    let int: u32 = if int_part.is_empty() {
        0
    } else {
        match int_part.parse() {
            Ok(value) => value,
            Err(_) => return 0,
        }
    };
    if !frac_part.chars().all(|c| c.is_ascii_digit()) {
        return 0;
    }
    if int >= 1 {
        return MAX_QUALITY;
    }
    let thousandths: String =
        frac_part.chars().chain(std::iter::repeat('0')).take(3).collect();
    thousandths.parse().unwrap_or(0)
}
