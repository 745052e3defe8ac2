//! URL-safe slugs.
//!
//! The backend names categories and options in Spanish ("Francesa Clásica",
//! "Uñas Acrílicas"). Keys and slugs must be stable, lowercase ASCII so they
//! can travel in the query string without surprises.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Turn a display name into a slug.
///
/// Lowercases, decomposes to NFD and drops combining marks (`á` → `a`,
/// `ñ` → `n`), then collapses every run of other characters into a single
/// `-`. Leading and trailing separators are trimmed. Letters with no ASCII
/// decomposition (`ł`, `ø`) are dropped.
///
/// # Example
///
/// ```
/// use nsc_model::slugify;
///
/// assert_eq!(slugify("Francesa Clásica"), "francesa-clasica");
/// assert_eq!(slugify("  Uñas / Gel "), "unas-gel");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    let folded = name
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase);
    for ch in folded {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        } else {
            pending_separator = true;
        }
    }

    slug
}
