//! Deterministic, URL-safe slugs derived from post titles.
//!
//! The transform lowercases the title, collapses every run of characters
//! outside `[a-z0-9]` into a single hyphen and trims hyphens from both ends.
//! Non-ASCII letters are not transliterated, so "Café" becomes `caf`.
//! Distinct titles may collapse to the same slug; callers that index by slug
//! resolve the ambiguity themselves.

/// Derive the slug for a title. Never fails; empty or symbol-only input yields
/// an empty string.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    for ch in lowered.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch);
            pending_hyphen = false;
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Returns true when `candidate` is already in slug form.
pub fn is_slug(candidate: &str) -> bool {
    slugify(candidate) == candidate
}
