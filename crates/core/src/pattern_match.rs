//! SQL LIKE pattern matching for string attributes.
//!
//! LIKE supports two wildcards:
//! - `%` matches zero or more characters
//! - `_` matches exactly one character
//!
//! Matching is case-sensitive and operates on Unicode scalar values. The
//! same matcher backs the object-level LIKE predicate and the index-level
//! LIKE / NOT LIKE store scans, so both paths agree character for character.

use alloc::vec::Vec;

/// SQL LIKE pattern matching.
///
/// ```
/// use cachet_core::pattern_match::like;
/// assert!(like("widget", "w%t"));
/// assert!(like("widget", "_idget"));
/// assert!(!like("widget", "gadget"));
/// ```
pub fn like(value: &str, pattern: &str) -> bool {
    let v: Vec<char> = value.chars().collect();
    let p: Vec<char> = pattern.chars().collect();
    like_at(&v, &p, 0, 0)
}

fn like_at(v: &[char], p: &[char], vi: usize, pi: usize) -> bool {
    if pi == p.len() {
        return vi == v.len();
    }
    match p[pi] {
        '%' => {
            // Try every possible span for the wildcard, shortest first.
            (vi..=v.len()).any(|skip| like_at(v, p, skip, pi + 1))
        }
        '_' => vi < v.len() && like_at(v, p, vi + 1, pi + 1),
        ch => vi < v.len() && v[vi] == ch && like_at(v, p, vi + 1, pi + 1),
    }
}
