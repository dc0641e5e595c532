//! Numeric-aware version ordering.
//!
//! Version names are compared chunk by chunk: runs of digits compare as numbers and
//! everything else compares case-insensitively, so `v1.10.0` sorts after `v1.9.0`.

use std::cmp::Ordering;

/// A run of either digits or non-digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chunk<'a> {
    /// Consecutive ASCII digits.
    Number(&'a str),
    /// Consecutive non-digit characters.
    Text(&'a str),
}

/// Splits `s` into alternating digit and non-digit runs.
fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits = None;
    for (idx, c) in s.char_indices() {
        let digit = c.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != digit => {
                out.push(make_chunk(&s[start..idx], prev));
                start = idx;
            }
            _ => {}
        }
        in_digits = Some(digit);
    }
    if let Some(digit) = in_digits {
        out.push(make_chunk(&s[start..], digit));
    }
    out
}

/// Wraps a run in the matching chunk kind.
fn make_chunk(run: &str, digit: bool) -> Chunk<'_> {
    if digit {
        Chunk::Number(run)
    } else {
        Chunk::Text(run)
    }
}

/// Compares two digit runs by numeric value without parsing.
fn cmp_numbers(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compares two chunks.
fn cmp_chunks(a: Chunk<'_>, b: Chunk<'_>) -> Ordering {
    match (a, b) {
        (Chunk::Number(x), Chunk::Number(y)) => cmp_numbers(x, y),
        (Chunk::Text(x), Chunk::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
        (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
    }
}

/// Compares two strings in natural (numeric-aware) ascending order.
///
/// Strings that compare equal chunk by chunk fall back to plain byte order so the result is
/// a total order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);
    left.iter()
        .zip(&right)
        .map(|(x, y)| cmp_chunks(*x, *y))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| left.len().cmp(&right.len()))
        .then_with(|| a.cmp(b))
}

/// Sorts versions newest first and removes duplicates.
pub fn sort_versions_desc<'a>(versions: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut sorted: Vec<&str> = versions.into_iter().collect();
    sorted.sort_by(|a, b| natural_cmp(b, a));
    sorted.dedup();
    sorted
}
