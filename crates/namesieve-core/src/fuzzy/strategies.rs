//! Similarity scorers
//!
//! Every scorer maps two strings to an integer in `0..=100`; 100 means the
//! strings are identical after the scorer's own preprocessing. An empty side
//! always scores 0.
//!
//! Platform-specific implementations:
//! - `simd`: substring fast path via memchr in the partial scorer
//! - otherwise: pure Rust

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Selectable similarity strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Scorer {
    /// Best of the other strategies, weighted by how different the lengths are
    #[default]
    Weighted,
    /// Edit-distance ratio over the whole strings
    Simple,
    /// Best-aligned window of the longer string
    Partial,
    /// Tokens sorted before comparison
    TokenSort,
    /// Shared tokens compared against each side's remainder
    TokenSet,
}

impl Scorer {
    pub const ALL: [Scorer; 5] = [
        Scorer::Weighted,
        Scorer::Simple,
        Scorer::Partial,
        Scorer::TokenSort,
        Scorer::TokenSet,
    ];

    /// Request-level name of this scorer.
    pub fn name(&self) -> &'static str {
        match self {
            Scorer::Weighted => "default",
            Scorer::Simple => "simple",
            Scorer::Partial => "partial",
            Scorer::TokenSort => "sort",
            Scorer::TokenSet => "set",
        }
    }

    /// Score `query` against `candidate`.
    #[inline]
    pub fn score(&self, query: &str, candidate: &str) -> u8 {
        match self {
            Scorer::Weighted => weighted_ratio(query, candidate),
            Scorer::Simple => ratio(query, candidate),
            Scorer::Partial => partial_ratio(query, candidate),
            Scorer::TokenSort => token_sort_ratio(query, candidate),
            Scorer::TokenSet => token_set_ratio(query, candidate),
        }
    }
}

impl fmt::Display for Scorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scorer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" | "weighted" => Ok(Scorer::Weighted),
            "simple" | "ratio" => Ok(Scorer::Simple),
            "partial" => Ok(Scorer::Partial),
            "sort" | "token_sort" => Ok(Scorer::TokenSort),
            "set" | "token_set" => Ok(Scorer::TokenSet),
            other => Err(Error::Config(format!(
                "unknown scorer '{}', expected one of: default, simple, partial, sort, set",
                other
            ))),
        }
    }
}

impl TryFrom<String> for Scorer {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Scorer> for String {
    fn from(scorer: Scorer) -> Self {
        scorer.name().to_string()
    }
}

fn to_score(similarity: f64) -> u8 {
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Length of the longest common subsequence of `a` and `b`.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let (a, b) = if a.len() < b.len() { (b, a) } else { (a, b) };
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diag = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diag + 1
            } else {
                above.max(row[j])
            };
            diag = above;
        }
    }
    row[b.len()]
}

/// Indel similarity: `2 * lcs / (len_a + len_b)`.
fn char_similarity(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    (2 * lcs_len(a, b)) as f64 / (a.len() + b.len()) as f64
}

fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    char_similarity(&a, &b)
}

/// Insertion/deletion similarity as a percentage.
///
/// Substitutions count as one deletion plus one insertion, so strings of
/// different lengths are not penalized beyond their extra characters.
pub fn ratio(a: &str, b: &str) -> u8 {
    to_score(similarity(a, b))
}

/// Best [`ratio`] of the shorter string against every equally long window of
/// the longer one.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    if shorter.is_empty() {
        return 0;
    }
    if contains(longer, shorter) {
        return 100;
    }

    let short_chars: Vec<char> = shorter.chars().collect();
    let long_chars: Vec<char> = longer.chars().collect();
    let mut best = 0.0f64;
    for window in long_chars.windows(short_chars.len()) {
        let s = char_similarity(&short_chars, window);
        if s > best {
            best = s;
        }
        if best >= 0.995 {
            return 100;
        }
    }
    to_score(best)
}

#[cfg(feature = "simd")]
#[inline]
fn contains(haystack: &str, needle: &str) -> bool {
    memchr::memmem::find(haystack.as_bytes(), needle.as_bytes()).is_some()
}

#[cfg(not(feature = "simd"))]
#[inline]
fn contains(haystack: &str, needle: &str) -> bool {
    haystack.contains(needle)
}

/// Lower-case, turn every non-alphanumeric character into a space, trim.
fn preprocess(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned.trim().to_string()
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_sort(a: &str, b: &str, partial: bool) -> u8 {
    let a = sorted_tokens(&preprocess(a));
    let b = sorted_tokens(&preprocess(b));
    if partial {
        partial_ratio(&a, &b)
    } else {
        ratio(&a, &b)
    }
}

fn token_set(a: &str, b: &str, partial: bool) -> u8 {
    let a = preprocess(a);
    let b = preprocess(b);
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let intersection = tokens_a.intersection(&tokens_b).copied().collect::<Vec<_>>().join(" ");
    let only_a = tokens_a.difference(&tokens_b).copied().collect::<Vec<_>>().join(" ");
    let only_b = tokens_b.difference(&tokens_a).copied().collect::<Vec<_>>().join(" ");

    let combined_a = format!("{} {}", intersection, only_a).trim().to_string();
    let combined_b = format!("{} {}", intersection, only_b).trim().to_string();

    let score = |x: &str, y: &str| {
        if partial {
            partial_ratio(x, y)
        } else {
            ratio(x, y)
        }
    };

    [
        score(&intersection, &combined_a),
        score(&intersection, &combined_b),
        score(&combined_a, &combined_b),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

/// [`ratio`] after sorting the whitespace tokens of both sides.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    token_sort(a, b, false)
}

/// Compares the shared tokens with each side's shared-plus-remaining tokens
/// and keeps the best of the three pairings.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    token_set(a, b, false)
}

const UNBASE_SCALE: f64 = 0.95;

/// Weighted combination of the other scorers.
///
/// Similar lengths (ratio below 1.5) use the whole-string and token scores.
/// Otherwise partial variants are used, scaled by 0.9, or by 0.6 when one side
/// is more than eight times longer.
pub fn weighted_ratio(a: &str, b: &str) -> u8 {
    let a = preprocess(a);
    let b = preprocess(b);
    let (len_a, len_b) = (a.chars().count(), b.chars().count());
    if len_a == 0 || len_b == 0 {
        return 0;
    }

    let base = f64::from(ratio(&a, &b));
    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;

    let best = if len_ratio < 1.5 {
        let sort = f64::from(token_sort(&a, &b, false)) * UNBASE_SCALE;
        let set = f64::from(token_set(&a, &b, false)) * UNBASE_SCALE;
        base.max(sort).max(set)
    } else {
        let partial_scale = if len_ratio > 8.0 { 0.6 } else { 0.9 };
        let partial = f64::from(partial_ratio(&a, &b)) * partial_scale;
        let sort = f64::from(token_sort(&a, &b, true)) * UNBASE_SCALE * partial_scale;
        let set = f64::from(token_set(&a, &b, true)) * UNBASE_SCALE * partial_scale;
        base.max(partial).max(sort).max(set)
    };

    best.round().clamp(0.0, 100.0) as u8
}
