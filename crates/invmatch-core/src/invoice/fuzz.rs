//! Word-order-insensitive string similarity.
//!
//! Scores are integers in `0..=100`: `100 * 2 * LCS / (len_a + len_b)` over
//! Unicode scalar values, rounded half to even.

use super::rules::NON_WORD;

/// Normalize for comparison: drop Latin-1 supplement characters, turn every
/// non-word character into a space, lowercase, trim.
pub fn full_process(s: &str) -> String {
    let ascii_dammit: String = s
        .chars()
        .filter(|c| !('\u{80}'..='\u{ff}').contains(c))
        .collect();
    NON_WORD
        .replace_all(&ascii_dammit, " ")
        .to_lowercase()
        .trim()
        .to_string()
}

/// Normalized string with its words sorted and joined by single spaces.
pub fn sorted_tokens(s: &str) -> String {
    let processed = full_process(s);
    let mut tokens: Vec<&str> = processed.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Similarity of two strings as they are. Empty input scores 0.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Similarity after normalizing and sorting the words of both strings.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

pub(crate) fn ratio_chars(a: &[char], b: &[char]) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let len_sum = a.len() + b.len();
    let distance = len_sum - 2 * lcs_len(a, b);
    let similarity = (len_sum - distance) as f64 / len_sum as f64;
    (100.0 * similarity).round_ties_even() as u8
}

/// Length of the longest common subsequence.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let mut prev = vec![0usize; short.len() + 1];
    let mut curr = vec![0usize; short.len() + 1];

    for &lc in long {
        for (j, &sc) in short.iter().enumerate() {
            curr[j + 1] = if lc == sc {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[short.len()]
}
