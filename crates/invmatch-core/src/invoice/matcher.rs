//! Fuzzy reconciliation of item lines against catalog names.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::models::catalog::CatalogIndex;
use crate::models::order::MatchResult;

use super::fuzz::{ratio_chars, sorted_tokens};

/// An item line together with its best catalog match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch<'l> {
    pub line: &'l str,
    pub result: MatchResult,
}

/// Outcome of matching a batch of item lines.
#[derive(Debug, Clone, Default)]
pub struct LineMatches<'l> {
    /// Matched lines in input order.
    pub matched: Vec<LineMatch<'l>>,
    /// Lines that had text but no acceptable match.
    pub unmatched: Vec<&'l str>,
}

/// Matches item lines against every catalog name with token-sort similarity.
pub struct CatalogMatcher<'i, 'c> {
    index: &'i CatalogIndex<'c>,
    /// Sorted-token form of every catalog name, in catalog order.
    prepared: Vec<Vec<char>>,
    min_score: Option<u8>,
}

impl<'i, 'c> CatalogMatcher<'i, 'c> {
    pub fn new(index: &'i CatalogIndex<'c>) -> Self {
        let prepared = index
            .names()
            .iter()
            .map(|name| sorted_tokens(name).chars().collect())
            .collect();

        Self {
            index,
            prepared,
            min_score: None,
        }
    }

    /// Reject matches scoring below `min_score`. A score equal to the
    /// threshold is kept.
    pub fn with_min_score(mut self, min_score: Option<u8>) -> Self {
        self.min_score = min_score;
        self
    }

    /// Best catalog match for one item line, if any.
    ///
    /// All whitespace is removed before the line is split into tokens on
    /// whitespace, so in practice the whole line is scored as one token.
    /// Existing outputs depend on this, so keep it.
    pub fn match_line(&self, line: &str) -> Option<MatchResult> {
        let stripped: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        if stripped.is_empty() {
            return None;
        }

        let mut best: Option<(usize, u8)> = None;
        for token in stripped.split(char::is_whitespace) {
            let Some((idx, score)) = self.best_for_token(token) else {
                continue;
            };
            trace!("Token {:?} best {:?} ({})", token, self.index.names()[idx], score);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((idx, score));
            }
        }

        let (idx, score) = best?;
        if self.min_score.is_some_and(|min| score < min) {
            debug!("Line {:?} best score {} below threshold", line, score);
            return None;
        }

        Some(MatchResult {
            matched_name: self.index.names()[idx].to_string(),
            score,
        })
    }

    /// Match every line in order. Blank lines are skipped and a line repeated
    /// verbatim is reconciled only at its first position.
    pub fn match_lines<'l, S: AsRef<str>>(&self, lines: &'l [S]) -> LineMatches<'l> {
        let mut seen = HashSet::new();
        let mut matches = LineMatches::default();

        for line in lines {
            let line = line.as_ref();
            if line.chars().all(char::is_whitespace) || !seen.insert(line) {
                continue;
            }
            match self.match_line(line) {
                Some(result) => matches.matched.push(LineMatch { line, result }),
                None => matches.unmatched.push(line),
            }
        }

        debug!(
            "Matched {} lines, {} unmatched",
            matches.matched.len(),
            matches.unmatched.len()
        );
        matches
    }

    /// First catalog name with the highest score for `token`.
    fn best_for_token(&self, token: &str) -> Option<(usize, u8)> {
        let query: Vec<char> = sorted_tokens(token).chars().collect();

        let mut best: Option<(usize, u8)> = None;
        for (idx, name) in self.prepared.iter().enumerate() {
            let score = ratio_chars(&query, name);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((idx, score));
            }
        }
        best
    }
}
