//! Ranking engine interface and the skim-based implementation.

use crate::domain::{EntryType, ResultEntry};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Query + corpus + cap to ranked matches with highlight positions.
pub trait FuzzyEngine: Send + Sync {
    /// Ranks `corpus` against `query`, returning at most `cap` entries.
    ///
    /// `FileLine` entries are kept under their `File` header: a group is
    /// returned when its header or any of its lines matches, in corpus order.
    fn search(&self, query: &str, corpus: &[ResultEntry], cap: usize) -> Vec<ResultEntry>;
}

/// [`FuzzyEngine`] built on `fuzzy-matcher`'s skim algorithm.
///
/// The query is split on whitespace and every token must match. Matching
/// ignores case. Highlight positions are the union over all tokens.
pub struct SkimEngine {
    matcher: SkimMatcherV2,
}

impl Default for SkimEngine {
    fn default() -> Self {
        Self {
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }
}

impl std::fmt::Debug for SkimEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkimEngine").finish_non_exhaustive()
    }
}

impl SkimEngine {
    /// Scores one entry. `None` if any token fails to match.
    fn score(&self, text: &str, tokens: &[&str]) -> Option<(i64, Vec<usize>)> {
        let mut total = 0;
        let mut positions = Vec::new();
        for token in tokens {
            let (score, indices) = self.matcher.fuzzy_indices(text, token)?;
            total += score;
            positions.extend(indices);
        }
        Some((total, positions))
    }

    fn matched(&self, entry: &ResultEntry, tokens: &[&str]) -> Option<(i64, ResultEntry)> {
        self.score(&entry.text, tokens).map(|(score, positions)| {
            (
                score,
                ResultEntry::new(entry.text.clone(), entry.entry_type).with_highlights(positions),
            )
        })
    }

    fn search_flat(&self, tokens: &[&str], corpus: &[ResultEntry], cap: usize) -> Vec<ResultEntry> {
        let mut ranked: Vec<(i64, ResultEntry)> = corpus.iter().filter_map(|e| self.matched(e, tokens)).collect();
        // Stable sort keeps corpus order among equal scores.
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked.into_iter().take(cap).map(|(_, entry)| entry).collect()
    }

    fn search_grouped(&self, tokens: &[&str], corpus: &[ResultEntry], cap: usize) -> Vec<ResultEntry> {
        let mut out = Vec::new();
        let mut rest = corpus;

        while let Some((header, tail)) = rest.split_first() {
            let group_len = tail.iter().take_while(|e| e.entry_type == EntryType::FileLine).count();
            let (lines, next) = tail.split_at(group_len);
            rest = next;

            let header_match = self.matched(header, tokens);
            let line_matches: Vec<ResultEntry> = lines
                .iter()
                .filter_map(|line| self.matched(line, tokens).map(|(_, entry)| entry))
                .collect();
            if header_match.is_none() && line_matches.is_empty() {
                continue;
            }

            out.push(header_match.map_or_else(|| header.clone(), |(_, entry)| entry));
            out.extend(line_matches);
            if out.len() >= cap {
                out.truncate(cap);
                break;
            }
        }
        out
    }
}

impl FuzzyEngine for SkimEngine {
    fn search(&self, query: &str, corpus: &[ResultEntry], cap: usize) -> Vec<ResultEntry> {
        let _span = tracing::debug_span!("fuzzy_search", corpus = corpus.len(), query_len = query.len(), cap).entered();

        let tokens: Vec<&str> = query.split_whitespace().collect();
        if tokens.is_empty() {
            return corpus.iter().take(cap).cloned().collect();
        }

        let grouped = corpus.iter().any(|e| e.entry_type == EntryType::FileLine);
        let results = if grouped {
            self.search_grouped(&tokens, corpus, cap)
        } else {
            self.search_flat(&tokens, corpus, cap)
        };

        tracing::debug!(matched = results.len(), "fuzzy search finished");
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<ResultEntry> {
        ["src/main.rs", "src/app/engine.rs", "README.md", "src/ui/palette/mod.rs"]
            .into_iter()
            .map(|p| ResultEntry::new(p, EntryType::File))
            .collect()
    }

    #[test]
    fn every_token_must_match() {
        let engine = SkimEngine::default();
        let results = engine.search("src mod", &corpus(), 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "src/ui/palette/mod.rs");
        assert!(!results[0].highlight_positions.is_empty());
    }

    #[test]
    fn empty_query_returns_corpus_prefix() {
        let engine = SkimEngine::default();
        let results = engine.search("  ", &corpus(), 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "src/main.rs");
        assert!(results[0].highlight_positions.is_empty());
    }

    #[test]
    fn cap_bounds_the_result_count() {
        let engine = SkimEngine::default();
        assert_eq!(engine.search("s", &corpus(), 1).len(), 1);
        assert!(engine.search("s", &corpus(), 0).is_empty());
    }

    #[test]
    fn matching_lines_keep_their_header() {
        let engine = SkimEngine::default();
        let corpus = vec![
            ResultEntry::new("a.go", EntryType::File),
            ResultEntry::new("1:foo", EntryType::FileLine),
            ResultEntry::new("2:bar", EntryType::FileLine),
            ResultEntry::new("b.go", EntryType::File),
            ResultEntry::new("1:baz", EntryType::FileLine),
        ];

        let results = engine.search("bar", &corpus, 10);
        let texts: Vec<&str> = results.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["a.go", "2:bar"]);
    }
}
