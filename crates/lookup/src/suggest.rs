use crate::error::{LookupError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;
pub const DEFAULT_SUGGESTION_CUTOFF: f64 = 0.8;

/// How many near matches to offer and how close they must be.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuggestConfig {
    pub limit: usize,
    /// Minimum similarity in `[0, 1]`.
    pub cutoff: f64,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SUGGESTION_LIMIT,
            cutoff: DEFAULT_SUGGESTION_CUTOFF,
        }
    }
}

impl SuggestConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.cutoff) {
            return Err(LookupError::InvalidConfig(format!(
                "suggestion cutoff must be between 0 and 1, got {}",
                self.cutoff
            )));
        }
        Ok(())
    }
}

/// Similarity between two words: 1.0 for equal strings, 0.0 for nothing in common.
///
/// Swapping two adjacent letters costs a single edit, so "recieve" is as close
/// to "receive" as a one-letter typo.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_damerau_levenshtein(a, b)
}

/// Best upper bound on [`similarity`] given only the two lengths.
fn length_bound(a: usize, b: usize) -> f64 {
    let longest = a.max(b);
    if longest == 0 {
        return 1.0;
    }
    1.0 - a.abs_diff(b) as f64 / longest as f64
}

/// Up to `config.limit` candidates scoring at least `config.cutoff` against `word`.
///
/// Ordered by score descending, ties broken alphabetically. `word` is compared
/// exactly as supplied.
pub fn suggest<'a, I>(word: &str, candidates: I, config: &SuggestConfig) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    if config.limit == 0 {
        return Vec::new();
    }

    let query_len = word.chars().count();

    let mut scored: Vec<(f64, &str)> = candidates
        .into_iter()
        .filter(|candidate| length_bound(query_len, candidate.chars().count()) >= config.cutoff)
        .filter_map(|candidate| {
            let score = similarity(word, candidate);
            (score >= config.cutoff).then_some((score, candidate))
        })
        .collect();

    scored.sort_by(|a, b| match b.0.total_cmp(&a.0) {
        Ordering::Equal => a.1.cmp(b.1),
        other => other,
    });
    scored.dedup_by(|a, b| a.1 == b.1);

    log::debug!(
        "{} candidate(s) within cutoff {} of '{}'",
        scored.len(),
        config.cutoff,
        word
    );

    scored
        .into_iter()
        .take(config.limit)
        .map(|(_, name)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VOCABULARY: [&str; 8] = [
        "happy", "happen", "harpy", "hippy", "nappy", "sappy", "dog", "happily",
    ];

    #[test]
    fn ranks_by_score_then_name() {
        let found = suggest("hapy", VOCABULARY, &SuggestConfig::default());
        // both are one insertion away (0.8)
        assert_eq!(found, vec!["happy", "harpy"]);

        let loose = SuggestConfig {
            limit: 10,
            cutoff: 0.6,
        };
        let found = suggest("happy", VOCABULARY, &loose);
        assert_eq!(found[0], "happy");
        // happily: two insertions over seven letters outscores happen's two edits over six
        assert_eq!(
            &found[1..],
            ["harpy", "hippy", "nappy", "sappy", "happily", "happen"]
        );
    }

    #[test]
    fn transposed_letters_count_as_one_edit() {
        let found = suggest("recieve", ["receive", "relieve"], &SuggestConfig::default());
        assert_eq!(found, vec!["receive", "relieve"]);
        assert_eq!(
            suggest("hpapy", VOCABULARY, &SuggestConfig::default()),
            vec!["happy"]
        );
    }

    #[test]
    fn respects_limit() {
        let config = SuggestConfig {
            limit: 2,
            cutoff: 0.6,
        };
        assert_eq!(suggest("happy", VOCABULARY, &config), vec!["happy", "harpy"]);
    }

    #[test]
    fn default_limit_caps_at_five() {
        // all eight are one substitution away
        let candidates = [
            "state", "stale", "stake", "stage", "stars", "spare", "snare", "share",
        ];
        let found = suggest("stare", candidates, &SuggestConfig::default());
        assert_eq!(found.len(), DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(found, vec!["share", "snare", "spare", "stage", "stake"]);
    }

    #[test]
    fn nothing_close_yields_empty() {
        assert!(suggest("xyzzqq", VOCABULARY, &SuggestConfig::default()).is_empty());
    }

    #[test]
    fn zero_limit_and_empty_vocabulary_yield_empty() {
        let config = SuggestConfig {
            limit: 0,
            cutoff: 0.0,
        };
        assert!(suggest("happy", VOCABULARY, &config).is_empty());
        assert!(suggest("happy", Vec::<&str>::new(), &SuggestConfig::default()).is_empty());
    }

    #[test]
    fn query_case_is_significant() {
        assert!(suggest("HAPY", VOCABULARY, &SuggestConfig::default()).is_empty());
        assert_eq!(
            suggest("Happy", VOCABULARY, &SuggestConfig::default()),
            vec!["happy"]
        );
    }

    #[test]
    fn duplicate_candidates_are_reported_once() {
        let found = suggest("hapy", ["happy", "dog", "happy"], &SuggestConfig::default());
        assert_eq!(found, vec!["happy"]);
    }

    #[test]
    fn cutoff_outside_unit_interval_is_rejected() {
        let config = SuggestConfig {
            limit: 5,
            cutoff: 1.5,
        };
        assert!(config.validate().is_err());
        assert!(SuggestConfig::default().validate().is_ok());
    }

    #[test]
    fn length_bound_never_underestimates() {
        for (a, b) in [("cat", "catalog"), ("dog", "dig"), ("", "a"), ("abc", "")] {
            let bound = length_bound(a.chars().count(), b.chars().count());
            assert!(similarity(a, b) <= bound + f64::EPSILON, "{a} vs {b}");
        }
    }
}
