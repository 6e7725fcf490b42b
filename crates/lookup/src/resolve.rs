use crate::aggregate::aggregate;
use crate::error::Result;
use crate::result::LookupResult;
use crate::suggest::{suggest, SuggestConfig};
use lexis_wordnet::Lexicon;
use serde::Serialize;
use std::fmt;

/// A word that matched no sense, with the closest vocabulary entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFound {
    pub word: String,
    pub suggestions: Vec<String>,
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No entries found for '{}'.", self.word)?;
        if !self.suggestions.is_empty() {
            write!(f, " Did you mean: {}?", self.suggestions.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(LookupResult),
    NotFound(NotFound),
}

/// Look `word` up and aggregate its senses, or collect suggestions when it has none.
pub fn resolve<L>(lexicon: &L, word: &str, config: &SuggestConfig) -> Result<Resolution>
where
    L: Lexicon + ?Sized,
{
    let senses = lexicon.lookup(word)?;
    if !senses.is_empty() {
        log::debug!("'{}' matched {} sense(s)", word, senses.len());
        return Ok(Resolution::Found(aggregate(&senses)));
    }

    log::info!("No senses for '{}', searching for near matches", word);
    let suggestions = suggest(word, lexicon.all_lemma_names(), config);
    Ok(Resolution::NotFound(NotFound {
        word: word.to_string(),
        suggestions,
    }))
}
