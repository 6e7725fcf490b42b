use crate::error::Result;
use crate::types::Sense;

/// The narrow capability the lookup pipeline needs from a lexical database.
pub trait Lexicon {
    /// Every sense of `word`, in the database's reporting order.
    fn lookup(&self, word: &str) -> Result<Vec<Sense>>;

    /// The full lemma vocabulary, used for near-match suggestions.
    fn all_lemma_names(&self) -> Box<dyn Iterator<Item = &str> + '_>;
}
