use crate::result::LookupResult;
use lexis_wordnet::{Pointer, Sense};
use std::collections::BTreeSet;

/// Accumulates relation categories across the senses of one word.
#[derive(Debug, Default)]
pub struct Aggregator {
    definitions: Vec<String>,
    examples: Vec<String>,
    pos_tags: BTreeSet<String>,
    synonyms: BTreeSet<String>,
    antonyms: BTreeSet<String>,
    hyponyms: BTreeSet<String>,
    hypernyms: BTreeSet<String>,
    holonyms: BTreeSet<String>,
    meronyms: BTreeSet<String>,
    derivationally_related_forms: BTreeSet<String>,
    similar_tos: BTreeSet<String>,
    pertainyms: BTreeSet<String>,
    verb_frames: BTreeSet<String>,
}

fn extend<'a>(set: &mut BTreeSet<String>, names: impl Iterator<Item = &'a str>) {
    set.extend(names.map(str::to_string));
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, sense: &Sense) {
        if !sense.definition.is_empty() {
            self.definitions.push(sense.definition.clone());
        }
        self.examples.extend(sense.examples.iter().cloned());
        self.pos_tags.insert(sense.pos().code().to_string());

        for lemma in &sense.lemmas {
            self.synonyms.insert(lemma.name.clone());
            extend(&mut self.antonyms, lemma.antonyms());
            extend(
                &mut self.derivationally_related_forms,
                lemma.derivationally_related_forms(),
            );
            extend(&mut self.pertainyms, lemma.pertainyms());
            self.verb_frames.extend(lemma.verb_frames.iter().cloned());
        }

        extend(
            &mut self.hyponyms,
            sense.related_lemma_names(|p| p == Pointer::Hyponym),
        );
        extend(
            &mut self.hypernyms,
            sense.related_lemma_names(|p| p == Pointer::Hypernym),
        );
        extend(&mut self.holonyms, sense.related_lemma_names(Pointer::is_holonym));
        extend(&mut self.meronyms, sense.related_lemma_names(Pointer::is_meronym));
        extend(
            &mut self.similar_tos,
            sense.related_lemma_names(|p| p == Pointer::SimilarTo),
        );
    }

    pub fn finish(self) -> LookupResult {
        LookupResult {
            definitions: self.definitions,
            pos_tags: self.pos_tags.into_iter().collect(),
            synonyms: self.synonyms.into_iter().collect(),
            antonyms: self.antonyms.into_iter().collect(),
            hyponyms: self.hyponyms.into_iter().collect(),
            hypernyms: self.hypernyms.into_iter().collect(),
            holonyms: self.holonyms.into_iter().collect(),
            meronyms: self.meronyms.into_iter().collect(),
            derivationally_related_forms: self.derivationally_related_forms.into_iter().collect(),
            similar_tos: self.similar_tos.into_iter().collect(),
            pertainyms: self.pertainyms.into_iter().collect(),
            verb_frames: self.verb_frames.into_iter().collect(),
            examples: self.examples,
        }
    }
}

/// Fold every sense into a single [`LookupResult`].
pub fn aggregate(senses: &[Sense]) -> LookupResult {
    let mut aggregator = Aggregator::new();
    for sense in senses {
        aggregator.add(sense);
    }
    aggregator.finish()
}
