use serde::{Deserialize, Serialize};

/// One output category of a lookup, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Definitions,
    PosTags,
    Synonyms,
    Antonyms,
    Hyponyms,
    Hypernyms,
    Holonyms,
    Meronyms,
    DerivationallyRelatedForms,
    SimilarTos,
    Pertainyms,
    VerbFrames,
    Examples,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::Definitions,
        Category::PosTags,
        Category::Synonyms,
        Category::Antonyms,
        Category::Hyponyms,
        Category::Hypernyms,
        Category::Holonyms,
        Category::Meronyms,
        Category::DerivationallyRelatedForms,
        Category::SimilarTos,
        Category::Pertainyms,
        Category::VerbFrames,
        Category::Examples,
    ];

    /// JSON key.
    pub const fn key(self) -> &'static str {
        match self {
            Category::Definitions => "definitions",
            Category::PosTags => "pos_tags",
            Category::Synonyms => "synonyms",
            Category::Antonyms => "antonyms",
            Category::Hyponyms => "hyponyms",
            Category::Hypernyms => "hypernyms",
            Category::Holonyms => "holonyms",
            Category::Meronyms => "meronyms",
            Category::DerivationallyRelatedForms => "derivationally_related_forms",
            Category::SimilarTos => "similar_tos",
            Category::Pertainyms => "pertainyms",
            Category::VerbFrames => "verb_frames",
            Category::Examples => "examples",
        }
    }

    /// Section heading in formatted output.
    pub const fn title(self) -> &'static str {
        match self {
            Category::Definitions => "Definitions",
            Category::PosTags => "Part of Speech",
            Category::Synonyms => "Synonyms",
            Category::Antonyms => "Antonyms",
            Category::Hyponyms => "Hyponyms",
            Category::Hypernyms => "Hypernyms",
            Category::Holonyms => "Holonyms",
            Category::Meronyms => "Meronyms",
            Category::DerivationallyRelatedForms => "Derivationally Related Forms",
            Category::SimilarTos => "Similar To",
            Category::Pertainyms => "Pertainyms",
            Category::VerbFrames => "Verb Frames",
            Category::Examples => "Examples",
        }
    }

    /// Value column header in formatted output.
    pub const fn column(self) -> &'static str {
        match self {
            Category::Definitions => "Definition",
            Category::PosTags => "POS",
            Category::Synonyms => "Synonym",
            Category::Antonyms => "Antonym",
            Category::Hyponyms => "Hyponym",
            Category::Hypernyms => "Hypernym",
            Category::Holonyms => "Holonym",
            Category::Meronyms => "Meronym",
            Category::DerivationallyRelatedForms => "Derived Form",
            Category::SimilarTos => "Similar To",
            Category::Pertainyms => "Pertainym",
            Category::VerbFrames => "Verb Frame",
            Category::Examples => "Example",
        }
    }

    /// Per-sense sequences keep discovery order and duplicates; the rest are sorted sets.
    pub const fn is_enumerated(self) -> bool {
        matches!(self, Category::Definitions | Category::Examples)
    }
}

/// Everything a lookup found for one word.
///
/// Built once by [`crate::aggregate`]; set categories are sorted and unique,
/// `definitions` and `examples` follow sense order. Field order is the JSON key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupResult {
    pub(crate) definitions: Vec<String>,
    pub(crate) pos_tags: Vec<String>,
    pub(crate) synonyms: Vec<String>,
    pub(crate) antonyms: Vec<String>,
    pub(crate) hyponyms: Vec<String>,
    pub(crate) hypernyms: Vec<String>,
    pub(crate) holonyms: Vec<String>,
    pub(crate) meronyms: Vec<String>,
    pub(crate) derivationally_related_forms: Vec<String>,
    pub(crate) similar_tos: Vec<String>,
    pub(crate) pertainyms: Vec<String>,
    pub(crate) verb_frames: Vec<String>,
    pub(crate) examples: Vec<String>,
}

impl LookupResult {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Definitions => &self.definitions,
            Category::PosTags => &self.pos_tags,
            Category::Synonyms => &self.synonyms,
            Category::Antonyms => &self.antonyms,
            Category::Hyponyms => &self.hyponyms,
            Category::Hypernyms => &self.hypernyms,
            Category::Holonyms => &self.holonyms,
            Category::Meronyms => &self.meronyms,
            Category::DerivationallyRelatedForms => &self.derivationally_related_forms,
            Category::SimilarTos => &self.similar_tos,
            Category::Pertainyms => &self.pertainyms,
            Category::VerbFrames => &self.verb_frames,
            Category::Examples => &self.examples,
        }
    }

    pub fn definitions(&self) -> &[String] {
        &self.definitions
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }

    pub fn antonyms(&self) -> &[String] {
        &self.antonyms
    }

    /// Categories with at least one value, in rendering order.
    pub fn non_empty(&self) -> impl Iterator<Item = (Category, &[String])> {
        Category::ALL
            .into_iter()
            .map(move |c| (c, self.get(c)))
            .filter(|(_, values)| !values.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_text_lists_keys_in_declaration_order() {
        let text = serde_json::to_string(&LookupResult::default()).unwrap();
        let positions: Vec<_> = Category::ALL
            .iter()
            .map(|c| text.find(&format!("\"{}\"", c.key())).expect("key present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
    }

    #[test]
    fn empty_result_has_no_non_empty_categories() {
        assert_eq!(LookupResult::default().non_empty().count(), 0);
    }
}
