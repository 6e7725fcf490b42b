use crate::error::{Result, WordNetError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Syntactic category of a sense.
///
/// Adjective satellites share the adjective data file but keep their own tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    AdjectiveSatellite,
    Adverb,
}

impl PartOfSpeech {
    /// Order in which senses are reported for a word.
    pub const LOOKUP_ORDER: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    /// Single-letter code used in the database files (`n`, `v`, `a`, `s`, `r`).
    pub const fn code(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "n",
            PartOfSpeech::Verb => "v",
            PartOfSpeech::Adjective => "a",
            PartOfSpeech::AdjectiveSatellite => "s",
            PartOfSpeech::Adverb => "r",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "n" => Ok(PartOfSpeech::Noun),
            "v" => Ok(PartOfSpeech::Verb),
            "a" => Ok(PartOfSpeech::Adjective),
            "s" => Ok(PartOfSpeech::AdjectiveSatellite),
            "r" => Ok(PartOfSpeech::Adverb),
            other => Err(WordNetError::UnknownPartOfSpeech(other.to_string())),
        }
    }

    /// Suffix of the `index.*`, `data.*` and `*.exc` files holding this category.
    pub const fn file_suffix(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective | PartOfSpeech::AdjectiveSatellite => "adj",
            PartOfSpeech::Adverb => "adv",
        }
    }

    /// Satellites are stored with (and looked up as) adjectives.
    pub const fn storage(self) -> PartOfSpeech {
        match self {
            PartOfSpeech::AdjectiveSatellite => PartOfSpeech::Adjective,
            other => other,
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Pointer kinds from `wninput(5)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pointer {
    Antonym,
    Hypernym,
    InstanceHypernym,
    Hyponym,
    InstanceHyponym,
    MemberHolonym,
    SubstanceHolonym,
    PartHolonym,
    MemberMeronym,
    SubstanceMeronym,
    PartMeronym,
    Attribute,
    DerivationallyRelated,
    DomainTopic,
    MemberOfDomainTopic,
    DomainRegion,
    MemberOfDomainRegion,
    DomainUsage,
    MemberOfDomainUsage,
    Entailment,
    Cause,
    AlsoSee,
    VerbGroup,
    SimilarTo,
    ParticipleOfVerb,
    /// `\` on adjectives (pertainym) and adverbs (derived from adjective).
    Pertainym,
}

impl Pointer {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let pointer = match symbol {
            "!" => Pointer::Antonym,
            "@" => Pointer::Hypernym,
            "@i" => Pointer::InstanceHypernym,
            "~" => Pointer::Hyponym,
            "~i" => Pointer::InstanceHyponym,
            "#m" => Pointer::MemberHolonym,
            "#s" => Pointer::SubstanceHolonym,
            "#p" => Pointer::PartHolonym,
            "%m" => Pointer::MemberMeronym,
            "%s" => Pointer::SubstanceMeronym,
            "%p" => Pointer::PartMeronym,
            "=" => Pointer::Attribute,
            "+" => Pointer::DerivationallyRelated,
            ";c" => Pointer::DomainTopic,
            "-c" => Pointer::MemberOfDomainTopic,
            ";r" => Pointer::DomainRegion,
            "-r" => Pointer::MemberOfDomainRegion,
            ";u" => Pointer::DomainUsage,
            "-u" => Pointer::MemberOfDomainUsage,
            "*" => Pointer::Entailment,
            ">" => Pointer::Cause,
            "^" => Pointer::AlsoSee,
            "$" => Pointer::VerbGroup,
            "&" => Pointer::SimilarTo,
            "<" => Pointer::ParticipleOfVerb,
            "\\" => Pointer::Pertainym,
            _ => return None,
        };
        Some(pointer)
    }

    pub const fn is_holonym(self) -> bool {
        matches!(
            self,
            Pointer::MemberHolonym | Pointer::SubstanceHolonym | Pointer::PartHolonym
        )
    }

    pub const fn is_meronym(self) -> bool {
        matches!(
            self,
            Pointer::MemberMeronym | Pointer::SubstanceMeronym | Pointer::PartMeronym
        )
    }
}

/// Location of a sense in the database: its data file and byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SenseId {
    pub pos: PartOfSpeech,
    pub offset: u64,
}

impl fmt::Display for SenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}-{}", self.offset, self.pos)
    }
}

/// Edge from a sense to another sense, with the target's lemma names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedSense {
    pub pointer: Pointer,
    pub target: SenseId,
    pub lemma_names: Vec<String>,
}

/// Edge from a lemma to a lemma of another (or the same) sense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedLemma {
    pub pointer: Pointer,
    pub target: SenseId,
    pub name: String,
}

/// A word form inside a sense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lemma {
    /// Word as stored: underscores for spaces, adjective marker removed.
    pub name: String,
    pub lex_id: u8,
    pub relations: Vec<RelatedLemma>,
    /// Verb frame sentences with the lemma filled in.
    pub verb_frames: Vec<String>,
}

impl Lemma {
    pub fn new(name: impl Into<String>, lex_id: u8) -> Self {
        Self {
            name: name.into(),
            lex_id,
            relations: Vec::new(),
            verb_frames: Vec::new(),
        }
    }

    pub fn related(&self, pointer: Pointer) -> impl Iterator<Item = &RelatedLemma> {
        self.relations.iter().filter(move |r| r.pointer == pointer)
    }

    pub fn antonyms(&self) -> impl Iterator<Item = &str> {
        self.related(Pointer::Antonym).map(|r| r.name.as_str())
    }

    pub fn derivationally_related_forms(&self) -> impl Iterator<Item = &str> {
        self.related(Pointer::DerivationallyRelated)
            .map(|r| r.name.as_str())
    }

    pub fn pertainyms(&self) -> impl Iterator<Item = &str> {
        self.related(Pointer::Pertainym).map(|r| r.name.as_str())
    }
}

/// One meaning of a word (a synset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    pub id: SenseId,
    pub lex_filenum: u8,
    pub definition: String,
    pub examples: Vec<String>,
    pub lemmas: Vec<Lemma>,
    pub relations: Vec<RelatedSense>,
}

impl Sense {
    pub fn pos(&self) -> PartOfSpeech {
        self.id.pos
    }

    pub fn lemma_names(&self) -> impl Iterator<Item = &str> {
        self.lemmas.iter().map(|l| l.name.as_str())
    }

    pub fn related(&self, pointer: Pointer) -> impl Iterator<Item = &RelatedSense> {
        self.relations.iter().filter(move |r| r.pointer == pointer)
    }

    /// Lemma names of every sense reachable over edges accepted by `filter`.
    pub fn related_lemma_names<F>(&self, filter: F) -> impl Iterator<Item = &str>
    where
        F: Fn(Pointer) -> bool,
    {
        self.relations
            .iter()
            .filter(move |r| filter(r.pointer))
            .flat_map(|r| r.lemma_names.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_codes_round_trip_and_satellites_share_adjective_storage() {
        for pos in [
            PartOfSpeech::Noun,
            PartOfSpeech::Verb,
            PartOfSpeech::Adjective,
            PartOfSpeech::AdjectiveSatellite,
            PartOfSpeech::Adverb,
        ] {
            assert_eq!(PartOfSpeech::from_code(pos.code()).unwrap(), pos);
        }
        assert_eq!(
            PartOfSpeech::AdjectiveSatellite.storage(),
            PartOfSpeech::Adjective
        );
        assert_eq!(PartOfSpeech::AdjectiveSatellite.file_suffix(), "adj");
        assert!(PartOfSpeech::from_code("x").is_err());
    }

    #[test]
    fn pointer_symbols_cover_holonym_and_meronym_families() {
        let holonyms: Vec<_> = ["#m", "#s", "#p"]
            .iter()
            .filter_map(|s| Pointer::from_symbol(s))
            .collect();
        assert_eq!(holonyms.len(), 3);
        assert!(holonyms.iter().all(|p| p.is_holonym() && !p.is_meronym()));

        let meronyms: Vec<_> = ["%m", "%s", "%p"]
            .iter()
            .filter_map(|s| Pointer::from_symbol(s))
            .collect();
        assert!(meronyms.iter().all(|p| p.is_meronym()));

        assert_eq!(Pointer::from_symbol("\\"), Some(Pointer::Pertainym));
        assert_eq!(Pointer::from_symbol("??"), None);
    }

    #[test]
    fn sense_id_displays_padded_offset() {
        let id = SenseId {
            pos: PartOfSpeech::Verb,
            offset: 1234,
        };
        assert_eq!(id.to_string(), "00001234-v");
    }
}
