use crate::error::{Result, WordNetError};
use crate::frames::frame_sentence;
use crate::lexicon::Lexicon;
use crate::morphy::{self, ExceptionMap};
use crate::parse::{self, RawSynset};
use crate::types::{Lemma, PartOfSpeech, Pointer, RelatedLemma, RelatedSense, Sense, SenseId};
use log::{debug, info, warn};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Files that must exist for a directory to count as a WordNet database.
pub const REQUIRED_FILES: [&str; 8] = [
    "index.noun",
    "index.verb",
    "index.adj",
    "index.adv",
    "data.noun",
    "data.verb",
    "data.adj",
    "data.adv",
];

/// Irregular inflection lists; read when present.
pub const EXCEPTION_FILES: [&str; 4] = ["noun.exc", "verb.exc", "adj.exc", "adv.exc"];

const STORAGE_POS: [PartOfSpeech; 4] = PartOfSpeech::LOOKUP_ORDER;

/// Required files absent from `dir`.
pub fn missing_files(dir: &Path) -> Vec<&'static str> {
    REQUIRED_FILES
        .iter()
        .copied()
        .filter(|name| !dir.join(name).is_file())
        .collect()
}

struct DataFile {
    name: String,
    bytes: Vec<u8>,
}

impl DataFile {
    fn record(&self, offset: u64) -> Result<RawSynset> {
        let start = usize::try_from(offset)
            .ok()
            .filter(|start| *start < self.bytes.len())
            .ok_or_else(|| WordNetError::parse(&self.name, offset, "offset past end of file"))?;
        let rest = &self.bytes[start..];
        let end = rest.iter().position(|b| *b == b'\n').unwrap_or(rest.len());
        let line = String::from_utf8_lossy(&rest[..end]);
        parse::parse_data_line(&self.name, offset, line.trim_end_matches('\r'))
    }
}

/// A Princeton WordNet database (the `dict/` directory of a WordNet release).
///
/// Index and exception files are parsed up front; data files are kept in memory and
/// records are parsed on demand at the byte offsets the index points to.
pub struct WordNetDatabase {
    root: PathBuf,
    index: HashMap<String, HashMap<PartOfSpeech, Vec<u64>>>,
    data: HashMap<PartOfSpeech, DataFile>,
    exceptions: HashMap<PartOfSpeech, ExceptionMap>,
    lemma_names: Vec<String>,
}

impl WordNetDatabase {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let root = dir.as_ref().to_path_buf();
        if let Some(missing) = missing_files(&root).first() {
            return Err(WordNetError::MissingFile(root.join(missing)));
        }

        let mut index: HashMap<String, HashMap<PartOfSpeech, Vec<u64>>> = HashMap::new();
        let mut data = HashMap::new();
        let mut exceptions = HashMap::new();

        for pos in STORAGE_POS {
            let name = format!("index.{}", pos.file_suffix());
            let raw = fs::read(root.join(&name))?;
            let text = String::from_utf8_lossy(&raw);
            let mut entries = 0usize;
            for line in text.lines().filter(|l| !parse::is_header(l)) {
                let entry = parse::parse_index_line(&name, line)?;
                index
                    .entry(entry.lemma)
                    .or_default()
                    .insert(entry.pos.storage(), entry.offsets);
                entries += 1;
            }
            debug!("{name}: {entries} lemmas");

            let name = format!("data.{}", pos.file_suffix());
            let bytes = fs::read(root.join(&name))?;
            debug!("{name}: {} bytes", bytes.len());
            data.insert(pos, DataFile { name, bytes });

            let name = format!("{}.exc", pos.file_suffix());
            let path = root.join(&name);
            if path.is_file() {
                let raw = fs::read(&path)?;
                let map: ExceptionMap = String::from_utf8_lossy(&raw)
                    .lines()
                    .filter_map(parse::parse_exception_line)
                    .collect();
                debug!("{name}: {} exceptions", map.len());
                exceptions.insert(pos, map);
            }
        }

        let lemma_names: Vec<String> = index
            .keys()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        info!(
            "Opened WordNet at {} ({} lemmas)",
            root.display(),
            lemma_names.len()
        );

        Ok(Self {
            root,
            index,
            data,
            exceptions,
            lemma_names,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Synset offsets of `lemma` for `pos` (satellites resolve to adjectives).
    pub fn offsets(&self, lemma: &str, pos: PartOfSpeech) -> Option<&[u64]> {
        self.index
            .get(lemma)
            .and_then(|by_pos| by_pos.get(&pos.storage()))
            .map(Vec::as_slice)
    }

    /// Parse and resolve the sense stored at `offset` in the data file for `pos`.
    pub fn sense(&self, pos: PartOfSpeech, offset: u64) -> Result<Sense> {
        let raw = self.raw(pos, offset)?;
        self.resolve(raw)
    }

    fn raw(&self, pos: PartOfSpeech, offset: u64) -> Result<RawSynset> {
        let file = self
            .data
            .get(&pos.storage())
            .ok_or_else(|| WordNetError::UnknownPartOfSpeech(pos.code().to_string()))?;
        file.record(offset)
    }

    fn resolve(&self, raw: RawSynset) -> Result<Sense> {
        let id = SenseId {
            pos: raw.pos,
            offset: raw.offset,
        };
        let file = format!("data.{}", raw.pos.file_suffix());

        let mut lemmas: Vec<Lemma> = raw
            .words
            .iter()
            .map(|w| Lemma::new(w.name.clone(), w.lex_id))
            .collect();
        let mut relations = Vec::new();

        for pointer in &raw.pointers {
            let Some(kind) = Pointer::from_symbol(&pointer.symbol) else {
                debug!("{id}: skipping unknown pointer '{}'", pointer.symbol);
                continue;
            };
            let target_raw = self.raw(pointer.pos, pointer.offset)?;
            let target = SenseId {
                pos: target_raw.pos,
                offset: target_raw.offset,
            };

            if pointer.is_lexical() {
                let source = pointer
                    .source
                    .checked_sub(1)
                    .and_then(|i| lemmas.get_mut(i))
                    .ok_or_else(|| {
                        WordNetError::parse(&file, raw.offset, "pointer source out of range")
                    })?;
                let name = pointer
                    .target
                    .checked_sub(1)
                    .and_then(|i| target_raw.words.get(i))
                    .map(|w| w.name.clone())
                    .ok_or_else(|| {
                        WordNetError::parse(&file, raw.offset, "pointer target out of range")
                    })?;
                source.relations.push(RelatedLemma {
                    pointer: kind,
                    target,
                    name,
                });
            } else {
                relations.push(RelatedSense {
                    pointer: kind,
                    target,
                    lemma_names: target_raw.words.into_iter().map(|w| w.name).collect(),
                });
            }
        }

        for frame in &raw.frames {
            let targets: Vec<usize> = if frame.word == 0 {
                (0..lemmas.len()).collect()
            } else {
                vec![frame.word - 1]
            };
            for i in targets {
                let Some(lemma) = lemmas.get_mut(i) else {
                    warn!("{id}: frame {} names missing word {}", frame.number, i + 1);
                    continue;
                };
                match frame_sentence(frame.number, &lemma.name) {
                    Some(sentence) => lemma.verb_frames.push(sentence),
                    None => warn!("{id}: unknown verb frame {}", frame.number),
                }
            }
        }

        Ok(Sense {
            id,
            lex_filenum: raw.lex_filenum,
            definition: raw.definition,
            examples: raw.examples,
            lemmas,
            relations,
        })
    }
}

impl Lexicon for WordNetDatabase {
    fn lookup(&self, word: &str) -> Result<Vec<Sense>> {
        let word = word.to_lowercase();
        let no_exceptions = ExceptionMap::new();
        let mut seen = HashSet::new();
        let mut senses = Vec::new();

        for pos in PartOfSpeech::LOOKUP_ORDER {
            let exceptions = self.exceptions.get(&pos).unwrap_or(&no_exceptions);
            let forms = morphy::base_forms(&word, pos, exceptions, |form| {
                self.offsets(form, pos).is_some()
            });
            for form in forms {
                for &offset in self.offsets(&form, pos).unwrap_or_default() {
                    if seen.insert((pos, offset)) {
                        senses.push(self.sense(pos, offset)?);
                    }
                }
            }
        }

        debug!("'{word}': {} senses", senses.len());
        Ok(senses)
    }

    fn all_lemma_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.lemma_names.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_wordnet;
    use pretty_assertions::assert_eq;

    fn open_sample() -> (tempfile::TempDir, WordNetDatabase) {
        let dir = sample_wordnet().build().expect("fixture");
        let db = WordNetDatabase::open(dir.path()).expect("open fixture");
        (dir, db)
    }

    #[test]
    fn open_reports_first_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = WordNetDatabase::open(dir.path()).err().expect("must fail");
        assert!(matches!(err, WordNetError::MissingFile(ref p) if p.ends_with("index.noun")));
        assert_eq!(missing_files(dir.path()).len(), REQUIRED_FILES.len());
    }

    #[test]
    fn lookup_resolves_adjective_and_satellite_senses() {
        let (_dir, db) = open_sample();
        let senses = db.lookup("happy").unwrap();
        let tags: Vec<_> = senses.iter().map(|s| s.pos()).collect();
        assert_eq!(
            tags,
            vec![PartOfSpeech::Adjective, PartOfSpeech::AdjectiveSatellite]
        );

        let happy = &senses[0];
        assert_eq!(
            happy.definition,
            "enjoying or showing or marked by joy or pleasure"
        );
        assert_eq!(
            happy.examples,
            vec!["a happy smile", "spent many happy days on the beach"]
        );
        let antonyms: Vec<_> = happy.lemmas[0].antonyms().collect();
        assert_eq!(antonyms, vec!["unhappy"]);
        let similar: Vec<_> = happy
            .related_lemma_names(|p| p == Pointer::SimilarTo)
            .collect();
        assert_eq!(similar, vec!["felicitous", "happy"]);
    }

    #[test]
    fn lookup_is_case_insensitive_and_applies_morphology() {
        let (_dir, db) = open_sample();
        let senses = db.lookup("Dogs").unwrap();
        assert_eq!(senses.len(), 2);
        assert!(senses.iter().all(|s| s.pos() == PartOfSpeech::Noun));
        assert_eq!(
            senses[0].lemma_names().collect::<Vec<_>>(),
            vec!["dog", "domestic_dog", "Canis_familiaris"]
        );
    }

    #[test]
    fn exception_lists_map_irregular_forms() {
        let (_dir, db) = open_sample();
        let senses = db.lookup("ran").unwrap();
        assert_eq!(senses.len(), 1);
        assert_eq!(senses[0].pos(), PartOfSpeech::Verb);
        assert_eq!(senses[0].lemmas[0].name, "run");
    }

    #[test]
    fn verb_frames_are_attached_per_lemma() {
        let (_dir, db) = open_sample();
        let senses = db.lookup("run").unwrap();
        let verb = senses
            .iter()
            .find(|s| s.pos() == PartOfSpeech::Verb)
            .expect("verb sense");
        assert_eq!(
            verb.lemmas[0].verb_frames,
            vec!["Somebody run", "Somebody run PP"]
        );
    }

    #[test]
    fn sense_relations_carry_target_lemma_names() {
        let (_dir, db) = open_sample();
        let dog = db.lookup("dog").unwrap().remove(0);
        let hypernyms: Vec<_> = dog
            .related_lemma_names(|p| p == Pointer::Hypernym)
            .collect();
        assert_eq!(hypernyms, vec!["canine", "canid"]);
        let holonyms: Vec<_> = dog.related_lemma_names(Pointer::is_holonym).collect();
        assert_eq!(holonyms, vec!["Canis", "genus_Canis"]);
        let meronyms: Vec<_> = dog.related_lemma_names(Pointer::is_meronym).collect();
        assert_eq!(meronyms, vec!["flag"]);
    }

    #[test]
    fn unknown_words_have_no_senses() {
        let (_dir, db) = open_sample();
        assert!(db.lookup("xyzzqq").unwrap().is_empty());
    }

    #[test]
    fn vocabulary_is_sorted_and_unique() {
        let (_dir, db) = open_sample();
        let names: Vec<_> = db.all_lemma_names().collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert!(names.contains(&"happy"));
        assert!(names.contains(&"canis_familiaris"));
    }
}
