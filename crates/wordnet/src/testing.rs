//! Writes small WordNet databases with correct byte offsets, for tests.

use crate::types::PartOfSpeech;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::io;
use std::path::Path;

const LICENSE_HEADER: &str =
    "  1 This software and database is being provided to you, the LICENSEE, by  \n";

struct FixturePointer {
    symbol: String,
    target: String,
    source: usize,
    target_word: usize,
}

pub struct FixtureSynset {
    key: String,
    pos: PartOfSpeech,
    lex_filenum: u8,
    words: Vec<String>,
    pointers: Vec<FixturePointer>,
    frames: Vec<(usize, usize)>,
    gloss: String,
}

impl FixtureSynset {
    /// Sense-level edge to the synset registered as `target`.
    pub fn pointer(&mut self, symbol: &str, target: &str) -> &mut Self {
        self.lexical_pointer(symbol, target, 0, 0)
    }

    /// Word-to-word edge; `source`/`target_word` are 1-based word numbers.
    pub fn lexical_pointer(
        &mut self,
        symbol: &str,
        target: &str,
        source: usize,
        target_word: usize,
    ) -> &mut Self {
        self.pointers.push(FixturePointer {
            symbol: symbol.to_string(),
            target: target.to_string(),
            source,
            target_word,
        });
        self
    }

    /// Verb frame `number` for word `word` (0 = every word).
    pub fn frame(&mut self, number: usize, word: usize) -> &mut Self {
        self.frames.push((number, word));
        self
    }

    fn render(&self, offsets: &HashMap<String, (PartOfSpeech, u64)>, offset: u64) -> String {
        let mut line = format!(
            "{:08} {:02} {} {:02x}",
            offset,
            self.lex_filenum,
            self.pos.code(),
            self.words.len()
        );
        for word in &self.words {
            line.push_str(&format!(" {word} 0"));
        }
        line.push_str(&format!(" {:03}", self.pointers.len()));
        for p in &self.pointers {
            let (pos, target) = offsets.get(&p.target).copied().unwrap_or_else(|| {
                panic!("fixture synset '{}' points at unknown '{}'", self.key, p.target)
            });
            line.push_str(&format!(
                " {} {:08} {} {:02x}{:02x}",
                p.symbol,
                target,
                pos.code(),
                p.source,
                p.target_word
            ));
        }
        if self.pos == PartOfSpeech::Verb {
            line.push_str(&format!(" {:02}", self.frames.len()));
            for (number, word) in &self.frames {
                line.push_str(&format!(" + {number:02} {word:02x}"));
            }
        }
        line.push_str(&format!(" | {}  \n", self.gloss));
        line
    }
}

/// Collects synsets and exception entries, then writes a complete database directory.
#[derive(Default)]
pub struct FixtureBuilder {
    synsets: Vec<FixtureSynset>,
    exceptions: Vec<(PartOfSpeech, String, String)>,
}

impl FixtureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a synset under `key`; pointers refer to synsets by key.
    pub fn synset(
        &mut self,
        key: &str,
        pos: PartOfSpeech,
        words: &[&str],
        gloss: &str,
    ) -> &mut FixtureSynset {
        self.synsets.push(FixtureSynset {
            key: key.to_string(),
            pos,
            lex_filenum: 0,
            words: words.iter().map(|w| w.to_string()).collect(),
            pointers: Vec::new(),
            frames: Vec::new(),
            gloss: gloss.to_string(),
        });
        self.synsets.last_mut().expect("just pushed")
    }

    pub fn exception(&mut self, pos: PartOfSpeech, inflected: &str, base: &str) -> &mut Self {
        self.exceptions
            .push((pos.storage(), inflected.to_string(), base.to_string()));
        self
    }

    pub fn write(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)?;

        // Offsets are fixed-width, so line lengths do not depend on them.
        let placeholder: HashMap<String, (PartOfSpeech, u64)> = self
            .synsets
            .iter()
            .map(|s| (s.key.clone(), (s.pos, 0)))
            .collect();
        let mut offsets: HashMap<String, (PartOfSpeech, u64)> = HashMap::new();
        let mut cursor: HashMap<&str, u64> = HashMap::new();
        for synset in &self.synsets {
            let next = cursor
                .entry(synset.pos.file_suffix())
                .or_insert(LICENSE_HEADER.len() as u64);
            offsets.insert(synset.key.clone(), (synset.pos, *next));
            *next += synset.render(&placeholder, 0).len() as u64;
        }

        let mut data: BTreeMap<&str, String> = BTreeMap::new();
        let mut index: BTreeMap<&str, BTreeMap<String, (Vec<u64>, BTreeSet<String>)>> =
            BTreeMap::new();
        for pos in PartOfSpeech::LOOKUP_ORDER {
            data.insert(pos.file_suffix(), LICENSE_HEADER.to_string());
            index.insert(pos.file_suffix(), BTreeMap::new());
        }

        for synset in &self.synsets {
            let suffix = synset.pos.file_suffix();
            let (_, offset) = offsets[&synset.key];
            if let Some(body) = data.get_mut(suffix) {
                body.push_str(&synset.render(&offsets, offset));
            }
            let Some(entries) = index.get_mut(suffix) else {
                continue;
            };
            for word in &synset.words {
                let entry = entries.entry(word.to_lowercase()).or_default();
                if !entry.0.contains(&offset) {
                    entry.0.push(offset);
                }
                entry
                    .1
                    .extend(synset.pointers.iter().map(|p| p.symbol.clone()));
            }
        }

        for (suffix, body) in data {
            fs::write(dir.join(format!("data.{suffix}")), body)?;
        }
        for pos in PartOfSpeech::LOOKUP_ORDER {
            let suffix = pos.file_suffix();
            let mut body = LICENSE_HEADER.to_string();
            for (lemma, (offsets, symbols)) in index.remove(suffix).unwrap_or_default() {
                let symbols: Vec<_> = symbols.into_iter().collect();
                let offsets: Vec<_> = offsets.iter().map(|o| format!("{o:08}")).collect();
                body.push_str(&format!(
                    "{lemma} {pos} {n} {p} {symbols}{sep}{n} 0 {offsets}  \n",
                    pos = pos.code(),
                    n = offsets.len(),
                    p = symbols.len(),
                    symbols = symbols.join(" "),
                    sep = if symbols.is_empty() { "" } else { " " },
                    offsets = offsets.join(" "),
                ));
            }
            fs::write(dir.join(format!("index.{suffix}")), body)?;
        }

        for pos in PartOfSpeech::LOOKUP_ORDER {
            let lines: Vec<String> = self
                .exceptions
                .iter()
                .filter(|(p, _, _)| *p == pos)
                .map(|(_, inflected, base)| format!("{inflected} {base}\n"))
                .collect();
            if !lines.is_empty() {
                fs::write(dir.join(format!("{}.exc", pos.file_suffix())), lines.concat())?;
            }
        }

        Ok(())
    }

    /// Write into a fresh temporary directory.
    pub fn build(&self) -> io::Result<tempfile::TempDir> {
        let dir = tempfile::tempdir()?;
        self.write(dir.path())?;
        Ok(dir)
    }
}

/// A handful of related nouns, verbs, adjectives and adverbs around "dog", "run" and "happy".
pub fn sample_wordnet() -> FixtureBuilder {
    use PartOfSpeech::*;

    let mut b = FixtureBuilder::new();

    b.synset(
        "dog.n.01",
        Noun,
        &["dog", "domestic_dog", "Canis_familiaris"],
        "a member of the genus Canis; \"the dog barked all night\"",
    )
    .pointer("@", "canine.n.01")
    .pointer("~", "puppy.n.01")
    .pointer("#m", "canis.n.01")
    .pointer("%p", "flag.n.07");
    b.synset(
        "dog.n.02",
        Noun,
        &["frump", "dog"],
        "a dull unattractive unpleasant girl or woman; \"she got a reputation as a frump\"; \"she's a real dog\"",
    );
    b.synset(
        "canine.n.01",
        Noun,
        &["canine", "canid"],
        "any of various fissiped mammals with nonretractile claws",
    )
    .pointer("~", "dog.n.01")
    .lexical_pointer("\\", "canine.a.01", 1, 1);
    b.synset("puppy.n.01", Noun, &["puppy"], "a young dog")
        .pointer("@", "dog.n.01");
    b.synset("canis.n.01", Noun, &["Canis", "genus_Canis"], "type genus of the Canidae")
        .pointer("%m", "dog.n.01");
    b.synset(
        "flag.n.07",
        Noun,
        &["flag"],
        "a conspicuously marked or shaped tail",
    )
    .pointer("#p", "dog.n.01");
    b.synset(
        "happiness.n.01",
        Noun,
        &["happiness", "felicity"],
        "state of well-being characterized by emotions ranging from contentment to intense joy",
    )
    .lexical_pointer("+", "happy.a.01", 1, 1);
    b.synset(
        "runner.n.01",
        Noun,
        &["runner"],
        "someone who travels on foot by running",
    )
    .lexical_pointer("+", "run.v.01", 1, 1);

    b.synset(
        "run.v.01",
        Verb,
        &["run"],
        "move fast by using one's feet; \"Don't run--you'll be late\"",
    )
    .pointer("@", "travel_rapidly.v.01")
    .lexical_pointer("+", "runner.n.01", 1, 1)
    .frame(2, 0)
    .frame(22, 1);
    b.synset(
        "travel_rapidly.v.01",
        Verb,
        &["travel_rapidly", "speed", "hurry", "zip"],
        "move fast",
    )
    .pointer("~", "run.v.01")
    .frame(2, 0);

    b.synset(
        "happy.a.01",
        Adjective,
        &["happy"],
        "enjoying or showing or marked by joy or pleasure; \"a happy smile\"; \"spent many happy days on the beach\"",
    )
    .lexical_pointer("!", "unhappy.a.01", 1, 1)
    .pointer("&", "felicitous.s.01")
    .lexical_pointer("+", "happiness.n.01", 1, 1);
    b.synset(
        "unhappy.a.01",
        Adjective,
        &["unhappy"],
        "experiencing or marked by or causing sadness or sorrow or discontent",
    )
    .lexical_pointer("!", "happy.a.01", 1, 1);
    b.synset(
        "felicitous.s.01",
        AdjectiveSatellite,
        &["felicitous", "happy"],
        "exhibiting an agreeable appropriateness and pertinence; \"a happy turn of phrase\"",
    )
    .pointer("&", "happy.a.01");
    b.synset(
        "canine.a.01",
        Adjective,
        &["canine"],
        "of or relating to or characteristic of members of the family Canidae",
    )
    .lexical_pointer("\\", "canine.n.01", 1, 1);

    b.synset(
        "happily.r.01",
        Adverb,
        &["happily"],
        "in a joyous manner; \"they shouted happily\"",
    )
    .lexical_pointer("\\", "happy.a.01", 1, 1);

    b.exception(Verb, "ran", "run");
    b.exception(Adjective, "happier", "happy");
    b
}
