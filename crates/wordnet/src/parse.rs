//! Line parsers for the `index.*`, `data.*` and `*.exc` database files.

use crate::error::{Result, WordNetError};
use crate::types::PartOfSpeech;
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)""#).expect("quoted regex"));
static QUOTED_LAZY: Lazy<Regex> = Lazy::new(|| Regex::new(r#"".*?""#).expect("quoted regex"));

/// License and header lines in every database file start with a space.
pub fn is_header(line: &str) -> bool {
    line.starts_with(' ') || line.trim().is_empty()
}

/// One `index.*` line: lemma -> synset offsets for a single part of speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub offsets: Vec<u64>,
}

pub fn parse_index_line(file: &str, line: &str) -> Result<IndexEntry> {
    let mut tokens = line.split_whitespace();
    let bad = |reason: &str| WordNetError::parse(file, 0, format!("{reason} in index line '{line}'"));

    let lemma = tokens.next().ok_or_else(|| bad("missing lemma"))?;
    let pos = PartOfSpeech::from_code(tokens.next().ok_or_else(|| bad("missing pos"))?)?;
    let synset_cnt: usize = dec(tokens.next()).ok_or_else(|| bad("bad synset_cnt"))?;
    let p_cnt: usize = dec(tokens.next()).ok_or_else(|| bad("bad p_cnt"))?;
    for _ in 0..p_cnt {
        tokens.next().ok_or_else(|| bad("truncated pointer list"))?;
    }
    // sense_cnt and tagsense_cnt
    tokens.next().ok_or_else(|| bad("missing sense_cnt"))?;
    tokens.next().ok_or_else(|| bad("missing tagsense_cnt"))?;

    let offsets = (0..synset_cnt)
        .map(|_| dec::<u64>(tokens.next()).ok_or_else(|| bad("bad synset offset")))
        .collect::<Result<Vec<_>>>()?;

    Ok(IndexEntry {
        lemma: lemma.to_string(),
        pos,
        offsets,
    })
}

/// One `*.exc` line: inflected form followed by its base forms.
pub fn parse_exception_line(line: &str) -> Option<(String, Vec<String>)> {
    let mut tokens = line.split_whitespace();
    let inflected = tokens.next()?;
    let bases: Vec<String> = tokens.map(str::to_string).collect();
    if bases.is_empty() {
        return None;
    }
    Some((inflected.to_string(), bases))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWord {
    pub name: String,
    pub lex_id: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPointer {
    pub symbol: String,
    pub offset: u64,
    pub pos: PartOfSpeech,
    /// 1-based lemma numbers; both zero for a sense-level pointer.
    pub source: usize,
    pub target: usize,
}

impl RawPointer {
    pub fn is_lexical(&self) -> bool {
        self.source != 0 || self.target != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub number: usize,
    /// 1-based lemma number; zero applies to every lemma of the sense.
    pub word: usize,
}

/// One `data.*` record before pointer targets are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSynset {
    pub offset: u64,
    pub lex_filenum: u8,
    pub pos: PartOfSpeech,
    pub words: Vec<RawWord>,
    pub pointers: Vec<RawPointer>,
    pub frames: Vec<RawFrame>,
    pub definition: String,
    pub examples: Vec<String>,
}

pub fn parse_data_line(file: &str, offset: u64, line: &str) -> Result<RawSynset> {
    let bad = |reason: &str| WordNetError::parse(file, offset, reason.to_string());

    let (columns, gloss) = match line.split_once('|') {
        Some((columns, gloss)) => (columns, gloss),
        None => (line, ""),
    };
    let mut tokens = columns.split_whitespace();

    let stored_offset: u64 = dec(tokens.next()).ok_or_else(|| bad("bad offset"))?;
    if stored_offset != offset {
        return Err(bad(&format!("record claims offset {stored_offset}")));
    }
    let lex_filenum: u8 = dec(tokens.next()).ok_or_else(|| bad("bad lex_filenum"))?;
    let pos = PartOfSpeech::from_code(tokens.next().ok_or_else(|| bad("missing ss_type"))?)?;

    let w_cnt = hex(tokens.next()).ok_or_else(|| bad("bad w_cnt"))?;
    let mut words = Vec::with_capacity(w_cnt);
    for _ in 0..w_cnt {
        let word = tokens.next().ok_or_else(|| bad("truncated word list"))?;
        let lex_id = hex(tokens.next())
            .and_then(|id| u8::try_from(id).ok())
            .ok_or_else(|| bad("bad lex_id"))?;
        words.push(RawWord {
            name: strip_adjective_marker(word).to_string(),
            lex_id,
        });
    }

    let p_cnt: usize = dec(tokens.next()).ok_or_else(|| bad("bad p_cnt"))?;
    let mut pointers = Vec::with_capacity(p_cnt);
    for _ in 0..p_cnt {
        let symbol = tokens.next().ok_or_else(|| bad("truncated pointer list"))?;
        let target_offset: u64 =
            dec(tokens.next()).ok_or_else(|| bad("bad pointer offset"))?;
        let target_pos =
            PartOfSpeech::from_code(tokens.next().ok_or_else(|| bad("missing pointer pos"))?)?;
        let source_target = tokens
            .next()
            .filter(|st| st.len() == 4 && st.is_ascii())
            .ok_or_else(|| bad("bad pointer source/target"))?;
        let source = usize::from_str_radix(&source_target[..2], 16)
            .map_err(|_| bad("bad pointer source"))?;
        let target = usize::from_str_radix(&source_target[2..], 16)
            .map_err(|_| bad("bad pointer target"))?;
        pointers.push(RawPointer {
            symbol: symbol.to_string(),
            offset: target_offset,
            pos: target_pos,
            source,
            target,
        });
    }

    let mut frames = Vec::new();
    if let Some(f_cnt) = tokens.next() {
        let f_cnt: usize = f_cnt.parse().map_err(|_| bad("bad f_cnt"))?;
        for _ in 0..f_cnt {
            if tokens.next() != Some("+") {
                return Err(bad("frame entry without '+'"));
            }
            let number: usize =
                dec(tokens.next()).ok_or_else(|| bad("bad frame number"))?;
            let word = hex(tokens.next()).ok_or_else(|| bad("bad frame word number"))?;
            frames.push(RawFrame { number, word });
        }
    }

    let (definition, examples) = split_gloss(gloss);

    Ok(RawSynset {
        offset,
        lex_filenum,
        pos,
        words,
        pointers,
        frames,
        definition,
        examples,
    })
}

/// Split a gloss into its definition and quoted example sentences.
pub fn split_gloss(gloss: &str) -> (String, Vec<String>) {
    let examples = QUOTED
        .captures_iter(gloss)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect();
    let stripped = QUOTED_LAZY.replace_all(gloss, "");
    let definition = stripped
        .trim()
        .trim_matches(|c| c == ';' || c == ' ')
        .to_string();
    (definition, examples)
}

/// `happy(a)` -> `happy`; adjective position markers are not part of the lemma.
fn strip_adjective_marker(word: &str) -> &str {
    match word.find('(') {
        Some(idx) if word.ends_with(')') => &word[..idx],
        _ => word,
    }
}

fn dec<T: FromStr>(token: Option<&str>) -> Option<T> {
    token?.parse().ok()
}

fn hex(token: Option<&str>) -> Option<usize> {
    usize::from_str_radix(token?, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_index_line_skipping_pointer_symbols() {
        let entry = parse_index_line(
            "index.adj",
            "happy a 4 5 ! & + = ^ 4 4 01148283 02565583 01048406 01265594  ",
        )
        .unwrap();
        assert_eq!(entry.lemma, "happy");
        assert_eq!(entry.pos, PartOfSpeech::Adjective);
        assert_eq!(entry.offsets, vec![1148283, 2565583, 1048406, 1265594]);
    }

    #[test]
    fn rejects_truncated_index_line() {
        assert!(parse_index_line("index.noun", "dog n 2 0 2 2 02084071").is_err());
    }

    #[test]
    fn parses_verb_record_with_frames_and_lexical_pointers() {
        let line = "00000010 38 v 02 run 0 scat 1 002 @ 00000099 v 0000 + 00000200 n 0101 02 + 02 00 + 22 02 | move fast; \"Don't run--you'll slip\"  ";
        let raw = parse_data_line("data.verb", 10, line).unwrap();
        assert_eq!(raw.pos, PartOfSpeech::Verb);
        assert_eq!(raw.lex_filenum, 38);
        assert_eq!(
            raw.words,
            vec![
                RawWord { name: "run".into(), lex_id: 0 },
                RawWord { name: "scat".into(), lex_id: 1 },
            ]
        );
        assert_eq!(raw.pointers.len(), 2);
        assert!(!raw.pointers[0].is_lexical());
        assert_eq!((raw.pointers[1].source, raw.pointers[1].target), (1, 1));
        assert_eq!(
            raw.frames,
            vec![RawFrame { number: 2, word: 0 }, RawFrame { number: 22, word: 2 }]
        );
        assert_eq!(raw.definition, "move fast");
        assert_eq!(raw.examples, vec!["Don't run--you'll slip"]);
    }

    #[test]
    fn strips_adjective_markers_from_words() {
        let line = "00000000 00 a 01 galore(ip) 0 000 | in abundance";
        let raw = parse_data_line("data.adj", 0, line).unwrap();
        assert_eq!(raw.words[0].name, "galore");
    }

    #[test]
    fn offset_mismatch_is_a_parse_error() {
        let line = "00000042 00 n 01 dog 0 000 | a dog";
        let err = parse_data_line("data.noun", 0, line).unwrap_err();
        assert!(err.to_string().contains("data.noun"));
    }

    #[test]
    fn gloss_splits_definition_from_examples() {
        let (definition, examples) =
            split_gloss(" enjoying joy; \"a happy smile\"; \"a happy marriage\"  ");
        assert_eq!(definition, "enjoying joy");
        assert_eq!(examples, vec!["a happy smile", "a happy marriage"]);
    }

    #[test]
    fn exception_lines_need_a_base_form() {
        assert_eq!(
            parse_exception_line("geese goose"),
            Some(("geese".to_string(), vec!["goose".to_string()]))
        );
        assert_eq!(parse_exception_line("lonely"), None);
    }
}
