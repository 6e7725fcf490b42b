//! Base-form reduction ("morphy"): exception lists first, then suffix detachment.

use crate::types::PartOfSpeech;
use std::collections::{HashMap, HashSet};

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJECTIVE_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

fn rules(pos: PartOfSpeech) -> &'static [(&'static str, &'static str)] {
    match pos.storage() {
        PartOfSpeech::Noun => NOUN_RULES,
        PartOfSpeech::Verb => VERB_RULES,
        PartOfSpeech::Adjective => ADJECTIVE_RULES,
        _ => &[],
    }
}

fn detach(forms: &[String], pos: PartOfSpeech) -> Vec<String> {
    forms
        .iter()
        .flat_map(|form| {
            rules(pos).iter().filter_map(move |(suffix, ending)| {
                form.strip_suffix(suffix)
                    .map(|stem| format!("{stem}{ending}"))
            })
        })
        .collect()
}

/// Irregular inflections from a `*.exc` file: inflected form -> base forms.
pub type ExceptionMap = HashMap<String, Vec<String>>;

/// Candidate base forms of `word` for `pos` that `is_known` accepts, in discovery order.
///
/// `word` is expected to be lower-cased already.
pub fn base_forms<F>(
    word: &str,
    pos: PartOfSpeech,
    exceptions: &ExceptionMap,
    is_known: F,
) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let keep_known = |forms: Vec<String>| {
        let mut seen = HashSet::new();
        forms
            .into_iter()
            .filter(|f| is_known(f) && seen.insert(f.clone()))
            .collect::<Vec<_>>()
    };

    if let Some(bases) = exceptions.get(word) {
        let mut forms = vec![word.to_string()];
        forms.extend(bases.iter().cloned());
        return keep_known(forms);
    }

    let mut forms = detach(&[word.to_string()], pos);
    let mut first = vec![word.to_string()];
    first.extend(forms.iter().cloned());
    let found = keep_known(first);
    if !found.is_empty() {
        return found;
    }

    // Every rule shortens or keeps length, and empty stems never match a rule twice.
    while !forms.is_empty() {
        forms = detach(&forms, pos);
        let found = keep_known(forms.clone());
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}
