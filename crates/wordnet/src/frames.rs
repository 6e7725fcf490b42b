//! Generic verb frame sentences, indexed by the `f_num` of a data-file frame entry.

const FRAMES: [&str; 40] = [
    "",
    "Something %s",
    "Somebody %s",
    "It is %sing",
    "Something is %sing PP",
    "Something %s something Adjective/Noun",
    "Something %s Adjective/Noun",
    "Somebody %s Adjective",
    "Somebody %s something",
    "Somebody %s somebody",
    "Something %s somebody",
    "Something %s something",
    "Something %s to somebody",
    "Somebody %s on something",
    "Somebody %s somebody something",
    "Somebody %s something to somebody",
    "Somebody %s something from somebody",
    "Somebody %s somebody with something",
    "Somebody %s somebody of something",
    "Somebody %s something on somebody",
    "Somebody %s somebody PP",
    "Somebody %s something PP",
    "Somebody %s PP",
    "Somebody's (body part) %s",
    "Somebody %s somebody to INFINITIVE",
    "Somebody %s somebody INFINITIVE",
    "Somebody %s that CLAUSE",
    "Somebody %s to somebody",
    "Somebody %s to INFINITIVE",
    "Somebody %s whether INFINITIVE",
    "Somebody %s somebody into V-ing something",
    "Somebody %s something with something",
    "Somebody %s INFINITIVE",
    "Somebody %s VERB-ing",
    "It %s that CLAUSE",
    "Something %s INFINITIVE",
    "Somebody %s at something",
    "Somebody %s for something",
    "Somebody %s on somebody",
    "Somebody %s out of somebody",
];

/// Frame sentence for `number` with `lemma` filled in, or `None` for an unknown frame.
pub fn frame_sentence(number: usize, lemma: &str) -> Option<String> {
    if number == 0 {
        return None;
    }
    FRAMES
        .get(number)
        .map(|template| template.replacen("%s", lemma, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_lemma_into_template() {
        assert_eq!(frame_sentence(2, "run").as_deref(), Some("Somebody run"));
        assert_eq!(frame_sentence(3, "rain").as_deref(), Some("It is raining"));
        assert_eq!(
            frame_sentence(8, "take_in").as_deref(),
            Some("Somebody take_in something")
        );
    }

    #[test]
    fn rejects_out_of_range_frames() {
        assert_eq!(frame_sentence(0, "run"), None);
        assert_eq!(frame_sentence(40, "run"), None);
    }
}
