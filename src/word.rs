use once_cell::sync::OnceCell;

use crate::fingerprint::Fingerprintable;
use crate::tagger::{HeuristicTagger, Tagger};
use crate::types::Fingerprint;

///A single word as stored in the index. Normalization is naive ascii
///folding plus downcasing and can lose meaningful information, so the raw
///spelling is kept alongside the normalized form. Immutable once built.
#[derive(Debug, Clone)]
pub struct Word {
    ///The original spelling, verbatim
    pub raw: String,

    ///The ascii-folded, lowercased comparison form
    pub normalized: String,

    proper_noun: bool,

    fingerprint: OnceCell<Fingerprint>,
}

impl Word {
    ///Construct a word, classifying it with the built-in proper-noun heuristic
    pub fn new(raw: &str) -> Word {
        Word::with_tagger(raw, &HeuristicTagger)
    }

    ///Construct a word, classifying it with the supplied tagger. The word
    ///counts as a proper noun only when the tagger's top candidate equals
    ///the normalized form case-insensitively.
    pub fn with_tagger(raw: &str, tagger: &dyn Tagger) -> Word {
        let folded = raw.ascii_fold();
        let normalized = folded.to_lowercase();
        let proper_noun = match tagger.best_proper_noun(&folded) {
            Some(candidate) => candidate.to_lowercase() == normalized,
            None => false,
        };
        Word {
            raw: raw.to_string(),
            normalized,
            proper_noun,
            fingerprint: OnceCell::new(),
        }
    }

    ///The anagram fingerprint, a pure function of the normalized form.
    ///Computed on first use and cached for the lifetime of the word.
    pub fn fingerprint(&self) -> &Fingerprint {
        self.fingerprint
            .get_or_init(|| self.normalized.fingerprint())
    }

    ///Whether the classifier considered this word a proper noun
    pub fn is_proper_noun(&self) -> bool {
        self.proper_noun
    }
}

//Identity is the (normalized, raw) pairing; the fingerprint cache does
//not take part in it.
impl PartialEq for Word {
    fn eq(&self, other: &Word) -> bool {
        self.normalized == other.normalized && self.raw == other.raw
    }
}

impl Eq for Word {}
