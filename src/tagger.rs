///A best-effort part-of-speech capability: given a stretch of text, name
///its top proper-noun candidate, if any. The index never depends on a
///particular tagging implementation; implementations must swallow their
///internal failures and answer None rather than propagate them.
pub trait Tagger {
    fn best_proper_noun(&self, text: &str) -> Option<String>;
}

///The built-in classifier. Returns the first word token with an ASCII
///uppercase initial and an alphabetic remainder, which is how capitalized
///unknown words end up tagged as proper nouns in practice. Crude on
///purpose, accuracy is not a correctness concern here.
pub struct HeuristicTagger;

impl Tagger for HeuristicTagger {
    fn best_proper_noun(&self, text: &str) -> Option<String> {
        for token in text.split(|c: char| !c.is_ascii_alphanumeric()) {
            let mut chars = token.chars();
            if let Some(first) = chars.next() {
                if first.is_ascii_uppercase() && chars.all(|c| c.is_ascii_alphabetic()) {
                    return Some(token.to_string());
                }
            }
        }
        None
    }
}
