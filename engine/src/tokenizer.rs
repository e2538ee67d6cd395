use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\p{L}\p{N}_\s]").expect("valid regex");
}

/// Tokenize text into lowercase terms.
///
/// Every character that is not a letter, a number (including `²`, `½`, `①`),
/// an underscore or whitespace becomes a space, then the text is split on
/// whitespace. Combining marks and joiners therefore split words. Order and
/// duplicates are kept, since term frequencies are counted from the output.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .replace_all(&lowered, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Count occurrences of each term.
pub fn term_frequencies<S: AsRef<str>>(tokens: &[S]) -> BTreeMap<String, u32> {
    let mut tf: BTreeMap<String, u32> = BTreeMap::new();
    for token in tokens {
        *tf.entry(token.as_ref().to_string()).or_insert(0) += 1;
    }
    tf
}

/// Largest count in a frequency table, or 1 when the table is empty.
pub fn max_frequency(tf: &BTreeMap<String, u32>) -> u32 {
    tf.values().copied().max().unwrap_or(1)
}
