//! AFINN-165 word weights, -5 (very negative) to +5 (very positive).
//!
//! The table lives in `data/afinn-165.tsv`, one `word<TAB>weight` per line.
//! Only single-token entries are kept: multi-word and hyphenated phrases can
//! never match the output of `tokenizer::tokenize`.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::warn;

const AFINN_165: &str = include_str!("../../data/afinn-165.tsv");

static LEXICON: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for line in AFINN_165.lines().filter(|l| !l.trim().is_empty()) {
        match parse_line(line) {
            Some((word, weight)) => {
                map.insert(word, weight);
            }
            None => warn!("skipping malformed lexicon line: {line:?}"),
        }
    }
    map
});

fn parse_line(line: &str) -> Option<(&str, i32)> {
    let (word, weight) = line.split_once('\t')?;
    Some((word.trim(), weight.trim().parse().ok()?))
}

/// Weight for a lower-case token; unknown words are neutral.
pub fn weight(token: &str) -> i32 {
    LEXICON.get(token).copied().unwrap_or(0)
}
