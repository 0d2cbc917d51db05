
use crate::scoring::lexicon;
use crate::scoring::tokenizer::tokenize;

/// Words that flip the polarity of the token right after them.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "non", "cannot", "cant", "dont", "doesnt", "didnt", "isnt", "wasnt",
    "wont", "wouldnt", "shouldnt", "couldnt", "arent", "hasnt", "havent",
];

/// Stems left behind when the tokenizer splits an `n't` contraction ("don't" -> "don", "t").
const CONTRACTION_STEMS: &[&str] = &[
    "don", "doesn", "didn", "isn", "wasn", "weren", "won", "wouldn", "shouldn", "couldn",
    "aren", "hasn", "haven", "hadn", "can", "ain",
];

#[derive(Debug, Clone)]
pub struct SentimentReport {
    /// Sum of token weights.
    pub score: i32,
    /// `score / max(token_count, 1)`.
    pub comparative: f64,
    pub token_count: usize,
}

/// Lexicon sentiment over `text`.
pub fn analyze(text: &str) -> SentimentReport {
    let tokens = tokenize(text);

    let score = tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let w = lexicon::weight(token);
            if w != 0 && is_negated(&tokens, i) {
                -w
            } else {
                w
            }
        })
        .sum::<i32>();

    SentimentReport {
        score,
        comparative: score as f64 / tokens.len().max(1) as f64,
        token_count: tokens.len(),
    }
}

fn is_negated(tokens: &[String], i: usize) -> bool {
    let Some(prev) = i.checked_sub(1).map(|p| tokens[p].as_str()) else {
        return false;
    };
    if NEGATORS.contains(&prev) {
        return true;
    }
    prev == "t"
        && i >= 2
        && CONTRACTION_STEMS.contains(&tokens[i - 2].as_str())
}

/// Two-decimal rendering used on the wire.
pub fn format_comparative(comparative: f64) -> String {
    format!("{comparative:.2}")
}
