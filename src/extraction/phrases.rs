// WHY: word-level pattern extraction over normalized text
// Uses regex-automata meta regexes for sentence and word boundaries

use regex_automata::meta::{BuildError, Regex};
use std::collections::BTreeSet;

use super::stopwords::StopWords;

/// Sentence and word boundary detection for normalized text
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Sentence terminator: `.` or `;` followed by whitespace or end of text
    sentence_end: Regex,
    /// Word token: run of ASCII letters and digits
    word: Regex,
}

impl Tokenizer {
    pub fn new() -> Result<Self, BuildError> {
        Ok(Self {
            sentence_end: Regex::new(r"[.;]+(?:\s+|$)")?,
            word: Regex::new(r"[a-z0-9]+")?,
        })
    }

    /// Split normalized text into non-empty sentences
    pub fn sentences<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.sentence_end
            .split(text)
            .map(move |span| text[span.start..span.end].trim())
            .filter(|sentence| !sentence.is_empty())
    }

    /// Word tokens of normalized text in order
    pub fn words<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.word.find_iter(text).map(move |m| &text[m.range()])
    }

    fn content_words<'a>(&'a self, text: &'a str, stop_words: &StopWords) -> Vec<&'a str> {
        self.words(text)
            .filter(|word| stop_words.is_content_word(word))
            .collect()
    }
}

/// Extract per-sentence phrases of `min_words..=max_words` content words
///
/// Stop-words and words of two characters or fewer are dropped before the
/// windows are formed; a phrase is kept when its joined form has at least
/// `min_chars` characters.
pub fn phrases(
    tokenizer: &Tokenizer,
    stop_words: &StopWords,
    text: &str,
    min_words: usize,
    max_words: usize,
    min_chars: usize,
) -> BTreeSet<String> {
    let mut result = BTreeSet::new();
    let min_words = min_words.max(1);

    for sentence in tokenizer.sentences(text) {
        let words = tokenizer.content_words(sentence, stop_words);
        let longest = max_words.min(words.len());

        for phrase_len in min_words..=longest {
            collect_windows(&words, phrase_len, min_chars, &mut result);
        }
    }

    result
}

/// Extract fixed windows of `window` content words across the whole text
pub fn sliding_window_phrases(
    tokenizer: &Tokenizer,
    stop_words: &StopWords,
    text: &str,
    window: usize,
    min_chars: usize,
) -> BTreeSet<String> {
    let mut result = BTreeSet::new();
    let words = tokenizer.content_words(text, stop_words);
    collect_windows(&words, window.max(1), min_chars, &mut result);
    result
}

fn collect_windows(words: &[&str], len: usize, min_chars: usize, out: &mut BTreeSet<String>) {
    for window in words.windows(len) {
        let phrase = window.join(" ");
        if phrase.chars().count() >= min_chars {
            out.insert(phrase);
        }
    }
}
