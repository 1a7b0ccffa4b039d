// WHY: Centralized stop-word handling for phrase extraction
// Phrases are built only from content words, so stop-words must be recognized cheaply

use std::collections::HashSet;

/// Standard English stop-word list (lowercase, apostrophes removed to match normalized text)
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "youre", "youve",
    "youll", "youd", "your", "yours", "yourself", "yourselves", "he", "him", "his",
    "himself", "she", "shes", "her", "hers", "herself", "it", "its", "itself", "they",
    "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
    "that", "thatll", "these", "those", "am", "is", "are", "was", "were", "be", "been",
    "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off",
    "over", "under", "again", "further", "then", "once", "here", "there", "when", "where",
    "why", "how", "all", "any", "both", "each", "few", "more", "most", "other", "some",
    "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s",
    "t", "can", "will", "just", "don", "dont", "should", "shouldve", "now", "d", "ll",
    "m", "o", "re", "ve", "y", "ain", "aren", "arent", "couldn", "couldnt", "didn",
    "didnt", "doesn", "doesnt", "hadn", "hadnt", "hasn", "hasnt", "haven", "havent",
    "isn", "isnt", "ma", "mightn", "mightnt", "mustn", "mustnt", "needn", "neednt",
    "shan", "shant", "shouldn", "shouldnt", "wasn", "wasnt", "weren", "werent", "won",
    "wont", "wouldn", "wouldnt",
];

/// Efficient stop-word lookup using HashSet for O(1) performance
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<&'static str>,
}

impl StopWords {
    /// Create stop-word lookup with the default English list
    pub fn english() -> Self {
        Self {
            words: ENGLISH_STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Check if a lowercase word is a stop-word
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Check if a word carries content: not a stop-word and longer than two characters
    pub fn is_content_word(&self, word: &str) -> bool {
        word.chars().count() > 2 && !self.is_stop_word(word)
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}
