// WHY: one canonical form shared by source content and candidate text
// Offsets, lengths and coverage are only comparable when both sides pass through here

/// Punctuation kept by normalization; everything else that is not an ASCII
/// letter, digit or whitespace is dropped
pub const KEPT_PUNCTUATION: &[char] = &['.', ',', ';'];

/// Normalize text into its comparable form
///
/// Lowercases, collapses each whitespace run to a single space, then drops
/// every character other than ASCII letters, ASCII digits, spaces and `.`,
/// `,`, `;`, and finally trims both ends. Collapsing happens before dropping,
/// so `"a - b"` keeps both spaces as `"a  b"`. The output is pure ASCII, so
/// byte offsets into it are also character offsets.
pub fn normalize_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_text_into(text, &mut result);
    result
}

/// Normalize into supplied buffer to avoid allocation
/// WHY: sources are normalized one after another during pattern extraction
pub fn normalize_text_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    // Only consecutive whitespace forms a run; a dropped character ends it
    let mut in_whitespace = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            if !in_whitespace && !buffer.is_empty() {
                buffer.push(' ');
            }
            in_whitespace = true;
        } else {
            in_whitespace = false;
            if is_kept(ch) {
                buffer.push(ch);
            }
        }
    }

    let trimmed = buffer.trim_end_matches(' ').len();
    buffer.truncate(trimmed);
}

#[inline]
fn is_kept(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || KEPT_PUNCTUATION.contains(&ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text_basic() {
        let input = "The Cat SAT on the\nmat!";
        assert_eq!(normalize_text(input), "the cat sat on the mat");
    }

    #[test]
    fn test_normalize_text_keeps_sentence_punctuation() {
        let input = "First, second; third. Fourth?";
        assert_eq!(normalize_text(input), "first, second; third. fourth");
    }

    #[test]
    fn test_normalize_text_whitespace_collapse() {
        let input = "Multiple\n\n\nspaces\r\n\r\n   and\t\ttabs.";
        assert_eq!(normalize_text(input), "multiple spaces and tabs.");
    }

    #[test]
    fn test_normalize_text_collapses_before_dropping() {
        // Spaces on either side of a dropped character belong to separate runs
        assert_eq!(normalize_text("finite - automata"), "finite  automata");
        assert_eq!(normalize_text("Tom & Jerry run fast today"), "tom  jerry run fast today");
        assert_eq!(normalize_text("Tom & Jerry run fast today").len(), 25);
        assert_eq!(normalize_text("x \u{2014} y"), "x  y");
        assert_eq!(normalize_text("state-machine"), "statemachine");
    }

    #[test]
    fn test_normalize_text_trims() {
        assert_eq!(normalize_text("  Leading and trailing  "), "leading and trailing");
        assert_eq!(normalize_text(" ** quoted ** "), "quoted");
    }

    #[test]
    fn test_normalize_text_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   "), "");
        assert_eq!(normalize_text("!?#"), "");
    }

    #[test]
    fn test_normalize_text_drops_non_ascii_letters() {
        let input = "Café naïve 世界 🦀 ok";
        assert_eq!(normalize_text(input), "caf nave ok");
        assert!(normalize_text(input).is_ascii());
    }

    #[test]
    fn test_normalize_text_into_buffer_reuse() {
        let mut buffer = String::new();

        normalize_text_into("Line ONE.\nLine two.", &mut buffer);
        assert_eq!(buffer, "line one. line two.");

        normalize_text_into("Different\r\ncontent", &mut buffer);
        assert_eq!(buffer, "different content");
    }

    #[test]
    fn test_normalize_text_trims_after_dropping() {
        let once = normalize_text("  Finite Automata -- are (fundamental) models!  ");
        assert_eq!(once, "finite automata  are fundamental models");
        // A second pass collapses the gap the dropped dashes left
        assert_eq!(normalize_text(&once), "finite automata are fundamental models");
    }

    #[test]
    fn test_normalize_text_stable_on_normalized_words() {
        let once = normalize_text("Finite automata, in short; models.");
        assert_eq!(normalize_text(&once), once);
    }
}
