// Test fixtures with known source and candidate texts
// WHY: deterministic inputs with hand-checked overlap for end-to-end assertions

use verbatim::SourceEntry;

/// Candidate essay about finite automata
pub const AUTOMATA_ESSAY: &str = "Finite automata are fundamental computational models in computer science that \
process input strings through a series of states. These abstract machines \
consist of states, transitions, and acceptance criteria. They are particularly \
useful for pattern matching and lexical analysis in compiler design.";

/// Candidate with no overlap to the automata corpus
pub const UNRELATED_ESSAY: &str = "Bread dough rises when yeast ferments sugars into gas; \
knead gently, rest overnight, bake hot.";

/// Reference corpus: the first entry shares the essay's opening sentence verbatim
pub fn automata_corpus() -> Vec<SourceEntry> {
    vec![
        SourceEntry::new(
            "Finite-state machine",
            "Finite automata are fundamental computational models in computer science that \
             process input strings through a series of states.",
        ),
        SourceEntry::new(
            "Lexical analysis",
            "Lexical analysis converts a sequence of characters into a sequence of tokens \
             and is the first phase of compiler design.",
        ),
        SourceEntry::new("Stub", "Too short"),
    ]
}
