// WHY: single linear pass over the text reporting all occurrences of all patterns
// Matches come out in non-decreasing end order; ties follow the state's output order

use std::str::CharIndices;

use super::{Automaton, PatternId, StateId};

/// One pattern occurrence; `start..end` are byte offsets into the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match {
    pattern: PatternId,
    start: usize,
    end: usize,
}

impl Match {
    pub fn pattern(&self) -> PatternId {
        self.pattern
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Exclusive end offset
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Lazy overlapping match iterator, see [`Automaton::find_iter`]
pub struct FindIter<'a, 'h> {
    automaton: &'a Automaton,
    chars: CharIndices<'h>,
    state: StateId,
    /// Byte offset just past the last character consumed
    end: usize,
    /// Next index into the current state's output
    pending: usize,
}

impl<'a, 'h> FindIter<'a, 'h> {
    pub(super) fn new(automaton: &'a Automaton, text: &'h str) -> Self {
        Self {
            automaton,
            chars: text.char_indices(),
            state: Automaton::ROOT,
            end: 0,
            pending: 0,
        }
    }
}

impl Iterator for FindIter<'_, '_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        loop {
            let output = self.automaton.state(self.state).output();
            if let Some(&pattern) = output.get(self.pending) {
                self.pending += 1;
                let len = self.automaton.pattern(pattern).len();
                return Some(Match {
                    pattern,
                    start: self.end - len,
                    end: self.end,
                });
            }

            let (offset, ch) = self.chars.next()?;
            self.state = self.automaton.next_state(self.state, ch);
            self.end = offset + ch.len_utf8();
            self.pending = 0;
        }
    }
}

/// Scan `text` once and collect every occurrence of every pattern
pub fn scan(automaton: &Automaton, text: &str) -> Vec<Match> {
    automaton.find_iter(text).collect()
}
