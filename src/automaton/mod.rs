// WHY: Aho-Corasick automaton compiled per detection call
// Arena of states addressed by index; trie edges, failure links and output sets

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::{debug, info};

use crate::error::InvariantViolation;

pub mod matcher;

pub use matcher::{scan, FindIter, Match};

/// Index of a state in the automaton arena
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct StateId(pub usize);

/// Index of a pattern in the automaton's sorted pattern table
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct PatternId(pub usize);

/// One automaton state
#[derive(Debug, Clone)]
pub struct State {
    transitions: BTreeMap<char, StateId>,
    /// `None` only for the root
    fail: Option<StateId>,
    /// Patterns recognized on reaching this state, own pattern first,
    /// then those inherited along the failure chain
    output: Vec<PatternId>,
    depth: usize,
}

impl State {
    fn new(depth: usize) -> Self {
        Self {
            transitions: BTreeMap::new(),
            fail: None,
            output: Vec::new(),
            depth,
        }
    }

    pub fn transitions(&self) -> &BTreeMap<char, StateId> {
        &self.transitions
    }

    pub fn fail(&self) -> Option<StateId> {
        self.fail
    }

    pub fn output(&self) -> &[PatternId] {
        &self.output
    }

    /// Length in characters of the prefix this state represents
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Multi-pattern matching automaton over a deduplicated pattern set
///
/// State 0 is the root (empty prefix). Trie edges form a tree rooted at 0,
/// every non-root state fails to a strictly shallower state, and each
/// state's output contains the output of its failure target.
#[derive(Debug, Clone)]
pub struct Automaton {
    states: Vec<State>,
    patterns: Vec<String>,
}

impl Automaton {
    pub const ROOT: StateId = StateId(0);

    /// Compile an automaton from patterns
    ///
    /// Duplicates collapse and empty strings are ignored; patterns are
    /// numbered in sorted order, so the result depends only on the set of
    /// distinct patterns.
    pub fn build<I, P>(patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let mut unique: BTreeSet<String> = patterns
            .into_iter()
            .map(|pattern| pattern.as_ref().to_owned())
            .collect();
        if unique.remove("") {
            debug!("Ignoring empty pattern");
        }

        let mut automaton = Self {
            states: vec![State::new(0)],
            patterns: unique.into_iter().collect(),
        };

        automaton.insert_patterns();
        automaton.link_failures();

        debug_assert_eq!(automaton.check_invariants(), Ok(()));
        info!(
            "Built automaton with {} states from {} patterns",
            automaton.states.len(),
            automaton.patterns.len()
        );
        automaton
    }

    /// Trie insertion; the terminal state of each pattern records its id
    fn insert_patterns(&mut self) {
        for index in 0..self.patterns.len() {
            let mut current = Self::ROOT;

            for ch in self.patterns[index].chars() {
                let existing = self.states[current.0].transitions.get(&ch).copied();
                current = match existing {
                    Some(next) => next,
                    None => {
                        let next = StateId(self.states.len());
                        let depth = self.states[current.0].depth + 1;
                        self.states.push(State::new(depth));
                        self.states[current.0].transitions.insert(ch, next);
                        next
                    }
                };
            }

            self.states[current.0].output.push(PatternId(index));
        }
    }

    /// Breadth-first failure links with output propagation
    fn link_failures(&mut self) {
        let mut queue = VecDeque::new();

        let root_children: Vec<StateId> = self.states[0].transitions.values().copied().collect();
        for child in root_children {
            self.states[child.0].fail = Some(Self::ROOT);
            queue.push_back(child);
        }

        while let Some(current) = queue.pop_front() {
            let edges: Vec<(char, StateId)> = self.states[current.0]
                .transitions
                .iter()
                .map(|(&ch, &child)| (ch, child))
                .collect();

            for (ch, child) in edges {
                queue.push_back(child);

                let mut fallback = self.failure(current);
                while fallback != Self::ROOT && !self.states[fallback.0].transitions.contains_key(&ch) {
                    fallback = self.failure(fallback);
                }
                let target = self.states[fallback.0]
                    .transitions
                    .get(&ch)
                    .copied()
                    .unwrap_or(Self::ROOT);

                // WHY: target is shallower than child, so BFS has already finished its output
                self.states[child.0].fail = Some(target);
                let inherited = self.states[target.0].output.clone();
                self.states[child.0].output.extend(inherited);
            }
        }
    }

    /// Failure link of a non-root state
    ///
    /// # Panics
    /// If the link is unresolved, which only a construction defect can cause.
    fn failure(&self, state: StateId) -> StateId {
        match self.states[state.0].fail {
            Some(target) => target,
            None => unreachable!("failure link unresolved for state {}", state.0),
        }
    }

    /// Transition taken when reading `ch` in state `current`, following failure links on mismatch
    pub fn next_state(&self, mut current: StateId, ch: char) -> StateId {
        loop {
            if let Some(&next) = self.states[current.0].transitions.get(&ch) {
                return next;
            }
            if current == Self::ROOT {
                return Self::ROOT;
            }
            current = self.failure(current);
        }
    }

    /// Lazily iterate over every occurrence of every pattern in `text`
    pub fn find_iter<'a, 'h>(&'a self, text: &'h str) -> FindIter<'a, 'h> {
        FindIter::new(self, text)
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.0]
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn pattern(&self, id: PatternId) -> &str {
        &self.patterns[id.0]
    }

    /// Distinct patterns, sorted; index equals `PatternId`
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Verify the structural invariants that construction guarantees
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let root = &self.states[0];
        if root.fail.is_some() {
            return Err(InvariantViolation::RootHasFailureLink);
        }
        if !root.output.is_empty() {
            return Err(InvariantViolation::RootHasOutput);
        }

        let mut incoming = vec![0usize; self.states.len()];
        for state in &self.states {
            for child in state.transitions.values() {
                incoming[child.0] += 1;
            }
        }
        if incoming[0] != 0 {
            return Err(InvariantViolation::NotATree { state: 0, incoming: incoming[0] });
        }

        for (index, state) in self.states.iter().enumerate().skip(1) {
            if incoming[index] != 1 {
                return Err(InvariantViolation::NotATree { state: index, incoming: incoming[index] });
            }

            let fail = state
                .fail
                .ok_or(InvariantViolation::MissingFailureLink { state: index })?;
            let target = &self.states[fail.0];
            if target.depth >= state.depth {
                return Err(InvariantViolation::FailureLinkTooDeep {
                    state: index,
                    depth: state.depth,
                    target: fail.0,
                    target_depth: target.depth,
                });
            }

            if let Some(missing) = target.output.iter().find(|id| !state.output.contains(id)) {
                return Err(InvariantViolation::OutputNotInherited {
                    state: index,
                    fail: fail.0,
                    pattern: missing.0,
                });
            }
        }

        Ok(())
    }
}
