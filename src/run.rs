//! `Word`/`Run` and the counterexample/path reconstruction shared by
//! emptiness, inclusion, and antichain exploration.

use crate::{State, Symbol};

pub type Word = Vec<Symbol>;

/// A word paired with the state sequence that produced it: `path.len() ==
/// word.len() + 1`, `path[0]` is the initial state the run started from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Run {
    pub word: Word,
    pub path: Vec<State>,
}

impl Run {
    pub fn new(word: Word, path: Vec<State>) -> Self {
        Run { word, path }
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

/// Walks a BFS parent map (`parents[s] == s` means `s` is a root/initial
/// state) from `target` back to its root, then reverses the path.
pub fn reconstruct_path(parents: &std::collections::HashMap<State, State>, target: State) -> Vec<State> {
    let mut path = vec![target];
    let mut cur = target;
    while parents[&cur] != cur {
        cur = parents[&cur];
        path.push(cur);
    }
    path.reverse();
    path
}

/// Given a state path, derives a word by picking, for every consecutive
/// pair, any symbol labelling a transition between them.
pub fn word_for_path(delta: &crate::delta::Delta, path: &[State]) -> Option<Word> {
    let mut word = Vec::with_capacity(path.len().saturating_sub(1));
    for pair in path.windows(2) {
        let (s, t) = (pair[0], pair[1]);
        let symbol = delta
            .state_post(s)
            .iter()
            .find(|sp| sp.targets.contains(&t))
            .map(|sp| sp.symbol)?;
        word.push(symbol);
    }
    Some(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn reconstructs_path_from_parent_map() {
        let mut parents = HashMap::new();
        parents.insert(0, 0);
        parents.insert(1, 0);
        parents.insert(2, 1);
        assert_eq!(reconstruct_path(&parents, 2), vec![0, 1, 2]);
    }

    #[test]
    fn derives_word_from_path() {
        let mut delta = crate::delta::Delta::new();
        delta.add(0, 7, 1);
        delta.add(1, 9, 2);
        assert_eq!(word_for_path(&delta, &[0, 1, 2]), Some(vec![7, 9]));
    }
}
