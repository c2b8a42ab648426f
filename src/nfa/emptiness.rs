//! Emptiness with counterexample extraction (§4.5.1). BFS from `initial`,
//! recording a parent map; reconstructs the path once a final state is
//! popped. `is_lang_empty` never errors — emptiness is a value.

use std::collections::HashMap;

use crate::nfa::automaton::Nfa;
use crate::run::{reconstruct_path, word_for_path, Run};
use crate::State;

impl Nfa {
    /// Returns `None` if the language is empty, `Some(run)` with a
    /// witnessing run otherwise.
    pub fn is_lang_empty(&self) -> Option<Run> {
        if self.initial.is_empty() {
            return None;
        }

        let mut parents: HashMap<State, State> = HashMap::new();
        let mut worklist: Vec<State> = Vec::new();
        for &s in self.initial.iter() {
            parents.entry(s).or_insert_with(|| {
                worklist.push(s);
                s
            });
        }

        let mut idx = 0;
        while idx < worklist.len() {
            let s = worklist[idx];
            idx += 1;
            if self.is_final(s) {
                let path = reconstruct_path(&parents, s);
                let word = word_for_path(&self.delta, &path).unwrap_or_default();
                return Some(Run::new(word, path));
            }
            for sp in self.delta.state_post(s).iter() {
                for &t in sp.targets.iter() {
                    parents.entry(t).or_insert_with(|| {
                        worklist.push(t);
                        s
                    });
                }
            }
        }
        None
    }

    pub fn accepts_empty_word(&self) -> bool {
        self.initial.iter().any(|&s| self.is_final(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_automaton_has_no_run() {
        let a = Nfa::new();
        assert!(a.is_lang_empty().is_none());
    }

    #[test]
    fn finds_shortest_witnessing_word() {
        let mut a = Nfa::new();
        a.add_state();
        a.add_state();
        a.initial.insert(0);
        a.final_states.insert(1);
        a.add_transition(0, 42, 1);
        let run = a.is_lang_empty().expect("language is non-empty");
        assert_eq!(run.word, vec![42]);
        assert_eq!(run.path, vec![0, 1]);
    }

    #[test]
    fn initial_final_state_accepts_empty_word() {
        let mut a = Nfa::new();
        a.add_state();
        a.initial.insert(0);
        a.final_states.insert(0);
        let run = a.is_lang_empty().unwrap();
        assert!(run.word.is_empty());
    }
}
