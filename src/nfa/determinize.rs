//! Subset-construction determinization (§4.5.2). Result states are
//! subsets of source states, keyed by a canonical sorted-and-deduplicated
//! vector; a worklist holds freshly minted subsets still needing their
//! outgoing transitions computed.

use std::collections::HashMap;

use log::{debug, trace};

use crate::nfa::automaton::Nfa;
use crate::sync_iter::SynchronizedExistentialIterator;
use crate::State;

fn canonical(mut subset: Vec<State>) -> Vec<State> {
    subset.sort_unstable();
    subset.dedup();
    subset
}

impl Nfa {
    /// Determinizes `self`. Epsilon transitions are treated as ordinary
    /// symbols — call `remove_epsilon` first if that's not the intent.
    /// `subset_map`, if given, is populated with every subset-to-state
    /// correspondence discovered (used downstream by `complement` to
    /// locate the sink).
    pub fn determinize(&self, mut subset_map: Option<&mut HashMap<Vec<State>, State>>) -> Nfa {
        let mut canon_map: HashMap<Vec<State>, State> = HashMap::new();
        let mut result = Nfa::new();
        let mut worklist: Vec<Vec<State>> = Vec::new();

        let initial_subset = canonical(self.initial.iter().copied().collect());
        let initial_state = result.add_state();
        result.initial.insert(initial_state);
        canon_map.insert(initial_subset.clone(), initial_state);
        worklist.push(initial_subset);

        trace!(
            "determinize: {} source states, seeding worklist with the initial subset",
            self.num_of_states()
        );

        let mut idx = 0;
        while idx < worklist.len() {
            let subset = worklist[idx].clone();
            idx += 1;
            let cur_state = canon_map[&subset];
            trace!(
                "determinize: popped subset {:?} -> state {} ({}/{} processed)",
                subset,
                cur_state,
                idx,
                worklist.len()
            );

            if subset.iter().any(|&s| self.is_final(s)) {
                result.final_states.insert(cur_state);
            }

            let state_posts: Vec<_> = subset
                .iter()
                .map(|&s| self.delta.state_post(s))
                .collect();
            let mut sync = SynchronizedExistentialIterator::new();
            for sp in &state_posts {
                sync.push_back(sp.as_slice());
            }

            while sync.advance() {
                let symbol = sync.current().symbol;
                let mut target_subset: Vec<State> = Vec::new();
                for symbol_post in sync.current_matches() {
                    target_subset.extend(symbol_post.targets.iter().copied());
                }
                let target_subset = canonical(target_subset);

                let target_state = match canon_map.get(&target_subset) {
                    Some(&s) => s,
                    None => {
                        let s = result.add_state();
                        canon_map.insert(target_subset.clone(), s);
                        worklist.push(target_subset.clone());
                        s
                    }
                };
                result.add_transition(cur_state, symbol, target_state);
            }
        }

        debug!(
            "determinize: done, {} source states -> {} subset states",
            self.num_of_states(),
            result.num_of_states()
        );
        if let Some(map) = subset_map.as_deref_mut() {
            map.extend(canon_map);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn determinizes_two_state_example() {
        // spec.md §8 scenario 1
        let mut a = Nfa::new();
        a.add_state();
        a.add_state();
        a.initial.insert(0);
        a.final_states.insert(1);
        a.add_transition(0, 7, 1);

        let mut subset_map = HashMap::new();
        let d = a.determinize(Some(&mut subset_map));

        assert_eq!(d.num_of_states(), 2);
        assert_eq!(d.initial.len(), 1);
        assert_eq!(d.final_states.len(), 1);
        assert_eq!(d.delta.num_of_transitions(), 1);
        assert_eq!(subset_map.len(), 2);
    }

    #[test]
    fn determinize_is_idempotent_on_language() {
        let mut a = Nfa::new();
        a.add_state();
        a.add_state();
        a.add_state();
        a.initial.insert(0);
        a.initial.insert(1);
        a.final_states.insert(2);
        a.add_transition(0, 1, 2);
        a.add_transition(1, 1, 2);

        let d = a.determinize(None);
        // nondeterministic merge of states 0 and 1 on symbol collapses
        // the two initial states into one subset.
        assert_eq!(d.initial.len(), 1);
        assert_eq!(d.is_lang_empty().is_none(), a.is_lang_empty().is_none());
    }
}
