//! Epsilon removal (§4.5.7): least-fixpoint epsilon closure, then rebuild
//! non-epsilon transitions from every state through its closure.

use std::collections::HashSet;

use crate::nfa::automaton::Nfa;
use crate::{State, Symbol};

impl Nfa {
    /// Removes `epsilon`-labelled transitions, folding their effect into
    /// direct non-epsilon transitions and final-state membership.
    pub fn remove_epsilon(&self, epsilon: Symbol) -> Nfa {
        let n = self.num_of_states();
        let mut closure: Vec<HashSet<State>> = (0..n)
            .map(|s| {
                let mut set = HashSet::new();
                set.insert(s as State);
                set
            })
            .collect();

        let mut changed = true;
        while changed {
            changed = false;
            for s in 0..n as State {
                let eps_targets: Vec<State> = self
                    .delta
                    .state_post(s)
                    .find(epsilon)
                    .map(|sp| sp.targets.iter().copied().collect())
                    .unwrap_or_default();
                for t in eps_targets {
                    let additions: Vec<State> = closure[t as usize].iter().copied().collect();
                    for a in additions {
                        if closure[s as usize].insert(a) {
                            changed = true;
                        }
                    }
                }
            }
        }

        let mut result = Nfa::with_capacity(n);
        result.initial = self.initial.clone();
        for s in 0..n as State {
            if closure[s as usize].iter().any(|&c| self.is_final(c)) {
                result.final_states.insert(s);
            }
            for &c in &closure[s as usize] {
                for sp in self.delta.state_post(c).iter() {
                    if sp.symbol == epsilon {
                        continue;
                    }
                    for &t in sp.targets.iter() {
                        result.add_transition(s, sp.symbol, t);
                    }
                }
            }
        }
        result
    }
}
