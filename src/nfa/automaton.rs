//! The `Nfa` struct: `(Delta, initial, final, alphabet)`, plus the small
//! operations every algorithm in this module leans on (`add_state`,
//! `trim`, `is_identical`, …).

use std::collections::HashMap;

use crate::delta::Delta;
use crate::ord_vector::OrdVector;
use crate::sparse_set::SparseSet;
use crate::{State, Symbol};

/// A nondeterministic finite automaton over finite words.
///
/// The alphabet is deliberately not stored here: per §5's shared-resource
/// policy it is a non-owning back-reference the caller threads through
/// individual operations (`complement`, `make_complete`, …) rather than a
/// field every automaton carries.
#[derive(Debug, Clone, Default)]
pub struct Nfa {
    pub delta: Delta,
    pub initial: SparseSet,
    pub final_states: SparseSet,
}

impl Nfa {
    pub fn new() -> Self {
        Nfa {
            delta: Delta::new(),
            initial: SparseSet::with_capacity(0),
            final_states: SparseSet::with_capacity(0),
        }
    }

    pub fn with_capacity(num_states: usize) -> Self {
        Nfa {
            delta: Delta::with_capacity(num_states),
            initial: SparseSet::with_capacity(num_states),
            final_states: SparseSet::with_capacity(num_states),
        }
    }

    /// The logical state count: the max of `delta`'s row count and the
    /// largest state referenced by `initial`/`final`.
    pub fn num_of_states(&self) -> usize {
        let mut n = self.delta.num_states();
        for &s in self.initial.iter().chain(self.final_states.iter()) {
            n = n.max(s as usize + 1);
        }
        n
    }

    /// Appends a fresh state and returns its id.
    pub fn add_state(&mut self) -> State {
        let id = self.num_of_states() as State;
        self.delta.mutable_state_post(id);
        id
    }

    pub fn add_transition(&mut self, source: State, symbol: Symbol, target: State) {
        self.delta.add(source, symbol, target);
    }

    pub fn is_final(&self, state: State) -> bool {
        self.final_states.contains(state)
    }

    pub fn is_initial(&self, state: State) -> bool {
        self.initial.contains(state)
    }

    pub fn clear(&mut self) {
        self.delta = Delta::new();
        self.initial.clear();
        self.final_states.clear();
    }

    pub fn get_used_symbols(&self) -> OrdVector<Symbol> {
        self.delta.get_used_symbols()
    }

    /// Reachability from `initial` (forward BFS).
    pub fn reachable_states(&self) -> Vec<bool> {
        let n = self.num_of_states();
        let mut seen = vec![false; n];
        let mut worklist: Vec<State> = Vec::new();
        for &s in self.initial.iter() {
            if !seen[s as usize] {
                seen[s as usize] = true;
                worklist.push(s);
            }
        }
        while let Some(s) = worklist.pop() {
            for sp in self.delta.state_post(s).iter() {
                for &t in sp.targets.iter() {
                    if !seen[t as usize] {
                        seen[t as usize] = true;
                        worklist.push(t);
                    }
                }
            }
        }
        seen
    }

    /// Co-reachability to `final_states` (BFS over reversed edges).
    pub fn coreachable_states(&self) -> Vec<bool> {
        let n = self.num_of_states();
        let mut reversed_edges: Vec<Vec<State>> = vec![Vec::new(); n];
        for t in self.delta.transitions() {
            reversed_edges[t.target as usize].push(t.source);
        }
        let mut seen = vec![false; n];
        let mut worklist: Vec<State> = Vec::new();
        for &s in self.final_states.iter() {
            if !seen[s as usize] {
                seen[s as usize] = true;
                worklist.push(s);
            }
        }
        while let Some(s) = worklist.pop() {
            for &p in &reversed_edges[s as usize] {
                if !seen[p as usize] {
                    seen[p as usize] = true;
                    worklist.push(p);
                }
            }
        }
        seen
    }

    /// Removes every state that is not both reachable and co-reachable,
    /// renumbering the survivors to a dense `0..k` range.
    pub fn trim(&mut self) {
        let n = self.num_of_states();
        let reachable = self.reachable_states();
        let coreachable = self.coreachable_states();
        let useful: Vec<bool> = (0..n).map(|s| reachable[s] && coreachable[s]).collect();

        let mut rename = vec![0 as State; n];
        let mut next = 0 as State;
        for s in 0..n {
            if useful[s] {
                rename[s] = next;
                next += 1;
            }
        }

        self.delta.defragment(&useful, &rename);

        let old_initial: Vec<State> = self.initial.iter().copied().collect();
        let old_final: Vec<State> = self.final_states.iter().copied().collect();
        self.initial = SparseSet::with_capacity(next as usize);
        self.final_states = SparseSet::with_capacity(next as usize);
        for s in old_initial {
            if useful[s as usize] {
                self.initial.insert(rename[s as usize]);
            }
        }
        for s in old_final {
            if useful[s as usize] {
                self.final_states.insert(rename[s as usize]);
            }
        }
    }

    /// Exact structural equality: same transitions, same initial/final
    /// sets. Not language equivalence.
    pub fn is_identical(&self, other: &Nfa) -> bool {
        if self.num_of_states() != other.num_of_states() {
            return false;
        }
        let mut self_initial: Vec<State> = self.initial.iter().copied().collect();
        let mut other_initial: Vec<State> = other.initial.iter().copied().collect();
        self_initial.sort();
        other_initial.sort();
        if self_initial != other_initial {
            return false;
        }
        let mut self_final: Vec<State> = self.final_states.iter().copied().collect();
        let mut other_final: Vec<State> = other.final_states.iter().copied().collect();
        self_final.sort();
        other_final.sort();
        if self_final != other_final {
            return false;
        }
        let self_ts: Vec<_> = self
            .delta
            .transitions()
            .map(|t| (t.source, t.symbol, t.target))
            .collect();
        let other_ts: Vec<_> = other
            .delta
            .transitions()
            .map(|t| (t.source, t.symbol, t.target))
            .collect();
        self_ts == other_ts
    }

    /// A product-map-friendly helper: build a fresh `Nfa` over `n` states
    /// with no transitions/initial/final set yet.
    pub fn blank(n: usize) -> Nfa {
        Nfa::with_capacity(n)
    }

    /// Maps every `(state, alphabet symbol used)` pair, for use by
    /// completion.
    pub fn used_symbols_per_state(&self) -> HashMap<State, OrdVector<Symbol>> {
        let mut out = HashMap::new();
        for s in 0..self.num_of_states() as State {
            out.insert(s, self.delta.state_post(s).used_symbols());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_state_chain() -> Nfa {
        let mut a = Nfa::new();
        a.add_state();
        a.add_state();
        a.initial.insert(0);
        a.final_states.insert(1);
        a.add_transition(0, 1, 1);
        a
    }

    #[test]
    fn num_of_states_tracks_largest_referenced() {
        let a = two_state_chain();
        assert_eq!(a.num_of_states(), 2);
    }

    #[test]
    fn trim_removes_unreachable_and_noncoreachable_states() {
        let mut a = two_state_chain();
        let dead = a.add_state();
        a.add_transition(dead, 1, dead);
        assert_eq!(a.num_of_states(), 3);
        a.trim();
        assert_eq!(a.num_of_states(), 2);
        assert!(a.is_initial(0));
        assert!(a.is_final(1));
    }

    #[test]
    fn is_identical_requires_same_structure() {
        let a = two_state_chain();
        let b = two_state_chain();
        assert!(a.is_identical(&b));
        let mut c = two_state_chain();
        c.add_transition(0, 2, 1);
        assert!(!a.is_identical(&c));
    }
}
