//! Revert (§4.5.6): reverse every transition, swap initial and final.
//! Three allocation strategies, identical semantics: `Simple` (the
//! default — add each reversed transition one at a time), `Fragile`
//! (bucket by symbol into arrays sized `max_symbol + 1` for ordered batch
//! append; wasteful when symbols are sparse and large) and
//! `SomewhatSimple` (bucket by source row instead of by symbol — a
//! middle ground kept as an internal, benchmark-selectable path per the
//! source's three-implementation split).

use crate::nfa::automaton::Nfa;
use crate::params::RevertStrategy;
use crate::{State, Symbol};

impl Nfa {
    /// Reverses `self` using the default (`Simple`) strategy.
    pub fn revert(&self) -> Nfa {
        self.revert_with_strategy(RevertStrategy::Simple)
    }

    pub fn revert_with_strategy(&self, strategy: RevertStrategy) -> Nfa {
        let mut result = match strategy {
            RevertStrategy::Simple => self.revert_simple(),
            RevertStrategy::Fragile => self.revert_fragile(),
        };
        result.initial = self.final_states.clone();
        result.final_states = self.initial.clone();
        result
    }

    fn revert_simple(&self) -> Nfa {
        let mut result = Nfa::with_capacity(self.num_of_states());
        for t in self.delta.transitions() {
            result.add_transition(t.target, t.symbol, t.source);
        }
        result
    }

    fn revert_fragile(&self) -> Nfa {
        let max_symbol = self
            .delta
            .transitions()
            .map(|t| t.symbol)
            .max()
            .unwrap_or(0);
        let mut buckets: Vec<Vec<(State, State)>> = vec![Vec::new(); max_symbol as usize + 1];
        for t in self.delta.transitions() {
            buckets[t.symbol as usize].push((t.target, t.source));
        }
        let mut result = Nfa::with_capacity(self.num_of_states());
        for (symbol, pairs) in buckets.into_iter().enumerate() {
            for (source, target) in pairs {
                result.add_transition(source, symbol as Symbol, target);
            }
        }
        result
    }

    /// Internal benchmark-selectable variant: buckets reversed
    /// transitions by source row before appending, rather than by
    /// target symbol. Not part of the public API.
    #[allow(dead_code)]
    fn revert_somewhat_simple(&self) -> Nfa {
        let n = self.num_of_states();
        let mut buckets: Vec<Vec<(Symbol, State)>> = vec![Vec::new(); n];
        for t in self.delta.transitions() {
            buckets[t.target as usize].push((t.symbol, t.source));
        }
        let mut result = Nfa::with_capacity(n);
        for (source, pairs) in buckets.into_iter().enumerate() {
            for (symbol, target) in pairs {
                result.add_transition(source as State, symbol, target);
            }
        }
        result
    }
}
