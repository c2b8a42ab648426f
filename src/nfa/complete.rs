//! Completion (§4.5.3): every reachable state gets an outgoing transition
//! for every alphabet symbol, routing anything missing to a sink.

use crate::alphabet::Alphabet;
use crate::nfa::automaton::Nfa;
use crate::{Error, State};

impl Nfa {
    /// Completes `self` against `alphabet`, using `sink` if given or
    /// minting and self-looping a fresh sink state otherwise. Idempotent:
    /// calling it again on an already-complete automaton is a no-op.
    /// Returns the sink state used.
    pub fn make_complete(
        &mut self,
        alphabet: &dyn Alphabet,
        sink: Option<State>,
    ) -> Result<State, Error> {
        let alphabet_symbols = alphabet.get_alphabet_symbols();
        for t in self.delta.transitions() {
            if !alphabet_symbols.contains(&t.symbol) {
                return Err(Error::AlphabetMismatch(t.symbol));
            }
        }

        let (sink_state, sink_is_fresh) = match sink {
            Some(s) => {
                if s as usize >= self.num_of_states() {
                    self.delta.mutable_state_post(s);
                }
                (s, false)
            }
            None => (self.add_state(), true),
        };

        let n = self.num_of_states();
        let mut seen = vec![false; n];
        let mut worklist: Vec<State> = Vec::new();
        for &s in self.initial.iter() {
            if !seen[s as usize] {
                seen[s as usize] = true;
                worklist.push(s);
            }
        }
        if sink_is_fresh && !seen[sink_state as usize] {
            seen[sink_state as usize] = true;
            worklist.push(sink_state);
        }

        let mut idx = 0;
        while idx < worklist.len() {
            let s = worklist[idx];
            idx += 1;

            let used = self.delta.state_post(s).used_symbols();
            for &sym in alphabet.get_complement(&used).iter() {
                self.add_transition(s, sym, sink_state);
            }

            for sp in self.delta.state_post(s).iter() {
                for &t in sp.targets.iter() {
                    if !seen[t as usize] {
                        seen[t as usize] = true;
                        worklist.push(t);
                    }
                }
            }
        }

        Ok(sink_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::IntAlphabet;

    #[test]
    fn completes_partial_automaton_with_fresh_sink() {
        let mut a = Nfa::new();
        a.add_state();
        a.initial.insert(0);
        a.final_states.insert(0);
        let alphabet = IntAlphabet::from_range(2);

        let sink = a.make_complete(&alphabet, None).unwrap();
        assert_eq!(a.delta.state_post(0).len(), 2);
        assert_eq!(a.delta.state_post(sink).len(), 2);
        for sym in [0, 1] {
            assert!(a.delta.contains(sink, sym, sink));
        }
    }

    #[test]
    fn is_idempotent() {
        let mut a = Nfa::new();
        a.add_state();
        a.initial.insert(0);
        let alphabet = IntAlphabet::from_range(3);
        let sink = a.make_complete(&alphabet, None).unwrap();
        let before = a.delta.num_of_transitions();
        a.make_complete(&alphabet, Some(sink)).unwrap();
        assert_eq!(a.delta.num_of_transitions(), before);
    }

    #[test]
    fn rejects_symbol_outside_alphabet() {
        let mut a = Nfa::new();
        a.add_state();
        a.add_state();
        a.add_transition(0, 5, 1);
        let alphabet = IntAlphabet::from_range(2);
        assert!(a.make_complete(&alphabet, None).is_err());
    }
}
