//! Classical complement (§4.5.4): determinize (or Brzozowski-minimize) →
//! complete with a fresh sink → swap final and non-final.

use crate::alphabet::Alphabet;
use crate::nfa::automaton::Nfa;
use crate::params::{ComplementParams, MinimizeParams};
use crate::{Error, State};

impl Nfa {
    pub fn complement(&self, alphabet: &dyn Alphabet, params: ComplementParams) -> Result<Nfa, Error> {
        let mut det = if params.minimize {
            self.minimize(MinimizeParams::default())
        } else {
            self.determinize(None)
        };
        det.make_complete(alphabet, None)?;

        let n = det.num_of_states();
        let old_final: std::collections::HashSet<State> =
            det.final_states.iter().copied().collect();
        det.final_states = crate::sparse_set::SparseSet::with_capacity(n);
        for s in 0..n as State {
            if !old_final.contains(&s) {
                det.final_states.insert(s);
            }
        }
        Ok(det)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::IntAlphabet;

    #[test]
    fn complement_of_empty_accepts_everything() {
        // spec.md §8 scenario 2
        let a = Nfa::new();
        let alphabet = IntAlphabet::from_range(2);
        let cmpl = a.complement(&alphabet, ComplementParams::default()).unwrap();

        let accepts = |aut: &Nfa, word: &[u32]| {
            let mut current: std::collections::HashSet<State> =
                aut.initial.iter().copied().collect();
            for &sym in word {
                let mut next = std::collections::HashSet::new();
                for &s in &current {
                    if let Some(sp) = aut.delta.state_post(s).find(sym) {
                        next.extend(sp.targets.iter().copied());
                    }
                }
                current = next;
            }
            current.iter().any(|s| aut.is_final(*s))
        };

        assert!(accepts(&cmpl, &[]));
        assert!(accepts(&cmpl, &[0]));
        assert!(accepts(&cmpl, &[1]));
        assert!(accepts(&cmpl, &[0, 0]));
        assert!(accepts(&cmpl, &[0, 1, 1, 0]));
    }

    #[test]
    fn double_complement_is_language_equivalent() {
        let mut a = Nfa::new();
        a.add_state();
        a.add_state();
        a.initial.insert(0);
        a.final_states.insert(1);
        a.add_transition(0, 0, 1);
        let alphabet = IntAlphabet::from_range(2);

        let cmpl = a.complement(&alphabet, ComplementParams::default()).unwrap();
        let cmpl2 = cmpl.complement(&alphabet, ComplementParams::default()).unwrap();

        assert_eq!(a.is_lang_empty().is_none(), cmpl2.is_lang_empty().is_none());
    }
}
