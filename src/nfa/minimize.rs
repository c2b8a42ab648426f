//! Brzozowski minimization (§4.5.5): `determinize(revert(determinize(revert(A))))`.

use crate::nfa::automaton::Nfa;
use crate::params::MinimizeParams;

impl Nfa {
    pub fn minimize(&self, _params: MinimizeParams) -> Nfa {
        self.revert().determinize(None).revert().determinize(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimize_is_language_preserving_and_deterministic() {
        let mut a = Nfa::new();
        a.add_state();
        a.add_state();
        a.add_state();
        a.initial.insert(0);
        a.initial.insert(1);
        a.final_states.insert(2);
        a.add_transition(0, 5, 2);
        a.add_transition(1, 5, 2);

        let min = a.minimize(MinimizeParams::default());
        assert_eq!(min.initial.len(), 1);
        assert_eq!(min.is_lang_empty().is_none(), a.is_lang_empty().is_none());
    }
}
