//! Simulation-based state reduction (§4.5.10): quotient by the symmetric
//! kernel of forward direct simulation, dropping per-symbol transitions
//! that are subsumed by a simulating sibling target.

use std::collections::{BTreeSet, HashMap};

use crate::nfa::automaton::Nfa;
use crate::params::{ReduceAlgorithm, ReduceParams};
use crate::{Error, State, Symbol};

impl Nfa {
    /// Reduces `self` to an equivalent (language-preserving) automaton
    /// with at most as many states, via `params.algorithm`.
    pub fn reduce(
        &self,
        state_renaming: Option<&mut HashMap<State, State>>,
        params: ReduceParams,
    ) -> Result<Nfa, Error> {
        match params.algorithm {
            ReduceAlgorithm::Simulation => Ok(self.reduce_by_simulation(state_renaming)),
            ReduceAlgorithm::Residual { .. } => Err(Error::InvalidParameter {
                key: "algorithm".to_string(),
                reason: "residual reduction is not implemented by this core".to_string(),
            }),
        }
    }

    pub fn reduce_by_simulation(&self, state_renaming: Option<&mut HashMap<State, State>>) -> Nfa {
        let n = self.num_of_states();
        if n == 0 {
            return Nfa::new();
        }
        let sim = self.compute_forward_simulation();

        // mutual simulation is an equivalence relation (sim is reflexive
        // and the fixpoint only removes pairs monotonically, so diagonal
        // entries stay true); every class has a well-defined least
        // representative.
        let mut rep = vec![0 as State; n];
        for q in 0..n {
            rep[q] = (0..n)
                .find(|&p| sim[q][p] && sim[p][q])
                .expect("simulation relation is reflexive") as State;
        }

        let distinct: Vec<State> = rep.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        let mut new_id: HashMap<State, State> = HashMap::new();
        for (i, &r) in distinct.iter().enumerate() {
            new_id.insert(r, i as State);
        }

        let mut result = Nfa::with_capacity(distinct.len());
        for _ in &distinct {
            result.add_state();
        }

        for &q in self.initial.iter() {
            result.initial.insert(new_id[&rep[q as usize]]);
        }
        for &r in &distinct {
            if self.is_final(r) {
                result.final_states.insert(new_id[&r]);
            }
        }

        for &r in &distinct {
            let members: Vec<State> = (0..n as State).filter(|&q| rep[q as usize] == r).collect();
            let mut targets: BTreeSet<(Symbol, State)> = BTreeSet::new();
            for &m in &members {
                for sp in self.delta.state_post(m).iter() {
                    for &t in sp.targets.iter() {
                        targets.insert((sp.symbol, rep[t as usize]));
                    }
                }
            }
            for &(a, s) in &targets {
                let subsumed = targets.iter().any(|&(a2, p)| {
                    a2 == a && p != s && sim[s as usize][p as usize]
                });
                if !subsumed {
                    result.add_transition(new_id[&r], a, new_id[&s]);
                }
            }
        }

        if let Some(map) = state_renaming {
            for (old, &r) in rep.iter().enumerate() {
                map.insert(old as State, new_id[&r]);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::IntAlphabet;
    use crate::nfa::inclusion;
    use crate::params::InclusionParams;

    #[test]
    fn reduce_merges_equivalent_states_and_preserves_language() {
        let mut a = Nfa::new();
        a.add_state();
        a.add_state();
        a.add_state();
        a.initial.insert(0);
        a.initial.insert(1);
        a.final_states.insert(2);
        a.add_transition(0, 7, 2);
        a.add_transition(1, 7, 2);

        let reduced = a.reduce(None, ReduceParams::default()).unwrap();
        assert!(reduced.num_of_states() <= a.num_of_states());

        let alphabet = IntAlphabet::from_range(8);
        assert!(inclusion::are_equivalent(&a, &reduced, &alphabet, InclusionParams::default()).unwrap());
    }

    #[test]
    fn residual_algorithm_is_not_supported() {
        let a = Nfa::new();
        let params = ReduceParams {
            algorithm: ReduceAlgorithm::Residual {
                reduce_after: true,
                direction: crate::params::ReductionDirection::Forward,
            },
        };
        assert!(a.reduce(None, params).is_err());
    }
}
