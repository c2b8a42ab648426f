//! Forward direct simulation (§4.5.11): build an LTS from `self`'s
//! transitions plus a self-loop on a fresh symbol at every final state (so
//! finals can never be simulated by non-finals), then compute the
//! greatest-fixpoint simulation preorder `q ≼ p` — `q` can be simulated by
//! `p` iff every labelled step `q` can take, `p` can match with a step
//! into a pair that is itself still related.

use crate::nfa::automaton::Nfa;
use crate::{State, Symbol};

/// `relation[q][p]` is `true` iff `q ≼ p` (`q` is simulated by `p`).
pub type SimulationRelation = Vec<Vec<bool>>;

impl Nfa {
    pub fn compute_forward_simulation(&self) -> SimulationRelation {
        let n = self.num_of_states();
        if n == 0 {
            return Vec::new();
        }

        let max_symbol = self
            .delta
            .transitions()
            .map(|t| t.symbol)
            .filter(|&s| s != crate::EPSILON)
            .max()
            .unwrap_or(0);
        let fresh_symbol: Symbol = max_symbol + 1;

        let mut lts: Vec<Vec<(Symbol, State)>> = vec![Vec::new(); n];
        for t in self.delta.transitions() {
            lts[t.source as usize].push((t.symbol, t.target));
        }
        for &f in self.final_states.iter() {
            lts[f as usize].push((fresh_symbol, f));
        }

        let mut related = vec![vec![true; n]; n];
        let mut changed = true;
        while changed {
            changed = false;
            for q in 0..n {
                for p in 0..n {
                    if !related[q][p] {
                        continue;
                    }
                    let still_simulates = lts[q].iter().all(|&(a, q_next)| {
                        lts[p]
                            .iter()
                            .any(|&(b, p_next)| b == a && related[q_next as usize][p_next as usize])
                    });
                    if !still_simulates {
                        related[q][p] = false;
                        changed = true;
                    }
                }
            }
        }
        related
    }
}
