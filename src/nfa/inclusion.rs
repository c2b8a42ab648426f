//! Language inclusion (§4.5.9): naive (complement + intersect + empty) and
//! antichain-based forward exploration, plus the typed dispatcher and
//! `are_equivalent` built from two inclusion checks.

use log::{debug, trace};

use crate::alphabet::Alphabet;
use crate::nfa::automaton::Nfa;
use crate::nfa::product::product;
use crate::params::{ComplementParams, InclusionAlgorithm, InclusionParams};
use crate::run::Run;
use crate::{Error, State};

fn canonical(mut v: Vec<State>) -> Vec<State> {
    v.sort_unstable();
    v.dedup();
    v
}

fn is_subset(smaller: &[State], bigger: &[State]) -> bool {
    smaller.iter().all(|s| bigger.binary_search(s).is_ok())
}

/// Complementation + intersection + emptiness.
pub fn is_included_naive(
    smaller: &Nfa,
    bigger: &Nfa,
    alphabet: &dyn Alphabet,
) -> Result<Option<Run>, Error> {
    let bigger_cmpl = bigger.complement(alphabet, ComplementParams::default())?;
    let isect = product(
        smaller,
        &bigger_cmpl,
        |sl, sr| smaller.is_final(sl) && bigger_cmpl.is_final(sr),
        None,
    );
    Ok(isect.is_lang_empty())
}

/// Forward exploration over pairs `(q, S)`, `q ∈ smaller`, `S ⊆ bigger`,
/// pruned whenever a previously processed `(q, S')` has `S' ⊆ S`.
pub fn is_included_antichains(smaller: &Nfa, bigger: &Nfa) -> Option<Run> {
    let initial_bigger = canonical(bigger.initial.iter().copied().collect());

    let mut worklist: std::collections::VecDeque<(State, Vec<State>, Vec<u32>, Vec<State>)> =
        std::collections::VecDeque::new();
    let mut processed: Vec<(State, Vec<State>)> = Vec::new();

    for &q0 in smaller.initial.iter() {
        worklist.push_back((q0, initial_bigger.clone(), Vec::new(), vec![q0]));
    }

    while let Some((q, s, word, path)) = worklist.pop_front() {
        trace!(
            "antichain inclusion: popped ({}, {:?}), {} processed, {} queued",
            q,
            s,
            processed.len(),
            worklist.len()
        );
        if processed
            .iter()
            .any(|(pq, ps)| *pq == q && is_subset(ps, &s))
        {
            continue;
        }

        if smaller.is_final(q) && !s.iter().any(|t| bigger.is_final(*t)) {
            debug!(
                "antichain inclusion: counterexample found after {} processed pairs",
                processed.len()
            );
            return Some(Run::new(word, path));
        }
        processed.push((q, s.clone()));

        for symbol_post in smaller.delta.state_post(q).iter() {
            let a = symbol_post.symbol;
            for &q_next in symbol_post.targets.iter() {
                let mut s_next: Vec<State> = Vec::new();
                for &bs in &s {
                    if let Some(bsp) = bigger.delta.state_post(bs).find(a) {
                        s_next.extend(bsp.targets.iter().copied());
                    }
                }
                let s_next = canonical(s_next);
                let mut new_word = word.clone();
                new_word.push(a);
                let mut new_path = path.clone();
                new_path.push(q_next);
                worklist.push_back((q_next, s_next, new_word, new_path));
            }
        }
    }
    debug!(
        "antichain inclusion: exhausted worklist, {} pairs processed, no counterexample",
        processed.len()
    );
    None
}

/// Dispatches to the algorithm named in `params`. `None` means included;
/// `Some(run)` is a counterexample.
pub fn is_included(
    smaller: &Nfa,
    bigger: &Nfa,
    alphabet: &dyn Alphabet,
    params: InclusionParams,
) -> Result<Option<Run>, Error> {
    match params.algorithm {
        InclusionAlgorithm::Naive => is_included_naive(smaller, bigger, alphabet),
        InclusionAlgorithm::Antichains => Ok(is_included_antichains(smaller, bigger)),
    }
}

pub fn are_equivalent(
    lhs: &Nfa,
    rhs: &Nfa,
    alphabet: &dyn Alphabet,
    params: InclusionParams,
) -> Result<bool, Error> {
    Ok(is_included(lhs, rhs, alphabet, params)?.is_none()
        && is_included(rhs, lhs, alphabet, params)?.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::IntAlphabet;

    fn all_ab_star() -> Nfa {
        let mut a = Nfa::new();
        a.add_state();
        a.initial.insert(0);
        a.final_states.insert(0);
        a.add_transition(0, 0, 0);
        a.add_transition(0, 1, 0);
        a
    }

    fn short_prefix_automaton() -> Nfa {
        // ε + (a+b) + (a+b)(a+b)(a*+b*) — spec.md §8 scenario 4
        let mut a = Nfa::new();
        for _ in 0..5 {
            a.add_state();
        }
        a.initial.insert(0);
        a.final_states.insert(0); // ε
        a.final_states.insert(1); // single symbol
        a.final_states.insert(4); // length >= 3 but repeating
        a.add_transition(0, 0, 1);
        a.add_transition(0, 1, 1);
        a.add_transition(1, 0, 2);
        a.add_transition(1, 1, 2);
        a.add_transition(2, 0, 3);
        a.add_transition(2, 1, 4);
        a.add_transition(3, 0, 3);
        a.add_transition(4, 1, 4);
        a
    }

    #[test]
    fn naive_and_antichains_agree_on_true_inclusion() {
        let smaller = all_ab_star();
        let mut bigger = Nfa::new();
        bigger.add_state();
        bigger.initial.insert(0);
        bigger.final_states.insert(0);
        bigger.add_transition(0, 0, 0);
        bigger.add_transition(0, 1, 0);
        let alphabet = IntAlphabet::from_range(2);

        assert!(is_included_naive(&smaller, &bigger, &alphabet)
            .unwrap()
            .is_none());
        assert!(is_included_antichains(&smaller, &bigger).is_none());
    }

    #[test]
    fn antichains_finds_counterexample_for_short_prefix_language() {
        let smaller = all_ab_star();
        let bigger = short_prefix_automaton();
        let cex = is_included_antichains(&smaller, &bigger);
        assert!(cex.is_some());
        let run = cex.unwrap();
        assert!(run.word.len() >= 4);
    }

    #[test]
    fn equivalent_automata_are_mutually_included() {
        let a = all_ab_star();
        let b = all_ab_star();
        let alphabet = IntAlphabet::from_range(2);
        assert!(are_equivalent(&a, &b, &alphabet, InclusionParams::default()).unwrap());
    }
}
