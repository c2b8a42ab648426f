//! Generic product construction (§4.5.8): states are reachable pairs,
//! common symbols are found via a universal synchronized iterator, and a
//! pair is final according to a caller-supplied predicate. `intersection`
//! is the product with "both sides final" as that predicate.
//!
//! Bookkeeping switches from a dense `N_l × N_r` matrix to a
//! vector-of-hashmaps once the matrix would exceed `MAX_PRODUCT_MATRIX_SIZE`
//! cells, per §4.5.8; both representations must and do yield identical
//! results since they only differ in how `(lhs_state, rhs_state) → new
//! state` is looked up.

use std::collections::HashMap;

use log::{debug, trace};

use crate::nfa::automaton::Nfa;
use crate::sync_iter::SynchronizedUniversalIterator;
use crate::State;

const MAX_PRODUCT_MATRIX_SIZE: usize = 50_000_000;

enum ProductStorage {
    Matrix { cells: Vec<Option<State>>, rhs_states: usize },
    Map(HashMap<(State, State), State>),
}

impl ProductStorage {
    fn new(n_l: usize, n_r: usize) -> Self {
        match n_l.checked_mul(n_r) {
            Some(cells) if cells <= MAX_PRODUCT_MATRIX_SIZE => ProductStorage::Matrix {
                cells: vec![None; cells],
                rhs_states: n_r,
            },
            _ => ProductStorage::Map(HashMap::new()),
        }
    }

    fn lookup(&self, sl: State, sr: State) -> Option<State> {
        match self {
            ProductStorage::Matrix { cells, rhs_states } => {
                cells[sl as usize * rhs_states + sr as usize]
            }
            ProductStorage::Map(m) => m.get(&(sl, sr)).copied(),
        }
    }

    /// Returns `(state, was_freshly_created)`.
    fn get_or_insert(&mut self, result: &mut Nfa, sl: State, sr: State) -> (State, bool) {
        match self {
            ProductStorage::Matrix { cells, rhs_states } => {
                let idx = sl as usize * *rhs_states + sr as usize;
                if let Some(s) = cells[idx] {
                    (s, false)
                } else {
                    let s = result.add_state();
                    cells[idx] = Some(s);
                    (s, true)
                }
            }
            ProductStorage::Map(m) => {
                if let Some(&s) = m.get(&(sl, sr)) {
                    (s, false)
                } else {
                    let s = result.add_state();
                    m.insert((sl, sr), s);
                    (s, true)
                }
            }
        }
    }

    fn into_entries(self) -> Vec<((State, State), State)> {
        match self {
            ProductStorage::Matrix { cells, rhs_states } => cells
                .into_iter()
                .enumerate()
                .filter_map(|(idx, cell)| {
                    cell.map(|s| ((idx as State / rhs_states as State, idx as State % rhs_states as State), s))
                })
                .collect(),
            ProductStorage::Map(m) => m.into_iter().collect(),
        }
    }
}

/// Builds the product of `lhs` and `rhs`; a pair `(sl, sr)` is final iff
/// `final_condition(sl, sr)`. `prod_map`, if given, is populated with
/// every `(lhs_state, rhs_state) → product_state` correspondence found.
pub fn product<F>(
    lhs: &Nfa,
    rhs: &Nfa,
    final_condition: F,
    prod_map: Option<&mut HashMap<(State, State), State>>,
) -> Nfa
where
    F: Fn(State, State) -> bool,
{
    let mut result = Nfa::new();
    let mut storage = ProductStorage::new(lhs.num_of_states(), rhs.num_of_states());
    let mut worklist: Vec<(State, State)> = Vec::new();

    trace!(
        "product: {} lhs states x {} rhs states",
        lhs.num_of_states(),
        rhs.num_of_states()
    );

    for &sl in lhs.initial.iter() {
        for &sr in rhs.initial.iter() {
            let (s, fresh) = storage.get_or_insert(&mut result, sl, sr);
            result.initial.insert(s);
            if fresh {
                worklist.push((sl, sr));
            }
        }
    }

    let mut idx = 0;
    while idx < worklist.len() {
        let (sl, sr) = worklist[idx];
        idx += 1;
        let s = storage
            .lookup(sl, sr)
            .expect("worklist entries are always pre-registered in storage");
        trace!(
            "product: popped pair ({}, {}) -> state {} ({}/{} processed)",
            sl,
            sr,
            s,
            idx,
            worklist.len()
        );

        if final_condition(sl, sr) {
            result.final_states.insert(s);
        }

        let sp_l = lhs.delta.state_post(sl);
        let sp_r = rhs.delta.state_post(sr);
        let mut sync: SynchronizedUniversalIterator<_> = SynchronizedUniversalIterator::new();
        sync.push_back(sp_l.as_slice());
        sync.push_back(sp_r.as_slice());

        while sync.advance() {
            let symbol = sync.current().symbol;
            let l_targets = &sp_l.find(symbol).expect("symbol came from lhs's own post").targets;
            let r_targets = &sp_r.find(symbol).expect("universal agreement implies rhs also has it").targets;

            for &tl in l_targets.iter() {
                for &tr in r_targets.iter() {
                    let (ts, fresh) = storage.get_or_insert(&mut result, tl, tr);
                    if fresh {
                        worklist.push((tl, tr));
                    }
                    result.add_transition(s, symbol, ts);
                }
            }
        }
    }

    debug!(
        "product: done, {} pairs explored -> {} result states",
        worklist.len(),
        result.num_of_states()
    );

    if let Some(map) = prod_map {
        for (pair, state) in storage.into_entries() {
            map.insert(pair, state);
        }
    }

    result
}

impl Nfa {
    /// `L(intersection(lhs, rhs)) = L(lhs) ∩ L(rhs)`.
    pub fn intersection(
        lhs: &Nfa,
        rhs: &Nfa,
        prod_map: Option<&mut HashMap<(State, State), State>>,
    ) -> Nfa {
        if lhs.initial.is_empty()
            || lhs.final_states.is_empty()
            || rhs.initial.is_empty()
            || rhs.final_states.is_empty()
        {
            return Nfa::new();
        }
        product(
            lhs,
            rhs,
            |sl, sr| lhs.is_final(sl) && rhs.is_final(sr),
            prod_map,
        )
    }
}
