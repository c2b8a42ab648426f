//! Level-aware product (§4.6.2). Generalizes [`crate::nfa::product::product`]
//! to synchronize two tracked automata by level rather than lock-step, and
//! to cross `DONT_CARE` wildcards against concrete symbols.
//!
//! Two states only ever synchronize (match symbols against each other) when
//! they sit at the same level; otherwise the side with the numerically
//! smaller level advances alone, carrying the other side's state unchanged.
//! A level of `0` means "just wrapped back to the first track" and is
//! therefore treated as larger than every other (non-zero) level when
//! comparing — see [`effective_level`].

use std::collections::HashMap;

use log::trace;

use crate::nft::transducer::Nft;
use crate::sync_iter::SynchronizedUniversalIterator;
use crate::{Error, Level, State, DONT_CARE};

/// Maps level `0` ("just wrapped") to the maximum so it always compares as
/// the largest, per §4.6.2's asymmetry rule.
fn effective_level(level: Level) -> usize {
    if level == 0 {
        usize::MAX
    } else {
        level as usize
    }
}

enum ProductStorage {
    Matrix {
        cells: Vec<Option<State>>,
        rhs_states: usize,
    },
    Map(HashMap<(State, State), State>),
}

const MAX_PRODUCT_MATRIX_SIZE: usize = 50_000_000;

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

    fn get_or_insert(&mut self, result: &mut Nft, sl: State, sr: State, level: Level) -> (State, bool) {
        match self {
            ProductStorage::Matrix { cells, rhs_states } => {
                let idx = sl as usize * *rhs_states + sr as usize;
                if let Some(s) = cells[idx] {
                    (s, false)
                } else {
                    let s = result.add_state_with_level(level);
                    cells[idx] = Some(s);
                    (s, true)
                }
            }
            ProductStorage::Map(m) => {
                if let Some(&s) = m.get(&(sl, sr)) {
                    (s, false)
                } else {
                    let s = result.add_state_with_level(level);
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
                    cell.map(|s| {
                        (
                            (idx as State / rhs_states as State, idx as State % rhs_states as State),
                            s,
                        )
                    })
                })
                .collect(),
            ProductStorage::Map(m) => m.into_iter().collect(),
        }
    }
}

/// Two optional thresholds on the *original* (pre-auxiliary) state count of
/// each side; a pair whose both components are at or past their threshold
/// is never materialized. Composition uses this to stop the product from
/// reconnecting already-spent self-loop/level-insertion auxiliary states.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductCutoffs {
    pub lhs: Option<usize>,
    pub rhs: Option<usize>,
}

impl ProductCutoffs {
    fn suppresses(&self, sl: State, sr: State) -> bool {
        let l_over = self.lhs.map(|c| sl as usize >= c).unwrap_or(false);
        let r_over = self.rhs.map(|c| sr as usize >= c).unwrap_or(false);
        l_over && r_over
    }
}

fn new_level(lv_l: Level, lv_r: Level) -> Level {
    let m = effective_level(lv_l).min(effective_level(lv_r));
    if m == usize::MAX {
        0
    } else {
        m as Level
    }
}

/// Builds the level-aware product of `lhs` and `rhs`. Requires
/// `lhs.num_of_levels == rhs.num_of_levels`.
pub fn product<F>(
    lhs: &Nft,
    rhs: &Nft,
    final_condition: F,
    cutoffs: ProductCutoffs,
    prod_map: Option<&mut HashMap<(State, State), State>>,
) -> Result<Nft, Error>
where
    F: Fn(State, State) -> bool,
{
    if lhs.num_of_levels != rhs.num_of_levels {
        return Err(Error::LevelMismatch {
            lhs: lhs.num_of_levels,
            rhs: rhs.num_of_levels,
        });
    }
    let num_of_levels = lhs.num_of_levels;

    let mut result = Nft::with_num_of_levels(num_of_levels);
    let mut storage = ProductStorage::new(lhs.num_of_states(), rhs.num_of_states());
    let mut worklist: Vec<(State, State)> = Vec::new();

    let add_pair = |storage: &mut ProductStorage,
                        result: &mut Nft,
                        worklist: &mut Vec<(State, State)>,
                        sl: State,
                        sr: State|
     -> Option<State> {
        if cutoffs.suppresses(sl, sr) {
            return None;
        }
        let level = new_level(lhs.level(sl), rhs.level(sr));
        let (s, fresh) = storage.get_or_insert(result, sl, sr, level);
        if fresh {
            worklist.push((sl, sr));
        }
        Some(s)
    };

    for &sl in lhs.initial.iter() {
        for &sr in rhs.initial.iter() {
            if let Some(s) = add_pair(&mut storage, &mut result, &mut worklist, sl, sr) {
                result.initial.insert(s);
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
            "level-aware product: popped pair ({}, {}) -> state {} ({}/{} processed)",
            sl,
            sr,
            s,
            idx,
            worklist.len()
        );

        if final_condition(sl, sr) {
            result.final_states.insert(s);
        }

        let lv_l = lhs.level(sl);
        let lv_r = rhs.level(sr);
        let eff_l = effective_level(lv_l);
        let eff_r = effective_level(lv_r);

        if eff_l == eff_r {
            let sp_l = lhs.delta.state_post(sl);
            let sp_r = rhs.delta.state_post(sr);

            let mut sync: SynchronizedUniversalIterator<_> = SynchronizedUniversalIterator::new();
            sync.push_back(sp_l.as_slice());
            sync.push_back(sp_r.as_slice());
            while sync.advance() {
                let symbol = sync.current().symbol;
                let l_targets = &sp_l.find(symbol).expect("came from lhs's own post").targets;
                let r_targets = &sp_r.find(symbol).expect("universal agreement implies rhs has it too").targets;
                for &tl in l_targets.iter() {
                    for &tr in r_targets.iter() {
                        if let Some(ts) = add_pair(&mut storage, &mut result, &mut worklist, tl, tr) {
                            result.add_transition(s, symbol, ts);
                        }
                    }
                }
            }

            if let Some(dc_l) = sp_l.find(DONT_CARE) {
                for sp in sp_r.iter() {
                    if sp.symbol == DONT_CARE {
                        continue;
                    }
                    for &tl in dc_l.targets.iter() {
                        for &tr in sp.targets.iter() {
                            if let Some(ts) = add_pair(&mut storage, &mut result, &mut worklist, tl, tr) {
                                result.add_transition(s, sp.symbol, ts);
                            }
                        }
                    }
                }
            }
            if let Some(dc_r) = sp_r.find(DONT_CARE) {
                for sp in sp_l.iter() {
                    if sp.symbol == DONT_CARE {
                        continue;
                    }
                    for &tl in sp.targets.iter() {
                        for &tr in dc_r.targets.iter() {
                            if let Some(ts) = add_pair(&mut storage, &mut result, &mut worklist, tl, tr) {
                                result.add_transition(s, sp.symbol, ts);
                            }
                        }
                    }
                }
            }
        } else if eff_l < eff_r {
            for sp in lhs.delta.state_post(sl).iter() {
                for &tl in sp.targets.iter() {
                    if let Some(ts) = add_pair(&mut storage, &mut result, &mut worklist, tl, sr) {
                        result.add_transition(s, sp.symbol, ts);
                    }
                }
            }
        } else {
            for sp in rhs.delta.state_post(sr).iter() {
                for &tr in sp.targets.iter() {
                    if let Some(ts) = add_pair(&mut storage, &mut result, &mut worklist, sl, tr) {
                        result.add_transition(s, sp.symbol, ts);
                    }
                }
            }
        }
    }

    if let Some(map) = prod_map {
        for (pair, state) in storage.into_entries() {
            map.insert(pair, state);
        }
    }

    Ok(result)
}

impl Nft {
    pub fn intersection(
        lhs: &Nft,
        rhs: &Nft,
        prod_map: Option<&mut HashMap<(State, State), State>>,
    ) -> Result<Nft, Error> {
        if lhs.initial.is_empty()
            || lhs.final_states.is_empty()
            || rhs.initial.is_empty()
            || rhs.final_states.is_empty()
        {
            return Ok(Nft::with_num_of_levels(lhs.num_of_levels.max(rhs.num_of_levels)));
        }
        product(
            lhs,
            rhs,
            |sl, sr| lhs.is_final(sl) && rhs.is_final(sr),
            ProductCutoffs::default(),
            prod_map,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::JumpMode;

    fn identity_on(symbols: &[u32]) -> Nft {
        let mut t = Nft::with_num_of_levels(2);
        let s = t.add_state();
        t.initial.insert(s);
        t.final_states.insert(s);
        for &sym in symbols {
            t.insert_identity(s, sym, JumpMode::AppendDontCares).unwrap();
        }
        t
    }

    #[test]
    fn product_of_identity_transducers_is_their_intersection() {
        let a = identity_on(&[1, 2]);
        let b = identity_on(&[2, 3]);
        let p = Nft::intersection(&a, &b, None).unwrap();
        assert!(p.is_lang_empty().is_some());
    }

    #[test]
    fn rejects_mismatched_level_counts() {
        let a = Nft::with_num_of_levels(2);
        let b = Nft::with_num_of_levels(3);
        assert!(Nft::intersection(&a, &b, None).is_err());
    }

    #[test]
    fn dont_care_crosses_with_concrete_symbol() {
        let mut a = Nft::with_num_of_levels(1);
        let s0 = a.add_state();
        let s1 = a.add_state();
        a.initial.insert(s0);
        a.final_states.insert(s1);
        a.add_transition(s0, crate::DONT_CARE, s1);

        let mut b = Nft::with_num_of_levels(1);
        let t0 = b.add_state();
        let t1 = b.add_state();
        b.initial.insert(t0);
        b.final_states.insert(t1);
        b.add_transition(t0, 42, t1);

        let p = product(&a, &b, |sl, sr| a.is_final(sl) && b.is_final(sr), ProductCutoffs::default(), None)
            .unwrap();
        assert!(p.is_lang_empty().is_none());
    }
}
