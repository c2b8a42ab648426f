//! Level insertion (§4.6.5): re-express an `Nft` over a longer level
//! system by splitting every transition into a chain of single-level
//! steps, filling the newly inserted positions with a placeholder symbol.

use std::collections::HashMap;

use crate::nft::transducer::Nft;
use crate::params::JumpMode;
use crate::{Level, State, Symbol, DONT_CARE};

/// `mask[i]` is `true` for a freshly inserted level, `false` for a level
/// carried over from `nft`'s own level system (in order). The number of
/// `false` entries must equal `nft.num_of_levels`.
pub fn insert_levels(nft: &Nft, mask: &[bool], default_symbol: Symbol, jump_mode: JumpMode) -> Nft {
    let new_num_of_levels = mask.len();
    let mut old_to_new = Vec::with_capacity(nft.num_of_levels);
    for (new_idx, &is_new) in mask.iter().enumerate() {
        if !is_new {
            old_to_new.push(new_idx as Level);
        }
    }
    debug_assert_eq!(old_to_new.len(), nft.num_of_levels);

    let mut result = nft.clone();
    result.num_of_levels = new_num_of_levels;
    for s in 0..nft.num_of_states() as State {
        let old_lvl = nft.level(s) as usize;
        result.levels.set(s, old_to_new[old_lvl]);
    }
    // rebuild the delta from scratch: every original transition gets
    // replaced by its (possibly multi-hop) expansion.
    result.delta = crate::delta::Delta::with_capacity(nft.num_of_states());

    let inserted_label = match jump_mode {
        JumpMode::RepeatSymbol => default_symbol,
        JumpMode::AppendDontCares => DONT_CARE,
    };

    // shares an intermediate state across transitions that enter the same
    // inserted level from the same predecessor with the same label.
    let mut shared: HashMap<(State, Level), State> = HashMap::new();
    let mut next_fresh = nft.num_of_states() as State;

    for t in nft.delta.transitions() {
        let src_new_lvl = old_to_new[nft.level(t.source) as usize] as usize;
        let tgt_new_lvl = old_to_new[nft.level(t.target) as usize] as usize;

        let mut current = t.source;
        let mut pos = src_new_lvl;
        loop {
            let next_pos = (pos + 1) % new_num_of_levels;
            if next_pos == tgt_new_lvl {
                result.add_transition(current, t.symbol, t.target);
                break;
            }
            let key = (current, next_pos as Level);
            let next_state = match shared.get(&key) {
                Some(&s) => s,
                None => {
                    let s = next_fresh;
                    next_fresh += 1;
                    shared.insert(key, s);
                    result.levels.set(s, next_pos as Level);
                    s
                }
            };
            result.add_transition(current, inserted_label, next_state);
            current = next_state;
            pos = next_pos;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_single_hop_transition_into_a_chain() {
        let mut nft = Nft::with_num_of_levels(2);
        let s0 = nft.add_state();
        let s1 = nft.add_state_with_level(1);
        nft.add_transition(s0, 7, s1);

        // insert one fresh level between level 0 and level 1.
        let mask = vec![false, true, false];
        let result = insert_levels(&nft, &mask, 0, JumpMode::AppendDontCares);

        assert_eq!(result.num_of_levels, 3);
        assert_eq!(result.num_of_states(), 3);
        let sp = result.delta.state_post(s0);
        let inner = *sp.find(DONT_CARE).unwrap().targets.iter().next().unwrap();
        assert_eq!(result.level(inner), 1);
        assert!(result.delta.contains(inner, 7, s1));
    }

    #[test]
    fn shares_inner_state_across_transitions_from_same_source() {
        let mut nft = Nft::with_num_of_levels(2);
        let s0 = nft.add_state();
        let s1 = nft.add_state_with_level(1);
        let s2 = nft.add_state_with_level(1);
        nft.add_transition(s0, 1, s1);
        nft.add_transition(s0, 2, s2);

        let mask = vec![false, true, false];
        let result = insert_levels(&nft, &mask, 0, JumpMode::AppendDontCares);
        // both transitions insert through the same (s0, level 1) gap.
        assert_eq!(result.num_of_states(), 4);
    }
}
