//! Projection (§4.6.4): drop a subset of levels, collapsing each run of
//! transitions that steps only through vanishing levels into a single
//! jump transition landing on the next surviving level.

use std::collections::HashSet;

use crate::nft::transducer::Nft;
use crate::params::JumpMode;
use crate::{Error, Level, State, Symbol, DONT_CARE};

/// For state `s`, the set of `(first_symbol, surviving_state)` pairs
/// reachable by following zero or more transitions whose target sits on a
/// vanishing level, carrying the symbol of the first hop along the chain.
fn collapse_from(nft: &Nft, s: State, survive: &[bool]) -> Vec<(Symbol, State)> {
    let mut results = Vec::new();
    // Keyed by (first_symbol, cur): the same vanishing state can be
    // revisited under different first hops, and each must be allowed to
    // reach its own survivors rather than being pruned by an earlier
    // visit that arrived via a different symbol.
    let mut seen: HashSet<(Symbol, State)> = HashSet::new();
    let mut stack: Vec<(Symbol, State)> = Vec::new();
    for sp in nft.delta.state_post(s).iter() {
        for &t in sp.targets.iter() {
            stack.push((sp.symbol, t));
        }
    }
    while let Some((first_symbol, cur)) = stack.pop() {
        if survive[nft.level(cur) as usize] {
            results.push((first_symbol, cur));
            continue;
        }
        if !seen.insert((first_symbol, cur)) {
            continue;
        }
        for sp in nft.delta.state_post(cur).iter() {
            for &t in sp.targets.iter() {
                stack.push((first_symbol, t));
            }
        }
    }
    results
}

/// Removes `removed_levels` from `nft`'s level system. A multi-hop chain
/// through removed levels collapses to a single transition labelled
/// either with its first hop's symbol (`RepeatSymbol`) or `DONT_CARE`
/// (`AppendDontCares`). Unreachable/non-coaccessible states left behind
/// by the collapse are trimmed away.
pub fn project_out(nft: &Nft, removed_levels: &[Level], jump_mode: JumpMode) -> Result<Nft, Error> {
    if nft.num_of_levels == 0 || removed_levels.len() >= nft.num_of_levels {
        return Err(Error::EmptyInput);
    }
    let survive: Vec<bool> = (0..nft.num_of_levels)
        .map(|l| !removed_levels.contains(&(l as Level)))
        .collect();

    let mut new_level_of = vec![0 as Level; nft.num_of_levels];
    let mut next = 0 as Level;
    for l in 0..nft.num_of_levels {
        if survive[l] {
            new_level_of[l] = next;
            next += 1;
        }
    }
    let new_num_of_levels = next as usize;

    let n = nft.num_of_states();
    let mut result = Nft::with_num_of_levels(new_num_of_levels);
    for _ in 0..n {
        result.add_state();
    }
    for s in 0..n as State {
        let lvl = nft.level(s) as usize;
        if survive[lvl] {
            result.levels.set(s, new_level_of[lvl]);
        }
    }
    for &s in nft.initial.iter() {
        if survive[nft.level(s) as usize] {
            result.initial.insert(s);
        }
    }
    for &s in nft.final_states.iter() {
        if survive[nft.level(s) as usize] {
            result.final_states.insert(s);
        }
    }

    for s in 0..n as State {
        if !survive[nft.level(s) as usize] {
            continue;
        }
        for (symbol, target) in collapse_from(nft, s, &survive) {
            let label = match jump_mode {
                JumpMode::RepeatSymbol => symbol,
                JumpMode::AppendDontCares => DONT_CARE,
            };
            result.add_transition(s, label, target);
        }
    }

    result.trim();
    Ok(result)
}

/// The dual of [`project_out`]: keeps `kept_levels`, drops everything
/// else.
pub fn project_to(nft: &Nft, kept_levels: &[Level], jump_mode: JumpMode) -> Result<Nft, Error> {
    let removed: Vec<Level> = (0..nft.num_of_levels as Level)
        .filter(|l| !kept_levels.contains(l))
        .collect();
    project_out(nft, &removed, jump_mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projecting_out_a_level_collapses_the_chain() {
        let mut nft = Nft::with_num_of_levels(3);
        let s0 = nft.add_state();
        let s1 = nft.add_state_with_level(1);
        let s2 = nft.add_state_with_level(2);
        nft.initial.insert(s0);
        nft.final_states.insert(s2);
        nft.add_transition(s0, 1, s1);
        nft.add_transition(s1, 2, s2);

        let projected = project_out(&nft, &[1], JumpMode::RepeatSymbol).unwrap();
        assert_eq!(projected.num_of_levels, 2);
        assert!(projected.is_lang_empty().is_none());
    }

    #[test]
    fn project_to_keeps_only_named_levels() {
        let mut nft = Nft::with_num_of_levels(3);
        let s0 = nft.add_state();
        let s1 = nft.add_state_with_level(1);
        let s2 = nft.add_state_with_level(2);
        nft.initial.insert(s0);
        nft.final_states.insert(s2);
        nft.add_transition(s0, 1, s1);
        nft.add_transition(s1, 2, s2);

        let projected = project_to(&nft, &[0, 2], JumpMode::AppendDontCares).unwrap();
        assert_eq!(projected.num_of_levels, 2);
    }

    #[test]
    fn rejects_removing_every_level() {
        let nft = Nft::with_num_of_levels(1);
        assert!(project_out(&nft, &[0], JumpMode::RepeatSymbol).is_err());
    }

    #[test]
    fn two_symbols_into_the_same_vanishing_state_both_survive_collapse() {
        // s -a-> m -c-> p and s -b-> m -c-> p, with m on the removed
        // level: collapsing must keep both (a, p) and (b, p), not prune
        // the second arrival at `m` because the first already visited it.
        let mut nft = Nft::with_num_of_levels(3);
        let s = nft.add_state();
        let m = nft.add_state_with_level(1);
        let p = nft.add_state_with_level(2);
        nft.initial.insert(s);
        nft.final_states.insert(p);
        nft.add_transition(s, 1, m); // 'a'
        nft.add_transition(s, 2, m); // 'b'
        nft.add_transition(m, 3, p); // 'c'

        let collapsed = collapse_from(&nft, s, &[true, false, true]);
        assert_eq!(collapsed.len(), 2);
        assert!(collapsed.contains(&(1, p)));
        assert!(collapsed.contains(&(2, p)));
    }
}
