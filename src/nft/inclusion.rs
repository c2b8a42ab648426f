//! NFT language inclusion: degrades to plain NFA inclusion over a "one
//! level" view, grounded on `original_source/src/nft/inclusion.cc`
//! (`is_included_antichains`/`is_included_naive` both delegate to
//! `nfa::algorithms::is_included_*` after calling `get_one_level_aut`).
//! Inclusion only cares which tuples a run accepts, never how many hops
//! it took to get from one level to the next, so flattening every
//! multi-level jump transition into a chain of single-level hops first
//! lets the NFA-level algorithm run unmodified over the flattened delta.

use crate::alphabet::Alphabet;
use crate::nfa::inclusion as nfa_inclusion;
use crate::nft::transducer::Nft;
use crate::params::{InclusionParams, JumpMode};
use crate::run::Run;
use crate::{Error, Level, DONT_CARE};

/// Expands every transition whose target sits more than one level past
/// its source into a chain of fresh single-level hops. A level of `0` on
/// the target means "wrapped back to the first track", so the span is
/// measured against `num_of_levels` rather than literally `0`. The jump's
/// own symbol survives on the first hop; the rest repeat it
/// (`RepeatSymbol`) or read `DONT_CARE` (`AppendDontCares`), mirroring
/// `make_one_level_aut`.
fn one_level_view(nft: &Nft, jump_mode: JumpMode) -> Nft {
    if nft.num_of_levels <= 1 {
        return nft.clone();
    }
    let num_of_levels = nft.num_of_levels as Level;
    let mut result = nft.clone();

    for t in nft.delta.transitions() {
        let src_lvl = nft.level(t.source);
        let tgt_lvl = nft.level(t.target);
        let span = if tgt_lvl == 0 {
            num_of_levels - src_lvl
        } else {
            tgt_lvl - src_lvl
        };
        if span <= 1 {
            continue;
        }

        result
            .delta
            .remove(t.source, t.symbol, t.target)
            .expect("transition came from nft's own delta");

        let mut current = t.source;
        let mut current_lvl = src_lvl;
        for hop in 0..span {
            let is_first = hop == 0;
            let is_last = hop + 1 == span;
            let next_lvl = (current_lvl + 1) % num_of_levels;
            let next = if is_last {
                t.target
            } else {
                result.add_state_with_level(next_lvl)
            };
            let symbol = if is_first || jump_mode == JumpMode::RepeatSymbol {
                t.symbol
            } else {
                DONT_CARE
            };
            result.delta.add(current, symbol, next);
            current = next;
            current_lvl = next_lvl;
        }
    }

    result
}

/// Language inclusion between two NFTs' full tuple relations: `true` iff
/// every tuple `bigger` rejects, `smaller` rejects too. Requires both
/// sides to share a level count; dispatches to the algorithm named in
/// `params` (`None` means included, `Some(run)` a counterexample run over
/// the flattened one-level view).
pub fn is_included(
    smaller: &Nft,
    bigger: &Nft,
    alphabet: &dyn Alphabet,
    jump_mode: JumpMode,
    params: InclusionParams,
) -> Result<Option<Run>, Error> {
    if smaller.num_of_levels != bigger.num_of_levels {
        return Err(Error::LevelMismatch {
            lhs: smaller.num_of_levels,
            rhs: bigger.num_of_levels,
        });
    }
    let smaller_view = one_level_view(smaller, jump_mode);
    let bigger_view = one_level_view(bigger, jump_mode);
    nfa_inclusion::is_included(&smaller_view.nfa, &bigger_view.nfa, alphabet, params)
}

/// `true` iff `lhs` and `rhs` accept exactly the same tuples.
pub fn are_equivalent(
    lhs: &Nft,
    rhs: &Nft,
    alphabet: &dyn Alphabet,
    jump_mode: JumpMode,
    params: InclusionParams,
) -> Result<bool, Error> {
    Ok(is_included(lhs, rhs, alphabet, jump_mode, params)?.is_none()
        && is_included(rhs, lhs, alphabet, jump_mode, params)?.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::IntAlphabet;
    use crate::params::InclusionAlgorithm;

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
    fn one_level_view_preserves_num_of_states_for_single_level_nft() {
        let t = identity_on(&[1]);
        let view = one_level_view(&t, JumpMode::AppendDontCares);
        // every transition in `identity_on` already spans exactly one
        // level (via `insert_word`'s own chain), so nothing to flatten.
        assert_eq!(view.num_of_states(), t.num_of_states());
    }

    #[test]
    fn smaller_alphabet_is_included_in_larger_one() {
        let smaller = identity_on(&[1]);
        let bigger = identity_on(&[1, 2]);
        let alphabet = IntAlphabet::from_range(3);
        let params = InclusionParams {
            algorithm: InclusionAlgorithm::Antichains,
        };
        assert!(is_included(&smaller, &bigger, &alphabet, JumpMode::AppendDontCares, params)
            .unwrap()
            .is_none());
        assert!(is_included(&bigger, &smaller, &alphabet, JumpMode::AppendDontCares, params)
            .unwrap()
            .is_some());
    }

    #[test]
    fn rejects_mismatched_level_counts() {
        let a = Nft::with_num_of_levels(1);
        let b = Nft::with_num_of_levels(2);
        let alphabet = IntAlphabet::from_range(1);
        assert!(is_included(
            &a,
            &b,
            &alphabet,
            JumpMode::RepeatSymbol,
            InclusionParams::default()
        )
        .is_err());
    }
}
