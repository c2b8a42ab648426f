//! Composition (§4.6.3): chain two transducers through a shared set of
//! tracks. `compose(lhs, rhs, sync_l, sync_r, jump_mode)` relates `x` and
//! `z` iff some `y` exists with `lhs` relating `x` to `y` via `sync_l`'s
//! tracks and `rhs` relating `y` to `z` via `sync_r`'s tracks (P9).
//!
//! Mirrors the three steps §4.6.3 describes, and follows the reference
//! mask-construction algorithm hop for hop: widen both sides into a shared
//! level system that aligns the synchronization tracks pairwise (matching
//! levels at each sync point, letting either side's non-synchronized
//! levels interleave around them), let either side stutter through
//! positions it has nothing to contribute to, take the level-aware
//! product (auxiliary states introduced by the stutter loops never pair
//! with each other), then project the synchronization tracks back out.

use crate::nft::levels::insert_levels;
use crate::nft::product::{product, ProductCutoffs};
use crate::nft::project::project_out;
use crate::nft::transducer::Nft;
use crate::ord_vector::OrdVector;
use crate::params::JumpMode;
use crate::{Error, Level, State, DONT_CARE, EPSILON};

/// Builds `mask_l`/`mask_r` (`true` at a level inserted only to make room
/// for the other side, `false` at a level original to that side,
/// including every synchronization level) and the list of levels the
/// synchronized product should project back out, by walking `sync_l` and
/// `sync_r` pairwise and inserting padding wherever one side's sync level
/// sits further along than the other's.
fn build_masks(
    lhs_num_of_levels: usize,
    rhs_num_of_levels: usize,
    sync_l: &OrdVector<Level>,
    sync_r: &OrdVector<Level>,
) -> (Vec<bool>, Vec<bool>, Vec<Level>) {
    let min_level = (*sync_l.first().unwrap()).min(*sync_r.first().unwrap()) as usize;
    let lhs_suffix_len = lhs_num_of_levels - 1 - *sync_l.as_slice().last().unwrap() as usize;
    let rhs_suffix_len = rhs_num_of_levels - 1 - *sync_r.as_slice().last().unwrap() as usize;
    let biggest_suffix_len = lhs_suffix_len.max(rhs_suffix_len);

    let mut mask_l = vec![false; min_level];
    let mut mask_r = vec![false; min_level];
    let mut levels_to_project_out = Vec::new();
    let mut lhs_offset: Level = 0;
    let mut rhs_offset: Level = 0;

    for (&lhs_sync, &rhs_sync) in sync_l.iter().zip(sync_r.iter()) {
        let lhs_lvl = lhs_sync + lhs_offset;
        let rhs_lvl = rhs_sync + rhs_offset;
        match lhs_lvl.cmp(&rhs_lvl) {
            std::cmp::Ordering::Less => {
                let diff = (rhs_lvl - lhs_lvl) as usize;
                mask_l.extend(std::iter::repeat(true).take(diff));
                mask_r.extend(std::iter::repeat(false).take(diff));
                lhs_offset += rhs_lvl - lhs_lvl;
            }
            std::cmp::Ordering::Greater => {
                let diff = (lhs_lvl - rhs_lvl) as usize;
                mask_l.extend(std::iter::repeat(false).take(diff));
                mask_r.extend(std::iter::repeat(true).take(diff));
                rhs_offset = lhs_lvl - rhs_lvl;
            }
            std::cmp::Ordering::Equal => {
                mask_l.resize(lhs_lvl as usize, false);
                mask_r.resize(rhs_lvl as usize, false);
            }
        }
        mask_l.push(false);
        mask_r.push(false);
        levels_to_project_out.push((mask_l.len() - 1) as Level);
    }

    mask_l.extend(std::iter::repeat(false).take(lhs_suffix_len));
    mask_r.extend(std::iter::repeat(false).take(rhs_suffix_len));
    mask_l.extend(std::iter::repeat(true).take(biggest_suffix_len - lhs_suffix_len));
    mask_r.extend(std::iter::repeat(true).take(biggest_suffix_len - rhs_suffix_len));

    (mask_l, mask_r, levels_to_project_out)
}

/// Loops every level-0 state in `nft` back on itself with a word that
/// reads `DONT_CARE` on the levels `own_mask` marks as inserted for this
/// side and `EPSILON` everywhere else (including this side's own
/// synchronization levels). Lets the other side advance through the
/// levels it owns while this side idles.
fn insert_self_loops(nft: &mut Nft, own_mask: &[bool]) {
    let loop_word: Vec<_> = own_mask
        .iter()
        .map(|&inserted| if inserted { DONT_CARE } else { EPSILON })
        .collect();
    let n = nft.num_of_states();
    for s in 0..n as State {
        if nft.level(s) == 0 {
            let _ = nft.insert_word(s, &loop_word, Some(s));
        }
    }
}

/// Composes `lhs : X -> Y` with `rhs : Y -> Z` through `lhs`'s tracks
/// named by `sync_l` and `rhs`'s tracks named by `sync_r` (paired up in
/// order). Both lists must be non-empty and of equal length.
pub fn compose(
    lhs: &Nft,
    rhs: &Nft,
    sync_l: &[Level],
    sync_r: &[Level],
    jump_mode: JumpMode,
) -> Result<Nft, Error> {
    if sync_l.is_empty() || sync_r.is_empty() {
        return Err(Error::EmptyInput);
    }
    if sync_l.len() != sync_r.len() {
        return Err(Error::LevelMismatch {
            lhs: sync_l.len(),
            rhs: sync_r.len(),
        });
    }

    let sync_l: OrdVector<Level> = sync_l.iter().copied().collect();
    let sync_r: OrdVector<Level> = sync_r.iter().copied().collect();

    let (mask_l, mask_r, levels_to_project_out) =
        build_masks(lhs.num_of_levels, rhs.num_of_levels, &sync_l, &sync_r);

    let mut lhs_synced = insert_levels(lhs, &mask_l, DONT_CARE, jump_mode);
    let mut rhs_synced = insert_levels(rhs, &mask_r, DONT_CARE, jump_mode);

    // Two auxiliary (stutter-loop) states can never pair into a product
    // state; snapshot the boundary before the loops introduce any.
    let lhs_first_aux_state = lhs_synced.num_of_states();
    let rhs_first_aux_state = rhs_synced.num_of_states();

    insert_self_loops(&mut lhs_synced, &mask_l);
    insert_self_loops(&mut rhs_synced, &mask_r);

    let cutoffs = ProductCutoffs {
        lhs: Some(lhs_first_aux_state),
        rhs: Some(rhs_first_aux_state),
    };
    let prod = product(
        &lhs_synced,
        &rhs_synced,
        |sl, sr| lhs_synced.is_final(sl) && rhs_synced.is_final(sr),
        cutoffs,
        None,
    )?;

    project_out(&prod, &levels_to_project_out, jump_mode)
}
