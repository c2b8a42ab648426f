//! Tuple membership (§4.6.7): does some accepting run of an `Nft` emit
//! exactly `words_per_track[k]` on every track `k`? Worklist search over
//! `(state, cursors)`, one cursor per track into the word targeted for
//! that track.

use std::collections::HashSet;

use crate::nft::transducer::Nft;
use crate::run::Word;
use crate::{State, DONT_CARE, EPSILON};

/// `true` iff `nft` has an accepting run whose projection onto track `k`
/// equals `words_per_track[k]`, for every `k`. `EPSILON` transitions
/// advance no cursor; `DONT_CARE` transitions advance the cursor of the
/// transition's own level, matching any concrete symbol still left in
/// that track's word (failing if the track is already exhausted).
pub fn is_tuple_in_lang(nft: &Nft, words_per_track: &[Word]) -> bool {
    if words_per_track.len() != nft.num_of_levels {
        return false;
    }

    let start_cursors = vec![0usize; words_per_track.len()];
    let mut seen: HashSet<(State, Vec<usize>)> = HashSet::new();
    let mut worklist: Vec<(State, Vec<usize>)> = Vec::new();

    for &s in nft.initial.iter() {
        let key = (s, start_cursors.clone());
        if seen.insert(key.clone()) {
            worklist.push(key);
        }
    }

    let mut idx = 0;
    while idx < worklist.len() {
        let (s, cursors) = worklist[idx].clone();
        idx += 1;

        if nft.is_final(s)
            && cursors
                .iter()
                .zip(words_per_track.iter())
                .all(|(&c, w)| c == w.len())
        {
            return true;
        }

        let track = nft.level(s) as usize;
        for symbol_post in nft.delta.state_post(s).iter() {
            let symbol = symbol_post.symbol;
            for &t in symbol_post.targets.iter() {
                let next_cursors = if symbol == EPSILON {
                    Some(cursors.clone())
                } else if symbol == DONT_CARE {
                    (cursors[track] < words_per_track[track].len()).then(|| {
                        let mut c = cursors.clone();
                        c[track] += 1;
                        c
                    })
                } else {
                    (cursors[track] < words_per_track[track].len()
                        && words_per_track[track][cursors[track]] == symbol)
                        .then(|| {
                            let mut c = cursors.clone();
                            c[track] += 1;
                            c
                        })
                };
                if let Some(c) = next_cursors {
                    let key = (t, c);
                    if seen.insert(key.clone()) {
                        worklist.push(key);
                    }
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::JumpMode;

    #[test]
    fn single_level_identity_accepts_matching_word() {
        let mut t = Nft::with_num_of_levels(1);
        let s = t.add_state();
        t.initial.insert(s);
        t.final_states.insert(s);
        t.insert_identity(s, 1, JumpMode::RepeatSymbol).unwrap();
        t.insert_identity(s, 2, JumpMode::RepeatSymbol).unwrap();

        assert!(is_tuple_in_lang(&t, &[vec![1, 2, 1]]));
        assert!(!is_tuple_in_lang(&t, &[vec![1, 3]]));
    }

    #[test]
    fn two_level_transducer_requires_word_per_track() {
        let mut t = Nft::with_num_of_levels(2);
        let src = t.add_state();
        t.initial.insert(src);
        let tgt = t.insert_word(src, &[10, 20], None).unwrap();
        t.final_states.insert(tgt);

        assert!(is_tuple_in_lang(&t, &[vec![10], vec![20]]));
        assert!(!is_tuple_in_lang(&t, &[vec![10], vec![21]]));
    }

    #[test]
    fn wrong_track_count_is_rejected() {
        let t = Nft::with_num_of_levels(2);
        assert!(!is_tuple_in_lang(&t, &[vec![1]]));
    }
}
