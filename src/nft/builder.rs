//! Word and tuple insertion (§4.6.6): build linear or interleaved chains
//! through the level structure.

use crate::nft::transducer::Nft;
use crate::params::JumpMode;
use crate::run::Word;
use crate::{Error, Level, State, Symbol};

impl Nft {
    /// Builds a chain from `src` labelled with `word`, landing on `tgt`
    /// (or a freshly created state if `tgt` is `None`). Requires
    /// `level[src] == level[tgt]` once the chain's length is folded
    /// through `num_of_levels`; `word` must be non-empty.
    pub fn insert_word(
        &mut self,
        src: State,
        word: &[Symbol],
        tgt: Option<State>,
    ) -> Result<State, Error> {
        if word.is_empty() {
            return Err(Error::EmptyInput);
        }
        let l = self.num_of_levels.max(1);
        let from_level = self.level(src);
        let mut current = src;
        for (i, &symbol) in word.iter().enumerate() {
            let next_level = ((from_level as usize + i + 1) % l) as Level;
            let is_last = i + 1 == word.len();
            let next_state = if is_last {
                match tgt {
                    Some(t) => {
                        if self.level(t) != next_level {
                            return Err(Error::LevelMismatch {
                                lhs: next_level as usize,
                                rhs: self.level(t) as usize,
                            });
                        }
                        t
                    }
                    None => self.add_state_with_level(next_level),
                }
            } else {
                self.add_state_with_level(next_level)
            };
            self.add_transition(current, symbol, next_state);
            current = next_state;
        }
        Ok(current)
    }

    /// Interleaves `L` per-level words (`parts`, one per level, cyclic
    /// from `level[src]`), using `EPSILON` once a part is exhausted.
    /// Total chain length is `L * max_k |parts[k]|`.
    pub fn insert_word_by_parts(
        &mut self,
        src: State,
        parts: &[Word],
        tgt: Option<State>,
    ) -> Result<State, Error> {
        if self.num_of_levels == 1 {
            return self.insert_word(src, &parts[0], tgt);
        }
        if parts.len() != self.num_of_levels {
            return Err(Error::EmptyInput);
        }
        let max_len = parts.iter().map(|p| p.len()).max().unwrap_or(0);
        if max_len == 0 {
            return Err(Error::EmptyInput);
        }
        let total_len = self.num_of_levels * max_len;
        let from_level = self.level(src) as usize;

        let mut cursors = vec![0usize; self.num_of_levels];
        let mut current = src;
        for step in 0..total_len {
            let lvl = (from_level + step) % self.num_of_levels;
            let symbol = if cursors[lvl] < parts[lvl].len() {
                let s = parts[lvl][cursors[lvl]];
                cursors[lvl] += 1;
                s
            } else {
                crate::EPSILON
            };

            let next_level = ((from_level + step + 1) % self.num_of_levels) as Level;
            let is_last = step + 1 == total_len;
            let next_state = if is_last {
                match tgt {
                    Some(t) => {
                        if self.level(t) != next_level {
                            return Err(Error::LevelMismatch {
                                lhs: next_level as usize,
                                rhs: self.level(t) as usize,
                            });
                        }
                        t
                    }
                    None => self.add_state_with_level(next_level),
                }
            } else {
                self.add_state_with_level(next_level)
            };
            self.add_transition(current, symbol, next_state);
            current = next_state;
        }
        Ok(current)
    }

    /// Adds an identity chain for a single `symbol` at `state`: a direct
    /// self-loop in `RepeatSymbol` mode, or a full per-level identity
    /// chain back to `state` in `AppendDontCares` mode.
    pub fn insert_identity(
        &mut self,
        state: State,
        symbol: Symbol,
        jump_mode: JumpMode,
    ) -> Result<(), Error> {
        match jump_mode {
            JumpMode::RepeatSymbol => {
                self.add_transition(state, symbol, state);
                Ok(())
            }
            JumpMode::AppendDontCares => {
                let word = vec![symbol; self.num_of_levels];
                self.insert_word(state, &word, Some(state))?;
                Ok(())
            }
        }
    }

    pub fn insert_identity_many(
        &mut self,
        state: State,
        symbols: &[Symbol],
        jump_mode: JumpMode,
    ) -> Result<(), Error> {
        for &symbol in symbols {
            self.insert_identity(state, symbol, jump_mode)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_word_assigns_cyclic_levels() {
        let mut t = Nft::with_num_of_levels(2);
        let src = t.add_state();
        let tgt = t.insert_word(src, &[10, 20], None).unwrap();
        assert_eq!(t.level(tgt), 0);
        let sp = t.delta.state_post(src).find(10).unwrap();
        let inner = *sp.targets.iter().next().unwrap();
        assert_eq!(t.level(inner), 1);
        assert!(t.delta.contains(inner, 20, tgt));
        assert_eq!(t.delta.num_of_transitions(), 2);
    }

    #[test]
    fn insert_word_rejects_mismatched_target_level() {
        let mut t = Nft::with_num_of_levels(2);
        let src = t.add_state();
        let tgt = t.add_state_with_level(1);
        assert!(t.insert_word(src, &[1], None).is_ok());
        assert!(t.insert_word(src, &[1, 2], Some(tgt)).is_err());
    }

    #[test]
    fn insert_identity_repeat_symbol_is_self_loop() {
        let mut t = Nft::with_num_of_levels(3);
        let s = t.add_state();
        t.insert_identity(s, 9, JumpMode::RepeatSymbol).unwrap();
        assert!(t.delta.contains(s, 9, s));
        assert_eq!(t.delta.num_of_transitions(), 1);
    }

    #[test]
    fn insert_identity_append_dont_cares_builds_full_chain() {
        let mut t = Nft::with_num_of_levels(3);
        let s = t.add_state();
        t.insert_identity(s, 9, JumpMode::AppendDontCares).unwrap();
        assert_eq!(t.delta.num_of_transitions(), 3);
    }

    #[test]
    fn insert_word_by_parts_interleaves_levels() {
        let mut t = Nft::with_num_of_levels(2);
        let src = t.add_state();
        let tgt = t
            .insert_word_by_parts(src, &[vec![1, 2], vec![10]], None)
            .unwrap();
        assert_eq!(t.level(tgt), 0);
        assert_eq!(t.delta.num_of_transitions(), 4);
    }
}
