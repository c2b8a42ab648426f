//! The `Nft` struct: an `Nfa` whose states are additionally partitioned
//! into `num_of_levels` synchronized tracks (§3, §4.6.1).

use std::ops::{Deref, DerefMut};

use crate::nfa::Nfa;
use crate::sparse_set::SparseSet;
use crate::{Level, State, DEFAULT_LEVEL, DEFAULT_NUM_OF_LEVELS};

/// Dense per-state level vector; grows to `state + 1` on `set`.
#[derive(Debug, Clone, Default)]
pub struct Levels(Vec<Level>);

impl Levels {
    pub fn new() -> Self {
        Levels(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, state: State) -> Level {
        self.0.get(state as usize).copied().unwrap_or(DEFAULT_LEVEL)
    }

    pub fn set(&mut self, state: State, level: Level) {
        let idx = state as usize;
        if idx >= self.0.len() {
            self.0.resize(idx + 1, DEFAULT_LEVEL);
        }
        self.0[idx] = level;
    }

    pub fn as_slice(&self) -> &[Level] {
        &self.0
    }
}

/// A nondeterministic finite transducer: an `Nfa` augmented with levels.
#[derive(Debug, Clone)]
pub struct Nft {
    pub nfa: Nfa,
    pub levels: Levels,
    pub num_of_levels: usize,
}

impl Deref for Nft {
    type Target = Nfa;

    fn deref(&self) -> &Nfa {
        &self.nfa
    }
}

impl DerefMut for Nft {
    fn deref_mut(&mut self) -> &mut Nfa {
        &mut self.nfa
    }
}

impl Default for Nft {
    fn default() -> Self {
        Nft::new()
    }
}

impl Nft {
    pub fn new() -> Self {
        Nft {
            nfa: Nfa::new(),
            levels: Levels::new(),
            num_of_levels: DEFAULT_NUM_OF_LEVELS,
        }
    }

    pub fn with_num_of_levels(num_of_levels: usize) -> Self {
        Nft {
            nfa: Nfa::new(),
            levels: Levels::new(),
            num_of_levels,
        }
    }

    /// Appends a fresh state at level 0.
    pub fn add_state(&mut self) -> State {
        let s = self.nfa.add_state();
        self.levels.set(s, DEFAULT_LEVEL);
        s
    }

    pub fn add_state_with_level(&mut self, level: Level) -> State {
        let s = self.nfa.add_state();
        self.levels.set(s, level);
        s
    }

    pub fn level(&self, state: State) -> Level {
        self.levels.get(state)
    }

    pub fn clear(&mut self) {
        self.nfa.clear();
        self.levels = Levels::new();
    }

    /// Structural equality including level assignment.
    pub fn is_identical(&self, other: &Nft) -> bool {
        self.num_of_levels == other.num_of_levels
            && self.levels.as_slice()[..self.nfa.num_of_states()]
                == other.levels.as_slice()[..other.nfa.num_of_states()]
            && self.nfa.is_identical(&other.nfa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_state_defaults_to_level_zero() {
        let mut t = Nft::with_num_of_levels(2);
        let s = t.add_state();
        assert_eq!(t.level(s), 0);
    }

    #[test]
    fn add_state_with_level_sets_requested_level() {
        let mut t = Nft::with_num_of_levels(3);
        let s = t.add_state_with_level(2);
        assert_eq!(t.level(s), 2);
    }

    #[test]
    fn levels_default_for_states_never_explicitly_set() {
        let mut t = Nft::with_num_of_levels(2);
        t.add_state_with_level(1);
        let s2 = t.add_state();
        assert_eq!(t.level(s2), 0);
    }
}
