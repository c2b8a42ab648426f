//! Nondeterministic finite automata and transducers over finite words.
//!
//! The crate is organized leaves-first: [`ord_vector`] and [`sparse_set`]
//! are the small ordered/dense collections everything else is built from,
//! [`sync_iter`] is the multi-way merge primitive shared by determinization
//! and product, [`delta`] is the transition store, [`nfa`] is the classical
//! automaton kernel, and [`nft`] layers synchronized multi-track levels on
//! top of it.

pub mod alphabet;
pub mod delta;
pub mod error;
pub mod nfa;
pub mod nft;
pub mod ord_vector;
pub mod params;
pub mod run;
pub mod sparse_set;
pub mod sync_iter;

pub use error::{Error, Result};

/// States are dense, numbered `0..N`.
pub type State = u32;

/// Symbols are an abstract unsigned integer alphabet.
pub type Symbol = u32;

/// A transducer's per-state rank in `[0, num_of_levels)`.
pub type Level = u32;

/// Sentinel meaning "no state" / "not yet assigned", used as a default
/// target argument to the word-insertion family.
pub const MAX_STATE: State = State::MAX;

/// The largest representable symbol, reserved for silent transitions.
/// Kept largest so that sorted iteration over a `StatePost` always visits
/// it last.
pub const EPSILON: Symbol = Symbol::MAX;

/// One less than [`EPSILON`]; a wildcard matching any concrete symbol
/// during transducer product.
pub const DONT_CARE: Symbol = Symbol::MAX - 1;

/// Every state defaults to level 0 until told otherwise.
pub const DEFAULT_LEVEL: Level = 0;

/// A transducer with a single level behaves exactly like an NFA.
pub const DEFAULT_NUM_OF_LEVELS: usize = 1;
