//! Error taxonomy for the crate's fallible operations.

use thiserror::Error;

use crate::{State, Symbol};

/// Everything that can go wrong building or running an automaton.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("state {0} is out of range (max valid state is {1})")]
    InvalidTransition(State, State),

    #[error("invalid parameter {key:?}: {reason}")]
    InvalidParameter { key: String, reason: String },

    #[error("alphabets of the two automata do not agree on symbol {0}")]
    AlphabetMismatch(Symbol),

    #[error("operation requires matching num_of_levels, got {lhs} and {rhs}")]
    LevelMismatch { lhs: usize, rhs: usize },

    #[error("operation cannot be performed on an automaton with no states")]
    EmptyInput,

    #[error("failed to parse input: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
