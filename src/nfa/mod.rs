//! The classical NFA algorithm kernel: automaton struct, determinization,
//! completion/complement, minimization, revert, epsilon removal, product,
//! inclusion/equivalence, and simulation-based reduction.

mod automaton;
mod complement;
mod complete;
mod determinize;
mod emptiness;
mod epsilon;
pub mod inclusion;
mod minimize;
pub mod product;
mod reduce;
mod revert;
mod simulation;

pub use automaton::Nfa;
pub use simulation::SimulationRelation;
