//! The transition store: a three-level lexicographically ordered sparse
//! structure. `Delta` indexes `StatePost` by source state; each
//! `StatePost` is a `SymbolPost` vector strictly ascending by symbol; each
//! `SymbolPost` carries its ordered set of targets.
//!
//! The symbol-level dispatch mirrors the teacher's `Transitions` type in
//! `nfa.rs`, which keeps a `Vec<(&str, S)>` and does a binary search by key
//! on every lookup — here widened to a set of targets per symbol and a
//! proper `OrdVector` instead of a single next-state.

use crate::ord_vector::OrdVector;
use crate::{Error, State, Symbol};

/// `(symbol, targets)`. Two `SymbolPost`s compare (and are stored
/// ordered) by symbol alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolPost {
    pub symbol: Symbol,
    pub targets: OrdVector<State>,
}

impl SymbolPost {
    pub fn new(symbol: Symbol) -> Self {
        SymbolPost {
            symbol,
            targets: OrdVector::new(),
        }
    }
}

impl PartialOrd for SymbolPost {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SymbolPost {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.symbol.cmp(&other.symbol)
    }
}

/// Strictly ascending-by-symbol sequence of `SymbolPost`s outgoing from
/// one state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatePost(Vec<SymbolPost>);

impl StatePost {
    pub fn new() -> Self {
        StatePost(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SymbolPost> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[SymbolPost] {
        &self.0
    }

    /// O(log k) lookup by symbol.
    pub fn find(&self, symbol: Symbol) -> Option<&SymbolPost> {
        self.0
            .binary_search_by_key(&symbol, |sp| sp.symbol)
            .ok()
            .map(|i| &self.0[i])
    }

    fn find_mut_or_insert(&mut self, symbol: Symbol) -> &mut SymbolPost {
        match self.0.binary_search_by_key(&symbol, |sp| sp.symbol) {
            Ok(i) => &mut self.0[i],
            Err(i) => {
                self.0.insert(i, SymbolPost::new(symbol));
                &mut self.0[i]
            }
        }
    }

    fn add(&mut self, symbol: Symbol, target: State) {
        self.find_mut_or_insert(symbol).targets.insert(target);
    }

    fn remove(&mut self, symbol: Symbol, target: State) -> bool {
        match self.0.binary_search_by_key(&symbol, |sp| sp.symbol) {
            Ok(i) => {
                let removed = self.0[i].targets.erase(&target);
                if removed && self.0[i].targets.is_empty() {
                    self.0.remove(i);
                }
                removed
            }
            Err(_) => false,
        }
    }

    fn contains(&self, symbol: Symbol, target: State) -> bool {
        self.find(symbol)
            .map(|sp| sp.targets.contains(&target))
            .unwrap_or(false)
    }

    pub fn used_symbols(&self) -> OrdVector<Symbol> {
        self.0.iter().map(|sp| sp.symbol).collect()
    }
}

impl<'a> IntoIterator for &'a StatePost {
    type Item = &'a SymbolPost;
    type IntoIter = std::slice::Iter<'a, SymbolPost>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A single `(source, symbol, target)` transition, as yielded by
/// [`Delta::transitions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub source: State,
    pub symbol: Symbol,
    pub target: State,
}

/// Dense vector of `StatePost`, indexed by source state. Reading an
/// out-of-range state yields an empty view and never grows the vector;
/// writing grows it implicitly.
#[derive(Debug, Clone, Default)]
pub struct Delta {
    rows: Vec<StatePost>,
}

const EMPTY_STATE_POST: StatePost = StatePost(Vec::new());

impl Delta {
    pub fn new() -> Self {
        Delta { rows: Vec::new() }
    }

    pub fn with_capacity(num_states: usize) -> Self {
        Delta {
            rows: vec![StatePost::new(); num_states],
        }
    }

    pub fn num_states(&self) -> usize {
        self.rows.len()
    }

    fn grow_to(&mut self, state: State) {
        let idx = state as usize;
        if idx >= self.rows.len() {
            self.rows.resize(idx + 1, StatePost::new());
        }
    }

    /// Never grows; out-of-range reads see an empty `StatePost`.
    pub fn state_post(&self, state: State) -> &StatePost {
        self.rows
            .get(state as usize)
            .unwrap_or(&EMPTY_STATE_POST)
    }

    /// Grows the vector if needed, then returns a mutable view.
    pub fn mutable_state_post(&mut self, state: State) -> &mut StatePost {
        self.grow_to(state);
        &mut self.rows[state as usize]
    }

    pub fn add(&mut self, source: State, symbol: Symbol, target: State) {
        self.grow_to(source.max(target));
        self.rows[source as usize].add(symbol, target);
    }

    pub fn remove(&mut self, source: State, symbol: Symbol, target: State) -> Result<(), Error> {
        let row = self
            .rows
            .get_mut(source as usize)
            .ok_or(Error::InvalidTransition(source, self.rows.len() as State))?;
        if row.remove(symbol, target) {
            Ok(())
        } else {
            Err(Error::InvalidTransition(source, target))
        }
    }

    pub fn contains(&self, source: State, symbol: Symbol, target: State) -> bool {
        self.state_post(source).contains(symbol, target)
    }

    pub fn num_of_transitions(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|sp| sp.iter())
            .map(|symbol_post| symbol_post.targets.len())
            .sum()
    }

    /// Lexicographic `(source, symbol, target)` order.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.rows.iter().enumerate().flat_map(|(source, sp)| {
            sp.iter().flat_map(move |symbol_post| {
                symbol_post.targets.iter().map(move |&target| Transition {
                    source: source as State,
                    symbol: symbol_post.symbol,
                    target,
                })
            })
        })
    }

    /// Sorted-vector implementation of `get_used_symbols`. Kept alongside
    /// two cross-checked alternative strategies so the three can be
    /// property-tested for agreement (spec requires all implementations
    /// to produce identical results).
    pub fn get_used_symbols(&self) -> OrdVector<Symbol> {
        self.get_used_symbols_sorted_vector()
    }

    pub fn get_used_symbols_sorted_vector(&self) -> OrdVector<Symbol> {
        let mut acc = OrdVector::new();
        for row in &self.rows {
            for sp in row.iter() {
                acc.insert(sp.symbol);
            }
        }
        acc
    }

    pub fn get_used_symbols_hashset(&self) -> OrdVector<Symbol> {
        use std::collections::HashSet;
        let mut set: HashSet<Symbol> = HashSet::new();
        for row in &self.rows {
            for sp in row.iter() {
                set.insert(sp.symbol);
            }
        }
        set.into_iter().collect()
    }

    pub fn get_used_symbols_bitvector(&self, max_symbol: Symbol) -> OrdVector<Symbol> {
        let mut bits = vec![false; max_symbol as usize + 1];
        for row in &self.rows {
            for sp in row.iter() {
                if (sp.symbol as usize) < bits.len() {
                    bits[sp.symbol as usize] = true;
                }
            }
        }
        bits.iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(|(i, _)| i as Symbol)
            .collect()
    }

    /// A fresh `Delta` with every target replaced by `f(target)`.
    pub fn renumber_targets<F: Fn(State) -> State>(&self, f: F) -> Delta {
        let mut rows = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let mut new_row = StatePost::new();
            for sp in row.iter() {
                for &t in sp.targets.iter() {
                    new_row.add(sp.symbol, f(t));
                }
            }
            rows.push(new_row);
        }
        Delta { rows }
    }

    /// In-place: drop rows whose state is not in `useful_mask`, renumber
    /// every surviving source and target through `rename_map`.
    pub fn defragment(&mut self, useful_mask: &[bool], rename_map: &[State]) {
        let mut new_rows: Vec<StatePost> = Vec::new();
        for (state, row) in self.rows.iter().enumerate() {
            if !useful_mask.get(state).copied().unwrap_or(false) {
                continue;
            }
            let new_source = rename_map[state] as usize;
            if new_source >= new_rows.len() {
                new_rows.resize(new_source + 1, StatePost::new());
            }
            for sp in row.iter() {
                for &t in sp.targets.iter() {
                    if useful_mask.get(t as usize).copied().unwrap_or(false) {
                        new_rows[new_source].add(sp.symbol, rename_map[t as usize]);
                    }
                }
            }
        }
        self.rows = new_rows;
    }
}
