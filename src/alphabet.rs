//! Symbol naming: on-the-fly string↔int, integer passthrough, and a fixed
//! enumerated alphabet. Every automaton operation that needs "the
//! alphabet" (completion, complement, antichain symbol enumeration) works
//! against the [`Alphabet`] trait rather than any one representation.

use std::collections::HashMap;

use crate::ord_vector::OrdVector;
use crate::{Error, Symbol};

pub trait Alphabet {
    /// The symbols this alphabet currently knows about.
    fn get_alphabet_symbols(&self) -> OrdVector<Symbol>;

    /// `Σ \ used`, restricted to this alphabet's known symbols.
    fn get_complement(&self, used: &OrdVector<Symbol>) -> OrdVector<Symbol> {
        self.get_alphabet_symbols().difference(used)
    }

    fn is_in_alphabet(&self, symbol: Symbol) -> bool {
        self.get_alphabet_symbols().contains(&symbol)
    }
}

/// Grows its symbol table as new names are seen; the textual-format front
/// end (out of scope here) is the typical caller, but the core only ever
/// needs the int side.
#[derive(Debug, Clone, Default)]
pub struct OnTheFlyAlphabet {
    symbol_to_name: HashMap<Symbol, String>,
    name_to_symbol: HashMap<String, Symbol>,
    next_symbol: Symbol,
}

impl OnTheFlyAlphabet {
    pub fn new() -> Self {
        OnTheFlyAlphabet::default()
    }

    pub fn from_symbols<I: IntoIterator<Item = Symbol>>(symbols: I) -> Self {
        let mut a = OnTheFlyAlphabet::new();
        for s in symbols {
            a.add_unnamed(s);
        }
        a
    }

    fn add_unnamed(&mut self, symbol: Symbol) {
        if symbol >= self.next_symbol && symbol != crate::EPSILON {
            self.next_symbol = symbol + 1;
        }
        self.symbol_to_name.entry(symbol).or_insert_with(String::new);
    }

    /// Looks up `name`, minting a fresh symbol if it has not been seen.
    pub fn translate_symbol(&mut self, name: &str) -> Symbol {
        if let Some(&sym) = self.name_to_symbol.get(name) {
            return sym;
        }
        let sym = self.next_symbol;
        self.next_symbol += 1;
        self.name_to_symbol.insert(name.to_string(), sym);
        self.symbol_to_name.insert(sym, name.to_string());
        sym
    }

    pub fn reverse_translate_symbol(&self, symbol: Symbol) -> Option<&str> {
        self.symbol_to_name.get(&symbol).map(|s| s.as_str())
    }
}

impl Alphabet for OnTheFlyAlphabet {
    fn get_alphabet_symbols(&self) -> OrdVector<Symbol> {
        self.symbol_to_name.keys().copied().collect()
    }
}

/// An alphabet that is just "every unsigned integer up to some bound" —
/// the common case when symbols never carry names.
#[derive(Debug, Clone)]
pub struct IntAlphabet {
    symbols: OrdVector<Symbol>,
}

impl IntAlphabet {
    pub fn new<I: IntoIterator<Item = Symbol>>(symbols: I) -> Self {
        IntAlphabet {
            symbols: symbols.into_iter().collect(),
        }
    }

    pub fn from_range(count: Symbol) -> Self {
        IntAlphabet::new(0..count)
    }
}

impl Alphabet for IntAlphabet {
    fn get_alphabet_symbols(&self) -> OrdVector<Symbol> {
        self.symbols.clone()
    }
}

/// A fixed, closed enumeration of symbols (with names), for callers who
/// want an exhaustive, never-growing universe.
#[derive(Debug, Clone)]
pub struct EnumAlphabet {
    names: Vec<String>,
    name_to_symbol: HashMap<String, Symbol>,
}

impl EnumAlphabet {
    pub fn new<I: IntoIterator<Item = String>>(names: I) -> Self {
        let names: Vec<String> = names.into_iter().collect();
        let name_to_symbol = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i as Symbol))
            .collect();
        EnumAlphabet {
            names,
            name_to_symbol,
        }
    }

    pub fn translate_symbol(&self, name: &str) -> Result<Symbol, Error> {
        self.name_to_symbol
            .get(name)
            .copied()
            .ok_or_else(|| Error::ParseError(format!("unknown symbol name {name:?}")))
    }

    pub fn reverse_translate_symbol(&self, symbol: Symbol) -> Option<&str> {
        self.names.get(symbol as usize).map(|s| s.as_str())
    }
}

impl Alphabet for EnumAlphabet {
    fn get_alphabet_symbols(&self) -> OrdVector<Symbol> {
        (0..self.names.len() as Symbol).collect()
    }
}
