//! Benchmarks for the operations §5 flags as long-running: determinize,
//! product, and antichain inclusion. Mirrors the teacher's single
//! `criterion_group!`/`criterion_main!` harness shape in
//! `benches/simple_bench.rs`, modernized off its pinned `0.2.11` API onto
//! current `criterion`.

use criterion::{criterion_group, criterion_main, Criterion};
use mata_core::alphabet::IntAlphabet;
use mata_core::nfa::inclusion;
use mata_core::nfa::Nfa;
use mata_core::params::InclusionParams;

/// A chain-of-`n`-states automaton accepting `a^n` plus a back-loop on
/// the last symbol, giving determinize/product something nontrivial (and
/// nondeterministic) to chew on.
fn chain_automaton(n: usize, alphabet_size: u32) -> Nfa {
    let mut a = Nfa::new();
    for _ in 0..=n {
        a.add_state();
    }
    a.initial.insert(0);
    a.final_states.insert(n as u32);
    for s in 0..n as u32 {
        for sym in 0..alphabet_size {
            a.add_transition(s, sym, s + 1);
            a.add_transition(s, sym, s); // self-loop: nondeterministic, keeps determinize honest
        }
    }
    a
}

fn bench_determinize(c: &mut Criterion) {
    let a = chain_automaton(12, 3);
    c.bench_function("determinize_chain_12_states_3_symbols", |b| {
        b.iter(|| a.determinize(None))
    });
}

fn bench_product(c: &mut Criterion) {
    let lhs = chain_automaton(10, 4);
    let rhs = chain_automaton(10, 4);
    c.bench_function("intersection_chain_10_states_4_symbols", |b| {
        b.iter(|| Nfa::intersection(&lhs, &rhs, None))
    });
}

fn bench_antichain_inclusion(c: &mut Criterion) {
    let smaller = chain_automaton(8, 3);
    let bigger = chain_automaton(8, 3);
    let alphabet = IntAlphabet::from_range(3);
    c.bench_function("antichain_inclusion_chain_8_states_3_symbols", |b| {
        b.iter(|| inclusion::is_included(&smaller, &bigger, &alphabet, InclusionParams::default()))
    });
}

criterion_group!(benches, bench_determinize, bench_product, bench_antichain_inclusion);
criterion_main!(benches);
