use criterion::{criterion_group, criterion_main, Criterion};

use clearcoin_lib::{
    BatchSelector, Coin, ExhaustiveSelector, FixedPointSelector, GreedyFeeSelector, OutputIndex,
    PrivateKey, Transaction, TransactionBuilder, TransactionOutput, TopologicalGreedySelector,
    UtxoId, UtxoPool,
};

// Builds a pool with one UTXO per transaction and a batch of independent
// spends with varied fees. Keys come from fixed seeds so every run measures
// the same workload.
fn independent_batch(size: usize) -> (UtxoPool, Vec<Transaction>) {
    let owner = PrivateKey::from_seed([1; 32]);
    let recipient = PrivateKey::from_seed([2; 32]).public_key();

    let outputs = (0..size)
        .map(|index| TransactionOutput::new(Coin::new(10 + index as i64), owner.public_key()))
        .collect::<Vec<TransactionOutput>>();
    let genesis = Transaction::new(vec![], outputs).unwrap();
    let pool = UtxoPool::seeded_from(&genesis);

    let batch = (0..size)
        .map(|index| {
            TransactionBuilder::new()
                .claim(UtxoId::new(*genesis.id(), OutputIndex::new(index as u32)))
                .pay(Coin::new(10 + index as i64 - (index % 4) as i64), &recipient)
                .sign(&[&owner])
                .unwrap()
        })
        .collect::<Vec<Transaction>>();
    (pool, batch)
}

fn selection_benchmark(c: &mut Criterion) {
    let (pool, batch) = independent_batch(16);
    c.bench_function("fixed_point_selector_16_txs", |b| {
        b.iter(|| FixedPointSelector::new().select(&pool, &batch))
    });
    c.bench_function("greedy_fee_selector_16_txs", |b| {
        b.iter(|| GreedyFeeSelector::new().select(&pool, &batch))
    });
    c.bench_function("topological_greedy_selector_16_txs", |b| {
        b.iter(|| TopologicalGreedySelector::new().select(&pool, &batch))
    });

    // The exhaustive selector enumerates 2^n subsets, keep its batch small.
    let (small_pool, small_batch) = independent_batch(8);
    c.bench_function("exhaustive_selector_8_txs", |b| {
        b.iter(|| ExhaustiveSelector::new().select(&small_pool, &small_batch))
    });
}

criterion_group!(benches, selection_benchmark);
criterion_main!(benches);
