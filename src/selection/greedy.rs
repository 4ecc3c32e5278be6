use crate::coin::Coin;
use crate::selection::{BatchSelector, SelectionOutcome};
use crate::transaction::Transaction;
use crate::utxo_pool::UtxoPool;
use crate::validation::{FeeCalculator, TransactionValidator};
use std::collections::HashSet;

/// A greedy heuristic for maximizing the collected fee: at each step, accept
/// the highest-fee transaction that currently validates, then re-evaluate
/// (accepting one transaction may unlock others).
///
/// Locally optimal, not globally: a lower-fee transaction sometimes needs to
/// be accepted first to unlock a higher-fee one it feeds, and the greedy
/// choice can consume the UTXOs that combination needed. The exhaustive
/// selector exists as the oracle for those cases.
pub struct GreedyFeeSelector {}

impl GreedyFeeSelector {
    pub fn new() -> Self {
        Self {}
    }
}

impl BatchSelector for GreedyFeeSelector {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn select(&self, utxo_pool: &UtxoPool, batch: &[Transaction]) -> SelectionOutcome {
        let mut working_pool = utxo_pool.clone();
        let mut accepted = vec![];
        let mut accepted_ids = HashSet::new();

        loop {
            let mut best: Option<(usize, Coin)> = None;
            for (index, transaction) in batch.iter().enumerate() {
                if accepted_ids.contains(transaction.id()) {
                    continue;
                }
                if !TransactionValidator::is_valid(transaction, &working_pool) {
                    continue;
                }
                let fee = FeeCalculator::fee(transaction, &working_pool);
                // Strictly greater, so ties go to the first transaction in
                // batch order. This keeps the strategy deterministic.
                let improves = match best {
                    None => true,
                    Some((_, best_fee)) => fee > best_fee,
                };
                if improves {
                    best = Some((index, fee));
                }
            }

            match best {
                Some((index, _)) => {
                    let transaction = &batch[index];
                    if working_pool.apply(transaction).is_ok() {
                        accepted_ids.insert(*transaction.id());
                        accepted.push(transaction.clone());
                    }
                }
                None => break,
            }
        }
        SelectionOutcome::new(accepted, working_pool)
    }
}
