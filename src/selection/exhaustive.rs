use crate::coin::Coin;
use crate::selection::{BatchSelector, SelectionOutcome};
use crate::transaction::Transaction;
use crate::utxo_pool::UtxoPool;
use crate::validation::{FeeCalculator, TransactionValidator};

/// Enumerates every subset of the batch and keeps the feasible one with the
/// highest total fee. Exponential in the batch size, so it is a correctness
/// oracle for the heuristic selectors rather than a production strategy;
/// bounding the batch size is the caller's responsibility.
///
/// Known limitation: a subset's members are applied in batch order, not in
/// every permutation, so a subset that is only feasible in a different order
/// is rejected. Dependent transactions listed after their parents are still
/// handled correctly.
///
/// Ties on total fee go to the subset accepting more transactions, so a
/// feasible zero-fee transaction still beats the empty subset.
pub struct ExhaustiveSelector {}

impl ExhaustiveSelector {
    pub fn new() -> Self {
        Self {}
    }
}

impl BatchSelector for ExhaustiveSelector {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn select(&self, utxo_pool: &UtxoPool, batch: &[Transaction]) -> SelectionOutcome {
        // Subsets are enumerated as bitmasks over a u64.
        assert!(
            batch.len() < 64,
            "Exhaustive selection enumerates 2^n subsets and is limited to batches below 64"
        );

        // The empty subset is always feasible with a total fee of zero.
        let mut best_accepted: Vec<Transaction> = vec![];
        let mut best_pool = utxo_pool.clone();
        let mut best_fee = Coin::zero();

        for mask in 1u64..(1u64 << batch.len()) {
            let mut working_pool = utxo_pool.clone();
            let mut accepted = vec![];
            let mut subset_fee = Coin::zero();
            let mut feasible = true;

            for (index, transaction) in batch.iter().enumerate() {
                if mask & (1u64 << index) == 0 {
                    continue;
                }
                if !TransactionValidator::is_valid(transaction, &working_pool) {
                    // One infeasible member rejects the whole subset.
                    feasible = false;
                    break;
                }
                // The fee has to be read off the evolving snapshot: a
                // dependent transaction's claims only exist there.
                subset_fee = subset_fee + FeeCalculator::fee(transaction, &working_pool);
                if working_pool.apply(transaction).is_err() {
                    feasible = false;
                    break;
                }
                accepted.push(transaction.clone());
            }

            if feasible
                && (subset_fee > best_fee
                    || (subset_fee == best_fee && accepted.len() > best_accepted.len()))
            {
                best_fee = subset_fee;
                best_accepted = accepted;
                best_pool = working_pool;
            }
        }
        SelectionOutcome::new(best_accepted, best_pool)
    }
}
