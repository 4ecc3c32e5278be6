use crate::selection::{BatchSelector, SelectionOutcome};
use crate::transaction::Transaction;
use crate::utxo_pool::UtxoPool;
use crate::validation::TransactionValidator;
use std::collections::HashSet;

/// Accepts every transaction that can be made valid by repeatedly applying
/// already-accepted transactions, independent of submission order, with no
/// fee optimization.
///
/// The selector sweeps the batch in full passes. Accepting a transaction can
/// only unlock further transactions (its outputs become spendable), so the
/// accepted set grows monotonically and the loop reaches a fixed point after
/// at most |batch| passes. A transaction competing for an already-consumed
/// UTXO simply never validates and stays rejected.
pub struct FixedPointSelector {}

impl FixedPointSelector {
    pub fn new() -> Self {
        Self {}
    }
}

impl BatchSelector for FixedPointSelector {
    fn name(&self) -> &'static str {
        "fixed-point"
    }

    fn select(&self, utxo_pool: &UtxoPool, batch: &[Transaction]) -> SelectionOutcome {
        let mut working_pool = utxo_pool.clone();
        let mut accepted = vec![];
        let mut accepted_ids = HashSet::new();

        let mut progress = true;
        while progress {
            progress = false;
            for transaction in batch {
                if accepted_ids.contains(transaction.id()) {
                    continue;
                }
                if TransactionValidator::is_valid(transaction, &working_pool)
                    && working_pool.apply(transaction).is_ok()
                {
                    accepted_ids.insert(*transaction.id());
                    accepted.push(transaction.clone());
                    progress = true;
                }
            }
        }
        SelectionOutcome::new(accepted, working_pool)
    }
}
