pub mod exhaustive;
pub mod fixed_point;
pub mod greedy;
pub mod topological;

pub use self::{exhaustive::*, fixed_point::*, greedy::*, topological::*};

use crate::coin::Coin;
use crate::transaction::Transaction;
use crate::utxo_pool::UtxoPool;
use crate::validation::FeeCalculator;

/// The result of one selection run: the accepted transactions in acceptance
/// order, and the working pool with all of their effects applied. Nothing is
/// committed until the caller decides to adopt the pool.
pub struct SelectionOutcome {
    accepted: Vec<Transaction>,
    utxo_pool: UtxoPool,
}

impl SelectionOutcome {
    pub fn new(accepted: Vec<Transaction>, utxo_pool: UtxoPool) -> Self {
        Self {
            accepted,
            utxo_pool,
        }
    }

    pub fn accepted(&self) -> &Vec<Transaction> {
        &self.accepted
    }

    pub fn utxo_pool(&self) -> &UtxoPool {
        &self.utxo_pool
    }

    pub fn into_parts(self) -> (Vec<Transaction>, UtxoPool) {
        (self.accepted, self.utxo_pool)
    }
}

/// A strategy that picks a mutually consistent subset of a proposed batch.
///
/// Every strategy works on its own snapshot of the given pool: each accepted
/// transaction's effect is applied to the snapshot before further
/// transactions are considered, which is what rules out cross-transaction
/// double spends (the validator itself only rejects double claims within a
/// single transaction).
pub trait BatchSelector {
    fn name(&self) -> &'static str;

    /// Decides each batch transaction exactly once: accepted transactions
    /// atomically transform the working snapshot, everything else is
    /// rejected for this run.
    fn select(&self, utxo_pool: &UtxoPool, batch: &[Transaction]) -> SelectionOutcome;
}

/// Replays the accepted transactions against a snapshot of the starting pool
/// and sums their fees. The transactions must be given in an order in which
/// they apply cleanly, which every selector's acceptance order satisfies.
pub fn total_fee(utxo_pool: &UtxoPool, accepted: &[Transaction]) -> Result<Coin, String> {
    let mut working_pool = utxo_pool.clone();
    let mut total = Coin::zero();
    for transaction in accepted {
        total = total + FeeCalculator::fee(transaction, &working_pool);
        working_pool.apply(transaction)?;
    }
    Ok(total)
}
