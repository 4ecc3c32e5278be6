use crate::transaction::{OutputIndex, Transaction, TransactionOutput, UtxoId};
use std::collections::HashMap;

/// The set of currently spendable transaction outputs, indexed by the
/// transaction that created them and their position in that transaction.
///
/// Cloning a pool produces an independent snapshot: selection strategies work
/// on their own clone and never alias the authoritative pool, so a strategy
/// run can only leak its mutations back through an explicit commit.
#[derive(Debug, Clone)]
pub struct UtxoPool {
    utxos: HashMap<UtxoId, TransactionOutput>,
}

impl UtxoPool {
    pub fn new() -> Self {
        Self {
            utxos: HashMap::new(),
        }
    }

    /// Seeds a pool with every output of the given transaction. This is how
    /// the genesis transaction brings the first spendable value into
    /// existence without passing validation.
    pub fn seeded_from(transaction: &Transaction) -> Self {
        let mut pool = Self::new();
        for (index, output) in transaction.outputs().iter().enumerate() {
            pool.add(
                UtxoId::new(*transaction.id(), OutputIndex::new(index as u32)),
                output.clone(),
            );
        }
        pool
    }

    pub fn add(&mut self, utxo_id: UtxoId, output: TransactionOutput) {
        self.utxos.insert(utxo_id, output);
    }

    pub fn remove(&mut self, utxo_id: &UtxoId) -> Option<TransactionOutput> {
        self.utxos.remove(utxo_id)
    }

    pub fn contains(&self, utxo_id: &UtxoId) -> bool {
        self.utxos.contains_key(utxo_id)
    }

    pub fn output(&self, utxo_id: &UtxoId) -> Option<&TransactionOutput> {
        self.utxos.get(utxo_id)
    }

    pub fn utxo_ids(&self) -> Vec<UtxoId> {
        let mut utxo_ids = self.utxos.keys().copied().collect::<Vec<UtxoId>>();
        // HashMap iteration order is arbitrary, keep the listing deterministic.
        utxo_ids.sort();
        utxo_ids
    }

    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    /// Applies the transaction's effect: removes every claimed UTXO and adds
    /// every created output. The application is atomic: if any claimed UTXO
    /// is missing, the pool is left untouched.
    pub fn apply(&mut self, transaction: &Transaction) -> Result<(), String> {
        for input in transaction.inputs() {
            if !self.contains(input.utxo_id()) {
                return Err(format!(
                    "Cannot apply transaction: {} because UTXO: {} is not in the pool",
                    transaction.id(),
                    input.utxo_id()
                ));
            }
        }
        for input in transaction.inputs() {
            self.utxos.remove(input.utxo_id());
        }
        for (index, output) in transaction.outputs().iter().enumerate() {
            self.add(
                UtxoId::new(*transaction.id(), OutputIndex::new(index as u32)),
                output.clone(),
            );
        }
        Ok(())
    }
}
