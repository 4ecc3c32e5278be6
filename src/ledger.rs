use crate::selection::BatchSelector;
use crate::transaction::Transaction;
use crate::utxo_pool::UtxoPool;

/// Owns the authoritative UTXO pool and processes one batch (epoch) at a
/// time. The constructor takes the pool by value, so the ledger's copy can
/// never alias a pool held by the host; a strategy's mutations only reach
/// the authoritative pool through the commit in `handle_batch`.
pub struct Ledger {
    utxo_pool: UtxoPool,
}

impl Ledger {
    pub fn new(utxo_pool: UtxoPool) -> Self {
        Self { utxo_pool }
    }

    pub fn utxo_pool(&self) -> &UtxoPool {
        &self.utxo_pool
    }

    /// Runs the selection strategy against the current pool, commits the
    /// resulting pool, and returns the accepted transactions in acceptance
    /// order.
    pub fn handle_batch(
        &mut self,
        batch: &[Transaction],
        selector: &dyn BatchSelector,
    ) -> Vec<Transaction> {
        let outcome = selector.select(&self.utxo_pool, batch);
        let (accepted, utxo_pool) = outcome.into_parts();
        self.utxo_pool = utxo_pool;
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::Coin;
    use crate::crypto::PrivateKey;
    use crate::selection::FixedPointSelector;
    use crate::transaction::{OutputIndex, TransactionBuilder, TransactionOutput, UtxoId};

    #[test]
    fn handling_a_batch_commits_the_accepted_effects() {
        let scrooge = PrivateKey::from_seed([1; 32]);
        let alice = PrivateKey::from_seed([2; 32]);
        let genesis = Transaction::new(
            vec![],
            vec![TransactionOutput::new(Coin::new(10), scrooge.public_key())],
        )
        .unwrap();
        let genesis_utxo_id = UtxoId::new(*genesis.id(), OutputIndex::new(0));
        let mut ledger = Ledger::new(UtxoPool::seeded_from(&genesis));

        let spend = TransactionBuilder::new()
            .claim(genesis_utxo_id)
            .pay(Coin::new(10), &alice.public_key())
            .sign(&[&scrooge])
            .unwrap();
        let accepted = ledger.handle_batch(&[spend.clone()], &FixedPointSelector::new());

        assert_eq!(accepted, vec![spend.clone()]);
        assert!(!ledger.utxo_pool().contains(&genesis_utxo_id));
        assert!(ledger
            .utxo_pool()
            .contains(&UtxoId::new(*spend.id(), OutputIndex::new(0))));
    }

    #[test]
    fn a_rejected_batch_leaves_the_pool_unchanged() {
        let scrooge = PrivateKey::from_seed([1; 32]);
        let alice = PrivateKey::from_seed([2; 32]);
        let genesis = Transaction::new(
            vec![],
            vec![TransactionOutput::new(Coin::new(10), scrooge.public_key())],
        )
        .unwrap();
        let genesis_utxo_id = UtxoId::new(*genesis.id(), OutputIndex::new(0));
        let mut ledger = Ledger::new(UtxoPool::seeded_from(&genesis));

        // Overspends, so no selector would accept it.
        let overspend = TransactionBuilder::new()
            .claim(genesis_utxo_id)
            .pay(Coin::new(12), &alice.public_key())
            .sign(&[&scrooge])
            .unwrap();
        let accepted = ledger.handle_batch(&[overspend], &FixedPointSelector::new());

        assert!(accepted.is_empty());
        assert_eq!(ledger.utxo_pool().len(), 1);
        assert!(ledger.utxo_pool().contains(&genesis_utxo_id));
    }
}
