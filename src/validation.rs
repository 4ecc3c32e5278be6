use crate::coin::Coin;
use crate::crypto;
use crate::transaction::{Transaction, TransactionOutput};
use crate::utxo_pool::UtxoPool;
use std::collections::HashSet;

/// Decides whether a single transaction is acceptable against a snapshot of
/// the UTXO pool. A transaction is valid iff all of the following hold:
///   1. every claimed UTXO exists in the pool,
///   2. every input signature verifies against the claimed output's owner
///      key and the transaction's signable payload at that input position,
///   3. no UTXO is claimed more than once by the transaction itself
///      (cross-transaction double spends are the selectors' concern),
///   4. every output amount is non-negative,
///   5. the claimed input total covers the output total (the fee is never
///      negative).
///
/// The validator is a pure function of the transaction and the pool. It
/// never mutates the pool.
pub struct TransactionValidator {}

impl TransactionValidator {
    pub fn is_valid(transaction: &Transaction, utxo_pool: &UtxoPool) -> bool {
        Self::validate(transaction, utxo_pool).is_ok()
    }

    /// Checks all validity rules, short-circuiting on the first failure.
    /// The error message names the failing rule; the primary contract is
    /// still the boolean verdict from `is_valid`.
    pub fn validate(transaction: &Transaction, utxo_pool: &UtxoPool) -> Result<(), String> {
        Self::validate_claimed_utxos_exist(transaction, utxo_pool)?;
        Self::validate_signatures(transaction, utxo_pool)?;
        Self::validate_no_utxo_claimed_twice(transaction)?;
        Self::validate_output_amounts_non_negative(transaction)?;
        Self::validate_value_conservation(transaction, utxo_pool)
    }

    fn validate_claimed_utxos_exist(
        transaction: &Transaction,
        utxo_pool: &UtxoPool,
    ) -> Result<(), String> {
        for input in transaction.inputs() {
            if !utxo_pool.contains(input.utxo_id()) {
                return Err(format!(
                    "Transaction: {} claims UTXO: {} which is not in the pool",
                    transaction.id(),
                    input.utxo_id()
                ));
            }
        }
        Ok(())
    }

    fn validate_signatures(transaction: &Transaction, utxo_pool: &UtxoPool) -> Result<(), String> {
        for (index, input) in transaction.inputs().iter().enumerate() {
            let claimed_output = utxo_pool.output(input.utxo_id()).ok_or_else(|| {
                format!(
                    "Transaction: {} claims UTXO: {} which is not in the pool",
                    transaction.id(),
                    input.utxo_id()
                )
            })?;
            let payload = transaction.signable_payload_for_input(index as u32)?;
            if !crypto::verify(claimed_output.recipient(), &payload, input.signature()) {
                return Err(format!(
                    "Transaction: {} has an invalid signature at input: {}",
                    transaction.id(),
                    index
                ));
            }
        }
        Ok(())
    }

    fn validate_no_utxo_claimed_twice(transaction: &Transaction) -> Result<(), String> {
        let mut claimed = HashSet::new();
        for input in transaction.inputs() {
            if !claimed.insert(*input.utxo_id()) {
                return Err(format!(
                    "Transaction: {} claims UTXO: {} more than once",
                    transaction.id(),
                    input.utxo_id()
                ));
            }
        }
        Ok(())
    }

    fn validate_output_amounts_non_negative(transaction: &Transaction) -> Result<(), String> {
        for (index, output) in transaction.outputs().iter().enumerate() {
            if output.amount().is_negative() {
                return Err(format!(
                    "Transaction: {} has a negative amount: {} at output: {}",
                    transaction.id(),
                    output.amount(),
                    index
                ));
            }
        }
        Ok(())
    }

    fn validate_value_conservation(
        transaction: &Transaction,
        utxo_pool: &UtxoPool,
    ) -> Result<(), String> {
        let fee = FeeCalculator::fee(transaction, utxo_pool);
        if fee.is_negative() {
            Err(format!(
                "Transaction: {} creates more value than it claims, fee: {}",
                transaction.id(),
                fee
            ))
        } else {
            Ok(())
        }
    }
}

/// Derives a transaction's fee against a pool snapshot: the total amount of
/// the claimed UTXOs minus the total amount of the created outputs. The fee
/// is collected implicitly by being left unassigned to any output.
pub struct FeeCalculator {}

impl FeeCalculator {
    /// Claimed UTXOs that are missing from the pool contribute zero, so the
    /// fee of an unvalidated transaction can come out negative. Callers are
    /// expected to validate first.
    pub fn fee(transaction: &Transaction, utxo_pool: &UtxoPool) -> Coin {
        let input_total = transaction
            .inputs()
            .iter()
            .filter_map(|input| utxo_pool.output(input.utxo_id()))
            .map(TransactionOutput::amount)
            .sum::<Coin>();
        let output_total = transaction
            .outputs()
            .iter()
            .map(TransactionOutput::amount)
            .sum::<Coin>();
        input_total - output_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::PrivateKey;
    use crate::transaction::{OutputIndex, TransactionBuilder, UtxoId};

    struct Fixture {
        scrooge: PrivateKey,
        alice: PrivateKey,
        genesis_utxo_id: UtxoId,
        pool: UtxoPool,
    }

    // Seeds a pool with a single output of 10 coins owned by Scrooge.
    fn fixture() -> Fixture {
        let scrooge = PrivateKey::from_seed([1; 32]);
        let alice = PrivateKey::from_seed([2; 32]);
        let genesis = Transaction::new(
            vec![],
            vec![TransactionOutput::new(Coin::new(10), scrooge.public_key())],
        )
        .unwrap();
        let pool = UtxoPool::seeded_from(&genesis);
        let genesis_utxo_id = UtxoId::new(*genesis.id(), OutputIndex::new(0));
        Fixture {
            scrooge,
            alice,
            genesis_utxo_id,
            pool,
        }
    }

    #[test]
    fn well_formed_split_is_valid() {
        let f = fixture();
        let split = TransactionBuilder::new()
            .claim(f.genesis_utxo_id)
            .pay(Coin::new(5), &f.alice.public_key())
            .pay(Coin::new(3), &f.alice.public_key())
            .pay(Coin::new(2), &f.alice.public_key())
            .sign(&[&f.scrooge])
            .unwrap();
        assert!(TransactionValidator::is_valid(&split, &f.pool));
        // Exact spend, so the fee is zero.
        assert_eq!(FeeCalculator::fee(&split, &f.pool), Coin::zero());
    }

    #[test]
    fn signature_from_wrong_key_is_rejected() {
        let f = fixture();
        // Alice signs a spend of Scrooge's coin.
        let theft = TransactionBuilder::new()
            .claim(f.genesis_utxo_id)
            .pay(Coin::new(10), &f.alice.public_key())
            .sign(&[&f.alice])
            .unwrap();
        assert!(!TransactionValidator::is_valid(&theft, &f.pool));
    }

    #[test]
    fn claiming_a_missing_utxo_is_rejected() {
        let f = fixture();
        let phantom = Transaction::new(
            vec![],
            vec![TransactionOutput::new(Coin::new(1), f.alice.public_key())],
        )
        .unwrap();
        let spend = TransactionBuilder::new()
            .claim(UtxoId::new(*phantom.id(), OutputIndex::new(0)))
            .pay(Coin::new(1), &f.alice.public_key())
            .sign(&[&f.scrooge])
            .unwrap();
        assert!(!TransactionValidator::is_valid(&spend, &f.pool));
    }

    #[test]
    fn claiming_the_same_utxo_twice_is_rejected() {
        let f = fixture();
        // Both signatures verify, the double claim alone must reject it.
        let double_claim = TransactionBuilder::new()
            .claim(f.genesis_utxo_id)
            .claim(f.genesis_utxo_id)
            .pay(Coin::new(20), &f.alice.public_key())
            .sign(&[&f.scrooge, &f.scrooge])
            .unwrap();
        assert!(!TransactionValidator::is_valid(&double_claim, &f.pool));
    }

    #[test]
    fn negative_output_amount_is_rejected() {
        let f = fixture();
        let negative = TransactionBuilder::new()
            .claim(f.genesis_utxo_id)
            .pay(Coin::new(11), &f.alice.public_key())
            .pay(Coin::new(-1), &f.alice.public_key())
            .sign(&[&f.scrooge])
            .unwrap();
        assert!(!TransactionValidator::is_valid(&negative, &f.pool));
    }

    #[test]
    fn creating_more_value_than_claimed_is_rejected() {
        let f = fixture();
        let overspend = TransactionBuilder::new()
            .claim(f.genesis_utxo_id)
            .pay(Coin::new(5), &f.alice.public_key())
            .pay(Coin::new(4), &f.alice.public_key())
            .pay(Coin::new(3), &f.alice.public_key())
            .sign(&[&f.scrooge])
            .unwrap();
        assert!(!TransactionValidator::is_valid(&overspend, &f.pool));
    }

    #[test]
    fn validation_is_idempotent_against_an_unmutated_pool() {
        let f = fixture();
        let spend = TransactionBuilder::new()
            .claim(f.genesis_utxo_id)
            .pay(Coin::new(8), &f.alice.public_key())
            .sign(&[&f.scrooge])
            .unwrap();
        let first = TransactionValidator::is_valid(&spend, &f.pool);
        let second = TransactionValidator::is_valid(&spend, &f.pool);
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn fee_is_claimed_total_minus_output_total() {
        let f = fixture();
        let spend = TransactionBuilder::new()
            .claim(f.genesis_utxo_id)
            .pay(Coin::new(5), &f.alice.public_key())
            .pay(Coin::new(3), &f.alice.public_key())
            .sign(&[&f.scrooge])
            .unwrap();
        assert_eq!(FeeCalculator::fee(&spend, &f.pool), Coin::new(2));
    }

    #[test]
    fn missing_claims_contribute_zero_to_the_fee() {
        let f = fixture();
        let phantom = Transaction::new(
            vec![],
            vec![TransactionOutput::new(Coin::new(9), f.alice.public_key())],
        )
        .unwrap();
        let spend = TransactionBuilder::new()
            .claim(UtxoId::new(*phantom.id(), OutputIndex::new(0)))
            .pay(Coin::new(4), &f.alice.public_key())
            .sign(&[&f.scrooge])
            .unwrap();
        assert_eq!(FeeCalculator::fee(&spend, &f.pool), Coin::new(-4));
    }
}
