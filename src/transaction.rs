use crate::coin::Coin;
use crate::crypto::{PrivateKey, PublicKey, Signature};
use crate::hash::Sha256;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A double SHA-256 hash of the transaction content.
/// Two transactions with identical inputs and outputs have the same id, so
/// the id is what defines set membership for transactions.
#[derive(Debug, Hash, Ord, PartialOrd, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct TransactionId(Sha256);

impl TransactionId {
    pub fn new(data: Sha256) -> Self {
        Self(data)
    }

    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The index of a transaction output, the first one is 0.
#[derive(Debug, Hash, Ord, PartialOrd, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct OutputIndex(u32);

impl OutputIndex {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }
}

impl Display for OutputIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one spendable transaction output across the entire history:
/// the transaction that created it, and its position in that transaction.
#[derive(Debug, Hash, Ord, PartialOrd, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct UtxoId {
    // 32 bytes. A pointer to the transaction containing the output to be spent.
    transaction_id: TransactionId,
    // 4 bytes. The position of the output within that transaction.
    output_index: OutputIndex,
}

impl UtxoId {
    pub fn new(transaction_id: TransactionId, output_index: OutputIndex) -> Self {
        Self {
            transaction_id,
            output_index,
        }
    }

    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    pub fn output_index(&self) -> &OutputIndex {
        &self.output_index
    }
}

impl Display for UtxoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.transaction_id, self.output_index)
    }
}

/// A claim on one unspent transaction output, authorized by a signature over
/// the transaction's signable payload at this input's position.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    utxo_id: UtxoId,
    signature: Signature,
}

impl TransactionInput {
    pub fn new(utxo_id: UtxoId, signature: Signature) -> Self {
        Self { utxo_id, signature }
    }

    pub fn utxo_id(&self) -> &UtxoId {
        &self.utxo_id
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

impl Display for TransactionInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.utxo_id)
    }
}

/// A new spendable amount locked to the recipient's public key.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransactionOutput {
    amount: Coin,
    recipient: PublicKey,
}

impl TransactionOutput {
    pub fn new(amount: Coin, recipient: PublicKey) -> Self {
        Self { amount, recipient }
    }

    pub fn amount(&self) -> Coin {
        self.amount
    }

    pub fn recipient(&self) -> &PublicKey {
        &self.recipient
    }
}

impl Display for TransactionOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.amount, self.recipient)
    }
}

/// A transfer of value from unspent outputs of prior transactions to new
/// outputs. Immutable once constructed; the id is derived from the content,
/// so it cannot go stale.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Transaction {
    id: TransactionId,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
}

impl Transaction {
    /// Finalizes a transaction by computing its content-derived id.
    /// A transaction with no inputs is allowed: that is how the genesis
    /// transaction that seeds the UTXO pool is created. It would never pass
    /// validation, and it doesn't have to.
    pub fn new(
        inputs: Vec<TransactionInput>,
        outputs: Vec<TransactionOutput>,
    ) -> Result<Self, String> {
        let id = Self::hash_transaction_content(&inputs, &outputs)?;
        Ok(Self {
            id,
            inputs,
            outputs,
        })
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn inputs(&self) -> &Vec<TransactionInput> {
        &self.inputs
    }

    pub fn outputs(&self) -> &Vec<TransactionOutput> {
        &self.outputs
    }

    /// The bytes that the owner of the UTXO claimed at `input_index` must
    /// sign. The payload covers every claimed UTXO id and every output, plus
    /// the input index itself, but none of the signatures. Excluding all
    /// signatures (rather than only the one being computed) keeps multi-input
    /// signing independent of the order in which inputs are signed.
    pub fn signable_payload(
        claimed_utxo_ids: &[UtxoId],
        outputs: &[TransactionOutput],
        input_index: u32,
    ) -> Result<Vec<u8>, String> {
        bincode::serialize(&(claimed_utxo_ids, outputs, input_index)).map_err(|e| e.to_string())
    }

    /// The signable payload of this transaction at the given input position.
    pub fn signable_payload_for_input(&self, input_index: u32) -> Result<Vec<u8>, String> {
        let claimed_utxo_ids = self
            .inputs
            .iter()
            .map(|input| *input.utxo_id())
            .collect::<Vec<UtxoId>>();
        Self::signable_payload(&claimed_utxo_ids, &self.outputs, input_index)
    }

    fn hash_transaction_content(
        inputs: &[TransactionInput],
        outputs: &[TransactionOutput],
    ) -> Result<TransactionId, String> {
        let data = bincode::serialize(&(inputs, outputs)).map_err(|e| e.to_string())?;
        Ok(TransactionId::new(Sha256::double_digest(&data)))
    }
}

impl Display for Transaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Collects claimed UTXOs and outputs, then signs every input and finalizes
/// the transaction. One private key per claimed UTXO, in claim order.
pub struct TransactionBuilder {
    claimed_utxo_ids: Vec<UtxoId>,
    outputs: Vec<TransactionOutput>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self {
            claimed_utxo_ids: vec![],
            outputs: vec![],
        }
    }

    pub fn claim(mut self, utxo_id: UtxoId) -> Self {
        self.claimed_utxo_ids.push(utxo_id);
        self
    }

    pub fn pay(mut self, amount: Coin, recipient: &PublicKey) -> Self {
        self.outputs
            .push(TransactionOutput::new(amount, recipient.clone()));
        self
    }

    pub fn sign(self, keys: &[&PrivateKey]) -> Result<Transaction, String> {
        if keys.len() != self.claimed_utxo_ids.len() {
            return Err(format!(
                "Expected one key per claimed UTXO: {} keys for {} claims",
                keys.len(),
                self.claimed_utxo_ids.len()
            ));
        }
        let mut inputs = Vec::with_capacity(self.claimed_utxo_ids.len());
        for (index, (utxo_id, key)) in self.claimed_utxo_ids.iter().zip(keys).enumerate() {
            let payload =
                Transaction::signable_payload(&self.claimed_utxo_ids, &self.outputs, index as u32)?;
            inputs.push(TransactionInput::new(*utxo_id, key.sign(&payload)));
        }
        Transaction::new(inputs, self.outputs)
    }
}
