use crate::selection::{BatchSelector, SelectionOutcome};
use crate::transaction::Transaction;
use crate::utxo_pool::UtxoPool;
use crate::validation::TransactionValidator;
use std::collections::{HashSet, VecDeque};

/// Orders the batch by its intra-batch dependencies before selecting, so
/// that a producer transaction is always considered before the transactions
/// spending its outputs, then validates and applies in a single walk with no
/// backtracking.
///
/// Dependency cycle policy: transactions participating in a cycle never
/// reach zero in-degree, are omitted from the topological order, and are
/// therefore silently dropped from consideration. (A real cycle cannot be
/// constructed through `Transaction::new` because identities are content
/// hashes, but the ordering layer still defends against one.)
pub struct TopologicalGreedySelector {}

impl TopologicalGreedySelector {
    pub fn new() -> Self {
        Self {}
    }
}

impl BatchSelector for TopologicalGreedySelector {
    fn name(&self) -> &'static str {
        "topological"
    }

    fn select(&self, utxo_pool: &UtxoPool, batch: &[Transaction]) -> SelectionOutcome {
        let mut working_pool = utxo_pool.clone();
        let mut accepted = vec![];
        let mut accepted_ids = HashSet::new();

        for index in topological_order(batch) {
            let transaction = &batch[index];
            if accepted_ids.contains(transaction.id()) {
                continue;
            }
            if TransactionValidator::is_valid(transaction, &working_pool)
                && working_pool.apply(transaction).is_ok()
            {
                accepted_ids.insert(*transaction.id());
                accepted.push(transaction.clone());
            }
        }
        SelectionOutcome::new(accepted, working_pool)
    }
}

/// Builds the dependency graph over batch positions (an edge from a producer
/// to every batch transaction claiming one of its outputs) and returns the
/// positions in a topological order.
fn topological_order(batch: &[Transaction]) -> Vec<usize> {
    let mut dependents = vec![vec![]; batch.len()];
    let mut in_degree = vec![0; batch.len()];

    for (consumer_index, consumer) in batch.iter().enumerate() {
        for input in consumer.inputs() {
            for (producer_index, producer) in batch.iter().enumerate() {
                if producer_index != consumer_index
                    && input.utxo_id().transaction_id() == producer.id()
                {
                    dependents[producer_index].push(consumer_index);
                    in_degree[consumer_index] += 1;
                }
            }
        }
    }
    kahn_order(&dependents, in_degree)
}

/// Kahn's algorithm. Nodes that never reach zero in-degree (members of a
/// cycle) are omitted from the returned order.
fn kahn_order(dependents: &[Vec<usize>], mut in_degree: Vec<usize>) -> Vec<usize> {
    let mut queue = in_degree
        .iter()
        .enumerate()
        .filter(|(_, &degree)| degree == 0)
        .map(|(index, _)| index)
        .collect::<VecDeque<usize>>();

    let mut order = vec![];
    while let Some(node) = queue.pop_front() {
        order.push(node);
        for &dependent in &dependents[node] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                queue.push_back(dependent);
            }
        }
    }
    order
}
