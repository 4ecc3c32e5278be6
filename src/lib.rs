pub mod coin;
pub mod crypto;
pub mod hash;
pub mod ledger;
pub mod selection;
pub mod transaction;
pub mod utxo_pool;
pub mod validation;

pub use self::{
    coin::*, crypto::*, hash::*, ledger::*, selection::*, transaction::*, utxo_pool::*,
    validation::*,
};
