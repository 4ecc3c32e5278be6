use clap::{App, Arg};
use clearcoin_lib::{
    BatchSelector, Coin, ExhaustiveSelector, FixedPointSelector, GreedyFeeSelector, Ledger,
    OutputIndex, PrivateKey, Transaction, TransactionBuilder, TransactionOutput,
    TransactionValidator, TopologicalGreedySelector, UtxoId, UtxoPool,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let matches = App::new("clearcoin")
        .about("ClearCoin ledger validator demo: seeds a pool with one coin and processes a sample batch.")
        .arg(
            Arg::new("selector")
                .short('s')
                .long("selector")
                .value_name("STRATEGY")
                .about("The batch selection strategy to run.")
                .takes_value(true)
                .possible_values(&["fixed-point", "greedy", "exhaustive", "topological", "all"])
                .default_value("all"),
        )
        .get_matches();
    let choice = matches.value_of("selector").unwrap().to_string();
    run_demo(&choice)
}

fn run_demo(choice: &str) -> Result<(), Box<dyn Error>> {
    let scrooge = PrivateKey::generate();
    let alice = PrivateKey::generate();

    // The genesis transaction brings the first coin into existence; it is
    // never validated, its outputs simply seed the pool.
    let genesis = Transaction::new(
        vec![],
        vec![TransactionOutput::new(Coin::new(10), scrooge.public_key())],
    )?;
    let pool = UtxoPool::seeded_from(&genesis);
    println!("Pool seeded with {} owned by Scrooge", Coin::new(10));

    // Scrooge splits his coin into 5 + 3 + 2 for Alice.
    let split = TransactionBuilder::new()
        .claim(UtxoId::new(*genesis.id(), OutputIndex::new(0)))
        .pay(Coin::new(5), &alice.public_key())
        .pay(Coin::new(3), &alice.public_key())
        .pay(Coin::new(2), &alice.public_key())
        .sign(&[&scrooge])?;
    println!(
        "Split transaction {} is valid: {}",
        split.id(),
        TransactionValidator::is_valid(&split, &pool)
    );

    let batch = vec![split];
    for selector in selectors_for(choice) {
        let mut ledger = Ledger::new(pool.clone());
        let accepted = ledger.handle_batch(&batch, selector.as_ref());
        let collected = clearcoin_lib::total_fee(&pool, &accepted)?;
        println!(
            "Selector: {} accepted {} transaction(s), collected fee: {}",
            selector.name(),
            accepted.len(),
            collected
        );
        for utxo_id in ledger.utxo_pool().utxo_ids() {
            let output = ledger.utxo_pool().output(&utxo_id).ok_or("missing UTXO")?;
            println!("  UTXO {} holds {}", utxo_id, output.amount());
        }
    }
    Ok(())
}

fn selectors_for(choice: &str) -> Vec<Box<dyn BatchSelector>> {
    match choice {
        "fixed-point" => vec![Box::new(FixedPointSelector::new())],
        "greedy" => vec![Box::new(GreedyFeeSelector::new())],
        "exhaustive" => vec![Box::new(ExhaustiveSelector::new())],
        "topological" => vec![Box::new(TopologicalGreedySelector::new())],
        _ => vec![
            Box::new(FixedPointSelector::new()),
            Box::new(GreedyFeeSelector::new()),
            Box::new(ExhaustiveSelector::new()),
            Box::new(TopologicalGreedySelector::new()),
        ],
    }
}
