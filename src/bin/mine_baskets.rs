//! Run the mining engines over the recorded transactions.
//!
//! Usage: cargo run --bin mine_baskets -- --method all --k 2

use anyhow::Result;
use basket_mining::{
    item_popularity, most_popular, Apriori, Config, JsonFileStore, KMeans, Transaction,
    TransactionEncoder, TransactionStore, MIN_TRANSACTIONS,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Mine clusters and association rules from the store")]
struct Args {
    /// Path of the transaction store file
    #[arg(short, long, default_value = "transactions.json")]
    store: String,

    /// Mining method: kmeans, apriori, popularity, all
    #[arg(short, long, default_value = "all")]
    method: String,

    /// Number of clusters
    #[arg(short, long, default_value = "2")]
    k: usize,

    /// Minimum itemset support
    #[arg(long, default_value = "0.3")]
    min_support: f64,

    /// Minimum rule confidence
    #[arg(long, default_value = "0.7")]
    min_confidence: f64,

    /// Fixed RNG seed for reproducible clustering
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = Config::from_env("BASKET");
    config.validate()?;

    let store = JsonFileStore::new(&args.store);
    let transactions = store.load()?;

    println!("Basket Mining");
    println!("=============");
    println!("Transactions: {}", transactions.len());
    println!();

    if transactions.len() < MIN_TRANSACTIONS {
        println!(
            "Create at least {} transactions to enable data mining.",
            MIN_TRANSACTIONS
        );
        return Ok(());
    }

    let seed = args.seed.or(config.kmeans.seed);

    match args.method.as_str() {
        "kmeans" => run_clustering(&transactions, args.k, seed)?,
        "apriori" => run_rules(&transactions, args.min_support, args.min_confidence),
        "popularity" => run_popularity(&transactions),
        _ => {
            run_clustering(&transactions, args.k, seed)?;
            run_rules(&transactions, args.min_support, args.min_confidence);
            run_popularity(&transactions);
        }
    }

    Ok(())
}

fn run_clustering(transactions: &[Transaction], k: usize, seed: Option<u64>) -> Result<()> {
    println!("K-Means Clustering Results");
    println!("--------------------------");

    let encoded = TransactionEncoder::encode(transactions);
    let mut engine = KMeans::new(k);
    if let Some(seed) = seed {
        engine = engine.seed(seed);
    }
    let fit = engine.fit(&encoded.matrix)?;

    println!("{:<12} {:>24}", "Cluster", "Number of Transactions");
    for row in fit.cluster_counts() {
        println!("{:<12} {:>24}", row.label, row.count);
    }

    if let (Some(largest), Some(smallest)) = (fit.largest(), fit.smallest()) {
        println!();
        println!("Insights:");
        println!(
            "- Most carts fall into {} with {} transactions.",
            largest.label, largest.count
        );
        println!(
            "- Least activity sits in {} with {} transactions.",
            smallest.label, smallest.count
        );
    }
    if !fit.converged {
        println!("(no convergence within {} iterations)", fit.iterations);
    }
    println!();

    Ok(())
}

fn run_rules(transactions: &[Transaction], min_support: f64, min_confidence: f64) {
    println!("Association Rules");
    println!("-----------------");

    let rules = Apriori::new()
        .min_support(min_support)
        .min_confidence(min_confidence)
        .mine(transactions);

    if rules.is_empty() {
        println!("No strong association rules found. Try adding more diverse transactions.");
        println!();
        return;
    }

    println!(
        "{:<24} {:<24} {:>8} {:>11} {:>6}",
        "antecedents", "consequents", "support", "confidence", "lift"
    );
    for rule in rules.sorted_by_confidence() {
        println!(
            "{:<24} {:<24} {:>8.2} {:>11.2} {:>6.2}",
            rule.antecedent.to_string(),
            rule.consequent.to_string(),
            rule.support,
            rule.confidence,
            rule.lift
        );
    }

    if let Some(top) = rules.strongest() {
        println!();
        println!("Insights:");
        println!(
            "- Strongest rule: customers buying {} often add {}.",
            top.antecedent, top.consequent
        );
        println!(
            "- Confidence {:.2}, lift {:.2}.",
            top.confidence, top.lift
        );
    }
    println!();
}

fn run_popularity(transactions: &[Transaction]) {
    println!("Item Popularity");
    println!("---------------");

    let table = item_popularity(transactions);
    if table.is_empty() {
        println!("No items recorded yet.");
        return;
    }

    println!("{:<12} {:>6}", "Item", "Count");
    for row in &table {
        println!("{:<12} {:>6}", row.item, row.count);
    }

    let top = most_popular(transactions);
    if let Some(first) = top.first() {
        let names: Vec<&str> = top.iter().map(|c| c.item.as_str()).collect();
        println!();
        println!(
            "Most popular item(s): {} with {} purchases each.",
            names.join(", "),
            first.count
        );
    }
}
