//! Record shopping-cart transactions and print store receipts.
//!
//! Usage: cargo run --bin shop -- --add "milk,bread,eggs"

use anyhow::Result;
use basket_mining::{Config, JsonFileStore, Transaction, TransactionStore};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Record carts in the transaction store")]
struct Args {
    /// Path of the transaction store file
    #[arg(short, long, default_value = "transactions.json")]
    store: String,

    /// Comma-separated items to record as one transaction
    #[arg(short, long)]
    add: Option<String>,

    /// Print the item catalog
    #[arg(short, long)]
    catalog: bool,

    /// Print all recorded receipts
    #[arg(short, long)]
    list: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = Config::from_env("BASKET");
    config.validate()?;
    let store = JsonFileStore::new(&args.store);

    if args.catalog {
        println!("Catalog:");
        for item in &config.catalog {
            println!("  - {}", item);
        }
        println!();
    }

    if let Some(cart) = &args.add {
        let items: Vec<String> = cart
            .split(',')
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();

        if items.is_empty() {
            anyhow::bail!("select at least one item for the cart");
        }

        let unknown: Vec<&str> = items
            .iter()
            .filter(|item| !config.catalog.contains(*item))
            .map(|item| item.as_str())
            .collect();
        if !unknown.is_empty() {
            println!("Warning: not in the catalog: {}", unknown.join(", "));
        }

        store.add(Transaction::new(items))?;
        println!("Transaction added!");
        println!();
    }

    let show_receipts = args.list || (args.add.is_none() && !args.catalog);
    if show_receipts {
        let transactions = store.load()?;
        if transactions.is_empty() {
            println!("No transactions recorded yet.");
        } else {
            for (i, txn) in transactions.iter().enumerate() {
                print_receipt(i + 1, txn);
            }
        }
    }

    Ok(())
}

fn print_receipt(number: usize, transaction: &Transaction) {
    println!("RECEIPT #{:03}", number);
    println!("------------------------");
    println!("Items:");
    for item in transaction.items() {
        println!("- {}", item);
    }
    println!("------------------------");
    println!("Total items: {}", transaction.len());
    println!();
}
