//! Integration tests for basket mining

use approx::assert_relative_eq;
use basket_mining::prelude::*;
use basket_mining::{Itemset, StorageError};
use tempfile::tempdir;

/// Create the walkthrough batch: five carts over milk, bread, and eggs
fn create_test_transactions() -> Vec<Transaction> {
    vec![
        Transaction::from_items(["milk", "bread"]),
        Transaction::from_items(["milk", "bread"]),
        Transaction::from_items(["milk"]),
        Transaction::from_items(["bread", "eggs"]),
        Transaction::from_items(["eggs"]),
    ]
}

#[test]
fn test_store_round_trip() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("transactions.json"));

    // A fresh store is empty, not an error
    assert!(store.load().unwrap().is_empty());

    for txn in create_test_transactions() {
        store.add(txn).unwrap();
    }

    let loaded = store.load().unwrap();
    assert_eq!(loaded, create_test_transactions());

    // Saving what was loaded leaves the batch unchanged
    store.save(&loaded).unwrap();
    assert_eq!(store.load().unwrap(), loaded);
}

#[test]
fn test_store_breaks_on_corrupt_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("transactions.json");
    std::fs::write(&path, "{\"not\": \"a batch\"}").unwrap();

    let store = JsonFileStore::new(&path);
    assert!(matches!(store.load(), Err(StorageError::Format(_))));
}

#[test]
fn test_memory_store_behind_trait_object() {
    fn record(store: &dyn TransactionStore) {
        for txn in create_test_transactions() {
            store.add(txn).unwrap();
        }
    }

    let store = MemoryStore::new();
    record(&store);
    assert_eq!(store.load().unwrap().len(), 5);
}

#[test]
fn test_encoding_is_reproducible() {
    let batch = create_test_transactions();
    let a = TransactionEncoder::encode(&batch);
    let b = TransactionEncoder::encode(&batch);

    assert_eq!(a.items, vec!["bread", "eggs", "milk"]);
    assert_eq!(a.items, b.items);
    assert_eq!(a.matrix, b.matrix);
    assert_eq!(a.n_rows(), 5);
}

#[test]
fn test_clustering_partitions_every_cart() {
    let batch = create_test_transactions();
    let encoded = TransactionEncoder::encode(&batch);
    let fit = KMeans::new(2).seed(42).fit(&encoded.matrix).unwrap();

    assert_eq!(fit.labels.len(), 5);
    assert_eq!(fit.counts.iter().sum::<usize>(), 5);
    assert!(fit.labels.iter().all(|&l| l < 2));

    let table = fit.cluster_counts();
    assert_eq!(table.len(), 2);
    assert_eq!(table[0].label, "Cluster 1");
    assert_eq!(table[1].label, "Cluster 2");
}

#[test]
fn test_clustering_is_seed_stable() {
    let encoded = TransactionEncoder::encode(&create_test_transactions());
    let a = KMeans::new(2).seed(7).fit(&encoded.matrix).unwrap();
    let b = KMeans::new(2).seed(7).fit(&encoded.matrix).unwrap();
    assert_eq!(a.labels, b.labels);
    assert_eq!(a.counts, b.counts);
}

#[test]
fn test_clustering_rejects_oversized_k() {
    let batch = create_test_transactions();
    let err = run_kmeans(&batch, 6).unwrap_err();
    assert_eq!(err.rows, 5);
    assert_eq!(err.clusters, 6);
}

#[test]
fn test_clustering_survives_identical_carts() {
    let batch = vec![Transaction::from_items(["milk"]); 5];
    let encoded = TransactionEncoder::encode(&batch);
    let fit = KMeans::new(2).seed(11).fit(&encoded.matrix).unwrap();

    // One cluster takes everything, the reseeded one stays empty
    assert!(fit.converged);
    let mut counts = fit.counts.clone();
    counts.sort_unstable();
    assert_eq!(counts, vec![0, 5]);
}

#[test]
fn test_apriori_walkthrough_numbers() {
    let batch = create_test_transactions();

    // {milk, bread} appears in 2 of 5 carts
    let encoded = TransactionEncoder::encode(&batch);
    let frequent = Apriori::new().min_support(0.4).frequent_itemsets(&encoded);
    let pair = frequent
        .iter()
        .find(|f| f.items == Itemset::from_items(["milk", "bread"]))
        .expect("pair should be frequent at 0.4");
    assert_relative_eq!(pair.support, 0.4);

    // milk -> bread holds in 2 of the 3 milk carts
    let rules = run_apriori(&batch, 0.4, 0.6);
    let rule = rules
        .iter()
        .find(|r| {
            r.antecedent == Itemset::from_items(["milk"])
                && r.consequent == Itemset::from_items(["bread"])
        })
        .expect("milk -> bread should clear confidence 0.6");
    assert_relative_eq!(rule.confidence, 2.0 / 3.0);
    assert_relative_eq!(rule.support, 0.4);
    assert!(rule.lift > 1.0);
}

#[test]
fn test_apriori_empty_result_is_not_an_error() {
    let batch = create_test_transactions();

    // Default thresholds are stricter than the data supports
    let rules = Apriori::new().mine(&batch);
    assert!(rules.is_empty());
    assert!(rules.strongest().is_none());

    assert!(run_apriori(&[], 0.3, 0.7).is_empty());
}

#[test]
fn test_strongest_rule_tops_the_sorted_table() {
    let rules = run_apriori(&create_test_transactions(), 0.2, 0.5);
    assert!(!rules.is_empty());

    let sorted = rules.sorted_by_confidence();
    let strongest = rules.strongest().unwrap();
    assert!((sorted[0].confidence - strongest.confidence).abs() < 1e-12);

    // Descending confidence all the way down
    for pair in sorted.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
}

#[test]
fn test_popularity_insights() {
    let batch = create_test_transactions();
    let table = item_popularity(&batch);

    // bread and milk tie at three purchases each
    assert_eq!(table[0].item, "bread");
    assert_eq!(table[0].count, 3);
    assert_eq!(table[1].item, "milk");
    assert_eq!(table[1].count, 3);
    assert_eq!(table[2].item, "eggs");
    assert_eq!(table[2].count, 2);

    let top = most_popular(&batch);
    let names: Vec<&str> = top.iter().map(|c| c.item.as_str()).collect();
    assert_eq!(names, vec!["bread", "milk"]);
}

#[test]
fn test_min_transactions_gate() {
    assert_eq!(MIN_TRANSACTIONS, 5);
    assert!(create_test_transactions().len() >= MIN_TRANSACTIONS);
}

#[test]
fn test_full_pipeline_from_disk() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("transactions.json"));

    for txn in create_test_transactions() {
        store.add(txn).unwrap();
    }

    let transactions = store.load().unwrap();
    assert!(transactions.len() >= MIN_TRANSACTIONS);

    let clusters = run_kmeans(&transactions, 2).unwrap();
    assert_eq!(clusters.iter().map(|c| c.count).sum::<usize>(), 5);

    let rules = run_apriori(&transactions, 0.4, 0.6);
    assert!(!rules.is_empty());

    let top = most_popular(&transactions);
    assert!(!top.is_empty());
}

#[test]
fn test_config_round_trip_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = Config::default();
    config.to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert!(loaded.validate().is_ok());
    assert_eq!(loaded.catalog, config.catalog);
    assert_eq!(loaded.kmeans.clusters, config.kmeans.clusters);
}
