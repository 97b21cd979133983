//! Item popularity over a batch of transactions.

use crate::data::{ItemCount, Transaction};
use std::collections::BTreeMap;

/// Count item occurrences across all transactions.
///
/// Occurrences are counted as recorded, so an item duplicated inside one
/// cart counts each time. The table is sorted by count descending, ties by
/// item name ascending.
pub fn item_popularity(transactions: &[Transaction]) -> Vec<ItemCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for txn in transactions {
        for item in txn.items() {
            *counts.entry(item.as_str()).or_insert(0) += 1;
        }
    }

    let mut table: Vec<ItemCount> = counts
        .into_iter()
        .map(|(item, count)| ItemCount {
            item: item.to_string(),
            count,
        })
        .collect();
    table.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.item.cmp(&b.item)));
    table
}

/// The most-purchased items, all ties included
pub fn most_popular(transactions: &[Transaction]) -> Vec<ItemCount> {
    let table = item_popularity(transactions);
    let max = match table.first() {
        Some(top) => top.count,
        None => return Vec::new(),
    };
    table.into_iter().take_while(|c| c.count == max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> Vec<Transaction> {
        vec![
            Transaction::from_items(["milk", "bread"]),
            Transaction::from_items(["milk", "milk"]),
            Transaction::from_items(["eggs"]),
        ]
    }

    #[test]
    fn test_popularity_counts_occurrences() {
        let table = item_popularity(&batch());
        assert_eq!(table.len(), 3);
        assert_eq!(table[0].item, "milk");
        assert_eq!(table[0].count, 3);
        assert_eq!(table[1].item, "bread");
        assert_eq!(table[1].count, 1);
        assert_eq!(table[2].item, "eggs");
        assert_eq!(table[2].count, 1);
    }

    #[test]
    fn test_most_popular_keeps_all_ties() {
        let batch = vec![
            Transaction::from_items(["milk", "bread"]),
            Transaction::from_items(["milk", "bread"]),
            Transaction::from_items(["eggs"]),
        ];
        let top = most_popular(&batch);
        let names: Vec<&str> = top.iter().map(|c| c.item.as_str()).collect();
        assert_eq!(names, vec!["bread", "milk"]);
        assert!(top.iter().all(|c| c.count == 2));
    }

    #[test]
    fn test_empty_batch_has_no_popularity() {
        assert!(item_popularity(&[]).is_empty());
        assert!(most_popular(&[]).is_empty());
    }
}
