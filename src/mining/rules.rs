//! Association rules and rule tables.

use crate::mining::Itemset;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One association rule with its quality metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Left-hand itemset
    pub antecedent: Itemset,
    /// Right-hand itemset, disjoint from the antecedent
    pub consequent: Itemset,
    /// Fraction of transactions containing both sides
    pub support: f64,
    /// support(rule) / support(antecedent)
    pub confidence: f64,
    /// confidence / support(consequent); above 1.0 the antecedent raises
    /// the consequent's likelihood
    pub lift: f64,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} (support {:.2}, confidence {:.2}, lift {:.2})",
            self.antecedent, self.consequent, self.support, self.confidence, self.lift
        )
    }
}

/// Rules produced by one mining run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Wrap a list of rules
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// All rules in mining order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check whether no rule cleared the thresholds
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over the rules
    pub fn iter(&self) -> impl Iterator<Item = &Rule> + '_ {
        self.rules.iter()
    }

    /// Rules sorted by confidence descending; ties keep mining order
    pub fn sorted_by_confidence(&self) -> Vec<Rule> {
        let mut sorted = self.rules.clone();
        sorted.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        sorted
    }

    /// The highest-confidence rule, if any
    pub fn strongest(&self) -> Option<&Rule> {
        self.rules.iter().max_by(|a, b| {
            a.confidence
                .partial_cmp(&b.confidence)
                .unwrap_or(Ordering::Equal)
        })
    }
}

impl IntoIterator for RuleSet {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(antecedent: &str, consequent: &str, confidence: f64) -> Rule {
        Rule {
            antecedent: Itemset::from_items([antecedent]),
            consequent: Itemset::from_items([consequent]),
            support: 0.4,
            confidence,
            lift: 1.2,
        }
    }

    #[test]
    fn test_sorted_by_confidence_descending() {
        let set = RuleSet::new(vec![
            rule("milk", "bread", 0.6),
            rule("bread", "milk", 0.9),
            rule("eggs", "milk", 0.7),
        ]);

        let sorted = set.sorted_by_confidence();
        assert_eq!(sorted[0].confidence, 0.9);
        assert_eq!(sorted[1].confidence, 0.7);
        assert_eq!(sorted[2].confidence, 0.6);

        // Source set is untouched
        assert_eq!(set.rules()[0].confidence, 0.6);
    }

    #[test]
    fn test_strongest_rule() {
        let set = RuleSet::new(vec![rule("milk", "bread", 0.6), rule("bread", "milk", 0.9)]);
        let top = set.strongest().unwrap();
        assert_eq!(top.confidence, 0.9);
        assert_eq!(top.antecedent, Itemset::from_items(["bread"]));

        assert!(RuleSet::default().strongest().is_none());
    }

    #[test]
    fn test_rule_display() {
        let r = rule("milk", "bread", 0.667);
        assert_eq!(
            r.to_string(),
            "{milk} -> {bread} (support 0.40, confidence 0.67, lift 1.20)"
        );
    }
}
