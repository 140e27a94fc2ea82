//! Measurement results.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Occurrence count per measured bit string.
///
/// Bit strings are written with the highest classical bit leftmost, so
/// classical bit 0 is the last character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty count table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a count table from `(bitstring, count)` pairs.
    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, u64)>) -> Self {
        let mut counts = Self::new();
        for (bitstring, count) in pairs {
            counts.insert(bitstring, count);
        }
        counts
    }

    /// Add `count` occurrences of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Occurrences of `bitstring` (zero if never observed).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Iterate over observed outcomes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Number of distinct outcomes observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no outcome was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Outcomes sorted by descending count, ties broken by bit string.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut sorted: Vec<_> = self.counts.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        sorted
    }

    /// The most frequent outcome, if any.
    pub fn most_frequent(&self) -> Option<(&String, u64)> {
        self.sorted().first().map(|(k, v)| (*k, **v))
    }

    /// Relative frequency of `bitstring` in `[0, 1]`.
    pub fn probability(&self, bitstring: &str) -> f64 {
        let total = self.total_shots();
        if total == 0 {
            return 0.0;
        }
        self.get(bitstring) as f64 / total as f64
    }
}

/// Result of executing a circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts.
    pub counts: Counts,
    /// Number of shots executed.
    pub shots: u32,
    /// Wall-clock execution time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
        }
    }

    /// Attach the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_accumulates() {
        let mut counts = Counts::new();
        counts.insert("01", 3);
        counts.insert("01", 2);
        counts.insert("11", 1);

        assert_eq!(counts.get("01"), 5);
        assert_eq!(counts.get("00"), 0);
        assert_eq!(counts.total_shots(), 6);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_most_frequent_breaks_ties_by_bitstring() {
        let counts = Counts::from_pairs([("10", 4), ("01", 4), ("00", 1)]);
        let (bitstring, count) = counts.most_frequent().unwrap();
        assert_eq!(bitstring, "01");
        assert_eq!(count, 4);

        assert!(Counts::new().most_frequent().is_none());
    }

    #[test]
    fn test_probability() {
        let counts = Counts::from_pairs([("0110", 750), ("0000", 250)]);
        assert!((counts.probability("0110") - 0.75).abs() < 1e-12);
        assert_eq!(Counts::new().probability("0110"), 0.0);
    }

    #[test]
    fn test_counts_serialize_as_plain_map() {
        let counts = Counts::from_pairs([("010", 1024)]);
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"010":1024}"#);

        let result = ExecutionResult::new(counts, 1024).with_execution_time(3);
        assert_eq!(result.execution_time_ms, Some(3));
    }
}
