//! Key-table statistics.

use std::collections::BTreeSet;

use psn_core::KeyTable;

/// Bit balance of one subkey.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubkeyStats {
    /// One-based position in the table.
    pub index: usize,
    /// Subkey value.
    pub value: u64,
    /// Number of set bits.
    pub ones: u32,
    /// Number of clear bits.
    pub zeros: u32,
}

impl SubkeyStats {
    fn new(index: usize, value: u64) -> Self {
        let ones = value.count_ones();
        Self {
            index,
            value,
            ones,
            zeros: u64::BITS - ones,
        }
    }
}

/// Per-subkey statistics plus a duplicate verdict for a whole table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableReport {
    /// One entry per subkey, in schedule order.
    pub subkeys: Vec<SubkeyStats>,
    /// Whether any subkey value appears more than once.
    pub has_duplicates: bool,
}

/// Computes bit counts and duplicate detection for `table`.
pub fn evaluate(table: &KeyTable) -> TableReport {
    let mut seen = BTreeSet::new();
    let mut has_duplicates = false;
    let subkeys = table
        .iter()
        .enumerate()
        .map(|(i, value)| {
            has_duplicates |= !seen.insert(value);
            SubkeyStats::new(i + 1, value)
        })
        .collect();
    TableReport {
        subkeys,
        has_duplicates,
    }
}

/// Subkey values present in both tables, ascending.
pub fn shared_subkeys(left: &KeyTable, right: &KeyTable) -> Vec<u64> {
    let left: BTreeSet<u64> = left.iter().collect();
    let right: BTreeSet<u64> = right.iter().collect();
    left.intersection(&right).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::EndpointProfile;

    #[test]
    fn client_table_bit_counts() {
        let report = evaluate(&EndpointProfile::client_a().table());
        let ones: Vec<u32> = report.subkeys.iter().map(|s| s.ones).collect();
        assert_eq!(ones, vec![27, 29, 29, 32, 30, 36, 36, 35]);
        assert!(report.subkeys.iter().all(|s| s.ones + s.zeros == 64));
        assert_eq!(report.subkeys[0].index, 1);
        assert!(!report.has_duplicates);
    }

    #[test]
    fn duplicates_are_flagged() {
        let table = KeyTable::from_subkeys(vec![1, 2, 1]);
        assert!(evaluate(&table).has_duplicates);
    }

    #[test]
    fn empty_table_reports_nothing() {
        let report = evaluate(&KeyTable::from_subkeys(Vec::new()));
        assert!(report.subkeys.is_empty());
        assert!(!report.has_duplicates);
    }

    #[test]
    fn builtin_endpoints_share_nothing() {
        let a = EndpointProfile::client_a().table();
        let b = EndpointProfile::server_b().table();
        assert!(shared_subkeys(&a, &b).is_empty());
    }

    #[test]
    fn shared_values_are_sorted_and_unique() {
        let a = KeyTable::from_subkeys(vec![9, 3, 3, 7]);
        let b = KeyTable::from_subkeys(vec![7, 3, 11]);
        assert_eq!(shared_subkeys(&a, &b), vec![3, 7]);
    }
}
