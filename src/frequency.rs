//! Occurrence counting and frequency normalisation.
//!
//! Both table kinds always carry an entry for each of the 256 byte values.

use std::collections::HashMap;

use log::debug;

use crate::error::{Error, Result, TableDefect};

pub const SYMBOL_COUNT: usize = 256;

pub type OccurrenceTable = HashMap<u8, u64>;
pub type FrequencyTable = HashMap<u8, f64>;

fn all_symbols() -> impl Iterator<Item = u8> {
    0..=u8::MAX
}

pub fn empty_occurrences() -> OccurrenceTable {
    all_symbols().map(|s| (s, 0)).collect()
}

pub fn count_occurrences(symbols: &[u8]) -> OccurrenceTable {
    let mut table = empty_occurrences();
    for &b in symbols {
        *table.entry(b).or_insert(0) += 1;
    }
    debug!(
        "Counted {} symbols, {} distinct",
        symbols.len(),
        table.values().filter(|&&c| c > 0).count()
    );
    table
}

/// Divides every count by the total. Symbols missing from `occurrences`
/// are treated as zero.
pub fn normalize(occurrences: &OccurrenceTable) -> Result<FrequencyTable> {
    // Wide enough for 256 counts of u64::MAX.
    let total: u128 = occurrences.values().map(|&c| u128::from(c)).sum();
    if total == 0 {
        return Err(Error::DegenerateTable);
    }
    let total_f = total as f64;

    Ok(all_symbols()
        .map(|s| {
            let count = occurrences.get(&s).copied().unwrap_or(0);
            (s, count as f64 / total_f)
        })
        .collect())
}

/// Checks that `table` is complete, non-negative and sums to 1.0 within
/// `tolerance`.
pub fn validate(table: &FrequencyTable, tolerance: f64) -> Result<()> {
    if table.len() != SYMBOL_COUNT {
        return Err(TableDefect::MissingSymbols {
            present: table.len(),
        }
        .into());
    }

    let mut sum = 0.0;
    for symbol in all_symbols() {
        let value = table[&symbol];
        if !value.is_finite() {
            return Err(TableDefect::NonFiniteFrequency { symbol }.into());
        }
        if value < 0.0 {
            return Err(TableDefect::NegativeFrequency { symbol, value }.into());
        }
        sum += value;
    }

    if (sum - 1.0).abs() > tolerance {
        return Err(TableDefect::BadSum { sum, tolerance }.into());
    }
    Ok(())
}

/// Shannon entropy of the table in bits per symbol.
pub fn entropy(freq: &FrequencyTable) -> f64 {
    let entropy: f64 = freq
        .values()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.log2())
        .sum();

    debug!("Calculated entropy: {:.4} bits/symbol", entropy);
    entropy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::FREQUENCY_SUM_TOLERANCE;

    #[test]
    fn test_count_has_all_symbols() {
        let table = count_occurrences(b"aaabc");
        assert_eq!(table.len(), SYMBOL_COUNT);
        assert_eq!(table[&b'a'], 3);
        assert_eq!(table[&b'b'], 1);
        assert_eq!(table[&b'c'], 1);
        assert_eq!(table[&0], 0);
        assert_eq!(table.values().sum::<u64>(), 5);
    }

    #[test]
    fn test_normalize_scenario() {
        let freq = normalize(&count_occurrences(b"aaabc")).unwrap();
        assert_eq!(freq.len(), SYMBOL_COUNT);
        assert!((freq[&b'a'] - 0.6).abs() < 1e-12);
        assert!((freq[&b'b'] - 0.2).abs() < 1e-12);
        assert!((freq[&b'c'] - 0.2).abs() < 1e-12);
        assert_eq!(freq[&b'z'], 0.0);
        assert!(validate(&freq, FREQUENCY_SUM_TOLERANCE).is_ok());
    }

    #[test]
    fn test_normalize_fills_missing_symbols() {
        let partial: OccurrenceTable = [(7u8, 2u64)].into_iter().collect();
        let freq = normalize(&partial).unwrap();
        assert_eq!(freq.len(), SYMBOL_COUNT);
        assert_eq!(freq[&7], 1.0);
    }

    #[test]
    fn test_normalize_huge_counts() {
        let huge: OccurrenceTable = [(1u8, u64::MAX), (2u8, u64::MAX)].into_iter().collect();
        let freq = normalize(&huge).unwrap();
        assert_eq!(freq[&1], 0.5);
        assert_eq!(freq[&2], 0.5);
        assert!(validate(&freq, FREQUENCY_SUM_TOLERANCE).is_ok());
    }

    #[test]
    fn test_normalize_all_zero_fails() {
        assert_eq!(normalize(&empty_occurrences()), Err(Error::DegenerateTable));
        assert_eq!(normalize(&count_occurrences(b"")), Err(Error::DegenerateTable));
    }

    #[test]
    fn test_validate_rejects_defects() {
        let mut freq = normalize(&count_occurrences(b"abcd")).unwrap();

        let mut short = freq.clone();
        short.remove(&b'q');
        assert_eq!(
            validate(&short, FREQUENCY_SUM_TOLERANCE),
            Err(TableDefect::MissingSymbols { present: 255 }.into())
        );

        let mut nan = freq.clone();
        nan.insert(0, f64::NAN);
        assert_eq!(
            validate(&nan, FREQUENCY_SUM_TOLERANCE),
            Err(TableDefect::NonFiniteFrequency { symbol: 0 }.into())
        );

        freq.insert(b'a', -0.25);
        freq.insert(b'b', 0.75);
        assert_eq!(
            validate(&freq, FREQUENCY_SUM_TOLERANCE),
            Err(TableDefect::NegativeFrequency { symbol: b'a', value: -0.25 }.into())
        );
    }

    #[test]
    fn test_validate_sum_tolerance() {
        let mut freq = normalize(&count_occurrences(b"ab")).unwrap();
        freq.insert(b'a', 0.5 + 1e-12);
        assert!(validate(&freq, FREQUENCY_SUM_TOLERANCE).is_ok());

        freq.insert(b'a', 0.6);
        match validate(&freq, FREQUENCY_SUM_TOLERANCE) {
            Err(Error::InvalidFrequencyTable(TableDefect::BadSum { sum, .. })) => {
                assert!((sum - 1.1).abs() < 1e-12)
            }
            other => panic!("expected BadSum, got {:?}", other),
        }
    }

    #[test]
    fn test_entropy() {
        let uniform = normalize(&count_occurrences(b"abcd")).unwrap();
        assert!((entropy(&uniform) - 2.0).abs() < 1e-12);

        let single = normalize(&count_occurrences(b"zzzz")).unwrap();
        assert_eq!(entropy(&single), 0.0);
    }
}
