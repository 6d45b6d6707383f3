// src/analyze/column.rs

use indexmap::IndexMap;

use crate::types::{AlignedSequence, SiteReport, SymbolCounts, SymbolIds, GAP_SYMBOL};

/// Share of the most common symbol among the observations in `counts`.
/// `None` when nothing was observed.
pub fn majority_fraction(counts: &SymbolCounts) -> Option<f64> {
    let total: usize = counts.values().sum();
    let majority = counts.values().copied().max()?;
    if total == 0 {
        None
    } else {
        Some(majority as f64 / total as f64)
    }
}

/// Local accumulator for one column, built fresh for every column.
///
/// Contributors are kept as positions into the input slice so that the
/// identifiers are only copied for columns that end up in the results.
#[derive(Debug, Default, Clone)]
pub struct ColumnTally {
    counts: SymbolCounts,
    contributors: IndexMap<char, Vec<usize>>,
    total: usize,
}

impl ColumnTally {
    /// Tallies column `index` over all sequences, skipping gaps.
    pub fn from_column(sequences: &[AlignedSequence], index: usize) -> Self {
        let mut tally = Self::default();
        for (position, seq) in sequences.iter().enumerate() {
            let symbol = seq.symbol_at(index);
            if symbol == GAP_SYMBOL {
                continue;
            }
            *tally.counts.entry(symbol).or_insert(0) += 1;
            tally.contributors.entry(symbol).or_default().push(position);
            tally.total += 1;
        }
        tally
    }

    pub fn counts(&self) -> &SymbolCounts {
        &self.counts
    }

    /// Number of distinct non-gap symbols.
    pub fn distinct_symbols(&self) -> usize {
        self.counts.len()
    }

    /// Number of non-gap observations.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Largest per-symbol count. Which symbol reaches it does not matter.
    pub fn majority_count(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }

    pub fn majority_fraction(&self) -> Option<f64> {
        majority_fraction(&self.counts)
    }

    /// A column is heterogeneous when it has at least two symbols and the
    /// majority share does not exceed `homogeneous_fraction` (inclusive).
    pub fn is_heterogeneous(&self, homogeneous_fraction: f64) -> bool {
        self.distinct_symbols() >= 2
            && self
                .majority_fraction()
                .is_some_and(|fraction| fraction <= homogeneous_fraction)
    }

    /// Resolves contributor positions into identifiers.
    pub fn into_report(self, sequences: &[AlignedSequence]) -> SiteReport {
        let ids: SymbolIds = self
            .contributors
            .into_iter()
            .map(|(symbol, positions)| {
                let ids = positions
                    .into_iter()
                    .map(|position| sequences[position].id.clone())
                    .collect();
                (symbol, ids)
            })
            .collect();

        SiteReport {
            counts: self.counts,
            ids,
        }
    }
}
