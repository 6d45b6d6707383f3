//src/types.rs

use ahash::AHashMap;
use indexmap::IndexMap;

/// Placeholder symbol ignored by every count and attribution.
pub const GAP_SYMBOL: char = '-';

/// Symbol -> number of sequences carrying it at one column, in first-seen order.
pub type SymbolCounts = IndexMap<char, usize>;

/// Symbol -> identifiers of the sequences carrying it at one column, in input order.
pub type SymbolIds = IndexMap<char, Vec<String>>;

/// A minimal representation of one aligned sequence.
/// Columns are characters, so any alphabet lines up the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedSequence {
    pub id: String,
    pub symbols: Vec<char>,
}

impl AlignedSequence {
    pub fn new(id: impl Into<String>, seq: &str) -> Self {
        Self {
            id: id.into(),
            symbols: seq.chars().collect(),
        }
    }

    /// Builds an empty record from a FASTA/FASTQ header (without its leading marker).
    /// The identifier is the header up to the first whitespace.
    pub fn from_header(header: &str) -> Self {
        Self {
            id: header.split_whitespace().next().unwrap_or_default().to_string(),
            symbols: Vec::new(),
        }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol at column `index`. Callers must stay below `len()`.
    pub fn symbol_at(&self, index: usize) -> char {
        self.symbols[index]
    }

    pub fn seq_string(&self) -> String {
        self.symbols.iter().collect()
    }
}

/// Symbol distribution of a single heterogeneous column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteReport {
    pub counts: SymbolCounts,
    pub ids: SymbolIds,
}

/// Everything the analyzer found: the count and identifier maps of each
/// heterogeneous column, and those columns in ascending order.
#[derive(Debug, Clone, Default)]
pub struct HeterogeneousSites {
    pub counts: AHashMap<usize, SymbolCounts>,
    pub ids: AHashMap<usize, SymbolIds>,
    pub indexes: Vec<usize>,
}

impl HeterogeneousSites {
    /// Collects per-column reports produced in any order.
    pub fn from_reports(mut reports: Vec<(usize, SiteReport)>) -> Self {
        reports.sort_unstable_by_key(|(index, _)| *index);

        let mut sites = Self {
            counts: AHashMap::with_capacity(reports.len()),
            ids: AHashMap::with_capacity(reports.len()),
            indexes: Vec::with_capacity(reports.len()),
        };
        for (index, report) in reports {
            sites.counts.insert(index, report.counts);
            sites.ids.insert(index, report.ids);
            sites.indexes.push(index);
        }
        sites
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Iterates `(column, counts, ids)` in ascending column order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &SymbolCounts, &SymbolIds)> + '_ {
        self.indexes
            .iter()
            .filter_map(|&index| Some((index, self.counts.get(&index)?, self.ids.get(&index)?)))
    }
}
