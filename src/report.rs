// src/report.rs

use std::fmt::Write as FmtWrite;

use crate::analyze::majority_fraction;
use crate::types::{HeterogeneousSites, SymbolCounts, SymbolIds};

/// The heterogeneous column whose most common symbol has the smallest share,
/// i.e. the site closest to an even split. Ties go to the lowest column.
pub fn most_balanced_site(sites: &HeterogeneousSites) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, counts, _) in sites.iter() {
        let Some(fraction) = majority_fraction(counts) else {
            continue;
        };
        match best {
            Some((_, best_fraction)) if fraction >= best_fraction => {}
            _ => best = Some((index, fraction)),
        }
    }
    best
}

/// `'C': 2, 'G': 1`, most common first, ties in first-seen order.
pub fn format_detected_symbols(counts: &SymbolCounts) -> String {
    let mut sorted: Vec<(char, usize)> = counts.iter().map(|(&s, &c)| (s, c)).collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    sorted
        .iter()
        .map(|(symbol, count)| format!("'{}': {}", symbol, count))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Width of the 1-based column numbers for an alignment of `length` columns.
pub fn index_width(length: usize) -> usize {
    length.max(1).to_string().len()
}

/// Appends the block describing one heterogeneous column.
pub fn write_site(
    output: &mut String,
    index: usize,
    width: usize,
    counts: &SymbolCounts,
    ids: &SymbolIds,
) {
    writeln!(output, "A SNP is detected at index {:>width$}.", index + 1, width = width).unwrap();
    writeln!(output, "Detected bases: {}", format_detected_symbols(counts)).unwrap();

    for (symbol, symbol_ids) in ids {
        writeln!(output, "{}:", symbol).unwrap();
        for id in symbol_ids {
            writeln!(output, "{}", id).unwrap();
        }
    }
}

/// Text report for every heterogeneous column, in column order.
pub fn format_sites(sites: &HeterogeneousSites, length: usize) -> String {
    let width = index_width(length);
    let mut output = String::new();
    for (index, counts, ids) in sites.iter() {
        write_site(&mut output, index, width, counts, ids);
    }
    output
}
