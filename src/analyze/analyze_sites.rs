// src/analyze/analyze_sites.rs

use super::column::ColumnTally;
use crate::error::{HetSitesError, Result};
use crate::types::{AlignedSequence, HeterogeneousSites};

/// Rejects thresholds outside (0, 1], including NaN.
pub fn validate_fraction(homogeneous_fraction: f64) -> Result<()> {
    if homogeneous_fraction > 0.0 && homogeneous_fraction <= 1.0 {
        Ok(())
    } else {
        Err(HetSitesError::InvalidArgument {
            fraction: homogeneous_fraction,
        })
    }
}

/// Fails on the first sequence whose length is not `length`.
pub fn validate_lengths(sequences: &[AlignedSequence], length: usize) -> Result<()> {
    match sequences.iter().find(|seq| seq.len() != length) {
        Some(seq) => Err(HetSitesError::LengthMismatch {
            id: seq.id.clone(),
            expected: length,
            actual: seq.len(),
        }),
        None => Ok(()),
    }
}

/// Returns the heterogeneous sites of aligned sequences that all have length `length`.
///
/// A column is heterogeneous when, ignoring gaps, it holds at least two
/// distinct symbols and the share of the most common one is at most
/// `homogeneous_fraction`. Both the threshold and the lengths are checked
/// before any column is scanned, so an error never comes with partial results.
///
/// An empty collection or a zero length yields empty results.
pub fn heterogeneous_sites(
    sequences: &[AlignedSequence],
    length: usize,
    homogeneous_fraction: f64,
) -> Result<HeterogeneousSites> {
    validate_fraction(homogeneous_fraction)?;
    validate_lengths(sequences, length)?;

    if sequences.len() < 2 {
        log::debug!("{} sequence(s) given, nothing can differ", sequences.len());
        return Ok(HeterogeneousSites::default());
    }

    let mut reports = Vec::new();
    for index in 0..length {
        let tally = ColumnTally::from_column(sequences, index);
        if tally.is_heterogeneous(homogeneous_fraction) {
            log::debug!(
                "Column {} is heterogeneous ({} symbols, majority {}/{})",
                index,
                tally.distinct_symbols(),
                tally.majority_count(),
                tally.total()
            );
            reports.push((index, tally.into_report(sequences)));
        }
    }

    log::info!(
        "Found {} heterogeneous site(s) in {} columns of {} sequences",
        reports.len(),
        length,
        sequences.len()
    );

    Ok(HeterogeneousSites::from_reports(reports))
}
