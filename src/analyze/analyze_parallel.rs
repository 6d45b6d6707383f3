use rayon::prelude::*;

use super::analyze_sites::{validate_fraction, validate_lengths};
use super::column::ColumnTally;
use crate::error::Result;
use crate::types::{AlignedSequence, HeterogeneousSites, SiteReport};

type PartialReports = Vec<(usize, SiteReport)>;

/// Parallel version of [`heterogeneous_sites`](super::heterogeneous_sites).
///
/// Columns are folded into thread-local report lists and merged; the merged
/// reports are put back into column order before they are returned, so the
/// result is identical to the sequential analysis.
pub fn heterogeneous_sites_parallel(
    sequences: &[AlignedSequence],
    length: usize,
    homogeneous_fraction: f64,
) -> Result<HeterogeneousSites> {
    validate_fraction(homogeneous_fraction)?;
    validate_lengths(sequences, length)?;

    if sequences.len() < 2 {
        return Ok(HeterogeneousSites::default());
    }

    let reports = (0..length)
        .into_par_iter()
        .fold(
            // Thread-local identity
            || Vec::with_capacity(64),
            // Per-column classification
            |mut acc: PartialReports, index| {
                let tally = ColumnTally::from_column(sequences, index);
                if tally.is_heterogeneous(homogeneous_fraction) {
                    acc.push((index, tally.into_report(sequences)));
                }
                acc
            },
        )
        .reduce(Vec::new, merge_partial_results);

    log::info!(
        "Found {} heterogeneous site(s) in {} columns of {} sequences ({} threads)",
        reports.len(),
        length,
        sequences.len(),
        rayon::current_num_threads()
    );

    Ok(HeterogeneousSites::from_reports(reports))
}

/// Merges two partial results from different threads.
fn merge_partial_results(mut a: PartialReports, mut b: PartialReports) -> PartialReports {
    a.append(&mut b);
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::heterogeneous_sites;
    use crate::error::HetSitesError;

    fn alignment(rows: usize, length: usize) -> Vec<AlignedSequence> {
        // Deterministic pseudo-random alignment with gaps.
        let alphabet = b"ACGT-";
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        (0..rows)
            .map(|row| {
                let seq: String = (0..length)
                    .map(|column| {
                        state ^= state << 13;
                        state ^= state >> 7;
                        state ^= state << 17;
                        // Mostly conserved columns so that not every site differs.
                        if column % 3 == 0 {
                            alphabet[(state % 5) as usize] as char
                        } else {
                            'A'
                        }
                    })
                    .collect();
                AlignedSequence::new(format!("seq{row}"), &seq)
            })
            .collect()
    }

    #[test]
    fn matches_sequential_analysis() {
        let sequences = alignment(25, 600);
        for fraction in [0.3, 0.5, 0.8, 1.0] {
            let sequential = heterogeneous_sites(&sequences, 600, fraction).unwrap();
            let parallel = heterogeneous_sites_parallel(&sequences, 600, fraction).unwrap();

            assert_eq!(parallel.indexes, sequential.indexes);
            for index in &sequential.indexes {
                assert_eq!(parallel.counts[index], sequential.counts[index]);
                assert_eq!(parallel.ids[index], sequential.ids[index]);
            }
        }
    }

    #[test]
    fn indexes_are_ascending() {
        let sequences = alignment(10, 1000);
        let sites = heterogeneous_sites_parallel(&sequences, 1000, 1.0).unwrap();

        assert!(!sites.is_empty());
        assert!(sites.indexes.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(sites.indexes.iter().all(|index| index % 3 == 0));
    }

    #[test]
    fn validates_before_scanning() {
        let mut sequences = alignment(4, 30);
        assert!(matches!(
            heterogeneous_sites_parallel(&sequences, 30, 1.5),
            Err(HetSitesError::InvalidArgument { .. })
        ));

        sequences[3].symbols.pop();
        assert!(matches!(
            heterogeneous_sites_parallel(&sequences, 30, 1.0),
            Err(HetSitesError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn empty_input() {
        let sites = heterogeneous_sites_parallel(&[], 0, 1.0).unwrap();
        assert!(sites.is_empty());
    }
}
