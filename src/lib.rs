// src/lib.rs
pub mod analyze;
pub mod error;
pub mod reads;
pub mod report;
pub mod types;

use std::path::PathBuf;

use crate::analyze::{heterogeneous_sites, heterogeneous_sites_parallel};
use crate::error::Result;
use crate::reads::{read_sequence_records, warn_duplicate_ids};
use crate::report::{format_sites, most_balanced_site};
use crate::types::{AlignedSequence, HeterogeneousSites};

/// Analysis results together with what they were computed from.
/// Only structured data is stored; text is generated on demand.
#[derive(Debug, Clone)]
pub struct SiteResults {
    /// Number of sequences analysed
    pub sequence_count: usize,
    /// Alignment length (0 when no sequences were given)
    pub length: usize,
    pub homogeneous_fraction: f64,
    pub sites: HeterogeneousSites,
}

impl SiteResults {
    /// Generate the per-site report text on demand
    pub fn get_site_report(&self) -> String {
        format_sites(&self.sites, self.length)
    }

    /// Describe the most evenly split site
    pub fn get_best_site_report(&self) -> String {
        match most_balanced_site(&self.sites) {
            Some((index, fraction)) => format!(
                "The most balanced site is at index {} (majority fraction {:.4}).\n",
                index + 1,
                fraction
            ),
            None => "No heterogeneous sites were found.\n".to_string(),
        }
    }
}

/// Runs the analysis on sequences that are already loaded.
///
/// The alignment length is taken from the first sequence; every other
/// sequence must match it.
pub fn analyze_sequences(
    sequences: &[AlignedSequence],
    homogeneous_fraction: f64,
    parallel: bool,
) -> Result<SiteResults> {
    let length = sequences.first().map(|seq| seq.len()).unwrap_or(0);

    let sites = if parallel {
        heterogeneous_sites_parallel(sequences, length, homogeneous_fraction)?
    } else {
        heterogeneous_sites(sequences, length, homogeneous_fraction)?
    };

    Ok(SiteResults {
        sequence_count: sequences.len(),
        length,
        homogeneous_fraction,
        sites,
    })
}

/// Unified function to find heterogeneous sites in one or multiple files
pub fn find_heterogeneous_sites(
    reads_paths: Vec<PathBuf>,
    homogeneous_fraction: f64,
    parallel: bool,
) -> Result<SiteResults> {
    // Fail on a bad threshold before touching any file
    analyze::validate_fraction(homogeneous_fraction)?;

    let mut all_reads = Vec::new();
    for path in reads_paths {
        let reads = read_sequence_records(&path)?;
        all_reads.extend(reads);
    }

    if all_reads.is_empty() {
        log::warn!("No sequences were read");
    }
    warn_duplicate_ids(&all_reads);

    analyze_sequences(&all_reads, homogeneous_fraction, parallel)
}
