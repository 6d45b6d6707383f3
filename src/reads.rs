use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::iter::Enumerate;
use std::path::Path;

use ahash::AHashSet;
use flate2::read::MultiGzDecoder;

use crate::error::{HetSitesError, Result};
use crate::types::AlignedSequence;

/// Opens `path` for buffered reading, decompressing it if the name ends in ".gz".
pub fn open_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let f = File::open(path)?;

    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };
    Ok(reader)
}

/// Reads all records of a FASTA or FASTQ file (optionally gzipped).
///
/// The format is picked from the first non-blank character: `@` means FASTQ,
/// anything else is parsed as FASTA. An empty file yields no records.
pub fn read_sequence_records<P: AsRef<Path>>(path: P) -> Result<Vec<AlignedSequence>> {
    let path = path.as_ref();
    let mut reader = open_reader(path)?;

    let buf = reader.fill_buf()?;
    let is_empty = buf.is_empty();
    let first = buf.iter().find(|b| !b.is_ascii_whitespace()).copied();
    let sequences = match first {
        None if is_empty => Vec::new(),
        Some(b'@') => parse_fastq(reader, path)?,
        _ => parse_fasta(reader, path)?,
    };

    log::info!("Read {} sequence(s) from {}", sequences.len(), path.display());
    Ok(sequences)
}

/// Multi-line FASTA parser. Blank lines are skipped.
pub fn parse_fasta<R: BufRead>(reader: R, path: &Path) -> Result<Vec<AlignedSequence>> {
    let mut sequences = Vec::new();
    let mut current: Option<AlignedSequence> = None;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(done) = current.take() {
                sequences.push(done);
            }
            current = Some(AlignedSequence::from_header(header));
        } else {
            match current.as_mut() {
                Some(record) => record.symbols.extend(line.chars()),
                None => {
                    return Err(parse_error(
                        path,
                        line_no + 1,
                        "sequence data before the first '>' header",
                    ))
                }
            }
        }
    }

    if let Some(done) = current {
        sequences.push(done);
    }
    Ok(sequences)
}

/// Four-line FASTQ parser. Qualities are checked for length and dropped.
pub fn parse_fastq<R: BufRead>(reader: R, path: &Path) -> Result<Vec<AlignedSequence>> {
    let mut lines = reader.lines().enumerate();
    let mut sequences = Vec::new();

    loop {
        // 1) header, skipping blank lines between records
        let (line_no, header_line) = loop {
            match next_line(&mut lines)? {
                Some((_, line)) if line.trim().is_empty() => continue,
                Some(found) => break found,
                None => return Ok(sequences),
            }
        };
        let header = header_line
            .strip_prefix('@')
            .ok_or_else(|| parse_error(path, line_no, "expected a '@' FASTQ header"))?;

        // 2) sequence
        let (_, seq) = next_line(&mut lines)?
            .ok_or_else(|| parse_error(path, line_no, "truncated FASTQ record"))?;

        // 3) plus line
        let (plus_no, plus) = next_line(&mut lines)?
            .ok_or_else(|| parse_error(path, line_no, "truncated FASTQ record"))?;
        if !plus.starts_with('+') {
            return Err(parse_error(path, plus_no, "expected a '+' separator line"));
        }

        // 4) quality
        let (qual_no, qual) = next_line(&mut lines)?
            .ok_or_else(|| parse_error(path, line_no, "truncated FASTQ record"))?;
        if qual.chars().count() != seq.chars().count() {
            return Err(parse_error(
                path,
                qual_no,
                "quality length differs from sequence length",
            ));
        }

        let mut record = AlignedSequence::from_header(header);
        record.symbols = seq.chars().collect();
        sequences.push(record);
    }
}

/// Logs every identifier that occurs more than once and returns how many did.
pub fn warn_duplicate_ids(sequences: &[AlignedSequence]) -> usize {
    let mut seen = AHashSet::with_capacity(sequences.len());
    let mut reported = AHashSet::new();
    for seq in sequences {
        if !seen.insert(seq.id.as_str()) && reported.insert(seq.id.as_str()) {
            log::warn!("Sequence identifier '{}' occurs more than once", seq.id);
        }
    }
    reported.len()
}

/// Next line with its 1-based number and trailing whitespace removed.
fn next_line<R: BufRead>(lines: &mut Enumerate<Lines<R>>) -> Result<Option<(usize, String)>> {
    match lines.next() {
        Some((idx, line)) => Ok(Some((idx + 1, line?.trim_end().to_string()))),
        None => Ok(None),
    }
}

fn parse_error(path: &Path, line: usize, message: &str) -> HetSitesError {
    HetSitesError::Parse {
        path: path.to_path_buf(),
        line,
        message: message.to_string(),
    }
}
