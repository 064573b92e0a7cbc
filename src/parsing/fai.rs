//! Reader for FASTA index (.fai) files using noodles.
//!
//! The launcher does not need the index itself, igv.js reads it in the browser.
//! Reading it here lets startup report what the reference contains and catch an
//! index that the viewer would fail on.

use std::io::BufReader;
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Invalid FASTA index: {0}")]
    InvalidFormat(String),
}

/// Summary of the sequences listed in a FASTA index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    /// Sequence names in index order
    pub names: Vec<String>,

    /// Sum of all sequence lengths
    pub total_length: u64,
}

impl IndexSummary {
    #[must_use]
    pub fn contig_count(&self) -> usize {
        self.names.len()
    }
}

/// Read a FASTA index (.fai) file using noodles
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, or `ParseError::InvalidFormat` if no sequences are listed.
pub fn summarize_fai_file(path: &Path) -> Result<IndexSummary, ParseError> {
    use noodles::fasta;

    let reader = std::fs::File::open(path).map(BufReader::new)?;

    let index = fasta::fai::io::Reader::new(reader)
        .read_index()
        .map_err(|e| ParseError::Noodles(format!("Failed to parse FAI file: {e}")))?;

    let mut names = Vec::new();
    let mut total_length = 0u64;

    for record in index.as_ref() {
        names.push(String::from_utf8_lossy(record.name()).to_string());
        total_length = total_length.saturating_add(record.length());
    }

    if names.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FAI file".to_string(),
        ));
    }

    Ok(IndexSummary {
        names,
        total_length,
    })
}

/// Whether `path` looks like a plain FASTA index judging by its extension
#[must_use]
pub fn is_fai_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("fai"))
}
