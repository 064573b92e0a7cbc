//! Parsers for genome companion files.
//!
//! - **FASTA index (.fai) files**: list the sequences of the reference

pub mod fai;
