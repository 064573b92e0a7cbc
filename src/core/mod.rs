//! Core data types for igv.js sessions.
//!
//! - [`TrackType`](types::TrackType): track types and the formats each accepts
//! - [`TrackDescriptor`](track::TrackDescriptor): a requested track file and its declared metadata
//! - [`SessionDocument`](session::SessionDocument): the session JSON read by igv.js
//!
//! ## Track types
//!
//! | Type | Formats |
//! |------|---------|
//! | annotation | bed, gff, gff3, gtf, bedpe |
//! | wig | wig, bigWig, bedGraph |
//! | alignment | bam, cram |
//! | variant | vcf |
//! | seg | seg |
//! | mut | maf, mut |
//! | interact | bedpe, interact, bigInteract |
//! | gwas | gwas, bed |
//! | arc | bp, bed |
//! | junction | bed |

pub mod session;
pub mod track;
pub mod types;
