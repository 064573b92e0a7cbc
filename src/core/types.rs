use serde::{Deserialize, Serialize};

/// Name reported by the tool in the viewer page and the API
pub const TOOL_ID: &str = "igv-tool";

/// igv.js release the viewer page loads, also used as the session schema version
pub const IGV_VERSION: &str = "2.15.5";

/// Track type understood by igv.js
///
/// See <https://github.com/igvteam/igv.js/wiki/Tracks-2.0> for the meaning of each type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TrackType {
    /// Non-quantitative genome annotations such as genes
    Annotation,
    /// Quantitative genomic data, such as ChIP peaks and alignment coverage
    Wig,
    /// Sequencing reads and alignments
    Alignment,
    /// Genomic variants
    Variant,
    /// Segmented copy number data
    Seg,
    /// Mutation data, primarily from cancer studies
    Mut,
    /// Arcs representing interactions between two genomic loci
    Interact,
    /// Genome wide association data (manhattan plots)
    Gwas,
    /// RNA secondary structure
    Arc,
    /// RNA splice junctions
    Junction,
}

impl TrackType {
    pub const ALL: [Self; 10] = [
        Self::Annotation,
        Self::Wig,
        Self::Alignment,
        Self::Variant,
        Self::Seg,
        Self::Mut,
        Self::Interact,
        Self::Gwas,
        Self::Arc,
        Self::Junction,
    ];

    /// Formats igv.js accepts for this track type
    #[must_use]
    pub const fn allowed_formats(self) -> &'static [&'static str] {
        match self {
            Self::Annotation => &["bed", "gff", "gff3", "gtf", "bedpe"],
            Self::Wig => &["wig", "bigWig", "bedGraph"],
            Self::Alignment => &["bam", "cram"],
            Self::Variant => &["vcf"],
            Self::Seg => &["seg"],
            Self::Mut => &["maf", "mut"],
            Self::Interact => &["bedpe", "interact", "bigInteract"],
            Self::Gwas => &["gwas", "bed"],
            Self::Arc => &["bp", "bed"],
            Self::Junction => &["bed"],
        }
    }

    /// Whether `format` is a valid format for this track type (case-sensitive)
    #[must_use]
    pub fn supports(self, format: &str) -> bool {
        self.allowed_formats().contains(&format)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Annotation => "annotation",
            Self::Wig => "wig",
            Self::Alignment => "alignment",
            Self::Variant => "variant",
            Self::Seg => "seg",
            Self::Mut => "mut",
            Self::Interact => "interact",
            Self::Gwas => "gwas",
            Self::Arc => "arc",
            Self::Junction => "junction",
        }
    }
}

impl std::fmt::Display for TrackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown track type: {0}")]
pub struct UnknownTrackType(pub String);

impl std::str::FromStr for TrackType {
    type Err = UnknownTrackType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTrackType(s.to_string()))
    }
}
