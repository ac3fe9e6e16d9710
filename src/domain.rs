use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::BiogridError;

/// NCBI taxonomy id of SARS-CoV-2.
pub const ORGANISM_TAG: TaxonomyId = TaxonomyId(2697049);
pub const ORGANISM_NAME: &str = "SARS-CoV-2";

/// A BioGRID release number such as `3.5.183`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves the release from a BioGRID file name, e.g.
    /// `BIOGRID-CORONAVIRUS-3.5.183.tab3.txt` gives `3.5.183`. Names that do
    /// not follow the release pattern keep whatever follows the last `-`.
    pub fn from_file_name(name: &str) -> Result<Self, BiogridError> {
        let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
        let tail = base.rsplit('-').next().unwrap_or(base);
        let version = tail.replace(".tab3.txt", "").replace(".tab3.zip", "");
        let version = version.trim();
        if version.is_empty() {
            return Err(BiogridError::InvalidVersion(name.to_string()));
        }
        Ok(Self(version.to_string()))
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReleaseVersion {
    type Err = BiogridError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| {
            Regex::new(r"^\d+\.\d+\.\d+$").expect("release version pattern is valid")
        });
        let normalized = value.trim();
        if !pattern.is_match(normalized) {
            return Err(BiogridError::InvalidVersion(value.to_string()));
        }
        Ok(Self(normalized.to_string()))
    }
}

/// Official gene symbol, upper-cased and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GeneSymbol(String);

impl GeneSymbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GeneSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GeneSymbol {
    type Err = BiogridError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(BiogridError::InvalidGeneSymbol(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

/// SWISS-PROT accession exactly as the feed lists it (trimmed only). The feed
/// uses `-` for interactors without an accession; such values are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProteinAccession(String);

impl ProteinAccession {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProteinAccession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxonomyId(pub u32);

impl TaxonomyId {
    pub fn is_organism_tag(self) -> bool {
        self == ORGANISM_TAG
    }
}

impl fmt::Display for TaxonomyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaxonomyId {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse().map(Self)
    }
}

/// Parses the `Score` column. Placeholders (`-`, empty, `nan`) and anything
/// non-numeric mean the interaction carries no confidence.
pub fn parse_score(raw: Option<&str>) -> Option<f64> {
    let value = raw?.trim();
    if value.is_empty() || value == "-" {
        return None;
    }
    value.parse::<f64>().ok().filter(|score| score.is_finite())
}
