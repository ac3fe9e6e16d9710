use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{GeneSymbol, ReleaseVersion};
use crate::error::BiogridError;
use crate::registry::IdentifierRegistry;
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub genes: usize,
    pub proteins: usize,
    /// Undirected gene interactions: `(A, B)` and `(B, A)` count once.
    pub interactions: usize,
}

impl Summary {
    pub fn from_registry(registry: &IdentifierRegistry) -> Self {
        let canonical: HashSet<(&str, &str)> = registry
            .gene_pairs()
            .map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
            .collect();
        Self {
            genes: registry.emitted_gene_count(),
            proteins: registry.emitted_protein_count(),
            interactions: canonical.len(),
        }
    }
}

/// What the metadata registry stores for one converted release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub label: String,
    pub source: String,
    pub script: String,
    pub genes: usize,
    pub proteins: usize,
    pub interactions: usize,
    pub updated_at: String,
}

impl MetadataRecord {
    pub fn new(version: &ReleaseVersion, source: &str, script: &str, summary: &Summary) -> Self {
        Self {
            label: format!("Coronavirus Biogrid:{version}"),
            source: source.to_string(),
            script: script.to_string(),
            genes: summary.genes,
            proteins: summary.proteins,
            interactions: summary.interactions,
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

pub trait MetadataRegistry {
    fn update(&self, record: &MetadataRecord) -> Result<(), BiogridError>;
}

/// Registry kept as a JSON object keyed by dataset label. Updating a label
/// replaces its previous record.
#[derive(Debug, Clone)]
pub struct JsonMetadataRegistry {
    path: Utf8PathBuf,
}

impl JsonMetadataRegistry {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }

    pub fn read_all(&self) -> Result<BTreeMap<String, MetadataRecord>, BiogridError> {
        if !self.path.as_std_path().exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(self.path.as_std_path())
            .map_err(|err| BiogridError::Metadata(format!("read {}: {err}", self.path)))?;
        serde_json::from_str(&content)
            .map_err(|err| BiogridError::Metadata(format!("parse {}: {err}", self.path)))
    }
}

impl MetadataRegistry for JsonMetadataRegistry {
    fn update(&self, record: &MetadataRecord) -> Result<(), BiogridError> {
        let mut records = self.read_all()?;
        records.insert(record.label.clone(), record.clone());
        let content = serde_json::to_vec_pretty(&records)
            .map_err(|err| BiogridError::Metadata(err.to_string()))?;
        Store::write_bytes_atomic(&self.path, &content)?;
        info!(label = %record.label, path = %self.path, "metadata registry updated");
        Ok(())
    }
}

/// Writes the organism-tagged gene symbols, one per line, sorted.
pub fn write_organism_genes(
    path: &Utf8Path,
    genes: &BTreeSet<GeneSymbol>,
) -> Result<(), BiogridError> {
    let content = genes
        .iter()
        .map(GeneSymbol::as_str)
        .collect::<Vec<_>>()
        .join("\n");
    Store::write_bytes_atomic(path, content.as_bytes())
}
