use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::BiogridError;

/// One interaction record of a BioGRID tab2/tab3 file. Only the columns the
/// conversion reads are mapped; the rest are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionRow {
    #[serde(rename = "Official Symbol Interactor A")]
    pub symbol_a: Option<String>,
    #[serde(rename = "Official Symbol Interactor B")]
    pub symbol_b: Option<String>,
    #[serde(rename = "SWISS-PROT Accessions Interactor A", default)]
    pub swissprot_a: Option<String>,
    #[serde(rename = "SWISS-PROT Accessions Interactor B", default)]
    pub swissprot_b: Option<String>,
    #[serde(rename = "Score", default)]
    pub score: Option<String>,
    #[serde(rename = "Entrez Gene Interactor A", default)]
    pub entrez_a: Option<String>,
    #[serde(rename = "Entrez Gene Interactor B", default)]
    pub entrez_b: Option<String>,
    #[serde(
        rename = "Organism Interactor A",
        alias = "Organism ID Interactor A",
        default
    )]
    pub organism_a: Option<String>,
    #[serde(
        rename = "Organism Interactor B",
        alias = "Organism ID Interactor B",
        default
    )]
    pub organism_b: Option<String>,
    #[serde(rename = "BioGRID ID Interactor A", default)]
    pub biogrid_a: Option<String>,
    #[serde(rename = "BioGRID ID Interactor B", default)]
    pub biogrid_b: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InteractionTable {
    pub rows: Vec<InteractionRow>,
}

impl InteractionTable {
    pub fn load(path: &Path) -> Result<Self, BiogridError> {
        if !path.exists() {
            return Err(BiogridError::MissingInput(path.to_path_buf()));
        }
        let file = File::open(path)
            .map_err(|err| BiogridError::TableRead(format!("{}: {err}", path.display())))?;
        let table = Self::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), rows = table.len(), "loaded interaction table");
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, BiogridError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(b'\t')
            .quoting(false)
            .from_reader(reader);

        let rows = csv_reader
            .deserialize()
            .collect::<Result<Vec<InteractionRow>, _>>()
            .map_err(|err| BiogridError::TableRead(err.to_string()))?;
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
