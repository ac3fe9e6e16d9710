use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum BiogridError {
    #[error("invalid BioGRID release version: {0}")]
    InvalidVersion(String),

    #[error("invalid gene symbol: {0:?}")]
    InvalidGeneSymbol(String),

    #[error("row {row}: invalid organism taxonomy id {value:?}")]
    #[diagnostic(help("organism columns must hold integer NCBI taxonomy ids"))]
    InvalidOrganism { row: usize, value: String },

    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("failed to read interaction table: {0}")]
    TableRead(String),

    #[error("release archive is empty: {0}")]
    EmptyArchive(PathBuf),

    #[error("BioGRID request failed: {0}")]
    BiogridHttp(String),

    #[error("BioGRID returned status {status}: {message}")]
    BiogridStatus { status: u16, message: String },

    #[error("metadata registry error: {0}")]
    Metadata(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
