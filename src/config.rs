use std::fs;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::BiogridError;

pub const DEFAULT_CONFIG_FILE: &str = "biogrid-atomese.json";
pub const DEFAULT_SCRIPT: &str =
    "https://github.com/MOZI-AI/knowledge-import/coronavirus_biogrid.py";

/// On-disk config; every field is optional.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub dataset_dir: Option<String>,
    #[serde(default)]
    pub gene_level_dir: Option<String>,
    #[serde(default)]
    pub raw_data_dir: Option<String>,
    #[serde(default)]
    pub organism_genes_path: Option<String>,
    #[serde(default)]
    pub metadata_path: Option<String>,
    #[serde(default)]
    pub script: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub dataset_dir: Utf8PathBuf,
    pub gene_level_dir: Utf8PathBuf,
    pub raw_data_dir: Utf8PathBuf,
    pub organism_genes_path: Utf8PathBuf,
    pub metadata_path: Utf8PathBuf,
    pub script: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        ConfigLoader::resolve_config(Config::default())
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `path`, or `biogrid-atomese.json` from the working directory when
    /// no path is given. Only an explicitly named file has to exist.
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, BiogridError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Ok(ResolvedConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| BiogridError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| BiogridError::ConfigParse(err.to_string()))?;

        Ok(Self::resolve_config(config))
    }

    pub fn resolve_config(config: Config) -> ResolvedConfig {
        let path = |value: Option<String>, default: &str| {
            Utf8PathBuf::from(value.unwrap_or_else(|| default.to_string()))
        };
        ResolvedConfig {
            dataset_dir: path(config.dataset_dir, "dataset"),
            gene_level_dir: path(config.gene_level_dir, "gene-level"),
            raw_data_dir: path(config.raw_data_dir, "raw_data"),
            organism_genes_path: path(config.organism_genes_path, "Covid19-genes"),
            metadata_path: path(config.metadata_path, "metadata.json"),
            script: config.script.unwrap_or_else(|| DEFAULT_SCRIPT.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config = Config {
            dataset_dir: Some("out/full".to_string()),
            ..Config::default()
        };

        let resolved = ConfigLoader::resolve_config(config);
        assert_eq!(resolved.dataset_dir, Utf8PathBuf::from("out/full"));
        assert_eq!(resolved.gene_level_dir, Utf8PathBuf::from("gene-level"));
        assert_eq!(resolved.organism_genes_path, Utf8PathBuf::from("Covid19-genes"));
        assert_eq!(resolved.script, DEFAULT_SCRIPT);
    }
}
