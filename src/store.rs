use std::fs;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;

use crate::config::ResolvedConfig;
use crate::domain::ReleaseVersion;
use crate::error::BiogridError;

const FILE_PREFIX: &str = "COVID-19-biogrid";

/// Output layout of a conversion run. Relative config paths resolve against
/// `root`.
#[derive(Debug, Clone)]
pub struct Store {
    dataset_dir: Utf8PathBuf,
    gene_level_dir: Utf8PathBuf,
    raw_data_dir: Utf8PathBuf,
    organism_genes_path: Utf8PathBuf,
    metadata_path: Utf8PathBuf,
}

impl Store {
    pub fn new(root: &Utf8Path, config: &ResolvedConfig) -> Self {
        Self {
            dataset_dir: root.join(&config.dataset_dir),
            gene_level_dir: root.join(&config.gene_level_dir),
            raw_data_dir: root.join(&config.raw_data_dir),
            organism_genes_path: root.join(&config.organism_genes_path),
            metadata_path: root.join(&config.metadata_path),
        }
    }

    pub fn current_dir(config: &ResolvedConfig) -> Result<Self, BiogridError> {
        let cwd =
            std::env::current_dir().map_err(|err| BiogridError::Filesystem(err.to_string()))?;
        let root = Utf8PathBuf::from_path_buf(cwd)
            .map_err(|_| BiogridError::Filesystem("invalid working directory".to_string()))?;
        Ok(Self::new(&root, config))
    }

    pub fn full_facts_path(&self, version: &ReleaseVersion, date: NaiveDate) -> Utf8PathBuf {
        self.dataset_dir
            .join(format!("{FILE_PREFIX}_{version}_{}.scm", date.format("%Y-%m-%d")))
    }

    pub fn gene_level_facts_path(&self, version: &ReleaseVersion, date: NaiveDate) -> Utf8PathBuf {
        self.gene_level_dir.join(format!(
            "{FILE_PREFIX}_{version}_gene-level_{}.scm",
            date.format("%Y-%m-%d")
        ))
    }

    pub fn raw_data_dir(&self) -> &Utf8Path {
        &self.raw_data_dir
    }

    pub fn organism_genes_path(&self) -> &Utf8Path {
        &self.organism_genes_path
    }

    pub fn metadata_path(&self) -> &Utf8Path {
        &self.metadata_path
    }

    pub fn ensure_output_dirs(&self) -> Result<(), BiogridError> {
        for dir in [&self.dataset_dir, &self.gene_level_dir] {
            fs::create_dir_all(dir.as_std_path())
                .map_err(|err| BiogridError::Filesystem(format!("create {dir}: {err}")))?;
        }
        Ok(())
    }

    pub fn ensure_raw_data_dir(&self) -> Result<(), BiogridError> {
        fs::create_dir_all(self.raw_data_dir.as_std_path())
            .map_err(|err| BiogridError::Filesystem(format!("create {}: {err}", self.raw_data_dir)))
    }

    /// Writes through a temp file in the destination directory so readers
    /// never see a partial file.
    pub fn write_bytes_atomic(path: &Utf8Path, content: &[u8]) -> Result<(), BiogridError> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        fs::create_dir_all(parent.as_std_path())
            .map_err(|err| BiogridError::Filesystem(err.to_string()))?;
        let mut temp = tempfile::Builder::new()
            .prefix("biogrid-atomese")
            .tempfile_in(parent.as_std_path())
            .map_err(|err| BiogridError::Filesystem(err.to_string()))?;
        temp.write_all(content)
            .map_err(|err| BiogridError::Filesystem(err.to_string()))?;
        temp.persist(path.as_std_path())
            .map_err(|err| BiogridError::Filesystem(err.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_file_names_carry_version_and_date() {
        let store = Store::new(Utf8Path::new("/work"), &ResolvedConfig::default());
        let version: ReleaseVersion = "3.5.183".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2020, 3, 25).unwrap();

        assert_eq!(
            store.full_facts_path(&version, date),
            Utf8PathBuf::from("/work/dataset/COVID-19-biogrid_3.5.183_2020-03-25.scm")
        );
        assert_eq!(
            store.gene_level_facts_path(&version, date),
            Utf8PathBuf::from("/work/gene-level/COVID-19-biogrid_3.5.183_gene-level_2020-03-25.scm")
        );
        assert!(store.organism_genes_path().ends_with("Covid19-genes"));
    }
}
