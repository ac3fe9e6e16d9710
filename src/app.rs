use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::biogrid::{self, BiogridClient, LoadedRelease};
use crate::domain::ReleaseVersion;
use crate::error::BiogridError;
use crate::store::Store;
use crate::summary::{MetadataRecord, MetadataRegistry, Summary, write_organism_genes};
use crate::transform::{TransformStats, transform_table};
use crate::writer::FactWriter;

/// Where the interaction table comes from.
#[derive(Debug, Clone)]
pub enum Input {
    LocalFile(PathBuf),
    /// Download a release; `None` means the latest one.
    Release(Option<ReleaseVersion>),
}

#[derive(Debug, Clone, Serialize)]
pub struct ConvertResult {
    pub version: String,
    pub source: String,
    pub full_path: String,
    pub gene_level_path: String,
    pub organism_genes_path: String,
    pub full_facts: usize,
    pub gene_level_facts: usize,
    pub organism_genes: usize,
    pub summary: Summary,
    pub stats: TransformStats,
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub message: String,
    pub elapsed: Option<Duration>,
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

pub struct App<C: BiogridClient, M: MetadataRegistry> {
    store: Store,
    client: C,
    metadata: M,
    script: String,
}

impl<C: BiogridClient, M: MetadataRegistry> App<C, M> {
    pub fn new(store: Store, client: C, metadata: M, script: String) -> Self {
        Self {
            store,
            client,
            metadata,
            script,
        }
    }

    /// Loads the input, then converts it with output files stamped `date`.
    pub fn convert(
        &self,
        input: Input,
        date: NaiveDate,
        sink: &dyn ProgressSink,
    ) -> Result<ConvertResult, BiogridError> {
        let start = Instant::now();
        let release = match input {
            Input::LocalFile(path) => {
                sink.event(ProgressEvent {
                    message: format!("phase=Load; reading {}", path.display()),
                    elapsed: None,
                });
                biogrid::load_local(&path)?
            }
            Input::Release(version) => {
                sink.event(ProgressEvent {
                    message: format!("phase=Download; {}", biogrid::archive_url(version.as_ref())),
                    elapsed: None,
                });
                biogrid::fetch_release(&self.client, &self.store, version.as_ref())?
            }
        };
        sink.event(ProgressEvent {
            message: format!(
                "phase=Load; release {} with {} rows",
                release.version,
                release.table.len()
            ),
            elapsed: Some(start.elapsed()),
        });
        self.convert_release(release, date, sink)
    }

    pub fn convert_release(
        &self,
        release: LoadedRelease,
        date: NaiveDate,
        sink: &dyn ProgressSink,
    ) -> Result<ConvertResult, BiogridError> {
        let start = Instant::now();
        let LoadedRelease {
            table,
            version,
            source,
        } = release;
        info!(version = %version, rows = table.len(), "started importing");

        self.store.ensure_output_dirs()?;
        let full_path = self.store.full_facts_path(&version, date);
        let gene_level_path = self.store.gene_level_facts_path(&version, date);

        sink.event(ProgressEvent {
            message: "phase=Convert; writing facts".to_string(),
            elapsed: None,
        });
        let mut writer =
            FactWriter::create(full_path.as_std_path(), gene_level_path.as_std_path())?;
        let output = transform_table(&table, &mut writer)?;
        let (_, _, lines) = writer.finish()?;
        sink.event(ProgressEvent {
            message: format!(
                "phase=Convert; {} facts, {} gene-level facts",
                lines.full, lines.gene_level
            ),
            elapsed: Some(start.elapsed()),
        });

        sink.event(ProgressEvent {
            message: "phase=Summary; updating metadata".to_string(),
            elapsed: None,
        });
        let summary = Summary::from_registry(&output.registry);
        let record = MetadataRecord::new(&version, &source, &self.script, &summary);
        self.metadata.update(&record)?;
        write_organism_genes(self.store.organism_genes_path(), &output.organism_genes)?;

        info!(path = %full_path, "done");
        Ok(ConvertResult {
            version: version.to_string(),
            source,
            full_path: full_path.to_string(),
            gene_level_path: gene_level_path.to_string(),
            organism_genes_path: self.store.organism_genes_path().to_string(),
            full_facts: lines.full,
            gene_level_facts: lines.gene_level,
            organism_genes: output.organism_genes.len(),
            summary,
            stats: output.stats,
        })
    }
}
