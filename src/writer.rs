use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::atomese::Fact;
use crate::error::BiogridError;

/// Which output streams receive a fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Full fact stream only.
    Full,
    /// Full stream and the gene-level stream.
    Both,
}

pub trait FactSink {
    fn emit(&mut self, fact: &Fact, scope: Scope) -> Result<(), BiogridError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub full: usize,
    pub gene_level: usize,
}

/// Appends each fact as one line to the full stream and, for gene-level
/// facts, to the gene-level stream.
pub struct FactWriter<W: Write> {
    full: W,
    gene_level: W,
    counts: LineCounts,
}

impl FactWriter<BufWriter<File>> {
    pub fn create(full_path: &Path, gene_level_path: &Path) -> Result<Self, BiogridError> {
        let open = |path: &Path| {
            File::create(path)
                .map(BufWriter::new)
                .map_err(|err| BiogridError::Filesystem(format!("create {}: {err}", path.display())))
        };
        Ok(Self::new(open(full_path)?, open(gene_level_path)?))
    }
}

impl<W: Write> FactWriter<W> {
    pub fn new(full: W, gene_level: W) -> Self {
        Self {
            full,
            gene_level,
            counts: LineCounts::default(),
        }
    }

    /// Flushes both streams and hands them back.
    pub fn finish(mut self) -> Result<(W, W, LineCounts), BiogridError> {
        self.full
            .flush()
            .map_err(|err| BiogridError::Filesystem(err.to_string()))?;
        self.gene_level
            .flush()
            .map_err(|err| BiogridError::Filesystem(err.to_string()))?;
        Ok((self.full, self.gene_level, self.counts))
    }
}

impl<W: Write> FactSink for FactWriter<W> {
    fn emit(&mut self, fact: &Fact, scope: Scope) -> Result<(), BiogridError> {
        let line = format!("{fact}\n");
        self.full
            .write_all(line.as_bytes())
            .map_err(|err| BiogridError::Filesystem(err.to_string()))?;
        self.counts.full += 1;
        if scope == Scope::Both {
            self.gene_level
                .write_all(line.as_bytes())
                .map_err(|err| BiogridError::Filesystem(err.to_string()))?;
            self.counts.gene_level += 1;
        }
        Ok(())
    }
}

/// Keeps rendered facts in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub full: Vec<String>,
    pub gene_level: Vec<String>,
}

impl FactSink for MemorySink {
    fn emit(&mut self, fact: &Fact, scope: Scope) -> Result<(), BiogridError> {
        let line = fact.to_string();
        if scope == Scope::Both {
            self.gene_level.push(line.clone());
        }
        self.full.push(line);
        Ok(())
    }
}
