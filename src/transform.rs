//! Row-to-fact conversion with at-most-once emission per entity and pair.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, trace};

use crate::atomese::{
    self, Entity, expression_facts, identifier_mapping_fact, interaction_fact,
    organism_membership_fact,
};
use crate::domain::{GeneSymbol, ProteinAccession, TaxonomyId, parse_score};
use crate::error::BiogridError;
use crate::registry::{IdentifierRegistry, PairKind};
use crate::table::{InteractionRow, InteractionTable};
use crate::writer::{FactSink, Scope};

const MISSING: &str = "-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransformStats {
    pub rows: usize,
    pub skipped_rows: usize,
    /// Distinct gene pairs, counted in the order first seen.
    pub gene_interactions: usize,
    pub protein_interactions: usize,
}

/// State left behind by a completed pass, consumed by the summary.
#[derive(Debug)]
pub struct TransformOutput {
    pub registry: IdentifierRegistry,
    pub organism_genes: BTreeSet<GeneSymbol>,
    pub stats: TransformStats,
}

/// One interactor side of a row, normalized.
struct Interactor {
    gene: GeneSymbol,
    protein: ProteinAccession,
    entrez: String,
    biogrid: String,
    organism: TaxonomyId,
}

impl Interactor {
    fn from_columns(
        index: usize,
        gene: GeneSymbol,
        swissprot: Option<&str>,
        entrez: Option<&str>,
        biogrid: Option<&str>,
        organism: Option<&str>,
    ) -> Result<Self, BiogridError> {
        let organism = organism
            .unwrap_or_default()
            .parse::<TaxonomyId>()
            .map_err(|_| BiogridError::InvalidOrganism {
                row: index + 1,
                value: organism.unwrap_or_default().to_string(),
            })?;
        Ok(Self {
            gene,
            protein: ProteinAccession::new(swissprot.unwrap_or(MISSING)),
            entrez: entrez.unwrap_or(MISSING).trim().to_string(),
            biogrid: biogrid.unwrap_or(MISSING).trim().to_string(),
            organism,
        })
    }

    fn gene_entity(&self) -> Entity {
        Entity::Gene(self.gene.clone())
    }

    fn protein_entity(&self) -> Entity {
        Entity::Protein(self.protein.clone())
    }
}

#[derive(Debug, Default)]
pub struct RowTransformer {
    registry: IdentifierRegistry,
    organism_genes: BTreeSet<GeneSymbol>,
    stats: TransformStats,
}

impl RowTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts one row. `index` is the 0-based row position, used in errors.
    pub fn process_row(
        &mut self,
        index: usize,
        row: &InteractionRow,
        sink: &mut dyn FactSink,
    ) -> Result<(), BiogridError> {
        self.stats.rows += 1;
        let genes = (
            parse_symbol(row.symbol_a.as_deref()),
            parse_symbol(row.symbol_b.as_deref()),
        );
        let (Some(gene_a), Some(gene_b)) = genes else {
            trace!(row = index + 1, "skipping row without gene symbols");
            self.stats.skipped_rows += 1;
            return Ok(());
        };

        let a = Interactor::from_columns(
            index,
            gene_a,
            row.swissprot_a.as_deref(),
            row.entrez_a.as_deref(),
            row.biogrid_a.as_deref(),
            row.organism_a.as_deref(),
        )?;
        let b = Interactor::from_columns(
            index,
            gene_b,
            row.swissprot_b.as_deref(),
            row.entrez_b.as_deref(),
            row.biogrid_b.as_deref(),
            row.organism_b.as_deref(),
        )?;
        let score = parse_score(row.score.as_deref());

        self.convert_gene_pair(&a, &b, score, sink)?;
        self.convert_protein_pair(&a, &b, score, sink)
    }

    fn convert_gene_pair(
        &mut self,
        a: &Interactor,
        b: &Interactor,
        score: Option<f64>,
        sink: &mut dyn FactSink,
    ) -> Result<(), BiogridError> {
        let (symbol_a, symbol_b) = (a.gene.as_str(), b.gene.as_str());
        if self.registry.has_emitted_pair(PairKind::Gene, symbol_a, symbol_b) {
            return Ok(());
        }

        for side in [a, b] {
            let gene = side.gene_entity();
            if !self.registry.has_emitted_identifier(&gene) {
                sink.emit(&identifier_mapping_fact(&side.gene, &side.entrez), Scope::Full)?;
                self.registry.mark_emitted(gene);
            }
        }

        let fact = interaction_fact(a.gene_entity(), b.gene_entity(), score);
        sink.emit(&fact, Scope::Both)?;
        self.stats.gene_interactions += 1;

        for side in [a, b] {
            if !side.organism.is_organism_tag() {
                continue;
            }
            self.organism_genes.insert(side.gene.clone());
            sink.emit(
                &organism_membership_fact(side.gene_entity(), side.organism),
                Scope::Both,
            )?;
            sink.emit(
                &organism_membership_fact(side.protein_entity(), side.organism),
                Scope::Full,
            )?;
        }

        self.registry
            .mark_pair_emitted(PairKind::Gene, symbol_a, symbol_b);
        Ok(())
    }

    fn convert_protein_pair(
        &mut self,
        a: &Interactor,
        b: &Interactor,
        score: Option<f64>,
        sink: &mut dyn FactSink,
    ) -> Result<(), BiogridError> {
        let (accession_a, accession_b) = (a.protein.as_str(), b.protein.as_str());
        if self
            .registry
            .has_emitted_pair(PairKind::Protein, accession_a, accession_b)
        {
            return Ok(());
        }

        let fact = interaction_fact(a.protein_entity(), b.protein_entity(), score);
        sink.emit(&fact, Scope::Full)?;
        self.stats.protein_interactions += 1;

        for side in [a, b] {
            let protein = side.protein_entity();
            if self.registry.has_emitted_identifier(&protein) {
                continue;
            }
            for fact in expression_facts(&side.gene, &side.protein, &side.biogrid) {
                sink.emit(&fact, Scope::Full)?;
            }
            self.registry.mark_emitted(protein);
        }

        self.registry
            .mark_pair_emitted(PairKind::Protein, accession_a, accession_b);
        Ok(())
    }

    /// Emits the closing organism name fact and releases the run state.
    pub fn finish(self, sink: &mut dyn FactSink) -> Result<TransformOutput, BiogridError> {
        sink.emit(&atomese::organism_name_fact(), Scope::Both)?;
        debug!(
            rows = self.stats.rows,
            skipped = self.stats.skipped_rows,
            gene_interactions = self.stats.gene_interactions,
            protein_interactions = self.stats.protein_interactions,
            "conversion pass complete"
        );
        Ok(TransformOutput {
            registry: self.registry,
            organism_genes: self.organism_genes,
            stats: self.stats,
        })
    }
}

/// Runs every row of `table` through a fresh transformer.
pub fn transform_table(
    table: &InteractionTable,
    sink: &mut dyn FactSink,
) -> Result<TransformOutput, BiogridError> {
    let mut transformer = RowTransformer::new();
    for (index, row) in table.rows.iter().enumerate() {
        transformer.process_row(index, row, sink)?;
    }
    transformer.finish(sink)
}

fn parse_symbol(raw: Option<&str>) -> Option<GeneSymbol> {
    raw.and_then(|value| value.parse().ok())
}
