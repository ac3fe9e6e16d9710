//! Atomese rendering of the facts produced from BioGRID rows.
//!
//! Every fact is an `EvaluationLink` over a predicate and a two-element
//! argument container, printed on a single line:
//!
//! ```text
//! (EvaluationLink (stv 1.0 0.9) (PredicateNode "interacts_with") (SetLink (GeneNode "A") (GeneNode "B")))
//! ```

use std::fmt;

use crate::domain::{GeneSymbol, ORGANISM_NAME, ORGANISM_TAG, ProteinAccession, TaxonomyId};

/// A node argument of a fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Entity {
    Gene(GeneSymbol),
    Protein(ProteinAccession),
    Concept(String),
}

impl Entity {
    pub fn concept(prefix: &str, id: impl fmt::Display) -> Self {
        Entity::Concept(format!("{prefix}:{id}"))
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Gene(symbol) => write_node(f, "GeneNode", symbol.as_str()),
            Entity::Protein(accession) => {
                write_node(f, "MoleculeNode", &format!("Uniprot:{accession}"))
            }
            Entity::Concept(name) => write_node(f, "ConceptNode", name),
        }
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, kind: &str, name: &str) -> fmt::Result {
    write!(f, "({kind} \"")?;
    for ch in name.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            other => write!(f, "{other}")?,
        }
    }
    f.write_str("\")")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// Ordered arguments (`ListLink`).
    List,
    /// Unordered arguments (`SetLink`), used for symmetric predicates.
    Set,
}

/// Simple truth value attached to interaction facts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruthValue {
    pub strength: f64,
    pub confidence: f64,
}

impl TruthValue {
    /// Strength is fixed at 1.0; the score is rounded to three decimals.
    pub fn from_score(score: f64) -> Self {
        Self {
            strength: 1.0,
            confidence: round_to_thousandths(score),
        }
    }
}

/// Rounds on the exact decimal expansion of `value`, so `0.0045` (stored
/// slightly below the tie) becomes `0.004`.
fn round_to_thousandths(value: f64) -> f64 {
    format!("{value:.3}").parse().unwrap_or(value)
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug formatting of f64 always keeps a fractional digit.
        write!(f, "(stv {:?} {:?})", self.strength, self.confidence)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fact {
    pub predicate: &'static str,
    pub container: Container,
    pub args: [Entity; 2],
    pub truth: Option<TruthValue>,
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(EvaluationLink ")?;
        if let Some(truth) = &self.truth {
            write!(f, "{truth} ")?;
        }
        write_node(f, "PredicateNode", self.predicate)?;
        let link = match self.container {
            Container::List => "ListLink",
            Container::Set => "SetLink",
        };
        write!(f, " ({link} {} {}))", self.args[0], self.args[1])
    }
}

fn list_fact(predicate: &'static str, first: Entity, second: Entity) -> Fact {
    Fact {
        predicate,
        container: Container::List,
        args: [first, second],
        truth: None,
    }
}

pub fn identifier_mapping_fact(gene: &GeneSymbol, entrez_id: &str) -> Fact {
    list_fact(
        "has_entrez_id",
        Entity::Gene(gene.clone()),
        Entity::concept("entrez", entrez_id),
    )
}

pub fn interaction_fact(first: Entity, second: Entity, score: Option<f64>) -> Fact {
    Fact {
        predicate: "interacts_with",
        container: Container::Set,
        args: [first, second],
        truth: score.map(TruthValue::from_score),
    }
}

pub fn organism_membership_fact(entity: Entity, taxonomy: TaxonomyId) -> Fact {
    list_fact("from_organism", entity, Entity::concept("ncbi", taxonomy))
}

/// `expresses` link from gene to protein, followed by the BioGRID id of each.
pub fn expression_facts(
    gene: &GeneSymbol,
    protein: &ProteinAccession,
    biogrid_id: &str,
) -> [Fact; 3] {
    let gene = Entity::Gene(gene.clone());
    let protein = Entity::Protein(protein.clone());
    let biogrid = Entity::concept("Bio", biogrid_id);
    [
        list_fact("expresses", gene.clone(), protein.clone()),
        list_fact("has_biogridID", gene, biogrid.clone()),
        list_fact("has_biogridID", protein, biogrid),
    ]
}

pub fn organism_name_fact() -> Fact {
    list_fact(
        "has_name",
        Entity::concept("ncbi", ORGANISM_TAG),
        Entity::Concept(ORGANISM_NAME.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gene(symbol: &str) -> GeneSymbol {
        symbol.parse().unwrap()
    }

    #[test]
    fn renders_gene_interaction_without_confidence() {
        let fact = interaction_fact(
            Entity::Gene(gene("BRCA1")),
            Entity::Gene(gene("TP53")),
            None,
        );
        assert_eq!(
            fact.to_string(),
            r#"(EvaluationLink (PredicateNode "interacts_with") (SetLink (GeneNode "BRCA1") (GeneNode "TP53")))"#
        );
    }

    #[test]
    fn renders_protein_interaction_with_rounded_confidence() {
        let fact = interaction_fact(
            Entity::Protein(ProteinAccession::new("P38398")),
            Entity::Protein(ProteinAccession::new("P04637")),
            Some(7.234567),
        );
        assert_eq!(
            fact.to_string(),
            r#"(EvaluationLink (stv 1.0 7.235) (PredicateNode "interacts_with") (SetLink (MoleculeNode "Uniprot:P38398") (MoleculeNode "Uniprot:P04637")))"#
        );
    }

    #[test]
    fn confidence_rounds_exact_binary_value() {
        let confidence = |score: f64| TruthValue::from_score(score).confidence;
        assert_eq!(confidence(0.0045), 0.004);
        assert_eq!(confidence(0.0115), 0.011);
        assert_eq!(confidence(1.0005), 1.0);
        assert_eq!(confidence(0.0125), 0.013);
        assert_eq!(confidence(7.234567), 7.235);
        assert_eq!(TruthValue::from_score(1.0005).to_string(), "(stv 1.0 1.0)");
    }

    #[test]
    fn renders_identifier_and_organism_facts() {
        assert_eq!(
            identifier_mapping_fact(&gene("BRCA1"), "672").to_string(),
            r#"(EvaluationLink (PredicateNode "has_entrez_id") (ListLink (GeneNode "BRCA1") (ConceptNode "entrez:672")))"#
        );
        assert_eq!(
            organism_membership_fact(Entity::Gene(gene("ORF1AB")), ORGANISM_TAG).to_string(),
            r#"(EvaluationLink (PredicateNode "from_organism") (ListLink (GeneNode "ORF1AB") (ConceptNode "ncbi:2697049")))"#
        );
        assert_eq!(
            organism_name_fact().to_string(),
            r#"(EvaluationLink (PredicateNode "has_name") (ListLink (ConceptNode "ncbi:2697049") (ConceptNode "SARS-CoV-2")))"#
        );
    }

    #[test]
    fn expression_triple_shares_biogrid_id() {
        let [expresses, gene_id, protein_id] =
            expression_facts(&gene("TP53"), &ProteinAccession::new("P04637"), "113010");
        assert_eq!(
            expresses.to_string(),
            r#"(EvaluationLink (PredicateNode "expresses") (ListLink (GeneNode "TP53") (MoleculeNode "Uniprot:P04637")))"#
        );
        assert!(gene_id.to_string().ends_with(r#"(ConceptNode "Bio:113010")))"#));
        assert!(protein_id.to_string().contains(r#"(MoleculeNode "Uniprot:P04637")"#));
    }

    #[test]
    fn quotes_are_escaped() {
        let entity = Entity::Concept("a \"b\"".to_string());
        assert_eq!(entity.to_string(), r#"(ConceptNode "a \"b\"")"#);
    }
}
