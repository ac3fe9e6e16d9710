use std::collections::HashSet;

use biogrid_atomese::table::{InteractionRow, InteractionTable};
use biogrid_atomese::transform::{TransformOutput, transform_table};
use biogrid_atomese::writer::MemorySink;

#[allow(clippy::too_many_arguments)]
fn row(
    gene_a: &str,
    gene_b: &str,
    prot_a: &str,
    prot_b: &str,
    score: &str,
    org_a: &str,
    org_b: &str,
) -> InteractionRow {
    InteractionRow {
        symbol_a: Some(gene_a.to_string()),
        symbol_b: Some(gene_b.to_string()),
        swissprot_a: Some(prot_a.to_string()),
        swissprot_b: Some(prot_b.to_string()),
        score: Some(score.to_string()),
        entrez_a: Some(format!("{}", gene_a.len())),
        entrez_b: Some(format!("{}", gene_b.len())),
        organism_a: Some(org_a.to_string()),
        organism_b: Some(org_b.to_string()),
        biogrid_a: Some(format!("bio-{gene_a}")),
        biogrid_b: Some(format!("bio-{gene_b}")),
    }
}

fn run(rows: Vec<InteractionRow>) -> (MemorySink, TransformOutput) {
    let mut sink = MemorySink::default();
    let output = transform_table(&InteractionTable { rows }, &mut sink).unwrap();
    (sink, output)
}

fn count(lines: &[String], needle: &str) -> usize {
    lines.iter().filter(|line| line.contains(needle)).count()
}

#[test]
fn reversed_rows_scenario() {
    let (sink, output) = run(vec![
        row("BRCA1", "TP53", "P1", "P2", "0.9", "9606", "2697049"),
        row("TP53", "BRCA1", "P2", "P1", "0.9", "2697049", "9606"),
    ]);

    let gene_interaction = r#"(EvaluationLink (stv 1.0 0.9) (PredicateNode "interacts_with") (SetLink (GeneNode "BRCA1") (GeneNode "TP53")))"#;
    assert_eq!(count(&sink.full, gene_interaction), 1);
    assert_eq!(
        count(&sink.full, r#"(SetLink (GeneNode "TP53") (GeneNode "BRCA1"))"#),
        0
    );
    assert_eq!(output.stats.gene_interactions, 1);

    assert_eq!(
        count(&sink.full, r#"(ListLink (GeneNode "TP53") (ConceptNode "ncbi:2697049"))"#),
        1
    );
    assert_eq!(
        count(&sink.full, r#"(ListLink (MoleculeNode "Uniprot:P2") (ConceptNode "ncbi:2697049"))"#),
        1
    );
    assert_eq!(count(&sink.full, r#"(GeneNode "BRCA1") (ConceptNode "ncbi"#), 0);

    // Protein pairs are tracked in row order, so the swapped pair is new.
    let forward = r#"(SetLink (MoleculeNode "Uniprot:P1") (MoleculeNode "Uniprot:P2"))"#;
    let swapped = r#"(SetLink (MoleculeNode "Uniprot:P2") (MoleculeNode "Uniprot:P1"))"#;
    assert_eq!(count(&sink.full, forward), 1);
    assert_eq!(count(&sink.full, swapped), 1);
    assert_eq!(output.stats.protein_interactions, 2);
    assert_eq!(count(&sink.full, "expresses"), 2);

    assert_eq!(sink.gene_level.len(), 3);
}

#[test]
fn identifier_facts_are_emitted_once_per_gene() {
    let (sink, output) = run(vec![
        row("A", "B", "P1", "P2", "-", "9606", "9606"),
        row("a ", "C", "P1", "P3", "-", "9606", "9606"),
        row("C", "B", "P3", "P2", "-", "9606", "9606"),
        row("D", "A", "P4", "P1", "-", "9606", "9606"),
    ]);

    for gene in ["A", "B", "C", "D"] {
        let fact = format!(r#"(PredicateNode "has_entrez_id") (ListLink (GeneNode "{gene}")"#);
        assert_eq!(count(&sink.full, &fact), 1, "gene {gene}");
    }
    assert_eq!(output.registry.emitted_gene_count(), 4);
    assert_eq!(output.registry.emitted_protein_count(), 4);
    assert_eq!(count(&sink.full, "expresses"), 4);
}

#[test]
fn gene_level_output_is_a_subset_of_full_output() {
    let (sink, _) = run(vec![
        row("ORF1AB", "ACE2", "P0DTD1", "Q9BYF1", "0.3", "2697049", "9606"),
        row("S", "ACE2", "P0DTC2", "Q9BYF1", "-", "2697049", "9606"),
        row("ACE2", "TMPRSS2", "Q9BYF1", "O15393", "0.25", "9606", "9606"),
    ]);

    let full: HashSet<&String> = sink.full.iter().collect();
    assert!(sink.gene_level.iter().all(|line| full.contains(line)));
    assert!(sink.gene_level.iter().all(|line| !line.contains("MoleculeNode")));
    assert!(sink.gene_level.iter().all(|line| !line.contains("has_entrez_id")));
    assert_eq!(
        sink.gene_level.last(),
        sink.full.last(),
        "both streams end with the organism name"
    );
}

#[test]
fn confidence_is_rounded_to_three_decimals() {
    let (sink, _) = run(vec![
        row("A", "B", "P1", "P2", "7.234567", "9606", "9606"),
        row("C", "D", "P3", "P4", "-", "9606", "9606"),
    ]);

    assert_eq!(count(&sink.full, "(stv 1.0 7.235)"), 2);
    assert_eq!(count(&sink.full, "(stv"), 2);
}

#[test]
fn confidence_on_a_decimal_tie_follows_the_stored_value() {
    let (sink, _) = run(vec![
        row("A", "B", "P1", "P2", "0.0045", "9606", "9606"),
        row("C", "D", "P3", "P4", "1.0005", "9606", "9606"),
    ]);

    assert_eq!(count(&sink.full, "(stv 1.0 0.004)"), 2);
    assert_eq!(count(&sink.full, "(stv 1.0 1.0)"), 2);
    assert_eq!(count(&sink.full, "(stv 1.0 0.005)"), 0);
}

#[test]
fn organism_tagged_gene_is_listed_once() {
    let (_, output) = run(vec![
        row("ORF1AB", "ACE2", "P0DTD1", "Q9BYF1", "-", "2697049", "9606"),
        row("ORF1AB", "TMPRSS2", "P0DTD1", "O15393", "-", "2697049", "9606"),
        row("orf1ab", "BSG", "P0DTD1", "P35613", "-", "2697049", "9606"),
    ]);

    let tagged: Vec<&str> = output.organism_genes.iter().map(|g| g.as_str()).collect();
    assert_eq!(tagged, vec!["ORF1AB"]);
}

#[test]
fn conversion_is_deterministic() {
    let rows = || {
        vec![
            row("A", "B", "P1", "P2", "0.5", "2697049", "9606"),
            row("B", "C", "P2", "P3", "-", "9606", "9606"),
            row("C", "A", "P3", "P1", "1.25", "9606", "2697049"),
        ]
    };
    let (first, _) = run(rows());
    let (second, _) = run(rows());
    assert_eq!(first.full, second.full);
    assert_eq!(first.gene_level, second.gene_level);
}
