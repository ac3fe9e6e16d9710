use std::collections::HashSet;

use crate::atomese::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairKind {
    /// Gene pairs match regardless of the order the row lists them in.
    Gene,
    /// Protein pairs match only in the exact order first seen.
    Protein,
}

/// Tracks which entities and pairs have already produced facts.
///
/// Entities are marked once their identifier facts are written: genes after
/// their `has_entrez_id` fact, proteins after their expression triple. Pairs
/// are stored as the `(a, b)` tuple first seen. Nothing is ever removed.
#[derive(Debug, Default)]
pub struct IdentifierRegistry {
    entities: HashSet<Entity>,
    pairs: HashSet<(PairKind, String, String)>,
    gene_pairs: Vec<(String, String)>,
    genes: usize,
    proteins: usize,
}

impl IdentifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_emitted_identifier(&self, entity: &Entity) -> bool {
        self.entities.contains(entity)
    }

    /// Returns `false` when the entity was already marked.
    pub fn mark_emitted(&mut self, entity: Entity) -> bool {
        let counter = match entity {
            Entity::Gene(_) => Some(&mut self.genes),
            Entity::Protein(_) => Some(&mut self.proteins),
            Entity::Concept(_) => None,
        };
        let inserted = self.entities.insert(entity);
        if inserted && let Some(counter) = counter {
            *counter += 1;
        }
        inserted
    }

    pub fn has_emitted_pair(&self, kind: PairKind, a: &str, b: &str) -> bool {
        let forward = (kind, a.to_string(), b.to_string());
        if self.pairs.contains(&forward) {
            return true;
        }
        match kind {
            PairKind::Gene => self.pairs.contains(&(kind, b.to_string(), a.to_string())),
            PairKind::Protein => false,
        }
    }

    /// Returns `false` when the exact tuple was already recorded.
    pub fn mark_pair_emitted(&mut self, kind: PairKind, a: &str, b: &str) -> bool {
        let inserted = self.pairs.insert((kind, a.to_string(), b.to_string()));
        if inserted && kind == PairKind::Gene {
            self.gene_pairs.push((a.to_string(), b.to_string()));
        }
        inserted
    }

    /// Gene pairs in the order they were first recorded.
    pub fn gene_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.gene_pairs
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
    }

    pub fn emitted_gene_count(&self) -> usize {
        self.genes
    }

    pub fn emitted_protein_count(&self) -> usize {
        self.proteins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProteinAccession;

    #[test]
    fn entities_are_marked_once() {
        let mut registry = IdentifierRegistry::new();
        let gene = Entity::Gene("brca1".parse().unwrap());
        assert!(!registry.has_emitted_identifier(&gene));
        assert!(registry.mark_emitted(gene.clone()));
        assert!(!registry.mark_emitted(gene.clone()));
        assert!(registry.has_emitted_identifier(&gene));
        assert_eq!(registry.emitted_gene_count(), 1);
        assert_eq!(registry.emitted_protein_count(), 0);
    }

    #[test]
    fn gene_and_protein_with_same_key_are_distinct() {
        let mut registry = IdentifierRegistry::new();
        registry.mark_emitted(Entity::Gene("P1".parse().unwrap()));
        let protein = Entity::Protein(ProteinAccession::new("P1"));
        assert!(!registry.has_emitted_identifier(&protein));
    }

    #[test]
    fn gene_pair_lookup_ignores_order() {
        let mut registry = IdentifierRegistry::new();
        registry.mark_pair_emitted(PairKind::Gene, "BRCA1", "TP53");
        assert!(registry.has_emitted_pair(PairKind::Gene, "BRCA1", "TP53"));
        assert!(registry.has_emitted_pair(PairKind::Gene, "TP53", "BRCA1"));
        assert!(!registry.has_emitted_pair(PairKind::Protein, "BRCA1", "TP53"));
    }

    #[test]
    fn protein_pair_lookup_is_order_sensitive() {
        let mut registry = IdentifierRegistry::new();
        registry.mark_pair_emitted(PairKind::Protein, "P1", "P2");
        assert!(registry.has_emitted_pair(PairKind::Protein, "P1", "P2"));
        assert!(!registry.has_emitted_pair(PairKind::Protein, "P2", "P1"));
    }

    #[test]
    fn gene_pairs_keep_first_seen_order() {
        let mut registry = IdentifierRegistry::new();
        registry.mark_pair_emitted(PairKind::Gene, "B", "A");
        registry.mark_pair_emitted(PairKind::Gene, "C", "D");
        registry.mark_pair_emitted(PairKind::Gene, "B", "A");
        let pairs: Vec<_> = registry.gene_pairs().collect();
        assert_eq!(pairs, vec![("B", "A"), ("C", "D")]);
    }
}
