// Knowledge graph module - concept nodes, weighted relations and the
// conversion into layout engine input.

use std::collections::HashMap;
use std::fmt;

use force_layout::{LinkSpec, NodeSpec};
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConceptGroup {
    Environment,
    Effect,
    Mechanism,
    Organism,
    Solution,
    /// Group name that has no dedicated color.
    Other(String),
}

impl ConceptGroup {
    /// Groups shown in the legend, in legend order.
    pub const KNOWN: [ConceptGroup; 5] = [
        ConceptGroup::Environment,
        ConceptGroup::Effect,
        ConceptGroup::Mechanism,
        ConceptGroup::Organism,
        ConceptGroup::Solution,
    ];

    pub fn parse(name: &str) -> Self {
        match name {
            "environment" => ConceptGroup::Environment,
            "effect" => ConceptGroup::Effect,
            "mechanism" => ConceptGroup::Mechanism,
            "organism" => ConceptGroup::Organism,
            "solution" => ConceptGroup::Solution,
            other => ConceptGroup::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ConceptGroup::Environment => "environment",
            ConceptGroup::Effect => "effect",
            ConceptGroup::Mechanism => "mechanism",
            ConceptGroup::Organism => "organism",
            ConceptGroup::Solution => "solution",
            ConceptGroup::Other(name) => name,
        }
    }

    /// Plural heading used in the legend.
    pub fn legend_label(&self) -> &str {
        match self {
            ConceptGroup::Environment => "Environment",
            ConceptGroup::Effect => "Effects",
            ConceptGroup::Mechanism => "Mechanisms",
            ConceptGroup::Organism => "Organisms",
            ConceptGroup::Solution => "Solutions",
            ConceptGroup::Other(name) => name,
        }
    }
}

impl fmt::Display for ConceptGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Concept {
    pub id: String,
    pub group: ConceptGroup,
    /// Circle radius in points.
    pub size: f32,
}

impl Concept {
    /// Identifier with underscores shown as spaces.
    pub fn label(&self) -> String {
        self.id.replace('_', " ")
    }
}

/// Static description of a concept, before validation.
#[derive(Debug, Clone, Copy)]
pub struct ConceptSpec {
    pub id: &'static str,
    pub group: &'static str,
    pub size: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct RelationSpec {
    pub source: &'static str,
    pub target: &'static str,
    pub weight: u32,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum KnowledgeGraphError {
    #[error("concept `{id}` is defined more than once")]
    DuplicateConcept { id: String },

    #[error("relation {relation} refers to unknown concept `{id}`")]
    UnknownEndpoint { relation: usize, id: String },
}

pub type ConceptGraph = Graph<Concept, f32>;

pub const fn concept(id: &'static str, group: &'static str, size: u32) -> ConceptSpec {
    ConceptSpec { id, group, size }
}

pub const fn relation(source: &'static str, target: &'static str, weight: u32) -> RelationSpec {
    RelationSpec {
        source,
        target,
        weight,
    }
}

const CONCEPTS: [ConceptSpec; 12] = [
    concept("microgravity", "environment", 30),
    concept("radiation", "environment", 25),
    concept("bone_loss", "effect", 20),
    concept("muscle_atrophy", "effect", 20),
    concept("gene_expression", "mechanism", 18),
    concept("stress_response", "mechanism", 15),
    concept("humans", "organism", 25),
    concept("bacteria", "organism", 20),
    concept("plants", "organism", 18),
    concept("countermeasures", "solution", 22),
    concept("exercise", "solution", 15),
    concept("nutrition", "solution", 15),
];

const RELATIONS: [RelationSpec; 12] = [
    relation("microgravity", "bone_loss", 3),
    relation("microgravity", "muscle_atrophy", 3),
    relation("microgravity", "gene_expression", 2),
    relation("radiation", "gene_expression", 2),
    relation("bone_loss", "humans", 3),
    relation("muscle_atrophy", "humans", 3),
    relation("gene_expression", "bacteria", 2),
    relation("gene_expression", "plants", 2),
    relation("stress_response", "bacteria", 2),
    relation("countermeasures", "bone_loss", 2),
    relation("exercise", "muscle_atrophy", 2),
    relation("nutrition", "bone_loss", 1),
];

/// Validated concept graph. Node indices are dense and match the body
/// indices of the layout engine.
#[derive(Debug, Clone)]
pub struct KnowledgeGraph {
    graph: ConceptGraph,
}

impl KnowledgeGraph {
    pub fn build(
        concepts: &[ConceptSpec],
        relations: &[RelationSpec],
    ) -> Result<Self, KnowledgeGraphError> {
        let mut graph = ConceptGraph::with_capacity(concepts.len(), relations.len());
        let mut by_id: HashMap<&str, NodeIndex> = HashMap::new();

        for spec in concepts {
            if by_id.contains_key(spec.id) {
                return Err(KnowledgeGraphError::DuplicateConcept {
                    id: spec.id.to_string(),
                });
            }
            let idx = graph.add_node(Concept {
                id: spec.id.to_string(),
                group: ConceptGroup::parse(spec.group),
                size: spec.size as f32,
            });
            by_id.insert(spec.id, idx);
        }

        let resolve = |relation: usize, id: &str| {
            by_id
                .get(id)
                .copied()
                .ok_or_else(|| KnowledgeGraphError::UnknownEndpoint {
                    relation,
                    id: id.to_string(),
                })
        };

        for (relation, spec) in relations.iter().enumerate() {
            let source = resolve(relation, spec.source)?;
            let target = resolve(relation, spec.target)?;
            graph.add_edge(source, target, spec.weight as f32);
        }

        Ok(Self { graph })
    }

    pub fn builtin() -> Result<Self, KnowledgeGraphError> {
        Self::build(&CONCEPTS, &RELATIONS)
    }

    pub fn graph(&self) -> &ConceptGraph {
        &self.graph
    }

    pub fn concept_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn relation_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn concept(&self, index: usize) -> Option<&Concept> {
        self.graph.node_weight(NodeIndex::new(index))
    }

    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.graph.node_weights()
    }

    /// Concepts sharing a relation with `index`, either direction, in
    /// concept order.
    pub fn neighbors(&self, index: usize) -> Vec<&Concept> {
        if index >= self.graph.node_count() {
            return Vec::new();
        }
        let mut indices: Vec<NodeIndex> = self
            .graph
            .neighbors_undirected(NodeIndex::new(index))
            .collect();
        indices.sort();
        indices.dedup();
        indices.into_iter().map(|idx| &self.graph[idx]).collect()
    }

    pub fn node_specs(&self) -> Vec<NodeSpec> {
        self.graph
            .node_weights()
            .map(|c| NodeSpec { radius: c.size })
            .collect()
    }

    pub fn link_specs(&self) -> Vec<LinkSpec> {
        self.graph
            .edge_references()
            .map(|e| LinkSpec {
                source: e.source().index(),
                target: e.target().index(),
                weight: *e.weight(),
            })
            .collect()
    }

    /// Relations as `(source, target, weight)` index triples.
    pub fn relations(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), *e.weight()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_graph_is_valid() {
        let kg = KnowledgeGraph::builtin().expect("builtin graph");
        assert_eq!(kg.concept_count(), 12);
        assert_eq!(kg.relation_count(), 12);
        assert_eq!(kg.node_specs().len(), 12);
        assert_eq!(kg.link_specs().len(), 12);
        for (source, target, weight) in kg.relations() {
            assert!(source < 12 && target < 12);
            assert!(weight >= 1.0);
        }
    }

    #[test]
    fn link_specs_use_concept_indices() {
        let kg = KnowledgeGraph::builtin().expect("builtin graph");
        let first = kg.link_specs()[0];
        assert_eq!(kg.concept(first.source).map(|c| c.id.as_str()), Some("microgravity"));
        assert_eq!(kg.concept(first.target).map(|c| c.id.as_str()), Some("bone_loss"));
        assert_eq!(first.weight, 3.0);
    }

    #[test]
    fn unknown_endpoint_is_rejected() {
        let concepts = [concept("a", "effect", 10)];
        let relations = [relation("a", "ghost", 1)];
        let err = KnowledgeGraph::build(&concepts, &relations).unwrap_err();
        assert_eq!(
            err,
            KnowledgeGraphError::UnknownEndpoint {
                relation: 0,
                id: "ghost".to_string()
            }
        );
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn duplicate_concept_is_rejected() {
        let concepts = [concept("a", "effect", 10), concept("a", "solution", 12)];
        let err = KnowledgeGraph::build(&concepts, &[]).unwrap_err();
        assert_eq!(
            err,
            KnowledgeGraphError::DuplicateConcept {
                id: "a".to_string()
            }
        );
    }

    #[test]
    fn unrecognized_group_is_preserved() {
        let concepts = [concept("x", "habitat", 10)];
        let kg = KnowledgeGraph::build(&concepts, &[]).expect("valid");
        assert_eq!(
            kg.concept(0).map(|c| c.group.clone()),
            Some(ConceptGroup::Other("habitat".to_string()))
        );
        assert_eq!(ConceptGroup::parse("habitat").name(), "habitat");
    }

    #[test]
    fn neighbors_cover_both_directions() {
        let kg = KnowledgeGraph::builtin().expect("builtin graph");
        let bone = kg
            .concepts()
            .position(|c| c.id == "bone_loss")
            .expect("bone_loss exists");
        let ids: Vec<&str> = kg.neighbors(bone).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["microgravity", "humans", "countermeasures", "nutrition"]);
        assert!(kg.neighbors(99).is_empty());
    }

    #[test]
    fn labels_replace_underscores() {
        let kg = KnowledgeGraph::builtin().expect("builtin graph");
        let labels: Vec<String> = kg.concepts().map(Concept::label).collect();
        assert!(labels.contains(&"muscle atrophy".to_string()));
        assert_eq!(ConceptGroup::Organism.legend_label(), "Organisms");
    }
}
