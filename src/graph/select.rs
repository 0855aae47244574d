use std::collections::{HashMap, HashSet};

use crate::similarity::SimilarityData;

pub const DEFAULT_MAX_EDGES: usize = 30;

#[derive(Clone, Debug)]
pub struct DisplayNode {
    pub id: String,
    pub label: String,
    pub score: Option<f32>,
    pub degree: usize,
}

/// Edge of the working set, endpoints as indices into `SelectedSubgraph::nodes`.
#[derive(Clone, Debug)]
pub struct SelectedEdge {
    pub a: usize,
    pub b: usize,
    pub weight: f32,
    pub shared_behaviors: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub struct SelectedSubgraph {
    pub nodes: Vec<DisplayNode>,
    pub edges: Vec<SelectedEdge>,
    pub index_by_id: HashMap<String, usize>,
    /// Distinct agent ids across the full input edge list, shown or not.
    pub cohort_size: usize,
}

impl SelectedSubgraph {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Truncate the producer-ordered edge list to the first `max_edges` entries and
/// intern every endpoint in first-encounter order. The input arrives sorted
/// descending by weight; equal weights keep their arrival order, so the working
/// set is a stable prefix.
pub fn select_subgraph(data: &SimilarityData, max_edges: usize) -> SelectedSubgraph {
    let mut nodes: Vec<DisplayNode> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();
    let mut edges = Vec::with_capacity(max_edges.min(data.edges.len()));

    for edge in data.edges.iter().take(max_edges) {
        let a = intern_node(&mut nodes, &mut index_by_id, data, &edge.agent_a);
        let b = intern_node(&mut nodes, &mut index_by_id, data, &edge.agent_b);
        nodes[a].degree += 1;
        nodes[b].degree += 1;
        edges.push(SelectedEdge {
            a,
            b,
            weight: edge.weight,
            shared_behaviors: edge.shared_behaviors.clone(),
        });
    }

    let mut cohort = HashSet::new();
    for edge in &data.edges {
        cohort.insert(edge.agent_a.as_str());
        cohort.insert(edge.agent_b.as_str());
    }

    SelectedSubgraph {
        nodes,
        edges,
        index_by_id,
        cohort_size: cohort.len(),
    }
}

fn intern_node(
    nodes: &mut Vec<DisplayNode>,
    index_by_id: &mut HashMap<String, usize>,
    data: &SimilarityData,
    id: &str,
) -> usize {
    if let Some(&index) = index_by_id.get(id) {
        return index;
    }

    let index = nodes.len();
    nodes.push(DisplayNode {
        id: id.to_string(),
        label: data.agent_label(id).to_string(),
        score: data.agents.get(id).and_then(|agent| agent.score),
        degree: 0,
    });
    index_by_id.insert(id.to_string(), index);
    index
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;
    use crate::similarity::{AgentProfile, SimilarityData, SimilarityEdge};

    pub(crate) fn edge(a: &str, b: &str, weight: f32) -> SimilarityEdge {
        SimilarityEdge {
            agent_a: a.to_string(),
            agent_b: b.to_string(),
            weight,
            shared_behaviors: Vec::new(),
        }
    }

    pub(crate) fn data(edges: Vec<SimilarityEdge>) -> SimilarityData {
        SimilarityData {
            agents: std::collections::HashMap::new(),
            edges,
        }
    }

    #[test]
    fn empty_input_selects_nothing() {
        let subgraph = select_subgraph(&data(Vec::new()), DEFAULT_MAX_EDGES);
        assert!(subgraph.is_empty());
        assert!(subgraph.nodes.is_empty());
        assert_eq!(subgraph.cohort_size, 0);
    }

    #[test]
    fn truncates_disjoint_edges_to_budget() {
        // Ten mutually disjoint edges, budget of five: the five highest-weight
        // edges and their ten endpoints survive, the rest are absent.
        let edges = (0..10)
            .map(|i| {
                edge(
                    &format!("a{i}"),
                    &format!("b{i}"),
                    1.0 - (i as f32 * 0.05),
                )
            })
            .collect();
        let subgraph = select_subgraph(&data(edges), 5);

        assert_eq!(subgraph.edges.len(), 5);
        assert_eq!(subgraph.nodes.len(), 10);
        assert!(subgraph.index_by_id.contains_key("a4"));
        assert!(!subgraph.index_by_id.contains_key("a5"));
        assert!(!subgraph.index_by_id.contains_key("b9"));
        assert_eq!(subgraph.cohort_size, 20);
    }

    #[test]
    fn budget_beyond_input_keeps_everything() {
        let subgraph = select_subgraph(&data(vec![edge("a", "b", 0.9)]), DEFAULT_MAX_EDGES);
        assert_eq!(subgraph.edges.len(), 1);
        assert_eq!(subgraph.nodes.len(), 2);
    }

    #[test]
    fn shared_endpoint_counts_degree() {
        let subgraph = select_subgraph(
            &data(vec![edge("a", "b", 0.9), edge("a", "c", 0.1)]),
            DEFAULT_MAX_EDGES,
        );
        assert_eq!(subgraph.nodes.len(), 3);
        assert_eq!(subgraph.edges.len(), 2);

        let a = subgraph.index_by_id["a"];
        let b = subgraph.index_by_id["b"];
        assert_eq!(subgraph.nodes[a].degree, 2);
        assert_eq!(subgraph.nodes[b].degree, 1);
    }

    #[test]
    fn no_orphan_nodes() {
        let subgraph = select_subgraph(
            &data(vec![edge("a", "b", 0.8), edge("c", "d", 0.6), edge("b", "c", 0.4)]),
            2,
        );
        for (index, node) in subgraph.nodes.iter().enumerate() {
            let touched = subgraph
                .edges
                .iter()
                .any(|edge| edge.a == index || edge.b == index);
            assert!(touched, "node {} has no selected edge", node.id);
        }
    }

    #[test]
    fn truncation_is_prefix_monotone() {
        let edges = vec![
            edge("a", "b", 0.9),
            edge("b", "c", 0.7),
            edge("c", "d", 0.5),
            edge("d", "e", 0.3),
        ];
        let small = select_subgraph(&data(edges.clone()), 2);
        let large = select_subgraph(&data(edges), 4);

        for (narrow, wide) in small.edges.iter().zip(large.edges.iter()) {
            assert_eq!(small.nodes[narrow.a].id, large.nodes[wide.a].id);
            assert_eq!(small.nodes[narrow.b].id, large.nodes[wide.b].id);
            assert_eq!(narrow.weight, wide.weight);
        }
        for node in &small.nodes {
            assert!(large.index_by_id.contains_key(&node.id));
        }
    }

    #[test]
    fn cohort_counts_full_input_not_selection() {
        let edges = vec![edge("a", "b", 0.9), edge("c", "d", 0.2), edge("e", "f", 0.1)];
        let subgraph = select_subgraph(&data(edges), 1);
        assert_eq!(subgraph.nodes.len(), 2);
        assert_eq!(subgraph.cohort_size, 6);
    }

    #[test]
    fn nodes_inherit_profile_label_and_score() {
        let mut data = data(vec![edge("ag-1", "ag-2", 0.5)]);
        data.agents.insert(
            "ag-1".to_string(),
            AgentProfile {
                name: "Aster".to_string(),
                score: Some(0.81),
            },
        );

        let subgraph = select_subgraph(&data, DEFAULT_MAX_EDGES);
        let aster = &subgraph.nodes[subgraph.index_by_id["ag-1"]];
        assert_eq!(aster.label, "Aster");
        assert_eq!(aster.score, Some(0.81));

        let unknown = &subgraph.nodes[subgraph.index_by_id["ag-2"]];
        assert_eq!(unknown.label, "ag-2");
        assert_eq!(unknown.score, None);
    }

    #[test]
    fn insertion_order_follows_first_encounter() {
        let subgraph = select_subgraph(
            &data(vec![edge("m", "n", 0.9), edge("n", "o", 0.8), edge("o", "m", 0.7)]),
            DEFAULT_MAX_EDGES,
        );
        let order: Vec<_> = subgraph.nodes.iter().map(|node| node.id.as_str()).collect();
        assert_eq!(order, ["m", "n", "o"]);
    }
}
