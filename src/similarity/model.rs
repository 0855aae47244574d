use std::collections::HashMap;

/// Profile metadata for one agent, keyed by agent id in `SimilarityData`.
#[derive(Clone, Debug)]
pub struct AgentProfile {
    pub name: String,
    pub score: Option<f32>,
}

/// One undirected similarity relation between two agents. The producer emits
/// these sorted descending by weight; that order is preserved end to end.
#[derive(Clone, Debug)]
pub struct SimilarityEdge {
    pub agent_a: String,
    pub agent_b: String,
    pub weight: f32,
    pub shared_behaviors: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub struct SimilarityData {
    pub agents: HashMap<String, AgentProfile>,
    pub edges: Vec<SimilarityEdge>,
}

impl SimilarityData {
    /// Display label for an agent: profile name when known, otherwise the id
    /// the caller passed in.
    pub fn agent_label<'a>(&'a self, id: &'a str) -> &'a str {
        self.agents.get(id).map(|agent| agent.name.as_str()).unwrap_or(id)
    }
}
