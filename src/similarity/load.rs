use std::collections::HashMap;
use std::fs;

use anyhow::{Context, Result};

use super::model::{AgentProfile, SimilarityData, SimilarityEdge};
use super::parse::{RawDataset, parse_dataset};

pub fn load_similarity_data(path: &str) -> Result<SimilarityData> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read similarity dataset {path}"))?;
    let dataset = parse_dataset(&raw)
        .with_context(|| format!("failed to parse similarity dataset {path}"))?;
    Ok(build_data(dataset))
}

fn build_data(dataset: RawDataset) -> SimilarityData {
    let mut agents = HashMap::with_capacity(dataset.agents.len());
    for raw_agent in dataset.agents {
        let name = raw_agent
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| raw_agent.id.clone());
        agents.insert(
            raw_agent.id,
            AgentProfile {
                name,
                score: raw_agent.score,
            },
        );
    }

    let mut edges = Vec::with_capacity(dataset.edges.len());
    for raw_edge in dataset.edges {
        if raw_edge.agent_a.is_empty() || raw_edge.agent_b.is_empty() {
            log::warn!("dropping similarity edge with an empty endpoint id");
            continue;
        }
        if raw_edge.agent_a == raw_edge.agent_b {
            log::warn!("dropping self-similarity edge for agent {}", raw_edge.agent_a);
            continue;
        }
        if !(0.0..=1.0).contains(&raw_edge.weight) {
            log::warn!(
                "similarity weight {} out of range for {} / {}",
                raw_edge.weight,
                raw_edge.agent_a,
                raw_edge.agent_b
            );
        }

        edges.push(SimilarityEdge {
            agent_a: raw_edge.agent_a,
            agent_b: raw_edge.agent_b,
            weight: raw_edge.weight,
            shared_behaviors: raw_edge.shared_behaviors,
        });
    }

    SimilarityData { agents, edges }
}
