use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawDataset {
    #[serde(default)]
    pub(super) agents: Vec<RawAgent>,
    #[serde(default)]
    pub(super) edges: Vec<RawEdge>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawAgent {
    pub(super) id: String,
    #[serde(default)]
    pub(super) name: Option<String>,
    #[serde(default, rename = "phronesisScore")]
    pub(super) score: Option<f32>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawEdge {
    #[serde(rename = "agentA")]
    pub(super) agent_a: String,
    #[serde(rename = "agentB")]
    pub(super) agent_b: String,
    #[serde(default)]
    pub(super) weight: f32,
    #[serde(default, rename = "sharedBehaviors")]
    pub(super) shared_behaviors: Vec<String>,
}

pub(super) fn parse_dataset(raw: &str) -> Result<RawDataset> {
    let dataset: RawDataset =
        serde_json::from_str(raw).context("invalid similarity dataset JSON")?;

    if dataset.agents.iter().any(|agent| agent.id.is_empty()) {
        return Err(anyhow!("similarity dataset contains an agent with an empty id"));
    }

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_fields() {
        let raw = r#"{
            "agents": [
                {"id": "ag-1", "name": "Aster", "phronesisScore": 0.81},
                {"id": "ag-2"}
            ],
            "edges": [
                {"agentA": "ag-1", "agentB": "ag-2", "weight": 0.73,
                 "sharedBehaviors": ["keeps commitments", "cites sources"]}
            ]
        }"#;

        let dataset = parse_dataset(raw).expect("dataset parses");
        assert_eq!(dataset.agents.len(), 2);
        assert_eq!(dataset.agents[0].score, Some(0.81));
        assert_eq!(dataset.agents[1].name, None);
        assert_eq!(dataset.edges.len(), 1);
        assert_eq!(dataset.edges[0].agent_a, "ag-1");
        assert_eq!(dataset.edges[0].shared_behaviors.len(), 2);
    }

    #[test]
    fn missing_optional_fields_default() {
        let raw = r#"{"edges": [{"agentA": "a", "agentB": "b"}]}"#;
        let dataset = parse_dataset(raw).expect("dataset parses");
        assert_eq!(dataset.edges[0].weight, 0.0);
        assert!(dataset.edges[0].shared_behaviors.is_empty());
        assert!(dataset.agents.is_empty());
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(parse_dataset("not json").is_err());
    }

    #[test]
    fn rejects_empty_agent_id() {
        let raw = r#"{"agents": [{"id": ""}], "edges": []}"#;
        assert!(parse_dataset(raw).is_err());
    }
}
