//! Backend build and capability description from `GET /api/system/info`.

use serde::{Deserialize, Serialize};

use crate::domain::report::lenient;

/// Envelope as sent: `{ "system": { ... } }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSystemInfoEnvelope {
    #[serde(default, deserialize_with = "lenient::record")]
    pub system: Option<RawSystemInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSystemInfo {
    #[serde(default, deserialize_with = "lenient::text")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub architecture: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub agents: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub version: String,
    pub architecture: String,
    pub features: Vec<String>,
    pub agents: Vec<String>,
}

impl SystemInfo {
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }
}

impl RawSystemInfoEnvelope {
    /// Unwraps the envelope. A payload without `system` yields `None`.
    pub fn into_system_info(self) -> Option<SystemInfo> {
        self.system.map(|raw| SystemInfo {
            version: raw.version.unwrap_or_default(),
            architecture: raw.architecture.unwrap_or_default(),
            features: raw.features,
            agents: raw.agents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwraps_system_envelope() {
        let envelope: RawSystemInfoEnvelope = serde_json::from_value(json!({
            "system": {
                "version": "2.0",
                "architecture": "Multi-Agent RAG",
                "features": ["Intent detection"],
                "agents": ["Retriever", "Summarizer", "Advisor"]
            }
        }))
        .unwrap();
        let info = envelope.into_system_info().unwrap();
        assert_eq!(info.version, "2.0");
        assert_eq!(info.agent_count(), 3);
    }

    #[test]
    fn missing_envelope_is_none() {
        let envelope: RawSystemInfoEnvelope =
            serde_json::from_value(json!({"version": "2.0"})).unwrap();
        assert!(envelope.into_system_info().is_none());
    }
}
