use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of `GET /api/commands`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandsResponse {
    pub commands: Vec<String>,
    pub groups: BTreeMap<String, Vec<String>>,
}

/// Body of `GET|POST /api/command/{name}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub success: bool,
}

/// Body of `GET /api/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub beamer_online: bool,
    pub git_hash: String,
    pub git_dirty: String,
    /// `true` after a delivered `powerOn`, `false` after a delivered
    /// `powerOff`, `null` before either.
    pub last_power_command: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_unknown_power_as_null() {
        let status = StatusResponse {
            beamer_online: false,
            git_hash: "unknown".into(),
            git_dirty: "unknown".into(),
            last_power_command: None,
        };
        let json = serde_json::to_value(&status).expect("json");
        assert_eq!(json["last_power_command"], serde_json::Value::Null);
        assert_eq!(json["beamer_online"], false);
    }
}
