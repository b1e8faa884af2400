use serde::{Deserialize, Serialize};

fn default_success() -> bool {
    true
}

/// Outcome of one EDI update run.
///
/// Any field besides `success` & `error` is kept in `payload` and merged into the
/// trigger endpoint's response body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdiUpdateResult {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl Default for EdiUpdateResult {
    fn default() -> Self {
        Self {
            success: default_success(),
            error: None,
            payload: serde_json::Map::new(),
        }
    }
}
