use serde::Deserialize;

/// Per-machine settings. Every field may be omitted from the JSON.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Profile {
    pub hostname: String,
    pub shell: String,
    pub history_size: usize,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            hostname: "linux-sim".to_string(),
            shell: "/bin/bash".to_string(),
            history_size: 1000,
        }
    }
}

impl Profile {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
