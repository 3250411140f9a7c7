use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifies one of the external speech-recognition providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineType {
    Doubao,
    Qwen,
}

impl EngineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineType::Doubao => "doubao",
            EngineType::Qwen => "qwen",
        }
    }

    /// Prefix used when rendering provider-scoped error codes.
    pub fn code_prefix(&self) -> &'static str {
        match self {
            EngineType::Doubao => "DOUBAO",
            EngineType::Qwen => "QWEN",
        }
    }
}

impl FromStr for EngineType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "doubao" => Ok(EngineType::Doubao),
            "qwen" => Ok(EngineType::Qwen),
            other => Err(format!(
                "Invalid engine: {}. Expected: doubao or qwen",
                other
            )),
        }
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
