use std::fmt;
use std::str::FromStr;

use super::EngineType;

/// Engine preference supplied by the caller of a transcription request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineSelection {
    /// Primary engine first, backup on failure.
    #[default]
    Auto,
    /// A specific engine was requested.
    Named(EngineType),
}

impl FromStr for EngineSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            return Ok(EngineSelection::Auto);
        }
        trimmed
            .parse::<EngineType>()
            .map(EngineSelection::Named)
            .map_err(|_| {
                format!(
                    "Invalid engine: {}. Expected: auto, doubao or qwen",
                    trimmed
                )
            })
    }
}

impl fmt::Display for EngineSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineSelection::Auto => f.write_str("auto"),
            EngineSelection::Named(engine) => write!(f, "{}", engine),
        }
    }
}
