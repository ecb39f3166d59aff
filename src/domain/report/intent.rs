//! Query intent as classified by the analysis backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend-classified category of a query.
///
/// Drives which report sections are emphasized. Anything the backend sends
/// that is not one of the three known values is treated as `Overall`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Negative,
    Positive,
    #[default]
    Overall,
}

impl Intent {
    /// Resolves an optional wire value, falling back to `Overall`.
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw.map(str::parse::<Intent>) {
            Some(Ok(intent)) => intent,
            Some(Err(UnknownIntent(value))) => {
                tracing::warn!(intent = %value, "Unrecognized intent, using overall");
                Intent::Overall
            }
            None => Intent::Overall,
        }
    }

    /// Wire value of the intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Negative => "negative",
            Intent::Positive => "positive",
            Intent::Overall => "overall",
        }
    }

    /// Capitalized label for badges.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Negative => "Negative",
            Intent::Positive => "Positive",
            Intent::Overall => "Overall",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for intent strings outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown intent '{0}'")]
pub struct UnknownIntent(pub String);

impl FromStr for Intent {
    type Err = UnknownIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "negative" => Ok(Intent::Negative),
            "positive" => Ok(Intent::Positive),
            "overall" => Ok(Intent::Overall),
            _ => Err(UnknownIntent(s.to_string())),
        }
    }
}
