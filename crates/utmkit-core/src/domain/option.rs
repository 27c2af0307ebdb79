use crate::domain::ids::OptionId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    Source,
    Medium,
    Campaign,
}

impl OptionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKind::Source => "source",
            OptionKind::Medium => "medium",
            OptionKind::Campaign => "campaign",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKind {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim().to_ascii_lowercase();
        match value.as_str() {
            "source" => Ok(OptionKind::Source),
            "medium" => Ok(OptionKind::Medium),
            "campaign" => Ok(OptionKind::Campaign),
            _ => Err(CoreError::InvalidOptionKind(raw.to_string())),
        }
    }
}

/// One entry of a controlled vocabulary (source, medium or campaign).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmOption {
    pub id: OptionId,
    pub kind: OptionKind,
    pub value: String,
    pub label: String,
    pub active: bool,
    pub display_order: i64,
    pub requires_keyword: bool,
    pub requires_location_event: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl UtmOption {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.label.trim().is_empty() {
            return Err(CoreError::EmptyOptionLabel);
        }
        if self.value.trim().is_empty() {
            return Err(CoreError::InvalidOptionValue(self.value.clone()));
        }
        Ok(())
    }

    /// True when this campaign asks for a keyword and `term` does not supply one.
    pub fn missing_keyword(&self, term: Option<&str>) -> bool {
        self.requires_keyword && term.map_or(true, |term| term.trim().is_empty())
    }
}
