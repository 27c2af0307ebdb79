use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An extra query parameter appended after the UTM set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomParam {
    pub key: String,
    pub value: String,
}

impl CustomParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Only pairs with both halves filled in reach the URL.
    pub fn is_applicable(&self) -> bool {
        !self.key.is_empty() && !self.value.is_empty()
    }
}

impl FromStr for CustomParam {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| CoreError::InvalidCustomParam(raw.to_string()))?;
        if key.is_empty() {
            return Err(CoreError::InvalidCustomParam(raw.to_string()));
        }
        Ok(Self::new(key, value))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmFieldSet {
    pub destination_url: String,
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
    pub custom_params: Vec<CustomParam>,
}
