use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Switches controlling how raw UTM values are rewritten.
///
/// `normalize_values` is the master switch: when it is off the other two
/// are ignored and values pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizationConfig {
    pub normalize_values: bool,
    pub lowercase_values: bool,
    pub replace_spaces: bool,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            normalize_values: true,
            lowercase_values: true,
            replace_spaces: true,
        }
    }
}

impl NormalizationConfig {
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::NormalizeValues => self.normalize_values,
            SettingKey::LowercaseValues => self.lowercase_values,
            SettingKey::ReplaceSpaces => self.replace_spaces,
        }
    }
}

/// The closed set of settings that may be updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    NormalizeValues,
    LowercaseValues,
    ReplaceSpaces,
}

impl SettingKey {
    pub const ALL: [SettingKey; 3] = [
        SettingKey::NormalizeValues,
        SettingKey::LowercaseValues,
        SettingKey::ReplaceSpaces,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::NormalizeValues => "normalize_values",
            SettingKey::LowercaseValues => "lowercase_values",
            SettingKey::ReplaceSpaces => "replace_spaces",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim().to_ascii_lowercase().replace('-', "_");
        match value.as_str() {
            "normalize_values" => Ok(SettingKey::NormalizeValues),
            "lowercase_values" => Ok(SettingKey::LowercaseValues),
            "replace_spaces" => Ok(SettingKey::ReplaceSpaces),
            _ => Err(CoreError::InvalidSettingKey(raw.to_string())),
        }
    }
}

/// The persisted settings row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(flatten)]
    pub normalization: NormalizationConfig,
    pub updated_at: i64,
}
