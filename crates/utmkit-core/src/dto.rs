use crate::domain::NormalizationConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPreviewDto {
    pub final_url: String,
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
    pub settings: NormalizationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedValueDto {
    pub input: String,
    pub normalized: String,
}
