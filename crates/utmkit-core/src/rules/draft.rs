use crate::domain::{NormalizationConfig, UtmFieldSet};
use crate::error::CoreError;
use crate::rules::url_builder::{build_url, NormalizedUtm};
use serde::{Deserialize, Serialize};

/// A link as submitted, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDraft {
    pub link_name: String,
    pub fields: UtmFieldSet,
}

/// What gets persisted for a draft: normalized values plus the final URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub utm: NormalizedUtm,
    pub final_url: String,
}

impl LinkDraft {
    pub fn validate(&self) -> Result<(), CoreError> {
        let required = [
            ("link_name", &self.link_name),
            ("destination_url", &self.fields.destination_url),
            ("utm_source", &self.fields.utm_source),
            ("utm_medium", &self.fields.utm_medium),
            ("utm_campaign", &self.fields.utm_campaign),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(CoreError::MissingField(name));
            }
        }
        Ok(())
    }

    pub fn resolve(&self, config: &NormalizationConfig) -> Result<ResolvedLink, CoreError> {
        self.validate()?;
        let final_url = build_url(&self.fields, config)?;
        let mut utm = NormalizedUtm::from_fields(&self.fields, config);
        utm.term = utm.term.filter(|value| !value.is_empty());
        utm.content = utm.content.filter(|value| !value.is_empty());
        Ok(ResolvedLink { utm, final_url })
    }
}
