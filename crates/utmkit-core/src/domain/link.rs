use crate::domain::fields::CustomParam;
use crate::domain::ids::LinkId;
use serde::{Deserialize, Serialize};

/// A saved campaign link. UTM values are stored already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmLink {
    pub id: LinkId,
    pub link_name: String,
    pub destination_url: String,
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
    pub custom_params: Vec<CustomParam>,
    pub final_url: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl UtmLink {
    /// Case-insensitive match over name, destination, source, medium and
    /// campaign. Case folding follows Unicode, so "émile" finds "Émile".
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            self.link_name.as_str(),
            self.destination_url.as_str(),
            self.utm_source.as_str(),
            self.utm_medium.as_str(),
            self.utm_campaign.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::UtmLink;
    use crate::domain::LinkId;

    fn link() -> UtmLink {
        UtmLink {
            id: LinkId::new(),
            link_name: "Spring Fair".to_string(),
            destination_url: "https://example.com/".to_string(),
            utm_source: "newsletter".to_string(),
            utm_medium: "email".to_string(),
            utm_campaign: "spring-2024".to_string(),
            utm_term: None,
            utm_content: None,
            custom_params: Vec::new(),
            final_url: "https://example.com/?utm_source=newsletter".to_string(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn matches_search_ignores_case() {
        let link = link();
        assert!(link.matches_search("SPRING"));
        assert!(link.matches_search("email"));
        assert!(!link.matches_search("facebook"));
    }

    #[test]
    fn matches_search_folds_non_ascii_case() {
        let mut link = link();
        link.link_name = "Café Émile".to_string();
        assert!(link.matches_search("émile"));
        assert!(link.matches_search("CAFÉ"));
    }

    #[test]
    fn final_url_is_not_searched() {
        assert!(!link().matches_search("utm_source"));
    }

    #[test]
    fn blank_search_matches_everything() {
        assert!(link().matches_search("  "));
    }
}
