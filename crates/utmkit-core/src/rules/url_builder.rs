use crate::domain::{NormalizationConfig, UtmFieldSet};
use crate::error::CoreError;
use crate::rules::normalize::normalize;
use url::Url;

pub const UTM_SOURCE: &str = "utm_source";
pub const UTM_MEDIUM: &str = "utm_medium";
pub const UTM_CAMPAIGN: &str = "utm_campaign";
pub const UTM_TERM: &str = "utm_term";
pub const UTM_CONTENT: &str = "utm_content";

/// The five UTM values after normalization.
///
/// Required fields are always normalized, even when the result is empty.
/// Optional fields are `None` when the raw input was absent or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUtm {
    pub source: String,
    pub medium: String,
    pub campaign: String,
    pub term: Option<String>,
    pub content: Option<String>,
}

impl NormalizedUtm {
    pub fn from_fields(fields: &UtmFieldSet, config: &NormalizationConfig) -> Self {
        Self {
            source: normalize(&fields.utm_source, config),
            medium: normalize(&fields.utm_medium, config),
            campaign: normalize(&fields.utm_campaign, config),
            term: normalize_optional(fields.utm_term.as_deref(), config),
            content: normalize_optional(fields.utm_content.as_deref(), config),
        }
    }

    /// Parameters in the order they are applied to the query.
    pub fn params(&self) -> [(&'static str, Option<&str>); 5] {
        [
            (UTM_SOURCE, Some(self.source.as_str())),
            (UTM_MEDIUM, Some(self.medium.as_str())),
            (UTM_CAMPAIGN, Some(self.campaign.as_str())),
            (UTM_TERM, self.term.as_deref()),
            (UTM_CONTENT, self.content.as_deref()),
        ]
    }
}

fn normalize_optional(raw: Option<&str>, config: &NormalizationConfig) -> Option<String> {
    raw.filter(|value| !value.is_empty())
        .map(|value| normalize(value, config))
}

/// Builds the final campaign URL.
///
/// UTM parameters overwrite same-named parameters already in the
/// destination; custom parameters are applied last, raw, and overwrite
/// anything before them. Parameters that are not overwritten keep their
/// position.
pub fn build_url(fields: &UtmFieldSet, config: &NormalizationConfig) -> Result<String, CoreError> {
    let mut url = parse_absolute_url(&fields.destination_url)?;
    let utm = NormalizedUtm::from_fields(fields, config);

    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let mut changed = false;

    for (name, value) in utm.params() {
        if let Some(value) = value.filter(|value| !value.is_empty()) {
            set_param(&mut pairs, name, value);
            changed = true;
        }
    }

    for param in fields.custom_params.iter().filter(|param| param.is_applicable()) {
        set_param(&mut pairs, &param.key, &param.value);
        changed = true;
    }

    if changed {
        url.query_pairs_mut()
            .clear()
            .extend_pairs(pairs.iter().map(|(key, value)| (key.as_str(), value.as_str())));
    }

    Ok(url.to_string())
}

/// Parses a URL that must carry both a scheme and a host.
pub fn parse_absolute_url(raw: &str) -> Result<Url, CoreError> {
    let url = Url::parse(raw).map_err(|_| CoreError::InvalidUrl(raw.to_string()))?;
    if url.cannot_be_a_base() || url.host_str().is_none_or(str::is_empty) {
        return Err(CoreError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

/// True for absolute URLs written with an `http://` or `https://` prefix.
pub fn is_valid_url(raw: &str) -> bool {
    Url::parse(raw).is_ok() && (raw.starts_with("http://") || raw.starts_with("https://"))
}

/// Single-valued set: replaces the first occurrence in place, drops any
/// later duplicates, or appends when the name is new.
fn set_param(pairs: &mut Vec<(String, String)>, name: &str, value: &str) {
    match pairs.iter().position(|(key, _)| key == name) {
        Some(first) => {
            pairs[first].1 = value.to_string();
            let mut index = 0;
            pairs.retain(|(key, _)| {
                let keep = index <= first || key != name;
                index += 1;
                keep
            });
        }
        None => pairs.push((name.to_string(), value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{build_url, is_valid_url, set_param, NormalizedUtm};
    use crate::domain::{CustomParam, NormalizationConfig, UtmFieldSet};
    use crate::error::CoreError;

    fn fields(destination: &str) -> UtmFieldSet {
        UtmFieldSet {
            destination_url: destination.to_string(),
            utm_source: "google".to_string(),
            utm_medium: "cpc".to_string(),
            utm_campaign: "spring".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn build_url_appends_in_fixed_order() {
        let mut input = fields("https://example.com/landing");
        input.utm_term = Some("running shoes".to_string());
        input.utm_content = Some("Banner A".to_string());
        let url = build_url(&input, &NormalizationConfig::default()).unwrap();
        assert_eq!(
            url,
            "https://example.com/landing?utm_source=google&utm_medium=cpc&utm_campaign=spring&utm_term=running-shoes&utm_content=banner-a"
        );
    }

    #[test]
    fn new_custom_keys_follow_utm_block_in_input_order() {
        let mut input = fields("https://example.com/");
        input.custom_params = vec![CustomParam::new("b", "2"), CustomParam::new("a", "1")];
        let url = build_url(&input, &NormalizationConfig::default()).unwrap();
        assert_eq!(
            url,
            "https://example.com/?utm_source=google&utm_medium=cpc&utm_campaign=spring&b=2&a=1"
        );
    }

    #[test]
    fn utm_values_replace_destination_params_in_place() {
        let mut input = fields("https://example.com/?utm_source=old");
        input.utm_source = "New Source".to_string();
        let url = build_url(&input, &NormalizationConfig::default()).unwrap();
        assert!(url.contains("utm_source=new-source"));
        assert!(!url.contains("utm_source=old"));
    }

    #[test]
    fn untouched_destination_params_keep_their_order() {
        let input = fields("https://example.com/p?ref=abc&utm_source=old&x=1#top");
        let url = build_url(&input, &NormalizationConfig::default()).unwrap();
        assert_eq!(
            url,
            "https://example.com/p?ref=abc&utm_source=google&x=1&utm_medium=cpc&utm_campaign=spring#top"
        );
    }

    #[test]
    fn duplicate_destination_params_collapse() {
        let input = fields("https://example.com/?utm_medium=a&utm_medium=b");
        let url = build_url(&input, &NormalizationConfig::default()).unwrap();
        assert_eq!(url.matches("utm_medium=").count(), 1);
        assert!(url.contains("utm_medium=cpc"));
    }

    #[test]
    fn custom_params_override_utm_params() {
        let mut input = fields("https://example.com/");
        input.custom_params = vec![CustomParam::new("utm_source", "override")];
        let url = build_url(&input, &NormalizationConfig::default()).unwrap();
        assert!(url.contains("utm_source=override"));
        assert!(!url.contains("utm_source=google"));
    }

    #[test]
    fn custom_params_are_raw_and_last_write_wins() {
        let mut input = fields("https://example.com/");
        input.custom_params = vec![
            CustomParam::new("Ref", "Partner One"),
            CustomParam::new("", "ignored"),
            CustomParam::new("empty", ""),
            CustomParam::new("Ref", "Partner Two"),
        ];
        let url = build_url(&input, &NormalizationConfig::default()).unwrap();
        assert!(url.ends_with("&Ref=Partner+Two"));
        assert!(!url.contains("Partner+One"));
        assert!(!url.contains("ignored"));
        assert!(!url.contains("empty="));
    }

    #[test]
    fn empty_optional_fields_are_omitted() {
        let mut input = fields("https://example.com/");
        input.utm_term = Some(String::new());
        input.utm_content = None;
        let url = build_url(&input, &NormalizationConfig::default()).unwrap();
        assert!(!url.contains("utm_term"));
        assert!(!url.contains("utm_content"));
    }

    #[test]
    fn values_that_normalize_to_empty_are_omitted() {
        let mut input = fields("https://example.com/");
        input.utm_term = Some("---".to_string());
        input.utm_campaign = "%%%".to_string();
        let url = build_url(&input, &NormalizationConfig::default()).unwrap();
        assert!(!url.contains("utm_term"));
        assert!(!url.contains("utm_campaign"));
    }

    #[test]
    fn query_values_are_form_encoded() {
        let mut input = fields("https://example.com/");
        input.utm_campaign = "Q1: Launch & Grow".to_string();
        let passthrough = NormalizationConfig {
            normalize_values: false,
            lowercase_values: false,
            replace_spaces: false,
        };
        let url = build_url(&input, &passthrough).unwrap();
        assert!(url.contains("utm_campaign=Q1%3A+Launch+%26+Grow"));
    }

    #[test]
    fn build_url_is_deterministic() {
        let mut input = fields("https://example.com/?b=2&a=1");
        input.custom_params = vec![CustomParam::new("z", "last")];
        let config = NormalizationConfig::default();
        let first = build_url(&input, &config).unwrap();
        for _ in 0..10 {
            assert_eq!(build_url(&input, &config).unwrap(), first);
        }
    }

    #[test]
    fn build_url_rejects_relative_or_hostless_urls() {
        for destination in ["not a url", "/relative/path", "mailto:someone@example.com", ""] {
            let err = build_url(&fields(destination), &NormalizationConfig::default()).unwrap_err();
            assert!(matches!(err, CoreError::InvalidUrl(_)), "{destination}");
        }
    }

    #[test]
    fn build_url_accepts_non_http_schemes_with_host() {
        let url = build_url(&fields("ftp://files.example.com/x"), &NormalizationConfig::default())
            .unwrap();
        assert!(url.starts_with("ftp://files.example.com/x?utm_source=google"));
    }

    #[test]
    fn is_valid_url_requires_http_prefix() {
        assert!(is_valid_url("https://x.com"));
        assert!(is_valid_url("http://x.com/path?q=1"));
        assert!(!is_valid_url("ftp://x.com"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("HTTPS://x.com"));
        assert!(!is_valid_url(" https://x.com"));
    }

    #[test]
    fn normalized_utm_skips_empty_optionals() {
        let mut input = fields("https://example.com/");
        input.utm_term = Some(String::new());
        input.utm_content = Some("Hero Image".to_string());
        let utm = NormalizedUtm::from_fields(&input, &NormalizationConfig::default());
        assert_eq!(utm.term, None);
        assert_eq!(utm.content.as_deref(), Some("hero-image"));
    }

    #[test]
    fn set_param_replaces_first_and_drops_rest() {
        let mut pairs = vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "3".to_string()),
        ];
        set_param(&mut pairs, "a", "9");
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "9".to_string()),
                ("b".to_string(), "2".to_string()),
            ]
        );
    }
}
