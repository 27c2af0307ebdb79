use crate::commands::Context;
use crate::error::invalid_input;
use anyhow::Result;
use std::str::FromStr;
use utmkit_core::domain::{CustomParam, LinkId, NormalizationConfig, OptionId};
use utmkit_core::time::now_utc;

pub fn parse_link_id(raw: &str) -> Result<LinkId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_input("link id cannot be empty"));
    }
    LinkId::from_str(trimmed).map_err(|_| invalid_input(format!("invalid link id: {trimmed}")))
}

pub fn parse_option_id(raw: &str) -> Result<OptionId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_input("option id cannot be empty"));
    }
    OptionId::from_str(trimmed).map_err(|_| invalid_input(format!("invalid option id: {trimmed}")))
}

pub fn parse_custom_params(raw: &[String]) -> Result<Vec<CustomParam>> {
    raw.iter()
        .map(|pair| {
            CustomParam::from_str(pair)
                .map_err(|_| invalid_input(format!("expected --param key=value, got {pair:?}")))
        })
        .collect()
}

pub fn format_custom_params(params: &[CustomParam]) -> String {
    params
        .iter()
        .map(|param| format!("{}={}", param.key, param.value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// The normalization switches in effect, seeding the settings row from the
/// config file on first use.
pub fn load_normalization(ctx: &Context<'_>) -> Result<NormalizationConfig> {
    let settings = ctx
        .store
        .settings()
        .get_or_init(now_utc(), ctx.config.normalization)?;
    Ok(settings.normalization)
}

#[cfg(test)]
mod tests {
    use super::{format_custom_params, parse_custom_params, parse_link_id};
    use utmkit_core::domain::CustomParam;

    #[test]
    fn custom_params_round_trip_through_flags() {
        let raw = vec!["ref=partner".to_string(), "q=a=b".to_string()];
        let params = parse_custom_params(&raw).unwrap();
        assert_eq!(
            params,
            vec![CustomParam::new("ref", "partner"), CustomParam::new("q", "a=b")]
        );
        assert_eq!(format_custom_params(&params), "ref=partner; q=a=b");
    }

    #[test]
    fn custom_params_require_key() {
        assert!(parse_custom_params(&["=value".to_string()]).is_err());
        assert!(parse_custom_params(&["novalue".to_string()]).is_err());
    }

    #[test]
    fn link_id_must_be_uuid() {
        assert!(parse_link_id("  ").is_err());
        assert!(parse_link_id("not-a-uuid").is_err());
        assert!(parse_link_id("67e55044-10b1-426f-9247-bb680e5fe0c8").is_ok());
    }
}
