use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{load_normalization, parse_custom_params};
use anyhow::Result;
use clap::Args;
use utmkit_core::domain::UtmFieldSet;
use utmkit_core::dto::LinkPreviewDto;
use utmkit_core::rules::{build_url, is_valid_url, NormalizedUtm};

/// The UTM fields shared by `build` and `link add`.
#[derive(Debug, Args)]
pub struct UtmArgs {
    /// Destination URL (http:// or https://)
    #[arg(long = "url")]
    pub destination_url: String,
    #[arg(long)]
    pub source: String,
    #[arg(long)]
    pub medium: String,
    #[arg(long)]
    pub campaign: String,
    #[arg(long)]
    pub term: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    /// Extra query parameter, applied after the UTM set
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}

impl UtmArgs {
    pub fn into_fields(self) -> Result<UtmFieldSet> {
        let destination_url = self.destination_url.trim().to_string();
        if !is_valid_url(&destination_url) {
            return Err(invalid_input(format!(
                "destination url must be an absolute http:// or https:// url: {destination_url}"
            )));
        }
        Ok(UtmFieldSet {
            destination_url,
            utm_source: self.source,
            utm_medium: self.medium,
            utm_campaign: self.campaign,
            utm_term: self.term,
            utm_content: self.content,
            custom_params: parse_custom_params(&self.params)?,
        })
    }
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub utm: UtmArgs,
}

pub fn build(ctx: &Context<'_>, args: BuildArgs) -> Result<()> {
    let settings = load_normalization(ctx)?;
    let fields = args.utm.into_fields()?;
    let final_url = build_url(&fields, &settings)?;

    if ctx.json {
        let utm = NormalizedUtm::from_fields(&fields, &settings);
        print_json(&LinkPreviewDto {
            final_url,
            utm_source: utm.source,
            utm_medium: utm.medium,
            utm_campaign: utm.campaign,
            utm_term: utm.term,
            utm_content: utm.content,
            settings,
        })?;
    } else {
        println!("{final_url}");
    }
    Ok(())
}
