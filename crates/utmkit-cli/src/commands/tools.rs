use crate::commands::{print_json, Context};
use crate::util::load_normalization;
use anyhow::Result;
use clap::Args;
use utmkit_core::dto::NormalizedValueDto;
use utmkit_core::rules::{format_event_template, normalize as normalize_value, slugify};

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    pub value: String,
}

#[derive(Debug, Args)]
pub struct SlugArgs {
    pub label: String,
}

#[derive(Debug, Args)]
pub struct TemplateArgs {
    #[arg(long)]
    pub event: String,
    #[arg(long)]
    pub location: String,
    /// YYYY-MM-DD or an RFC 3339 timestamp
    #[arg(long)]
    pub date: String,
}

pub fn normalize(ctx: &Context<'_>, args: NormalizeArgs) -> Result<()> {
    let settings = load_normalization(ctx)?;
    let normalized = normalize_value(&args.value, &settings);
    print_value(ctx.json, args.value, normalized)
}

pub fn slug(json: bool, args: SlugArgs) -> Result<()> {
    let slug = slugify(&args.label);
    print_value(json, args.label, slug)
}

pub fn template(json: bool, args: TemplateArgs) -> Result<()> {
    let value = format_event_template(&args.event, &args.location, &args.date)?;
    let input = format!("{} / {} / {}", args.event, args.location, args.date);
    print_value(json, input, value)
}

fn print_value(json: bool, input: String, normalized: String) -> Result<()> {
    if json {
        print_json(&NormalizedValueDto { input, normalized })
    } else {
        println!("{normalized}");
        Ok(())
    }
}
