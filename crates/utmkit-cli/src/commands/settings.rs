use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Subcommand};
use std::str::FromStr;
use utmkit_core::domain::{SettingKey, Settings};
use utmkit_core::time::{format_timestamp_datetime, now_utc};

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    Show,
    Set(SettingsSetArgs),
}

#[derive(Debug, Args)]
pub struct SettingsSetArgs {
    /// normalize_values, lowercase_values or replace_spaces
    pub key: String,
    #[arg(action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub value: bool,
}

pub fn show_settings(ctx: &Context<'_>) -> Result<()> {
    let settings = ctx
        .store
        .settings()
        .get_or_init(now_utc(), ctx.config.normalization)?;
    print_settings(ctx, &settings)
}

pub fn set_setting(ctx: &Context<'_>, args: SettingsSetArgs) -> Result<()> {
    let key = SettingKey::from_str(&args.key)?;
    let now = now_utc();
    ctx.store
        .settings()
        .get_or_init(now, ctx.config.normalization)?;
    let settings = ctx.store.settings().set(now, key, args.value)?;
    print_settings(ctx, &settings)
}

fn print_settings(ctx: &Context<'_>, settings: &Settings) -> Result<()> {
    if ctx.json {
        return print_json(settings);
    }
    for key in SettingKey::ALL {
        println!("{} = {}", key, settings.normalization.get(key));
    }
    println!("updated {}", format_timestamp_datetime(settings.updated_at));
    Ok(())
}
