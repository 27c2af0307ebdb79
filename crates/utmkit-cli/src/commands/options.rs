use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::parse_option_id;
use anyhow::Result;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Subcommand};
use std::str::FromStr;
use utmkit_core::domain::{OptionKind, UtmOption};
use utmkit_core::time::now_utc;
use utmkit_store::repo::{OptionNew, OptionUpdate};

#[derive(Debug, Subcommand)]
pub enum OptionCommand {
    Add(OptionAddArgs),
    Ls(OptionListArgs),
    Edit(OptionEditArgs),
    Rm(OptionRemoveArgs),
}

#[derive(Debug, Args)]
pub struct OptionAddArgs {
    /// source, medium or campaign
    pub kind: String,
    #[arg(long)]
    pub label: String,
    /// Stored value; derived from the label when omitted
    #[arg(long)]
    pub value: Option<String>,
    #[arg(long)]
    pub requires_keyword: bool,
    #[arg(long)]
    pub requires_location_event: bool,
}

#[derive(Debug, Args)]
pub struct OptionListArgs {
    #[arg(long)]
    pub kind: Option<String>,
    /// Include inactive options
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Args)]
pub struct OptionEditArgs {
    pub id: String,
    #[arg(long)]
    pub label: Option<String>,
    #[arg(long)]
    pub value: Option<String>,
    #[arg(long, action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub active: Option<bool>,
    #[arg(long, action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub requires_keyword: Option<bool>,
    #[arg(long, action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub requires_location_event: Option<bool>,
}

#[derive(Debug, Args)]
pub struct OptionRemoveArgs {
    pub id: String,
}

pub fn add_option(ctx: &Context<'_>, args: OptionAddArgs) -> Result<()> {
    let kind = OptionKind::from_str(&args.kind)?;
    let option = ctx.store.options().add(
        now_utc(),
        OptionNew {
            kind,
            label: args.label,
            value: args.value,
            requires_keyword: args.requires_keyword,
            requires_location_event: args.requires_location_event,
        },
    )?;

    if ctx.json {
        print_json(&option)?;
    } else {
        println!("added {} {} ({})", option.kind, option.value, option.id);
    }
    Ok(())
}

pub fn list_options(ctx: &Context<'_>, args: OptionListArgs) -> Result<()> {
    let kind = args
        .kind
        .as_deref()
        .map(OptionKind::from_str)
        .transpose()?;
    let options = ctx.store.options().list(kind, args.all)?;

    if ctx.json {
        print_json(&options)?;
        return Ok(());
    }

    if options.is_empty() {
        println!("no options");
        return Ok(());
    }

    for option in &options {
        println!("{}", format_option_line(option));
    }
    Ok(())
}

pub fn edit_option(ctx: &Context<'_>, args: OptionEditArgs) -> Result<()> {
    let id = parse_option_id(&args.id)?;
    let update = OptionUpdate {
        label: args.label,
        value: args.value,
        active: args.active,
        requires_keyword: args.requires_keyword,
        requires_location_event: args.requires_location_event,
    };
    if update.is_empty() {
        return Err(invalid_input("no updates provided"));
    }

    let option = ctx.store.options().update(now_utc(), id, update)?;
    if ctx.json {
        print_json(&option)?;
    } else {
        println!("updated {}", format_option_line(&option));
    }
    Ok(())
}

pub fn remove_option(ctx: &Context<'_>, args: OptionRemoveArgs) -> Result<()> {
    let id = parse_option_id(&args.id)?;
    ctx.store.options().delete(id)?;

    if ctx.json {
        print_json(&serde_json::json!({ "id": id, "deleted": true }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}

fn format_option_line(option: &UtmOption) -> String {
    let mut flags = Vec::new();
    if !option.active {
        flags.push("inactive");
    }
    if option.requires_keyword {
        flags.push("keyword");
    }
    if option.requires_location_event {
        flags.push("location+event");
    }
    let mut line = format!(
        "{} {:>3}. {} [{}] {}",
        option.kind, option.display_order, option.label, option.value, option.id
    );
    if !flags.is_empty() {
        line.push_str(&format!(" ({})", flags.join(", ")));
    }
    line
}
