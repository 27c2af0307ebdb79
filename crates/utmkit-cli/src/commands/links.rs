use crate::commands::build::UtmArgs;
use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{format_custom_params, load_normalization, parse_link_id};
use anyhow::{anyhow, Context as _, Result};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use utmkit_core::domain::{OptionKind, UtmLink};
use utmkit_core::rules::LinkDraft;
use utmkit_core::time::{format_timestamp_datetime, now_utc};
use utmkit_store::query::LinkQuery;
use utmkit_store::repo::{LinkNew, LinksRepo, OptionsRepo};

const CSV_HEADER: [&str; 10] = [
    "Link Name",
    "Destination URL",
    "Final URL",
    "Source",
    "Medium",
    "Campaign",
    "Term",
    "Content",
    "Custom Params",
    "Created At",
];

#[derive(Debug, Subcommand)]
pub enum LinkCommand {
    /// Build a link and save it
    Add(LinkAddArgs),
    Ls(LinkListArgs),
    Rm(LinkRemoveArgs),
    /// Write saved links as CSV
    Export(LinkExportArgs),
}

#[derive(Debug, Args)]
pub struct LinkAddArgs {
    #[arg(long)]
    pub name: String,
    #[command(flatten)]
    pub utm: UtmArgs,
}

#[derive(Debug, Args)]
pub struct LinkListArgs {
    /// Case-insensitive match on name, destination, source, medium or campaign
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub limit: Option<i64>,
}

#[derive(Debug, Args)]
pub struct LinkRemoveArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct LinkExportArgs {
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
struct ExportReport {
    format: String,
    count: usize,
    output: Option<String>,
}

pub fn add_link(ctx: &Context<'_>, args: LinkAddArgs) -> Result<()> {
    let now = now_utc();
    let settings = load_normalization(ctx)?;
    let draft = LinkDraft {
        link_name: args.name,
        fields: args.utm.into_fields()?,
    };
    let resolved = draft.resolve(&settings)?;
    let input = LinkNew::from_resolved(&draft, resolved);

    let tx = ctx.store.connection().unchecked_transaction()?;
    let link = LinksRepo::new(&tx).create(now, input)?;
    let options = OptionsRepo::new(&tx);
    match options.find_by_value(OptionKind::Campaign, &link.utm_campaign)? {
        Some(campaign) => {
            if campaign.missing_keyword(link.utm_term.as_deref()) {
                warn!(
                    campaign = %campaign.value,
                    "campaign requires a keyword; pass --term"
                );
            }
        }
        None => {
            if let Some(option) =
                options.ensure_campaign(now, &draft.fields.utm_campaign, &link.utm_campaign)?
            {
                debug!(value = %option.value, "campaign option added");
            }
        }
    }
    tx.commit()?;

    if ctx.json {
        print_json(&link)?;
    } else {
        println!("saved {} {}", link.id, link.link_name);
        println!("{}", link.final_url);
    }
    Ok(())
}

pub fn list_links(ctx: &Context<'_>, args: LinkListArgs) -> Result<()> {
    let limit = match args.limit {
        Some(limit) if limit <= 0 => return Err(invalid_input("--limit must be positive")),
        Some(limit) => limit,
        None => ctx.config.links.list_limit,
    };
    let query = LinkQuery {
        search: args.search,
        limit: Some(limit),
    };
    let links = ctx.store.links().list(&query)?;

    if ctx.json {
        print_json(&links)?;
        return Ok(());
    }

    if links.is_empty() {
        println!("no links");
        return Ok(());
    }

    for link in links {
        println!(
            "{}  {}  ({})",
            link.id,
            link.link_name,
            format_timestamp_datetime(link.created_at)
        );
        println!("    {}", link.final_url);
    }
    Ok(())
}

pub fn remove_link(ctx: &Context<'_>, args: LinkRemoveArgs) -> Result<()> {
    let id = parse_link_id(&args.id)?;
    ctx.store.links().delete(id)?;

    if ctx.json {
        print_json(&serde_json::json!({ "id": id, "deleted": true }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}

pub fn export_links(ctx: &Context<'_>, args: LinkExportArgs) -> Result<()> {
    let query = LinkQuery {
        search: args.search,
        limit: None,
    };
    let links = ctx.store.links().list(&query)?;
    let data = links_to_csv(&links)?;

    write_export(
        ctx,
        ExportReport {
            format: "csv".to_string(),
            count: links.len(),
            output: args.out.as_ref().map(|path| path.display().to_string()),
        },
        args.out.as_deref(),
        &data,
    )
}

fn links_to_csv(links: &[UtmLink]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for link in links {
        writer.write_record([
            link.link_name.as_str(),
            link.destination_url.as_str(),
            link.final_url.as_str(),
            link.utm_source.as_str(),
            link.utm_medium.as_str(),
            link.utm_campaign.as_str(),
            link.utm_term.as_deref().unwrap_or_default(),
            link.utm_content.as_deref().unwrap_or_default(),
            format_custom_params(&link.custom_params).as_str(),
            format_timestamp_datetime(link.created_at).as_str(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow!("finish csv export: {}", err.error()))?;
    Ok(String::from_utf8(bytes)?)
}

fn write_export(
    ctx: &Context<'_>,
    report: ExportReport,
    out: Option<&Path>,
    data: &str,
) -> Result<()> {
    if ctx.json && out.is_none() {
        return Err(invalid_input("--json requires --out for export commands"));
    }

    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("create export directory {}", parent.display()))?;
                }
            }
            fs::write(path, data)
                .with_context(|| format!("write export file {}", path.display()))?;
            if ctx.json {
                print_json(&report)?;
            } else {
                println!("Exported {} links to {}", report.count, path.display());
            }
            Ok(())
        }
        None => {
            print!("{}", data);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::links_to_csv;
    use utmkit_core::domain::{CustomParam, LinkId, UtmLink};

    #[test]
    fn csv_quotes_fields_and_joins_params() {
        let link = UtmLink {
            id: LinkId::new(),
            link_name: "Fair, spring".to_string(),
            destination_url: "https://example.com/".to_string(),
            utm_source: "newsletter".to_string(),
            utm_medium: "email".to_string(),
            utm_campaign: "fair".to_string(),
            utm_term: None,
            utm_content: Some("hero".to_string()),
            custom_params: vec![CustomParam::new("a", "1"), CustomParam::new("b", "2")],
            final_url: "https://example.com/?utm_source=newsletter".to_string(),
            created_at: 0,
            updated_at: 0,
        };
        let csv = links_to_csv(&[link]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Link Name,Destination URL,Final URL,Source,Medium,Campaign,Term,Content,Custom Params,Created At"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("\"Fair, spring\",https://example.com/,"));
        assert!(row.contains(",newsletter,email,fair,,hero,a=1; b=2,"));
    }

    #[test]
    fn csv_of_no_links_is_header_only() {
        let csv = links_to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
