mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{build, completions, links, options, settings, tools, Context};
use crate::error::{exit_code_for, report_error};
use utmkit_config as config;
use utmkit_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "utmkit", version, about = "Build and keep track of UTM campaign links")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Preview a campaign URL without saving it
    Build(build::BuildArgs),
    /// Save and manage campaign links
    #[command(subcommand)]
    Link(links::LinkCommand),
    /// Manage source, medium and campaign options
    #[command(name = "option")]
    #[command(subcommand)]
    Options(options::OptionCommand),
    /// Show or change normalization settings
    #[command(subcommand)]
    Settings(settings::SettingsCommand),
    /// Show how a value is normalized under the stored settings
    Normalize(tools::NormalizeArgs),
    /// Turn a label into an option value
    Slug(tools::SlugArgs),
    /// Format an event campaign value
    Template(tools::TemplateArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        Command::Slug(args) => tools::slug(json, args),
        Command::Template(args) => tools::template(json, args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) if path.exists() => {
                        debug!(path = %path.display(), "config resolved");
                    }
                    Ok(path) => {
                        debug!(path = %path.display(), "config missing, using defaults");
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }
            let db_path =
                paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
            debug!(path = %db_path.display(), "database path resolved");

            let store = Store::open(&db_path)
                .with_context(|| format!("open database {}", db_path.display()))?;
            store.migrate().with_context(|| "run migrations")?;

            let ctx = Context {
                store: &store,
                json,
                config: &app_config,
            };

            match command {
                Command::Build(args) => build::build(&ctx, args),
                Command::Link(cmd) => match cmd {
                    links::LinkCommand::Add(args) => links::add_link(&ctx, args),
                    links::LinkCommand::Ls(args) => links::list_links(&ctx, args),
                    links::LinkCommand::Rm(args) => links::remove_link(&ctx, args),
                    links::LinkCommand::Export(args) => links::export_links(&ctx, args),
                },
                Command::Options(cmd) => match cmd {
                    options::OptionCommand::Add(args) => options::add_option(&ctx, args),
                    options::OptionCommand::Ls(args) => options::list_options(&ctx, args),
                    options::OptionCommand::Edit(args) => options::edit_option(&ctx, args),
                    options::OptionCommand::Rm(args) => options::remove_option(&ctx, args),
                },
                Command::Settings(cmd) => match cmd {
                    settings::SettingsCommand::Show => settings::show_settings(&ctx),
                    settings::SettingsCommand::Set(args) => settings::set_setting(&ctx, args),
                },
                Command::Normalize(args) => tools::normalize(&ctx, args),
                Command::Completions(_) | Command::Slug(_) | Command::Template(_) => {
                    unreachable!("store-free commands are handled before store initialization")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
