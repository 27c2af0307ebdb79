use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};
use utmkit_config::AppConfig;
use utmkit_store::Store;

pub mod build;
pub mod completions;
pub mod links;
pub mod options;
pub mod settings;
pub mod tools;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
