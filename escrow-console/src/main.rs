mod app;
mod cli;
mod command;
mod config;
mod error;
mod paths;
mod render;

use std::fs::{self, File};
use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use escrow_grid::column::GridContext;
use escrow_grid::listing::ListingController;
use escrow_grid::{RowKey, TableConfig};
use escrow_lib::api::{MemorySource, PageRequest};
use log::{info, warn};
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::{default_search_fields, infer_columns, Console};
use crate::cli::Cli;
use crate::command::Command;
use crate::config::ConsoleConfig;
use crate::error::ConsoleError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ConsoleError> {
    let mut config = ConsoleConfig::load(cli.config.as_deref())?;
    if let Some(rows_per_page) = cli.rows_per_page {
        config = config.with_rows_per_page(rows_per_page);
    }
    if !cli.search_fields.is_empty() {
        config = config.with_search_fields(cli.search_fields);
    }
    if let Some(id_field) = cli.id_field {
        config = config.with_id_field(id_field);
    }

    init_logging(config.level_filter())?;
    info!("Opening {}", cli.dataset.display());

    let source = MemorySource::from_path(&cli.dataset)?;
    let mut columns = config.column_descriptors()?;
    if columns.is_empty() {
        let sample = source.page(&PageRequest::first(1));
        columns = infer_columns(sample.records().first());
    }
    let search_fields = if config.search_fields.is_empty() {
        default_search_fields(&columns)
    } else {
        config.search_fields.clone()
    };

    let table = TableConfig::new(search_fields)
        .with_rows_per_page(config.rows_per_page)
        .with_row_key(RowKey::field(&config.id_field));
    let listing = ListingController::new(table, columns, Arc::new(source));
    let cx = GridContext::new()
        .with_labels(Arc::new(config.label_provider()))
        .with_permissions(config.permission_check())
        .with_language(&config.language);

    let mut console = Console::new(listing, cx);
    console.load().await?;
    info!(
        "Loaded first page, {} rows shown",
        console.listing().engine().data().len()
    );
    println!("{}", console.show());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => match console.execute(command).await {
                Ok(out) => println!("{}", out),
                Err(err) => {
                    warn!("Command failed: {}", err);
                    println!("error: {}", err);
                }
            },
            Err(err) => println!("{}", err),
        }
    }

    info!("Exiting");
    Ok(())
}

/// Writes logs to `latest.log` in the cache directory.
///
/// Without a home directory the console runs unlogged.
fn init_logging(level: LevelFilter) -> Result<(), ConsoleError> {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = File::create(&path)?;
    WriteLogger::init(level, Config::default(), file)?;
    Ok(())
}
