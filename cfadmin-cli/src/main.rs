mod cli;
mod output;

use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use anyhow::{Context as _, Result, bail};
use cfadmin_lib::config::EngineConfig;
use cfadmin_lib::model::{KeyCase, Row};
use cfadmin_lib::presets;
use cfadmin_lib::table::{Column, Direction, TableEngine};
use clap::Parser;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref())?;
    run(&cli)
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            WriteLogger::init(level, Config::default(), file)
        }
        None => TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto),
    };
    installed.context("Failed to initialize logger")
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let input = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let case = if cli.camel_case {
        KeyCase::Camel
    } else {
        KeyCase::Preserve
    };
    let rows = Row::list_from_json_str(&input, case)
        .with_context(|| format!("Failed to parse rows from {}", cli.file.display()))?;
    log::info!("loaded {} rows from {}", rows.len(), cli.file.display());

    let mut engine = build_engine(cli.preset.as_deref(), config, rows)?;
    apply_arguments(&mut engine, cli)?;

    let view = engine.view();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view.rows)?);
    } else {
        let cells: Vec<Vec<String>> = view.rows.iter().map(|row| engine.cells(row)).collect();
        print!("{}", output::render_table(&engine.headers(), &cells));
        println!();
        println!("{}", view.summary());
    }
    Ok(())
}

fn build_engine(preset: Option<&str>, config: EngineConfig, rows: Vec<Row>) -> Result<TableEngine> {
    match preset {
        Some(name) => {
            let spec = presets::by_name(name).with_context(|| {
                format!(
                    "Unknown preset '{}' (expected one of: {})",
                    name,
                    presets::NAMES.join(", ")
                )
            })?;
            let mut engine = TableEngine::from_spec(spec, config);
            engine.set_rows(rows);
            Ok(engine)
        }
        None => Ok(TableEngine::new(inferred_columns(&rows), rows).with_config(config)),
    }
}

/// One column per field found in any row, in key order.
fn inferred_columns(rows: &[Row]) -> Vec<Column> {
    let keys: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.fields().keys().map(String::as_str))
        .collect();
    keys.into_iter().map(|key| Column::new(key, key)).collect()
}

fn apply_arguments(engine: &mut TableEngine, cli: &Cli) -> Result<()> {
    if let Some(size) = cli.page_size {
        if !engine.offers_page_size(size) {
            let offered: Vec<String> = engine.page_size_options().iter().map(usize::to_string).collect();
            bail!("Page size {} is not offered (choose from: {})", size, offered.join(", "));
        }
        engine.set_page_size(size);
    }
    if let Some(query) = &cli.query {
        engine.set_query(query.as_str());
    }
    for filter in &cli.filters {
        engine.set_filter(&filter.key, Some(filter.value.clone()));
    }
    if let Some(key) = &cli.sort {
        let direction = if cli.desc {
            Direction::Desc
        } else {
            Direction::Asc
        };
        if !engine.sort_by(key, direction) {
            match engine.column(key) {
                Some(_) => bail!("Column '{}' is not sortable", key),
                None => bail!("Unknown column '{}'", key),
            }
        }
    }
    engine.go_to_page(cli.page);
    Ok(())
}
