//! Bodega - Entry Point
//!
//! Loads the configured town documents into a catalog and runs one command
//! against it.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use bodega::cli::{render_item, render_results, render_stats, render_tree, CatalogStats, Cli, Command, SearchArgs};
use bodega::config::{config_path, write_default_config, CatalogConfig};
use bodega::query::{QuerySession, SortSpec};
use bodega::source::{Fetcher, Source};
use bodega::Catalog;

fn init_logging(log_file: Option<&Path>) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if let Some(path) = log_file {
        match OpenOptions::new().create(true).write(true).truncate(true).open(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Warning: cannot open log file {:?}: {}. Logging to stderr.", path, e),
        }
    }

    builder.init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref());

    log::info!("Starting Bodega v{}", env!("CARGO_PKG_VERSION"));

    let path = cli.config.clone().unwrap_or_else(config_path);

    if let Command::InitConfig { force } = cli.command {
        if path.exists() && !force {
            anyhow::bail!("{:?} already exists; pass --force to overwrite it", path);
        }
        write_default_config(&path).with_context(|| format!("writing {:?}", path))?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = CatalogConfig::load_or_default(&path);
    let sources: Vec<Source> = if cli.sources.is_empty() {
        config.sources()
    } else {
        cli.sources.iter().map(|s| Source::parse(s)).collect()
    };

    let fetcher = Fetcher::new(config.request_timeout());
    let catalog = match Catalog::load_all(&sources, &fetcher).await {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("{}", e);
            return Err(anyhow::Error::new(e).context("Check the source locations and try again"));
        }
    };

    let result = run(cli.command, &catalog, &config);
    if let Err(ref e) = result {
        log::error!("Command failed: {}", e);
    }
    result
}

fn run(command: Command, catalog: &Catalog, config: &CatalogConfig) -> Result<()> {
    match command {
        Command::Search(args) => search(&args, catalog, config),
        Command::Browse { town, shop, room } => {
            let tree = catalog.grouped_by_location();
            print!("{}", render_tree(&tree, town.as_deref(), shop.as_deref(), room.as_deref()));
            Ok(())
        }
        Command::Show { id, json } => {
            let item = catalog
                .item_by_id(&id)
                .with_context(|| format!("no item with id {}", id))?;
            if json {
                println!("{}", serde_json::to_string_pretty(item)?);
            } else {
                print!("{}", render_item(item));
            }
            Ok(())
        }
        Command::Stats { json } => {
            let stats = CatalogStats::from_catalog(catalog);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", render_stats(&stats));
            }
            Ok(())
        }
        Command::InitConfig { .. } => Ok(()),
    }
}

fn search(args: &SearchArgs, catalog: &Catalog, config: &CatalogConfig) -> Result<()> {
    let sort = match &args.sort {
        Some(name) => SortSpec::preset(name).with_context(|| format!("unknown sort '{}'", name))?,
        None => config.sort(),
    };

    let mut session = QuerySession::new(args.page_size.unwrap_or(config.page_size)).with_sort(sort);
    session.set_filter(args.filter());
    session.go_to_page(args.page);

    let result = session.run(catalog);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_results(&result));
    }
    Ok(())
}
