use std::path::PathBuf;

use anyhow::Context;
use bioportal::{BioPortalDictionary, ClientConfig, EntrySort, Options, ZProps};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "bioportal", about = "Query BioPortal through the dictionary interface")]
struct Cli {
    /// BioPortal API key (overrides config and BIOPORTAL_API_KEY).
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// BioPortal base URL, e.g. http://data.bioontology.org
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Config file to use instead of ~/.config/bioportal/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level to stderr (RUST_LOG still wins when set).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Free-text search for matching concepts.
    Match {
        query: String,
        #[command(flatten)]
        dicts: DictArgs,
        /// Rank these dictionaries first (repeatable).
        #[arg(long = "sort-dict")]
        sort_dict: Vec<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Look up entries by exact id, or list ontology-typed entries.
    Entries {
        /// Concept id to look up (repeatable).
        #[arg(long = "id")]
        ids: Vec<String>,
        #[command(flatten)]
        dicts: DictArgs,
        /// Client-side order when --all-results is set: dictID, id or str.
        #[arg(long, default_value = "dictID")]
        sort: EntrySort,
        /// Fetch every dictionary sharing each id instead of one page.
        #[arg(long)]
        all_results: bool,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show dictionary (ontology) information.
    Dicts {
        /// Dictionary URL or acronym (repeatable); none lists all.
        #[arg(long = "id")]
        ids: Vec<String>,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Args)]
struct DictArgs {
    /// Restrict to these dictionaries (repeatable).
    #[arg(long = "filter-dict")]
    filter_dict: Vec<String>,
    /// Keep only these z properties (repeatable); omit to keep all.
    #[arg(long = "z")]
    z: Vec<String>,
}

#[derive(Args)]
struct PageArgs {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    per_page: Option<u32>,
}

impl DictArgs {
    fn apply(&self, options: Options) -> Options {
        let z = if self.z.is_empty() {
            ZProps::All
        } else {
            ZProps::Only(self.z.clone())
        };
        options.with_filter_dict_id(self.filter_dict.clone()).with_z(z)
    }
}

impl PageArgs {
    fn apply(&self, options: Options) -> Options {
        let options = match self.page {
            Some(page) => options.with_page(page),
            None => options,
        };
        match self.per_page {
            Some(per_page) => options.with_per_page(per_page),
            None => options,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => ClientConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ClientConfig::load().context("failed to load config")?,
    };
    if let Some(key) = cli.api_key {
        config = config.with_api_key(key);
    }
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    if config.api_key.is_empty() {
        tracing::warn!("no API key configured; BioPortal will answer 401");
    }

    let dictionary = BioPortalDictionary::new(config);

    match cli.command {
        Command::Match { query, dicts, sort_dict, page } => {
            let options = page.apply(dicts.apply(Options::new().with_sort_dict_id(sort_dict)));
            print_json(&dictionary.get_matches_for_string(&query, &options).await?)
        }
        Command::Entries { ids, dicts, sort, all_results, page } => {
            let options = page.apply(dicts.apply(
                Options::new()
                    .with_filter_id(ids)
                    .with_entry_sort(sort)
                    .with_get_all_results(all_results),
            ));
            print_json(&dictionary.get_entries(&options).await?)
        }
        Command::Dicts { ids, page } => {
            let options = page.apply(Options::new().with_filter_id(ids));
            print_json(&dictionary.get_dict_infos(&options).await?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
