//! # citegraph CLI Module
//!
//! ## Available Commands
//!
//! - `search` - Filter the corpus and show one page of results
//! - `graph` - Build the citation graph around a record
//! - `details` - Show one record
//! - `facets` - List the topic tree and state tags
//! - `browse` - Interactive session over stdin

mod browse;
mod commands;

use crate::config::AppConfig;
use crate::loader::load_corpus;
use citegraph_core::{CiteError, FilterConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub use browse::*;
pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// citegraph - explore a bibliographic corpus
///
/// Filter records by title, dates, topics, states, authors, journals,
/// keywords and citation counts, and trace citation neighborhoods.
#[derive(Parser, Debug)]
#[command(name = "citegraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational output and log only warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML config file (default: ./citegraph.toml if present)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the corpus JSON document
    #[arg(short = 'D', long, global = true)]
    pub data: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Filter flags shared by `search` and the browse `search` line.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    /// Title terms; every term must occur in the title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Earliest publication date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Latest publication date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Topic field (repeatable)
    #[arg(long = "field")]
    pub fields: Vec<String>,

    /// Topic domain (repeatable)
    #[arg(long = "domain")]
    pub domains: Vec<String>,

    /// Topic name (repeatable)
    #[arg(long = "topic")]
    pub topics: Vec<String>,

    /// State tag (repeatable)
    #[arg(long = "state")]
    pub states: Vec<String>,

    /// Substring of the author names
    #[arg(short, long)]
    pub author: Option<String>,

    /// Substring of the journal name
    #[arg(short, long)]
    pub journal: Option<String>,

    /// Substring of the keywords
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Minimum forward citation count
    #[arg(long)]
    pub min_cites: Option<u64>,

    /// Maximum forward citation count
    #[arg(long)]
    pub max_cites: Option<u64>,
}

impl FilterArgs {
    /// Build the engine's filter configuration.
    pub fn to_config(&self) -> FilterConfig {
        FilterConfig {
            title: self.title.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            fields: self.fields.iter().cloned().collect(),
            domains: self.domains.iter().cloned().collect(),
            topics: self.topics.iter().cloned().collect(),
            states: self.states.iter().cloned().collect(),
            author: self.author.clone(),
            journal: self.journal.clone(),
            keyword: self.keyword.clone(),
            min_cites: self.min_cites,
            max_cites: self.max_cites,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter the corpus and show one page of results
    Search {
        #[command(flatten)]
        filter: FilterArgs,

        /// Page to show (clamped to the available pages)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Results per page
        #[arg(long)]
        page_size: Option<usize>,

        /// Write all results as CSV (default file from config)
        #[arg(short, long)]
        export: Option<Option<PathBuf>>,
    },

    /// Build the citation graph around a record
    Graph {
        /// Record id of the seed
        id: String,

        /// Traversal depth (non-numeric or < 1 means 1)
        #[arg(short, long)]
        depth: Option<String>,

        /// Write the graph records as CSV (default file from config)
        #[arg(short, long)]
        export: Option<Option<PathBuf>>,
    },

    /// Show the details of one record
    Details {
        /// Record id
        id: String,
    },

    /// List the topic tree and state tags
    Facets,

    /// Interactive session: search, page, open graphs and details
    Browse {
        /// Results per page
        #[arg(long)]
        page_size: Option<usize>,

        /// Graph depth
        #[arg(short, long)]
        depth: Option<usize>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments and a resolved configuration.
pub async fn execute(cli: Cli, mut config: AppConfig) -> Result<(), CiteError> {
    if let Some(data) = cli.data {
        config.data.path = data;
    }
    let output = Output {
        json: cli.json_mode,
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let store = load_corpus(&config.data.path, config.data.max_file_size).await?;

    match cli.command {
        Some(Commands::Search {
            filter,
            page,
            page_size,
            export,
        }) => {
            let page_size = page_size.unwrap_or(config.view.page_size);
            let export = export.map(|path| path.unwrap_or_else(|| config.export.search_file.clone()));
            cmd_search(
                &store,
                &filter.to_config(),
                page,
                page_size,
                export.as_deref(),
                output,
            )
        }
        Some(Commands::Graph { id, depth, export }) => {
            let export = export.map(|path| path.unwrap_or_else(|| config.export.graph_file.clone()));
            cmd_graph(
                &store,
                &id,
                depth.as_deref(),
                config.graph.depth,
                export.as_deref(),
                output,
            )
        }
        Some(Commands::Details { id }) => cmd_details(&store, &id, output),
        Some(Commands::Facets) => cmd_facets(&store, output),
        Some(Commands::Browse { page_size, depth }) => {
            let page_size = page_size.unwrap_or(config.view.page_size);
            let depth = depth.unwrap_or(config.graph.depth);
            cmd_browse(&store, page_size, depth, &config.export).await
        }
        None => {
            // No subcommand - show the first page of everything
            cmd_search(
                &store,
                &FilterConfig::default(),
                1,
                config.view.page_size,
                None,
                output,
            )
        }
    }
}
