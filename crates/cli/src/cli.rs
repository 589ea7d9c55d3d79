use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use expedientes_models::FilterCriteria;

/// Top-level CLI parser for the `expedientes` binary.
#[derive(Debug, Parser)]
#[command(name = "expedientes", version, about = "Audit log console for the expedientes API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override `api.base_url`
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch one page of audits and print it with flattened descriptions
    List {
        /// Zero-based page
        #[arg(long, default_value_t = 0)]
        page: u64,
        /// Page size (defaults to `pagination.default_page_size`)
        #[arg(long)]
        size: Option<u64>,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Flatten a raw description string
    Describe {
        /// JSON (or free text) as stored in `Descripcion`
        description: String,
    },
    /// Write a filtered audit report
    Export {
        #[arg(long, value_enum, default_value = "pdf")]
        format: ExportFormat,
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Pdf,
    Xlsx,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Actor name or id substring
    #[arg(long)]
    pub actor: Option<String>,
    /// Entity name substring
    #[arg(long)]
    pub entity: Option<String>,
    /// Exact action tag (create, update, delete, ...)
    #[arg(long)]
    pub action: Option<String>,
    /// First day included (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day included (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// Transaction id found in the description
    #[arg(long)]
    pub transaction: Option<String>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        Self {
            actor_text: args.actor,
            entity_text: args.entity,
            action_tag: args.action,
            date_from: args.from,
            date_to: args.to,
            transaction_id: args.transaction,
        }
    }
}
