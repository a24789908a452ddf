// retailflow/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "retailflow")]
#[command(about = "Retail ETL: clean, validate, load and aggregate customer revenue", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the project lives and where its paths may be overridden.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project directory (holds the optional retailflow.yaml)
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Input directory with customers.csv, products.csv, transactions.csv
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output directory for the store file and the report artifacts
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Locating an existing store.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Explicit DuckDB file (defaults to <output>/retail_data.duckdb)
    #[arg(long)]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Runs the pipeline (preflight -> extract/transform/load/report -> validation)
    Run {
        #[command(flatten)]
        project: ProjectArgs,

        /// Do not write customer_revenue.csv
        #[arg(long)]
        skip_export: bool,
    },

    /// 📂 Checks that every input file is present
    Check {
        #[command(flatten)]
        project: ProjectArgs,
    },

    /// 🧪 Re-reads the store and asserts the loaded data is sane
    Validate {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// 📊 Prints record counts and revenue statistics
    Summary {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// ⚡ Executes a raw SQL query (Ad-hoc)
    Query {
        query: String,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// 📤 Exports a relation as CSV
    Export {
        /// customers | products | transactions | customer_revenue
        relation: String,

        destination: PathBuf,

        #[command(flatten)]
        store: StoreArgs,
    },
}
