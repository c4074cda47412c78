mod commands;
mod output;
mod sink;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dq")]
#[command(version, about = "Gold-schema data-quality suite", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the data-quality suite and persist the report
    Run {
        /// Path to the rules registry file (YAML or TOML)
        #[arg(short, long)]
        rules: String,

        /// Postgres URL of the warehouse (falls back to DATABASE_URL)
        #[arg(long, conflicts_with = "csv_dir")]
        warehouse_url: Option<String>,

        /// Warehouse schema holding the tables
        #[arg(long, default_value = "gold")]
        schema: String,

        /// Directory of <table>.csv fixtures instead of a live warehouse
        #[arg(long)]
        csv_dir: Option<String>,

        /// Tables to check (defaults to every table in the registry)
        #[arg(short, long, value_delimiter = ',')]
        tables: Vec<String>,

        /// Directory the report artifacts are written to
        #[arg(short, long, default_value = "data_quality")]
        out_dir: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Parse and summarize a rules registry without touching data
    Check {
        /// Path to the rules registry file (YAML or TOML)
        rules: String,
    },

    /// Write a starter rules registry for the gold schema
    Init {
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Run {
            rules,
            warehouse_url,
            schema,
            csv_dir,
            tables,
            out_dir,
            format,
        } => {
            commands::run::execute(
                &rules,
                warehouse_url.as_deref(),
                &schema,
                csv_dir.as_deref(),
                &tables,
                &out_dir,
                &format,
            )
            .await
        }

        Commands::Check { rules } => commands::check::execute(&rules),

        Commands::Init { output } => commands::init::execute(output.as_deref()),
    }
}
