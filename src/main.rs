use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qast_client::api::ExpertiseLevel;
use qast_client::config::Config;
use qast_client::transport;
use qast_client::transport::cli::{OutputFormat, TableAction};

#[derive(Parser)]
#[command(name = "qast")]
#[command(
    author,
    version,
    about = "Qast - client for the Qast RAG service and wodge backends",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the API server (health, postgres)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Base URL of the RAG service (ask, ingest)
    #[arg(long, global = true)]
    rag_url: Option<String>,

    /// Per-request timeout in seconds (0 disables)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check backend health
    Health,

    /// Run a SELECT through the postgres passthrough
    Query {
        /// SQL text, with $1, $2... placeholders
        sql: String,

        /// Positional argument (JSON, or a plain string)
        #[arg(short, long = "arg")]
        args: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Run an INSERT/UPDATE/DELETE through the postgres passthrough
    Execute {
        /// SQL text, with $1, $2... placeholders
        sql: String,

        /// Positional argument (JSON, or a plain string)
        #[arg(short, long = "arg")]
        args: Vec<String>,
    },

    /// Ask the RAG service a question
    Ask {
        /// The question
        query: String,

        /// Answer pitch
        #[arg(short, long, value_enum)]
        expertise: Option<ExpertiseLevel>,
    },

    /// Ingest text into the knowledge graph (privacy extraction)
    Ingest {
        /// Facts to ingest
        text: String,

        /// User id sent with the request
        #[arg(long)]
        user_id: Option<String>,

        /// Extraction template name
        #[arg(long)]
        template: Option<String>,
    },

    /// Row operations on one table
    Table {
        /// Table name
        name: String,

        #[command(subcommand)]
        action: TableCommand,

        /// Output format for list/get
        #[arg(short, long, value_enum, default_value = "table", global = true)]
        format: OutputFormat,
    },

    /// Interactive chat and ingest UI (TUI)
    Chat,

    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
enum TableCommand {
    /// List all rows
    List,
    /// Show the row with this id
    Get { id: String },
    /// Insert a row from column=value pairs
    Create {
        #[arg(short, long = "set", required = true)]
        fields: Vec<String>,
    },
    /// Delete the row with this id
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; the chat UI owns the screen, so stay quiet there
    let filter = match (&cli.command, cli.verbose) {
        (Commands::Chat, _) => "off",
        (_, true) => "qast_client=debug,qast=debug",
        (_, false) => "qast_client=info,qast=info",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {:#}", e);
            Config::default()
        })
        .with_overrides(cli.base_url, cli.rag_url, cli.timeout_secs);

    match cli.command {
        Commands::Health => transport::cli::run_health(&config).await?,
        Commands::Query { sql, args, format } => {
            let args: Vec<_> = args
                .iter()
                .map(String::as_str)
                .map(transport::cli::parse_json_arg)
                .collect();
            transport::cli::run_query(&config, &sql, &args, format).await?;
        }
        Commands::Execute { sql, args } => {
            let args: Vec<_> = args
                .iter()
                .map(String::as_str)
                .map(transport::cli::parse_json_arg)
                .collect();
            transport::cli::run_execute(&config, &sql, &args).await?;
        }
        Commands::Ask { query, expertise } => {
            let expertise = expertise.unwrap_or(config.rag.default_expertise);
            transport::cli::run_ask(&config, &query, expertise).await?;
        }
        Commands::Ingest {
            text,
            user_id,
            template,
        } => {
            transport::cli::run_ingest(
                &config,
                &text,
                user_id.as_deref(),
                template.as_deref(),
            )
            .await?;
        }
        Commands::Table {
            name,
            action,
            format,
        } => {
            let action = match action {
                TableCommand::List => TableAction::List,
                TableCommand::Get { id } => TableAction::Get(id),
                TableCommand::Create { fields } => TableAction::Create(
                    fields
                        .iter()
                        .map(String::as_str)
                        .map(transport::cli::parse_field)
                        .collect::<Result<Vec<_>>>()?,
                ),
                TableCommand::Delete { id } => TableAction::Delete(id),
            };
            transport::cli::run_table(&config, &name, action, format).await?;
        }
        Commands::Chat => transport::cli::run_chat_ui(&config).await?,
        Commands::Config => transport::cli::print_config(&config)?,
    }

    Ok(())
}
