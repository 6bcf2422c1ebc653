//! CLI transport: one-shot backend calls and the chat UI entry point

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tabled::{builder::Builder, settings::Style};

use crate::api::{
    ApiClient, ExpertiseLevel, HealthService, PostgresService, QastClient, RagService, Row,
    TableService,
};
use crate::config::Config;
use crate::tui::{self, ChatApp, EventHandler};

/// How `query` prints its rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// One row operation on a table
#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    List,
    Get(String),
    Create(Vec<(String, Value)>),
    Delete(String),
}

fn api_client(config: &Config) -> Result<ApiClient> {
    ApiClient::with_timeout(&config.api.base_url, config.api.timeout())
        .context("Failed to create API client")
}

fn rag_service(config: &Config) -> Result<RagService> {
    let client = ApiClient::with_timeout(&config.rag.base_url, config.api.timeout())
        .context("Failed to create RAG client")?;
    Ok(RagService::new(client)
        .with_user_id(&config.rag.user_id)
        .with_template(&config.rag.template_name))
}

/// Parse a `--arg` value: JSON when it parses, a plain string otherwise
pub fn parse_json_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Parse a `--set column=value` pair
pub fn parse_field(raw: &str) -> Result<(String, Value)> {
    let (column, value) = raw
        .split_once('=')
        .with_context(|| format!("Expected column=value, got {:?}", raw))?;
    Ok((column.trim().to_string(), parse_json_arg(value)))
}

/// Render rows as a table; columns appear in first-seen order
pub fn rows_table(rows: &[Row]) -> String {
    if rows.is_empty() {
        return "(no rows)".to_string();
    }

    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key);
            }
        }
    }

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.to_string()));
    for row in rows {
        builder.push_record(
            columns
                .iter()
                .map(|c| row.get(*c).map(cell_text).unwrap_or_default()),
        );
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "NULL".to_string(),
        other => other.to_string(),
    }
}

fn print_rows(rows: &[Row], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
        OutputFormat::Table => {
            println!("{}", rows_table(rows));
            println!("{}", format!("{} row(s)", rows.len()).dimmed());
        }
    }
    Ok(())
}

pub async fn run_health(config: &Config) -> Result<()> {
    let health = HealthService::new(api_client(config)?);
    let status = health.check().await?;
    println!("{} Backend status: {}", "✓".green(), status.status.bold());
    Ok(())
}

pub async fn run_query(
    config: &Config,
    query: &str,
    args: &[Value],
    format: OutputFormat,
) -> Result<()> {
    let postgres = PostgresService::new(api_client(config)?);
    let rows = postgres.query(query, args).await?;
    print_rows(&rows, format)
}

pub async fn run_execute(config: &Config, query: &str, args: &[Value]) -> Result<()> {
    let postgres = PostgresService::new(api_client(config)?);
    let result = postgres.execute(query, args).await?;
    println!("{} {} row(s) affected", "✓".green(), result.rows_affected);
    Ok(())
}

pub async fn run_ask(config: &Config, query: &str, expertise: ExpertiseLevel) -> Result<()> {
    let rag = rag_service(config)?;
    let response = rag.ask(query, expertise).await?;

    println!("{}", "ANSWER".bold().cyan());
    println!("{}", response.answer);
    if !response.context.is_empty() {
        println!();
        println!("{}", "CONTEXT SOURCES".bold().cyan());
        for (idx, ctx) in response.context.iter().enumerate() {
            println!("  [{}] {}", idx + 1, ctx);
        }
    }
    Ok(())
}

pub async fn run_ingest(
    config: &Config,
    text: &str,
    user_id: Option<&str>,
    template: Option<&str>,
) -> Result<()> {
    let rag = rag_service(config)?;
    let result = rag
        .extract_with(
            text,
            user_id.unwrap_or(&config.rag.user_id),
            template.unwrap_or(&config.rag.template_name),
        )
        .await?;

    println!("{} Ingestion Successful", "✓".green());
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub async fn run_table(
    config: &Config,
    table: &str,
    action: TableAction,
    format: OutputFormat,
) -> Result<()> {
    let service = TableService::new(PostgresService::new(api_client(config)?), table)?;

    match action {
        TableAction::List => {
            let rows = service.list().await?;
            print_rows(&rows, format)?;
        }
        TableAction::Get(id) => match service.get(&id).await? {
            Some(row) => print_rows(&[row], format)?,
            None => println!(
                "{}",
                format!("No row with id {} in {}", id, service.table()).yellow()
            ),
        },
        TableAction::Create(fields) => {
            let result = service.create(&fields).await?;
            println!(
                "{} {} row(s) inserted into {}",
                "✓".green(),
                result.rows_affected,
                service.table()
            );
        }
        TableAction::Delete(id) => {
            let result = service.delete(&id).await?;
            println!(
                "{} {} row(s) deleted from {}",
                "✓".green(),
                result.rows_affected,
                service.table()
            );
        }
    }
    Ok(())
}

/// Run the terminal chat/ingest UI
pub async fn run_chat_ui(config: &Config) -> Result<()> {
    let backend = QastClient::new(
        HealthService::new(api_client(config)?),
        rag_service(config)?,
    );
    let app = ChatApp::new(config.rag.default_expertise);
    let events = EventHandler::new(Duration::from_millis(config.tui.tick_rate_ms.max(10)));

    tracing::info!(
        api = %config.api.base_url,
        rag = %config.rag.base_url,
        "Starting chat UI"
    );
    tui::run_chat(app, Arc::new(backend), events).await
}

pub fn print_config(config: &Config) -> Result<()> {
    let path = Config::config_path()?;
    println!("{}", format!("# {}", path.display()).dimmed());
    print!("{}", config.to_toml()?);
    Ok(())
}
