//! Row-level CRUD for a single table on top of [`PostgresService`]

use serde_json::Value;

use super::error::ApiError;
use super::services::PostgresService;
use super::types::{ExecuteResult, Row};

/// CRUD helper bound to one table keyed by an `id` column
#[derive(Debug, Clone)]
pub struct TableService {
    postgres: PostgresService,
    table: String,
}

impl TableService {
    /// Fails with `Validation` if `table` is not a plain identifier
    pub fn new(postgres: PostgresService, table: &str) -> Result<Self, ApiError> {
        check_identifier(table)?;
        Ok(Self {
            postgres,
            table: table.to_string(),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub async fn list(&self) -> Result<Vec<Row>, ApiError> {
        self.postgres
            .query(&format!("SELECT * FROM {}", self.table), &[])
            .await
    }

    /// First row with the given id, if any
    pub async fn get(&self, id: &str) -> Result<Option<Row>, ApiError> {
        let rows = self
            .postgres
            .query(
                &format!("SELECT * FROM {} WHERE id = $1", self.table),
                &[Value::String(id.to_string())],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Insert one row; values are bound positionally in field order
    pub async fn create(&self, fields: &[(String, Value)]) -> Result<ExecuteResult, ApiError> {
        let (query, args) = insert_statement(&self.table, fields)?;
        self.postgres.execute(&query, &args).await
    }

    pub async fn delete(&self, id: &str) -> Result<ExecuteResult, ApiError> {
        self.postgres
            .execute(
                &format!("DELETE FROM {} WHERE id = $1", self.table),
                &[Value::String(id.to_string())],
            )
            .await
    }
}

/// Build `INSERT INTO t (a, b) VALUES ($1, $2)` and its bound args
pub fn insert_statement(
    table: &str,
    fields: &[(String, Value)],
) -> Result<(String, Vec<Value>), ApiError> {
    check_identifier(table)?;
    if fields.is_empty() {
        return Err(ApiError::Validation(
            "insert needs at least one column".to_string(),
        ));
    }

    let mut columns = Vec::with_capacity(fields.len());
    let mut placeholders = Vec::with_capacity(fields.len());
    let mut args = Vec::with_capacity(fields.len());
    for (i, (column, value)) in fields.iter().enumerate() {
        check_identifier(column)?;
        columns.push(column.as_str());
        placeholders.push(format!("${}", i + 1));
        args.push(value.clone());
    }

    let query = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders.join(", ")
    );
    Ok((query, args))
}

/// Names are spliced into SQL text, so only `[A-Za-z_][A-Za-z0-9_]*` passes
fn check_identifier(name: &str) -> Result<(), ApiError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "invalid identifier: {:?}",
            name
        )))
    }
}
