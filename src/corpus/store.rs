//! Read-only SQLite access to the labeled corpus table.
//!
//! The table layout is one `message` text column, three metadata columns
//! (`id`, `original`, `genre`), and one 0/1 column per category. The category
//! label set is every column that is not the message or metadata, resolved by
//! name once at load time and optionally validated against an expected count,
//! never inferred positionally.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use tracing::info;

use crate::corpus::corpus::LabeledCorpus;
use crate::error::{MaydayError, Result};

/// The column holding the raw message text.
pub const MESSAGE_COLUMN: &str = "message";

/// Columns that accompany the message but are not categories.
pub const METADATA_COLUMNS: &[&str] = &["id", "original", "genre"];

/// How to locate and validate the corpus table.
#[derive(Debug, Clone, Default)]
pub struct CorpusConfig {
    /// Table to read; when absent, the first user table in the database.
    pub table: Option<String>,
    /// When set, loading fails unless exactly this many category columns are
    /// found.
    pub expected_categories: Option<usize>,
}

/// Load the corpus from a SQLite database, once, read-only.
pub fn load_corpus(path: &Path, config: &CorpusConfig) -> Result<LabeledCorpus> {
    let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

    let table = match &config.table {
        Some(name) => name.clone(),
        None => first_user_table(&connection)?,
    };

    let mut statement = connection.prepare(&format!("SELECT * FROM \"{table}\""))?;
    let column_names: Vec<String> = statement
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();

    let message_index = column_names
        .iter()
        .position(|name| name == MESSAGE_COLUMN)
        .ok_or_else(|| {
            MaydayError::corpus(format!("table '{table}' has no '{MESSAGE_COLUMN}' column"))
        })?;

    let category_columns: Vec<(usize, String)> = column_names
        .iter()
        .enumerate()
        .filter(|(_, name)| {
            name.as_str() != MESSAGE_COLUMN && !METADATA_COLUMNS.contains(&name.as_str())
        })
        .map(|(index, name)| (index, name.clone()))
        .collect();

    if category_columns.is_empty() {
        return Err(MaydayError::corpus(format!(
            "table '{table}' has no category columns"
        )));
    }
    if let Some(expected) = config.expected_categories {
        if category_columns.len() != expected {
            return Err(MaydayError::corpus(format!(
                "table '{table}' has {} category columns, expected {expected}",
                category_columns.len()
            )));
        }
    }

    let categories: Vec<String> = category_columns
        .iter()
        .map(|(_, name)| name.clone())
        .collect();

    let mut messages = Vec::new();
    let mut labels = Vec::new();

    let mut rows = statement.query([])?;
    while let Some(row) = rows.next()? {
        let message: String = row.get::<_, Option<String>>(message_index)?.unwrap_or_default();

        let mut label_row = Vec::with_capacity(category_columns.len());
        for (index, name) in &category_columns {
            let value: i64 = row.get(*index).map_err(|_| {
                MaydayError::corpus(format!(
                    "category column '{name}' holds a non-integer value"
                ))
            })?;
            if value != 0 && value != 1 {
                return Err(MaydayError::corpus(format!(
                    "category column '{name}' holds non-binary value {value}"
                )));
            }
            label_row.push(value as u8);
        }

        messages.push(message);
        labels.push(label_row);
    }

    info!(
        table,
        rows = messages.len(),
        categories = categories.len(),
        "loaded corpus"
    );

    LabeledCorpus::new(messages, categories, labels)
}

/// Resolve the first user table in the database, by name order.
fn first_user_table(connection: &Connection) -> Result<String> {
    let mut statement = connection.prepare(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
         ORDER BY name",
    )?;
    let mut rows = statement.query([])?;

    match rows.next()? {
        Some(row) => Ok(row.get(0)?),
        None => Err(MaydayError::corpus("database contains no tables")),
    }
}
