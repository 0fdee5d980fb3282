use serde::{Deserialize, Serialize};

/// A column-named table as written by the offline pipeline
/// (`popular.json`, `books.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frame {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl Frame {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell text at (`row`, `col`). Out of range reads as empty.
    pub fn cell_text(&self, row: usize, col: usize) -> String {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(cell_to_string)
            .unwrap_or_default()
    }
}

/// Pivot table artifact. Only the row index is consumed; user columns and
/// rating values are ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PivotTableFile {
    pub index: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    /// Empty when the table has no image column.
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBook {
    #[serde(flatten)]
    pub book: BookRecord,
    pub score: f64,
}

pub fn cell_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
