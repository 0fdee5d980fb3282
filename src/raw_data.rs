//! The raw Book-Crossing CSV exports, loaded whole for inspection.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RawTableKind {
    Books,
    Ratings,
    Users,
}

impl RawTableKind {
    pub const ALL: [RawTableKind; 3] = [Self::Books, Self::Ratings, Self::Users];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Books => "Books.csv",
            Self::Ratings => "Ratings.csv",
            Self::Users => "Users.csv",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Books => "books",
            Self::Ratings => "ratings",
            Self::Users => "users",
        }
    }

    pub fn path_in(self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.file_name())
    }
}

impl fmt::Display for RawTableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RawTableKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                anyhow::anyhow!("unknown raw table: {s:?} (expected books, ratings or users)")
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Borrowed view of the first `limit` rows (all rows when `None`).
    pub fn view(&self, limit: Option<usize>) -> RawTableView<'_> {
        let len = limit.map_or(self.rows.len(), |limit| limit.min(self.rows.len()));
        RawTableView {
            columns: &self.columns,
            rows: &self.rows[..len],
        }
    }
}

/// Serializes like [`RawTable`] without copying the cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RawTableView<'a> {
    pub columns: &'a [String],
    pub rows: &'a [Vec<String>],
}

/// Reads the whole file. Records may have differing lengths, and invalid
/// UTF-8 is replaced rather than rejected.
pub fn load_csv(path: &Path) -> anyhow::Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open csv: {}", path.display()))?;

    let columns = reader
        .byte_headers()
        .with_context(|| format!("read csv header: {}", path.display()))?
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect();

    let mut rows = Vec::new();
    for (i, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("read csv record {i}: {}", path.display()))?;
        rows.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        );
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded csv");
    Ok(RawTable { columns, rows })
}

pub fn load_table(data_dir: &Path, kind: RawTableKind) -> anyhow::Result<RawTable> {
    load_csv(&kind.path_in(data_dir)).with_context(|| format!("load raw {kind} data"))
}
