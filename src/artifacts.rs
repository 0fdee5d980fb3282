//! Loading of the precomputed artifacts.
//!
//! All four files are read once and validated before anything is served.
//! A missing or malformed file is fatal.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::de::DeserializeOwned;

use crate::formats::{Frame, PivotTableFile};

pub const POPULAR_FILE: &str = "popular.json";
pub const BOOKS_FILE: &str = "books.json";
pub const PIVOT_FILE: &str = "pt.json";
pub const SIMILARITY_FILE: &str = "similarity_scores.json";

#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub popular: PathBuf,
    pub books: PathBuf,
    pub pivot: PathBuf,
    pub similarity: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            popular: dir.join(POPULAR_FILE),
            books: dir.join(BOOKS_FILE),
            pivot: dir.join(PIVOT_FILE),
            similarity: dir.join(SIMILARITY_FILE),
        }
    }
}

/// Dense N×N score matrix. Row `i` and column `i` belong to `PivotIndex[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> anyhow::Result<Self> {
        let n = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
            anyhow::bail!(
                "similarity matrix must be square: row {i} has {} columns, expected {n}",
                row.len()
            );
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        self.rows.get(i).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone)]
pub struct Artifacts {
    pub popular: Frame,
    pub books: Frame,
    pub pivot_index: Vec<String>,
    pub similarity: SimilarityMatrix,
}

impl Artifacts {
    pub fn load(paths: &ArtifactPaths) -> anyhow::Result<Self> {
        let popular: Frame = load_artifact(&paths.popular)?;
        let books: Frame = load_artifact(&paths.books)?;
        let pivot: PivotTableFile = load_artifact(&paths.pivot)?;
        let scores: Vec<Vec<f64>> = load_artifact(&paths.similarity)?;

        validate_frame(&popular).with_context(|| artifact_load_failed(&paths.popular))?;
        validate_frame(&books).with_context(|| artifact_load_failed(&paths.books))?;
        validate_pivot_index(&pivot.index).with_context(|| artifact_load_failed(&paths.pivot))?;
        let similarity =
            SimilarityMatrix::new(scores).with_context(|| artifact_load_failed(&paths.similarity))?;

        Self::from_parts(popular, books, pivot.index, similarity)
    }

    /// Assembles artifacts that are already in memory. Checks that the
    /// matrix and the pivot index describe the same titles.
    pub fn from_parts(
        popular: Frame,
        books: Frame,
        pivot_index: Vec<String>,
        similarity: SimilarityMatrix,
    ) -> anyhow::Result<Self> {
        if similarity.len() != pivot_index.len() {
            anyhow::bail!(
                "similarity matrix is {n}x{n} but pivot index has {} titles",
                pivot_index.len(),
                n = similarity.len()
            );
        }

        Ok(Self {
            popular,
            books,
            pivot_index,
            similarity,
        })
    }
}

fn artifact_load_failed(path: &Path) -> String {
    format!("artifact load failed: {}", path.display())
}

fn load_artifact<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let file = File::open(path).with_context(|| artifact_load_failed(path))?;
    let value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse json: {}", path.display()))
        .with_context(|| artifact_load_failed(path))?;
    tracing::debug!(path = %path.display(), "loaded artifact");
    Ok(value)
}

fn validate_frame(frame: &Frame) -> anyhow::Result<()> {
    let width = frame.columns.len();
    for (i, row) in frame.rows.iter().enumerate() {
        if row.len() != width {
            anyhow::bail!("row {i} has {} cells, expected {width}", row.len());
        }
    }
    Ok(())
}

fn validate_pivot_index(index: &[String]) -> anyhow::Result<()> {
    let mut seen = HashSet::with_capacity(index.len());
    for title in index {
        if !seen.insert(title.as_str()) {
            anyhow::bail!("pivot index contains duplicate title: {title:?}");
        }
    }
    Ok(())
}
