use std::path::Path;

use anyhow::Context as _;

use crate::artifacts::{ArtifactPaths, Artifacts, SimilarityMatrix};
use crate::columns::ColumnConfig;
use crate::error::RecommendError;
use crate::formats::{BookRecord, Frame, ScoredBook};
use crate::popular;
use crate::recommend::{BookCatalog, Recommender};

/// Process-wide application state: the artifacts plus the column layout
/// resolved for them. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Dashboard {
    popular: Frame,
    popular_columns: ColumnConfig,
    catalog: BookCatalog,
    pivot_index: Vec<String>,
    similarity: SimilarityMatrix,
}

impl Dashboard {
    pub fn load(artifacts_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let artifacts_dir = artifacts_dir.as_ref();
        let artifacts = Artifacts::load(&ArtifactPaths::in_dir(artifacts_dir))
            .with_context(|| format!("load artifacts from {}", artifacts_dir.display()))?;
        Self::from_artifacts(artifacts)
    }

    pub fn from_artifacts(artifacts: Artifacts) -> anyhow::Result<Self> {
        let Artifacts {
            popular,
            books,
            pivot_index,
            similarity,
        } = artifacts;

        let popular_columns =
            ColumnConfig::resolve(&popular).context("resolve popularity table columns")?;
        let catalog = BookCatalog::new(books).context("resolve books table columns")?;

        let (title, author, image) = popular_columns.names();
        tracing::info!(title, author, image = ?image, rows = popular.len(), "popularity table");
        let (title, author, image) = catalog.columns().names();
        tracing::info!(
            title,
            author,
            image = ?image,
            rows = catalog.frame().len(),
            distinct_titles = catalog.len(),
            "books table"
        );
        tracing::info!(titles = pivot_index.len(), "similarity matrix");

        Ok(Self {
            popular,
            popular_columns,
            catalog,
            pivot_index,
            similarity,
        })
    }

    pub fn top_n(&self, n: usize) -> Vec<BookRecord> {
        popular::top_n(&self.popular, &self.popular_columns, n)
    }

    /// Selectable titles, in pivot index order.
    pub fn titles(&self) -> &[String] {
        &self.pivot_index
    }

    pub fn recommend(&self, title: &str) -> Result<Vec<BookRecord>, RecommendError> {
        self.recommender().recommend(title)
    }

    pub fn recommend_scored(&self, title: &str) -> Result<Vec<ScoredBook>, RecommendError> {
        self.recommender().recommend_scored(title)
    }

    fn recommender(&self) -> Recommender<'_> {
        Recommender {
            pivot_index: &self.pivot_index,
            similarity: &self.similarity,
            catalog: &self.catalog,
        }
    }
}
