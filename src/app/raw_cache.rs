use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use tokio::sync::OnceCell;

use crate::raw_data::{self, RawTable, RawTableKind};

/// Raw CSV tables, each read on first request and kept for the life of the
/// process. A failed load is not cached, so the next request retries.
#[derive(Debug)]
pub struct RawDataCache {
    data_dir: PathBuf,
    books: OnceCell<Arc<RawTable>>,
    ratings: OnceCell<Arc<RawTable>>,
    users: OnceCell<Arc<RawTable>>,
}

impl RawDataCache {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            books: OnceCell::new(),
            ratings: OnceCell::new(),
            users: OnceCell::new(),
        }
    }

    pub fn data_dir(&self) -> &std::path::Path {
        &self.data_dir
    }

    fn cell(&self, kind: RawTableKind) -> &OnceCell<Arc<RawTable>> {
        match kind {
            RawTableKind::Books => &self.books,
            RawTableKind::Ratings => &self.ratings,
            RawTableKind::Users => &self.users,
        }
    }

    pub async fn get(&self, kind: RawTableKind) -> anyhow::Result<Arc<RawTable>> {
        let table = self
            .cell(kind)
            .get_or_try_init(|| async move {
                let data_dir = self.data_dir.clone();
                let table = tokio::task::spawn_blocking(move || {
                    raw_data::load_table(&data_dir, kind)
                })
                .await
                .context("join csv load task")??;
                tracing::info!(table = %kind, rows = table.rows.len(), "cached raw table");
                anyhow::Ok(Arc::new(table))
            })
            .await?;
        Ok(Arc::clone(table))
    }
}
