//! Item-item recommendations over the precomputed similarity matrix.

use std::collections::HashMap;

use crate::artifacts::SimilarityMatrix;
use crate::columns::ColumnConfig;
use crate::error::RecommendError;
use crate::formats::{BookRecord, Frame, ScoredBook};

/// Number of similar titles returned per request.
pub const RECOMMENDATION_COUNT: usize = 5;

/// Up to `k` `(index, score)` pairs from `row`, best first, never including
/// `self_index`. Equal scores keep their index order.
pub fn rank_similar(row: &[f64], self_index: usize, k: usize) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
    // `sort_by` is stable.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
        .into_iter()
        .filter(|(j, _)| *j != self_index)
        .take(k)
        .collect()
}

/// Books metadata keyed by title. Editions sharing a title collapse to the
/// first row that carries it.
#[derive(Debug, Clone)]
pub struct BookCatalog {
    frame: Frame,
    columns: ColumnConfig,
    first_row_by_title: HashMap<String, usize>,
}

impl BookCatalog {
    pub fn new(frame: Frame) -> anyhow::Result<Self> {
        let columns = ColumnConfig::resolve(&frame)?;

        let mut first_row_by_title = HashMap::with_capacity(frame.len());
        for row in 0..frame.len() {
            first_row_by_title
                .entry(frame.cell_text(row, columns.title.index))
                .or_insert(row);
        }

        Ok(Self {
            frame,
            columns,
            first_row_by_title,
        })
    }

    pub fn columns(&self) -> &ColumnConfig {
        &self.columns
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Distinct titles in the catalog.
    pub fn len(&self) -> usize {
        self.first_row_by_title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_row_by_title.is_empty()
    }

    pub fn lookup(&self, title: &str) -> Option<BookRecord> {
        self.first_row_by_title
            .get(title)
            .map(|&row| self.columns.record(&self.frame, row))
    }
}

/// Read-only view over the pivot index, the matrix and the catalog.
#[derive(Debug, Clone, Copy)]
pub struct Recommender<'a> {
    pub pivot_index: &'a [String],
    pub similarity: &'a SimilarityMatrix,
    pub catalog: &'a BookCatalog,
}

impl Recommender<'_> {
    /// Top [`RECOMMENDATION_COUNT`] titles most similar to `title`, with
    /// their scores. Titles absent from the catalog are skipped, so fewer
    /// records may come back.
    pub fn recommend_scored(&self, title: &str) -> Result<Vec<ScoredBook>, RecommendError> {
        let index = self
            .pivot_index
            .iter()
            .position(|t| t == title)
            .ok_or_else(|| RecommendError::TitleNotFound(title.to_owned()))?;
        let row = self
            .similarity
            .row(index)
            .ok_or_else(|| RecommendError::TitleNotFound(title.to_owned()))?;

        let mut scored = Vec::with_capacity(RECOMMENDATION_COUNT);
        for (j, score) in rank_similar(row, index, RECOMMENDATION_COUNT) {
            let similar = &self.pivot_index[j];
            match self.catalog.lookup(similar) {
                Some(book) => scored.push(ScoredBook { book, score }),
                None => tracing::debug!(title = %similar, "no metadata row; skipping"),
            }
        }
        Ok(scored)
    }

    pub fn recommend(&self, title: &str) -> Result<Vec<BookRecord>, RecommendError> {
        Ok(self
            .recommend_scored(title)?
            .into_iter()
            .map(|s| s.book)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog(rows: &[(&str, &str, &str, &str)]) -> anyhow::Result<BookCatalog> {
        let frame = Frame {
            columns: vec![
                "ISBN".to_owned(),
                "Book-Title".to_owned(),
                "Book-Author".to_owned(),
                "Image-URL-M".to_owned(),
            ],
            rows: rows
                .iter()
                .map(|(isbn, title, author, image)| {
                    vec![json!(isbn), json!(title), json!(author), json!(image)]
                })
                .collect(),
        };
        BookCatalog::new(frame)
    }

    fn index(titles: &[&str]) -> Vec<String> {
        titles.iter().map(|t| (*t).to_owned()).collect()
    }

    fn titles(books: &[BookRecord]) -> Vec<&str> {
        books.iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn rank_similar_sorts_descending_and_drops_self() {
        let ranked = rank_similar(&[1.0, 0.9, 0.2, 0.5], 0, 5);
        assert_eq!(ranked, vec![(1, 0.9), (3, 0.5), (2, 0.2)]);
    }

    #[test]
    fn rank_similar_keeps_index_order_on_ties() {
        let ranked = rank_similar(&[0.4, 0.7, 1.0, 0.7, 0.4], 2, 5);
        assert_eq!(ranked, vec![(1, 0.7), (3, 0.7), (0, 0.4), (4, 0.4)]);
    }

    #[test]
    fn rank_similar_excludes_self_even_when_tied_at_top() {
        let ranked = rank_similar(&[1.0, 1.0, 0.1], 1, 5);
        assert_eq!(ranked, vec![(0, 1.0), (2, 0.1)]);
    }

    #[test]
    fn rank_similar_takes_at_most_k() {
        let row: Vec<f64> = (0..10).map(|i| i as f64 / 10.0).collect();
        let ranked = rank_similar(&row, 9, 5);
        let picked: Vec<usize> = ranked.iter().map(|(j, _)| *j).collect();
        assert_eq!(picked, vec![8, 7, 6, 5, 4]);
    }

    #[test]
    fn rank_similar_separates_scores_beyond_single_precision() {
        let ranked = rank_similar(&[1.0, 0.300_000_01, 0.300_000_02], 0, 5);
        assert_eq!(ranked, vec![(2, 0.300_000_02), (1, 0.300_000_01)]);
    }

    #[test]
    fn recommend_orders_near_equal_scores_by_value() -> anyhow::Result<()> {
        let catalog = catalog(&[
            ("1", "A", "Ann", ""),
            ("2", "B", "Bob", ""),
            ("3", "C", "Cid", ""),
        ])?;
        let pivot_index = index(&["A", "B", "C"]);
        let similarity = SimilarityMatrix::new(vec![
            vec![1.0, 0.300_000_01, 0.300_000_02],
            vec![0.300_000_01, 1.0, 0.5],
            vec![0.300_000_02, 0.5, 1.0],
        ])?;
        let recommender = Recommender {
            pivot_index: &pivot_index,
            similarity: &similarity,
            catalog: &catalog,
        };

        let scored = recommender.recommend_scored("A")?;
        let books: Vec<BookRecord> = scored.iter().map(|s| s.book.clone()).collect();
        assert_eq!(titles(&books), vec!["C", "B"]);
        assert!(scored[0].score > scored[1].score);
        Ok(())
    }

    #[test]
    fn recommend_orders_by_similarity() -> anyhow::Result<()> {
        let catalog = catalog(&[
            ("1", "A", "Ann", "http://img/a"),
            ("2", "B", "Bob", "http://img/b"),
            ("3", "C", "Cid", "http://img/c"),
            ("4", "D", "Dee", "http://img/d"),
        ])?;
        let pivot_index = index(&["A", "B", "C", "D"]);
        let similarity = SimilarityMatrix::new(vec![
            vec![1.0, 0.9, 0.2, 0.5],
            vec![0.9, 1.0, 0.1, 0.3],
            vec![0.2, 0.1, 1.0, 0.4],
            vec![0.5, 0.3, 0.4, 1.0],
        ])?;
        let recommender = Recommender {
            pivot_index: &pivot_index,
            similarity: &similarity,
            catalog: &catalog,
        };

        let scored = recommender.recommend_scored("A")?;
        let books: Vec<BookRecord> = scored.iter().map(|s| s.book.clone()).collect();
        assert_eq!(titles(&books), vec!["B", "D", "C"]);
        assert_eq!(books[0].author, "Bob");
        assert_eq!(books[0].image_url, "http://img/b");
        assert!(scored.windows(2).all(|w| w[0].score >= w[1].score));
        Ok(())
    }

    #[test]
    fn recommend_never_returns_selected_title() -> anyhow::Result<()> {
        let catalog = catalog(&[
            ("1", "A", "Ann", ""),
            ("2", "B", "Bob", ""),
            ("3", "C", "Cid", ""),
        ])?;
        let pivot_index = index(&["A", "B", "C"]);
        let similarity = SimilarityMatrix::new(vec![
            vec![1.0, 1.0, 1.0],
            vec![1.0, 1.0, 1.0],
            vec![1.0, 1.0, 1.0],
        ])?;
        let recommender = Recommender {
            pivot_index: &pivot_index,
            similarity: &similarity,
            catalog: &catalog,
        };

        for title in &pivot_index {
            let books = recommender.recommend(title)?;
            assert_eq!(books.len(), 2);
            assert!(books.iter().all(|b| &b.title != title));
        }
        Ok(())
    }

    #[test]
    fn recommend_unknown_title_is_not_found() -> anyhow::Result<()> {
        let catalog = catalog(&[("1", "A", "Ann", "")])?;
        let pivot_index = index(&["A"]);
        let similarity = SimilarityMatrix::new(vec![vec![1.0]])?;
        let recommender = Recommender {
            pivot_index: &pivot_index,
            similarity: &similarity,
            catalog: &catalog,
        };

        assert_eq!(
            recommender.recommend("Z"),
            Err(RecommendError::TitleNotFound("Z".to_owned()))
        );
        assert_eq!(recommender.recommend("A")?, Vec::new());
        Ok(())
    }

    #[test]
    fn recommend_collapses_duplicate_editions() -> anyhow::Result<()> {
        let catalog = catalog(&[
            ("1", "A", "Ann", "http://img/a"),
            ("2", "B", "Bob", "http://img/b-first"),
            ("3", "B", "Bob", "http://img/b-second"),
        ])?;
        assert_eq!(catalog.len(), 2);

        let pivot_index = index(&["A", "B"]);
        let similarity = SimilarityMatrix::new(vec![vec![1.0, 0.8], vec![0.8, 1.0]])?;
        let recommender = Recommender {
            pivot_index: &pivot_index,
            similarity: &similarity,
            catalog: &catalog,
        };

        let books = recommender.recommend("A")?;
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].image_url, "http://img/b-first");
        Ok(())
    }

    #[test]
    fn recommend_skips_titles_without_metadata() -> anyhow::Result<()> {
        let catalog = catalog(&[("1", "A", "Ann", ""), ("3", "C", "Cid", "")])?;
        let pivot_index = index(&["A", "B", "C"]);
        let similarity = SimilarityMatrix::new(vec![
            vec![1.0, 0.9, 0.5],
            vec![0.9, 1.0, 0.4],
            vec![0.5, 0.4, 1.0],
        ])?;
        let recommender = Recommender {
            pivot_index: &pivot_index,
            similarity: &similarity,
            catalog: &catalog,
        };

        assert_eq!(titles(&recommender.recommend("A")?), vec!["C"]);
        Ok(())
    }

    #[test]
    fn recommend_is_deterministic() -> anyhow::Result<()> {
        let catalog = catalog(&[
            ("1", "A", "Ann", ""),
            ("2", "B", "Bob", ""),
            ("3", "C", "Cid", ""),
            ("4", "D", "Dee", ""),
        ])?;
        let pivot_index = index(&["A", "B", "C", "D"]);
        let similarity = SimilarityMatrix::new(vec![
            vec![1.0, 0.5, 0.5, 0.5],
            vec![0.5, 1.0, 0.5, 0.5],
            vec![0.5, 0.5, 1.0, 0.5],
            vec![0.5, 0.5, 0.5, 1.0],
        ])?;
        let recommender = Recommender {
            pivot_index: &pivot_index,
            similarity: &similarity,
            catalog: &catalog,
        };

        let first = recommender.recommend("C")?;
        assert_eq!(titles(&first), vec!["A", "B", "D"]);
        for _ in 0..3 {
            assert_eq!(recommender.recommend("C")?, first);
        }
        Ok(())
    }
}
