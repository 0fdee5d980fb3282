/// Errors a caller of the recommendation engine is expected to handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecommendError {
    #[error("title not found in pivot index: {0:?}")]
    TitleNotFound(String),
}
