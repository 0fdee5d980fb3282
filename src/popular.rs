use crate::columns::ColumnConfig;
use crate::formats::{BookRecord, Frame};

/// Size of the popularity view shown on the dashboard.
pub const TOP_N: usize = 50;

/// First `n` rows of the popularity table, in stored order. The table is
/// ranked offline, so no sorting happens here.
pub fn top_n(popular: &Frame, columns: &ColumnConfig, n: usize) -> Vec<BookRecord> {
    (0..popular.len().min(n))
        .map(|row| columns.record(popular, row))
        .collect()
}
