//! Column detection for the metadata tables.
//!
//! The offline pipeline does not pin column names, so the title, author and
//! image columns are found by keyword once at startup and kept in a
//! [`ColumnConfig`].

use anyhow::Context as _;

use crate::formats::{BookRecord, Frame};

/// Book-Crossing image columns, tried in this order when no column name
/// contains "image".
pub const IMAGE_FALLBACK_COLUMNS: [&str; 3] = ["Image-URL-M", "Image-URL-L", "Image-URL-S"];

/// First column (in declaration order) whose name contains `keyword`,
/// ignoring ASCII and Unicode case. The `"image"` keyword falls back to
/// [`IMAGE_FALLBACK_COLUMNS`].
pub fn resolve<'a, S: AsRef<str>>(columns: &'a [S], keyword: &str) -> Option<&'a str> {
    let needle = keyword.to_lowercase();
    let names = || columns.iter().map(|col| -> &'a str { col.as_ref() });
    let found = names().find(|col| col.to_lowercase().contains(&needle));
    if found.is_some() {
        return found;
    }

    if needle != "image" {
        return None;
    }
    IMAGE_FALLBACK_COLUMNS
        .iter()
        .find_map(|fallback| names().find(|col| col == fallback))
}

/// A column picked by [`ColumnConfig::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub index: usize,
    pub name: String,
}

/// Resolved columns for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnConfig {
    pub title: Column,
    pub author: Column,
    /// `None` means the table carries no cover images.
    pub image: Option<Column>,
}

impl ColumnConfig {
    /// Title and author are required; a missing image column only degrades
    /// rendering.
    pub fn resolve(frame: &Frame) -> anyhow::Result<Self> {
        let column = |keyword: &str| {
            let name = resolve(&frame.columns, keyword)?;
            Some(Column {
                index: frame.column_position(name)?,
                name: name.to_owned(),
            })
        };

        let title = column("title")
            .with_context(|| format!("no title column among {:?}", frame.columns))?;
        let author = column("author")
            .with_context(|| format!("no author column among {:?}", frame.columns))?;
        let image = column("image");
        if image.is_none() {
            tracing::warn!(columns = ?frame.columns, "no image column; covers will be blank");
        }

        Ok(Self {
            title,
            author,
            image,
        })
    }

    /// Projects `row` to a [`BookRecord`]; a missing image column reads as "".
    pub fn record(&self, frame: &Frame, row: usize) -> BookRecord {
        BookRecord {
            title: frame.cell_text(row, self.title.index),
            author: frame.cell_text(row, self.author.index),
            image_url: self
                .image
                .as_ref()
                .map(|col| frame.cell_text(row, col.index))
                .unwrap_or_default(),
        }
    }

    pub fn names(&self) -> (&str, &str, Option<&str>) {
        (
            self.title.name.as_str(),
            self.author.name.as_str(),
            self.image.as_ref().map(|col| col.name.as_str()),
        )
    }
}
