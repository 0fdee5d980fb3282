use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use crate::formats::BookRecord;
use crate::raw_data::RawTableKind;

/// Overrides the default artifacts directory.
pub const ARTIFACTS_DIR_ENV: &str = "BOOKREC_ARTIFACTS_DIR";
/// Overrides the default raw CSV directory.
pub const DATA_DIR_ENV: &str = "BOOKREC_DATA_DIR";

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the precomputed popularity ranking.
    Top(TopArgs),
    /// Print every selectable title.
    Titles(TitlesArgs),
    /// Print the titles most similar to one title.
    Recommend(RecommendArgs),
    /// Print one of the raw CSV datasets.
    Raw(RawArgs),
}

#[derive(Debug, Args)]
pub struct TopArgs {
    /// Artifacts directory (default: $BOOKREC_ARTIFACTS_DIR or `artifacts`).
    #[arg(long)]
    pub artifacts: Option<PathBuf>,

    /// Number of books to print.
    #[arg(long, default_value_t = crate::popular::TOP_N)]
    pub n: usize,

    /// Print a JSON array instead of tab-separated lines.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct TitlesArgs {
    /// Artifacts directory (default: $BOOKREC_ARTIFACTS_DIR or `artifacts`).
    #[arg(long)]
    pub artifacts: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RecommendArgs {
    /// Selected title; must appear in the pivot index.
    #[arg(long)]
    pub title: String,

    /// Artifacts directory (default: $BOOKREC_ARTIFACTS_DIR or `artifacts`).
    #[arg(long)]
    pub artifacts: Option<PathBuf>,

    /// Print a JSON array (with scores) instead of tab-separated lines.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct RawArgs {
    #[arg(long, value_enum)]
    pub table: RawTableKind,

    /// Directory holding Books.csv, Ratings.csv and Users.csv
    /// (default: $BOOKREC_DATA_DIR or `data`).
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Print at most this many rows.
    #[arg(long)]
    pub limit: Option<usize>,
}

pub fn artifacts_dir(arg: Option<PathBuf>) -> PathBuf {
    dir_from_arg_or_env(arg, ARTIFACTS_DIR_ENV, "artifacts")
}

pub fn data_dir(arg: Option<PathBuf>) -> PathBuf {
    dir_from_arg_or_env(arg, DATA_DIR_ENV, "data")
}

fn dir_from_arg_or_env(arg: Option<PathBuf>, var: &str, default: &str) -> PathBuf {
    arg.or_else(|| {
        std::env::var(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
    .unwrap_or_else(|| PathBuf::from(default))
}

/// One `title\tauthor\timage` line per book.
pub fn write_books(out: &mut impl std::io::Write, books: &[BookRecord]) -> anyhow::Result<()> {
    for book in books {
        writeln!(out, "{}\t{}\t{}", book.title, book.author, book.image_url)
            .context("write book line")?;
    }
    Ok(())
}

pub fn write_json(
    out: &mut impl std::io::Write,
    value: &impl serde::Serialize,
) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("serialize json output")?;
    out.write_all(b"\n").context("write json newline")?;
    Ok(())
}
