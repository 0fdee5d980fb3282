use anyhow::Context as _;

use crate::cli::{self, RawArgs, RecommendArgs, TitlesArgs, TopArgs};
use crate::dashboard::Dashboard;
use crate::raw_data;

pub fn top(args: TopArgs) -> anyhow::Result<()> {
    let dashboard = Dashboard::load(cli::artifacts_dir(args.artifacts))?;
    let books = dashboard.top_n(args.n);

    let mut out = std::io::stdout().lock();
    if args.json {
        cli::write_json(&mut out, &books)
    } else {
        cli::write_books(&mut out, &books)
    }
}

pub fn titles(args: TitlesArgs) -> anyhow::Result<()> {
    use std::io::Write as _;

    let dashboard = Dashboard::load(cli::artifacts_dir(args.artifacts))?;
    let mut out = std::io::stdout().lock();
    for title in dashboard.titles() {
        writeln!(out, "{title}").context("write title")?;
    }
    Ok(())
}

pub fn recommend(args: RecommendArgs) -> anyhow::Result<()> {
    let dashboard = Dashboard::load(cli::artifacts_dir(args.artifacts))?;
    let scored = dashboard.recommend_scored(&args.title)?;
    tracing::debug!(title = %args.title, results = scored.len(), "recommended");

    let mut out = std::io::stdout().lock();
    if args.json {
        cli::write_json(&mut out, &scored)
    } else {
        let books: Vec<_> = scored.into_iter().map(|s| s.book).collect();
        cli::write_books(&mut out, &books)
    }
}

pub fn raw(args: RawArgs) -> anyhow::Result<()> {
    use std::io::Write as _;

    let data_dir = cli::data_dir(args.data);
    let mut table = raw_data::load_table(&data_dir, args.table)?;
    if let Some(limit) = args.limit {
        table.rows.truncate(limit);
    }

    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", table.columns.join("\t")).context("write raw header")?;
    for row in &table.rows {
        writeln!(out, "{}", row.join("\t")).context("write raw row")?;
    }
    Ok(())
}
