use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    bookrec::logging::init(bookrec::logging::CLI_DEFAULT_FILTER).context("init logging")?;

    let cli = bookrec::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        bookrec::cli::Command::Top(args) => {
            bookrec::commands::top(args).context("top")?;
        }
        bookrec::cli::Command::Titles(args) => {
            bookrec::commands::titles(args).context("titles")?;
        }
        bookrec::cli::Command::Recommend(args) => {
            bookrec::commands::recommend(args).context("recommend")?;
        }
        bookrec::cli::Command::Raw(args) => {
            bookrec::commands::raw(args).context("raw")?;
        }
    }

    Ok(())
}
