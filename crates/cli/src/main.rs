use anyhow::Context;
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bizpulse_core::pipeline::{self, BusinessInput};
use bizpulse_core::recommend::Thresholds;

#[derive(Debug, Parser)]
#[command(name = "bizpulse_cli")]
struct Args {
    /// Read the business record JSON from this file instead of stdin.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Print the full report (snapshots and metrics) instead of just the
    /// recommendations.
    #[arg(long)]
    full: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = bizpulse_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let raw = read_input(args.input.as_deref())?;
    let input: BusinessInput =
        serde_json::from_str(&raw).context("input is not valid business record JSON")?;

    let report = match pipeline::run_with(input, Thresholds::from_env()) {
        Ok(report) => report,
        Err(err) => {
            let err = anyhow::Error::new(err);
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "pipeline run failed");
            return Err(err);
        }
    };

    let rendered = if args.full {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string_pretty(&report.recommendations)?
    };
    println!("{rendered}");

    Ok(())
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("read input file {}", p.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read business record JSON from stdin")?;
            Ok(buf)
        }
    }
}

fn init_sentry(settings: &bizpulse_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
