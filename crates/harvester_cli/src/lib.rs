//! Command-line entry point: resolve one entity kind's listing, harvest it and
//! print the records as JSON.
//!
//! The payload goes to stdout (or `--output`); every diagnostic goes through
//! the logger to stderr.

use std::io::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use engine_logging::{engine_info, engine_warn};
use harvester_core::EntityKind;
use harvester_engine::{
    emit_with, write_atomically, ConfigError, EmitFormat, HarvestEngine, HarvestOutcome,
    HarvestSettings, OrderPolicy, SiteRoot,
};
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "harvest", version, about = "Harvest game entity records as a JSON array")]
pub struct Cli {
    /// Entity kind: active, passive, support, activation-medium or hero.
    pub kind: EntityKind,

    /// Maximum number of detail pages fetched at once.
    #[arg(short, long)]
    pub concurrency: Option<NonZeroUsize>,

    /// Site root that reference ids are appended to.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Total timeout per request, in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Wall-clock budget for the whole harvest, in seconds.
    #[arg(long)]
    pub budget_secs: Option<u64>,

    /// Keep records in listing order instead of completion order.
    #[arg(long)]
    pub ordered: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Write the collection to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// RON settings file; command-line flags take precedence.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Exit with an error when the listing page cannot be fetched.
    #[arg(long)]
    pub require_index: bool,

    /// More diagnostics (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Warn;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Defaults, then the config file, then flags.
    pub fn settings(&self) -> Result<HarvestSettings, ConfigError> {
        let mut settings = match &self.config {
            Some(path) => HarvestSettings::load(path)?,
            None => HarvestSettings::default(),
        };
        if let Some(limit) = self.concurrency {
            settings.concurrency_limit = limit.get();
        }
        if let Some(raw) = &self.base_url {
            settings.site = SiteRoot::parse(raw)?;
        }
        if let Some(secs) = self.timeout_secs {
            settings.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.budget_secs {
            settings.harvest_budget = Some(Duration::from_secs(secs));
        }
        if self.ordered {
            settings.order = OrderPolicy::Input;
        }
        Ok(settings)
    }

    fn format(&self) -> EmitFormat {
        if self.pretty {
            EmitFormat::Pretty
        } else {
            EmitFormat::Compact
        }
    }
}

/// Runs one harvest and writes the collection to `--output` or `stdout`.
///
/// Per-item failures only show up in the returned counts and the log.
pub async fn run(cli: &Cli, stdout: &mut dyn Write) -> anyhow::Result<HarvestOutcome> {
    let settings = cli.settings().context("invalid configuration")?;
    let engine = HarvestEngine::new(&settings).context("failed to start the harvester")?;

    let index = cli.kind.index_spec();
    let parser = Arc::new(cli.kind.parser());
    let outcome = if cli.require_index {
        engine
            .run_strict(&index, parser)
            .await
            .with_context(|| format!("no {} listing", cli.kind))?
    } else {
        engine.run(&index, parser).await
    };

    let payload = emit_with(&outcome, cli.format())?;
    match &cli.output {
        Some(path) => {
            write_atomically(path, &payload)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            stdout.write_all(&payload).context("failed to write to stdout")?;
            stdout.write_all(b"\n").context("failed to write to stdout")?;
            stdout.flush().context("failed to write to stdout")?;
        }
    }

    if outcome.failed() > 0 {
        engine_warn!("{} of {} {} items failed", outcome.failed(), outcome.attempted(), cli.kind);
    }
    engine_info!(
        "harvested {}/{} {}",
        outcome.succeeded(),
        outcome.attempted(),
        cli.kind
    );
    Ok(outcome)
}
