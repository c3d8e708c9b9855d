//! CLI entrypoint for math-debate
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use debate_application::{
    DebateConfig, DebateStatus, ReplayDebateUseCase, RunDebateInput, RunDebateUseCase,
};
use debate_domain::{OutputFormat, Problem};
use debate_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, OpenAiOracle, TranscriptStore,
};
use debate_presentation::{Cli, OutputFormatter, ProgressReporter, disable_color, formatter_for};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the diagnostic subscriber; the guard must live until exit
fn init_logging(verbose: u8, log_dir: Option<&std::path::Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(level));

    let Some(dir) = log_dir else {
        tracing_subscriber::registry().with(console).init();
        return None;
    };

    let appender = tracing_appender::rolling::daily(dir, "math-debate.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file = fmt::layer()
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(EnvFilter::new(level));

    tracing_subscriber::registry().with(console).with(file).init();
    Some(guard)
}

/// File configuration overlaid with command-line flags
fn debate_config(cli: &Cli, file_config: &FileConfig) -> DebateConfig {
    let mut config = file_config.to_debate_config();

    if let Some(agents) = cli.agents {
        config = config.with_agent_count(agents);
    }
    if !cli.strategy.is_empty() {
        // A bare strategy list sizes the pool
        if cli.agents.is_none() {
            config.agent_count = cli.strategy.len();
        }
        config = config.with_strategies(cli.strategy.clone());
    }
    if let Some(rounds) = cli.rounds {
        config = config.with_round_count(rounds);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    if let Some(kind) = cli.resolver {
        let resolver = config.resolver.with_kind(kind);
        config = config.with_resolver(resolver);
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    info!("Starting math-debate");

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    for issue in file_config.validate() {
        warn!("Config: {}", issue);
    }

    if !file_config.output.color {
        disable_color();
    }

    let config = debate_config(&cli, &file_config);
    let format = cli
        .output
        .or(file_config.output.output_format())
        .unwrap_or_default();
    let formatter = formatter_for(format);

    // Replay mode: resolve a saved transcript, no oracle calls
    if let Some(path) = &cli.replay {
        let saved = TranscriptStore::load(path)?;
        let outcome = ReplayDebateUseCase::new(config.resolver).execute(saved)?;
        if !outcome.matches_recorded() {
            warn!(
                "Replayed decision differs from recorded: {} via {} (recorded {} via {})",
                outcome.export.decision.answer,
                outcome.export.decision.method,
                outcome.recorded.answer,
                outcome.recorded.method
            );
        }

        println!("{}", formatter.format(&outcome.export, DebateStatus::Completed));
        if let Some(save) = &cli.save {
            TranscriptStore::save(save, &outcome.export)?;
        }
        return Ok(());
    }

    let problem = match &cli.problem {
        Some(text) => Problem::new(text.as_str())?,
        None => bail!("A problem is required. Use --replay <FILE> to re-resolve a saved debate."),
    };

    // === Dependency Injection ===
    let oracle = Arc::new(
        OpenAiOracle::from_config(&file_config.oracle).context("Failed to create oracle")?,
    );

    let cancellation = CancellationToken::new();
    let mut use_case = RunDebateUseCase::new(oracle).with_cancellation(cancellation.clone());

    if let Some(path) = &cli.conversation_log {
        let logger = JsonlConversationLogger::create(path)
            .with_context(|| format!("Failed to open conversation log {}", path.display()))?;
        info!("Writing debate events to {}", logger.path().display());
        use_case = use_case.with_conversation_logger(Arc::new(logger));
    }

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted; resolving over completed rounds");
            cancellation.cancel();
        }
    });

    let show_progress = !cli.quiet && format != OutputFormat::Json;
    if show_progress {
        eprintln!();
        eprintln!("Problem: {}", problem.text());
        eprintln!(
            "Agents: {} ({}), rounds: {}, resolver: {}",
            config.agent_count,
            config
                .strategy_assignment
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            config.round_count,
            config.resolver.kind
        );
        eprintln!();
    }

    let input = RunDebateInput::new(problem, config);
    let outcome = if show_progress {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    } else {
        use_case.execute(input).await?
    };

    println!("{}", formatter.format(&outcome.export, outcome.status));

    if let Some(path) = &cli.save {
        TranscriptStore::save(path, &outcome.export)?;
    }

    Ok(())
}
