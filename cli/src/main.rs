//! CLI entrypoint for ai-debate
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use debate_application::{
    AvailabilityRegistry, DebateParams, ProgressNotifier, RunDebateInput, RunDebateUseCase,
    SetupDebateInput, SetupDebateUseCase, TranscriptSink,
};
use debate_domain::OutputFormat;
use debate_infrastructure::{
    CliBackendRegistry, CliLlmGateway, ConfigLoader, DebateFile, FileConfig, JsonlEventLog,
    MarkdownTranscriptWriter,
};
use debate_presentation::{
    BackendChoice, Cli, ConsoleFormatter, InteractiveSetup, OutputFormatter, ProgressReporter,
    SetupDefaults, SimpleProgress,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli)?;

    info!("Starting ai-debate");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    let problems = config.validate();
    if !problems.is_empty() {
        let list: Vec<_> = problems.iter().map(|p| format!("  - {}", p)).collect();
        bail!("Invalid configuration:\n{}", list.join("\n"));
    }

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let catalog = config.backends.catalog();
    let registry = CliBackendRegistry::initialize(
        catalog.clone(),
        &config.backends.cache_file,
        &config.backends.probe_settings(),
        cli.refresh_backends,
    )
    .await?;
    let gateway = Arc::new(CliLlmGateway::new(catalog, config.backends.timeout()));

    let synthesizer = config.debate.parse_synthesizer().ok().flatten();
    let input = setup_input(&cli, &config, &registry)?.with_synthesizer(synthesizer.clone());
    let setup = SetupDebateUseCase::new(Arc::clone(&gateway));
    let debate_config = setup.execute(input, &registry).await?;
    let slug = setup.topic_slug(&debate_config).await;

    let params = DebateParams::default()
        .with_turn_delay(config.backends.turn_delay())
        .with_dissenters_first(cli.dissenters_first || config.debate.dissenters_first)
        .with_conclusion_char_limit(config.debate.conclusion_char_limit)
        .with_synthesizer(synthesizer);

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| config.debate.output_dir.clone());
    let writer = Arc::new(MarkdownTranscriptWriter::new(output_dir).with_display_names(&registry));

    let mut use_case = RunDebateUseCase::new(gateway).with_transcript_sink(writer.clone());
    if let Some(path) = &cli.event_log {
        match JsonlEventLog::open(path) {
            Ok(log) => use_case = use_case.with_conversation_logger(Arc::new(log)),
            Err(e) => warn!("Event log {} disabled: {}", path.display(), e),
        }
    }

    if !cli.quiet {
        print_header(&debate_config, &registry);
    }

    let input = RunDebateInput::new(debate_config, slug).with_params(params);
    let result = if cli.quiet {
        use_case.execute(input).await
    } else if cli.plain {
        use_case.execute_with_progress(input, &SimpleProgress).await
    } else {
        let progress: &dyn ProgressNotifier = &ProgressReporter::new();
        use_case.execute_with_progress(input, progress).await
    };

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("\nDebate aborted: {}", e);
            if let Some(backend) = e.backend() {
                eprintln!("Failing backend: {}", registry.display_name(backend));
            }
            for path in writer.written_files() {
                eprintln!("Partial transcript: {}", path.display());
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();
    println!("{}", ConsoleFormatter.render(&outcome, format));

    if format != OutputFormat::Json {
        for path in writer.written_files() {
            println!("Saved: {}", path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Stderr logging by verbosity, plus an optional non-blocking log file
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Debate file when given, otherwise the interactive dialogue
fn setup_input(
    cli: &Cli,
    config: &FileConfig,
    registry: &CliBackendRegistry,
) -> Result<SetupDebateInput> {
    let mut input = match &cli.debate {
        Some(path) => DebateFile::load(path)?.into_setup_input(&config.debate)?,
        None => {
            let defaults = SetupDefaults {
                char_limit: cli.char_limit.unwrap_or(config.debate.char_limit),
                max_rounds: cli.max_rounds.unwrap_or(config.debate.max_rounds),
                participants: config.debate.participants,
            };
            let ask_limits = cli.char_limit.is_none() && cli.max_rounds.is_none();
            let choices: Vec<_> = registry
                .available_specs()
                .into_iter()
                .map(|spec| BackendChoice {
                    id: spec.id.clone(),
                    display_name: spec.display_name.clone(),
                })
                .collect();
            InteractiveSetup::stdio()
                .collect(cli.topic.clone(), cli.participants, defaults, ask_limits, &choices)
                .context("Interactive setup failed")?
        }
    };

    if cli.debate.is_some() {
        if let Some(topic) = &cli.topic {
            input.topic = topic.clone();
        }
        if let Some(limit) = cli.char_limit {
            input.char_limit = limit;
        }
        if let Some(rounds) = cli.max_rounds {
            input.max_rounds = rounds;
        }
    }
    Ok(input)
}

fn print_header(config: &debate_domain::DebateConfig, registry: &CliBackendRegistry) {
    println!();
    println!("+============================================================+");
    println!("|                     AI Debate                              |");
    println!("+============================================================+");
    println!();
    println!("Topic: {}", config.topic().content());
    for p in config.participants() {
        println!(
            "  {} {} ({}): {}",
            p.marker(),
            p.title,
            registry.display_name(&p.backend),
            p.position
        );
    }
    println!(
        "Limit: {} chars per statement, up to {} rounds",
        config.char_limit(),
        config.max_rounds()
    );
    println!();
}
