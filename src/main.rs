use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use intake::{
    channel_from_config, Clock, FormEngine, FormKind, FormSession, HtmlDirectoryExporter,
    IntakeConfig, LoggingConfig, ManualClock, SystemClock, WorkingInput,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "intake", version, about = "Validate, fingerprint and dispatch intake forms")]
struct Cli {
    /// YAML configuration file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit a filled form read from a JSON file.
    Submit {
        #[arg(long)]
        form: FormKind,

        #[arg(long)]
        input: PathBuf,

        /// How long the form is treated as having been open.
        #[arg(long, default_value_t = 60)]
        interaction_secs: u64,
    },
    /// Export the blank printable template.
    Blank {
        #[arg(long)]
        form: FormKind,
    },
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => IntakeConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => IntakeConfig::default(),
    };
    init_tracing(&config.logging);

    let channel = channel_from_config(&config.notify)?;
    let exporter = Arc::new(HtmlDirectoryExporter::new(config.render.output_dir.clone()));

    match cli.command {
        Command::Submit {
            form,
            input,
            interaction_secs,
        } => {
            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let working: WorkingInput = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", input.display()))?;

            // The form was filled offline, so interaction time is asserted
            // rather than measured.
            let clock = Arc::new(ManualClock::new(SystemClock.now()));
            let session = FormSession::new(FormEngine::new(form, &config)?, channel)
                .with_clock(clock.clone())
                .with_exporter(exporter);
            session.load(working)?;
            clock.advance(Duration::from_secs(interaction_secs));

            let outcome = session.submit().await;
            session.wait_for_export().await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            if !outcome.is_success() {
                std::process::exit(1);
            }
        }
        Command::Blank { form } => {
            let session = FormSession::new(FormEngine::new(form, &config)?, channel)
                .with_exporter(exporter);
            let location = session.export_blank().await?;
            println!("{location}");
        }
    }
    Ok(())
}
