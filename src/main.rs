use std::path::PathBuf;
use std::process::ExitCode;

use base64::Engine;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use emma_gateway::api::speech::SpeechResponse;
use emma_gateway::{ApiServerBuilder, Config, Intent, SpeechOutcome, build_responders};

/// EMMA - chat and text-to-speech gateway
#[derive(Parser)]
#[command(name = "emma", version, about)]
struct Cli {
    /// Config file (defaults to ~/.config/emma/config.toml when present)
    #[arg(short, long, env = "EMMA_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config and env)
    #[arg(long)]
    port: Option<u16>,

    /// Directory with a web UI to serve
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Send one chat message and print the JSON reply
    Ask {
        /// Message to send
        message: String,
        /// Extra context for the system prompt
        #[arg(long)]
        context: Option<String>,
    },
    /// Synthesize speech once
    Speak {
        /// Text to speak
        text: String,
        /// Voice identifier
        #[arg(long)]
        voice: Option<String>,
        /// Where to write the MP3 when the provider returns audio
        #[arg(short, long, default_value = "speech.mp3")]
        out: PathBuf,
    },
    /// List fallback intents and their keywords in priority order
    Intents,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,emma_gateway=info",
        1 => "info,emma_gateway=debug",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.static_dir.is_some() {
        config.server.static_dir = cli.static_dir;
    }
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Some(Command::Ask { message, context }) => ask(&config, &message, context.as_deref()).await,
        Some(Command::Speak { text, voice, out }) => speak(&config, &text, voice.as_deref(), out).await,
        Some(Command::Intents) => {
            list_intents();
            Ok(())
        }
        None => {
            tracing::info!(
                mode = config.mode(),
                port = config.server.port,
                "starting EMMA gateway"
            );
            ApiServerBuilder::from_config(&config)?.build().run().await?;
            Ok(())
        }
    }
}

/// Run the chat responder once
async fn ask(config: &Config, message: &str, context: Option<&str>) -> anyhow::Result<()> {
    anyhow::ensure!(!message.is_empty(), "message is required");

    let (chat, _) = build_responders(config)?;
    let outcome = chat.respond(message, context).await;

    let json = serde_json::json!({
        "mode": outcome.mode(),
        "response": outcome.response(),
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Run the speech responder once, saving audio to `out`
async fn speak(
    config: &Config,
    text: &str,
    voice: Option<&str>,
    out: PathBuf,
) -> anyhow::Result<()> {
    anyhow::ensure!(!text.is_empty(), "text is required");

    let (_, speech) = build_responders(config)?;
    let outcome = speech.respond(text, voice).await;

    if let SpeechOutcome::Audio { audio, .. } = &outcome {
        let bytes = base64::engine::general_purpose::STANDARD.decode(audio)?;
        tokio::fs::write(&out, &bytes).await?;
        println!("wrote {} bytes to {}", bytes.len(), out.display());
        return Ok(());
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&SpeechResponse::from(outcome))?
    );
    Ok(())
}

fn list_intents() {
    for (rank, intent) in Intent::ALL.iter().enumerate() {
        let keywords = intent.keywords();
        if keywords.is_empty() {
            println!("{}. {} (default)", rank + 1, intent.label());
        } else {
            println!("{}. {}: {}", rank + 1, intent.label(), keywords.join(", "));
        }
    }
}
