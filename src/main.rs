use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::{info, warn};
use simplelog::{ConfigBuilder, WriteLogger};

use medchat::core::action::Effect;
use medchat::core::config::{CliOverrides, MedchatConfig, ResolvedConfig, load_config, resolve};
use medchat::core::exchange::exchange;
use medchat::core::state::App;
use medchat::transport::HttpTransport;
use medchat::tui;

#[derive(Parser)]
#[command(
    name = "medchat",
    version,
    about = "Terminal client for the Red Spider medical assistant"
)]
struct Args {
    /// Backend base URL (overrides the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Config file to use instead of ~/.medchat/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Ask one question without the terminal UI
    Ask {
        #[arg(required = true)]
        question: Vec<String>,
    },
    /// Check questions for emergency symptoms
    Check {
        #[arg(required = true)]
        questions: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let (file_config, config_error) = match load_config(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (MedchatConfig::default(), Some(e)),
    };
    let config = resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
        },
    );

    // The TUI owns the terminal, so logs go to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }
    if let Some(e) = config_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!("medchat starting up with backend {}", config.base_url);

    match args.command {
        None => tui::run(config),
        Some(Command::Ask { question }) => ask(config, &question.join(" ")).await,
        Some(Command::Check { questions }) => check(config, &questions).await,
    }
}

fn transport(config: &ResolvedConfig) -> std::io::Result<HttpTransport> {
    HttpTransport::new(config.base_url.clone(), config.timeouts).map_err(std::io::Error::other)
}

async fn ask(config: ResolvedConfig, question: &str) -> std::io::Result<()> {
    let mut app = App::new(Arc::new(transport(&config)?), config.base_url.clone());

    let effect = exchange(&mut app, question).await;
    if let Effect::Prompt(text) = effect {
        eprintln!("{text}");
        return Ok(());
    }

    for message in app.conversation.snapshot() {
        println!("[{}] {}", message.template().label(), message.text);
    }
    if let Some(alert) = &app.alert {
        eprintln!("!! {alert}");
    }
    Ok(())
}

async fn check(config: ResolvedConfig, questions: &[String]) -> std::io::Result<()> {
    let response = transport(&config)?
        .batch_check_emergency(questions)
        .await
        .map_err(std::io::Error::other)?;

    for result in response.results {
        let verdict = if result.is_emergency { "EMERGENCY" } else { "ok" };
        if result.matched_keywords.is_empty() {
            println!("{verdict:<9} {}", result.question);
        } else {
            println!(
                "{verdict:<9} {} (matched: {})",
                result.question,
                result.matched_keywords.join(", ")
            );
        }
    }
    Ok(())
}
