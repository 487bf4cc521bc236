use std::path::PathBuf;

use eyre::Result;
use log::{debug, info, warn};

mod cli;

use cli::Cli;
use ytsum::oembed::OembedClient;
use ytsum::session::Pipeline;
use ytsum::summarize::{self, LlmClient, Summarizer};
use ytsum::youtube::CaptionClient;

const DEFAULT_BIND: &str = "127.0.0.1:8501";
const DEFAULT_LANG: &str = "en";

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytsum.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytsum")
        .join("logs")
}

fn build_after_help() -> String {
    let key_line = |var: &str| match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => format!("  \x1b[32m✅\x1b[0m {var}"),
        _ => format!("  \x1b[31m❌\x1b[0m {var} (not set)"),
    };

    let log_path = log_dir().join("ytsum.log");

    format!(
        "\nAPI KEYS (one is needed, matching the model):\n{}\n{}\n\nConfig is read from: {}\nLogs are written to: {}",
        key_line("OPENAI_API_KEY"),
        key_line("ANTHROPIC_API_KEY"),
        ytsum::config::config_path().display(),
        log_path.display()
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = ytsum::config::Config::load().unwrap_or_else(|e| {
        warn!("Ignoring config file: {e}");
        ytsum::config::Config::default()
    });

    // CLI flags take priority over config, config over built-in defaults
    let bind = cli.bind.or(config.bind).unwrap_or_else(|| DEFAULT_BIND.to_string());
    let model = cli
        .model
        .or(config.default_model)
        .unwrap_or_else(|| summarize::DEFAULT_MODEL.to_string());
    let lang = cli.lang.or(config.default_lang).unwrap_or_else(|| DEFAULT_LANG.to_string());
    let max_prompt_chars = cli
        .max_prompt_chars
        .or(config.max_prompt_chars)
        .unwrap_or(summarize::DEFAULT_MAX_PROMPT_CHARS);

    let api_key = summarize::api_key_from_env(&model);
    if api_key.is_none() {
        let var = summarize::api_key_var(&model);
        warn!("{var} not set; summaries will fail");
        eprintln!("Warning: {var} is not set, every summary request will fail");
    }

    debug!("Settings: bind={bind} model={model} lang={lang} max_prompt_chars={max_prompt_chars}");

    let client = reqwest::Client::new();
    let llm = LlmClient::new(client.clone(), model, api_key);
    if cli.verbose {
        eprintln!(
            "Model: {}\nCaption language: {lang}\nMax transcript chars: {max_prompt_chars}",
            llm.model()
        );
    }

    let pipeline = Pipeline::new(
        Box::new(OembedClient::new(client.clone())),
        Box::new(CaptionClient::new(client, lang)),
        Summarizer::new(Box::new(llm), max_prompt_chars),
    );

    ytsum::web::serve(&bind, pipeline).await
}
