use clap::Parser;

#[derive(Parser)]
#[command(
    name = "ytsum",
    about = "Summarize YouTube videos from their transcripts in a local web page",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Address to serve the web page on [default: 127.0.0.1:8501]
    #[arg(short, long)]
    pub bind: Option<String>,

    /// LLM model for summarization [default: gpt-3.5-turbo-16k]
    #[arg(short, long)]
    pub model: Option<String>,

    /// Preferred caption language [default: en]
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Reject transcripts longer than this many characters (0 disables)
    #[arg(long)]
    pub max_prompt_chars: Option<usize>,

    /// Show resolved settings on startup
    #[arg(short, long)]
    pub verbose: bool,
}
