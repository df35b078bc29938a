use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ApiArgs {
    /// JSON or YAML file with `api_url`, `timeout_ms` and a `retry` section.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Overrides TWENTY_API_URL.
    #[arg(long)]
    pub api_url: Option<String>,
    #[arg(long)]
    pub timeout_ms: Option<u64>,
    #[command(flatten)]
    pub retry: RetryArgs,
}

#[derive(Debug, Args, Clone, Default)]
pub struct RetryArgs {
    #[arg(long)]
    pub max_retries: Option<usize>,
    #[arg(long)]
    pub base_delay_ms: Option<u64>,
    #[arg(long)]
    pub max_delay_ms: Option<u64>,
    #[arg(long)]
    pub backoff_multiplier: Option<f64>,
}
