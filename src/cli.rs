use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kube-copilot")]
#[command(about = "Drive a Kubernetes cluster with natural language queries")]
#[command(
    long_about = "Start an interactive window where you can input the queries.\nType [exit|quit|q|bye] and press \"Enter\" to exit."
)]
pub struct Cli {
    /// Path to the kubeconfig file (defaults to KUBECONFIG or ~/.kube/config)
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Context
    #[arg(long)]
    pub context: Option<String>,

    /// Chat completion model identifier
    #[arg(short, long, default_value = "gpt-4o-mini")]
    pub model: String,

    /// Timeout in seconds for each model or cluster call
    #[arg(long, default_value_t = 120)]
    pub timeout: u64,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
