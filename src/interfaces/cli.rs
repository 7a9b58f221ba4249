use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "translate-gateway")]
#[command(about = "HTTP gateway that translates text through pluggable LLM backends.")]
#[command(version)]
pub struct Cli {
    /// Path to the config file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Port to listen on (overrides config and PORT)
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Serve the hello/world webhook instead of the translator
    #[arg(long)]
    pub webhook: bool,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,
}
