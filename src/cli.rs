// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines the build, push and run subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dockrun")]
#[command(about = "Build, push and run containers against a Docker daemon")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print only the final result
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Emit JSON lines instead of text
    #[arg(long)]
    pub json: bool,

    /// Configuration file (defaults to dockrun.yml in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Daemon endpoint (unix://, tcp:// or http://)
    #[arg(long, env = "DOCKRUN_URL")]
    pub url: Option<String>,

    /// Registry username
    #[arg(long)]
    pub username: Option<String>,

    /// Registry password
    #[arg(long, env = "DOCKRUN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Registry email
    #[arg(long)]
    pub email: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an image from a directory
    Build {
        /// Build context (defaults to the config's build.context)
        context: Option<PathBuf>,

        /// Tag for the built image
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Push a tagged image to its registry
    Push {
        /// Image tag to push
        tag: String,
    },

    /// Create and start a container
    Run(RunArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Image tag (defaults to the config's run.image)
    pub image: Option<String>,

    /// Container name
    #[arg(long)]
    pub name: Option<String>,

    /// Container host name
    #[arg(long)]
    pub hostname: Option<String>,

    /// Return the container handle without waiting
    #[arg(short, long)]
    pub detach: bool,

    /// Remove the container after it exits
    #[arg(long)]
    pub rm: bool,

    /// Environment variable
    #[arg(short, long = "env", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub env: Vec<(String, String)>,

    /// Publish a container port (`80:8080`, `53/udp:127.0.0.1:53`)
    #[arg(short, long = "publish", value_name = "PORT:BINDING", value_parser = parse_pair)]
    pub publish: Vec<(String, String)>,

    /// Bind mount a host path
    #[arg(short, long = "volume", value_name = "HOST:CONTAINER", value_parser = parse_pair)]
    pub volume: Vec<(String, String)>,

    /// Mount volumes from another container
    #[arg(long, value_name = "CONTAINER")]
    pub volumes_from: Vec<String>,

    /// Link another container (`name` or `name:alias`)
    #[arg(long)]
    pub link: Vec<String>,

    /// DNS server
    #[arg(long)]
    pub dns: Vec<String>,

    /// DNS search domain
    #[arg(long)]
    pub dns_search: Vec<String>,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {s:?}"))
}

/// Split on the first colon; the right side may contain more.
fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once(':')
        .filter(|(left, right)| !left.is_empty() && !right.is_empty())
        .map(|(left, right)| (left.to_string(), right.to_string()))
        .ok_or_else(|| format!("expected two parts separated by ':', got {s:?}"))
}
