// ABOUTME: Entry point for the dockrun CLI application.
// ABOUTME: Parses arguments, loads configuration and dispatches to the client.

mod cli;

use clap::Parser;
use cli::{Cli, Commands, RunArgs};
use dockrun::config::{Config, ConnectionOverrides, RunSection};
use dockrun::error::{Error, Result};
use dockrun::lifecycle::RunRequest;
use dockrun::output::{Output, OutputMode};
use dockrun::DockerClient;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbose flag
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut output = Output::new(mode);
    output.start_timer();

    if let Err(e) = run(cli, &output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    let overrides = ConnectionOverrides {
        url: cli.url,
        username: cli.username,
        password: cli.password,
        email: cli.email,
    };
    let client = DockerClient::create(config.connection_config(&overrides)?)?;

    match cli.command {
        Commands::Build { context, tag } => {
            let section = config.build.as_ref();
            let context = context
                .or_else(|| section.map(|b| b.context.clone()))
                .unwrap_or_else(|| PathBuf::from("."));
            let tag = tag
                .or_else(|| section.map(|b| b.tag.clone()))
                .ok_or_else(|| {
                    Error::InvalidArgument("no tag given and no build.tag configured".to_string())
                })?;

            output.progress(&format!("Building {} from {}", tag, context.display()));
            let mut relay = output.relay();
            client.build_image(&context, &tag, &mut *relay).await?;
            output.success("Done");
            Ok(())
        }
        Commands::Push { tag } => {
            output.progress(&format!("Pushing {tag}"));
            let mut relay = output.relay();
            client.push_image(&tag, &mut *relay).await?;
            output.success("Done");
            Ok(())
        }
        Commands::Run(args) => {
            let request = merge_run(config.run.as_ref(), args)?;
            let outcome = client.run(&request).await?;
            output.outcome(&outcome);
            Ok(())
        }
    }
}

/// Explicit `--config`, else a config file in the working directory, else defaults.
fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load(path);
    }

    let cwd = env::current_dir()?;
    match Config::find(&cwd) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using config file");
            Config::load(&path)
        }
        None => Ok(Config::default()),
    }
}

/// Command-line flags on top of the config's run section.
///
/// Scalars replace, map entries win per key, lists append.
fn merge_run(section: Option<&RunSection>, args: RunArgs) -> Result<RunRequest> {
    let mut request = match section {
        Some(section) => section.to_request()?,
        None => RunRequest::default(),
    };

    if let Some(image) = args.image {
        request.image = image;
    }
    if args.name.is_some() {
        request.name = args.name;
    }
    if args.hostname.is_some() {
        request.hostname = args.hostname;
    }
    request.detached |= args.detach;
    request.auto_remove |= args.rm;

    request.env.extend(args.env);
    request.ports.extend(args.publish);
    request.volumes.extend(args.volume);
    request.volumes_from.extend(args.volumes_from);
    request.links.extend(args.link);
    request.dns.extend(args.dns);
    request.dns_search.extend(args.dns_search);

    Ok(request)
}
