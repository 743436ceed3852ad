// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use release_prune::utils::logging::{format_error, format_info, format_success, format_warning};
use release_prune::{BulkRunner, Config, RepositoryRef};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "release_prune")]
#[command(version = "0.1.0")]
#[command(about = "Remove 'release.branches' from package.json across GitHub repositories", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct TargetArgs {
    /// Repository targets as owner/name
    targets: Vec<String>,

    /// File with one owner/name target per line
    #[arg(long, value_name = "FILE")]
    target_file: Option<PathBuf>,

    /// GitHub token used for API calls
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long, value_name = "NUM")]
    workers: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prune targets and commit the changes back
    Run {
        #[command(flatten)]
        target_args: TargetArgs,

        /// Read and prune but never write
        #[arg(long)]
        dry_run: bool,
    },

    /// Report what would change without committing anything
    Check {
        #[command(flatten)]
        target_args: TargetArgs,
    },

    /// Print the effective configuration
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    release_prune::utils::logging::init_logger(cli.color, cli.verbose);

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Run {
            target_args,
            dry_run,
        } => {
            cmd_run(config, target_args, dry_run, cli.color).await?;
        }
        Commands::Check { target_args } => {
            cmd_run(config, target_args, true, cli.color).await?;
        }
        Commands::ShowConfig => {
            cmd_show_config(&config)?;
        }
    }

    Ok(())
}

async fn cmd_run(
    mut config: Config,
    target_args: TargetArgs,
    dry_run: bool,
    colored: bool,
) -> Result<()> {
    if let Some(token) = target_args.token {
        config.github.token = Some(token);
    }
    if let Some(workers) = target_args.workers {
        config.run.parallel_workers = workers;
    }
    config.run.dry_run = dry_run || config.run.dry_run;

    let targets = collect_targets(&target_args.targets, target_args.target_file.as_deref())?;

    if targets.is_empty() {
        bail!("No repository targets given (pass owner/name arguments or --target-file)");
    }

    if config.github.token.is_none() {
        warn!("No GitHub token configured, unauthenticated requests are heavily rate limited");
    }

    if config.run.dry_run {
        println!("{}", format_info("Dry run: no commits will be created"));
    }

    info!(
        "Pruning '{}' across {} repositories ({} workers)",
        config.run.file_path,
        targets.len(),
        config.run.parallel_workers
    );

    let runner = BulkRunner::new(config, colored);
    let (stats, reports) = runner.run(targets).await;

    println!();
    for report in &reports {
        match &report.result {
            Ok(outcome) if outcome.is_updated() => {
                println!(
                    "{}",
                    format_success(&format!("{}: {}", report.repository.full_name(), outcome))
                );
            }
            Ok(outcome) => {
                println!(
                    "{}",
                    format_info(&format!("{}: {}", report.repository.full_name(), outcome))
                );
            }
            Err(e) => {
                println!(
                    "{}",
                    format_error(&format!("{}: {}", report.repository.full_name(), e))
                );
            }
        }
    }

    println!();
    println!(
        "{}",
        format_info(&format!(
            "{} updated, {} skipped, {} failed in {}s",
            stats.repos_updated, stats.repos_skipped, stats.repos_failed, stats.duration_secs
        ))
    );

    if stats.repos_failed > 0 {
        println!(
            "{}",
            format_warning(&format!("Success rate: {:.1}%", stats.success_rate()))
        );
        bail!("{} repositories failed", stats.repos_failed);
    }

    Ok(())
}

fn cmd_show_config(config: &Config) -> Result<()> {
    let mut redacted = config.clone();
    if redacted.github.token.is_some() {
        redacted.github.token = Some("***".to_string());
    }

    println!("{}", serde_json::to_string_pretty(&redacted)?);
    Ok(())
}

fn collect_targets(args: &[String], target_file: Option<&std::path::Path>) -> Result<Vec<RepositoryRef>> {
    let mut raw: Vec<String> = args.to_vec();

    if let Some(path) = target_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read target file {}", path.display()))?;

        raw.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string),
        );
    }

    raw.iter()
        .map(|target| RepositoryRef::parse(target).map_err(Into::into))
        .collect()
}
