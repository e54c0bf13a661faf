//! Command execution
//!
//! Inputs are read concurrently; parsing runs on the blocking pool since
//! large captures are pure CPU work. One shared `Reporter` serves all tasks.

use crate::cli::{Cli, Commands};
use crate::errors::{EXIT_CRASH_FOUND, EXIT_SUCCESS};
use crate::output::{self, FileReport};
use anyhow::{anyhow, Context, Result};
use crashscan_common::{Reporter, ScanConfig, TargetRegistry};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::task::JoinSet;
use tracing::{debug, info};

/// Load config, apply CLI overrides, and build the reporter
pub fn build_reporter(
    registry: &TargetRegistry,
    config_path: Option<&Path>,
    target: Option<&str>,
) -> Result<Reporter> {
    let mut config = ScanConfig::load(config_path).context("Failed to load configuration")?;
    if let Some(target) = target {
        config.target = target.to_string();
    }
    let reporter = Reporter::from_config(registry, &config)
        .with_context(|| format!("Failed to configure target '{}'", config.target))?;
    Ok(reporter)
}

/// Read a capture from disk, or stdin for "-"
pub async fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut buf)
            .await
            .context("Failed to read stdin")?;
        return Ok(buf);
    }

    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Analyze every file concurrently, returning reports in input order
pub async fn scan_files(reporter: Arc<Reporter>, files: &[PathBuf]) -> Result<Vec<FileReport>> {
    let mut join_set = JoinSet::new();

    for (index, path) in files.iter().cloned().enumerate() {
        let reporter = reporter.clone();
        join_set.spawn(async move {
            let output = read_input(&path).await?;
            debug!(file = %path.display(), bytes = output.len(), "read capture");
            let report = tokio::task::spawn_blocking(move || reporter.parse(&output))
                .await
                .context("Parser task failed")?;
            Ok::<_, anyhow::Error>((index, FileReport {
                file: path.display().to_string(),
                report,
            }))
        });
    }

    let mut results = Vec::with_capacity(files.len());
    while let Some(joined) = join_set.join_next().await {
        results.push(joined.map_err(|e| anyhow!("Scan task panicked: {}", e))??);
    }
    results.sort_by_key(|(index, _)| *index);
    Ok(results.into_iter().map(|(_, report)| report).collect())
}

/// Run only the cheap detector on every file
pub async fn detect_files(reporter: Arc<Reporter>, files: &[PathBuf]) -> Result<Vec<(String, bool)>> {
    let mut join_set = JoinSet::new();

    for (index, path) in files.iter().cloned().enumerate() {
        let reporter = reporter.clone();
        join_set.spawn(async move {
            let output = read_input(&path).await?;
            let crashed = tokio::task::spawn_blocking(move || reporter.contains_crash(&output))
                .await
                .context("Detector task failed")?;
            Ok::<_, anyhow::Error>((index, path.display().to_string(), crashed))
        });
    }

    let mut results = Vec::with_capacity(files.len());
    while let Some(joined) = join_set.join_next().await {
        results.push(joined.map_err(|e| anyhow!("Detect task panicked: {}", e))??);
    }
    results.sort_by_key(|(index, _, _)| *index);
    Ok(results
        .into_iter()
        .map(|(_, file, crashed)| (file, crashed))
        .collect())
}

/// Execute the parsed command line, returning the process exit code
pub async fn run(cli: Cli) -> Result<i32> {
    let registry = TargetRegistry::with_builtin()?;

    match cli.command {
        Commands::Targets => {
            for name in registry.names() {
                println!("{}", name);
            }
            Ok(EXIT_SUCCESS)
        }

        Commands::Scan { files, json } => {
            let reporter = Arc::new(build_reporter(
                &registry,
                cli.config.as_deref(),
                cli.target.as_deref(),
            )?);
            let reports = scan_files(reporter, &files).await?;
            let color = !json && std::io::stdout().is_terminal();

            for file_report in &reports {
                if json {
                    println!("{}", output::render_json(file_report)?);
                } else {
                    print!("{}", output::render_text(file_report, color));
                }
            }

            let crashed = reports.iter().filter(|r| r.report.has_crash()).count();
            info!(files = reports.len(), crashed, "scan complete");
            Ok(if crashed > 0 { EXIT_CRASH_FOUND } else { EXIT_SUCCESS })
        }

        Commands::Detect { files } => {
            let reporter = Arc::new(build_reporter(
                &registry,
                cli.config.as_deref(),
                cli.target.as_deref(),
            )?);
            let results = detect_files(reporter, &files).await?;

            for (file, crashed) in &results {
                println!("{}\t{}", if *crashed { "crash" } else { "clean" }, file);
            }

            let any_crash = results.iter().any(|(_, crashed)| *crashed);
            Ok(if any_crash { EXIT_CRASH_FOUND } else { EXIT_SUCCESS })
        }
    }
}
