// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Bootstrap Module
//!
//! The composition root: parses CLI arguments, loads configuration, wires
//! the SQLite repository into the intake orchestrator and rotation
//! scheduler, and dispatches each subcommand. Nothing below this crate
//! depends on it; it is the only place that knows about `clap`, exit
//! codes, and process argv.
//!
//! ## Module Structure
//!
//! - [`cli`] - argument parsing and path validation.
//! - [`exit_code`] - domain-error-to-exit-code mapping.

pub mod cli;
pub mod exit_code;

use chrono::{DateTime, Utc};
use cli::{Cli, Commands, RotationAction};
use exit_code::ExitCode;
use photoframe_core::infrastructure::repositories::SqliteImageRepository;
use photoframe_core::infrastructure::stages::StageRegistry;
use photoframe_core::{AppConfig, IntakeOrchestrator, RotationScheduler};
use photoframe_domain::PhotoframeError;
use std::sync::Arc;

/// Runs the parsed CLI to completion, returning the process exit code.
pub async fn run(cli: Cli) -> ExitCode {
    photoframe_core::infrastructure::logging::init_logging(cli.verbose);

    match run_inner(cli).await {
        Ok(()) => ExitCode::Success,
        Err(err) => {
            tracing::error!(error = %err, category = err.category(), "command failed");
            eprintln!("error: {err}");
            ExitCode::from_domain_error(&err)
        }
    }
}

async fn run_inner(cli: Cli) -> Result<(), PhotoframeError> {
    if let Commands::ValidateConfig { path } = &cli.command {
        return validate_config(path);
    }

    let config = AppConfig::load(cli.config.as_deref())?;
    let repository = Arc::new(SqliteImageRepository::connect(&config.database_url).await?);

    match cli.command {
        Commands::AddImage { path } => add_image(&repository, &config, &path).await,
        Commands::List => list_images(&repository, &config).await,
        Commands::Show { id } => show_image(&repository, &config, &id).await,
        Commands::Delete { id } => delete_image(&repository, &config, &id).await,
        Commands::Rotation { action } => rotation(&repository, &config, action).await,
        Commands::ValidateConfig { .. } => unreachable!("handled above"),
    }
}

fn validate_config(path: &std::path::Path) -> Result<(), PhotoframeError> {
    crate::cli::validate_existing_file(&path.to_string_lossy())
        .map_err(|e| PhotoframeError::InvalidConfig(e.to_string()))?;
    let config = AppConfig::load(Some(path))?;
    println!(
        "configuration valid: {} stage(s), timezone {}",
        config.pipeline.len(),
        config.rotation_timezone
    );
    Ok(())
}

async fn add_image(
    repository: &Arc<SqliteImageRepository>,
    config: &AppConfig,
    path: &std::path::Path,
) -> Result<(), PhotoframeError> {
    let validated = crate::cli::validate_existing_file(&path.to_string_lossy())
        .map_err(|e| PhotoframeError::InvalidConfig(e.to_string()))?;
    let bytes = std::fs::read(&validated)?;

    let orchestrator = build_orchestrator(repository.clone(), config);
    let id = orchestrator.add_image(bytes).await?;
    println!("{id}");
    Ok(())
}

async fn list_images(repository: &Arc<SqliteImageRepository>, config: &AppConfig) -> Result<(), PhotoframeError> {
    let orchestrator = build_orchestrator(repository.clone(), config);
    for id in orchestrator.list_ids().await? {
        println!("{id}");
    }
    Ok(())
}

async fn show_image(repository: &Arc<SqliteImageRepository>, config: &AppConfig, id: &str) -> Result<(), PhotoframeError> {
    let image_id = parse_image_id(id)?;
    let orchestrator = build_orchestrator(repository.clone(), config);
    let record = orchestrator.image_by_id(image_id).await?;
    println!(
        "id: {}\ncreated_at: {}\noriginal_bytes: {}\nprocessed_bytes: {}",
        record.id,
        record.created_at.to_rfc3339(),
        record.original.len(),
        record.processed.len()
    );
    Ok(())
}

async fn delete_image(repository: &Arc<SqliteImageRepository>, config: &AppConfig, id: &str) -> Result<(), PhotoframeError> {
    let image_id = parse_image_id(id)?;
    let orchestrator = build_orchestrator(repository.clone(), config);
    orchestrator.delete(image_id).await?;
    println!("deleted {image_id}");
    Ok(())
}

async fn rotation(repository: &Arc<SqliteImageRepository>, config: &AppConfig, action: RotationAction) -> Result<(), PhotoframeError> {
    let scheduler = RotationScheduler::new(repository.clone(), &config.rotation_timezone);

    match action {
        RotationAction::Today => {
            let id = scheduler.image_for_time(Utc::now()).await?;
            println!("{id}");
        }
        RotationAction::Schedule { date } => {
            let reference = match date {
                Some(raw) => DateTime::parse_from_rfc3339(&raw)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| PhotoframeError::InvalidConfig(format!("invalid --date: {e}")))?,
                None => Utc::now(),
            };
            for (id, next_show) in scheduler.image_schedules(reference).await? {
                println!("{id}\t{}", next_show.to_rfc3339());
            }
        }
    }
    Ok(())
}

fn parse_image_id(raw: &str) -> Result<photoframe_domain::ImageId, PhotoframeError> {
    raw.parse().map_err(|_| PhotoframeError::InvalidConfig(format!("not a valid image id: {raw}")))
}

fn build_orchestrator(repository: Arc<SqliteImageRepository>, config: &AppConfig) -> IntakeOrchestrator<SqliteImageRepository> {
    let mut registry = StageRegistry::new();
    photoframe_core::infrastructure::stages::register_builtins(&mut registry);

    IntakeOrchestrator::new(
        repository,
        registry,
        config.pipeline.clone(),
        photoframe_core::infrastructure::stages::PngNormalizeParams {
            svg_fallback_width: config.svg_fallback_width,
            svg_fallback_height: config.svg_fallback_height,
        },
    )
}
