// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Pipeline Invoker
//!
//! Runs a declared sequence of stages over a byte buffer, fail-fast, with a
//! structured observability event per stage. Between stages the buffer is
//! replaced wholesale with the previous stage's output; a failing stage
//! aborts the run and is wrapped with its name and index, never exposing a
//! partial result.

use crate::infrastructure::stages::registry::StageRegistry;
use photoframe_domain::{ImageStage, PhotoframeError, PipelineConfig};
use std::time::Instant;

/// Per-stage observability record: purely for logging, never consulted for
/// control flow.
#[derive(Debug, Clone)]
pub struct StageEvent {
    pub stage_name: String,
    pub index: usize,
    pub in_bytes: usize,
    pub out_bytes: usize,
    pub duration_ms: f64,
}

/// Per-pipeline summary emitted once a run (succeeds or fails) completes.
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub stage_count: usize,
    pub total_duration_ms: f64,
}

pub struct PipelineInvoker;

impl PipelineInvoker {
    pub fn new() -> Self {
        Self
    }

    /// Runs pre-constructed stages in order. The empty stage list is the
    /// identity.
    pub fn execute(&self, bytes: Vec<u8>, stages: &[Box<dyn ImageStage>]) -> Result<Vec<u8>, PhotoframeError> {
        let pipeline_start = Instant::now();
        let mut buffer = bytes;

        for (index, stage) in stages.iter().enumerate() {
            buffer = self.execute_one(stage.as_ref(), index, buffer)?;
        }

        log_summary(PipelineSummary {
            stage_count: stages.len(),
            total_duration_ms: pipeline_start.elapsed().as_secs_f64() * 1000.0,
        });

        Ok(buffer)
    }

    /// Resolves each stage config via the registry lazily, in order, so a
    /// failure to construct stage `k` aborts before stage `k+1..` ever run.
    pub fn execute_config(
        &self,
        bytes: Vec<u8>,
        config: &PipelineConfig,
        registry: &StageRegistry,
    ) -> Result<Vec<u8>, PhotoframeError> {
        let pipeline_start = Instant::now();
        let mut buffer = bytes;

        for (index, stage_config) in config.iter().enumerate() {
            let stage = registry
                .create(&stage_config.name, &stage_config.params)
                .map_err(|e| wrap_construction_error(&stage_config.name, index, e))?;
            buffer = self.execute_one(stage.as_ref(), index, buffer)?;
        }

        log_summary(PipelineSummary {
            stage_count: config.len(),
            total_duration_ms: pipeline_start.elapsed().as_secs_f64() * 1000.0,
        });

        Ok(buffer)
    }

    fn execute_one(&self, stage: &dyn ImageStage, index: usize, input: Vec<u8>) -> Result<Vec<u8>, PhotoframeError> {
        let start = Instant::now();
        let in_bytes = input.len();

        tracing::info!(stage = stage.name(), index, in_bytes, "stage start");

        let result = stage.execute(&input).map_err(|e| PhotoframeError::stage_failure(stage.name(), index, e.to_string()));

        match &result {
            Ok(output) => {
                let event = StageEvent {
                    stage_name: stage.name().to_string(),
                    index,
                    in_bytes,
                    out_bytes: output.len(),
                    duration_ms: start.elapsed().as_secs_f64() * 1000.0,
                };
                tracing::info!(
                    stage = %event.stage_name,
                    index = event.index,
                    in_bytes = event.in_bytes,
                    out_bytes = event.out_bytes,
                    duration_ms = event.duration_ms,
                    "stage end"
                );
            }
            Err(e) => {
                tracing::error!(stage = stage.name(), index, error = %e, "stage failed");
            }
        }

        result
    }
}

impl Default for PipelineInvoker {
    fn default() -> Self {
        Self::new()
    }
}

fn log_summary(summary: PipelineSummary) {
    tracing::info!(
        stage_count = summary.stage_count,
        total_duration_ms = summary.total_duration_ms,
        "pipeline run complete"
    );
}

/// A failure to *construct* a stage from its config is still a pipeline
/// error wrapped with the stage's name and index, matching the contract
/// for an execution failure.
fn wrap_construction_error(name: &str, index: usize, cause: PhotoframeError) -> PhotoframeError {
    PhotoframeError::stage_failure(name, index, cause.to_string())
}
