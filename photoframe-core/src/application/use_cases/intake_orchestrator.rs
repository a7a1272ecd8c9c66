// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Intake Orchestrator (C7)
//!
//! The single write path into the store: normalize an uploaded buffer to
//! PNG, run the configured pipeline over it, and persist original and
//! processed bytes together. Everything else (listing, fetching, deleting)
//! is a thin pass-through to the [`ImageRepository`], kept here rather than
//! exposed directly so a caller only ever depends on this one surface.

use crate::infrastructure::runtime::PipelineInvoker;
use crate::infrastructure::stages::png_normalize::{PngNormalizeParams, PngNormalizeStage};
use crate::infrastructure::stages::registry::StageRegistry;
use photoframe_domain::{ImageId, ImageRecord, ImageRepository, ImageStage, PhotoframeError, PipelineConfig};
use std::sync::Arc;

/// Orchestrates intake (normalize, run pipeline, persist) and the
/// repository-backed read/delete operations the CLI exposes.
pub struct IntakeOrchestrator<R: ImageRepository> {
    repository: Arc<R>,
    registry: StageRegistry,
    invoker: PipelineInvoker,
    pipeline: PipelineConfig,
    svg_fallback: PngNormalizeParams,
}

impl<R: ImageRepository> IntakeOrchestrator<R> {
    pub fn new(repository: Arc<R>, registry: StageRegistry, pipeline: PipelineConfig, svg_fallback: PngNormalizeParams) -> Self {
        Self {
            repository,
            registry,
            invoker: PipelineInvoker::new(),
            pipeline,
            svg_fallback,
        }
    }

    /// Normalizes `bytes` to PNG, runs the configured pipeline over the
    /// normalized buffer, and persists both. Returns the new record's id.
    pub async fn add_image(&self, bytes: Vec<u8>) -> Result<ImageId, PhotoframeError> {
        let normalizer = PngNormalizeStage::new(self.svg_fallback);
        let original = normalizer.execute(&bytes)?;

        let processed = self.invoker.execute_config(original.clone(), &self.pipeline, &self.registry)?;

        self.repository.create(original, processed).await
    }

    /// Fetches a single record by id, mapping a missing id to `NotFound`
    /// rather than surfacing an `Option` -- every other intake operation
    /// already treats a bad id as an error, not a caller-handled case.
    pub async fn image_by_id(&self, id: ImageId) -> Result<ImageRecord, PhotoframeError> {
        self.repository.get_by_id(id).await?.ok_or(PhotoframeError::NotFound)
    }

    /// Lists the ids of every stored, fully-processed image, in ascending
    /// `(created_at, row_ordinal)` order.
    pub async fn list_ids(&self) -> Result<Vec<ImageId>, PhotoframeError> {
        let records = self.repository.list(None).await?;
        Ok(records.into_iter().filter(|r| r.is_complete()).map(|r| r.id).collect())
    }

    /// Deletes a record by id. Idempotent: deleting a missing id is not an
    /// error.
    pub async fn delete(&self, id: ImageId) -> Result<(), PhotoframeError> {
        self.repository.delete(id).await
    }

    /// Releases the repository's held resources.
    pub async fn close(&self) -> Result<(), PhotoframeError> {
        self.repository.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use parking_lot::Mutex;
    use photoframe_domain::ProjectionField;

    #[derive(Default)]
    struct FakeRepo {
        records: Mutex<Vec<ImageRecord>>,
    }

    #[async_trait]
    impl ImageRepository for FakeRepo {
        async fn create(&self, original: Vec<u8>, processed: Vec<u8>) -> Result<ImageId, PhotoframeError> {
            let id = ImageId::new();
            self.records.lock().push(ImageRecord::new(id, original, processed, Utc::now()));
            Ok(id)
        }
        async fn get_by_id(&self, id: ImageId) -> Result<Option<ImageRecord>, PhotoframeError> {
            Ok(self.records.lock().iter().find(|r| r.id == id).cloned())
        }
        async fn list(&self, _projection: Option<&[ProjectionField]>) -> Result<Vec<ImageRecord>, PhotoframeError> {
            Ok(self.records.lock().clone())
        }
        async fn delete(&self, id: ImageId) -> Result<(), PhotoframeError> {
            self.records.lock().retain(|r| r.id != id);
            Ok(())
        }
        async fn close(&self) -> Result<(), PhotoframeError> {
            Ok(())
        }
    }

    fn orchestrator(pipeline: PipelineConfig) -> IntakeOrchestrator<FakeRepo> {
        IntakeOrchestrator::new(
            Arc::new(FakeRepo::default()),
            StageRegistry::default(),
            pipeline,
            PngNormalizeParams {
                svg_fallback_width: 0,
                svg_fallback_height: 0,
            },
        )
    }

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(2, 2, image::Rgb([255, 255, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[tokio::test]
    async fn add_image_with_empty_pipeline_stores_identical_bytes() {
        let orchestrator = orchestrator(vec![]);
        let png = tiny_png();
        let id = orchestrator.add_image(png.clone()).await.unwrap();

        let record = orchestrator.image_by_id(id).await.unwrap();
        assert_eq!(record.original, png);
        assert_eq!(record.processed, png);
    }

    #[tokio::test]
    async fn missing_id_maps_to_not_found() {
        let orchestrator = orchestrator(vec![]);
        let err = orchestrator.image_by_id(ImageId::new()).await.unwrap_err();
        assert!(matches!(err, PhotoframeError::NotFound));
    }

    #[tokio::test]
    async fn list_ids_only_returns_complete_records() {
        let orchestrator = orchestrator(vec![]);
        let id = orchestrator.add_image(tiny_png()).await.unwrap();
        let ids = orchestrator.list_ids().await.unwrap();
        assert_eq!(ids, vec![id]);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let orchestrator = orchestrator(vec![]);
        orchestrator.delete(ImageId::new()).await.unwrap();
    }

    #[tokio::test]
    async fn unknown_stage_in_pipeline_fails_add_image() {
        let orchestrator = orchestrator(vec![photoframe_domain::StageConfig::with_no_params("doesNotExist")]);
        let err = orchestrator.add_image(tiny_png()).await.unwrap_err();
        assert!(matches!(err, PhotoframeError::StageFailure { .. }));
    }
}
