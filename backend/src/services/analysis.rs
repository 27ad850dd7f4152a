//! Fruit image analysis service
//!
//! Runs an upload through feature extraction, detection and the quality
//! engine, producing the report returned by `POST /analyze`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Bytes;
use shared::{score_checked, validate_confidence, AnalysisResponse};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::{ImageProcessor, QualityDetector};

/// An uploaded image as received from the client
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Analysis service for uploaded fruit images
#[derive(Clone)]
pub struct AnalysisService {
    config: Arc<Config>,
    detector: Arc<dyn QualityDetector>,
}

impl AnalysisService {
    /// Create a new AnalysisService instance
    pub fn new(config: Arc<Config>, detector: Arc<dyn QualityDetector>) -> Self {
        Self { config, detector }
    }

    /// Analyze an uploaded image and build the quality report
    pub async fn analyze(&self, upload: ImageUpload) -> AppResult<AnalysisResponse> {
        if !is_image_content_type(upload.content_type.as_deref()) {
            return Err(AppError::NotAnImage {
                content_type: upload.content_type,
            });
        }

        let max_bytes = self.config.upload.max_bytes;
        if upload.data.len() > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "Image too large. Max size is {} bytes",
                max_bytes
            )));
        }

        if self.config.upload.persist {
            let path = self.persist_upload(&upload).await?;
            tracing::debug!("Stored upload at {}", path.display());
        }

        // Decoding and histogram extraction are CPU-bound
        let processor = ImageProcessor::new(&self.config.image);
        let data = upload.data.clone();
        let features = tokio::task::spawn_blocking(move || processor.extract(&data))
            .await
            .map_err(|e| AppError::Internal(format!("Feature extraction task failed: {}", e)))??;

        tracing::debug!(
            width = features.width,
            height = features.height,
            bins = features.color_histogram.len(),
            "Extracted image features"
        );

        let detection = self.detector.detect(&features);

        // The detector is trusted code; bad signals from it are a server fault
        validate_confidence(detection.confidence)
            .map_err(|e| AppError::Internal(format!("Detector returned invalid signals: {}", e)))?;
        let report = score_checked(detection.fruit_type, detection.freshness, detection.ripeness)
            .map_err(|e| AppError::Internal(format!("Detector returned invalid signals: {}", e)))?;

        tracing::info!(
            fruit_type = %report.fruit_type,
            condition = %report.overall_condition,
            shelf_life_days = report.shelf_life_days,
            "Analysis completed"
        );

        Ok(AnalysisResponse::from_report(report, detection.confidence))
    }

    /// Write the upload to the configured directory under a fresh name
    async fn persist_upload(&self, upload: &ImageUpload) -> AppResult<PathBuf> {
        let dir = &self.config.upload.dir;
        tokio::fs::create_dir_all(dir).await?;

        let path = dir.join(stored_file_name(upload.file_name.as_deref()));
        tokio::fs::write(&path, &upload.data).await?;
        Ok(path)
    }
}

/// Whether a declared content type is an image MIME type
pub fn is_image_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.trim().to_ascii_lowercase().starts_with("image/"))
        .unwrap_or(false)
}

/// `<uuid>.<ext>`, keeping the original extension when there is one
pub fn stored_file_name(original: Option<&str>) -> String {
    let extension = original
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or("img");

    format!("{}.{}", Uuid::new_v4(), extension.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_content_types() {
        assert!(is_image_content_type(Some("image/jpeg")));
        assert!(is_image_content_type(Some("IMAGE/PNG")));
        assert!(!is_image_content_type(Some("text/plain")));
        assert!(!is_image_content_type(Some("application/octet-stream")));
        assert!(!is_image_content_type(None));
    }

    #[test]
    fn test_stored_file_name_keeps_extension() {
        let name = stored_file_name(Some("banana.JPG"));
        assert!(name.ends_with(".jpg"));
        assert_eq!(name.len(), 36 + 4);
    }

    #[test]
    fn test_stored_file_name_fallback() {
        assert!(stored_file_name(None).ends_with(".img"));
        assert!(stored_file_name(Some("noextension")).ends_with(".img"));
        assert!(stored_file_name(Some("../../etc/passwd.sh;rm")).ends_with(".img"));
    }
}
