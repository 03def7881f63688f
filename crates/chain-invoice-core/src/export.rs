use crate::{
    ValidationError,
    constants::{
        EXPORT_FILENAME_PATTERN, EXPORT_FILENAME_PLACEHOLDER, EXPORT_IMAGE_QUALITY,
        EXPORT_IMAGE_TYPE, EXPORT_MARGIN, EXPORT_RASTER_SCALE,
    },
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PageUnit {
    #[default]
    In,
    Mm,
    Pt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    #[default]
    Letter,
    A4,
    Legal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

/// Settings for turning the rendered invoice preview into a downloadable document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Page margin in `unit`
    pub margin: f64,
    /// File name, `{timestamp}` is replaced with the export time in milliseconds
    pub filename_pattern: String,
    pub image_type: String,
    /// Image quality between 0 and 1
    pub image_quality: f64,
    /// Scale used when rasterizing the preview
    pub raster_scale: f64,
    pub unit: PageUnit,
    pub format: PageFormat,
    pub orientation: PageOrientation,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            margin: EXPORT_MARGIN,
            filename_pattern: EXPORT_FILENAME_PATTERN.to_owned(),
            image_type: EXPORT_IMAGE_TYPE.to_owned(),
            image_quality: EXPORT_IMAGE_QUALITY,
            raster_scale: EXPORT_RASTER_SCALE,
            unit: PageUnit::default(),
            format: PageFormat::default(),
            orientation: PageOrientation::default(),
        }
    }
}

impl ExportOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let pattern = self.filename_pattern.trim();
        if pattern.is_empty() || pattern.contains('/') || pattern.contains('\\') {
            return Err(ValidationError::InvalidFilenamePattern(
                self.filename_pattern.clone(),
            ));
        }
        Ok(())
    }

    pub fn filename_at(&self, timestamp_millis: u64) -> String {
        self.filename_pattern
            .trim()
            .replace(EXPORT_FILENAME_PLACEHOLDER, &timestamp_millis.to_string())
    }

    pub fn request_at(&self, timestamp_millis: u64) -> ExportRequest {
        ExportRequest {
            filename: self.filename_at(timestamp_millis),
            options: self.clone(),
        }
    }
}

/// A single export of the preview region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRequest {
    pub filename: String,
    pub options: ExportOptions,
}

impl ExportRequest {
    /// The options in the shape the browser PDF exporter expects
    pub fn to_exporter_options(&self) -> Value {
        json!({
            "margin": self.options.margin,
            "filename": self.filename,
            "image": {
                "type": self.options.image_type,
                "quality": self.options.image_quality,
            },
            "html2canvas": { "scale": self.options.raster_scale },
            "jsPDF": {
                "unit": self.options.unit,
                "format": self.options.format,
                "orientation": self.options.orientation,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_contains_timestamp() {
        let options = ExportOptions::default();
        assert_eq!(options.filename_at(1700000000123), "invoice-1700000000123.pdf");
    }

    #[test]
    fn exporter_options_shape() {
        let request = ExportOptions::default().request_at(42);
        assert_eq!(
            request.to_exporter_options(),
            json!({
                "margin": 1.0,
                "filename": "invoice-42.pdf",
                "image": { "type": "jpeg", "quality": 0.98 },
                "html2canvas": { "scale": 2.0 },
                "jsPDF": { "unit": "in", "format": "letter", "orientation": "portrait" },
            })
        );
    }

    #[test]
    fn validate_rejects_paths() {
        let options = ExportOptions {
            filename_pattern: "../invoice.pdf".to_owned(),
            ..Default::default()
        };
        assert!(options.validate().is_err());
        assert!(ExportOptions::default().validate().is_ok());
    }
}
