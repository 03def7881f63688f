use chain_invoice_core::export::{ExportOptions, PageFormat, PageOrientation, PageUnit};
use serde::{Deserialize, Serialize};
use tsify::Tsify;
use wasm_bindgen::prelude::*;

pub mod invoice;

#[derive(Tsify, Debug, Clone, Serialize)]
#[tsify(into_wasm_abi)]
pub struct StatusResponse {
    pub version: String,
    pub chain_id: u64,
    pub contract_address: String,
    pub native_symbol: String,
    pub native_decimals: u32,
    pub wallet_connected: bool,
}

/// Overrides for the preview export, unset fields keep their defaults
#[derive(Tsify, Debug, Clone, Default, Serialize, Deserialize)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct ExportOptionsWeb {
    pub margin: Option<f64>,
    pub filename_pattern: Option<String>,
    pub image_type: Option<String>,
    pub image_quality: Option<f64>,
    pub raster_scale: Option<f64>,
    #[tsify(type = "\"in\" | \"mm\" | \"pt\" | undefined")]
    pub unit: Option<PageUnit>,
    #[tsify(type = "\"letter\" | \"a4\" | \"legal\" | undefined")]
    pub format: Option<PageFormat>,
    #[tsify(type = "\"portrait\" | \"landscape\" | undefined")]
    pub orientation: Option<PageOrientation>,
}

impl From<ExportOptionsWeb> for ExportOptions {
    fn from(val: ExportOptionsWeb) -> Self {
        let defaults = ExportOptions::default();
        ExportOptions {
            margin: val.margin.unwrap_or(defaults.margin),
            filename_pattern: val.filename_pattern.unwrap_or(defaults.filename_pattern),
            image_type: val.image_type.unwrap_or(defaults.image_type),
            image_quality: val.image_quality.unwrap_or(defaults.image_quality),
            raster_scale: val.raster_scale.unwrap_or(defaults.raster_scale),
            unit: val.unit.unwrap_or(defaults.unit),
            format: val.format.unwrap_or(defaults.format),
            orientation: val.orientation.unwrap_or(defaults.orientation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_options_overrides() {
        let web: ExportOptionsWeb =
            serde_json::from_str(r#"{ "margin": 0.5, "format": "a4", "orientation": "landscape" }"#)
                .unwrap();
        let opts: ExportOptions = web.into();
        assert_eq!(opts.margin, 0.5);
        assert_eq!(opts.format, PageFormat::A4);
        assert_eq!(opts.orientation, PageOrientation::Landscape);
        assert_eq!(opts.unit, PageUnit::In);
        assert_eq!(opts.image_type, "jpeg");
        assert_eq!(opts.image_quality, 0.98);
        assert_eq!(opts.filename_pattern, "invoice-{timestamp}.pdf");
    }

    #[test]
    fn export_options_empty_is_default() {
        let opts: ExportOptions = ExportOptionsWeb::default().into();
        assert_eq!(opts, ExportOptions::default());
    }
}
