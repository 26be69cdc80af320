//! Write a fitted additive model to JSON.
//!
//! The file is a portable description of the fit for review: feature names
//! with coefficients, interval settings and fit quality.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::FitQuality;
use crate::error::AppError;
use crate::models::{AdditiveModel, FeatureLayout};

#[derive(Debug, Clone, Serialize)]
pub struct Coefficient {
    pub name: String,
    pub value: f64,
}

/// Serialized form of an [`AdditiveModel`].
#[derive(Debug, Clone, Serialize)]
pub struct ModelFile {
    pub tool: String,
    pub origin: NaiveDate,
    pub trend_scale_days: f64,
    pub layout: FeatureLayout,
    pub interval_width: f64,
    pub coefficients: Vec<Coefficient>,
    pub fit_quality: FitQuality,
}

impl ModelFile {
    pub fn from_model(model: &AdditiveModel) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME").to_string(),
            origin: model.origin,
            trend_scale_days: model.t_scale,
            layout: model.layout,
            interval_width: model.interval_width,
            coefficients: model
                .coefficients()
                .into_iter()
                .map(|(name, value)| Coefficient { name, value })
                .collect(),
            fit_quality: model.quality.clone(),
        }
    }
}

/// Write a model JSON file.
pub fn write_model_json(path: &Path, model: &AdditiveModel) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create model JSON '{}': {e}", path.display())))?;
    write_model(file, model)
}

pub fn write_model<W: Write>(output: W, model: &AdditiveModel) -> Result<(), AppError> {
    serde_json::to_writer_pretty(output, &ModelFile::from_model(model))
        .map_err(|e| AppError::new(2, format!("Failed to write model JSON: {e}")))
}
