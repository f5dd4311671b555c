use std::path::Path;

use anyhow::{Context, Result};

use crate::data::loader;
use crate::data::unit_inference;
use crate::processing::band::{self, BandParameters};
use crate::render::report::{self, AxisUnits};
use crate::state::band_table::BandTable;
use crate::state::settings::ReportSettings;

/// A band analysis of one file, before rendering.
#[derive(Debug, Clone)]
pub struct BandAnalysis {
    pub params: BandParameters,
    pub units: AxisUnits,
    pub sample_count: usize,
}

/// The bandparams application: load a table, analyze it, render the report.
pub struct BandParamsApp {
    pub settings: ReportSettings,
    /// Column holding x (name or 1-based index). First column when unset.
    pub x_column: Option<String>,
    /// Column holding y (name or 1-based index). Second column when unset.
    pub y_column: Option<String>,
}

impl BandParamsApp {
    pub fn new(settings: ReportSettings) -> Self {
        Self {
            settings,
            x_column: None,
            y_column: None,
        }
    }

    pub fn with_columns(mut self, x_column: Option<String>, y_column: Option<String>) -> Self {
        self.x_column = x_column;
        self.y_column = y_column;
        self
    }

    /// Load `path` and compute its band parameters.
    pub fn analyze_file(&self, path: &Path) -> Result<BandAnalysis> {
        let loaded = loader::load_file(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        tracing::debug!(
            "Loaded {} row(s), columns: {}",
            loaded.row_count,
            loaded.columns.join(", ")
        );

        let xy = loaded
            .xy_columns(self.x_column.as_deref(), self.y_column.as_deref())
            .map_err(anyhow::Error::msg)
            .context("Failed to select x/y columns")?;
        tracing::debug!("Using x='{}', y='{}'", xy.x_name, xy.y_name);

        let table = BandTable::from_columns(&xy.x, &xy.y)
            .with_context(|| format!("Invalid band data in {}", path.display()))?;
        let (x_min, x_max) = table.x_range();
        tracing::debug!("Band spans x = {x_min} .. {x_max}");

        let params = band::analyze_with(&table, self.settings.strategy)
            .with_context(|| format!("Cannot analyze band in {}", path.display()))?;

        tracing::info!(
            "Analyzed {} samples ({} FWHM): max at {} = {}",
            table.len(),
            self.settings.strategy.label(),
            params.max_pos,
            params.max_val
        );

        Ok(BandAnalysis {
            params,
            units: AxisUnits {
                x: unit_inference::infer_unit(&xy.x_name),
                y: unit_inference::infer_unit(&xy.y_name),
            },
            sample_count: table.len(),
        })
    }

    /// Analyze `path` and render the report text.
    pub fn run(&self, path: &Path) -> Result<String> {
        let analysis = self.analyze_file(path)?;
        report::render(&analysis.params, &self.settings, &analysis.units)
            .context("Failed to render report")
    }
}
