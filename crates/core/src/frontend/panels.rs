//! Panel visibility and the actions wired to the dashboard's controls.
//!
//! Three panels share the page and at most one is visible. Each control
//! flips its own panel and hides the other two; showing the dashboard
//! also (re)draws the charts.

use serde::Serialize;

use crate::error::CoreError;
use crate::severity::SeverityWeights;

use super::charts::{ChartBackend, ChartRenderer, SAMPLE_DATA};
use super::csv_table::{parse_csv, render_table_html, weighted_monthly_totals, CsvRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    ManualInput,
    Dashboard,
    CsvTable,
}

/// Side effects the page must perform on the controller's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEffect {
    /// Open the hidden file-picker input.
    OpenFilePicker,
}

pub struct PanelController<B: ChartBackend> {
    visible: Option<Panel>,
    rows: Option<Vec<CsvRow>>,
    table_html: Option<String>,
    weights: Option<SeverityWeights>,
    charts: ChartRenderer<B>,
}

impl<B: ChartBackend> PanelController<B> {
    /// All panels start hidden.
    pub fn new(charts: ChartRenderer<B>) -> Self {
        Self {
            visible: None,
            rows: None,
            table_html: None,
            weights: None,
            charts,
        }
    }

    pub fn visible(&self) -> Option<Panel> {
        self.visible
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.visible == Some(panel)
    }

    /// Flip `panel` and hide the others.
    pub fn toggle(&mut self, panel: Panel) {
        let showing = !self.is_visible(panel);
        self.visible = showing.then_some(panel);

        if showing && panel == Panel::Dashboard {
            let data = self.chart_data();
            self.charts.render_all(&data);
        }

        tracing::debug!(?panel, showing, "Panel toggled");
    }

    pub fn toggle_manual_input(&mut self) {
        self.toggle(Panel::ManualInput);
    }

    pub fn toggle_dashboard(&mut self) {
        self.toggle(Panel::Dashboard);
    }

    pub fn toggle_csv_table(&mut self) {
        self.toggle(Panel::CsvTable);
    }

    /// The upload control only opens the file picker.
    pub fn open_upload_picker(&self) -> UiEffect {
        UiEffect::OpenFilePicker
    }

    /// Parse the picked file, build its table and switch to the CSV panel.
    ///
    /// On a parse error the previous table and panel are left untouched.
    pub fn file_selected(&mut self, contents: &str) -> Result<(), CoreError> {
        let rows = parse_csv(contents)?;
        self.table_html = Some(render_table_html(&rows));
        self.rows = Some(rows);
        self.visible = Some(Panel::CsvTable);
        Ok(())
    }

    /// Weights loaded from the stored configuration.
    pub fn set_weights(&mut self, weights: SeverityWeights) {
        self.weights = Some(weights);
    }

    pub fn table_html(&self) -> Option<&str> {
        self.table_html.as_deref()
    }

    /// Weighted monthly totals of the parsed CSV, or the sample data
    /// until both a CSV and the weights are available.
    pub fn chart_data(&self) -> Vec<f64> {
        match (&self.rows, &self.weights) {
            (Some(rows), Some(weights)) if !rows.is_empty() => {
                weighted_monthly_totals(rows, weights)
            }
            _ => SAMPLE_DATA.to_vec(),
        }
    }

    pub fn charts(&self) -> &ChartRenderer<B> {
        &self.charts
    }
}
