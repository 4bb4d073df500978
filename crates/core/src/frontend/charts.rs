//! Dashboard charts: a monthly bar chart and a working-days pie chart.
//!
//! Drawing is delegated to a [`ChartBackend`]. [`ChartRenderer`] owns the
//! handles of the charts currently on screen and disposes the previous
//! chart of a kind before creating its replacement, so at most one bar
//! chart and one pie chart exist at any time.

use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Bar chart x-axis labels.
pub const MONTHS_IT: [&str; 12] = [
    "Gennaio",
    "Febbraio",
    "Marzo",
    "Aprile",
    "Maggio",
    "Giugno",
    "Luglio",
    "Agosto",
    "Settembre",
    "Ottobre",
    "Novembre",
    "Dicembre",
];

/// Working days in a year, used as the pie chart total.
pub const DEFAULT_WORKING_DAYS: f64 = 252.0;

/// Monthly totals shown before any CSV has been loaded.
pub const SAMPLE_DATA: [f64; 12] = [10.0, 8.0, 12.0, 9.0, 11.0, 7.0, 6.0, 5.0, 9.0, 10.0, 8.0, 7.0];

pub const BAR_DATASET_LABEL: &str = "Totale ponderato";
pub const PIE_DISRUPTIVE_LABEL: &str = "Giorni disruptive";
pub const PIE_NON_DISRUPTIVE_LABEL: &str = "Giorni non disruptive";

// ---------------------------------------------------------------------------
// Chart configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

/// Backend-agnostic description of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Split of the working year into disruptive and non-disruptive days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PieSlices {
    pub disruptive: f64,
    pub non_disruptive: f64,
}

/// Disruptive days are the data total capped at `working_days`.
pub fn pie_slices(data: &[f64], working_days: f64) -> PieSlices {
    let disruptive = data.iter().sum::<f64>().min(working_days);
    PieSlices {
        disruptive,
        non_disruptive: working_days - disruptive,
    }
}

/// One bar per value, labelled with the month names in order.
pub fn bar_chart(data: &[f64]) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Bar,
        labels: MONTHS_IT
            .iter()
            .take(data.len())
            .map(|m| m.to_string())
            .collect(),
        datasets: vec![Dataset {
            label: BAR_DATASET_LABEL.to_string(),
            data: data.to_vec(),
        }],
    }
}

pub fn pie_chart(data: &[f64], working_days: f64) -> ChartConfig {
    let slices = pie_slices(data, working_days);
    ChartConfig {
        kind: ChartKind::Pie,
        labels: vec![
            PIE_DISRUPTIVE_LABEL.to_string(),
            PIE_NON_DISRUPTIVE_LABEL.to_string(),
        ],
        datasets: vec![Dataset {
            label: String::new(),
            data: vec![slices.disruptive, slices.non_disruptive],
        }],
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// The charting engine that actually draws.
pub trait ChartBackend {
    type Handle;

    /// Draw `config`; its `kind` says which chart type to build.
    fn create(&mut self, config: &ChartConfig) -> Self::Handle;

    fn destroy(&mut self, handle: Self::Handle);
}

/// Owns the live chart of each kind.
pub struct ChartRenderer<B: ChartBackend> {
    backend: B,
    working_days: f64,
    bar: Option<B::Handle>,
    pie: Option<B::Handle>,
}

impl<B: ChartBackend> ChartRenderer<B> {
    pub fn new(backend: B) -> Self {
        Self::with_working_days(backend, DEFAULT_WORKING_DAYS)
    }

    pub fn with_working_days(backend: B, working_days: f64) -> Self {
        Self {
            backend,
            working_days,
            bar: None,
            pie: None,
        }
    }

    /// Dispose the current chart of `kind`, if any, then draw a new one.
    pub fn render(&mut self, kind: ChartKind, data: &[f64]) -> ChartConfig {
        let config = match kind {
            ChartKind::Bar => bar_chart(data),
            ChartKind::Pie => pie_chart(data, self.working_days),
        };

        if let Some(previous) = self.slot(kind).take() {
            self.backend.destroy(previous);
        }
        let handle = self.backend.create(&config);
        *self.slot(kind) = Some(handle);

        config
    }

    /// Render both the bar and the pie chart from the same data.
    pub fn render_all(&mut self, data: &[f64]) {
        self.render(ChartKind::Bar, data);
        self.render(ChartKind::Pie, data);
    }

    pub fn dispose_all(&mut self) {
        for kind in [ChartKind::Bar, ChartKind::Pie] {
            if let Some(handle) = self.slot(kind).take() {
                self.backend.destroy(handle);
            }
        }
    }

    pub fn is_live(&self, kind: ChartKind) -> bool {
        match kind {
            ChartKind::Bar => self.bar.is_some(),
            ChartKind::Pie => self.pie.is_some(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn slot(&mut self, kind: ChartKind) -> &mut Option<B::Handle> {
        match kind {
            ChartKind::Bar => &mut self.bar,
            ChartKind::Pie => &mut self.pie,
        }
    }
}

/// Headless backend that keeps live charts in memory.
///
/// Useful for server-side rendering of chart configs and for tests.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    next_id: u64,
    live: BTreeMap<u64, ChartConfig>,
    destroyed: Vec<u64>,
}

impl InMemoryBackend {
    /// Charts currently alive, in creation order.
    pub fn live(&self) -> impl Iterator<Item = &ChartConfig> {
        self.live.values()
    }

    pub fn live_count(&self, kind: ChartKind) -> usize {
        self.live.values().filter(|c| c.kind == kind).count()
    }

    /// Ids of destroyed charts, in destruction order.
    pub fn destroyed(&self) -> &[u64] {
        &self.destroyed
    }

    pub fn created_count(&self) -> u64 {
        self.next_id
    }
}

impl ChartBackend for InMemoryBackend {
    type Handle = u64;

    fn create(&mut self, config: &ChartConfig) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id, config.clone());
        id
    }

    fn destroy(&mut self, handle: u64) {
        self.live.remove(&handle);
        self.destroyed.push(handle);
    }
}
