use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::aggregate::{PieChartData, ScatterChartData, outcome_counts, scatter_points};
use crate::data::filter::{PayloadRange, SiteSelector};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Control changes go through the setters, which rerun both aggregations
/// from scratch. The chart fields only hold the latest result for the
/// renderer.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until a file loads).
    pub dataset: Option<LaunchDataset>,

    /// Current dropdown selection.
    pub site: SiteSelector,

    /// Current slider bounds.
    pub payload_range: PayloadRange,

    pub pie: Option<PieChartData>,
    pub scatter: Option<ScatterChartData>,

    /// Colours for the pie slices and scatter booster versions.
    pub pie_colors: ColorMap,
    pub booster_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let range = PayloadRange::new(config.slider.min, config.slider.max);
        Self {
            config,
            dataset: None,
            site: SiteSelector::All,
            payload_range: range,
            pie: None,
            scatter: None,
            pie_colors: ColorMap::default(),
            booster_colors: ColorMap::default(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset: reset the controls and recompute.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.site = SiteSelector::All;
        self.payload_range = PayloadRange::new(dataset.payload_min(), dataset.payload_max());

        // Colour every booster version in the file so colours stay fixed
        // while the filters change.
        self.booster_colors =
            ColorMap::new(dataset.records().iter().map(|r| r.booster_version.as_str()));
        log::info!(
            "Dashboard ready: {} launches, {} booster versions, payload {}..{} kg",
            dataset.len(),
            self.booster_colors.len(),
            dataset.payload_min(),
            dataset.payload_max()
        );

        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    /// Dropdown changed.
    pub fn set_site(&mut self, site: SiteSelector) {
        self.site = site;
        self.recompute();
    }

    /// Slider changed.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        self.payload_range = range;
        self.recompute();
    }

    /// Rebuild both charts from the dataset and current inputs.
    pub fn recompute(&mut self) {
        let Some(ds) = &self.dataset else {
            self.pie = None;
            self.scatter = None;
            return;
        };

        let pie = outcome_counts(ds, &self.site, &self.config.sites);
        let scatter = scatter_points(ds, &self.site, &self.payload_range);
        log::debug!(
            "Recomputed charts for {} in ({}, {}) kg: {} pie launches, {} scatter points",
            self.site,
            self.payload_range.low,
            self.payload_range.high,
            pie.total(),
            scatter.points.len()
        );

        self.pie_colors = ColorMap::new(pie.slices.iter().map(|s| s.label.as_str()));
        self.pie = Some(pie);
        self.scatter = Some(scatter);
    }

    /// Dropdown entries, including dataset sites missing from the config.
    pub fn site_options(&self) -> Vec<(String, String)> {
        let dataset_sites = self.dataset.as_ref().map_or(&[][..], |ds| ds.sites());
        self.config.site_options(dataset_sites)
    }

    /// Number of records behind the scatter chart.
    pub fn visible_count(&self) -> usize {
        self.scatter.as_ref().map_or(0, |s| s.points.len())
    }
}
