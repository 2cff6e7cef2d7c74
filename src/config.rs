use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "LAUNCH_DASH_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing config: {0}")]
    Parse(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Everything about the dashboard that is not derived from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Window title and page heading.
    pub title: String,
    /// Dataset loaded at startup.
    pub dataset_path: PathBuf,
    /// Dropdown value meaning "every site".
    pub all_sites_value: String,
    /// Dropdown label for `all_sites_value`.
    pub all_sites_label: String,
    /// Known launch sites. Also the slice order of the all-sites pie chart.
    pub sites: Vec<String>,
    pub slider: SliderConfig,
    pub marker: MarkerConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "SpaceX Launch Records Dashboard".to_string(),
            dataset_path: PathBuf::from("spacex_launch_dash.csv"),
            all_sites_value: "ALL".to_string(),
            all_sites_label: "All Sites".to_string(),
            sites: ["KSC LC-39A", "CCAFS SLC-40", "VAFB SLC-4E", "CCAFS LC-13"]
                .into_iter()
                .map(String::from)
                .collect(),
            slider: SliderConfig::default(),
            marker: MarkerConfig::default(),
        }
    }
}

/// Payload range slider bounds (kg).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
        }
    }
}

/// Scatter marker radius range (points).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            min_radius: 3.0,
            max_radius: 14.0,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string. Missing fields take defaults.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Resolve the config: `$LAUNCH_DASH_CONFIG`, then `./dashboard.json`,
    /// then built-in defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let path = explicit.or_else(|| {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.is_file().then_some(local)
        });

        match path {
            Some(path) => {
                log::info!("Reading config from {}", path.display());
                Self::from_file(&path)
            }
            None => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Dropdown entries as (value, label): "all sites" first, then the
    /// configured sites, then any `dataset_sites` the config does not list.
    pub fn site_options(&self, dataset_sites: &[String]) -> Vec<(String, String)> {
        let mut options = vec![(self.all_sites_value.clone(), self.all_sites_label.clone())];
        for site in self.sites.iter().chain(dataset_sites) {
            if !options.iter().any(|(value, _)| value == site) {
                options.push((site.clone(), site.clone()));
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_dashboard() {
        let cfg = DashboardConfig::default();
        assert_eq!(
            cfg.sites,
            vec!["KSC LC-39A", "CCAFS SLC-40", "VAFB SLC-4E", "CCAFS LC-13"]
        );
        assert_eq!(cfg.all_sites_value, "ALL");
        assert_eq!(cfg.slider, SliderConfig { min: 0.0, max: 10_000.0, step: 1_000.0 });
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = DashboardConfig::from_json(
            r#"{ "sites": ["Site X", "Site Y"], "slider": { "max": 20000 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.sites, vec!["Site X", "Site Y"]);
        assert_eq!(cfg.slider.max, 20_000.0);
        assert_eq!(cfg.slider.step, 1_000.0);
        assert_eq!(cfg.title, "SpaceX Launch Records Dashboard");
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = DashboardConfig::from_json("{ sites: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err =
            DashboardConfig::from_file(Path::new("/nonexistent/dashboard.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn site_options_start_with_all() {
        let cfg = DashboardConfig::default();
        let opts = cfg.site_options(&[]);
        assert_eq!(opts[0], ("ALL".to_string(), "All Sites".to_string()));
        assert_eq!(opts.len(), 5);
        assert_eq!(opts[1].0, "KSC LC-39A");
    }

    #[test]
    fn site_options_append_unlisted_dataset_sites() {
        let cfg = DashboardConfig::default();
        let dataset_sites = vec!["KSC LC-39A".to_string(), "CCAFS LC-40".to_string()];
        let values: Vec<String> = cfg
            .site_options(&dataset_sites)
            .into_iter()
            .map(|(value, _)| value)
            .collect();
        assert_eq!(
            values,
            vec!["ALL", "KSC LC-39A", "CCAFS SLC-40", "VAFB SLC-4E", "CCAFS LC-13", "CCAFS LC-40"]
        );
    }

    #[test]
    fn site_options_drop_repeated_sites() {
        let cfg = DashboardConfig {
            sites: vec!["A".into(), "B".into(), "A".into()],
            ..DashboardConfig::default()
        };
        let opts = cfg.site_options(&["B".to_string()]);
        assert_eq!(opts.len(), 3);
    }
}
