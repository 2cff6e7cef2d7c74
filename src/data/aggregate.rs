//! Chart-shaped views over the dataset: outcome counts for the pie chart and
//! payload/outcome points for the scatter chart. Both are pure and are
//! recomputed from scratch on every call.

use super::filter::{PayloadRange, SiteSelector, filtered_indices, site_indices};
use super::model::{LaunchDataset, Outcome};

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChartData {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChartData {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }
}

/// Launch counts for the pie chart.
///
/// * `All`: one slice per site (counted by site, not by outcome), in
///   `known_sites` order followed by any dataset site missing from it.
/// * `Site(s)`: a `Success` and a `Failure` slice for that site.
///
/// Payload filtering never applies to this view. Sites without records
/// still get a zero-valued slice.
pub fn outcome_counts(
    dataset: &LaunchDataset,
    selector: &SiteSelector,
    known_sites: &[String],
) -> PieChartData {
    match selector {
        SiteSelector::All => {
            let mut labels: Vec<&str> = Vec::new();
            for site in known_sites.iter().chain(dataset.sites()) {
                if !labels.contains(&site.as_str()) {
                    labels.push(site.as_str());
                }
            }

            let slices = labels
                .into_iter()
                .map(|label| PieSlice {
                    label: label.to_string(),
                    count: dataset.records().iter().filter(|r| r.site == label).count(),
                })
                .collect();

            PieChartData {
                title: "Total Success Launches by All Sites".to_string(),
                slices,
            }
        }
        SiteSelector::Site(site) => {
            let records = dataset.records();
            let (mut success, mut failure) = (0, 0);
            for i in site_indices(dataset, selector) {
                match records[i].outcome {
                    Outcome::Success => success += 1,
                    Outcome::Failure => failure += 1,
                }
            }

            PieChartData {
                title: format!("Total Success Launches for {site}"),
                slices: vec![
                    PieSlice {
                        label: Outcome::Success.label().to_string(),
                        count: success,
                    },
                    PieSlice {
                        label: Outcome::Failure.label().to_string(),
                        count: failure,
                    },
                ],
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    /// Index of the source record in the dataset.
    pub record_index: usize,
    /// Payload mass (kg).
    pub x: f64,
    /// Outcome class, 0.0 or 1.0.
    pub y: f64,
    pub booster_version: String,
    /// Marker size, proportional to payload mass.
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChartData {
    pub title: String,
    pub points: Vec<ScatterPoint>,
}

impl ScatterChartData {
    /// Distinct colour keys in order of first appearance.
    pub fn booster_versions(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for p in &self.points {
            if !seen.contains(&p.booster_version.as_str()) {
                seen.push(&p.booster_version);
            }
        }
        seen
    }

    /// Largest marker size among the points (0 when empty).
    pub fn max_size(&self) -> f64 {
        self.points.iter().map(|p| p.size).fold(0.0, f64::max)
    }
}

/// One point per record passing the site and payload filters, in dataset
/// order.
pub fn scatter_points(
    dataset: &LaunchDataset,
    selector: &SiteSelector,
    range: &PayloadRange,
) -> ScatterChartData {
    let records = dataset.records();
    let points = filtered_indices(dataset, selector, range)
        .into_iter()
        .map(|i| {
            let rec = &records[i];
            ScatterPoint {
                record_index: i,
                x: rec.payload_mass_kg,
                y: f64::from(rec.outcome.class()),
                booster_version: rec.booster_version.clone(),
                size: rec.payload_mass_kg,
            }
        })
        .collect();

    let title = match selector {
        SiteSelector::All => "Payload vs. Outcome for All Sites".to_string(),
        SiteSelector::Site(site) => format!("Payload vs. Outcome for {site}"),
    };

    ScatterChartData { title, points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn three_records() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 500.0, "v1.0", Outcome::Success).unwrap(),
            LaunchRecord::new("A", 1500.0, "v1.1", Outcome::Failure).unwrap(),
            LaunchRecord::new("B", 800.0, "v1.0", Outcome::Success).unwrap(),
        ])
    }

    fn sites(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn counts(pie: &PieChartData) -> Vec<(&str, usize)> {
        pie.slices.iter().map(|s| (s.label.as_str(), s.count)).collect()
    }

    #[test]
    fn all_sites_counts_by_site() {
        let ds = three_records();
        let pie = outcome_counts(&ds, &SiteSelector::All, &sites(&["A", "B"]));
        assert_eq!(pie.title, "Total Success Launches by All Sites");
        assert_eq!(counts(&pie), vec![("A", 2), ("B", 1)]);
        assert_eq!(pie.total(), ds.len());
    }

    #[test]
    fn all_sites_keeps_configured_order_and_zero_slices() {
        let ds = three_records();
        let pie = outcome_counts(&ds, &SiteSelector::All, &sites(&["C", "B", "A"]));
        assert_eq!(counts(&pie), vec![("C", 0), ("B", 1), ("A", 2)]);
    }

    #[test]
    fn unconfigured_sites_are_appended() {
        let ds = three_records();
        let pie = outcome_counts(&ds, &SiteSelector::All, &sites(&["B"]));
        assert_eq!(counts(&pie), vec![("B", 1), ("A", 2)]);
        assert_eq!(pie.total(), ds.len());
    }

    #[test]
    fn repeated_configured_site_is_counted_once() {
        let ds = three_records();
        let pie = outcome_counts(&ds, &SiteSelector::All, &sites(&["A", "B", "A"]));
        assert_eq!(counts(&pie), vec![("A", 2), ("B", 1)]);
        assert_eq!(pie.total(), ds.len());
    }

    #[test]
    fn single_site_counts_by_outcome() {
        let ds = three_records();
        let pie = outcome_counts(&ds, &SiteSelector::Site("A".into()), &sites(&["A", "B"]));
        assert_eq!(pie.title, "Total Success Launches for A");
        assert_eq!(counts(&pie), vec![("Success", 1), ("Failure", 1)]);
        assert_eq!(pie.total(), 2);
    }

    #[test]
    fn unknown_site_yields_zero_slices() {
        let ds = three_records();
        let pie = outcome_counts(&ds, &SiteSelector::Site("Z".into()), &[]);
        assert_eq!(counts(&pie), vec![("Success", 0), ("Failure", 0)]);
    }

    #[test]
    fn scatter_for_one_site_and_range() {
        let ds = three_records();
        let chart = scatter_points(
            &ds,
            &SiteSelector::Site("A".into()),
            &PayloadRange::new(0.0, 1000.0),
        );
        assert_eq!(chart.points.len(), 1);
        let p = &chart.points[0];
        assert_eq!((p.x, p.y, p.size), (500.0, 1.0, 500.0));
        assert_eq!(p.booster_version, "v1.0");
        assert_eq!(p.record_index, 0);
    }

    #[test]
    fn scatter_matches_filter_and_keeps_order() {
        let ds = three_records();
        let range = PayloadRange::new(0.0, 10_000.0);
        let chart = scatter_points(&ds, &SiteSelector::All, &range);
        let idx = filtered_indices(&ds, &SiteSelector::All, &range);
        assert_eq!(chart.points.len(), idx.len());
        let xs: Vec<f64> = chart.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![500.0, 1500.0, 800.0]);
        assert_eq!(chart.booster_versions(), vec!["v1.0", "v1.1"]);
        assert_eq!(chart.max_size(), 1500.0);
    }

    #[test]
    fn aggregations_are_idempotent() {
        let ds = three_records();
        let known = sites(&["A", "B"]);
        let sel = SiteSelector::Site("A".into());
        let range = PayloadRange::new(100.0, 2000.0);
        assert_eq!(outcome_counts(&ds, &sel, &known), outcome_counts(&ds, &sel, &known));
        assert_eq!(scatter_points(&ds, &sel, &range), scatter_points(&ds, &sel, &range));
    }
}
