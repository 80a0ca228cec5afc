use crate::dataset::Dataset;
use crate::models::{ChartPoint, DropdownOption};
use std::collections::{BTreeMap, BTreeSet};

/// Deduplicated, ascending label/value pairs for a dropdown.
pub fn build_options<I>(values: I) -> Vec<DropdownOption>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let distinct: BTreeSet<String> = values.into_iter().map(Into::into).collect();
    distinct.into_iter().map(DropdownOption::new).collect()
}

/// Per-date report counts with a running cumulative total, ascending by date.
/// Dates are ISO strings, so lexicographic order is chronological.
pub fn cumulative_by_date(dataset: &Dataset) -> Vec<ChartPoint> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for date in dataset.dates() {
        *counts.entry(date.to_string()).or_default() += 1;
    }

    let mut cumulative = 0;
    counts
        .into_iter()
        .map(|(date, count)| {
            cumulative += count;
            ChartPoint {
                date,
                count,
                cumulative,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let bytes = b"\
date_report,province,health_region,cases
2020-03-01,Ontario,Toronto,1
2020-03-01,Ontario,Ottawa,1
2020-03-02,Ontario,Toronto,1
2020-03-03,Quebec,Montreal,1
";
        Dataset::from_snapshot(bytes).unwrap()
    }

    #[test]
    fn build_options_deduplicates_and_sorts() {
        let options = build_options(["Quebec", "Ontario", "Quebec", "Alberta"]);
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Alberta", "Ontario", "Quebec"]);
        assert!(options.iter().all(|o| o.label == o.value));
    }

    #[test]
    fn build_options_is_idempotent() {
        let once = build_options(["b", "a", "b"]);
        let twice = build_options(once.iter().map(|o| o.value.clone()));
        assert_eq!(once, twice);
    }

    #[test]
    fn region_options_match_the_selected_province() {
        let dataset = sample();
        let ontario = dataset.restricted(Some("Ontario"), None);
        let options = build_options(ontario.regions());
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Ottawa", "Toronto"]);
    }

    #[test]
    fn cumulative_counts_run_ascending_by_date() {
        let points = cumulative_by_date(&sample());
        let dates: Vec<&str> = points.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["2020-03-01", "2020-03-02", "2020-03-03"]);
        let counts: Vec<u64> = points.iter().map(|p| p.count).collect();
        assert_eq!(counts, vec![2, 1, 1]);
        let cumulative: Vec<u64> = points.iter().map(|p| p.cumulative).collect();
        assert_eq!(cumulative, vec![2, 3, 4]);
    }

    #[test]
    fn cumulative_of_an_empty_dataset_is_empty() {
        let dataset = sample().restricted(Some("Atlantis"), None);
        assert!(cumulative_by_date(&dataset).is_empty());
    }
}
