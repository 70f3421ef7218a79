//! Line-range filtering of scenarios.

use crate::model::{Feature, Scenario};
use crate::selection::SelectionInfo;

/// Keep the scenarios whose header line lies in `selection`, in order.
///
/// # Examples
///
/// ```
/// use stepgen::{Scenario, SelectionInfo, filter_scenarios};
///
/// let scenarios: Vec<_> = [3, 10, 18]
///     .into_iter()
///     .map(|line| Scenario::new("s", line, Vec::new()))
///     .collect();
/// let kept = filter_scenarios(&scenarios, &SelectionInfo::new(5, 18, ""));
/// let lines: Vec<_> = kept.iter().map(|s| s.line).collect();
/// assert_eq!(lines, vec![10, 18]);
/// ```
#[must_use]
pub fn filter_scenarios(scenarios: &[Scenario], selection: &SelectionInfo) -> Vec<Scenario> {
    scenarios
        .iter()
        .filter(|scenario| selection.contains(scenario.line))
        .cloned()
        .collect()
}

/// Derive a feature restricted to the scenarios and outlines in `selection`.
///
/// Both lists are filtered independently; everything else is copied.
#[must_use]
pub fn filter_feature(feature: &Feature, selection: &SelectionInfo) -> Feature {
    Feature {
        title: feature.title.clone(),
        language: feature.language.clone(),
        scenarios: filter_scenarios(&feature.scenarios, selection),
        scenario_outlines: filter_scenarios(&feature.scenario_outlines, selection),
    }
}
