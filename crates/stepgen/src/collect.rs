//! Ordered collection of generated units for a classified selection.

use tracing::debug;

use crate::collaborators::CodeGenerator;
use crate::filter::filter_feature;
use crate::model::Feature;
use crate::selection::{SelectionInfo, SelectionKind};

/// Units collected for a selection, in generation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collected<C> {
    /// Generated units.
    pub commands: Vec<C>,
    /// Whether the units cover the whole feature.
    pub whole_feature: bool,
}

/// Header lines of every scenario and outline, ascending.
///
/// A scenario and an outline sharing a line yield that line twice; the
/// generator only sees line numbers, so their relative order is moot.
#[must_use]
pub fn scenario_lines(feature: &Feature) -> Vec<usize> {
    let mut lines: Vec<usize> = feature.all_scenarios().map(|scenario| scenario.line).collect();
    lines.sort_unstable();
    lines
}

/// Invoke `generator` for every unit covered by `selection`.
///
/// - [`SelectionKind::Feature`]: one unit per scenario and outline, in line
///   order, flagged as whole-feature.
/// - [`SelectionKind::Scenario`]: as above, restricted to headers inside the
///   selected range. The generator sees the restricted feature.
/// - [`SelectionKind::Step`]: one unit per selected line, whether or not a
///   step lives there.
///
/// Returns `Ok(None)` without calling the generator when the feature has no
/// scenarios or outlines.
///
/// # Errors
///
/// Propagates the first error returned by `generator`.
pub fn collect_commands<G: CodeGenerator>(
    feature: &Feature,
    selection: &SelectionInfo,
    kind: SelectionKind,
    generator: &G,
) -> Result<Option<Collected<G::Command>>, G::Error> {
    if !feature.has_scenarios() {
        debug!(feature = %feature.title, "feature has no scenarios; nothing to collect");
        return Ok(None);
    }
    let collected = match kind {
        SelectionKind::Feature => Collected {
            commands: generate_for_scenarios(feature, generator)?,
            whole_feature: true,
        },
        SelectionKind::Scenario => {
            let filtered = filter_feature(feature, selection);
            Collected {
                commands: generate_for_scenarios(&filtered, generator)?,
                whole_feature: false,
            }
        }
        SelectionKind::Step => Collected {
            commands: (selection.start..=selection.end)
                .map(|line| generator.generate(feature, line))
                .collect::<Result<_, _>>()?,
            whole_feature: false,
        },
    };
    debug!(?kind, commands = collected.commands.len(), "collected commands");
    Ok(Some(collected))
}

fn generate_for_scenarios<G: CodeGenerator>(
    feature: &Feature,
    generator: &G,
) -> Result<Vec<G::Command>, G::Error> {
    scenario_lines(feature)
        .into_iter()
        .map(|line| generator.generate(feature, line))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::convert::Infallible;

    use super::*;
    use crate::model::{Scenario, Step};
    use rstest::{fixture, rstest};

    /// Generator that records the lines it is asked for.
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(usize, usize)>>,
    }

    impl CodeGenerator for Recorder {
        type Command = usize;
        type Error = Infallible;

        fn generate(&self, feature: &Feature, line: usize) -> Result<usize, Infallible> {
            let visible = feature.all_scenarios().count();
            self.calls.borrow_mut().push((line, visible));
            Ok(line)
        }
    }

    impl Recorder {
        fn lines(&self) -> Vec<usize> {
            self.calls.borrow().iter().map(|(line, _)| *line).collect()
        }
    }

    #[fixture]
    fn feature() -> Feature {
        let scenario = |line: usize| {
            Scenario::new(
                format!("at {line}"),
                line,
                vec![Step::new("given", "a step", line + 1)],
            )
        };
        Feature::new("demo")
            .with_scenario(scenario(12))
            .with_scenario(scenario(3))
            .with_scenario(scenario(7))
            .with_scenario_outline(scenario(20))
    }

    #[expect(clippy::unwrap_used, reason = "the recorder never fails")]
    fn collect(
        feature: &Feature,
        selection: &SelectionInfo,
        kind: SelectionKind,
        recorder: &Recorder,
    ) -> Option<Collected<usize>> {
        collect_commands(feature, selection, kind, recorder).unwrap()
    }

    #[rstest]
    fn feature_selection_sorts_by_line(feature: Feature) {
        let recorder = Recorder::default();
        let collected = collect(
            &feature,
            &SelectionInfo::new(1, 1, "Feature: demo"),
            SelectionKind::Feature,
            &recorder,
        );
        assert_eq!(
            collected,
            Some(Collected {
                commands: vec![3, 7, 12, 20],
                whole_feature: true,
            })
        );
        assert_eq!(recorder.lines(), vec![3, 7, 12, 20]);
    }

    #[rstest]
    fn scenario_selection_uses_filtered_feature(feature: Feature) {
        let recorder = Recorder::default();
        let collected = collect(
            &feature,
            &SelectionInfo::new(5, 20, "Scenario: at 7"),
            SelectionKind::Scenario,
            &recorder,
        );
        assert_eq!(
            collected,
            Some(Collected {
                commands: vec![7, 12, 20],
                whole_feature: false,
            })
        );
        assert_eq!(*recorder.calls.borrow(), vec![(7, 3), (12, 3), (20, 3)]);
    }

    #[rstest]
    fn step_selection_visits_every_line(feature: Feature) {
        let recorder = Recorder::default();
        let collected = collect(
            &feature,
            &SelectionInfo::new(4, 6, "  Given a step"),
            SelectionKind::Step,
            &recorder,
        );
        assert_eq!(
            collected.map(|c| (c.commands, c.whole_feature)),
            Some((vec![4, 5, 6], false))
        );
    }

    #[rstest]
    fn step_selection_without_step_still_generates(feature: Feature) {
        let recorder = Recorder::default();
        let _ = collect(
            &feature,
            &SelectionInfo::new(5, 5, ""),
            SelectionKind::Step,
            &recorder,
        );
        assert_eq!(recorder.lines(), vec![5]);
    }

    #[rstest]
    fn inverted_step_range_generates_nothing(feature: Feature) {
        let recorder = Recorder::default();
        let collected = collect(
            &feature,
            &SelectionInfo::new(9, 4, ""),
            SelectionKind::Step,
            &recorder,
        );
        assert_eq!(collected.map(|c| c.commands.len()), Some(0));
        assert!(recorder.lines().is_empty());
    }

    #[rstest]
    #[case(SelectionKind::Feature)]
    #[case(SelectionKind::Scenario)]
    #[case(SelectionKind::Step)]
    fn empty_feature_is_not_collected(#[case] kind: SelectionKind) {
        let recorder = Recorder::default();
        let collected = collect(
            &Feature::new("empty"),
            &SelectionInfo::new(1, 10, "Scenario: none"),
            kind,
            &recorder,
        );
        assert_eq!(collected, None);
        assert!(recorder.lines().is_empty());
    }

    #[test]
    fn shared_lines_are_generated_twice() {
        let feature = Feature::new("tie")
            .with_scenario_outline(Scenario::new("outline", 4, Vec::new()))
            .with_scenario(Scenario::new("scenario", 4, Vec::new()))
            .with_scenario(Scenario::new("early", 2, Vec::new()));
        assert_eq!(scenario_lines(&feature), vec![2, 4, 4]);
    }
}
