//! Generation plans: what each generated unit of a selection would target.
//!
//! [`PlanGenerator`] resolves every line the pipeline asks for into a
//! [`PlannedUnit`], and [`OutputFormat`] renders the collected units as text
//! or JSON.

use std::convert::Infallible;
use std::fmt;

use serde::Serialize;
use stepgen::{
    CodeGenerator, Feature, Formatter, GherkinParser, Generation, LanguageTable, LineTarget,
    Pipeline, PipelineConfig, SelectionInfo,
};

use crate::config::{CliConfig, OutputFormat};
use crate::error::CliError;

/// Indentation of units beneath a `Feature:` header.
const UNIT_INDENT: &str = "  ";

/// What a planned unit lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// A scenario header.
    Scenario,
    /// A scenario outline header.
    Outline,
    /// A step line.
    Step,
    /// A line holding no scenario or step.
    Empty,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scenario => "scenario",
            Self::Outline => "outline",
            Self::Step => "step",
            Self::Empty => "empty",
        })
    }
}

/// One generated unit of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedUnit {
    /// What the unit targets.
    pub kind: UnitKind,
    /// Requested line (1-based).
    pub line: usize,
    /// Canonical step keyword, for steps only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Scenario title or step text; empty for [`UnitKind::Empty`].
    pub text: String,
    /// Title of the feature the unit was generated from.
    #[serde(skip)]
    pub feature: String,
}

impl fmt::Display for PlannedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.line)?;
        match (&self.kind, &self.keyword) {
            (UnitKind::Step, Some(keyword)) => write!(f, "{keyword} {}", self.text),
            (UnitKind::Empty, _) => write!(f, "{}", self.kind),
            (kind, _) => write!(f, "{kind} {}", self.text),
        }
    }
}

/// Code generator producing a [`PlannedUnit`] per requested line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanGenerator;

impl CodeGenerator for PlanGenerator {
    type Command = PlannedUnit;
    type Error = Infallible;

    fn generate(&self, feature: &Feature, line: usize) -> Result<PlannedUnit, Infallible> {
        let (kind, keyword, text) = match feature.target_at(line) {
            Some(LineTarget::Scenario(scenario)) => {
                (UnitKind::Scenario, None, scenario.title.clone())
            }
            Some(LineTarget::ScenarioOutline(outline)) => {
                (UnitKind::Outline, None, outline.title.clone())
            }
            Some(LineTarget::Step(_, step)) => {
                (UnitKind::Step, Some(step.keyword.clone()), step.text.clone())
            }
            None => (UnitKind::Empty, None, String::new()),
        };
        Ok(PlannedUnit {
            kind,
            line,
            keyword,
            text,
            feature: feature.title.clone(),
        })
    }
}

#[derive(Serialize)]
struct JsonPlan<'a> {
    whole_feature: bool,
    units: &'a [PlannedUnit],
}

impl Formatter<PlannedUnit> for OutputFormat {
    type Error = serde_json::Error;

    fn format(&self, units: &[PlannedUnit], whole_feature: bool) -> Result<String, Self::Error> {
        match self {
            Self::Text => Ok(render_text(units, whole_feature)),
            Self::Json => serde_json::to_string_pretty(&JsonPlan {
                whole_feature,
                units,
            }),
        }
    }
}

fn render_text(units: &[PlannedUnit], whole_feature: bool) -> String {
    let lines = units.iter().map(ToString::to_string);
    if !whole_feature {
        return lines.collect::<Vec<_>>().join("\n");
    }
    let title = units.first().map_or("", |unit| unit.feature.as_str());
    std::iter::once(format!("Feature: {title}"))
        .chain(lines.map(|line| format!("{UNIT_INDENT}{line}")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the selection covering lines `start..=end` of `source`.
///
/// `end` defaults to the last line. The selection text is the covered lines
/// joined by `\n`.
#[must_use]
pub fn select_lines(source: &str, start: usize, end: Option<usize>) -> SelectionInfo {
    let end = end.unwrap_or_else(|| source.lines().count());
    let text = source
        .lines()
        .enumerate()
        .filter(|(index, _)| (start..=end).contains(&(index + 1)))
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\n");
    SelectionInfo::new(start, end, text)
}

/// Plan generation for `selection` within `source`.
///
/// # Errors
///
/// Returns `CliError::Pipeline` when the source fails to parse or the plan
/// fails to render.
pub fn plan(
    source: &str,
    selection: &SelectionInfo,
    config: &CliConfig,
) -> Result<Generation, CliError> {
    let pipeline = Pipeline::new(
        LanguageTable::builtin(),
        GherkinParser::new(),
        PlanGenerator,
        config.format,
    )
    .with_config(PipelineConfig::default().with_heuristic(config.heuristic));
    Ok(pipeline.generate(source, selection)?)
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests use explicit failures for clarity")]
mod tests {
    use rstest::rstest;
    use stepgen::{Scenario, SelectionHeuristic, Step};

    use super::*;

    const SOURCE: &str = "\
Feature: Tills
  Scenario: Open
    Given a till
    When it opens

  Scenario: Close
    Then it closes
";

    fn feature() -> Feature {
        Feature::new("Tills").with_scenario(Scenario::new(
            "Open",
            2,
            vec![Step::new("given", "a till", 3), Step::new("when", "it opens", 4)],
        ))
    }

    fn unit(kind: UnitKind, line: usize, keyword: Option<&str>, text: &str) -> PlannedUnit {
        PlannedUnit {
            kind,
            line,
            keyword: keyword.map(str::to_string),
            text: text.to_string(),
            feature: "Tills".to_string(),
        }
    }

    #[rstest]
    #[case(2, unit(UnitKind::Scenario, 2, None, "Open"))]
    #[case(4, unit(UnitKind::Step, 4, Some("when"), "it opens"))]
    #[case(9, unit(UnitKind::Empty, 9, None, ""))]
    fn generator_resolves_lines(#[case] line: usize, #[case] expected: PlannedUnit) {
        let Ok(planned) = PlanGenerator.generate(&feature(), line);
        assert_eq!(planned, expected);
    }

    #[test]
    fn text_rendering_lists_units() {
        let units = [
            unit(UnitKind::Step, 3, Some("given"), "a till"),
            unit(UnitKind::Empty, 5, None, ""),
        ];
        let text = OutputFormat::Text.format(&units, false).expect("text");
        assert_eq!(text, "3: given a till\n5: empty");
    }

    #[test]
    fn whole_feature_text_is_wrapped() {
        let units = [
            unit(UnitKind::Scenario, 2, None, "Open"),
            unit(UnitKind::Outline, 6, None, "Close"),
        ];
        let text = OutputFormat::Text.format(&units, true).expect("text");
        assert_eq!(text, "Feature: Tills\n  2: scenario Open\n  6: outline Close");
    }

    #[test]
    fn json_rendering_carries_flag_and_units() {
        let units = [unit(UnitKind::Step, 3, Some("given"), "a till")];
        let json = OutputFormat::Json.format(&units, true).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(
            value,
            serde_json::json!({
                "whole_feature": true,
                "units": [{ "kind": "step", "line": 3, "keyword": "given", "text": "a till" }],
            })
        );
    }

    #[rstest]
    #[case(1, None, "Feature: Tills\n  Scenario: Open\n    Given a till\n    When it opens\n\n  Scenario: Close\n    Then it closes")]
    #[case(3, Some(4), "    Given a till\n    When it opens")]
    #[case(5, Some(3), "")]
    fn selection_text_spans_lines(
        #[case] start: usize,
        #[case] end: Option<usize>,
        #[case] text: &str,
    ) {
        let selection = select_lines(SOURCE, start, end);
        assert_eq!(selection.start, start);
        assert_eq!(selection.text, text);
    }

    #[test]
    fn default_end_is_last_line() {
        assert_eq!(select_lines(SOURCE, 2, None).end, 7);
    }

    #[test]
    fn plan_renders_selected_steps() {
        let selection = select_lines(SOURCE, 3, Some(4));
        let generation = plan(SOURCE, &selection, &CliConfig::default()).expect("plan");
        assert_eq!(
            generation.output.as_deref(),
            Some("3: given a till\n4: when it opens")
        );
    }

    #[test]
    fn plan_honours_configured_heuristic() {
        let selection = SelectionInfo::new(6, 7, "Scénario: Close\n    Then it closes");
        let config = CliConfig {
            heuristic: SelectionHeuristic::Structure,
            ..CliConfig::default()
        };
        let generation = plan(SOURCE, &selection, &config).expect("plan");
        assert_eq!(generation.output.as_deref(), Some("6: scenario Close"));
    }

    #[test]
    fn plan_reports_parse_failures() {
        let source = "this is not gherkin\n";
        let result = plan(source, &select_lines(source, 1, None), &CliConfig::default());
        assert!(matches!(result, Err(CliError::Pipeline(_))));
    }
}
