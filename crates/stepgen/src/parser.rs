//! [`FeatureParser`] backed by the `gherkin` crate.
//!
//! The adapter flattens the `gherkin` AST into the line-oriented tree used by
//! the pipeline. Scenarios carrying Examples blocks become outlines whatever
//! keyword introduced them, and scenarios nested in `Rule:` blocks are lifted
//! into the feature's lists in source order. Line numbers are the 1-based
//! positions `gherkin` records for each scenario and step keyword.

use std::borrow::Cow;

use gherkin::GherkinEnv;

use crate::collaborators::FeatureParser;
use crate::header::detect_language;
use crate::model::{Feature, Scenario, Step};

/// Errors raised while parsing feature text.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The text is not valid Gherkin.
    #[error("failed to parse feature file: {0}")]
    Gherkin(#[from] gherkin::ParseError),
}

/// Parses Gherkin text with the default `gherkin` environment.
///
/// The default environment honours a `# language:` header for the grammar's
/// own keywords, so localised features parse as-is. Step keywords are
/// normalised to lowercase with surrounding whitespace removed; the
/// translator then maps them onto canonical kinds.
#[derive(Debug, Clone, Copy, Default)]
pub struct GherkinParser;

impl GherkinParser {
    /// Create a parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FeatureParser for GherkinParser {
    type Error = ParseError;

    fn parse(&self, text: &str) -> Result<Feature, Self::Error> {
        let source = normalise_trailing_newline(text);
        let parsed = gherkin::Feature::parse(&*source, GherkinEnv::default())?;

        let mut feature = Feature::new(parsed.name.trim());
        feature.language = detect_language(text).map(str::to_string);

        let nested = parsed.rules.iter().flat_map(|rule| rule.scenarios.iter());
        let mut all: Vec<&gherkin::Scenario> = parsed.scenarios.iter().chain(nested).collect();
        all.sort_by_key(|scenario| scenario.position.line);

        for scenario in all {
            let converted = convert_scenario(scenario);
            if is_scenario_outline(scenario) {
                feature.scenario_outlines.push(converted);
            } else {
                feature.scenarios.push(converted);
            }
        }
        Ok(feature)
    }
}

/// A scenario is an outline when it has Examples, regardless of keyword.
fn is_scenario_outline(scenario: &gherkin::Scenario) -> bool {
    !scenario.examples.is_empty()
}

fn convert_scenario(scenario: &gherkin::Scenario) -> Scenario {
    let steps: Vec<Step> = scenario
        .steps
        .iter()
        .map(|step| {
            Step::new(
                normalise_keyword(&step.keyword),
                step.value.clone(),
                step.position.line,
            )
        })
        .collect();
    Scenario::new(scenario.name.trim(), scenario.position.line, steps)
}

fn normalise_keyword(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}

fn normalise_trailing_newline(text: &str) -> Cow<'_, str> {
    if text.ends_with('\n') {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("{text}\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[expect(clippy::expect_used, reason = "tests use explicit failures for clarity")]
    fn parse(text: &str) -> Feature {
        GherkinParser::new().parse(text).expect("feature should parse")
    }

    #[test]
    fn comments_and_descriptions_do_not_shift_lines() {
        let feature = parse(concat!(
            "# a leading comment\n",
            "Feature: positions\n",
            "  No behaviour has been agreed yet.\n",
            "\n",
            "  Scenario: first\n",
            "    # setup\n",
            "    Given a\n",
            "\n",
            "    When b\n",
        ));
        let [first] = feature.scenarios.as_slice() else {
            panic!("expected one scenario");
        };
        assert_eq!(first.line, 5);
        let lines: Vec<_> = first.steps.iter().map(|step| step.line).collect();
        assert_eq!(lines, vec![7, 9]);
    }

    #[test]
    fn description_only_feature_has_no_scenarios() {
        let feature = parse("Feature: Nothing yet\n  No behaviour has been agreed yet.\n");
        assert_eq!(feature.title, "Nothing yet");
        assert!(!feature.has_scenarios());
    }

    #[test]
    fn splits_scenarios_and_outlines() {
        let feature = parse(concat!(
            "Feature: demo\n",
            "\n",
            "  Scenario: plain\n",
            "    Given a message\n",
            "    When it is sent\n",
            "\n",
            "  Scenario Outline: outline\n",
            "    Then result is <Result>\n",
            "    Examples:\n",
            "      | Result |\n",
            "      | ok     |\n",
        ));
        assert_eq!(feature.title, "demo");
        assert_eq!(feature.language, None);

        let [plain] = feature.scenarios.as_slice() else {
            panic!("expected one plain scenario");
        };
        assert_eq!(plain.title, "plain");
        assert_eq!(plain.line, 3);
        let steps: Vec<_> = plain
            .steps
            .iter()
            .map(|step| (step.keyword.as_str(), step.text.as_str(), step.line))
            .collect();
        assert_eq!(
            steps,
            vec![("given", "a message", 4), ("when", "it is sent", 5)]
        );

        let [outline] = feature.scenario_outlines.as_slice() else {
            panic!("expected one outline");
        };
        assert_eq!(outline.title, "outline");
        assert_eq!(outline.line, 7);
        assert_eq!(outline.steps.first().map(|step| step.line), Some(8));
    }

    #[test]
    fn lifts_rule_scenarios() {
        let feature = parse(concat!(
            "Feature: rules\n",
            "  Scenario: top\n",
            "    Given a\n",
            "  Rule: nested\n",
            "    Scenario: inner\n",
            "      Given b\n",
        ));
        let lines: Vec<_> = feature.scenarios.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![2, 5]);
    }

    #[test]
    fn tagged_scenario_uses_keyword_line() {
        let feature = parse(concat!(
            "Feature: tags\n",
            "  @smoke @fast\n",
            "  Scenario: tagged\n",
            "    Given a\n",
        ));
        let lines: Vec<_> = feature.scenarios.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![3]);
    }

    #[test]
    fn parses_text_without_trailing_newline() {
        let feature = parse("Feature: tail\n  Scenario: s\n    Given last");
        assert_eq!(feature.steps().map(|step| step.line).collect::<Vec<_>>(), vec![3]);
    }

    #[expect(clippy::expect_used, reason = "tests use explicit failures for clarity")]
    #[test]
    fn records_declared_language() {
        let feature = parse(concat!(
            "# language: fr\n",
            "Fonctionnalité: Addition\n",
            "  Scénario: Ajouter\n",
            "    Soit une calculatrice\n",
        ));
        assert_eq!(feature.language.as_deref(), Some("fr"));
        let step = feature.steps().next().expect("step should parse");
        assert_eq!(step.keyword, "soit");
        assert_eq!(step.line, 4);
    }

    #[test]
    fn rejects_invalid_gherkin() {
        let result = GherkinParser::new().parse("this is not gherkin\n");
        assert!(matches!(result, Err(ParseError::Gherkin(_))));
    }
}
