//! Immutable feature tree consumed by the generation pipeline.
//!
//! The tree carries only what selection and translation need: titles, step
//! keywords and text, and 1-based source line numbers. Step lists are held
//! behind [`Arc`] so a translated tree can share every list it did not
//! rewrite with the tree it was derived from.

use std::sync::Arc;

/// A single step line within a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Step {
    /// Keyword as it appears after parsing, either localised or canonical.
    pub keyword: String,
    /// Step text following the keyword.
    pub text: String,
    /// 1-based source line.
    pub line: usize,
}

impl Step {
    /// Create a step.
    #[must_use]
    pub fn new(keyword: impl Into<String>, text: impl Into<String>, line: usize) -> Self {
        Self {
            keyword: keyword.into(),
            text: text.into(),
            line,
        }
    }

    /// Return a copy of this step with a different keyword.
    #[must_use]
    pub fn with_keyword(&self, keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            text: self.text.clone(),
            line: self.line,
        }
    }
}

/// A scenario or scenario outline.
///
/// Both are represented by the same type; the list a value lives in on
/// [`Feature`] decides which one it is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scenario {
    /// Scenario title.
    pub title: String,
    /// 1-based line of the scenario header.
    pub line: usize,
    /// Steps in source order.
    pub steps: Arc<[Step]>,
}

impl Scenario {
    /// Create a scenario from its title, header line, and steps.
    #[must_use]
    pub fn new(title: impl Into<String>, line: usize, steps: impl Into<Arc<[Step]>>) -> Self {
        Self {
            title: title.into(),
            line,
            steps: steps.into(),
        }
    }

    /// Find the step declared on `line`.
    #[must_use]
    pub fn step_at(&self, line: usize) -> Option<&Step> {
        self.steps.iter().find(|step| step.line == line)
    }
}

/// A parsed feature document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Feature {
    /// Feature title.
    pub title: String,
    /// Locale declared by the document header, if any.
    pub language: Option<String>,
    /// Plain scenarios in source order.
    pub scenarios: Vec<Scenario>,
    /// Scenario outlines in source order.
    pub scenario_outlines: Vec<Scenario>,
}

/// Where a line of a feature lands in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTarget<'a> {
    /// The header of a plain scenario.
    Scenario(&'a Scenario),
    /// The header of a scenario outline.
    ScenarioOutline(&'a Scenario),
    /// A step inside a scenario or outline.
    Step(&'a Scenario, &'a Step),
}

impl Feature {
    /// Create a feature with no scenarios.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the declared locale, returning the updated feature.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Append a plain scenario, returning the updated feature.
    #[must_use]
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenarios.push(scenario);
        self
    }

    /// Append a scenario outline, returning the updated feature.
    #[must_use]
    pub fn with_scenario_outline(mut self, outline: Scenario) -> Self {
        self.scenario_outlines.push(outline);
        self
    }

    /// Whether the feature declares at least one scenario or outline.
    #[must_use]
    pub fn has_scenarios(&self) -> bool {
        !self.scenarios.is_empty() || !self.scenario_outlines.is_empty()
    }

    /// Iterate over scenarios followed by scenario outlines.
    pub fn all_scenarios(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter().chain(&self.scenario_outlines)
    }

    /// Iterate over every step of every scenario and outline.
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.all_scenarios().flat_map(|scenario| scenario.steps.iter())
    }

    /// Resolve what, if anything, is declared on `line`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepgen::{Feature, LineTarget, Scenario, Step};
    ///
    /// let feature = Feature::new("demo").with_scenario(Scenario::new(
    ///     "s",
    ///     2,
    ///     vec![Step::new("given", "a thing", 3)],
    /// ));
    /// assert!(matches!(feature.target_at(2), Some(LineTarget::Scenario(_))));
    /// assert!(matches!(feature.target_at(3), Some(LineTarget::Step(_, _))));
    /// assert!(feature.target_at(4).is_none());
    /// ```
    #[must_use]
    pub fn target_at(&self, line: usize) -> Option<LineTarget<'_>> {
        if let Some(scenario) = self.scenarios.iter().find(|s| s.line == line) {
            return Some(LineTarget::Scenario(scenario));
        }
        if let Some(outline) = self.scenario_outlines.iter().find(|s| s.line == line) {
            return Some(LineTarget::ScenarioOutline(outline));
        }
        self.all_scenarios().find_map(|scenario| {
            scenario
                .step_at(line)
                .map(|step| LineTarget::Step(scenario, step))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Feature {
        Feature::new("demo")
            .with_scenario(Scenario::new(
                "first",
                2,
                vec![Step::new("given", "a", 3), Step::new("then", "b", 4)],
            ))
            .with_scenario_outline(Scenario::new(
                "outline",
                6,
                vec![Step::new("when", "<x>", 7)],
            ))
    }

    #[test]
    fn empty_feature_has_no_scenarios() {
        assert!(!Feature::new("empty").has_scenarios());
        assert!(sample().has_scenarios());
    }

    #[test]
    fn steps_iterate_scenarios_before_outlines() {
        let lines: Vec<_> = sample().steps().map(|step| step.line).collect();
        assert_eq!(lines, vec![3, 4, 7]);
    }

    #[test]
    fn target_at_distinguishes_outline_headers() {
        let feature = sample();
        assert!(matches!(
            feature.target_at(6),
            Some(LineTarget::ScenarioOutline(outline)) if outline.title == "outline"
        ));
        assert!(matches!(
            feature.target_at(7),
            Some(LineTarget::Step(scenario, step)) if scenario.line == 6 && step.text == "<x>"
        ));
        assert_eq!(feature.target_at(1), None);
    }

    #[test]
    fn with_keyword_preserves_text_and_line() {
        let step = Step::new("soit", "un truc", 9);
        let renamed = step.with_keyword("given");
        assert_eq!(renamed, Step::new("given", "un truc", 9));
        assert_eq!(step.keyword, "soit");
    }
}
