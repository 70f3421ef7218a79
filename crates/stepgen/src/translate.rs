//! Translation of localised step keywords to their canonical kinds.
//!
//! A [`StepTranslator`] holds the reverse lookup for one locale: every literal
//! keyword spelling, lowercased and stripped of trailing whitespace, mapped
//! to its [`StepKind`]. Applying it to a [`Feature`] yields a new tree in
//! which recognised step keywords read `given`, `when`, `then`, `and`, or
//! `but`; unrecognised keywords are carried over untouched.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::keyword::StepKind;
use crate::language::LanguageTable;
use crate::model::{Feature, Scenario, Step};

/// Errors raised while preparing a translation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// The locale has no entry in the language table.
    #[error("cannot find language '{0}' in the keyword table")]
    UnknownLanguage(String),
}

/// Reverse keyword lookup for a single locale.
#[derive(Debug, Clone)]
pub struct StepTranslator {
    language: String,
    lookup: HashMap<String, StepKind>,
}

impl StepTranslator {
    /// Build the reverse lookup for `language` from `table`.
    ///
    /// Wildcard entries are skipped. When a spelling is listed under several
    /// kinds, the later kind in `given, when, then, and, but` order wins.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::UnknownLanguage`] when `table` has no entry
    /// for `language`.
    pub fn new(table: &LanguageTable, language: &str) -> Result<Self, TranslationError> {
        let keywords = table
            .get(language)
            .ok_or_else(|| TranslationError::UnknownLanguage(language.to_string()))?;
        let lookup = keywords
            .literal_keywords()
            .map(|(kind, keyword)| (normalise_keyword(keyword), kind))
            .collect();
        Ok(Self {
            language: language.to_string(),
            lookup,
        })
    }

    /// The locale this translator was built for.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Resolve a step keyword, ignoring case and trailing whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepgen::{LanguageTable, StepKind, StepTranslator};
    ///
    /// let translator = StepTranslator::new(LanguageTable::builtin(), "de").unwrap();
    /// assert_eq!(translator.lookup("angenommen"), Some(StepKind::Given));
    /// assert_eq!(translator.lookup("Und "), Some(StepKind::And));
    /// assert_eq!(translator.lookup("*"), None);
    /// ```
    #[must_use]
    pub fn lookup(&self, keyword: &str) -> Option<StepKind> {
        self.lookup.get(&normalise_keyword(keyword)).copied()
    }

    /// Produce a copy of `feature` with canonical step keywords.
    ///
    /// The input is left untouched. Scenarios whose steps need no rewrite
    /// share their step list with the input.
    #[must_use]
    pub fn translate(&self, feature: &Feature) -> Feature {
        debug!(language = %self.language, feature = %feature.title, "translating steps");
        let translated = Feature {
            title: feature.title.clone(),
            language: feature.language.clone(),
            scenarios: self.translate_all(&feature.scenarios),
            scenario_outlines: self.translate_all(&feature.scenario_outlines),
        };
        debug!(
            language = %self.language,
            steps = translated.steps().count(),
            rewritten = count_rewritten(feature, &translated),
            "translated steps"
        );
        translated
    }

    fn translate_all(&self, scenarios: &[Scenario]) -> Vec<Scenario> {
        scenarios
            .iter()
            .map(|scenario| self.translate_scenario(scenario))
            .collect()
    }

    fn translate_scenario(&self, scenario: &Scenario) -> Scenario {
        if !scenario
            .steps
            .iter()
            .any(|step| self.canonical_for(step).is_some())
        {
            return scenario.clone();
        }
        let steps: Arc<[Step]> = scenario
            .steps
            .iter()
            .map(|step| {
                self.canonical_for(step)
                    .map_or_else(|| step.clone(), |kind| step.with_keyword(kind.as_str()))
            })
            .collect();
        Scenario {
            title: scenario.title.clone(),
            line: scenario.line,
            steps,
        }
    }

    /// The canonical kind for `step`, when its keyword differs from it.
    fn canonical_for(&self, step: &Step) -> Option<StepKind> {
        self.lookup(&step.keyword)
            .filter(|kind| step.keyword != kind.as_str())
    }
}

/// Translate `feature` from `language` using `table`.
///
/// # Errors
///
/// Returns [`TranslationError::UnknownLanguage`] when `table` has no entry
/// for `language`. The input remains usable as the untranslated tree.
pub fn translate_feature(
    feature: &Feature,
    language: &str,
    table: &LanguageTable,
) -> Result<Feature, TranslationError> {
    StepTranslator::new(table, language).map(|translator| translator.translate(feature))
}

fn normalise_keyword(keyword: &str) -> String {
    keyword.trim_end().to_lowercase()
}

fn count_rewritten(before: &Feature, after: &Feature) -> usize {
    before
        .steps()
        .zip(after.steps())
        .filter(|(old, new)| old.keyword != new.keyword)
        .count()
}
