//! Classification of a caller's selection.
//!
//! Hosts supply a 1-based inclusive line range plus the raw text it spans,
//! not a parsed cursor location. Classification therefore runs on those
//! inputs alone by default: a selection starting on the first line covers the
//! whole feature, a selection whose text mentions `scenario:` covers
//! scenarios, and anything else covers steps.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::Feature;

/// Marker searched for, case-insensitively, by the text heuristic.
const SCENARIO_MARKER: &str = "scenario:";

/// A host-supplied selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionInfo {
    /// First selected line (1-based).
    pub start: usize,
    /// Last selected line (1-based, inclusive).
    pub end: usize,
    /// Raw text spanned by the selection.
    pub text: String,
}

impl SelectionInfo {
    /// Create a selection.
    #[must_use]
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Whether `line` falls inside the selection.
    ///
    /// An inverted range (`start > end`) contains no lines.
    #[must_use]
    pub fn contains(&self, line: usize) -> bool {
        (self.start..=self.end).contains(&line)
    }
}

/// What a selection denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// The whole feature.
    Feature,
    /// One or more scenario headers.
    Scenario,
    /// A range of step lines.
    Step,
}

/// Strategy used to tell scenario selections from step selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionHeuristic {
    /// Search the raw selected text for `scenario:`.
    #[default]
    Text,
    /// Check whether a scenario or outline header lies inside the range.
    Structure,
}

/// Error returned when parsing a [`SelectionHeuristic`] fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown selection heuristic '{0}', expected one of: text, structure")]
pub struct SelectionHeuristicParseError(pub String);

impl FromStr for SelectionHeuristic {
    type Err = SelectionHeuristicParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "structure" | "structural" => Ok(Self::Structure),
            _ => Err(SelectionHeuristicParseError(s.to_string())),
        }
    }
}

impl fmt::Display for SelectionHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Structure => "structure",
        })
    }
}

/// Classify `selection` using the text heuristic.
///
/// Rules are applied in order and the first match wins:
///
/// 1. `start == 1` selects the whole feature, whatever the end or text.
/// 2. Text containing `scenario:` (any case) selects scenarios.
/// 3. Anything else selects steps.
///
/// # Examples
///
/// ```
/// use stepgen::{SelectionInfo, SelectionKind, classify_selection};
///
/// let kind = classify_selection(&SelectionInfo::new(5, 5, "Scenario: Foo"));
/// assert_eq!(kind, SelectionKind::Scenario);
/// ```
#[must_use]
pub fn classify_selection(selection: &SelectionInfo) -> SelectionKind {
    if selection.start == 1 {
        SelectionKind::Feature
    } else if selection.text.to_lowercase().contains(SCENARIO_MARKER) {
        SelectionKind::Scenario
    } else {
        SelectionKind::Step
    }
}

/// Classify `selection` against the parsed `feature`.
///
/// Same as [`classify_selection`] except that rule 2 asks whether any
/// scenario or outline header line lies inside the selected range. This
/// recognises localised headers such as `Scénario:` that the text heuristic
/// misses.
#[must_use]
pub fn classify_selection_structurally(
    selection: &SelectionInfo,
    feature: &Feature,
) -> SelectionKind {
    if selection.start == 1 {
        SelectionKind::Feature
    } else if feature
        .all_scenarios()
        .any(|scenario| selection.contains(scenario.line))
    {
        SelectionKind::Scenario
    } else {
        SelectionKind::Step
    }
}

impl SelectionHeuristic {
    /// Classify `selection` with this heuristic.
    #[must_use]
    pub fn classify(self, selection: &SelectionInfo, feature: &Feature) -> SelectionKind {
        match self {
            Self::Text => classify_selection(selection),
            Self::Structure => classify_selection_structurally(selection, feature),
        }
    }
}
