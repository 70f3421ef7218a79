//! Canonical step kinds.
//!
//! Every localised step keyword maps onto one of five canonical kinds. The
//! kinds render as the lowercase English keywords consumed by downstream code
//! generators, regardless of the locale the feature was written in.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Canonical kind of a Gherkin step.
///
/// Unlike a parser's contextual step type, `And` and `But` stay distinct:
/// translation only rewrites the spelling of a keyword and never resolves a
/// conjunction against the preceding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StepKind {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform an action when testing behaviour.
    When,
    /// Assert the expected outcome of a scenario.
    Then,
    /// Additional conditions that share context with the previous step.
    And,
    /// Negative or contrasting conditions.
    But,
}

impl StepKind {
    /// All kinds in their conventional order.
    pub const ALL: [Self; 5] = [Self::Given, Self::When, Self::Then, Self::And, Self::But];

    /// Return the canonical keyword spelling.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepgen::StepKind;
    ///
    /// assert_eq!(StepKind::Given.as_str(), "given");
    /// assert_eq!(StepKind::But.as_str(), "but");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Given => "given",
            Self::When => "when",
            Self::Then => "then",
            Self::And => "and",
            Self::But => "but",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`StepKind`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid step kind: {0}")]
pub struct StepKindParseError(pub String);

impl FromStr for StepKind {
    type Err = StepKindParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| trimmed.eq_ignore_ascii_case(kind.as_str()))
            .ok_or_else(|| StepKindParseError(trimmed.to_string()))
    }
}

impl TryFrom<&str> for StepKind {
    type Error = StepKindParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
