//! Selection-scoped code generation for Gherkin features.
//!
//! The crate covers the part of a step-stub generator that sits between a
//! parsed feature and the generated text:
//!
//! - detecting a `# language:` header and translating localised step
//!   keywords to the canonical `given`, `when`, `then`, `and`, and `but`;
//! - classifying a host-supplied selection as covering the whole feature,
//!   some scenarios, or some steps;
//! - collecting one generated unit per scenario or step line, in source
//!   order, and handing them to a formatter.
//!
//! Parsing, per-unit code synthesis, and formatting are collaborators behind
//! the [`FeatureParser`], [`CodeGenerator`], and [`Formatter`] traits.
//! [`GherkinParser`] provides a parser built on the `gherkin` crate.
//!
//! # Example
//!
//! ```
//! use std::convert::Infallible;
//!
//! use stepgen::{
//!     CodeGenerator, Feature, Formatter, GherkinParser, LanguageTable, Pipeline, SelectionInfo,
//! };
//!
//! struct Lines;
//!
//! impl CodeGenerator for Lines {
//!     type Command = usize;
//!     type Error = Infallible;
//!
//!     fn generate(&self, _feature: &Feature, line: usize) -> Result<usize, Infallible> {
//!         Ok(line)
//!     }
//! }
//!
//! struct Csv;
//!
//! impl Formatter<usize> for Csv {
//!     type Error = Infallible;
//!
//!     fn format(&self, lines: &[usize], _whole: bool) -> Result<String, Infallible> {
//!         Ok(lines.iter().map(ToString::to_string).collect::<Vec<_>>().join(","))
//!     }
//! }
//!
//! let text = "Feature: demo\n  Scenario: one\n    Given a\n  Scenario: two\n    Given b\n";
//! let pipeline = Pipeline::new(LanguageTable::builtin(), GherkinParser::new(), Lines, Csv);
//! let generation = pipeline.generate(text, &SelectionInfo::new(1, 5, text)).unwrap();
//! assert_eq!(generation.output.as_deref(), Some("2,4"));
//! ```

mod collaborators;
mod collect;
mod filter;
mod header;
mod keyword;
mod language;
mod model;
mod parser;
mod pipeline;
mod selection;
mod translate;

pub use collaborators::{CodeGenerator, FeatureParser, Formatter};
pub use collect::{Collected, collect_commands, scenario_lines};
pub use filter::{filter_feature, filter_scenarios};
pub use header::{LANGUAGE_HEADER, detect_language};
pub use keyword::{StepKind, StepKindParseError};
pub use language::{KeywordSet, LanguageTable, WILDCARD_MARKER};
pub use model::{Feature, LineTarget, Scenario, Step};
pub use parser::{GherkinParser, ParseError};
pub use pipeline::{Generation, Notice, Pipeline, PipelineConfig, PipelineError};
pub use selection::{
    SelectionHeuristic, SelectionHeuristicParseError, SelectionInfo, SelectionKind,
    classify_selection, classify_selection_structurally,
};
pub use translate::{StepTranslator, TranslationError, translate_feature};
