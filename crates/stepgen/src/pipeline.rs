//! End-to-end generation from feature text and a selection.
//!
//! [`Pipeline::generate`] runs a single stateless pass:
//!
//! 1. detect the `# language:` header;
//! 2. parse the text;
//! 3. translate step keywords when a locale was declared;
//! 4. classify the selection;
//! 5. collect generated units;
//! 6. format them.
//!
//! Conditions the host should surface but that do not stop generation, such
//! as an unknown locale, are returned as [`Notice`] values alongside the
//! output and logged through `tracing`.

use std::error::Error;
use std::fmt;

use thiserror::Error;
use tracing::{debug, warn};

use crate::collaborators::{CodeGenerator, FeatureParser, Formatter};
use crate::collect::collect_commands;
use crate::header::detect_language;
use crate::language::LanguageTable;
use crate::model::Feature;
use crate::selection::{SelectionHeuristic, SelectionInfo};
use crate::translate::{TranslationError, translate_feature};

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Failures raised by a collaborator during generation.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The parser rejected the feature text.
    #[error("failed to parse feature: {0}")]
    Parse(#[source] BoxError),
    /// The code generator rejected a line.
    #[error("failed to generate code for line {line}: {source}")]
    Generate {
        /// Line being generated when the failure occurred.
        line: usize,
        /// Underlying generator error.
        #[source]
        source: BoxError,
    },
    /// The formatter rejected the collected units.
    #[error("failed to format generated code: {0}")]
    Format(#[source] BoxError),
}

/// A non-fatal condition for the host to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The declared locale is missing from the language table; steps were
    /// left untranslated.
    UnknownLanguage(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLanguage(code) => {
                write!(f, "cannot find language '{code}'; steps were not translated")
            }
        }
    }
}

/// Result of a generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Formatted output, or `None` when there was nothing to generate.
    pub output: Option<String>,
    /// Conditions encountered along the way.
    pub notices: Vec<Notice>,
}

/// Behavioural switches for a [`Pipeline`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    /// How scenario selections are told apart from step selections.
    pub heuristic: SelectionHeuristic,
}

impl PipelineConfig {
    /// Return a copy using `heuristic`.
    #[must_use]
    pub fn with_heuristic(mut self, heuristic: SelectionHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }
}

/// Wires a parser, code generator, and formatter around the core transforms.
#[derive(Debug, Clone)]
pub struct Pipeline<'t, P, G, F> {
    table: &'t LanguageTable,
    parser: P,
    generator: G,
    formatter: F,
    config: PipelineConfig,
}

impl<'t, P, G, F> Pipeline<'t, P, G, F>
where
    P: FeatureParser,
    G: CodeGenerator,
    F: Formatter<G::Command>,
{
    /// Assemble a pipeline with the default configuration.
    #[must_use]
    pub fn new(table: &'t LanguageTable, parser: P, generator: G, formatter: F) -> Self {
        Self {
            table,
            parser,
            generator,
            formatter,
            config: PipelineConfig::default(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> PipelineConfig {
        self.config
    }

    /// Generate output for `selection` within the feature `text`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when the parser, code generator, or
    /// formatter fails. An unknown locale is not an error; it is reported as
    /// a [`Notice`].
    pub fn generate(
        &self,
        text: &str,
        selection: &SelectionInfo,
    ) -> Result<Generation, PipelineError> {
        let mut notices = Vec::new();
        let parsed = self
            .parser
            .parse(text)
            .map_err(|err| PipelineError::Parse(Box::new(err)))?;
        let feature = self.translate(parsed, detect_language(text), &mut notices);

        let kind = self.config.heuristic.classify(selection, &feature);
        debug!(
            start = selection.start,
            end = selection.end,
            ?kind,
            heuristic = %self.config.heuristic,
            "classified selection"
        );

        let generator = LineTracking(&self.generator);
        let Some(collected) = collect_commands(&feature, selection, kind, &generator)
            .map_err(|LineError { line, source }| PipelineError::Generate {
                line,
                source: Box::new(source),
            })?
        else {
            return Ok(Generation {
                output: None,
                notices,
            });
        };
        if collected.commands.is_empty() {
            debug!("selection produced no commands");
            return Ok(Generation {
                output: None,
                notices,
            });
        }

        let output = self
            .formatter
            .format(&collected.commands, collected.whole_feature)
            .map_err(|err| PipelineError::Format(Box::new(err)))?;
        Ok(Generation {
            output: Some(output),
            notices,
        })
    }

    fn translate(
        &self,
        parsed: Feature,
        language: Option<&str>,
        notices: &mut Vec<Notice>,
    ) -> Feature {
        let Some(language) = language else {
            return parsed;
        };
        translate_feature(&parsed, language, self.table).unwrap_or_else(
            |TranslationError::UnknownLanguage(code)| {
                warn!(language = %code, "cannot find language in keyword table");
                notices.push(Notice::UnknownLanguage(code));
                parsed
            },
        )
    }
}

/// Generator error tagged with the line that produced it.
#[derive(Debug, Error)]
#[error("line {line}: {source}")]
struct LineError<E: Error + 'static> {
    line: usize,
    #[source]
    source: E,
}

/// Adapter recording which line a generator failed on.
struct LineTracking<'g, G>(&'g G);

impl<G: CodeGenerator> CodeGenerator for LineTracking<'_, G> {
    type Command = G::Command;
    type Error = LineError<G::Error>;

    fn generate(&self, feature: &Feature, line: usize) -> Result<Self::Command, Self::Error> {
        self.0
            .generate(feature, line)
            .map_err(|source| LineError { line, source })
    }
}
