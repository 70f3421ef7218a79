//! Seams to the parser, code generator, and formatter.
//!
//! The crate never turns text into a tree, never synthesises the body of a
//! generated unit, and never decides how units are laid out. Hosts plug those
//! behaviours in through the traits below.

use std::error::Error;

use crate::model::Feature;

/// Turns feature text into a [`Feature`] tree.
pub trait FeatureParser {
    /// Failure raised for malformed input.
    type Error: Error + Send + Sync + 'static;

    /// Parse `text` into a feature.
    ///
    /// # Errors
    ///
    /// Implementations report input they cannot parse.
    fn parse(&self, text: &str) -> Result<Feature, Self::Error>;
}

/// Produces one generated unit for a line of a feature.
///
/// Implementations must be deterministic for a given feature and line. Lines
/// that hold neither a scenario nor a step are passed through unchecked; an
/// implementation may reject them or return an empty unit.
pub trait CodeGenerator {
    /// The generated unit.
    type Command;
    /// Failure raised while generating.
    type Error: Error + Send + Sync + 'static;

    /// Generate the unit targeting `line` of `feature`.
    ///
    /// # Errors
    ///
    /// Implementations report lines they refuse to generate for.
    fn generate(&self, feature: &Feature, line: usize) -> Result<Self::Command, Self::Error>;
}

/// Renders generated units into the final output text.
pub trait Formatter<C> {
    /// Failure raised while rendering.
    type Error: Error + Send + Sync + 'static;

    /// Render `commands` in order.
    ///
    /// `whole_feature` is set when the units cover the entire feature, in
    /// which case a document-level wrapper is expected around them.
    ///
    /// # Errors
    ///
    /// Implementations report units they cannot render.
    fn format(&self, commands: &[C], whole_feature: bool) -> Result<String, Self::Error>;
}

impl<T: FeatureParser + ?Sized> FeatureParser for &T {
    type Error = T::Error;

    fn parse(&self, text: &str) -> Result<Feature, Self::Error> {
        (**self).parse(text)
    }
}

impl<T: CodeGenerator + ?Sized> CodeGenerator for &T {
    type Command = T::Command;
    type Error = T::Error;

    fn generate(&self, feature: &Feature, line: usize) -> Result<Self::Command, Self::Error> {
        (**self).generate(feature, line)
    }
}

impl<C, T: Formatter<C> + ?Sized> Formatter<C> for &T {
    type Error = T::Error;

    fn format(&self, commands: &[C], whole_feature: bool) -> Result<String, Self::Error> {
        (**self).format(commands, whole_feature)
    }
}
