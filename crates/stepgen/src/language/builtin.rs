//! Step keywords for every Gherkin dialect.
//!
//! The catalogue is the upstream `gherkin-languages.json`, the data the
//! `gherkin` parser's own keyword tables are generated from, so every
//! `# language:` code the parser accepts has an entry. Spellings keep the
//! trailing space that separates most keywords from the step text. The
//! `formal` dialect is a `gherkin` extension outside the catalogue and is
//! registered separately.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::error;

use super::{KeywordSet, LanguageTable};
use crate::keyword::StepKind;

const CATALOGUE: &str = include_str!("gherkin-languages.json");

/// Step keyword lists of one catalogue entry. Structural keywords
/// (`feature`, `scenario`, ...) and display names are ignored.
#[derive(Debug, Deserialize)]
struct Dialect {
    given: Vec<String>,
    when: Vec<String>,
    then: Vec<String>,
    and: Vec<String>,
    but: Vec<String>,
}

impl From<Dialect> for KeywordSet {
    fn from(dialect: Dialect) -> Self {
        Self::new()
            .with(StepKind::Given, dialect.given)
            .with(StepKind::When, dialect.when)
            .with(StepKind::Then, dialect.then)
            .with(StepKind::And, dialect.and)
            .with(StepKind::But, dialect.but)
    }
}

pub(super) fn table() -> LanguageTable {
    parse_catalogue(CATALOGUE)
        .unwrap_or_else(|err| {
            error!(error = %err, "bundled Gherkin dialect catalogue is malformed");
            LanguageTable::new()
        })
        .with_language("formal", formal())
}

fn parse_catalogue(json: &str) -> Result<LanguageTable, serde_json::Error> {
    let dialects: HashMap<String, Dialect> = serde_json::from_str(json)?;
    Ok(dialects
        .into_iter()
        .fold(LanguageTable::new(), |table, (code, dialect)| {
            table.with_language(code, dialect.into())
        }))
}

fn formal() -> KeywordSet {
    KeywordSet::new()
        .with(StepKind::Given, ["Given"])
        .with(StepKind::When, ["When"])
        .with(StepKind::Then, ["Then"])
        .with(StepKind::And, ["*", "And"])
        .with(StepKind::But, ["But"])
}
