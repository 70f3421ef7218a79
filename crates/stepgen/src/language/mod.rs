//! Per-locale step keyword dictionaries.
//!
//! A [`LanguageTable`] maps locale codes (as written in a feature's
//! `# language:` header) to a [`KeywordSet`]. The table is read-only once
//! built; [`LanguageTable::builtin`] exposes a process-wide instance carrying
//! the step keywords of every dialect the `gherkin` parser understands.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::keyword::StepKind;

mod builtin;

/// Marker that flags a keyword entry as a placeholder rather than a literal
/// spelling (Gherkin's `* ` bullet step).
pub const WILDCARD_MARKER: char = '*';

/// Locale-specific spellings for each canonical step kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    given: Vec<String>,
    when: Vec<String>,
    then: Vec<String>,
    and: Vec<String>,
    but: Vec<String>,
}

impl KeywordSet {
    /// Create an empty keyword set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append spellings for `kind`, returning the updated set.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepgen::{KeywordSet, StepKind};
    ///
    /// let set = KeywordSet::new().with(StepKind::Given, ["* ", "Soit "]);
    /// assert_eq!(set.keywords(StepKind::Given), ["* ", "Soit "]);
    /// assert!(set.keywords(StepKind::When).is_empty());
    /// ```
    #[must_use]
    pub fn with<I, S>(mut self, kind: StepKind, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slot_mut(kind)
            .extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Spellings registered for `kind`, in declaration order.
    #[must_use]
    pub fn keywords(&self, kind: StepKind) -> &[String] {
        match kind {
            StepKind::Given => &self.given,
            StepKind::When => &self.when,
            StepKind::Then => &self.then,
            StepKind::And => &self.and,
            StepKind::But => &self.but,
        }
    }

    /// Iterate over every literal spelling paired with its kind, skipping
    /// wildcard entries.
    pub fn literal_keywords(&self) -> impl Iterator<Item = (StepKind, &str)> {
        StepKind::ALL.into_iter().flat_map(move |kind| {
            self.keywords(kind)
                .iter()
                .filter(|keyword| !keyword.contains(WILDCARD_MARKER))
                .map(move |keyword| (kind, keyword.as_str()))
        })
    }

    fn slot_mut(&mut self, kind: StepKind) -> &mut Vec<String> {
        match kind {
            StepKind::Given => &mut self.given,
            StepKind::When => &mut self.when,
            StepKind::Then => &mut self.then,
            StepKind::And => &mut self.and,
            StepKind::But => &mut self.but,
        }
    }
}

/// Mapping from locale code to [`KeywordSet`].
#[derive(Debug, Clone, Default)]
pub struct LanguageTable {
    languages: HashMap<String, KeywordSet>,
}

static BUILTIN: LazyLock<LanguageTable> = LazyLock::new(builtin::table);

impl LanguageTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide table of built-in Gherkin dialects.
    ///
    /// Initialised on first use and never modified afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepgen::{LanguageTable, StepKind};
    ///
    /// let french = LanguageTable::builtin().get("fr").unwrap();
    /// assert!(french.keywords(StepKind::Given).iter().any(|k| k == "Soit "));
    /// ```
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Register or replace the keyword set for `code`, returning the updated
    /// table.
    #[must_use]
    pub fn with_language(mut self, code: impl Into<String>, keywords: KeywordSet) -> Self {
        self.languages.insert(code.into(), keywords);
        self
    }

    /// Look up the keyword set for `code`.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&KeywordSet> {
        self.languages.get(code)
    }

    /// Whether the table knows `code`.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// Locale codes known to the table, sorted.
    #[must_use]
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn literal_keywords_skip_wildcards() {
        let set = KeywordSet::new()
            .with(StepKind::Given, ["* ", "Soit "])
            .with(StepKind::And, ["* ", "Et "]);
        let literals: Vec<_> = set.literal_keywords().collect();
        assert_eq!(
            literals,
            vec![(StepKind::Given, "Soit "), (StepKind::And, "Et ")]
        );
    }

    #[test]
    fn builtin_table_covers_every_kind() {
        let table = LanguageTable::builtin();
        for code in table.codes() {
            let Some(set) = table.get(code) else {
                panic!("missing built-in language {code}");
            };
            for kind in StepKind::ALL {
                assert!(
                    set.keywords(kind)
                        .iter()
                        .any(|keyword| !keyword.contains(WILDCARD_MARKER)),
                    "{code} has no literal keyword for {kind}"
                );
            }
        }
    }

    #[rstest]
    #[case("ko", "만일", StepKind::When)]
    #[case("zh-TW", "假如", StepKind::Given)]
    #[case("en-pirate", "Gangway! ", StepKind::Given)]
    #[case("ar", "لكن ", StepKind::But)]
    fn builtin_table_covers_full_catalogue(
        #[case] code: &str,
        #[case] keyword: &str,
        #[case] kind: StepKind,
    ) {
        let Some(set) = LanguageTable::builtin().get(code) else {
            panic!("missing built-in language {code}");
        };
        assert!(set.keywords(kind).iter().any(|k| k == keyword));
    }

    #[test]
    fn builtin_table_is_shared() {
        assert!(std::ptr::eq(LanguageTable::builtin(), LanguageTable::builtin()));
    }

    #[test]
    fn custom_table_lookup() {
        let table = LanguageTable::new()
            .with_language("x-test", KeywordSet::new().with(StepKind::When, ["Wenn "]));
        assert!(table.contains("x-test"));
        assert!(!table.contains("fr"));
        assert_eq!(table.codes(), vec!["x-test"]);
    }
}
