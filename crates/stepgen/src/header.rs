//! Detection of the `# language:` header.

/// Literal prefix announcing a feature's dialect.
pub const LANGUAGE_HEADER: &str = "# language: ";

/// Extract the locale code declared on the first line of `text`.
///
/// The header must start at offset zero; leading whitespace, a byte-order
/// mark, or a header on any later line are not recognised. A trailing `\r`
/// is not part of the code, and an empty code counts as no header.
///
/// # Examples
///
/// ```
/// use stepgen::detect_language;
///
/// assert_eq!(detect_language("# language: fr\nFonctionnalité: x\n"), Some("fr"));
/// assert_eq!(detect_language("Feature: x\n"), None);
/// assert_eq!(detect_language("  # language: fr\n"), None);
/// ```
#[must_use]
pub fn detect_language(text: &str) -> Option<&str> {
    let first_line = text.lines().next()?;
    first_line
        .strip_prefix(LANGUAGE_HEADER)
        .map(|code| code.strip_suffix('\r').unwrap_or(code))
        .filter(|code| !code.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("# language: fr\nFonctionnalité: x\n", Some("fr"))]
    #[case("# language: zh-CN\r\nFeature: x\r\n", Some("zh-CN"))]
    #[case("# language: de", Some("de"))]
    #[case("# language: \nFeature: x\n", None)]
    #[case("#language: fr\n", None)]
    #[case("# Language: fr\n", None)]
    #[case("Feature: x\n# language: fr\n", None)]
    #[case("", None)]
    fn detects_header_on_first_line(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(detect_language(text), expected);
    }
}
