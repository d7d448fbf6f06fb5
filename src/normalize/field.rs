//! Free-form identifier fields.

use std::collections::HashSet;

/// Split a free-form field into identifier strings.
///
/// Accepts an optional surrounding `[...]`, separators of commas and/or
/// whitespace, and single or double quotes around entries. Duplicates are
/// dropped, first occurrence wins.
pub fn parse_entity_field(field: &str) -> Vec<String> {
    let body = field.trim();
    let body = body.strip_prefix('[').unwrap_or(body);
    let body = body.strip_suffix(']').unwrap_or(body);

    let mut seen = HashSet::new();
    body.split(|c: char| c == ',' || c.is_whitespace())
        .map(|token| token.trim().trim_matches(|c: char| c == '"' || c == '\'').trim())
        .filter(|token| !token.is_empty())
        .filter(|token| seen.insert(token.to_string()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mixed_separators_and_quotes() {
        let parsed = parse_entity_field(r#"["HGNC:6019", 'KEAP1',  11876
            HGNC:6019]"#);
        assert_eq!(parsed, vec!["HGNC:6019", "KEAP1", "11876"]);
    }

    #[test]
    fn test_plain_lines() {
        assert_eq!(parse_entity_field("TP53\nMDM2\n"), vec!["TP53", "MDM2"]);
    }

    #[test]
    fn test_empty() {
        assert!(parse_entity_field("  [ ] ").is_empty());
        assert!(parse_entity_field(",,,").is_empty());
    }
}
