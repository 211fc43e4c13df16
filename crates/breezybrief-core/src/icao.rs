//! ICAO airport-code normalization and validation.

/// Shortest normalized query that is worth sending to the airport search.
pub const MIN_QUERY_LEN: usize = 2;

/// Length of a complete ICAO code.
pub const ICAO_LEN: usize = 4;

/// Trim surrounding whitespace and uppercase.
///
/// Total and idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    text.trim().to_uppercase()
}

/// `true` iff `code` is exactly four characters from `[A-Z0-9]`.
///
/// Only used when the form is submitted; autocomplete accepts any fragment.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == ICAO_LEN
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// Whether a normalized query is long enough to trigger a search.
pub fn is_searchable(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_uppercases() {
        assert_eq!(normalize("  katl "), "KATL");
        assert_eq!(normalize("\tkDen\n"), "KDEN");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "katl",
            "  Atlanta Intl ",
            "straße",
            "ǆ",
            "k1a2",
            "\u{00a0}egll\u{00a0}",
            "",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("KATL"));
        assert!(is_valid_code("K1A2"));
        assert!(is_valid_code("0000"));

        assert!(!is_valid_code("AB1"));
        assert!(!is_valid_code("KATLX"));
        assert!(!is_valid_code("katl"));
        assert!(!is_valid_code("KA-L"));
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("KÄTL"));
    }

    #[test]
    fn test_is_searchable() {
        assert!(!is_searchable(""));
        assert!(!is_searchable("K"));
        assert!(is_searchable("KA"));
        assert!(is_searchable("ATLANTA"));
    }
}
